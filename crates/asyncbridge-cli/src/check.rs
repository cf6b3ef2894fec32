//! Check command implementation

use anyhow::{Context, Result};
use asyncbridge_core::{CONFIG_FILE_NAME, EmitterOptions};
use std::path::Path;

/// Check command implementation
pub fn check(config_path: Option<String>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| CONFIG_FILE_NAME.to_string());

    println!("Checking configuration: {}", path);

    let options = load(Path::new(&path))?;

    println!("✓ Title: {} v{}", options.title, options.version);
    println!("✓ Output: {}.{}", options.output_file, options.file_type.extension());
    println!("✓ Log level: {}", options.log_level()?);
    println!("\nConfiguration is valid!");

    Ok(())
}

/// Load and validate a configuration file
pub fn load(path: &Path) -> Result<EmitterOptions> {
    EmitterOptions::load(path).with_context(|| format!("Invalid configuration: {}", path.display()))
}
