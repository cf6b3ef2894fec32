//! Validate command implementation

use anyhow::{Result, bail};
use asyncbridge_validator::{DocumentValidator, ValidationResult};

/// Validate command implementation
pub fn run(files: &[String]) -> Result<()> {
    let validator = DocumentValidator::with_cache();
    let results = validator.validate_files(files);

    let mut invalid = 0;
    for (file, result) in files.iter().zip(&results) {
        print!("{}", render(file, result));
        if !result.valid {
            invalid += 1;
        }
    }

    if invalid > 0 {
        bail!("{invalid} of {} document(s) failed validation", files.len());
    }
    println!("\nAll {} document(s) are valid!", files.len());
    Ok(())
}

/// Human-readable report for one document
pub fn render(file: &str, result: &ValidationResult) -> String {
    let mut out = String::new();
    let status = if result.valid { "✓" } else { "✗" };
    out.push_str(&format!(
        "{status} {file} ({} channel(s), {} operation(s), {} schema(s), {}µs)\n",
        result.metrics.channel_count,
        result.metrics.operation_count,
        result.metrics.schema_count,
        result.metrics.duration.as_micros()
    ));
    for issue in &result.errors {
        out.push_str(&format!("    error   {issue}\n"));
    }
    for issue in &result.warnings {
        out.push_str(&format!("    warning {issue}\n"));
    }
    out
}
