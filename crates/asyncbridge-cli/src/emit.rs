//! Emit command implementation

use anyhow::{Context, Result, bail};
use asyncbridge_core::ast::Program;
use asyncbridge_core::{AnnotationState, CONFIG_FILE_NAME, EmitterOptions, FileType};
use asyncbridge_emitter::{EmitError, Emitter, PathContext};
use asyncbridge_logging::{TracingSink, init_logging};
use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Arguments of `asyncbridge emit`
#[derive(Debug, Default, Args)]
pub struct EmitArgs {
    /// Program description: JSON with `program` and `annotations`
    #[arg(short, long)]
    pub input: String,

    /// Path to asyncbridge.toml (default: ./asyncbridge.toml when present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output file template, e.g. "{output-dir}/asyncapi"
    #[arg(long)]
    pub output_file: Option<String>,

    /// Output format (json or yaml)
    #[arg(short = 't', long)]
    pub file_type: Option<FileType>,

    /// Directory substituted for {output-dir}
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Warn about types emitted as generic objects
    #[arg(long)]
    pub strict: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// The front end's hand-over: a resolved program plus its annotations
#[derive(Debug, Deserialize)]
pub struct EmitInput {
    pub program: Program,

    #[serde(default)]
    pub annotations: AnnotationState,
}

impl EmitInput {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse input: {}", path.display()))
    }
}

/// Load configuration and apply command-line overrides
pub fn resolve_options(args: &EmitArgs, cwd: &Path) -> Result<EmitterOptions> {
    let mut options = match &args.config {
        Some(path) => EmitterOptions::load(Path::new(path))
            .with_context(|| format!("Failed to load configuration: {path}"))?,
        None => {
            let default_path = cwd.join(CONFIG_FILE_NAME);
            if default_path.is_file() {
                EmitterOptions::load(&default_path).with_context(|| {
                    format!("Failed to load configuration: {}", default_path.display())
                })?
            } else {
                EmitterOptions::default()
            }
        }
    };

    if let Some(output_file) = &args.output_file {
        options.output_file = output_file.clone();
    }
    if let Some(file_type) = args.file_type {
        options.file_type = file_type;
    }
    if args.strict {
        options.strict = true;
    }
    if let Some(level) = &args.log_level {
        options.log_level = level.clone();
    }

    options.validate().context("Invalid emitter options")?;
    Ok(options)
}

/// Emit command implementation
pub fn run(args: EmitArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let options = resolve_options(&args, &cwd)?;
    init_logging(options.log_level()?);

    let input = EmitInput::from_file(Path::new(&args.input))?;
    let emitter = Emitter::new(options);
    let mut sink = TracingSink::new();

    let emission = match emitter.emit(&input.program, &input.annotations) {
        Ok(emission) => emission,
        Err(EmitError::Rejected { diagnostics }) => {
            sink.report_all(diagnostics);
            bail!(
                "Emission failed with {} error(s) and {} warning(s)",
                sink.error_count(),
                sink.warning_count()
            );
        }
        Err(err) => return Err(err.into()),
    };
    sink.report_all(emission.diagnostics.clone());

    let mut context = PathContext::new(cwd.clone());
    if let Some(dir) = &args.output_dir {
        context = context.with_output_dir(absolute(&cwd, dir));
    }
    let path = emitter.write(&emission, &context)?;

    println!("✓ Operations: {}", emission.operation_count);
    println!("✓ Channels: {}", emission.document.channels.len());
    println!("✓ Schemas: {}", emission.document.components.schemas.len());
    if sink.error_count() > 0 {
        println!("! Bindings dropped: {}", sink.error_count());
    }
    if sink.warning_count() > 0 {
        println!("! Warnings: {}", sink.warning_count());
    }
    println!("\nWrote {}", path.display());

    Ok(())
}

fn absolute(cwd: &Path, dir: &str) -> PathBuf {
    let path = Path::new(dir);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
#[path = "emit/emit_tests.rs"]
mod emit_tests;
