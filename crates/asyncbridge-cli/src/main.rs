//! asyncbridge CLI - AsyncAPI emitter and validator
//!
//! Commands:
//! - `asyncbridge emit` - Emit an AsyncAPI document from a program description
//! - `asyncbridge validate` - Validate AsyncAPI documents
//! - `asyncbridge check` - Validate an asyncbridge.toml configuration

use clap::{Parser, Subcommand};

mod check;
mod emit;
mod validate;

#[derive(Parser)]
#[command(name = "asyncbridge")]
#[command(author, version, about = "AsyncAPI 3.0 emitter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit an AsyncAPI document
    Emit(emit::EmitArgs),

    /// Validate AsyncAPI documents (JSON or YAML)
    Validate {
        /// Documents to validate
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Validate an asyncbridge.toml configuration
    Check {
        /// Path to asyncbridge.toml (default: ./asyncbridge.toml)
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Emit(args) => {
            emit::run(args)?;
        }
        Commands::Validate { files } => {
            validate::run(&files)?;
        }
        Commands::Check { config } => {
            check::check(config)?;
        }
    }

    Ok(())
}
