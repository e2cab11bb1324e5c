use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use rayon::prelude::*;
use sharpcheck_compiler::{check_file, CheckOptions};
use sharpcheck_compiler_semantic::LanguageVersion;
use tracing::{info, Level};

/// sharpcheck - C# member declaration rules over symbol-model files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Symbol-model JSON files to check
    #[arg(value_name = "MODEL_FILE", required = true, value_hint = ValueHint::FilePath)]
    inputs: Vec<PathBuf>,

    /// Language version to check against (7.3 .. 12.0, latest, preview)
    #[arg(long, value_name = "VERSION")]
    lang_version: Option<LanguageVersion>,

    /// Target a runtime without static abstract interface members
    #[arg(long)]
    no_static_abstract_runtime: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let overrides = CheckOptions {
        language_version: args.lang_version,
        no_static_abstract_runtime: args.no_static_abstract_runtime,
    };
    let results: Vec<_> = args
        .inputs
        .par_iter()
        .map(|path| check_file(path, overrides))
        .collect();

    let mut errors = 0;
    for (path, result) in args.inputs.iter().zip(results) {
        let output = result.with_context(|| format!("Error checking '{}'", path.display()))?;
        if !output.diagnostics.is_empty() {
            println!("{}", output.render(!args.no_color));
        }
        info!("{}: {}", output.path, output.diagnostics.summary());
        errors += output.diagnostics.errors().len();
    }

    if errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}
