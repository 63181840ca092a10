//! `downcast check` finds float literals that survive narrowing to a 16-bit format and
//! rewrites them; `downcast bench` times the result against the original.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use downcast_checker::{
    bench::{self, BenchSpec},
    check::{StderrSink, check_source, write_artifacts},
    file::SourceFile,
};
use downcast_engine::Config;
use log::info;
use relative_path::RelativePathBuf;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log every literal
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a C/C++ source file and rewrite its safely downcastable literals
    Check {
        /// C/C++ input file
        input: RelativePathBuf,

        /// Rewritten source output
        #[arg(short, long, default_value = "modified.cpp")]
        output: PathBuf,

        /// JSON report output
        #[arg(short, long, default_value = "float_map.json")]
        report: PathBuf,

        /// Maximum acceptable relative error
        #[arg(short, long, default_value = "0.001")]
        threshold: String,

        /// Target format: fp16 or bf16
        #[arg(short, long, default_value = "fp16")]
        mode: String,

        /// Plugin-style argument (-threshold=N or -mode=NAME), applied after the flags
        #[arg(long = "plugin-arg", allow_hyphen_values = true)]
        plugin_args: Vec<String>,

        /// Don't print diagnostics
        #[arg(short, long)]
        quiet: bool,
    },

    /// Compile and time the original and rewritten sources
    Bench {
        original: PathBuf,
        modified: PathBuf,

        #[arg(long, default_value = "clang++")]
        compiler: String,

        /// Compiler flag (repeatable)
        #[arg(long = "flag", default_value = "-O3", allow_hyphen_values = true)]
        flags: Vec<String>,

        /// JSON results output
        #[arg(short, long, default_value = "run_test.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_max_level(if cli.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Check {
            input,
            output,
            report,
            threshold,
            mode,
            plugin_args,
            quiet,
        } => {
            // Validate everything before touching the input
            let config = Config::from_plugin_args(
                [format!("-threshold={threshold}"), format!("-mode={mode}")]
                    .into_iter()
                    .chain(plugin_args),
            )?;

            let source = SourceFile::read(&input, Path::new("."))?;
            let result = check_source(&source, config, StderrSink { quiet })?;
            write_artifacts(&result, &output, &report)?;
            info!(
                "rewrote {} of {} literals into {}, report in {}",
                result.summary.exact + result.summary.within_threshold,
                result.summary.total(),
                output.display(),
                report.display()
            );
        }

        Command::Bench {
            original,
            modified,
            compiler,
            flags,
            output,
        } => {
            let out_dir = binary_dir(&output);
            let result = bench::run(&BenchSpec {
                compiler,
                flags,
                original,
                modified,
                out_dir,
            })?;
            std::fs::write(&output, bench::results_json(&result)?)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!("results in {}", output.display());
        }
    }

    Ok(())
}

/// Binaries go next to the results file
fn binary_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_owned(),
        _ => PathBuf::from("."),
    }
}
