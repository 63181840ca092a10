//! Compares the run time of the original and the rewritten program.
//!
//! Both sources are compiled with the same compiler and flags, and each binary is run
//! once with its output discarded. Timing is wall-clock and inherently noisy.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use log::{info, warn};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct BenchSpec {
    pub compiler: String,
    pub flags: Vec<String>,
    pub original: PathBuf,
    pub modified: PathBuf,
    /// Where the compiled binaries are placed
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchResult {
    pub original_time_sec: f64,
    pub modified_time_sec: f64,
    /// `original / modified`; `None` if the modified run took no measurable time
    pub speedup_ratio: Option<f64>,
}

impl BenchResult {
    pub fn new(original: Duration, modified: Duration) -> Self {
        let original_time_sec = round_to(original.as_secs_f64(), 6);
        let modified_time_sec = round_to(modified.as_secs_f64(), 6);
        let speedup_ratio =
            (modified_time_sec > 0.0).then(|| round_to(original_time_sec / modified_time_sec, 4));
        Self {
            original_time_sec,
            modified_time_sec,
            speedup_ratio,
        }
    }
}

/// Round to `decimals` places after the point
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}

fn compile(spec: &BenchSpec, source: &Path, exe: &Path) -> Result<()> {
    info!("compiling {} -> {}", source.display(), exe.display());
    let status = Command::new(&spec.compiler)
        .args(&spec.flags)
        .arg(source)
        .arg("-o")
        .arg(exe)
        .status()
        .with_context(|| format!("failed to run {}", spec.compiler))?;
    if !status.success() {
        bail!("{} failed to compile {} ({status})", spec.compiler, source.display());
    }
    Ok(())
}

fn time_run(exe: &Path) -> Result<Duration> {
    let exe = std::path::absolute(exe)?;
    let start = Instant::now();
    let status = Command::new(&exe)
        .stdout(Stdio::null())
        .status()
        .with_context(|| format!("failed to run {}", exe.display()))?;
    let elapsed = start.elapsed();
    if !status.success() {
        warn!("{} exited with {status}", exe.display());
    }
    info!("{}: {:.6}s", exe.display(), elapsed.as_secs_f64());
    Ok(elapsed)
}

pub fn run(spec: &BenchSpec) -> Result<BenchResult> {
    for source in [&spec.original, &spec.modified] {
        if !source.is_file() {
            bail!("{} does not exist", source.display());
        }
    }

    let original_exe = spec.out_dir.join("original");
    let modified_exe = spec.out_dir.join("modified");
    compile(spec, &spec.original, &original_exe)?;
    compile(spec, &spec.modified, &modified_exe)?;

    let original = time_run(&original_exe)?;
    let modified = time_run(&modified_exe)?;

    Ok(BenchResult::new(original, modified))
}

#[derive(Serialize)]
struct BenchEntry<'a> {
    benchmark: &'a BenchResult,
}

/// `[{"benchmark": {...}}]`, pretty-printed
pub fn results_json(result: &BenchResult) -> Result<String> {
    let mut doc = serde_json::to_string_pretty(&[BenchEntry { benchmark: result }])?;
    doc.push('\n');
    Ok(doc)
}
