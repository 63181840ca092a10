//! Run configuration. Fixed before any literal is processed.

use log::{info, warn};

use crate::{DowncastMode, Error, Result};

pub const DEFAULT_THRESHOLD: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    threshold: f64,
    mode: DowncastMode,
}

impl Config {
    /// The threshold must be finite and non-negative.
    pub fn new(threshold: f64, mode: DowncastMode) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::ThresholdOutOfRange(threshold));
        }
        Ok(Self { threshold, mode })
    }

    /// Build from textual settings, as given on a command line.
    pub fn parse(threshold: &str, mode: &str) -> Result<Self> {
        Self::new(parse_threshold(threshold)?, parse_mode(mode))
    }

    /// Build from plugin-style arguments: `-threshold=<number>` and `-mode=<name>`.
    ///
    /// Later arguments override earlier ones. Anything else is ignored.
    pub fn from_plugin_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut threshold = DEFAULT_THRESHOLD;
        let mut mode = DowncastMode::default();

        for arg in args {
            let arg = arg.as_ref();
            if let Some(t) = arg.strip_prefix("-threshold=") {
                threshold = parse_threshold(t)?;
            } else if let Some(m) = arg.strip_prefix("-mode=") {
                mode = parse_mode(m);
            } else {
                warn!("ignoring unknown argument {arg:?}");
            }
        }

        Self::new(threshold, mode)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn mode(&self) -> DowncastMode {
        self.mode
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mode: DowncastMode::default(),
        }
    }
}

fn parse_threshold(s: &str) -> Result<f64> {
    s.trim()
        .parse()
        .map_err(|_| Error::InvalidThreshold(s.to_owned()))
}

fn parse_mode(s: &str) -> DowncastMode {
    let mode = DowncastMode::from_name(s);
    if s != mode.name() {
        info!("unknown mode {s:?}, using {mode}");
    }
    mode
}
