use std::fmt;

/// Reduced-precision format being simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DowncastMode {
    /// 1 sign, 5 exponent, 10 mantissa bits
    #[default]
    HalfLike,
    /// 1 sign, 8 exponent, 7 mantissa bits
    BFLike,
}

impl DowncastMode {
    /// Only the exact name `bf16` selects [`DowncastMode::BFLike`]; every other name
    /// (including typos) falls back to [`DowncastMode::HalfLike`].
    pub fn from_name(name: &str) -> Self {
        if name == "bf16" {
            DowncastMode::BFLike
        } else {
            DowncastMode::HalfLike
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DowncastMode::HalfLike => "fp16",
            DowncastMode::BFLike => "bf16",
        }
    }
}

impl fmt::Display for DowncastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
