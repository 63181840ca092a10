//! Relative error between a literal and its simulated downcast, and the tier that
//! error falls into.

/// Classification bucket driving diagnostics and rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Converts with zero error
    Exact,
    /// Converts with a non-zero error that is still within the threshold
    SafeWithError,
    /// Error exceeds the threshold
    Unsafe,
}

impl Tier {
    pub fn is_safe(self) -> bool {
        !matches!(self, Tier::Unsafe)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub relative_error: f64,
    pub safe: bool,
    pub tier: Tier,
}

/// `|original - downcast| / |original|`, made total:
///
/// * A zero original gives `0` if the downcast is zero too, and `+inf` otherwise.
/// * A non-finite original gives `+inf`.
/// * A NaN quotient is reported as `+inf`.
///
/// The result is therefore always `>= 0` and never NaN.
pub fn relative_error(original: f64, downcast: f32) -> f64 {
    let downcast = f64::from(downcast);

    if !original.is_finite() {
        return f64::INFINITY;
    }
    if original == 0.0 {
        return if downcast == 0.0 { 0.0 } else { f64::INFINITY };
    }

    let error = (original - downcast).abs() / original.abs();
    if error.is_nan() { f64::INFINITY } else { error }
}

/// Classify against `threshold`.
///
/// The threshold is inclusive, and a zero error is always [`Tier::Exact`] and safe. A
/// negative or NaN threshold behaves like `0` ([`crate::Config`] rejects both anyway).
pub fn classify(original: f64, downcast: f32, threshold: f64) -> Classification {
    let relative_error = relative_error(original, downcast);
    // f64::max ignores NaN
    let safe = relative_error <= threshold.max(0.0);
    let tier = if relative_error == 0.0 {
        Tier::Exact
    } else if safe {
        Tier::SafeWithError
    } else {
        Tier::Unsafe
    };

    Classification {
        relative_error,
        safe,
        tier,
    }
}
