//! Bit-level emulation of narrowing an `f32` to a 16-bit format and widening it back.
//!
//! Both formats are simulated with integer operations on the bit pattern only, so the
//! results do not depend on the host's floating-point environment.
//!
//! This is deliberately not an IEEE 754 conversion:
//!
//! * The mantissa is truncated, never rounded.
//! * The half-like format has no subnormals, infinities or NaNs. Anything whose
//!   re-biased exponent falls outside `1..=30` is flushed to `+0.0`, whatever its sign.
//! * The bf-like format keeps the `f32` exponent and just drops the low 16 bits, so
//!   infinities survive and NaNs may turn into infinities.

use crate::DowncastMode;

const F32_EXP_BIAS: i32 = 127;
const F32_MANTISSA_BITS: u32 = 23;
const F32_EXP_MASK: u32 = 0xFF;
const F32_MANTISSA_MASK: u32 = (1 << F32_MANTISSA_BITS) - 1;

const HALF_EXP_BIAS: i32 = 15;
const HALF_MANTISSA_BITS: u32 = 10;
const HALF_EXP_MASK: u16 = 0x1F;
const HALF_MANTISSA_MASK: u16 = (1 << HALF_MANTISSA_BITS) - 1;
const HALF_DROPPED_BITS: u32 = F32_MANTISSA_BITS - HALF_MANTISSA_BITS;

const BF_DROPPED_BITS: u32 = 16;

fn to_bits(value: f32) -> u32 {
    bytemuck::must_cast(value)
}

fn from_bits(bits: u32) -> f32 {
    bytemuck::must_cast(bits)
}

/// Round-trip `value` through the narrow format selected by `mode`.
pub fn simulate(value: f32, mode: DowncastMode) -> f32 {
    match mode {
        DowncastMode::HalfLike => simulate_half(value),
        DowncastMode::BFLike => simulate_bf(value),
    }
}

pub fn simulate_half(value: f32) -> f32 {
    match narrow_half(value) {
        Some(half) => widen_half(half),
        None => 0.0,
    }
}

pub fn simulate_bf(value: f32) -> f32 {
    widen_bf(narrow_bf(value))
}

/// Narrow to the half-like sign/exponent(5)/mantissa(10) pattern.
///
/// Returns `None` when the value must be flushed to zero, i.e. when the re-biased
/// exponent is `<= 0` or `>= 31`. Zero itself is flushed too, since its exponent
/// field is 0.
pub fn narrow_half(value: f32) -> Option<u16> {
    let bits = to_bits(value);
    let sign = (bits >> 31) as u16;
    let exponent = ((bits >> F32_MANTISSA_BITS) & F32_EXP_MASK) as i32;
    let mantissa = bits & F32_MANTISSA_MASK;

    let half_exp = exponent - F32_EXP_BIAS + HALF_EXP_BIAS;
    if half_exp <= 0 || half_exp >= HALF_EXP_MASK as i32 {
        return None;
    }

    let half_mantissa = (mantissa >> HALF_DROPPED_BITS) as u16;
    Some((sign << 15) | ((half_exp as u16) << HALF_MANTISSA_BITS) | half_mantissa)
}

/// Expand a half-like pattern produced by [`narrow_half`] back to `f32`.
pub fn widen_half(half: u16) -> f32 {
    let sign = u32::from(half >> 15);
    let half_exp = i32::from((half >> HALF_MANTISSA_BITS) & HALF_EXP_MASK);
    let mantissa = u32::from(half & HALF_MANTISSA_MASK);

    let exponent = (half_exp - HALF_EXP_BIAS + F32_EXP_BIAS) as u32;
    from_bits((sign << 31) | (exponent << F32_MANTISSA_BITS) | (mantissa << HALF_DROPPED_BITS))
}

/// Keep the top 16 bits of the `f32` pattern.
pub fn narrow_bf(value: f32) -> u16 {
    (to_bits(value) >> BF_DROPPED_BITS) as u16
}

pub fn widen_bf(bf: u16) -> f32 {
    from_bits(u32::from(bf) << BF_DROPPED_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_one() {
        assert_eq!(narrow_half(1.0), Some(0x3C00));
        assert_eq!(widen_half(0x3C00), 1.0);
    }

    #[test]
    fn half_largest_and_smallest_normal() {
        assert_eq!(narrow_half(65504.0), Some(0x7BFF));
        assert_eq!(narrow_half(6.103515625e-5), Some(0x0400));
        // re-biased exponent 0 and 31
        assert_eq!(narrow_half(3.0517578e-5), None);
        assert_eq!(narrow_half(65536.0), None);
    }

    #[test]
    fn bf_keeps_top_half() {
        assert_eq!(narrow_bf(1.0), 0x3F80);
        assert_eq!(narrow_bf(-2.0), 0xC000);
        assert_eq!(widen_bf(0x3F80), 1.0);
    }
}
