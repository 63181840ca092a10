//! Lexes C and C++ source text just far enough to find floating-point literals.
//!
//! `c_lexer` walks the whole text, skipping comments, `#include`-style directives, string
//! and character literals and identifiers, and returns the byte range of every preprocessing number. `float_literal`
//! then decides whether one preprocessing number is a floating literal:
//!
//! * Decimal: `1.`, `.5`, `1.5`, `1e5`, `1.5e-3`
//! * Hexadecimal: `0x1.8p3`, `0x1p-2`
//! * Digit separators: `1'000.5`
//! * Suffix `f`/`F` (float), `l`/`L` (long double, evaluated as double) or none (double)
//!
//! Integers and literals with other suffixes (including user-defined ones) are not
//! floating literals. Raw string literals are not supported; a `"` inside one will
//! confuse the lexer.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    None,
    Float,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatLiteral {
    /// Value as the compiler would see it: a `f` literal is rounded to `f32` first
    pub value: f64,
    pub suffix: Suffix,
}

#[derive(Debug, Clone, PartialEq)]
enum Body<'a> {
    Decimal(&'a str),
    /// Hex significand (may contain '.'), binary exponent
    Hex(&'a str, &'a str),
}

peg::parser! {
    pub grammar c_lexer() for str {
        rule ident_start() = ['a'..='z' | 'A'..='Z' | '_' | '$']
        rule ident_char() = ['a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '$']
        rule digit() = ['0'..='9']

        rule line_comment() = "//" [^ '\n']*
        rule block_comment() = "/*" (!"*/" [_])* "*/"

        // Unterminated literals don't match, so a stray quote (e.g. in an #error line)
        // only swallows itself
        rule escape() = "\\" [_]
        rule string_literal() = "\"" (escape() / [^ '"' | '\\' | '\n'])* "\""
        rule char_literal() = "'" (escape() / [^ '\'' | '\\' | '\n'])+ "'"

        // Header names aren't tokenized like code (`<glib-2.0/glib.h>`), so skip the whole
        // directive line. A block comment may still start on it and run past the end.
        rule header_name()
            = "#" [' ' | '\t']* ("include_next" / "include" / "import") (block_comment() / [^ '\n'])*

        // Also covers encoding prefixes (u8, L, ...) in front of string literals
        rule identifier() = ident_start() ident_char()*

        rule pp_number() -> Range<usize>
            = start:position!() ("." digit() / digit()) pp_number_tail()* end:position!() { start..end }

        rule pp_number_tail()
            = ['e' | 'E' | 'p' | 'P'] ['+' | '-']
            / "'" ident_char()
            / ident_char()
            / "."

        rule token() -> Option<Range<usize>>
            = (header_name() / line_comment() / block_comment() / string_literal() / char_literal() / identifier()) { None }
            / n:pp_number() { Some(n) }
            / [_] { None }

        pub rule pp_numbers() -> Vec<Range<usize>>
            = t:token()* { t.into_iter().flatten().collect() }
    }
}

peg::parser! {
    grammar float_literal() for str {
        rule digits() = ['0'..='9'] ("'"? ['0'..='9'])*
        rule hex_digits()
            = ['0'..='9' | 'a'..='f' | 'A'..='F'] ("'"? ['0'..='9' | 'a'..='f' | 'A'..='F'])*

        rule exponent() = ['e' | 'E'] ['+' | '-']? digits()

        rule decimal() -> Body<'input>
            = s:$(
                digits()? "." digits() exponent()?
                / digits() "." exponent()?
                / digits() exponent()
            ) { Body::Decimal(s) }

        rule hexadecimal() -> Body<'input>
            = ("0x" / "0X")
              m:$(hex_digits()? "." hex_digits() / hex_digits() "."?)
              ['p' | 'P'] e:$(['+' | '-']? digits())
            { Body::Hex(m, e) }

        rule suffix() -> Suffix
            = ['f' | 'F'] { Suffix::Float }
            / ['l' | 'L'] { Suffix::Long }
            / { Suffix::None }

        pub rule literal() -> (Body<'input>, Suffix)
            = b:(hexadecimal() / decimal()) s:suffix() { (b, s) }
    }
}

/// Interpret a preprocessing number. Returns `None` if it is not a floating literal.
pub fn parse_float_literal(text: &str) -> Option<FloatLiteral> {
    let (body, suffix) = float_literal::literal(text).ok()?;

    let value = match body {
        Body::Decimal(s) => {
            let s = s.replace('\'', "");
            if suffix == Suffix::Float {
                f64::from(s.parse::<f32>().ok()?)
            } else {
                s.parse::<f64>().ok()?
            }
        }
        Body::Hex(m, e) => {
            let v = parse_hex(m, e);
            if suffix == Suffix::Float {
                f64::from(v as f32)
            } else {
                v
            }
        }
    };

    Some(FloatLiteral { value, suffix })
}

/// Value of a hexadecimal floating literal, from its significand digits (with optional
/// '.' and digit separators) and its binary exponent.
fn parse_hex(significand: &str, exponent: &str) -> f64 {
    // Keep up to 60 bits of significand; anything further only matters for rounding,
    // so it is folded into a sticky bit.
    let mut bits: u64 = 0;
    let mut scale: i64 = 0;
    let mut sticky = false;
    let mut fraction = false;

    for c in significand.chars() {
        if c == '.' {
            fraction = true;
            continue;
        }
        let Some(d) = c.to_digit(16) else {
            continue;
        };
        if bits >> 56 == 0 {
            bits = (bits << 4) | u64::from(d);
            if fraction {
                scale -= 4;
            }
        } else {
            sticky |= d != 0;
            if !fraction {
                scale += 4;
            }
        }
    }
    if sticky {
        bits |= 1;
    }

    let exponent = exponent.replace('\'', "");
    let exponent = exponent.parse::<i64>().unwrap_or(if exponent.starts_with('-') {
        i64::MIN / 2
    } else {
        i64::MAX / 2
    });

    ldexp(bits as f64, exponent.saturating_add(scale))
}

/// `x * 2^n`, scaling in steps so every factor is a normal power of two
fn ldexp(mut x: f64, n: i64) -> f64 {
    let mut n = n.clamp(-4000, 4000) as i32;
    while n > 1023 {
        x *= exp2i(1023);
        n -= 1023;
    }
    while n < -1022 {
        x *= exp2i(-1022);
        n += 1022;
    }
    x * exp2i(n)
}

/// 2<sup>`n`</sup> for `n` in the normal exponent range
fn exp2i(n: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&n));
    f64::from_bits(((0x3FF + n) as u64) << 52)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exp2i() {
        (-1022..=1023).for_each(|n| assert_eq!(exp2i(n), f64::from(n).exp2()));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("1", "0"), 1.0);
        assert_eq!(parse_hex("1.8", "1"), 3.0);
        assert_eq!(parse_hex(".8", "0"), 0.5);
        assert_eq!(parse_hex("A", "-2"), 2.5);
        assert_eq!(parse_hex("1'0", "+0"), 16.0);
        assert_eq!(parse_hex("1", "-1074"), f64::from_bits(1));
        assert_eq!(parse_hex("1", "1024"), f64::INFINITY);
        assert_eq!(parse_hex("1", "99999999999999999999999"), f64::INFINITY);
        assert_eq!(parse_hex("1", "-99999999999999999999999"), 0.0);
    }

    #[test]
    fn test_parse_hex_long_significand() {
        // Digits past the first 60 bits only feed the sticky bit
        assert_eq!(parse_hex("1000000000000001", "0"), 2f64.powi(60));
        assert_eq!(parse_hex("1.000000000000000001", "0"), 1.0);
        assert_eq!(parse_hex("10000000000000000", "-8"), 2f64.powi(56));
    }
}
