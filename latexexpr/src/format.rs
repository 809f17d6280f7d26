//! Printf-style formatting of numeric results.
//!
//! Every [`Variable`](crate::Variable), [`Operation`](crate::Operation) and
//! [`Expression`](crate::Expression) carries a [`NumberFormat`] used to render its result. The
//! format is usually written as a printf-style string and parsed with [`str::parse`]:
//!
//! ```
//! use latexexpr::NumberFormat;
//!
//! let format: NumberFormat = "%.3e".parse().unwrap();
//! assert_eq!(format, NumberFormat::Exponential(3));
//! assert_eq!(format.format(1234.56), "1.235e+03");
//! ```

use crate::error::InvalidFormat;
use latexexpr_error::Error;
use std::{fmt::{self, Display, Formatter}, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The precision used by printf when none is given.
const DEFAULT_PRECISION: usize = 6;

/// The different ways to format a number.
///
/// The variants follow the semantics of the printf conversions `%f`, `%g`, `%e` and `%d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumberFormat {
    /// `%.Nf`: decimal notation with `N` digits after the decimal point.
    ///
    /// `%.2f` is the default option.
    Fixed(usize),

    /// `%.Ng`: `N` significant digits, in decimal notation unless the exponent is smaller than -4
    /// or at least `N`. Trailing zeros are removed.
    General(usize),

    /// `%.Ne`: scientific notation with `N` digits after the decimal point, and an exponent of at
    /// least two digits (`1.50e+03`).
    Exponential(usize),

    /// `%d`: the integer part of the number.
    Integer,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::Fixed(2)
    }
}

impl NumberFormat {
    /// Formats the given number.
    pub fn format(self, value: f64) -> String {
        if !value.is_finite() {
            return non_finite(value);
        }

        match self {
            Self::Fixed(precision) => format!("{:.*}", precision, value),
            Self::General(precision) => general(value, precision),
            Self::Exponential(precision) => exponential(value, precision),
            Self::Integer => {
                let truncated = value.trunc();
                // `-0.5` truncates to `-0`, which printf renders as `0`
                let truncated = if truncated == 0.0 { 0.0 } else { truncated };
                format!("{:.0}", truncated)
            },
        }
    }
}

/// Displays the format as the printf-style string it is parsed from.
impl Display for NumberFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(precision) => write!(f, "%.{}f", precision),
            Self::General(precision) => write!(f, "%.{}g", precision),
            Self::Exponential(precision) => write!(f, "%.{}e", precision),
            Self::Integer => write!(f, "%d"),
        }
    }
}

impl FromStr for NumberFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::new(s, InvalidFormat { format: s.to_string() });

        let spec = s.strip_prefix('%').ok_or_else(invalid)?;
        let conversion = spec.chars().last().ok_or_else(invalid)?;
        let precision = &spec[..spec.len() - conversion.len_utf8()];

        let precision = match precision.strip_prefix('.') {
            // `%.f` means a precision of zero
            Some("") => Some(0),
            Some(digits) => Some(digits.parse::<usize>().map_err(|_| invalid())?),
            None if precision.is_empty() => None,
            None => return Err(invalid()),
        };

        match conversion {
            'f' => Ok(Self::Fixed(precision.unwrap_or(DEFAULT_PRECISION))),
            'g' => Ok(Self::General(precision.unwrap_or(DEFAULT_PRECISION))),
            'e' => Ok(Self::Exponential(precision.unwrap_or(DEFAULT_PRECISION))),
            'd' | 'i' if precision.is_none() => Ok(Self::Integer),
            _ => Err(invalid()),
        }
    }
}

/// Renders infinities and NaN the way printf does.
fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}

/// Splits Rust's `{:e}` output into its mantissa and exponent.
fn split_exponent(formatted: &str) -> (&str, i32) {
    match formatted.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (formatted, 0),
    }
}

/// Formats an exponent with an explicit sign and at least two digits.
fn exponent_suffix(exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("e{}{:02}", sign, exp.abs())
}

fn exponential(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    let (mantissa, exp) = split_exponent(&formatted);
    format!("{}{}", mantissa, exponent_suffix(exp))
}

/// Removes trailing zeros after the decimal point, and the decimal point itself if nothing
/// remains after it.
fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn general(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // the exponent is taken after rounding to the requested number of digits
    let formatted = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = split_exponent(&formatted);

    if exp < -4 || exp >= precision as i32 {
        format!("{}{}", strip_zeros(mantissa), exponent_suffix(exp))
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        strip_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Renders a result with the given format and exponent. Negative values are wrapped in
/// parentheses, and a non-zero exponent `e` renders the value as `m \cdot 10^{e}`.
pub(crate) fn fmt_result(value: f64, format: NumberFormat, exponent: i32) -> String {
    if exponent == 0 {
        let formatted = format.format(value);
        return if value < 0.0 {
            format!(r"\left( {} \right)", formatted)
        } else {
            formatted
        };
    }

    let mantissa = format.format(value * 10f64.powi(-exponent));
    if value < 0.0 {
        format!(r"\left( {} \cdot 10^{{{}}} \right)", mantissa, exponent)
    } else {
        format!(r"{{ {} \cdot 10^{{{}}} }}", mantissa, exponent)
    }
}

/// Renders a unit with the given unit format, where `%s` is replaced with the unit.
pub(crate) fn fmt_unit(unit_format: &str, unit: &str) -> String {
    unit_format.replacen("%s", unit, 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn fixed() {
        assert_eq!(NumberFormat::Fixed(2).format(3.254), "3.25");
        assert_eq!(NumberFormat::Fixed(2).format(8.875), "8.88");
        assert_eq!(NumberFormat::Fixed(0).format(2.4), "2");
        assert_eq!(NumberFormat::Fixed(3).format(-1.0), "-1.000");
    }

    #[test]
    fn general() {
        let g = NumberFormat::General(6);
        assert_eq!(g.format(2.0), "2");
        assert_eq!(g.format(-2.1), "-2.1");
        assert_eq!(g.format(0.0001), "0.0001");
        assert_eq!(g.format(0.00001), "1e-05");
        assert_eq!(g.format(100000.0), "100000");
        assert_eq!(g.format(1000000.0), "1e+06");
        assert_eq!(g.format(123456789.0), "1.23457e+08");
        assert_eq!(g.format(0.0), "0");
        assert_eq!(NumberFormat::General(3).format(3.14159), "3.14");
        assert_eq!(NumberFormat::General(0).format(27.0), "3e+01");
    }

    #[test]
    fn general_rounds_into_next_exponent() {
        // six significant digits of 999999.7 carry into the next power of ten
        assert_eq!(NumberFormat::General(6).format(999999.7), "1e+06");
        assert_eq!(NumberFormat::General(2).format(9.96), "10");
    }

    #[test]
    fn exponential() {
        assert_eq!(NumberFormat::Exponential(3).format(1234.56), "1.235e+03");
        assert_eq!(NumberFormat::Exponential(2).format(0.00012), "1.20e-04");
        assert_eq!(NumberFormat::Exponential(6).format(-5.0), "-5.000000e+00");
    }

    #[test]
    fn integer() {
        assert_eq!(NumberFormat::Integer.format(3.7), "3");
        assert_eq!(NumberFormat::Integer.format(-3.7), "-3");
        assert_eq!(NumberFormat::Integer.format(-0.2), "0");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(NumberFormat::Fixed(2).format(f64::INFINITY), "inf");
        assert_eq!(NumberFormat::General(6).format(f64::NEG_INFINITY), "-inf");
        assert_eq!(NumberFormat::Integer.format(f64::NAN), "nan");
    }

    #[test]
    fn parse() {
        assert_eq!("%.2f".parse::<NumberFormat>().unwrap(), NumberFormat::Fixed(2));
        assert_eq!("%f".parse::<NumberFormat>().unwrap(), NumberFormat::Fixed(6));
        assert_eq!("%g".parse::<NumberFormat>().unwrap(), NumberFormat::General(6));
        assert_eq!("%.4g".parse::<NumberFormat>().unwrap(), NumberFormat::General(4));
        assert_eq!("%e".parse::<NumberFormat>().unwrap(), NumberFormat::Exponential(6));
        assert_eq!("%.3e".parse::<NumberFormat>().unwrap(), NumberFormat::Exponential(3));
        assert_eq!("%d".parse::<NumberFormat>().unwrap(), NumberFormat::Integer);
        assert_eq!("%.f".parse::<NumberFormat>().unwrap(), NumberFormat::Fixed(0));
    }

    #[test]
    fn parse_invalid() {
        for s in ["", "%", "2f", "%.2x", "%.af", "%5f", "%.2d"] {
            let err = s.parse::<NumberFormat>().unwrap_err();
            assert!(err.is::<InvalidFormat>(), "{s:?} should be invalid");
        }
    }

    #[test]
    fn display_round_trips() {
        for format in [NumberFormat::Fixed(2), NumberFormat::General(6), NumberFormat::Integer] {
            assert_eq!(format.to_string().parse::<NumberFormat>().unwrap(), format);
        }
    }

    #[test]
    fn results() {
        let f = NumberFormat::default();
        assert_eq!(fmt_result(3.25, f, 0), "3.25");
        assert_eq!(fmt_result(-2.0, f, 0), r"\left( -2.00 \right)");
        assert_eq!(fmt_result(0.0434, f, -2), r"{ 4.34 \cdot 10^{-2} }");
        assert_eq!(fmt_result(-1500.0, f, 3), r"\left( -1.50 \cdot 10^{3} \right)");
    }

    #[test]
    fn units() {
        assert_eq!(fmt_unit(r"\mathrm{%s}", "kN"), r"\mathrm{kN}");
        assert_eq!(fmt_unit("%s", "m"), "m");
    }
}
