//! Field validation
//!
//! One rule set turns raw input text into a typed integer or a
//! [`FieldError`]. Chain ids, decimals, supply and amounts all go through
//! [`validate_integer`], and every one of them is stored as a
//! [`ValidatedField`], so the raw text, the parsed value and the error are
//! always replaced together.
//!
//! Numeric text follows the usual decimal grammar: an optional sign, digits
//! with an optional fractional part, and an optional exponent
//! (`42`, `+7`, `5.0`, `.5`, `1e3`, `2.5E1`). Words such as `Infinity` or
//! `NaN`, hex literals and digit separators are not numbers.

use serde::Serialize;
use std::fmt;

use crate::shared::constants::{
    MAX_DECIMAL_EXPONENT, MSG_NEGATIVE, MSG_NOT_AN_INTEGER, MSG_NOT_A_NUMBER, MSG_TOO_LARGE,
};
use crate::shared::utils::is_valid_ethereum_address;

/// Why a non-empty field has no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldError {
    NotANumber,
    NotAnInteger,
    Negative,
    TooLarge,
}

impl FieldError {
    /// Message rendered next to the field
    pub fn message(&self) -> &'static str {
        match self {
            FieldError::NotANumber => MSG_NOT_A_NUMBER,
            FieldError::NotAnInteger => MSG_NOT_AN_INTEGER,
            FieldError::Negative => MSG_NEGATIVE,
            FieldError::TooLarge => MSG_TOO_LARGE,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FieldError {}

/// Unsigned integer types a field can hold
pub trait IntegerValue: Copy + fmt::Debug + PartialEq {
    /// Parse a non-empty run of ASCII digits; `None` on overflow
    fn from_decimal_digits(digits: &str) -> Option<Self>;
}

macro_rules! impl_integer_value {
    ($($t:ty),*) => {
        $(
            impl IntegerValue for $t {
                fn from_decimal_digits(digits: &str) -> Option<Self> {
                    digits.parse::<$t>().ok()
                }
            }
        )*
    };
}

impl_integer_value!(u8, u16, u32, u64, u128);

/// Result of validating one raw field value
pub type Validation<T> = (Option<T>, Option<FieldError>);

/// Validate raw text as a non-negative integer.
///
/// - blank text: `(None, None)`, the field is untouched
/// - not numeric: [`FieldError::NotANumber`]
/// - fractional part: [`FieldError::NotAnInteger`]
/// - below zero: [`FieldError::Negative`]
/// - wider than `T`: [`FieldError::TooLarge`]
pub fn validate_integer<T: IntegerValue>(text: &str) -> Validation<T> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return (None, None);
    }

    let Some(number) = DecimalText::parse(trimmed) else {
        return (None, Some(FieldError::NotANumber));
    };

    match number.integer_digits() {
        Ok(digits) => match T::from_decimal_digits(&digits) {
            Some(value) => (Some(value), None),
            None => (None, Some(FieldError::TooLarge)),
        },
        Err(error) => (None, Some(error)),
    }
}

/// Whether `text` is a well-formed contract address
pub fn is_address_well_formed(text: &str) -> bool {
    is_valid_ethereum_address(text.trim())
}

/// Split form of a decimal literal
#[derive(Debug, PartialEq)]
struct DecimalText<'a> {
    negative: bool,
    int_digits: &'a str,
    frac_digits: &'a str,
    exponent: i64,
}

impl<'a> DecimalText<'a> {
    fn parse(text: &'a str) -> Option<Self> {
        let (negative, rest) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent_text) = match rest.find(['e', 'E']) {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };

        let (int_digits, frac_digits) = match mantissa.find('.') {
            Some(pos) => (&mantissa[..pos], &mantissa[pos + 1..]),
            None => (mantissa, ""),
        };

        if int_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }
        if !all_digits(int_digits) || !all_digits(frac_digits) {
            return None;
        }

        let exponent = match exponent_text {
            Some(text) => parse_exponent(text)?,
            None => 0,
        };

        Some(Self {
            negative,
            int_digits,
            frac_digits,
            exponent,
        })
    }

    /// Integer part as a digit string, in rule order: fraction, sign, size.
    ///
    /// The exponent cap applies to where the significant digits land, so
    /// `1000e-3` is 1 and `0.001e3` is 1 no matter how many zeros pad them.
    fn integer_digits(&self) -> Result<String, FieldError> {
        let digits: String = [self.int_digits, self.frac_digits].concat();
        let Some(lead) = digits.bytes().position(|b| b != b'0') else {
            return Ok("0".to_string());
        };
        let tail = digits.bytes().rposition(|b| b != b'0').unwrap_or(lead);
        let significant = &digits[lead..=tail];

        // integer digits of 0.<significant> x 10^whole_len
        let whole_len = (self.int_digits.len() as i64)
            .saturating_add(self.exponent)
            .saturating_sub(lead as i64);
        if whole_len < significant.len() as i64 {
            return Err(FieldError::NotAnInteger);
        }
        if self.negative {
            return Err(FieldError::Negative);
        }
        if whole_len > MAX_DECIMAL_EXPONENT {
            return Err(FieldError::TooLarge);
        }

        let padding = "0".repeat(whole_len as usize - significant.len());
        Ok(format!("{}{}", significant, padding))
    }
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !all_digits(digits) {
        return None;
    }

    // saturating: anything past i64 is far outside every field's range
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Raw text, parsed value and error for one integer field.
///
/// The only way to change a field is to re-parse it, so a value and an
/// error are never observed for different raw texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedField<T> {
    raw: String,
    value: Option<T>,
    error: Option<FieldError>,
}

impl<T: IntegerValue> ValidatedField<T> {
    pub fn new() -> Self {
        Self {
            raw: String::new(),
            value: None,
            error: None,
        }
    }

    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let (value, error) = validate_integer::<T>(&raw);
        Self { raw, value, error }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> Option<T> {
        self.value
    }

    pub fn value_or(&self, default: T) -> T {
        self.value.unwrap_or(default)
    }

    pub fn error(&self) -> Option<FieldError> {
        self.error
    }

    /// Blank input, neither a value nor an error
    pub fn is_untouched(&self) -> bool {
        self.value.is_none() && self.error.is_none()
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }
}

impl<T: IntegerValue> Default for ValidatedField<T> {
    fn default() -> Self {
        Self::new()
    }
}
