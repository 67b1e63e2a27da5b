//! Line-item quantity with the checkout clamping rule.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A line-item quantity, always at least [`Quantity::MIN`].
///
/// There is no upper bound on the server side. The `max="999"` attribute on
/// the checkout input is only a browser hint.
///
/// ## Examples
///
/// ```
/// use checkout_quantity_core::Quantity;
///
/// assert_eq!(Quantity::from_submitted("4").get(), 4);
/// assert_eq!(Quantity::from_submitted("0").get(), 1);
/// assert_eq!(Quantity::from_submitted("-7").get(), 1);
/// assert_eq!(Quantity::from_submitted("lots").get(), 1);
/// assert_eq!(Quantity::from_submitted("1e3").get(), 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest quantity a line item can hold.
    pub const MIN: Self = Self(1);

    /// Clamp an integer to a quantity.
    ///
    /// Values below 1 become 1. Values above `u32::MAX` saturate.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        if value < 1 {
            return Self::MIN;
        }
        Self(u32::try_from(value).unwrap_or(u32::MAX))
    }

    /// Interpret a raw submitted form value as a quantity.
    ///
    /// Uses [`coerce_int`] and then [`Quantity::clamped`], so this never fails.
    #[must_use]
    pub fn from_submitted(raw: &str) -> Self {
        Self::clamped(coerce_int(raw))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err("quantity must be at least 1".to_owned());
        }
        Ok(Self(value))
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// Convert a string to an integer the way a loose integer cast does.
///
/// Leading whitespace is skipped and the longest leading numeric prefix is
/// read: an optional sign, digits, an optional `.` fraction and an optional
/// `e`/`E` exponent. A prefix with a fraction or exponent is read as a float
/// and truncated toward zero, so `"1e3"` is 1000 and `"2.5e1"` is 25. Anything
/// that does not start with a number yields 0, as do infinite values. Other
/// out-of-range values saturate at the `i64` bounds.
#[must_use]
pub fn coerce_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let bytes = trimmed.as_bytes();

    let negative = bytes.first() == Some(&b'-');
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_at(bytes, sign_len);
    let mut end = sign_len + int_digits;
    let mut is_float = false;

    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_at(bytes, end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
            is_float = true;
        }
    }
    if end == sign_len {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_at(bytes, end + 1 + exp_sign);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
            is_float = true;
        }
    }

    let prefix = trimmed.get(..end).unwrap_or_default();
    if is_float {
        return prefix.parse::<f64>().map_or(0, truncate_float);
    }

    let mut value: i64 = 0;
    for digit in prefix.bytes().filter(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Count the ASCII digits starting at `pos`.
fn digits_at(bytes: &[u8], pos: usize) -> usize {
    bytes
        .get(pos..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

/// Truncate toward zero. Non-finite values become 0.
#[allow(clippy::cast_possible_truncation)]
fn truncate_float(value: f64) -> i64 {
    if value.is_finite() {
        // `as` saturates at the i64 bounds
        value.trunc() as i64
    } else {
        0
    }
}
