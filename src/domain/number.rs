//! Display formatting for calculated values.

use serde::{Deserialize, Serialize};

/// Locale settings for rendering numbers.
///
/// Deserializes from the `[format]` table of the config file; missing keys
/// keep their defaults (`,` grouping, `.` decimal point, two fraction digits).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Whether to insert group separators into the integer part.
    pub grouping: bool,
    pub group_separator: char,
    pub decimal_separator: char,
    /// Fraction digits kept after rounding; trailing zeros are dropped.
    pub max_fraction_digits: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            grouping: true,
            group_separator: ',',
            decimal_separator: '.',
            max_fraction_digits: 2,
        }
    }
}

impl NumberFormat {
    /// Renders a value with grouped thousands and trimmed fraction digits.
    ///
    /// Values that round to an integer print without a decimal separator,
    /// and a value that rounds to zero never prints as `-0`.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let rendered = format!("{:.*}", self.max_fraction_digits, value.abs());
        let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
        let frac_part = frac_part.trim_end_matches('0');
        let is_zero = frac_part.is_empty() && int_part.bytes().all(|b| b == b'0');

        let mut out = String::with_capacity(rendered.len() + int_part.len() / 3 + 1);
        if value.is_sign_negative() && !is_zero {
            out.push('-');
        }
        self.push_grouped(&mut out, int_part);
        if !frac_part.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }

    fn push_grouped(&self, out: &mut String, digits: &str) {
        let len = digits.len();
        for (i, c) in digits.chars().enumerate() {
            if self.grouping && i > 0 && (len - i) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(c);
        }
    }
}

/// Formats a value with the default locale settings.
///
/// # Examples
///
/// ```
/// use tally::domain::format_number;
///
/// assert_eq!(format_number(1234.0), "1,234");
/// assert_eq!(format_number(1234.5), "1,234.5");
/// assert_eq!(format_number(-0.004), "0");
/// ```
pub fn format_number(value: f64) -> String {
    NumberFormat::default().format(value)
}
