// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Misc utility functions.

/// Number of decimal digits of `value`. Zero has one digit.
pub fn decimal_digits(value: u128) -> u32 {
    value.checked_ilog10().map_or(1, |d| d + 1)
}

/// 10 to the power of `exp`, exact for every exponent below 39.
pub fn pow10(exp: u32) -> u128 {
    10u128.pow(exp)
}

/// Length of the decimal string of `value` once left padded with zeros to `width`.
/// Padding never truncates, so wider values keep their full length.
pub fn padded_len(value: u128, width: u32) -> u32 {
    decimal_digits(value).max(width)
}

/// Digits `start..end` (counted from the left) of `value` zero padded to `len` characters.
/// `len` must be at least the digit count of `value` and `start <= end <= len`.
///
/// e.g. `digit_window(1522756, 8, 2, 6)` reads "01522756"[2..6] and returns 5227.
pub fn digit_window(value: u128, len: u32, start: u32, end: u32) -> u64 {
    debug_assert!(start <= end && end <= len);
    ((value / pow10(len - end)) % pow10(end - start)) as u64
}

/// Format a float with the fixed precision used throughout the reports.
pub fn format_value(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_of_small_values() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(10), 2);
        assert_eq!(decimal_digits(1234), 4);
        assert_eq!(decimal_digits(u64::MAX as u128), 20);
    }

    #[test]
    fn window_reads_zero_padded_digits() {
        assert_eq!(digit_window(1522756, 8, 2, 6), 5227);
        assert_eq!(digit_window(408, 4, 1, 3), 40);
        assert_eq!(digit_window(0, 8, 2, 6), 0);
    }

    #[test]
    fn padding_does_not_truncate() {
        assert_eq!(padded_len(408, 4), 4);
        assert_eq!(padded_len(123456, 4), 6);
    }
}
