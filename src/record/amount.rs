//! Normalizes free-form amount input into a canonical numeric value.

use crate::Error;

/// Parse locale-formatted amount text, e.g. `"5.000.000"` or `"1.234,56"`.
///
/// The amount field accepts the thousands/decimal convention of the ledger's
/// source data: `.` separates thousands and `,` marks the decimal point.
/// Everything that is not a digit or a separator (currency symbols, spaces)
/// is ignored, so `"Rp 2.500"` parses as `2500`. Integer input is preserved
/// exactly; a single decimal comma is honored.
///
/// # Errors
/// This function will return an [Error::InvalidAmount] if, after
/// normalization, the input is not a finite number.
pub fn parse_amount_input(input: &str) -> Result<f64, Error> {
    let invalid_amount = || Error::InvalidAmount(input.trim().to_owned());

    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let normalized = cleaned.replace('.', "").replace(',', ".");

    let amount: f64 = normalized.parse().map_err(|_| invalid_amount())?;

    if !amount.is_finite() {
        return Err(invalid_amount());
    }

    Ok(amount)
}
