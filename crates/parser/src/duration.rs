//! Duration literals used by HEALTHCHECK flags
//!
//! Accepts the concatenated `<int><unit>` form (`30s`, `1m30s`,
//! `500ms`, `2h`). A bare number without a unit is rejected.

use df2b_errors::ParseError;
use std::time::Duration;

pub fn parse_duration(value: &str, line: usize) -> Result<Duration, ParseError> {
    let invalid = || ParseError::InvalidDuration {
        value: value.to_string(),
        line,
    };

    if value.is_empty() {
        return Err(invalid());
    }

    let mut total = Duration::ZERO;
    let mut digits = String::new();
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let amount: u64 = digits.parse().map_err(|_| invalid())?;
        digits.clear();

        let unit = match c {
            'm' if chars.peek() == Some(&'s') => {
                chars.next();
                Duration::from_millis(amount)
            }
            's' => Duration::from_secs(amount),
            'm' => Duration::from_secs(amount.checked_mul(60).ok_or_else(invalid)?),
            'h' => Duration::from_secs(amount.checked_mul(3600).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };
        total = total.checked_add(unit).ok_or_else(invalid)?;
    }

    // Trailing digits mean a missing unit.
    if !digits.is_empty() {
        return Err(invalid());
    }

    Ok(total)
}
