//! Field validators shared across the shipped schemas.
//!
//! Validators accept the empty string: leaving a field blank is skipping
//! it, not answering it wrongly. They reject malformed non-empty input.

use vaani_form_types::{AnswerRecord, AnswerValue};

/// Letters, spaces, dots and apostrophes only.
pub fn validate_name(value: &AnswerValue, _answers: &AnswerRecord) -> Result<(), String> {
    let Some(name) = value.as_text() else {
        return Ok(());
    };
    if name.is_empty() {
        return Ok(());
    }
    if name.trim().is_empty() {
        return Err("Name cannot be only spaces".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '.' || c == '\'')
    {
        return Err("Name can only contain letters, spaces, dots and apostrophes".to_string());
    }
    Ok(())
}

/// Exactly 12 digits.
pub fn validate_aadhaar(value: &AnswerValue, _answers: &AnswerRecord) -> Result<(), String> {
    fixed_digits(value, 12, "Aadhaar number")
}

/// Exactly 10 digits.
pub fn validate_mobile(value: &AnswerValue, _answers: &AnswerRecord) -> Result<(), String> {
    fixed_digits(value, 10, "Mobile number")
}

/// Exactly 6 digits.
pub fn validate_pin_code(value: &AnswerValue, _answers: &AnswerRecord) -> Result<(), String> {
    fixed_digits(value, 6, "PIN code")
}

/// The 10-character PAN pattern: five letters, four digits, one letter.
pub fn validate_pan(value: &AnswerValue, _answers: &AnswerRecord) -> Result<(), String> {
    let Some(pan) = value.as_text() else {
        return Ok(());
    };
    if pan.is_empty() {
        return Ok(());
    }
    let chars: Vec<char> = pan.chars().collect();
    let well_formed = chars.len() == 10
        && chars[..5].iter().all(char::is_ascii_uppercase)
        && chars[5..9].iter().all(char::is_ascii_digit)
        && chars[9].is_ascii_uppercase();
    if well_formed {
        Ok(())
    } else {
        Err("PAN must look like ABCDE1234F".to_string())
    }
}

/// Dates as written on the paper forms: DD/MM/YYYY.
pub fn validate_date(value: &AnswerValue, _answers: &AnswerRecord) -> Result<(), String> {
    let Some(date) = value.as_text() else {
        return Ok(());
    };
    if date.is_empty() {
        return Ok(());
    }
    let parts: Vec<&str> = date.split('/').collect();
    let well_formed = parts.len() == 3
        && parts[0].len() == 2
        && parts[1].len() == 2
        && parts[2].len() == 4
        && parts.iter().all(|part| part.chars().all(|c| c.is_ascii_digit()));
    if !well_formed {
        return Err("Enter the date as DD/MM/YYYY".to_string());
    }
    let day: u32 = parts[0].parse().unwrap_or(0);
    let month: u32 = parts[1].parse().unwrap_or(0);
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return Err("That day or month does not exist".to_string());
    }
    Ok(())
}

/// A rupee amount: digits with at most one decimal point.
pub fn validate_amount(value: &AnswerValue, _answers: &AnswerRecord) -> Result<(), String> {
    let Some(amount) = value.as_text() else {
        return Ok(());
    };
    if amount.is_empty() {
        return Ok(());
    }
    let well_formed = amount.chars().all(|c| c.is_ascii_digit() || c == '.')
        && amount.chars().filter(|c| *c == '.').count() <= 1
        && amount.chars().any(|c| c.is_ascii_digit());
    if well_formed {
        Ok(())
    } else {
        Err("Enter an amount in rupees, digits only".to_string())
    }
}

fn fixed_digits(value: &AnswerValue, len: usize, what: &str) -> Result<(), String> {
    let Some(text) = value.as_text() else {
        return Ok(());
    };
    if text.is_empty() {
        return Ok(());
    }
    if text.len() == len && text.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(format!("{what} must be exactly {len} digits"))
    }
}
