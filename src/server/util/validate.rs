//! Input validation shared by services.
//!
//! Each check returns `AppError::BadRequest` carrying the message shown to the client. Checks
//! run in field order so the first violation wins.

use chrono::NaiveDate;
use entity::user_player::Gender;

use crate::server::{error::AppError, util::date::parse_date};

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;
pub const NAME_MAX_LENGTH: usize = 50;

/// Trims `value` and requires it to be non-empty.
pub fn required(value: Option<&str>, message: &str) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::BadRequest(message.to_string())),
    }
}

/// Trims a name and checks it is 1..=50 characters.
pub fn name(value: &str, empty_message: &str, too_long_message: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(empty_message.to_string()));
    }
    if trimmed.chars().count() > NAME_MAX_LENGTH {
        return Err(AppError::BadRequest(too_long_message.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Parses `M` / `F`.
pub fn gender(value: &str, message: &str) -> Result<Gender, AppError> {
    match value.trim() {
        "M" => Ok(Gender::Male),
        "F" => Ok(Gender::Female),
        _ => Err(AppError::BadRequest(message.to_string())),
    }
}

pub fn gender_code(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "M",
        Gender::Female => "F",
    }
}

/// Parses a `YYYY-MM-DD` birthday.
pub fn birthday(value: &str) -> Result<NaiveDate, AppError> {
    parse_date(value).ok_or_else(|| AppError::BadRequest("生日格式不正確".to_string()))
}

/// Loose email shape check: one `@`, non-empty local part, dotted domain, no whitespace.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

/// Validates an optional email, treating blank input as absent.
pub fn optional_email(value: Option<String>) -> Result<Option<String>, AppError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if v.is_empty() => Ok(None),
        Some(v) if !is_email(&v) => Err(AppError::BadRequest("請輸入有效的電子郵件".to_string())),
        other => Ok(other),
    }
}

/// Treats blank optional text as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Checks password length bounds.
pub fn password(value: &str) -> Result<(), AppError> {
    let length = value.chars().count();
    if length < PASSWORD_MIN_LENGTH {
        return Err(AppError::BadRequest("密碼至少需要 8 個字元".to_string()));
    }
    if length > PASSWORD_MAX_LENGTH {
        return Err(AppError::BadRequest("密碼最多 128 個字元".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        err.to_string()
    }

    #[test]
    fn name_is_trimmed_and_bounded() {
        assert_eq!(name("  Tigers ", "empty", "long").unwrap(), "Tigers");
        assert_eq!(message(name("   ", "empty", "long").unwrap_err()), "empty");
        assert_eq!(
            message(name(&"x".repeat(51), "empty", "long").unwrap_err()),
            "long"
        );
    }

    #[test]
    fn gender_accepts_only_m_or_f() {
        assert_eq!(gender("M", "bad").unwrap(), Gender::Male);
        assert_eq!(gender("F", "bad").unwrap(), Gender::Female);
        assert!(gender("X", "bad").is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("coach@example.com"));
        assert!(!is_email("coach.example.com"));
        assert!(!is_email("coach@localhost"));
        assert!(!is_email("co ach@example.com"));
    }

    #[test]
    fn blank_optional_email_is_none() {
        assert_eq!(optional_email(Some("  ".to_string())).unwrap(), None);
        assert!(optional_email(Some("nope".to_string())).is_err());
    }

    #[test]
    fn password_bounds() {
        assert_eq!(
            message(password("short").unwrap_err()),
            "密碼至少需要 8 個字元"
        );
        assert_eq!(
            message(password(&"p".repeat(129)).unwrap_err()),
            "密碼最多 128 個字元"
        );
        assert!(password("longenough").is_ok());
    }
}
