use crate::utils::error::{FieldErrors, Result, TravelError};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(r"^[0-9+\-()\s]{7,15}$").expect("phone regex"))
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(TravelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(TravelError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(TravelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TravelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TravelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(TravelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| TravelError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TravelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TravelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

// ---- 表單欄位檢查：錯誤累積到 FieldErrors，不中斷 ----

/// 必填且去除空白後至少 `min_len` 個字元
pub fn check_min_length(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: &str,
    min_len: usize,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, format!("{} is required", label));
    } else if trimmed.chars().count() < min_len {
        errors.add(
            field,
            format!("{} must be at least {} characters", label, min_len),
        );
    }
}

pub fn check_email(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "Email is required");
    } else if !email_regex().is_match(value.trim()) {
        errors.add(field, "Please enter a valid email address");
    }
}

pub fn check_phone(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "Phone number is required");
    } else if !phone_regex().is_match(value.trim()) {
        errors.add(field, "Please enter a valid phone number");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("backend.url", "https://example.supabase.co").is_ok());
        assert!(validate_url("backend.url", "http://localhost:54321").is_ok());
        assert!(validate_url("backend.url", "").is_err());
        assert!(validate_url("backend.url", "invalid-url").is_err());
        assert!(validate_url("backend.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("booking.max_party_size", 10, 1).is_ok());
        assert!(validate_positive_number("booking.max_party_size", 0, 1).is_err());
    }

    #[test]
    fn test_email_pattern() {
        let valid = |value: &str| {
            let mut errors = FieldErrors::new();
            check_email(&mut errors, "email", value);
            errors.is_empty()
        };
        assert!(valid("jane@example.com"));
        assert!(valid("a.b+c@mail.example.org"));
        assert!(!valid("jane@example"));
        assert!(!valid("jane example@mail.com"));
        assert!(!valid("@example.com"));
    }

    #[test]
    fn test_phone_pattern() {
        let valid = |value: &str| {
            let mut errors = FieldErrors::new();
            check_phone(&mut errors, "phone", value);
            errors.is_empty()
        };
        assert!(valid("+1 (555) 123-4567"));
        assert!(valid("5551234"));
        assert!(!valid("12345"));
        assert!(!valid("555-CALL-NOW"));
        assert!(!valid("+1 (555) 123-4567 890"));
    }

    #[test]
    fn test_check_min_length_messages() {
        let mut errors = FieldErrors::new();
        check_min_length(&mut errors, "name", "Name", "   ", 2);
        check_min_length(&mut errors, "subject", "Subject", "Hi", 5);
        check_min_length(&mut errors, "message", "Message", "Long enough message", 10);

        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(
            errors.get("subject"),
            Some("Subject must be at least 5 characters")
        );
        assert!(!errors.contains("message"));
    }
}
