//! Field checks shared by the create/update inputs.
//!
//! Each helper fails with the first violation, quoted the way clients
//! already expect (`"field" must be ...`).

use chrono::{DateTime, FixedOffset};

use crate::errors::ModelError;

pub type ValidationResult = Result<(), ModelError>;

pub fn non_empty(field: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ModelError::validation(format!("\"{field}\" is not allowed to be empty")));
    }
    Ok(())
}

/// Same as [`non_empty`] but only when the value is present.
pub fn non_empty_opt(field: &str, value: Option<&str>) -> ValidationResult {
    value.map_or(Ok(()), |v| non_empty(field, v))
}

pub fn positive(field: &str, value: f64) -> ValidationResult {
    if !value.is_finite() || value <= 0.0 {
        return Err(ModelError::validation(format!("\"{field}\" must be a positive number")));
    }
    Ok(())
}

pub fn positive_opt(field: &str, value: Option<f64>) -> ValidationResult {
    value.map_or(Ok(()), |v| positive(field, v))
}

pub fn non_negative(field: &str, value: f64) -> ValidationResult {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::validation(format!(
            "\"{field}\" must be greater than or equal to 0"
        )));
    }
    Ok(())
}

pub fn non_negative_opt(field: &str, value: Option<f64>) -> ValidationResult {
    value.map_or(Ok(()), |v| non_negative(field, v))
}

pub fn non_negative_int(field: &str, value: i32) -> ValidationResult {
    non_negative(field, f64::from(value))
}

pub fn date_order(start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> ValidationResult {
    if end < start {
        return Err(ModelError::validation(
            "\"endDate\" must be greater than or equal to \"startDate\"",
        ));
    }
    Ok(())
}

/// Deliberately loose: one `@`, non-empty local part, dotted domain.
pub fn email(field: &str, value: &str) -> ValidationResult {
    let invalid = || ModelError::validation(format!("\"{field}\" must be a valid email"));
    let (local, domain) = value.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || value.contains(char::is_whitespace)
    {
        return Err(invalid());
    }
    Ok(())
}

/// Empty or whitespace-only optional text is stored as NULL.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| if v.trim().is_empty() { None } else { Some(v) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn message(r: ValidationResult) -> String {
        match r {
            Err(ModelError::Validation(m)) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn positive_rejects_zero_negative_and_nan() {
        assert!(positive("partCost", 12.5).is_ok());
        assert_eq!(message(positive("partCost", -1.0)), "\"partCost\" must be a positive number");
        assert!(positive("partCost", 0.0).is_err());
        assert!(positive("partCost", f64::NAN).is_err());
        assert!(positive_opt("labourCost", None).is_ok());
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert!(non_negative("cost", 0.0).is_ok());
        assert!(non_negative_int("notificationDays", 0).is_ok());
        assert!(non_negative_int("notificationDays", -1).is_err());
    }

    #[test]
    fn non_empty_rejects_blank() {
        assert_eq!(message(non_empty("partName", "  ")), "\"partName\" is not allowed to be empty");
        assert!(non_empty_opt("partName", None).is_ok());
    }

    #[test]
    fn date_order_allows_equal_dates() {
        let now: DateTime<FixedOffset> = Utc::now().into();
        assert!(date_order(&now, &now).is_ok());
        assert!(date_order(&now, &(now + Duration::days(1))).is_ok());
        assert!(date_order(&now, &(now - Duration::days(1))).is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(email("recipientEmail", "ops@example.com").is_ok());
        for bad in ["", "ops", "@example.com", "ops@example", "a@b@c.com", "o ps@example.com", "ops@.com"] {
            assert!(email("recipientEmail", bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn blank_strings_become_none() {
        assert_eq!(blank_to_none(Some("   ".into())), None);
        assert_eq!(blank_to_none(Some("x".into())), Some("x".into()));
        assert_eq!(blank_to_none(None), None);
    }
}
