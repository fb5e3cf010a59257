use crate::utils::error::{OerebError, Result};
use std::collections::HashSet;
use std::hash::Hash;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(OerebError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(OerebError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(OerebError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OerebError::InvalidConfigValueError {
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
    // NaN fails both comparisons
    if !(min <= value && value <= max) {
        return Err(OerebError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[String]) -> Result<()> {
    if !allowed.iter().any(|candidate| candidate == value) {
        return Err(OerebError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Fails on the first key that occurs twice.
pub fn validate_unique<K, I>(field_name: &str, keys: I) -> Result<()>
where
    K: Eq + Hash + std::fmt::Display,
    I: IntoIterator<Item = K>,
{
    let mut seen = HashSet::new();
    for key in keys {
        let rendered = key.to_string();
        if !seen.insert(key) {
            return Err(OerebError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: rendered,
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("print.map_size", 493, 1).is_ok());
        assert!(validate_positive_number("print.map_size", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("tolerance.min_area", 1.0, 0.0, f64::MAX).is_ok());
        assert!(validate_range("tolerance.min_area", -0.5, 0.0, f64::MAX).is_err());
        assert!(validate_range("tolerance.min_area", f64::NAN, 0.0, f64::MAX).is_err());
        assert!(validate_range("tolerance.min_area", f64::INFINITY, 0.0, f64::MAX).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        let languages = vec!["de".to_string(), "fr".to_string()];
        assert!(validate_one_of("app.default_language", "de", &languages).is_ok());
        assert!(validate_one_of("app.default_language", "en", &languages).is_err());
    }

    #[test]
    fn test_validate_unique() {
        assert!(validate_unique("themes.code", ["a", "b"]).is_ok());
        let err = validate_unique("themes.code", ["a", "b", "a"]).unwrap_err();
        assert!(err.to_string().contains("themes.code"));
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("store", "./store").is_ok());
        assert!(validate_path("store", "").is_err());
    }
}
