use crate::utils::error::{ChurnError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ChurnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ChurnError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ChurnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ChurnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ChurnError::InvalidConfigValueError {
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
    // NaN fails both comparisons, so test for containment rather than exclusion
    if !(value >= min && value <= max) {
        return Err(ChurnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// SageMaker endpoint names: 1-63 alphanumerics or hyphens, no hyphen at either end.
pub fn validate_endpoint_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    if name.len() > 63 {
        return Err(ChurnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Endpoint name must be at most 63 characters".to_string(),
        });
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ChurnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Endpoint name can only contain letters, digits and hyphens".to_string(),
        });
    }

    if name.starts_with('-') || name.ends_with('-') {
        return Err(ChurnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Endpoint name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoint", "https://example.com/invocations").is_ok());
        assert!(validate_url("endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("endpoint", "").is_err());
        assert!(validate_url("endpoint", "invalid-url").is_err());
        assert!(validate_url("endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("batch_size", 500, 1).is_ok());
        assert!(validate_positive_number("batch_size", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("risk_cutoff", 0.32, 0.0, 1.0).is_ok());
        assert!(validate_range("risk_cutoff", 1.5, 0.0, 1.0).is_err());
        assert!(validate_range("risk_cutoff", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_validate_endpoint_name() {
        assert!(validate_endpoint_name("endpoint", "churn-xgboost-prod-v1").is_ok());
        assert!(validate_endpoint_name("endpoint", "").is_err());
        assert!(validate_endpoint_name("endpoint", "-churn").is_err());
        assert!(validate_endpoint_name("endpoint", "churn_model").is_err());
        assert!(validate_endpoint_name("endpoint", &"a".repeat(64)).is_err());
    }
}
