use crate::utils::error::{Result, SdkError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SdkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SdkError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SdkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Base paths are appended to the base URL verbatim, so they must be rooted.
pub fn validate_base_path(field_name: &str, path: &str) -> Result<()> {
    if !path.is_empty() && !path.starts_with('/') {
        return Err(SdkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Base path must start with '/'".to_string(),
        });
    }

    if path.contains(char::is_whitespace) {
        return Err(SdkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Base path cannot contain whitespace".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| SdkError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SdkError::InvalidConfigValueError {
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
        return Err(SdkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api.base_url", "https://api.example.com").is_ok());
        assert!(validate_url("api.base_url", "http://localhost:8000").is_ok());
        assert!(validate_url("api.base_url", "").is_err());
        assert!(validate_url("api.base_url", "not a url").is_err());
        assert!(validate_url("api.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_base_path() {
        assert!(validate_base_path("api.revenue_base_path", "/revenue").is_ok());
        assert!(validate_base_path("api.revenue_base_path", "").is_ok());
        assert!(validate_base_path("api.revenue_base_path", "revenue").is_err());
        assert!(validate_base_path("api.revenue_base_path", "/rev enue").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("api.timeout_seconds", 30, 1, 600).is_ok());
        assert!(validate_range("api.timeout_seconds", 0, 1, 600).is_err());
        assert!(validate_range("api.timeout_seconds", 601, 1, 600).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("token".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("auth.token", &present).unwrap(), "token");
        assert!(matches!(
            validate_required_field("auth.token", &missing),
            Err(SdkError::MissingConfigError { .. })
        ));
    }
}
