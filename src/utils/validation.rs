use crate::utils::error::{KvDriveError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(KvDriveError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(KvDriveError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(KvDriveError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(KvDriveError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Project keys look like `<project_id>_<secret>`; the id part addresses the
/// project on the wire. The secret is never echoed back in error messages.
pub fn validate_project_key(field_name: &str, key: &str) -> Result<()> {
    validate_non_empty_string(field_name, key)?;

    match key.split_once('_') {
        Some((id, secret)) if !id.is_empty() && !secret.is_empty() => Ok(()),
        _ => Err(KvDriveError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: mask_key(key),
            reason: "project key must look like '<project_id>_<secret>'".to_string(),
        }),
    }
}

pub fn validate_resource_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(KvDriveError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Resource names can only contain letters, numbers, hyphens, underscores, and dots"
                .to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(KvDriveError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{}…", visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("host", "https://example.com").is_ok());
        assert!(validate_url("host", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("host", "").is_err());
        assert!(validate_url("host", "invalid-url").is_err());
        assert!(validate_url("host", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_project_key() {
        assert!(validate_project_key("project_key", "a0abcyxz_secret123").is_ok());
        assert!(validate_project_key("project_key", "").is_err());
        assert!(validate_project_key("project_key", "nokey").is_err());
        assert!(validate_project_key("project_key", "_secret").is_err());
        assert!(validate_project_key("project_key", "id_").is_err());
    }

    #[test]
    fn test_project_key_errors_do_not_leak_the_secret() {
        let err = validate_project_key("project_key", "longsecretwithnoseparator").unwrap_err();
        assert!(!err.to_string().contains("longsecretwithnoseparator"));
    }

    #[test]
    fn test_validate_resource_name() {
        assert!(validate_resource_name("name", "users").is_ok());
        assert!(validate_resource_name("name", "user-data_2024.bak").is_ok());
        assert!(validate_resource_name("name", "").is_err());
        assert!(validate_resource_name("name", "bad name").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("limit", 5, 1).is_ok());
        assert!(validate_positive_number("limit", 0, 1).is_err());
    }
}
