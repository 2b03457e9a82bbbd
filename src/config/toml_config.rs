use crate::config::ApiConfig;
use crate::utils::error::{Result, SdkError};
use crate::utils::validation::{
    validate_base_path, validate_non_empty_string, validate_range, validate_required_field,
    validate_url, Validate,
};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct SdkConfig {
    pub api: ApiSection,
    pub auth: Option<AuthSection>,
    pub service_map: Option<ServiceMapSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: String,
    pub revenue_base_path: Option<String>,
    pub payment_base_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct AuthSection {
    pub token: Option<SecretString>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceMapSection {
    /// 0 表示不設上限
    pub fetch_timeout_seconds: Option<u64>,
}

impl SdkConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SdkError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SdkError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LGA_API_TOKEN})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SdkError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;

        if let Some(path) = &self.api.revenue_base_path {
            validate_base_path("api.revenue_base_path", path)?;
        }
        if let Some(path) = &self.api.payment_base_path {
            validate_base_path("api.payment_base_path", path)?;
        }
        if let Some(timeout) = self.api.timeout_seconds {
            validate_range("api.timeout_seconds", timeout, 1, 600)?;
        }

        if let Some(auth) = &self.auth {
            let token = validate_required_field("auth.token", &auth.token)?.expose_secret();
            validate_non_empty_string("auth.token", token)?;
            if token.starts_with("${") {
                return Err(SdkError::ConfigValidationError {
                    field: "auth.token".to_string(),
                    message: "Unresolved environment variable".to_string(),
                });
            }
        }

        if let Some(timeout) = self.fetch_timeout_seconds() {
            validate_range("service_map.fetch_timeout_seconds", timeout, 0, 600)?;
        }

        Ok(())
    }

    pub fn fetch_timeout_seconds(&self) -> Option<u64> {
        self.service_map
            .as_ref()
            .and_then(|section| section.fetch_timeout_seconds)
    }

    /// 轉換為執行期使用的 [`ApiConfig`]
    pub fn to_api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::new(self.api.base_url.clone());
        config.revenue_base_path = self.api.revenue_base_path.clone();
        config.payment_base_path = self.api.payment_base_path.clone();

        if let Some(timeout) = self.api.timeout_seconds {
            config = config.with_request_timeout(Duration::from_secs(timeout));
        }

        match self.fetch_timeout_seconds() {
            Some(0) => config = config.with_service_map_timeout(None),
            Some(seconds) => {
                config = config.with_service_map_timeout(Some(Duration::from_secs(seconds)))
            }
            None => {}
        }

        let token = self
            .auth
            .as_ref()
            .and_then(|auth| auth.token.as_ref())
            .map(|token| token.expose_secret())
            .filter(|token| !token.is_empty());
        if let Some(token) = token {
            config = config.with_bearer_token(token);
        }

        config
    }
}

impl Validate for SdkConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[api]
base_url = "https://api.example.com"
timeout_seconds = 15

[service_map]
fetch_timeout_seconds = 5
"#;

        let config = SdkConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let api = config.to_api_config();
        assert_eq!(api.revenue_base_url(), "https://api.example.com/revenue");
        assert_eq!(api.payment_base_url(), "https://api.example.com/payment");
        assert_eq!(api.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(api.service_map_timeout, Some(Duration::from_secs(5)));
        assert!(api.auth.is_none());
    }

    #[test]
    fn test_zero_fetch_timeout_disables_limit() {
        let toml_content = r#"
[api]
base_url = "https://api.example.com"

[service_map]
fetch_timeout_seconds = 0
"#;

        let config = SdkConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.to_api_config().service_map_timeout, None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LGA_SDK_TEST_TOKEN", "token-from-env");

        let toml_content = r#"
[api]
base_url = "https://api.example.com"

[auth]
token = "${LGA_SDK_TEST_TOKEN}"
"#;

        let config = SdkConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config
                .auth
                .as_ref()
                .and_then(|a| a.token.as_ref())
                .map(|token| token.expose_secret()),
            Some("token-from-env")
        );
        assert!(config.validate().is_ok());
        assert!(config.to_api_config().auth.is_some());
        assert!(!format!("{:?}", config).contains("token-from-env"));

        std::env::remove_var("LGA_SDK_TEST_TOKEN");
    }

    #[test]
    fn test_unresolved_token_fails_validation() {
        let toml_content = r#"
[api]
base_url = "https://api.example.com"

[auth]
token = "${LGA_SDK_TEST_UNDEFINED_TOKEN}"
"#;

        let config = SdkConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SdkError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[api]
base_url = "invalid-url"
"#;

        let config = SdkConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let missing_token = r#"
[api]
base_url = "https://api.example.com"

[auth]
"#;
        let config = SdkConfig::from_toml_str(missing_token).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SdkError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[api]
base_url = "https://lga.example.gov"
revenue_base_path = "/api/revenue"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = SdkConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.to_api_config().revenue_base_url(),
            "https://lga.example.gov/api/revenue"
        );
    }
}
