use crate::config::{ApiConfig, SdkConfig};
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, Validate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lga-sdk")]
#[command(about = "Inspect LGA revenue services and export payments")]
pub struct CliConfig {
    #[arg(long, help = "TOML config file ([api], [auth], [service_map])")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "API base URL, overrides the config file")]
    pub base_url: Option<String>,

    #[arg(long, help = "Bearer token, overrides the config file")]
    pub token: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the REST path for a service slug
    Resolve {
        slug: String,
        #[arg(long)]
        path_override: Option<String>,
    },
    /// Print the service map entry for a slug as JSON
    Meta { slug: String },
    /// List every service in the resolved map
    Services,
    /// Download a payment export
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl CliConfig {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn to_api_config(&self) -> Result<ApiConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file_config = SdkConfig::from_file(path)?;
                file_config.validate()?;
                file_config.to_api_config()
            }
            None => {
                let base_url = validate_required_field("base_url", &self.base_url)?;
                ApiConfig::new(base_url.clone())
            }
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(token) = &self.token {
            config = config.with_bearer_token(token.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
