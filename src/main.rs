use clap::Parser;
use lga_revenue_sdk::config::cli::{Command, ExportFormat};
use lga_revenue_sdk::utils::logger;
use lga_revenue_sdk::{CliConfig, MapOrigin, Sdk};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting lga-sdk CLI");

    let config = match cli.to_api_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let sdk = Sdk::new(&config)?;
    let resolver = sdk.revenue.resolver();

    match cli.command {
        Command::Resolve {
            slug,
            path_override,
        } => {
            let path = resolver.resolve(&slug, path_override.as_deref()).await;
            println!("{}", path);
        }
        Command::Meta { slug } => match sdk.revenue.service_meta(&slug).await {
            Some(meta) => println!("{}", serde_json::to_string_pretty(meta)?),
            None => {
                eprintln!("❌ Unknown service: {}", slug);
                std::process::exit(2);
            }
        },
        Command::Services => {
            let map = resolver.service_map().await;
            for meta in map.sorted() {
                println!("{:<42} {}", meta.slug, meta.path);
            }
            println!("{} services", map.len());
        }
        Command::Export { format, output } => {
            let export = match format {
                ExportFormat::Csv => sdk.payments.export_csv().await?,
                ExportFormat::Pdf => sdk.payments.export_pdf().await?,
            };
            export.save(&output)?;
            tracing::info!("📁 Export saved to: {}", output.display());
            println!("📁 Export saved to: {} ({} bytes)", output.display(), export.len());
        }
    }

    if resolver.origin() == Some(MapOrigin::Fallback) {
        tracing::warn!("⚠️ Service map came from the bundled fallback table");
    }

    Ok(())
}
