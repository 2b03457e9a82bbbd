use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "lga_revenue_sdk=info";
const VERBOSE_DIRECTIVES: &str = "lga_revenue_sdk=debug,reqwest=info,warn";

/// `RUST_LOG` 優先，否則使用給定的預設值
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// CLI 日誌寫到 stderr，stdout 只留給指令輸出（例如 `resolve` 的路徑）。
///
/// 重複呼叫時保留第一次安裝的 subscriber。
pub fn init_cli_logger(verbose: bool) {
    let directives = if verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .without_time()
                .compact(),
        )
        .try_init();
}

/// JSON 格式，供服務端嵌入 SDK 時接入日誌收集
pub fn init_json_logger() {
    let _ = tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVES))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_keeps_first_subscriber() {
        init_cli_logger(true);
        init_cli_logger(false);
        init_json_logger();
        tracing::info!("logger still usable after repeated init");
    }
}
