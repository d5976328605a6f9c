use campus_roster::adapters::http;
use campus_roster::core::ConfigProvider;
use campus_roster::utils::error::ErrorSeverity;
use campus_roster::utils::logger;
use campus_roster::{CliConfig, Directory};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並合併配置
    let settings = cli.load().map_err(|e| {
        anyhow::anyhow!(
            "{} ({})\n💡 {}",
            e.user_friendly_message(),
            e,
            e.recovery_suggestion()
        )
    })?;

    // 初始化日誌
    logger::init_logger(
        logger::LogFormat::from_json_flag(settings.json_logs()),
        settings.verbose,
    );

    tracing::info!("Starting campus-roster");
    tracing::debug!("Resolved settings: {:?}", settings);

    let directory = Arc::new(Directory::new());
    if settings.seed_sample_data() {
        directory.initialize();
    } else {
        tracing::info!("Sample data disabled, starting with empty collections");
    }

    if let Err(e) = http::serve(&settings, directory).await {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}
