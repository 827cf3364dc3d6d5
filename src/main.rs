use anyhow::Context;
use clap::Parser;
use pollen_alert::utils::{logger, validation::Validate};
use pollen_alert::{CliConfig, EtlEngine, HttpFetcher, PollenPipeline, SmtpMailer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, &cli.log_file)
        .with_context(|| format!("cannot open log file {}", cli.log_file.display()))?;

    let config = match cli.resolve(|key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration error: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 缺少 SMTP 設定時不必抓取網頁
    if let Err(e) = config.validate() {
        tracing::error!("❌ {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let fetcher = HttpFetcher::new(config.base_url.clone())?;
    let pipeline = PollenPipeline::new(fetcher, SmtpMailer::new(), config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(recipient) => {
            tracing::info!("✅ Pollen report delivered to {}", recipient);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Error during execution: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
