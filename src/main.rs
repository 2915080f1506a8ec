use clap::Parser;
use resume_match::utils::{logger, validation::Validate};
use resume_match::{
    CliConfig, InterviewInvitationNotifier, LocalStorage, MatchEngine, MatchingPipeline,
    SnapshotRepository,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting resume-match CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.monitor {
        tracing::info!("🔍 Phase monitoring enabled");
    }

    // 輸入相對於目前目錄，輸出與快照寫到 output_path
    let source = LocalStorage::new(".".to_string());
    let sink = LocalStorage::new(config.output_path.clone());
    let repository = SnapshotRepository::new(sink.clone());
    let notifier = InterviewInvitationNotifier::new(
        config.sender.clone(),
        InterviewInvitationNotifier::default_slots(),
    );
    let monitor_enabled = config.monitor;

    let pipeline = MatchingPipeline::new(source, sink, repository, config)
        .with_notifier(Arc::new(notifier));
    let engine = MatchEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Matching completed successfully!");
            println!("✅ Matching completed successfully!");
            println!("📁 Report saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Matching failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
