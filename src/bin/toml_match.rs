use clap::Parser;
use resume_match::adapters::documents::{read_job_postings, read_resumes};
use resume_match::core::ConfigProvider;
use resume_match::utils::{logger, validation::Validate};
use resume_match::{LocalStorage, MatchEngine, MatchingPipeline, SnapshotRepository, TomlConfig};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "toml-match")]
#[command(about = "Résumé matching driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "match-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the shortlist threshold (0-100)
    #[arg(long)]
    threshold: Option<f64>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based matching");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(threshold) = args.threshold {
        config.scoring.threshold = Some(threshold);
        tracing::info!("🔧 Threshold overridden to: {}", threshold);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No scores will be written");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 Phase monitoring enabled");
    }

    let source = LocalStorage::new(".".to_string());
    let sink = LocalStorage::new(config.output_path().to_string());
    let repository = SnapshotRepository::new(sink.clone());
    let notifier = config.notifier()?;
    let report_file = config.report_filename().to_string();

    let pipeline = MatchingPipeline::new(source, sink, repository, config)
        .with_notifier(Arc::new(notifier))
        .with_report_file(&report_file);
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

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let weights = config.weights();

    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name, config.pipeline.version
    );
    println!("  Jobs: {}", config.jobs_path());
    println!("  Résumés: {}", config.resumes_path());
    println!("  Output: {}/{}", config.output_path(), config.report_filename());
    println!("  Threshold: {}", config.threshold());
    println!(
        "  Weights: skills {:.2} / education {:.2}",
        weights.skills, weights.education
    );

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let source = LocalStorage::new(".".to_string());

    println!("🔍 Dry Run Analysis:");
    println!();

    let postings = read_job_postings(&source, config.jobs_path()).await?;
    let resumes = read_resumes(&source, config.resumes_path()).await?;

    println!("📄 Inputs:");
    println!("  Job descriptions: {}", postings.len());
    println!("  Résumés: {}", resumes.len());
    println!("  Pairs to score: {}", postings.len() * resumes.len());

    println!();
    println!("📧 Notifications:");
    println!("  Sender: {}", config.sender());
    for slot in config.interview_slots()? {
        println!("  Slot: {}", slot.format("%B %-d, %-I:%M %p"));
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
