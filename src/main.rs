use clap::Parser;
use csvtojson::utils::logger::LogFormat;
use csvtojson::utils::monitor::SystemMonitor;
use csvtojson::utils::{logger, validation::Validate};
use csvtojson::{CliConfig, ConvertPipeline};

#[tokio::main]
async fn main() {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) => {
            // Help and version requests are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let log_format = if config.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(log_format, config.verbose);

    tracing::info!("Starting csvtojson");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let mut monitor = SystemMonitor::new(config.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = ConvertPipeline::from_config(&config);

    match pipeline.run().await {
        Ok(report) => {
            monitor.log_stats("Conversion finished");
            tracing::info!(
                "✅ Converted {} rows ({} skipped)",
                report.write.records_written,
                report.read.rows_skipped
            );
            tracing::info!("📁 Output saved to: {}", report.write.output_path.display());
        }
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}
