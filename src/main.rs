use clap::Parser;
use vessel_normalizer::core::ConfigProvider;
use vessel_normalizer::utils::{logger, validation::Validate};
use vessel_normalizer::{
    CliConfig, ListingPipeline, LocalStorage, NormalizerEngine, NormalizerProfile,
};

async fn run_engine<C: ConfigProvider>(
    config: C,
    monitor_enabled: bool,
) -> vessel_normalizer::Result<String> {
    let storage = LocalStorage::new(config.output_path());
    let pipeline = ListingPipeline::new(storage, config);
    let engine = NormalizerEngine::new_with_monitoring(pipeline, monitor_enabled);
    engine.run().await
}

fn load_profile(path: &str) -> vessel_normalizer::Result<NormalizerProfile> {
    let profile = NormalizerProfile::from_file(path)?;
    profile.validate()?;
    Ok(profile)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting vessel-normalizer CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let result = match config.profile.clone() {
        Some(path) => {
            tracing::info!("📋 Loading run profile from {}", path);
            match load_profile(&path) {
                Ok(profile) => {
                    let monitor = monitor_enabled || profile.monitoring_enabled();
                    run_engine(profile, monitor).await
                }
                Err(e) => Err(e),
            }
        }
        None => run_engine(config, monitor_enabled).await,
    };

    match result {
        Ok(output_path) => {
            tracing::info!("✅ Normalization completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Normalization completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Normalization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // Exit code follows error severity
            let exit_code = match e.severity() {
                vessel_normalizer::utils::error::ErrorSeverity::Low => 0,
                vessel_normalizer::utils::error::ErrorSeverity::Medium => 2,
                vessel_normalizer::utils::error::ErrorSeverity::High => 1,
                vessel_normalizer::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
