use clap::Parser;
use oereb_extract::utils::{logger, validation::Validate};
use oereb_extract::{
    CliConfig, ExtractEngine, ExtractProcessor, HttpWmsClient, JsonExtractReader, LocalStorage,
    OerebConfig, OerebError,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting oereb-extract CLI");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Extract failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), OerebError> {
    cli.validate()?;

    tracing::info!("📁 Loading configuration from: {}", cli.config);
    let config = OerebConfig::from_file(&cli.config)?;
    config.validate()?;
    if let Some(language) = &cli.language {
        oereb_extract::utils::validation::validate_one_of(
            "language",
            language,
            &config.app.languages,
        )?;
    }
    tracing::info!("✅ Configuration loaded and validated successfully");

    let wms_client = HttpWmsClient::new(config.wms.timeout_seconds)?;
    let reader = JsonExtractReader::new(LocalStorage::new(cli.store.clone()));
    let processor = ExtractProcessor::new(reader, wms_client, Arc::new(config))?;
    let engine = ExtractEngine::new(processor, LocalStorage::new(cli.output_path.clone()));

    let output_file = engine.run(&cli.identity(), &cli.params()).await?;
    tracing::info!("✅ Extract created successfully!");
    println!("✅ Extract created successfully!");
    println!("📁 Output saved to: {}/{}", cli.output_path, output_file);
    Ok(())
}
