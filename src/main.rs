use clap::Parser;
use sdk_deserialize::config::cli::PayloadSource;
use sdk_deserialize::utils::{logger, validation::Validate};
use sdk_deserialize::{CliConfig, DeserializeEngine, DeserializeError, ErrorCategory, TypesConfig};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(logger::LogFormat::from_flag(config.json_logs), config.verbose);

    tracing::info!("Starting sdk-deserialize CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("❌ Deserialization failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());

            // 依錯誤分類決定退出碼
            let exit_code = match e.category() {
                ErrorCategory::Input => 1,
                ErrorCategory::Schema => 2,
                ErrorCategory::Configuration => 3,
                ErrorCategory::System => 4,
            };
            std::process::exit(exit_code);
        }
    }
}

fn run(config: &CliConfig) -> Result<String, DeserializeError> {
    // 驗證配置
    config.validate()?;

    let registry = TypesConfig::from_file(&config.types)?.into_registry()?;
    // CLI 的目標型別必須有宣告，否則拼錯的名稱會讓 payload 原樣輸出
    registry.resolve(&config.target_type)?;
    let engine = DeserializeEngine::new(registry);

    let body = PayloadSource::from_arg(config.input.as_deref()).read_to_string()?;
    let value = engine.deserialize_value(
        &config.target_type,
        config.content_type.as_deref(),
        &body,
    )?;

    tracing::info!("✅ Deserialized payload into {}", config.target_type);

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    rendered.map_err(|e| DeserializeError::ConfigError {
        message: format!("Failed to render output: {}", e),
    })
}
