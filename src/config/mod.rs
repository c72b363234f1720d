mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{BrokerSettings, ServerSettings, Settings};


/// Loads the configuration from the default file and environment variables.
/// Merges the configuration with default values and validates the result.
/// Returns a `Settings` struct containing the server and broker configurations.
pub fn load_config() -> Result<Settings, ConfigError> {
    // Double-underscore separator so multi-word keys survive the split:
    // BROKER__MAX_QUEUE_LENGTH maps to broker.max_queue_length.
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("__"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    let settings = Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
        },
        broker: BrokerSettings {
            max_queue_length: partial
                .broker
                .as_ref()
                .and_then(|b| b.max_queue_length)
                .unwrap_or(default.broker.max_queue_length),
        },
    };

    validate(&settings)?;
    Ok(settings)
}

/// Rejects configurations the broker cannot be constructed with. A zero
/// queue bound would make every published message evict itself.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.broker.max_queue_length == 0 {
        return Err(ConfigError::Message(
            "broker.max_queue_length must be at least 1".to_string(),
        ));
    }
    Ok(())
}
