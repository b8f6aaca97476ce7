use serde::Deserialize;
use tracing::warn;

/// Runtime settings read from `PAIPAN_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Files per parallel batch chunk.
    pub chunk_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pretty: true,
            chunk_size: 500,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        let defaults = Settings::default();
        let built = ::config::Config::builder()
            .set_default("pretty", defaults.pretty)
            .and_then(|b| b.set_default("chunk_size", defaults.chunk_size as i64))
            .map(|b| b.add_source(::config::Environment::with_prefix("PAIPAN")))
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize::<Settings>());

        match built {
            Ok(settings) if settings.chunk_size > 0 => settings,
            Ok(_) => {
                warn!("PAIPAN_CHUNK_SIZE must be positive, using defaults");
                defaults
            }
            Err(e) => {
                warn!(error = %e, "invalid PAIPAN_* settings, using defaults");
                defaults
            }
        }
    }
}
