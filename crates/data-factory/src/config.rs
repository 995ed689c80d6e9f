//! Process-wide factory configuration

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Environment variable holding the seed for deterministic fake values
pub const SEED_ENV_VAR: &str = "DATA_FACTORY_SEED";

/// Configuration for factory behavior
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactoryConfig {
    /// Seed for deterministic fake data generation
    pub seed: Option<u64>,
}

impl FactoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed seed for every newly constructed fake-value provider
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load configuration from the environment.
    ///
    /// Reads `DATA_FACTORY_SEED`; a value that is not a valid `u64` is
    /// ignored and logged.
    pub fn from_env() -> Self {
        let seed = std::env::var(SEED_ENV_VAR).ok().and_then(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| {
                    tracing::warn!("Ignoring invalid {} value '{}': {}", SEED_ENV_VAR, raw, e);
                })
                .ok()
        });

        Self { seed }
    }
}

static FACTORY_CONFIG: Lazy<RwLock<FactoryConfig>> =
    Lazy::new(|| RwLock::new(FactoryConfig::from_env()));

/// Current global factory configuration
pub fn factory_config() -> FactoryConfig {
    FACTORY_CONFIG.read().clone()
}

/// Replace the global factory configuration
pub fn set_factory_config(config: FactoryConfig) {
    tracing::debug!("Updating factory configuration: {:?}", config);
    *FACTORY_CONFIG.write() = config;
}
