//! Configuration for the token ledger

use serde::{Deserialize, Serialize};

/// Ledger configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Token parameters
    pub token: TokenConfig,

    /// Runtime parameters for the actor embedding
    pub runtime: RuntimeConfig,
}

/// Token parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Token name
    pub name: String,

    /// Token symbol
    pub symbol: String,

    /// Initial supply, credited in full to the treasury at construction.
    /// Kept as u64 here because TOML integers are i64-ranged; widened to
    /// [`Amount`](crate::Amount) when the ledger is built.
    pub initial_supply: u64,

    /// Hex address credited with the initial supply
    pub treasury: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Rail Token".to_string(),
            symbol: "RAIL".to_string(),
            initial_supply: 1_000_000,
            treasury: "0x0000000000000000000000000000000000000001".to_string(),
        }
    }
}

/// Runtime parameters for the actor embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Actor mailbox capacity (bounded for backpressure)
    pub mailbox_capacity: usize,

    /// Event broadcast channel capacity
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 1000,
            event_capacity: 256,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(name) = std::env::var("TOKEN_NAME") {
            config.token.name = name;
        }

        if let Ok(symbol) = std::env::var("TOKEN_SYMBOL") {
            config.token.symbol = symbol;
        }

        if let Ok(supply) = std::env::var("TOKEN_INITIAL_SUPPLY") {
            config.token.initial_supply = supply.parse().map_err(|e| {
                crate::Error::Config(format!("Invalid TOKEN_INITIAL_SUPPLY: {}", e))
            })?;
        }

        if let Ok(treasury) = std::env::var("TOKEN_TREASURY") {
            config.token.treasury = treasury;
        }

        Ok(config)
    }
}
