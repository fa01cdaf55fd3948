use std::{fmt, fs, path::Path, str::FromStr, time::Duration};

use sdk::utils::load_keypair_multi_format;
use serde::Deserialize;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};

use crate::{
    error::ConfigError,
    executor::simulation::SimulationPolicy,
    util::{valid_slippage_bps, valid_threshold_percent},
};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

pub const PRIVATE_KEY_PLACEHOLDER: &str = "YOUR_PRIVATE_KEY_HERE";

fn default_rpc_url() -> String {
    "https://api.mainnet-beta.solana.com".to_string()
}

/// Bot configuration, loaded once at startup
#[derive(Clone, Deserialize)]
pub struct BotConfig {
    /// Address whose balances are read, defaults to the signer
    #[serde(default)]
    pub wallet_address: String,

    /// base58 secret or JSON byte array
    #[serde(default)]
    pub private_key: String,

    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    pub initial_balance_usd: f64,

    pub price_check_interval_seconds: u64,

    pub swap_threshold_min_percent: f64,

    /// Not consulted when deciding, see DecisionEngine
    pub swap_threshold_max_percent: f64,

    pub max_swaps_per_day: u32,

    pub slippage_bps: u16,

    #[serde(default)]
    pub simulate_mode: bool,

    #[serde(default)]
    pub simulation_policy: SimulationPolicy,

    #[serde(default, alias = "priority_fee_microlamports")]
    pub priority_fee_lamports: u64,

    /// Self-hosted router endpoint
    #[serde(default)]
    pub jupiter_url: Option<String>,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("wallet_address", &self.wallet_address)
            .field("private_key", &"<redacted>")
            .field("rpc_url", &self.rpc_url)
            .field("initial_balance_usd", &self.initial_balance_usd)
            .field(
                "price_check_interval_seconds",
                &self.price_check_interval_seconds,
            )
            .field("swap_threshold_min_percent", &self.swap_threshold_min_percent)
            .field("swap_threshold_max_percent", &self.swap_threshold_max_percent)
            .field("max_swaps_per_day", &self.max_swaps_per_day)
            .field("slippage_bps", &self.slippage_bps)
            .field("simulate_mode", &self.simulate_mode)
            .field("simulation_policy", &self.simulation_policy)
            .field("priority_fee_lamports", &self.priority_fee_lamports)
            .field("jupiter_url", &self.jupiter_url)
            .finish()
    }
}

impl BotConfig {
    /// Read `path`, apply `RPC_URL`/`PRIVATE_KEY` from the environment and validate
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json(&contents)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(rpc_url) = lookup("RPC_URL").filter(|v| !v.is_empty()) {
            self.rpc_url = rpc_url;
        }
        if let Some(private_key) = lookup("PRIVATE_KEY").filter(|v| !v.is_empty()) {
            self.private_key = private_key;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.keypair()?;

        if !self.wallet_address.is_empty() {
            Pubkey::from_str(&self.wallet_address)
                .map_err(|_| ConfigError::InvalidWalletAddress(self.wallet_address.clone()))?;
        }

        if self.price_check_interval_seconds == 0 {
            return Err(ConfigError::Invalid(
                "price_check_interval_seconds must be greater than 0".to_string(),
            ));
        }

        if !valid_threshold_percent(self.swap_threshold_min_percent) {
            return Err(ConfigError::Invalid(format!(
                "swap_threshold_min_percent must be positive, got {}",
                self.swap_threshold_min_percent
            )));
        }

        if !valid_slippage_bps(self.slippage_bps) {
            return Err(ConfigError::Invalid(format!(
                "slippage_bps must be at most 10000, got {}",
                self.slippage_bps
            )));
        }

        if self.initial_balance_usd.is_nan() || self.initial_balance_usd < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial_balance_usd must not be negative, got {}",
                self.initial_balance_usd
            )));
        }

        Ok(())
    }

    pub fn keypair(&self) -> Result<Keypair, ConfigError> {
        if self.private_key.is_empty() || self.private_key == PRIVATE_KEY_PLACEHOLDER {
            return Err(ConfigError::MissingPrivateKey);
        }

        load_keypair_multi_format(&self.private_key).map_err(ConfigError::InvalidPrivateKey)
    }

    /// Owner of the balances the bot reconciles against
    pub fn wallet_pubkey(&self, signer: &Pubkey) -> Result<Pubkey, ConfigError> {
        if self.wallet_address.is_empty() {
            return Ok(*signer);
        }

        Pubkey::from_str(&self.wallet_address)
            .map_err(|_| ConfigError::InvalidWalletAddress(self.wallet_address.clone()))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.price_check_interval_seconds)
    }

    pub fn priority_fee(&self) -> Option<u64> {
        (self.priority_fee_lamports > 0).then_some(self.priority_fee_lamports)
    }
}
