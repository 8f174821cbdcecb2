//! # Registry Configuration
//!
//! TOML-backed settings for wiring a registry: who owns the authority set,
//! which accounts start out as minters, and the reward rates applied by
//! [`RewardPolicy`].
//!
//! ```toml
//! [authority]
//! owner = "0101...01"
//! minters = ["0202...02"]
//!
//! [rewards]
//! platform_fee_bps = 250
//! annual_rate_bps = 500
//! recycling_multiplier_pct = 150
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::MAX_BPS;
use crate::errors::{CoreResult, PoolShareError};
use crate::math::reward_math::{
    calculate_amount_after_fee, calculate_payment_amount, calculate_platform_fee,
    calculate_quest_reward, calculate_staking_reward, calculate_total_reward,
};
use crate::registry::{AuthorityRegistry, Clock, PositionRegistry};
use crate::types::{Address, Amount, Position};

/// Registry configuration loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Role holders
    pub authority: AuthorityConfig,

    /// Reward rates
    #[serde(default)]
    pub rewards: RewardsConfig,
}

/// Owner and initial minters of the authority set
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorityConfig {
    /// Account allowed to grant and revoke minter rights
    pub owner: Address,

    /// Accounts allowed to mint positions and add rewards
    #[serde(default)]
    pub minters: Vec<Address>,
}

/// Rates used by the reward distributor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RewardsConfig {
    /// Platform fee in basis points (at most 10000)
    pub platform_fee_bps: u32,

    /// Annual staking rate in basis points
    pub annual_rate_bps: u32,

    /// Multiplier applied to recycled quest rewards, in percent
    pub recycling_multiplier_pct: u32,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            platform_fee_bps: 0,
            annual_rate_bps: 0,
            recycling_multiplier_pct: 100,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PoolShareError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: RegistryConfig = toml::from_str(&content).map_err(|e| {
            PoolShareError::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        config.validate()?;

        info!(
            path = %path.display(),
            owner = %config.authority.owner,
            minters = config.authority.minters.len(),
            "registry config loaded"
        );
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| PoolShareError::config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content).map_err(|e| {
            PoolShareError::config(format!("Failed to write config file {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> CoreResult<()> {
        self.rewards.validate()
    }

    /// Authority set to inject into a new registry
    pub fn build_authority(&self) -> AuthorityRegistry {
        AuthorityRegistry::with_minters(
            self.authority.owner,
            self.authority.minters.iter().copied(),
        )
    }

    pub fn reward_policy(&self) -> RewardPolicy {
        RewardPolicy::new(self.rewards)
    }
}

impl RewardsConfig {
    /// Validate reward rates
    pub fn validate(&self) -> CoreResult<()> {
        if self.platform_fee_bps > MAX_BPS {
            return Err(PoolShareError::config(format!(
                "platform_fee_bps {} must be at most {}",
                self.platform_fee_bps, MAX_BPS
            )));
        }

        if self.recycling_multiplier_pct == 0 {
            return Err(PoolShareError::config(
                "recycling_multiplier_pct must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl PositionRegistry {
    /// Wire a registry from validated configuration
    pub fn from_config(config: &RegistryConfig, clock: Box<dyn Clock>) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self::new(config.build_authority(), clock))
    }
}

/// Configured reward rates applied through the reward math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardPolicy {
    rates: RewardsConfig,
}

impl RewardPolicy {
    pub fn new(rates: RewardsConfig) -> Self {
        Self { rates }
    }

    pub fn platform_fee(&self, amount: Amount) -> CoreResult<Amount> {
        calculate_platform_fee(amount, self.rates.platform_fee_bps)
    }

    pub fn amount_after_fee(&self, amount: Amount) -> CoreResult<Amount> {
        calculate_amount_after_fee(amount, self.rates.platform_fee_bps)
    }

    /// Amount a payer sends so that `value` arrives after the fee
    pub fn payment_amount(&self, value: Amount) -> CoreResult<Amount> {
        calculate_payment_amount(value, self.rates.platform_fee_bps)
    }

    pub fn staking_reward(&self, stake: Amount, duration_seconds: u64) -> CoreResult<Amount> {
        calculate_staking_reward(stake, duration_seconds, self.rates.annual_rate_bps)
    }

    pub fn quest_reward(&self, base_reward: Amount) -> CoreResult<Amount> {
        calculate_quest_reward(base_reward, self.rates.recycling_multiplier_pct)
    }

    /// Base reward plus staking and quest components
    pub fn total_reward(
        &self,
        base: Amount,
        stake: Amount,
        duration_seconds: u64,
        quest_base: Amount,
    ) -> CoreResult<Amount> {
        let staking = self.staking_reward(stake, duration_seconds)?;
        let quest = self.quest_reward(quest_base)?;
        calculate_total_reward(base, staking, quest)
    }

    /// Staking reward earned by `position` between its creation and `now`
    pub fn staking_reward_for(&self, position: &Position, now: i64) -> CoreResult<Amount> {
        self.staking_reward(position.principal, position.age_seconds(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{NO_PARENT, SECONDS_PER_YEAR};
    use crate::errors::ErrorKind;
    use crate::registry::ManualClock;

    const OWNER: Address = Address::new([1u8; 32]);
    const MINTER: Address = Address::new([2u8; 32]);

    fn config() -> RegistryConfig {
        RegistryConfig {
            authority: AuthorityConfig {
                owner: OWNER,
                minters: vec![MINTER],
            },
            rewards: RewardsConfig {
                platform_fee_bps: 250,
                annual_rate_bps: 1_000,
                recycling_multiplier_pct: 150,
            },
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");

        config().save(&path).unwrap();
        let loaded = RegistryConfig::load(&path).unwrap();
        assert_eq!(loaded, config());
    }

    #[test]
    fn test_parse_with_default_rewards() {
        let toml = format!("[authority]\nowner = \"{}\"\n", OWNER);
        let config: RegistryConfig = toml::from_str(&toml).unwrap();
        assert!(config.authority.minters.is_empty());
        assert_eq!(config.rewards, RewardsConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_rates() {
        let mut bad = config();
        bad.rewards.platform_fee_bps = MAX_BPS + 1;
        assert_eq!(bad.validate().unwrap_err().kind(), ErrorKind::Configuration);

        let mut bad = config();
        bad.rewards.recycling_multiplier_pct = 0;
        assert_eq!(bad.validate().unwrap_err().kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RegistryConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_from_config_wires_authority() {
        let registry =
            PositionRegistry::from_config(&config(), Box::new(ManualClock::new(0))).unwrap();
        assert!(registry.is_authorized(&MINTER));
        assert!(!registry.is_authorized(&OWNER));
        assert_eq!(registry.authority().owner(), &OWNER);
    }

    #[test]
    fn test_policy_rates() {
        let policy = config().reward_policy();
        assert_eq!(policy.platform_fee(10_000).unwrap(), 250);
        assert_eq!(policy.amount_after_fee(10_000).unwrap(), 9_750);
        assert_eq!(policy.payment_amount(10_000).unwrap(), 10_250);
        assert_eq!(policy.quest_reward(100).unwrap(), 150);
        // 10% a year on 1000 for a full year
        assert_eq!(policy.staking_reward(1_000, SECONDS_PER_YEAR as u64).unwrap(), 100);
        assert_eq!(
            policy.total_reward(7, 1_000, SECONDS_PER_YEAR as u64, 100).unwrap(),
            7 + 100 + 150
        );
    }

    #[test]
    fn test_staking_reward_for_position() {
        let policy = config().reward_policy();
        let position = Position {
            id: 1,
            owner: OWNER,
            pool_id: 1,
            principal: 1_000,
            share_bps: 10_000,
            created_at: 100,
            accumulated_rewards: 0,
            parent_id: NO_PARENT,
            is_derived: false,
        };
        let year = SECONDS_PER_YEAR as i64;
        assert_eq!(policy.staking_reward_for(&position, 100 + year).unwrap(), 100);
        assert_eq!(policy.staking_reward_for(&position, 50).unwrap(), 0);
    }
}
