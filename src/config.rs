use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use tracing::{info, warn};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub api: ApiConfig,
    pub fleets: FleetConfig,
    pub targeting: TargetingConfig,
    pub timing: TimingConfig,
    pub world: WorldConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint
    pub graphql_url: String,
    /// Player uuid used to scope fleet and cargo queries
    pub player_id: String,
    /// Minimum delay between two API requests in milliseconds
    pub request_delay_ms: u64,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Fleet names that fly combat patrols; every other fleet trades
    pub combat_fleets: Vec<String>,
    /// Cargo each ship carries when loaded from the depot
    pub ship_capacity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetingConfig {
    /// Only pirate events younger than this are considered
    pub freshness_minutes: i64,
    /// Below this reward a pirate event is treated as depleted
    pub depletion_threshold: i64,
    /// Iron Ore events must exceed this reward to be worth a trip
    pub iron_min_reward: i64,
    /// Docked combat fleets search for targets only in the first minutes of each hour
    pub search_window_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Structure snapshot staleness threshold in minutes
    pub structure_refresh_minutes: i64,
    /// Longest sleep when trade fleets are involved, in minutes
    pub idle_ceiling_minutes: i64,
    /// Extra seconds added to every computed sleep
    pub wake_slack_seconds: i64,
    /// Config hot-reload check interval in seconds
    pub config_reload_interval_seconds: u64,
    /// Pause after a cycle that dispatched fleets but issued no command
    #[serde(default = "default_stall_pause_seconds")]
    pub stall_pause_seconds: u64,
}

fn default_stall_pause_seconds() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Upper bound on concurrent per-zone fetches
    pub max_concurrent_fetches: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                graphql_url: crate::GRAPHQL_URL.to_string(),
                player_id: String::new(),
                request_delay_ms: 1000,
                request_timeout_seconds: 30,
            },
            fleets: FleetConfig {
                combat_fleets: vec![
                    "Pirate Hunters".to_string(),
                    "Pirate Hunters II".to_string(),
                ],
                ship_capacity: 5000,
            },
            targeting: TargetingConfig {
                freshness_minutes: 10,
                depletion_threshold: 12000,
                iron_min_reward: 75000,
                search_window_minutes: 2,
            },
            timing: TimingConfig {
                structure_refresh_minutes: 30,
                idle_ceiling_minutes: 240,
                wake_slack_seconds: 2,
                config_reload_interval_seconds: 60,
                stall_pause_seconds: default_stall_pause_seconds(),
            },
            world: WorldConfig {
                max_concurrent_fetches: 4,
            },
        }
    }
}

impl AgentConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(config_path: &str) -> Result<Self, ConfigError> {
        if Path::new(config_path).exists() {
            info!(path = config_path, "loading configuration");
            let config_str = fs::read_to_string(config_path)?;
            let config: AgentConfig = toml::from_str(&config_str)?;
            Ok(config)
        } else {
            info!(path = config_path, "creating default configuration");
            let config = AgentConfig::default();
            config.save(config_path)?;
            info!("edit {} to set your player id and combat fleets", config_path);
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &str) -> Result<(), ConfigError> {
        if let Some(parent) = Path::new(config_path).parent() {
            fs::create_dir_all(parent)?;
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.graphql_url.is_empty() {
            return Err(ConfigError::Invalid("graphql_url must be set".to_string()));
        }
        if self.fleets.ship_capacity <= 0 {
            return Err(ConfigError::Invalid("ship_capacity must be positive".to_string()));
        }
        if self.targeting.search_window_minutes >= 60 {
            return Err(ConfigError::Invalid(
                "search_window_minutes must be below 60".to_string(),
            ));
        }
        if self.timing.idle_ceiling_minutes <= 0 {
            return Err(ConfigError::Invalid("idle_ceiling_minutes must be positive".to_string()));
        }
        if self.timing.wake_slack_seconds <= 0 {
            return Err(ConfigError::Invalid("wake_slack_seconds must be positive".to_string()));
        }
        if self.timing.stall_pause_seconds == 0 {
            return Err(ConfigError::Invalid("stall_pause_seconds must be positive".to_string()));
        }
        if self.world.max_concurrent_fetches == 0 {
            return Err(ConfigError::Invalid(
                "max_concurrent_fetches must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn print_summary(&self) {
        info!("configuration summary:");
        info!("   combat fleets: {:?}", self.fleets.combat_fleets);
        info!("   ship capacity: {}", self.fleets.ship_capacity);
        info!(
            "   target search window: first {} minutes of each hour",
            self.targeting.search_window_minutes
        );
        info!("   structure refresh: {} minutes", self.timing.structure_refresh_minutes);
        info!("   request delay: {}ms", self.api.request_delay_ms);
        if self.api.player_id.is_empty() {
            warn!("player_id is empty; fleet and cargo queries will return nothing");
        }
    }
}

/// Hot-reloadable configuration manager
#[derive(Debug)]
pub struct ConfigManager {
    config: AgentConfig,
    config_path: String,
    last_modified: Option<SystemTime>,
    last_reload_check: SystemTime,
}

impl ConfigManager {
    pub fn new(config_path: &str) -> Result<Self, ConfigError> {
        let config = AgentConfig::load_or_create(config_path)?;
        config.validate()?;
        config.print_summary();

        let last_modified = fs::metadata(config_path)
            .and_then(|m| m.modified())
            .ok();

        Ok(Self {
            config,
            config_path: config_path.to_string(),
            last_modified,
            last_reload_check: SystemTime::now(),
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Check if config should be reloaded and do so if needed
    pub fn check_and_reload(&mut self) -> bool {
        let now = SystemTime::now();
        let reload_interval =
            std::time::Duration::from_secs(self.config.timing.config_reload_interval_seconds);

        if now.duration_since(self.last_reload_check).unwrap_or_default() < reload_interval {
            return false;
        }

        self.last_reload_check = now;

        let modified = fs::metadata(&self.config_path).and_then(|m| m.modified());
        match modified {
            Ok(modified) if Some(modified) != self.last_modified => self.reload_config(modified),
            _ => false,
        }
    }

    fn reload_config(&mut self, new_modified_time: SystemTime) -> bool {
        let mut new_config = match AgentConfig::load_or_create(&self.config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "failed to reload configuration, keeping current config");
                return false;
            }
        };

        if let Err(e) = new_config.validate() {
            warn!(error = %e, "invalid configuration detected, keeping current config");
            return false;
        }

        // The API client is built once at startup
        if new_config.api != self.config.api {
            warn!("changes to the [api] section take effect after a restart");
            new_config.api = self.config.api.clone();
        }

        self.config = new_config;
        self.last_modified = Some(new_modified_time);
        info!(path = %self.config_path, "configuration reloaded");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AgentConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_fan_out() {
        let mut config = AgentConfig::default();
        config.world.max_concurrent_fetches = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn creates_default_file_and_reads_it_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("agent.toml");
        let path = path.to_str().unwrap();

        let created = AgentConfig::load_or_create(path).unwrap();
        assert!(Path::new(path).exists());

        let loaded = AgentConfig::load_or_create(path).unwrap();
        assert_eq!(loaded.fleets.combat_fleets, created.fleets.combat_fleets);
        assert_eq!(loaded.targeting.depletion_threshold, 12000);
    }

    #[test]
    fn reload_is_throttled_by_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.toml");
        let mut manager = ConfigManager::new(path.to_str().unwrap()).unwrap();

        // The interval has not elapsed since construction
        assert!(!manager.check_and_reload());
        assert_eq!(manager.config().fleets.ship_capacity, 5000);
    }

    #[test]
    fn reload_applies_engine_settings_but_keeps_api_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.toml");
        let path = path.to_str().unwrap();
        let mut manager = ConfigManager::new(path).unwrap();

        let mut edited = manager.config().clone();
        edited.fleets.ship_capacity = 4000;
        edited.api.player_id = "someone-else".to_string();
        edited.api.request_delay_ms = 50;
        edited.save(path).unwrap();

        assert!(manager.reload_config(SystemTime::now()));
        assert_eq!(manager.config().fleets.ship_capacity, 4000);
        assert_eq!(manager.config().api.player_id, "");
        assert_eq!(manager.config().api.request_delay_ms, 1000);
    }

    #[test]
    fn stall_pause_defaults_when_missing_from_file() {
        let text = toml::to_string_pretty(&AgentConfig::default()).unwrap();
        let older: String = text
            .lines()
            .filter(|line| !line.starts_with("stall_pause_seconds"))
            .map(|line| format!("{}\n", line))
            .collect();

        let config: AgentConfig = toml::from_str(&older).unwrap();
        assert_eq!(config.timing.stall_pause_seconds, 30);

        let mut config = config;
        config.timing.stall_pause_seconds = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
