// Imperium Autonomous Fleet Agent Library
// Decision engine plus a GraphQL gateway for the game backend

pub mod models;
pub mod client;
pub mod operations;
pub mod admiral;
pub mod clock;
pub mod config;
pub mod error;
pub mod verbosity;

// Re-export commonly used types
pub use models::{CargoItem, Fleet, FleetState, Opportunity, Position, ResourceType, Structure, StructureKind};

pub use client::{GameGateway, ImperiumClient, TokenStore};
pub use admiral::{Admiral, CycleOutcome};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AgentConfig, ConfigManager};
pub use error::{ConfigError, EngineError, GatewayError};
pub use operations::{EngineSession, FleetAction, Gap, WorldSnapshot};

// Constants
pub const GRAPHQL_URL: &str = "https://ime-pro.hasura.app/v1/graphql";
pub const AGENT_TOKEN_FILE: &str = "AGENT_TOKEN";
pub const DEFAULT_CONFIG_PATH: &str = "config/imperium.toml";
