// Client module - game data gateway and its GraphQL implementation
pub mod api;
pub mod auth;
pub mod gateway;
pub mod queries;

pub use api::ImperiumClient;
pub use auth::{load_agent_token, TokenStore};
pub use gateway::GameGateway;
