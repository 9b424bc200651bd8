// Models module - game entities as returned by the GraphQL API

pub mod ids;
pub mod position;
pub mod resource;
pub mod event;
pub mod structure;
pub mod fleet;
pub mod responses;

// Re-export all models for easier imports
pub use ids::*;
pub use position::*;
pub use resource::*;
pub use event::*;
pub use structure::*;
pub use fleet::*;
pub use responses::*;
