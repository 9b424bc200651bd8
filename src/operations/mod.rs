// Operations module - the decision engine: world state, policies and dispatchers

pub mod actions;
pub mod session;
pub mod world;
pub mod classifier;
pub mod targeting;
pub mod structure_selector;
pub mod navigation;
pub mod combat;
pub mod pickup;
pub mod trading;
pub mod scheduler;

pub use actions::*;
pub use session::*;
pub use world::*;
pub use classifier::*;
pub use targeting::*;
pub use structure_selector::*;
pub use navigation::*;
pub use combat::*;
pub use pickup::*;
pub use trading::*;
pub use scheduler::*;
