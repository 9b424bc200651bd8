// Per-fleet dispatch outcomes
use std::fmt;

use crate::models::{Position, ResourceType, ZoneId};

/// Decisions the engine could not carry out because the world lacks something
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    /// An Idle fleet reported without a zone position
    NoLocation,
    NoDockInZone { zone: ZoneId },
    NoStructure { resource: ResourceType },
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gap::NoLocation => write!(f, "fleet has no zone position"),
            Gap::NoDockInZone { zone } => write!(f, "no dock in zone {}", zone),
            Gap::NoStructure { resource } => write!(f, "no structure accepts {}", resource),
        }
    }
}

/// What a dispatcher did with one fleet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetAction {
    DockedAndUnloaded,
    /// Launched from a dock and sent towards a pirate event
    Launched { event_id: String, target: Position },
    NoTarget,
    TakingBreak,
    Fighting { event_id: String },
    ReturningToDock { dock: Position },
    Interacting { structure_id: String },
    LoadedAndLaunched { resource: ResourceType, target: Position },
    WaitingForResources,
    Gap(Gap),
    Skipped,
}

impl FleetAction {
    /// True when the action issued at least one mutation
    pub fn is_command(&self) -> bool {
        !matches!(
            self,
            FleetAction::NoTarget
                | FleetAction::TakingBreak
                | FleetAction::WaitingForResources
                | FleetAction::Gap(_)
                | FleetAction::Skipped
        )
    }
}

impl fmt::Display for FleetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetAction::DockedAndUnloaded => write!(f, "docked and unloaded"),
            FleetAction::Launched { event_id, target } => {
                write!(f, "launched towards event {} at {}", event_id, target)
            }
            FleetAction::NoTarget => write!(f, "no pirate planet available"),
            FleetAction::TakingBreak => write!(f, "taking a break"),
            FleetAction::Fighting { event_id } => write!(f, "fighting event {}", event_id),
            FleetAction::ReturningToDock { dock } => write!(f, "returning to dock at {}", dock),
            FleetAction::Interacting { structure_id } => {
                write!(f, "trading/refining at structure {}", structure_id)
            }
            FleetAction::LoadedAndLaunched { resource, target } => {
                write!(f, "loaded {} and launched to {}", resource, target)
            }
            FleetAction::WaitingForResources => write!(f, "waiting for new resources"),
            FleetAction::Gap(gap) => write!(f, "skipped: {}", gap),
            FleetAction::Skipped => write!(f, "nothing to do"),
        }
    }
}

pub type DispatchReport = Vec<(crate::models::FleetId, FleetAction)>;
