use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::ids::{FleetId, ShipId, ZoneId};
use super::position::Position;
use super::resource::CargoItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum FleetState {
    /// Docked and empty-handed, waiting for orders
    Hangar,
    Idle,
    Moving,
    InEvent,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    #[serde(default)]
    pub cargo: Vec<CargoItem>,
    #[serde(default)]
    pub is_damaged: bool,
}

impl Ship {
    pub fn has_cargo(&self) -> bool {
        !self.cargo.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FleetZoneEvent {
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fleet {
    pub id: FleetId,
    pub name: String,
    pub state: FleetState,
    /// Unset while the fleet sits in the hangar
    pub zone_id: Option<ZoneId>,
    pub zone_pos: Option<Position>,
    pub zone_movement_end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_zone_event: Vec<FleetZoneEvent>,
    #[serde(default)]
    pub ships: Vec<Ship>,
}

impl Fleet {
    pub fn is_damaged(&self) -> bool {
        self.ships.iter().any(|ship| ship.is_damaged)
    }

    /// Zone and position, once the fleet has been placed in a zone
    pub fn location(&self) -> Option<(ZoneId, Position)> {
        Some((self.zone_id?, self.zone_pos?))
    }

    pub fn carries_cargo(&self) -> bool {
        self.ships.iter().any(Ship::has_cargo)
    }

    /// When the fleet's current move or event completes, if it is doing either
    pub fn busy_until(&self) -> Option<DateTime<Utc>> {
        match self.state {
            FleetState::Moving => self.zone_movement_end_time,
            FleetState::InEvent => self.current_zone_event.first().and_then(|e| e.end_time),
            _ => None,
        }
    }
}
