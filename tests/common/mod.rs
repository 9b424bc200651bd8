// Shared fixtures: an in-memory gateway that records every call
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use imperium_cc::error::{GatewayError, GatewayResult};
use imperium_cc::models::*;
use imperium_cc::GameGateway;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListZones,
    ListEvents(ZoneId),
    ListStructures(ZoneId),
    ListFleets,
    Move { fleets: Vec<FleetId>, target: Position },
    Launch { fleets: Vec<FleetId>, structure: StructureId },
    Dock { fleet: FleetId, structure: StructureId },
    Unload { fleet: FleetId },
    Load { fleet: FleetId, resource: ResourceType, per_ship: i64 },
    Fight { fleet: FleetId, event: EventId },
    Interact { fleet: FleetId, structure: StructureId },
    Storage,
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Call::ListZones | Call::ListEvents(_) | Call::ListStructures(_) | Call::ListFleets | Call::Storage
        )
    }
}

#[derive(Default)]
pub struct MockGateway {
    pub zones: Vec<ZoneId>,
    pub events: HashMap<ZoneId, Vec<Opportunity>>,
    pub structures: HashMap<ZoneId, Vec<Structure>>,
    pub fleets: Vec<Fleet>,
    pub storage: Vec<CargoItem>,
    /// Zone whose structure fetch fails
    pub failing_zone: Option<ZoneId>,
    calls: Mutex<Vec<Call>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_structures(mut self, structures: Vec<Structure>) -> Self {
        for structure in structures {
            if !self.zones.contains(&structure.zone_id) {
                self.zones.push(structure.zone_id);
            }
            self.structures.entry(structure.zone_id).or_default().push(structure);
        }
        self
    }

    pub fn with_events(mut self, events: Vec<Opportunity>) -> Self {
        for event in events {
            if !self.zones.contains(&event.zone_id) {
                self.zones.push(event.zone_id);
            }
            self.events.entry(event.zone_id).or_default().push(event);
        }
        self
    }

    pub fn with_fleets(mut self, fleets: Vec<Fleet>) -> Self {
        self.fleets = fleets;
        self
    }

    pub fn with_storage(mut self, storage: Vec<CargoItem>) -> Self {
        self.storage = storage;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the calls that change game state, in order
    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn count(&self, wanted: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| wanted(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GameGateway for MockGateway {
    async fn list_zones(&self) -> GatewayResult<Vec<ZoneId>> {
        self.record(Call::ListZones);
        Ok(self.zones.clone())
    }

    async fn list_events(&self, zone: ZoneId) -> GatewayResult<Vec<Opportunity>> {
        self.record(Call::ListEvents(zone));
        Ok(self.events.get(&zone).cloned().unwrap_or_default())
    }

    async fn list_structures(&self, zone: ZoneId) -> GatewayResult<Vec<Structure>> {
        self.record(Call::ListStructures(zone));
        if self.failing_zone == Some(zone) {
            return Err(GatewayError::Status {
                operation: "ZoneStructures",
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(self.structures.get(&zone).cloned().unwrap_or_default())
    }

    async fn list_fleets(&self) -> GatewayResult<Vec<Fleet>> {
        self.record(Call::ListFleets);
        Ok(self.fleets.clone())
    }

    async fn move_fleets(&self, fleet_ids: &[FleetId], target: Position) -> GatewayResult<()> {
        self.record(Call::Move {
            fleets: fleet_ids.to_vec(),
            target,
        });
        Ok(())
    }

    async fn launch_fleets(&self, fleet_ids: &[FleetId], structure_id: &StructureId) -> GatewayResult<()> {
        self.record(Call::Launch {
            fleets: fleet_ids.to_vec(),
            structure: structure_id.clone(),
        });
        Ok(())
    }

    async fn dock_fleet(&self, fleet: &Fleet, structure_id: &StructureId) -> GatewayResult<()> {
        self.record(Call::Dock {
            fleet: fleet.id.clone(),
            structure: structure_id.clone(),
        });
        Ok(())
    }

    async fn unload_fleet(&self, fleet: &Fleet) -> GatewayResult<()> {
        self.record(Call::Unload { fleet: fleet.id.clone() });
        Ok(())
    }

    async fn load_fleet(&self, fleet: &Fleet, resource: ResourceType, per_ship: i64) -> GatewayResult<()> {
        self.record(Call::Load {
            fleet: fleet.id.clone(),
            resource,
            per_ship,
        });
        Ok(())
    }

    async fn fight(&self, fleet: &Fleet, event_id: &EventId) -> GatewayResult<()> {
        self.record(Call::Fight {
            fleet: fleet.id.clone(),
            event: event_id.clone(),
        });
        Ok(())
    }

    async fn structure_interact(&self, fleet: &Fleet, structure_id: &StructureId) -> GatewayResult<()> {
        self.record(Call::Interact {
            fleet: fleet.id.clone(),
            structure: structure_id.clone(),
        });
        Ok(())
    }

    async fn get_storage(&self) -> GatewayResult<Vec<CargoItem>> {
        self.record(Call::Storage);
        Ok(self.storage.clone())
    }
}

pub fn at(timestamp: &str) -> DateTime<Utc> {
    timestamp.parse().unwrap()
}

pub fn ship(id: &str, cargo: Vec<CargoItem>) -> Ship {
    Ship {
        id: id.to_string(),
        cargo,
        is_damaged: false,
    }
}

pub fn cargo(resource_type: ResourceType, amount: i64) -> CargoItem {
    CargoItem { resource_type, amount }
}

pub fn fleet(name: &str, state: FleetState, zone_id: ZoneId, pos: Position, ships: Vec<Ship>) -> Fleet {
    Fleet {
        id: format!("{}-id", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        state,
        zone_id: Some(zone_id),
        zone_pos: Some(pos),
        zone_movement_end_time: None,
        current_zone_event: Vec::new(),
        ships,
    }
}

pub fn pirate_event(id: &str, zone_id: ZoneId, pos: Position, reward: ResourceType, left: i64, start: &str) -> Opportunity {
    Opportunity {
        id: id.to_string(),
        zone_id,
        q: pos.q,
        r: pos.r,
        start_time: at(start),
        end_time: None,
        reward_type: reward,
        reward_left: left,
        count_lurking_fleets: 0,
        spec: EventSpec { kind: EventKind::Pirate },
    }
}

pub fn dock(id: &str, zone_id: ZoneId, pos: Position) -> Structure {
    Structure {
        id: id.to_string(),
        zone_id,
        q: pos.q,
        r: pos.r,
        count_lurking_fleets: 0,
        spec: StructureSpec {
            kind: StructureKind::Dock,
            inputs: Vec::new(),
        },
    }
}

pub fn facility(
    id: &str,
    zone_id: ZoneId,
    pos: Position,
    kind: StructureKind,
    input: ResourceType,
    ratio: i64,
    lurkers: i64,
) -> Structure {
    Structure {
        id: id.to_string(),
        zone_id,
        q: pos.q,
        r: pos.r,
        count_lurking_fleets: lurkers,
        spec: StructureSpec {
            kind,
            inputs: vec![StructureInput {
                input_type: input,
                input_ratio: ratio,
            }],
        },
    }
}
