// Zone events: the transient, depleting opportunities fleets fight over
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::ids::{flexible_id, EventId, ZoneId};
use super::position::Position;
use super::resource::ResourceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EventKind {
    Pirate,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventSpec {
    #[serde(rename = "type")]
    pub kind: EventKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Opportunity {
    #[serde(deserialize_with = "flexible_id")]
    pub id: EventId,
    pub zone_id: ZoneId,
    pub q: i32,
    pub r: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub reward_type: ResourceType,
    pub reward_left: i64,
    #[serde(default)]
    pub count_lurking_fleets: i64,
    pub spec: EventSpec,
}

impl Opportunity {
    pub fn position(&self) -> Position {
        Position::new(self.q, self.r)
    }

    pub fn is_pirate(&self) -> bool {
        self.spec.kind == EventKind::Pirate
    }
}
