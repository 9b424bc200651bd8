use serde::Deserialize;

use super::ids::{flexible_id, StructureId, ZoneId};
use super::position::Position;
use super::resource::ResourceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum StructureKind {
    Dock,
    TradeHouse,
    Refinery,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StructureInput {
    pub input_type: ResourceType,
    pub input_ratio: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StructureSpec {
    #[serde(rename = "type")]
    pub kind: StructureKind,
    #[serde(default)]
    pub inputs: Vec<StructureInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Structure {
    #[serde(deserialize_with = "flexible_id")]
    pub id: StructureId,
    pub zone_id: ZoneId,
    pub q: i32,
    pub r: i32,
    #[serde(default)]
    pub count_lurking_fleets: i64,
    pub spec: StructureSpec,
}

impl Structure {
    pub fn position(&self) -> Position {
        Position::new(self.q, self.r)
    }

    pub fn kind(&self) -> StructureKind {
        self.spec.kind
    }

    pub fn is_dock(&self) -> bool {
        self.spec.kind == StructureKind::Dock
    }

    /// Structures take a single input; the first entry describes it
    pub fn primary_input(&self) -> Option<&StructureInput> {
        self.spec.inputs.first()
    }
}
