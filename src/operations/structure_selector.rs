// Structure selector - where a loaded trade fleet should take its cargo
use crate::models::{Position, ResourceType, StructureId, StructureKind, ZoneId};
use crate::operations::WorldSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct StructurePick {
    pub structure_id: StructureId,
    pub zone_id: ZoneId,
    pub position: Position,
    /// Dock in the structure's zone the fleet launches from
    pub dock_id: StructureId,
    /// Distance from that dock to the structure
    pub distance: f64,
    pub lurkers: i64,
}

/// Least contended structure of `kind` accepting `input`, nearest to a dock.
///
/// Contention is compared first: a far structure with fewer lurking fleets
/// beats a near one with more. Candidates without a dock in their zone are
/// dropped.
pub fn best_structure(world: &WorldSnapshot, kind: StructureKind, input: ResourceType) -> Option<StructurePick> {
    let candidates: Vec<_> = world
        .structures()
        .iter()
        .filter(|s| s.kind() == kind)
        .filter(|s| s.primary_input().is_some_and(|i| i.input_type == input))
        .collect();

    let least_lurkers = candidates.iter().map(|s| s.count_lurking_fleets).min()?;

    candidates
        .into_iter()
        .filter(|s| s.count_lurking_fleets == least_lurkers)
        .filter_map(|s| {
            let position = s.position();
            let dock = world.closest_dock(s.zone_id, position)?;
            Some(StructurePick {
                structure_id: s.id.clone(),
                zone_id: s.zone_id,
                position,
                dock_id: dock.id.clone(),
                distance: dock.position().distance_to(&position),
                lurkers: s.count_lurking_fleets,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
