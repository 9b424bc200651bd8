// Resource pickup - loading a docked trade fleet from the depot
use tracing::{info, warn};

use crate::client::GameGateway;
use crate::config::AgentConfig;
use crate::error::GatewayResult;
use crate::models::{CargoItem, Fleet, ResourceType, StructureKind};
use crate::operations::{best_structure, EngineSession, FleetAction, Gap, NavigationOperations, WorldSnapshot};

/// Refined goods sell at trade houses, ores go to refineries
pub const PICKUP_PRIORITY: [(ResourceType, StructureKind); 6] = [
    (ResourceType::Imperium, StructureKind::TradeHouse),
    (ResourceType::ImperiumOre, StructureKind::Refinery),
    (ResourceType::Xeto, StructureKind::TradeHouse),
    (ResourceType::XetoOre, StructureKind::Refinery),
    (ResourceType::Iron, StructureKind::TradeHouse),
    (ResourceType::IronOre, StructureKind::Refinery),
];

/// First resource in priority order the depot holds enough of to fill every ship
pub fn choose_pickup(storage: &[CargoItem], ship_count: usize, ship_capacity: i64) -> Option<(ResourceType, StructureKind)> {
    let needed = ship_count as i64 * ship_capacity;
    PICKUP_PRIORITY.into_iter().find(|(resource, _)| {
        storage
            .iter()
            .any(|item| item.resource_type == *resource && item.amount >= needed)
    })
}

pub struct PickupOperations<'a> {
    gateway: &'a dyn GameGateway,
    world: &'a WorldSnapshot,
    config: &'a AgentConfig,
    navigation: NavigationOperations<'a>,
}

impl<'a> PickupOperations<'a> {
    pub fn new(gateway: &'a dyn GameGateway, world: &'a WorldSnapshot, config: &'a AgentConfig) -> Self {
        Self {
            gateway,
            world,
            config,
            navigation: NavigationOperations::new(gateway, world),
        }
    }

    pub async fn pick_resource(
        &self,
        fleet: &Fleet,
        storage: &[CargoItem],
        session: &mut EngineSession,
    ) -> GatewayResult<FleetAction> {
        let ship_capacity = self.config.fleets.ship_capacity;
        let Some((resource, kind)) = choose_pickup(storage, fleet.ships.len(), ship_capacity) else {
            info!(fleet = %fleet.name, "waiting for new resources");
            session.wait_for_more_resources = true;
            return Ok(FleetAction::WaitingForResources);
        };

        let Some(pick) = best_structure(self.world, kind, resource) else {
            session.wait_for_more_resources = true;
            let gap = Gap::NoStructure { resource };
            warn!(fleet = %fleet.name, %gap, "cannot deliver depot cargo");
            return Ok(FleetAction::Gap(gap));
        };

        info!(
            fleet = %fleet.name,
            %resource,
            structure = %pick.structure_id,
            lurkers = pick.lurkers,
            "loading fleet for delivery"
        );
        self.gateway.load_fleet(fleet, resource, ship_capacity).await?;
        self.navigation
            .launch_and_move(fleet, &pick.dock_id, pick.position)
            .await?;

        Ok(FleetAction::LoadedAndLaunched {
            resource,
            target: pick.position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(resource: ResourceType, amount: i64) -> CargoItem {
        CargoItem {
            resource_type: resource,
            amount,
        }
    }

    #[test]
    fn requires_a_full_load_for_every_ship() {
        let storage = vec![stored(ResourceType::Imperium, 9999), stored(ResourceType::XetoOre, 10000)];
        assert_eq!(
            choose_pickup(&storage, 2, 5000),
            Some((ResourceType::XetoOre, StructureKind::Refinery))
        );
        assert_eq!(choose_pickup(&storage, 3, 5000), None);
    }

    #[test]
    fn follows_priority_order() {
        let storage = vec![
            stored(ResourceType::IronOre, 50000),
            stored(ResourceType::Imperium, 25000),
            stored(ResourceType::Xeto, 50000),
        ];
        assert_eq!(
            choose_pickup(&storage, 2, 5000),
            Some((ResourceType::Imperium, StructureKind::TradeHouse))
        );
    }

    #[test]
    fn unknown_resources_are_never_picked() {
        let storage = vec![stored(ResourceType::Unknown, 1_000_000)];
        assert_eq!(choose_pickup(&storage, 1, 5000), None);
    }
}
