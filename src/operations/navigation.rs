// Fleet movement helpers shared by the combat and trade dispatchers
use tracing::{info, warn};

use crate::client::GameGateway;
use crate::error::GatewayResult;
use crate::models::{Fleet, Position, StructureId};
use crate::operations::{FleetAction, Gap, WorldSnapshot};

pub struct NavigationOperations<'a> {
    gateway: &'a dyn GameGateway,
    world: &'a WorldSnapshot,
}

impl<'a> NavigationOperations<'a> {
    pub fn new(gateway: &'a dyn GameGateway, world: &'a WorldSnapshot) -> Self {
        Self { gateway, world }
    }

    /// Sends the fleet to the nearest dock in its zone
    pub async fn return_to_dock(&self, fleet: &Fleet) -> GatewayResult<FleetAction> {
        let Some((zone, position)) = fleet.location() else {
            warn!(fleet = %fleet.name, gap = %Gap::NoLocation, "cannot return to dock");
            return Ok(FleetAction::Gap(Gap::NoLocation));
        };
        let Some(dock) = self.world.closest_dock(zone, position) else {
            let gap = Gap::NoDockInZone { zone };
            warn!(fleet = %fleet.name, %gap, "cannot return to dock");
            return Ok(FleetAction::Gap(gap));
        };

        let dock = dock.position();
        self.gateway.move_fleets(&[fleet.id.clone()], dock).await?;
        Ok(FleetAction::ReturningToDock { dock })
    }

    /// Launches a docked fleet from `dock_id` and moves it on to `target`
    pub async fn launch_and_move(&self, fleet: &Fleet, dock_id: &StructureId, target: Position) -> GatewayResult<()> {
        let ids = [fleet.id.clone()];
        self.gateway.launch_fleets(&ids, dock_id).await?;
        self.gateway.move_fleets(&ids, target).await?;
        info!(fleet = %fleet.name, dock = %dock_id, %target, "fleet launched");
        Ok(())
    }

    /// Docks at `dock_id` and empties the holds
    pub async fn dock_and_unload(&self, fleet: &Fleet, dock_id: &StructureId) -> GatewayResult<FleetAction> {
        info!(fleet = %fleet.name, "docking and unloading");
        self.gateway.dock_fleet(fleet, dock_id).await?;
        self.gateway.unload_fleet(fleet).await?;
        Ok(FleetAction::DockedAndUnloaded)
    }
}
