// Trade dispatcher - hauling, refining and selling fleets
use tracing::{debug, info, warn};

use crate::client::GameGateway;
use crate::config::AgentConfig;
use crate::error::GatewayResult;
use crate::models::{Fleet, FleetState};
use crate::operations::{
    DispatchReport, EngineSession, FleetAction, NavigationOperations, PickupOperations, WorldSnapshot,
};

pub struct TradingOperations<'a> {
    gateway: &'a dyn GameGateway,
    world: &'a WorldSnapshot,
    navigation: NavigationOperations<'a>,
    pickup: PickupOperations<'a>,
}

impl<'a> TradingOperations<'a> {
    pub fn new(gateway: &'a dyn GameGateway, world: &'a WorldSnapshot, config: &'a AgentConfig) -> Self {
        Self {
            gateway,
            world,
            navigation: NavigationOperations::new(gateway, world),
            pickup: PickupOperations::new(gateway, world, config),
        }
    }

    pub async fn dispatch(&self, fleets: &[&Fleet], session: &mut EngineSession) -> GatewayResult<DispatchReport> {
        if fleets.is_empty() {
            return Ok(Vec::new());
        }
        info!(count = fleets.len(), "trading fleets ready");

        let mut report = Vec::with_capacity(fleets.len());
        for fleet in fleets {
            let action = self.next_action(fleet, session).await?;
            if let FleetAction::Gap(gap) = &action {
                warn!(fleet = %fleet.name, %gap, "trade order skipped");
            } else {
                debug!(fleet = %fleet.name, %action, "trade order");
            }
            report.push((fleet.id.clone(), action));
        }
        Ok(report)
    }

    pub async fn next_action(&self, fleet: &Fleet, session: &mut EngineSession) -> GatewayResult<FleetAction> {
        match fleet.state {
            FleetState::Idle => {
                let dock = fleet
                    .location()
                    .and_then(|(zone, position)| self.world.dock_at(zone, position));
                if let Some(dock) = dock {
                    let action = self.navigation.dock_and_unload(fleet, &dock.id).await?;
                    session.wait_for_more_resources = false;
                    return Ok(action);
                }
                if fleet.is_damaged() {
                    info!(fleet = %fleet.name, "returning damaged ship");
                    return self.navigation.return_to_dock(fleet).await;
                }
                self.trade_or_return(fleet).await
            }
            FleetState::Hangar => {
                let storage = self.gateway.get_storage().await?;
                self.pickup.pick_resource(fleet, &storage, session).await
            }
            _ => Ok(FleetAction::Skipped),
        }
    }

    /// Interacts with the structure under the fleet when the lead ship holds a
    /// full batch of its input, otherwise heads back to dock
    async fn trade_or_return(&self, fleet: &Fleet) -> GatewayResult<FleetAction> {
        let structure = fleet
            .location()
            .and_then(|(zone, position)| self.world.structure_at(zone, position));
        let input = structure.and_then(|s| s.primary_input());
        let held = match (input, fleet.ships.first()) {
            (Some(input), Some(lead)) => lead
                .cargo
                .iter()
                .find(|c| c.resource_type == input.input_type)
                .map(|c| c.amount),
            _ => None,
        };

        match (structure, input, held) {
            (Some(structure), Some(input), Some(amount)) if amount >= input.input_ratio => {
                info!(fleet = %fleet.name, structure = %structure.id, "trading/refining");
                self.gateway.structure_interact(fleet, &structure.id).await?;
                Ok(FleetAction::Interacting {
                    structure_id: structure.id.clone(),
                })
            }
            _ => {
                info!(fleet = %fleet.name, "returning to base");
                self.navigation.return_to_dock(fleet).await
            }
        }
    }
}
