// Combat dispatcher - pirate hunting fleets
use tracing::{debug, info, warn};

use crate::client::GameGateway;
use crate::clock::Clock;
use crate::config::AgentConfig;
use crate::error::GatewayResult;
use crate::models::{Fleet, FleetState};
use crate::operations::{
    pick_target, DispatchReport, EngineSession, FleetAction, Gap, NavigationOperations, WorldSnapshot,
};

pub struct CombatOperations<'a> {
    gateway: &'a dyn GameGateway,
    world: &'a WorldSnapshot,
    config: &'a AgentConfig,
    clock: &'a dyn Clock,
    navigation: NavigationOperations<'a>,
}

impl<'a> CombatOperations<'a> {
    pub fn new(
        gateway: &'a dyn GameGateway,
        world: &'a WorldSnapshot,
        config: &'a AgentConfig,
        clock: &'a dyn Clock,
    ) -> Self {
        let navigation = NavigationOperations::new(gateway, world);
        Self {
            gateway,
            world,
            config,
            clock,
            navigation,
        }
    }

    /// Gives every combat fleet in the batch one order, in roster order.
    /// Any gateway failure aborts the remainder of the batch.
    pub async fn dispatch(&self, fleets: &[&Fleet], session: &mut EngineSession) -> GatewayResult<DispatchReport> {
        if fleets.is_empty() {
            return Ok(Vec::new());
        }
        info!(count = fleets.len(), "combat fleets ready");

        let mut report = Vec::with_capacity(fleets.len());
        for fleet in fleets {
            let action = self.next_action(fleet, session).await?;
            if let FleetAction::Gap(gap) = &action {
                warn!(fleet = %fleet.name, %gap, "combat order skipped");
            } else {
                debug!(fleet = %fleet.name, %action, "combat order");
            }
            report.push((fleet.id.clone(), action));
        }
        Ok(report)
    }

    pub async fn next_action(&self, fleet: &Fleet, session: &mut EngineSession) -> GatewayResult<FleetAction> {
        let dock = fleet
            .location()
            .and_then(|(zone, position)| self.world.dock_at(zone, position));

        match (fleet.state, dock) {
            (FleetState::Idle, Some(dock)) => {
                let action = self.navigation.dock_and_unload(fleet, &dock.id).await?;
                session.wait_for_more_resources = false;
                Ok(action)
            }
            (FleetState::Hangar, _) => {
                if self.clock.minute_of_hour() <= self.config.targeting.search_window_minutes {
                    self.search_and_launch(fleet, session).await
                } else {
                    info!(fleet = %fleet.name, "taking a break");
                    Ok(FleetAction::TakingBreak)
                }
            }
            (FleetState::Idle, None) => self.engage_or_return(fleet).await,
            _ => Ok(FleetAction::Skipped),
        }
    }

    async fn search_and_launch(&self, fleet: &Fleet, session: &mut EngineSession) -> GatewayResult<FleetAction> {
        info!(fleet = %fleet.name, "searching for pirate planet");
        let opportunities = self
            .world
            .fresh_opportunities(self.gateway, self.clock.now(), self.config)
            .await?;

        let Some(event) = pick_target(&opportunities, session, &self.config.targeting) else {
            info!(fleet = %fleet.name, "no pirate planet worth chasing");
            return Ok(FleetAction::NoTarget);
        };

        let target = event.position();
        let Some(dock) = self.world.closest_dock(event.zone_id, target) else {
            return Ok(FleetAction::Gap(Gap::NoDockInZone { zone: event.zone_id }));
        };

        info!(fleet = %fleet.name, reward = %event.reward_type, left = event.reward_left, "launching towards pirate planet");
        self.navigation.launch_and_move(fleet, &dock.id, target).await?;
        Ok(FleetAction::Launched {
            event_id: event.id.clone(),
            target,
        })
    }

    /// An idle fleet out in a zone either fights the event it sits on or heads home
    async fn engage_or_return(&self, fleet: &Fleet) -> GatewayResult<FleetAction> {
        let Some((zone, position)) = fleet.location() else {
            return self.navigation.return_to_dock(fleet).await;
        };
        let events = self.gateway.list_events(zone).await?;
        let here = events.iter().find(|e| e.position() == position);

        match here {
            Some(event) if event.is_pirate() => {
                if event.reward_left < self.config.targeting.depletion_threshold {
                    info!(fleet = %fleet.name, left = event.reward_left, "pirate event depleted, returning to base");
                    return self.navigation.return_to_dock(fleet).await;
                }
                if fleet.carries_cargo() {
                    info!(fleet = %fleet.name, "returning pirate haul to base");
                    return self.navigation.return_to_dock(fleet).await;
                }

                info!(fleet = %fleet.name, event = %event.id, "engaging pirates");
                self.gateway.fight(fleet, &event.id).await?;
                Ok(FleetAction::Fighting {
                    event_id: event.id.clone(),
                })
            }
            _ => {
                info!(fleet = %fleet.name, "returning to dock");
                self.navigation.return_to_dock(fleet).await
            }
        }
    }
}
