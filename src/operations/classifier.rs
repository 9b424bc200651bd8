// Fleet classifier - which fleets may receive orders this cycle
use crate::config::FleetConfig;
use crate::models::{Fleet, FleetState};
use crate::operations::EngineSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetRole {
    Combat,
    Trade,
}

pub fn fleet_role(fleet: &Fleet, config: &FleetConfig) -> FleetRole {
    if config.combat_fleets.iter().any(|name| name == &fleet.name) {
        FleetRole::Combat
    } else {
        FleetRole::Trade
    }
}

/// Fleets in an operable state that no session flag is holding back
pub fn classify_available<'a>(
    fleets: &'a [Fleet],
    session: &EngineSession,
    config: &FleetConfig,
) -> Vec<&'a Fleet> {
    fleets
        .iter()
        .filter(|fleet| is_available(fleet, session, config))
        .collect()
}

fn is_available(fleet: &Fleet, session: &EngineSession, config: &FleetConfig) -> bool {
    let operable = matches!(fleet.state, FleetState::Hangar | FleetState::Idle);
    if !operable {
        return false;
    }
    if fleet.state != FleetState::Hangar {
        return true;
    }

    // Hangar-only exclusions
    if fleet.is_damaged() {
        return false;
    }
    match fleet_role(fleet, config) {
        FleetRole::Combat => !session.no_pirate_planets,
        FleetRole::Trade => !session.wait_for_more_resources,
    }
}

/// Partitions available fleets into (combat, trade), keeping roster order
pub fn split_roles<'a>(available: &[&'a Fleet], config: &FleetConfig) -> (Vec<&'a Fleet>, Vec<&'a Fleet>) {
    available
        .iter()
        .copied()
        .partition(|fleet| fleet_role(fleet, config) == FleetRole::Combat)
}
