// Targeting policy - which pirate event a docked combat fleet should chase
use tracing::debug;

use crate::config::TargetingConfig;
use crate::models::{Opportunity, ResourceType};
use crate::operations::EngineSession;

fn best_untargeted<'a>(
    opportunities: &'a [Opportunity],
    session: &EngineSession,
    reward: ResourceType,
    min_reward: i64,
) -> Option<&'a Opportunity> {
    opportunities
        .iter()
        .filter(|o| o.reward_type == reward && o.reward_left > min_reward && !session.is_targeted(&o.id))
        // max_by_key keeps the last maximum; reverse so the earliest listed wins ties
        .rev()
        .max_by_key(|o| o.reward_left)
}

/// Picks the next event and records it as targeted.
///
/// Imperium Ore beats Xeto Ore; Iron Ore is only worth chasing while trade
/// fleets are starved and the event is rich. When nothing qualifies the
/// session is flagged so docked combat fleets stay parked.
pub fn pick_target<'a>(
    opportunities: &'a [Opportunity],
    session: &mut EngineSession,
    config: &TargetingConfig,
) -> Option<&'a Opportunity> {
    let mut target = best_untargeted(opportunities, session, ResourceType::ImperiumOre, i64::MIN)
        .or_else(|| best_untargeted(opportunities, session, ResourceType::XetoOre, i64::MIN));

    if target.is_none() && session.wait_for_more_resources {
        target = best_untargeted(opportunities, session, ResourceType::IronOre, config.iron_min_reward);
    }

    match target {
        Some(event) => {
            session.mark_targeted(&event.id);
            debug!(event = %event.id, reward = %event.reward_type, left = event.reward_left, "target picked");
        }
        None => session.no_pirate_planets = true,
    }
    target
}
