// Engine session - state that survives between dispatches until the next idle cycle
use std::collections::HashSet;

use crate::models::EventId;

/// Rolling decision state shared by every dispatcher within a cycle.
///
/// Dispatch is sequential, so the session is passed around as `&mut`.
#[derive(Debug, Clone, Default)]
pub struct EngineSession {
    /// Pirate events already assigned to a fleet this cycle
    pub targeted: HashSet<EventId>,
    /// Set when a targeting pass found nothing; parks docked combat fleets
    pub no_pirate_planets: bool,
    /// Set when the depot holds too little to fill a trade fleet; parks docked trade fleets
    pub wait_for_more_resources: bool,
}

impl EngineSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_targeted(&self, event_id: &str) -> bool {
        self.targeted.contains(event_id)
    }

    pub fn mark_targeted(&mut self, event_id: &str) {
        self.targeted.insert(event_id.to_string());
    }

    /// Called whenever the engine falls back to sleeping.
    /// `wait_for_more_resources` is only cleared by an unload.
    pub fn reset_cycle(&mut self) {
        self.no_pirate_planets = false;
        self.targeted.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_targets_but_keeps_resource_wait() {
        let mut session = EngineSession::new();
        session.mark_targeted("12");
        session.no_pirate_planets = true;
        session.wait_for_more_resources = true;

        session.reset_cycle();

        assert!(!session.is_targeted("12"));
        assert!(!session.no_pirate_planets);
        assert!(session.wait_for_more_resources);
    }
}
