// Scheduler - how long to sleep when no fleet can be given an order
use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::config::{AgentConfig, TimingConfig};
use crate::models::{Fleet, FleetState};
use crate::operations::{fleet_role, DispatchReport, FleetRole};

/// True when every available fleet is a docked combat fleet and the hourly
/// search window has passed. Vacuously true for an empty list once the
/// window has passed.
pub fn only_docked_combat_past_window(available: &[&Fleet], minute: u32, config: &AgentConfig) -> bool {
    let all_docked_combat = available
        .iter()
        .all(|f| f.state == FleetState::Hangar && fleet_role(f, &config.fleets) == FleetRole::Combat);
    all_docked_combat && minute >= config.targeting.search_window_minutes
}

/// Seconds until the first moving or in-event fleet frees up, never negative
pub fn until_earliest_completion(fleets: &[Fleet], now: DateTime<Utc>) -> Option<f64> {
    fleets
        .iter()
        .filter_map(Fleet::busy_until)
        .map(|end| ((end - now).num_milliseconds() as f64 / 1000.0).max(0.0))
        .min_by(f64::total_cmp)
}

/// Sleep before the next poll.
///
/// Docked combat fleets only search at the top of the hour, so when they are
/// all that is left the sleep is capped at the next hour boundary. Otherwise
/// the cap is the idle ceiling. Either way the engine wakes as soon as the
/// first busy fleet finishes.
pub fn next_wake(
    fleets: &[Fleet],
    only_docked_combat: bool,
    now: DateTime<Utc>,
    minute: u32,
    timing: &TimingConfig,
) -> Duration {
    let ceiling = if only_docked_combat {
        f64::from(60 - minute.min(59)) * 60.0
    } else {
        timing.idle_ceiling_minutes as f64 * 60.0
    };

    let until_earliest = until_earliest_completion(fleets, now).unwrap_or(ceiling);
    let wait = until_earliest.min(ceiling).ceil() as u64 + timing.wake_slack_seconds.max(1) as u64;
    Duration::from_secs(wait)
}

/// Pause before re-polling after a dispatch in which no fleet received a command
pub fn pause_after_dispatch(report: &DispatchReport, timing: &TimingConfig) -> Option<Duration> {
    if report.iter().any(|(_, action)| action.is_command()) {
        None
    } else {
        Some(Duration::from_secs(timing.stall_pause_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{FleetAction, Gap};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        "2024-05-01T10:20:00Z".parse().unwrap()
    }

    fn fleet(name: &str, state: &str, movement_end: Option<&str>, event_end: Option<&str>) -> Fleet {
        let events = match event_end {
            Some(end) => json!([{ "end_time": end }]),
            None => json!([]),
        };
        serde_json::from_value(json!({
            "id": format!("{}-id", name),
            "name": name,
            "state": state,
            "zone_id": 1,
            "zone_pos": "(0,0)",
            "zone_movement_end_time": movement_end,
            "current_zone_event": events,
            "ships": []
        }))
        .unwrap()
    }

    fn timing() -> TimingConfig {
        AgentConfig::default().timing
    }

    #[test]
    fn wakes_shortly_after_the_first_busy_fleet() {
        let fleets = vec![
            fleet("A", "Moving", Some("2024-05-01T10:25:00Z"), None),
            fleet("B", "InEvent", None, Some("2024-05-01T10:21:30Z")),
        ];
        let wait = next_wake(&fleets, false, now(), 20, &timing());
        assert_eq!(wait, Duration::from_secs(92));
    }

    #[test]
    fn docked_combat_fleets_cap_at_the_hour() {
        let fleets = vec![fleet("A", "Moving", Some("2024-05-01T12:00:00Z"), None)];
        let wait = next_wake(&fleets, true, now(), 20, &timing());
        assert_eq!(wait, Duration::from_secs(40 * 60 + 2));
    }

    #[test]
    fn no_busy_fleets_sleeps_until_the_ceiling() {
        let wait = next_wake(&[], false, now(), 20, &timing());
        assert_eq!(wait, Duration::from_secs(240 * 60 + 2));
    }

    #[test]
    fn overdue_completions_still_sleep_the_slack() {
        let fleets = vec![fleet("A", "Moving", Some("2024-05-01T10:00:00Z"), None)];
        let wait = next_wake(&fleets, false, now(), 20, &timing());
        assert_eq!(wait, Duration::from_secs(2));
    }

    #[test]
    fn wait_is_bounded_by_ceiling_and_earliest_completion() {
        let timing = timing();
        let ends = ["2024-05-01T10:20:01Z", "2024-05-01T11:00:00Z", "2024-05-01T20:00:00Z"];
        for end in ends {
            let fleets = vec![fleet("A", "Moving", Some(end), None)];
            for (only_combat, ceiling) in [(false, 240 * 60), (true, 40 * 60)] {
                let wait = next_wake(&fleets, only_combat, now(), 20, &timing).as_secs() as f64;
                let until = until_earliest_completion(&fleets, now()).unwrap();
                assert!(wait > 0.0);
                assert!(wait <= ceiling as f64 + 2.0);
                assert!(wait <= until.ceil() + 2.0);
            }
        }
    }

    #[test]
    fn only_combat_check_respects_the_search_window() {
        let config = AgentConfig::default();
        let hunters = fleet("Pirate Hunters", "Hangar", None, None);
        let hauler = fleet("Hauler", "Hangar", None, None);

        assert!(only_docked_combat_past_window(&[&hunters], 5, &config));
        assert!(!only_docked_combat_past_window(&[&hunters], 1, &config));
        assert!(!only_docked_combat_past_window(&[&hunters, &hauler], 5, &config));
        assert!(only_docked_combat_past_window(&[], 5, &config));
    }

    #[test]
    fn dispatch_without_commands_pauses_before_polling_again() {
        let timing = timing();
        let stuck = vec![
            ("a".to_string(), FleetAction::Gap(Gap::NoDockInZone { zone: 3 })),
            ("b".to_string(), FleetAction::WaitingForResources),
        ];
        assert_eq!(pause_after_dispatch(&stuck, &timing), Some(Duration::from_secs(30)));

        let moving = vec![
            ("a".to_string(), FleetAction::Gap(Gap::NoLocation)),
            ("b".to_string(), FleetAction::DockedAndUnloaded),
        ];
        assert_eq!(pause_after_dispatch(&moving, &timing), None);
    }
}
