// World snapshot - cached structure map plus on-demand event lookups
use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::client::GameGateway;
use crate::config::AgentConfig;
use crate::error::GatewayResult;
use crate::models::*;

/// Structures across every zone, refreshed wholesale once stale.
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    structures: Vec<Structure>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl WorldSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot seeded with known structures
    pub fn with_structures(structures: Vec<Structure>, refreshed_at: DateTime<Utc>) -> Self {
        Self {
            structures,
            refreshed_at: Some(refreshed_at),
        }
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn is_stale(&self, now: DateTime<Utc>, refresh_minutes: i64) -> bool {
        match self.refreshed_at {
            None => true,
            Some(at) => now - at > Duration::minutes(refresh_minutes),
        }
    }

    /// Re-fetches every zone's structures when stale. Returns whether a refresh
    /// happened. On error the previous snapshot is left as it was.
    pub async fn refresh_if_stale(
        &mut self,
        gateway: &dyn GameGateway,
        now: DateTime<Utc>,
        config: &AgentConfig,
    ) -> GatewayResult<bool> {
        if !self.is_stale(now, config.timing.structure_refresh_minutes) {
            return Ok(false);
        }

        let zones = gateway.list_zones().await?;
        let per_zone: Vec<Vec<Structure>> = stream::iter(zones.iter().copied())
            .map(|zone| gateway.list_structures(zone))
            .buffer_unordered(config.world.max_concurrent_fetches)
            .try_collect()
            .await?;

        self.structures = per_zone.into_iter().flatten().collect();
        self.refreshed_at = Some(now);
        info!(
            zones = zones.len(),
            structures = self.structures.len(),
            "structure map refreshed"
        );
        Ok(true)
    }

    /// Pirate events across all zones that started within the freshness window
    pub async fn fresh_opportunities(
        &self,
        gateway: &dyn GameGateway,
        now: DateTime<Utc>,
        config: &AgentConfig,
    ) -> GatewayResult<Vec<Opportunity>> {
        let zones = gateway.list_zones().await?;
        let per_zone: Vec<Vec<Opportunity>> = stream::iter(zones)
            .map(|zone| gateway.list_events(zone))
            .buffer_unordered(config.world.max_concurrent_fetches)
            .try_collect()
            .await?;

        let cutoff = now - Duration::minutes(config.targeting.freshness_minutes);
        let fresh: Vec<Opportunity> = per_zone
            .into_iter()
            .flatten()
            .filter(|event| event.is_pirate() && event.start_time > cutoff)
            .collect();

        debug!(count = fresh.len(), "fresh pirate events");
        Ok(fresh)
    }

    pub fn dock_at(&self, zone: ZoneId, position: Position) -> Option<&Structure> {
        self.structures
            .iter()
            .find(|s| s.is_dock() && s.zone_id == zone && s.position() == position)
    }

    pub fn structure_at(&self, zone: ZoneId, position: Position) -> Option<&Structure> {
        self.structures
            .iter()
            .find(|s| s.zone_id == zone && s.position() == position)
    }

    /// Nearest dock in `zone`; the first one listed wins ties
    pub fn closest_dock(&self, zone: ZoneId, position: Position) -> Option<&Structure> {
        self.structures
            .iter()
            .filter(|s| s.is_dock() && s.zone_id == zone)
            .min_by(|a, b| {
                position
                    .distance_to(&a.position())
                    .total_cmp(&position.distance_to(&b.position()))
            })
    }
}
