// The game data gateway: everything the decision engine asks of the outside world
use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::models::*;

/// Read and write access to the game.
///
/// The engine is written against this trait only. Implementations own
/// transport concerns: rate limiting, credential refresh and the single
/// retry that goes with it. Any error they return aborts the current
/// control-loop iteration.
#[async_trait]
pub trait GameGateway: Send + Sync {
    async fn list_zones(&self) -> GatewayResult<Vec<ZoneId>>;

    /// Non-expired events with reward left
    async fn list_events(&self, zone: ZoneId) -> GatewayResult<Vec<Opportunity>>;

    /// Structures that have not ended
    async fn list_structures(&self, zone: ZoneId) -> GatewayResult<Vec<Structure>>;

    async fn list_fleets(&self) -> GatewayResult<Vec<Fleet>>;

    async fn move_fleets(&self, fleet_ids: &[FleetId], target: Position) -> GatewayResult<()>;

    async fn launch_fleets(&self, fleet_ids: &[FleetId], structure_id: &StructureId) -> GatewayResult<()>;

    async fn dock_fleet(&self, fleet: &Fleet, structure_id: &StructureId) -> GatewayResult<()>;

    /// No-op when the fleet carries nothing
    async fn unload_fleet(&self, fleet: &Fleet) -> GatewayResult<()>;

    /// Unloads any existing cargo first, then draws `per_ship` of `resource` into every ship
    async fn load_fleet(&self, fleet: &Fleet, resource: ResourceType, per_ship: i64) -> GatewayResult<()>;

    async fn fight(&self, fleet: &Fleet, event_id: &EventId) -> GatewayResult<()>;

    async fn structure_interact(&self, fleet: &Fleet, structure_id: &StructureId) -> GatewayResult<()>;

    async fn get_storage(&self) -> GatewayResult<Vec<CargoItem>>;
}
