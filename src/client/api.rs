use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};
use tracing::{debug, trace, warn};

use crate::client::auth::TokenStore;
use crate::client::gateway::GameGateway;
use crate::client::queries::{self, Operation};
use crate::config::AgentConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::models::*;

const CARGO_CHANGE_REASON: &str = "Updated by user";

/// One row of a cargo transfer between a ship and the player's depot.
/// Positive amounts move cargo to the depot, negative amounts load the ship.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoChange {
    pub ship_id: ShipId,
    pub resource_type: ResourceType,
    pub amount: i64,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetZoneEventInput {
    pub fleet_id: FleetId,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_id"
    )]
    pub zone_structure_id: Option<StructureId>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_id"
    )]
    pub zone_event_id: Option<EventId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

fn serialize_optional_id<S>(id: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match id {
        Some(id) => serialize_flexible_id(id, serializer),
        None => serializer.serialize_none(),
    }
}

pub fn unload_changes(fleet: &Fleet) -> Vec<CargoChange> {
    fleet
        .ships
        .iter()
        .flat_map(|ship| {
            ship.cargo.iter().map(|item| CargoChange {
                ship_id: ship.id.clone(),
                resource_type: item.resource_type,
                amount: item.amount,
                reason: CARGO_CHANGE_REASON,
            })
        })
        .collect()
}

pub fn load_changes(fleet: &Fleet, resource: ResourceType, per_ship: i64) -> Vec<CargoChange> {
    fleet
        .ships
        .iter()
        .map(|ship| CargoChange {
            ship_id: ship.id.clone(),
            resource_type: resource,
            amount: -per_ship,
            reason: CARGO_CHANGE_REASON,
        })
        .collect()
}

/// GraphQL client for the game backend.
///
/// Requests are spaced at least `request_delay` apart across all callers,
/// including concurrent per-zone fan-out. An expired token is reloaded from
/// the token file and the request retried exactly once.
pub struct ImperiumClient {
    http: reqwest::Client,
    endpoint: String,
    player_id: String,
    request_delay: Duration,
    tokens: TokenStore,
    last_request: Mutex<Option<Instant>>,
}

impl ImperiumClient {
    pub fn new(config: &AgentConfig, tokens: TokenStore) -> GatewayResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("accept", HeaderValue::from_static("*/*"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.api.request_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.api.graphql_url.clone(),
            player_id: config.api.player_id.clone(),
            request_delay: Duration::from_millis(config.api.request_delay_ms),
            tokens,
            last_request: Mutex::new(None),
        })
    }

    async fn throttle(&self) {
        // Held across the sleep so concurrent callers queue up behind each other
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.request_delay {
                sleep(self.request_delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn execute<T: DeserializeOwned>(&self, operation: &Operation, variables: Value) -> GatewayResult<T> {
        match self.send_once(operation, &variables).await {
            Err(GatewayError::AuthExpired) => {
                warn!(operation = operation.name, "token expired, reloading credentials");
                self.tokens.refresh().await?;
                self.send_once(operation, &variables).await
            }
            other => other,
        }
    }

    async fn send_once<T: DeserializeOwned>(&self, operation: &Operation, variables: &Value) -> GatewayResult<T> {
        self.throttle().await;

        let body = json!({
            "operationName": operation.name,
            "variables": variables,
            "query": operation.query,
        });
        trace!(operation = operation.name, %variables, "graphql request");

        let token = self.tokens.current().await;
        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GatewayError::AuthExpired);
        }
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response".to_string());
            return Err(GatewayError::Status {
                operation: operation.name,
                status: status.as_u16(),
                body: error_body,
            });
        }

        let response_text = response.text().await?;
        decode_response(operation.name, &response_text)
    }

    async fn assign_event(&self, fleet: &Fleet, input: FleetZoneEventInput) -> GatewayResult<()> {
        let variables = json!({
            "inputs": [input],
            "target": fleet.zone_pos,
        });
        let _: MutationAck = self.execute(&queries::ASSIGN_EVENT_TO_FLEETS, variables).await?;
        Ok(())
    }

    async fn apply_cargo_changes(&self, unload: Vec<CargoChange>, load: Vec<CargoChange>) -> GatewayResult<()> {
        let variables = json!({
            "unload_changes": unload,
            "load_changes": load,
        });
        let _: MutationAck = self.execute(&queries::CARGO_CHANGES, variables).await?;
        Ok(())
    }
}

/// Unwraps the GraphQL envelope, classifying errors
pub fn decode_response<T: DeserializeOwned>(operation: &'static str, body: &str) -> GatewayResult<T> {
    let envelope: GraphQlResponse<T> = serde_json::from_str(body)?;

    if !envelope.errors.is_empty() {
        if envelope.errors.iter().any(GraphQlError::is_auth_expired) {
            return Err(GatewayError::AuthExpired);
        }
        let message = envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(GatewayError::GraphQl { operation, message });
    }

    envelope.data.ok_or(GatewayError::MissingData(operation))
}

#[async_trait]
impl GameGateway for ImperiumClient {
    async fn list_zones(&self) -> GatewayResult<Vec<ZoneId>> {
        let data: ZonesData = self.execute(&queries::ZONES, json!({})).await?;
        Ok(data.zones.into_iter().map(|z| z.id).collect())
    }

    async fn list_events(&self, zone: ZoneId) -> GatewayResult<Vec<Opportunity>> {
        let data: EventsData = self.execute(&queries::ZONE_EVENTS, json!({ "zone_id": zone })).await?;
        debug!(zone, count = data.events.len(), "fetched zone events");
        Ok(data.events)
    }

    async fn list_structures(&self, zone: ZoneId) -> GatewayResult<Vec<Structure>> {
        let data: StructuresData = self
            .execute(&queries::ZONE_STRUCTURES, json!({ "zone_id": zone }))
            .await?;
        debug!(zone, count = data.structures.len(), "fetched zone structures");
        Ok(data.structures)
    }

    async fn list_fleets(&self) -> GatewayResult<Vec<Fleet>> {
        let data: FleetsData = self
            .execute(&queries::FLEETS, json!({ "player": self.player_id }))
            .await?;
        Ok(data.fleets)
    }

    async fn move_fleets(&self, fleet_ids: &[FleetId], target: Position) -> GatewayResult<()> {
        let variables = json!({
            "fleetIds": fleet_ids,
            "targetPos": target,
        });
        let _: MutationAck = self.execute(&queries::MOVE_FLEETS, variables).await?;
        Ok(())
    }

    async fn launch_fleets(&self, fleet_ids: &[FleetId], structure_id: &StructureId) -> GatewayResult<()> {
        let end_time = Utc::now();
        let inputs: Vec<FleetZoneEventInput> = fleet_ids
            .iter()
            .map(|fleet_id| FleetZoneEventInput {
                fleet_id: fleet_id.clone(),
                zone_structure_id: Some(structure_id.clone()),
                zone_event_id: None,
                end_time: Some(end_time),
            })
            .collect();

        let _: MutationAck = self
            .execute(&queries::LAUNCH_FLEETS, json!({ "inputs": inputs }))
            .await?;
        Ok(())
    }

    async fn dock_fleet(&self, fleet: &Fleet, structure_id: &StructureId) -> GatewayResult<()> {
        self.assign_event(
            fleet,
            FleetZoneEventInput {
                fleet_id: fleet.id.clone(),
                zone_structure_id: Some(structure_id.clone()),
                zone_event_id: None,
                end_time: None,
            },
        )
        .await
    }

    async fn unload_fleet(&self, fleet: &Fleet) -> GatewayResult<()> {
        if !fleet.carries_cargo() {
            return Ok(());
        }
        self.apply_cargo_changes(unload_changes(fleet), Vec::new()).await
    }

    async fn load_fleet(&self, fleet: &Fleet, resource: ResourceType, per_ship: i64) -> GatewayResult<()> {
        self.unload_fleet(fleet).await?;
        let changes = load_changes(fleet, resource, per_ship);
        self.apply_cargo_changes(Vec::new(), changes).await
    }

    async fn fight(&self, fleet: &Fleet, event_id: &EventId) -> GatewayResult<()> {
        self.assign_event(
            fleet,
            FleetZoneEventInput {
                fleet_id: fleet.id.clone(),
                zone_structure_id: None,
                zone_event_id: Some(event_id.clone()),
                end_time: None,
            },
        )
        .await
    }

    async fn structure_interact(&self, fleet: &Fleet, structure_id: &StructureId) -> GatewayResult<()> {
        self.assign_event(
            fleet,
            FleetZoneEventInput {
                fleet_id: fleet.id.clone(),
                zone_structure_id: Some(structure_id.clone()),
                zone_event_id: None,
                end_time: None,
            },
        )
        .await
    }

    async fn get_storage(&self) -> GatewayResult<Vec<CargoItem>> {
        let data: StorageData = self
            .execute(&queries::USER_CARGO, json!({ "owner": self.player_id }))
            .await?;
        Ok(data.cargo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet_with_cargo() -> Fleet {
        serde_json::from_value(json!({
            "id": "fleet-1",
            "name": "Hauler",
            "state": "Idle",
            "zone_id": 1,
            "zone_pos": "(0,0)",
            "zone_movement_end_time": null,
            "ships": [
                { "id": "ship-a", "cargo": [
                    { "resource_type": "Iron", "amount": 1200 },
                    { "resource_type": "Xeto Ore", "amount": 300 }
                ], "is_damaged": false },
                { "id": "ship-b", "cargo": [], "is_damaged": false }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn unload_moves_every_cargo_entry_to_the_depot() {
        let changes = unload_changes(&fleet_with_cargo());
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].ship_id, "ship-a");
        assert_eq!(changes[0].amount, 1200);
        assert_eq!(changes[1].resource_type, ResourceType::XetoOre);
    }

    #[test]
    fn load_draws_full_capacity_per_ship() {
        let changes = load_changes(&fleet_with_cargo(), ResourceType::Imperium, 5000);
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.amount == -5000));
        assert!(changes.iter().all(|c| c.resource_type == ResourceType::Imperium));
    }

    #[test]
    fn event_inputs_only_carry_the_relevant_target() {
        let input = FleetZoneEventInput {
            fleet_id: "fleet-1".to_string(),
            zone_structure_id: None,
            zone_event_id: Some("77".to_string()),
            end_time: None,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, json!({ "fleet_id": "fleet-1", "zone_event_id": 77 }));
    }

    #[test]
    fn decode_classifies_expired_tokens() {
        let body = r#"{"errors":[{"message":"Could not verify JWT: JWTExpired","extensions":{"code":"invalid-jwt"}}]}"#;
        let result: GatewayResult<ZonesData> = decode_response("ZONES", body);
        assert!(matches!(result, Err(GatewayError::AuthExpired)));
    }

    #[test]
    fn decode_reports_graphql_errors_and_missing_data() {
        let body = r#"{"errors":[{"message":"boom"},{"message":"bang"}]}"#;
        match decode_response::<ZonesData>("ZONES", body) {
            Err(GatewayError::GraphQl { operation, message }) => {
                assert_eq!(operation, "ZONES");
                assert_eq!(message, "boom; bang");
            }
            other => panic!("unexpected result: {:?}", other.map(|d| d.zones.len())),
        }

        let empty: GatewayResult<ZonesData> = decode_response("ZONES", r#"{"data":null}"#);
        assert!(matches!(empty, Err(GatewayError::MissingData("ZONES"))));
    }

    #[test]
    fn decode_unwraps_zone_ids() {
        let data: ZonesData = decode_response("ZONES", r#"{"data":{"zones":[{"id":1},{"id":4}]}}"#).unwrap();
        let ids: Vec<ZoneId> = data.zones.into_iter().map(|z| z.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }
}
