use serde::Deserialize;

use super::ids::ZoneId;

// GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<GraphQlErrorExtensions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorExtensions {
    pub code: Option<String>,
}

impl GraphQlError {
    /// Hasura reports an expired bearer token as `invalid-jwt`
    pub fn is_auth_expired(&self) -> bool {
        let code_expired = self
            .extensions
            .as_ref()
            .and_then(|ext| ext.code.as_deref())
            .is_some_and(|code| code == "invalid-jwt");
        code_expired || self.message.contains("JWTExpired")
    }
}

// Query payloads
#[derive(Debug, Deserialize)]
pub struct ZonesData {
    pub zones: Vec<ZoneRef>,
}

#[derive(Debug, Deserialize)]
pub struct ZoneRef {
    pub id: ZoneId,
}

#[derive(Debug, Deserialize)]
pub struct EventsData {
    pub events: Vec<crate::models::Opportunity>,
}

#[derive(Debug, Deserialize)]
pub struct StructuresData {
    pub structures: Vec<crate::models::Structure>,
}

#[derive(Debug, Deserialize)]
pub struct FleetsData {
    pub fleets: Vec<crate::models::Fleet>,
}

#[derive(Debug, Deserialize)]
pub struct StorageData {
    pub cargo: Vec<crate::models::CargoItem>,
}

/// Mutations are fire-and-check: only errors matter, the payload is ignored
#[derive(Debug, Deserialize)]
pub struct MutationAck {}
