// Identifier aliases shared across the models
use serde::{Deserialize, Deserializer, Serializer};

pub type ZoneId = i64;
pub type FleetId = String;
pub type ShipId = String;
pub type EventId = String;
pub type StructureId = String;

/// Event and structure ids come back as numbers from some queries and as
/// strings from others; both are normalised to a string.
pub fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Sends numeric-looking ids back as JSON numbers so integer columns accept them
pub fn serialize_flexible_id<S>(id: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id.parse::<i64>() {
        Ok(n) => serializer.serialize_i64(n),
        Err(_) => serializer.serialize_str(id),
    }
}
