use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ResourceType {
    #[serde(rename = "Imperium")]
    Imperium,
    #[serde(rename = "Imperium Ore")]
    ImperiumOre,
    #[serde(rename = "Xeto")]
    Xeto,
    #[serde(rename = "Xeto Ore")]
    XetoOre,
    #[serde(rename = "Iron")]
    Iron,
    #[serde(rename = "Iron Ore")]
    IronOre,
    #[serde(other)]
    Unknown,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Imperium => "Imperium",
            ResourceType::ImperiumOre => "Imperium Ore",
            ResourceType::Xeto => "Xeto",
            ResourceType::XetoOre => "Xeto Ore",
            ResourceType::Iron => "Iron",
            ResourceType::IronOre => "Iron Ore",
            ResourceType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(resource_type, amount)` pair, used for both ship cargo and the depot
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CargoItem {
    pub resource_type: ResourceType,
    pub amount: i64,
}
