//! Machinery Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Machinery operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineryStatus {
    Operational,
    Maintenance,
    OutOfService,
}

impl MachineryStatus {
    /// The fixed set accepted by the backend and by import validation
    pub const ALL: [MachineryStatus; 3] = [
        MachineryStatus::Operational,
        MachineryStatus::Maintenance,
        MachineryStatus::OutOfService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MachineryStatus::Operational => "OPERATIONAL",
            MachineryStatus::Maintenance => "MAINTENANCE",
            MachineryStatus::OutOfService => "OUT_OF_SERVICE",
        }
    }
}

impl fmt::Display for MachineryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invalid enum value error
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid machinery status: {0}")]
pub struct InvalidMachineryStatus(pub String);

impl FromStr for MachineryStatus {
    type Err = InvalidMachineryStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OPERATIONAL" => Ok(MachineryStatus::Operational),
            "MAINTENANCE" => Ok(MachineryStatus::Maintenance),
            "OUT_OF_SERVICE" => Ok(MachineryStatus::OutOfService),
            _ => Err(InvalidMachineryStatus(s.to_string())),
        }
    }
}

/// Machinery entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machinery {
    pub id: i64,
    /// Unique across all machinery
    pub asset_tag: String,
    pub name: String,
    pub type_id: i64,
    pub location: Option<String>,
    pub status: MachineryStatus,
}

/// Machinery type entity (lightweight, auto-creatable during import)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineryType {
    pub id: i64,
    pub name: String,
}

/// Create machinery payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineryCreate {
    pub asset_tag: String,
    pub name: String,
    pub type_id: i64,
    pub location: Option<String>,
    pub status: Option<MachineryStatus>,
}

/// Update machinery payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MachineryUpdate {
    pub asset_tag: Option<String>,
    pub name: Option<String>,
    pub type_id: Option<i64>,
    pub location: Option<String>,
    pub status: Option<MachineryStatus>,
}

/// Create/rename machinery type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineryTypeCreate {
    pub name: String,
}

/// Maintenance history entry (`GET /machinery/{id}/history`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: i64,
    pub machinery_id: i64,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
    pub notes: Option<String>,
}

/// Start/end maintenance payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceNote {
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "OPERATIONAL".parse::<MachineryStatus>().unwrap(),
            MachineryStatus::Operational
        );
        assert_eq!(
            " out_of_service ".parse::<MachineryStatus>().unwrap(),
            MachineryStatus::OutOfService
        );
        assert!("BROKEN".parse::<MachineryStatus>().is_err());
        assert!("".parse::<MachineryStatus>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&MachineryStatus::OutOfService).unwrap();
        assert_eq!(json, "\"OUT_OF_SERVICE\"");
    }
}
