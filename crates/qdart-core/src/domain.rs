use crate::ids::{AssetId, MessageId, ReportId, TeamId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Active,
    Critical,
    Cleared,
}

impl Default for ReportStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl FromStr for ReportStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "critical" => Ok(Self::Critical),
            "cleared" => Ok(Self::Cleared),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageLevel {
    Pending,
    #[serde(rename = "No Damage")]
    NoDamage,
    Minor,
    Major,
    Destroyed,
}

impl Default for DamageLevel {
    fn default() -> Self {
        Self::Pending
    }
}

impl FromStr for DamageLevel {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "no damage" | "no_damage" => Ok(Self::NoDamage),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            "destroyed" => Ok(Self::Destroyed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamStatus {
    Idle,
    Deployed,
    Resting,
}

impl Default for TeamStatus {
    fn default() -> Self {
        Self::Idle
    }
}

impl FromStr for TeamStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "idle" => Ok(Self::Idle),
            "deployed" => Ok(Self::Deployed),
            "resting" => Ok(Self::Resting),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    Available,
    Deployed,
    Maintenance,
}

impl Default for AssetStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl FromStr for AssetStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "deployed" => Ok(Self::Deployed),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(()),
        }
    }
}

/// A field incident report. Append/update-only: once created, only `status`
/// and `damage_level` ever change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ReportStatus,
    pub timestamp: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "lat", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "lng", default)]
    pub longitude: Option<f64>,
    pub damage_level: DamageLevel,
    #[serde(default)]
    pub image_ref: Option<String>,
}

impl Report {
    /// Both-or-neither by construction; callers treat a half-set pair as no
    /// position.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub department: String,
    pub status: TeamStatus,
    #[serde(default)]
    pub personnel_count: u32,
    #[serde(default)]
    pub current_task: Option<String>,
    #[serde(default)]
    pub base_latitude: Option<f64>,
    #[serde(default)]
    pub base_longitude: Option<f64>,
    pub coverage_radius_km: f64,
}

impl Team {
    pub fn base_position(&self) -> Option<(f64, f64)> {
        match (self.base_latitude, self.base_longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: AssetStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: String,
    pub target_room: String,
    #[serde(rename = "message")]
    pub content: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_strings_match_dashboards() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::Critical).unwrap(),
            "\"Critical\""
        );
        assert_eq!(
            serde_json::to_string(&DamageLevel::NoDamage).unwrap(),
            "\"No Damage\""
        );
        assert_eq!(
            serde_json::to_string(&TeamStatus::Resting).unwrap(),
            "\"Resting\""
        );
        assert_eq!(
            serde_json::to_string(&AssetStatus::Maintenance).unwrap(),
            "\"Maintenance\""
        );
    }

    #[test]
    fn statuses_parse_case_insensitively() {
        assert_eq!("deployed".parse::<TeamStatus>(), Ok(TeamStatus::Deployed));
        assert_eq!("MAINTENANCE".parse::<AssetStatus>(), Ok(AssetStatus::Maintenance));
        assert_eq!("No Damage".parse::<DamageLevel>(), Ok(DamageLevel::NoDamage));
        assert!("bogus".parse::<TeamStatus>().is_err());
    }

    #[test]
    fn report_position_requires_both_coordinates() {
        let mut report = Report {
            id: ReportId::from_u64(1),
            title: "Flood at Dampalit".to_string(),
            description: None,
            status: ReportStatus::default(),
            timestamp: "2026-08-23 00:00:00".to_string(),
            location: None,
            latitude: Some(14.6944),
            longitude: None,
            damage_level: DamageLevel::default(),
            image_ref: None,
        };
        assert_eq!(report.position(), None);
        report.longitude = Some(120.9324);
        assert_eq!(report.position(), Some((14.6944, 120.9324)));
    }

    #[test]
    fn report_serializes_lat_lng_keys() {
        let report = Report {
            id: ReportId::from_u64(7),
            title: "t".to_string(),
            description: None,
            status: ReportStatus::Active,
            timestamp: "2026-08-23 00:00:00".to_string(),
            location: Some("Sector 7".to_string()),
            latitude: Some(14.7),
            longitude: Some(120.9),
            damage_level: DamageLevel::Pending,
            image_ref: None,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["lat"], 14.7);
        assert_eq!(value["lng"], 120.9);
        assert_eq!(value["id"], 7);
    }
}
