use async_trait::async_trait;
use qdart_core::{
    Asset, AssetId, AssetStatus, DamageLevel, EngineError, ErrorCode, Message, Report, ReportId,
    ReportStatus, Team, TeamId, TeamStatus,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone)]
pub struct StorageError {
    pub message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        EngineError::new(ErrorCode::Internal, err.message)
    }
}

/// Fields accepted when submitting a report. Identity and timestamp are
/// assigned by the store; omitted status/damage_level take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewReport {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "lat", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "lng", default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub damage_level: Option<DamageLevel>,
    #[serde(default)]
    pub image_ref: Option<String>,
}

/// Partial update for a report. `None` means "leave unchanged", so an absent
/// field is distinguishable from one set to a value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportPatch {
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub damage_level: Option<DamageLevel>,
}

impl ReportPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.damage_level.is_none()
    }
}

/// Teams are created Idle with no task; any other status arrives through a
/// validated deploy transition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub department: String,
    #[serde(default)]
    pub personnel_count: Option<u32>,
    #[serde(default)]
    pub base_latitude: Option<f64>,
    #[serde(default)]
    pub base_longitude: Option<f64>,
    #[serde(default)]
    pub coverage_radius_km: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAsset {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: Option<AssetStatus>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMessage {
    pub sender: String,
    pub target_room: String,
    pub content: String,
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create(&self, draft: NewReport) -> Result<Report, StorageError>;
    async fn get(&self, id: ReportId) -> Result<Option<Report>, StorageError>;
    /// Applies only the fields present in the patch. `Ok(None)` when the id
    /// is unknown; nothing is written in that case.
    async fn update(&self, id: ReportId, patch: ReportPatch)
        -> Result<Option<Report>, StorageError>;
    /// Full snapshot, newest-first by id.
    async fn list(&self) -> Result<Vec<Report>, StorageError>;
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn create(&self, draft: NewTeam) -> Result<Team, StorageError>;
    async fn get(&self, id: TeamId) -> Result<Option<Team>, StorageError>;
    /// Commits a validated transition: the status and the resolved
    /// `current_task` value are written together.
    async fn set_status(
        &self,
        id: TeamId,
        status: TeamStatus,
        task: Option<String>,
    ) -> Result<Option<Team>, StorageError>;
    /// Deletes the team and clears `team_id` on every asset that referenced
    /// it, in one atomic sweep. Returns the deleted record.
    async fn delete(&self, id: TeamId) -> Result<Option<Team>, StorageError>;
    async fn list(&self) -> Result<Vec<Team>, StorageError>;
}

#[async_trait]
pub trait AssetRepository: Send + Sync {
    async fn create(&self, draft: NewAsset) -> Result<Asset, StorageError>;
    async fn get(&self, id: AssetId) -> Result<Option<Asset>, StorageError>;
    /// Commits a validated transition; `location` is applied only when
    /// present, atomically with the status change.
    async fn set_status(
        &self,
        id: AssetId,
        status: AssetStatus,
        location: Option<String>,
    ) -> Result<Option<Asset>, StorageError>;
    async fn delete(&self, id: AssetId) -> Result<Option<Asset>, StorageError>;
    async fn list(&self) -> Result<Vec<Asset>, StorageError>;
    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<Asset>, StorageError>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn record(&self, draft: NewMessage) -> Result<Message, StorageError>;
    async fn list_room(&self, room: &str) -> Result<Vec<Message>, StorageError>;
}
