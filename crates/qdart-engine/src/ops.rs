use metrics::counter;
use qdart_broadcast::{asset_room, team_room, Broadcaster, REPORT_ROOM};
use qdart_core::{
    Asset, AssetId, EngineError, EngineResult, ErrorCode, Message, Report, ReportId, Team, TeamId,
};
use qdart_storage::{
    AssetRepository, MessageRepository, NewAsset, NewMessage, NewReport, NewTeam, ReportPatch,
    ReportRepository, TeamRepository,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::collaborators::{
    coordinate_label, Classification, Classifier, CoordinateGeocoder, Geocoder,
    UnloadedClassifier,
};
use crate::events;
use crate::transitions::{parse_asset_status, parse_team_status, resolve_task};
use crate::visibility::{filter_reports, Scope};

const DEFAULT_GEOCODE_TIMEOUT: Duration = Duration::from_millis(800);
const COMMAND_SENDER: &str = "Command";

/// The Entity Store as one seam: every repository the engine commits through.
pub trait CoordinationStore:
    ReportRepository + TeamRepository + AssetRepository + MessageRepository
{
}

impl<T> CoordinationStore for T where
    T: ReportRepository + TeamRepository + AssetRepository + MessageRepository
{
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceSnapshot {
    pub assets: Vec<Asset>,
    pub teams: Vec<Team>,
}

/// The coordination engine. Every write runs validate → commit → publish, in
/// that order; an event is only ever published after its transaction has
/// committed, and never when it failed.
#[derive(Clone)]
pub struct Engine {
    store: Arc<dyn CoordinationStore>,
    broadcaster: Arc<Broadcaster>,
    classifier: Arc<dyn Classifier>,
    geocoder: Arc<dyn Geocoder>,
    geocode_timeout: Duration,
}

impl Engine {
    pub fn new(store: Arc<dyn CoordinationStore>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            store,
            broadcaster,
            classifier: Arc::new(UnloadedClassifier),
            geocoder: Arc::new(CoordinateGeocoder),
            geocode_timeout: DEFAULT_GEOCODE_TIMEOUT,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = geocoder;
        self
    }

    pub fn with_geocode_timeout(mut self, timeout: Duration) -> Self {
        self.geocode_timeout = timeout;
        self
    }

    fn store(&self) -> &dyn CoordinationStore {
        self.store.as_ref()
    }

    pub async fn list_reports(&self, scope: Option<TeamId>) -> EngineResult<Vec<Report>> {
        let reports = ReportRepository::list(self.store()).await?;
        let Some(team_id) = scope else {
            return Ok(reports);
        };
        match TeamRepository::get(self.store(), team_id).await? {
            Some(team) => Ok(filter_reports(reports, Scope::Team(&team))),
            None => {
                warn!(%team_id, "scope team not found, serving unscoped view");
                Ok(reports)
            }
        }
    }

    pub async fn create_report(&self, mut draft: NewReport) -> EngineResult<Report> {
        if draft.title.trim().is_empty() {
            return Err(EngineError::new(
                ErrorCode::InvalidInput,
                "report title is required",
            ));
        }
        if draft.latitude.is_some() != draft.longitude.is_some() {
            return Err(EngineError::new(
                ErrorCode::InvalidInput,
                "latitude and longitude must both be present or both absent",
            ));
        }
        let no_location = draft
            .location
            .as_deref()
            .map(|value| value.trim().is_empty())
            .unwrap_or(true);
        if no_location {
            if let (Some(lat), Some(lng)) = (draft.latitude, draft.longitude) {
                draft.location = Some(self.resolve_location(lat, lng).await);
            }
        }

        let report = ReportRepository::create(self.store(), draft).await?;
        counter!("qdart_reports_created_total").increment(1);
        self.broadcaster
            .publish(REPORT_ROOM, events::new_report(&report));
        info!(report_id = %report.id, status = ?report.status, "report created");
        Ok(report)
    }

    pub async fn update_report(&self, id: ReportId, patch: ReportPatch) -> EngineResult<Report> {
        let report = ReportRepository::update(self.store(), id, patch)
            .await?
            .ok_or_else(|| not_found("report", id.as_u64()))?;
        self.broadcaster
            .publish(REPORT_ROOM, events::report_updated(&report));
        Ok(report)
    }

    /// Delegates to the classification collaborator; the result is attached
    /// to a report by the submitting client, never by this call.
    pub fn analyze_image(&self, image: &[u8]) -> EngineResult<Classification> {
        self.classifier.classify(image)
    }

    pub async fn list_resources(&self) -> EngineResult<ResourceSnapshot> {
        let assets = AssetRepository::list(self.store()).await?;
        let teams = TeamRepository::list(self.store()).await?;
        Ok(ResourceSnapshot { assets, teams })
    }

    pub async fn create_team(&self, draft: NewTeam) -> EngineResult<Team> {
        if draft.name.trim().is_empty() || draft.department.trim().is_empty() {
            return Err(EngineError::new(
                ErrorCode::InvalidInput,
                "team name and department are required",
            ));
        }
        if draft.base_latitude.is_some() != draft.base_longitude.is_some() {
            return Err(EngineError::new(
                ErrorCode::InvalidInput,
                "base latitude and longitude must both be present or both absent",
            ));
        }
        if let Some(radius) = draft.coverage_radius_km {
            // NaN fails this comparison too.
            if !(radius >= 0.0) {
                return Err(EngineError::new(
                    ErrorCode::InvalidInput,
                    "coverage radius must be non-negative",
                ));
            }
        }

        let team = TeamRepository::create(self.store(), draft).await?;
        self.publish_command(events::team_resource("created", &team));
        info!(team_id = %team.id, department = %team.department, "team created");
        Ok(team)
    }

    pub async fn delete_team(&self, id: TeamId) -> EngineResult<Team> {
        let owned = AssetRepository::list_by_team(self.store(), id).await?;
        let team = TeamRepository::delete(self.store(), id)
            .await?
            .ok_or_else(|| not_found("team", id.as_u64()))?;
        self.publish_command(events::team_resource("deleted", &team));
        info!(team_id = %id, unassigned_assets = owned.len(), "team deleted");
        Ok(team)
    }

    pub async fn create_asset(&self, draft: NewAsset) -> EngineResult<Asset> {
        if draft.name.trim().is_empty() || draft.kind.trim().is_empty() {
            return Err(EngineError::new(
                ErrorCode::InvalidInput,
                "asset name and type are required",
            ));
        }
        if let Some(team_id) = draft.team_id {
            if TeamRepository::get(self.store(), team_id).await?.is_none() {
                return Err(EngineError::new(
                    ErrorCode::InvalidInput,
                    format!("referenced team {team_id} does not exist"),
                ));
            }
        }

        let asset = AssetRepository::create(self.store(), draft).await?;
        self.publish_command(events::asset_resource("created", &asset));
        Ok(asset)
    }

    pub async fn delete_asset(&self, id: AssetId) -> EngineResult<Asset> {
        let asset = AssetRepository::delete(self.store(), id)
            .await?
            .ok_or_else(|| not_found("asset", id.as_u64()))?;
        self.publish_command(events::asset_resource("deleted", &asset));
        Ok(asset)
    }

    pub async fn deploy_team(
        &self,
        id: TeamId,
        target_status: &str,
        task: Option<String>,
    ) -> EngineResult<Team> {
        let status = parse_team_status(target_status)?;
        let task = resolve_task(status, task)?;
        let team = TeamRepository::set_status(self.store(), id, status, task)
            .await?
            .ok_or_else(|| not_found("team", id.as_u64()))?;
        counter!("qdart_deployments_total").increment(1);
        self.publish_command(events::team_resource("updated", &team));
        info!(team_id = %id, status = ?team.status, task = ?team.current_task, "team transitioned");
        Ok(team)
    }

    pub async fn deploy_asset(
        &self,
        id: AssetId,
        target_status: &str,
        location: Option<String>,
    ) -> EngineResult<Asset> {
        let status = parse_asset_status(target_status)?;
        let location = location.filter(|value| !value.trim().is_empty());
        let asset = AssetRepository::set_status(self.store(), id, status, location)
            .await?
            .ok_or_else(|| not_found("asset", id.as_u64()))?;
        counter!("qdart_deployments_total").increment(1);
        self.publish_command(events::asset_resource("updated", &asset));
        Ok(asset)
    }

    pub async fn notify_team(&self, id: TeamId, message: &str) -> EngineResult<Message> {
        let team = TeamRepository::get(self.store(), id)
            .await?
            .ok_or_else(|| not_found("team", id.as_u64()))?;
        let room = team_room(id);
        let record = MessageRepository::record(
            self.store(),
            NewMessage {
                sender: COMMAND_SENDER.to_string(),
                target_room: room.clone(),
                content: message.to_string(),
            },
        )
        .await?;
        self.broadcaster.publish(
            &room,
            events::team_notification(&team, message, &record.timestamp),
        );
        Ok(record)
    }

    pub async fn notify_asset(&self, id: AssetId, message: &str) -> EngineResult<Message> {
        let asset = AssetRepository::get(self.store(), id)
            .await?
            .ok_or_else(|| not_found("asset", id.as_u64()))?;
        let room = asset_room(id);
        let record = MessageRepository::record(
            self.store(),
            NewMessage {
                sender: COMMAND_SENDER.to_string(),
                target_room: room.clone(),
                content: message.to_string(),
            },
        )
        .await?;
        self.broadcaster.publish(
            &room,
            events::asset_notification(&asset, message, &record.timestamp),
        );
        Ok(record)
    }

    /// Records the chat message, then hands it to the broadcaster, which
    /// mirrors non-command traffic into the command room.
    pub async fn send_message(
        &self,
        sender: &str,
        target_room: &str,
        content: &str,
    ) -> EngineResult<Message> {
        let record = MessageRepository::record(
            self.store(),
            NewMessage {
                sender: sender.to_string(),
                target_room: target_room.to_string(),
                content: content.to_string(),
            },
        )
        .await?;
        self.broadcaster
            .send_message(sender, target_room, content, &record.timestamp);
        Ok(record)
    }

    fn publish_command(&self, event: qdart_broadcast::RoomEvent) {
        self.broadcaster
            .publish(self.broadcaster.command_room(), event);
    }

    async fn resolve_location(&self, latitude: f64, longitude: f64) -> String {
        match timeout(self.geocode_timeout, self.geocoder.reverse(latitude, longitude)).await {
            Ok(Ok(place)) if !place.trim().is_empty() => place,
            Ok(Ok(_)) | Ok(Err(_)) => {
                warn!(latitude, longitude, "geocoder failed, using coordinate label");
                coordinate_label(latitude, longitude)
            }
            Err(_) => {
                warn!(latitude, longitude, "geocoder timed out, using coordinate label");
                coordinate_label(latitude, longitude)
            }
        }
    }
}

fn not_found(entity: &str, id: u64) -> EngineError {
    EngineError::new(ErrorCode::NotFound, format!("{entity} {id} not found"))
}
