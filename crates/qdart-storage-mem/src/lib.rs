use async_trait::async_trait;
use qdart_core::{
    message_timestamp, now_epoch_millis, report_timestamp, Asset, AssetId, AssetStatus, Message,
    MessageId, Report, ReportId, Team, TeamId, TeamStatus,
};
use qdart_storage::{
    AssetRepository, MessageRepository, NewAsset, NewMessage, NewReport, NewTeam, ReportPatch,
    ReportRepository, StorageError, TeamRepository,
};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

const DEFAULT_COVERAGE_RADIUS_KM: f64 = 5.0;

/// In-process Entity Store. Every write takes the table lock for its whole
/// mutation, so each operation is atomic per entity and concurrent writers to
/// the same record resolve last-writer-wins. Reads clone snapshots and never
/// block behind each other.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    reports: BTreeMap<u64, Report>,
    teams: BTreeMap<u64, Team>,
    assets: BTreeMap<u64, Asset>,
    messages: Vec<Message>,
    report_seq: u64,
    team_seq: u64,
    asset_seq: u64,
    message_seq: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn create(&self, draft: NewReport) -> Result<Report, StorageError> {
        let mut tables = self.inner.write().await;
        tables.report_seq += 1;
        let report = Report {
            id: ReportId::from_u64(tables.report_seq),
            title: draft.title,
            description: draft.description,
            status: draft.status.unwrap_or_default(),
            timestamp: report_timestamp(now_epoch_millis()),
            location: draft.location,
            latitude: draft.latitude,
            longitude: draft.longitude,
            damage_level: draft.damage_level.unwrap_or_default(),
            image_ref: draft.image_ref,
        };
        tables.reports.insert(report.id.as_u64(), report.clone());
        Ok(report)
    }

    async fn get(&self, id: ReportId) -> Result<Option<Report>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables.reports.get(&id.as_u64()).cloned())
    }

    async fn update(
        &self,
        id: ReportId,
        patch: ReportPatch,
    ) -> Result<Option<Report>, StorageError> {
        let mut tables = self.inner.write().await;
        let Some(report) = tables.reports.get_mut(&id.as_u64()) else {
            return Ok(None);
        };
        if let Some(status) = patch.status {
            report.status = status;
        }
        if let Some(damage_level) = patch.damage_level {
            report.damage_level = damage_level;
        }
        Ok(Some(report.clone()))
    }

    async fn list(&self) -> Result<Vec<Report>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables.reports.values().rev().cloned().collect())
    }
}

#[async_trait]
impl TeamRepository for MemoryStore {
    async fn create(&self, draft: NewTeam) -> Result<Team, StorageError> {
        let mut tables = self.inner.write().await;
        tables.team_seq += 1;
        let team = Team {
            id: TeamId::from_u64(tables.team_seq),
            name: draft.name,
            department: draft.department,
            status: TeamStatus::default(),
            personnel_count: draft.personnel_count.unwrap_or(0),
            current_task: None,
            base_latitude: draft.base_latitude,
            base_longitude: draft.base_longitude,
            coverage_radius_km: draft
                .coverage_radius_km
                .unwrap_or(DEFAULT_COVERAGE_RADIUS_KM),
        };
        tables.teams.insert(team.id.as_u64(), team.clone());
        Ok(team)
    }

    async fn get(&self, id: TeamId) -> Result<Option<Team>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables.teams.get(&id.as_u64()).cloned())
    }

    async fn set_status(
        &self,
        id: TeamId,
        status: TeamStatus,
        task: Option<String>,
    ) -> Result<Option<Team>, StorageError> {
        let mut tables = self.inner.write().await;
        let Some(team) = tables.teams.get_mut(&id.as_u64()) else {
            return Ok(None);
        };
        team.status = status;
        team.current_task = task;
        Ok(Some(team.clone()))
    }

    async fn delete(&self, id: TeamId) -> Result<Option<Team>, StorageError> {
        let mut tables = self.inner.write().await;
        let Some(team) = tables.teams.remove(&id.as_u64()) else {
            return Ok(None);
        };
        // Same guard as the removal: no reader can observe an asset pointing
        // at the deleted team.
        let mut cleared = 0usize;
        for asset in tables.assets.values_mut() {
            if asset.team_id == Some(id) {
                asset.team_id = None;
                cleared += 1;
            }
        }
        debug!(team_id = %id, cleared, "team deleted, asset references cleared");
        Ok(Some(team))
    }

    async fn list(&self) -> Result<Vec<Team>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables.teams.values().cloned().collect())
    }
}

#[async_trait]
impl AssetRepository for MemoryStore {
    async fn create(&self, draft: NewAsset) -> Result<Asset, StorageError> {
        let mut tables = self.inner.write().await;
        tables.asset_seq += 1;
        let asset = Asset {
            id: AssetId::from_u64(tables.asset_seq),
            name: draft.name,
            kind: draft.kind,
            status: draft.status.unwrap_or_default(),
            location: draft.location,
            team_id: draft.team_id,
        };
        tables.assets.insert(asset.id.as_u64(), asset.clone());
        Ok(asset)
    }

    async fn get(&self, id: AssetId) -> Result<Option<Asset>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables.assets.get(&id.as_u64()).cloned())
    }

    async fn set_status(
        &self,
        id: AssetId,
        status: AssetStatus,
        location: Option<String>,
    ) -> Result<Option<Asset>, StorageError> {
        let mut tables = self.inner.write().await;
        let Some(asset) = tables.assets.get_mut(&id.as_u64()) else {
            return Ok(None);
        };
        asset.status = status;
        if let Some(location) = location {
            asset.location = Some(location);
        }
        Ok(Some(asset.clone()))
    }

    async fn delete(&self, id: AssetId) -> Result<Option<Asset>, StorageError> {
        let mut tables = self.inner.write().await;
        Ok(tables.assets.remove(&id.as_u64()))
    }

    async fn list(&self) -> Result<Vec<Asset>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables.assets.values().cloned().collect())
    }

    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<Asset>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables
            .assets
            .values()
            .filter(|asset| asset.team_id == Some(team_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn record(&self, draft: NewMessage) -> Result<Message, StorageError> {
        let mut tables = self.inner.write().await;
        tables.message_seq += 1;
        let message = Message {
            id: MessageId::from_u64(tables.message_seq),
            sender: draft.sender,
            target_room: draft.target_room,
            content: draft.content,
            timestamp: message_timestamp(now_epoch_millis()),
        };
        tables.messages.push(message.clone());
        Ok(message)
    }

    async fn list_room(&self, room: &str) -> Result<Vec<Message>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables
            .messages
            .iter()
            .filter(|message| message.target_room == room)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdart_core::{DamageLevel, ReportStatus};

    fn report_draft(title: &str) -> NewReport {
        NewReport {
            title: title.to_string(),
            latitude: Some(14.7546),
            longitude: Some(120.9466),
            ..NewReport::default()
        }
    }

    #[tokio::test]
    async fn create_then_read_round_trips() {
        let store = MemoryStore::new();
        let created = ReportRepository::create(&store, report_draft("Flood at X"))
            .await
            .unwrap();
        assert_eq!(created.id.as_u64(), 1);
        assert_eq!(created.status, ReportStatus::Active);
        assert_eq!(created.damage_level, DamageLevel::Pending);

        let listed = ReportRepository::list(&store).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Flood at X");
        assert_eq!(listed[0].position(), Some((14.7546, 120.9466)));
        assert!(!listed[0].timestamp.is_empty());
    }

    #[tokio::test]
    async fn report_ids_are_monotonic_and_list_is_newest_first() {
        let store = MemoryStore::new();
        for index in 0..3 {
            ReportRepository::create(&store, report_draft(&format!("r{index}")))
                .await
                .unwrap();
        }
        let listed = ReportRepository::list(&store).await.unwrap();
        let ids: Vec<u64> = listed.iter().map(|r| r.id.as_u64()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn patch_touches_only_present_fields() {
        let store = MemoryStore::new();
        let created = ReportRepository::create(&store, report_draft("r"))
            .await
            .unwrap();
        let updated = ReportRepository::update(
            &store,
            created.id,
            ReportPatch {
                status: Some(ReportStatus::Critical),
                damage_level: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.status, ReportStatus::Critical);
        assert_eq!(updated.damage_level, created.damage_level);
        assert_eq!(updated.timestamp, created.timestamp);
    }

    #[tokio::test]
    async fn update_of_unknown_report_writes_nothing() {
        let store = MemoryStore::new();
        let missing = ReportRepository::update(
            &store,
            ReportId::from_u64(42),
            ReportPatch {
                status: Some(ReportStatus::Cleared),
                damage_level: None,
            },
        )
        .await
        .unwrap();
        assert!(missing.is_none());
        assert!(ReportRepository::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn team_delete_clears_asset_references() {
        let store = MemoryStore::new();
        let team = TeamRepository::create(
            &store,
            NewTeam {
                name: "Station 1 (Alpha)".to_string(),
                department: "BFP".to_string(),
                ..NewTeam::default()
            },
        )
        .await
        .unwrap();
        let asset = AssetRepository::create(
            &store,
            NewAsset {
                name: "Fire Truck 01".to_string(),
                kind: "Vehicle".to_string(),
                team_id: Some(team.id),
                ..NewAsset::default()
            },
        )
        .await
        .unwrap();

        let deleted = TeamRepository::delete(&store, team.id).await.unwrap();
        assert!(deleted.is_some());

        let survivor = AssetRepository::get(&store, asset.id).await.unwrap().unwrap();
        assert_eq!(survivor.team_id, None);
        assert_eq!(survivor.name, "Fire Truck 01");
    }

    #[tokio::test]
    async fn asset_location_applies_with_status_only_when_present() {
        let store = MemoryStore::new();
        let asset = AssetRepository::create(
            &store,
            NewAsset {
                name: "Ambulance A".to_string(),
                kind: "Vehicle".to_string(),
                location: Some("Base Camp".to_string()),
                ..NewAsset::default()
            },
        )
        .await
        .unwrap();

        let moved = AssetRepository::set_status(
            &store,
            asset.id,
            AssetStatus::Deployed,
            Some("Sector 7".to_string()),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(moved.location.as_deref(), Some("Sector 7"));

        let back = AssetRepository::set_status(&store, asset.id, AssetStatus::Available, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(back.location.as_deref(), Some("Sector 7"));
    }

    #[tokio::test]
    async fn messages_filter_by_room() {
        let store = MemoryStore::new();
        for room in ["team_1", "command", "team_1"] {
            MessageRepository::record(
                &store,
                NewMessage {
                    sender: "Admin".to_string(),
                    target_room: room.to_string(),
                    content: "ping".to_string(),
                },
            )
            .await
            .unwrap();
        }
        let team_messages = MessageRepository::list_room(&store, "team_1").await.unwrap();
        assert_eq!(team_messages.len(), 2);
    }
}
