use qdart_broadcast::RoomEvent;
use qdart_core::{Asset, Report, Team};
use serde::Serialize;
use serde_json::{json, Value};

pub const NEW_REPORT: &str = "new_report";
pub const REPORT_UPDATED: &str = "report_updated";
pub const RESOURCE_UPDATED: &str = "resource_updated";
pub const TEAM_NOTIFICATION: &str = "team_notification";
pub const ASSET_NOTIFICATION: &str = "asset_notification";

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

pub fn new_report(report: &Report) -> RoomEvent {
    RoomEvent::new(NEW_REPORT, to_value(report))
}

pub fn report_updated(report: &Report) -> RoomEvent {
    RoomEvent::new(REPORT_UPDATED, to_value(report))
}

pub fn team_resource(action: &str, team: &Team) -> RoomEvent {
    RoomEvent::new(
        RESOURCE_UPDATED,
        json!({
            "type": "team",
            "action": action,
            "data": to_value(team),
        }),
    )
}

pub fn asset_resource(action: &str, asset: &Asset) -> RoomEvent {
    RoomEvent::new(
        RESOURCE_UPDATED,
        json!({
            "type": "asset",
            "action": action,
            "data": to_value(asset),
        }),
    )
}

pub fn team_notification(team: &Team, message: &str, timestamp: &str) -> RoomEvent {
    RoomEvent::new(
        TEAM_NOTIFICATION,
        json!({
            "team_id": team.id,
            "team_name": team.name,
            "message": message,
            "timestamp": timestamp,
        }),
    )
}

pub fn asset_notification(asset: &Asset, message: &str, timestamp: &str) -> RoomEvent {
    RoomEvent::new(
        ASSET_NOTIFICATION,
        json!({
            "asset_id": asset.id,
            "asset_name": asset.name,
            "message": message,
            "timestamp": timestamp,
        }),
    )
}
