pub mod domain;
pub mod error;
pub mod ids;
pub mod time;

pub use domain::{
    Asset, AssetStatus, DamageLevel, Message, Report, ReportStatus, Team, TeamStatus,
};
pub use error::{EngineError, EngineResult, ErrorCode};
pub use ids::{AssetId, MessageId, ReportId, TeamId};
pub use time::{
    message_timestamp, now_epoch_millis, report_timestamp, EpochMillis,
};
