pub mod collaborators;
pub mod events;
pub mod ops;
pub mod transitions;
pub mod visibility;

pub use collaborators::{
    coordinate_label, Classification, Classifier, CoordinateGeocoder, Geocoder,
    UnloadedClassifier,
};
pub use ops::{CoordinationStore, Engine, ResourceSnapshot};
pub use transitions::{parse_asset_status, parse_team_status, resolve_task};
pub use visibility::{coverage_of, filter_reports, Scope};
