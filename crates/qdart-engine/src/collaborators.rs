use async_trait::async_trait;
use qdart_core::{DamageLevel, EngineError, EngineResult, ErrorCode};
use serde::Serialize;

/// Output of the external image-classification model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub disaster_type: String,
    pub confidence_percent: f64,
    pub damage_level: DamageLevel,
}

/// Process-scoped handle to the classification model, initialized once at
/// startup and shared read-only across requests.
pub trait Classifier: Send + Sync {
    fn classify(&self, image: &[u8]) -> EngineResult<Classification>;
}

/// Stands in when no model has been loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnloadedClassifier;

impl Classifier for UnloadedClassifier {
    fn classify(&self, _image: &[u8]) -> EngineResult<Classification> {
        Err(EngineError::new(
            ErrorCode::Unavailable,
            "classification model is not loaded",
        ))
    }
}

/// Reverse-geocoding collaborator. Callers bound it with a timeout; a failure
/// or timeout never aborts the enclosing operation.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse(&self, latitude: f64, longitude: f64) -> EngineResult<String>;
}

/// The documented fallback location string for a coordinate pair.
pub fn coordinate_label(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4}, {longitude:.4}")
}

/// Geocoder of last resort: always answers with the raw coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateGeocoder;

#[async_trait]
impl Geocoder for CoordinateGeocoder {
    async fn reverse(&self, latitude: f64, longitude: f64) -> EngineResult<String> {
        Ok(coordinate_label(latitude, longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unloaded_classifier_reports_unavailable() {
        let err = UnloadedClassifier.classify(&[0u8; 4]).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unavailable);
    }

    #[test]
    fn coordinate_label_rounds_to_four_places() {
        assert_eq!(coordinate_label(14.75462, 120.94659), "14.7546, 120.9466");
    }

    #[test]
    fn classification_serializes_camel_case() {
        let classification = Classification {
            disaster_type: "Flood".to_string(),
            confidence_percent: 97.3,
            damage_level: DamageLevel::Major,
        };
        let value = serde_json::to_value(&classification).unwrap();
        assert_eq!(value["disasterType"], "Flood");
        assert_eq!(value["confidencePercent"], 97.3);
        assert_eq!(value["damageLevel"], "Major");
    }
}
