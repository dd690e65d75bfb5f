//! Treatment-outcome classification.
//!
//! Derives a small feature set from a patient's latest record and hands it
//! to an [`OutcomeModel`]. The only model shipped today is a constant stub;
//! a trained model slots in behind the same trait.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;

use crate::models::PatientRecord;

/// Features handed to the outcome model.
#[derive(Debug, Clone, Serialize)]
pub struct PatientFeatures {
    /// Age in years, computed from date of birth at prediction time.
    pub age: f64,
    pub treatment_cycle: i64,
    pub tumor_stage: String,
    pub biomarkers: Option<String>,
}

/// Probability distribution over outcome labels plus an overall confidence.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub patient_id: String,
    pub classifications: BTreeMap<String, f64>,
    pub confidence: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Prediction failed: {0}")]
    Prediction(String),
}

/// An opaque outcome predictor: features in, label distribution out.
pub trait OutcomeModel: Send + Sync {
    fn predict(&self, features: &PatientFeatures) -> Result<BTreeMap<String, f64>, ClassifyError>;
}

/// Placeholder model returning a fixed distribution until a trained model
/// replaces it.
#[derive(Debug, Default)]
pub struct ConstantModel;

impl OutcomeModel for ConstantModel {
    fn predict(
        &self,
        _features: &PatientFeatures,
    ) -> Result<BTreeMap<String, f64>, ClassifyError> {
        Ok(BTreeMap::from([
            ("complete_remission".to_string(), 0.6),
            ("partial_remission".to_string(), 0.3),
            ("stable_disease".to_string(), 0.1),
            ("progressive_disease".to_string(), 0.0),
        ]))
    }
}

/// Derive model features from a patient record.
pub fn derive_features(record: &PatientRecord) -> PatientFeatures {
    let days = (Utc::now().date_naive() - record.date_of_birth).num_days();
    PatientFeatures {
        age: days as f64 / 365.0,
        treatment_cycle: record.treatment_cycle,
        tumor_stage: record.tumor_stage.clone(),
        biomarkers: record.biomarkers.clone(),
    }
}

/// Classify a patient's latest record. Confidence is the maximum
/// probability in the returned distribution.
pub fn classify_record(
    model: &dyn OutcomeModel,
    record: &PatientRecord,
) -> Result<Classification, ClassifyError> {
    let features = derive_features(record);
    let classifications = model.predict(&features)?;

    let confidence = classifications
        .values()
        .copied()
        .fold(0.0_f64, f64::max);

    Ok(Classification {
        patient_id: record.patient_id.clone(),
        classifications,
        confidence,
    })
}
