use ndarray::Array1;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::ClassifierConfig;
use crate::errors::ScoringError;
use crate::models::CreateVitalReading;

/// Maps a raw vitals sample into the fixed-order numeric vector the
/// classifier expects. Defaults for unmeasured channels come from
/// configuration; nothing is invented per call, so the same sample and
/// feature list always produce the same vector.
#[derive(Debug, Clone)]
pub struct FeatureVectorService {
    defaults: BTreeMap<String, f64>,
    fallback_features: Vec<String>,
}

impl FeatureVectorService {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            defaults: config.feature_defaults.clone(),
            fallback_features: config.fallback_features.clone(),
        }
    }

    /// Build a vector of exactly `declared.len()` values in declared order.
    /// An empty declared list means the artifact did not self-describe its
    /// schema; the configured fallback list is used instead.
    pub fn build(
        &self,
        sample: &CreateVitalReading,
        declared: &[String],
    ) -> Result<Array1<f64>, ScoringError> {
        let features: &[String] = if declared.is_empty() {
            &self.fallback_features
        } else {
            declared
        };

        let mut values = Vec::with_capacity(features.len());
        for feature in features {
            let value = match sample.channel(feature) {
                Some(raw) => coerce_numeric(feature, &raw)?,
                None => self.defaults.get(feature).copied().ok_or_else(|| {
                    ScoringError::MissingFeature {
                        feature: feature.clone(),
                    }
                })?,
            };
            values.push(value);
        }

        Ok(Array1::from_vec(values))
    }
}

/// Accepts JSON numbers and numeric strings, mirroring what the strap
/// firmware actually sends. Anything else rejects the whole build.
fn coerce_numeric(feature: &str, raw: &Value) -> Result<f64, ScoringError> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| ScoringError::FeatureValue {
        feature: feature.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn service() -> FeatureVectorService {
        FeatureVectorService::new(&ClassifierConfig::default())
    }

    fn bare_sample(heart_rate: i32) -> CreateVitalReading {
        CreateVitalReading {
            athlete_id: Uuid::new_v4(),
            heart_rate,
            hrv: None,
            rmssd: None,
            body_temperature: None,
            spo2: None,
            channels: HashMap::new(),
        }
    }

    fn schema() -> Vec<String> {
        ClassifierConfig::default_fallback_features()
    }

    #[test]
    fn vector_matches_declared_length_and_order() {
        let sample = bare_sample(140);

        let vector = service().build(&sample, &schema()).unwrap();

        assert_eq!(vector.len(), 4);
        assert_eq!(vector[0], 140.0);
    }

    #[test]
    fn omitted_channels_take_configured_defaults() {
        let sample = bare_sample(72);

        let vector = service().build(&sample, &schema()).unwrap();

        assert_eq!(vector[1], 37.0); // Body_Temperature
        assert_eq!(vector[2], 98.0); // Blood_Oxygen
        assert_eq!(vector[3], 1.0); // bias term
    }

    #[test]
    fn supplied_channels_override_defaults() {
        let mut sample = bare_sample(72);
        sample.body_temperature = Some(38.4);
        sample.spo2 = Some(91);

        let vector = service().build(&sample, &schema()).unwrap();

        assert_eq!(vector[1], 38.4);
        assert_eq!(vector[2], 91.0);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let mut sample = bare_sample(72);
        sample
            .channels
            .insert("Skin_Conductance".to_string(), json!(" 0.42 "));

        let declared = vec!["Skin_Conductance".to_string()];
        let vector = service().build(&sample, &declared).unwrap();

        assert_eq!(vector[0], 0.42);
    }

    #[test]
    fn non_numeric_value_names_the_offending_feature() {
        let mut sample = bare_sample(72);
        sample
            .channels
            .insert("Skin_Conductance".to_string(), json!("high"));

        let declared = vec![
            "Heart_Rate".to_string(),
            "Skin_Conductance".to_string(),
        ];
        let err = service().build(&sample, &declared).unwrap_err();

        assert_matches!(
            err,
            ScoringError::FeatureValue { feature, value }
                if feature == "Skin_Conductance" && value.contains("high")
        );
    }

    #[test]
    fn feature_without_value_or_default_is_a_configuration_error() {
        let sample = bare_sample(72);
        let declared = vec!["Lactate".to_string()];

        let err = service().build(&sample, &declared).unwrap_err();

        assert_matches!(err, ScoringError::MissingFeature { feature } if feature == "Lactate");
    }

    #[test]
    fn empty_declared_list_falls_back_to_configured_schema() {
        let sample = bare_sample(140);

        let vector = service().build(&sample, &[]).unwrap();

        assert_eq!(vector.len(), 4);
        assert_eq!(vector[0], 140.0);
    }

    #[test]
    fn rebuilding_the_same_sample_is_bit_identical() {
        let mut sample = bare_sample(101);
        sample.hrv = Some(48.3);

        let first = service().build(&sample, &schema()).unwrap();
        let second = service().build(&sample, &schema()).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            second.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
    }
}
