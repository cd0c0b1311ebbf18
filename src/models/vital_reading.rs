use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

/// One persisted physiological sample from the chest strap.
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VitalReading {
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub heart_rate: i32,
    pub hrv: Option<f64>,
    pub rmssd: Option<f64>,
    pub body_temperature: Option<f64>,
    pub spo2: Option<i32>,
    pub timestamp: DateTime<Utc>,
}

/// Inbound sample shape. Heart rate is the only required channel; everything
/// else the strap may or may not report. Unrecognized keys are kept as extra
/// sensor channels so a deployed model schema can ask for channels the typed
/// fields do not cover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVitalReading {
    pub athlete_id: Uuid,
    pub heart_rate: i32,
    pub hrv: Option<f64>,
    pub rmssd: Option<f64>,
    pub body_temperature: Option<f64>,
    pub spo2: Option<i32>,
    #[serde(flatten)]
    pub channels: HashMap<String, Value>,
}

impl CreateVitalReading {
    /// Look up a sensor channel by the feature name the model uses.
    /// Typed fields win over extra channels; JSON nulls count as absent.
    pub fn channel(&self, name: &str) -> Option<Value> {
        let value = match name {
            "Heart_Rate" => Some(Value::from(self.heart_rate)),
            "Body_Temperature" => self.body_temperature.map(Value::from),
            "Blood_Oxygen" => self.spo2.map(Value::from),
            "hrv" => self.hrv.map(Value::from),
            "rmssd" => self.rmssd.map(Value::from),
            other => self.channels.get(other).cloned(),
        };

        match value {
            Some(Value::Null) => None,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> CreateVitalReading {
        CreateVitalReading {
            athlete_id: Uuid::new_v4(),
            heart_rate: 72,
            hrv: Some(55.0),
            rmssd: None,
            body_temperature: None,
            spo2: Some(97),
            channels: HashMap::new(),
        }
    }

    #[test]
    fn typed_channels_resolve_by_feature_name() {
        let reading = sample();
        assert_eq!(reading.channel("Heart_Rate"), Some(json!(72)));
        assert_eq!(reading.channel("Blood_Oxygen"), Some(json!(97)));
        assert_eq!(reading.channel("Body_Temperature"), None);
    }

    #[test]
    fn extra_channels_are_preserved_from_flattened_json() {
        let reading: CreateVitalReading = serde_json::from_value(json!({
            "athlete_id": Uuid::new_v4(),
            "heart_rate": 80,
            "Skin_Conductance": 0.4,
        }))
        .unwrap();

        assert_eq!(reading.channel("Skin_Conductance"), Some(json!(0.4)));
    }

    #[test]
    fn json_null_counts_as_absent() {
        let reading: CreateVitalReading = serde_json::from_value(json!({
            "athlete_id": Uuid::new_v4(),
            "heart_rate": 80,
            "Skin_Conductance": null,
        }))
        .unwrap();

        assert_eq!(reading.channel("Skin_Conductance"), None);
    }
}
