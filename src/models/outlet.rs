use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::{error::OutletFoodError, models::serde_helpers::null_as_default};

/// One persisted menu document per outlet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OutletRecord {
    pub id: i64,
    pub outlet_id: i64,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for POST /api/getOutletFood.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lon: f64,
    #[serde(rename = "outletid", deserialize_with = "null_as_default")]
    pub outlet_id: i64,
    #[serde(rename = "foodCategory", deserialize_with = "null_as_default")]
    pub food_category: String,
    /// RFC3339 timestamp, e.g. "2025-06-02T18:30:00+05:30".
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
}

impl ReadRequest {
    pub fn validate(&self) -> Result<(), OutletFoodError> {
        if self.platform.is_empty()
            || self.country.is_empty()
            || self.city.is_empty()
            || self.outlet_id == 0
            || self.date.is_empty()
        {
            return Err(OutletFoodError::Validation(
                "missing required field (platform,country,city,outletid,date)".into(),
            ));
        }

        DateTime::parse_from_rfc3339(&self.date).map_err(|e| {
            OutletFoodError::Validation(format!("invalid date format, expect RFC3339: {e}"))
        })?;

        Ok(())
    }
}

/// Query params for POST /api/updateOutletFood.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOutletFoodQuery {
    pub outletid: Option<String>,
}

impl UpdateOutletFoodQuery {
    /// Parsed `?outletid=`. An empty value counts as absent; a non-numeric one is rejected.
    pub fn outlet_id(&self) -> Result<Option<i64>, OutletFoodError> {
        match self.outletid.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|e| OutletFoodError::Validation(format!("invalid outletid {raw:?}: {e}"))),
        }
    }
}
