use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Serialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Train {
    pub tid: i64,
    pub train_name: String,
    pub destination1: Option<String>,
    pub destination2: Option<String>,
    pub destination3: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct TrainRequest {
    pub train_name: String,
    #[serde(default)]
    pub dest1: Option<String>,
    #[serde(default)]
    pub dest2: Option<String>,
    #[serde(default)]
    pub dest3: Option<String>,
}

/// Train fields ready to be written; blank destination slots become `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainFields {
    pub train_name: String,
    pub destinations: [Option<String>; 3],
}

impl TrainRequest {
    pub fn validate(&self) -> Result<TrainFields, AppError> {
        let train_name = self.train_name.trim();
        if train_name.is_empty() {
            return Err(AppError::validation("Train name is required."));
        }
        let slot = |d: &Option<String>| {
            d.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Ok(TrainFields {
            train_name: train_name.to_string(),
            destinations: [slot(&self.dest1), slot(&self.dest2), slot(&self.dest3)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_slots_are_dropped() {
        let req = TrainRequest {
            train_name: "Kovai Express".into(),
            dest1: Some("Chennai".into()),
            dest2: Some("  ".into()),
            dest3: None,
        };
        let fields = req.validate().unwrap();
        assert_eq!(fields.destinations, [Some("Chennai".to_string()), None, None]);
    }

    #[test]
    fn name_is_required() {
        let req = TrainRequest { train_name: " ".into(), ..Default::default() };
        assert!(req.validate().is_err());
    }
}
