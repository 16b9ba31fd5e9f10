use serde::{Deserialize, Serialize};

use super::FormField;
use crate::error::AppError;

/// A booking endpoint; `cost` is added to the coach fare for every ticket.
#[derive(Serialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Destination {
    pub dno: i64,
    pub destination: String,
    pub cost: i64,
}

#[derive(Deserialize, Debug)]
pub struct DestinationRequest {
    pub dest_name: String,
    pub cost: FormField,
}

impl DestinationRequest {
    /// Returns the trimmed name and the parsed cost.
    pub fn validate(&self) -> Result<(String, i64), AppError> {
        let name = self.dest_name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Destination name is required."));
        }
        match self.cost.parse_int() {
            Some(cost) if cost >= 0 => Ok((name.to_string(), cost)),
            _ => Err(AppError::validation("Invalid cost, please enter a non-negative number.")),
        }
    }
}
