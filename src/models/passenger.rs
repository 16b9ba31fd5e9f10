use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::booking::{parse_age, parse_phone};
use super::FormField;
use crate::error::AppError;

/// A booking record.
#[derive(Serialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Passenger {
    pub pno: i64,
    pub name: String,
    pub age: i64,
    pub phonenum: String,
    pub totalcost: i64,
    pub tickets: i64,
    pub tid: i64,
    pub startingpoint: String,
    pub destination: String,
    pub reg_date: NaiveDate,
}

/// The editable part of a passenger record.
#[derive(Serialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PassengerContact {
    pub pno: i64,
    pub name: String,
    pub age: i64,
    pub phonenum: String,
}

#[derive(Debug, Clone)]
pub struct NewPassenger {
    pub name: String,
    pub age: i64,
    pub phonenum: String,
    pub reg_date: NaiveDate,
    pub startingpoint: String,
    pub totalcost: i64,
    pub tickets: i64,
    pub tid: i64,
    pub destination: String,
}

#[derive(Deserialize, Debug)]
pub struct EditPassengerRequest {
    pub name: String,
    pub age: FormField,
    pub phone: FormField,
}

impl EditPassengerRequest {
    pub fn validate(&self, pno: i64) -> Result<PassengerContact, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Passenger name is required."));
        }
        Ok(PassengerContact {
            pno,
            name: name.to_string(),
            age: parse_age(&self.age.text())?,
            phonenum: parse_phone(&self.phone.text())?,
        })
    }
}
