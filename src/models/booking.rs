//! Ticket booking input checks and fare calculation.
//!
//! Checks run in a fixed order and the first failure is reported, so a
//! client always sees the same message for the same bad submission.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{ClassCoach, Destination, FormField, Train};
use crate::error::AppError;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid digits pattern"));

pub const NUMERIC_FIELDS: &str =
    "Please enter valid numeric values for age, phone number, tickets, and IDs.";

/// Everything a client needs to fill in the booking form.
#[derive(Serialize, Debug)]
pub struct BookingOptions {
    pub class_coaches: Vec<ClassCoach>,
    pub destinations: Vec<Destination>,
    pub trains: Vec<Train>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BookTicketRequest {
    pub class_coach_sno: FormField,
    pub num_tickets: FormField,
    pub destination_dno: FormField,
    pub passenger_name: String,
    pub passenger_age: FormField,
    pub phone_number: FormField,
    pub train_id: FormField,
}

/// A booking that passed every check, borrowing the rows it was priced against.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking<'a> {
    pub coach: &'a ClassCoach,
    pub destination: &'a Destination,
    pub train: &'a Train,
    pub tickets: i64,
    pub name: String,
    pub age: i64,
    pub phone: String,
}

impl ValidatedBooking<'_> {
    pub fn total_cost(&self) -> Result<i64, AppError> {
        fare(self.coach, self.destination, self.tickets)
    }
}

/// Per-ticket price is the coach fare plus the destination cost.
pub fn fare(coach: &ClassCoach, destination: &Destination, tickets: i64) -> Result<i64, AppError> {
    coach
        .fare
        .checked_add(destination.cost)
        .and_then(|per_ticket| per_ticket.checked_mul(tickets))
        .ok_or_else(|| AppError::validation("Number of tickets is too large."))
}

pub fn parse_age(raw: &str) -> Result<i64, AppError> {
    let invalid = || AppError::validation("Invalid age, please enter a numeric value.");
    if !is_digits(raw) {
        return Err(invalid());
    }
    match raw.parse::<i64>() {
        Ok(age) if age > 0 => Ok(age),
        _ => Err(invalid()),
    }
}

pub fn parse_phone(raw: &str) -> Result<String, AppError> {
    if is_digits(raw) {
        Ok(raw.to_string())
    } else {
        Err(AppError::validation("Invalid phone number, please enter digits only."))
    }
}

fn is_digits(raw: &str) -> bool {
    DIGITS.is_match(raw)
}

impl BookTicketRequest {
    pub fn validate<'a>(
        &self,
        class_coaches: &'a [ClassCoach],
        destinations: &'a [Destination],
        trains: &'a [Train],
    ) -> Result<ValidatedBooking<'a>, AppError> {
        let (sno, tickets, dno) = match (
            self.class_coach_sno.parse_int(),
            self.num_tickets.parse_int(),
            self.destination_dno.parse_int(),
        ) {
            (Some(sno), Some(tickets), Some(dno)) => (sno, tickets, dno),
            _ => return Err(AppError::validation(NUMERIC_FIELDS)),
        };

        let name = self.passenger_name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Passenger name is required."));
        }

        let coach = class_coaches
            .iter()
            .find(|c| c.sno == sno)
            .ok_or_else(|| AppError::validation("Invalid class coach selection."))?;

        if tickets <= 0 {
            return Err(AppError::validation("Number of tickets must be positive."));
        }

        let destination = destinations
            .iter()
            .find(|d| d.dno == dno)
            .ok_or_else(|| AppError::validation("Invalid destination selection."))?;

        let age = parse_age(&self.passenger_age.text())?;
        let phone = parse_phone(&self.phone_number.text())?;

        let train_id = self.train_id.text();
        if !is_digits(&train_id) {
            return Err(AppError::validation("Invalid Train ID, please enter a numeric value."));
        }
        let tid: i64 = train_id.parse().map_err(|_| AppError::validation(NUMERIC_FIELDS))?;
        let train = trains
            .iter()
            .find(|t| t.tid == tid)
            .ok_or_else(|| AppError::validation("Train not found."))?;

        Ok(ValidatedBooking {
            coach,
            destination,
            train,
            tickets,
            name: name.to_string(),
            age,
            phone,
        })
    }
}
