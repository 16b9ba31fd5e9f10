pub mod auth;
pub mod booking;
pub mod coach;
pub mod destination;
pub mod passenger;
pub mod train;
pub mod user;

use serde::{Deserialize, Serialize};

// Re-export all the models that are used in other modules
pub use auth::{AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterRequest};
pub use booking::{BookTicketRequest, BookingOptions, ValidatedBooking};
pub use coach::ClassCoach;
pub use destination::{Destination, DestinationRequest};
pub use passenger::{EditPassengerRequest, NewPassenger, Passenger, PassengerContact};
pub use train::{Train, TrainRequest};
pub use user::{Claims, Role, User, UserResponse};

/// A submitted field that clients may send either as a JSON number or as the
/// raw text typed into a form. Digit checks work on the text exactly as sent;
/// id parsing tolerates surrounding whitespace.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FormField {
    Number(i64),
    Text(String),
}

impl FormField {
    pub fn text(&self) -> String {
        match self {
            FormField::Number(n) => n.to_string(),
            FormField::Text(s) => s.clone(),
        }
    }

    pub fn parse_int(&self) -> Option<i64> {
        match self {
            FormField::Number(n) => Some(*n),
            FormField::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<&str> for FormField {
    fn from(s: &str) -> Self {
        FormField::Text(s.to_string())
    }
}

/// Outcome notice for a request, shown to the user the way a flash message would be.
#[derive(Serialize, Debug, Clone)]
pub struct Notice {
    pub category: &'static str,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice { category: "success", message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice { category: "info", message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_field_accepts_numbers_and_text() {
        let n: FormField = serde_json::from_str("3").unwrap();
        let t: FormField = serde_json::from_str("\" 42 \"").unwrap();
        assert_eq!(n.parse_int(), Some(3));
        assert_eq!(t.parse_int(), Some(42));
        assert_eq!(t.text(), " 42 ");
    }

    #[test]
    fn form_field_text_that_is_not_a_number() {
        let f = FormField::from("two");
        assert_eq!(f.parse_int(), None);
    }
}
