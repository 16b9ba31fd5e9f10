use serde::Serialize;

/// A passenger compartment tier with a fixed per-ticket fare.
#[derive(Serialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ClassCoach {
    pub sno: i64,
    pub coach_type: String,
    pub fare: i64,
}
