use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::auth::AuthUser;
use crate::db::Database;
use crate::error::AppError;

const USER_ACTIONS: [&str; 7] = [
    "book_ticket",
    "show_passengers",
    "show_class_coach",
    "show_train_details",
    "show_destinations",
    "made_by",
    "logout",
];

const MANAGER_ACTIONS: [&str; 8] = [
    "add_train",
    "edit_train",
    "delete_train",
    "add_destination",
    "edit_destination",
    "delete_destination",
    "edit_passenger",
    "delete_passenger",
];

const CREDITS: &str = "Train Ticket Booking System           :
Roll No                             : 86
School Name                         : PSG TECH
Session                             : 2024

Thanks for evaluating my Project.";

pub fn actions_for(user: &AuthUser) -> Vec<&'static str> {
    let mut actions = USER_ACTIONS.to_vec();
    if user.is_manager() {
        actions.extend_from_slice(&MANAGER_ACTIONS);
    }
    actions
}

pub async fn dashboard(user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "username": user.username,
        "role": user.role,
        "actions": actions_for(&user),
    }))
}

pub async fn made_by(_user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "project": "Train Ticket Booking System",
        "roll_no": 86,
        "school": "PSG TECH",
        "session": "2024",
        "message": CREDITS,
    }))
}

pub async fn show_class_coach(_user: AuthUser, db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let class_coaches = db.list_class_coaches().await?;
    Ok(HttpResponse::Ok().json(class_coaches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn managers_see_the_admin_actions() {
        let user = AuthUser { username: "asha".into(), role: Role::User };
        let manager = AuthUser { username: "ravi".into(), role: Role::Manager };
        assert!(!actions_for(&user).contains(&"delete_train"));
        assert!(actions_for(&manager).contains(&"delete_train"));
        assert_eq!(actions_for(&manager).len(), USER_ACTIONS.len() + MANAGER_ACTIONS.len());
    }
}
