use actix_web::{web, HttpResponse};
use log::info;

use crate::auth::{AuthUser, Manager};
use crate::db::Database;
use crate::error::AppError;
use crate::models::{EditPassengerRequest, Notice};

const NOT_FOUND: &str = "Passenger not found.";

pub async fn show_passengers(_user: AuthUser, db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let passengers = db.list_passengers().await?;
    Ok(HttpResponse::Ok().json(passengers))
}

pub async fn get_passenger(
    _manager: Manager,
    db: web::Data<Database>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let passenger = db
        .get_passenger_contact(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    Ok(HttpResponse::Ok().json(passenger))
}

pub async fn edit_passenger(
    Manager(manager): Manager,
    db: web::Data<Database>,
    path: web::Path<i64>,
    payload: web::Json<EditPassengerRequest>,
) -> Result<HttpResponse, AppError> {
    let contact = payload.validate(path.into_inner())?;
    if !db.update_passenger_contact(&contact).await? {
        return Err(AppError::not_found(NOT_FOUND));
    }
    info!("{} updated passenger {}", manager.username, contact.pno);
    Ok(HttpResponse::Ok().json(Notice::success("Passenger details updated successfully.")))
}

pub async fn delete_passenger(
    Manager(manager): Manager,
    db: web::Data<Database>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let pno = path.into_inner();
    if !db.delete_passenger(pno).await? {
        return Err(AppError::not_found(NOT_FOUND));
    }
    info!("{} deleted passenger {}", manager.username, pno);
    Ok(HttpResponse::Ok().json(Notice::success("Passenger deleted successfully.")))
}
