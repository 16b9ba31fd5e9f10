use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;

use crate::auth::{AuthUser, Manager};
use crate::db::{Database, Removal};
use crate::error::AppError;
use crate::models::{DestinationRequest, Notice};

const NOT_FOUND: &str = "Destination not found.";

pub async fn show_destinations(_user: AuthUser, db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let destinations = db.list_destinations().await?;
    Ok(HttpResponse::Ok().json(destinations))
}

pub async fn add_destination(
    Manager(manager): Manager,
    db: web::Data<Database>,
    payload: web::Json<DestinationRequest>,
) -> Result<HttpResponse, AppError> {
    let (name, cost) = payload.validate()?;
    let destination = db.add_destination(&name, cost).await?;
    info!("{} added destination {} ({})", manager.username, destination.dno, destination.destination);
    Ok(HttpResponse::Created().json(json!({
        "category": "success",
        "message": "Destination added successfully.",
        "destination": destination,
    })))
}

pub async fn get_destination(
    _manager: Manager,
    db: web::Data<Database>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let destination = db
        .get_destination(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    Ok(HttpResponse::Ok().json(destination))
}

pub async fn edit_destination(
    Manager(manager): Manager,
    db: web::Data<Database>,
    path: web::Path<i64>,
    payload: web::Json<DestinationRequest>,
) -> Result<HttpResponse, AppError> {
    let dno = path.into_inner();
    let (name, cost) = payload.validate()?;
    if !db.update_destination(dno, &name, cost).await? {
        return Err(AppError::not_found(NOT_FOUND));
    }
    info!("{} updated destination {}", manager.username, dno);
    Ok(HttpResponse::Ok().json(Notice::success("Destination updated successfully.")))
}

pub async fn delete_destination(
    Manager(manager): Manager,
    db: web::Data<Database>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let dno = path.into_inner();
    match db.delete_destination(dno).await? {
        Removal::Deleted => {
            info!("{} deleted destination {}", manager.username, dno);
            Ok(HttpResponse::Ok().json(Notice::success("Destination deleted successfully.")))
        }
        Removal::NotFound => Err(AppError::not_found(NOT_FOUND)),
        Removal::Referenced(count) => Err(AppError::Conflict(format!(
            "Cannot delete destination. There are {} passengers with bookings to this destination.",
            count
        ))),
    }
}
