use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;

use crate::auth::{AuthUser, Manager};
use crate::db::{Database, Removal};
use crate::error::AppError;
use crate::models::{Notice, TrainRequest};

const NOT_FOUND: &str = "Train not found.";

pub async fn show_trains(_user: AuthUser, db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let trains = db.list_trains().await?;
    Ok(HttpResponse::Ok().json(trains))
}

pub async fn add_train(
    Manager(manager): Manager,
    db: web::Data<Database>,
    payload: web::Json<TrainRequest>,
) -> Result<HttpResponse, AppError> {
    let fields = payload.validate()?;
    let train = db.add_train(&fields).await?;
    info!("{} added train {} ({})", manager.username, train.tid, train.train_name);
    Ok(HttpResponse::Created().json(json!({
        "category": "success",
        "message": "Train added successfully.",
        "train": train,
    })))
}

pub async fn get_train(
    _manager: Manager,
    db: web::Data<Database>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let train = db
        .get_train(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    Ok(HttpResponse::Ok().json(train))
}

pub async fn edit_train(
    Manager(manager): Manager,
    db: web::Data<Database>,
    path: web::Path<i64>,
    payload: web::Json<TrainRequest>,
) -> Result<HttpResponse, AppError> {
    let tid = path.into_inner();
    let fields = payload.validate()?;
    if !db.update_train(tid, &fields).await? {
        return Err(AppError::not_found(NOT_FOUND));
    }
    info!("{} updated train {}", manager.username, tid);
    Ok(HttpResponse::Ok().json(Notice::success("Train details updated successfully.")))
}

pub async fn delete_train(
    Manager(manager): Manager,
    db: web::Data<Database>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let tid = path.into_inner();
    match db.delete_train(tid).await? {
        Removal::Deleted => {
            info!("{} deleted train {}", manager.username, tid);
            Ok(HttpResponse::Ok().json(Notice::success("Train deleted successfully.")))
        }
        Removal::NotFound => Err(AppError::not_found(NOT_FOUND)),
        Removal::Referenced(count) => Err(AppError::Conflict(format!(
            "Cannot delete train. There are {} passengers booked on this train.",
            count
        ))),
    }
}
