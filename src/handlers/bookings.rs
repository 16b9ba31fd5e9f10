use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;

use crate::auth::AuthUser;
use crate::config::Config;
use crate::db::Database;
use crate::error::AppError;
use crate::models::{BookTicketRequest, NewPassenger};

pub async fn booking_options(_user: AuthUser, db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let options = db.booking_options().await?;
    Ok(HttpResponse::Ok().json(options))
}

pub async fn book_ticket(
    user: AuthUser,
    db: web::Data<Database>,
    config: web::Data<Config>,
    booking_req: web::Json<BookTicketRequest>,
) -> Result<HttpResponse, AppError> {
    let options = db.booking_options().await?;
    let booking = booking_req.validate(&options.class_coaches, &options.destinations, &options.trains)?;
    let total = booking.total_cost()?;

    let stored = db
        .add_passenger(&NewPassenger {
            name: booking.name.clone(),
            age: booking.age,
            phonenum: booking.phone.clone(),
            reg_date: chrono::Local::now().date_naive(),
            startingpoint: config.origin_station.clone(),
            totalcost: total,
            tickets: booking.tickets,
            tid: booking.train.tid,
            destination: booking.destination.destination.clone(),
        })
        .await?;
    let passenger = match stored {
        Some(passenger) => passenger,
        // Deleted by a manager after validation ran.
        None if db.get_train(booking.train.tid).await?.is_none() => {
            return Err(AppError::validation("Train not found."))
        }
        None => return Err(AppError::validation("Invalid destination selection.")),
    };

    info!(
        "{} booked {} x {} to {} on train {} for Rs {}",
        user.username,
        booking.tickets,
        booking.coach.coach_type,
        booking.destination.destination,
        booking.train.tid,
        total
    );

    Ok(HttpResponse::Created().json(json!({
        "category": "success",
        "message": format!("Ticket booked and passenger added successfully! Total bill: Rs {}", total),
        "passenger": passenger,
    })))
}
