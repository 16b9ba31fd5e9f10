pub mod auth;
pub mod bookings;
pub mod destinations;
pub mod info;
pub mod passengers;
pub mod trains;

use actix_web::web;

use crate::error::AppError;

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::validation(format!("Invalid request body: {}", err)).into());

    cfg.app_data(json_config)
        .service(web::resource(vec!["/", "/login"]).route(web::post().to(auth::login)))
        .service(
            web::resource("/logout")
                .route(web::get().to(auth::logout))
                .route(web::post().to(auth::logout)),
        )
        .service(web::resource("/register").route(web::post().to(auth::register)))
        .service(web::resource("/forgot_password").route(web::post().to(auth::forgot_password)))
        .service(web::resource("/dashboard").route(web::get().to(info::dashboard)))
        .service(web::resource("/made_by").route(web::get().to(info::made_by)))
        .service(web::resource("/show_class_coach").route(web::get().to(info::show_class_coach)))
        .service(
            web::resource("/book_ticket")
                .route(web::get().to(bookings::booking_options))
                .route(web::post().to(bookings::book_ticket)),
        )
        .service(web::resource("/show_passengers").route(web::get().to(passengers::show_passengers)))
        .service(
            web::resource("/edit_passenger/{pno}")
                .route(web::get().to(passengers::get_passenger))
                .route(web::post().to(passengers::edit_passenger)),
        )
        .service(
            web::resource("/delete_passenger/{pno}")
                .route(web::get().to(passengers::delete_passenger))
                .route(web::post().to(passengers::delete_passenger)),
        )
        .service(web::resource("/show_train_details").route(web::get().to(trains::show_trains)))
        .service(web::resource("/add_train").route(web::post().to(trains::add_train)))
        .service(
            web::resource("/edit_train/{tid}")
                .route(web::get().to(trains::get_train))
                .route(web::post().to(trains::edit_train)),
        )
        .service(
            web::resource("/delete_train/{tid}")
                .route(web::get().to(trains::delete_train))
                .route(web::post().to(trains::delete_train)),
        )
        .service(web::resource("/show_destinations").route(web::get().to(destinations::show_destinations)))
        .service(web::resource("/add_destination").route(web::post().to(destinations::add_destination)))
        .service(
            web::resource("/edit_destination/{dno}")
                .route(web::get().to(destinations::get_destination))
                .route(web::post().to(destinations::edit_destination)),
        )
        .service(
            web::resource("/delete_destination/{dno}")
                .route(web::get().to(destinations::delete_destination))
                .route(web::post().to(destinations::delete_destination)),
        );
}
