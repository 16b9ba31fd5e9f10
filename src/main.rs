use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use train_book::{handlers, Config, Database};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let db = Database::connect(&config.database_url).await.map_err(|e| {
        error!("Error connecting to the database: {}", e);
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
    })?;
    info!("Connected to the database");

    db.migrate().await.map_err(std::io::Error::other)?;
    if let Err(e) = db.seed_data(config.force_seed).await {
        error!("Seeding failed: {}", e);
    }

    let bind = config.bind_address();
    info!("Starting server at http://{}:{}", bind.0, bind.1);

    let db = web::Data::new(db);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(db.clone())
            .app_data(config.clone())
            .configure(handlers::configure)
    })
    .bind(bind)?
    .run()
    .await
}
