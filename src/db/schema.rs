use log::{info, warn};

use super::Database;

const TABLES: [&str; 5] = [
    "CREATE TABLE IF NOT EXISTS users (
        username TEXT PRIMARY KEY NOT NULL,
        password TEXT NOT NULL,
        role     TEXT NOT NULL DEFAULT 'user'
    )",
    "CREATE TABLE IF NOT EXISTS class_coach (
        sno        INTEGER PRIMARY KEY AUTOINCREMENT,
        coach_type TEXT NOT NULL,
        fare       INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS desti (
        dno         INTEGER PRIMARY KEY AUTOINCREMENT,
        destination TEXT NOT NULL,
        cost        INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS traind (
        tid          INTEGER PRIMARY KEY AUTOINCREMENT,
        train_name   TEXT NOT NULL,
        destination1 TEXT,
        destination2 TEXT,
        destination3 TEXT
    )",
    "CREATE TABLE IF NOT EXISTS passenger (
        pno           INTEGER PRIMARY KEY AUTOINCREMENT,
        name          TEXT NOT NULL,
        age           INTEGER NOT NULL,
        phonenum      TEXT NOT NULL,
        reg_date      TEXT NOT NULL,
        startingpoint TEXT NOT NULL,
        totalcost     INTEGER NOT NULL,
        tickets       INTEGER NOT NULL,
        tid           INTEGER NOT NULL,
        destination   TEXT NOT NULL
    )",
];

const RESEEDED: [&str; 3] = ["class_coach", "desti", "traind"];

const CLASS_COACHES: [(&str, i64); 3] = [
    ("Second Seater", 2000),
    ("Sleeper Class", 4000),
    ("First Class AC", 6000),
];

const DESTINATIONS: [(&str, i64); 4] = [
    ("Chennai", 500),
    ("Bengaluru", 450),
    ("Madurai", 300),
    ("Tiruchirappalli", 250),
];

const TRAINS: [(&str, [Option<&str>; 3]); 3] = [
    ("Cheran Express", [Some("Chennai"), None, None]),
    ("Kovai Express", [Some("Chennai"), Some("Tiruchirappalli"), None]),
    ("Intercity Express", [Some("Bengaluru"), Some("Madurai"), Some("Chennai")]),
];

impl Database {
    /// Creates any missing tables. Safe to run on every start.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        for ddl in TABLES {
            sqlx::query(ddl).execute(self.pool()).await?;
        }
        info!("Schema ready ({} tables)", TABLES.len());
        Ok(())
    }

    /// Fills the reference tables on an empty database. With `force` the
    /// coach, destination and train tables are cleared first and their ids
    /// restart at 1, unless bookings exist; passengers and users are never
    /// touched.
    pub async fn seed_data(&self, force: bool) -> Result<(), sqlx::Error> {
        let mut tx = self.pool().begin().await?;

        if force {
            let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM passenger")
                .fetch_one(&mut *tx)
                .await?;
            if bookings > 0 {
                warn!(
                    "Force seeding skipped, {} bookings still reference the current trains and destinations",
                    bookings
                );
            } else {
                info!("Force seeding enabled, clearing reference tables");
                for table in RESEEDED {
                    sqlx::query(&format!("DELETE FROM {}", table))
                        .execute(&mut *tx)
                        .await?;
                }
                sqlx::query("DELETE FROM sqlite_sequence WHERE name IN ('class_coach', 'desti', 'traind')")
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let coaches: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM class_coach")
            .fetch_one(&mut *tx)
            .await?;
        if coaches > 0 {
            return Ok(());
        }

        info!("Seeding coach classes, destinations and trains");
        for (coach_type, fare) in CLASS_COACHES {
            sqlx::query("INSERT INTO class_coach (coach_type, fare) VALUES (?, ?)")
                .bind(coach_type)
                .bind(fare)
                .execute(&mut *tx)
                .await?;
        }
        for (destination, cost) in DESTINATIONS {
            sqlx::query("INSERT INTO desti (destination, cost) VALUES (?, ?)")
                .bind(destination)
                .bind(cost)
                .execute(&mut *tx)
                .await?;
        }
        for (train_name, [d1, d2, d3]) in TRAINS {
            sqlx::query(
                "INSERT INTO traind (train_name, destination1, destination2, destination3) VALUES (?, ?, ?, ?)",
            )
            .bind(train_name)
            .bind(d1)
            .bind(d2)
            .bind(d3)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(
            "Seeding complete: {} coach classes, {} destinations, {} trains",
            CLASS_COACHES.len(),
            DESTINATIONS.len(),
            TRAINS.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewPassenger;

    async fn fresh() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[actix_web::test]
    async fn migrate_is_idempotent() {
        let db = fresh().await;
        db.migrate().await.unwrap();
        assert!(db.list_trains().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn seed_reproduces_the_fixed_fares() {
        let db = fresh().await;
        db.seed_data(false).await.unwrap();
        let fares: Vec<i64> = db.list_class_coaches().await.unwrap().iter().map(|c| c.fare).collect();
        assert_eq!(fares, vec![2000, 4000, 6000]);
    }

    #[actix_web::test]
    async fn seed_leaves_existing_data_alone() {
        let db = fresh().await;
        db.seed_data(false).await.unwrap();
        db.add_destination("Salem", 120).await.unwrap();
        db.seed_data(false).await.unwrap();
        assert_eq!(db.list_destinations().await.unwrap().len(), DESTINATIONS.len() + 1);
    }

    #[actix_web::test]
    async fn forced_seed_restarts_ids_at_one() {
        let db = fresh().await;
        db.seed_data(false).await.unwrap();
        db.seed_data(true).await.unwrap();
        let tids: Vec<i64> = db.list_trains().await.unwrap().iter().map(|t| t.tid).collect();
        let snos: Vec<i64> = db.list_class_coaches().await.unwrap().iter().map(|c| c.sno).collect();
        assert_eq!(tids, vec![1, 2, 3]);
        assert_eq!(snos, vec![1, 2, 3]);
    }

    #[actix_web::test]
    async fn forced_seed_keeps_trains_that_have_bookings() {
        let db = fresh().await;
        db.seed_data(false).await.unwrap();
        db.add_destination("Salem", 120).await.unwrap();
        let booked = db
            .add_passenger(&NewPassenger {
                name: "Meena".into(),
                age: 27,
                phonenum: "9443012345".into(),
                reg_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                startingpoint: "Coimbatore".into(),
                totalcost: 4500,
                tickets: 1,
                tid: 1,
                destination: "Chennai".into(),
            })
            .await
            .unwrap();
        assert!(booked.is_some());

        db.seed_data(true).await.unwrap();

        assert!(db.get_train(1).await.unwrap().is_some());
        let snos: Vec<i64> = db.list_class_coaches().await.unwrap().iter().map(|c| c.sno).collect();
        assert_eq!(snos, vec![1, 2, 3]);
        assert_eq!(db.list_destinations().await.unwrap().len(), DESTINATIONS.len() + 1);
    }

    #[actix_web::test]
    async fn forced_seed_resets_reference_tables() {
        let db = fresh().await;
        db.seed_data(false).await.unwrap();
        db.add_destination("Salem", 120).await.unwrap();
        db.seed_data(true).await.unwrap();
        assert_eq!(db.list_destinations().await.unwrap().len(), DESTINATIONS.len());
    }
}
