use log::{debug, info, warn};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::error::AppError;
use crate::models::{
    BookingOptions, ClassCoach, Destination, NewPassenger, Passenger, PassengerContact, Role,
    Train, User,
};
use crate::models::train::TrainFields;

const MAX_CONNECTIONS: u32 = 5;

/// Result of a delete that is refused while passengers still reference the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    NotFound,
    Referenced(i64),
}

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        info!("Connecting to database at {}", url);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(url)
            .await?;
        Ok(Database { pool })
    }

    /// A private in-memory database. One connection, never recycled, so every
    /// query sees the same data.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Ok(Database { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // --- users ---

    pub async fn find_user(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT username, password, role FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    /// Usernames are unique; a taken name is reported as a conflict, also when
    /// two registrations race for it.
    pub async fn create_user(&self, username: &str, password_hash: &str, role: Role) -> Result<(), AppError> {
        let inserted = sqlx::query("INSERT INTO users (username, password, role) VALUES (?, ?, ?)")
            .bind(username)
            .bind(password_hash)
            .bind(role.as_str())
            .execute(&self.pool)
            .await;

        match inserted {
            Ok(_) => {
                info!("Registered {} with role {}", username, role);
                Ok(())
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                warn!("Registration refused, username {} is taken", username);
                Err(AppError::Conflict("User already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    // --- class coaches ---

    pub async fn list_class_coaches(&self) -> Result<Vec<ClassCoach>, sqlx::Error> {
        sqlx::query_as::<_, ClassCoach>("SELECT sno, coach_type, fare FROM class_coach ORDER BY sno")
            .fetch_all(&self.pool)
            .await
    }

    // --- destinations ---

    pub async fn list_destinations(&self) -> Result<Vec<Destination>, sqlx::Error> {
        sqlx::query_as::<_, Destination>("SELECT dno, destination, cost FROM desti ORDER BY dno")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_destination(&self, dno: i64) -> Result<Option<Destination>, sqlx::Error> {
        sqlx::query_as::<_, Destination>("SELECT dno, destination, cost FROM desti WHERE dno = ?")
            .bind(dno)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn add_destination(&self, name: &str, cost: i64) -> Result<Destination, sqlx::Error> {
        let result = sqlx::query("INSERT INTO desti (destination, cost) VALUES (?, ?)")
            .bind(name)
            .bind(cost)
            .execute(&self.pool)
            .await?;
        Ok(Destination {
            dno: result.last_insert_rowid(),
            destination: name.to_string(),
            cost,
        })
    }

    /// Returns false when no destination has that number.
    pub async fn update_destination(&self, dno: i64, name: &str, cost: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE desti SET destination = ?, cost = ? WHERE dno = ?")
            .bind(name)
            .bind(cost)
            .bind(dno)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_destination(&self, dno: i64) -> Result<Removal, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT dno FROM desti WHERE dno = ?")
            .bind(dno)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Ok(Removal::NotFound);
        }

        let bookings: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM passenger WHERE destination = (SELECT destination FROM desti WHERE dno = ?)",
        )
        .bind(dno)
        .fetch_one(&mut *tx)
        .await?;
        if bookings > 0 {
            debug!("Destination {} still has {} bookings", dno, bookings);
            return Ok(Removal::Referenced(bookings));
        }

        sqlx::query("DELETE FROM desti WHERE dno = ?")
            .bind(dno)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Removal::Deleted)
    }

    // --- trains ---

    pub async fn list_trains(&self) -> Result<Vec<Train>, sqlx::Error> {
        sqlx::query_as::<_, Train>(
            "SELECT tid, train_name, destination1, destination2, destination3 FROM traind ORDER BY tid",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_train(&self, tid: i64) -> Result<Option<Train>, sqlx::Error> {
        sqlx::query_as::<_, Train>(
            "SELECT tid, train_name, destination1, destination2, destination3 FROM traind WHERE tid = ?",
        )
        .bind(tid)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn add_train(&self, fields: &TrainFields) -> Result<Train, sqlx::Error> {
        let [d1, d2, d3] = &fields.destinations;
        let result = sqlx::query(
            "INSERT INTO traind (train_name, destination1, destination2, destination3) VALUES (?, ?, ?, ?)",
        )
        .bind(&fields.train_name)
        .bind(d1)
        .bind(d2)
        .bind(d3)
        .execute(&self.pool)
        .await?;
        Ok(Train {
            tid: result.last_insert_rowid(),
            train_name: fields.train_name.clone(),
            destination1: d1.clone(),
            destination2: d2.clone(),
            destination3: d3.clone(),
        })
    }

    pub async fn update_train(&self, tid: i64, fields: &TrainFields) -> Result<bool, sqlx::Error> {
        let [d1, d2, d3] = &fields.destinations;
        let result = sqlx::query(
            "UPDATE traind SET train_name = ?, destination1 = ?, destination2 = ?, destination3 = ? WHERE tid = ?",
        )
        .bind(&fields.train_name)
        .bind(d1)
        .bind(d2)
        .bind(d3)
        .bind(tid)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_train(&self, tid: i64) -> Result<Removal, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT tid FROM traind WHERE tid = ?")
            .bind(tid)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Ok(Removal::NotFound);
        }

        let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM passenger WHERE tid = ?")
            .bind(tid)
            .fetch_one(&mut *tx)
            .await?;
        if bookings > 0 {
            debug!("Train {} still has {} bookings", tid, bookings);
            return Ok(Removal::Referenced(bookings));
        }

        sqlx::query("DELETE FROM traind WHERE tid = ?")
            .bind(tid)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Removal::Deleted)
    }

    // --- passengers ---

    pub async fn list_passengers(&self) -> Result<Vec<Passenger>, sqlx::Error> {
        sqlx::query_as::<_, Passenger>(
            "SELECT pno, name, age, phonenum, totalcost, tickets, tid, startingpoint, destination, reg_date \
             FROM passenger ORDER BY pno",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_passenger_contact(&self, pno: i64) -> Result<Option<PassengerContact>, sqlx::Error> {
        sqlx::query_as::<_, PassengerContact>("SELECT pno, name, age, phonenum FROM passenger WHERE pno = ?")
            .bind(pno)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts the booking only while its train and destination still exist,
    /// in a single statement so a concurrent delete cannot slip in between.
    /// Returns `None` when either is gone.
    pub async fn add_passenger(&self, passenger: &NewPassenger) -> Result<Option<Passenger>, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO passenger (name, age, phonenum, reg_date, startingpoint, totalcost, tickets, tid, destination) \
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, ? \
             WHERE EXISTS (SELECT 1 FROM traind WHERE tid = ?) \
               AND EXISTS (SELECT 1 FROM desti WHERE destination = ?)",
        )
        .bind(&passenger.name)
        .bind(passenger.age)
        .bind(&passenger.phonenum)
        .bind(passenger.reg_date)
        .bind(&passenger.startingpoint)
        .bind(passenger.totalcost)
        .bind(passenger.tickets)
        .bind(passenger.tid)
        .bind(&passenger.destination)
        .bind(passenger.tid)
        .bind(&passenger.destination)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!("Booking on train {} to {} dropped, reference is gone", passenger.tid, passenger.destination);
            return Ok(None);
        }

        Ok(Some(Passenger {
            pno: result.last_insert_rowid(),
            name: passenger.name.clone(),
            age: passenger.age,
            phonenum: passenger.phonenum.clone(),
            totalcost: passenger.totalcost,
            tickets: passenger.tickets,
            tid: passenger.tid,
            startingpoint: passenger.startingpoint.clone(),
            destination: passenger.destination.clone(),
            reg_date: passenger.reg_date,
        }))
    }

    pub async fn update_passenger_contact(&self, contact: &PassengerContact) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE passenger SET name = ?, age = ?, phonenum = ? WHERE pno = ?")
            .bind(&contact.name)
            .bind(contact.age)
            .bind(&contact.phonenum)
            .bind(contact.pno)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_passenger(&self, pno: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM passenger WHERE pno = ?")
            .bind(pno)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- booking ---

    pub async fn booking_options(&self) -> Result<BookingOptions, sqlx::Error> {
        Ok(BookingOptions {
            class_coaches: self.list_class_coaches().await?,
            destinations: self.list_destinations().await?,
            trains: self.list_trains().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    async fn seeded() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db.seed_data(false).await.unwrap();
        db
    }

    fn booking_on(tid: i64, destination: &str) -> NewPassenger {
        NewPassenger {
            name: "Meena".into(),
            age: 27,
            phonenum: "9443012345".into(),
            reg_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            startingpoint: "Coimbatore".into(),
            totalcost: 4500,
            tickets: 1,
            tid,
            destination: destination.into(),
        }
    }

    #[actix_web::test]
    async fn taken_username_is_a_conflict_not_a_database_error() {
        let db = seeded().await;
        db.create_user("asha", "hash", Role::User).await.unwrap();
        let err = db.create_user("asha", "other", Role::Manager).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref msg) if msg == "User already exists"));
    }

    #[actix_web::test]
    async fn booking_on_a_deleted_train_is_not_stored() {
        let db = seeded().await;
        assert_eq!(db.delete_train(3).await.unwrap(), Removal::Deleted);

        assert!(db.add_passenger(&booking_on(3, "Chennai")).await.unwrap().is_none());
        assert!(db.add_passenger(&booking_on(1, "Atlantis")).await.unwrap().is_none());
        assert!(db.list_passengers().await.unwrap().is_empty());

        let stored = db.add_passenger(&booking_on(1, "Chennai")).await.unwrap().unwrap();
        assert_eq!(stored.tid, 1);
        assert_eq!(db.delete_train(1).await.unwrap(), Removal::Referenced(1));
    }
}
