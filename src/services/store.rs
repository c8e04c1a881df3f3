use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{activity::Activity, participant::Participant, trip::{NewTrip, Trip}},
};

/// Query layer over the trips schema. Cheap to clone; every method is a
/// single round trip except `create_trip`, which commits the trip and its
/// invited participants in one transaction.
#[derive(Clone)]
pub struct TripStore {
    db: DbPool,
}

impl TripStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn create_trip(&self, trip: NewTrip) -> Result<Uuid, AppError> {
        let trip_id = Uuid::new_v4();

        let mut tx = self.db.begin().await?;

        sqlx::query(
            "INSERT INTO trips (id, destination, starts_at, ends_at, is_confirmed, owner_name, owner_email) \
             VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6)",
        )
        .bind(trip_id.to_string())
        .bind(&trip.destination)
        .bind(trip.starts_at)
        .bind(trip.ends_at)
        .bind(&trip.owner_name)
        .bind(&trip.owner_email)
        .execute(&mut *tx)
        .await?;

        for email in &trip.emails_to_invite {
            sqlx::query(
                "INSERT INTO participants (id, trip_id, email, is_confirmed) VALUES (?1, ?2, ?3, 0)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(trip_id.to_string())
            .bind(email)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(trip_id)
    }

    pub async fn get_trip(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            "SELECT id, destination, starts_at, ends_at, is_confirmed, owner_name, owner_email \
             FROM trips WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.db)
        .await?;
        Ok(trip)
    }

    pub async fn get_participant(&self, id: Uuid) -> Result<Option<Participant>, AppError> {
        let participant = sqlx::query_as::<_, Participant>(
            "SELECT id, trip_id, email, is_confirmed FROM participants WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.db)
        .await?;
        Ok(participant)
    }

    pub async fn confirm_participant(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE participants SET is_confirmed = 1 WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.db)
            .await?;
        Ok(())
    }

    /// `None` is the not-found signal for the trip itself; a trip without
    /// activities comes back as `Some` of an empty list.
    pub async fn get_trip_activities(
        &self,
        trip_id: Uuid,
    ) -> Result<Option<Vec<Activity>>, AppError> {
        let exists = sqlx::query_scalar::<_, String>("SELECT id FROM trips WHERE id = ?1")
            .bind(trip_id.to_string())
            .fetch_optional(&self.db)
            .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let activities = sqlx::query_as::<_, Activity>(
            "SELECT id, trip_id, title, occurs_at FROM activities WHERE trip_id = ?1",
        )
        .bind(trip_id.to_string())
        .fetch_all(&self.db)
        .await?;

        Ok(Some(activities))
    }
}
