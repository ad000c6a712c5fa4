use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use metabolic_model::{ActivityLevel, Gender, Measurement, MeasurementUpdate, NewMeasurement};
use sqlx::{sqlite::SqliteRow, Connection as SqlxConnection, Executor, Row, Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::{connection::Connection, Result, StoreError};

const SELECT_COLUMNS: &str = "SELECT id, timestamp, weight, height, waist, hip, age, gender,
    activity_level, bmi, bmr, tdee, body_fat_percentage, notes FROM measurements";

const INSERT_QUERY: &str = "INSERT INTO measurements (id, timestamp, weight, height, waist, hip,
    age, gender, activity_level, bmi, bmr, tdee, body_fat_percentage, notes)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const UPDATE_QUERY: &str = "UPDATE measurements SET timestamp = ?, weight = ?, height = ?,
    waist = ?, hip = ?, age = ?, gender = ?, activity_level = ?, bmi = ?, bmr = ?, tdee = ?,
    body_fat_percentage = ?, notes = ? WHERE id = ?";

/// Persistent measurement history. Measurements are returned in the order
/// they were stored.
#[mockall::automock]
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    async fn store_measurement(&self, measurement: NewMeasurement) -> Result<Measurement>;
    async fn fetch_measurements(&self) -> Result<Vec<Measurement>>;
    /// Last `limit` stored measurements, newest first.
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<Measurement>>;
    async fn fetch_measurement(&self, id: &str) -> Result<Option<Measurement>>;
    async fn update_measurement(
        &self,
        id: &str,
        update: MeasurementUpdate,
    ) -> Result<Option<Measurement>>;
    async fn delete_measurement(&self, id: &str) -> Result<bool>;
    async fn clear(&self) -> Result<()>;
    /// Replaces the whole history in one transaction.
    async fn replace_all(&self, measurements: Vec<Measurement>) -> Result<()>;
}

#[derive(Clone)]
pub struct MeasurementRepositoryImpl {
    connection: Connection,
}

impl MeasurementRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

fn from_row(row: &SqliteRow) -> Result<Measurement> {
    let id: String = row.try_get("id")?;
    let timestamp: i64 = row.try_get("timestamp")?;
    let gender: String = row.try_get("gender")?;
    let activity_level: String = row.try_get("activity_level")?;

    let date = DateTime::<Utc>::from_timestamp_millis(timestamp)
        .ok_or_else(|| StoreError::MalformedRecord(format!("{}: timestamp {}", id, timestamp)))?;
    let gender = gender
        .parse::<Gender>()
        .map_err(|_| StoreError::MalformedRecord(format!("{}: gender \"{}\"", id, gender)))?;
    let activity_level = activity_level.parse::<ActivityLevel>().map_err(|_| {
        StoreError::MalformedRecord(format!("{}: activity level \"{}\"", id, activity_level))
    })?;

    Ok(Measurement {
        date,
        data: NewMeasurement {
            weight: row.try_get("weight")?,
            height: row.try_get("height")?,
            waist: row.try_get("waist")?,
            hip: row.try_get("hip")?,
            age: row.try_get("age")?,
            gender,
            activity_level,
            bmi: row.try_get("bmi")?,
            bmr: row.try_get("bmr")?,
            tdee: row.try_get("tdee")?,
            body_fat_percentage: row.try_get("body_fat_percentage")?,
            notes: row.try_get("notes")?,
        },
        id,
    })
}

async fn insert<'c, E>(executor: E, measurement: &Measurement) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    let data = &measurement.data;
    sqlx::query(INSERT_QUERY)
        .bind(measurement.id.as_str())
        .bind(measurement.date.timestamp_millis())
        .bind(data.weight)
        .bind(data.height)
        .bind(data.waist)
        .bind(data.hip)
        .bind(data.age)
        .bind(data.gender.key())
        .bind(data.activity_level.key())
        .bind(data.bmi)
        .bind(data.bmr)
        .bind(data.tdee)
        .bind(data.body_fat_percentage)
        .bind(data.notes.as_deref())
        .execute(executor)
        .await?;
    Ok(())
}

async fn select_one(conn: &mut SqliteConnection, id: &str) -> Result<Option<Measurement>> {
    sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .as_ref()
        .map(from_row)
        .transpose()
}

#[async_trait]
impl MeasurementRepository for MeasurementRepositoryImpl {
    async fn store_measurement(&self, measurement: NewMeasurement) -> Result<Measurement> {
        let measurement = Measurement {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            data: measurement,
        };

        let mut conn = self.connection.lock().await;
        debug!("Storing measurement {}", measurement.id);
        insert(&mut *conn, &measurement).await?;
        Ok(measurement)
    }

    async fn fetch_measurements(&self) -> Result<Vec<Measurement>> {
        let mut conn = self.connection.lock().await;
        sqlx::query(&format!("{} ORDER BY rowid", SELECT_COLUMNS))
            .fetch_all(&mut *conn)
            .await?
            .iter()
            .map(from_row)
            .collect()
    }

    async fn fetch_recent(&self, limit: usize) -> Result<Vec<Measurement>> {
        let mut conn = self.connection.lock().await;
        sqlx::query(&format!("{} ORDER BY rowid DESC LIMIT ?", SELECT_COLUMNS))
            .bind(limit as i64)
            .fetch_all(&mut *conn)
            .await?
            .iter()
            .map(from_row)
            .collect()
    }

    async fn fetch_measurement(&self, id: &str) -> Result<Option<Measurement>> {
        let mut conn = self.connection.lock().await;
        select_one(&mut conn, id).await
    }

    async fn update_measurement(
        &self,
        id: &str,
        update: MeasurementUpdate,
    ) -> Result<Option<Measurement>> {
        let mut conn = self.connection.lock().await;
        let Some(mut measurement) = select_one(&mut conn, id).await? else {
            debug!("Measurement {} not found, nothing to update", id);
            return Ok(None);
        };
        measurement.apply(update);

        let data = &measurement.data;
        debug!("Updating measurement {}", id);
        sqlx::query(UPDATE_QUERY)
            .bind(measurement.date.timestamp_millis())
            .bind(data.weight)
            .bind(data.height)
            .bind(data.waist)
            .bind(data.hip)
            .bind(data.age)
            .bind(data.gender.key())
            .bind(data.activity_level.key())
            .bind(data.bmi)
            .bind(data.bmr)
            .bind(data.tdee)
            .bind(data.body_fat_percentage)
            .bind(data.notes.as_deref())
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(Some(measurement))
    }

    async fn delete_measurement(&self, id: &str) -> Result<bool> {
        let mut conn = self.connection.lock().await;
        debug!("Deleting measurement {}", id);
        let result = sqlx::query("DELETE FROM measurements WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<()> {
        let mut conn = self.connection.lock().await;
        debug!("Clearing measurements");
        sqlx::query("DELETE FROM measurements")
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn replace_all(&self, measurements: Vec<Measurement>) -> Result<()> {
        let mut conn = self.connection.lock().await;
        let mut tx = conn.begin().await?;

        debug!("Replacing history with {} measurements", measurements.len());
        sqlx::query("DELETE FROM measurements")
            .execute(&mut *tx)
            .await?;
        for measurement in &measurements {
            insert(&mut *tx, measurement).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
