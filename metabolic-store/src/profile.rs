use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use metabolic_model::{Gender, Profile};
use sqlx::Row;

use crate::{connection::Connection, Result, StoreError};

#[mockall::automock]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn store_profile(&self, profile: Profile) -> Result<()>;
    async fn fetch_profile(&self) -> Result<Option<Profile>>;
}

#[derive(Clone)]
pub struct ProfileRepositoryImpl {
    connection: Connection,
}

impl ProfileRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ProfileRepository for ProfileRepositoryImpl {
    async fn store_profile(&self, profile: Profile) -> Result<()> {
        let mut conn = self.connection.lock().await;
        debug!("Storing profile");
        sqlx::query(
            "INSERT OR REPLACE INTO profile (id, height, gender, date_of_birth) VALUES (1, ?, ?, ?)",
        )
        .bind(profile.height)
        .bind(profile.gender.key())
        .bind(profile.date_of_birth.format("%Y-%m-%d").to_string())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn fetch_profile(&self) -> Result<Option<Profile>> {
        let mut conn = self.connection.lock().await;
        let Some(row) = sqlx::query("SELECT height, gender, date_of_birth FROM profile WHERE id = 1")
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };

        let gender: String = row.try_get("gender")?;
        let date_of_birth: String = row.try_get("date_of_birth")?;
        Ok(Some(Profile {
            height: row.try_get("height")?,
            gender: gender
                .parse::<Gender>()
                .map_err(|_| StoreError::MalformedRecord(format!("profile gender \"{}\"", gender)))?,
            date_of_birth: date_of_birth.parse::<NaiveDate>().map_err(|_| {
                StoreError::MalformedRecord(format!("profile date of birth \"{}\"", date_of_birth))
            })?,
        }))
    }
}
