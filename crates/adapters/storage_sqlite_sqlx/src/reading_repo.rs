//! `SQLite` implementation of [`ReadingRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use farmwatch_app::ports::ReadingRepository;
use farmwatch_domain::error::FarmwatchError;
use farmwatch_domain::id::DeviceId;
use farmwatch_domain::reading::SensorReading;
use farmwatch_domain::time::Timestamp;

use crate::error::StorageError;
use crate::row::{decode, decode_time, encode_time, limit};

struct Wrapper(SensorReading);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let device_id: String = row.try_get("device_id")?;
        let recorded_at: String = row.try_get("recorded_at")?;

        Ok(Self(SensorReading {
            id: decode(&id)?,
            device_id: DeviceId::new(device_id),
            temperature: row.try_get("temperature")?,
            humidity: row.try_get("humidity")?,
            moisture: row.try_get("moisture")?,
            recorded_at: decode_time(&recorded_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO readings (id, device_id, temperature, humidity, moisture, recorded_at)
    VALUES (?, ?, ?, ?, ?, ?)
";

const SELECT_RECENT: &str = r"
    SELECT * FROM readings
    WHERE device_id = ?
    ORDER BY recorded_at DESC, rowid DESC
    LIMIT ?
";

const SELECT_LATEST: &str = r"
    SELECT * FROM readings
    ORDER BY recorded_at DESC, rowid DESC
    LIMIT ?
";

const SELECT_BETWEEN: &str = r"
    SELECT * FROM readings
    WHERE recorded_at >= ? AND recorded_at < ?
    ORDER BY recorded_at DESC, rowid DESC
";

/// `SQLite`-backed sensor reading store.
pub struct SqliteReadingRepository {
    pool: SqlitePool,
}

impl SqliteReadingRepository {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ReadingRepository for SqliteReadingRepository {
    fn store(
        &self,
        reading: SensorReading,
    ) -> impl Future<Output = Result<SensorReading, FarmwatchError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(reading.id.to_string())
                .bind(reading.device_id.as_str())
                .bind(reading.temperature)
                .bind(reading.humidity)
                .bind(reading.moisture)
                .bind(encode_time(reading.recorded_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(reading)
        }
    }

    fn recent_for_device(
        &self,
        device_id: &DeviceId,
        max: usize,
    ) -> impl Future<Output = Result<Vec<SensorReading>, FarmwatchError>> + Send {
        let pool = self.pool.clone();
        let device_id = device_id.to_string();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
                .bind(device_id)
                .bind(limit(max))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn recent(
        &self,
        max: usize,
    ) -> impl Future<Output = Result<Vec<SensorReading>, FarmwatchError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_LATEST)
                .bind(limit(max))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn between(
        &self,
        from: Timestamp,
        until: Timestamp,
    ) -> impl Future<Output = Result<Vec<SensorReading>, FarmwatchError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BETWEEN)
                .bind(encode_time(from))
                .bind(encode_time(until))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
