//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use farmwatch_app::ports::DeviceRepository;
use farmwatch_domain::device::Device;
use farmwatch_domain::error::FarmwatchError;
use farmwatch_domain::id::DeviceId;

use crate::error::StorageError;
use crate::row::decode;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let kind: String = row.try_get("kind")?;
        let status: String = row.try_get("status")?;

        Ok(Self(Device {
            id: DeviceId::new(id),
            name: row.try_get("name")?,
            kind: decode(&kind)?,
            topic: row.try_get("topic")?,
            farm: row.try_get("farm")?,
            description: row.try_get("description")?,
            status: decode(&status)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO devices (id, name, kind, topic, farm, description, status)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM devices ORDER BY name, id";
const UPDATE: &str = r"
    UPDATE devices
    SET name = ?, kind = ?, topic = ?, farm = ?, description = ?, status = ?
    WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, FarmwatchError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(device.id.as_str())
                .bind(&device.name)
                .bind(device.kind.as_str())
                .bind(&device.topic)
                .bind(&device.farm)
                .bind(&device.description)
                .bind(device.status.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(device)
        }
    }

    fn get_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, FarmwatchError>> + Send {
        let pool = self.pool.clone();
        let id = id.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, FarmwatchError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, FarmwatchError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&device.name)
                .bind(device.kind.as_str())
                .bind(&device.topic)
                .bind(&device.farm)
                .bind(&device.description)
                .bind(device.status.as_str())
                .bind(device.id.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(device)
        }
    }

    fn delete(&self, id: &DeviceId) -> impl Future<Output = Result<(), FarmwatchError>> + Send {
        let pool = self.pool.clone();
        let id = id.to_string();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
