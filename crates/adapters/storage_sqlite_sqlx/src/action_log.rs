//! `SQLite` implementation of [`ActionLog`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use farmwatch_app::ports::ActionLog;
use farmwatch_domain::action::{ActionRecord, ActionSource};
use farmwatch_domain::error::FarmwatchError;
use farmwatch_domain::id::DeviceId;

use crate::error::StorageError;
use crate::row::{decode, decode_time, encode_time, limit};

struct Wrapper(ActionRecord);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let device_id: String = row.try_get("device_id")?;
        let command: String = row.try_get("command")?;
        let source: String = row.try_get("source")?;
        let recorded_at: String = row.try_get("recorded_at")?;

        let source = match source.as_str() {
            "manual" => ActionSource::Manual,
            other => {
                return Err(sqlx::Error::Decode(
                    format!("unknown action source: {other}").into(),
                ));
            }
        };

        Ok(Self(ActionRecord {
            id: decode(&id)?,
            device_id: DeviceId::new(device_id),
            command: decode(&command)?,
            source,
            recorded_at: decode_time(&recorded_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO actions (id, device_id, command, source, recorded_at)
    VALUES (?, ?, ?, ?, ?)
";

const SELECT_RECENT: &str = r"
    SELECT * FROM actions
    WHERE device_id = ?
    ORDER BY recorded_at DESC, rowid DESC
    LIMIT ?
";

/// `SQLite`-backed log of issued commands.
pub struct SqliteActionLog {
    pool: SqlitePool,
}

impl SqliteActionLog {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ActionLog for SqliteActionLog {
    fn record(
        &self,
        action: ActionRecord,
    ) -> impl Future<Output = Result<ActionRecord, FarmwatchError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(action.id.to_string())
                .bind(action.device_id.as_str())
                .bind(action.command.as_str())
                .bind(action.source.as_str())
                .bind(encode_time(action.recorded_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(action)
        }
    }

    fn recent_for_device(
        &self,
        device_id: &DeviceId,
        max: usize,
    ) -> impl Future<Output = Result<Vec<ActionRecord>, FarmwatchError>> + Send {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_repo::SqliteDeviceRepository;
    use crate::pool::Config;
    use farmwatch_app::ports::DeviceRepository;
    use farmwatch_domain::command::Command;
    use farmwatch_domain::device::{Device, DeviceKind};

    async fn setup() -> SqliteActionLog {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let devices = SqliteDeviceRepository::new(db.pool().clone());
        for id in ["pump-1", "pump-2"] {
            devices
                .create(
                    Device::builder()
                        .id(id)
                        .name("Pump")
                        .kind(DeviceKind::Actuator)
                        .topic(format!("farm/{id}"))
                        .build()
                        .unwrap(),
                )
                .await
                .unwrap();
        }
        SqliteActionLog::new(db.pool().clone())
    }

    #[tokio::test]
    async fn should_record_and_read_back_action() {
        let log = setup().await;
        let action = ActionRecord::manual(DeviceId::from("pump-1"), Command::On);

        log.record(action.clone()).await.unwrap();

        let recent = log
            .recent_for_device(&DeviceId::from("pump-1"), 10)
            .await
            .unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, action.id);
        assert_eq!(recent[0].command, Command::On);
        assert_eq!(recent[0].source, ActionSource::Manual);
    }

    #[tokio::test]
    async fn should_return_newest_first_and_respect_limit() {
        let log = setup().await;
        let id = DeviceId::from("pump-1");
        for command in [Command::On, Command::Off, Command::On] {
            log.record(ActionRecord::manual(id.clone(), command))
                .await
                .unwrap();
        }
        log.record(ActionRecord::manual(DeviceId::from("pump-2"), Command::Off))
            .await
            .unwrap();

        let recent = log.recent_for_device(&id, 2).await.unwrap();
        let commands: Vec<Command> = recent.iter().map(|a| a.command).collect();
        assert_eq!(commands, vec![Command::On, Command::Off]);
    }

    #[tokio::test]
    async fn should_reject_action_for_unknown_device() {
        let log = setup().await;
        let result = log
            .record(ActionRecord::manual(DeviceId::from("ghost"), Command::On))
            .await;
        assert!(matches!(result, Err(FarmwatchError::Storage(_))));
    }
}
