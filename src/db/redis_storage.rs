use std::{sync::Mutex, time::Duration};

use redis::{Client, Commands, Connection, ConnectionLike, RedisResult};

use super::Storage;
use crate::error::{AppError, AppResult};

type Connector<C> = Box<dyn Fn() -> RedisResult<C> + Send + Sync>;

/// Storage slots kept as plain Redis string keys
///
/// Lets several server processes share favorites, history and settings.
/// Concurrent writers from different processes are last-write-wins.
///
/// One connection is reused across commands. A command that fails drops it, and the
/// next command reconnects.
pub struct RedisStorage<C = Connection> {
    connector: Connector<C>,
    connection: Mutex<Option<C>>,
}

impl RedisStorage<Connection> {
    /// Creates the client; no connection is made until the first command.
    ///
    /// `timeout` bounds connecting as well as every read and write.
    pub fn open(redis_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::open(redis_url)?;

        Ok(Self::with_connector(move || {
            let conn = client.get_connection_with_timeout(timeout)?;
            conn.set_read_timeout(Some(timeout))?;
            conn.set_write_timeout(Some(timeout))?;
            Ok(conn)
        }))
    }
}

impl<C: ConnectionLike + Send> RedisStorage<C> {
    pub fn with_connector(
        connector: impl Fn() -> RedisResult<C> + Send + Sync + 'static,
    ) -> Self {
        Self {
            connector: Box::new(connector),
            connection: Mutex::new(None),
        }
    }

    /// Runs `command` on the cached connection, connecting first when there is none
    fn run<T>(&self, command: impl FnOnce(&mut C) -> RedisResult<T>) -> AppResult<T> {
        let mut slot = self
            .connection
            .lock()
            .map_err(|_| AppError::Storage("redis connection lock poisoned".to_string()))?;

        let mut conn = match slot.take() {
            Some(conn) => conn,
            None => (self.connector)()?,
        };

        let result = command(&mut conn);
        match &result {
            Ok(_) => *slot = Some(conn),
            Err(e) => tracing::warn!(error = %e, "Redis command failed, dropping connection"),
        }

        Ok(result?)
    }
}

impl<C: ConnectionLike + Send> Storage for RedisStorage<C> {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.run(|conn| conn.get(key))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.run(|conn| conn.set(key, value))
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.run(|conn| conn.del(key))
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
