//! Encrypted credential storage using SQLite.
//!
//! One row per connector: the whole credential map is serialized to JSON and
//! sealed with [`CryptoBox`] before it touches disk. The encryption key lives
//! in the same database under a well-known settings name, so any process
//! sharing the file decrypts what another process stored.

use super::encryption::{CryptoBox, KEY_SIZE};
use crate::types::Credentials;
use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use rand::RngCore;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Settings-table name under which the encryption key is persisted.
const KEY_SETTING_NAME: &str = "encryption_key";

/// Encrypted credential storage backed by SQLite.
///
/// # Schema
/// ```sql
/// CREATE TABLE hub_settings (
///     name TEXT PRIMARY KEY,
///     value TEXT NOT NULL
/// );
/// CREATE TABLE connector_credentials (
///     connector_id TEXT PRIMARY KEY,
///     payload TEXT NOT NULL,      -- base64(nonce || ciphertext+tag)
///     created_at TEXT NOT NULL,   -- ISO 8601
///     updated_at TEXT NOT NULL    -- ISO 8601
/// );
/// ```
///
/// # Thread safety
/// The connection is wrapped in a Mutex; SQLite serializes the rest.
pub struct CredentialStore {
    conn: Mutex<Connection>,
    crypto: CryptoBox,
}

impl CredentialStore {
    /// Creates or opens a credential store.
    ///
    /// `key_override` is an externally-injected base64 key (typically from
    /// the environment). It is only consulted when the database has no
    /// persisted key yet; once a key is stored, it wins.
    pub fn open<P: AsRef<Path>>(db_path: P, key_override: Option<&str>) -> Result<Self> {
        let conn = Connection::open(db_path).context("Failed to open database")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS hub_settings (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create settings table")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS connector_credentials (
                connector_id TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create credentials table")?;

        let key = load_or_create_key(&conn, key_override)?;

        Ok(Self {
            conn: Mutex::new(conn),
            crypto: CryptoBox::new(&key),
        })
    }

    /// Stores credentials for a connector, replacing any existing row.
    pub fn store(&self, connector_id: &str, credentials: &Credentials) -> Result<()> {
        let payload = serde_json::to_string(credentials)
            .context("Failed to serialize credentials")?;
        let sealed = self
            .crypto
            .encrypt(&payload)
            .context("Failed to encrypt credentials")?;
        let now = Utc::now().to_rfc3339();

        self.conn
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO connector_credentials (connector_id, payload, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(connector_id) DO UPDATE SET
                     payload = excluded.payload,
                     updated_at = excluded.updated_at",
                params![connector_id, sealed, now, now],
            )
            .context("Failed to store credentials")?;

        Ok(())
    }

    /// Retrieves and decrypts credentials for a connector.
    ///
    /// Returns `Ok(None)` when nothing is stored; decryption failures
    /// (tampered row, wrong key) surface as errors, never partial data.
    pub fn get(&self, connector_id: &str) -> Result<Option<Credentials>> {
        let sealed: Option<String> = self
            .conn
            .lock()
            .unwrap()
            .query_row(
                "SELECT payload FROM connector_credentials WHERE connector_id = ?1",
                params![connector_id],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to query credentials")?;

        let Some(sealed) = sealed else {
            return Ok(None);
        };

        let payload = self
            .crypto
            .decrypt(&sealed)
            .context("Failed to decrypt credentials")?;
        let credentials =
            serde_json::from_str(&payload).context("Failed to parse credential payload")?;
        Ok(Some(credentials))
    }

    /// Deletes stored credentials. Returns whether a row was removed.
    pub fn delete(&self, connector_id: &str) -> Result<bool> {
        let rows = self
            .conn
            .lock()
            .unwrap()
            .execute(
                "DELETE FROM connector_credentials WHERE connector_id = ?1",
                params![connector_id],
            )
            .context("Failed to delete credentials")?;
        Ok(rows > 0)
    }

    /// Connector ids with stored credentials, ordered by id.
    pub fn list(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT connector_id FROM connector_credentials ORDER BY connector_id")
            .context("Failed to prepare query")?;
        let ids = stmt
            .query_map([], |row| row.get(0))
            .context("Failed to list credentials")?
            .collect::<Result<Vec<String>, _>>()
            .context("Failed to read results")?;
        Ok(ids)
    }
}

/// Reads the persisted encryption key, or establishes one.
///
/// Precedence: persisted key → external override → freshly generated random
/// key (persisted immediately). Idempotent across calls and across processes
/// sharing the database — a key is never regenerated once stored.
fn load_or_create_key(
    conn: &Connection,
    key_override: Option<&str>,
) -> Result<[u8; KEY_SIZE]> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM hub_settings WHERE name = ?1",
            params![KEY_SETTING_NAME],
            |row| row.get(0),
        )
        .optional()
        .context("Failed to read encryption key")?;

    if let Some(encoded) = stored {
        return decode_key(&encoded).context("Persisted encryption key is invalid");
    }

    let key = match key_override {
        Some(encoded) => {
            let key = decode_key(encoded).context("Injected encryption key is invalid")?;
            info!("Using externally provided encryption key");
            key
        }
        None => {
            let mut key = [0u8; KEY_SIZE];
            rand::rngs::OsRng.fill_bytes(&mut key);
            info!("Generated new credential encryption key");
            key
        }
    };

    conn.execute(
        "INSERT INTO hub_settings (name, value) VALUES (?1, ?2)",
        params![KEY_SETTING_NAME, BASE64.encode(key)],
    )
    .context("Failed to persist encryption key")?;

    Ok(key)
}

fn decode_key(encoded: &str) -> Result<[u8; KEY_SIZE]> {
    let bytes = BASE64.decode(encoded).context("Key is not valid base64")?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow!("Key must be {} bytes, got {}", KEY_SIZE, bytes.len()))
}
