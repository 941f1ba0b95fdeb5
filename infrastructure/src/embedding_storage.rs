use domain::models::EmbeddingVector;
use rusqlite::{params, Connection, OptionalExtension, Result as SqlResult};
use shared::types::Result;
use std::path::Path;

/// SQLite-backed snapshots of FAQ embedding caches, keyed by corpus fingerprint.
pub struct EmbeddingStorage {
    conn: Connection,
}

impl EmbeddingStorage {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        Self::setup_db(&conn)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::setup_db(&conn)?;
        Ok(Self { conn })
    }

    fn setup_db(conn: &Connection) -> SqlResult<()> {
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            CREATE TABLE IF NOT EXISTS cache_snapshots (
                fingerprint TEXT PRIMARY KEY,
                model TEXT NOT NULL,
                dimension INTEGER NOT NULL,
                entries INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS snapshot_vectors (
                fingerprint TEXT NOT NULL,
                position INTEGER NOT NULL,
                vector BLOB NOT NULL,
                PRIMARY KEY (fingerprint, position)
            );
        ",
        )
    }

    /// Vectors in corpus order, or `None` when no complete snapshot exists.
    pub fn load_snapshot(&self, fingerprint: &str) -> Result<Option<Vec<EmbeddingVector>>> {
        let entries: Option<i64> = self
            .conn
            .query_row(
                "SELECT entries FROM cache_snapshots WHERE fingerprint = ?1",
                [fingerprint],
                |row| row.get(0),
            )
            .optional()?;
        let Some(entries) = entries else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT vector FROM snapshot_vectors WHERE fingerprint = ?1 ORDER BY position",
        )?;
        let mut rows = stmt.query([fingerprint])?;
        let mut vectors = Vec::new();
        while let Some(row) = rows.next()? {
            let vector_bytes: Vec<u8> = row.get(0)?;
            let vector: EmbeddingVector = serde_json::from_slice(&vector_bytes)?;
            vectors.push(vector);
        }

        if vectors.len() as i64 != entries {
            tracing::warn!(
                fingerprint,
                expected = entries,
                found = vectors.len(),
                "ignoring incomplete embedding snapshot"
            );
            return Ok(None);
        }
        Ok(Some(vectors))
    }

    pub fn save_snapshot(
        &self,
        fingerprint: &str,
        model: &str,
        vectors: &[EmbeddingVector],
    ) -> Result<()> {
        let dimension = vectors.first().map_or(0, Vec::len);
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM snapshot_vectors WHERE fingerprint = ?1",
            [fingerprint],
        )?;
        tx.execute(
            "INSERT OR REPLACE INTO cache_snapshots (fingerprint, model, dimension, entries)
             VALUES (?1, ?2, ?3, ?4)",
            params![fingerprint, model, dimension as i64, vectors.len() as i64],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO snapshot_vectors (fingerprint, position, vector) VALUES (?1, ?2, ?3)",
            )?;
            for (position, vector) in vectors.iter().enumerate() {
                let vector_bytes = serde_json::to_vec(vector)?;
                stmt.execute(params![fingerprint, position as i64, vector_bytes])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
