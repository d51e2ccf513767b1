//! SQLite repository for containers
//!
//! Stores the type tag and encoded template as plain text; the store never
//! decodes templates.

#![allow(clippy::result_large_err)]

use crate::errors::{container_not_found, empty_container, from_rusqlite, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, Transaction};
use stencil_core::{log_op_end, log_op_error, log_op_start, Container};

const SELECT_CONTAINER: &str =
    "SELECT id, label, origin_type, template, created_at, updated_at FROM containers";

const UPSERT_CONTAINER: &str =
    "INSERT INTO containers (id, label, origin_type, template, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
     ON CONFLICT(id) DO UPDATE SET
        label = excluded.label,
        origin_type = excluded.origin_type,
        template = excluded.template,
        updated_at = excluded.updated_at";

/// SQLite repository for containers
pub struct SqliteRepo;

impl SqliteRepo {
    /// Insert or update a container
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if no origin was ever set, `Persistence` on SQLite
    /// failures.
    pub fn persist_container(conn: &Connection, container: &Container) -> Result<()> {
        log_op_start!("persist_container", container_id = %container.id);
        let start = std::time::Instant::now();

        upsert(conn, container).map_err(|e| {
            log_op_error!(
                "persist_container",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                container_id = %container.id
            );
            e
        })?;

        log_op_end!(
            "persist_container",
            duration_ms = start.elapsed().as_millis() as u64,
            container_id = %container.id
        );
        Ok(())
    }

    /// Insert or update a container within a transaction
    ///
    /// # Errors
    ///
    /// As [`SqliteRepo::persist_container`].
    pub fn persist_container_tx(tx: &Transaction, container: &Container) -> Result<()> {
        upsert(tx, container)
    }

    /// # Errors
    ///
    /// `Persistence` on SQLite failures or an unreadable row.
    pub fn get_container(conn: &Connection, container_id: &str) -> Result<Option<Container>> {
        conn.query_row(
            &format!("{} WHERE id = ?", SELECT_CONTAINER),
            [container_id],
            row_to_container,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// All containers ordered by id
    ///
    /// # Errors
    ///
    /// `Persistence` on SQLite failures.
    pub fn list_containers(conn: &Connection) -> Result<Vec<Container>> {
        query_containers(conn, &format!("{} ORDER BY id", SELECT_CONTAINER), [])
    }

    /// Containers whose origin has type tag `origin_type`, ordered by id
    ///
    /// # Errors
    ///
    /// `Persistence` on SQLite failures.
    pub fn list_by_origin_type(conn: &Connection, origin_type: &str) -> Result<Vec<Container>> {
        query_containers(
            conn,
            &format!("{} WHERE origin_type = ? ORDER BY id", SELECT_CONTAINER),
            [origin_type],
        )
    }

    /// # Errors
    ///
    /// `NotFound` if no container has `container_id`.
    pub fn delete_container(conn: &Connection, container_id: &str) -> Result<()> {
        let deleted = conn
            .execute("DELETE FROM containers WHERE id = ?", [container_id])
            .map_err(from_rusqlite)?;
        if deleted == 0 {
            return Err(container_not_found("delete_container", container_id));
        }
        tracing::debug!(container_id, "container deleted");
        Ok(())
    }
}

fn upsert(conn: &Connection, container: &Container) -> Result<()> {
    let (Some(origin_type), Some(template)) = (container.origin_type(), container.template())
    else {
        return Err(empty_container("persist_container", &container.id));
    };

    conn.execute(
        UPSERT_CONTAINER,
        rusqlite::params![
            container.id,
            container.label,
            origin_type,
            template,
            container.created_at.timestamp_millis(),
            container.updated_at.timestamp_millis(),
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

fn query_containers<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<Container>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let containers = stmt
        .query_map(params, row_to_container)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(containers)
}

fn row_to_container(row: &Row<'_>) -> rusqlite::Result<Container> {
    Ok(Container::from_parts(
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        millis_column(row, 4)?,
        millis_column(row, 5)?,
    ))
}

fn millis_column(row: &Row<'_>, index: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(index)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(index, millis))
}
