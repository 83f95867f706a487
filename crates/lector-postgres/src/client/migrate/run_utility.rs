use diesel::migration::MigrationSource;
use diesel::pg::Pg;
use diesel::sql_query;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use super::MigrationStatus;
use crate::{MIGRATIONS, PgError, PgResult, TRACING_TARGET_MIGRATION};

const MIGRATION_TABLE: &str = "__diesel_schema_migrations";

#[derive(diesel::QueryableByName)]
struct ExistsRow {
    #[diesel(sql_type = diesel::sql_types::Bool)]
    exists: bool,
}

#[derive(diesel::QueryableByName)]
struct VersionRow {
    #[diesel(sql_type = diesel::sql_types::Text)]
    version: String,
}

/// Returns versions of all embedded migrations, oldest first.
fn embedded_versions() -> PgResult<Vec<String>> {
    let migrations = MigrationSource::<Pg>::migrations(&MIGRATIONS).map_err(PgError::Migration)?;
    let mut versions: Vec<String> = migrations
        .iter()
        .map(|m| m.name().version().to_string())
        .collect();
    versions.sort();
    Ok(versions)
}

async fn migration_table_exists(conn: &mut AsyncPgConnection) -> PgResult<bool> {
    let row: ExistsRow = sql_query(format!(
        "SELECT EXISTS (SELECT FROM information_schema.tables WHERE table_name = '{MIGRATION_TABLE}') AS exists"
    ))
    .get_result(conn)
    .await?;

    Ok(row.exists)
}

/// Compares embedded migrations against the applied ones.
#[tracing::instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn get_migration_status(conn: &mut AsyncPgConnection) -> PgResult<MigrationStatus> {
    let applied = get_applied_migrations(conn).await?;
    let pending: Vec<String> = embedded_versions()?
        .into_iter()
        .filter(|version| !applied.contains(version))
        .collect();

    let status = MigrationStatus::new(applied, pending);
    tracing::debug!(
        target: TRACING_TARGET_MIGRATION,
        applied = status.applied_migrations(),
        pending = status.pending_migrations(),
        "migration status retrieved"
    );

    Ok(status)
}

/// Fails unless the migration table exists and no embedded migration is pending.
#[tracing::instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn verify_schema_integrity(conn: &mut AsyncPgConnection) -> PgResult<()> {
    if !migration_table_exists(conn).await? {
        tracing::warn!(
            target: TRACING_TARGET_MIGRATION,
            "migration table is missing, database is not initialized"
        );
        return Err(PgError::Migration(
            format!("migration table {MIGRATION_TABLE} does not exist").into(),
        ));
    }

    let status = get_migration_status(conn).await?;
    if let Some(next) = status.next_pending_version() {
        return Err(PgError::Migration(
            format!("{} migrations pending, next is {next}", status.pending_migrations()).into(),
        ));
    }

    Ok(())
}

/// Lists applied migration versions, oldest first.
///
/// Returns an empty list on a database that has never been migrated.
#[tracing::instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn get_applied_migrations(conn: &mut AsyncPgConnection) -> PgResult<Vec<String>> {
    if !migration_table_exists(conn).await? {
        return Ok(Vec::new());
    }

    let rows: Vec<VersionRow> =
        sql_query(format!("SELECT version FROM {MIGRATION_TABLE} ORDER BY version"))
            .get_results(conn)
            .await?;

    Ok(rows.into_iter().map(|row| row.version).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_migrations_are_discovered() {
        let versions = embedded_versions().expect("embedded migrations should load");
        assert!(!versions.is_empty());
        assert!(versions.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
