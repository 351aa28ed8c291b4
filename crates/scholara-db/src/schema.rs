//! Schema definitions and migration runner for SurrealDB.
//!
//! `scholarship` is SCHEMALESS because its documents come from an
//! external scraper whose shape drifts; only the insertion timestamp is
//! enforced. `user_profile` is SCHEMAFULL and owns the unique email
//! index.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "scholarship",
        sql: SCHOLARSHIP_DDL,
    },
    Migration {
        version: 2,
        name: "user_profile",
        sql: USER_PROFILE_DDL,
    },
];

const SCHOLARSHIP_DDL: &str = "\
DEFINE TABLE scholarship SCHEMALESS;
DEFINE FIELD created_at ON TABLE scholarship TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_scholarship_created_at ON TABLE scholarship \
    COLUMNS created_at;
";

const USER_PROFILE_DDL: &str = "\
DEFINE TABLE user_profile SCHEMAFULL;
DEFINE FIELD name ON TABLE user_profile TYPE string;
DEFINE FIELD email_id ON TABLE user_profile TYPE string;
DEFINE FIELD password_hash ON TABLE user_profile TYPE string;
DEFINE FIELD course ON TABLE user_profile TYPE option<string>;
DEFINE FIELD location ON TABLE user_profile TYPE option<string>;
DEFINE FIELD citizenship ON TABLE user_profile TYPE option<string>;
DEFINE FIELD degree_level ON TABLE user_profile TYPE option<string>;
DEFINE FIELD start_date ON TABLE user_profile TYPE option<string>;
DEFINE FIELD income_status ON TABLE user_profile TYPE option<string>;
DEFINE FIELD current_status ON TABLE user_profile TYPE option<string>;
DEFINE FIELD categories ON TABLE user_profile TYPE array<string> \
    DEFAULT [];
DEFINE FIELD interests ON TABLE user_profile TYPE array<string> \
    DEFAULT [];
DEFINE FIELD recommended_scholarships ON TABLE user_profile \
    TYPE array<string> DEFAULT [];
DEFINE FIELD created_at ON TABLE user_profile TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user_profile TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_profile_email ON TABLE user_profile \
    COLUMNS email_id UNIQUE;
";

/// Apply every migration newer than the recorded schema version.
///
/// Safe to call on every startup.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS
        .iter()
        .filter(|m| m.version > current_version)
    {
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "v{} '{}' failed: {}",
                migration.version, migration.name, e,
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "could not record v{}: {}",
                    migration.version, e,
                ))
            })?;
    }

    Ok(())
}
