//! Database schema command handlers.

use super::commands::DbCommands;
use trailcall::{
    ConfigError, DatabaseError, DatabaseErrorKind, TrailcallConfig, TrailcallResult,
    establish_pool, reset_database, run_migrations,
};

/// Handle database commands.
pub async fn handle_db_command(cmd: DbCommands, config: &TrailcallConfig) -> TrailcallResult<()> {
    let url = config
        .database()
        .resolved_url()
        .ok_or_else(|| ConfigError::new("database.url is not set and DATABASE_URL is missing"))?;
    let pool = establish_pool(&url, 1)?;
    let mut conn = pool
        .get()
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;

    match cmd {
        DbCommands::Migrate => {
            let applied = run_migrations(&mut conn)?;
            println!("Applied {} migrations", applied);
        }
        DbCommands::Reset { yes } => {
            if !yes {
                eprintln!("Refusing to reset without --yes; this deletes all data");
                std::process::exit(1);
            }
            reset_database(&mut conn)?;
            println!("Database reset");
        }
    }
    Ok(())
}
