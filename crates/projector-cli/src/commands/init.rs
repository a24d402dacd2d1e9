use anyhow::Result;
use projector_core::db::establish_connection;
use std::path::Path;

/// Creates the database file if needed and applies pending migrations.
pub async fn init(database_path: &Path) -> Result<()> {
    let pool = establish_connection(database_path).await?;
    pool.close().await;

    println!("Database ready at {}", database_path.display());
    Ok(())
}
