use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use innovation_portal::db::{ConnectionOptions, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// File-backed SQLite database that is migrated on creation and removed
/// on drop, WAL sidecar files included.
pub struct TestDb {
    name: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let _ = std::fs::remove_file(name);
        let manager = ConnectionManager::<SqliteConnection>::new(name);
        // Same pragmas as the server pool, foreign keys included.
        let pool = Pool::builder()
            .connection_customizer(Box::new(ConnectionOptions::default()))
            .build(manager)
            .expect("Failed to create test pool");

        let mut conn = pool.get().expect("Failed to get test connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run migrations");

        Self {
            name: name.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.name);
        let _ = std::fs::remove_file(format!("{}-wal", self.name));
        let _ = std::fs::remove_file(format!("{}-shm", self.name));
    }
}
