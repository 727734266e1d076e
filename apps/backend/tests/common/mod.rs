//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext with a database schema of its own per test
//! - Helpers for seeding phrases and progress
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL env var).

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use chrono::NaiveDate;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tempfile::TempDir;
use uuid::Uuid;

use phrase_checkin_backend::build_router;
use phrase_checkin_backend::db::Database;
use phrase_checkin_backend::services::sessions::SessionStore;
use phrase_checkin_backend::services::uploads::UploadStore;
use phrase_checkin_backend::AppState;

/// Test context containing database connection and test router.
///
/// Each context creates a fresh PostgreSQL schema and points the pool's
/// `search_path` at it, so tests never see each other's rows.
pub struct TestContext {
    pub db: Arc<Database>,
    pub upload_dir: TempDir,
    admin: PgPool,
    schema: String,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
        let options: PgConnectOptions = database_url.parse().expect("Invalid DATABASE_URL");

        let admin = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await
            .expect("Failed to connect to test database");

        let schema = format!("test_{}", Uuid::new_v4().simple());
        sqlx::query(&format!("CREATE SCHEMA \"{}\"", schema))
            .execute(&admin)
            .await
            .expect("Failed to create test schema");

        let db = Database::connect_with(options.options([("search_path", schema.as_str())]))
            .await
            .expect("Failed to connect to test schema");

        db.init_schema().await.expect("Failed to create tables");

        let db = Arc::new(db);
        let upload_dir = TempDir::new().expect("Failed to create upload dir");

        let state = AppState {
            db: db.clone(),
            sessions: Arc::new(SessionStore::new()),
            uploads: Arc::new(UploadStore::new(upload_dir.path())),
        };

        let app = build_router(state);

        Self {
            db,
            upload_dir,
            admin,
            schema,
            app,
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Insert phrases directly, returning their ids in order.
    pub async fn seed_phrases(&self, count: usize, scene: &str) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let id = Uuid::new_v4();
            sqlx::query("INSERT INTO phrases (id, scene, en, zh) VALUES ($1, $2, $3, $4)")
                .bind(id)
                .bind(scene)
                .bind(format!("{} phrase {}", scene, i))
                .bind(format!("短语 {}", i))
                .execute(self.db.pool())
                .await
                .expect("Failed to seed phrase");
            ids.push(id);
        }
        ids
    }

    /// Set mastery for a phrase.
    pub async fn set_mastery(&self, phrase_id: Uuid, mastery: i32) {
        sqlx::query(
            r#"
            INSERT INTO progress (phrase_id, mastery, seen_count)
            VALUES ($1, $2, 1)
            ON CONFLICT (phrase_id) DO UPDATE SET mastery = EXCLUDED.mastery
            "#,
        )
        .bind(phrase_id)
        .bind(mastery)
        .execute(self.db.pool())
        .await
        .expect("Failed to set mastery");
    }

    /// Store a check-in row directly.
    pub async fn insert_checkin(&self, date: NaiveDate, done_n: i32, completed: bool) {
        sqlx::query(
            r#"
            INSERT INTO checkins (check_date, target_n, done_n, is_completed)
            VALUES ($1, 15, $2, $3)
            "#,
        )
        .bind(date)
        .bind(done_n)
        .bind(completed)
        .execute(self.db.pool())
        .await
        .expect("Failed to insert checkin");
    }

    /// Count rows in a table.
    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to count rows")
    }

    /// Drop the test schema.
    ///
    /// Call this after tests to remove test data.
    pub async fn cleanup(self) {
        self.db.pool().close().await;
        let _ = sqlx::query(&format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", self.schema))
            .execute(&self.admin)
            .await;
    }
}
