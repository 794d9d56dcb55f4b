//! Per-test PostgreSQL databases in a shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool, postgres::PgPoolOptions};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

const USER: &str = "roomkeeper_test";
const PASSWORD: &str = "roomkeeper_test_password";

/// Database names are interpolated into DDL, so only plain identifiers are allowed.
fn validate_database_name(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() > 63 {
        return Err("database name must be 1-63 characters long".to_string());
    }

    if !name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    {
        return Err("database name must start with a letter or underscore".to_string());
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("database name can only contain letters, digits and underscores".to_string());
    }

    Ok(())
}

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_tag("17-alpine")
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name("roomkeeper_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

/// Started once and shared by every test in the binary.
static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

static CLEANUP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn init_cleanup_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(db_name) = receiver.recv().await {
            if let Err(err) = drop_database(&db_name).await {
                eprintln!("Failed to drop test database '{db_name}': {err}");
            }
        }
    });

    sender
}

async fn server_url(database: &str) -> Option<String> {
    let container = POSTGRES_CONTAINER.get()?;
    let port = container.get_host_port_ipv4(5432).await.ok()?;
    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    Some(format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/{database}"))
}

async fn drop_database(db_name: &str) -> Result<(), sqlx::Error> {
    if validate_database_name(db_name).is_err() {
        return Ok(());
    }

    let Some(url) = server_url("postgres").await else {
        return Ok(());
    };

    let mut conn = PgConnection::connect(&url).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// A freshly migrated database owned by one test.
///
/// Services commit their own transactions, so isolation comes from every test
/// getting its own database. The database is dropped in the background when the
/// `TestDb` goes out of scope.
#[derive(Debug)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = CLEANUP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("System clock is before the Unix epoch")
            .as_nanos();

        let thread_id = std::thread::current().id();

        let name =
            format!("roomkeeper_test_{nanos}_{thread_id:?}").replace([':', ' ', '(', ')'], "");

        Self::new_with_db_name(&name).await
    }

    pub async fn new_with_db_name(db_name: &str) -> Self {
        CLEANUP_SENDER.get_or_init(init_cleanup_task).await;

        if let Err(error) = validate_database_name(db_name) {
            panic!("Invalid database name '{db_name}': {error}");
        }

        POSTGRES_CONTAINER
            .get_or_init(init_postgres_container)
            .await;

        let admin_url = server_url("postgres")
            .await
            .expect("Failed to resolve container address");

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let database_url = server_url(db_name)
            .await
            .expect("Failed to resolve container address");

        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(&database_url)
            .await
            .expect("Failed to create pool for database");

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self {
            pool,
            name: db_name.to_string(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_names_are_plain_identifiers() {
        assert!(validate_database_name("roomkeeper_test_1").is_ok());
        assert!(validate_database_name("_leading_underscore").is_ok());

        assert!(validate_database_name("").is_err());
        assert!(validate_database_name(&"a".repeat(64)).is_err());
        assert!(validate_database_name("1starts_with_digit").is_err());
        assert!(validate_database_name("has-hyphen").is_err());
        assert!(validate_database_name("quote\"d").is_err());
    }

    #[tokio::test]
    async fn migrations_create_the_booking_schema() {
        let test_db = TestDb::new().await;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = 'bookings_no_overlap')",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("Failed to query catalog");

        assert!(exists);
    }
}
