//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db},
    domain::{
        bookings::{BookingsService, PgBookingsService},
        maintenance::{MaintenanceService, PgMaintenanceService},
        reviews::PgReviewStore,
        rooms::{PgRoomsService, RoomsService},
    },
    notifications::{LogNotifier, Notifier, NotifierError, SmtpNotifier, SmtpSettings},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),

    #[error("failed to configure the mail transport")]
    Notifier(#[source] NotifierError),
}

/// Options that shape the context beyond the database connection.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Apply pending migrations on start-up.
    pub migrate: bool,

    /// Deliver invoices over SMTP; invoices are only logged when absent.
    pub smtp: Option<SmtpSettings>,
}

#[derive(Clone)]
pub struct AppContext {
    pub rooms: Arc<dyn RoomsService>,
    pub bookings: Arc<dyn BookingsService>,
    pub maintenance: Arc<dyn MaintenanceService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection, migrating, or
    /// configuring the mail transport fails.
    pub async fn from_database_url(url: &str, options: AppOptions) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if options.migrate {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;

            info!("database migrations applied");
        }

        let notifier: Arc<dyn Notifier> = match options.smtp {
            Some(settings) => Arc::new(SmtpNotifier::new(settings).map_err(AppInitError::Notifier)?),
            None => Arc::new(LogNotifier),
        };

        let db = Db::new(pool.clone());

        Ok(Self {
            rooms: Arc::new(PgRoomsService::new(
                db.clone(),
                Arc::new(PgReviewStore::new(pool)),
            )),
            bookings: Arc::new(PgBookingsService::new(db.clone(), notifier)),
            maintenance: Arc::new(PgMaintenanceService::new(db)),
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
