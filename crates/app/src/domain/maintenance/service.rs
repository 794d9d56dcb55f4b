//! Maintenance service.

use async_trait::async_trait;
use jiff::{Timestamp, civil::Date};
use mockall::automock;
use tracing::{debug, error, info};

use crate::{
    database::Db,
    domain::maintenance::{
        data::{Sweep, TickReport},
        errors::MaintenanceServiceError,
        repository::PgMaintenanceRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgMaintenanceService {
    db: Db,
    repository: PgMaintenanceRepository,
}

impl PgMaintenanceService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgMaintenanceRepository::new(),
        }
    }
}

#[async_trait]
impl MaintenanceService for PgMaintenanceService {
    #[tracing::instrument(name = "maintenance.service.promote_refunds", skip(self), err)]
    async fn promote_refunds(&self, now: Timestamp) -> Result<u64, MaintenanceServiceError> {
        let mut tx = self.db.begin().await?;

        let promoted = self.repository.promote_refunds(&mut tx, now).await?;

        tx.commit().await?;

        Ok(promoted)
    }

    #[tracing::instrument(name = "maintenance.service.complete_bookings", skip(self), err)]
    async fn complete_bookings(&self, today: Date) -> Result<u64, MaintenanceServiceError> {
        let mut tx = self.db.begin().await?;

        let completed = self.repository.complete_bookings(&mut tx, today).await?;

        tx.commit().await?;

        Ok(completed)
    }

    #[tracing::instrument(name = "maintenance.service.purge_expired_otps", skip(self), err)]
    async fn purge_expired_otps(&self, now: Timestamp) -> Result<u64, MaintenanceServiceError> {
        let mut tx = self.db.begin().await?;

        let purged = self.repository.purge_expired_otps(&mut tx, now).await?;

        tx.commit().await?;

        Ok(purged)
    }

    async fn run_tick(&self, now: Timestamp, today: Date) -> TickReport {
        let mut report = TickReport::default();

        let refunds = self.promote_refunds(now).await;
        report.refunds_completed = record(&mut report, Sweep::RefundPromotion, refunds);

        let bookings = self.complete_bookings(today).await;
        report.bookings_completed = record(&mut report, Sweep::BookingCompletion, bookings);

        let otps = self.purge_expired_otps(now).await;
        report.otps_purged = record(&mut report, Sweep::OtpPurge, otps);

        if report.total() > 0 {
            info!(
                refunds_completed = report.refunds_completed,
                bookings_completed = report.bookings_completed,
                otps_purged = report.otps_purged,
                "maintenance tick applied changes"
            );
        } else {
            debug!("maintenance tick found nothing to do");
        }

        report
    }
}

fn record(report: &mut TickReport, sweep: Sweep, result: Result<u64, MaintenanceServiceError>) -> u64 {
    match result {
        Ok(rows) => rows,
        Err(error) => {
            error!(sweep = %sweep, error = %error, "maintenance sweep failed");

            report.failed.push(sweep);

            0
        }
    }
}

#[automock]
#[async_trait]
pub trait MaintenanceService: Send + Sync {
    /// Complete approved refunds once their two-day processing delay has passed.
    async fn promote_refunds(&self, now: Timestamp) -> Result<u64, MaintenanceServiceError>;

    /// Complete confirmed bookings whose check-out is on or before `today`.
    async fn complete_bookings(&self, today: Date) -> Result<u64, MaintenanceServiceError>;

    /// Delete one-time passwords that expired before `now`.
    async fn purge_expired_otps(&self, now: Timestamp) -> Result<u64, MaintenanceServiceError>;

    /// Run every sweep in its own transaction. A failing sweep is logged and
    /// does not stop the others.
    async fn run_tick(&self, now: Timestamp, today: Date) -> TickReport;
}

#[cfg(test)]
mod tests {
    use jiff::{ToSpan, civil::date, tz::TimeZone};
    use roomkeeper::{status::BookingStatus, stay::Stay};
    use testresult::TestResult;

    use crate::test::{TestContext, helpers};

    use super::*;

    fn noon_utc(day: Date) -> Result<Timestamp, jiff::Error> {
        Ok(day.at(12, 0, 0, 0).to_zoned(TimeZone::UTC)?.timestamp())
    }

    #[tokio::test]
    async fn refunds_are_promoted_after_two_days() -> TestResult {
        let ctx = TestContext::new().await;
        let room = helpers::create_room(&ctx, 101, 1000, 2, 0).await?;
        let guest = helpers::create_guest(&ctx, "refund@example.com").await?;
        let booking = helpers::insert_booking(
            &ctx,
            guest,
            room,
            Stay::new(date(2026, 1, 10), date(2026, 1, 12))?,
            "cancelled",
        )
        .await?;

        helpers::insert_refund_at(&ctx, booking, noon_utc(date(2026, 1, 1))?).await?;

        let one_day = ctx
            .maintenance
            .promote_refunds(noon_utc(date(2026, 1, 2))?)
            .await?;

        assert_eq!(one_day, 0);

        let two_days = ctx
            .maintenance
            .promote_refunds(date(2026, 1, 3).at(0, 0, 1, 0).to_zoned(TimeZone::UTC)?.timestamp())
            .await?;

        assert_eq!(two_days, 1);
        assert_eq!(helpers::refund_status(&ctx, booking).await?, "completed");

        let again = ctx
            .maintenance
            .promote_refunds(noon_utc(date(2026, 1, 10))?)
            .await?;

        assert_eq!(again, 0);

        Ok(())
    }

    #[tokio::test]
    async fn bookings_complete_on_check_out_with_history() -> TestResult {
        let ctx = TestContext::new().await;
        let room = helpers::create_room(&ctx, 102, 1000, 2, 0).await?;
        let guest = helpers::create_guest(&ctx, "complete@example.com").await?;

        let departing = helpers::insert_booking(
            &ctx,
            guest,
            room,
            Stay::new(date(2026, 1, 8), date(2026, 1, 10))?,
            "confirmed",
        )
        .await?;

        let staying = helpers::insert_booking(
            &ctx,
            guest,
            room,
            Stay::new(date(2026, 1, 10), date(2026, 1, 12))?,
            "confirmed",
        )
        .await?;

        let completed = ctx.maintenance.complete_bookings(date(2026, 1, 10)).await?;

        assert_eq!(completed, 1);
        assert_eq!(
            helpers::booking_status(&ctx, departing).await?,
            BookingStatus::Completed
        );
        assert_eq!(
            helpers::booking_status(&ctx, staying).await?,
            BookingStatus::Confirmed
        );
        assert_eq!(helpers::count_booking_status_history(&ctx, departing).await?, 1);

        assert_eq!(ctx.maintenance.complete_bookings(date(2026, 1, 10)).await?, 0);
        assert_eq!(helpers::count_booking_status_history(&ctx, departing).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn expired_otps_are_purged() -> TestResult {
        let ctx = TestContext::new().await;
        let now = noon_utc(date(2026, 1, 1))?;

        helpers::insert_otp(&ctx, "old@example.com", now.checked_sub(1.minute())?).await?;
        helpers::insert_otp(&ctx, "fresh@example.com", now.checked_add(5.minutes())?).await?;

        assert_eq!(ctx.maintenance.purge_expired_otps(now).await?, 1);
        assert_eq!(helpers::count_otps(&ctx).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn run_tick_reports_each_sweep() -> TestResult {
        let ctx = TestContext::new().await;
        let room = helpers::create_room(&ctx, 103, 1000, 2, 0).await?;
        let guest = helpers::create_guest(&ctx, "tick@example.com").await?;
        let today = date(2026, 1, 20);
        let now = noon_utc(today)?;

        helpers::insert_booking(
            &ctx,
            guest,
            room,
            Stay::new(date(2026, 1, 15), date(2026, 1, 18))?,
            "confirmed",
        )
        .await?;

        helpers::insert_otp(&ctx, "tick@example.com", now.checked_sub(1.hour())?).await?;

        let report = ctx.maintenance.run_tick(now, today).await;

        assert!(report.is_clean());
        assert_eq!(report.bookings_completed, 1);
        assert_eq!(report.otps_purged, 1);
        assert_eq!(report.refunds_completed, 0);

        let second = ctx.maintenance.run_tick(now, today).await;

        assert_eq!(second.total(), 0);

        Ok(())
    }
}
