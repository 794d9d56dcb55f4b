//! Periodic maintenance driver.

use std::{sync::Arc, time::Duration};

use jiff::{Timestamp, tz::TimeZone};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::domain::maintenance::service::MaintenanceService;

/// Default period between ticks.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(60);

/// Runs [`MaintenanceService::run_tick`] on a fixed period until stopped.
pub struct MaintenanceScheduler {
    service: Arc<dyn MaintenanceService>,
    period: Duration,
    time_zone: TimeZone,
    running: Option<Running>,
}

struct Running {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl MaintenanceScheduler {
    /// `time_zone` decides which calendar day "today" is for booking completion.
    #[must_use]
    pub fn new(service: Arc<dyn MaintenanceService>, period: Duration, time_zone: TimeZone) -> Self {
        Self {
            service,
            period,
            time_zone,
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Spawn the tick loop. The first tick fires immediately. Calling `start`
    /// on a running scheduler does nothing.
    pub fn start(&mut self) {
        if self.running.is_some() {
            return;
        }

        let (stop, mut stopped) = watch::channel(false);
        let service = Arc::clone(&self.service);
        let period = self.period;
        let time_zone = self.time_zone.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);

            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            info!(period_secs = period.as_secs(), "maintenance scheduler started");

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let now = Timestamp::now();
                        let today = now.to_zoned(time_zone.clone()).date();
                        let report = service.run_tick(now, today).await;

                        if !report.is_clean() {
                            warn!(failed = ?report.failed, "maintenance tick had failing sweeps");
                        }
                    }
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("maintenance scheduler stopped");
        });

        self.running = Some(Running { stop, handle });
    }

    /// Signal the loop and wait for an in-flight tick to finish.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        let _ = running.stop.send(true);

        if let Err(error) = running.handle.await {
            warn!(error = %error, "maintenance scheduler task ended abnormally");
        }
    }
}

impl std::fmt::Debug for MaintenanceScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaintenanceScheduler")
            .field("period", &self.period)
            .field("time_zone", &self.time_zone)
            .field("running", &self.running.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::maintenance::{data::TickReport, service::MockMaintenanceService};

    use super::*;

    #[tokio::test]
    async fn ticks_until_stopped() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);

        let mut service = MockMaintenanceService::new();

        service.expect_run_tick().returning(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            TickReport::default()
        });

        let mut scheduler = MaintenanceScheduler::new(
            Arc::new(service),
            Duration::from_millis(10),
            TimeZone::UTC,
        );

        scheduler.start();
        assert!(scheduler.is_running());

        time::sleep(Duration::from_millis(55)).await;

        scheduler.stop().await;
        assert!(!scheduler.is_running());

        let observed = ticks.load(Ordering::SeqCst);

        assert!(observed >= 2, "expected several ticks, saw {observed}");

        time::sleep(Duration::from_millis(30)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), observed);
    }

    #[tokio::test]
    async fn stop_without_start_is_a_no_op() {
        let mut scheduler = MaintenanceScheduler::new(
            Arc::new(MockMaintenanceService::new()),
            DEFAULT_PERIOD,
            TimeZone::UTC,
        );

        scheduler.stop().await;

        assert!(!scheduler.is_running());
    }
}
