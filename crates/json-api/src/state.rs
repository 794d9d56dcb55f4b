//! State

use std::sync::Arc;

use jiff::{Timestamp, civil::Date, tz::TimeZone};

use roomkeeper_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    time_zone: TimeZone,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, time_zone: TimeZone) -> Self {
        Self { app, time_zone }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, time_zone: TimeZone) -> Arc<Self> {
        Arc::new(Self::new(app, time_zone))
    }

    /// The current calendar day at the hotel.
    pub(crate) fn today(&self) -> Date {
        Timestamp::now().to_zoned(self.time_zone.clone()).date()
    }
}
