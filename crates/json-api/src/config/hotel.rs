//! Hotel Config

use clap::Args;
use jiff::tz::TimeZone;

/// Property settings.
#[derive(Debug, Args)]
pub struct HotelConfig {
    /// IANA time zone used to decide the current calendar day
    #[arg(long, env = "HOTEL_TIME_ZONE", default_value = "UTC")]
    pub time_zone: String,
}

impl HotelConfig {
    /// Resolve the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not in the time zone database.
    pub fn resolve_time_zone(&self) -> Result<TimeZone, jiff::Error> {
        TimeZone::get(&self.time_zone)
    }
}
