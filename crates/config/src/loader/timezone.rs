//! Process time zone export.
//!
//! After a settings source is loaded, the configured `TIME_ZONE` is written to
//! the `TZ` environment variable on Unix hosts and applied with `tzset(3)`, so
//! that local-time conversions in the process follow the settings. Other
//! platforms are left untouched.

use tracing::debug;

use crate::constants::TIME_ZONE_VARIABLE;

/// Whether this platform honours `TZ` for local time.
pub(crate) const TIME_ZONE_SUPPORTED: bool = cfg!(unix);

#[cfg(unix)]
unsafe extern "C" {
    fn tzset();
}

/// Set `TZ` to `time_zone` and re-initialise the C library's local time zone.
///
/// Callers must ensure no other thread reads or writes the process
/// environment while this runs.
#[cfg(unix)]
pub(crate) fn export_time_zone(time_zone: &str) {
    debug!(time_zone = %time_zone, "Exporting settings time zone to TZ");
    // SAFETY: `SettingsLoader::load` documents that it mutates the process
    // environment when time zone export is enabled; callers must not touch
    // the environment from other threads concurrently.
    unsafe {
        std::env::set_var(TIME_ZONE_VARIABLE, time_zone);
        tzset();
    }
}

#[cfg(not(unix))]
pub(crate) fn export_time_zone(time_zone: &str) {
    debug!(
        time_zone = %time_zone,
        var = TIME_ZONE_VARIABLE,
        "Time zone export not supported on this platform"
    );
}
