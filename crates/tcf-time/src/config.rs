//! Time extension configuration

use jiff::tz::TimeZone;
use jiff::Unit;

/// en-US `toLocaleString` shape, e.g. `1/2/2024, 3:04:05 PM`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Time extension configuration
#[derive(Clone, Debug)]
pub struct TimeEngineConfig {
    /// Zone used for relative date text and for displaying instants
    pub time_zone: TimeZone,
    /// strftime pattern for instants
    pub timestamp_format: String,
    /// Coarsest unit a duration is balanced into before display
    pub duration_largest_unit: Unit,
}

impl Default for TimeEngineConfig {
    fn default() -> Self {
        TimeEngineConfig {
            time_zone: TimeZone::system(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            duration_largest_unit: Unit::Year,
        }
    }
}

impl TimeEngineConfig {
    /// Configuration pinned to UTC, independent of the host machine
    pub fn utc() -> Self {
        TimeEngineConfig {
            time_zone: TimeZone::UTC,
            ..TimeEngineConfig::default()
        }
    }
}
