use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// `YYYYMMDDHHMMSS`, second resolution.
pub const SERIAL_FORMAT: &str = "%Y%m%d%H%M%S";

pub fn serial_at<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format(SERIAL_FORMAT).to_string()
}

/// Serial for a zone generated now, in local time. Two runs within the same
/// second get the same serial.
pub fn current_serial() -> String {
    serial_at(&Local::now())
}
