//! Clock-time resolution for message lines.
//!
//! Mobile exports write a 12-hour clock prefixed with a meridiem marker
//! (`上午09:46`, `下午12:05`); desktop exports write a bare 24-hour clock
//! (`17:22`). Both are combined with the date of the most recent date
//! header.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Meridiem marker preceding a 12-hour clock value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    /// `上午`, before noon.
    Morning,
    /// `下午`, after noon.
    Afternoon,
}

impl Meridiem {
    /// Parses the marker text used in exports.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "上午" => Some(Meridiem::Morning),
            "下午" => Some(Meridiem::Afternoon),
            _ => None,
        }
    }

    /// Returns the marker as written in exports.
    pub fn marker(self) -> &'static str {
        match self {
            Meridiem::Morning => "上午",
            Meridiem::Afternoon => "下午",
        }
    }

    /// Converts a 12-hour clock hour to a 24-hour one.
    pub fn to_24_hour(self, hour: u32) -> u32 {
        match (self, hour) {
            (Meridiem::Afternoon, 12) => 12,
            (Meridiem::Afternoon, h) => h + 12,
            (Meridiem::Morning, 12) => 0,
            (Meridiem::Morning, h) => h,
        }
    }
}

/// Combines a calendar date with a clock value.
///
/// Seconds and sub-seconds are always zero. Hour and minute are not range
/// checked: values past the end of the day roll over by plain duration
/// arithmetic from midnight, so `25:70` on March 31 is April 1, 02:10.
///
/// ```
/// use chrono::NaiveDate;
/// use linechat::parsing::timestamp::{Meridiem, resolve};
///
/// let day = NaiveDate::from_ymd_opt(2022, 3, 31).unwrap();
/// let ts = resolve(day, Some(Meridiem::Afternoon), 3, 5);
/// assert_eq!(ts.to_string(), "2022-03-31 15:05:00");
/// ```
pub fn resolve(date: NaiveDate, meridiem: Option<Meridiem>, hour: u32, minute: u32) -> NaiveDateTime {
    let hour = meridiem.map_or(hour, |m| m.to_24_hour(hour));
    date.and_time(NaiveTime::MIN)
        + TimeDelta::hours(i64::from(hour))
        + TimeDelta::minutes(i64::from(minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 3, 31).unwrap()
    }

    fn hm(ts: NaiveDateTime) -> (String, String) {
        (ts.format("%Y-%m-%d").to_string(), ts.format("%H:%M:%S").to_string())
    }

    #[test]
    fn test_meridiem_from_marker() {
        assert_eq!(Meridiem::from_marker("上午"), Some(Meridiem::Morning));
        assert_eq!(Meridiem::from_marker("下午"), Some(Meridiem::Afternoon));
        assert_eq!(Meridiem::from_marker("AM"), None);
        assert_eq!(Meridiem::Morning.marker(), "上午");
    }

    #[test]
    fn test_morning() {
        let ts = resolve(day(), Some(Meridiem::Morning), 9, 46);
        assert_eq!(hm(ts).1, "09:46:00");
    }

    #[test]
    fn test_midnight_is_morning_twelve() {
        let ts = resolve(day(), Some(Meridiem::Morning), 12, 15);
        assert_eq!(hm(ts), ("2022-03-31".into(), "00:15:00".into()));
    }

    #[test]
    fn test_noon_is_afternoon_twelve() {
        let ts = resolve(day(), Some(Meridiem::Afternoon), 12, 0);
        assert_eq!(hm(ts).1, "12:00:00");
    }

    #[test]
    fn test_afternoon_adds_twelve() {
        let ts = resolve(day(), Some(Meridiem::Afternoon), 11, 59);
        assert_eq!(hm(ts).1, "23:59:00");
    }

    #[test]
    fn test_24_hour_unmodified() {
        let ts = resolve(day(), None, 17, 22);
        assert_eq!(hm(ts).1, "17:22:00");
        let ts = resolve(day(), None, 0, 5);
        assert_eq!(hm(ts).1, "00:05:00");
    }

    #[test]
    fn test_out_of_range_rolls_over() {
        let ts = resolve(day(), None, 25, 70);
        assert_eq!(hm(ts), ("2022-04-01".into(), "02:10:00".into()));

        let ts = resolve(day(), None, 9, 60);
        assert_eq!(hm(ts), ("2022-03-31".into(), "10:00:00".into()));
    }
}
