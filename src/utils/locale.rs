// src/utils/locale.rs
// Indonesian (id-ID) calendar names for customer-facing text.
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// `month` is 1-based, as returned by `Datelike::month`; anything outside 1..=12 is `None`.
pub fn month_name(month: u32) -> Option<&'static str> {
    const MONTHS: [&str; 12] = [
        "Januari", "Februari", "Maret", "April", "Mei", "Juni",
        "Juli", "Agustus", "September", "Oktober", "November", "Desember",
    ];
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTHS.get(index).copied()
}

/// Long date without the year, e.g. "Senin, 5 Mei".
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date.month()).unwrap_or_default()
    )
}

/// 24-hour clock as shown in messages, e.g. "14:30".
pub fn clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        assert_eq!(long_date(date), "Senin, 5 Mei");

        let date = NaiveDate::from_ymd_opt(2024, 8, 17).unwrap();
        assert_eq!(long_date(date), "Sabtu, 17 Agustus");
    }

    #[test]
    fn test_month_edges() {
        assert_eq!(month_name(1), Some("Januari"));
        assert_eq!(month_name(12), Some("Desember"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_every_weekday() {
        // 2025-05-05 is a Monday.
        let expected = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"];
        let monday = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        for (offset, name) in expected.iter().enumerate() {
            let date = monday + chrono::Days::new(offset as u64);
            assert_eq!(weekday_name(date.weekday()), *name);
        }
    }

    #[test]
    fn test_clock() {
        assert_eq!(clock(NaiveTime::from_hms_opt(8, 5, 59).unwrap()), "08:05");
    }
}
