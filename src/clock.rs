//! Local date and time stamps for collected rows.

use chrono::{Local, NaiveDateTime};

/// Today's local date as `DD-MM-YYYY`.
pub fn current_date() -> String {
    format_date(&Local::now().naive_local())
}

/// The local time as `HH:MM:SS`.
pub fn current_time() -> String {
    format_time(&Local::now().naive_local())
}

pub fn format_date(at: &NaiveDateTime) -> String {
    at.format("%d-%m-%Y").to_string()
}

pub fn format_time(at: &NaiveDateTime) -> String {
    at.format("%H:%M:%S").to_string()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 3)
            .unwrap()
            .and_hms_opt(7, 5, 9)
            .unwrap()
    }

    #[test]
    fn should_format_date_day_first() {
        assert_eq!(format_date(&at()), "03-12-2025");
    }

    #[test]
    fn should_format_time_zero_padded() {
        assert_eq!(format_time(&at()), "07:05:09");
    }

    #[test]
    fn should_produce_well_formed_current_stamps() {
        let date = current_date();
        let time = current_time();

        assert_eq!(date.len(), 10);
        assert_eq!(date.matches('-').count(), 2);
        assert_eq!(time.len(), 8);
        assert_eq!(time.matches(':').count(), 2);
    }
}
