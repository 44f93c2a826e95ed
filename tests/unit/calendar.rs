use super::*;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn weekdays_roll_forward_to_sunday() {
    // 2026-10-12 is a Monday.
    assert_eq!(next_sunday(at(2026, 10, 12, 9, 0, 0)), date(2026, 10, 18));
    assert_eq!(next_sunday(at(2026, 10, 17, 23, 59, 59)), date(2026, 10, 18));
}

#[test]
fn sunday_morning_is_today() {
    assert_eq!(next_sunday(at(2026, 10, 18, 0, 0, 0)), date(2026, 10, 18));
    assert_eq!(next_sunday(at(2026, 10, 18, 12, 0, 0)), date(2026, 10, 18));
}

#[test]
fn sunday_afternoon_is_next_week() {
    assert_eq!(next_sunday(at(2026, 10, 18, 12, 0, 1)), date(2026, 10, 25));
    assert_eq!(next_sunday(at(2026, 10, 18, 20, 0, 0)), date(2026, 10, 25));
}

#[test]
fn crosses_month_and_year() {
    assert_eq!(next_sunday(at(2026, 12, 30, 10, 0, 0)), date(2027, 1, 3));
}

#[test]
fn run_name_is_iso_date() {
    assert_eq!(run_name(date(2027, 1, 3)), "2027-01-03");
    assert_eq!(default_run_name().len(), 10);
}
