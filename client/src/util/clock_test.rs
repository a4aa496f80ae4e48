use super::*;

#[test]
fn today_matches_input_format() {
    let today = today_iso();
    assert_eq!(today.len(), 10);
    assert_eq!(today.as_bytes()[4], b'-');
    assert_eq!(today.as_bytes()[7], b'-');
}

#[test]
fn native_clock_is_past_the_epoch() {
    assert!(now_utc().year() >= 2025);
}
