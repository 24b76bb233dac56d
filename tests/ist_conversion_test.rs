use chrono::{DateTime, TimeZone, Utc};
use ist_time::{
    iso_to_ist_iso, now_ist_iso, now_ist_iso_with, try_iso_to_ist, FixedClock, IstError,
    IST_OFFSET_SECONDS,
};

/// 空值或空白一律回傳 None
#[test]
fn test_absent_or_blank_values_are_none() {
    for value in [None, Some(""), Some(" "), Some("\t\r\n")] {
        assert_eq!(iso_to_ist_iso(value), None, "input: {value:?}");
    }
}

#[test]
fn test_documented_example() {
    assert_eq!(
        iso_to_ist_iso(Some("2024-03-10T10:00:00Z")),
        Some("2024-03-10T15:30:00+05:30".to_string())
    );
}

#[test]
fn test_z_and_zero_offset_agree() {
    let cases = [
        "2024-03-10T10:00:00",
        "1999-12-31T23:59:59",
        "2024-07-15T06:00:00.000123",
        "2024-02-29 18:29:59",
    ];

    for case in cases {
        assert_eq!(
            iso_to_ist_iso(Some(&format!("{case}Z"))),
            iso_to_ist_iso(Some(&format!("{case}+00:00"))),
            "case: {case}"
        );
    }
}

#[test]
fn test_missing_designator_means_utc() {
    assert_eq!(
        iso_to_ist_iso(Some("2024-01-01T00:00:00")).as_deref(),
        Some("2024-01-01T05:30:00+05:30")
    );
    assert_eq!(
        iso_to_ist_iso(Some("2024-01-01T00:00:00")),
        iso_to_ist_iso(Some("2024-01-01T00:00:00Z"))
    );
}

#[test]
fn test_malformed_strings_come_back_unchanged() {
    for value in [
        "not-a-date",
        "2024-99-99",
        "  12/03/2024  ",
        "Z",
        "2024-03-10T25:00:00Z",
        "2016-12-31T23:59:60Z",
    ] {
        assert_eq!(iso_to_ist_iso(Some(value)).as_deref(), Some(value));
    }
}

#[test]
fn test_ist_values_are_stable_under_renormalization() {
    for value in [
        "2024-03-10T15:30:00+05:30",
        "2024-03-10T15:30:00.500000+05:30",
        "2000-01-01T00:00:00+05:30",
    ] {
        assert_eq!(iso_to_ist_iso(Some(value)).as_deref(), Some(value));
    }
}

#[test]
fn test_instant_preserved_across_offsets() {
    let inputs = [
        "2024-03-10T10:00:00Z",
        "2024-03-10T05:00:00-05:00",
        "2024-03-10T19:00:00+09:00",
        "2024-03-10T15:30:00+05:30",
    ];

    let outputs: Vec<_> = inputs
        .iter()
        .map(|value| iso_to_ist_iso(Some(value)).unwrap())
        .collect();
    assert!(outputs.iter().all(|out| out == "2024-03-10T15:30:00+05:30"));
}

#[test]
fn test_now_has_ist_offset() {
    let before = Utc::now();
    let now = now_ist_iso();
    let after = Utc::now();

    let parsed = DateTime::parse_from_rfc3339(&now).unwrap();
    assert_eq!(parsed.offset().local_minus_utc(), IST_OFFSET_SECONDS);
    // 輸出只保留到微秒
    assert!(parsed >= before - chrono::Duration::microseconds(1));
    assert!(parsed <= after);
}

#[test]
fn test_now_with_pinned_clock() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2023, 12, 31, 18, 30, 0).unwrap());
    assert_eq!(now_ist_iso_with(&clock), "2024-01-01T00:00:00+05:30");
}

#[test]
fn test_strict_conversion_errors() {
    assert!(matches!(
        try_iso_to_ist("not-a-date"),
        Err(IstError::UnparsableTimestamp { .. })
    ));
    assert_eq!(
        try_iso_to_ist("2024-03-10T10:00:00Z").unwrap().to_rfc3339(),
        "2024-03-10T15:30:00+05:30"
    );
}

#[test]
fn test_concurrent_calls() {
    let handles: Vec<_> = (0..8)
        .map(|hour| {
            std::thread::spawn(move || {
                let input = format!("2024-03-10T{hour:02}:00:00Z");
                iso_to_ist_iso(Some(&input)).unwrap()
            })
        })
        .collect();

    for (hour, handle) in handles.into_iter().enumerate() {
        let expected = format!("2024-03-10T{:02}:30:00+05:30", hour + 5);
        assert_eq!(handle.join().unwrap(), expected);
    }
}
