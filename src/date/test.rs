// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Unit tests for storm dates
*/
#[cfg(test)]
use super::*;

#[test]
fn test_new_and_accessors() {
    let date = StormDate::new(2005, 8, 29, 0, 0, 0).unwrap();
    assert_eq!(date.year(), 2005);
    assert_eq!(date.month(), 8);
    assert_eq!(date.day(), 29);
    assert_eq!(date.hour(), 0);
    assert_eq!(date.minute(), 0);
    assert_eq!(date.second(), 0);
}

#[test]
fn test_invalid_components() {
    assert!(StormDate::new(2005, 13, 1, 0, 0, 0).is_err());
    assert!(StormDate::new(2005, 2, 30, 0, 0, 0).is_err());
    assert!(StormDate::new(2005, 8, 29, 24, 0, 0).is_err());
}

#[test]
fn test_parse_atcf() {
    let date = StormDate::parse_atcf("2005082918").unwrap();
    assert_eq!(date, StormDate::new(2005, 8, 29, 18, 0, 0).unwrap());
    assert!(StormDate::parse_atcf("20050829").is_err());
    assert!(StormDate::parse_atcf("not-a-date").is_err());
}

#[test]
fn test_seconds_round_trip() {
    // every ~116 days from 1970 through 2100
    let end = StormDate::new(2100, 1, 1, 0, 0, 0).unwrap().to_seconds();
    let mut seconds: i64 = 0;
    while seconds <= end {
        let date = StormDate::from_seconds(seconds);
        assert_eq!(date.to_seconds(), seconds);
        seconds += 10_000_007;
    }

    let date = StormDate::new(2005, 8, 29, 11, 10, 9).unwrap();
    assert_eq!(StormDate::from_seconds(date.to_seconds()), date);
}

#[test]
fn test_ordering_and_difference() {
    let a = StormDate::new(2005, 8, 29, 0, 0, 0).unwrap();
    let b = StormDate::new(2005, 8, 29, 6, 0, 0).unwrap();
    assert!(a < b);
    assert_eq!(b - a, 21600);
    assert_eq!(a - b, -21600);
}

#[test]
fn test_offsets() {
    let a = StormDate::new(2005, 8, 31, 23, 0, 0).unwrap();
    let b = a.add_hours(2);
    assert_eq!(b, StormDate::new(2005, 9, 1, 1, 0, 0).unwrap());
    assert_eq!(b.add_seconds(-7200), a);
    assert_eq!(a + 3600, StormDate::new(2005, 9, 1, 0, 0, 0).unwrap());
}

#[test]
fn test_formatting() {
    let date = StormDate::new(2005, 8, 29, 6, 30, 0).unwrap();
    assert_eq!(date.format_header(), "2005082906");
    assert_eq!(date.format_record(), "200508290630");
    assert_eq!(date.to_string(), "2005-08-29 06:30:00");
}
