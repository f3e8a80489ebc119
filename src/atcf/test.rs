// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Unit tests for the best-track loader and track model
*/
#[cfg(test)]
use super::*;

#[cfg(test)]
use float_cmp::approx_eq;

#[cfg(test)]
use crate::units::{convert, Length, Speed};

#[cfg(test)]
const TEST_TRACK: &str = "test_files/bal122005.dat";

#[test]
fn test_read_track() {
    let track = Track::from_file(TEST_TRACK).unwrap();
    // 9 instants; repeated lines per instant merge into one snap
    assert_eq!(track.len(), 9);

    let first = &track.snaps()[0];
    assert_eq!(first.basin, Basin::NorthAtlantic);
    assert_eq!(first.storm_id, 12);
    assert_eq!(first.storm_name, "KATRINA");
    assert_eq!(first.date, StormDate::new(2005, 8, 28, 0, 0, 0).unwrap());
    assert_eq!(first.num_isotachs(), 3);
    assert!(approx_eq!(f64, first.position.y(), 25.1, epsilon = 1e-9));
    assert!(approx_eq!(f64, first.position.x(), -84.8, epsilon = 1e-9));

    let kt2ms = convert(Speed::Knot, Speed::MetersPerSecond);
    let nmi2m = convert(Length::NauticalMile, Length::Meter);
    assert!(approx_eq!(f64, first.vmax, 125.0 * kt2ms, epsilon = 1e-9));
    assert_eq!(first.central_pressure, Some(935.0));
    assert!(approx_eq!(f64, first.background_pressure, 1013.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, first.radius_to_max_winds, 20.0 * nmi2m, epsilon = 1e-6));

    // isotachs arrive sorted by ascending wind speed
    assert!(approx_eq!(f64, first.isotachs[0].wind_speed, 34.0 * kt2ms, epsilon = 1e-9));
    assert!(approx_eq!(f64, first.isotachs[2].wind_speed, 64.0 * kt2ms, epsilon = 1e-9));
    assert!(approx_eq!(
        f64,
        first.isotachs[0].quadrants[0].isotach_radius,
        150.0 * nmi2m,
        epsilon = 1e-6
    ));

    // the 2005-08-29 12Z snap has two missing 64 kt radii
    let snap = &track.snaps()[6];
    assert_eq!(snap.date, StormDate::new(2005, 8, 29, 12, 0, 0).unwrap());
    assert_eq!(snap.isotachs[2].num_observed_quadrants(), 2);
    assert_eq!(snap.isotachs[2].quadrants[2].isotach_radius, 0.0);
    assert!(!snap.isotachs[2].quadrants[2].observed);

    // track is monotonic
    for pair in track.snaps().windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
}

#[test]
fn test_missing_file() {
    let result = Track::from_file("test_files/does_not_exist.dat");
    assert!(matches!(result, Err(AtcfError::FileOpen(_, _))));
}

#[test]
fn test_malformed_line_is_fatal() {
    use std::io::Write;
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let path = dir.path().join("bad.dat");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "AL, 12, 2005082800, this line is short").unwrap();
    let result = Track::from_file(&path);
    assert!(matches!(
        result,
        Err(AtcfError::InsufficientFields { line: 1, .. })
    ));
}

#[test]
fn test_empty_lines_are_skipped() {
    use std::io::Write;
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let path = dir.path().join("gaps.dat");
    let mut file = std::fs::File::create(&path).unwrap();
    let line = "AL, 12, 2005082800,   , BEST,   0, 251N,  848W, 125,  935, HU,  34, NEQ, \
                 150,  150,   90,  110, 1013,    0,  20,   0,   0,    ,   0,    ,   0,   0, \
                     KATRINA";
    writeln!(file).unwrap();
    writeln!(file, "{}", line).unwrap();
    writeln!(file).unwrap();
    let track = Track::from_file(&path).unwrap();
    assert_eq!(track.len(), 1);
}

#[test]
fn test_bad_date_token() {
    use std::io::Write;
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let path = dir.path().join("bad_date.dat");
    let mut file = std::fs::File::create(&path).unwrap();
    let line = "AL, 12, 20050828XX,   , BEST,   0, 251N,  848W, 125,  935, HU,  34, NEQ, \
                 150,  150,   90,  110, 1013,    0,  20,   0,   0,    ,   0,    ,   0,   0, \
                     KATRINA";
    writeln!(file, "{}", line).unwrap();
    assert!(matches!(
        Track::from_file(&path),
        Err(AtcfError::MalformedDateToken(_))
    ));
}

#[test]
fn test_inconsistent_storm() {
    use std::io::Write;
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let path = dir.path().join("mixed.dat");
    let mut file = std::fs::File::create(&path).unwrap();
    let a = "AL, 12, 2005082800,   , BEST,   0, 251N,  848W, 125,  935, HU,  34, NEQ, \
              150,  150,   90,  110, 1013,    0,  20,   0,   0,    ,   0,    ,   0,   0, \
                  KATRINA";
    let b = "AL, 13, 2005082806,   , BEST,   0, 251N,  848W, 125,  935, HU,  34, NEQ, \
              150,  150,   90,  110, 1013,    0,  20,   0,   0,    ,   0,    ,   0,   0, \
                  OTHER";
    writeln!(file, "{}", a).unwrap();
    writeln!(file, "{}", b).unwrap();
    assert!(matches!(
        Track::from_file(&path),
        Err(AtcfError::InconsistentStorm { line: 2, .. })
    ));
}

#[test]
fn test_rejects_nonpositive_vmax() {
    use std::io::Write;
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let path = dir.path().join("calm.dat");
    let mut file = std::fs::File::create(&path).unwrap();
    let line = "AL, 12, 2005082800,   , BEST,   0, 251N,  848W,   0,  935, HU,  34, NEQ, \
                 150,  150,   90,  110, 1013,    0,  20,   0,   0,    ,   0,    ,   0,   0, \
                     KATRINA";
    writeln!(file, "{}", line).unwrap();
    assert!(matches!(
        Track::from_file(&path),
        Err(AtcfError::NonPositiveVmax { .. })
    ));
}

#[test]
fn test_rejects_pressure_above_background() {
    use std::io::Write;
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let path = dir.path().join("highp.dat");
    let mut file = std::fs::File::create(&path).unwrap();
    let line = "AL, 12, 2005082800,   , BEST,   0, 251N,  848W, 125, 1020, HU,  34, NEQ, \
                 150,  150,   90,  110, 1013,    0,  20,   0,   0,    ,   0,    ,   0,   0, \
                     KATRINA";
    writeln!(file, "{}", line).unwrap();
    assert!(matches!(
        Track::from_file(&path),
        Err(AtcfError::PressureOrdering { .. })
    ));
}

#[test]
fn test_rmw_record_becomes_ring() {
    use std::io::Write;
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let path = dir.path().join("rmw.dat");
    let mut file = std::fs::File::create(&path).unwrap();
    // isotach speed field of zero marks the radius-to-maximum-winds record
    let line = "AL, 12, 2005082800,   , BEST,   0, 251N,  848W, 125,  935, HU,   0, NEQ, \
                   0,    0,    0,    0, 1013,    0,  20,   0,   0,    ,   0,    ,   0,   0, \
                     KATRINA";
    writeln!(file, "{}", line).unwrap();
    let track = Track::from_file(&path).unwrap();
    let snap = &track.snaps()[0];
    let nmi2m = convert(Length::NauticalMile, Length::Meter);
    assert_eq!(snap.num_isotachs(), 1);
    assert!(approx_eq!(f64, snap.isotachs[0].wind_speed, snap.vmax, epsilon = 1e-9));
    for q in snap.isotachs[0].quadrants.iter() {
        assert!(approx_eq!(f64, q.isotach_radius, 20.0 * nmi2m, epsilon = 1e-6));
    }
}

#[test]
fn test_southern_hemisphere_coordinates() {
    use std::io::Write;
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let path = dir.path().join("sh.dat");
    let mut file = std::fs::File::create(&path).unwrap();
    let line = "SH, 02, 2005012000,   , BEST,   0, 152S, 1214E,  65,  970, HU,  34, NEQ, \
                 100,  100,   80,   90, 1013,    0,  25,   0,   0,    ,   0,    ,   0,   0, \
                     INGRID";
    writeln!(file, "{}", line).unwrap();
    let track = Track::from_file(&path).unwrap();
    let snap = &track.snaps()[0];
    assert_eq!(snap.basin, Basin::SouthernHemisphere);
    assert!(approx_eq!(f64, snap.position.y(), -15.2, epsilon = 1e-9));
    assert!(approx_eq!(f64, snap.position.x(), 121.4, epsilon = 1e-9));
}

#[test]
fn test_storm_translation_components() {
    let translation = StormTranslation::new(10.0, 90.0_f64.to_radians());
    assert!(approx_eq!(f64, translation.u(), 10.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, translation.v(), 0.0, epsilon = 1e-9));
}

#[test]
fn test_translation_angular_interpolation() {
    // across the north wrap: 350 and 10 degrees meet at 0, not 180
    let a = StormTranslation::new(10.0, 350.0_f64.to_radians());
    let b = StormTranslation::new(10.0, 10.0_f64.to_radians());
    let mid = StormTranslation::interpolate(&a, &b, 0.5);
    assert!(approx_eq!(f64, mid.direction(), 0.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, mid.speed(), 10.0, epsilon = 1e-9));
}

#[test]
fn test_position_interpolation() {
    let a = StormPosition::new(-80.0, 25.0);
    let b = StormPosition::new(-81.0, 26.0);
    let mid = StormPosition::interpolate(&a, &b, 0.25);
    assert!(approx_eq!(f64, mid.x(), -80.25, epsilon = 1e-12));
    assert!(approx_eq!(f64, mid.y(), 25.25, epsilon = 1e-12));
}

#[test]
fn test_bracket() {
    let track = Track::from_file(TEST_TRACK).unwrap();
    let first = track.snaps()[0].date;
    let last = track.snaps()[track.len() - 1].date;

    assert_eq!(track.bracket(first.add_hours(-48)), (0, 0, 0.0));
    assert_eq!(track.bracket(first), (0, 0, 0.0));
    assert_eq!(
        track.bracket(last.add_hours(24)),
        (track.len() - 1, track.len() - 1, 1.0)
    );

    // halfway between the first two snaps
    let (i0, i1, w) = track.bracket(first.add_hours(3));
    assert_eq!((i0, i1), (0, 1));
    assert!(approx_eq!(f64, w, 0.5, epsilon = 1e-12));

    // exactly at an interior snap: weight 0 against the following snap
    let (i0, _, w) = track.bracket(track.snaps()[3].date);
    assert_eq!(i0, 3);
    assert_eq!(w, 0.0);
}

#[test]
fn test_duplicate_dates_merge() {
    let mut track = Track::new();
    let base = "AL, 12, 2005082800,   , BEST,   0, 251N,  848W, 125,  935, HU,  34, NEQ, \
                 150,  150,   90,  110, 1013,    0,  20,   0,   0,    ,   0,    ,   0,   0, \
                     KATRINA";
    let snap_a = Snap::from_atcf_line(base, 1, 1013.0).unwrap();
    let mut snap_b = Snap::from_atcf_line(base, 2, 1013.0).unwrap();
    snap_b.isotachs[0].wind_speed = 25.7; // pretend a 50 kt line
    track.add_snap(snap_a);
    track.add_snap(snap_b);
    assert_eq!(track.len(), 1);
    assert_eq!(track.snaps()[0].num_isotachs(), 2);
}

#[test]
fn test_quadrant_radii_ring_order() {
    let track = Track::from_file(TEST_TRACK).unwrap();
    let snap = &track.snaps()[0];
    // rings run inward to outward: 64 kt first, then 50, then 34
    let radii = snap.quadrant_radii(0);
    let nmi2m = convert(Length::NauticalMile, Length::Meter);
    assert_eq!(radii.len(), 3);
    assert!(approx_eq!(f64, radii[0], 40.0 * nmi2m, epsilon = 1e-6));
    assert!(approx_eq!(f64, radii[2], 150.0 * nmi2m, epsilon = 1e-6));
}

#[test]
fn test_quadrant_enum() {
    use num_traits::FromPrimitive;
    assert_eq!(Quadrant::from_i32(0), Some(Quadrant::NorthEast));
    assert_eq!(Quadrant::from_i32(3), Some(Quadrant::NorthWest));
    assert_eq!(Quadrant::from_i32(4), None);
    assert!(approx_eq!(
        f64,
        Quadrant::SouthEast.azimuth(),
        135.0_f64.to_radians(),
        epsilon = 1e-12
    ));
    assert_eq!(Quadrant::SouthWest.to_string(), "SW");
}
