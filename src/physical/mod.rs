// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Physical constants, Earth geometry and the atmospheric relations used by the
GAHM equations.

All angles are radians and all distances are meters unless a function name
says otherwise. Latitudes and longitudes cross API boundaries in degrees,
matching the best-track input format.
*/


use std::f64::consts::PI;

use crate::grid::Point;

/// Rotational rate of the Earth in radians/s
pub const OMEGA: f64 = 7.292115e-5;

/// Earth equatorial radius in meters
pub const EQUATORIAL_RADIUS_M: f64 = 6378137.0;

/// Earth polar radius in meters
pub const POLAR_RADIUS_M: f64 = 6356752.3;

/// Mean Earth radius in meters, used when no latitude is available
pub const MEAN_RADIUS_M: f64 = 6378135.0;

/// Density of air in kg/m^3
pub const RHO_AIR: f64 = 1.293;

/// Default background atmospheric pressure in millibars
pub const BACKGROUND_PRESSURE_MBAR: f64 = 1013.0;

/// Reduction factor between the boundary layer and 10m winds
pub const WIND_REDUCTION_FACTOR: f64 = 0.9;

/// Conversion factor from sustained boundary layer winds to the 10-minute
/// averaged 10m winds used in output
pub const ONE_TO_TEN_FACTOR: f64 = 0.8928;

/// Degrees to radians
pub const DEG2RAD: f64 = PI / 180.0;

/// Radians to degrees
pub const RAD2DEG: f64 = 180.0 / PI;

/// Two pi
pub const TWO_PI: f64 = 2.0 * PI;

/// Center azimuths of the four storm quadrants (NE, SE, SW, NW) in radians
pub const QUADRANT_ANGLES: [f64; 4] = [
    45.0 * DEG2RAD,
    135.0 * DEG2RAD,
    225.0 * DEG2RAD,
    315.0 * DEG2RAD,
];

/// Coriolis parameter at a latitude
///
/// # Arguments
///
/// * `latitude` - latitude in degrees
///
///
/// # Returns
///
/// * Coriolis parameter in 1/s. Negative in the southern hemisphere.
///
pub fn coriolis(latitude: f64) -> f64 {
    2.0 * OMEGA * (latitude * DEG2RAD).sin()
}

/// Earth radius at a geodetic latitude, from the standard ellipsoidal
/// formula.
///
/// # Arguments
///
/// * `latitude` - latitude in degrees
///
///
/// # Returns
///
/// * Earth radius in meters
///
pub fn earth_radius(latitude: f64) -> f64 {
    let l = latitude * DEG2RAD;
    let (sin_l, cos_l) = l.sin_cos();
    let a = EQUATORIAL_RADIUS_M;
    let b = POLAR_RADIUS_M;
    ((a.powi(4) * cos_l * cos_l + b.powi(4) * sin_l * sin_l)
        / (a.powi(2) * cos_l * cos_l + b.powi(2) * sin_l * sin_l))
        .sqrt()
}

/// Earth radius evaluated at the mean of two latitudes in degrees
pub fn earth_radius_between(y1: f64, y2: f64) -> f64 {
    earth_radius((y1 + y2) / 2.0)
}

/// Haversine great-circle distance between two points, using the Earth
/// radius at the mean latitude of the two points.
///
/// # Arguments
///
/// * `p1` - first point as (longitude, latitude) in degrees
///
/// * `p2` - second point as (longitude, latitude) in degrees
///
///
/// # Returns
///
/// * Distance in meters
///
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    let lon1 = p1.x() * DEG2RAD;
    let lat1 = p1.y() * DEG2RAD;
    let lon2 = p2.x() * DEG2RAD;
    let lat2 = p2.y() * DEG2RAD;
    let s1 = ((lat2 - lat1) / 2.0).sin();
    let s2 = ((lon2 - lon1) / 2.0).sin();
    2.0 * earth_radius_between(p1.y(), p2.y())
        * (s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2).sqrt().asin()
}

/// Spherical forward azimuth from `p1` to `p2`, normalized to [0, 2*pi)
///
/// # Arguments
///
/// * `p1` - origin point as (longitude, latitude) in degrees
///
/// * `p2` - target point as (longitude, latitude) in degrees
///
///
/// # Returns
///
/// * Azimuth in radians, measured clockwise from north
///
pub fn azimuth(p1: &Point, p2: &Point) -> f64 {
    let lam0 = p1.x() * DEG2RAD;
    let phi0 = p1.y() * DEG2RAD;
    let lam1 = p2.x() * DEG2RAD;
    let phi1 = p2.y() * DEG2RAD;
    let dlam = lam1 - lam0;
    let a = dlam.sin() * phi1.cos();
    let b = phi0.cos() * phi1.sin() - phi0.sin() * phi1.cos() * dlam.cos();
    normalize_angle(a.atan2(b))
}

/// Great-circle components of the displacement between two points, measured
/// along the mid-latitude and mid-longitude.
///
/// # Arguments
///
/// * `p1` - first point as (longitude, latitude) in degrees
///
/// * `p2` - second point as (longitude, latitude) in degrees
///
///
/// # Returns
///
/// * `(dx, dy)` signed east/north displacements in meters
///
pub fn spherical_dx(p1: &Point, p2: &Point) -> (f64, f64) {
    let mean_y = (p1.y() + p2.y()) / 2.0;
    let mean_x = (p1.x() + p2.x()) / 2.0;
    let mut dx = distance(&Point::new(p1.x(), mean_y), &Point::new(p2.x(), mean_y));
    if p2.x() - p1.x() <= 0.0 {
        dx = -dx;
    }
    let mut dy = distance(&Point::new(mean_x, p1.y()), &Point::new(mean_x, p2.y()));
    if p2.y() - p1.y() <= 0.0 {
        dy = -dy;
    }
    (dx, dy)
}

/// Normalize an angle in radians to the range [0, 2*pi)
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle % TWO_PI;
    if a < 0.0 {
        a + TWO_PI
    } else {
        a
    }
}

/// The standard Holland B parameter
///
/// # Arguments
///
/// * `vmax` - maximum storm wind velocity in m/s
///
/// * `p0` - central pressure in millibars
///
/// * `pinf` - background pressure in millibars
///
///
/// # Returns
///
/// * Holland B
///
pub fn holland_b(vmax: f64, p0: f64, pinf: f64) -> f64 {
    debug_assert!(pinf > p0);
    (vmax * vmax * RHO_AIR * std::f64::consts::E) / (100.0 * (pinf - p0))
}

/// Rossby number of the storm
///
/// # Arguments
///
/// * `vmax` - maximum storm wind velocity in m/s
///
/// * `rmax` - radius to maximum winds in meters
///
/// * `fc` - coriolis parameter in 1/s
///
///
/// # Returns
///
/// * The dimensionless Rossby number
///
pub fn rossby_number(vmax: f64, rmax: f64, fc: f64) -> f64 {
    debug_assert!(fc > 0.0);
    debug_assert!(rmax > 0.0);
    debug_assert!(vmax > 0.0);
    vmax / (fc * rmax)
}

/// Friction inflow angle at a radius.
///
/// 10 degrees inside the radius to maximum winds, ramping linearly to 25
/// degrees at 1.2 times the radius to maximum winds and constant beyond.
///
/// # Arguments
///
/// * `radius` - distance from the storm center in meters
///
/// * `radius_to_max_winds` - radius to maximum winds in meters
///
///
/// # Returns
///
/// * Inflow angle in radians
///
pub fn friction_angle(radius: f64, radius_to_max_winds: f64) -> f64 {
    const ANGLE_10: f64 = 10.0 * DEG2RAD;
    const ANGLE_25: f64 = 25.0 * DEG2RAD;
    const ANGLE_75: f64 = 75.0 * DEG2RAD;
    if (0.0..radius_to_max_winds).contains(&radius) {
        ANGLE_10
    } else if (radius_to_max_winds..1.2 * radius_to_max_winds).contains(&radius) {
        ANGLE_10 + ANGLE_75 * (radius / radius_to_max_winds - 1.0)
    } else if radius >= 1.2 * radius_to_max_winds {
        ANGLE_25
    } else {
        0.0
    }
}
