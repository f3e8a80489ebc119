// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Unit tests for the wind-pressure estimators
*/
#[cfg(test)]
use super::*;

#[cfg(test)]
use float_cmp::approx_eq;

#[test]
fn test_curve_fits() {
    assert!(approx_eq!(f64, dvorak(64.8), 937.061, epsilon = 1e-3));
    assert!(approx_eq!(f64, ah77(30.0), 980.597, epsilon = 1e-3));
    assert!(approx_eq!(f64, knaff_zehr(50.0), 952.518, epsilon = 1e-3));
    // weaker winds give higher pressures
    assert!(dvorak(20.0) > dvorak(60.0));
}

#[test]
fn test_initial_estimate_branches() {
    // intensifying
    assert!(approx_eq!(
        f64,
        initial_estimate(50.0, 40.0, 980.0),
        1040.0 - 0.877 * 50.0,
        epsilon = 1e-9
    ));
    // weakening, above the floor
    assert!(approx_eq!(
        f64,
        initial_estimate(40.0, 50.0, 960.0),
        1000.0 - 0.65 * 40.0,
        epsilon = 1e-9
    ));
    // weakening, but the slope estimate would undercut the previous pressure
    let p = initial_estimate(48.0, 50.0, 980.0);
    assert!(approx_eq!(f64, p, 980.0 + 0.65 * 2.0, epsilon = 1e-9));
    // steady state holds the previous pressure
    assert!(approx_eq!(f64, initial_estimate(50.0, 50.0, 975.0), 975.0, epsilon = 1e-9));
}

#[test]
fn test_two_slope() {
    // weak storms hold the previous pressure
    assert!(approx_eq!(f64, two_slope(20.0, 25.0, 1002.0), 1002.0, epsilon = 1e-9));
    // stronger storms use the slope estimate
    assert!(approx_eq!(
        f64,
        two_slope(45.0, 40.0, 990.0),
        1040.0 - 0.877 * 45.0,
        epsilon = 1e-9
    ));
}

#[test]
fn test_asgs2012_gating() {
    // weak wind, intense storm overall: Dvorak
    assert!(approx_eq!(f64, asgs2012(30.0, 60.0, 0.0, 0.0), dvorak(30.0), epsilon = 1e-9));
    // weak wind, weak storm overall: AH77
    assert!(approx_eq!(f64, asgs2012(30.0, 35.0, 0.0, 0.0), ah77(30.0), epsilon = 1e-9));
    // strong wind: slope estimate
    assert!(approx_eq!(
        f64,
        asgs2012(50.0, 60.0, 40.0, 980.0),
        initial_estimate(50.0, 40.0, 980.0),
        epsilon = 1e-9
    ));
}

#[test]
fn test_courtney_knaff() {
    let p = courtney_knaff(45.0, 5.0, 27.0);
    // plausible hurricane central pressure, below ambient
    assert!(p < 1013.0);
    assert!(p > 850.0);
    // low-latitude branch
    let p_low = courtney_knaff(45.0, 5.0, 12.0);
    assert!(p_low < 1013.0);
}

#[test]
fn test_compute_pressure_dispatch() {
    let ctx = PressureContext {
        vmax_global: 60.0,
        last_vmax: 40.0,
        last_pressure: 980.0,
        latitude: 27.0,
        forward_speed: 5.0,
    };
    assert!(approx_eq!(
        f64,
        compute_pressure(PressureMethod::Dvorak, 50.0, &ctx),
        dvorak(50.0),
        epsilon = 1e-9
    ));
    assert!(approx_eq!(
        f64,
        compute_pressure(PressureMethod::TwoSlope, 50.0, &ctx),
        two_slope(50.0, 40.0, 980.0),
        epsilon = 1e-9
    ));
    assert!(approx_eq!(
        f64,
        compute_pressure(PressureMethod::KnaffZehr, 50.0, &ctx),
        knaff_zehr(50.0),
        epsilon = 1e-9
    ));
}

#[test]
fn test_method_parsing() {
    use std::str::FromStr;
    assert_eq!(PressureMethod::from_str("dvorak"), Ok(PressureMethod::Dvorak));
    assert_eq!(PressureMethod::from_str("TwoSlope"), Ok(PressureMethod::TwoSlope));
    assert_eq!(
        PressureMethod::from_str("knaff-zehr"),
        Ok(PressureMethod::KnaffZehr)
    );
    assert!(PressureMethod::from_str("nonsense").is_err());
}

#[test]
fn test_method_display() {
    assert_eq!(PressureMethod::Ah77.to_string(), "AH77");
    assert_eq!(PressureMethod::TwoSlope.to_string(), "Two Slope");
}
