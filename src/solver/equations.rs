// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
The closed-form GAHM equations.

The gradient wind profile, its derivative with respect to the radius to
maximum winds, the pressure profile, and the two coupling relations (phi and
the GAHM Holland B) that the solver iterates between.
*/

use crate::physical;

/// The GAHM phi parameter, coupling the profile shape to the Rossby number
///
/// # Arguments
///
/// * `vmax` - maximum boundary layer wind speed in m/s
///
/// * `rmax` - radius to maximum winds in meters
///
/// * `bg` - GAHM Holland B
///
/// * `fc` - coriolis parameter in 1/s
///
///
/// # Returns
///
/// * phi
///
pub fn phi(vmax: f64, rmax: f64, bg: f64, fc: f64) -> f64 {
    let rossby = physical::rossby_number(vmax, rmax, fc);
    1.0 + 1.0 / (rossby * bg * (1.0 + 1.0 / rossby))
}

/// The GAHM Holland B computed from the standard Holland B and phi
///
/// # Arguments
///
/// * `vmax` - maximum boundary layer wind speed in m/s
///
/// * `rmax` - radius to maximum winds in meters
///
/// * `p0` - central pressure in millibars
///
/// * `pinf` - background pressure in millibars
///
/// * `fc` - coriolis parameter in 1/s
///
/// * `phi` - current phi parameter
///
///
/// # Returns
///
/// * GAHM Holland B
///
pub fn gahm_b(vmax: f64, rmax: f64, p0: f64, pinf: f64, fc: f64, phi: f64) -> f64 {
    let b = physical::holland_b(vmax, p0, pinf);
    let ro = physical::rossby_number(vmax, rmax, fc);
    b * ((1.0 + 1.0 / ro) * (phi - 1.0).exp()) / phi
}

/// The GAHM gradient wind speed at a distance from the storm center
///
/// # Arguments
///
/// * `rmax` - radius to maximum winds in meters
///
/// * `vmax` - maximum boundary layer wind speed in m/s
///
/// * `distance` - distance from the storm center in meters
///
/// * `fc` - coriolis parameter in 1/s
///
/// * `bg` - GAHM Holland B
///
/// * `phi` - GAHM phi parameter
///
///
/// # Returns
///
/// * Gradient wind speed in m/s
///
pub fn gahm_wind_speed(
    rmax: f64,
    vmax: f64,
    distance: f64,
    fc: f64,
    bg: f64,
    phi: f64,
) -> f64 {
    let ro = physical::rossby_number(vmax, rmax, fc);
    let alpha_b = (rmax / distance).powf(bg);
    (vmax * vmax * (1.0 + 1.0 / ro) * (phi * (1.0 - alpha_b)).exp() * alpha_b
        + (distance * fc / 2.0).powi(2))
    .sqrt()
        - distance * fc / 2.0
}

/// Residual of the gradient wind at the isotach radius against the isotach
/// speed; the function whose root is the radius to maximum winds
pub fn gahm_function(
    rmax: f64,
    vmax: f64,
    isotach_speed: f64,
    distance: f64,
    fc: f64,
    bg: f64,
) -> f64 {
    let phi = phi(vmax, rmax, bg, fc);
    gahm_wind_speed(rmax, vmax, distance, fc, bg, phi) - isotach_speed
}

/// Derivative of the gradient wind with respect to the radius to maximum
/// winds, evaluated at the isotach radius
///
/// # Arguments
///
/// * `rmax` - radius to maximum winds in meters
///
/// * `vmax` - maximum boundary layer wind speed in m/s
///
/// * `isotach_radius` - radius of the isotach in meters
///
/// * `fc` - coriolis parameter in 1/s
///
/// * `bg` - GAHM Holland B
///
///
/// # Returns
///
/// * dV/dRmax in 1/s
///
pub fn gahm_function_derivative(
    rmax: f64,
    vmax: f64,
    isotach_radius: f64,
    fc: f64,
    bg: f64,
) -> f64 {
    let phi = phi(vmax, rmax, bg, fc);
    let f3 = (rmax / isotach_radius).powf(bg);
    let f4 = (rmax / isotach_radius).powf(bg - 1.0);
    let f1 = (-phi * (f3 - 1.0)).exp();
    let f2 = (fc * rmax) / vmax + 1.0;
    let a = fc * vmax * f1 * f3;
    let b = (bg * vmax * vmax * f1 * f2 * f4) / isotach_radius;
    let c = (bg * phi * vmax * vmax * f1 * f2 * f3 * f4) / isotach_radius;
    let d = 2.0
        * ((fc * fc * isotach_radius * isotach_radius) / 4.0 + vmax * vmax * f1 * f2 * f3)
            .sqrt();
    (a + b - c) / d
}

/// The GAHM surface pressure at a distance from the storm center. Units of
/// the returned pressure follow the units of the two input pressures.
pub fn gahm_pressure(
    p_center: f64,
    p_background: f64,
    distance: f64,
    rmax: f64,
    bg: f64,
    phi: f64,
) -> f64 {
    p_center + (p_background - p_center) * (-phi * (rmax / distance).powf(bg)).exp()
}
