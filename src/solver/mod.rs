// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
The per-quadrant GAHM solver.

For one quadrant of one isotach, the solver finds the radius to maximum
winds and the GAHM Holland B such that the analytic gradient wind profile
passes through the observed isotach radius at the isotach wind speed. The
radius is found by a safeguarded Newton-Raphson iteration; B is driven to
consistency with phi by an outer fixed-point loop.
*/

pub mod equations;
pub mod error;


pub use error::SolverError;

use crate::physical;

/// Maximum outer fixed-point iterations on the GAHM Holland B
const MAX_B_ITERATIONS: usize = 100;

/// Convergence tolerance on the GAHM Holland B
const B_TOLERANCE: f64 = 1e-6;

/// Maximum Newton-Raphson iterations for the radius solve
const MAX_RADIUS_ITERATIONS: usize = 200;

/// The converged (or last-iterate) GAHM parameters for one quadrant of one
/// isotach
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GahmSolution {
    /// Radius to maximum winds in meters
    pub rmax: f64,
    /// GAHM Holland B
    pub gahm_holland_b: f64,
    /// GAHM phi parameter
    pub phi: f64,
    /// Outer fixed-point iterations used
    pub iterations: usize,
    /// Whether the B fixed point met tolerance within the iteration budget
    pub converged: bool,
}

/// Newton-Raphson root solve for the radius to maximum winds at a fixed
/// GAHM Holland B. Steps that leave the bracket fall back to bisection.
struct RadiusSolver {
    isotach_radius: f64,
    isotach_speed: f64,
    vmax: f64,
    fc: f64,
    bg: f64,
}

impl RadiusSolver {
    fn new(isotach_radius: f64, isotach_speed: f64, vmax: f64, fc: f64, bg: f64) -> Self {
        RadiusSolver {
            isotach_radius,
            isotach_speed,
            vmax,
            fc,
            bg,
        }
    }

    fn set_bg(&mut self, bg: f64) {
        self.bg = bg;
    }

    fn bg(&self) -> f64 {
        self.bg
    }

    /// The residual and its derivative at a candidate radius
    fn evaluate(&self, rmax: f64) -> (f64, f64) {
        let f = equations::gahm_function(
            rmax,
            self.vmax,
            self.isotach_speed,
            self.isotach_radius,
            self.fc,
            self.bg,
        );
        let fp = equations::gahm_function_derivative(
            rmax,
            self.vmax,
            self.isotach_radius,
            self.fc,
            self.bg,
        );
        (f, fp)
    }

    /// Runs the root solve on [lower, upper] starting from `guess`.
    ///
    /// # Arguments
    ///
    /// * `lower`, `upper` - solution bounds in meters
    ///
    /// * `guess` - initial radius estimate in meters
    ///
    ///
    /// # Returns
    ///
    /// * The radius to maximum winds, or an error when the residual does
    ///   not change sign across the bounds
    ///
    fn solve(&self, lower: f64, upper: f64, guess: f64) -> Result<f64, SolverError> {
        let (f_lower, _) = self.evaluate(lower);
        let (f_upper, _) = self.evaluate(upper);
        if f_lower.signum() == f_upper.signum() {
            return Err(SolverError::CannotBracket {
                isotach_radius: self.isotach_radius,
                isotach_speed: self.isotach_speed,
            });
        }

        let mut lo = lower;
        let mut hi = upper;
        let mut f_lo = f_lower;
        let mut x = guess.clamp(lower, upper);
        for _ in 0..MAX_RADIUS_ITERATIONS {
            let (f, fp) = self.evaluate(x);
            if f == 0.0 {
                return Ok(x);
            }
            if f.signum() == f_lo.signum() {
                lo = x;
                f_lo = f;
            } else {
                hi = x;
            }
            let mut next = if fp != 0.0 {
                x - f / fp
            } else {
                (lo + hi) / 2.0
            };
            if next <= lo || next >= hi {
                next = (lo + hi) / 2.0;
            }
            // Converged to the floating point digit budget
            if (next - x).abs() <= f64::EPSILON * x.abs() {
                return Ok(next);
            }
            x = next;
        }
        Ok(x)
    }
}

/// Joint solve of {radius to maximum winds, GAHM Holland B, phi} for one
/// quadrant of one isotach. The solver is pure: the same inputs always
/// produce the same solution.
#[derive(Debug)]
pub struct GahmSolver {
    isotach_radius: f64,
    isotach_speed: f64,
    vmax: f64,
    p_center: f64,
    p_background: f64,
    fc: f64,
    rmax_guess: f64,
}

impl GahmSolver {
    /// Creates a solver for a single quadrant of a single isotach
    ///
    /// # Arguments
    ///
    /// * `isotach_radius` - observed isotach radius in meters
    ///
    /// * `isotach_speed` - storm-relative boundary layer isotach speed in m/s
    ///
    /// * `vmax` - maximum boundary layer wind speed in m/s
    ///
    /// * `p_center` - central pressure in millibars
    ///
    /// * `p_background` - background pressure in millibars
    ///
    /// * `latitude` - latitude of the storm center in degrees
    ///
    ///
    /// # Returns
    ///
    /// * A solver ready to run
    ///
    pub fn new(
        isotach_radius: f64,
        isotach_speed: f64,
        vmax: f64,
        p_center: f64,
        p_background: f64,
        latitude: f64,
    ) -> Self {
        GahmSolver {
            isotach_radius,
            isotach_speed,
            vmax,
            p_center,
            p_background,
            fc: physical::coriolis(latitude).abs(),
            rmax_guess: GahmSolver::estimate_rmax(
                p_background - p_center,
                latitude,
                isotach_radius,
            ),
        }
    }

    /// Runs the solver.
    ///
    /// A missing root bracket or a non-finite iterate is an error the
    /// caller must handle with a fallback. Running out of fixed-point
    /// iterations is not an error; the last iterate is returned with
    /// `converged` set to false.
    ///
    /// # Returns
    ///
    /// * The solved parameters, or the error that stopped the solve
    ///
    pub fn solve(&self) -> Result<GahmSolution, SolverError> {
        let mut bg = physical::holland_b(self.vmax, self.p_center, self.p_background);
        let mut phi = 1.0;
        let mut rmax = self.isotach_radius;
        let mut converged = false;
        let mut iterations = 0;

        let mut radius_solver = RadiusSolver::new(
            self.isotach_radius,
            self.isotach_speed,
            self.vmax,
            self.fc,
            bg,
        );
        for i in 0..MAX_B_ITERATIONS {
            rmax = radius_solver.solve(1.0, self.isotach_radius, self.rmax_guess)?;
            phi = equations::phi(self.vmax, rmax, bg, self.fc);
            let bg_new = equations::gahm_b(
                self.vmax,
                rmax,
                self.p_center,
                self.p_background,
                self.fc,
                phi,
            );
            if !bg_new.is_finite() || !phi.is_finite() {
                return Err(SolverError::Diverged);
            }
            iterations = i + 1;
            let delta = (bg_new - radius_solver.bg()).abs();
            bg = bg_new;
            radius_solver.set_bg(bg_new);
            if delta < B_TOLERANCE {
                converged = true;
                // Refresh the radius at the converged B so the profile
                // passes through the isotach to solver precision
                rmax = radius_solver.solve(1.0, self.isotach_radius, rmax)?;
                phi = equations::phi(self.vmax, rmax, bg, self.fc);
                break;
            }
        }

        Ok(GahmSolution {
            rmax,
            gahm_holland_b: bg,
            phi,
            iterations,
            converged,
        })
    }

    pub fn isotach_radius(&self) -> f64 {
        self.isotach_radius
    }

    pub fn isotach_speed(&self) -> f64 {
        self.isotach_speed
    }

    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    /// Empirical first guess for the radius to maximum winds, clamped away
    /// from the isotach radius so the root search starts inside the ring
    ///
    /// # Arguments
    ///
    /// * `dp` - pressure deficit in millibars
    ///
    /// * `latitude` - latitude of the storm center in degrees
    ///
    /// * `isotach_radius` - isotach radius in meters (upper bound)
    ///
    ///
    /// # Returns
    ///
    /// * Radius estimate in meters
    ///
    fn estimate_rmax(dp: f64, latitude: f64, isotach_radius: f64) -> f64 {
        let r1 = (3.015 - 6.291e-5 * dp * dp + 0.337 * latitude).exp();
        if isotach_radius <= r1 {
            isotach_radius / 2.0
        } else {
            r1.min(0.99 * isotach_radius)
        }
    }
}
