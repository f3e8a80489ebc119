// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Transforms a freshly loaded track into the boundary-layer frame the GAHM
solver requires.

The steps run in a fixed order: impute missing quadrant radii, reconstruct
the storm translation from consecutive fixes, estimate any missing central
pressures, convert reported winds to the top of the boundary layer, and
finally run the GAHM solver for every (snap, isotach, quadrant). Once all
steps complete the track is frozen inside a [`PreparedTrack`] and never
mutated again.
*/


use log::warn;
use num_traits::FromPrimitive;

use crate::assumptions::{Assumptions, Severity};
use crate::atcf::{Isotach, Quadrant, Snap, StormTranslation, Track};
use crate::config::GahmConfig;
use crate::physical;
use crate::pressure::{self, PressureContext};
use crate::solver::GahmSolver;
use crate::units::{convert, Speed};

/// A track that has been fully preprocessed. The inner track is immutable
/// for the lifetime of all queries against it.
#[derive(Debug, Clone)]
pub struct PreparedTrack {
    track: Track,
    assumptions: Assumptions,
}

impl PreparedTrack {
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// The data-quality assumptions recorded while preparing the track
    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }
}

/// Runs the preprocessing pipeline over a loaded track
#[derive(Debug)]
pub struct Preprocessor {
    config: GahmConfig,
}

impl Preprocessor {
    pub fn new(config: GahmConfig) -> Self {
        Preprocessor { config }
    }

    /// Consumes a track and produces the prepared, immutable form.
    ///
    /// # Arguments
    ///
    /// * `track` - a track satisfying the loader contract
    ///
    ///
    /// # Returns
    ///
    /// * The prepared track. Preprocessing itself cannot fail; individual
    ///   quadrants where the GAHM solver finds no solution fall back to the
    ///   observed isotach radius and are flagged.
    ///
    pub fn prepare(&self, mut track: Track) -> PreparedTrack {
        let mut assumptions = Assumptions::new();
        self.fill_missing_radii(&mut track, &mut assumptions);
        self.compute_translation(&mut track, &mut assumptions);
        self.fill_missing_pressures(&mut track, &mut assumptions);
        self.compute_boundary_layer_winds(&mut track);
        self.solve(&mut track, &mut assumptions);
        PreparedTrack { track, assumptions }
    }

    /// Fills quadrants whose isotach radius is missing (zero).
    ///
    /// Asymmetry is preserved where observed: a single missing quadrant
    /// takes the mean of its two neighbours, two missing quadrants take the
    /// mean of the observed pair, and with one observation the ring is
    /// axisymmetric at that radius. A fully unobserved ring collapses to
    /// the nominal radius to maximum winds.
    fn fill_missing_radii(&self, track: &mut Track, assumptions: &mut Assumptions) {
        for (snap_index, snap) in track.snaps_mut().iter_mut().enumerate() {
            let rmax = snap.radius_to_max_winds;
            let date = snap.date;
            for (iso_index, isotach) in snap.isotachs.iter_mut().enumerate() {
                let observed = isotach.num_observed_quadrants();
                match observed {
                    4 => {}
                    3 => {
                        let missing = (0..4)
                            .find(|&i| isotach.quadrants[i as isize].isotach_radius == 0.0)
                            .unwrap_or(0) as isize;
                        let mean = (isotach.quadrants[missing - 1].isotach_radius
                            + isotach.quadrants[missing + 1].isotach_radius)
                            / 2.0;
                        isotach.quadrants[missing].isotach_radius = mean;
                        assumptions.add(
                            Severity::Major,
                            format!(
                                "Snap {} ({}), isotach {}: one missing quadrant radius set to \
                                 the mean of its neighbours ({:.1} m)",
                                snap_index, date, iso_index, mean
                            ),
                        );
                    }
                    2 => {
                        let mean = isotach
                            .quadrants
                            .iter()
                            .map(|q| q.isotach_radius)
                            .sum::<f64>()
                            / 2.0;
                        for q in isotach.quadrants.iter_mut() {
                            if q.isotach_radius == 0.0 {
                                q.isotach_radius = mean;
                            }
                        }
                        assumptions.add(
                            Severity::Major,
                            format!(
                                "Snap {} ({}), isotach {}: two missing quadrant radii set to \
                                 the mean of the observed pair ({:.1} m)",
                                snap_index, date, iso_index, mean
                            ),
                        );
                    }
                    1 => {
                        let value = isotach
                            .quadrants
                            .iter()
                            .map(|q| q.isotach_radius)
                            .fold(0.0, f64::max);
                        for q in isotach.quadrants.iter_mut() {
                            if q.isotach_radius == 0.0 {
                                q.isotach_radius = value;
                            }
                        }
                        assumptions.add(
                            Severity::Major,
                            format!(
                                "Snap {} ({}), isotach {}: three missing quadrant radii copied \
                                 from the single observation ({:.1} m)",
                                snap_index, date, iso_index, value
                            ),
                        );
                    }
                    0 => {
                        for q in isotach.quadrants.iter_mut() {
                            q.isotach_radius = rmax;
                        }
                        assumptions.add(
                            Severity::Major,
                            format!(
                                "Snap {} ({}), isotach {}: no radii reported, assuming a \
                                 constant ring at the radius to maximum winds ({:.1} m)",
                                snap_index, date, iso_index, rmax
                            ),
                        );
                    }
                    _ => unreachable!(),
                }
            }
        }
    }

    /// Reconstructs the storm translation for every snap from the motion of
    /// the storm center between consecutive fixes.
    fn compute_translation(&self, track: &mut Track, assumptions: &mut Assumptions) {
        let min_speed = convert(Speed::Knot, Speed::MetersPerSecond);
        let snaps = track.snaps_mut();

        if snaps.len() == 1 {
            snaps[0].translation = StormTranslation::new(min_speed, 0.0);
            assumptions.add(
                Severity::Major,
                "Single-snap track: storm translation assumed stationary with a northward \
                 heading"
                    .to_string(),
            );
            return;
        }

        for i in 1..snaps.len() {
            let translation = Preprocessor::translation_between(&snaps[i - 1], &snaps[i]);
            snaps[i].translation = if translation.speed() < min_speed {
                assumptions.add(
                    Severity::Minor,
                    format!(
                        "Snap {}: storm translation below 1 kt, clamped with the previous \
                         heading retained",
                        i
                    ),
                );
                StormTranslation::new(min_speed, snaps[i - 1].translation.direction())
            } else {
                translation
            };
        }
        snaps[0].translation = snaps[1].translation;
    }

    /// Translation between two consecutive snaps from the great-circle
    /// displacement components along the mid-latitude
    fn translation_between(prev: &Snap, next: &Snap) -> StormTranslation {
        let (dx, dy) = physical::spherical_dx(prev.position.point(), next.position.point());
        let dt = (next.date - prev.date) as f64;
        let u = dx / dt;
        let v = dy / dt;
        StormTranslation::new(u.hypot(v), physical::normalize_angle(u.atan2(v)))
    }

    /// Estimates central pressures for snaps that did not report one, using
    /// the configured wind-pressure relationship.
    fn fill_missing_pressures(&self, track: &mut Track, assumptions: &mut Assumptions) {
        let mut vmax_global: f64 = 0.0;
        let mut last_vmax = 0.0;
        let mut last_pressure = 0.0;
        for (index, snap) in track.snaps_mut().iter_mut().enumerate() {
            vmax_global = vmax_global.max(snap.vmax);
            if snap.central_pressure.is_none() {
                let estimate = if index == 0 {
                    pressure::initial_estimate(snap.vmax, 0.0, 0.0)
                } else {
                    pressure::compute_pressure(
                        self.config.pressure_method,
                        snap.vmax,
                        &PressureContext {
                            vmax_global,
                            last_vmax,
                            last_pressure,
                            latitude: snap.latitude(),
                            forward_speed: snap.translation.speed(),
                        },
                    )
                };
                snap.central_pressure = Some(estimate);
                assumptions.add(
                    Severity::Minor,
                    format!(
                        "Snap {} ({}): central pressure estimated as {:.1} mbar from \
                         vmax={:.1} m/s with method {}",
                        index, snap.date, estimate, snap.vmax, self.config.pressure_method
                    ),
                );
            }
            last_vmax = snap.vmax;
            last_pressure = snap.central_pressure.unwrap_or(0.0);
        }
    }

    /// Converts the reported 10m winds to the top of the boundary layer by
    /// removing the translation contribution and un-reducing
    fn compute_boundary_layer_winds(&self, track: &mut Track) {
        let wrf = self.config.wind_reduction_factor;
        for snap in track.snaps_mut().iter_mut() {
            snap.vmax_boundary_layer = (snap.vmax - snap.translation.speed()) / wrf;

            let translation = snap.translation;
            let vmax_bl = snap.vmax_boundary_layer;
            let vmax = snap.vmax;
            for isotach in snap.isotachs.iter_mut() {
                let is_rmw_ring = isotach.wind_speed >= vmax;
                for (index, quadrant) in isotach.quadrants.iter_mut().enumerate() {
                    quadrant.isotach_speed_boundary_layer = if is_rmw_ring {
                        vmax_bl
                    } else {
                        let slot = Quadrant::from_usize(index)
                            .expect("quadrant arrays hold exactly four slots");
                        Preprocessor::relative_isotach_speed(
                            isotach.wind_speed,
                            &translation,
                            slot,
                            wrf,
                        )
                    };
                    quadrant.vmax_boundary_layer = vmax_bl;
                }
            }
        }
    }

    /// Storm-relative boundary layer isotach speed for a quadrant: the
    /// projection of the translation onto the quadrant center azimuth is
    /// removed before un-reducing to the boundary layer
    fn relative_isotach_speed(
        wind_speed: f64,
        translation: &StormTranslation,
        quadrant: Quadrant,
        wind_reduction_factor: f64,
    ) -> f64 {
        let azimuth = quadrant.azimuth();
        let projection = translation.u() * azimuth.sin() + translation.v() * azimuth.cos();
        (wind_speed - projection) / wind_reduction_factor
    }

    /// Runs the GAHM solver for every (snap, isotach, quadrant).
    ///
    /// The ring at the radius to maximum winds needs no solve; it receives
    /// the nominal radius directly. A quadrant whose solve fails falls back
    /// to the observed isotach radius with the standard Holland B and is
    /// flagged as non-converged.
    fn solve(&self, track: &mut Track, assumptions: &mut Assumptions) {
        for snap in track.snaps_mut().iter_mut() {
            let vmax = snap.vmax;
            let vmax_bl = snap.vmax_boundary_layer;
            let p_center = snap
                .central_pressure
                .expect("central pressures are filled before the solver runs");
            let p_background = snap.background_pressure;
            let latitude = snap.latitude();
            let rmax_nominal = snap.radius_to_max_winds;
            let date = snap.date;

            // The innermost ring is the RMW record
            if !snap.isotachs.iter().any(|iso| iso.wind_speed >= vmax) {
                snap.add_isotach(Isotach::new(vmax, [rmax_nominal; 4]));
                assumptions.add(
                    Severity::Minor,
                    format!(
                        "Snap at {}: no radius-to-maximum-winds record, ring added at the \
                         nominal radius",
                        date
                    ),
                );
            }

            for isotach in snap.isotachs.iter_mut() {
                let is_rmw_ring = isotach.wind_speed >= vmax;
                for quadrant in isotach.quadrants.iter_mut() {
                    if is_rmw_ring {
                        quadrant.radius_to_max_winds = rmax_nominal;
                        quadrant.gahm_holland_b =
                            physical::holland_b(vmax_bl, p_center, p_background);
                        quadrant.vmax_boundary_layer = vmax_bl;
                        quadrant.isotach_speed_boundary_layer = vmax_bl;
                        quadrant.solver_converged = true;
                        continue;
                    }

                    let solver = GahmSolver::new(
                        quadrant.isotach_radius,
                        quadrant.isotach_speed_boundary_layer,
                        quadrant.vmax_boundary_layer,
                        p_center,
                        p_background,
                        latitude,
                    );
                    match solver.solve() {
                        Ok(solution) => {
                            quadrant.radius_to_max_winds = solution.rmax;
                            quadrant.gahm_holland_b = solution.gahm_holland_b;
                            quadrant.solver_converged = solution.converged;
                            if !solution.converged {
                                warn!(
                                    "GAHM solver did not converge for snap at {} \
                                     (isotach {:.1} m/s); using the last iterate",
                                    date, isotach.wind_speed
                                );
                            }
                        }
                        Err(e) => {
                            quadrant.radius_to_max_winds = quadrant.isotach_radius;
                            quadrant.gahm_holland_b =
                                physical::holland_b(vmax_bl, p_center, p_background);
                            quadrant.solver_converged = false;
                            assumptions.add(
                                Severity::Major,
                                format!(
                                    "Snap at {}, isotach {:.1} m/s: GAHM solve failed ({}); \
                                     falling back to the observed isotach radius",
                                    date, isotach.wind_speed, e
                                ),
                            );
                        }
                    }
                }
            }
        }
    }
}

/// Convenience helper running the whole pipeline with a configuration
///
/// # Arguments
///
/// * `track` - a loaded track
///
/// * `config` - model configuration
///
///
/// # Returns
///
/// * The prepared track
///
pub fn preprocess(track: Track, config: &GahmConfig) -> PreparedTrack {
    Preprocessor::new(*config).prepare(track)
}
