// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
The vortex evaluator.

Given a prepared track, a point cloud and a query instant, the evaluator
selects the bracketing track snaps, composes the GAHM parameters at every
point by interpolating across isotachs (linear in radius), across quadrants
(inverse-distance weighted on azimuth) and across time (linear), and then
evaluates the closed-form gradient wind and pressure profiles. Points are
independent of one another, so the per-point work runs in parallel.
*/


use rayon::prelude::*;

use crate::atcf::{Snap, StormPosition, StormTranslation};
use crate::config::GahmConfig;
use crate::date::StormDate;
use crate::error::GahmError;
use crate::grid::{Point, PointCloud};
use crate::physical;
use crate::preprocessor::PreparedTrack;
use crate::solver::equations;
use crate::units::{convert, Length};

/// Floor on the composed GAHM Holland B before exponentiation
const MIN_HOLLAND_B: f64 = 0.5;

/// Inside this distance of the storm center the solution is pinned to the
/// eye values to avoid the coordinate singularity
lazy_static! {
    static ref EYE_RADIUS_M: f64 = convert(Length::NauticalMile, Length::Meter);
}

/// Wind vector and surface pressure at one point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Uvp {
    /// Eastward wind component in m/s
    pub u: f64,
    /// Northward wind component in m/s
    pub v: f64,
    /// Surface pressure in Pa
    pub p: f64,
}

impl Uvp {
    pub fn new(u: f64, v: f64, p: f64) -> Self {
        Uvp { u, v, p }
    }

    /// Wind magnitude in m/s
    pub fn magnitude(&self) -> f64 {
        self.u.hypot(self.v)
    }
}

/// The solution for a whole point cloud at one instant
#[derive(Debug, Clone, Default)]
pub struct VortexSolution {
    uvp: Vec<Uvp>,
}

impl VortexSolution {
    pub fn len(&self) -> usize {
        self.uvp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uvp.is_empty()
    }

    pub fn uvp(&self) -> &[Uvp] {
        &self.uvp
    }

    /// Eastward components in point order, m/s
    pub fn u_values(&self) -> Vec<f64> {
        self.uvp.iter().map(|s| s.u).collect()
    }

    /// Northward components in point order, m/s
    pub fn v_values(&self) -> Vec<f64> {
        self.uvp.iter().map(|s| s.v).collect()
    }

    /// Pressures in point order, millibars
    pub fn pressure_values_mbar(&self) -> Vec<f64> {
        self.uvp.iter().map(|s| s.p / 100.0).collect()
    }
}

/// The vortex parameters composed for one point at one time level
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct ParameterPack {
    radius_to_max_winds: f64,
    radius_to_max_winds_true: f64,
    vmax_boundary_layer: f64,
    isotach_speed_boundary_layer: f64,
    holland_b: f64,
}

impl ParameterPack {
    fn lerp(p0: &ParameterPack, p1: &ParameterPack, w: f64) -> ParameterPack {
        let lerp = |a: f64, b: f64| a * (1.0 - w) + b * w;
        ParameterPack {
            radius_to_max_winds: lerp(p0.radius_to_max_winds, p1.radius_to_max_winds),
            radius_to_max_winds_true: lerp(
                p0.radius_to_max_winds_true,
                p1.radius_to_max_winds_true,
            ),
            vmax_boundary_layer: lerp(p0.vmax_boundary_layer, p1.vmax_boundary_layer),
            isotach_speed_boundary_layer: lerp(
                p0.isotach_speed_boundary_layer,
                p1.isotach_speed_boundary_layer,
            ),
            holland_b: lerp(p0.holland_b, p1.holland_b),
        }
    }

    /// Inverse-distance weighting on the azimuth gap between two quadrant
    /// centers. `delta_angle` is measured from the first quadrant's center
    /// and spans [0, pi/2].
    fn angle_idw(p0: &ParameterPack, p1: &ParameterPack, delta_angle: f64) -> ParameterPack {
        let idw = |a: f64, b: f64| angle_idw(a, b, delta_angle);
        ParameterPack {
            radius_to_max_winds: idw(p0.radius_to_max_winds, p1.radius_to_max_winds),
            radius_to_max_winds_true: idw(
                p0.radius_to_max_winds_true,
                p1.radius_to_max_winds_true,
            ),
            vmax_boundary_layer: idw(p0.vmax_boundary_layer, p1.vmax_boundary_layer),
            isotach_speed_boundary_layer: idw(
                p0.isotach_speed_boundary_layer,
                p1.isotach_speed_boundary_layer,
            ),
            holland_b: idw(p0.holland_b, p1.holland_b),
        }
    }
}

/// Inverse-square angle weighting between two values a quarter circle
/// apart. Within a degree of either end the nearer value is used directly.
fn angle_idw(v0: f64, v1: f64, delta_angle: f64) -> f64 {
    const ANGLE_1: f64 = physical::DEG2RAD;
    const ANGLE_89: f64 = 89.0 * physical::DEG2RAD;
    const ANGLE_90: f64 = 90.0 * physical::DEG2RAD;
    if delta_angle < ANGLE_1 {
        v0
    } else if delta_angle > ANGLE_89 {
        v1
    } else {
        let w0 = 1.0 / (delta_angle * delta_angle);
        let w1 = 1.0 / ((ANGLE_90 - delta_angle) * (ANGLE_90 - delta_angle));
        (v0 * w0 + v1 * w1) / (w0 + w1)
    }
}

/// Location of a point relative to one snap: which isotach rings bracket it
/// in each of the two quadrants it falls between
#[derive(Debug, Clone, Copy)]
struct PointPosition {
    /// Quadrant whose center azimuth bounds the point clockwise
    base_quadrant: isize,
    /// Angle from the counterclockwise quadrant's center, [0, pi/2]
    quadrant_weight: f64,
    /// Ring bracket in the counterclockwise quadrant (`base_quadrant - 1`)
    ring_left: (usize, f64),
    /// Ring bracket in the base quadrant
    ring_right: (usize, f64),
}

/// The vortex evaluator. Holds an immutable reference to a prepared track
/// and owns the query point cloud.
#[derive(Debug)]
pub struct Vortex<'a> {
    track: &'a PreparedTrack,
    points: PointCloud,
    config: GahmConfig,
}

impl<'a> Vortex<'a> {
    /// Creates an evaluator over a prepared track and a point cloud
    pub fn new(track: &'a PreparedTrack, points: PointCloud) -> Self {
        Vortex {
            track,
            points,
            config: GahmConfig::default(),
        }
    }

    /// Creates an evaluator with a non-default configuration
    pub fn with_config(track: &'a PreparedTrack, points: PointCloud, config: GahmConfig) -> Self {
        Vortex {
            track,
            points,
            config,
        }
    }

    pub fn points(&self) -> &PointCloud {
        &self.points
    }

    /// Solves the vortex for every point at one instant.
    ///
    /// # Arguments
    ///
    /// * `date` - the query instant; instants outside the track clamp to
    ///   the nearest edge snap
    ///
    ///
    /// # Returns
    ///
    /// * A solution with one entry per query point, in point order
    ///
    pub fn solve(&self, date: StormDate) -> Result<VortexSolution, GahmError> {
        let track = self.track.track();
        if track.is_empty() {
            return Err(GahmError::Usage(
                "vortex queried against an empty track".to_string(),
            ));
        }

        let (i0, i1, time_weight) = track.bracket(date);
        let s0 = &track.snaps()[i0];
        let s1 = &track.snaps()[i1];

        let position = StormPosition::interpolate(&s0.position, &s1.position, time_weight);
        let translation =
            StormTranslation::interpolate(&s0.translation, &s1.translation, time_weight);
        let lerp = |a: f64, b: f64| a * (1.0 - time_weight) + b * time_weight;
        let p_background = lerp(s0.background_pressure, s1.background_pressure);
        let p_center = lerp(
            s0.central_pressure.unwrap_or(s0.background_pressure),
            s1.central_pressure.unwrap_or(s1.background_pressure),
        );

        let uvp = self
            .points
            .points()
            .par_iter()
            .map(|point| {
                self.solve_point(
                    point,
                    s0,
                    s1,
                    time_weight,
                    &position,
                    &translation,
                    p_center,
                    p_background,
                )
            })
            .collect();

        Ok(VortexSolution { uvp })
    }

    /// Evaluates a single point against the interpolated storm state
    #[allow(clippy::too_many_arguments)]
    fn solve_point(
        &self,
        point: &Point,
        s0: &Snap,
        s1: &Snap,
        time_weight: f64,
        position: &StormPosition,
        translation: &StormTranslation,
        p_center: f64,
        p_background: f64,
    ) -> Uvp {
        let distance = physical::distance(point, position.point());
        if distance < *EYE_RADIUS_M {
            return Uvp::new(0.0, 0.0, p_center * 100.0);
        }
        let azimuth = physical::azimuth(point, position.point());
        let fc = physical::coriolis(point.y()).abs();

        let pack0 = Vortex::parameter_pack(s0, distance, azimuth);
        let pack1 = Vortex::parameter_pack(s1, distance, azimuth);
        let mut pack = ParameterPack::lerp(&pack0, &pack1, time_weight);
        pack.holland_b = pack.holland_b.max(MIN_HOLLAND_B);

        let phi = equations::phi(
            pack.vmax_boundary_layer,
            pack.radius_to_max_winds,
            pack.holland_b,
            fc,
        );
        let wind_speed = equations::gahm_wind_speed(
            pack.radius_to_max_winds,
            pack.vmax_boundary_layer,
            distance,
            fc,
            pack.holland_b,
            phi,
        );
        let pressure_mbar = equations::gahm_pressure(
            p_center,
            p_background,
            distance,
            pack.radius_to_max_winds,
            pack.holland_b,
            phi,
        );

        // Tangential flow, rotated inward by the surface friction angle
        let u_rot = wind_speed * azimuth.cos();
        let v_rot = -wind_speed * azimuth.sin();
        let friction =
            physical::friction_angle(distance, pack.radius_to_max_winds_true);
        let latitude = position.y();
        let (mut u, mut v) = Vortex::rotate_winds(u_rot, v_rot, friction, latitude);

        // The translation asymmetry decays with the wind itself
        let speed_over_vmax = wind_speed / pack.vmax_boundary_layer;
        u += speed_over_vmax * translation.u();
        v += speed_over_vmax * translation.v();

        u *= self.config.one_to_ten_factor;
        v *= self.config.one_to_ten_factor;

        Uvp::new(u, v, pressure_mbar * 100.0)
    }

    /// Composes the parameter pack for one snap at a point's distance and
    /// azimuth: per-quadrant radial interpolation first, then angular
    /// inverse-distance weighting between the two bracketing quadrants
    fn parameter_pack(snap: &Snap, distance: f64, azimuth: f64) -> ParameterPack {
        let position = Vortex::point_position(snap, distance, azimuth);
        let left = Vortex::radial_pack(snap, position.base_quadrant - 1, position.ring_left);
        let right = Vortex::radial_pack(snap, position.base_quadrant, position.ring_right);
        ParameterPack::angle_idw(&left, &right, position.quadrant_weight)
    }

    /// Locates the point between quadrant centers and isotach rings
    fn point_position(snap: &Snap, distance: f64, azimuth: f64) -> PointPosition {
        let (base_quadrant, quadrant_weight) = Vortex::base_quadrant(azimuth);
        PointPosition {
            base_quadrant,
            quadrant_weight,
            ring_left: Vortex::base_ring(snap, base_quadrant - 1, distance),
            ring_right: Vortex::base_ring(snap, base_quadrant, distance),
        }
    }

    /// The base quadrant for an azimuth.
    ///
    /// Returns the quadrant whose center azimuth bounds the point clockwise
    /// and the angle from the counterclockwise neighbour's center, so a
    /// return of `(q, delta)` means the point sits `delta` radians past the
    /// center of quadrant `q - 1`.
    fn base_quadrant(azimuth: f64) -> (isize, f64) {
        const ANGLE_45: f64 = 45.0 * physical::DEG2RAD;
        const ANGLE_135: f64 = 135.0 * physical::DEG2RAD;
        const ANGLE_225: f64 = 225.0 * physical::DEG2RAD;
        const ANGLE_315: f64 = 315.0 * physical::DEG2RAD;
        if azimuth < ANGLE_45 {
            (0, ANGLE_45 + azimuth)
        } else if azimuth <= ANGLE_135 {
            (1, azimuth - ANGLE_45)
        } else if azimuth <= ANGLE_225 {
            (2, azimuth - ANGLE_135)
        } else if azimuth <= ANGLE_315 {
            (3, azimuth - ANGLE_225)
        } else {
            (0, azimuth - ANGLE_315)
        }
    }

    /// The isotach ring bracket for a quadrant at a distance.
    ///
    /// Rings are indexed from the innermost (the ring at the radius to
    /// maximum winds) outward. Inside the innermost ring the bracket clamps
    /// to `(0, 0.0)`; beyond the outermost ring it clamps to the outermost
    /// ring with weight 1.
    fn base_ring(snap: &Snap, quadrant: isize, distance: f64) -> (usize, f64) {
        let radii = snap.quadrant_radii(quadrant);
        let last = radii.len() - 1;
        if distance >= radii[last] {
            return (last, 1.0);
        }
        if distance <= radii[0] {
            return (0, 0.0);
        }
        let mut ring = 0;
        for k in 0..last {
            if radii[k] <= distance && distance < radii[k + 1] {
                ring = k;
                break;
            }
        }
        let weight = (distance - radii[ring]) / (radii[ring + 1] - radii[ring]);
        (ring, weight)
    }

    /// The parameter pack for one quadrant, interpolated along the ring
    /// bracket
    fn radial_pack(snap: &Snap, quadrant: isize, ring: (usize, f64)) -> ParameterPack {
        let (index, weight) = ring;
        let last = snap.num_isotachs() - 1;
        if index >= last {
            return Vortex::quadrant_pack(snap, last, quadrant);
        }
        let p0 = Vortex::quadrant_pack(snap, index, quadrant);
        let p1 = Vortex::quadrant_pack(snap, index + 1, quadrant);
        ParameterPack::lerp(&p0, &p1, weight)
    }

    /// The raw parameter pack of one ring in one quadrant. Ring index `k`
    /// counts from the innermost ring, which is the last isotach.
    fn quadrant_pack(snap: &Snap, ring: usize, quadrant: isize) -> ParameterPack {
        let isotach = &snap.isotachs[snap.num_isotachs() - 1 - ring];
        let q = &isotach.quadrants[quadrant];
        ParameterPack {
            radius_to_max_winds: q.radius_to_max_winds,
            radius_to_max_winds_true: q.radius_to_max_winds,
            vmax_boundary_layer: q.vmax_boundary_layer,
            isotach_speed_boundary_layer: q.isotach_speed_boundary_layer,
            holland_b: q.gahm_holland_b,
        }
    }

    /// Rotates a wind vector inward by the friction angle, cyclonically for
    /// the hemisphere of the storm
    fn rotate_winds(u: f64, v: f64, angle: f64, latitude: f64) -> (f64, f64) {
        let signed = latitude.signum() * angle;
        let (sin_a, cos_a) = signed.sin_cos();
        (u * cos_a - v * sin_a, u * sin_a + v * cos_a)
    }
}
