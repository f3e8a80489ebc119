// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Isotachs and their per-quadrant data.
*/

use num_derive::FromPrimitive;

use crate::circular_array::CircularArray;
use crate::physical;

/// The four storm quadrants in their fixed slot order
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum Quadrant {
    NorthEast = 0,
    SouthEast = 1,
    SouthWest = 2,
    NorthWest = 3,
}

impl Quadrant {
    /// Center azimuth of the quadrant in radians
    pub fn azimuth(&self) -> f64 {
        physical::QUADRANT_ANGLES[*self as usize]
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Quadrant::NorthEast => "NE",
                Quadrant::SouthEast => "SE",
                Quadrant::SouthWest => "SW",
                Quadrant::NorthWest => "NW",
            }
        )
    }
}

/// One quadrant of one isotach: the observed radius plus the parameters the
/// GAHM solver fills in during preprocessing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IsotachQuadrant {
    /// Observed (or imputed) isotach radius in meters; 0 means missing
    pub isotach_radius: f64,
    /// Whether the radius was present in the input rather than imputed
    pub observed: bool,
    /// Solved radius to maximum winds for this quadrant in meters
    pub radius_to_max_winds: f64,
    /// Solved GAHM Holland B for this quadrant
    pub gahm_holland_b: f64,
    /// Maximum boundary layer wind speed for this quadrant in m/s
    pub vmax_boundary_layer: f64,
    /// Storm-relative isotach speed at the boundary layer in m/s
    pub isotach_speed_boundary_layer: f64,
    /// Whether the GAHM solver converged for this quadrant
    pub solver_converged: bool,
}

/// A ring of equal wind speed around the storm, carried per quadrant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Isotach {
    /// Wind speed of the isotach in m/s
    pub wind_speed: f64,
    /// The four quadrants, in NE/SE/SW/NW slot order
    pub quadrants: CircularArray<IsotachQuadrant, 4>,
}

impl Isotach {
    /// Creates an isotach from a wind speed and four quadrant radii. A zero
    /// radius marks the quadrant as missing.
    ///
    /// # Arguments
    ///
    /// * `wind_speed` - isotach wind speed in m/s
    ///
    /// * `radii` - observed radii in meters in NE/SE/SW/NW order
    ///
    ///
    /// # Returns
    ///
    /// * A populated Isotach with solver fields zeroed
    ///
    pub fn new(wind_speed: f64, radii: [f64; 4]) -> Self {
        let mut quadrants = CircularArray::new([IsotachQuadrant::default(); 4]);
        for (i, &radius) in radii.iter().enumerate() {
            quadrants.set(
                i as isize,
                IsotachQuadrant {
                    isotach_radius: radius,
                    observed: radius > 0.0,
                    ..Default::default()
                },
            );
        }
        Isotach {
            wind_speed,
            quadrants,
        }
    }

    /// Number of quadrants with a strictly positive radius
    pub fn num_observed_quadrants(&self) -> usize {
        self.quadrants
            .iter()
            .filter(|q| q.isotach_radius > 0.0)
            .count()
    }
}
