// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Configuration options that affect the numeric output.
*/

use crate::physical;
use crate::pressure::PressureMethod;

/// Tunable model parameters. The defaults reproduce the standard GAHM
/// configuration; no environment variables are consulted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GahmConfig {
    /// Estimator used for snaps with no reported central pressure
    pub pressure_method: PressureMethod,
    /// Reduction factor between boundary layer and 10m winds
    pub wind_reduction_factor: f64,
    /// Sustained-to-10-minute wind factor applied to output vectors
    pub one_to_ten_factor: f64,
    /// Background pressure in millibars used when the track has none
    pub background_pressure_mbar: f64,
}

impl Default for GahmConfig {
    fn default() -> Self {
        GahmConfig {
            pressure_method: PressureMethod::TwoSlope,
            wind_reduction_factor: physical::WIND_REDUCTION_FACTOR,
            one_to_ten_factor: physical::ONE_TO_TEN_FACTOR,
            background_pressure_mbar: physical::BACKGROUND_PRESSURE_MBAR,
        }
    }
}
