// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Errors associated with the GAHM nonlinear solver.
*/
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error(
        "No root bracket for radius to maximum winds: isotach speed {isotach_speed} m/s is \
         not attainable inside radius {isotach_radius} m"
    )]
    CannotBracket {
        isotach_radius: f64,
        isotach_speed: f64,
    },

    #[error("GAHM Holland B iteration produced a non-finite value")]
    Diverged,
}
