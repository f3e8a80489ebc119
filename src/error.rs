// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Structs and helper methods for error handling
*/

use thiserror::Error;

/// GahmError subtypes
#[derive(Error, Debug)]
pub enum GahmError {
    /// An error derived from `AtcfError`.
    #[error("{0}")]
    Atcf(#[from] crate::atcf::error::AtcfError),

    /// An error derived from `SolverError`.
    #[error("{0}")]
    Solver(#[from] crate::solver::error::SolverError),

    /// An error derived from `OwiError`.
    #[error("{0}")]
    Owi(#[from] crate::output::error::OwiError),

    /// An error associated with calling the library in an invalid order or
    /// with invalid arguments.
    #[error("Usage error: {0}")]
    Usage(String),
}
