// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Errors associated with writing Oceanweather files.
*/
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OwiError {
    #[error("Unable to create output file {0}: {1}")]
    FileCreate(String, std::io::Error),

    #[error("Error writing output file {0}: {1}")]
    FileWrite(String, std::io::Error),

    #[error("Write attempted after the domain was closed")]
    WriteAfterClose,

    #[error("Non-constant time spacing: expected a record at {expected}, got {got}")]
    NonConstantTimeSpacing { expected: String, got: String },

    #[error("Attempt to write past the declared end date {end}")]
    PastEndDate { end: String },

    #[error(
        "Solution has {got} points but the output grid declares {expected} ({nx} x {ny})"
    )]
    SolutionShape {
        expected: usize,
        got: usize,
        nx: usize,
        ny: usize,
    },

    #[error("The start date must precede the end date")]
    InvalidDateRange,
}
