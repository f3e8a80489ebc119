// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`gahm` computes tropical cyclone surface wind and pressure fields from
best-track (ATCF) data using the Generalized Asymmetric Holland Model.

The usual pipeline is:

1. Read a best-track file into a [`Track`](crate::atcf::Track).
2. Run the [`Preprocessor`](crate::preprocessor::Preprocessor) to fill in
   missing data, reconstruct storm translation and solve the per-quadrant
   GAHM parameters, yielding a [`PreparedTrack`](crate::preprocessor::PreparedTrack).
3. Build a [`Vortex`](crate::vortex::Vortex) over a point cloud and query
   it for any date to obtain wind vectors and surface pressure.
*/
#[macro_use]
extern crate lazy_static;

pub mod assumptions;
pub mod atcf;
pub mod circular_array;
pub mod config;
pub mod date;
pub mod error;
pub mod grid;
pub mod output;
pub mod physical;
pub mod preprocessor;
pub mod pressure;
pub mod solver;
pub mod units;
pub mod vortex;

// Re-exports.
pub use assumptions::{Assumption, Assumptions, Severity};
pub use atcf::Track;
pub use config::GahmConfig;
pub use date::StormDate;
pub use error::GahmError;
pub use grid::{Point, PointCloud, WindGrid};
pub use output::OwiAsciiDomain;
pub use preprocessor::{PreparedTrack, Preprocessor};
pub use vortex::{Uvp, Vortex, VortexSolution};
