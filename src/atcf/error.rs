// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Errors associated with reading and validating best-track files.
*/
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtcfError {
    #[error("Unable to open best-track file {0}: {1}")]
    FileOpen(String, std::io::Error),

    #[error("Error reading best-track file {0}: {1}")]
    FileRead(String, std::io::Error),

    #[error("Line {line}: expected at least {expected} comma separated fields, found {found}")]
    InsufficientFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: could not parse field {field} ({name}) from {value:?}")]
    MalformedField {
        line: usize,
        field: usize,
        name: &'static str,
        value: String,
    },

    #[error("Malformed date token {0:?} (expected YYYYMMDDHH)")]
    MalformedDateToken(String),

    #[error("Invalid date components {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")]
    InvalidDateComponents {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    },

    #[error("Line {line}: unrecognised basin token {token:?}")]
    InvalidBasin { line: usize, token: String },

    #[error(
        "Line {line}: basin/storm id {got} does not match {expected} from earlier lines; \
         the file mixes storms"
    )]
    InconsistentStorm {
        line: usize,
        expected: String,
        got: String,
    },

    #[error("Best-track file {0} contains no usable track data")]
    EmptyTrack(String),

    #[error("Track is not monotonic in time: snap at {0} repeats or precedes an earlier snap")]
    NonMonotonicTrack(String),

    #[error("Snap at {date}: vmax must be positive, found {vmax} m/s")]
    NonPositiveVmax { date: String, vmax: f64 },

    #[error(
        "Snap at {date}: central pressure {central} mbar is not below the background \
         pressure {background} mbar"
    )]
    PressureOrdering {
        date: String,
        central: f64,
        background: f64,
    },
}
