// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
A ledger of data-quality assumptions made while preparing a track.

Best-track files are routinely incomplete: quadrant radii are missing,
central pressures are unreported, storms sit still between fixes. The
preprocessor patches all of these, and each patch is recorded here so a
downstream user can audit what the model invented versus what was observed.
*/


use std::fmt;

use log::{debug, warn};

/// How consequential an assumption is for the quality of the wind field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Routine gap filling with little effect on the solution
    Minor,
    /// The solution shape is materially affected
    Major,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Severity::Minor => "minor",
                Severity::Major => "major",
            }
        )
    }
}

/// A single recorded assumption
#[derive(Debug, Clone)]
pub struct Assumption {
    severity: Severity,
    message: String,
}

impl Assumption {
    pub fn new(severity: Severity, message: String) -> Self {
        Assumption { severity, message }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Assumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// The ordered collection of assumptions recorded during preprocessing
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    assumptions: Vec<Assumption>,
}

impl Assumptions {
    pub fn new() -> Self {
        Assumptions::default()
    }

    /// Records an assumption, mirroring it to the log. Major assumptions
    /// are logged as warnings, minor ones at debug level.
    pub fn add(&mut self, severity: Severity, message: String) {
        match severity {
            Severity::Major => warn!("{}", message),
            Severity::Minor => debug!("{}", message),
        }
        self.assumptions.push(Assumption::new(severity, message));
    }

    pub fn len(&self) -> usize {
        self.assumptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assumptions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assumption> {
        self.assumptions.iter()
    }

    /// Number of recorded assumptions at a given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.assumptions
            .iter()
            .filter(|a| a.severity() == severity)
            .count()
    }
}
