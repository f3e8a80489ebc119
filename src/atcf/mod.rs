// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
The best-track (ATCF) file loader and the in-memory track model.
*/

pub mod error;
mod isotach;
mod snap;

#[cfg(test)]
mod test;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub use error::AtcfError;
pub use isotach::{Isotach, IsotachQuadrant, Quadrant};
pub use snap::{Basin, Snap, StormPosition, StormTranslation};

use crate::date::StormDate;
use crate::physical;

/// The scalar storm state interpolated to an arbitrary instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormParameters {
    /// Interpolated storm center
    pub position: StormPosition,
    /// Interpolated translation (linear speed, angular heading)
    pub translation: StormTranslation,
    /// Central pressure in millibars
    pub central_pressure: f64,
    /// Background pressure in millibars
    pub background_pressure: f64,
    /// Maximum sustained 10m wind in m/s
    pub vmax: f64,
    /// Nominal radius to maximum winds in meters
    pub radius_to_max_winds: f64,
    /// Maximum boundary layer wind in m/s
    pub vmax_boundary_layer: f64,
}

/// An ordered sequence of track snaps for a single storm
#[derive(Debug, Clone)]
pub struct Track {
    snaps: Vec<Snap>,
}

impl Default for Track {
    fn default() -> Self {
        Track::new()
    }
}

impl Track {
    /// Creates an empty track to be populated with [`add_snap`](Track::add_snap).
    /// Tracks read from a file are validated; in-memory tracks are the
    /// caller's responsibility.
    pub fn new() -> Self {
        Track { snaps: vec![] }
    }

    /// Reads a best-track file.
    ///
    /// Empty lines are skipped. Any other line that fails to parse is a
    /// fatal error; the loader never silently drops data. Lines sharing an
    /// instant are merged into one snap whose isotachs accumulate.
    ///
    /// # Arguments
    ///
    /// * `path` - path of the best-track file
    ///
    ///
    /// # Returns
    ///
    /// * A validated Track, or the first error encountered
    ///
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Track, AtcfError> {
        Track::from_file_with_background_pressure(path, physical::BACKGROUND_PRESSURE_MBAR)
    }

    /// Reads a best-track file, assigning a caller-chosen background
    /// pressure to every snap.
    pub fn from_file_with_background_pressure<P: AsRef<Path>>(
        path: P,
        background_pressure: f64,
    ) -> Result<Track, AtcfError> {
        let display_path = path.as_ref().display().to_string();
        let file = File::open(path.as_ref())
            .map_err(|e| AtcfError::FileOpen(display_path.clone(), e))?;

        let mut track = Track::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| AtcfError::FileRead(display_path.clone(), e))?;
            if line.trim().is_empty() {
                continue;
            }
            let snap = Snap::from_atcf_line(&line, index + 1, background_pressure)?;
            if let Some(first) = track.snaps.first() {
                if first.basin != snap.basin || first.storm_id != snap.storm_id {
                    return Err(AtcfError::InconsistentStorm {
                        line: index + 1,
                        expected: format!("{}{:02}", first.basin, first.storm_id),
                        got: format!("{}{:02}", snap.basin, snap.storm_id),
                    });
                }
            }
            track.add_snap(snap);
        }

        if track.snaps.is_empty() {
            return Err(AtcfError::EmptyTrack(display_path));
        }
        track.validate()?;
        Ok(track)
    }

    /// Adds a snap, merging it into an existing snap when the instant is
    /// already present
    pub fn add_snap(&mut self, snap: Snap) {
        match self.snaps.iter_mut().find(|s| s.date == snap.date) {
            Some(existing) => {
                for isotach in snap.isotachs {
                    existing.add_isotach(isotach);
                }
            }
            None => {
                let at = self.snaps.partition_point(|s| s.date < snap.date);
                self.snaps.insert(at, snap);
            }
        }
    }

    fn validate(&self) -> Result<(), AtcfError> {
        for pair in self.snaps.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(AtcfError::NonMonotonicTrack(pair[1].date.to_string()));
            }
        }
        for snap in &self.snaps {
            if snap.vmax <= 0.0 {
                return Err(AtcfError::NonPositiveVmax {
                    date: snap.date.to_string(),
                    vmax: snap.vmax,
                });
            }
            if let Some(central) = snap.central_pressure {
                if central >= snap.background_pressure {
                    return Err(AtcfError::PressureOrdering {
                        date: snap.date.to_string(),
                        central,
                        background: snap.background_pressure,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snaps.is_empty()
    }

    pub fn snaps(&self) -> &[Snap] {
        &self.snaps
    }

    pub(crate) fn snaps_mut(&mut self) -> &mut [Snap] {
        &mut self.snaps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snap> {
        self.snaps.iter()
    }

    /// Locates the snap pair bracketing an instant, clamping to the track
    /// edges.
    ///
    /// # Arguments
    ///
    /// * `date` - the query instant
    ///
    ///
    /// # Returns
    ///
    /// * `(i0, i1, w)` where snaps `i0` and `i1` bracket the instant and
    ///   `w` is the time weight in [0, 1]. At or before the first snap the
    ///   result is `(0, 0, 0.0)`; at or past the last snap it is
    ///   `(last, last, 1.0)`.
    ///
    pub fn bracket(&self, date: StormDate) -> (usize, usize, f64) {
        let last = self.snaps.len() - 1;
        if date <= self.snaps[0].date {
            return (0, 0, 0.0);
        }
        if date >= self.snaps[last].date {
            return (last, last, 1.0);
        }
        let i1 = self.snaps.partition_point(|s| s.date <= date);
        let i0 = i1 - 1;
        let w = (date - self.snaps[i0].date) as f64
            / (self.snaps[i1].date - self.snaps[i0].date) as f64;
        (i0, i1, w)
    }

    /// Interpolates the scalar storm state to an instant. Available once
    /// the track has been preprocessed; before that the translation and
    /// boundary layer fields are zero.
    pub fn storm_parameters(&self, date: StormDate) -> StormParameters {
        let (i0, i1, w) = self.bracket(date);
        let s0 = &self.snaps[i0];
        let s1 = &self.snaps[i1];
        let lerp = |a: f64, b: f64| a * (1.0 - w) + b * w;
        StormParameters {
            position: StormPosition::interpolate(&s0.position, &s1.position, w),
            translation: StormTranslation::interpolate(&s0.translation, &s1.translation, w),
            central_pressure: lerp(
                s0.central_pressure.unwrap_or(s0.background_pressure),
                s1.central_pressure.unwrap_or(s1.background_pressure),
            ),
            background_pressure: lerp(s0.background_pressure, s1.background_pressure),
            vmax: lerp(s0.vmax, s1.vmax),
            radius_to_max_winds: lerp(s0.radius_to_max_winds, s1.radius_to_max_winds),
            vmax_boundary_layer: lerp(s0.vmax_boundary_layer, s1.vmax_boundary_layer),
        }
    }
}
