// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
The Oceanweather WIN/PRE text writer.

Two files are produced: a pressure file and a wind file. Each begins with a
single header line naming the run's start and end instants; every timestep
then emits a record header followed by the field values, eight per line.
Pressure records are millibars; wind records carry the u field and then the
v field, each the full grid.
*/

pub mod error;

#[cfg(test)]
mod test;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub use error::OwiError;

use crate::date::StormDate;
use crate::grid::WindGrid;
use crate::vortex::VortexSolution;

const VALUES_PER_LINE: usize = 8;

/// A single Oceanweather output domain: one pressure file and one wind file
/// over a fixed structured grid and a constant timestep.
#[derive(Debug)]
pub struct OwiAsciiDomain {
    grid: WindGrid,
    start_date: StormDate,
    end_date: StormDate,
    previous_date: StormDate,
    timestep_seconds: i64,
    pressure_path: String,
    wind_path: String,
    pressure_file: BufWriter<File>,
    wind_file: BufWriter<File>,
    is_open: bool,
}

impl OwiAsciiDomain {
    /// Opens the two output files and writes their headers.
    ///
    /// # Arguments
    ///
    /// * `grid` - the structured output grid
    ///
    /// * `start_date`, `end_date` - the run's time span
    ///
    /// * `timestep_seconds` - spacing between records
    ///
    /// * `pressure_path`, `wind_path` - file names to create
    ///
    ///
    /// # Returns
    ///
    /// * An open domain ready for the first record, or the error that
    ///   prevented opening it
    ///
    pub fn new<P: AsRef<Path>>(
        grid: WindGrid,
        start_date: StormDate,
        end_date: StormDate,
        timestep_seconds: i64,
        pressure_path: P,
        wind_path: P,
    ) -> Result<Self, OwiError> {
        if start_date >= end_date {
            return Err(OwiError::InvalidDateRange);
        }
        let pressure_path = pressure_path.as_ref().display().to_string();
        let wind_path = wind_path.as_ref().display().to_string();

        let pressure_file = BufWriter::new(
            File::create(&pressure_path)
                .map_err(|e| OwiError::FileCreate(pressure_path.clone(), e))?,
        );
        let wind_file = BufWriter::new(
            File::create(&wind_path).map_err(|e| OwiError::FileCreate(wind_path.clone(), e))?,
        );

        let mut domain = OwiAsciiDomain {
            grid,
            start_date,
            end_date,
            previous_date: start_date.add_seconds(-timestep_seconds),
            timestep_seconds,
            pressure_path,
            wind_path,
            pressure_file,
            wind_file,
            is_open: true,
        };
        domain.write_headers()?;
        Ok(domain)
    }

    /// Writes one timestep. Records must arrive in order, one timestep
    /// apart, and must not pass the declared end date.
    ///
    /// # Arguments
    ///
    /// * `date` - instant of this record
    ///
    /// * `solution` - the vortex solution aligned to the domain grid
    ///
    ///
    /// # Returns
    ///
    /// * `Ok(())` once both files have accepted the record
    ///
    pub fn write(&mut self, date: StormDate, solution: &VortexSolution) -> Result<(), OwiError> {
        if !self.is_open {
            return Err(OwiError::WriteAfterClose);
        }
        let expected = self.previous_date.add_seconds(self.timestep_seconds);
        if date != expected {
            return Err(OwiError::NonConstantTimeSpacing {
                expected: expected.to_string(),
                got: date.to_string(),
            });
        }
        if date > self.end_date {
            return Err(OwiError::PastEndDate {
                end: self.end_date.to_string(),
            });
        }
        let expected_len = self.grid.nx() * self.grid.ny();
        if solution.len() != expected_len {
            return Err(OwiError::SolutionShape {
                expected: expected_len,
                got: solution.len(),
                nx: self.grid.nx(),
                ny: self.grid.ny(),
            });
        }

        let record_header = self.record_header(date);
        let pressure_path = self.pressure_path.clone();
        let wind_path = self.wind_path.clone();

        self.pressure_file
            .write_all(record_header.as_bytes())
            .map_err(|e| OwiError::FileWrite(pressure_path.clone(), e))?;
        self.wind_file
            .write_all(record_header.as_bytes())
            .map_err(|e| OwiError::FileWrite(wind_path.clone(), e))?;

        Self::write_record(
            &mut self.pressure_file,
            &pressure_path,
            &solution.pressure_values_mbar(),
        )?;
        Self::write_record(&mut self.wind_file, &wind_path, &solution.u_values())?;
        Self::write_record(&mut self.wind_file, &wind_path, &solution.v_values())?;

        self.previous_date = date;
        Ok(())
    }

    /// Flushes and closes both files; further writes are rejected
    pub fn close(&mut self) -> Result<(), OwiError> {
        if self.is_open {
            self.pressure_file
                .flush()
                .map_err(|e| OwiError::FileWrite(self.pressure_path.clone(), e))?;
            self.wind_file
                .flush()
                .map_err(|e| OwiError::FileWrite(self.wind_path.clone(), e))?;
            self.is_open = false;
        }
        Ok(())
    }

    pub fn grid(&self) -> &WindGrid {
        &self.grid
    }

    pub fn start_date(&self) -> StormDate {
        self.start_date
    }

    pub fn end_date(&self) -> StormDate {
        self.end_date
    }

    fn write_headers(&mut self) -> Result<(), OwiError> {
        let header = format!(
            "Oceanweather WIN/PRE Format                            {}     {}\n",
            self.start_date.format_header(),
            self.end_date.format_header()
        );
        self.pressure_file
            .write_all(header.as_bytes())
            .map_err(|e| OwiError::FileWrite(self.pressure_path.clone(), e))?;
        self.wind_file
            .write_all(header.as_bytes())
            .map_err(|e| OwiError::FileWrite(self.wind_path.clone(), e))?;
        Ok(())
    }

    fn record_header(&self, date: StormDate) -> String {
        format!(
            "iLat={:4}iLong={:4}DX={:6.4}DY={:6.4}SWLat={:8.5}SWLon={:8.4}DT={}\n",
            self.grid.ny(),
            self.grid.nx(),
            self.grid.dx(),
            self.grid.dy(),
            self.grid.yll(),
            self.grid.xll(),
            date.format_record()
        )
    }

    fn write_record(
        file: &mut BufWriter<File>,
        path: &str,
        values: &[f64],
    ) -> Result<(), OwiError> {
        let mut on_line = 0;
        for value in values {
            write!(file, "{:10.4}", value)
                .map_err(|e| OwiError::FileWrite(path.to_string(), e))?;
            on_line += 1;
            if on_line == VALUES_PER_LINE {
                writeln!(file).map_err(|e| OwiError::FileWrite(path.to_string(), e))?;
                on_line = 0;
            }
        }
        if on_line != 0 {
            writeln!(file).map_err(|e| OwiError::FileWrite(path.to_string(), e))?;
        }
        Ok(())
    }
}
