// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
A single best-track fix (snap) and its supporting types.
*/

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::atcf::error::AtcfError;
use crate::atcf::isotach::Isotach;
use crate::date::StormDate;
use crate::grid::Point;
use crate::physical;
use crate::units::{convert, Length, Speed};

lazy_static! {
    // Latitude/longitude tokens are tenths of degrees with a trailing
    // hemisphere letter, e.g. "251N" or "800W".
    static ref RE_LATITUDE: Regex = Regex::new(r"^(\d+)([NS])$").unwrap();
    static ref RE_LONGITUDE: Regex = Regex::new(r"^(\d+)([EW])$").unwrap();
}

/// Tropical cyclone basins recognised in best-track files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Basin {
    NorthAtlantic,
    SouthAtlantic,
    EastPacific,
    CentralPacific,
    WestPacific,
    NorthIndian,
    SouthernHemisphere,
}

impl FromStr for Basin {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "AL" => Ok(Basin::NorthAtlantic),
            "SL" => Ok(Basin::SouthAtlantic),
            "EP" => Ok(Basin::EastPacific),
            "CP" => Ok(Basin::CentralPacific),
            "WP" => Ok(Basin::WestPacific),
            "IO" => Ok(Basin::NorthIndian),
            "SH" => Ok(Basin::SouthernHemisphere),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Basin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Basin::NorthAtlantic => "AL",
                Basin::SouthAtlantic => "SL",
                Basin::EastPacific => "EP",
                Basin::CentralPacific => "CP",
                Basin::WestPacific => "WP",
                Basin::NorthIndian => "IO",
                Basin::SouthernHemisphere => "SH",
            }
        )
    }
}

/// The storm center location, with linear interpolation between fixes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StormPosition {
    point: Point,
}

impl StormPosition {
    pub fn new(x: f64, y: f64) -> Self {
        StormPosition {
            point: Point::new(x, y),
        }
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }

    /// Linear interpolation between two positions with weight `w` in [0, 1]
    pub fn interpolate(a: &StormPosition, b: &StormPosition, w: f64) -> StormPosition {
        StormPosition::new(
            a.x() * (1.0 - w) + b.x() * w,
            a.y() * (1.0 - w) + b.y() * w,
        )
    }
}

/// Storm translation as a speed and heading. The heading is measured
/// clockwise from north in radians, [0, 2*pi).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StormTranslation {
    speed: f64,
    direction: f64,
}

impl StormTranslation {
    pub fn new(speed: f64, direction: f64) -> Self {
        StormTranslation { speed, direction }
    }

    /// Translation speed in m/s
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Translation heading in radians, clockwise from north
    pub fn direction(&self) -> f64 {
        self.direction
    }

    /// Eastward component in m/s
    pub fn u(&self) -> f64 {
        self.speed * self.direction.sin()
    }

    /// Northward component in m/s
    pub fn v(&self) -> f64 {
        self.speed * self.direction.cos()
    }

    /// Interpolates two translations: linear in speed, angular in heading.
    /// The heading goes through the atan2-of-components form so the result
    /// never takes the long way around the circle.
    pub fn interpolate(a: &StormTranslation, b: &StormTranslation, w: f64) -> StormTranslation {
        let speed = a.speed * (1.0 - w) + b.speed * w;
        let sin = (1.0 - w) * a.direction.sin() + w * b.direction.sin();
        let cos = (1.0 - w) * a.direction.cos() + w * b.direction.cos();
        StormTranslation {
            speed,
            direction: physical::normalize_angle(sin.atan2(cos)),
        }
    }
}

/// One fix of the storm track: the storm state at a single instant together
/// with its observed isotachs.
#[derive(Debug, Clone)]
pub struct Snap {
    /// Instant of the fix
    pub date: StormDate,
    /// Basin the storm belongs to
    pub basin: Basin,
    /// Storm number within the basin and year
    pub storm_id: i32,
    /// Storm name, empty when the file carries none
    pub storm_name: String,
    /// Storm center position
    pub position: StormPosition,
    /// Central pressure in millibars; `None` until observed or estimated
    pub central_pressure: Option<f64>,
    /// Background pressure in millibars
    pub background_pressure: f64,
    /// Maximum sustained 10m wind speed in m/s
    pub vmax: f64,
    /// Nominal radius to maximum winds in meters
    pub radius_to_max_winds: f64,
    /// Maximum wind speed at the top of the boundary layer in m/s; filled
    /// by the preprocessor
    pub vmax_boundary_layer: f64,
    /// Storm translation; filled by the preprocessor
    pub translation: StormTranslation,
    /// Isotachs in ascending wind speed order
    pub isotachs: Vec<Isotach>,
}

impl Snap {
    /// Parses one best-track line into a single-isotach snap.
    ///
    /// Repeated lines for the same instant are merged by the track loader,
    /// so every parsed line yields exactly one snap holding one isotach. A
    /// line whose isotach speed field is zero is the radius-to-maximum-wind
    /// record; it becomes a ring at the nominal RMW travelling at vmax.
    ///
    /// # Arguments
    ///
    /// * `line` - one non-empty line of the best-track file
    ///
    /// * `line_number` - 1-based line number, used in error messages
    ///
    /// * `background_pressure` - background pressure in millibars to assign
    ///
    ///
    /// # Returns
    ///
    /// * A populated Snap, or the parse error for this line
    ///
    pub fn from_atcf_line(
        line: &str,
        line_number: usize,
        background_pressure: f64,
    ) -> Result<Snap, AtcfError> {
        const MIN_FIELDS: usize = 28;
        let kt2ms = convert(Speed::Knot, Speed::MetersPerSecond);
        let nmi2m = convert(Length::NauticalMile, Length::Meter);

        let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
        if tokens.len() < MIN_FIELDS {
            return Err(AtcfError::InsufficientFields {
                line: line_number,
                expected: MIN_FIELDS,
                found: tokens.len(),
            });
        }

        let basin = Basin::from_str(tokens[0]).map_err(|_| AtcfError::InvalidBasin {
            line: line_number,
            token: tokens[0].to_string(),
        })?;
        let storm_id: i32 = parse_numeric(&tokens, 1, line_number, "storm id")?;

        let date = StormDate::parse_atcf(tokens[2])?;
        let tau: i64 = parse_numeric(&tokens, 5, line_number, "forecast hour")?;
        let date = date.add_hours(tau);

        let latitude = parse_latitude(tokens[6], line_number)?;
        let longitude = parse_longitude(tokens[7], line_number)?;

        let vmax: f64 = parse_numeric::<f64>(&tokens, 8, line_number, "vmax")? * kt2ms;
        let central_pressure: f64 = parse_numeric(&tokens, 9, line_number, "central pressure")?;
        let radius_to_max_winds: f64 =
            parse_numeric::<f64>(&tokens, 19, line_number, "radius to max winds")? * nmi2m;
        let storm_name = tokens[27].to_string();

        let isotach_speed: f64 =
            parse_numeric::<f64>(&tokens, 11, line_number, "isotach speed")? * kt2ms;
        let isotach = if isotach_speed == 0.0 {
            Isotach::new(vmax, [radius_to_max_winds; 4])
        } else {
            Isotach::new(
                isotach_speed,
                [
                    parse_numeric::<f64>(&tokens, 13, line_number, "ne isotach radius")? * nmi2m,
                    parse_numeric::<f64>(&tokens, 14, line_number, "se isotach radius")? * nmi2m,
                    parse_numeric::<f64>(&tokens, 15, line_number, "sw isotach radius")? * nmi2m,
                    parse_numeric::<f64>(&tokens, 16, line_number, "nw isotach radius")? * nmi2m,
                ],
            )
        };

        Ok(Snap {
            date,
            basin,
            storm_id,
            storm_name,
            position: StormPosition::new(longitude, latitude),
            central_pressure: if central_pressure > 0.0 {
                Some(central_pressure)
            } else {
                None
            },
            background_pressure,
            vmax,
            radius_to_max_winds,
            vmax_boundary_layer: 0.0,
            translation: StormTranslation::default(),
            isotachs: vec![isotach],
        })
    }

    /// Appends an isotach, keeping the ascending wind speed order
    pub fn add_isotach(&mut self, isotach: Isotach) {
        let at = self
            .isotachs
            .partition_point(|i| i.wind_speed <= isotach.wind_speed);
        self.isotachs.insert(at, isotach);
    }

    /// Number of isotachs carried by the snap
    pub fn num_isotachs(&self) -> usize {
        self.isotachs.len()
    }

    /// Latitude of the storm center in degrees
    pub fn latitude(&self) -> f64 {
        self.position.y()
    }

    /// Isotach radii for one quadrant ordered from the innermost ring
    /// (highest wind speed) outward. Ring index `k` corresponds to isotach
    /// index `num_isotachs() - 1 - k`.
    pub fn quadrant_radii(&self, quadrant: isize) -> Vec<f64> {
        self.isotachs
            .iter()
            .rev()
            .map(|iso| iso.quadrants[quadrant].isotach_radius)
            .collect()
    }
}

fn parse_numeric<T: FromStr + Default>(
    tokens: &[&str],
    field: usize,
    line: usize,
    name: &'static str,
) -> Result<T, AtcfError> {
    let token = tokens[field];
    if token.is_empty() {
        return Ok(T::default());
    }
    token.parse().map_err(|_| AtcfError::MalformedField {
        line,
        field,
        name,
        value: token.to_string(),
    })
}

fn parse_latitude(token: &str, line: usize) -> Result<f64, AtcfError> {
    let captures = RE_LATITUDE
        .captures(token)
        .ok_or_else(|| AtcfError::MalformedField {
            line,
            field: 6,
            name: "latitude",
            value: token.to_string(),
        })?;
    let value: f64 = captures[1].parse().map_err(|_| AtcfError::MalformedField {
        line,
        field: 6,
        name: "latitude",
        value: token.to_string(),
    })?;
    let value = value / 10.0;
    Ok(if &captures[2] == "S" { -value } else { value })
}

fn parse_longitude(token: &str, line: usize) -> Result<f64, AtcfError> {
    let captures = RE_LONGITUDE
        .captures(token)
        .ok_or_else(|| AtcfError::MalformedField {
            line,
            field: 7,
            name: "longitude",
            value: token.to_string(),
        })?;
    let value: f64 = captures[1].parse().map_err(|_| AtcfError::MalformedField {
        line,
        field: 7,
        name: "longitude",
        value: token.to_string(),
    })?;
    let value = value / 10.0;
    Ok(if &captures[2] == "W" { -value } else { value })
}
