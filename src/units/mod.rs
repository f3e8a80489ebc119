// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Dimensioned unit conversions.

Each unit carries the factor that converts one SI base unit into itself, so
`convert(from, to) * value_in_from == value_in_to`. Conversions are only
possible within a dimension; the type system rejects `convert(Knot, Meter)`.
*/


use std::f64::consts::PI;

/// A unit of measure that can be converted within its own dimension
pub trait Unit: Copy {
    /// Number of this unit per SI base unit
    fn factor(&self) -> f64;
}

/// Units of length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Meter,
    Kilometer,
    Foot,
    Mile,
    NauticalMile,
}

impl Unit for Length {
    fn factor(&self) -> f64 {
        match self {
            Length::Meter => 1.0,
            Length::Kilometer => 1.0 / 1000.0,
            Length::Foot => 3.28084,
            Length::Mile => 1.0 / 1609.34,
            Length::NauticalMile => 1.0 / 1852.0,
        }
    }
}

/// Units of speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    MetersPerSecond,
    MilesPerHour,
    Knot,
    KilometersPerHour,
}

impl Unit for Speed {
    fn factor(&self) -> f64 {
        match self {
            Speed::MetersPerSecond => 1.0,
            Speed::MilesPerHour => 2.23694,
            Speed::Knot => 1.0 / 0.514444,
            Speed::KilometersPerHour => 3.6,
        }
    }
}

/// Units of pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pressure {
    Pascal,
    Millibar,
    Bar,
    MetersH2O,
}

impl Unit for Pressure {
    fn factor(&self) -> f64 {
        match self {
            Pressure::Pascal => 100000.0,
            Pressure::Millibar => 1000.0,
            Pressure::Bar => 1.0,
            Pressure::MetersH2O => 10.197442889221,
        }
    }
}

/// Units of angle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Angle {
    Radian,
    Degree,
}

impl Unit for Angle {
    fn factor(&self) -> f64 {
        match self {
            Angle::Radian => 1.0,
            Angle::Degree => 180.0 / PI,
        }
    }
}

/// The multiplier taking a value in `from` units to `to` units
///
/// # Arguments
///
/// * `from` - unit the value is currently expressed in
///
/// * `to` - unit the value should be expressed in
///
///
/// # Returns
///
/// * The conversion factor such that `convert(from, to) * value_in_from`
///   is the value in `to` units
///
pub fn convert<U: Unit>(from: U, to: U) -> f64 {
    to.factor() / from.factor()
}
