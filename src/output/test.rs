// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Unit tests for the Oceanweather writer
*/
#[cfg(test)]
use super::*;

#[cfg(test)]
use crate::atcf::Track;
#[cfg(test)]
use crate::config::GahmConfig;
#[cfg(test)]
use crate::preprocessor::Preprocessor;
#[cfg(test)]
use crate::vortex::Vortex;

#[cfg(test)]
fn test_grid() -> WindGrid {
    WindGrid::from_corners(-92.0, 28.0, -88.0, 31.0, 0.5, 0.5)
}

#[cfg(test)]
fn test_solution(grid: &WindGrid, date: StormDate) -> VortexSolution {
    let track = Track::from_file("test_files/bal122005.dat").unwrap();
    let prepared = Preprocessor::new(GahmConfig::default()).prepare(track);
    let vortex = Vortex::new(&prepared, grid.points());
    vortex.solve(date).unwrap()
}

#[test]
fn test_header_and_records() {
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let pre = dir.path().join("katrina.pre");
    let wnd = dir.path().join("katrina.wnd");

    let grid = test_grid();
    let start = StormDate::new(2005, 8, 29, 0, 0, 0).unwrap();
    let end = StormDate::new(2005, 8, 29, 6, 0, 0).unwrap();
    let mut domain =
        OwiAsciiDomain::new(grid, start, end, 3600, pre.clone(), wnd.clone()).unwrap();

    let solution = test_solution(&grid, start);
    let mut date = start;
    while date <= end {
        domain.write(date, &solution).unwrap();
        date = date.add_seconds(3600);
    }
    domain.close().unwrap();

    let pressure_text = std::fs::read_to_string(&pre).unwrap();
    let wind_text = std::fs::read_to_string(&wnd).unwrap();

    let header: &str = pressure_text.lines().next().unwrap();
    assert_eq!(
        header,
        "Oceanweather WIN/PRE Format                            2005082900     2005082906"
    );
    assert_eq!(wind_text.lines().next().unwrap(), header);

    // record header carries grid shape and the record instant
    let record_header = pressure_text.lines().nth(1).unwrap();
    assert!(record_header.starts_with("iLat="));
    assert!(record_header.contains("iLong="));
    assert!(record_header.contains("DX=0.5000"));
    assert!(record_header.contains("DY=0.5000"));
    assert!(record_header.contains("SWLat="));
    assert!(record_header.contains("DT=200508290000"));

    // eight values per full line, each ten characters wide
    let data_line = pressure_text.lines().nth(2).unwrap();
    assert_eq!(data_line.len(), 80);
    let values: Vec<f64> = data_line
        .as_bytes()
        .chunks(10)
        .map(|c| std::str::from_utf8(c).unwrap().trim().parse().unwrap())
        .collect();
    assert_eq!(values.len(), 8);
    for value in values {
        assert!(value > 800.0 && value < 1100.0);
    }

    // the wind file holds two fields per record, the pressure file one
    let n_values = grid.nx() * grid.ny();
    let lines_per_field = n_values.div_ceil(8);
    let n_records = 7;
    assert_eq!(
        pressure_text.lines().count(),
        1 + n_records * (1 + lines_per_field)
    );
    assert_eq!(
        wind_text.lines().count(),
        1 + n_records * (1 + 2 * lines_per_field)
    );
}

#[test]
fn test_rejects_wrong_date() {
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let grid = test_grid();
    let start = StormDate::new(2005, 8, 29, 0, 0, 0).unwrap();
    let end = StormDate::new(2005, 8, 29, 12, 0, 0).unwrap();
    let mut domain = OwiAsciiDomain::new(
        grid,
        start,
        end,
        3600,
        dir.path().join("a.pre"),
        dir.path().join("a.wnd"),
    )
    .unwrap();

    let solution = test_solution(&grid, start);
    // first record must land exactly on the start date
    let result = domain.write(start.add_seconds(7200), &solution);
    assert!(matches!(result, Err(OwiError::NonConstantTimeSpacing { .. })));

    // a correct write still succeeds afterwards
    domain.write(start, &solution).unwrap();
}

#[test]
fn test_rejects_write_after_close() {
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let grid = test_grid();
    let start = StormDate::new(2005, 8, 29, 0, 0, 0).unwrap();
    let end = StormDate::new(2005, 8, 29, 12, 0, 0).unwrap();
    let mut domain = OwiAsciiDomain::new(
        grid,
        start,
        end,
        3600,
        dir.path().join("b.pre"),
        dir.path().join("b.wnd"),
    )
    .unwrap();
    domain.close().unwrap();

    let solution = test_solution(&grid, start);
    assert!(matches!(
        domain.write(start, &solution),
        Err(OwiError::WriteAfterClose)
    ));
}

#[test]
fn test_rejects_write_past_end() {
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let grid = test_grid();
    let start = StormDate::new(2005, 8, 29, 0, 0, 0).unwrap();
    let end = StormDate::new(2005, 8, 29, 1, 0, 0).unwrap();
    let mut domain = OwiAsciiDomain::new(
        grid,
        start,
        end,
        3600,
        dir.path().join("c.pre"),
        dir.path().join("c.wnd"),
    )
    .unwrap();

    let solution = test_solution(&grid, start);
    domain.write(start, &solution).unwrap();
    domain.write(start.add_seconds(3600), &solution).unwrap();
    assert!(matches!(
        domain.write(start.add_seconds(7200), &solution),
        Err(OwiError::PastEndDate { .. })
    ));
}

#[test]
fn test_rejects_bad_shape() {
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let grid = test_grid();
    let start = StormDate::new(2005, 8, 29, 0, 0, 0).unwrap();
    let end = StormDate::new(2005, 8, 29, 12, 0, 0).unwrap();
    let mut domain = OwiAsciiDomain::new(
        grid,
        start,
        end,
        3600,
        dir.path().join("d.pre"),
        dir.path().join("d.wnd"),
    )
    .unwrap();

    // a solution built on a different grid does not fit
    let other = WindGrid::from_corners(-92.0, 28.0, -90.0, 29.0, 0.5, 0.5);
    let solution = test_solution(&other, start);
    assert!(matches!(
        domain.write(start, &solution),
        Err(OwiError::SolutionShape { .. })
    ));
}

#[test]
fn test_rejects_inverted_date_range() {
    let dir = tempdir::TempDir::new("gahm").unwrap();
    let start = StormDate::new(2005, 8, 29, 12, 0, 0).unwrap();
    let end = StormDate::new(2005, 8, 29, 0, 0, 0).unwrap();
    let result = OwiAsciiDomain::new(
        test_grid(),
        start,
        end,
        3600,
        dir.path().join("e.pre"),
        dir.path().join("e.wnd"),
    );
    assert!(matches!(result, Err(OwiError::InvalidDateRange)));
}
