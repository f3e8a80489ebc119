// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Given a best-track file, compute wind and pressure fields on a regular
/// grid and write them as an Oceanweather WIN/PRE file pair.
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;

use gahm::atcf::Track;
use gahm::pressure::PressureMethod;
use gahm::{GahmConfig, OwiAsciiDomain, StormDate, Vortex, WindGrid};

#[derive(Parser, Debug)]
#[command(name = "gahm-owi", author, version, about)]
struct Opt {
    /// Path to the best-track (ATCF) file
    #[arg(short, long)]
    track: std::path::PathBuf,

    /// Southwest corner longitude of the output grid, degrees
    #[arg(long)]
    xll: f64,

    /// Southwest corner latitude of the output grid, degrees
    #[arg(long)]
    yll: f64,

    /// Northeast corner longitude of the output grid, degrees
    #[arg(long)]
    xur: f64,

    /// Northeast corner latitude of the output grid, degrees
    #[arg(long)]
    yur: f64,

    /// Grid spacing in longitude, degrees
    #[arg(long, default_value_t = 0.1)]
    dx: f64,

    /// Grid spacing in latitude, degrees
    #[arg(long, default_value_t = 0.1)]
    dy: f64,

    /// Start of the output period as YYYYMMDDHH
    #[arg(long)]
    start: String,

    /// End of the output period as YYYYMMDDHH
    #[arg(long)]
    end: String,

    /// Output timestep in seconds
    #[arg(long, default_value_t = 3600)]
    timestep: i64,

    /// Base name of the output files; writes <output>.pre and <output>.wnd
    #[arg(short, long)]
    output: String,

    /// Estimator for missing central pressures
    #[arg(long, default_value = "twoslope")]
    pressure_method: String,
}

fn run(opt: &Opt) -> Result<(), gahm::GahmError> {
    let config = GahmConfig {
        pressure_method: PressureMethod::from_str(&opt.pressure_method)
            .map_err(gahm::GahmError::Usage)?,
        ..GahmConfig::default()
    };

    let start = StormDate::parse_atcf(&opt.start)?;
    let end = StormDate::parse_atcf(&opt.end)?;

    let track = Track::from_file_with_background_pressure(
        &opt.track,
        config.background_pressure_mbar,
    )?;
    let prepared = gahm::preprocessor::preprocess(track, &config);
    for assumption in prepared.assumptions().iter() {
        log::info!("{}", assumption);
    }

    let grid = WindGrid::from_corners(opt.xll, opt.yll, opt.xur, opt.yur, opt.dx, opt.dy);
    let vortex = Vortex::with_config(&prepared, grid.points(), config);

    let mut domain = OwiAsciiDomain::new(
        grid,
        start,
        end,
        opt.timestep,
        format!("{}.pre", opt.output),
        format!("{}.wnd", opt.output),
    )?;

    let mut date = start;
    while date <= end {
        let solution = vortex.solve(date)?;
        domain.write(date, &solution)?;
        date = date.add_seconds(opt.timestep);
    }
    domain.close()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let opt = Opt::parse();

    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // I/O failures exit 2, malformed inputs and misuse exit 1
            let report = anyhow::Error::new(e).context("gahm-owi failed");
            eprintln!("{:#}", report);
            match report.downcast_ref::<gahm::GahmError>() {
                Some(gahm::GahmError::Atcf(inner)) => match inner {
                    gahm::atcf::AtcfError::FileOpen(_, _)
                    | gahm::atcf::AtcfError::FileRead(_, _) => ExitCode::from(2),
                    _ => ExitCode::from(1),
                },
                Some(gahm::GahmError::Owi(inner)) => match inner {
                    gahm::output::OwiError::FileCreate(_, _)
                    | gahm::output::OwiError::FileWrite(_, _) => ExitCode::from(2),
                    _ => ExitCode::from(1),
                },
                _ => ExitCode::from(1),
            }
        }
    }
}
