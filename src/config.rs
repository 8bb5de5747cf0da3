// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};
use log::LevelFilter;

use crate::plot::PlotStyle;

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The three mutually-exclusive invocation modes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// 2D plots of one named slice and its differences.
    SingleSlice(String),
    /// 3D plots of the collection, this many slices per chart.
    Batch(usize),
    /// One 3D plot of all slices, then one of all differences.
    All,
}

pub struct Config {
    values_dir: PathBuf,
    mode: Mode,
    output: PathBuf,
    style: PlotStyle,
    log_level: LevelFilter,
}

impl Config {
    /// Parses command line options and returns a validated `Config`. Exits
    /// with a usage message on any malformed invocation, before anything is
    /// loaded.
    pub fn new() -> Config {
        let matches = App::new(NAME)
            .version(VERSION)
            .about("Plots registration metric values and their differences")
            .arg(
                Arg::with_name("values_dir")
                    .value_name("DIR")
                    .help("Directory of metric-value files, one slice per file")
                    .required(true)
                    .index(1),
            )
            .arg(
                Arg::with_name("slice")
                    .value_name("SLICE")
                    .help("Plot only this named slice, in 2D")
                    .index(2)
                    .conflicts_with("batch-size"),
            )
            .arg(
                Arg::with_name("batch-size")
                    .long("batch-size")
                    .value_name("N")
                    .help("Render 3D charts of N slices at a time")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("output")
                    .long("output")
                    .value_name("DIR")
                    .help("Directory the PNG files are written into")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("font-size")
                    .long("font-size")
                    .value_name("PT")
                    .help("Label and legend font size")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("width")
                    .long("width")
                    .value_name("PIXELS")
                    .help("Chart width")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("height")
                    .long("height")
                    .value_name("PIXELS")
                    .help("Chart height")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("verbose")
                    .short("v")
                    .long("verbose")
                    .help("Increase verbosity by one level. Can be used more than once")
                    .multiple(true),
            )
            .get_matches();

        let values_dir = PathBuf::from(matches.value_of("values_dir").unwrap());

        let mode = if let Some(slice) = matches.value_of("slice") {
            Mode::SingleSlice(slice.to_owned())
        } else if matches.is_present("batch-size") {
            let batch_size = parse_numeric(&matches, "batch-size", 1);
            if batch_size == 0 {
                eprintln!("{}: --batch-size must be at least 1", NAME);
                process::exit(1);
            }
            Mode::Batch(batch_size)
        } else {
            Mode::All
        };

        let output = matches
            .value_of("output")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let defaults = PlotStyle::default();
        let style = PlotStyle {
            font_size: parse_numeric(&matches, "font-size", defaults.font_size),
            width: parse_numeric(&matches, "width", defaults.width),
            height: parse_numeric(&matches, "height", defaults.height),
        };

        let log_level = match matches.occurrences_of("verbose") {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        Config {
            values_dir,
            mode,
            output,
            style,
            log_level,
        }
    }

    pub fn values_dir(&self) -> &Path {
        &self.values_dir
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

fn parse_numeric<T: FromStr>(matches: &ArgMatches<'_>, name: &str, default: T) -> T {
    match matches.value_of(name) {
        Some(value) => value.parse().unwrap_or_else(|_| {
            eprintln!("{}: invalid value for --{}: {}", NAME, name, value);
            process::exit(1);
        }),
        None => default,
    }
}
