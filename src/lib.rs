// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
mod macros;

mod config;
mod error;
mod logger;
mod metrics;
pub mod plot;

pub use crate::config::{Config, Mode, NAME, VERSION};
pub use crate::error::Error;
pub use crate::logger::Logger;
pub use crate::metrics::{MetricSeries, MetricValues};
pub use crate::plot::PlotStyle;
