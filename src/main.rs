// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use log::{debug, info};

use metricgraph::plot::{plot_2d_line, plot_3d_lines};
use metricgraph::{fatal, Config, Error, Logger, MetricSeries, MetricValues, Mode, NAME, VERSION};

fn main() {
    let config = Config::new();

    Logger::new()
        .label(NAME)
        .level(config.log_level())
        .init()
        .expect("Failed to initialize logger");

    info!("{} {}", NAME, VERSION);

    if let Err(e) = run(&config) {
        fatal!("{}", e);
    }
}

fn run(config: &Config) -> Result<(), Error> {
    let style = config.style();

    match config.mode() {
        Mode::SingleSlice(slice) => {
            let series = MetricSeries::load(&config.values_dir().join(slice))?;
            info!("loaded {} with {} values", slice, series.len());

            let out = config.output().join(format!("{}.png", slice));
            debug!("rendering {}", out.display());
            plot_2d_line(&out, slice, series.values(), style)?;

            let out = config.output().join(format!("{}.delta.png", slice));
            debug!("rendering {}", out.display());
            plot_2d_line(
                &out,
                &format!("{} (differences)", slice),
                &series.delta(),
                style,
            )?;
        }
        Mode::Batch(batch_size) => {
            let collection = MetricValues::load(config.values_dir())?;
            info!(
                "loaded {} slices from {}",
                collection.len(),
                config.values_dir().display()
            );

            let labels = collection.labels();
            for (batch, (series, series_labels)) in collection
                .batches(*batch_size)
                .zip(labels.chunks(*batch_size))
                .enumerate()
            {
                let out = config.output().join(format!("values.{}.png", batch + 1));
                debug!("rendering {} ({} slices)", out.display(), series.len());
                plot_3d_lines(&out, "Metric values", series, series_labels, style)?;
            }
        }
        Mode::All => {
            let collection = MetricValues::load(config.values_dir())?;
            info!(
                "loaded {} slices from {}",
                collection.len(),
                config.values_dir().display()
            );

            let labels = collection.labels();

            let out = config.output().join("values.png");
            debug!("rendering {}", out.display());
            plot_3d_lines(&out, "Metric values", collection.values(), &labels, style)?;

            let out = config.output().join("deltas.png");
            debug!("rendering {}", out.display());
            plot_3d_lines(
                &out,
                "Metric value differences",
                &collection.delta_values(),
                &labels,
                style,
            )?;
        }
    }

    Ok(())
}
