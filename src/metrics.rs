// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fs;
use std::path::Path;

use crate::error::Error;

/// The metric trajectory of one registration run: one value per iteration,
/// loaded from a single whitespace-separated text file.
pub struct MetricSeries {
    name: String,
    values: Vec<f64>,
}

impl MetricSeries {
    /// Loads a series from a single file. The series name is the file's
    /// base name.
    pub fn load(path: &Path) -> Result<MetricSeries, Error> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let mut values = Vec::new();
        for token in contents.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| Error::parse(path, token))?;
            values.push(value);
        }

        Ok(MetricSeries { name, values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values in iteration order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First-order differences: element i is `values[i + 1] - values[i]`.
    /// Empty for series of fewer than two values.
    pub fn delta(&self) -> Vec<f64> {
        self.values.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

impl AsRef<[f64]> for MetricSeries {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// All series found in one directory, in directory-listing order. Read-only
/// after construction.
pub struct MetricValues {
    series: Vec<MetricSeries>,
}

impl MetricValues {
    /// Loads every entry of `dir` as a data file. Fails on the first entry
    /// that is unreadable or non-numeric, before any output is produced.
    pub fn load(dir: &Path) -> Result<MetricValues, Error> {
        let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

        let mut series = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            series.push(MetricSeries::load(&entry.path())?);
        }

        Ok(MetricValues { series })
    }

    /// One series per discovered file, in discovery order.
    pub fn values(&self) -> &[MetricSeries] {
        &self.series
    }

    /// The difference series of each member, in the same order as
    /// `values()`.
    pub fn delta_values(&self) -> Vec<Vec<f64>> {
        self.series.iter().map(|s| s.delta()).collect()
    }

    /// Per-series chart labels: the file's base name plus its 1-based
    /// position in the full collection. Positions stay global even when the
    /// collection is rendered in batches, which keeps labels unique across
    /// charts.
    pub fn labels(&self) -> Vec<String> {
        self.series
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{} ({})", s.name(), i + 1))
            .collect()
    }

    /// Consecutive chunks of `batch_size` series; the last chunk may be
    /// shorter.
    pub fn batches(&self, batch_size: usize) -> impl Iterator<Item = &[MetricSeries]> {
        self.series.chunks(batch_size)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn series_parses_whitespace_separated_values() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", "1 2\n4\t8\n");

        let series = MetricSeries::load(&dir.path().join("a.txt")).unwrap();
        assert_eq!(series.name(), "a.txt");
        assert_eq!(series.values(), &[1.0, 2.0, 4.0, 8.0]);
    }

    #[test]
    fn series_parses_signed_and_scientific_notation() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", "-1.5e-3\n2.0\n-7\n");

        let series = MetricSeries::load(&dir.path().join("a.txt")).unwrap();
        assert_eq!(series.values(), &[-0.0015, 2.0, -7.0]);
    }

    #[test]
    fn delta_is_first_order_difference() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", "1 2 4 8");

        let series = MetricSeries::load(&dir.path().join("a.txt")).unwrap();
        let delta = series.delta();
        assert_eq!(delta, vec![1.0, 2.0, 4.0]);
        assert_eq!(delta.len(), series.len() - 1);
        for (i, d) in delta.iter().enumerate() {
            assert_eq!(*d, series.values()[i + 1] - series.values()[i]);
        }
    }

    #[test]
    fn delta_of_short_series_is_empty() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "one.txt", "42.0");
        write_file(dir.path(), "none.txt", "");

        let one = MetricSeries::load(&dir.path().join("one.txt")).unwrap();
        assert_eq!(one.len(), 1);
        assert!(one.delta().is_empty());

        let none = MetricSeries::load(&dir.path().join("none.txt")).unwrap();
        assert!(none.is_empty());
        assert!(none.delta().is_empty());
    }

    #[test]
    fn collection_has_one_series_per_file() {
        let dir = TempDir::new().unwrap();
        for name in &["a.txt", "b.txt", "c.txt"] {
            write_file(dir.path(), name, "1 2 3");
        }

        let collection = MetricValues::load(dir.path()).unwrap();
        assert_eq!(collection.len(), 3);

        let mut names: Vec<_> = collection.values().iter().map(|s| s.name()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn delta_values_parallel_values() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", "1 2 3");
        write_file(dir.path(), "b.txt", "5 5 6");

        let collection = MetricValues::load(dir.path()).unwrap();
        let deltas = collection.delta_values();
        assert_eq!(deltas.len(), collection.len());
        for (series, delta) in collection.values().iter().zip(deltas.iter()) {
            assert_eq!(delta, &series.delta());
            assert_eq!(delta.len(), series.len() - 1);
        }
    }

    #[test]
    fn labels_use_global_one_based_positions() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", "1 2");
        write_file(dir.path(), "b.txt", "3 4");

        let collection = MetricValues::load(dir.path()).unwrap();
        let labels = collection.labels();
        assert_eq!(labels.len(), collection.len());
        for (i, series) in collection.values().iter().enumerate() {
            assert_eq!(labels[i], format!("{} ({})", series.name(), i + 1));
        }
    }

    #[test]
    fn batches_partition_without_reordering() {
        let dir = TempDir::new().unwrap();
        for name in &["a", "b", "c", "d", "e"] {
            write_file(dir.path(), name, "1 2 3");
        }

        let collection = MetricValues::load(dir.path()).unwrap();
        let batches: Vec<_> = collection.batches(2).collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(
            batches.iter().map(|b| b.len()).collect::<Vec<_>>(),
            vec![2, 2, 1]
        );

        let rejoined: Vec<_> = batches.iter().flat_map(|b| b.iter()).collect();
        for (original, joined) in collection.values().iter().zip(rejoined) {
            assert_eq!(original.name(), joined.name());
        }
    }

    #[test]
    fn non_numeric_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", "1 2 three 4");

        match MetricValues::load(dir.path()) {
            Err(Error::Parse { token, .. }) => assert_eq!(token, "three"),
            other => panic!("expected parse error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-dir");

        match MetricValues::load(&missing) {
            Err(Error::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected i/o error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_slice_is_an_io_error() {
        let dir = TempDir::new().unwrap();

        assert!(matches!(
            MetricSeries::load(&dir.path().join("no-such-slice")),
            Err(Error::Io { .. })
        ));
    }
}
