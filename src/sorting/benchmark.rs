//! Sorting benchmark harness
//!
//! Generates random integer data of growing size, sorts a copy with every
//! [`SortAlgorithm`], and averages the statistics over a number of rounds. The
//! report is written as delimiter-separated rows under a `#`-prefixed
//! configuration header.

use super::{AverageSortResult, SortAlgorithm, SortResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Benchmark failures
#[derive(Debug, Error)]
pub enum BenchmarkError {
    /// The configuration cannot describe a benchmark run
    #[error("Invalid benchmark configuration: {0}")]
    InvalidConfig(String),

    /// Writing the report failed
    #[error("Failed to write benchmark report: {0}")]
    Io(#[from] io::Error),
}

/// Benchmark parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Smallest generated value
    pub gen_min: i32,
    /// Largest generated value
    pub gen_max: i32,
    /// First data size
    pub initial_size: usize,
    /// Last data size, inclusive
    pub max_size: usize,
    /// Size increment between rows
    pub step: usize,
    /// Rounds averaged per size for the quadratic sorts
    pub slow_rounds: usize,
    /// Rounds averaged per size for the fast sorts
    pub fast_rounds: usize,
    /// Warmup rounds per algorithm before measuring
    pub warmup: usize,
    /// Column delimiter
    pub delimiter: String,
    /// Seed for reproducible data; random when unset
    pub seed: Option<u64>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            gen_min: 0,
            gen_max: 9_999_999,
            initial_size: 100,
            max_size: 20_000,
            step: 100,
            slow_rounds: 10,
            fast_rounds: 100,
            warmup: 30_000,
            delimiter: "\t".to_string(),
            seed: None,
        }
    }
}

impl BenchmarkConfig {
    /// Check that the configuration describes a runnable benchmark
    pub fn validate(&self) -> Result<(), BenchmarkError> {
        let invalid = |message: String| Err(BenchmarkError::InvalidConfig(message));

        if self.gen_min > self.gen_max {
            return invalid(format!(
                "generated minimum {} exceeds maximum {}",
                self.gen_min, self.gen_max
            ));
        }
        if self.step == 0 {
            return invalid("step must be positive".to_string());
        }
        if self.initial_size > self.max_size {
            return invalid(format!(
                "initial size {} exceeds maximum size {}",
                self.initial_size, self.max_size
            ));
        }
        if self.slow_rounds == 0 {
            return invalid("at least one round is required".to_string());
        }
        if self.delimiter.is_empty() {
            return invalid("delimiter must not be empty".to_string());
        }
        Ok(())
    }

    /// Rounds averaged for `algorithm`
    ///
    /// Fast sorts never get fewer rounds than slow ones.
    pub fn rounds_for(&self, algorithm: SortAlgorithm) -> usize {
        if algorithm.is_fast() {
            self.fast_rounds.max(self.slow_rounds)
        } else {
            self.slow_rounds
        }
    }

    /// Data sizes, one per report row
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        (self.initial_size..=self.max_size).step_by(self.step.max(1))
    }

    /// Write the `#`-prefixed configuration header
    pub fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "# Configuration: ")?;
        writeln!(
            out,
            "# \tWill generate random numbers from {} to {}",
            self.gen_min, self.gen_max
        )?;
        writeln!(
            out,
            "# \tData size ranges from {} to {} in steps of {}",
            self.initial_size, self.max_size, self.step
        )?;
        writeln!(
            out,
            "# \tSlower sorts will have {} rounds to average results for each size",
            self.slow_rounds
        )?;
        writeln!(
            out,
            "# \tFaster sorts will have {} rounds to average results for each size",
            self.fast_rounds.max(self.slow_rounds)
        )?;
        writeln!(
            out,
            "# \tWarming up over {} rounds for each algorithm",
            self.warmup
        )?;

        let mut columns = vec!["Data Size".to_string()];
        for algorithm in SortAlgorithm::ALL {
            columns.push(format!("{algorithm} Comparisons"));
            columns.push(format!("{algorithm} Swaps"));
            columns.push(format!("{algorithm} Time"));
        }
        writeln!(out, "{}", columns.join(&self.delimiter))
    }
}

/// Averaged statistics for one data size
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRow {
    /// Data size
    pub size: usize,
    /// Averages in [`SortAlgorithm::ALL`] order
    pub results: Vec<(SortAlgorithm, AverageSortResult)>,
}

impl BenchmarkRow {
    /// Format the row with `delimiter` between columns
    pub fn format(&self, delimiter: &str) -> String {
        let mut columns = vec![self.size.to_string()];
        for (_, average) in &self.results {
            columns.push(format!("{:.3}", average.comparisons));
            columns.push(format!("{:.3}", average.swaps));
            columns.push(format!("{:.3}", average.millis));
        }
        columns.join(delimiter)
    }
}

/// Outcome of a full benchmark run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BenchmarkReport {
    /// Time spent warming up
    pub warmup: Duration,
    /// One row per data size
    pub rows: Vec<BenchmarkRow>,
    /// Total sorting time per algorithm, in [`SortAlgorithm::ALL`] order
    pub totals: Vec<(SortAlgorithm, Duration)>,
}

/// Random-data sorting benchmark
#[derive(Debug)]
pub struct Benchmark {
    config: BenchmarkConfig,
    rng: StdRng,
}

impl Benchmark {
    /// Create a benchmark, validating `config`
    pub fn new(config: BenchmarkConfig) -> Result<Self, BenchmarkError> {
        config.validate()?;
        if config.fast_rounds < config.slow_rounds {
            log::warn!(
                "Fast sorts requested {} rounds, fewer than the {} slow rounds; using {}",
                config.fast_rounds,
                config.slow_rounds,
                config.slow_rounds
            );
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Benchmark configuration
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Generate `len` random values within the configured range
    pub fn generate(&mut self, len: usize) -> Vec<i32> {
        let (min, max) = (self.config.gen_min, self.config.gen_max);
        (0..len).map(|_| self.rng.gen_range(min..=max)).collect()
    }

    /// Sort small data sets with every algorithm before measuring
    pub fn warm_up(&mut self) -> Duration {
        let start = Instant::now();
        let size = self.config.initial_size;
        log::info!(
            "Warming up over {} rounds for each algorithm",
            self.config.warmup
        );
        for _ in 0..self.config.warmup {
            let data = self.generate(size);
            for algorithm in SortAlgorithm::ALL {
                algorithm.sort(&mut data.clone());
            }
        }
        start.elapsed()
    }

    /// Average every algorithm over its rounds at data size `size`
    pub fn measure(&mut self, size: usize) -> BenchmarkRow {
        let mut results = Vec::with_capacity(SortAlgorithm::ALL.len());
        for algorithm in SortAlgorithm::ALL {
            let rounds = self.config.rounds_for(algorithm);
            let samples: Vec<SortResult> = (0..rounds)
                .map(|_| {
                    let mut data = self.generate(size);
                    algorithm.sort(&mut data)
                })
                .collect();
            results.push((algorithm, AverageSortResult::new(&samples)));
        }
        log::debug!("Measured size {size}");
        BenchmarkRow { size, results }
    }

    /// Warm up, then measure every size, writing the header and each row to `out`
    /// as it completes
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<BenchmarkReport, BenchmarkError> {
        let warmup = self.warm_up();
        log::info!("Warmup finished in {}ms", warmup.as_millis());

        self.config.write_header(out)?;

        let mut totals: Vec<(SortAlgorithm, Duration)> = SortAlgorithm::ALL
            .iter()
            .map(|&algorithm| (algorithm, Duration::ZERO))
            .collect();
        let mut rows = Vec::new();

        let sizes: Vec<usize> = self.config.sizes().collect();
        for size in sizes {
            let row = self.measure(size);
            writeln!(out, "{}", row.format(&self.config.delimiter))?;

            for ((_, total), (algorithm, average)) in totals.iter_mut().zip(&row.results) {
                let rounds = self.config.rounds_for(*algorithm) as f64;
                *total += Duration::from_secs_f64(average.millis * rounds / 1000.0);
            }
            rows.push(row);
        }
        out.flush()?;

        Ok(BenchmarkReport {
            warmup,
            rows,
            totals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_config() -> BenchmarkConfig {
        BenchmarkConfig {
            gen_min: -50,
            gen_max: 50,
            initial_size: 10,
            max_size: 30,
            step: 10,
            slow_rounds: 2,
            fast_rounds: 3,
            warmup: 1,
            delimiter: ",".to_string(),
            seed: Some(7),
        }
    }

    #[test]
    fn test_default_config() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.gen_max, 9_999_999);
        assert_eq!(config.sizes().count(), 200);
        assert_eq!(config.delimiter, "\t");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_range() {
        let config = BenchmarkConfig {
            gen_min: 10,
            gen_max: 1,
            ..small_config()
        };
        assert!(matches!(
            Benchmark::new(config),
            Err(BenchmarkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_fast_rounds_never_below_slow() {
        let config = BenchmarkConfig {
            slow_rounds: 5,
            fast_rounds: 2,
            ..small_config()
        };
        assert_eq!(config.rounds_for(SortAlgorithm::Quick), 5);
        assert_eq!(config.rounds_for(SortAlgorithm::Bubble), 5);
        assert_eq!(small_config().rounds_for(SortAlgorithm::Pratt), 3);
    }

    #[test]
    fn test_generate_within_range() {
        let mut benchmark = Benchmark::new(small_config()).unwrap();
        let data = benchmark.generate(1000);
        assert_eq!(data.len(), 1000);
        assert!(data.iter().all(|v| (-50..=50).contains(v)));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let first = Benchmark::new(small_config()).unwrap().generate(50);
        let second = Benchmark::new(small_config()).unwrap().generate(50);
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_writes_header_and_rows() {
        let mut benchmark = Benchmark::new(small_config()).unwrap();
        let mut out = Vec::new();
        let report = benchmark.run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# Configuration: ");
        assert_eq!(lines[1], "# \tWill generate random numbers from -50 to 50");
        let header: Vec<&str> = lines[6].split(',').collect();
        assert_eq!(header.len(), 1 + 3 * SortAlgorithm::ALL.len());
        assert_eq!(header[0], "Data Size");
        assert_eq!(header[1], "Bubble Comparisons");
        assert_eq!(header[21], "Pratt Time");

        let rows = &lines[7..];
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("10,"));
        assert!(rows[2].starts_with("30,"));
        assert_eq!(rows[1].split(',').count(), header.len());

        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.totals.len(), SortAlgorithm::ALL.len());
    }

    #[test]
    fn test_bubble_comparisons_are_exact() {
        let mut benchmark = Benchmark::new(small_config()).unwrap();
        let row = benchmark.measure(10);
        let (algorithm, bubble) = row.results[0];
        assert_eq!(algorithm, SortAlgorithm::Bubble);
        // Bubble sort always compares n(n-1)/2 times
        assert_eq!(bubble.comparisons, 45.0);
    }
}
