//! Instrumented in-place sorting algorithms
//!
//! Every sort counts element comparisons and swaps and times itself, so the
//! benchmark harness can report how the textbook algorithms compare on the same data.

pub mod algorithms;
pub mod benchmark;
pub mod gaps;

pub use algorithms::{bubble_sort, insertion_sort, quick_sort, selection_sort, shell_sort};
pub use benchmark::{Benchmark, BenchmarkConfig, BenchmarkError, BenchmarkReport};
pub use gaps::{GapSequence, Hibbard, Knuth, Pratt};

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Statistics from one sort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SortResult {
    /// Element comparisons performed
    pub comparisons: u64,
    /// Element swaps performed
    pub swaps: u64,
    /// Wall-clock time taken
    pub elapsed: Duration,
}

impl SortResult {
    /// Elapsed time in fractional milliseconds
    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Mean statistics over several sorts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AverageSortResult {
    /// Mean comparisons
    pub comparisons: f64,
    /// Mean swaps
    pub swaps: f64,
    /// Mean time in milliseconds
    pub millis: f64,
}

impl AverageSortResult {
    /// Average `results`; an empty slice averages to zero
    pub fn new(results: &[SortResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }
        let n = results.len() as f64;
        let (comparisons, swaps, millis) = results.iter().fold((0.0, 0.0, 0.0), |acc, r| {
            (
                acc.0 + r.comparisons as f64,
                acc.1 + r.swaps as f64,
                acc.2 + r.millis(),
            )
        });
        Self {
            comparisons: comparisons / n,
            swaps: swaps / n,
            millis: millis / n,
        }
    }
}

/// The algorithms the benchmark compares, in report column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SortAlgorithm {
    /// Bubble sort
    Bubble,
    /// Insertion sort
    Insertion,
    /// Selection sort
    Selection,
    /// Quick sort with a first-element pivot
    Quick,
    /// Shell sort over Hibbard gaps
    Hibbard,
    /// Shell sort over Knuth gaps
    Knuth,
    /// Shell sort over Pratt gaps
    Pratt,
}

impl SortAlgorithm {
    /// Every algorithm, in report column order
    pub const ALL: [SortAlgorithm; 7] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Selection,
        SortAlgorithm::Quick,
        SortAlgorithm::Hibbard,
        SortAlgorithm::Knuth,
        SortAlgorithm::Pratt,
    ];

    /// Column name
    pub fn name(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble",
            SortAlgorithm::Insertion => "Insertion",
            SortAlgorithm::Selection => "Selection",
            SortAlgorithm::Quick => "Quick",
            SortAlgorithm::Hibbard => "Hibbard",
            SortAlgorithm::Knuth => "Knuth",
            SortAlgorithm::Pratt => "Pratt",
        }
    }

    /// Sub-quadratic algorithms get the extra benchmark rounds
    pub fn is_fast(&self) -> bool {
        !matches!(
            self,
            SortAlgorithm::Bubble | SortAlgorithm::Insertion | SortAlgorithm::Selection
        )
    }

    /// Sort `data` in place with this algorithm
    pub fn sort<T: Ord>(&self, data: &mut [T]) -> SortResult {
        match self {
            SortAlgorithm::Bubble => bubble_sort(data),
            SortAlgorithm::Insertion => insertion_sort(data),
            SortAlgorithm::Selection => selection_sort(data),
            SortAlgorithm::Quick => quick_sort(data),
            SortAlgorithm::Hibbard => shell_sort(data, &Hibbard),
            SortAlgorithm::Knuth => shell_sort(data, &Knuth),
            SortAlgorithm::Pratt => shell_sort(data, &Pratt),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `data` is in non-descending order
pub fn is_sorted<T: Ord>(data: &[T]) -> bool {
    data.windows(2).all(|pair| pair[0] <= pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted::<i32>(&[]));
        assert!(is_sorted(&[1]));
        assert!(is_sorted(&[1, 1, 2, 3]));
        assert!(!is_sorted(&[2, 1]));
    }

    #[test]
    fn test_average() {
        let results = [
            SortResult {
                comparisons: 10,
                swaps: 2,
                elapsed: Duration::from_millis(4),
            },
            SortResult {
                comparisons: 20,
                swaps: 4,
                elapsed: Duration::from_millis(6),
            },
        ];
        let average = AverageSortResult::new(&results);
        assert_eq!(average.comparisons, 15.0);
        assert_eq!(average.swaps, 3.0);
        assert!((average.millis - 5.0).abs() < 1e-9);
        assert_eq!(AverageSortResult::new(&[]), AverageSortResult::default());
    }

    #[test]
    fn test_every_algorithm_sorts() {
        let data = vec![5, -3, 9, 0, 0, 12, -7, 3, 3, 1, 8, 2];
        for algorithm in SortAlgorithm::ALL {
            let mut copy = data.clone();
            algorithm.sort(&mut copy);
            assert!(is_sorted(&copy), "{algorithm} left {copy:?}");
        }
    }

    #[test]
    fn test_fast_split() {
        let fast: Vec<_> = SortAlgorithm::ALL
            .iter()
            .filter(|a| a.is_fast())
            .map(|a| a.name())
            .collect();
        assert_eq!(fast, vec!["Quick", "Hibbard", "Knuth", "Pratt"]);
    }
}
