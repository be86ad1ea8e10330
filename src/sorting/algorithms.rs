//! Sorting algorithm implementations

use super::SortResult;
use super::gaps::GapSequence;
use std::time::Instant;

/// Comparison and swap tallies for one sort
#[derive(Debug, Default)]
struct Counters {
    comparisons: u64,
    swaps: u64,
}

impl Counters {
    fn less<T: Ord>(&mut self, a: &T, b: &T) -> bool {
        self.comparisons += 1;
        a < b
    }

    fn swap<T>(&mut self, data: &mut [T], a: usize, b: usize) {
        self.swaps += 1;
        data.swap(a, b);
    }

    fn finish(self, start: Instant) -> SortResult {
        SortResult {
            comparisons: self.comparisons,
            swaps: self.swaps,
            elapsed: start.elapsed(),
        }
    }
}

/// In-place insertion sort
pub fn insertion_sort<T: Ord>(data: &mut [T]) -> SortResult {
    let start = Instant::now();
    let mut counters = Counters::default();

    for offset in 1..data.len() {
        // Sink the next element into the sorted prefix
        for index in (1..=offset).rev() {
            if counters.less(&data[index], &data[index - 1]) {
                counters.swap(data, index, index - 1);
            } else {
                break;
            }
        }
    }

    counters.finish(start)
}

/// In-place selection sort
pub fn selection_sort<T: Ord>(data: &mut [T]) -> SortResult {
    let start = Instant::now();
    let mut counters = Counters::default();

    for offset in 0..data.len().saturating_sub(1) {
        let mut min_index = offset;
        for i in offset + 1..data.len() {
            if counters.less(&data[i], &data[min_index]) {
                min_index = i;
            }
        }
        if min_index != offset {
            counters.swap(data, offset, min_index);
        }
    }

    counters.finish(start)
}

/// In-place bubble sort, carrying small elements toward the front
pub fn bubble_sort<T: Ord>(data: &mut [T]) -> SortResult {
    let start = Instant::now();
    let mut counters = Counters::default();
    let end = data.len().saturating_sub(1);

    for offset in 0..end {
        for index in (offset + 1..=end).rev() {
            if counters.less(&data[index], &data[index - 1]) {
                counters.swap(data, index, index - 1);
            }
        }
    }

    counters.finish(start)
}

/// In-place quick sort pivoting on the first element of each partition
pub fn quick_sort<T: Ord>(data: &mut [T]) -> SortResult {
    let start = Instant::now();
    let mut counters = Counters::default();
    quick_sort_range(data, &mut counters);
    counters.finish(start)
}

fn quick_sort_range<T: Ord>(mut data: &mut [T], counters: &mut Counters) {
    // Recurse into the smaller side and loop on the larger to bound stack depth
    while data.len() > 1 {
        let pivot = partition(data, counters);
        let (lower, upper) = std::mem::take(&mut data).split_at_mut(pivot);
        let upper = &mut upper[1..];
        if lower.len() < upper.len() {
            quick_sort_range(lower, counters);
            data = upper;
        } else {
            quick_sort_range(upper, counters);
            data = lower;
        }
    }
}

/// Partition around `data[0]` with converging cursors; returns the pivot's final index
fn partition<T: Ord>(data: &mut [T], counters: &mut Counters) -> usize {
    let last = data.len() - 1;
    let mut left = 0;
    let mut right = data.len();

    loop {
        left += 1;
        while left <= last && counters.less(&data[left], &data[0]) {
            left += 1;
        }
        right -= 1;
        // Stops at index 0 at the latest, since the pivot is never greater than itself
        while counters.less(&data[0], &data[right]) {
            right -= 1;
        }

        if left < right {
            counters.swap(data, left, right);
        } else {
            break;
        }
    }

    if right != 0 {
        counters.swap(data, 0, right);
    }
    right
}

/// In-place shell sort over the gaps produced by `sequence`
pub fn shell_sort<T: Ord, G: GapSequence + ?Sized>(data: &mut [T], sequence: &G) -> SortResult {
    let start = Instant::now();
    let mut counters = Counters::default();

    for gap in sequence.gaps(data.len()) {
        for i in 0..data.len() - gap {
            let mut j = i;
            loop {
                if !counters.less(&data[j + gap], &data[j]) {
                    break;
                }
                counters.swap(data, j, j + gap);
                if j < gap {
                    break;
                }
                j -= gap;
            }
        }
    }

    counters.finish(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::gaps::{Hibbard, Knuth, Pratt};
    use crate::sorting::is_sorted;

    fn scrambled(len: usize) -> Vec<i64> {
        // Deterministic permutation-like sequence with duplicates
        (0..len as i64).map(|i| (i * 7919 + 13) % 101 - 50).collect()
    }

    #[test]
    fn test_insertion_counts() {
        let mut data = vec![3, 2, 1];
        let result = insertion_sort(&mut data);
        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(result.swaps, 3);
        assert_eq!(result.comparisons, 3);

        let mut sorted = vec![1, 2, 3, 4];
        let result = insertion_sort(&mut sorted);
        assert_eq!(result.comparisons, 3);
        assert_eq!(result.swaps, 0);
    }

    #[test]
    fn test_selection_counts() {
        let mut data = vec![3, 2, 1];
        let result = selection_sort(&mut data);
        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(result.comparisons, 3);
        assert_eq!(result.swaps, 1);
    }

    #[test]
    fn test_bubble_counts() {
        let mut data = vec![4, 3, 2, 1];
        let result = bubble_sort(&mut data);
        assert_eq!(data, vec![1, 2, 3, 4]);
        assert_eq!(result.comparisons, 6);
        assert_eq!(result.swaps, 6);
    }

    #[test]
    fn test_all_sorts_handle_edge_lengths() {
        for len in [0, 1, 2, 3] {
            let mut data: Vec<i64> = (0..len).rev().collect();
            let sorts: [fn(&mut [i64]) -> SortResult; 4] =
                [insertion_sort, selection_sort, bubble_sort, quick_sort];
            for sort in sorts {
                let mut copy = data.clone();
                sort(&mut copy);
                assert!(is_sorted(&copy), "len {len}: {copy:?}");
            }
            shell_sort(&mut data, &Pratt);
            assert!(is_sorted(&data));
        }
    }

    #[test]
    fn test_quick_sort_duplicates_and_sorted_input() {
        let mut data = vec![5; 64];
        quick_sort(&mut data);
        assert!(data.iter().all(|&x| x == 5));

        let mut ascending: Vec<i64> = (0..5000).collect();
        quick_sort(&mut ascending);
        assert!(is_sorted(&ascending));

        let mut descending: Vec<i64> = (0..5000).rev().collect();
        quick_sort(&mut descending);
        assert!(is_sorted(&descending));
    }

    #[test]
    fn test_shell_sorts() {
        for sequence in [&Hibbard as &dyn GapSequence, &Knuth, &Pratt] {
            let mut data = scrambled(500);
            let result = shell_sort(&mut data, sequence);
            assert!(is_sorted(&data), "{}", sequence.name());
            assert!(result.comparisons > 0);
        }
    }

    #[test]
    fn test_fast_sorts_compare_less_than_bubble() {
        let data = scrambled(1000);
        let bubble = bubble_sort(&mut data.clone());
        let quick = quick_sort(&mut data.clone());
        let shell = shell_sort(&mut data.clone(), &Knuth);
        assert!(quick.comparisons < bubble.comparisons);
        assert!(shell.comparisons < bubble.comparisons);
    }
}
