//! Shell sort gap sequences

/// Produces the gaps a shell sort walks through
///
/// Gaps are strictly below the data length, in descending order, and end at 1.
/// Data of length 0 or 1 gets no gaps.
pub trait GapSequence {
    /// Sequence name
    fn name(&self) -> &'static str;

    /// Gaps for data of length `len`
    fn gaps(&self, len: usize) -> Vec<usize>;
}

/// Collect `next`-generated values below `len`, largest first
fn ascending_below(len: usize, first: usize, next: impl Fn(usize) -> Option<usize>) -> Vec<usize> {
    let mut gaps = Vec::new();
    let mut gap = Some(first);
    while let Some(value) = gap.filter(|&g| g < len) {
        gaps.push(value);
        gap = next(value);
    }
    gaps.reverse();
    gaps
}

/// Hibbard gaps, 2^k - 1
#[derive(Debug, Clone, Copy, Default)]
pub struct Hibbard;

impl GapSequence for Hibbard {
    fn name(&self) -> &'static str {
        "Hibbard"
    }

    fn gaps(&self, len: usize) -> Vec<usize> {
        ascending_below(len, 1, |g| g.checked_mul(2).and_then(|g| g.checked_add(1)))
    }
}

/// Knuth gaps, (3^k - 1) / 2
#[derive(Debug, Clone, Copy, Default)]
pub struct Knuth;

impl GapSequence for Knuth {
    fn name(&self) -> &'static str {
        "Knuth"
    }

    fn gaps(&self, len: usize) -> Vec<usize> {
        ascending_below(len, 1, |g| g.checked_mul(3).and_then(|g| g.checked_add(1)))
    }
}

/// Pratt gaps, every 2^p * 3^q
#[derive(Debug, Clone, Copy, Default)]
pub struct Pratt;

impl GapSequence for Pratt {
    fn name(&self) -> &'static str {
        "Pratt"
    }

    fn gaps(&self, len: usize) -> Vec<usize> {
        let mut gaps = Vec::new();
        let mut power_of_three = Some(1usize);
        while let Some(base) = power_of_three.filter(|&b| b < len) {
            let mut value = Some(base);
            while let Some(gap) = value.filter(|&g| g < len) {
                gaps.push(gap);
                value = gap.checked_mul(2);
            }
            power_of_three = base.checked_mul(3);
        }
        gaps.sort_unstable_by(|a, b| b.cmp(a));
        gaps
    }
}
