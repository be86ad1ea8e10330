//! Word frequency counting over list-based counters
//!
//! Each counter keeps its words in a list with a different organizing strategy and
//! tallies the work it does: equality or ordering comparisons between words, and
//! the number of list links it rewires.

pub mod counters;

pub use counters::{
    BubbleSelfAdjustingWordCounter, FrontSelfAdjustingWordCounter, SortedWordCounter,
    UnsortedWordCounter,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;

/// A distinct word and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    /// Word text, exactly as encountered
    pub text: String,
    /// Occurrence count
    pub occurrences: u64,
}

impl Word {
    /// A word seen once
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            occurrences: 1,
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.text, self.occurrences)
    }
}

/// Counts word occurrences
pub trait WordCounter: fmt::Debug {
    /// Record one occurrence of `word`
    fn encounter(&mut self, word: &str);

    /// Words in the counter's current list order
    fn iter(&self) -> Box<dyn Iterator<Item = &Word> + '_>;

    /// Comparisons between words so far
    fn comparison_count(&self) -> u64;

    /// List links rewired so far
    fn reference_assignment_count(&self) -> u64;

    /// Total occurrences over all words
    fn word_count(&self) -> u64 {
        self.iter().map(|word| word.occurrences).sum()
    }

    /// Number of distinct words
    fn distinct_word_count(&self) -> usize {
        self.iter().count()
    }

    /// Snapshot of the words in list order
    fn words(&self) -> Vec<Word> {
        self.iter().cloned().collect()
    }
}

/// Available counter strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CounterKind {
    /// Append new words at the tail
    #[default]
    Unsorted,
    /// Keep words in alphabetical order
    Sorted,
    /// Move each hit to the front
    Front,
    /// Swap each hit one place toward the front
    Bubble,
}

impl CounterKind {
    /// Every strategy
    pub const ALL: [CounterKind; 4] = [
        CounterKind::Unsorted,
        CounterKind::Sorted,
        CounterKind::Front,
        CounterKind::Bubble,
    ];

    /// Create an empty counter of this kind
    pub fn build(self) -> Box<dyn WordCounter + Send> {
        match self {
            CounterKind::Unsorted => Box::new(UnsortedWordCounter::new()),
            CounterKind::Sorted => Box::new(SortedWordCounter::new()),
            CounterKind::Front => Box::new(FrontSelfAdjustingWordCounter::new()),
            CounterKind::Bubble => Box::new(BubbleSelfAdjustingWordCounter::new()),
        }
    }

    /// Strategy name
    pub fn name(&self) -> &'static str {
        match self {
            CounterKind::Unsorted => "unsorted",
            CounterKind::Sorted => "sorted",
            CounterKind::Front => "front",
            CounterKind::Bubble => "bubble",
        }
    }
}

impl fmt::Display for CounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CounterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CounterKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown counter '{s}', expected unsorted, sorted, front or bubble"))
    }
}

/// Feed every whitespace-separated word read from `reader` to `counter`
///
/// Words are taken as-is, without case folding or punctuation stripping. Returns
/// the number of words fed.
pub fn count_words<R: BufRead + ?Sized>(
    reader: &mut R,
    counter: &mut dyn WordCounter,
) -> io::Result<u64> {
    let mut fed = 0;
    let mut line = String::new();
    while reader.read_line(&mut line)? != 0 {
        for word in line.split_whitespace() {
            counter.encounter(word);
            fed += 1;
        }
        line.clear();
    }
    log::debug!(
        "Counted {fed} words, {} distinct, {} comparisons",
        counter.distinct_word_count(),
        counter.comparison_count()
    );
    Ok(fed)
}
