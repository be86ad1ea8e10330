//! Word counter strategies
//!
//! Reference assignments model a singly linked list: starting an empty list or
//! appending at the tail rewires one link, inserting at the front or in the middle
//! rewires two, and unlinking a node to relink it elsewhere rewires three.
//! Incrementing an existing word rewires nothing.

use super::{Word, WordCounter};
use std::cmp::Ordering;
use std::collections::VecDeque;

const START_LIST: u64 = 1;
const APPEND: u64 = 1;
const INSERT: u64 = 2;
const MOVE: u64 = 3;

/// Shared tallies
#[derive(Debug, Clone, Default)]
struct Tally {
    comparisons: u64,
    references: u64,
}

impl Tally {
    fn matches(&mut self, word: &Word, text: &str) -> bool {
        self.comparisons += 1;
        word.text == text
    }
}

/// New words are appended at the tail; lookups scan from the head
#[derive(Debug, Clone, Default)]
pub struct UnsortedWordCounter {
    words: Vec<Word>,
    tally: Tally,
}

impl UnsortedWordCounter {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordCounter for UnsortedWordCounter {
    fn encounter(&mut self, word: &str) {
        let tally = &mut self.tally;
        if let Some(existing) = self.words.iter_mut().find(|w| tally.matches(w, word)) {
            existing.occurrences += 1;
            return;
        }

        tally.references += if self.words.is_empty() { START_LIST } else { APPEND };
        self.words.push(Word::new(word));
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Word> + '_> {
        Box::new(self.words.iter())
    }

    fn comparison_count(&self) -> u64 {
        self.tally.comparisons
    }

    fn reference_assignment_count(&self) -> u64 {
        self.tally.references
    }
}

/// Words kept in alphabetical order; lookups stop at the first word past the target
#[derive(Debug, Clone, Default)]
pub struct SortedWordCounter {
    words: Vec<Word>,
    tally: Tally,
}

impl SortedWordCounter {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordCounter for SortedWordCounter {
    fn encounter(&mut self, word: &str) {
        if self.words.is_empty() {
            self.tally.references += START_LIST;
            self.words.push(Word::new(word));
            return;
        }

        for index in 0..self.words.len() {
            self.tally.comparisons += 1;
            match self.words[index].text.as_str().cmp(word) {
                Ordering::Equal => {
                    self.words[index].occurrences += 1;
                    return;
                }
                Ordering::Greater => {
                    self.tally.references += INSERT;
                    self.words.insert(index, Word::new(word));
                    return;
                }
                Ordering::Less => {}
            }
        }

        self.tally.references += APPEND;
        self.words.push(Word::new(word));
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Word> + '_> {
        Box::new(self.words.iter())
    }

    fn comparison_count(&self) -> u64 {
        self.tally.comparisons
    }

    fn reference_assignment_count(&self) -> u64 {
        self.tally.references
    }
}

/// Each hit moves to the front; new words are inserted at the front
#[derive(Debug, Clone, Default)]
pub struct FrontSelfAdjustingWordCounter {
    words: VecDeque<Word>,
    tally: Tally,
}

impl FrontSelfAdjustingWordCounter {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordCounter for FrontSelfAdjustingWordCounter {
    fn encounter(&mut self, word: &str) {
        if self.words.is_empty() {
            self.tally.references += START_LIST;
            self.words.push_back(Word::new(word));
            return;
        }

        let tally = &mut self.tally;
        match self.words.iter().position(|w| tally.matches(w, word)) {
            Some(0) => self.words[0].occurrences += 1,
            Some(index) => {
                if let Some(mut hit) = self.words.remove(index) {
                    hit.occurrences += 1;
                    self.words.push_front(hit);
                    tally.references += MOVE;
                }
            }
            None => {
                tally.references += INSERT;
                self.words.push_front(Word::new(word));
            }
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Word> + '_> {
        Box::new(self.words.iter())
    }

    fn comparison_count(&self) -> u64 {
        self.tally.comparisons
    }

    fn reference_assignment_count(&self) -> u64 {
        self.tally.references
    }
}

/// Each hit swaps one place toward the front; new words are inserted at the front
#[derive(Debug, Clone, Default)]
pub struct BubbleSelfAdjustingWordCounter {
    words: VecDeque<Word>,
    tally: Tally,
}

impl BubbleSelfAdjustingWordCounter {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordCounter for BubbleSelfAdjustingWordCounter {
    fn encounter(&mut self, word: &str) {
        if self.words.is_empty() {
            self.tally.references += START_LIST;
            self.words.push_back(Word::new(word));
            return;
        }

        let tally = &mut self.tally;
        match self.words.iter().position(|w| tally.matches(w, word)) {
            Some(0) => self.words[0].occurrences += 1,
            Some(index) => {
                self.words[index].occurrences += 1;
                self.words.swap(index - 1, index);
                tally.references += MOVE;
            }
            None => {
                tally.references += INSERT;
                self.words.push_front(Word::new(word));
            }
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Word> + '_> {
        Box::new(self.words.iter())
    }

    fn comparison_count(&self) -> u64 {
        self.tally.comparisons
    }

    fn reference_assignment_count(&self) -> u64 {
        self.tally.references
    }
}
