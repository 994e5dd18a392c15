//! SentenceStore: slot arena holding the knowledge base's sentences.
//!
//! Ids stay valid until their sentence is removed. Freed slots are reused by
//! later inserts. Iteration follows slot order, so it is deterministic for a
//! given history of inserts and removals.

use super::Sentence;
use crate::{Cell, Error, Result};

/// Stable handle to a sentence in a [`SentenceStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SentenceId(usize);

#[derive(Debug, Clone, Default)]
pub struct SentenceStore {
    slots: Vec<Option<Sentence>>,
    free: Vec<usize>,
    live: usize,
}

impl SentenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn get(&self, id: SentenceId) -> Option<&Sentence> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SentenceId, &Sentence)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|s| (SentenceId(idx), s)))
    }

    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.slots.iter().flatten()
    }

    pub fn contains(&self, sentence: &Sentence) -> bool {
        self.sentences().any(|s| s == sentence)
    }

    /// Insert a sentence unless an equal one is already held.
    ///
    /// Empty sentences carry no information and are not stored. A sentence
    /// over the same cells as a held one but with a different count is a
    /// contradiction.
    pub fn insert(&mut self, sentence: Sentence) -> Result<Option<SentenceId>> {
        if sentence.is_empty() {
            return Ok(None);
        }
        if let Some(existing) = self.sentences().find(|s| s.cells() == sentence.cells()) {
            if existing.count() != sentence.count() {
                return Err(Error::Contradiction(format!(
                    "{} conflicts with {}",
                    sentence, existing
                )));
            }
            return Ok(None);
        }

        self.live += 1;
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(sentence);
                idx
            }
            None => {
                self.slots.push(Some(sentence));
                self.slots.len() - 1
            }
        };
        Ok(Some(SentenceId(idx)))
    }

    pub fn remove(&mut self, id: SentenceId) -> Option<Sentence> {
        let removed = self.slots.get_mut(id.0).and_then(Option::take);
        if removed.is_some() {
            self.live -= 1;
            self.free.push(id.0);
        }
        removed
    }

    /// Mark `cell` safe in every sentence. Returns how many sentences held it.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<usize> {
        let mut touched = 0;
        for sentence in self.slots.iter_mut().flatten() {
            if sentence.mark_safe(cell)? {
                touched += 1;
            }
        }
        Ok(touched)
    }

    /// Mark `cell` as a mine in every sentence. Returns how many sentences held it.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<usize> {
        let mut touched = 0;
        for sentence in self.slots.iter_mut().flatten() {
            if sentence.mark_mine(cell)? {
                touched += 1;
            }
        }
        Ok(touched)
    }

    /// Drop empty sentences and collapse duplicates onto the lowest id.
    /// Returns the number of sentences removed.
    pub fn prune(&mut self) -> Result<usize> {
        let mut doomed = Vec::new();
        let held: Vec<(SentenceId, &Sentence)> = self.iter().collect();
        for (i, &(id, sentence)) in held.iter().enumerate() {
            if sentence.is_empty() {
                doomed.push(id);
                continue;
            }
            for &(_, earlier) in &held[..i] {
                if earlier.cells() != sentence.cells() {
                    continue;
                }
                if earlier.count() != sentence.count() {
                    return Err(Error::Contradiction(format!(
                        "{} conflicts with {}",
                        sentence, earlier
                    )));
                }
                doomed.push(id);
                break;
            }
        }

        for &id in &doomed {
            self.remove(id);
        }
        Ok(doomed.len())
    }
}
