//! Fixed-point inference over the knowledge base.
//!
//! Each rule scans the sentences, collects what it found, and applies it only
//! after the scan. The arena is never mutated while it is being iterated.

use super::{Deduction, KnowledgeBase, Rule, Sentence};
use crate::{Cell, Result};
use std::collections::BTreeSet;
use tracing::trace;

/// Apply the rules in the knowledge base's order until a full pass changes
/// nothing. Terminates: every productive pass classifies a cell or adds a
/// sentence not held before, and both are drawn from finite sets.
pub(super) fn run_to_fixed_point(kb: &mut KnowledgeBase, deduction: &mut Deduction) -> Result<()> {
    let order = kb.order;
    loop {
        deduction.passes += 1;
        let mut changed = false;
        for rule in order.rules() {
            let progress = match rule {
                Rule::KnownSafes => apply_known_safes(kb, deduction)?,
                Rule::KnownMines => apply_known_mines(kb, deduction)?,
                Rule::SubsetInference => apply_subset_inference(kb, deduction)?,
            };
            changed |= progress;
        }

        let pruned = kb.knowledge.prune()?;
        deduction.sentences_pruned += pruned;
        trace!(
            pass = deduction.passes,
            changed,
            pruned,
            sentences = kb.knowledge.len(),
            "inference pass"
        );

        if !changed && pruned == 0 {
            return Ok(());
        }
    }
}

fn apply_known_safes(kb: &mut KnowledgeBase, deduction: &mut Deduction) -> Result<bool> {
    let found: BTreeSet<Cell> = kb
        .knowledge
        .sentences()
        .filter_map(Sentence::known_safes)
        .flatten()
        .copied()
        .collect();

    let mut changed = false;
    for cell in found {
        if kb.mark_safe(cell)? {
            deduction.new_safes.insert(cell);
            changed = true;
        }
    }
    Ok(changed)
}

fn apply_known_mines(kb: &mut KnowledgeBase, deduction: &mut Deduction) -> Result<bool> {
    let found: BTreeSet<Cell> = kb
        .knowledge
        .sentences()
        .filter_map(Sentence::known_mines)
        .flatten()
        .copied()
        .collect();

    let mut changed = false;
    for cell in found {
        if kb.mark_mine(cell)? {
            deduction.new_mines.insert(cell);
            changed = true;
        }
    }
    Ok(changed)
}

/// For every ordered pair with `a.cells` a proper subset of `b.cells`, add
/// `b - a` unless an equal sentence is already held.
fn apply_subset_inference(kb: &mut KnowledgeBase, deduction: &mut Deduction) -> Result<bool> {
    let held: Vec<&Sentence> = kb.knowledge.sentences().collect();
    let mut derived = Vec::new();
    for (i, a) in held.iter().enumerate() {
        for (j, b) in held.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some(sentence) = b.difference(a)? {
                derived.push(sentence);
            }
        }
    }

    let mut changed = false;
    for sentence in derived {
        if kb.knowledge.insert(sentence)?.is_some() {
            deduction.sentences_added += 1;
            changed = true;
        }
    }
    Ok(changed)
}
