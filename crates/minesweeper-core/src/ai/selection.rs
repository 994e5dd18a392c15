use super::{KnowledgeBase, Move, MoveKind};
use crate::cell::all_cells;
use crate::{Cell, Error, Result};
use std::collections::BTreeSet;

impl KnowledgeBase {
    /// A cell proven safe that has not been played yet.
    ///
    /// Returns the smallest such cell in row-major order. Read-only.
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.safes.difference(&self.moves_made).next().copied()
    }

    /// Heuristic risk of opening `cell`: for every sentence mentioning it,
    /// 1 for the adjacency plus that sentence's remaining mine count.
    pub fn risk_score(&self, cell: Cell) -> usize {
        self.knowledge
            .sentences()
            .filter(|s| s.contains(&cell))
            .map(|s| 1 + s.count())
            .sum()
    }

    /// Fallback move when no safe move exists.
    ///
    /// Considers every cell not yet played and not a known mine, and picks the
    /// lowest [`risk_score`](Self::risk_score). Ties go to the first candidate
    /// in row-major order. Offers no safety guarantee.
    pub fn make_random_move(&self) -> Result<Cell> {
        self.scored_move().map(|(cell, _)| cell)
    }

    fn scored_move(&self) -> Result<(Cell, usize)> {
        let mut best: Option<(Cell, usize)> = None;
        for cell in all_cells(self.height, self.width) {
            if self.moves_made.contains(&cell) || self.mines.contains(&cell) {
                continue;
            }
            let score = self.risk_score(cell);
            if best.map_or(true, |(_, lowest)| score < lowest) {
                best = Some((cell, score));
            }
        }
        best.ok_or(Error::NoMovesLeft)
    }

    /// Safe move if one exists, otherwise the lowest-risk guess
    pub fn next_move(&self) -> Result<Move> {
        if let Some(cell) = self.make_safe_move() {
            return Ok(Move {
                cell,
                kind: MoveKind::Safe,
            });
        }
        let (cell, score) = self.scored_move()?;
        Ok(Move {
            cell,
            kind: MoveKind::Guess { score },
        })
    }

    /// Add every known mine to `flags`
    pub fn flag_mines(&self, flags: &mut BTreeSet<Cell>) {
        flags.extend(self.mines.iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn test_no_safe_move_on_fresh_knowledge() {
        let kb = KnowledgeBase::new(3, 3);
        assert_eq!(kb.make_safe_move(), None);
    }

    #[test]
    fn test_safe_move_skips_moves_made() {
        let mut kb = KnowledgeBase::new(3, 3);
        kb.add_knowledge(c(0, 0), 0).unwrap();

        let before = (kb.safes().clone(), kb.mines().clone(), kb.moves_made().clone());
        let cell = kb.make_safe_move().unwrap();
        assert_eq!(cell, c(0, 1));
        assert!(!kb.moves_made().contains(&cell));
        assert_eq!(
            before,
            (kb.safes().clone(), kb.mines().clone(), kb.moves_made().clone())
        );

        kb.add_knowledge(c(0, 1), 0).unwrap();
        kb.add_knowledge(c(0, 2), 0).unwrap();
        let next = kb.make_safe_move().unwrap();
        assert_eq!(next, c(1, 0));
    }

    #[test]
    fn test_safe_moves_exhausted() {
        let mut kb = KnowledgeBase::new(1, 2);
        kb.add_knowledge(c(0, 0), 0).unwrap();
        kb.add_knowledge(c(0, 1), 0).unwrap();
        assert_eq!(kb.make_safe_move(), None);
    }

    #[test]
    fn test_random_move_prefers_cells_away_from_information() {
        let mut kb = KnowledgeBase::new(3, 3);
        kb.add_knowledge(c(0, 0), 1).unwrap();

        for cell in [c(0, 1), c(1, 0), c(1, 1)] {
            assert_eq!(kb.risk_score(cell), 2);
        }
        assert_eq!(kb.risk_score(c(2, 2)), 0);
        // First zero-score candidate in row-major order
        assert_eq!(kb.make_random_move().unwrap(), c(0, 2));
    }

    #[test]
    fn test_random_move_tie_break_is_row_major() {
        let kb = KnowledgeBase::new(2, 2);
        assert_eq!(kb.make_random_move().unwrap(), c(0, 0));
    }

    #[test]
    fn test_random_move_never_picks_played_or_mined_cells() {
        let mut kb = KnowledgeBase::new(2, 2);
        kb.add_knowledge(c(0, 0), 3).unwrap();
        assert_eq!(kb.mines().len(), 3);
        assert!(matches!(kb.make_random_move(), Err(Error::NoMovesLeft)));
        assert!(matches!(kb.next_move(), Err(Error::NoMovesLeft)));
    }

    #[test]
    fn test_random_move_scores_overlapping_sentences() {
        let mut kb = KnowledgeBase::new(1, 5);
        kb.add_knowledge(c(0, 1), 1).unwrap();
        kb.add_knowledge(c(0, 3), 1).unwrap();
        // {(0,0),(0,2)}=1 and {(0,2),(0,4)}=1: (0,2) sits in both
        assert_eq!(kb.risk_score(c(0, 2)), 4);
        assert_eq!(kb.risk_score(c(0, 0)), 2);
        assert_eq!(kb.make_random_move().unwrap(), c(0, 0));
    }

    #[test]
    fn test_next_move_reports_kind() {
        let mut kb = KnowledgeBase::new(3, 3);
        let guess = kb.next_move().unwrap();
        assert_eq!(guess.cell, c(0, 0));
        assert_eq!(guess.kind, MoveKind::Guess { score: 0 });

        kb.add_knowledge(c(0, 0), 0).unwrap();
        let safe = kb.next_move().unwrap();
        assert!(safe.is_safe());
        assert_eq!(safe.cell, c(0, 1));
    }

    #[test]
    fn test_flag_mines_copies_known_mines() {
        let mut kb = KnowledgeBase::new(1, 2);
        kb.add_knowledge(c(0, 0), 1).unwrap();
        let mut flags = BTreeSet::new();
        kb.flag_mines(&mut flags);
        assert_eq!(flags, BTreeSet::from([c(0, 1)]));
    }
}
