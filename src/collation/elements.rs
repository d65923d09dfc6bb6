//! Element cursor for [`RuleCollator`](super::RuleCollator).

use super::rules::Tailoring;
use super::CollationElements;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Idle,
    Forward,
    Backward,
}

/// Bidirectional CE cursor over one text.
///
/// One unit (a character, a contraction, or a decomposed character) is
/// segmented at a time; its CEs are held in `pending` until consumed.
/// Changing direction drops the partially consumed unit and re-reads it
/// whole from the other side.
pub struct RuleElements {
    text: Arc<str>,
    table: Arc<Tailoring>,
    pos: usize,
    // Forward: remaining CEs reversed, so `pop` yields the next one.
    // Backward: remaining CEs in text order, so `pop` yields the previous one.
    pending: Vec<u32>,
    direction: Direction,
    // Backward only: end of the unit being drained.
    unit_limit: usize,
}

impl RuleElements {
    pub(crate) fn new(text: Arc<str>, table: Arc<Tailoring>) -> Self {
        Self {
            text,
            table,
            pos: 0,
            pending: Vec::with_capacity(4),
            direction: Direction::Idle,
            unit_limit: 0,
        }
    }

    fn turn(&mut self, direction: Direction) {
        if self.direction != direction {
            self.pending.clear();
            self.direction = direction;
        }
    }
}

impl CollationElements for RuleElements {
    fn next_ce(&mut self) -> Option<u32> {
        self.turn(Direction::Forward);
        if let Some(ce) = self.pending.pop() {
            return Some(ce);
        }
        if self.pos >= self.text.len() {
            return None;
        }
        self.pos = self.table.unit_at(&self.text, self.pos, &mut self.pending);
        self.pending.reverse();
        self.pending.pop()
    }

    fn previous_ce(&mut self) -> Option<u32> {
        self.turn(Direction::Backward);
        if let Some(ce) = self.pending.pop() {
            return Some(ce);
        }
        if self.pos == 0 {
            return None;
        }
        self.unit_limit = self.pos;
        self.pos = self.table.unit_before(&self.text, self.pos, &mut self.pending);
        self.pending.pop()
    }

    fn offset(&self) -> usize {
        if self.direction == Direction::Backward && !self.pending.is_empty() {
            self.unit_limit
        } else {
            self.pos
        }
    }

    fn set_offset(&mut self, offset: usize) {
        debug_assert!(self.text.is_char_boundary(offset));
        self.pending.clear();
        self.direction = Direction::Idle;
        self.pos = offset.min(self.text.len());
    }

    fn max_expansion(&self, ce: u32) -> usize {
        self.table.max_expansion(ce)
    }
}
