//! Processed collation elements (PCEs).
//!
//! Raw 32-bit CEs are not directly comparable for search: their meaning
//! depends on the comparison strength and on whether variable elements are
//! shifted. [`ProcessedElements`] folds those attributes into 64-bit PCEs,
//! drops everything that is ignorable under them, and tags each surviving
//! element with the byte range of text it came from.
//!
//! # Layout
//! `primary << 48 | secondary << 32 | tertiary << 16 | quaternary`, each
//! field 16 bits. [`Pce::END`] (all bits set) marks the end of the stream in
//! either direction; a zero PCE is never emitted.
//!
//! # Backward traversal
//! Several raw CEs can make up one processed unit: a base element followed
//! by secondary-only marks, or an element followed by continuations.
//! Shifting state also flows left to right through such a run. Going
//! backward, the stream therefore reads raw CEs right to left until it hits
//! an element that starts a unit (non-zero primary, not a continuation),
//! processes that run left to right, and then hands the results out right to
//! left. Two [`ElementStack`]s carry the run and the results.

use crate::api::Strength;
use crate::collation::{
    is_continuation, primary_order, secondary_order, tertiary_order, Collation,
    CollationElements, IGNORABLE,
};
use crate::stdx::ElementStack;
use std::fmt;

/// A processed collation element.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Pce(i64);

impl Pce {
    /// End-of-stream sentinel.
    pub(crate) const END: Pce = Pce(-1);

    #[inline]
    pub(crate) fn from_weights(primary: u32, secondary: u32, tertiary: u32, quaternary: u32) -> Self {
        let bits = (u64::from(primary & 0xFFFF) << 48)
            | (u64::from(secondary & 0xFFFF) << 32)
            | (u64::from(tertiary & 0xFFFF) << 16)
            | u64::from(quaternary & 0xFFFF);
        Pce(bits as i64)
    }

    #[inline]
    pub(crate) fn is_end(self) -> bool {
        self == Pce::END
    }

    #[inline]
    fn bits(self) -> u64 {
        self.0 as u64
    }

    #[inline]
    pub(crate) fn primary(self) -> u32 {
        (self.bits() >> 48) as u32
    }

    #[inline]
    pub(crate) fn secondary(self) -> u32 {
        ((self.bits() >> 32) & 0xFFFF) as u32
    }

    #[inline]
    pub(crate) fn tertiary(self) -> u32 {
        ((self.bits() >> 16) & 0xFFFF) as u32
    }

    #[inline]
    pub(crate) fn quaternary(self) -> u32 {
        (self.bits() & 0xFFFF) as u32
    }
}

impl fmt::Debug for Pce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            return write!(f, "Pce(END)");
        }
        write!(
            f,
            "Pce({:04x}:{:04x}:{:04x}:{:04x})",
            self.primary(),
            self.secondary(),
            self.tertiary(),
            self.quaternary()
        )
    }
}

/// A PCE plus the `[low, high)` byte range of text that produced it.
///
/// `low == high` on a non-END element means it is a trailing part of an
/// expansion; the first element of the expansion carries the real range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct IndexedPce {
    pub(crate) pce: Pce,
    pub(crate) low: usize,
    pub(crate) high: usize,
}

impl IndexedPce {
    #[inline]
    pub(crate) fn is_end(&self) -> bool {
        self.pce.is_end()
    }

    /// True for a real element that starts and ends at the same offset.
    #[inline]
    pub(crate) fn is_mid_expansion(&self) -> bool {
        self.low == self.high && !self.is_end()
    }
}

/// Collator attributes that determine the PCE stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CollationParams {
    pub(crate) strength: Strength,
    pub(crate) shifted: bool,
    pub(crate) variable_top: u32,
}

impl CollationParams {
    pub(crate) fn of<C: Collation>(collator: &C) -> Self {
        Self {
            strength: collator.strength(),
            shifted: collator.alternate_handling() == crate::api::AlternateHandling::Shifted,
            variable_top: collator.variable_top(),
        }
    }

    /// Levels kept by the strength: 1, 2, or 3 (tertiary and above).
    fn level_mask(self) -> u8 {
        match self.strength {
            Strength::Primary => 1,
            Strength::Secondary => 2,
            _ => 3,
        }
    }

    /// True if both parameter sets turn the same CEs into the same PCEs.
    ///
    /// `Quaternary` and `Identical` produce identical streams; so do
    /// `Tertiary` and `Identical` except for the quaternary field.
    pub(crate) fn same_elements(self, other: CollationParams) -> bool {
        self.level_mask() == other.level_mask()
            && self.strength.includes_quaternary() == other.strength.includes_quaternary()
            && self.shifted == other.shifted
            && self.variable_top == other.variable_top
    }
}

#[derive(Clone, Copy, Debug)]
struct RawElement {
    ce: u32,
    low: usize,
    high: usize,
}

/// Strength- and shift-aware element stream over a raw CE cursor.
pub(crate) struct ProcessedElements<E> {
    elements: E,
    params: CollationParams,
    // The previous non-ignorable element was shifted.
    is_shifted: bool,
    raw: ElementStack<RawElement>,
    processed: ElementStack<IndexedPce>,
}

impl<E: CollationElements> ProcessedElements<E> {
    pub(crate) fn new(elements: E, params: CollationParams) -> Self {
        Self {
            elements,
            params,
            is_shifted: false,
            raw: ElementStack::default(),
            processed: ElementStack::default(),
        }
    }

    pub(crate) fn params(&self) -> CollationParams {
        self.params
    }

    pub(crate) fn set_params(&mut self, params: CollationParams) {
        self.params = params;
        self.clear();
    }

    /// Swaps in a cursor over new text.
    pub(crate) fn replace_elements(&mut self, elements: E) {
        self.elements = elements;
        self.clear();
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.elements.offset()
    }

    /// Repositions the underlying cursor and drops all buffered state.
    pub(crate) fn set_offset(&mut self, offset: usize) {
        self.elements.set_offset(offset);
        self.clear();
    }

    fn clear(&mut self) {
        self.is_shifted = false;
        self.raw.reset();
        self.processed.reset();
    }

    fn process_ce(&mut self, ce: u32) -> Option<Pce> {
        if ce == IGNORABLE {
            return None;
        }
        let params = self.params;
        let mut primary = primary_order(ce);
        let mut secondary = 0;
        let mut tertiary = 0;
        let mut quaternary = 0;
        match params.strength {
            Strength::Primary => {}
            Strength::Secondary => secondary = secondary_order(ce),
            _ => {
                secondary = secondary_order(ce);
                tertiary = tertiary_order(ce);
            }
        }

        let variable = params.shifted && params.variable_top > ce && primary != 0;
        if variable || (self.is_shifted && primary == 0) {
            if primary == 0 {
                return None;
            }
            if params.strength.includes_quaternary() {
                quaternary = primary;
            }
            primary = 0;
            secondary = 0;
            tertiary = 0;
            self.is_shifted = true;
        } else {
            if params.strength.includes_quaternary() {
                quaternary = 0xFFFF;
            }
            self.is_shifted = false;
        }

        let pce = Pce::from_weights(primary, secondary, tertiary, quaternary);
        if pce == Pce(0) {
            None
        } else {
            Some(pce)
        }
    }

    /// Next non-ignorable element, or END with `low == high ==` the final
    /// offset.
    pub(crate) fn next_processed(&mut self) -> IndexedPce {
        self.processed.reset();
        loop {
            let low = self.elements.offset();
            let ce = self.elements.next_ce();
            let high = self.elements.offset();
            let Some(ce) = ce else {
                return IndexedPce {
                    pce: Pce::END,
                    low,
                    high,
                };
            };
            if let Some(pce) = self.process_ce(ce) {
                return IndexedPce { pce, low, high };
            }
        }
    }

    /// Previous non-ignorable element, or END with `low == high == 0`.
    pub(crate) fn previous_processed(&mut self) -> IndexedPce {
        while self.processed.is_empty() {
            self.raw.reset();
            let mut at_start = false;
            loop {
                let high = self.elements.offset();
                let Some(ce) = self.elements.previous_ce() else {
                    at_start = self.raw.is_empty();
                    break;
                };
                let low = self.elements.offset();
                self.raw.push(RawElement { ce, low, high });
                if primary_order(ce) != 0 && !is_continuation(ce) {
                    break;
                }
            }

            // The raw stack pops in text order.
            while let Some(raw) = self.raw.pop() {
                if let Some(pce) = self.process_ce(raw.ce) {
                    self.processed.push(IndexedPce {
                        pce,
                        low: raw.low,
                        high: raw.high,
                    });
                }
            }
            if at_start {
                break;
            }
        }

        self.processed.pop().unwrap_or(IndexedPce {
            pce: Pce::END,
            low: 0,
            high: 0,
        })
    }
}
