//! Rule-based reference collator.
//!
//! # Root weights
//! Every character gets weights from a fixed scheme instead of a DUCET
//! table:
//! - Precomposed characters are decomposed canonically and collate as their
//!   decomposition, so `é` is an expansion of `e` plus a combining acute.
//! - Characters with a non-zero canonical combining class are secondary-only
//!   elements (zero primary).
//! - Controls and default-ignorable format characters are completely
//!   ignorable.
//! - Whitespace and punctuation get primaries below [`VARIABLE_TOP`], so
//!   they become shifted elements under [`AlternateHandling::Shifted`].
//! - ASCII digits, then letters and everything else, get primaries derived
//!   from the lowercase code point; uppercase adds a tertiary difference.
//!   Code points at or above `0xC000` use a two-element implicit weight
//!   whose second element is a continuation with a non-variable primary.
//!
//! # Tailoring
//! [`RuleCollator::with_rules`] accepts a small subset of ICU rule syntax:
//! `&reset` followed by relations `= item` (identical), `, item` (tertiary
//! difference), `; item` (secondary difference) and `< item` (a fresh
//! primary). Each relation is relative to the previous item. A
//! multi-character item becomes a contraction; an item whose weights span
//! several elements becomes an expansion.

use super::elements::RuleElements;
use super::{
    is_continuation, make_ce, primary_order, secondary_order, tertiary_order, Collation,
    COMMON_WEIGHT, CONTINUATION_MARKER, IGNORABLE,
};
use crate::api::{AlternateHandling, Strength};
use crate::error::{RuleError, RuleErrorKind};
use ahash::AHashMap;
use std::sync::Arc;
use unicode_normalization::char::{canonical_combining_class, decompose_canonical};

/// Default variable top: CEs with a primary below `0x1000` are variable.
pub const VARIABLE_TOP: u32 = 0x1000 << 16;

const SPACE_PRIMARY: u32 = 0x0209;
const ASCII_PUNCT_BASE: u32 = 0x0210;
const OTHER_PUNCT_BASE: u32 = 0x0300;
const DIGIT_BASE: u32 = 0x1000;
const LETTER_BASE: u32 = 0x2000;
const IMPLICIT_START: u32 = 0xC000;
const IMPLICIT_BASE: u32 = 0xE000;
const TAILORED_PRIMARY_BASE: u32 = 0xF000;
const UPPER_TERTIARY: u32 = 0x08;
const OTHER_SPACE_TERTIARY: u32 = 0x06;
const MARK_SECONDARY_BASE: u32 = 0x06;

// --------------------------
// Weight table
// --------------------------

/// Tailored units layered over the root weights.
#[derive(Debug, Default)]
pub(crate) struct Tailoring {
    units: AHashMap<Box<str>, Box<[u32]>>,
    /// Longest tailored unit, in chars.
    longest_unit: usize,
    /// Longest expansion ending in a given CE.
    expansion_ends: AHashMap<u32, usize>,
}

impl Tailoring {
    fn lookup(&self, key: &str) -> Option<&[u32]> {
        self.units.get(key).map(|ces| &ces[..])
    }

    fn insert(&mut self, key: &str, ces: Vec<u32>) {
        self.longest_unit = self.longest_unit.max(key.chars().count());
        if ces.len() > 1 {
            if let Some(&last) = ces.last() {
                let slot = self.expansion_ends.entry(last).or_insert(1);
                *slot = (*slot).max(ces.len());
            }
        }
        self.units.insert(key.into(), ces.into_boxed_slice());
    }

    pub(crate) fn max_expansion(&self, ce: u32) -> usize {
        self.expansion_ends.get(&ce).copied().unwrap_or(1)
    }

    /// Appends the CEs of the unit starting at `start` and returns its end.
    ///
    /// `start` must be a char boundary strictly before `text.len()`.
    pub(crate) fn unit_at(&self, text: &str, start: usize, out: &mut Vec<u32>) -> usize {
        let rest = &text[start..];
        if self.longest_unit > 1 {
            let ends: Vec<usize> = rest
                .char_indices()
                .skip(1)
                .map(|(i, _)| i)
                .chain(std::iter::once(rest.len()))
                .take(self.longest_unit)
                .collect();
            for &end in ends.iter().skip(1).rev() {
                if let Some(ces) = self.lookup(&rest[..end]) {
                    out.extend_from_slice(ces);
                    return start + end;
                }
            }
        }
        match rest.chars().next() {
            Some(c) => {
                self.char_ces(c, out);
                start + c.len_utf8()
            }
            None => start,
        }
    }

    /// Appends the CEs of the unit ending at `limit` and returns its start.
    ///
    /// `limit` must be a char boundary greater than zero.
    pub(crate) fn unit_before(&self, text: &str, limit: usize, out: &mut Vec<u32>) -> usize {
        let head = &text[..limit];
        if self.longest_unit > 1 {
            let starts: Vec<usize> = head
                .char_indices()
                .rev()
                .map(|(i, _)| i)
                .take(self.longest_unit)
                .collect();
            for &start in starts.iter().skip(1).rev() {
                if let Some(ces) = self.lookup(&head[start..]) {
                    out.extend_from_slice(ces);
                    return start;
                }
            }
        }
        match head.char_indices().next_back() {
            Some((start, c)) => {
                self.char_ces(c, out);
                start
            }
            None => 0,
        }
    }

    fn char_ces(&self, c: char, out: &mut Vec<u32>) {
        let mut buf = [0u8; 4];
        if let Some(ces) = self.lookup(c.encode_utf8(&mut buf)) {
            out.extend_from_slice(ces);
            return;
        }
        let mut parts: Vec<char> = Vec::new();
        decompose_canonical(c, |d| parts.push(d));
        if parts.len() == 1 && parts[0] == c {
            root_ces(c, out);
            return;
        }
        for d in parts {
            match self.lookup(d.encode_utf8(&mut buf)) {
                Some(ces) => out.extend_from_slice(ces),
                None => root_ces(d, out),
            }
        }
    }

    /// CEs of a whole string, segmented the same way a cursor would.
    fn string_ces(&self, s: &str) -> Vec<u32> {
        let mut out = Vec::new();
        let mut pos = 0;
        while pos < s.len() {
            pos = self.unit_at(s, pos, &mut out);
        }
        out
    }
}

fn is_completely_ignorable(c: char) -> bool {
    (c.is_control() && !c.is_whitespace())
        || matches!(c as u32, 0x00AD | 0x200B..=0x200F | 0x2060..=0x2064 | 0xFEFF)
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || (!c.is_alphanumeric()
            && matches!(
                c as u32,
                0x00A1..=0x00BF
                    | 0x2010..=0x2027
                    | 0x2030..=0x205E
                    | 0x3001..=0x3003
                    | 0x3008..=0x3011
                    | 0xFF01..=0xFF0F
            ))
}

fn single_lowercase(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn root_ces(c: char, out: &mut Vec<u32>) {
    let cp = c as u32;
    if canonical_combining_class(c) != 0 {
        out.push(make_ce(0, MARK_SECONDARY_BASE + cp % 0xF0, COMMON_WEIGHT));
        return;
    }
    if is_completely_ignorable(c) {
        out.push(IGNORABLE);
        return;
    }
    if c.is_whitespace() {
        let tertiary = if c == ' ' {
            COMMON_WEIGHT
        } else {
            OTHER_SPACE_TERTIARY
        };
        out.push(make_ce(SPACE_PRIMARY, COMMON_WEIGHT, tertiary));
        return;
    }
    if is_punctuation(c) {
        let primary = if c.is_ascii() {
            ASCII_PUNCT_BASE + cp
        } else {
            OTHER_PUNCT_BASE + cp % 0x0C00
        };
        out.push(make_ce(primary, COMMON_WEIGHT, COMMON_WEIGHT));
        return;
    }
    if c.is_ascii_digit() {
        out.push(make_ce(DIGIT_BASE + (cp - '0' as u32), COMMON_WEIGHT, COMMON_WEIGHT));
        return;
    }

    let tertiary = if c.is_uppercase() {
        UPPER_TERTIARY
    } else {
        COMMON_WEIGHT
    };
    let lower = single_lowercase(c) as u32;
    if lower < IMPLICIT_START {
        out.push(make_ce(LETTER_BASE + lower, COMMON_WEIGHT, tertiary));
    } else {
        out.push(make_ce(IMPLICIT_BASE + (lower >> 15), COMMON_WEIGHT, tertiary));
        out.push((((lower & 0x7FFF) | 0x8000) << 16) | CONTINUATION_MARKER);
    }
}

// --------------------------
// Rule parsing
// --------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Relation {
    Identical,
    Tertiary,
    Secondary,
    Primary,
}

impl Relation {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(Relation::Identical),
            ',' => Some(Relation::Tertiary),
            ';' => Some(Relation::Secondary),
            '<' => Some(Relation::Primary),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Expect {
    Reset,
    ResetItem,
    RelationOrReset,
    RelationItem(Relation),
}

fn is_unsupported(c: char) -> bool {
    matches!(c, '/' | '|' | '[' | ']' | '\'' | '\\' | '!' | '@')
}

fn is_item_char(c: char) -> bool {
    !c.is_whitespace() && c != '&' && Relation::from_char(c).is_none() && !is_unsupported(c)
}

/// Index of the element a relation modifies: the last non-continuation CE.
fn anchor_index(ces: &[u32]) -> Option<usize> {
    ces.iter().rposition(|&ce| !is_continuation(ce))
}

fn build_tailoring(rules: &str) -> Result<Tailoring, RuleError> {
    let mut table = Tailoring::default();
    let mut current: Vec<u32> = Vec::new();
    let mut next_primary = TAILORED_PRIMARY_BASE;
    let mut expect = Expect::Reset;
    let mut chars = rules.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if is_unsupported(c) {
            return Err(RuleError {
                offset,
                kind: RuleErrorKind::UnsupportedSyntax(c),
            });
        }
        if c == '&' {
            if matches!(expect, Expect::ResetItem | Expect::RelationItem(_)) {
                return Err(RuleError {
                    offset,
                    kind: RuleErrorKind::EmptyItem,
                });
            }
            expect = Expect::ResetItem;
            continue;
        }
        if let Some(relation) = Relation::from_char(c) {
            expect = match expect {
                Expect::Reset => {
                    return Err(RuleError {
                        offset,
                        kind: RuleErrorKind::MissingReset,
                    })
                }
                Expect::ResetItem | Expect::RelationItem(_) => {
                    return Err(RuleError {
                        offset,
                        kind: RuleErrorKind::UnexpectedOperator(c),
                    })
                }
                Expect::RelationOrReset => Expect::RelationItem(relation),
            };
            continue;
        }

        let mut end = offset + c.len_utf8();
        while let Some(&(i, next)) = chars.peek() {
            if !is_item_char(next) {
                break;
            }
            end = i + next.len_utf8();
            chars.next();
        }
        let item = &rules[offset..end];

        match expect {
            Expect::Reset => {
                return Err(RuleError {
                    offset,
                    kind: RuleErrorKind::MissingReset,
                })
            }
            Expect::RelationOrReset => {
                return Err(RuleError {
                    offset,
                    kind: RuleErrorKind::MissingRelation,
                })
            }
            Expect::ResetItem => {
                current = table.string_ces(item);
            }
            Expect::RelationItem(relation) => {
                let ces = relate(&current, relation, &mut next_primary);
                table.insert(item, ces.clone());
                current = ces;
            }
        }
        expect = Expect::RelationOrReset;
    }

    if matches!(expect, Expect::ResetItem | Expect::RelationItem(_)) {
        return Err(RuleError {
            offset: rules.len(),
            kind: RuleErrorKind::EmptyItem,
        });
    }
    Ok(table)
}

fn relate(base: &[u32], relation: Relation, next_primary: &mut u32) -> Vec<u32> {
    let mut ces = base.to_vec();
    match relation {
        Relation::Identical => {}
        Relation::Tertiary => {
            if let Some(i) = anchor_index(&ces) {
                let ce = ces[i];
                let tertiary = (tertiary_order(ce) + 1).min(0x3F);
                ces[i] = make_ce(primary_order(ce), secondary_order(ce), tertiary);
            }
        }
        Relation::Secondary => {
            if let Some(i) = anchor_index(&ces) {
                let ce = ces[i];
                let secondary = (secondary_order(ce) + 1).min(0xFF);
                ces[i] = make_ce(primary_order(ce), secondary, COMMON_WEIGHT);
            }
        }
        Relation::Primary => {
            ces = vec![make_ce(*next_primary, COMMON_WEIGHT, COMMON_WEIGHT)];
            *next_primary = (*next_primary + 1).min(0xFFFF);
        }
    }
    ces
}

// --------------------------
// Collator
// --------------------------

/// Rule-based collator implementing [`Collation`].
///
/// Cloning is cheap: the weight table is shared.
#[derive(Clone, Debug)]
pub struct RuleCollator {
    table: Arc<Tailoring>,
    strength: Strength,
    alternate: AlternateHandling,
    variable_top: u32,
    numeric: bool,
}

impl RuleCollator {
    /// Root collator: tertiary strength, non-ignorable variables.
    pub fn root() -> Self {
        Self::from_table(Tailoring::default())
    }

    /// Root collator with `rules` applied on top.
    pub fn with_rules(rules: &str) -> Result<Self, RuleError> {
        let table = build_tailoring(rules)?;
        tracing::debug!(
            target: "collsearch::collation",
            units = table.units.len(),
            longest_unit = table.longest_unit,
            "built tailoring"
        );
        Ok(Self::from_table(table))
    }

    fn from_table(table: Tailoring) -> Self {
        Self {
            table: Arc::new(table),
            strength: Strength::Tertiary,
            alternate: AlternateHandling::NonIgnorable,
            variable_top: VARIABLE_TOP,
            numeric: false,
        }
    }

    pub fn with_strength(mut self, strength: Strength) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_alternate_handling(mut self, alternate: AlternateHandling) -> Self {
        self.alternate = alternate;
        self
    }

    pub fn set_strength(&mut self, strength: Strength) {
        self.strength = strength;
    }

    pub fn set_alternate_handling(&mut self, alternate: AlternateHandling) {
        self.alternate = alternate;
    }

    pub fn set_variable_top(&mut self, variable_top: u32) {
        self.variable_top = variable_top;
    }

    pub fn set_numeric(&mut self, numeric: bool) {
        self.numeric = numeric;
    }

    /// All CEs of `text` in forward order.
    pub fn collation_elements(&self, text: &str) -> Vec<u32> {
        self.table.string_ces(text)
    }
}

impl Default for RuleCollator {
    fn default() -> Self {
        Self::root()
    }
}

impl Collation for RuleCollator {
    type Elements = RuleElements;

    fn elements(&self, text: Arc<str>) -> RuleElements {
        RuleElements::new(text, Arc::clone(&self.table))
    }

    fn strength(&self) -> Strength {
        self.strength
    }

    fn alternate_handling(&self) -> AlternateHandling {
        self.alternate
    }

    fn variable_top(&self) -> u32 {
        self.variable_top
    }

    fn is_numeric(&self) -> bool {
        self.numeric
    }
}
