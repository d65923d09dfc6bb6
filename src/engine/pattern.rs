//! Pattern compilation.

use super::pce::{CollationParams, Pce, ProcessedElements};
use crate::collation::{Collation, CollationElements, IGNORABLE};
use std::sync::Arc;
use tracing::debug;

/// A pattern text and its processed elements under one set of
/// [`CollationParams`].
///
/// Immutable once built; reconfiguration builds a new one.
#[derive(Clone, Debug)]
pub(crate) struct CompiledPattern {
    text: Arc<str>,
    pces: Vec<Pce>,
}

impl CompiledPattern {
    pub(crate) fn compile<C: Collation>(
        text: Arc<str>,
        collator: &C,
        params: CollationParams,
    ) -> Self {
        let mut raw = collator.elements(Arc::clone(&text));
        let mut ce_len = 0usize;
        let mut expansions = 0usize;
        while let Some(ce) = raw.next_ce() {
            if ce != IGNORABLE {
                ce_len += 1;
                expansions += raw.max_expansion(ce).saturating_sub(1);
            }
        }

        let mut stream = ProcessedElements::new(collator.elements(Arc::clone(&text)), params);
        let mut pces = Vec::with_capacity(ce_len);
        loop {
            let element = stream.next_processed();
            if element.is_end() {
                break;
            }
            pces.push(element.pce);
        }

        debug!(
            target: "collsearch::pattern",
            chars = text.chars().count(),
            ce_len,
            pce_len = pces.len(),
            expansions,
            strength = ?params.strength,
            shifted = params.shifted,
            "pattern compiled"
        );
        Self { text, pces }
    }

    #[inline]
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub(crate) fn pces(&self) -> &[Pce] {
        &self.pces
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.pces.len()
    }

    /// True when every element is ignorable under the active strength.
    #[inline]
    pub(crate) fn is_degenerate(&self) -> bool {
        self.pces.is_empty()
    }
}
