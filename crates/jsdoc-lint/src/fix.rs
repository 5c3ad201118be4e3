//! Applying the fixes of diagnostics to source text.

use std::ops::Range;

use ftree::FenwickTree;
use tracing::debug;

use crate::Diagnostic;

/// An edit replacing a byte range of the linted source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replacement {
    /// The replaced range of the original source.
    range: Range<usize>,
    /// The replacement text.
    value: String,
}

impl Replacement {
    /// Creates a replacement of the given range of the original source.
    pub fn replace(range: Range<usize>, value: impl Into<String>) -> Self {
        Self {
            range,
            value: value.into(),
        }
    }

    /// Gets the start of the replaced range.
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Gets the end of the replaced range.
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Gets the replacement text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Determines if two replacements touch the same part of the source.
    ///
    /// Two insertions at the same offset conflict since their order is
    /// ambiguous.
    fn conflicts_with(&self, other: &Self) -> bool {
        (self.range.start < other.range.end && other.range.start < self.range.end)
            || self.range.start == other.range.start
    }
}

/// Applies replacements expressed in offsets of the original source.
///
/// A [Fenwick tree](https://en.wikipedia.org/wiki/Fenwick_tree) records how
/// much each applied replacement grew or shrank the text at its start offset,
/// so an original offset is mapped to the edited text by adding the prefix sum
/// of the shifts before it. Replacements may therefore be applied in any
/// order as long as they do not overlap.
#[derive(Clone, Debug)]
pub struct Fixer {
    /// The edited text.
    value: String,
    /// The length changes, indexed by original offset.
    shifts: FenwickTree<isize>,
}

impl Fixer {
    /// Creates a fixer for the given source.
    pub fn new(value: String) -> Self {
        Self {
            shifts: FenwickTree::from_iter(vec![0; value.len() + 1]),
            value,
        }
    }

    /// Maps an offset of the original source to the edited text.
    fn map(&self, offset: usize) -> usize {
        offset
            .checked_add_signed(self.shifts.prefix_sum(offset, 0))
            .unwrap_or(offset)
    }

    /// Applies a replacement.
    ///
    /// Replacements reaching past the end of the original source are ignored.
    pub fn apply(&mut self, replacement: &Replacement) {
        let Range { start, end } = replacement.range;
        if start > end || end >= self.shifts.len() {
            debug!(start, end, "ignoring out-of-bounds replacement");
            return;
        }

        let mapped = self.map(start)..self.map(end);
        self.value.replace_range(mapped, &replacement.value);

        let shift = replacement.value.len() as isize - (end - start) as isize;
        self.shifts.add_at(start, shift);
    }

    /// Gets the edited text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the fixer and returns the edited text.
    pub fn into_value(self) -> String {
        self.value
    }
}

/// Applies the fixes of the given diagnostics to the source they were
/// reported for.
///
/// Each diagnostic's replacements are applied together or not at all. A
/// diagnostic whose replacements conflict with those of an earlier diagnostic
/// is skipped; linting the result again reports it anew.
pub fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> String {
    let mut accepted: Vec<&Replacement> = Vec::new();
    let mut fixer = Fixer::new(source.to_string());
    for diagnostic in diagnostics.iter().filter(|d| d.is_fixable()) {
        let replacements = diagnostic.replacements();
        let skip = replacements.iter().any(|r| {
            r.end() > source.len() || accepted.iter().any(|a| a.conflicts_with(r))
        });
        if skip {
            debug!(
                rule = diagnostic.rule(),
                "skipping fix overlapping an earlier fix"
            );
            continue;
        }

        for replacement in replacements {
            fixer.apply(replacement);
            accepted.push(replacement);
        }
    }

    fixer.into_value()
}
