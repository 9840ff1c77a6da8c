//! Violation ledger.
//!
//! An append-only log of violations recorded by the invigilator. The ledger
//! knows nothing about the timer; whether an exam is active is checked by
//! the session before anything is appended.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::types::{Violation, ViolationType};

// ============================================================================
// ViolationCounts
// ============================================================================

/// Per-type totals. Every known type is present, even at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViolationCounts {
    counts: BTreeMap<ViolationType, usize>,
}

impl ViolationCounts {
    fn zeroed() -> Self {
        Self {
            counts: ViolationType::ALL.iter().map(|kind| (*kind, 0)).collect(),
        }
    }

    /// Count for a single type.
    pub fn get(&self, kind: ViolationType) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Sum across all types.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(type, count)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ViolationType, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }
}

// ============================================================================
// ViolationLedger
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ViolationLedger {
    entries: Vec<Violation>,
}

impl ViolationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation captured now and returns it.
    pub fn add(&mut self, kind: ViolationType) -> Violation {
        self.push(Violation::new(kind))
    }

    /// Records an already-built violation.
    pub fn push(&mut self, violation: Violation) -> Violation {
        debug!(kind = violation.kind.as_str(), id = %violation.id, "violation recorded");
        self.entries.push(violation.clone());
        violation
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn count_by_type(&self) -> ViolationCounts {
        let mut counts = ViolationCounts::zeroed();
        for entry in &self.entries {
            *counts.counts.entry(entry.kind).or_insert(0) += 1;
        }
        counts
    }

    /// All entries, oldest first. Equal timestamps keep insertion order.
    pub fn timeline(&self) -> Vec<Violation> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|entry| entry.timestamp);
        entries
    }

    /// Entries newest first, optionally capped to `limit`.
    pub fn recent(&self, limit: Option<usize>) -> Vec<Violation> {
        let mut entries = self.timeline();
        entries.reverse();
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
