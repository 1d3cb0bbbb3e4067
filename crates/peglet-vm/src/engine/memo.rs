//! Packrat memo table.
//!
//! Results are recorded at rule-reference boundaries. An entry is written at
//! most once per parse; later stores for the same key are ignored.

use std::collections::HashMap;

use peglet_core::RuleId;

use super::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MemoKey {
    pub rule: RuleId,
    pub offset: usize,
    /// Whitespace skipping was suppressed (token context).
    pub no_skip: bool,
}

#[derive(Clone, Debug)]
pub enum MemoEntry {
    Failed,
    Matched { end: usize, value: Value },
}

impl MemoEntry {
    pub fn end(&self) -> Option<usize> {
        match self {
            MemoEntry::Failed => None,
            MemoEntry::Matched { end, .. } => Some(*end),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoTable {
    entries: HashMap<MemoKey, MemoEntry>,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, key: &MemoKey) -> Option<&MemoEntry> {
        self.entries.get(key)
    }

    /// Records `entry` unless `key` already has one.
    pub fn store(&mut self, key: MemoKey, entry: MemoEntry) {
        self.entries.entry(key).or_insert(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
