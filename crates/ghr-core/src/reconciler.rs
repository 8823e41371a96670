// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Ordered list of repositories shown to the user, and the changes applied to it

use ghr_api_contract::RepositoryRecord;

/// What a mutation did to the list, for incremental re-rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    /// Contents were replaced wholesale
    Reset { len: usize },
    /// One record left the list at `index`
    Removed { index: usize, record: RepositoryRecord },
    /// Nothing matched
    Unchanged,
}

/// Repositories in server order
///
/// Single writer: owned by the list controller. There is no in-place update;
/// edits are picked up by the next full refetch.
#[derive(Debug, Clone, Default)]
pub struct RepositoryList {
    records: Vec<RepositoryRecord>,
}

impl RepositoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current contents and adopt `records` in the given order
    pub fn replace_all(&mut self, records: Vec<RepositoryRecord>) -> ListChange {
        self.records = records;
        ListChange::Reset {
            len: self.records.len(),
        }
    }

    /// Remove the first record with `id`; a missing id is not an error
    pub fn remove_by_id(&mut self, id: u64) -> ListChange {
        match self.records.iter().position(|r| r.id == id) {
            Some(index) => ListChange::Removed {
                index,
                record: self.records.remove(index),
            },
            None => ListChange::Unchanged,
        }
    }

    pub fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RepositoryRecord> {
        self.records.get(index)
    }

    pub fn find_by_id(&self, id: u64) -> Option<&RepositoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&RepositoryRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}
