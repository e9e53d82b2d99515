//! Ordered, deduplicated message collection with pagination cursor state.
//!
//! Responsibilities:
//! - Append fetched pages at the tail (pagination merge)
//! - Prepend live-pushed messages at the head (live ingestion)
//! - Guarantee id uniqueness after every mutation
//! - Track the continuation cursor for the "load more" affordance
//!
//! The store is owned exclusively by the coordinator; nothing else mutates
//! it. Both mutation paths preserve the relative order of messages already
//! in the store.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{Message, Page};

/// Errors from merging a fetched page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// The page claims more results exist but carries no continuation
    /// cursor, which would make the next fetch impossible.
    #[error("page claims more results but carries no continuation cursor")]
    MissingCursor,
}

/// The ordered message sequence plus pagination cursor state.
///
/// Created empty when a feed view opens and dropped when it closes. Live
/// arrivals go to the head, paginated history to the tail, so the sequence
/// reads newest-first end to end.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    ids: HashSet<String>,
    end_cursor: Option<String>,
    has_next_page: bool,
}

impl MessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one fetched page into the store.
    ///
    /// Appends `page.edges` at the tail in the order the query returned
    /// them, silently skipping any edge whose id already exists anywhere in
    /// the store (the initial query window can overlap a later page).
    /// Updates `end_cursor` and `has_next_page` from the page. An empty
    /// edge list is a valid no-op merge.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::MissingCursor`] - with the store left
    /// untouched - when the page claims `has_next_page` without supplying
    /// a cursor.
    pub fn merge_page(&mut self, page: Page) -> Result<usize, MergeError> {
        if page.has_next_page && page.end_cursor.is_none() {
            return Err(MergeError::MissingCursor);
        }

        let mut appended = 0;
        for edge in page.edges {
            if self.ids.insert(edge.id.clone()) {
                self.messages.push(edge);
                appended += 1;
            } else {
                log::debug!("[MessageStore] Skipping duplicate edge {}", edge.id);
            }
        }

        self.end_cursor = page.end_cursor;
        self.has_next_page = page.has_next_page;
        Ok(appended)
    }

    /// Prepends one live-pushed message at the head of the sequence.
    ///
    /// Idempotent: a message whose id already exists (duplicate delivery,
    /// or delivery racing a page fetch that contained it) is dropped and
    /// the store is left unchanged. Returns whether the store changed.
    pub fn ingest(&mut self, message: Message) -> bool {
        if !self.ids.insert(message.id.clone()) {
            log::debug!(
                "[MessageStore] Ignoring duplicate live message {}",
                message.id
            );
            return false;
        }
        self.messages.insert(0, message);
        true
    }

    /// Read-only view of the sequence, head to tail.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Looks up a message by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Number of messages currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the store holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent continuation cursor.
    #[must_use]
    pub fn end_cursor(&self) -> Option<&str> {
        self.end_cursor.as_deref()
    }

    /// Whether more pages exist past the current cursor.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }
}
