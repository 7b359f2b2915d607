//! Command and notification types for the application store.

use denkmal_core::{Level, MemorialId};

/// An operation requested of the store, dispatched through one exhaustive
/// match.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchMemorial { id: MemorialId },
    FetchAuthor { slug: String, level: Level },
    FetchPage { slug: String },
    SyncMapState { token: String },
}

/// A committed change to one of the store's "current" slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    MemorialChanged,
    AuthorChanged,
    PageChanged,
    MapChanged,
}
