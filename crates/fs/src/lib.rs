//! Metadata resolution and formatting behind `lsx`: classify a target,
//! enumerate a directory, render entries as bare names or long records.

mod classify;
mod config;
mod enumerate;
mod error;
mod listing;
mod metadata;
mod render;

pub use classify::{classify, stat_target};
pub use enumerate::{Entries, enumerate, is_hidden};
pub use error::ListError;
pub use listing::{Lister, ListingRequest, normalize_target, resolve_against};
pub use metadata::{EntryKind, EntryMetadata, Permissions};
pub use render::{IdentityResolver, Renderer, SystemIdentities, render};
