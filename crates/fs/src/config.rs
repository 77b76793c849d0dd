//! Fixed column layout of a long-format record. No width is ever derived
//! from the entries being listed.

/// Right-aligned hard-link count.
pub const LINK_WIDTH: usize = 4;
/// Owner and group columns; names longer than this are cut.
pub const ID_WIDTH: usize = 8;
/// Right-aligned byte size.
pub const SIZE_WIDTH: usize = 9;
/// strftime-style layout of the date column, e.g. `Oct  8 14:03`.
pub const DATE_FORMAT: &str = "%b %e %H:%M";
/// Rendered width of [`DATE_FORMAT`], used when a timestamp is out of range.
pub const DATE_WIDTH: usize = 12;
