use std::{ffi::OsString, fmt::Display};

use chrono::{Local, TimeZone};
use log::debug;
use nix::unistd::{Gid, Group, Uid, User};

use crate::{
    config::{DATE_FORMAT, DATE_WIDTH, ID_WIDTH, LINK_WIDTH, SIZE_WIDTH},
    metadata::{EntryKind, EntryMetadata, Permissions},
};

/// Maps numeric owner ids to names for the long format.
pub trait IdentityResolver {
    fn user_name(&self, uid: u32) -> Option<String>;
    fn group_name(&self, gid: u32) -> Option<String>;
}

/// Resolves ids through the host's passwd/group databases.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIdentities;

impl IdentityResolver for SystemIdentities {
    fn user_name(&self, uid: u32) -> Option<String> {
        match User::from_uid(Uid::from_raw(uid)) {
            Ok(user) => user.map(|u| u.name),
            Err(e) => {
                debug!("[render] user lookup for uid {uid} failed: {e}");
                None
            }
        }
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        match Group::from_gid(Gid::from_raw(gid)) {
            Ok(group) => group.map(|g| g.name),
            Err(e) => {
                debug!("[render] group lookup for gid {gid} failed: {e}");
                None
            }
        }
    }
}

/// Glyph order of the permission column.
const PERMISSION_GLYPHS: [(Permissions, char); 9] = [
    (Permissions::OWNER_READ, 'r'),
    (Permissions::OWNER_WRITE, 'w'),
    (Permissions::OWNER_EXEC, 'x'),
    (Permissions::GROUP_READ, 'r'),
    (Permissions::GROUP_WRITE, 'w'),
    (Permissions::GROUP_EXEC, 'x'),
    (Permissions::OTHER_READ, 'r'),
    (Permissions::OTHER_WRITE, 'w'),
    (Permissions::OTHER_EXEC, 'x'),
];

/// Turns entry snapshots into output lines. Pure apart from identity
/// lookups; nothing is written anywhere.
#[derive(Debug, Default, Clone)]
pub struct Renderer<R = SystemIdentities> {
    identities: R,
}

impl Renderer<SystemIdentities> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: IdentityResolver> Renderer<R> {
    pub fn with_identities(identities: R) -> Self {
        Self { identities }
    }

    /// Bare mode yields the display name verbatim; long mode yields the
    /// fixed-column record. Neither carries a line terminator. The result is
    /// an `OsString` so names that are not UTF-8 keep their exact bytes.
    pub fn render(&self, meta: &EntryMetadata, long_format: bool) -> OsString {
        if long_format {
            self.render_long_in(meta, &Local)
        } else {
            meta.name.clone()
        }
    }

    /// Long record with the date column expressed in `tz`.
    ///
    /// The date column shows the last *access* time (`st_atime`), not the
    /// modification time.
    pub fn render_long_in<Tz>(&self, meta: &EntryMetadata, tz: &Tz) -> OsString
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let owner = id_field(self.identities.user_name(meta.uid), meta.uid);
        let group = id_field(self.identities.group_name(meta.gid), meta.gid);

        let mut line = OsString::from(format!(
            "{kind}{perms}{nlink:>LINK_WIDTH$} {owner}{group}{size:>SIZE_WIDTH$} {date} ",
            kind = type_glyph(meta.kind),
            perms = permission_glyphs(meta.permissions),
            nlink = meta.nlink,
            size = meta.size,
            date = format_timestamp(meta.atime_secs, tz),
        ));
        line.push(&meta.name);
        line
    }
}

/// Render with the host identity database and local time zone.
pub fn render(meta: &EntryMetadata, long_format: bool) -> OsString {
    Renderer::new().render(meta, long_format)
}

/// Only directories get their own glyph.
fn type_glyph(kind: EntryKind) -> char {
    match kind {
        EntryKind::Directory => 'd',
        EntryKind::File | EntryKind::Other => '-',
    }
}

fn permission_glyphs(perms: Permissions) -> String {
    PERMISSION_GLYPHS
        .iter()
        .map(|&(flag, glyph)| if perms.contains(flag) { glyph } else { '-' })
        .collect()
}

/// Name cut/padded to the column, or the raw id when no name is known.
fn id_field(name: Option<String>, id: u32) -> String {
    match name {
        Some(name) => format!("{name:<ID_WIDTH$.ID_WIDTH$}"),
        None => format!("{id:<ID_WIDTH$}"),
    }
}

fn format_timestamp<Tz>(secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_opt(secs, 0).earliest() {
        Some(dt) => dt.format(DATE_FORMAT).to_string(),
        None => format!("{:>DATE_WIDTH$}", "?"),
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
