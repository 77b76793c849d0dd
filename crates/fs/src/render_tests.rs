use super::*;
use chrono::Utc;
use std::{
    collections::HashMap,
    ffi::OsStr,
    os::unix::ffi::OsStrExt,
};

/// Identity table for tests; anything not listed is unresolvable.
#[derive(Default)]
struct FixedIdentities {
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl FixedIdentities {
    fn with(users: &[(u32, &str)], groups: &[(u32, &str)]) -> Self {
        Self {
            users: users.iter().map(|(id, n)| (*id, n.to_string())).collect(),
            groups: groups.iter().map(|(id, n)| (*id, n.to_string())).collect(),
        }
    }
}

impl IdentityResolver for FixedIdentities {
    fn user_name(&self, uid: u32) -> Option<String> {
        self.users.get(&uid).cloned()
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        self.groups.get(&gid).cloned()
    }
}

fn secs(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap().timestamp()
}

fn sample(kind: EntryKind, mode: u32, name: &str) -> EntryMetadata {
    EntryMetadata {
        kind,
        permissions: Permissions::from_mode(mode),
        nlink: 1,
        uid: 1000,
        gid: 100,
        size: 5,
        atime_secs: secs(2024, 10, 18, 12, 34),
        mtime_secs: secs(2023, 1, 2, 3, 4),
        name: name.into(),
    }
}

/// Long record in UTC, as text.
fn long<R: IdentityResolver>(r: &Renderer<R>, meta: &EntryMetadata) -> String {
    r.render_long_in(meta, &Utc)
        .into_string()
        .expect("utf-8 record")
}

fn renderer() -> Renderer<FixedIdentities> {
    Renderer::with_identities(FixedIdentities::with(&[(1000, "alice")], &[(100, "users")]))
}

#[test]
fn bare_mode_is_the_name_verbatim() {
    let r = renderer();
    for name in ["a.txt", ".profile", "with space", "ünïcode"] {
        let meta = sample(EntryKind::File, 0o644, name);
        assert_eq!(r.render(&meta, false), name);
    }
}

#[test]
fn long_record_layout() {
    let meta = sample(EntryKind::File, 0o644, "a.txt");

    assert_eq!(
        long(&renderer(), &meta),
        "-rw-r--r--   1 alice   users           5 Oct 18 12:34 a.txt"
    );
}

#[test]
fn long_record_for_directory() {
    let mut meta = sample(EntryKind::Directory, 0o755, "sub");
    meta.nlink = 12;
    meta.size = 4096;
    meta.atime_secs = secs(2024, 3, 5, 7, 5);

    assert_eq!(
        long(&renderer(), &meta),
        "drwxr-xr-x  12 alice   users        4096 Mar  5 07:05 sub"
    );
}

#[test]
fn date_column_uses_access_time() {
    let meta = sample(EntryKind::File, 0o644, "a.txt");
    let line = long(&renderer(), &meta);

    assert!(line.contains("Oct 18 12:34"));
    assert!(!line.contains("Jan  2 03:04"));
}

#[test]
fn type_glyph_is_d_only_for_directories() {
    let r = renderer();
    let cases: &[(EntryKind, char)] = &[
        (EntryKind::Directory, 'd'),
        (EntryKind::File, '-'),
        (EntryKind::Other, '-'),
    ];

    for (kind, expected) in cases {
        let line = long(&r, &sample(*kind, 0o644, "x"));
        assert_eq!(line.chars().next(), Some(*expected), "kind {:?}", kind);
    }
}

#[test]
fn permission_glyphs_cover_every_bit() {
    let cases: &[(u32, &str)] = &[
        (0o000, "---------"),
        (0o777, "rwxrwxrwx"),
        (0o400, "r--------"),
        (0o020, "----w----"),
        (0o001, "--------x"),
        (0o751, "rwxr-x--x"),
        (0o4755, "rwxr-xr-x"),
    ];

    for (mode, expected) in cases {
        let line = long(&renderer(), &sample(EntryKind::File, *mode, "x"));
        let glyphs = &line[1..10];
        assert_eq!(glyphs, *expected, "mode {:o}", mode);
        assert!(glyphs.chars().all(|c| matches!(c, 'r' | 'w' | 'x' | '-')));
    }
}

#[test]
fn long_names_are_truncated_to_the_column() {
    let r = Renderer::with_identities(FixedIdentities::with(
        &[(1000, "averylongusername")],
        &[(100, "developers")],
    ));
    let line = long(&r, &sample(EntryKind::File, 0o644, "a.txt"));

    assert!(line.contains("   1 averylondevelope        5 "), "{line}");
}

#[test]
fn unresolvable_ids_fall_back_to_numbers() {
    let r = Renderer::with_identities(FixedIdentities::default());
    let line = long(&r, &sample(EntryKind::File, 0o644, "a.txt"));

    assert_eq!(
        line,
        "-rw-r--r--   1 1000    100             5 Oct 18 12:34 a.txt"
    );
}

#[test]
fn system_identities_fall_back_for_unknown_ids() {
    let mut meta = sample(EntryKind::File, 0o644, "a.txt");
    meta.uid = 3_999_999_999;
    meta.gid = 3_999_999_998;

    let line = long(&Renderer::new(), &meta);

    assert!(line.contains(" 39999999993999999998 "), "{line}");
}

#[test]
fn system_identities_resolve_root() {
    assert_eq!(SystemIdentities.user_name(0).as_deref(), Some("root"));
}

#[test]
fn negative_sizes_keep_their_sign() {
    let mut meta = sample(EntryKind::File, 0o644, "x");
    meta.size = -1;
    let line = long(&renderer(), &meta);

    assert!(line.contains("users          -1 "), "{line}");
}

#[test]
fn out_of_range_timestamp_is_padded_placeholder() {
    let mut meta = sample(EntryKind::File, 0o644, "x");
    meta.atime_secs = i64::MAX;
    let line = long(&renderer(), &meta);

    assert!(line.ends_with("           ? x"), "{line}");
}

#[test]
fn free_render_matches_bare_name() {
    let meta = sample(EntryKind::File, 0o644, "a.txt");
    assert_eq!(render(&meta, false), "a.txt");
    assert!(render(&meta, true).as_bytes().ends_with(b" a.txt"));
}

#[test]
fn non_utf8_names_keep_their_bytes() {
    let name = OsStr::from_bytes(b"caf\xe9.txt");
    let mut meta = sample(EntryKind::File, 0o644, "x");
    meta.name = name.to_os_string();
    let r = renderer();

    assert_eq!(r.render(&meta, false).as_bytes(), b"caf\xe9.txt");
    assert!(
        r.render_long_in(&meta, &Utc)
            .as_bytes()
            .ends_with(b" 12:34 caf\xe9.txt")
    );
}
