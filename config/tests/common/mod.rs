//! Shared fixtures for package file tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Atom expressions seen in real package files, sorted
pub const EXPRESSIONS: &[&str] = &[
    "!!<sys-apps/portage-2.1.4_rc1",
    "!=net-fs/samba-2*",
    "!app-text/dos2unix",
    "*/*",
    "*/*::gentoo",
    "*/zlib",
    "<=media-libs/libgd-1.6",
    "<media-libs/libgd-1.6",
    "=*/*-*9999*",
    "=*/*-*_beta*",
    "=dev-libs/glib-2*",
    "=media-libs/libgd-1.6",
    "=x11-libs/qt-3.3*:3",
    ">=media-libs/libgd-1.6",
    ">=x11-libs/qt-3.3.8:3",
    ">media-libs/libgd-1.6",
    "dev-lang/perl:*",
    "dev-lang/perl:0/5.12",
    "dev-lang/perl:0/5.12=",
    "dev-lang/perl:0=",
    "dev-lang/perl:=",
    "dev-libs/glib:*",
    "dev-libs/glib:2/2.30",
    "dev-libs/glib:2/2.30=",
    "dev-libs/glib:2=",
    "dev-libs/glib:=",
    "dev-libs/icu:*",
    "dev-libs/icu:0/0",
    "dev-libs/icu:0/0=",
    "dev-libs/icu:0/49",
    "dev-libs/icu:0/49=",
    "dev-libs/icu:0=",
    "dev-libs/icu:=",
    "kde-base/kdelibs::kde-testing",
    "net-*/*",
    "net-im/empathy::gnome",
    "net-misc/dhcp",
    "net-misc/dhcp-3.0_p2",
    "sys-apps/*",
    "sys-apps/sed",
    "sys-apps/sed-4.0.5",
    "sys-apps/sed::gentoo",
    "sys-libs/zlib",
    "sys-libs/zlib-1.1.4-r1",
    "x11-libs/qt:3",
    "~net-libs/libnet-1.0.2a",
    "~x11-libs/qt-3.3.8:3",
];

/// The expressions in a scrambled order, as a hand-edited file would have them
pub fn scrambled() -> Vec<&'static str> {
    let mut lines: Vec<&str> = EXPRESSIONS.iter().rev().copied().collect();
    lines.rotate_left(17);
    lines
}

/// Write `lines` as a single package file, with a comment and blank lines
pub fn write_file(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::from("# managed by hand\n\n");
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    content.push_str("\n   \n");
    fs::write(&path, content).unwrap();
    path
}

/// Write `lines` as a directory package file, one file per category
pub fn write_dir(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::create_dir(&path).unwrap();

    let mut categories: BTreeMap<&str, String> = BTreeMap::new();
    for line in lines {
        let category = line
            .trim_start_matches(['!', '~', '<', '>', '='])
            .split('/')
            .next()
            .unwrap();
        let text = categories.entry(category).or_default();
        text.push_str(line);
        text.push('\n');
    }

    for (category, text) in categories {
        fs::write(path.join(category), format!("# {}\n{}", category, text)).unwrap();
    }
    path
}

pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Names of the entries of a directory, sorted
pub fn entries(path: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(path)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
