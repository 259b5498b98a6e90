//! Tests for loading and saving package files in both layouts

mod common;

use assert_matches::assert_matches;
use common::*;
use emod_config::atom::OPERATOR_CHARS;
use emod_config::prelude::*;
use std::fs;

mod load_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_file_keeps_disk_order() {
        let temp_dir = temp_dir();
        let lines = scrambled();
        let path = write_file(temp_dir.path(), "package.use", &lines);

        let rules = Layout::File(path).load().unwrap();
        assert_eq!(rules.lines(), lines);
    }

    #[test]
    fn test_load_directory_is_sorted() {
        let temp_dir = temp_dir();
        let path = write_dir(temp_dir.path(), "package.use", &scrambled());

        let rules = Layout::Directory(path).load().unwrap();
        assert_eq!(rules.lines(), EXPRESSIONS.to_vec());
    }

    #[test]
    fn test_file_and_directory_agree() {
        let temp_dir = temp_dir();
        let file = write_file(temp_dir.path(), "package.expressions.file", &scrambled());
        let dir = write_dir(temp_dir.path(), "package.expressions.dir", &scrambled());

        let mut from_file = Layout::detect(&file).unwrap().load().unwrap();
        from_file.sort();
        let from_dir = Layout::detect(&dir).unwrap().load().unwrap();

        assert_eq!(from_file, from_dir);
    }

    #[test]
    fn test_load_missing() {
        let temp_dir = temp_dir();
        let path = temp_dir.path().join("package.use");

        assert_matches!(Layout::File(path.clone()).load(), Err(ConfigError::NotFound(p)) if p == path);
        assert_matches!(Layout::Directory(path).load(), Err(ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_directory_with_subdirectory() {
        let temp_dir = temp_dir();
        let path = write_dir(temp_dir.path(), "package.use", &["sys-apps/sed nls"]);
        fs::create_dir(path.join("nested")).unwrap();

        assert_matches!(
            Layout::Directory(path.clone()).load(),
            Err(ConfigError::InvalidLayout(p)) if p == path.join("nested")
        );
    }

    #[test]
    fn test_load_wrong_layout() {
        let temp_dir = temp_dir();
        let file = write_file(temp_dir.path(), "package.use", &["sys-apps/sed"]);
        let dir = write_dir(temp_dir.path(), "package.mask", &["sys-apps/sed"]);

        assert_matches!(Layout::Directory(file).load(), Err(ConfigError::InvalidLayout(_)));
        assert_matches!(Layout::File(dir).load(), Err(ConfigError::InvalidLayout(_)));
    }
}

mod save_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_file_sorted() {
        let temp_dir = temp_dir();
        let path = temp_dir.path().join("package.expressions.file.tmp");
        fs::write(&path, "").unwrap();

        let rules = RuleSet::parse(&scrambled().join("\n"));
        Layout::File(path.clone()).save(&rules).unwrap();

        let expected: String = EXPRESSIONS.iter().map(|l| format!("{}\n", l)).collect();
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn test_save_then_load_drops_comments() {
        let temp_dir = temp_dir();
        let path = write_file(
            temp_dir.path(),
            "package.use",
            &["sys-apps/sed nls", "# old rule", "dev-libs/glib:2/2.30 -doc", ""],
        );
        let layout = Layout::detect(&path).unwrap();

        let rules = layout.load().unwrap();
        layout.save(&rules).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "dev-libs/glib:2/2.30 -doc\nsys-apps/sed nls\n"
        );
        assert_eq!(
            layout.load().unwrap().lines(),
            vec!["dev-libs/glib:2/2.30 -doc", "sys-apps/sed nls"]
        );
    }

    #[test]
    fn test_save_directory_by_category() {
        let temp_dir = temp_dir();
        let path = temp_dir.path().join("package.use");
        fs::create_dir(&path).unwrap();

        let rules = RuleSet::parse(&scrambled().join("\n"));
        let layout = Layout::Directory(path.clone());
        layout.save(&rules).unwrap();

        assert_eq!(
            entries(&path),
            vec![
                "*", "app-text", "dev-lang", "dev-libs", "kde-base", "media-libs", "net-*",
                "net-fs", "net-im", "net-libs", "net-misc", "sys-apps", "sys-libs", "x11-libs",
            ]
        );
        assert_eq!(
            fs::read_to_string(path.join("media-libs")).unwrap(),
            "<=media-libs/libgd-1.6\n<media-libs/libgd-1.6\n=media-libs/libgd-1.6\n\
             >=media-libs/libgd-1.6\n>media-libs/libgd-1.6\n"
        );
        assert_eq!(layout.load().unwrap().lines(), EXPRESSIONS.to_vec());
    }

    #[test]
    fn test_category_files_never_start_with_operators() {
        let temp_dir = temp_dir();
        let path = temp_dir.path().join("package.mask");
        let rules = RuleSet::parse(&EXPRESSIONS.join("\n"));

        Layout::Directory(path.clone()).save(&rules).unwrap();

        for name in entries(&path) {
            assert!(!name.starts_with(OPERATOR_CHARS), "{} starts with an operator", name);
        }
    }

    #[test]
    fn test_save_directory_keeps_stale_categories() {
        let temp_dir = temp_dir();
        let path = write_dir(temp_dir.path(), "package.use", &["app-text/dos2unix", "sys-apps/sed"]);
        let layout = Layout::Directory(path.clone());

        let mut rules = layout.load().unwrap();
        assert!(rules.remove_line("app-text/dos2unix"));
        layout.save(&rules).unwrap();

        // the emptied category file is left as it was
        assert_eq!(entries(&path), vec!["app-text", "sys-apps"]);
        assert_eq!(fs::read_to_string(path.join("sys-apps")).unwrap(), "sys-apps/sed\n");
    }

    #[test]
    fn test_save_directory_rejects_atom_without_category() {
        let temp_dir = temp_dir();
        let path = temp_dir.path().join("package.use");
        let rules = RuleSet::parse("@world\n");

        assert_matches!(
            Layout::Directory(path).save(&rules),
            Err(ConfigError::InvalidAtom(_))
        );
    }

    #[test]
    fn test_save_directory_rejects_relative_category() {
        let temp_dir = temp_dir();
        let path = temp_dir.path().join("package.use");
        fs::create_dir(&path).unwrap();
        let rules = RuleSet::parse("../x foo\nsys-apps/sed nls\n");

        assert_matches!(
            Layout::Directory(path.clone()).save(&rules),
            Err(ConfigError::InvalidAtom(_))
        );
        assert!(!temp_dir.path().join("x").exists());
        assert!(entries(&path).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_unwritable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = temp_dir();
        let path = write_file(temp_dir.path(), "package.use", &["sys-apps/sed"]);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).unwrap();

        // root ignores file modes
        if fs::OpenOptions::new().write(true).open(&path).is_ok() {
            return;
        }

        let rules = RuleSet::parse("sys-apps/sed nls\n");
        let err = Layout::File(path.clone()).save(&rules).unwrap_err();
        assert_matches!(&err, ConfigError::Write { path: p, .. } if *p == path);
        assert!(err.to_string().contains("are you root?"));
    }
}
