use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use treestamp::{stamp, StampError, MARKER};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create a temporary directory tree for testing.
///
/// Structure:
/// ```
/// tmp/
///   a.md            ("Hello")
///   notes.txt       ("some notes")
///   .hidden.md      ("secret")
///   .git/
///     config        ("[core]")
///   posts/
///     x.md          ("")
///     y.md          ("post body")
/// ```
fn setup_test_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("a.md"), "Hello").unwrap();
    fs::write(root.join("notes.txt"), "some notes").unwrap();
    fs::write(root.join(".hidden.md"), "secret").unwrap();

    let git = root.join(".git");
    fs::create_dir(&git).unwrap();
    fs::write(git.join("config"), "[core]").unwrap();

    let posts = root.join("posts");
    fs::create_dir(&posts).unwrap();
    fs::write(posts.join("x.md"), "").unwrap();
    fs::write(posts.join("y.md"), "post body").unwrap();

    dir
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn stamps_every_non_hidden_file() {
    let dir = setup_test_dir();
    let results = stamp(dir.path()).run().unwrap();

    assert_eq!(results.stamped, 4, "should stamp the 4 visible files");
    assert!(results.errors.is_empty());

    let root = dir.path();
    assert_eq!(
        fs::read_to_string(root.join("a.md")).unwrap(),
        format!("Hello{}", MARKER)
    );
    assert_eq!(
        fs::read_to_string(root.join("notes.txt")).unwrap(),
        format!("some notes{}", MARKER)
    );
    assert_eq!(
        fs::read_to_string(root.join("posts/y.md")).unwrap(),
        format!("post body{}", MARKER)
    );
}

#[test]
fn hidden_entries_are_never_touched() {
    let dir = setup_test_dir();
    stamp(dir.path()).run().unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join(".hidden.md")).unwrap(),
        "secret",
        "hidden file must not be stamped"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join(".git/config")).unwrap(),
        "[core]",
        "files beneath a hidden directory must not be stamped"
    );
}

#[test]
fn empty_file_becomes_exactly_the_marker() {
    let dir = setup_test_dir();
    stamp(dir.path()).run().unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("posts/x.md")).unwrap(),
        MARKER
    );
}

#[test]
fn second_run_appends_a_second_copy() {
    let dir = setup_test_dir();
    stamp(dir.path()).run().unwrap();
    stamp(dir.path()).run().unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("a.md")).unwrap(),
        format!("Hello{}{}", MARKER, MARKER),
        "stamping is not idempotent — a second run adds a second marker"
    );
}

#[test]
fn each_file_is_visited_exactly_once() {
    let dir = setup_test_dir();
    let seen = Arc::new(Mutex::new(Vec::<PathBuf>::new()));

    let sink = Arc::clone(&seen);
    let results = stamp(dir.path())
        .on_file(move |entry| {
            sink.lock().unwrap().push(entry.path.clone());
            Ok(())
        })
        .run()
        .unwrap();

    let mut visited = seen.lock().unwrap().clone();
    visited.sort();
    assert_eq!(visited.len(), 4, "4 visible files");
    visited.dedup();
    assert_eq!(visited.len(), 4, "no file visited twice");
    assert_eq!(results.stamped, 4);

    let expected: Vec<PathBuf> = ["a.md", "notes.txt", "posts/x.md", "posts/y.md"]
        .iter()
        .map(|p| dir.path().join(p))
        .collect();
    for path in &expected {
        assert!(visited.contains(path), "missing {}", path.display());
    }
}

#[test]
fn missing_root_fails_before_touching_anything() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("does-not-exist");

    let err = stamp(&root).run().unwrap_err();

    assert!(matches!(err, StampError::NotFound(_)));
    assert_eq!(err.path(), Some(&root));
    assert!(!err.is_recoverable());
}

#[test]
fn file_root_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("not-a-dir.txt");
    fs::write(&file, "x").unwrap();

    let err = stamp(&file).run().unwrap_err();

    assert!(matches!(err, StampError::NotADirectory(_)));
}

#[test]
fn handler_failure_does_not_stop_siblings() {
    let dir = setup_test_dir();

    let results = stamp(dir.path())
        .on_file(|entry| {
            if entry.name == "notes.txt" {
                Err(StampError::Handler("rejected".into()))
            } else {
                Ok(())
            }
        })
        .run()
        .unwrap();

    assert_eq!(results.errors.len(), 1, "one file failed");
    assert!(results.errors[0].is_recoverable());
    assert_eq!(results.stamped, 3, "the other 3 files were still processed");
}

#[cfg(unix)]
#[test]
fn unreadable_directory_is_a_fatal_walk_error() {
    use std::os::unix::fs::PermissionsExt;

    let dir = setup_test_dir();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("inner.md"), "body").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users bypass directory permissions; nothing to assert then.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let err = stamp(dir.path()).run().unwrap_err();
    assert!(
        !err.is_recoverable(),
        "a failed directory listing stops the walk: {err}"
    );

    // Restore so the tempdir can be cleaned up.
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(
        fs::read_to_string(locked.join("inner.md")).unwrap(),
        "body",
        "nothing beneath the unlistable directory was stamped"
    );
}

#[test]
fn custom_marker_is_appended() {
    let dir = setup_test_dir();
    stamp(dir.path()).marker("<!-- generated -->").run().unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("a.md")).unwrap(),
        "Hello<!-- generated -->"
    );
}

#[test]
fn paths_empty_when_not_collecting() {
    let dir = setup_test_dir();
    let results = stamp(dir.path()).run().unwrap();

    assert!(
        results.paths.is_empty(),
        "paths should be empty when collect_paths is false"
    );
    assert_eq!(results.stamped, 4, "stamps should still be counted");
}

#[test]
fn stats_are_populated() {
    let dir = setup_test_dir();
    let results = stamp(dir.path()).run().unwrap();

    assert!(results.stats.duration.as_nanos() > 0);
    assert_eq!(results.stats.files, 4, "only visible regular files counted");
    assert_eq!(results.stats.dirs, 2, "root and posts/, .git excluded");
}

#[test]
fn max_depth_limits_the_walk() {
    let dir = setup_test_dir();
    let results = stamp(dir.path()).max_depth(1).run().unwrap();

    assert_eq!(results.stamped, 2, "only the root's direct files");
    assert_eq!(
        fs::read_to_string(dir.path().join("posts/x.md")).unwrap(),
        "",
        "files below the depth limit are untouched"
    );
}
