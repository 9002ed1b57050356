use hoard_scope::{cd, ScopeError};
use hoard_test_utils::init_tracing;
use std::env;
use std::fs;

// The working directory is process-wide, so every scenario runs inside one
// test to keep them from racing.
#[test]
fn test_cd_scenarios() {
    init_tracing();
    let root = tempfile::tempdir().unwrap();
    let root_path = root.path().canonicalize().unwrap();
    let start = env::current_dir().unwrap();

    // creates missing nested directories and restores on drop
    let nested = root_path.join("a").join("b");
    {
        let guard = cd(&nested).unwrap();
        assert_eq!(guard.previous(), start.as_path());
        assert_eq!(env::current_dir().unwrap(), nested);
        fs::write("marker.txt", b"here").unwrap();
    }
    assert_eq!(env::current_dir().unwrap(), start);
    assert!(nested.join("marker.txt").exists());

    // existing directory is entered as-is
    {
        let _guard = cd(&nested).unwrap();
        assert!(std::path::Path::new("marker.txt").exists());
    }
    assert_eq!(env::current_dir().unwrap(), start);

    // restores after a panic inside the scope
    let result = std::panic::catch_unwind(|| {
        let _guard = cd(root_path.join("c")).unwrap();
        panic!("boom");
    });
    assert!(result.is_err());
    assert_eq!(env::current_dir().unwrap(), start);

    // a file in the way is an error and leaves the directory alone
    let blocker = root_path.join("file");
    fs::write(&blocker, b"x").unwrap();
    let err = cd(blocker.join("sub")).unwrap_err();
    assert!(matches!(err, ScopeError::Io { .. }));
    assert_eq!(env::current_dir().unwrap(), start);
}
