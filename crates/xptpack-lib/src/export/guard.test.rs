use super::*;
use tempfile::TempDir;

#[test]
fn test_guard_creates_and_removes_lock() {
    let temp = TempDir::new().unwrap();
    let lock = temp.path().join(LOCK_FILE);

    {
        let guard = RunGuard::acquire(temp.path()).unwrap();
        assert_eq!(guard.lock_path(), lock);
        let pid = std::fs::read_to_string(&lock).unwrap();
        assert_eq!(pid.trim(), std::process::id().to_string());
    }

    assert!(!lock.exists());
}

#[test]
fn test_second_guard_is_rejected_while_held() {
    let temp = TempDir::new().unwrap();
    let _held = RunGuard::acquire(temp.path()).unwrap();

    let second = RunGuard::acquire(temp.path());
    assert!(matches!(second, Err(GuardError::RunInProgress { .. })));
}

#[test]
fn test_guard_can_be_reacquired_after_release() {
    let temp = TempDir::new().unwrap();
    drop(RunGuard::acquire(temp.path()).unwrap());
    assert!(RunGuard::acquire(temp.path()).is_ok());
}

#[test]
fn test_guard_reports_missing_root() {
    let temp = TempDir::new().unwrap();
    let result = RunGuard::acquire(&temp.path().join("missing"));
    assert!(matches!(result, Err(GuardError::LockFailed { .. })));
}
