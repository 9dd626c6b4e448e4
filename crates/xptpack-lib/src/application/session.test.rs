use super::*;
use crate::testing::TempDirFixture;

#[test]
fn test_process_output_constructors() {
    let ok = ProcessOutput::success("packed");
    assert!(ok.success);
    assert_eq!(ok.exit_code, Some(0));

    let failed = ProcessOutput::failure(3, "addin not found");
    assert!(!failed.success);
    assert_eq!(failed.exit_code, Some(3));
    assert_eq!(failed.stderr, "addin not found");

    let timed_out = ProcessOutput::timed_out();
    assert!(timed_out.timed_out);
    assert_eq!(timed_out.exit_code, None);
}

#[test]
fn test_live_filesystem_list_dir_is_sorted() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("b.cs", "").unwrap();
    fixture.write_file("a.cs", "").unwrap();
    fixture.create_dir("sub").unwrap();

    let entries = LiveFileSystemProvider.list_dir(fixture.path()).unwrap();
    assert_eq!(
        entries,
        vec![
            fixture.path().join("a.cs"),
            fixture.path().join("b.cs"),
            fixture.path().join("sub"),
        ]
    );
}

#[test]
fn test_find_program_with_separator_checks_file() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("tool", "").unwrap();
    let provider = LiveProcessProvider::new();

    let tool = fixture.path().join("tool");
    assert_eq!(
        provider.find_program(tool.to_str().unwrap()),
        Some(tool.clone())
    );
    assert_eq!(
        provider.find_program(fixture.path().join("absent").to_str().unwrap()),
        None
    );
}

#[test]
fn test_find_program_uses_custom_path() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("bin/mdtool", "").unwrap();
    let bin = fixture.path().join("bin");
    let provider = LiveProcessProvider::with_custom_path(bin.to_string_lossy().into_owned());

    assert_eq!(provider.find_program("mdtool"), Some(bin.join("mdtool")));
    assert_eq!(provider.find_program("definitely-not-installed-xyz"), None);
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_execute_captures_output_and_status() {
        let fixture = TempDirFixture::new().unwrap();
        let provider = LiveProcessProvider::new();

        let output = provider
            .execute("sh", &["-c", "echo out; echo err >&2; exit 4"], fixture.path())
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.exit_code, Some(4));
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
        assert!(!output.timed_out);
    }

    #[test]
    fn test_execute_runs_in_working_dir() {
        let fixture = TempDirFixture::new().unwrap();
        let provider = LiveProcessProvider::new();

        let output = provider
            .execute("sh", &["-c", "echo hi > marker"], fixture.path())
            .unwrap();

        assert!(output.success);
        assert!(fixture.file_exists("marker"));
    }

    #[test]
    fn test_execute_with_timeout_kills_process() {
        let fixture = TempDirFixture::new().unwrap();
        let provider = LiveProcessProvider::new();
        let started = Instant::now();

        let output = provider
            .execute_with_timeout(
                "sh",
                &["-c", "exec sleep 30"],
                fixture.path(),
                Some(Duration::from_millis(200)),
            )
            .unwrap();

        assert!(output.timed_out);
        assert!(!output.success);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_timeout_kills_whole_process_group() {
        let fixture = TempDirFixture::new().unwrap();
        let provider = LiveProcessProvider::new();
        let started = Instant::now();

        // The shell forks `sleep`, which keeps the output pipes open
        let output = provider
            .execute_with_timeout(
                "sh",
                &["-c", "echo started; sleep 30; echo finished"],
                fixture.path(),
                Some(Duration::from_millis(200)),
            )
            .unwrap();

        assert!(output.timed_out);
        assert!(!output.stdout.contains("finished"));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_execute_missing_program_is_error() {
        let fixture = TempDirFixture::new().unwrap();
        let provider = LiveProcessProvider::new();

        assert!(
            provider
                .execute("definitely-not-installed-xyz", &[], fixture.path())
                .is_err()
        );
    }
}
