use super::*;
use tempfile::TempDir;

#[test]
fn test_extracts_inner_package_list() {
    let manifest = r#"<?xml version="1.0" encoding="utf-8"?><packages><package id="A" version="1.0" /></packages>"#;
    assert_eq!(
        extract_package_list(manifest).unwrap(),
        r#"<package id="A" version="1.0" />"#
    );
}

#[test]
fn test_preserves_multiline_fragment_and_trims_edges() {
    let manifest = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<packages>\n  <package id=\"A\" version=\"1.0\" targetFramework=\"monoandroid60\" />\n  <package id=\"B\" version=\"2.1.3\" />\n</packages>\n";
    assert_eq!(
        extract_package_list(manifest).unwrap(),
        "<package id=\"A\" version=\"1.0\" targetFramework=\"monoandroid60\" />\n  <package id=\"B\" version=\"2.1.3\" />"
    );
}

#[test]
fn test_skips_leading_comments() {
    let manifest = "<!-- restored by nuget --><packages><package id=\"A\" version=\"1.0\" /></packages>";
    assert_eq!(
        extract_package_list(manifest).unwrap(),
        "<package id=\"A\" version=\"1.0\" />"
    );
}

#[test]
fn test_returns_empty_fragment_for_empty_root() {
    assert_eq!(extract_package_list("<packages />").unwrap(), "");
    assert_eq!(extract_package_list("<packages></packages>").unwrap(), "");
}

#[test]
fn test_reports_missing_root() {
    let result = extract_package_list("<?xml version=\"1.0\"?>\n");
    assert!(matches!(result, Err(PackageError::NoRootElement)));
}

#[test]
fn test_reports_unclosed_root() {
    let result = extract_package_list("<packages><package id=\"A\" />");
    assert!(matches!(result, Err(PackageError::Malformed { .. })));
}

#[test]
fn test_propagates_read_errors() {
    let temp = TempDir::new().unwrap();
    let result = read_package_list(&temp.path().join("packages.config"));
    assert!(matches!(result, Err(PackageError::ReadFailed { .. })));
}

#[test]
fn test_reads_manifest_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("packages.config");
    std::fs::write(&path, "<packages><package id=\"B\" version=\"2.0\" /></packages>").unwrap();
    assert_eq!(
        read_package_list(&path).unwrap(),
        "<package id=\"B\" version=\"2.0\" />"
    );
}
