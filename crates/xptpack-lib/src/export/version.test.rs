use super::*;

#[test]
fn test_reads_the_version_attribute() {
    assert_eq!(
        resolve_version(r#"<Addin id="Demo" version="1.4.2">"#).unwrap(),
        "1.4.2"
    );
}

#[test]
fn test_matches_the_marker_case_insensitively() {
    assert_eq!(
        resolve_version(r#"<Addin id="Demo" VERSION="2.0.0-beta">"#).unwrap(),
        "2.0.0-beta"
    );
}

#[test]
fn test_skips_the_xml_declaration() {
    let descriptor = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Addin id=\"Demo\" version=\"3.1\" />";
    assert_eq!(resolve_version(descriptor).unwrap(), "3.1");
}

#[test]
fn test_skips_a_bom_before_the_declaration() {
    let descriptor = "\u{feff}<?xml version=\"1.0\"?><Addin version=\"0.9\" />";
    assert_eq!(resolve_version(descriptor).unwrap(), "0.9");
}

#[test]
fn test_takes_the_first_occurrence() {
    let descriptor = r#"<Addin version="1.0.0"><Dependencies><Addin id="Core" version="6.0" /></Dependencies></Addin>"#;
    assert_eq!(resolve_version(descriptor).unwrap(), "1.0.0");
}

#[test]
fn test_reports_a_missing_marker() {
    assert_eq!(
        resolve_version("<Addin id=\"Demo\" />"),
        Err(VersionError::NotFound)
    );
    // Only the declaration carries a version
    assert_eq!(
        resolve_version("<?xml version=\"1.0\"?><Addin id=\"Demo\" />"),
        Err(VersionError::NotFound)
    );
}

#[test]
fn test_reports_an_unterminated_value() {
    assert_eq!(
        resolve_version("<Addin version=\"1.0"),
        Err(VersionError::Unterminated { offset: 7 })
    );
}

#[test]
fn test_rejects_an_empty_value() {
    assert_eq!(
        resolve_version("<Addin version=\"\" />"),
        Err(VersionError::Empty)
    );
}
