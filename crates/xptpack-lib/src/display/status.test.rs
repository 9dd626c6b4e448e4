use super::*;
use crate::display::test_utils::create_test_styling;

#[test]
fn test_status_message_formatting() {
    let styling = create_test_styling();
    let status = StatusDisplay::new(&styling);

    // Verify no panics across every status kind
    status.checking("packaging tool");
    status.success("mdtool", "/usr/bin/mdtool");
    status.error("mdtool", "not found");
    status.warning("package manifest ignored");
    status.info("using default settings");
    status.message("Plain message");
    status.subtle("Secondary info");
    status.complete("Export finished");
}

#[test]
fn test_status_empty_details() {
    let styling = create_test_styling();
    let status = StatusDisplay::new(&styling);

    status.success("Success without details", "");
    status.error("Error without details", "");
}

#[test]
fn test_status_list_rendering() {
    let styling = create_test_styling();
    let status = StatusDisplay::new(&styling);

    status.list(&["bin/Debug/out.dll", "obj/x.cache"]);
    status.list(&[]);
}

#[test]
fn test_status_tool_check_pattern() {
    let styling = create_test_styling();
    let status = StatusDisplay::new(&styling);

    status.tool_check("mdtool", true, "/usr/bin/mdtool");
    status.tool_check("missing-tool", false, "");
    status.section("Requirements");
}

#[test]
fn test_join_details() {
    assert_eq!(join("mdtool", ""), "mdtool");
    assert_eq!(join("mdtool", "status 1"), "mdtool: status 1");
}
