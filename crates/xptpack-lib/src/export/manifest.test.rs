use super::*;

fn rewritten(path: &str) -> ExportedFile {
    ExportedFile::new(path, FileKind::Rewritten)
}

fn raw(path: &str) -> ExportedFile {
    ExportedFile::new(path, FileKind::Raw)
}

#[test]
fn test_exported_file_directories() {
    assert_eq!(
        raw("Resources/drawable/icon.png").directories(),
        vec!["Resources", "drawable"]
    );
    assert!(rewritten("Main.cs").directories().is_empty());
    assert_eq!(rewritten("Resources/drawable/icon.png").name(), "icon.png");
}

#[test]
fn test_runtime_imports_only_rewritten_files() {
    let files = vec![rewritten("Main.cs"), raw("icon.png"), rewritten("Views/Home.cs")];
    assert_eq!(runtime_imports(&files), vec!["Main.cs", "Views/Home.cs"]);
}

#[test]
fn test_render_runtime_starts_with_template_descriptor() {
    let files = vec![rewritten("Main.cs"), raw("icon.png")];
    let runtime = render_runtime("ProjectTemplate.xpt.xml", &files).unwrap();

    assert_eq!(
        runtime,
        "<Runtime>\n\
         \t<Import file=\"ProjectTemplate.xpt.xml\"/>\n\
         \t<Import file=\"Main.cs\"/>\n\
         </Runtime>"
    );
}

#[test]
fn test_render_file_tree_flat() {
    let files = vec![rewritten("Main.cs"), raw("icon.png")];
    let tree = render_file_tree(&files, DirectoryLayout::PerFile).unwrap();

    assert_eq!(
        tree,
        "<Files>\n\
         \t<File name=\"Main.cs\" src=\"Main.cs\"/>\n\
         \t<RawFile name=\"icon.png\" src=\"icon.png\"/>\n\
         </Files>"
    );
}

#[test]
fn test_render_file_tree_per_file_repeats_directories() {
    let files = vec![
        rewritten("Resources/values/Strings.xml"),
        raw("Resources/drawable/icon.png"),
    ];
    let tree = render_file_tree(&files, DirectoryLayout::PerFile).unwrap();

    assert_eq!(tree.matches("<Directory name=\"Resources\">").count(), 2);
    assert_eq!(
        tree,
        "<Files>\n\
         \t<Directory name=\"Resources\">\n\
         \t\t<Directory name=\"values\">\n\
         \t\t\t<File name=\"Strings.xml\" src=\"Resources/values/Strings.xml\"/>\n\
         \t\t</Directory>\n\
         \t</Directory>\n\
         \t<Directory name=\"Resources\">\n\
         \t\t<Directory name=\"drawable\">\n\
         \t\t\t<RawFile name=\"icon.png\" src=\"Resources/drawable/icon.png\"/>\n\
         \t\t</Directory>\n\
         \t</Directory>\n\
         </Files>"
    );
}

#[test]
fn test_render_file_tree_merged_groups_directories() {
    let files = vec![
        rewritten("Resources/values/Strings.xml"),
        rewritten("Main.cs"),
        raw("Resources/drawable/icon.png"),
        rewritten("Resources/values/Colors.xml"),
    ];
    let tree = render_file_tree(&files, DirectoryLayout::Merged).unwrap();

    assert_eq!(
        tree,
        "<Files>\n\
         \t<Directory name=\"Resources\">\n\
         \t\t<Directory name=\"values\">\n\
         \t\t\t<File name=\"Strings.xml\" src=\"Resources/values/Strings.xml\"/>\n\
         \t\t\t<File name=\"Colors.xml\" src=\"Resources/values/Colors.xml\"/>\n\
         \t\t</Directory>\n\
         \t\t<Directory name=\"drawable\">\n\
         \t\t\t<RawFile name=\"icon.png\" src=\"Resources/drawable/icon.png\"/>\n\
         \t\t</Directory>\n\
         \t</Directory>\n\
         \t<File name=\"Main.cs\" src=\"Main.cs\"/>\n\
         </Files>"
    );
}

#[test]
fn test_render_escapes_attribute_values() {
    let files = vec![rewritten("R&D/<odd>.cs")];
    let tree = render_file_tree(&files, DirectoryLayout::PerFile).unwrap();

    assert!(tree.contains("<Directory name=\"R&amp;D\">"));
    assert!(tree.contains("src=\"R&amp;D/&lt;odd&gt;.cs\""));
}

#[test]
fn test_render_empty_file_list() {
    let tree = render_file_tree(&[], DirectoryLayout::PerFile).unwrap();
    assert!(tree.starts_with("<Files>"));
    assert!(tree.ends_with("</Files>"));
    assert!(!tree.contains("<File "));
}
