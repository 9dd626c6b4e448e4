//! Project fixtures for E2E tests
//!
//! The reference project mirrors a small mobile app: one source file, one
//! image, a package manifest and a build output that must never be exported.

use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Project name used by the reference fixture
pub const REFERENCE_NAME: &str = "Demo";

/// Artifact the packaging tool produces for the reference project
pub const REFERENCE_ARTIFACT: &str = "MonoDevelop.Demo.Template_1.0.0.mpack";

/// PNG signature, enough to prove raw files are copied byte-for-byte
pub const PNG_BYTES: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

pub const MAIN_CS: &str = "using Android.App;\n\nnamespace Demo\n{\n\t[Activity(Label = \"Demo\")]\n\tpublic class MainActivity : Activity {}\n}\n";

pub const PACKAGES_CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<packages>
  <package id="Xamarin.Android.Support.v4" version="23.3.0" targetFramework="monoandroid60" />
</packages>
"#;

/// Write the reference project into `root`
pub fn write_reference_project(root: &Path) -> Result<()> {
    fs::create_dir_all(root.join("Resources/drawable"))?;
    fs::create_dir_all(root.join("bin/Debug"))?;
    fs::create_dir_all(root.join("obj/Debug"))?;

    fs::write(root.join("MainActivity.cs"), MAIN_CS)?;
    fs::write(root.join("Resources/drawable/icon.png"), PNG_BYTES)?;
    fs::write(root.join("packages.config"), PACKAGES_CONFIG)?;
    fs::write(root.join("bin/Debug/Demo.dll"), b"MZ")?;
    fs::write(root.join("obj/Debug/Demo.cache"), b"cache")?;
    Ok(())
}

/// Every file under `dir`, keyed by slash-separated relative path
pub fn snapshot_tree(dir: &Path) -> Result<BTreeMap<String, Vec<u8>>> {
    let mut snapshot = BTreeMap::new();
    collect(dir, dir, &mut snapshot)?;
    Ok(snapshot)
}

fn collect(base: &Path, dir: &Path, snapshot: &mut BTreeMap<String, Vec<u8>>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect(base, &path, snapshot)?;
        } else {
            let relative = path
                .strip_prefix(base)?
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            snapshot.insert(relative, fs::read(&path)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reference_project_snapshot() {
        let dir = TempDir::new().unwrap();
        write_reference_project(dir.path()).unwrap();

        let snapshot = snapshot_tree(dir.path()).unwrap();
        let paths: Vec<&str> = snapshot.keys().map(String::as_str).collect();
        assert_eq!(
            paths,
            vec![
                "MainActivity.cs",
                "Resources/drawable/icon.png",
                "bin/Debug/Demo.dll",
                "obj/Debug/Demo.cache",
                "packages.config",
            ]
        );
        assert_eq!(snapshot["Resources/drawable/icon.png"], PNG_BYTES);
    }
}
