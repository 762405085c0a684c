// tests for zip export

use std::io::{Cursor, Read};

use nlsite::{FileTree, export_zip, parse_artifact, write_zip};
use zip::ZipArchive;

fn sample_tree() -> FileTree {
    let mut steps = parse_artifact(
        r#"<artifact id="t" title="Sample">
<action type="file" filePath="src/index.js">console.log('hi');</action>
<action type="file" filePath="README.md"># sample</action>
</artifact>"#,
        1,
    );
    let mut tree = FileTree::new();
    tree.apply(&mut steps);
    tree
}

#[test]
fn test_write_zip_counts_file_entries() {
    let mut buf = Cursor::new(Vec::new());
    let files = write_zip(&sample_tree(), &mut buf).unwrap();
    assert_eq!(files, 2);

    let bytes = buf.into_inner();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn test_zip_roundtrip() {
    let mut buf = Cursor::new(Vec::new());
    write_zip(&sample_tree(), &mut buf).unwrap();
    buf.set_position(0);

    let mut archive = ZipArchive::new(buf).unwrap();
    let names: Vec<String> = archive.file_names().map(String::from).collect();
    assert!(names.contains(&"src/".to_string()));
    assert!(names.contains(&"src/index.js".to_string()));
    assert!(names.contains(&"README.md".to_string()));

    let mut entry = archive.by_name("src/index.js").unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    assert_eq!(content, "console.log('hi');");
}

#[test]
fn test_empty_tree_zip() {
    let mut buf = Cursor::new(Vec::new());
    let files = write_zip(&FileTree::new(), &mut buf).unwrap();
    assert_eq!(files, 0);
    assert_eq!(&buf.into_inner()[0..2], b"PK");
}

// single test because export_zip writes into the working directory
#[test]
fn test_export_zip_names_file_after_project() {
    let dir = tempfile::tempdir().unwrap();
    let old = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let named = export_zip(&sample_tree(), "My Cool Site");
    let unnamed = export_zip(&sample_tree(), "  ");
    std::env::set_current_dir(old).unwrap();

    let name = file_name(&named.unwrap());
    assert!(name.starts_with("my_cool_site_"));
    assert!(name.ends_with(".zip"));
    assert!(dir.path().join(&name).exists());

    // a blank project name still produces a usable file name
    assert!(file_name(&unnamed.unwrap()).starts_with("project_"));
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}
