// tests for sandbox file sync

use nlsite::{FileTree, Sandbox, parse_artifact};

fn sample_tree() -> FileTree {
    let mut steps = parse_artifact(
        r#"<artifact id="t" title="Sample">
<action type="file" filePath="src/index.js">console.log('hi');</action>
<action type="file" filePath="package.json">{ "name": "sample" }</action>
</artifact>"#,
        1,
    );
    let mut tree = FileTree::new();
    tree.apply(&mut steps);
    tree
}

#[test]
fn test_sync_writes_tree_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let sandbox = Sandbox::at(dir.path()).unwrap();

    let written = sandbox.sync(&sample_tree()).unwrap();
    assert_eq!(written, 2);

    let content = std::fs::read_to_string(dir.path().join("src/index.js")).unwrap();
    assert_eq!(content, "console.log('hi');");
    assert!(dir.path().join("package.json").exists());
}

#[test]
fn test_sync_overwrites_changed_files() {
    let dir = tempfile::tempdir().unwrap();
    let sandbox = Sandbox::at(dir.path()).unwrap();

    let mut tree = sample_tree();
    sandbox.sync(&tree).unwrap();

    let mut steps = parse_artifact(
        r#"<artifact id="t" title="Sample">
<action type="file" filePath="src/index.js">updated</action>
</artifact>"#,
        4,
    );
    tree.apply(&mut steps);
    let written = sandbox.sync(&tree).unwrap();

    // the whole tree is rewritten, not just the changed file
    assert_eq!(written, 2);
    let content = std::fs::read_to_string(dir.path().join("src/index.js")).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_sync_leaves_foreign_files_alone() {
    let dir = tempfile::tempdir().unwrap();
    let sandbox = Sandbox::at(dir.path()).unwrap();

    sandbox.sync(&sample_tree()).unwrap();
    std::fs::create_dir_all(dir.path().join("node_modules/express")).unwrap();
    std::fs::write(dir.path().join("package-lock.json"), "{}").unwrap();
    sandbox.sync(&sample_tree()).unwrap();

    assert!(dir.path().join("node_modules/express").exists());
    assert!(dir.path().join("package-lock.json").exists());
}

#[test]
fn test_ephemeral_sandbox_root_exists() {
    let sandbox = Sandbox::ephemeral().unwrap();
    assert!(sandbox.is_ephemeral());
    assert!(sandbox.root().exists());
    assert!(
        sandbox
            .root()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("nlsite-")
    );
}

#[test]
fn test_ephemeral_root_removed_on_drop() {
    let root = {
        let sandbox = Sandbox::ephemeral().unwrap();
        sandbox.root().to_path_buf()
    };
    assert!(!root.exists());
}

#[test]
fn test_pinned_sandbox_creates_missing_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("projects/site");

    let sandbox = Sandbox::at(&nested).unwrap();
    assert!(!sandbox.is_ephemeral());
    assert!(nested.is_dir());

    // pinned roots survive the sandbox
    drop(sandbox);
    assert!(nested.is_dir());
}
