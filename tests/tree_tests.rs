// tests for the in-memory project tree

use nlsite::{FileTree, NodeKind, StepStatus, parse_artifact};

fn apply_artifact(tree: &mut FileTree, artifact: &str, next_id: usize) -> nlsite::ApplyOutcome {
    let mut steps = parse_artifact(artifact, next_id);
    tree.apply(&mut steps)
}

#[test]
fn test_apply_builds_nested_tree() {
    let mut steps = parse_artifact(
        r#"<artifact id="t" title="T">
<action type="file" filePath="src/app/main.js">let x = 1;</action>
<action type="file" filePath="src/app/util.js">let y = 2;</action>
<action type="file" filePath="README.md"># readme</action>
</artifact>"#,
        1,
    );
    let mut tree = FileTree::new();
    let outcome = tree.apply(&mut steps);

    assert_eq!(outcome.files_applied, 3);
    assert_eq!(tree.file_count(), 3);

    let main = tree.find("src/app/main.js").unwrap();
    assert_eq!(main.kind, NodeKind::File);
    assert_eq!(main.content, "let x = 1;");
    assert_eq!(main.path, "/src/app/main.js");

    let app = tree.find("/src/app").unwrap();
    assert_eq!(app.kind, NodeKind::Folder);
    assert_eq!(app.children.len(), 2);
}

#[test]
fn test_apply_marks_step_statuses() {
    let mut steps = parse_artifact(
        r#"<artifact id="t" title="T">
<action type="file" filePath="index.js">ok</action>
<action type="shell">npm install</action>
</artifact>"#,
        1,
    );
    let mut tree = FileTree::new();
    let outcome = tree.apply(&mut steps);

    // folder and file steps complete; command steps wait for the executor
    assert_eq!(steps[0].status, StepStatus::Completed);
    assert_eq!(steps[1].status, StepStatus::Completed);
    assert_eq!(steps[2].status, StepStatus::Pending);
    assert_eq!(outcome.commands, vec![(3, "npm install".to_string())]);
}

#[test]
fn test_reapply_skips_settled_steps() {
    let mut steps = parse_artifact(
        r#"<artifact id="t" title="T">
<action type="file" filePath="a.txt">one</action>
<action type="file" filePath="b.txt">two</action>
</artifact>"#,
        1,
    );
    let mut tree = FileTree::new();
    let first = tree.apply(&mut steps);
    let second = tree.apply(&mut steps);

    assert_eq!(first.files_applied, 2);
    assert_eq!(second.files_applied, 0);
    assert_eq!(tree.file_count(), 2);
}

#[test]
fn test_later_artifact_replaces_file_in_place() {
    let mut tree = FileTree::new();
    apply_artifact(
        &mut tree,
        r#"<artifact id="t" title="T">
<action type="file" filePath="src/App.jsx">v1</action>
<action type="file" filePath="src/main.jsx">entry</action>
</artifact>"#,
        1,
    );
    apply_artifact(
        &mut tree,
        r#"<artifact id="t" title="T">
<action type="file" filePath="src/App.jsx">v2</action>
</artifact>"#,
        4,
    );

    assert_eq!(tree.file_count(), 2);
    assert_eq!(tree.find("src/App.jsx").unwrap().content, "v2");

    // replacement keeps the node's position among its siblings
    let src = tree.find("src").unwrap();
    assert_eq!(src.children[0].name, "App.jsx");
    assert_eq!(src.children[1].name, "main.jsx");
}

#[test]
fn test_path_forms_are_equivalent() {
    let mut tree = FileTree::new();
    apply_artifact(
        &mut tree,
        r#"<artifact id="t" title="T">
<action type="file" filePath="./src/a.js">a</action>
<action type="file" filePath="/src/b.js">b</action>
<action type="file" filePath="src/c.js">c</action>
</artifact>"#,
        1,
    );

    let src = tree.find("src").unwrap();
    assert_eq!(src.children.len(), 3);
    assert_eq!(tree.find("/src/a.js").unwrap().content, "a");
    assert_eq!(tree.find("src/b.js").unwrap().content, "b");
}

#[test]
fn test_rejects_path_escaping_the_project() {
    let mut steps = parse_artifact(
        r#"<artifact id="t" title="T">
<action type="file" filePath="../evil.sh">rm -rf ~</action>
</artifact>"#,
        1,
    );
    let mut tree = FileTree::new();
    let outcome = tree.apply(&mut steps);

    assert_eq!(outcome.files_applied, 0);
    assert_eq!(steps[1].status, StepStatus::Failed);
    assert!(tree.is_empty());
}

#[test]
fn test_file_step_without_path_fails() {
    let mut steps = parse_artifact(
        r#"<artifact id="t" title="T"><action type="file">orphan</action></artifact>"#,
        1,
    );
    let mut tree = FileTree::new();
    tree.apply(&mut steps);
    assert_eq!(steps[1].status, StepStatus::Failed);
}

#[test]
fn test_file_cannot_shadow_folder() {
    let mut tree = FileTree::new();
    apply_artifact(
        &mut tree,
        r#"<artifact id="t" title="T">
<action type="file" filePath="src/a.js">a</action>
</artifact>"#,
        1,
    );

    let mut steps = parse_artifact(
        r#"<artifact id="t" title="T">
<action type="file" filePath="src">not a file</action>
</artifact>"#,
        3,
    );
    let outcome = tree.apply(&mut steps);

    assert_eq!(outcome.files_applied, 0);
    assert_eq!(steps[1].status, StepStatus::Failed);
    assert_eq!(tree.find("src").unwrap().kind, NodeKind::Folder);
}

#[test]
fn test_folder_cannot_shadow_file() {
    let mut tree = FileTree::new();
    apply_artifact(
        &mut tree,
        r#"<artifact id="t" title="T">
<action type="file" filePath="config">flat file</action>
</artifact>"#,
        1,
    );

    let mut steps = parse_artifact(
        r#"<artifact id="t" title="T">
<action type="file" filePath="config/app.json">{}</action>
</artifact>"#,
        3,
    );
    tree.apply(&mut steps);

    assert_eq!(steps[1].status, StepStatus::Failed);
    assert_eq!(tree.find("config").unwrap().kind, NodeKind::File);
}

#[test]
fn test_walk_visits_parents_first() {
    let mut tree = FileTree::new();
    apply_artifact(
        &mut tree,
        r#"<artifact id="t" title="T">
<action type="file" filePath="src/deep/file.js">x</action>
</artifact>"#,
        1,
    );

    let paths: Vec<String> = tree.nodes().iter().map(|n| n.path.clone()).collect();
    assert_eq!(paths, vec!["/src", "/src/deep", "/src/deep/file.js"]);
}

#[test]
fn test_find_misses_return_none() {
    let tree = FileTree::new();
    assert!(tree.find("nope.txt").is_none());
    assert!(tree.is_empty());
    assert_eq!(tree.file_count(), 0);
}
