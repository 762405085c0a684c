// tests for artifact plan extraction

use nlsite::{StepKind, StepStatus, parse_artifact};

fn sample_artifact() -> &'static str {
    r#"<artifact id="demo-site" title="Demo Site">
<action type="file" filePath="package.json">{ "name": "demo" }</action>
<action type="file" filePath="src/index.js">console.log('hi');</action>
<action type="shell">npm install</action>
</artifact>"#
}

#[test]
fn test_parse_bare_artifact() {
    let steps = parse_artifact(sample_artifact(), 1);
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0].kind, StepKind::CreateFolder);
    assert_eq!(steps[0].title, "Demo Site");
    assert_eq!(steps[1].kind, StepKind::CreateFile);
    assert_eq!(steps[1].path.as_deref(), Some("package.json"));
    assert_eq!(steps[1].title, "Create package.json");
    assert_eq!(steps[3].kind, StepKind::RunCommand);
    assert_eq!(steps[3].title, "Run command");
    assert_eq!(steps[3].content, "npm install");
}

#[test]
fn test_parse_html_fenced_reply() {
    let text = format!(
        "Here is your project plan:\n```html\n{}\n```\nLet me know what to change.",
        sample_artifact()
    );
    let steps = parse_artifact(&text, 1);
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0].title, "Demo Site");
}

#[test]
fn test_parse_xml_fenced_reply() {
    let text = format!("```xml\n{}\n```", sample_artifact());
    let steps = parse_artifact(&text, 1);
    assert_eq!(steps.len(), 4);
}

#[test]
fn test_parse_plain_fenced_reply() {
    let text = format!("```\n{}\n```", sample_artifact());
    let steps = parse_artifact(&text, 1);
    assert_eq!(steps.len(), 4);
}

#[test]
fn test_ids_continue_from_next_id() {
    let steps = parse_artifact(sample_artifact(), 7);
    let ids: Vec<usize> = steps.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![7, 8, 9, 10]);
}

#[test]
fn test_no_actions_yields_no_steps() {
    let steps = parse_artifact("Sorry, I cannot build that.", 1);
    assert!(steps.is_empty());

    // a title without any actions is still not a plan
    let steps = parse_artifact(r#"<artifact id="x" title="Empty"></artifact>"#, 1);
    assert!(steps.is_empty());
}

#[test]
fn test_missing_title_defaults() {
    let text = r#"<artifact id="x"><action type="file" filePath="a.txt">hello</action></artifact>"#;
    let steps = parse_artifact(text, 1);
    assert_eq!(steps[0].title, "Project Files");
}

#[test]
fn test_file_action_without_path() {
    let text = r#"<artifact id="x" title="T"><action type="file">orphan</action></artifact>"#;
    let steps = parse_artifact(text, 1);
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[1].kind, StepKind::CreateFile);
    assert!(steps[1].path.is_none());
    assert_eq!(steps[1].title, "Create file");
}

#[test]
fn test_action_content_is_trimmed() {
    let text = "<artifact id=\"x\" title=\"T\">\n<action type=\"shell\">\n  npm run build\n</action>\n</artifact>";
    let steps = parse_artifact(text, 1);
    assert_eq!(steps[1].content, "npm run build");
}

#[test]
fn test_multiline_file_content_survives() {
    let text = r#"<artifact id="x" title="T">
<action type="file" filePath="src/app.js">function main() {
  return 42;
}</action>
</artifact>"#;
    let steps = parse_artifact(text, 1);
    assert_eq!(steps[1].content, "function main() {\n  return 42;\n}");
}

#[test]
fn test_all_steps_start_pending() {
    let steps = parse_artifact(sample_artifact(), 1);
    assert!(steps.iter().all(|s| s.status == StepStatus::Pending));
}

#[test]
fn test_lead_step_has_no_path() {
    let steps = parse_artifact(sample_artifact(), 1);
    assert!(steps[0].path.is_none());
    assert!(steps[0].content.is_empty());
}
