// tests for starter templates

use nlsite::{StepKind, TemplateKind, parse_artifact};

#[test]
fn test_from_answer_exact() {
    assert_eq!(TemplateKind::from_answer("react"), Some(TemplateKind::React));
    assert_eq!(TemplateKind::from_answer("node"), Some(TemplateKind::Node));
}

#[test]
fn test_from_answer_tolerates_noise() {
    assert_eq!(
        TemplateKind::from_answer("'React.'"),
        Some(TemplateKind::React)
    );
    assert_eq!(
        TemplateKind::from_answer("  NODE\n"),
        Some(TemplateKind::Node)
    );
    assert_eq!(
        TemplateKind::from_answer("\"react\""),
        Some(TemplateKind::React)
    );
}

#[test]
fn test_from_answer_rejects_unknown() {
    assert_eq!(TemplateKind::from_answer("vue"), None);
    assert_eq!(TemplateKind::from_answer(""), None);
    assert_eq!(TemplateKind::from_answer("react or node"), None);
}

#[test]
fn test_names() {
    assert_eq!(TemplateKind::React.name(), "react");
    assert_eq!(TemplateKind::Node.name(), "node");
}

#[test]
fn test_react_base_artifact_parses() {
    let steps = parse_artifact(TemplateKind::React.base_artifact(), 1);

    assert_eq!(steps[0].kind, StepKind::CreateFolder);
    assert_eq!(steps[0].title, "React Starter");
    assert!(steps.iter().all(|s| s.kind != StepKind::RunCommand));

    let paths: Vec<&str> = steps.iter().filter_map(|s| s.path.as_deref()).collect();
    assert!(paths.contains(&"package.json"));
    assert!(paths.contains(&"index.html"));
    assert!(paths.contains(&"src/main.tsx"));
    assert!(paths.contains(&"src/App.tsx"));
}

#[test]
fn test_node_base_artifact_parses() {
    let steps = parse_artifact(TemplateKind::Node.base_artifact(), 1);

    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0].title, "Node Starter");

    let package = steps
        .iter()
        .find(|s| s.path.as_deref() == Some("package.json"))
        .unwrap();
    assert!(package.content.contains("express"));
    assert!(steps.iter().any(|s| s.path.as_deref() == Some("index.js")));
}

#[test]
fn test_react_prompts_lead_with_design_rules() {
    let prompts = TemplateKind::React.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("design"));
    assert!(prompts[1].contains("react-starter"));
}

#[test]
fn test_node_prompts_wrap_starter_only() {
    let prompts = TemplateKind::Node.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("express"));
    assert!(!prompts[0].contains("vite"));
}
