// tests for conversation state

use nlsite::{Role, Session, TemplateKind};

#[test]
fn test_new_session_is_empty() {
    let session = Session::new();
    assert!(session.is_empty());
    assert!(session.messages.is_empty());
}

#[test]
fn test_seed_orders_context_before_request() {
    let mut session = Session::new();
    let prompts = vec!["context one".to_string(), "context two".to_string()];
    session.seed(&prompts, "build me a bakery site");

    assert_eq!(session.messages.len(), 3);
    assert!(session.messages.iter().all(|m| m.role == Role::User));
    assert_eq!(session.messages[0].content, "context one");
    assert_eq!(session.messages[1].content, "context two");
    assert_eq!(session.messages[2].content, "build me a bakery site");
}

#[test]
fn test_seed_with_react_template() {
    let mut session = Session::new();
    session.seed(&TemplateKind::React.prompts(), "a portfolio");

    // design rules, starter artifact context, then the request
    assert_eq!(session.messages.len(), 3);
    assert!(session.messages[0].content.contains("design"));
    assert!(session.messages[1].content.contains("package.json"));
    assert_eq!(session.messages[2].content, "a portfolio");
}

#[test]
fn test_push_roles() {
    let mut session = Session::new();
    session.push_user("make the header blue");
    session.push_assistant("<artifact></artifact>");

    assert_eq!(session.messages[0].role, Role::User);
    assert_eq!(session.messages[1].role, Role::Assistant);
    assert!(!session.is_empty());
}

#[test]
fn test_turns_accumulate() {
    let mut session = Session::new();
    session.seed(&TemplateKind::Node.prompts(), "an api server");
    session.push_assistant("first plan");
    session.push_user("add a /health route");
    session.push_assistant("second plan");

    assert_eq!(session.messages.len(), 5);
    assert_eq!(session.messages.last().unwrap().role, Role::Assistant);
    assert_eq!(session.messages.last().unwrap().content, "second plan");
}
