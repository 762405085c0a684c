// plan extraction - scrapes build steps out of semi-structured artifact text

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static HTML_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```html\n(.*?)\n```").unwrap());
static XML_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```xml\n(.*?)\n```").unwrap());
static BARE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```\n(.*?)\n```").unwrap());
static TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"title="([^"]*)""#).unwrap());
static ACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<action\s+type="([^"]*)"(?:\s+filePath="([^"]*)")?>(.*?)</action>"#).unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    CreateFolder,
    CreateFile,
    RunCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// One unit of work scraped from an artifact.
#[derive(Debug, Clone)]
pub struct Step {
    pub id: usize,
    pub title: String,
    pub kind: StepKind,
    pub status: StepStatus,
    pub path: Option<String>,
    pub content: String,
}

/// Pulls build steps out of artifact text. Model replies usually wrap the
/// artifact in a fenced block; starter templates ship it bare. Ids continue
/// from `next_id` so fragments from later turns never collide.
///
/// Returns an empty vec when the text carries no actions at all.
pub fn parse_artifact(text: &str, next_id: usize) -> Vec<Step> {
    let body = fenced_body(text).unwrap_or(text);
    let mut steps = Vec::new();
    let mut id = next_id;

    let mut actions = ACTION.captures_iter(body).peekable();
    if actions.peek().is_none() {
        return steps;
    }

    // lead step named after the artifact title
    let title = TITLE
        .captures(body)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| "Project Files".to_string());
    steps.push(Step {
        id,
        title,
        kind: StepKind::CreateFolder,
        status: StepStatus::Pending,
        path: None,
        content: String::new(),
    });
    id += 1;

    for caps in actions {
        let path = caps.get(2).map(|m| m.as_str().to_string());
        let content = caps[3].trim().to_string();
        if &caps[1] == "file" {
            steps.push(Step {
                id,
                title: format!("Create {}", path.as_deref().unwrap_or("file")),
                kind: StepKind::CreateFile,
                status: StepStatus::Pending,
                path,
                content,
            });
        } else {
            steps.push(Step {
                id,
                title: "Run command".to_string(),
                kind: StepKind::RunCommand,
                status: StepStatus::Pending,
                path: None,
                content,
            });
        }
        id += 1;
    }

    steps
}

// first fenced block wins, preferring an explicit language tag
fn fenced_body(text: &str) -> Option<&str> {
    for fence in [&HTML_FENCE, &XML_FENCE, &BARE_FENCE] {
        if let Some(caps) = fence.captures(text) {
            return caps.get(1).map(|m| m.as_str());
        }
    }
    None
}
