// file tree - in-memory project state folded together from plan steps

use crate::core::plan::{Step, StepKind, StepStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

/// One node in the project tree. Paths are `/`-separated with a leading
/// slash; siblings keep insertion order.
#[derive(Debug, Clone)]
pub struct FileNode {
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    pub content: String,
    pub children: Vec<FileNode>,
}

#[derive(Debug, Default)]
pub struct FileTree {
    pub roots: Vec<FileNode>,
}

/// What an apply pass produced: how many file steps landed, and which
/// command steps now wait on the executor.
#[derive(Debug, Default)]
pub struct ApplyOutcome {
    pub files_applied: usize,
    pub commands: Vec<(usize, String)>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds every pending file step into the tree and collects pending
    /// command steps for the executor. Re-applying is a no-op for steps
    /// that already completed, so the same slice can pass through after
    /// each new fragment.
    ///
    /// File steps flip to completed once their content is in the tree;
    /// steps with a missing or escaping path flip to failed and leave the
    /// tree untouched. Command steps stay pending here: the executor owns
    /// their running/completed/failed transitions.
    pub fn apply(&mut self, steps: &mut [Step]) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();
        for step in steps.iter_mut() {
            if step.status != StepStatus::Pending {
                continue;
            }
            match step.kind {
                StepKind::CreateFolder => step.status = StepStatus::Completed,
                StepKind::CreateFile => {
                    let applied = step
                        .path
                        .as_deref()
                        .and_then(normalize)
                        .map(|segments| self.insert(&segments, &step.content))
                        .unwrap_or(false);
                    if applied {
                        step.status = StepStatus::Completed;
                        outcome.files_applied += 1;
                    } else {
                        step.status = StepStatus::Failed;
                    }
                }
                StepKind::RunCommand => {
                    outcome.commands.push((step.id, step.content.clone()));
                }
            }
        }
        outcome
    }

    /// Looks a node up by path, with or without the leading slash.
    pub fn find(&self, path: &str) -> Option<&FileNode> {
        let want = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_none() && node.path == want {
                found = Some(node);
            }
        });
        found
    }

    /// Depth-first visit over every node, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a FileNode)) {
        fn go<'a>(nodes: &'a [FileNode], visit: &mut dyn FnMut(&'a FileNode)) {
            for node in nodes {
                visit(node);
                go(&node.children, visit);
            }
        }
        go(&self.roots, visit);
    }

    /// Every node in depth-first order.
    pub fn nodes(&self) -> Vec<&FileNode> {
        let mut out = Vec::new();
        self.walk(&mut |node| out.push(node));
        out
    }

    pub fn file_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if node.kind == NodeKind::File {
                count += 1;
            }
        });
        count
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    // walks folders down to the parent, creating them once, then writes the
    // file in place. false on a file/folder conflict anywhere on the path.
    fn insert(&mut self, segments: &[String], content: &str) -> bool {
        let Some((name, folders)) = segments.split_last() else {
            return false;
        };
        let mut children = &mut self.roots;
        let mut path = String::new();
        for segment in folders {
            path.push('/');
            path.push_str(segment);
            let index = match children.iter().position(|n| n.path == path) {
                Some(i) if children[i].kind == NodeKind::Folder => i,
                Some(_) => return false,
                None => {
                    children.push(FileNode {
                        name: segment.clone(),
                        path: path.clone(),
                        kind: NodeKind::Folder,
                        content: String::new(),
                        children: Vec::new(),
                    });
                    children.len() - 1
                }
            };
            children = &mut children[index].children;
        }
        path.push('/');
        path.push_str(name);
        match children.iter_mut().find(|n| n.path == path) {
            Some(node) if node.kind == NodeKind::File => {
                node.content = content.to_string();
                true
            }
            Some(_) => false,
            None => {
                children.push(FileNode {
                    name: name.clone(),
                    path,
                    kind: NodeKind::File,
                    content: content.to_string(),
                    children: Vec::new(),
                });
                true
            }
        }
    }
}

// "./src/main.js", "src/main.js" and "/src/main.js" all name the same file.
// paths that climb out of the project are rejected outright.
fn normalize(path: &str) -> Option<Vec<String>> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            s => segments.push(s.to_string()),
        }
    }
    if segments.is_empty() { None } else { Some(segments) }
}
