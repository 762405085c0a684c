// core logic - providers, plan scraping, file tree, sandbox

mod ai;
pub mod archive;
mod plan;
mod prompts;
mod safety;
mod sandbox;
mod session;
mod template;
mod tree;

pub use ai::{Ai, ChatMessage, Provider, Role};
pub use plan::{Step, StepKind, StepStatus, parse_artifact};
pub use safety::Safety;
pub use sandbox::{COMMAND_TIMEOUT, RunOutcome, Sandbox};
pub use session::Session;
pub use template::TemplateKind;
pub use tree::{ApplyOutcome, FileNode, FileTree, NodeKind};
