// nlsite library - describe a website, get a runnable project

pub mod cli;
mod core;
mod error;
mod server;
pub mod tui;

pub use core::archive::{export_zip, write_zip};
pub use core::{
    Ai, ApplyOutcome, COMMAND_TIMEOUT, ChatMessage, FileNode, FileTree, NodeKind, Provider, Role,
    RunOutcome, Safety, Sandbox, Session, Step, StepKind, StepStatus, TemplateKind, parse_artifact,
};
pub use error::Error;
pub use server::Server;
