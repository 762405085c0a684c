// app state for the tui

use crate::core::{
    FileNode, FileTree, NodeKind, Provider, Sandbox, Session, Step, StepKind, StepStatus,
    TemplateKind, parse_artifact,
};
use crate::tui::theme::{Theme, ThemeKind, detect_theme};
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Prompt,
    Steps,
    Files,
    Logs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Themes,
    Confirm,
    FileView,
    SetupProvider,
    SetupApiKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Ok,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub name: String,
    pub template: String,
    pub directory: String,
    pub files: usize,
}

#[derive(Debug, Clone)]
pub struct AgentInfo {
    pub name: String,
    pub model: String,
}

// a flattened tree row for the file explorer
#[derive(Debug, Clone)]
pub struct ExplorerRow {
    pub path: String,
    pub name: String,
    pub kind: NodeKind,
    pub depth: usize,
    pub collapsed: bool,
}

pub struct App {
    pub running: bool,
    pub mode: Mode,
    pub panel: Panel,
    pub popup: Popup,
    pub fullscreen: bool,
    pub theme_kind: ThemeKind,
    pub theme: Theme,

    // settings
    pub confirm_before_run: bool,

    // project info
    pub project: ProjectInfo,
    pub agent_info: AgentInfo,

    // prompt input (multi-line)
    pub prompt: String,
    pub prompt_cursor: usize,

    // plan state
    pub steps: Vec<Step>,
    pub next_step_id: usize,
    pub template: Option<TemplateKind>,
    pub forced_template: Option<TemplateKind>,

    // project files
    pub tree: FileTree,
    pub session: Session,
    pub sandbox: Sandbox,
    pub pending_commands: VecDeque<(usize, String)>,

    // file explorer
    pub explorer_cursor: usize,
    pub collapsed: HashSet<String>,
    pub viewing: Option<String>,
    pub view_scroll: usize,

    // logs
    pub logs: Vec<LogEntry>,

    // state
    pub loading: bool,

    // scroll
    pub steps_scroll: usize,
    pub log_scroll: usize,
    pub theme_scroll: usize,

    // history
    pub history: Vec<String>,
    pub history_index: Option<usize>,

    // setup mode state
    pub in_setup_mode: bool,
    pub setup_provider: Provider,
    pub setup_provider_index: usize,
    pub setup_api_key_input: String,
    pub setup_api_key_cursor: usize,
    pub setup_error: Option<String>,
}

impl App {
    pub fn new(
        sandbox: Sandbox,
        agent_info: AgentInfo,
        confirm_before_run: bool,
        forced_template: Option<TemplateKind>,
    ) -> Self {
        let theme_kind = detect_theme();
        let directory = sandbox.root().display().to_string();

        let mut app = Self {
            running: true,
            mode: Mode::Normal,
            panel: Panel::Prompt,
            popup: Popup::None,
            fullscreen: false,
            theme_kind,
            theme: Theme::from_kind(theme_kind),
            confirm_before_run,
            project: ProjectInfo {
                name: "untitled".to_string(),
                template: "-".to_string(),
                directory,
                files: 0,
            },
            agent_info,
            prompt: String::new(),
            prompt_cursor: 0,
            steps: Vec::new(),
            next_step_id: 1,
            template: None,
            forced_template,
            tree: FileTree::default(),
            session: Session::default(),
            sandbox,
            pending_commands: VecDeque::new(),
            explorer_cursor: 0,
            collapsed: HashSet::new(),
            viewing: None,
            view_scroll: 0,
            logs: Vec::new(),
            loading: false,
            steps_scroll: 0,
            log_scroll: 0,
            theme_scroll: theme_kind.index(),
            history: Vec::new(),
            history_index: None,

            // setup mode (not active when using normal constructor)
            in_setup_mode: false,
            setup_provider: Provider::Gemini,
            setup_provider_index: 0,
            setup_api_key_input: String::new(),
            setup_api_key_cursor: 0,
            setup_error: None,
        };

        // initial log
        app.log(
            LogLevel::Ok,
            format!("agent selected: {}", app.agent_info.name),
        );
        app.log(
            LogLevel::Ok,
            format!("sandbox at {}", app.project.directory),
        );
        app.log(
            LogLevel::Info,
            "describe the site you want and press enter".to_string(),
        );

        app
    }

    /// Create app in setup mode (no api key yet)
    pub fn new_setup(
        sandbox: Sandbox,
        confirm_before_run: bool,
        forced_template: Option<TemplateKind>,
    ) -> Self {
        let theme_kind = detect_theme();
        let directory = sandbox.root().display().to_string();

        Self {
            running: true,
            mode: Mode::Normal,
            panel: Panel::Prompt,
            popup: Popup::SetupProvider,
            fullscreen: false,
            theme_kind,
            theme: Theme::from_kind(theme_kind),
            confirm_before_run,
            project: ProjectInfo {
                name: "untitled".to_string(),
                template: "-".to_string(),
                directory,
                files: 0,
            },
            agent_info: AgentInfo {
                name: String::new(),
                model: String::new(),
            },
            prompt: String::new(),
            prompt_cursor: 0,
            steps: Vec::new(),
            next_step_id: 1,
            template: None,
            forced_template,
            tree: FileTree::default(),
            session: Session::default(),
            sandbox,
            pending_commands: VecDeque::new(),
            explorer_cursor: 0,
            collapsed: HashSet::new(),
            viewing: None,
            view_scroll: 0,
            logs: Vec::new(),
            loading: false,
            steps_scroll: 0,
            log_scroll: 0,
            theme_scroll: theme_kind.index(),
            history: Vec::new(),
            history_index: None,

            // setup mode active
            in_setup_mode: true,
            setup_provider: Provider::Gemini,
            setup_provider_index: 0,
            setup_api_key_input: String::new(),
            setup_api_key_cursor: 0,
            setup_error: None,
        }
    }

    // setup provider selection
    pub fn setup_provider_up(&mut self) {
        if self.setup_provider_index > 0 {
            self.setup_provider_index -= 1;
            self.setup_provider = Provider::ALL[self.setup_provider_index];
        }
    }

    pub fn setup_provider_down(&mut self) {
        if self.setup_provider_index < Provider::ALL.len() - 1 {
            self.setup_provider_index += 1;
            self.setup_provider = Provider::ALL[self.setup_provider_index];
        }
    }

    pub fn setup_provider_select(&mut self) {
        self.popup = Popup::SetupApiKey;
        self.setup_error = None;
    }

    // setup api key input editing
    pub fn setup_api_key_insert_char(&mut self, c: char) {
        self.setup_api_key_input.insert(self.setup_api_key_cursor, c);
        self.setup_api_key_cursor += 1;
        self.setup_error = None;
    }

    pub fn setup_api_key_delete_char(&mut self) {
        if self.setup_api_key_cursor > 0 {
            self.setup_api_key_cursor -= 1;
            self.setup_api_key_input.remove(self.setup_api_key_cursor);
        }
    }

    pub fn setup_api_key_delete_char_forward(&mut self) {
        if self.setup_api_key_cursor < self.setup_api_key_input.len() {
            self.setup_api_key_input.remove(self.setup_api_key_cursor);
        }
    }

    pub fn setup_api_key_move_left(&mut self) {
        self.setup_api_key_cursor = self.setup_api_key_cursor.saturating_sub(1);
    }

    pub fn setup_api_key_move_right(&mut self) {
        if self.setup_api_key_cursor < self.setup_api_key_input.len() {
            self.setup_api_key_cursor += 1;
        }
    }

    pub fn setup_api_key_move_start(&mut self) {
        self.setup_api_key_cursor = 0;
    }

    pub fn setup_api_key_move_end(&mut self) {
        self.setup_api_key_cursor = self.setup_api_key_input.len();
    }

    pub fn setup_api_key_clear(&mut self) {
        self.setup_api_key_input.clear();
        self.setup_api_key_cursor = 0;
    }

    // empty input means read the key from the environment
    pub fn setup_api_key_submit(&mut self) -> Option<String> {
        let key = self.setup_api_key_input.trim();
        if key.is_empty() {
            return None;
        }
        Some(key.to_string())
    }

    pub fn setup_set_error(&mut self, error: String) {
        self.setup_error = Some(error);
    }

    pub fn finish_setup(&mut self, agent_info: AgentInfo) {
        self.in_setup_mode = false;
        self.popup = Popup::None;
        self.agent_info = agent_info;
        self.log(
            LogLevel::Ok,
            format!("agent selected: {}", self.agent_info.name),
        );
        self.log(
            LogLevel::Ok,
            format!("sandbox at {}", self.project.directory),
        );
        self.log(
            LogLevel::Info,
            "describe the site you want and press enter".to_string(),
        );
    }

    pub fn log(&mut self, level: LogLevel, message: String) {
        self.logs.push(LogEntry { level, message });
        // auto-scroll to bottom
        if self.logs.len() > 1 {
            self.log_scroll = self.logs.len().saturating_sub(10);
        }
    }

    pub fn set_theme(&mut self, kind: ThemeKind) {
        self.theme_kind = kind;
        self.theme = Theme::from_kind(kind);
        self.theme_scroll = kind.index();
    }

    pub fn open_theme_popup(&mut self) {
        self.popup = Popup::Themes;
        self.theme_scroll = self.theme_kind.index();
    }

    pub fn close_popup(&mut self) {
        self.popup = Popup::None;
    }

    pub fn theme_scroll_up(&mut self) {
        if self.theme_scroll > 0 {
            self.theme_scroll -= 1;
            self.set_theme(ThemeKind::ALL[self.theme_scroll]);
        }
    }

    pub fn theme_scroll_down(&mut self) {
        if self.theme_scroll < ThemeKind::ALL.len() - 1 {
            self.theme_scroll += 1;
            self.set_theme(ThemeKind::ALL[self.theme_scroll]);
        }
    }

    pub fn select_theme(&mut self) {
        self.set_theme(ThemeKind::ALL[self.theme_scroll]);
        self.close_popup();
    }

    // pop the command waiting at the front of the queue, closing the popup
    pub fn pop_pending(&mut self) -> Option<(usize, String)> {
        self.popup = Popup::None;
        self.pending_commands.pop_front()
    }

    pub fn set_template(&mut self, kind: TemplateKind) {
        self.template = Some(kind);
        self.project.template = kind.name().to_string();
        self.log(LogLevel::Ok, format!("template: {}", kind.name()));
    }

    /// Parse an artifact reply into steps and append them to the plan.
    /// Returns how many steps were added.
    pub fn ingest_artifact(&mut self, text: &str) -> usize {
        let steps = parse_artifact(text, self.next_step_id);
        if let Some(last) = steps.last() {
            self.next_step_id = last.id + 1;
        }
        if self.project.name == "untitled" {
            if let Some(first) = steps.first() {
                if first.kind == StepKind::CreateFolder {
                    self.project.name = first.title.clone();
                }
            }
        }
        let added = steps.len();
        self.steps.extend(steps);
        if added > 0 {
            self.log(LogLevel::Ok, format!("parsed {} step(s)", added));
        }
        added
    }

    /// Apply pending steps to the file tree, queue any commands and
    /// mirror the tree into the sandbox.
    pub fn apply_and_sync(&mut self) {
        let outcome = self.tree.apply(&mut self.steps);
        if outcome.files_applied > 0 {
            self.log(
                LogLevel::Ok,
                format!("applied {} file(s)", outcome.files_applied),
            );
        }
        for (id, command) in outcome.commands {
            self.pending_commands.push_back((id, command));
        }
        match self.sandbox.sync(&self.tree) {
            Ok(written) => {
                if written > 0 {
                    self.log(
                        LogLevel::Info,
                        format!("synced {} file(s) to sandbox", written),
                    );
                }
            }
            Err(e) => self.log(LogLevel::Error, format!("sandbox sync failed: {}", e)),
        }
        self.project.files = self.tree.file_count();
        let max = self.explorer_rows().len().saturating_sub(1);
        if self.explorer_cursor > max {
            self.explorer_cursor = max;
        }
    }

    pub fn start_step(&mut self, id: usize) {
        self.set_step_status(id, StepStatus::Running);
    }

    pub fn complete_step(&mut self, id: usize) {
        self.set_step_status(id, StepStatus::Completed);
    }

    pub fn fail_step(&mut self, id: usize) {
        self.set_step_status(id, StepStatus::Failed);
    }

    fn set_step_status(&mut self, id: usize, status: StepStatus) {
        if let Some(step) = self.steps.iter_mut().find(|s| s.id == id) {
            step.status = status;
        }
    }

    // file explorer
    pub fn explorer_rows(&self) -> Vec<ExplorerRow> {
        let mut rows = Vec::new();
        for root in &self.tree.roots {
            self.push_rows(root, 0, &mut rows);
        }
        rows
    }

    fn push_rows(&self, node: &FileNode, depth: usize, rows: &mut Vec<ExplorerRow>) {
        let collapsed = self.collapsed.contains(&node.path);
        rows.push(ExplorerRow {
            path: node.path.clone(),
            name: node.name.clone(),
            kind: node.kind,
            depth,
            collapsed,
        });
        if node.kind == NodeKind::Folder && !collapsed {
            for child in &node.children {
                self.push_rows(child, depth + 1, rows);
            }
        }
    }

    pub fn explorer_up(&mut self) {
        self.explorer_cursor = self.explorer_cursor.saturating_sub(1);
    }

    pub fn explorer_down(&mut self) {
        let max = self.explorer_rows().len().saturating_sub(1);
        if self.explorer_cursor < max {
            self.explorer_cursor += 1;
        }
    }

    // toggle a folder or open a file under the cursor
    pub fn activate_explorer_row(&mut self) {
        let rows = self.explorer_rows();
        let Some(row) = rows.get(self.explorer_cursor) else {
            return;
        };
        match row.kind {
            NodeKind::Folder => {
                if !self.collapsed.remove(&row.path) {
                    self.collapsed.insert(row.path.clone());
                }
            }
            NodeKind::File => {
                self.viewing = Some(row.path.clone());
                self.view_scroll = 0;
                self.popup = Popup::FileView;
            }
        }
    }

    pub fn close_file_view(&mut self) {
        self.popup = Popup::None;
        self.viewing = None;
        self.view_scroll = 0;
    }

    pub fn view_scroll_up(&mut self) {
        self.view_scroll = self.view_scroll.saturating_sub(1);
    }

    pub fn view_scroll_down(&mut self) {
        self.view_scroll += 1;
    }

    pub fn cycle_panel(&mut self) {
        self.panel = match self.panel {
            Panel::Prompt => Panel::Steps,
            Panel::Steps => Panel::Files,
            Panel::Files => Panel::Logs,
            Panel::Logs => Panel::Prompt,
        };
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn enter_insert(&mut self) {
        self.mode = Mode::Insert;
    }

    pub fn exit_insert(&mut self) {
        self.mode = Mode::Normal;
    }

    // prompt editing
    pub fn insert_char(&mut self, c: char) {
        self.prompt.insert(self.prompt_cursor, c);
        self.prompt_cursor += 1;
    }

    pub fn insert_newline(&mut self) {
        self.prompt.insert(self.prompt_cursor, '\n');
        self.prompt_cursor += 1;
    }

    pub fn delete_char(&mut self) {
        if self.prompt_cursor > 0 {
            self.prompt_cursor -= 1;
            self.prompt.remove(self.prompt_cursor);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.prompt_cursor < self.prompt.len() {
            self.prompt.remove(self.prompt_cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.prompt_cursor = self.prompt_cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.prompt_cursor < self.prompt.len() {
            self.prompt_cursor += 1;
        }
    }

    pub fn move_cursor_start(&mut self) {
        self.prompt_cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.prompt_cursor = self.prompt.len();
    }

    pub fn clear_prompt(&mut self) {
        self.prompt.clear();
        self.prompt_cursor = 0;
    }

    // history navigation
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        match self.history_index {
            None => {
                self.history_index = Some(self.history.len() - 1);
            }
            Some(i) if i > 0 => {
                self.history_index = Some(i - 1);
            }
            _ => {}
        }
        if let Some(i) = self.history_index {
            self.prompt = self.history[i].clone();
            self.prompt_cursor = self.prompt.len();
        }
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(i) if i < self.history.len() - 1 => {
                self.history_index = Some(i + 1);
                self.prompt = self.history[i + 1].clone();
                self.prompt_cursor = self.prompt.len();
            }
            Some(_) => {
                self.history_index = None;
                self.clear_prompt();
            }
            None => {}
        }
    }

    pub fn submit(&mut self) -> Option<String> {
        if self.prompt.trim().is_empty() {
            return None;
        }
        let request = self.prompt.clone();
        self.history.push(request.clone());
        self.history_index = None;
        self.clear_prompt();
        Some(request)
    }

    pub fn set_error(&mut self, err: String) {
        self.loading = false;
        self.log(LogLevel::Error, err);
    }

    pub fn scroll_up(&mut self) {
        match self.panel {
            Panel::Steps => self.steps_scroll = self.steps_scroll.saturating_sub(1),
            Panel::Files => self.explorer_up(),
            Panel::Logs => self.log_scroll = self.log_scroll.saturating_sub(1),
            Panel::Prompt => {}
        }
    }

    pub fn scroll_down(&mut self) {
        match self.panel {
            Panel::Steps => self.steps_scroll += 1,
            Panel::Files => self.explorer_down(),
            Panel::Logs => self.log_scroll += 1,
            Panel::Prompt => {}
        }
    }
}
