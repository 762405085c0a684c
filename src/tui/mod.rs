// terminal ui

mod app;
mod ascii;
mod event;
mod theme;
mod ui;

pub use app::{AgentInfo, App};
pub use theme::ThemeKind;

use crossterm::{
    cursor::SetCursorStyle,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use crate::{Ai, COMMAND_TIMEOUT, Error, Provider, Safety, Sandbox, TemplateKind, export_zip};
use app::{LogLevel, Mode, Popup};
use event::{Action, handle_event, poll_event};

pub async fn run(
    provider: Provider,
    api_key: Option<String>,
    confirm: bool,
    dir: Option<PathBuf>,
    template: Option<TemplateKind>,
) -> Result<(), Error> {
    // setup terminal
    enable_raw_mode().map_err(|e| Error::Server(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| Error::Server(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| Error::Server(e.to_string()))?;

    // run app
    let result = run_app(&mut terminal, provider, api_key, confirm, dir, template).await;

    // restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        SetCursorStyle::DefaultUserShape,
        LeaveAlternateScreen
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    provider: Provider,
    api_key: Option<String>,
    confirm: bool,
    dir: Option<PathBuf>,
    template: Option<TemplateKind>,
) -> Result<(), Error> {
    let sandbox = match dir {
        Some(path) => Sandbox::at(path)?,
        None => Sandbox::ephemeral()?,
    };

    // a missing key drops us into setup mode, anything else is fatal
    let (mut app, mut ai) = match Ai::new(provider, api_key) {
        Ok(client) => {
            let agent = AgentInfo {
                name: "nlsite-agent".to_string(),
                model: client.model().to_string(),
            };
            (App::new(sandbox, agent, confirm, template), Some(client))
        }
        Err(Error::MissingApiKey) => (App::new_setup(sandbox, confirm, template), None),
        Err(e) => return Err(e),
    };

    let mut last_mode = app.mode;

    loop {
        // update cursor style before render
        if app.mode != last_mode {
            let cursor_style = match app.mode {
                Mode::Insert => SetCursorStyle::BlinkingBar, // beam cursor
                Mode::Normal => SetCursorStyle::BlinkingBlock, // block cursor
            };
            execute!(terminal.backend_mut(), cursor_style).ok();
            last_mode = app.mode;
        }

        // render (cursor position is set in ui::render when in insert mode)
        terminal
            .draw(|frame| ui::render(frame, &mut app))
            .map_err(|e| Error::Server(e.to_string()))?;

        // poll events
        if let Some(event) =
            poll_event(Duration::from_millis(100)).map_err(|e| Error::Server(e.to_string()))?
        {
            match handle_event(&mut app, event) {
                Action::Quit => break,
                Action::Submit(request) => {
                    // only process if we have an agent initialized
                    if let Some(ref client) = ai {
                        process_submit(terminal, &mut app, client, &request).await?;
                        drain_commands(terminal, &mut app).await?;
                    }
                }
                Action::ConfirmCommand => {
                    if let Some((id, command)) = app.pop_pending() {
                        run_command(terminal, &mut app, id, &command).await?;
                    }
                    drain_commands(terminal, &mut app).await?;
                }
                Action::CancelCommand => {
                    if let Some((id, command)) = app.pop_pending() {
                        app.fail_step(id);
                        app.log(LogLevel::Warn, format!("skipped: {}", first_line(&command)));
                    }
                    drain_commands(terminal, &mut app).await?;
                }
                Action::ExportZip => {
                    if app.tree.is_empty() {
                        app.log(LogLevel::Warn, "no files to export".to_string());
                    } else {
                        match export_zip(&app.tree, &app.project.name) {
                            Ok(path) => {
                                app.log(LogLevel::Ok, format!("exported to {}", path.display()));
                            }
                            Err(e) => {
                                app.log(LogLevel::Error, format!("export failed: {}", e));
                            }
                        }
                    }
                }
                Action::SetupComplete {
                    provider: setup_provider,
                    api_key: setup_api_key,
                } => {
                    // initialize the agent client
                    let api_key_from_env = setup_api_key.is_none();
                    match Ai::new(setup_provider, setup_api_key) {
                        Ok(client) => {
                            let agent = AgentInfo {
                                name: "nlsite-agent".to_string(),
                                model: client.model().to_string(),
                            };
                            ai = Some(client);
                            app.finish_setup(agent);
                            if api_key_from_env {
                                app.log(
                                    LogLevel::Info,
                                    "using api key from environment".to_string(),
                                );
                            }
                        }
                        Err(e) => {
                            app.setup_set_error(format!("agent init failed: {e}"));
                        }
                    }
                }
                Action::None => {}
            }
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}

async fn process_submit(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ai: &Ai,
    request: &str,
) -> Result<(), Error> {
    app.loading = true;
    app.log(
        LogLevel::Info,
        format!("processing: {}", first_line(request)),
    );

    // render loading state
    terminal
        .draw(|frame| ui::render(frame, app))
        .map_err(|e| Error::Server(e.to_string()))?;

    // the first request picks a template and seeds the session
    if app.session.is_empty() {
        let kind = match app.forced_template {
            Some(kind) => kind,
            None => match ai.classify_template(request).await {
                Ok(kind) => kind,
                Err(e) => {
                    app.set_error(e.to_string());
                    return Ok(());
                }
            },
        };
        app.set_template(kind);
        app.session.seed(&kind.prompts(), request);
        app.ingest_artifact(kind.base_artifact());
        app.apply_and_sync();

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| Error::Server(e.to_string()))?;
    } else {
        app.session.push_user(request);
    }

    app.log(LogLevel::Info, "generating plan...".to_string());
    terminal
        .draw(|frame| ui::render(frame, app))
        .map_err(|e| Error::Server(e.to_string()))?;

    match ai.generate_plan(&app.session.messages).await {
        Ok(reply) => {
            app.session.push_assistant(reply.clone());
            let added = app.ingest_artifact(&reply);
            if added == 0 {
                app.log(LogLevel::Warn, "reply contained no build steps".to_string());
            }
            app.apply_and_sync();
            app.loading = false;
        }
        Err(e) => app.set_error(e.to_string()),
    }

    Ok(())
}

// run queued commands until the queue is empty or one needs confirmation
async fn drain_commands(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Error> {
    while let Some((id, command)) = app.pending_commands.front().cloned() {
        let safety = Safety::check(&command);
        if safety.is_dangerous {
            app.pending_commands.pop_front();
            app.fail_step(id);
            app.log(
                LogLevel::Error,
                format!("blocked ({}): {}", safety.reason, first_line(&command)),
            );
            continue;
        }

        if app.confirm_before_run {
            app.popup = Popup::Confirm;
            return Ok(());
        }

        app.pending_commands.pop_front();
        run_command(terminal, app, id, &command).await?;
    }

    Ok(())
}

async fn run_command(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    id: usize,
    command: &str,
) -> Result<(), Error> {
    if let Some(warning) = Safety::check(command).warning {
        app.log(LogLevel::Warn, warning);
    }

    app.start_step(id);
    app.log(LogLevel::Info, format!("running: {}", first_line(command)));

    // render running state
    terminal
        .draw(|frame| ui::render(frame, app))
        .map_err(|e| Error::Server(e.to_string()))?;

    match app.sandbox.run(command, COMMAND_TIMEOUT).await {
        Ok(outcome) => {
            if outcome.timed_out {
                app.fail_step(id);
                app.log(
                    LogLevel::Error,
                    format!("timed out: {}", first_line(command)),
                );
            } else if outcome.success() {
                app.complete_step(id);
                app.log(LogLevel::Ok, format!("finished: {}", first_line(command)));
            } else {
                app.fail_step(id);
                app.log(
                    LogLevel::Error,
                    format!("exit code {}: {}", outcome.exit_code, first_line(command)),
                );
                if let Some(line) = outcome.stderr.lines().last() {
                    if !line.trim().is_empty() {
                        app.log(LogLevel::Error, line.to_string());
                    }
                }
            }
        }
        Err(e) => {
            app.fail_step(id);
            app.log(LogLevel::Error, format!("command failed: {}", e));
        }
    }

    Ok(())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}
