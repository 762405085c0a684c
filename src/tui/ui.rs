// ui rendering

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::core::{NodeKind, Provider, Safety, StepKind, StepStatus};
use crate::tui::app::{App, LogLevel, Mode, Panel, Popup};
use crate::tui::ascii::NLSITE_LOGO;
use crate::tui::theme::ThemeKind;

pub fn render(frame: &mut Frame, app: &mut App) {
    let theme = &app.theme;

    // clear with bg color
    frame.render_widget(Clear, frame.area());
    frame.render_widget(Block::default().style(theme.base()), frame.area());

    // main layout: header + content + footer
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // header with logo
            Constraint::Min(10),   // content
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, main[0]);
    render_content(frame, app, main[1]);
    render_footer(frame, app, main[2]);

    // render popups on top
    match app.popup {
        Popup::Themes => render_theme_popup(frame, app),
        Popup::Confirm => render_confirm_popup(frame, app),
        Popup::FileView => render_file_view_popup(frame, app),
        Popup::SetupProvider => render_setup_provider_popup(frame, app),
        Popup::SetupApiKey => render_setup_api_key_popup(frame, app),
        Popup::None => {}
    }
}

fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .style(theme.base());

    frame.render_widget(block, area);

    // split header: logo on left, info on right
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(20)])
        .margin(1)
        .split(area);

    // render ascii logo
    let logo_lines: Vec<Line> = NLSITE_LOGO
        .iter()
        .map(|&line| Line::styled(line, theme.accent()))
        .collect();

    let logo = Paragraph::new(logo_lines).style(theme.base());
    frame.render_widget(logo, inner[0]);

    // render info panel
    let mode_str = match app.mode {
        Mode::Normal => "normal",
        Mode::Insert => "insert",
    };

    let files = format!("{}", app.project.files);

    let info_lines = vec![
        Line::from(vec![
            Span::styled("| ", theme.muted()),
            Span::styled("nlsite", theme.accent()),
        ]),
        Line::from(vec![
            Span::styled("| Project: ", theme.muted()),
            Span::styled(&app.project.name, theme.base()),
            Span::styled("  | Template: ", theme.muted()),
            Span::styled(&app.project.template, theme.base()),
        ]),
        Line::from(vec![
            Span::styled("| Agent: ", theme.muted()),
            Span::styled(&app.agent_info.name, theme.base()),
            Span::styled(format!(" ({})", app.agent_info.model), theme.muted()),
            Span::styled("  | Files: ", theme.muted()),
            Span::styled(files, theme.accent()),
        ]),
        Line::from(vec![
            Span::styled("| Dir: ", theme.muted()),
            Span::styled(&app.project.directory, theme.base()),
        ]),
        Line::from(vec![
            Span::styled("| Mode: ", theme.muted()),
            Span::styled(mode_str, theme.accent()),
            Span::styled("   ", theme.muted()),
            Span::styled("[Tab]", theme.accent()),
            Span::styled(" Panels  ", theme.muted()),
            Span::styled("[t]", theme.accent()),
            Span::styled(" Themes  ", theme.muted()),
            Span::styled("[q]", theme.accent()),
            Span::styled(" Quit", theme.muted()),
        ]),
    ];

    let info = Paragraph::new(info_lines).style(theme.base());
    frame.render_widget(info, inner[1]);
}

fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.fullscreen {
        // render only the active panel in fullscreen
        match app.panel {
            Panel::Prompt => render_prompt(frame, app, area),
            Panel::Steps => render_steps(frame, app, area),
            Panel::Files => render_files(frame, app, area),
            Panel::Logs => render_logs(frame, app, area),
        }
        return;
    }

    // 2x2 grid
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let top_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    let bottom_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_prompt(frame, app, top_cols[0]);
    render_steps(frame, app, top_cols[1]);
    render_files(frame, app, bottom_cols[0]);
    render_logs(frame, app, bottom_cols[1]);
}

fn render_footer(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;

    let mut parts = vec![
        Span::styled(" Enter ", theme.base().bg(theme.accent).fg(theme.bg)),
        Span::styled(" Run ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("i ", theme.accent()),
        Span::styled("Prompt ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("f ", theme.accent()),
    ];

    if app.fullscreen {
        parts.push(Span::styled("Exit Full ", theme.warning()));
    } else {
        parts.push(Span::styled("Full ", theme.muted()));
    }

    parts.extend([
        Span::styled("| ", theme.border()),
        Span::styled("x ", theme.accent()),
        Span::styled("Zip ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("t ", theme.accent()),
        Span::styled("Theme ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("q ", theme.accent()),
        Span::styled("Quit ", theme.muted()),
    ]);

    let line = Line::from(parts);
    let paragraph = Paragraph::new(line)
        .style(theme.base())
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_prompt(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let active = app.panel == Panel::Prompt;

    let border_style = if active {
        theme.accent()
    } else {
        theme.border()
    };

    let title = " Prompt (Natural Language) ";

    let block = Block::default()
        .title(Span::styled(title, theme.title()))
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(theme.base());

    // render prompt - no visual cursor, we'll use the real terminal cursor
    let content = if app.prompt.is_empty() && app.mode != Mode::Insert {
        vec![Line::styled(
            "press 'i' and describe the site you want...",
            theme.muted(),
        )]
    } else {
        app.prompt
            .lines()
            .map(|l| Line::styled(l.to_string(), theme.base()))
            .collect()
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .style(theme.base())
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);

    // set cursor position when in insert mode
    if app.mode == Mode::Insert && active {
        let inner = area.inner(ratatui::layout::Margin {
            horizontal: 1,
            vertical: 1,
        });

        // calculate cursor position within text
        let (cursor_line, cursor_col) = {
            let mut line = 0usize;
            let mut col = 0usize;
            for (i, ch) in app.prompt.chars().enumerate() {
                if i >= app.prompt_cursor {
                    break;
                }
                if ch == '\n' {
                    line += 1;
                    col = 0;
                } else {
                    col += 1;
                }
            }
            (line, col)
        };

        let cursor_x = inner.x + cursor_col as u16;
        let cursor_y = inner.y + cursor_line as u16;

        // only set cursor if within bounds
        if cursor_x < inner.right() && cursor_y < inner.bottom() {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

fn render_steps(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let active = app.panel == Panel::Steps;

    let border_style = if active {
        theme.accent()
    } else {
        theme.border()
    };

    let title = if app.steps.is_empty() {
        " Plan ".to_string()
    } else {
        format!(" Plan ({} steps) ", app.steps.len())
    };

    let block = Block::default()
        .title(Span::styled(title, theme.title()))
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(theme.base());

    let mut lines: Vec<Line> = Vec::new();

    if app.steps.is_empty() {
        if app.loading {
            lines.push(Line::styled("generating plan...", theme.muted()));
        } else {
            lines.push(Line::styled("no plan yet", theme.muted()));
            lines.push(Line::styled(
                "describe a site in the prompt panel",
                theme.muted(),
            ));
        }
    } else {
        for step in &app.steps {
            let (glyph, style) = match step.status {
                StepStatus::Completed => ("+", theme.success()),
                StepStatus::Running => ("~", theme.warning()),
                StepStatus::Failed => ("x", theme.error()),
                StepStatus::Pending => (" ", theme.muted()),
            };

            let mut spans = vec![
                Span::styled(format!("[{}] ", glyph), style),
                Span::styled(step.title.clone(), theme.base()),
            ];

            if step.kind == StepKind::RunCommand {
                let first = step.content.lines().next().unwrap_or("");
                spans.push(Span::styled(
                    format!("  $ {}", truncate_str(first, 40)),
                    theme.muted(),
                ));
            }

            lines.push(Line::from(spans));
        }

        if app.loading {
            lines.push(Line::from(""));
            lines.push(Line::styled("working...", theme.muted()));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(theme.base())
        .scroll((app.steps_scroll as u16, 0));

    frame.render_widget(paragraph, area);
}

fn render_files(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let active = app.panel == Panel::Files;

    let border_style = if active {
        theme.accent()
    } else {
        theme.border()
    };

    let rows = app.explorer_rows();

    let title = if rows.is_empty() {
        " Files ".to_string()
    } else {
        format!(" Files ({}) ", app.project.files)
    };

    let block = Block::default()
        .title(Span::styled(title, theme.title()))
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(theme.base());

    let lines: Vec<Line> = if rows.is_empty() {
        vec![Line::styled("no files yet", theme.muted())]
    } else {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let indent = "  ".repeat(row.depth);
                let glyph = match row.kind {
                    NodeKind::Folder => {
                        if row.collapsed {
                            "> "
                        } else {
                            "v "
                        }
                    }
                    NodeKind::File => "  ",
                };
                let text = format!("{}{}{}", indent, glyph, row.name);

                if active && i == app.explorer_cursor {
                    Line::styled(text, theme.selected())
                } else if row.kind == NodeKind::Folder {
                    Line::styled(text, theme.accent())
                } else {
                    Line::styled(text, theme.base())
                }
            })
            .collect()
    };

    // keep the cursor row in view
    let visible = area.height.saturating_sub(2) as usize;
    let offset = if visible > 0 && app.explorer_cursor >= visible {
        app.explorer_cursor + 1 - visible
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(theme.base())
        .scroll((offset as u16, 0));

    frame.render_widget(paragraph, area);
}

fn render_logs(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let active = app.panel == Panel::Logs;

    let border_style = if active {
        theme.accent()
    } else {
        theme.border()
    };

    let block = Block::default()
        .title(Span::styled(" Logs ", theme.title()))
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(theme.base());

    let lines: Vec<Line> = app
        .logs
        .iter()
        .map(|entry| {
            let (prefix, style) = match entry.level {
                LogLevel::Ok => ("[OK]", theme.success()),
                LogLevel::Info => ("[--]", theme.muted()),
                LogLevel::Warn => ("[!!]", theme.warning()),
                LogLevel::Error => ("[ERR]", theme.error()),
            };
            Line::from(vec![
                Span::styled(format!("{} ", prefix), style),
                Span::styled(&entry.message, theme.base()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(theme.base())
        .scroll((app.log_scroll as u16, 0));

    frame.render_widget(paragraph, area);
}

fn render_theme_popup(frame: &mut Frame, app: &mut App) {
    let theme = &app.theme;
    let area = centered_rect(40, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" select theme ", theme.title()))
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());

    let lines: Vec<Line> = ThemeKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            let name = kind.name();
            let is_selected = i == app.theme_scroll;

            if is_selected {
                Line::from(vec![
                    Span::styled(" > ", theme.accent()),
                    Span::styled(name, theme.selected().fg(theme.accent)),
                ])
            } else {
                Line::from(vec![Span::styled(format!("   {name}"), theme.base())])
            }
        })
        .collect();

    let help = Line::from(vec![
        Span::styled(" j/k ", theme.accent()),
        Span::styled("navigate  ", theme.muted()),
        Span::styled("enter ", theme.accent()),
        Span::styled("select  ", theme.muted()),
        Span::styled("esc ", theme.accent()),
        Span::styled("close", theme.muted()),
    ]);

    let mut all_lines = lines;
    all_lines.push(Line::from(""));
    all_lines.push(help);

    let paragraph = Paragraph::new(all_lines).block(block).style(theme.base());
    frame.render_widget(paragraph, area);
}

fn render_confirm_popup(frame: &mut Frame, app: &mut App) {
    let theme = &app.theme;
    let area = centered_rect(70, 50, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" confirm command ", theme.title()))
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());

    let mut lines = vec![
        Line::styled("the plan wants to run:", theme.muted()),
        Line::from(""),
    ];

    if let Some((_, command)) = app.pending_commands.front() {
        for (i, cmd_line) in command.lines().enumerate() {
            let prefix = if i == 0 { "$ " } else { "  " };
            lines.push(Line::styled(
                format!("{}{}", prefix, cmd_line),
                theme.accent(),
            ));
        }

        if let Some(warning) = Safety::check(command).warning {
            lines.push(Line::from(""));
            lines.push(Line::styled(format!("note: {}", warning), theme.warning()));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("run this command? ", theme.base()),
        Span::styled("[y]es ", theme.success()),
        Span::styled("[n]o", theme.error()),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(theme.base())
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_file_view_popup(frame: &mut Frame, app: &mut App) {
    let theme = &app.theme;
    let area = centered_rect(80, 80, frame.area());

    frame.render_widget(Clear, area);

    let Some(path) = app.viewing.clone() else {
        return;
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", path), theme.title()))
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());

    let content = app
        .tree
        .find(&path)
        .map(|node| node.content.clone())
        .unwrap_or_default();

    let lines: Vec<Line> = if content.is_empty() {
        vec![Line::styled("(empty file)", theme.muted())]
    } else {
        content
            .lines()
            .map(|l| Line::styled(l.to_string(), theme.base()))
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(theme.base())
        .scroll((app.view_scroll as u16, 0));

    frame.render_widget(paragraph, area);
}

fn render_setup_provider_popup(frame: &mut Frame, app: &mut App) {
    let theme = &app.theme;
    let area = centered_rect(50, 40, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" nlsite setup - ai provider ", theme.title()))
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());

    let providers = ["Gemini (Google)", "Claude (Anthropic)"];

    let mut lines = vec![
        Line::styled("select your ai provider:", theme.muted()),
        Line::from(""),
    ];

    for (i, provider) in providers.iter().enumerate() {
        let is_selected = i == app.setup_provider_index;
        if is_selected {
            lines.push(Line::from(vec![
                Span::styled(" > ", theme.accent()),
                Span::styled(*provider, theme.selected().fg(theme.accent)),
            ]));
        } else {
            lines.push(Line::from(vec![Span::styled(
                format!("   {}", provider),
                theme.base(),
            )]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("j/k ", theme.accent()),
        Span::styled("navigate  ", theme.muted()),
        Span::styled("enter ", theme.accent()),
        Span::styled("select  ", theme.muted()),
        Span::styled("esc ", theme.accent()),
        Span::styled("quit", theme.muted()),
    ]));

    let paragraph = Paragraph::new(lines).block(block).style(theme.base());
    frame.render_widget(paragraph, area);
}

fn render_setup_api_key_popup(frame: &mut Frame, app: &mut App) {
    let theme = &app.theme;
    let area = centered_rect(70, 45, frame.area());

    frame.render_widget(Clear, area);

    let provider_name = app.setup_provider.name();

    let block = Block::default()
        .title(Span::styled(
            format!(" nlsite setup - {} api key ", provider_name),
            theme.title(),
        ))
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());

    // mask the api key
    let masked: String = "*".repeat(app.setup_api_key_input.len());

    let mut lines = vec![
        Line::styled(
            format!("enter your {} api key:", provider_name),
            theme.muted(),
        ),
        Line::from(""),
        Line::raw(&masked),
        Line::from(""),
    ];

    // show error if any
    if let Some(err) = &app.setup_error {
        lines.push(Line::styled(format!("error: {}", err), theme.error()));
        lines.push(Line::from(""));
    }

    let env_var = match app.setup_provider {
        Provider::Gemini => "GEMINI_API_KEY",
        Provider::Claude => "ANTHROPIC_API_KEY",
    };

    lines.push(Line::styled(
        format!("tip: leave empty to use the {} env var", env_var),
        theme.muted(),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("enter ", theme.accent()),
        Span::styled("continue  ", theme.muted()),
        Span::styled("esc ", theme.accent()),
        Span::styled("quit  ", theme.muted()),
        Span::styled("ctrl+u ", theme.accent()),
        Span::styled("clear", theme.muted()),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(theme.base())
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);

    // set cursor position
    let inner = area.inner(ratatui::layout::Margin {
        horizontal: 1,
        vertical: 1,
    });
    let cursor_x = inner.x + app.setup_api_key_cursor as u16;
    let cursor_y = inner.y + 2;

    if cursor_x < inner.right() {
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        format!("{}...", &s[..max_len - 3])
    } else {
        s[..max_len].to_string()
    }
}
