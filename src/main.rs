//! Curve Console - actor-based terminal console for the launchpad API
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Dispatch Layer (Tokio) - async task execution

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use curve_console::app::state::InputKind;
use curve_console::messages::ui_events::key_to_ui_event;
use curve_console::ui::{highlight_json, method_color, status_color};
use curve_console::{
    build_catalog, makefile, AppActor, AppState, Config, DispatchActor, RenderState, Screen,
    TaskCommand, TaskEvent, UiEvent,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file (the TUI owns the terminal)
    let file_appender = tracing_appender::rolling::never(".", "curve-console.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::from_env();
    let catalog = build_catalog();
    let make_targets = makefile::load_targets(&config.make_file);
    tracing::info!(base_url = %config.base_url, targets = make_targets.len(), "Starting console");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<TaskCommand>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<TaskEvent>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn dispatch actor (its poll interval fires the first reference
    // fetch immediately)
    let dispatch_actor = DispatchActor::new(config.clone(), event_tx);
    tokio::spawn(dispatch_actor.run(cmd_rx));

    // Spawn app actor
    let state = AppState::new(config, catalog, make_targets);
    let app_actor = AppActor::new(state, cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, event_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    // The app actor sends the initial snapshot before its loop starts.
    let Some(mut current_state) = render_rx.recv().await else {
        return Ok(());
    };

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) =
                    key_to_ui_event(key, current_state.screen, current_state.search_mode)
                {
                    let quitting = matches!(event, UiEvent::Quit)
                        || (matches!(event, UiEvent::Back)
                            && matches!(
                                current_state.screen,
                                Screen::EndpointList | Screen::MakeCommands
                            ));
                    let _ = ui_tx.send(event);
                    if quitting {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    // The stats overlay draws over whatever screen it was opened from.
    let base = if state.screen == Screen::StatsModal {
        state.previous_screen
    } else {
        state.screen
    };

    match base {
        Screen::EndpointList | Screen::RequestBuilder => draw_console(f, state, chunks[0]),
        Screen::History => draw_history(f, state, chunks[0]),
        Screen::Settings => draw_settings(f, state, chunks[0]),
        Screen::MakeCommands => draw_make_commands(f, state, chunks[0]),
        Screen::StatsModal => {}
    }

    draw_status_bar(f, state, chunks[1]);

    if state.screen == Screen::StatsModal {
        draw_stats_modal(f, state, area);
    }
}

/// Split view: endpoint list on the left, request builder on the right.
fn draw_console(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(40)])
        .split(area);

    draw_endpoint_list(f, state, chunks[0]);
    draw_request_builder(f, state, chunks[1]);
}

fn draw_endpoint_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.screen == Screen::EndpointList;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let title = if state.search_mode {
        format!(" Endpoints /{}_ ", state.search_buffer)
    } else {
        " Endpoints (/ search) ".to_string()
    };

    let mut last_category = "";
    let mut items: Vec<ListItem> = Vec::new();
    let mut row_indices: Vec<Option<usize>> = Vec::new();
    for (i, row) in state.catalog_rows.iter().enumerate() {
        if row.category != last_category {
            items.push(ListItem::new(Line::from(Span::styled(
                format!("— {} —", row.category),
                Style::default().fg(Color::DarkGray),
            ))));
            row_indices.push(None);
            last_category = row.category;
        }
        let method_span = Span::styled(
            format!("{:7}", row.method.as_str()),
            Style::default().fg(method_color(row.method.as_str())),
        );
        items.push(ListItem::new(Line::from(vec![
            method_span,
            Span::raw(row.name),
        ])));
        row_indices.push(Some(i));
    }

    let selected_item = row_indices
        .iter()
        .position(|r| *r == Some(state.selected_endpoint));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold());

    let mut list_state = ListState::default();
    list_state.select(selected_item);
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_request_builder(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.screen == Screen::RequestBuilder;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length((state.inputs.len() + 3).min(14) as u16),
            Constraint::Min(5),
        ])
        .split(area);

    // Header: method + path template
    let header = Line::from(vec![
        Span::styled(
            format!(" {} ", state.method.as_str()),
            Style::default()
                .fg(method_color(state.method.as_str()))
                .bold(),
        ),
        Span::raw(state.path_template.as_str()),
    ]);
    let header_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.endpoint_description));
    f.render_widget(Paragraph::new(header).block(header_block), chunks[0]);

    // Parameter fields, path then query then body, plus the Send control
    let mut items: Vec<ListItem> = state
        .inputs
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let kind = match field.kind {
                InputKind::Path => "path ",
                InputKind::Query => "query",
                InputKind::Body => "body ",
            };
            let focused = is_focused && i == state.focused_input;
            let value_span = if field.value.is_empty() {
                Span::styled(
                    field.placeholder.clone(),
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                Span::raw(field.value.clone())
            };
            let style = if focused {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{kind} "), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:16}", field.key), style),
                value_span,
            ]))
        })
        .collect();

    let send_focused = is_focused && state.focused_input == state.inputs.len();
    let send_style = if send_focused {
        Style::default().fg(Color::Black).bg(Color::Green).bold()
    } else {
        Style::default().fg(Color::Green)
    };
    items.push(ListItem::new(Line::from(Span::styled(
        " [ Send Request ] ",
        send_style,
    ))));

    let fields_border = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let fields = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(fields_border)
            .title(" Parameters (Tab next, Enter send) "),
    );
    f.render_widget(fields, chunks[1]);

    draw_response(f, state, chunks[2]);
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let (title, lines) = match &state.response {
        Some(result) => {
            let status = match result.status_code {
                Some(code) => Span::styled(
                    format!(" {} {} ", code, result.status_text),
                    Style::default().fg(status_color(code)).bold(),
                ),
                None => Span::styled(" failed ", Style::default().fg(Color::Red).bold()),
            };

            let mut lines = Vec::new();
            if let Some(error) = &result.error {
                lines.push(Line::from(Span::styled(
                    format!("! {}", error),
                    Style::default().fg(Color::Red),
                )));
            }
            lines.push(Line::from(Span::styled(
                format!("{} {}", result.method.as_str(), result.request_url),
                Style::default().fg(Color::DarkGray),
            )));
            lines.extend(highlight_json(&result.body));
            (status, lines)
        }
        None => {
            let mut lines = vec![Line::from(Span::styled(
                "No response yet. Fill in the parameters and send.",
                Style::default().fg(Color::DarkGray),
            ))];
            if let Some(error) = &state.last_error {
                lines.push(Line::from(Span::styled(
                    format!("! {}", error),
                    Style::default().fg(Color::Red),
                )));
            }
            (Span::raw(" Response "), lines)
        }
    };

    let loading = if state.in_flight { " [...] " } else { "" };
    let duration = state
        .response
        .as_ref()
        .map(|r| format!(" {}ms ", r.duration_ms))
        .unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![title, Span::raw(loading)]))
        .title_bottom(Line::from(duration).right_aligned());

    let response = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(response, area);
}

fn draw_history(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    for result in &state.history {
        let status = match (result.status_code, &result.error) {
            (Some(code), _) => Span::styled(
                format!("{:>4}", code),
                Style::default().fg(status_color(code)),
            ),
            (None, Some(_)) => Span::styled("FAIL", Style::default().fg(Color::Red)),
            (None, None) => Span::raw("  - "),
        };
        lines.push(Line::from(vec![
            Span::styled(
                result.request_time.format("%H:%M:%S ").to_string(),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("{:7}", result.method.as_str()),
                Style::default().fg(method_color(result.method.as_str())),
            ),
            Span::raw(format!("{:24}", result.endpoint_name)),
            status,
            Span::styled(
                format!(" {:>5}ms  ", result.duration_ms),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(result.request_url.clone()),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No requests yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" History ({} total, newest first) ", state.history_len));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((state.history_scroll, 0));
    f.render_widget(paragraph, area);
}

fn draw_settings(f: &mut Frame, state: &RenderState, area: Rect) {
    let lines = vec![
        Line::from(format!("Base URL:       {}", state.base_url)),
        Line::from(format!("User ID:        {}", state.user_id)),
        Line::from(format!("Make file:      {}", state.make_file)),
        Line::from(format!("Poll interval:  {}s", state.poll_interval_secs)),
        Line::from(""),
        Line::from(format!(
            "Cached reference data: {} chains, {} templates",
            state.chain_count, state.template_count
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Set CURVE_CONSOLE_BASE_URL / _USER_ID / _MAKE_FILE / _POLL_SECS to override.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Settings ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_make_commands(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(30)])
        .split(area);

    let items: Vec<ListItem> = state
        .make_targets
        .iter()
        .map(|t| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:14}", t.name), Style::default().fg(Color::Cyan)),
                Span::styled(
                    t.description.clone(),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Make Targets (Enter run) "),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold());

    let mut list_state = ListState::default();
    if !state.make_targets.is_empty() {
        list_state.select(Some(state.selected_target));
    }
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    let output = if state.make_output.is_empty() {
        "Select a target and press Enter."
    } else {
        state.make_output.as_str()
    };
    let block = Block::default().borders(Borders::ALL).title(" Output ");
    f.render_widget(
        Paragraph::new(output).block(block).wrap(Wrap { trim: false }),
        chunks[1],
    );
}

fn draw_stats_modal(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(46, 32, area);

    let mut lines = Vec::new();
    match (state.stats.chain_count, state.stats.template_count) {
        (None, None) if state.stats.error.is_none() => {
            lines.push(Line::from("Fetching stats..."));
        }
        _ => {
            if let Some(count) = state.stats.chain_count {
                lines.push(Line::from(format!("Chains:    {count}")));
            }
            if let Some(count) = state.stats.template_count {
                lines.push(Line::from(format!("Templates: {count}")));
            }
        }
    }
    if let Some(error) = &state.stats.error {
        lines.push(Line::from(Span::styled(
            format!("! {error}"),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close...",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Stats ")
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, popup_area);
    f.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = match state.screen {
        Screen::EndpointList => {
            if state.search_mode {
                " type to search | Esc:clear "
            } else {
                " ↑/↓:select | Enter:fields | /:search | ^K:make ^R:history ^G:settings ^T:stats | q:quit "
            }
        }
        Screen::RequestBuilder => {
            " Tab:next field | Enter:send on [Send] | Esc:back | ^T:stats "
        }
        Screen::History => " ↑/↓:scroll | Esc:back ",
        Screen::Settings => " Esc:back ",
        Screen::MakeCommands => " ↑/↓:select | Enter:run | ^L:endpoints | q:quit ",
        Screen::StatsModal => " any key:close ",
    };

    let mut spans = vec![Span::raw(status)];
    if state.in_flight {
        spans.push(Span::styled(" [request in flight]", Style::default().fg(Color::Yellow)));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
