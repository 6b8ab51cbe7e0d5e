use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::BarChart;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Gauge;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Tabs;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Panel;
use crate::domain::models::SubmitError;
use crate::domain::models::TextArea;
use crate::domain::models::TimerMode;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::ChatLog;
use crate::domain::services::Snapshot;
use crate::infrastructure::backends;

fn submit_chat(
    app_state: &mut AppState,
    tx: &mpsc::UnboundedSender<Action>,
    text: &str,
) -> Result<bool> {
    match app_state.submit_chat(text) {
        Ok(prompt) => {
            tx.send(Action::SubmitPrompt(prompt))?;
            return Ok(true);
        }
        Err(SubmitError::NotConnected) => {
            if app_state.retry_open() {
                tx.send(Action::OpenSession())?;
            }
            app_state.add_chat_message(Message::new_with_type(
                Author::FocusFlow,
                MessageType::Error,
                "Still connecting to the assistant. Give it a moment and submit again.",
            ));
            return Ok(false);
        }
        Err(_) => {
            return Ok(false);
        }
    }
}

fn draw_tabs<B: Backend>(frame: &mut Frame<B>, rect: Rect, snapshot: &Snapshot) {
    let titles = Panel::all()
        .iter()
        .map(|panel| return panel.title())
        .collect::<Vec<&'static str>>();

    frame.render_widget(
        Tabs::new(titles)
            .select(snapshot.panel.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("FocusFlow"),
            ),
        rect,
    );
}

fn draw_dashboard<B: Backend>(frame: &mut Frame<B>, rect: Rect, snapshot: &Snapshot) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Min(1),
        ])
        .split(rect);

    let header = vec![
        Line::from(Span::styled(
            format!(
                "{}, {}",
                snapshot.summary.greeting,
                Config::get(ConfigKey::Username)
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Here's your productivity overview for today.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(header), layout[0]);

    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(25); 4])
        .split(layout[1]);

    let summary = &snapshot.summary;
    draw_tile(
        frame,
        tiles[0],
        "Time Tracked",
        &summary.tracked,
        "+12% vs yesterday",
    );
    draw_tile(
        frame,
        tiles[1],
        "Tasks Done",
        &format!("{}/{}", summary.tasks_done, summary.tasks_total),
        &format!("{:.0}% complete", summary.completion_ratio * 100.0),
    );
    draw_tile(
        frame,
        tiles[2],
        "Focus Streak",
        &format!("{} Days", summary.streak_days),
        "Keep it up!",
    );
    draw_tile(frame, tiles[3], "Upcoming Exam", "Calculus II", "In 3 days");

    frame.render_widget(
        BarChart::default()
            .data(&summary.weekly_hours)
            .bar_width(5)
            .bar_gap(2)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Weekly Activity (hours)"),
            ),
        layout[2],
    );
}

fn draw_tile<B: Backend>(frame: &mut Frame<B>, rect: Rect, title: &str, value: &str, hint: &str) {
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                hint.to_string(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title.to_string())
                .padding(Padding::new(1, 1, 0, 0)),
        ),
        rect,
    );
}

fn draw_tasks<B: Backend>(frame: &mut Frame<B>, rect: Rect, snapshot: &Snapshot) {
    let items = snapshot
        .visible_tasks
        .iter()
        .map(|task| {
            let mut checkbox = "[ ]";
            let mut style = Style::default();
            if task.completed {
                checkbox = "[x]";
                style = Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT);
            }

            return ListItem::new(Line::from(vec![
                Span::styled(format!("{checkbox} {}", task.title), style),
                Span::styled(
                    format!("  ({})", task.project),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        })
        .collect::<Vec<ListItem>>();

    let mut list_state = ListState::default();
    if !snapshot.visible_tasks.is_empty() {
        list_state.select(Some(snapshot.selected_task));
    }

    frame.render_stateful_widget(
        List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(format!("Tasks ({})", snapshot.task_filter.label())),
            ),
        rect,
        &mut list_state,
    );
}

fn draw_timer<B: Backend>(frame: &mut Frame<B>, rect: Rect, snapshot: &Snapshot) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(rect);

    let modes = [TimerMode::Focus, TimerMode::ShortBreak, TimerMode::LongBreak];
    let selected = modes
        .iter()
        .position(|mode| return *mode == snapshot.timer.mode())
        .unwrap_or(0);

    frame.render_widget(
        Tabs::new(
            modes
                .iter()
                .map(|mode| return mode.label())
                .collect::<Vec<&'static str>>(),
        )
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        ),
        layout[0],
    );

    frame.render_widget(
        Gauge::default()
            .ratio(snapshot.timer.progress())
            .label(snapshot.timer.clock())
            .gauge_style(Style::default().fg(Color::Cyan))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            ),
        layout[1],
    );

    let mut status = "PAUSED";
    let mut status_style = Style::default().fg(Color::DarkGray);
    if snapshot.timer.is_running() {
        status = "RUNNING";
        status_style = Style::default().fg(Color::Cyan);
    }
    if snapshot.timer_finished {
        status = "TIME'S UP! TAKE A BREAK";
        status_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(status.to_string(), status_style)))
            .alignment(Alignment::Center),
        layout[2],
    );
}

fn draw_chat<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    snapshot: &Snapshot,
    app_state: &mut AppState,
) {
    let lines = ChatLog::lines(&snapshot.messages, rect.width);

    frame.render_widget(
        Paragraph::new(lines).scroll((app_state.scroll.position, 0)),
        rect,
    );
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        rect.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app_state.scroll.scrollbar_state,
    );
}

fn draw_waiting<B: Backend>(frame: &mut Frame<B>, rect: Rect) {
    frame.render_widget(
        Paragraph::new("Reasoning deeply...")
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .padding(Padding::new(1, 1, 0, 0)),
            )
            .alignment(Alignment::Center),
        rect,
    );
}

fn draw_hint<B: Backend>(frame: &mut Frame<B>, rect: Rect, hint: &str) {
    frame.render_widget(
        Paragraph::new(hint.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            ),
        rect,
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    mut events: EventsService,
) -> Result<()> {
    let mut chat_input = TextArea::chat_input();
    let mut task_input = TextArea::task_input();
    let mut frames = app_state.subscribe();

    loop {
        let snapshot = frames.borrow().clone();

        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Max(4),
                ])
                .split(frame.size());

            if layout[1].width != app_state.last_known_width
                || layout[1].height != app_state.last_known_height
            {
                app_state.set_rect(layout[1].width, layout[1].height);
            }

            draw_tabs(frame, layout[0], &snapshot);

            match snapshot.panel {
                Panel::Dashboard => {
                    draw_dashboard(frame, layout[1], &snapshot);
                    draw_hint(frame, layout[2], "Tab switches panels. CTRL+C exits.");
                }
                Panel::Tasks => {
                    draw_tasks(frame, layout[1], &snapshot);
                    frame.render_widget(task_input.widget(), layout[2]);
                }
                Panel::Timer => {
                    draw_timer(frame, layout[1], &snapshot);
                    draw_hint(
                        frame,
                        layout[2],
                        "S start/pause. R reset. F focus. B short break. L long break.",
                    );
                }
                Panel::Chat => {
                    draw_chat(frame, layout[1], &snapshot, app_state);
                    if snapshot.waiting_for_assistant {
                        draw_waiting(frame, layout[2]);
                    } else if !snapshot.session_open {
                        draw_hint(frame, layout[2], "Connecting to the assistant...");
                    } else {
                        frame.render_widget(chat_input.widget(), layout[2]);
                    }
                }
            }
        })?;

        match events.next().await? {
            Event::AssistantFragment(fragment) => {
                app_state.handle_fragment(fragment);
            }
            Event::SessionOpened(handle) => {
                app_state.handle_session_opened(handle);
            }
            Event::SessionFailed(err) => {
                app_state.handle_session_failed(&err);
            }
            Event::StreamFailed(err) => {
                app_state.handle_stream_failed(&err);
            }
            Event::TimerTick() => {
                app_state.handle_tick();
            }
            Event::UITick() => {}
            Event::UIResize() => {}
            Event::KeyboardCTRLC() => {
                if app_state.chat.is_waiting() {
                    tx.send(Action::AbortReply())?;
                    app_state.abort_reply();
                } else {
                    break;
                }
            }
            Event::KeyboardTab() => {
                if app_state.activate_next_panel() {
                    tx.send(Action::OpenSession())?;
                }
            }
            Event::KeyboardCTRLR() => {
                if app_state.panel == Panel::Chat && !app_state.chat.is_waiting() {
                    if let Some(last) = app_state.chat.last_user_text() {
                        submit_chat(app_state, &tx, &last)?;
                    }
                }
            }
            Event::KeyboardEnter() => match app_state.panel {
                Panel::Chat => {
                    if !app_state.chat.is_waiting() {
                        let input_str = chat_input.lines().join("\n");
                        if submit_chat(app_state, &tx, &input_str)? {
                            chat_input = TextArea::chat_input();
                        }
                    }
                }
                Panel::Tasks => {
                    let input_str = task_input.lines().join("\n");
                    if !input_str.trim().is_empty() {
                        app_state.task_add(&input_str);
                        task_input = TextArea::task_input();
                    }
                }
                Panel::Timer => {
                    app_state.timer_toggle();
                }
                Panel::Dashboard => {}
            },
            Event::KeyboardPaste(text) => match app_state.panel {
                Panel::Chat => {
                    chat_input.insert_str(&text);
                }
                Panel::Tasks => {
                    task_input.insert_str(&text);
                }
                _ => {}
            },
            Event::UIScrollUp() => match app_state.panel {
                Panel::Chat => app_state.scroll.up(),
                Panel::Tasks => app_state.task_select_previous(),
                _ => {}
            },
            Event::UIScrollDown() => match app_state.panel {
                Panel::Chat => app_state.scroll.down(),
                Panel::Tasks => app_state.task_select_next(),
                _ => {}
            },
            Event::UIScrollPageUp() => {
                if app_state.panel == Panel::Chat {
                    app_state.scroll.up_page();
                }
            }
            Event::UIScrollPageDown() => {
                if app_state.panel == Panel::Chat {
                    app_state.scroll.down_page();
                }
            }
            Event::KeyboardCharInput(input) => match app_state.panel {
                Panel::Chat => match input {
                    Input { key: Key::Up, .. } => app_state.scroll.up(),
                    Input { key: Key::Down, .. } => app_state.scroll.down(),
                    input => {
                        if !app_state.chat.is_waiting() {
                            chat_input.input(input);
                        }
                    }
                },
                Panel::Tasks => match input {
                    Input { key: Key::Up, .. } => app_state.task_select_previous(),
                    Input { key: Key::Down, .. } => app_state.task_select_next(),
                    Input {
                        key: Key::Char('t'),
                        ctrl: true,
                        ..
                    } => app_state.task_toggle(),
                    Input {
                        key: Key::Char('x'),
                        ctrl: true,
                        ..
                    } => app_state.task_delete(),
                    Input {
                        key: Key::Char('f'),
                        ctrl: true,
                        ..
                    } => app_state.task_cycle_filter(),
                    input => {
                        task_input.input(input);
                    }
                },
                Panel::Timer => match input {
                    Input {
                        key: Key::Char('s'),
                        ..
                    } => app_state.timer_toggle(),
                    Input {
                        key: Key::Char('r'),
                        ..
                    } => app_state.timer_reset(),
                    Input {
                        key: Key::Char('f'),
                        ..
                    } => app_state.timer_set_mode(TimerMode::Focus),
                    Input {
                        key: Key::Char('b'),
                        ..
                    } => app_state.timer_set_mode(TimerMode::ShortBreak),
                    Input {
                        key: Key::Char('l'),
                        ..
                    } => app_state.timer_set_mode(TimerMode::LongBreak),
                    _ => {}
                },
                Panel::Dashboard => {}
            },
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    action_tx: mpsc::UnboundedSender<Action>,
    event_tx: mpsc::UnboundedSender<Event>,
    event_rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let backend = backends::default_backend();
    let mut app_state = AppState::new(&backend, event_tx).await?;

    start_loop(
        &mut terminal,
        &mut app_state,
        action_tx,
        EventsService::new(event_rx),
    )
    .await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
