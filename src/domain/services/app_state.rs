#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio::sync::watch;

use super::ChatLog;
use super::ChatSession;
use super::DashboardSummary;
use super::Scroll;
use super::TaskBoard;
use super::Ticker;
use crate::domain::models::Author;
use crate::domain::models::BackendArc;
use crate::domain::models::BackendPrompt;
use crate::domain::models::ChatError;
use crate::domain::models::CountdownTimer;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Panel;
use crate::domain::models::ReplyFragment;
use crate::domain::models::SessionHandle;
use crate::domain::models::SubmitError;
use crate::domain::models::Task;
use crate::domain::models::TaskFilter;
use crate::domain::models::TimerMode;

/// An immutable view of the whole dashboard, published to subscribers after
/// every mutation.
#[derive(Clone)]
pub struct Snapshot {
    pub panel: Panel,
    pub messages: Vec<Message>,
    pub waiting_for_assistant: bool,
    pub session_open: bool,
    pub timer: CountdownTimer,
    pub timer_finished: bool,
    pub visible_tasks: Vec<Task>,
    pub task_filter: TaskFilter,
    pub selected_task: usize,
    pub summary: DashboardSummary,
}

/// Single owner of all mutable dashboard state. Every mutation goes through
/// one of the handlers below, which republish the snapshot; subscribers see
/// each incremental change rather than one final update.
pub struct AppState {
    pub panel: Panel,
    pub chat: ChatSession,
    pub timer: CountdownTimer,
    pub tasks: TaskBoard,
    pub scroll: Scroll,
    pub last_known_width: u16,
    pub last_known_height: u16,
    timer_finished: bool,
    ticker: Option<Ticker>,
    event_tx: mpsc::UnboundedSender<Event>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl AppState {
    pub async fn new(
        backend: &BackendArc,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> Result<AppState> {
        let mut app_state = AppState::bare(event_tx);

        if let Err(err) = backend.health_check().await {
            app_state.chat.add_message(Message::new_with_type(
                Author::FocusFlow,
                MessageType::Error,
                &format!("Hey, it looks like the assistant service isn't reachable right now. The rest of the dashboard works fine, but chat replies will fail until it comes back.\n\nError: {err}"),
            ));
        }

        app_state.publish();
        return Ok(app_state);
    }

    fn bare(event_tx: mpsc::UnboundedSender<Event>) -> AppState {
        let panel = Panel::Dashboard;
        let chat = ChatSession::default();
        let timer = CountdownTimer::default();
        let tasks = TaskBoard::default();

        let (snapshot_tx, _) = watch::channel(Snapshot {
            panel,
            messages: chat.messages.clone(),
            waiting_for_assistant: false,
            session_open: false,
            timer: timer.clone(),
            timer_finished: false,
            visible_tasks: vec![],
            task_filter: tasks.filter,
            selected_task: 0,
            summary: tasks.summary(),
        });

        return AppState {
            panel,
            chat,
            timer,
            tasks,
            scroll: Scroll::default(),
            last_known_width: 0,
            last_known_height: 0,
            timer_finished: false,
            ticker: None,
            event_tx,
            snapshot_tx,
        };
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        return self.snapshot_tx.subscribe();
    }

    pub fn snapshot(&self) -> Snapshot {
        return Snapshot {
            panel: self.panel,
            messages: self.chat.messages.clone(),
            waiting_for_assistant: self.chat.is_waiting(),
            session_open: self.chat.is_open(),
            timer: self.timer.clone(),
            timer_finished: self.timer_finished,
            visible_tasks: self
                .tasks
                .visible()
                .into_iter()
                .cloned()
                .collect::<Vec<Task>>(),
            task_filter: self.tasks.filter,
            selected_task: self.tasks.selected(),
            summary: self.tasks.summary(),
        };
    }

    pub fn set_rect(&mut self, width: u16, height: u16) {
        self.last_known_width = width;
        self.last_known_height = height;
        self.sync_scroll();
    }

    /// Cycles to the next panel. Returns true when entering the chat panel
    /// should dispatch a session-open request.
    pub fn activate_next_panel(&mut self) -> bool {
        self.panel = self.panel.next();

        let mut should_open = false;
        if self.panel == Panel::Chat {
            should_open = self.chat.ensure_open();
            self.scroll.jump_to_latest();
        }

        self.publish();
        return should_open;
    }

    pub fn handle_session_opened(&mut self, handle: SessionHandle) {
        self.chat.attach_handle(handle);
        self.publish();
    }

    pub fn handle_session_failed(&mut self, err: &ChatError) {
        tracing::error!(error = %err, "failed to open an assistant session");
        self.chat.fail_open(err);
        self.sync_scroll();
        self.publish();
    }

    pub fn handle_fragment(&mut self, fragment: ReplyFragment) {
        self.chat.apply_fragment(fragment);
        self.sync_scroll();
        self.publish();
    }

    pub fn handle_stream_failed(&mut self, err: &ChatError) {
        tracing::error!(error = %err, "assistant stream failed");
        self.chat.fail_stream();
        self.sync_scroll();
        self.publish();
    }

    pub fn add_chat_message(&mut self, message: Message) {
        self.chat.add_message(message);
        self.sync_scroll();
        self.scroll.jump_to_latest();
        self.publish();
    }

    /// Runs the chat submission guards and, on success, returns the prompt
    /// the caller should forward to the backend worker.
    pub fn submit_chat(&mut self, text: &str) -> Result<BackendPrompt, SubmitError> {
        let res = self.chat.submit(text);
        if res.is_ok() {
            self.sync_scroll();
            self.scroll.jump_to_latest();
            self.publish();
        }

        return res;
    }

    pub fn abort_reply(&mut self) {
        self.chat.abort_reply();
        self.publish();
    }

    /// Retries the session open. Returns true when a request should be
    /// dispatched, mirroring panel activation.
    pub fn retry_open(&mut self) -> bool {
        let should_open = self.chat.ensure_open();
        self.publish();
        return should_open;
    }

    pub fn timer_toggle(&mut self) {
        if self.timer.is_running() {
            self.timer_pause();
        } else {
            self.timer_start();
        }
    }

    pub fn timer_start(&mut self) {
        self.timer_finished = false;
        self.timer.start();
        if self.timer.is_running() && self.ticker.is_none() {
            self.ticker = Some(Ticker::arm(self.event_tx.clone()));
        }

        self.publish();
    }

    pub fn timer_pause(&mut self) {
        self.timer.pause();
        self.disarm_ticker();
        self.publish();
    }

    pub fn timer_reset(&mut self) {
        self.timer_finished = false;
        self.timer.reset();
        self.disarm_ticker();
        self.publish();
    }

    pub fn timer_set_mode(&mut self, mode: TimerMode) {
        self.timer_finished = false;
        self.timer.set_mode(mode);
        self.disarm_ticker();
        self.publish();
    }

    pub fn handle_tick(&mut self) {
        if self.timer.tick() {
            self.timer_finished = true;
            self.disarm_ticker();
        }

        self.publish();
    }

    pub fn task_add(&mut self, title: &str) {
        self.tasks.add_task(title);
        self.publish();
    }

    pub fn task_toggle(&mut self) {
        self.tasks.toggle_selected();
        self.publish();
    }

    pub fn task_delete(&mut self) {
        self.tasks.delete_selected();
        self.publish();
    }

    pub fn task_cycle_filter(&mut self) {
        self.tasks.cycle_filter();
        self.publish();
    }

    pub fn task_select_previous(&mut self) {
        self.tasks.select_previous();
        self.publish();
    }

    pub fn task_select_next(&mut self) {
        self.tasks.select_next();
        self.publish();
    }

    fn disarm_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn sync_scroll(&mut self) {
        let lines = ChatLog::line_count(&self.chat.messages, self.last_known_width);
        self.scroll.set_bounds(lines, self.last_known_height);
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}
