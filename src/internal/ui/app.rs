use anyhow::Result;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::api::ApiService;
use crate::config::AppConfig;
use crate::internal::last_searches::last_searches;
use crate::internal::models::Story;
use crate::internal::notification::Notification;
use crate::internal::saved_search::SavedSearch;
use crate::internal::stories::{self, StoriesAction, StoriesState};
use crate::internal::ui::sort::{SortKey, SortState};

use ratatui::widgets::ListState;

/// Input modes for the UI.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Search,
}

/// Actions/messages sent through the app action channel.
///
/// Everything that mutates state funnels through here and is applied one
/// action at a time, in arrival order, by the event loop.
#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    NavigateUp,
    NavigateDown,
    OpenBrowser,
    SubmitSearch,
    RepeatSearch(String),
    Stories(StoriesAction),
    ClearNotification,
}

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Main application state.
pub struct App {
    pub running: bool,
    pub app_version: String,
    pub stories: StoriesState,
    pub saved_search: SavedSearch,
    pub urls: Vec<String>,
    pub sort: SortState,
    pub story_list_state: ListState,
    pub api_service: Arc<ApiService>,
    pub input_mode: InputMode,
    pub notification: Option<Notification>,
    pub spinner_state: usize,
    pub last_spinner_update: Option<tokio::time::Instant>,
    pub config: AppConfig,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
}

impl App {
    #[tracing::instrument(skip(config))]
    pub fn new(config: AppConfig) -> Self {
        let saved_search = match SavedSearch::load_or_create(&config.search.default_term) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Failed to load saved search term: {}", e);
                SavedSearch::new(&config.search.default_term, None)
            }
        };

        Self::with_parts(config, saved_search)
    }

    /// Construct with an injected term store. `App::new` wires in the one
    /// backed by the platform config dir; tests pass a memory-only one.
    pub fn with_parts(config: AppConfig, saved_search: SavedSearch) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let api_service = Arc::new(ApiService::new(&config.api));

        tracing::info!(
            "App config: endpoint='{}', saved term='{}'",
            config.api.endpoint,
            saved_search.term
        );

        Self {
            running: true,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            stories: StoriesState::default(),
            saved_search,
            urls: Vec::new(),
            sort: SortState::default(),
            story_list_state: ListState::default(),
            api_service,
            input_mode: InputMode::Normal,
            notification: None,
            spinner_state: 0,
            last_spinner_update: None,
            config,
            action_tx,
            action_rx,
        }
    }

    /// Set an info notification
    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::info(message));
    }

    /// Set an error notification
    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::error(message));
    }

    /// Clear the current notification
    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    pub fn get_spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_state % SPINNER_FRAMES.len()]
    }

    /// The stories in display order: the active sort applied to the latest
    /// data snapshot. Recomputed on every call, never cached.
    pub fn visible_stories(&self) -> Vec<Story> {
        self.sort.apply(&self.stories.data)
    }

    /// Prior search terms for the quick-repeat bar, derived from the URL
    /// history.
    pub fn last_searches(&self) -> Vec<String> {
        last_searches(&self.urls, &self.config.api.endpoint)
    }

    pub async fn run(&mut self, mut tui: crate::tui::Tui) -> Result<()> {
        // Initial search with the persisted (or default) term
        let _ = self.action_tx.send(Action::SubmitSearch);

        let mut event_interval = tokio::time::interval(std::time::Duration::from_millis(16));

        loop {
            // Update spinner animation every 100ms
            let now = tokio::time::Instant::now();
            match self.last_spinner_update {
                Some(last_update) => {
                    if now.duration_since(last_update).as_millis() >= 100 {
                        self.spinner_state = self.spinner_state.wrapping_add(1);
                        self.last_spinner_update = Some(now);
                    }
                }
                None => {
                    self.last_spinner_update = Some(now);
                }
            }

            // Auto-dismiss expired notifications
            if let Some(notification) = &self.notification
                && notification.should_dismiss()
            {
                self.clear_notification();
            }

            tui.draw(|f| crate::internal::ui::view::draw(self, f))?;

            tokio::select! {
                _ = event_interval.tick() => {
                    // Check for terminal events
                    if event::poll(std::time::Duration::from_millis(0))?
                        && let Event::Key(key) = event::read()?
                            && key.kind == KeyEventKind::Press {
                                self.handle_key_event(key);
                            }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            if !self.running {
                break;
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Search => self.handle_search_input(key),
            InputMode::Normal => self.handle_normal_input(key),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let _ = self.action_tx.send(Action::SubmitSearch);
            }
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.saved_search.pop_char();
            }
            KeyCode::Char(c) => {
                self.saved_search.push_char(c);
            }
            _ => {}
        }
    }

    fn handle_normal_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                let _ = self.action_tx.send(Action::Quit);
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let _ = self.action_tx.send(Action::NavigateDown);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let _ = self.action_tx.send(Action::NavigateUp);
            }
            KeyCode::Char('r') => {
                let _ = self.action_tx.send(Action::SubmitSearch);
            }
            KeyCode::Char('o') | KeyCode::Enter => {
                let _ = self.action_tx.send(Action::OpenBrowser);
            }
            KeyCode::Char('d') => {
                // Dismiss the selected story (in display order)
                if let Some(selected) = self.story_list_state.selected()
                    && let Some(story) = self.visible_stories().get(selected)
                {
                    let _ = self
                        .action_tx
                        .send(Action::Stories(StoriesAction::RemoveStory(story.clone())));
                }
            }
            KeyCode::Char('t') => self.sort.toggle(SortKey::Title),
            KeyCode::Char('a') => self.sort.toggle(SortKey::Author),
            KeyCode::Char('c') => self.sort.toggle(SortKey::Comment),
            KeyCode::Char('p') => self.sort.toggle(SortKey::Point),
            KeyCode::Char('n') => self.sort.toggle(SortKey::None),
            KeyCode::Char(ch @ '1'..='5') => {
                // Quick-repeat a prior search from the history bar
                let index = (ch as usize) - ('1' as usize);
                if let Some(term) = self.last_searches().get(index) {
                    let _ = self.action_tx.send(Action::RepeatSearch(term.clone()));
                }
            }
            _ => {}
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.running = false;
            }
            Action::NavigateUp => {
                let len = self.stories.data.len();
                if len > 0 {
                    let i = match self.story_list_state.selected() {
                        Some(i) => i.saturating_sub(1),
                        None => 0,
                    };
                    self.story_list_state.select(Some(i));
                }
            }
            Action::NavigateDown => {
                let len = self.stories.data.len();
                if len > 0 {
                    let i = match self.story_list_state.selected() {
                        Some(i) => (i + 1).min(len - 1),
                        None => 0,
                    };
                    self.story_list_state.select(Some(i));
                }
            }
            Action::OpenBrowser => {
                if let Some(selected) = self.story_list_state.selected()
                    && let Some(story) = self.visible_stories().get(selected)
                {
                    match open::that(&story.url) {
                        Ok(_) => self.notify_info(format!("Opened {}", story.url)),
                        Err(e) => {
                            tracing::error!("Failed to open browser: {}", e);
                            self.notify_error("Failed to open browser");
                        }
                    }
                }
            }
            Action::SubmitSearch => {
                self.run_search();
            }
            Action::RepeatSearch(term) => {
                self.saved_search.set(term);
                self.run_search();
            }
            Action::Stories(stories_action) => {
                self.apply_stories_action(stories_action);
            }
            Action::ClearNotification => {
                self.clear_notification();
            }
        }
    }

    /// Issue a search for the current term: record the request URL, flag
    /// the state machine as loading, then fetch in the background.
    ///
    /// `FetchInit` is applied before the network task is spawned, so it is
    /// strictly ordered before this fetch's terminal action. Overlapping
    /// fetches race: whichever terminal action arrives last wins.
    fn run_search(&mut self) {
        let url = self.api_service.search_url(&self.saved_search.term);
        tracing::info!("Searching: {}", url);
        self.urls.push(url.clone());

        self.apply_stories_action(StoriesAction::FetchInit);

        let api = self.api_service.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.fetch_stories(&url).await {
                Ok(hits) => {
                    let _ = tx.send(Action::Stories(StoriesAction::FetchSuccess(hits)));
                }
                Err(e) => {
                    tracing::error!("Search failed for {}: {:#}", url, e);
                    let _ = tx.send(Action::Stories(StoriesAction::FetchFailure));
                }
            }
        });
    }

    fn apply_stories_action(&mut self, action: StoriesAction) {
        let failed = matches!(action, StoriesAction::FetchFailure);

        let state = std::mem::take(&mut self.stories);
        self.stories = stories::reduce(state, action);

        if failed {
            self.notify_error("Something went wrong ...");
        }

        // Keep the selection inside the (possibly shrunken) list
        let len = self.stories.data.len();
        match (len, self.story_list_state.selected()) {
            (0, _) => self.story_list_state.select(None),
            (_, None) => self.story_list_state.select(Some(0)),
            (_, Some(i)) if i >= len => self.story_list_state.select(Some(len - 1)),
            _ => {}
        }
    }
}
