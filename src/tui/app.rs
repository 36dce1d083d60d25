//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the router, the shared
//! view-model and one state struct per screen. Screens change the route
//! through `MainActions`; after every key the app compares the router's
//! current route with the one it last entered and runs the enter hook for
//! the new destination.

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, info};

use crate::{
    config::Config,
    tui::{
        actions::MainActions,
        add_task::AddTaskScreen,
        colors::{palette, Palette},
        home,
        nav::{Route, Router},
        settings::SettingsScreen,
        task_detail::TaskDetailScreen,
        task_list::TaskListScreen,
    },
    view_model::MainViewModel,
};

/// Main application state for the terminal user interface.
pub struct App {
    router: Rc<RefCell<Router>>,
    actions: MainActions,
    view_model: MainViewModel,
    config: Config,
    config_path: PathBuf,
    add_task: AddTaskScreen,
    task_list: TaskListScreen,
    task_detail: TaskDetailScreen,
    settings: SettingsScreen,
    active_route: Option<Route>,
    status_message: String,
}

impl App {
    /// Create the app. `router` may already hold a deep-linked route.
    pub fn new(router: Router, view_model: MainViewModel, config: Config, config_path: &Path) -> Self {
        let router = Rc::new(RefCell::new(router));
        let actions = MainActions::new(&router);
        let mut app = App {
            router,
            actions,
            view_model,
            config,
            config_path: config_path.to_path_buf(),
            add_task: AddTaskScreen::new(),
            task_list: TaskListScreen::new(),
            task_detail: TaskDetailScreen::new(),
            settings: SettingsScreen::new(),
            active_route: None,
            status_message: String::new(),
        };
        app.sync_route();
        app
    }

    pub fn current_route(&self) -> Route {
        self.router.borrow().current()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn view_model(&self) -> &MainViewModel {
        &self.view_model
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the enter hook when the router moved to a different route.
    fn sync_route(&mut self) {
        let route = self.current_route();
        if self.active_route == Some(route) {
            return;
        }
        debug!(route = %route.path(), "entering route");
        match route {
            Route::Home | Route::Settings => {}
            Route::AddTask => self.add_task = AddTaskScreen::new(),
            Route::AllTask => self.task_list.refresh(&self.view_model),
            Route::TaskDetails { id } => {
                self.view_model.find_task_by_id(id);
                self.task_detail = TaskDetailScreen::new();
            }
        }
        self.active_route = Some(route);
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Handle one key press. Returns `true` when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.clear_status_message();

        let message = match self.current_route() {
            Route::Home => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return true;
                }
                home::handle_key(key, &self.actions);
                None
            }
            Route::AddTask => self.add_task.handle_key(key, &mut self.view_model, &self.actions),
            Route::AllTask => self.task_list.handle_key(key, &self.view_model, &self.actions),
            Route::TaskDetails { .. } => self.task_detail.handle_key(key, &mut self.view_model, &self.actions),
            Route::Settings => {
                self.settings
                    .handle_key(key, &mut self.config, &self.config_path, &self.actions)
            }
        };
        if let Some(msg) = message {
            self.set_status_message(msg);
        }
        self.sync_route();
        false
    }

    /// Deliver background results. Returns `true` when a redraw is needed.
    pub fn tick(&mut self) -> bool {
        self.view_model.pump()
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(self.config.tick_rate_ms))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key));
                }
            }
        }
        Ok(false)
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let depth = self.router.borrow().back_stack().len();
            format!("{} | depth {}", self.current_route().path(), depth)
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(palette.status_bg).fg(palette.status_fg))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the screen for the current route.
    pub fn render(&mut self, f: &mut Frame) {
        let palette = palette(self.config.dark_theme);
        f.render_widget(
            Block::default().style(Style::default().fg(palette.fg).bg(palette.bg)),
            f.area(),
        );
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.current_route() {
            Route::Home => home::render(f, chunks[0], &self.view_model, &palette),
            Route::AddTask => self.add_task.render(f, chunks[0], &self.view_model, &palette),
            Route::AllTask => self.task_list.render(f, chunks[0], &self.view_model, &palette),
            Route::TaskDetails { .. } => self.task_detail.render(f, chunks[0], &self.view_model, &palette),
            Route::Settings => self.settings.render(
                f,
                chunks[0],
                &self.config,
                &self.config_path,
                &self.view_model,
                &palette,
            ),
        }

        self.render_status_bar(f, chunks[1], &palette);
    }

    /// Main event loop for the TUI application.
    ///
    /// Draws, waits up to one tick for input, then delivers background results.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        info!(route = %self.current_route().path(), "ui started");
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
            self.tick();
        }
        info!("ui stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::fields::TaskStatus;
    use crate::tui::add_task::SAVED_MESSAGE;
    use crate::view_model::test_support::{settle, view_model};

    fn app_at(dir: &Path, router: Router) -> App {
        let vm = view_model(dir);
        let config = Config {
            data_dir: dir.to_path_buf(),
            ..Config::default()
        };
        App::new(router, vm, config, &dir.join("config.toml"))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn screen_text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        screen_text(terminal.backend().buffer())
    }

    #[test]
    fn add_task_by_keyboard() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), Router::new());

        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.current_route(), Route::AddTask);
        type_str(&mut app, "Ship report");
        app.handle_key(key(KeyCode::Tab));
        type_str(&mut app, "Write Q3 summary");
        app.handle_key(key(KeyCode::Tab));
        type_str(&mut app, "Work");
        app.handle_key(key(KeyCode::Tab));
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Right));
        }
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        assert_eq!(app.status_message(), SAVED_MESSAGE);
        assert_eq!(app.current_route(), Route::Home);
        let tasks = app.view_model().tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Ship report");
        assert_eq!((tasks[0].urgency, tasks[0].importance), (3, 1));
        assert_eq!(tasks[0].emoji, "🚀");
        assert_eq!(tasks[0].status, TaskStatus::Todo);
    }

    #[test]
    fn empty_title_stays_on_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), Router::new());
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.status_message(), "Title is Empty!");
        assert_eq!(app.current_route(), Route::AddTask);
        assert!(app.view_model().tasks().is_empty());
        assert!(draw(&mut app).contains("Title is Empty!"));
    }

    #[test]
    fn form_is_fresh_on_each_visit() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), Router::new());
        app.handle_key(key(KeyCode::Char('a')));
        type_str(&mut app, "draft");
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.current_route(), Route::Home);
        app.handle_key(key(KeyCode::Char('a')));
        assert!(app.add_task.form.title.value.is_empty());
    }

    #[test]
    fn picker_selection_is_submitted() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), Router::new());
        app.handle_key(key(KeyCode::Char('a')));
        type_str(&mut app, "t");
        app.handle_key(key(KeyCode::Tab));
        type_str(&mut app, "d");
        app.handle_key(key(KeyCode::Tab));
        type_str(&mut app, "c");
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.view_model().emoji_loads_started(), 1);
        settle(&mut app.view_model);
        draw(&mut app);
        draw(&mut app);
        assert_eq!(app.view_model().emoji_loads_started(), 1);

        // Second bundled entry is the fire emoji.
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(app.status_message(), SAVED_MESSAGE);
        assert_eq!(app.view_model().tasks()[0].emoji, "🔥");
    }

    #[test]
    fn list_details_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), Router::new());
        app.handle_key(key(KeyCode::Char('a')));
        type_str(&mut app, "Pay rent");
        app.handle_key(key(KeyCode::Tab));
        type_str(&mut app, "monthly");
        app.handle_key(key(KeyCode::Tab));
        type_str(&mut app, "Home");
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.current_route(), Route::AllTask);
        assert!(draw(&mut app).contains("Pay rent"));

        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.current_route(), Route::TaskDetails { .. }));
        assert_eq!(app.view_model().task_details().map(|t| t.title.as_str()), Some("Pay rent"));
        assert!(draw(&mut app).contains("monthly"));

        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.status_message(), "Status: In Progress");

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.current_route(), Route::AllTask);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.current_route(), Route::Home);
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn deep_link_to_missing_task_renders_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut router = Router::new();
        router.navigate_to(Route::TaskDetails { id: 99 });
        let mut app = app_at(dir.path(), router);
        assert!(app.view_model().task_details().is_none());
        assert!(draw(&mut app).contains("Task not found"));
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.current_route(), Route::Home);
    }

    #[test]
    fn home_and_settings_render() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), Router::new());
        let text = draw(&mut app);
        assert!(text.contains("EINSEN"));
        assert!(text.contains("Do First"));

        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.current_route(), Route::Settings);
        assert!(draw(&mut app).contains("Theme"));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.config().dark_theme);
        assert!(Config::load(&dir.path().join("config.toml")).is_ok_and(|c| !c.dark_theme));
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path(), Router::new());
        app.handle_key(key(KeyCode::Char('a')));
        assert!(!app.handle_key(key(KeyCode::Char('q'))));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }
}
