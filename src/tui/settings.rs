//! Settings screen: theme toggle and where things live on disk.

use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::info;

use crate::{
    config::Config,
    tui::{actions::MainActions, colors::Palette},
    view_model::MainViewModel,
};

#[derive(Debug, Default)]
pub struct SettingsScreen;

impl SettingsScreen {
    pub fn new() -> Self {
        Self
    }

    /// Handle a key press. Theme changes are written to `config_path` straight away.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        config: &mut Config,
        config_path: &Path,
        actions: &MainActions,
    ) -> Option<String> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => actions.up_press(),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('t') => {
                config.dark_theme = !config.dark_theme;
                info!(dark_theme = config.dark_theme, "theme toggled");
                return Some(match config.save(config_path) {
                    Ok(()) => format!("Theme: {}", theme_name(config.dark_theme)),
                    Err(e) => format!("Error: {}", e),
                });
            }
            _ => {}
        }
        None
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        config: &Config,
        config_path: &Path,
        vm: &MainViewModel,
        palette: &Palette,
    ) {
        let label = |s: &'static str| Span::styled(s, Style::default().add_modifier(Modifier::BOLD));
        let lines = vec![
            Line::from(vec![
                label("Theme:        "),
                Span::styled(
                    format!("< {} >", theme_name(config.dark_theme)),
                    Style::default().fg(palette.accent).add_modifier(Modifier::REVERSED),
                ),
            ]),
            Line::from(""),
            Line::from(vec![label("Task store:   "), Span::raw(vm.db_path().display().to_string())]),
            Line::from(vec![label("Emoji source: "), Span::raw(vm.emoji_source().describe())]),
            Line::from(vec![label("Config file:  "), Span::raw(config_path.display().to_string())]),
            Line::from(vec![label("Log file:     "), Span::raw(config.log_path().display().to_string())]),
            Line::from(""),
            Line::styled("Enter toggle theme  Esc back", Style::default().fg(palette.muted)),
        ];
        let settings = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Settings"))
            .wrap(Wrap { trim: false });
        f.render_widget(settings, area);
    }
}

fn theme_name(dark: bool) -> &'static str {
    if dark {
        "Dark"
    } else {
        "Light"
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::tui::nav::{Route, Router};

    #[test]
    fn enter_toggles_and_saves_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let router = Rc::new(RefCell::new(Router::new()));
        router.borrow_mut().navigate_to(Route::Settings);
        let actions = MainActions::new(&router);
        let mut config = Config::default();
        let mut screen = SettingsScreen::new();

        let msg = screen.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut config, &path, &actions);
        assert_eq!(msg.as_deref(), Some("Theme: Light"));
        assert!(!Config::load(&path).unwrap().dark_theme);

        screen.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), &mut config, &path, &actions);
        assert_eq!(router.borrow().current(), Route::Home);
    }

    #[test]
    fn save_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be.
        let path = dir.path().join("config.toml");
        std::fs::create_dir(&path).unwrap();
        let router = Rc::new(RefCell::new(Router::new()));
        let actions = MainActions::new(&router);
        let mut config = Config::default();

        let msg = SettingsScreen::new()
            .handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE), &mut config, &path, &actions)
            .unwrap();
        assert!(msg.starts_with("Error: "), "{msg}");
    }
}
