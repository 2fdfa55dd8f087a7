//! State for the interactive preview
//!
//! The preview mirrors a free-text answer field: whatever is typed is shown
//! capitalized for the active locale, with a live readability badge and the
//! time since the last edit.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::locale::LocaleTag;
use crate::relative::format_relative_opt;
use crate::text::{self, Readability};

/// How long a status message stays on screen
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Locales cycled with Tab
const PREVIEW_LOCALES: [&str; 6] = ["en-US", "fr-FR", "es-ES", "de-DE", "tr-TR", "nl-NL"];

pub struct PreviewApp {
    pub input: String,
    pub locale: LocaleTag,
    pub min_length: usize,
    pub last_edit: Option<DateTime<Utc>>,
    pub should_quit: bool,

    // Status message (auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl PreviewApp {
    pub fn new(locale: LocaleTag, min_length: usize) -> Self {
        Self {
            input: String::new(),
            locale,
            min_length,
            last_edit: None,
            should_quit: false,
            status_message: None,
            status_message_time: None,
        }
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: DateTime<Utc>) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
                self.last_edit = Some(now);
                self.set_status("Cleared");
            }
            KeyCode::Tab => self.cycle_locale(),
            KeyCode::Backspace => {
                if self.input.pop().is_some() {
                    self.last_edit = Some(now);
                }
            }
            KeyCode::Enter => {
                self.input.push('\n');
                self.last_edit = Some(now);
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                self.last_edit = Some(now);
            }
            _ => {}
        }
    }

    fn cycle_locale(&mut self) {
        let current = PREVIEW_LOCALES
            .iter()
            .position(|l| *l == self.locale.as_str());
        let next = current.map(|i| (i + 1) % PREVIEW_LOCALES.len()).unwrap_or(0);

        match LocaleTag::parse(PREVIEW_LOCALES[next]) {
            Ok(tag) => {
                self.locale = tag;
                self.set_status(format!("Locale: {}", self.locale));
            }
            Err(e) => tracing::warn!("Bad preview locale: {}", e),
        }
    }

    /// Input with its first cased character uppercased
    pub fn capitalized(&self) -> String {
        text::capitalize_in(&self.input, &self.locale)
    }

    pub fn readability(&self) -> Option<Readability> {
        text::assess(Some(&self.input), self.min_length)
    }

    /// Characters typed so far
    pub fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    pub fn last_edited(&self, now: DateTime<Utc>) -> String {
        format_relative_opt(self.last_edit, now, &self.locale)
    }

    /// Periodic housekeeping
    pub fn tick(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut PreviewApp, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c)), now());
        }
    }

    #[test]
    fn test_typing_updates_preview() {
        let mut app = PreviewApp::new(LocaleTag::parse("tr").unwrap(), 280);
        assert_eq!(app.last_edited(now()), "—");

        type_str(&mut app, "istanbul");
        assert_eq!(app.capitalized(), "İstanbul");
        assert_eq!(app.char_count(), 8);
        assert_eq!(app.last_edit, Some(now()));

        app.handle_key(key(KeyCode::Backspace), now());
        assert_eq!(app.input, "istanbu");
    }

    #[test]
    fn test_last_edited_is_relative() {
        let mut app = PreviewApp::new(LocaleTag::default(), 280);
        type_str(&mut app, "a");
        assert_eq!(app.last_edited(now()), "just now");
        assert_eq!(app.last_edited(now() + chrono::Duration::hours(2)), "2 hours ago");
    }

    #[test]
    fn test_readability_waits_for_min_length() {
        let mut app = PreviewApp::new(LocaleTag::default(), 20);
        type_str(&mut app, "Too short.");
        assert!(app.readability().is_none());

        type_str(&mut app, " Institutional documentation necessitates verification.");
        assert!(app.readability().is_some());
    }

    #[test]
    fn test_tab_cycles_locales() {
        let mut app = PreviewApp::new(LocaleTag::default(), 280);
        app.handle_key(key(KeyCode::Tab), now());
        assert_eq!(app.locale.as_str(), "fr-FR");
        assert_eq!(app.status_message.as_deref(), Some("Locale: fr-FR"));

        let mut app = PreviewApp::new(LocaleTag::parse("ja").unwrap(), 280);
        app.handle_key(key(KeyCode::Tab), now());
        assert_eq!(app.locale.as_str(), "en-US");
    }

    #[test]
    fn test_quit_and_clear() {
        let mut app = PreviewApp::new(LocaleTag::default(), 280);
        type_str(&mut app, "hello");
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), now());
        assert!(app.input.is_empty());
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Esc), now());
        assert!(app.should_quit);
    }
}
