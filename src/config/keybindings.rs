//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Key strings bound to each action.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub first: Vec<String>,
    pub last: Vec<String>,
    pub open_article: Vec<String>,
    pub refresh: Vec<String>,
    pub retry: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            next_page: keys(&["n", "PageDown"]),
            prev_page: keys(&["p", "PageUp"]),
            first: keys(&["g", "Home"]),
            last: keys(&["G", "End"]),
            open_article: keys(&["Enter", "o"]),
            refresh: keys(&["R"]),
            retry: keys(&["r"]),
        }
    }
}

impl KeybindingConfig {
    /// Map a key event to an action; the first matching binding wins.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 10] = [
            (self.quit.as_slice(), Action::Quit),
            (self.move_up.as_slice(), Action::MoveUp),
            (self.move_down.as_slice(), Action::MoveDown),
            (self.next_page.as_slice(), Action::NextPage),
            (self.prev_page.as_slice(), Action::PrevPage),
            (self.first.as_slice(), Action::First),
            (self.last.as_slice(), Action::Last),
            (self.open_article.as_slice(), Action::OpenArticle),
            (self.refresh.as_slice(), Action::Refresh),
            (self.retry.as_slice(), Action::Retry),
        ];

        table
            .iter()
            .find(|(bindings, _)| matches_key(key, bindings))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }

    /// Status bar hint built from the first key of each binding.
    pub fn help_line(&self) -> String {
        fn first(bindings: &[String]) -> &str {
            bindings.first().map(String::as_str).unwrap_or("?")
        }

        format!(
            "{}/{}:Nav  {}/{}:Page  {}:Open  {}:Refresh  {}:Quit",
            first(&self.move_down),
            first(&self.move_up),
            first(&self.next_page),
            first(&self.prev_page),
            first(&self.open_article),
            first(&self.refresh),
            first(&self.quit),
        )
    }
}

fn matches_key(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_key_string(binding).ok())
        .any(|parsed| parsed.matches(key))
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored on the event side so "G" matches Shift+g.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string into a KeyBinding.
///
/// Supported formats:
/// - Single characters: "a", "G", "/"
/// - Special keys: "Enter", "Tab", "BackTab", "Backspace", "Delete", "Home", "End",
///   "PageUp", "PageDown", "Up", "Down", "Left", "Right", "Esc", "Space", "F1"-"F12"
/// - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    // "+" on its own is a key, not a separator.
    if s == "+" {
        return Ok(KeyBinding {
            code: KeyCode::Char('+'),
            modifiers: KeyModifiers::NONE,
        });
    }

    let mut parts: Vec<&str> = s.split('+').collect();
    let key_part = parts.pop().unwrap_or_default();

    let mut modifiers = KeyModifiers::NONE;
    for part in parts {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    Ok(KeyBinding {
        code: parse_key_code(key_part)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        _ => Err(format!("Unknown key: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_single_char() {
        let binding = parse_key_string("j").unwrap();
        assert_eq!(binding.code, KeyCode::Char('j'));
        assert_eq!(binding.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(parse_key_string("Enter").unwrap().code, KeyCode::Enter);
        assert_eq!(parse_key_string("pgdn").unwrap().code, KeyCode::PageDown);
        assert_eq!(parse_key_string("Home").unwrap().code, KeyCode::Home);
        assert_eq!(parse_key_string("F12").unwrap().code, KeyCode::F(12));
        assert!(parse_key_string("F13").is_err());
        assert!(parse_key_string("Hyper").is_err());
    }

    #[test]
    fn test_parse_modifiers() {
        let binding = parse_key_string("Ctrl+c").unwrap();
        assert_eq!(binding.code, KeyCode::Char('c'));
        assert_eq!(binding.modifiers, KeyModifiers::CONTROL);

        let binding = parse_key_string("Ctrl+Shift+a").unwrap();
        assert_eq!(binding.modifiers, KeyModifiers::CONTROL | KeyModifiers::SHIFT);

        assert!(parse_key_string("Meta+x").is_err());
    }

    #[test]
    fn test_parse_plus_key() {
        assert_eq!(parse_key_string("+").unwrap().code, KeyCode::Char('+'));
    }

    #[test]
    fn test_uppercase_binding_matches_shifted_event() {
        let binding = parse_key_string("G").unwrap();
        assert!(binding.matches(&press(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(!binding.matches(&press(KeyCode::Char('g'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_default_actions() {
        let config = KeybindingConfig::default();

        let cases = [
            (press(KeyCode::Char('q'), KeyModifiers::NONE), Action::Quit),
            (press(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit),
            (press(KeyCode::Down, KeyModifiers::NONE), Action::MoveDown),
            (press(KeyCode::Char('k'), KeyModifiers::NONE), Action::MoveUp),
            (press(KeyCode::Enter, KeyModifiers::NONE), Action::OpenArticle),
            (press(KeyCode::Char('r'), KeyModifiers::NONE), Action::Retry),
            (press(KeyCode::Char('R'), KeyModifiers::SHIFT), Action::Refresh),
            (press(KeyCode::End, KeyModifiers::NONE), Action::Last),
            (press(KeyCode::Char('x'), KeyModifiers::NONE), Action::None),
        ];

        for (key, expected) in cases {
            assert_eq!(config.get_action(&key), expected, "key {:?}", key.code);
        }
    }

    #[test]
    fn test_help_line_uses_configured_keys() {
        let mut config = KeybindingConfig::default();
        config.refresh = vec!["F5".into()];
        let help = config.help_line();
        assert!(help.contains("j/k:Nav"));
        assert!(help.contains("F5:Refresh"));
    }

    #[test]
    fn test_plain_c_is_not_quit() {
        let config = KeybindingConfig::default();
        let key = press(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(config.get_action(&key), Action::None);
    }
}
