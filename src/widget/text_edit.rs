//! Caret-aware single-line editing. Carets count chars, not bytes.

use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

/// Applies one key press to `value`. Returns `true` if the text changed;
/// pure caret moves return `false`.
pub fn apply_key(value: &mut String, caret: &mut usize, key: KeyEvent) -> bool {
    *caret = (*caret).min(char_count(value));

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') | KeyCode::Backspace => delete_word_left(value, caret),
            KeyCode::Char('u') => clear_to_start(value, caret),
            KeyCode::Char('a') => {
                *caret = 0;
                false
            }
            KeyCode::Char('e') => {
                *caret = char_count(value);
                false
            }
            _ => false,
        };
    }

    match key.code {
        KeyCode::Char(ch) => {
            insert_char(value, caret, ch);
            true
        }
        KeyCode::Backspace => backspace(value, caret),
        KeyCode::Delete => delete_forward(value, caret),
        KeyCode::Left => {
            *caret = caret.saturating_sub(1);
            false
        }
        KeyCode::Right => {
            *caret = (*caret + 1).min(char_count(value));
            false
        }
        KeyCode::Home => {
            *caret = 0;
            false
        }
        KeyCode::End => {
            *caret = char_count(value);
            false
        }
        _ => false,
    }
}

pub fn insert_char(value: &mut String, caret: &mut usize, ch: char) {
    let byte_pos = byte_index_at_char(value, *caret);
    value.insert(byte_pos, ch);
    *caret += 1;
}

pub fn backspace(value: &mut String, caret: &mut usize) -> bool {
    if *caret == 0 {
        return false;
    }
    let byte_pos = byte_index_at_char(value, *caret - 1);
    value.remove(byte_pos);
    *caret -= 1;
    true
}

pub fn delete_forward(value: &mut String, caret: &mut usize) -> bool {
    if *caret >= char_count(value) {
        return false;
    }
    let byte_pos = byte_index_at_char(value, *caret);
    value.remove(byte_pos);
    true
}

pub fn delete_word_left(value: &mut String, caret: &mut usize) -> bool {
    let mut chars: Vec<char> = value.chars().collect();
    let pos = (*caret).min(chars.len());

    let mut start = pos;
    while start > 0 && is_separator(chars[start - 1]) {
        start -= 1;
    }
    while start > 0 && !is_separator(chars[start - 1]) {
        start -= 1;
    }
    if start == pos {
        return false;
    }

    chars.drain(start..pos);
    *value = chars.into_iter().collect();
    *caret = start;
    true
}

fn clear_to_start(value: &mut String, caret: &mut usize) -> bool {
    if *caret == 0 {
        return false;
    }
    let byte_pos = byte_index_at_char(value, *caret);
    value.replace_range(..byte_pos, "");
    *caret = 0;
    true
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '.' | '/' | ',' | '-' | '@' | '_' | ':')
}

fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

#[cfg(test)]
mod tests {
    use super::apply_key;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

    fn type_keys(value: &mut String, caret: &mut usize, keys: &[KeyEvent]) {
        for key in keys {
            apply_key(value, caret, *key);
        }
    }

    #[test]
    fn typing_and_backspace_respect_multibyte_chars() {
        let mut value = String::new();
        let mut caret = 0;
        type_keys(
            &mut value,
            &mut caret,
            &[
                KeyEvent::plain(KeyCode::Char('c')),
                KeyEvent::plain(KeyCode::Char('a')),
                KeyEvent::plain(KeyCode::Char('f')),
                KeyEvent::plain(KeyCode::Char('é')),
                KeyEvent::plain(KeyCode::Left),
                KeyEvent::plain(KeyCode::Backspace),
            ],
        );
        assert_eq!(value, "caé");
        assert_eq!(caret, 2);
    }

    #[test]
    fn caret_moves_do_not_report_changes() {
        let mut value = "abc".to_string();
        let mut caret = 3;
        assert!(!apply_key(&mut value, &mut caret, KeyEvent::plain(KeyCode::Home)));
        assert_eq!(caret, 0);
        assert!(apply_key(&mut value, &mut caret, KeyEvent::plain(KeyCode::Delete)));
        assert_eq!(value, "bc");
    }

    #[test]
    fn ctrl_shortcuts_delete_words_and_prefix() {
        let mut value = "new york city".to_string();
        let mut caret = 13;
        let ctrl_w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert!(apply_key(&mut value, &mut caret, ctrl_w));
        assert_eq!(value, "new york ");

        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(apply_key(&mut value, &mut caret, ctrl_u));
        assert_eq!(value, "");
        assert_eq!(caret, 0);
    }
}
