use winit::keyboard::{Key, NamedKey};

use crate::clipboard::CopyTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    ToggleTheme,
    Copy(CopyTarget),
    OpenCv,
    Quit,
}

/// Map a logical key press to a shortcut
pub fn shortcut_for(key: &Key) -> Option<Shortcut> {
    match key {
        Key::Named(NamedKey::Escape) => Some(Shortcut::Quit),
        Key::Character(c) => match c.as_str() {
            "t" => Some(Shortcut::ToggleTheme),
            "e" => Some(Shortcut::Copy(CopyTarget::Email)),
            "p" => Some(Shortcut::Copy(CopyTarget::Phone)),
            "c" => Some(Shortcut::OpenCv),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_toggles_theme() {
        assert_eq!(shortcut_for(&Key::Character("t".into())), Some(Shortcut::ToggleTheme));
        assert_eq!(shortcut_for(&Key::Character("T".into())), None);
    }

    #[test]
    fn copy_keys_select_profile_field() {
        assert_eq!(
            shortcut_for(&Key::Character("e".into())),
            Some(Shortcut::Copy(CopyTarget::Email))
        );
        assert_eq!(
            shortcut_for(&Key::Character("p".into())),
            Some(Shortcut::Copy(CopyTarget::Phone))
        );
    }

    #[test]
    fn c_opens_cv() {
        assert_eq!(shortcut_for(&Key::Character("c".into())), Some(Shortcut::OpenCv));
    }

    #[test]
    fn escape_quits() {
        assert_eq!(shortcut_for(&Key::Named(NamedKey::Escape)), Some(Shortcut::Quit));
        assert_eq!(shortcut_for(&Key::Named(NamedKey::Enter)), None);
    }
}
