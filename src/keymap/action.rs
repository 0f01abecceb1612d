//! Logical document actions that chords resolve to

use std::fmt;
use std::str::FromStr;

/// Keyboard driven actions on a document
///
/// These need nothing beyond the key press that triggered them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocAction {
    MoveDown,
    MoveUp,
    MoveLeft,
    /// Move left by word
    SkipLeft,
    MoveRight,
    /// Move right by word
    SkipRight,
    /// Move down by paragraph
    SkipDown,
    /// Move up by paragraph
    SkipUp,
    MovePageUp,
    MovePageDown,
    /// Start of line
    MoveHome,
    /// End of line
    MoveEnd,
    /// Start of file
    MoveHomeFile,
    /// End of file
    MoveEndFile,
    DeleteForward,
    Indent,
    Unindent,
    /// Delete the word left of the cursor
    DeleteWord,
}

impl DocAction {
    pub const ALL: [DocAction; 18] = [
        DocAction::MoveDown,
        DocAction::MoveUp,
        DocAction::MoveLeft,
        DocAction::SkipLeft,
        DocAction::MoveRight,
        DocAction::SkipRight,
        DocAction::SkipDown,
        DocAction::SkipUp,
        DocAction::MovePageUp,
        DocAction::MovePageDown,
        DocAction::MoveHome,
        DocAction::MoveEnd,
        DocAction::MoveHomeFile,
        DocAction::MoveEndFile,
        DocAction::DeleteForward,
        DocAction::Indent,
        DocAction::Unindent,
        DocAction::DeleteWord,
    ];

    /// Name used in keymap files
    pub fn name(self) -> &'static str {
        match self {
            DocAction::MoveDown => "move_down",
            DocAction::MoveUp => "move_up",
            DocAction::MoveLeft => "move_left",
            DocAction::SkipLeft => "skip_left",
            DocAction::MoveRight => "move_right",
            DocAction::SkipRight => "skip_right",
            DocAction::SkipDown => "skip_down",
            DocAction::SkipUp => "skip_up",
            DocAction::MovePageUp => "move_page_up",
            DocAction::MovePageDown => "move_page_down",
            DocAction::MoveHome => "move_home",
            DocAction::MoveEnd => "move_end",
            DocAction::MoveHomeFile => "move_home_file",
            DocAction::MoveEndFile => "move_end_file",
            DocAction::DeleteForward => "delete_forward",
            DocAction::Indent => "indent",
            DocAction::Unindent => "unindent",
            DocAction::DeleteWord => "delete_word",
        }
    }
}

impl fmt::Display for DocAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DocAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocAction::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for action in DocAction::ALL {
            assert_eq!(action.name().parse::<DocAction>(), Ok(action));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!("MoveHome".parse::<DocAction>(), Err(()));
        assert_eq!("".parse::<DocAction>(), Err(()));
    }
}
