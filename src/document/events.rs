//! Change kinds carried by document announcements

use bitflags::bitflags;

bitflags! {
    /// What changed in a document
    ///
    /// Kinds are OR-composed: one announcement may carry several, and
    /// subscribers must accept any combination.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DocEvents: u32 {
        /// Cursor has moved
        const CURSOR_MOVED = 1;
        /// Cursor should be centered in the viewport
        const CENTRALIZE = 1 << 1;
        /// Viewport should page up
        const PAGE_UP = 1 << 2;
        /// Viewport should page down
        const PAGE_DOWN = 1 << 3;
        /// Text has likely changed
        const EDITED = 1 << 4;
        /// Savedness or another state of the file has changed
        const CHANGED_STATE = 1 << 5;
        /// Document has just been opened
        const OPENED = 1 << 6;
        /// Document path has changed
        const CHANGED_PATH = 1 << 7;
        /// Document type (language) has changed
        const CHANGED_TYPE = 1 << 8;
        /// Document has folded or unfolded
        const FOLDED = 1 << 9;
        /// Document is closing
        const CLOSING = 1 << 10;
        /// Document is about to be saved; it can still be edited
        const BEFORE_SAVE = 1 << 11;
        /// Document has been saved
        const AFTER_SAVE = 1 << 12;
        /// Newline was inserted
        const NEWLINE = 1 << 13;
    }
}

bitflags! {
    /// Display style of a document
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DocFlags: u32 {
        const READ_ONLY = 1;
        /// Closing never warns and the title has no modified marker
        const TEMP_DOC = 1 << 1;
        /// Rendered with the shell theme
        const SHELL_THEME = 1 << 2;
        /// Large document, expensive features disabled
        const BIG_DOC = 1 << 3;
    }
}
