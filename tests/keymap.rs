//! Chord parsing and resolution tests

use docbus::keymap::{
    parse_chord, parse_chord_for, ChordError, DocAction, KeyCode, KeyMapper, Modifier, Modifiers,
    Platform,
};

fn linux() -> KeyMapper<DocAction> {
    KeyMapper::for_platform(Platform::Linux)
}

// ========================================================================
// Parsing
// ========================================================================

#[test]
fn test_parse_ctrl_shift_letter() {
    let chord = parse_chord_for("ctrl-shift-s", Platform::Linux).unwrap();
    assert!(chord.mods.ctrl());
    assert!(chord.mods.shift());
    assert!(!chord.mods.alt());
    assert!(!chord.mods.meta());
    assert_eq!(chord.key, KeyCode::Char('s'));
}

#[test]
fn test_parse_rejects_duplicate_modifier() {
    assert_eq!(
        parse_chord_for("ctrl-ctrl-s", Platform::Linux),
        Err(ChordError::DuplicateModifier(Modifier::Ctrl))
    );
}

#[test]
fn test_parse_symbolic_key() {
    let chord = parse_chord("left").unwrap();
    assert_eq!(chord.key, KeyCode::Left);
    assert!(!chord.key.is_char());
    assert!(chord.mods.is_empty());
}

#[test]
fn test_parse_empty_is_invalid() {
    assert_eq!(parse_chord(""), Err(ChordError::Empty));
    assert_eq!(parse_chord("   "), Err(ChordError::Empty));
}

#[test]
fn test_symbolic_and_character_keys_do_not_collide() {
    let mut mapper = linux();
    assert!(mapper.add_keys("Home", DocAction::MoveHome).is_empty());
    assert!(mapper.add_keys("H", DocAction::MoveLeft).is_empty());

    assert_eq!(mapper.resolve(KeyCode::Home, Modifiers::NONE), Some(DocAction::MoveHome));
    assert_eq!(mapper.resolve(KeyCode::Char('h'), Modifiers::NONE), Some(DocAction::MoveLeft));
}

#[test]
fn test_macos_modifier_vocabulary() {
    let cmd = parse_chord_for("Cmd-Left", Platform::MacOs).unwrap();
    assert_eq!(cmd.mods, Modifiers::CTRL);

    let ctrl = parse_chord_for("Ctrl-A", Platform::MacOs).unwrap();
    assert_eq!(ctrl.mods, Modifiers::META);

    assert!(parse_chord_for("Cmd-Left", Platform::Linux).is_err());
}

// ========================================================================
// Resolution
// ========================================================================

#[test]
fn test_ctrl_shift_binding_beats_ctrl_binding() {
    let mut mapper = linux();
    mapper.add_keys("ctrl-s", DocAction::MoveEnd);
    mapper.add_keys("ctrl-shift-s", DocAction::MoveHome);

    assert_eq!(
        mapper.resolve(KeyCode::Char('s'), Modifiers::CTRL | Modifiers::SHIFT),
        Some(DocAction::MoveHome)
    );
    assert_eq!(
        mapper.resolve(KeyCode::Char('s'), Modifiers::CTRL),
        Some(DocAction::MoveEnd)
    );
}

#[test]
fn test_unmatched_modifiers_fall_back_to_plain() {
    let mut mapper = linux();
    mapper.add_keys("Delete", DocAction::DeleteForward);

    assert_eq!(
        mapper.resolve(KeyCode::Delete, Modifiers::ALT | Modifiers::SHIFT),
        Some(DocAction::DeleteForward)
    );
    assert_eq!(mapper.resolve(KeyCode::End, Modifiers::NONE), None);
}

#[test]
fn test_meta_tried_before_ctrl() {
    let mut mapper = linux();
    mapper.add_keys("Ctrl-K", DocAction::MoveUp);
    mapper.add_keys("Meta-K", DocAction::MoveDown);

    assert_eq!(
        mapper.resolve(KeyCode::Char('k'), Modifiers::CTRL | Modifiers::META),
        Some(DocAction::MoveDown)
    );
}

#[test]
fn test_uppercase_press_resolves_lowercase_binding() {
    let mut mapper = linux();
    mapper.add_keys("Ctrl-E", DocAction::MoveEnd);
    assert_eq!(
        mapper.resolve(KeyCode::Char('E'), Modifiers::CTRL),
        Some(DocAction::MoveEnd)
    );
}

// ========================================================================
// Batch adds
// ========================================================================

#[test]
fn test_batch_skips_malformed_alternative() {
    let mut mapper = linux();
    let failures = mapper.add_keys("a|ctrl--|b", DocAction::Indent);

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].chord, "ctrl--");
    assert_eq!(mapper.resolve(KeyCode::Char('a'), Modifiers::NONE), Some(DocAction::Indent));
    assert_eq!(mapper.resolve(KeyCode::Char('b'), Modifiers::NONE), Some(DocAction::Indent));
    assert_eq!(mapper.len(), 2);
}

#[test]
fn test_batch_report_text() {
    let mut mapper = linux();
    let report = mapper.add_keys_safe(" x | | Ctrl-Bogus |y", DocAction::Unindent);

    assert_eq!(report, "Invalid key 'Ctrl-Bogus': unknown key 'bogus'\n");
    assert_eq!(mapper.len(), 2);
}

#[test]
fn test_rebinding_keeps_last_action() {
    let mut mapper = linux();
    mapper.add_keys("Ctrl-D", DocAction::DeleteForward);
    mapper.add_keys("ctrl-d", DocAction::DeleteWord);

    assert_eq!(mapper.len(), 1);
    assert_eq!(
        mapper.resolve(KeyCode::Char('d'), Modifiers::CTRL),
        Some(DocAction::DeleteWord)
    );
}

#[test]
fn test_validation_does_not_bind() {
    assert!(KeyMapper::<DocAction>::validate("Ctrl-A|End", Platform::Linux).is_empty());
    assert_eq!(KeyMapper::<DocAction>::validate("Ctrl-|Shift-Shift-A", Platform::Linux).len(), 2);
}
