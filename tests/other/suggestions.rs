//! Companion package suggestions and the shared selection syntax.

use pk::logic::{SelectionError, SuggestionOutcome, offer_suggestions, parse_selection, suggest};
use pk::prompt::ScriptedConsole;

#[test]
/// What: Known packages have suggestions, unknown ones do not
///
/// Inputs:
/// - "vim", "python", "unknown-pkg".
///
/// Output:
/// - Two suggestions each for the known names; empty otherwise.
fn suggestions_static_table() {
    assert_eq!(suggest("vim"), vec!["vim-plugin", "vim-airline"]);
    assert_eq!(suggest("python").len(), 2);
    assert!(suggest("unknown-pkg").is_empty());
}

#[test]
/// What: Picking suggestions with commas, spaces and repeats
///
/// Inputs:
/// - "2,1 2" for python.
///
/// Output:
/// - virtualenv then pip, each once.
fn suggestions_selection_order() {
    let mut c = ScriptedConsole::new(["2,1 2"]);
    assert_eq!(
        offer_suggestions("python", &mut c),
        SuggestionOutcome::Selected(vec!["python-virtualenv".into(), "python-pip".into()])
    );
    assert!(c.saw("Suggested additional packages for python:"));
    assert!(c.saw("2. python-virtualenv"));
}

#[test]
/// What: Malformed picks install nothing
///
/// Inputs:
/// - "abc" for vim.
///
/// Output:
/// - `Invalid(NotANumber)` and an error line.
fn suggestions_malformed_selection() {
    let mut c = ScriptedConsole::new(["abc"]);
    let outcome = offer_suggestions("vim", &mut c);
    assert!(matches!(
        outcome,
        SuggestionOutcome::Invalid(SelectionError::NotANumber(_))
    ));
    assert!(c.saw("Error suggesting packages"));
}

#[test]
/// What: Selection parsing rules shared by search and suggestions
///
/// Inputs:
/// - "1 2 3", "3,1", "", "0", "4", "x".
///
/// Output:
/// - Zero-based indices; empty skip; range and number errors.
fn selection_rules() {
    assert_eq!(parse_selection("1 2 3", 3), Ok(vec![0, 1, 2]));
    assert_eq!(parse_selection("3,1", 3), Ok(vec![2, 0]));
    assert_eq!(parse_selection("   ", 3), Ok(vec![]));
    assert!(matches!(
        parse_selection("0", 3),
        Err(SelectionError::OutOfRange { .. })
    ));
    assert!(matches!(
        parse_selection("4", 3),
        Err(SelectionError::OutOfRange { index: 4, len: 3 })
    ));
    assert!(matches!(
        parse_selection("x", 3),
        Err(SelectionError::NotANumber(_))
    ));
}
