use oblivion::command::{self, CommandError};
use oblivion::OrderedList;

fn run_script(script: &str) -> Result<String, CommandError> {
    let mut list = OrderedList::new();
    let mut out = Vec::new();
    command::run(&mut list, script.as_bytes(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_full_session() {
    let script = "\
INC 1
INC 0
INC 2
INC 20
INC 5
INC 3
INC 4
INC 40
INC 6
IMP
REM 4
REM 1
REM 5
IMP
SUC 3
SUC 40
SUC -5
EXT
";
    let out = run_script(script).unwrap();
    assert_eq!(out, "0 1 2 3 4 5 6 20 40\n0 2 3 6 20 40\n6\n0\n");
}

#[test]
fn test_stops_at_ext() {
    let out = run_script("INC 1\nEXT\nIMP\n").unwrap();
    assert_eq!(out, "");
}

#[test]
fn test_empty_listing_prints_blank_line() {
    let out = run_script("IMP\nSUC 1\n").unwrap();
    assert_eq!(out, "\n");
}

#[test]
fn test_unknown_opcodes_and_blank_lines_are_skipped() {
    let out = run_script("\nNOP 3\nINC 7\n\nIMP").unwrap();
    assert_eq!(out, "7\n");
}

#[test]
fn test_remove_absent_is_silent() {
    let out = run_script("INC 2\nREM 9\nIMP\n").unwrap();
    assert_eq!(out, "2\n");
}

#[test]
fn test_bad_operand_reports_line() {
    let err = run_script("INC 1\nINC x\n").unwrap_err();
    assert!(matches!(err, CommandError::InvalidOperand { line: 2, .. }));
    assert_eq!(err.to_string(), "line 2: invalid integer operand \"x\"");

    let err = run_script("REM\n").unwrap_err();
    assert!(matches!(err, CommandError::MissingOperand { line: 1, .. }));
}
