use itertools::Itertools;
use lazy_regex::regex;
use lox::{Lox, Mode};
use test_suite_proc_macro::generate_tests;

use pretty_assertions::assert_eq;

/// Runs `code` in `mode` and checks it against the expectations in its comments:
///
/// - `// expect: <line>` for each line written to the output
/// - `// Error: <message>` or `// Error at '<lexeme>': <message>` for each diagnostic,
///   reported on the line of the comment
///
/// `code` is raw file content, it doesn't have to be valid UTF-8.
pub fn lox_expect(mode: &str, code: &[u8]) {
    let mode = match mode {
        "tokenize" => Mode::Tokenize,
        "parse" => Mode::Parse,
        "evaluate" => Mode::Evaluate,
        other => panic!("No such mode: {other}"),
    };

    let mut expected_errors = vec![];
    let mut expected_output = vec![];

    let error_regex = regex!(r"// (Error( at '.*')?: .*)");
    let output_regex = regex!(r"// expect: (.*)");

    for (i, line) in String::from_utf8_lossy(code).lines().enumerate() {
        if let Some(cap) = error_regex.captures(line) {
            expected_errors.push(format!("[line {}] {}", i + 1, &cap[1]));
        } else if let Some(cap) = output_regex.captures(line) {
            expected_output.push(cap[1].to_string());
        }
    }

    let mut output = Vec::new();
    let mut errors = Vec::new();
    let result = Lox::new().run_bytes(mode, code, &mut output, &mut errors);

    assert_eq!(
        String::from_utf8(output).unwrap().lines().collect_vec(),
        expected_output,
        "Actual output (left) does not match expected output (right)"
    );
    assert_eq!(
        String::from_utf8(errors).unwrap().lines().collect_vec(),
        expected_errors,
        "Actual errors (left) do not match expected errors (right)"
    );

    match result {
        Ok(()) => assert!(expected_errors.is_empty(), "Expected errors but none occurred"),
        Err(e) => {
            assert!(!expected_errors.is_empty(), "Unexpected failure: {e}");
            assert_eq!(e.exit_code(), 65);
        }
    }
}

generate_tests!();
