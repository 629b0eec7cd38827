use glass::{Config, Driver, InterpreterError};
use pretty_assertions::assert_eq;
use std::thread;

fn get_test_name() -> String {
    thread::current()
        .name()
        .unwrap()
        .rsplit("::")
        .next()
        .unwrap()
        .to_string()
}

fn output_path(ext: &str) -> String {
    let project_path = std::env!("CARGO_MANIFEST_DIR");
    let dir = format!("{}/target/test_outputs", project_path);

    std::fs::create_dir_all(&dir).unwrap();

    format!("{}/{}.{}", dir, get_test_name(), ext)
}

#[test]
fn test_inline_program_output() {
    let program = r#"{M[m(_o)O!"hi\n"(_o)o.?]}"#;
    let output_file = output_path("out");
    let tokens_file = output_path("tokens");
    let tokens_arg = format!("-t={}", tokens_file);
    let args = vec!["glass", "-o", &output_file, &tokens_arg, "-i", program];
    let config = Config::try_from(args).unwrap();

    Driver::new(config).run().unwrap();

    let output = std::fs::read_to_string(&output_file).expect("Failed to read output file");
    let tokens = std::fs::read_to_string(&tokens_file).expect("Failed to read tokens file");

    assert_eq!(output, "hi\n");
    assert_eq!(tokens, "class M\n  m: (_o)(O)!\"hi\\n\"(_o)(o).?]\n");
}

#[test]
fn test_dry_run_does_not_execute() {
    let output_file = output_path("out");
    let _ = std::fs::remove_file(&output_file);
    let args = vec!["glass", "-d", "-o", &output_file, "-i", "{M[m,]}"];
    let config = Config::try_from(args).unwrap();

    Driver::new(config).run().unwrap();

    assert!(std::fs::metadata(&output_file).is_err());
}

#[test]
fn test_errors_are_reported() {
    let config = Config::try_from(vec!["glass", "-i", "{M[m"]).unwrap();
    let err = Driver::new(config).run().unwrap_err();

    assert!(matches!(err, InterpreterError::LoadError(_)));
    assert_eq!(err.render(), "load error at 1:5: unexpected end of input, expected `]`");

    let output_file = output_path("out");
    let config = Config::try_from(vec!["glass", "-o", &output_file, "-i", "{M[m(_x)*]}"]).unwrap();
    let err = Driver::new(config).run().unwrap_err();

    assert!(matches!(err, InterpreterError::RuntimeError(_)));
    assert_eq!(
        err.render(),
        "runtime error: uninitialized read: `_x` has no value in the current scope"
    );
    assert_eq!(err.diagnostics(), vec!["  at token 1", "  stack: <empty>"]);
}

#[test]
fn test_missing_input() {
    let config = Config::try_from(vec!["glass"]).unwrap();
    let err = Driver::new(config).run().unwrap_err();

    assert!(matches!(err, InterpreterError::NoInput));
}

#[test]
fn test_limits_from_the_command_line() {
    let output_file = output_path("out");
    let args = vec![
        "glass",
        "--max_call_depth",
        "3",
        "-o",
        &output_file,
        "-i",
        "{M[m(_s)$(_s)m.?]}",
    ];
    let config = Config::try_from(args).unwrap();
    let err = Driver::new(config).run().unwrap_err();

    assert_eq!(err.render(), "runtime error: call depth exceeded: calls nested deeper than 3");
}
