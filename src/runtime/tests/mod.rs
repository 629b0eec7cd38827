mod fixture_tests;

use std::fs::File;
use std::io::Write;

use pretty_assertions::assert_eq;

use crate::driver::{Config, Driver};

fn fixture_test(test_name: &str) {
    let full_program_path = format!("./src/runtime/tests/test_programs/{}.glass", test_name);
    let fixture_folder = format!("./src/runtime/tests/fixtures/{}", test_name);

    let output_path_actual = format!("{}/{}.output.actual", fixture_folder, test_name);
    let err_path_actual = format!("{}/{}.error.actual", fixture_folder, test_name);
    let tokens_path_actual = format!("{}/{}.tokens.actual", fixture_folder, test_name);

    let output_path_expected = format!("{}/{}.output.expected", fixture_folder, test_name);
    let err_path_expected = format!("{}/{}.error.expected", fixture_folder, test_name);
    let tokens_path_expected = format!("{}/{}.tokens.expected", fixture_folder, test_name);

    let tokens_arg = format!("--tokens_output={}", tokens_path_actual);
    let config = Config::try_from(vec![
        "glass",
        "-o",
        &output_path_actual,
        &tokens_arg,
        &full_program_path,
    ])
    .unwrap();

    let expected_actual_pairs = vec![
        (   &err_path_actual,    &err_path_expected),
        (&output_path_actual, &output_path_expected),
        (&tokens_path_actual, &tokens_path_expected),
    ];

    std::fs::create_dir_all(&fixture_folder).unwrap();

    for (actual_path, _) in expected_actual_pairs.iter() {
        let _ = std::fs::remove_file(actual_path);
    }

    let mut file = File::create(&err_path_actual).unwrap();
    if let Err(err) = Driver::new(config).run() {
        file.write_all(err.render().as_bytes()).unwrap();
    }

    if std::env::var("OVERWRITE_FIXTURES").is_ok() {
        for (actual_path, expected_path) in expected_actual_pairs.iter() {
            let actual = std::fs::read_to_string(actual_path).unwrap_or_default();

            if let Ok(mut expected_file) = File::create(expected_path) {
                expected_file.write_all(actual.as_bytes()).unwrap();
            }
        }
    }

    for (actual_path, expected_path) in expected_actual_pairs.iter() {
        let actual = std::fs::read_to_string(actual_path).unwrap_or_default();
        let expected = std::fs::read_to_string(expected_path).unwrap_or_default();

        assert_eq!(expected, actual);
        let _ = std::fs::remove_file(actual_path);
    }
}
