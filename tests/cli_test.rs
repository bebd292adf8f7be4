use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slidegen"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_generate_presentation_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("slides.json");
    let output_path = temp_dir.path().join("out.pptx");

    let slides = r#"[{"title":"Intro","content":["Point A","Point B"]},{"title":"Summary","content":"All good.","notes":"Wrap up quickly"}]"#;
    fs::write(&input_path, slides).expect("Failed to write input file");

    let output = run_command(&[
        "--title",
        "Q1 Review",
        "--style",
        "Academic",
        "--input",
        input_path.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Creating presentation with 2 slides"));
    assert!(stdout.contains("Presentation saved to"));

    let outline = slidegen::read_outline(&output_path).expect("Failed to read outline");
    assert_eq!(outline.len(), 3);
    assert_eq!(outline[0].title_text(), "Q1 Review");
    assert_eq!(outline[2].notes.as_deref(), Some("Wrap up quickly"));
}

#[test]
fn test_missing_input_exits_with_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("out.pptx");

    let output = run_command(&[
        "--title",
        "Deck",
        "--style",
        "Academic",
        "--input",
        temp_dir.path().join("absent.json").to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error generating presentation"), "stderr: {}", stderr);
    assert!(!output_path.exists());
}

#[test]
fn test_invalid_json_exits_with_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("slides.json");
    let output_path = temp_dir.path().join("out.pptx");
    fs::write(&input_path, "{ not json").expect("Failed to write input file");

    let output = run_command(&[
        "--title",
        "Deck",
        "--style",
        "Academic",
        "--input",
        input_path.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid slide JSON"));
}

#[test]
fn test_unwritable_output_exits_with_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("slides.json");
    fs::write(&input_path, r#"[{"title":"A","content":"b"}]"#).expect("Failed to write input file");
    let output_path = temp_dir.path().join("no").join("such").join("out.pptx");

    let output = run_command(&[
        "--title",
        "Deck",
        "--style",
        "Unknown Style",
        "--input",
        input_path.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to build presentation"));
}

#[test]
fn test_missing_required_flag_is_rejected() {
    let output = run_command(&["--title", "Deck", "--style", "Academic"]);
    assert!(!output.status.success());
}
