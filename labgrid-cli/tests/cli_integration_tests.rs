//! Integration tests for the labgrid CLI
//!
//! Tests command-line interface functionality including:
//! - Argument parsing and validation
//! - JSON output to stdout and to files
//! - Error reporting and exit codes

use anyhow::Result;
use labgrid::{Glyph, GlyphDocument, PageGlyphs};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Test helper to get the CLI binary path
fn get_cli_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    if path.ends_with("deps") {
        path.pop(); // Remove "deps" directory
    }
    path.push("labgrid");
    #[cfg(windows)]
    path.set_extension("exe");
    path
}

/// Test helper to create a temporary directory
fn setup_temp_dir() -> TempDir {
    tempdir().expect("Failed to create temp directory")
}

/// Test helper to run CLI command and return output
fn run_cli_command(args: &[&str]) -> Result<std::process::Output> {
    let output = Command::new(get_cli_path()).args(args).output()?;
    Ok(output)
}

/// Lay out `text` glyph by glyph, 5 units per character
fn push_text(page: &mut PageGlyphs, text: &str, x0: f64, top: f64, size: f64) {
    for (i, ch) in text.chars().enumerate() {
        if ch == ' ' {
            continue;
        }
        let x = x0 + 5.0 * i as f64;
        page.glyphs.push(Glyph::new(
            ch.to_string(),
            x,
            x + 5.0,
            top,
            top + size,
            size,
            "Helvetica",
        ));
    }
}

/// A report page with Dairy (two items) and Eggs (one item)
fn report_page() -> PageGlyphs {
    let mut page = PageGlyphs::new(612.0, 792.0);
    push_text(&mut page, "Dairy", 50.0, 100.0, 12.0);
    push_text(&mut page, "Eggs", 350.0, 100.0, 12.0);
    push_text(&mut page, "72", 20.0, 130.0, 10.0);
    push_text(&mut page, "Milk", 40.0, 130.0, 10.0);
    push_text(&mut page, "91", 320.0, 130.0, 10.0);
    push_text(&mut page, "Egg White", 340.0, 130.0, 10.0);
    push_text(&mut page, "45", 20.0, 170.0, 10.0);
    push_text(&mut page, "Cheese", 40.0, 170.0, 10.0);
    page
}

/// A page with headers but no scores, so no header validates
fn cover_page() -> PageGlyphs {
    let mut page = PageGlyphs::new(612.0, 792.0);
    push_text(&mut page, "Dairy", 50.0, 100.0, 12.0);
    push_text(&mut page, "Food Sensitivity Report", 50.0, 400.0, 12.0);
    page
}

fn write_document(dir: &Path, name: &str, pages: Vec<PageGlyphs>) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string(&GlyphDocument::new(pages)).expect("serialize glyphs");
    fs::write(&path, json).expect("Failed to write glyph dump");
    path
}

#[test]
fn test_cli_prints_json_to_stdout() {
    let temp_dir = setup_temp_dir();
    let input = write_document(temp_dir.path(), "report.json", vec![report_page()]);

    let output = run_cli_command(&[input.to_str().unwrap()]).expect("CLI should run");
    assert!(output.status.success(), "Command should succeed");

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let page = &json["pages"][0];
    assert_eq!(page["page"], 1);
    assert_eq!(page["section"], "Foods");
    assert_eq!(page["categories"][0]["name"], "Dairy");
    assert_eq!(page["categories"][0]["items"][0]["name"], "Milk");
    assert_eq!(page["categories"][0]["items"][0]["score"], 72);
    assert_eq!(page["categories"][0]["items"][0]["severity"], "medium");
    assert_eq!(page["categories"][0]["items"][1]["name"], "Cheese");
    assert_eq!(page["categories"][1]["name"], "Eggs");
    assert_eq!(page["categories"][1]["items"][0]["name"], "Egg White");
    assert_eq!(page["categories"][1]["items"][0]["severity"], "high");
}

#[test]
fn test_cli_writes_output_file() {
    let temp_dir = setup_temp_dir();
    let input = write_document(temp_dir.path(), "report.json", vec![report_page()]);
    let output_path = temp_dir.path().join("parsed.json");

    let output = run_cli_command(&[
        input.to_str().unwrap(),
        "-o",
        output_path.to_str().unwrap(),
    ])
    .expect("CLI should run");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Wrote "), "Should report the written file");

    let content = fs::read_to_string(&output_path).expect("Output file should exist");
    let json: Value = serde_json::from_str(&content).expect("Output should be JSON");
    assert_eq!(json["pages"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_cli_page_range() {
    let temp_dir = setup_temp_dir();
    let input = write_document(
        temp_dir.path(),
        "report.json",
        vec![cover_page(), report_page(), report_page()],
    );

    let output = run_cli_command(&[input.to_str().unwrap(), "--start", "3", "--end", "3"])
        .expect("CLI should run");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let pages = json["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0]["page"], 3);
}

#[test]
fn test_cli_order_flag() {
    let temp_dir = setup_temp_dir();
    let input = write_document(temp_dir.path(), "report.json", vec![report_page()]);

    let output = run_cli_command(&[input.to_str().unwrap(), "--order", "row"]).unwrap();
    assert!(output.status.success());

    let output = run_cli_command(&[input.to_str().unwrap(), "--order", "diagonal"]).unwrap();
    assert!(!output.status.success(), "Unknown order mode should fail");
}

#[test]
fn test_cli_missing_required_header() {
    let temp_dir = setup_temp_dir();
    let mut page = PageGlyphs::new(612.0, 792.0);
    push_text(&mut page, "Fruits", 50.0, 100.0, 12.0);
    push_text(&mut page, "66", 20.0, 130.0, 10.0);
    push_text(&mut page, "Apple", 40.0, 130.0, 10.0);
    let input = write_document(temp_dir.path(), "fruits.json", vec![page]);

    let output = run_cli_command(&[input.to_str().unwrap()]).unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: Food PDF validation failed: missing expected categories Dairy, Eggs."),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_cli_no_categories() {
    let temp_dir = setup_temp_dir();
    let input = write_document(temp_dir.path(), "cover.json", vec![cover_page()]);

    let output = run_cli_command(&[input.to_str().unwrap()]).unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unable to locate any food report categories"));
}

#[test]
fn test_cli_invalid_page_range() {
    let temp_dir = setup_temp_dir();
    let input = write_document(temp_dir.path(), "report.json", vec![report_page()]);

    let output = run_cli_command(&[input.to_str().unwrap(), "--start", "0"]).unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid option"));
}

#[test]
fn test_cli_nonexistent_input() {
    let temp_dir = setup_temp_dir();
    let missing = temp_dir.path().join("missing.json");

    let output = run_cli_command(&[missing.to_str().unwrap()]).unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read glyph dump"));
}

#[test]
fn test_cli_malformed_input() {
    let temp_dir = setup_temp_dir();
    let input = temp_dir.path().join("broken.json");
    fs::write(&input, "{ not json").unwrap();

    let output = run_cli_command(&[input.to_str().unwrap()]).unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid glyph input"));
}

#[test]
fn test_cli_help() {
    let output = run_cli_command(&["--help"]).unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--order"));
    assert!(stdout.contains("--start"));
}
