//! End-to-end runs of the demo host through its public entry point.

use std::io::Write;

use coachmark::{FinishReason, StepSourceOrigin};
use coachmark_demo::{Cli, run};

fn run_with(cli: Cli) -> (coachmark_demo::RunSummary, String) {
    let mut input: &[u8] = b"";
    let mut out = Vec::new();
    let summary = run(cli, &mut input, &mut out).expect("run");
    (summary, String::from_utf8(out).expect("utf8"))
}

#[test]
fn declared_steps_file_drives_the_session() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"[
            {{"id": "a", "title": "Search", "description": "Find anything.", "targetKey": "search"}},
            {{"id": "b", "title": "Bar", "description": "Bottom bar.", "targetKey": "bottomCard", "buttonText": "Done!"}}
        ]"#
    )
    .expect("write");

    let (summary, text) = run_with(Cli {
        steps: Some(file.path().to_path_buf()),
        ..Cli::default()
    });
    assert_eq!(summary.origin, StepSourceOrigin::Declared);
    assert_eq!(summary.frames, 2);
    assert_eq!(summary.finished, Some(FinishReason::Completed));
    assert!(text.contains("-- step 1/2: Search [Below] --"));
    assert!(text.contains("-- step 2/2: Bar [Above] --"));
    assert!(text.contains("[Done!]"));
}

#[test]
fn malformed_steps_file_uses_fallback() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "[{{\"id\": ").expect("write");

    let (summary, text) = run_with(Cli {
        steps: Some(file.path().to_path_buf()),
        ..Cli::default()
    });
    assert_eq!(summary.origin, StepSourceOrigin::Fallback);
    assert_eq!(summary.frames, 3);
    assert!(text.contains("-- step 1/3: Profile"));
}

#[test]
fn frames_match_requested_grid() {
    let (_, text) = run_with(Cli {
        cols: 20,
        rows: 10,
        script: vec!["d".parse().expect("command")],
        ..Cli::default()
    });
    let frame: Vec<&str> = text.lines().skip(1).take(10).collect();
    assert_eq!(frame.len(), 10);
    assert!(frame.iter().all(|row| row.chars().count() == 20));
    assert!(text.ends_with("walkthrough finished: Dismissed\n"));
}
