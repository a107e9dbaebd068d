use flatvec_cli::commands::run::{self, Outcome, RunReport, ScriptOp};
use flatvec_core::Address;
use std::fs;
use tempfile::tempdir;

fn write_file(path: &std::path::Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn read_report(path: &std::path::Path) -> RunReport {
    let json = fs::read_to_string(path).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_run_walkthrough_script() {
    let td = tempdir().unwrap();
    let script = td.path().join("ops.json");
    let trace = td.path().join("trace.json");

    write_file(
        &script,
        r#"[
            {"op":"push","value":3},
            {"op":"push","value":5},
            {"op":"push","value":15},
            {"op":"push","value":19},
            {"op":"push","value":45},
            {"op":"push","value":10},
            {"op":"pop"},
            {"op":"pop"},
            {"op":"pop"}
        ]"#,
    );

    run::execute(
        script.to_str().unwrap(),
        1024,
        None,
        Some(trace.to_str().unwrap()),
    )
    .unwrap();

    let records = read_report(&trace).steps;
    assert_eq!(records.len(), 9);

    let capacities: Vec<usize> = records.iter().take(6).map(|r| r.capacity).collect();
    assert_eq!(capacities, vec![3, 3, 3, 12, 12, 12]);

    let popped: Vec<Outcome> = records.iter().skip(6).map(|r| r.outcome.clone()).collect();
    assert_eq!(
        popped,
        vec![
            Outcome::Ok { value: Some(10.0) },
            Outcome::Ok { value: Some(45.0) },
            Outcome::Ok { value: Some(19.0) },
        ]
    );

    let last = records.last().unwrap();
    assert_eq!(last.length, 3);
    assert_eq!(last.capacity, 12);
    assert_eq!(last.address, Some(Address::new(3)));
}

#[test]
fn test_run_insert_remove_script() {
    let td = tempdir().unwrap();
    let script = td.path().join("ops.json");
    let trace = td.path().join("trace.json");

    write_file(
        &script,
        r#"[
            {"op":"push","value":1},
            {"op":"push","value":2},
            {"op":"push","value":3},
            {"op":"insert","index":0,"value":99},
            {"op":"get","index":0},
            {"op":"remove","index":0},
            {"op":"get","index":0}
        ]"#,
    );

    run::execute(
        script.to_str().unwrap(),
        1024,
        None,
        Some(trace.to_str().unwrap()),
    )
    .unwrap();

    let records = read_report(&trace).steps;
    assert_eq!(records[3].length, 4);
    assert_eq!(records[3].capacity, 12);
    assert_eq!(records[4].outcome, Outcome::Ok { value: Some(99.0) });
    assert_eq!(records[5].outcome, Outcome::Ok { value: Some(99.0) });
    assert_eq!(records[6].outcome, Outcome::Ok { value: Some(1.0) });
    assert_eq!(records[6].length, 3);
}

#[test]
fn test_run_reports_index_errors() {
    let td = tempdir().unwrap();
    let script = td.path().join("ops.json");
    let trace = td.path().join("trace.json");

    write_file(
        &script,
        r#"[
            {"op":"pop"},
            {"op":"get","index":0},
            {"op":"push","value":7},
            {"op":"insert","index":1,"value":8},
            {"op":"remove","index":-2}
        ]"#,
    );

    run::execute(
        script.to_str().unwrap(),
        1024,
        None,
        Some(trace.to_str().unwrap()),
    )
    .unwrap();

    let records = read_report(&trace).steps;
    for index in [0, 1, 3, 4] {
        match &records[index].outcome {
            Outcome::Error { kind, .. } => assert_eq!(kind, "index_error"),
            other => panic!("step {} should fail, got {:?}", index, other),
        }
    }
    assert!(records[2].outcome.is_ok());
    assert_eq!(records[4].length, 1);
    assert_eq!(records[4].op, ScriptOp::Remove { index: -2 });
}

#[test]
fn test_run_with_failing_allocator() {
    let td = tempdir().unwrap();
    let script = td.path().join("ops.json");
    let trace = td.path().join("trace.json");

    write_file(
        &script,
        r#"[
            {"op":"push","value":1},
            {"op":"push","value":2},
            {"op":"push","value":3},
            {"op":"push","value":4},
            {"op":"get","index":2}
        ]"#,
    );

    run::execute(
        script.to_str().unwrap(),
        1024,
        Some(1),
        Some(trace.to_str().unwrap()),
    )
    .unwrap();

    let records = read_report(&trace).steps;
    match &records[3].outcome {
        Outcome::Error { kind, message } => {
            assert_eq!(kind, "out_of_memory");
            assert!(message.contains("12 slots"));
        }
        other => panic!("expected out_of_memory, got {:?}", other),
    }
    assert_eq!(records[3].length, 3);
    assert_eq!(records[3].capacity, 3);
    assert_eq!(records[4].outcome, Outcome::Ok { value: Some(3.0) });
}

#[test]
fn test_run_missing_script() {
    let td = tempdir().unwrap();
    let missing = td.path().join("missing.json");

    let err = run::execute(missing.to_str().unwrap(), 1024, None, None).unwrap_err();
    assert!(err.to_string().contains("Failed to read script file"));
}

#[test]
fn test_run_malformed_script() {
    let td = tempdir().unwrap();
    let script = td.path().join("bad.json");
    write_file(&script, r#"{"op":"push"}"#);

    let err = run::execute(script.to_str().unwrap(), 1024, None, None).unwrap_err();
    assert!(err.to_string().contains("Failed to parse JSON script"));
}

#[test]
fn test_run_report_carries_stats() {
    let td = tempdir().unwrap();
    let script = td.path().join("ops.json");
    let trace = td.path().join("trace.json");

    write_file(
        &script,
        r#"[
            {"op":"push","value":1},
            {"op":"push","value":2},
            {"op":"push","value":3},
            {"op":"push","value":4},
            {"op":"remove","index":0},
            {"op":"get","index":9}
        ]"#,
    );

    run::execute(
        script.to_str().unwrap(),
        1024,
        None,
        Some(trace.to_str().unwrap()),
    )
    .unwrap();

    let summary = read_report(&trace).summary;
    assert_eq!(summary.steps, 6);
    assert_eq!(summary.failed_steps, 1);
    assert_eq!(summary.final_elements, vec![2.0, 3.0, 4.0]);
    assert_eq!(summary.stats.resizes, 2);
    assert_eq!(summary.stats.slots_copied, 3);
    assert_eq!(summary.stats.slots_shifted, 3);

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&trace).unwrap()).unwrap();
    assert_eq!(raw["steps"][3]["address"], serde_json::json!(3));
}
