use flatvec_cli::commands::{demo, growth};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_growth_report_written() {
    let td = tempdir().unwrap();
    let out = td.path().join("growth.json");

    growth::execute(1000, 8192, Some(out.to_str().unwrap())).unwrap();

    let json = fs::read_to_string(&out).unwrap();
    let report: growth::GrowthReport = serde_json::from_str(&json).unwrap();

    assert_eq!(report.pushes, 1000);
    assert_eq!(report.stats.resizes, report.events.len());
    assert!(report.stats.resizes <= report.resize_bound);
    assert_eq!(report.stats.slots_shifted, 0);
    assert_eq!(report.final_capacity, 1092);

    let capacities: Vec<usize> = report.events.iter().map(|e| e.capacity).collect();
    assert_eq!(capacities, vec![3, 12, 39, 120, 363, 1092]);
}

#[test]
fn test_growth_copies_stay_linear() {
    let report = growth::measure(5000, 32 * 1024).unwrap();
    assert!(report.copies_per_push() < 2.0);
}

#[test]
fn test_growth_fails_when_memory_too_small() {
    assert!(growth::execute(100, 64, None).is_err());
}

#[test]
fn test_demo_runs() {
    demo::execute(1024).unwrap();
}
