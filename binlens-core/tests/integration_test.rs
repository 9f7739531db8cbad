use binlens_common::{BinMode, BinningConfig, InputConfig};
use binlens_core::{
    analyze, compute, export_csv, export_json, load_values, render_report, summarize, BinLensError,
    BinSpec, SampleSet, ScaleTransform,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn samples(v: &[f64]) -> SampleSet {
    SampleSet::new(v.to_vec()).unwrap()
}

fn write_fixture(lines: &[&str]) -> NamedTempFile {
    let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    for l in lines {
        writeln!(tmp, "{l}").unwrap();
    }
    tmp
}

#[test]
fn fixed_width_example() {
    let h = compute(&samples(&[10.0, 20.0, 30.0, 1005.0]), &BinSpec::fixed_width(50.0).unwrap())
        .unwrap();
    assert_eq!(h.len(), 20);
    assert_eq!(&h.edges()[..3], &[10.0, 60.0, 110.0]);
    assert_eq!(h.bins()[0].count, 3);
    assert_eq!(h.bins()[19].count, 1);
    assert_eq!(h.total(), 4);
}

#[test]
fn fixed_count_example() {
    let h = compute(&samples(&[1.0, 2.0, 3.0, 4.0, 5.0]), &BinSpec::fixed_count(2).unwrap()).unwrap();
    assert_eq!(h.edges(), vec![1.0, 3.0, 5.0]);
    assert_eq!(h.counts(), vec![2, 3]);
    let s = summarize(&h, 1).unwrap();
    assert_eq!(s.dominant_bin_index, 1);
    assert!((s.dominant_percentage - 60.0).abs() < 1e-12);
}

#[test]
fn degenerate_example() {
    for spec in [BinSpec::fixed_width(3.0).unwrap(), BinSpec::fixed_count(4).unwrap()] {
        let h = compute(&samples(&[7.0, 7.0, 7.0]), &spec).unwrap();
        assert_eq!(h.len(), 1);
        assert_eq!((h.bins()[0].lower, h.bins()[0].upper, h.bins()[0].count), (7.0, 7.0, 3));
        let s = summarize(&h, 3).unwrap();
        assert_eq!(s.dominant_bin_index, 0);
        assert_eq!(s.dominant_percentage, 100.0);
    }
}

#[test]
fn invalid_config_example() {
    assert!(matches!(BinSpec::fixed_width(0.0), Err(BinLensError::InvalidConfig(_))));
    assert!(matches!(BinSpec::fixed_count(0), Err(BinLensError::InvalidConfig(_))));
}

#[test]
fn empty_dataset_example() {
    for mode in [BinMode::FixedWidth, BinMode::FixedCount] {
        let cfg = BinningConfig { mode, ..BinningConfig::default() };
        assert!(matches!(analyze(vec![], &cfg), Err(BinLensError::EmptyDataset(_))));
    }
}

#[test]
fn file_to_report_and_exports() {
    let tmp = write_fixture(&["1", "2", "", "3", "oops", "4", "5"]);
    let loaded = load_values(tmp.path(), &InputConfig::default()).unwrap();
    assert_eq!(loaded.values.len(), 5);
    assert_eq!(loaded.dropped, 1);

    let cfg = BinningConfig { count: 2, top_k: 2, ..BinningConfig::default() };
    let analysis = analyze(loaded.values, &cfg).unwrap();
    let report = render_report(&analysis, 4, ScaleTransform::Logarithmic);
    assert!(report.contains("Data range: 1 to 5"));
    assert!(report.contains("Total data points: 5"));
    assert!(report.contains("Most values are in bin 2: 3 to 5"));
    assert!(report.contains("This bin contains 3 values (60.0% of all data)"));
    assert!(report.contains("1. Bin 2: 3 values"));
    assert!(report.contains("2. Bin 1: 2 values"));

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("hist.json");
    export_json(&json_path, &analysis).unwrap();
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(doc["summary"]["dominant_bin_index"], 1);
    assert_eq!(doc["spec"]["mode"], "fixed-count");
    assert_eq!(doc["histogram"]["bins"][0]["count"], 2);

    let csv_path = dir.path().join("hist.csv");
    export_csv(&csv_path, &analysis.histogram).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines, vec!["bin,lower,upper,count", "0,1,3,2", "1,3,5,3"]);
}

#[test]
fn log_report_marks_empty_bins() {
    let cfg = BinningConfig { mode: BinMode::FixedWidth, width: 1.0, ..BinningConfig::default() };
    let analysis = analyze(vec![0.0, 0.5, 3.0], &cfg).unwrap();
    assert_eq!(analysis.histogram.counts(), vec![2, 0, 1]);
    let report = render_report(&analysis, 4, ScaleTransform::Logarithmic);
    let table: Vec<&str> = report.lines().skip_while(|l| !l.starts_with("Bins")).skip(1).collect();
    assert_eq!(table.len(), 3);
    assert!(table[1].trim_end().ends_with('-'));
    assert!(table[2].contains("[2, 3]"));
}
