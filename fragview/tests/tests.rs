use fragview::*;
use fragcore::{run, Scenario, Strategy};

fn worst_fit_report() -> Report {
    let s = Scenario::build_external(100.0, [20.0, 50.0, 10.0, 20.0]).unwrap();
    let res = run(Strategy::Worst, &s);

    Report::new(&s, Some(&res))
}

#[test]
fn table_has_one_line_per_block() {
    let report = worst_fit_report();
    let text = table::render(&report.partitions);
    let lines: Vec<&str> = text.lines().collect();
    // Header, ruler, four blocks.
    assert_eq!(lines.len(), 6);
    for h in table::HEADERS {
        assert!(lines[0].contains(h), "{h}");
    }
    assert!(lines[1].chars().all(|c| c == '-' || c == '+'));
    assert!(lines[2].starts_with("Block 1 "));
    assert!(lines[4].contains("N/A"));
    assert!(lines[4].contains("Empty"));
    assert!(lines[3].contains("Used"));
}

#[test]
fn cells_follow_report_columns() {
    let report = worst_fit_report();
    // Block 2 (50) hosts process 1 (20).
    assert_eq!(
        table::cells(&report.partitions[1]),
        ["Block 2", "1", "Used", "20", "50", "30"].map(String::from)
    );
    // Block 3 (10) stays empty.
    assert_eq!(
        table::cells(&report.partitions[2]),
        ["Block 3", "N/A", "Empty", "0", "10", "10"].map(String::from)
    );
}

#[test]
fn fractional_sizes_are_rounded_for_display() {
    let s = Scenario::build_internal(100.0, [10.0, 20.0, 30.0]).unwrap();
    run(Strategy::First, &s);
    let report = Report::new(&s, None);
    let cells = table::cells(&report.partitions[0]);
    assert_eq!(cells[4], "33.33");
    assert_eq!(cells[5], "23.33");
    assert_eq!(report.strategy, None);
}

#[test]
fn summary_mentions_waste() {
    let report = worst_fit_report();
    let text = table::summary(&report.stats);
    assert!(text.contains("Internal frag.:\t\t40"));
    assert!(text.contains("External frag.:\t\t10"));
    assert!(text.contains("50.00%"));
}

#[test]
fn three_bars_per_block() {
    let report = worst_fit_report();
    let series = plot::create_series(&report.partitions);
    assert_eq!(
        series.iter().map(|s| s.label).collect::<Vec<_>>(),
        vec!["Space Required", "Block Size", "Unused Space"]
    );
    for s in &series {
        assert_eq!(s.bars.len(), 4);
    }
    // Block 2's bars sit around x = 1, side by side.
    let heights: Vec<f64> = series.iter().map(|s| s.bars[1][0].1).collect();
    assert_eq!(heights, vec![20.0, 50.0, 30.0]);
    let lefts: Vec<f64> = series.iter().map(|s| s.bars[1][0].0).collect();
    assert!(lefts[0] < 1.0 && lefts[2] + plot::BAR_WIDTH > 1.0);
    assert!(lefts.windows(2).all(|w| (w[1] - w[0] - plot::BAR_WIDTH).abs() < 1e-9));
}

#[test]
fn load_saved_report() {
    let report = worst_fit_report();
    let path = std::env::temp_dir().join(format!("fragview_report_{}.json", std::process::id()));
    std::fs::write(&path, report.to_json().unwrap()).unwrap();
    let loaded = load_report(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, report);

    assert!(matches!(load_report(&path), Err(ViewError::Io(_))));
}

#[test]
fn garbage_is_not_a_report() {
    let path = std::env::temp_dir().join(format!("fragview_garbage_{}.json", std::process::id()));
    std::fs::write(&path, "{\"kind\": \"Sideways\"}").unwrap();
    let res = load_report(&path);
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(res, Err(ViewError::Json(_))));
}

fn check_chart(rows: &[PartitionRow], name: &str) {
    let path = std::env::temp_dir().join(format!("{name}_{}.png", std::process::id()));
    match plot::plot_partitions(rows, &path) {
        Ok(())  => {
            let png = std::fs::read(&path).unwrap();
            std::fs::remove_file(&path).unwrap();
            assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
        },
        // Hosts without any system font cannot draw the labels.
        Err(ViewError::Draw(why))   => {
            let _ = std::fs::remove_file(&path);
            assert!(!why.is_empty());
        },
        Err(other)  => panic!("{other:?}"),
    }
}

#[test]
fn chart_is_written_as_png() {
    let report = worst_fit_report();
    check_chart(&report.partitions, "fragview_chart");
}

#[test]
fn chart_of_empty_scenario() {
    let s = Scenario::build_external(0.0, [10.0]).unwrap();
    let report = Report::new(&s, None);
    assert!(report.partitions.is_empty());
    check_chart(&report.partitions, "fragview_empty_chart");
}
