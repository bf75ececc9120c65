// End-to-end: load the bundled fixture and chart each ideology

use ideology_trends::{aggregate, load_csv, total, Dashboard, Ideology, YearlyCount};
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/global_leader_ideologies.csv")
}

fn counts(pairs: &[(i32, usize)]) -> Vec<YearlyCount> {
    pairs
        .iter()
        .map(|&(year, count)| YearlyCount { year, count })
        .collect()
}

#[test]
fn test_fixture_counts_per_ideology() {
    let ds = load_csv(&fixture_path()).unwrap();
    assert_eq!(ds.len(), 26);

    assert_eq!(
        aggregate(ds.records(), "leftist"),
        counts(&[(1998, 1), (1999, 2), (2000, 3), (2001, 3)])
    );
    assert_eq!(
        aggregate(ds.records(), "centrist"),
        counts(&[(1998, 2), (1999, 1), (2000, 1), (2001, 1)])
    );
    assert_eq!(
        aggregate(ds.records(), "rightist"),
        counts(&[(1998, 3), (1999, 3), (2000, 2), (2001, 2)])
    );
}

#[test]
fn test_unrecognized_rows_never_charted() {
    let ds = load_csv(&fixture_path()).unwrap();

    let charted: usize = Ideology::ALL
        .iter()
        .map(|i| total(&aggregate(ds.records(), i.as_str())))
        .sum();

    assert_eq!(ds.unrecognized_count(), 2);
    assert_eq!(charted + ds.unrecognized_count(), ds.len());
}

#[test]
fn test_dashboard_over_fixture() {
    let ds = load_csv(&fixture_path()).unwrap();
    let dashboard = Dashboard::new(Arc::new(ds));

    let chart = dashboard.initial_chart();
    assert_eq!(chart.title, "Number of Leftist Governments Over Time");
    assert_eq!(chart.bar.x, vec![1998, 1999, 2000, 2001]);
    assert_eq!(chart.line.y, vec![1, 2, 3, 3]);

    assert!(dashboard.update_chart("none_of_these").is_empty());
}
