//! End-to-end tests over a synthetic two-segment survey.

use std::io::Write;

use ndarray::array;
use surveyseg::pipeline::{run, AnalysisConfig};
use surveyseg::report::group_means;
use surveyseg::{silhouette_score, Dataset, Error, KMeans, Standardizer};

/// Six observations on three variables, split into two blobs near
/// (0, 0, 0) and (10, 10, 10).
const TWO_BLOBS: &str = "\
quiet,outgoing,tense
0.0,0.1,0.0
0.1,0.0,0.1
0.0,0.0,0.1
10.0,10.1,10.0
10.1,10.0,10.1
10.0,10.0,10.1
";

fn write_csv(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("ratings.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn two_blobs_split_perfectly_with_high_silhouette() {
    let dataset = Dataset::from_reader(TWO_BLOBS.as_bytes()).unwrap();
    let standardized = Standardizer::new()
        .fit(&dataset)
        .unwrap()
        .transform(dataset.records());

    let model = KMeans::params_with_seed(2, 1)
        .n_runs(25)
        .fit(standardized.view())
        .unwrap();
    let labels = model.predict(standardized.view());

    // rows 0-2 in one cluster, rows 3-5 in the other
    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[0], labels[2]);
    assert_eq!(labels[3], labels[4]);
    assert_eq!(labels[3], labels[5]);
    assert_ne!(labels[0], labels[3]);

    let score = silhouette_score(standardized.view(), &labels.to_vec()).unwrap();
    assert!(score > 0.9, "silhouette was {score}");
}

#[test]
fn full_run_reports_the_expected_segment_means() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, TWO_BLOBS);
    let config = AnalysisConfig {
        input: path,
        variable_clusters: 2,
        sweep: 2..=4,
        ..AnalysisConfig::default()
    };

    let mut buf = Vec::new();
    run(&config, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("Number of observations: 6"));
    assert!(text.contains("Solution for 2 Student Segments"));
    // raw (unstandardized) per-segment means of the `quiet` column
    assert!(text.contains("0.033"));
    assert!(text.contains("10.033"));
}

#[test]
fn segment_means_equal_raw_row_averages() {
    let dataset = Dataset::from_reader(TWO_BLOBS.as_bytes()).unwrap();
    let standardized = Standardizer::new()
        .fit(&dataset)
        .unwrap()
        .transform(dataset.records());
    let labels = KMeans::params_with_seed(2, 1)
        .n_runs(25)
        .fit(standardized.view())
        .unwrap()
        .predict(standardized.view())
        .to_vec();

    let summaries = group_means(dataset.records(), &labels, 2);
    let low = &summaries[labels[0]];
    let high = &summaries[labels[3]];
    assert_eq!(low.size, 3);
    assert_eq!(high.size, 3);
    approx::assert_abs_diff_eq!(
        low.means,
        array![0.1 / 3.0, 0.1 / 3.0, 0.2 / 3.0],
        epsilon = 1e-12
    );
    approx::assert_abs_diff_eq!(
        high.means,
        array![30.1 / 3.0, 30.1 / 3.0, 30.2 / 3.0],
        epsilon = 1e-12
    );
}

#[test]
fn missing_input_file_is_a_file_access_error() {
    let config = AnalysisConfig {
        input: "/nonexistent/ratings.csv".into(),
        ..AnalysisConfig::default()
    };
    let err = run(&config, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::FileAccess { .. }));
}

#[test]
fn ragged_input_file_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "a,b,c\n1,2,3\n4,5\n");
    let config = AnalysisConfig {
        input: path,
        ..AnalysisConfig::default()
    };
    let err = run(&config, &mut Vec::new()).unwrap_err();
    match err {
        Error::Format { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn constant_column_fails_strict_but_passes_lenient() {
    let contents = "\
quiet,steady,tense
0.0,5,0.1
0.1,5,0.0
0.0,5,0.2
9.9,5,10.0
10.0,5,10.1
10.1,5,9.9
";
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, contents);

    let strict = AnalysisConfig {
        input: path.clone(),
        variable_clusters: 2,
        sweep: 2..=3,
        ..AnalysisConfig::default()
    };
    let err = run(&strict, &mut Vec::new()).unwrap_err();
    match err {
        Error::DegenerateColumn(name) => assert_eq!(name, "steady"),
        other => panic!("unexpected error: {other}"),
    }

    let lenient = AnalysisConfig {
        lenient_scaling: true,
        ..strict
    };
    run(&lenient, &mut Vec::new()).unwrap();
}
