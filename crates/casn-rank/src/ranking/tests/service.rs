use super::common::*;
use crate::ranking::{PassStatus, QueryError};

#[test]
fn rank_by_label_resolves_the_jabatan_code() {
    let service = build_service(mixed_records());
    let result = service
        .rank_by_label("ANALIS PERKARA PERADILAN", "JAKARTA", 85.0)
        .expect("finite score")
        .ranked()
        .expect("app JAKARTA cohort");

    assert_eq!(result.jabatan_code, "app");
    assert_eq!(result.jabatan_label, "ANALIS PERKARA PERADILAN");
    assert_eq!(result.rank, 2);
    assert_eq!(result.status, PassStatus::Passed);
}

#[test]
fn unknown_label_is_treated_as_a_code() {
    let service = build_service(mixed_records());
    let result = service
        .rank_by_label("pk", "JAKARTA", 70.5)
        .expect("finite score")
        .ranked()
        .expect("pk JAKARTA cohort");

    assert_eq!(result.jabatan_code, "pk");
    assert_eq!(result.jabatan_label, "PENATA KEPROTOKOLAN");
    assert_eq!(result.rank, 2);
}

#[test]
fn unmatched_cohort_is_reported_not_raised() {
    let service = build_service(mixed_records());
    let outcome = service
        .rank_by_label("DOKUMENTALIS HUKUM", "JAKARTA", 80.0)
        .expect("finite score");
    assert!(outcome.is_empty_cohort());
}

#[test]
fn non_finite_scores_are_rejected() {
    let service = build_service(mixed_records());
    for score in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = service
            .rank_by_label("ANALIS PERKARA PERADILAN", "JAKARTA", score)
            .unwrap_err();
        assert!(matches!(err, QueryError::NonFiniteScore(_)));
    }
}

#[test]
fn reference_lists_provinces_and_labelled_positions() {
    let service = build_service(mixed_records());
    let reference = service.reference();

    assert_eq!(
        reference.provinces,
        ["JAKARTA", "JAWA BARAT", "JAWA TENGAH"]
    );
    let labels: Vec<&str> = reference.jabatan.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["ANALIS PERKARA PERADILAN", "PENATA KEPROTOKOLAN"]);
}

#[test]
fn filter_from_labels_maps_labels_to_codes() {
    let service = build_service(mixed_records());
    let filter = service.filter_from_labels(
        vec!["JAKARTA".to_string()],
        &["PENATA KEPROTOKOLAN", "dh"],
    );
    assert_eq!(filter.provinces, ["JAKARTA"]);
    assert_eq!(filter.jabatan_codes, ["pk", "dh"]);
}

#[test]
fn distribution_respects_the_filter() {
    let service = build_service(mixed_records());
    let filter = service.filter_from_labels(vec!["JAKARTA".to_string()], &["PENATA KEPROTOKOLAN"]);
    let report = service
        .distribution(&filter)
        .report()
        .expect("pk rows in JAKARTA");

    assert_eq!(report.record_count, 2);
    let skd = report.skd.expect("both rows carry SKD");
    assert_eq!(skd.max, 362.0);
    assert_eq!(skd.min, 350.0);
    assert!(report.province_boxplots.is_empty());
    assert!(report.jabatan_comparison.is_empty());
}

#[test]
fn province_detail_outside_filter_is_empty() {
    let service = build_service(mixed_records());
    let filter = service.filter_from_labels(vec!["JAWA BARAT".to_string()], &Vec::<String>::new());
    let detail = service.province_detail(&filter, "JAKARTA", None);
    assert!(detail.report().is_none());
}

#[test]
fn snapshot_counts_the_provider_contents() {
    let service = build_service(mixed_records());
    let snapshot = service.snapshot();
    assert_eq!(snapshot.record_count, 7);
    assert_eq!(snapshot.province_count, 3);
    assert_eq!(snapshot.jabatan_count, 2);
}
