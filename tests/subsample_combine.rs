use std::fs;
use std::path::Path;

use tempfile::tempdir;

use lingprep::{Record, SubsampleCombiner, read_records, write_records};

fn synthetic_records(prefix: &str, count: usize) -> Vec<Record> {
    let labels = ["entailment", "neutral", "contradiction"];
    (0..count)
        .map(|idx| Record {
            id: idx.to_string(),
            label: labels[idx % labels.len()].to_string(),
            premise: format!("{prefix} premise {idx}"),
            hypothesis: format!("{prefix} hypothesis {idx}"),
        })
        .collect()
}

fn write_dataset(path: &Path, records: &[Record]) {
    write_records(path, records).expect("write dataset fixture");
}

#[test]
fn repeated_runs_produce_byte_identical_outputs() {
    let dir = tempdir().unwrap();
    let in_domain = dir.path().join("cross/nli_train.tsv");
    let foreign = dir.path().join("foreign/nli_train.tsv");
    write_dataset(&in_domain, &synthetic_records("in", 25));
    write_dataset(&foreign, &synthetic_records("fr", 40));

    let fractions = [0.2, 0.4, 0.6, 0.8];
    let first = SubsampleCombiner::new(dir.path().join("run_a"))
        .combine(&in_domain, &foreign, &fractions)
        .unwrap();
    let second = SubsampleCombiner::new(dir.path().join("run_b"))
        .combine(&in_domain, &foreign, &fractions)
        .unwrap();

    assert_eq!(first.len(), second.len());
    for (tag, path_a) in &first {
        let path_b = &second[tag];
        let bytes_a = fs::read(path_a).unwrap();
        let bytes_b = fs::read(path_b).unwrap();
        assert_eq!(bytes_a, bytes_b, "fraction {tag} diverged between runs");
    }
}

#[test]
fn subsampled_counts_follow_floor_of_fraction() {
    let dir = tempdir().unwrap();
    let in_domain = dir.path().join("in.tsv");
    let foreign = dir.path().join("foreign.tsv");
    write_dataset(&in_domain, &synthetic_records("in", 10));
    write_dataset(&foreign, &synthetic_records("fr", 1000));

    let outputs = SubsampleCombiner::new(dir.path().join("out"))
        .combine(&in_domain, &foreign, &[0.2, 0.4, 0.6, 0.8])
        .unwrap();

    for (tag, expected_foreign) in [("0.2", 200), ("0.4", 400), ("0.6", 600), ("0.8", 800)] {
        let records = read_records(&outputs[tag]).unwrap();
        assert_eq!(records.len(), expected_foreign + 10);
        let foreign_rows = records
            .iter()
            .filter(|record| record.premise.starts_with("fr "))
            .count();
        assert_eq!(foreign_rows, expected_foreign);
    }
}

#[test]
fn output_size_is_floor_plus_in_domain() {
    let dir = tempdir().unwrap();
    let in_domain = dir.path().join("in.tsv");
    let foreign = dir.path().join("foreign.tsv");
    write_dataset(&in_domain, &synthetic_records("in", 5));
    write_dataset(&foreign, &synthetic_records("fr", 10));

    let outputs = SubsampleCombiner::new(dir.path().join("out"))
        .combine(&in_domain, &foreign, &[0.4])
        .unwrap();
    let records = read_records(&outputs["0.4"]).unwrap();
    assert_eq!(records.len(), 4 + 5);
}

#[test]
fn full_fraction_samples_everything_without_replacement() {
    let dir = tempdir().unwrap();
    let in_domain = dir.path().join("in.tsv");
    let foreign = dir.path().join("foreign.tsv");
    write_dataset(&in_domain, &synthetic_records("in", 3));
    let foreign_rows = synthetic_records("fr", 50);
    write_dataset(&foreign, &foreign_rows);

    let outputs = SubsampleCombiner::new(dir.path().join("out"))
        .combine(&in_domain, &foreign, &[1.0])
        .unwrap();
    let records = read_records(&outputs["1.0"]).unwrap();
    let sampled: Vec<&Record> = records.iter().take(50).collect();

    let mut ids: Vec<&str> = sampled.iter().map(|record| record.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 50, "a foreign row was drawn twice");

    // The draw covers the whole foreign set but in randomized order.
    let drawn_order: Vec<&str> = sampled.iter().map(|record| record.id.as_str()).collect();
    let file_order: Vec<&str> = foreign_rows.iter().map(|record| record.id.as_str()).collect();
    assert_ne!(drawn_order, file_order);
}

#[test]
fn tiny_fractions_yield_in_domain_only() {
    let dir = tempdir().unwrap();
    let in_domain = dir.path().join("in.tsv");
    let foreign = dir.path().join("foreign.tsv");
    write_dataset(&in_domain, &synthetic_records("in", 7));
    write_dataset(&foreign, &synthetic_records("fr", 10));

    let outputs = SubsampleCombiner::new(dir.path().join("out"))
        .combine(&in_domain, &foreign, &[0.05])
        .unwrap();
    let records = read_records(&outputs["0.05"]).unwrap();
    assert_eq!(records.len(), 7);
    assert!(records.iter().all(|record| record.premise.starts_with("in ")));
}

#[test]
fn existing_outputs_are_left_untouched() {
    let dir = tempdir().unwrap();
    let in_domain = dir.path().join("in.tsv");
    let foreign = dir.path().join("foreign.tsv");
    write_dataset(&in_domain, &synthetic_records("in", 5));
    write_dataset(&foreign, &synthetic_records("fr", 20));

    let combiner = SubsampleCombiner::new(dir.path().join("out"));
    let outputs = combiner.combine(&in_domain, &foreign, &[0.5]).unwrap();
    let out_path = outputs["0.5"].clone();

    // Tamper with the generated file; a second run must not regenerate it.
    fs::write(&out_path, "sentinel\n").unwrap();
    let rerun = combiner.combine(&in_domain, &foreign, &[0.5]).unwrap();
    assert_eq!(rerun["0.5"], out_path);
    assert_eq!(fs::read_to_string(&out_path).unwrap(), "sentinel\n");
}

#[test]
fn in_domain_rows_follow_sampled_rows_in_original_order() {
    let dir = tempdir().unwrap();
    let in_domain = dir.path().join("in.tsv");
    let foreign = dir.path().join("foreign.tsv");
    let in_rows = synthetic_records("in", 12);
    write_dataset(&in_domain, &in_rows);
    write_dataset(&foreign, &synthetic_records("fr", 30));

    let outputs = SubsampleCombiner::new(dir.path().join("out"))
        .combine(&in_domain, &foreign, &[0.5])
        .unwrap();
    let records = read_records(&outputs["0.5"]).unwrap();
    assert_eq!(records.len(), 15 + 12);
    let tail = &records[15..];
    assert_eq!(tail, &in_rows[..], "in-domain rows must keep their order");
    assert!(
        records[..15]
            .iter()
            .all(|record| record.premise.starts_with("fr "))
    );
}

#[test]
fn fraction_lists_longer_than_the_historical_seed_list_work() {
    let dir = tempdir().unwrap();
    let in_domain = dir.path().join("in.tsv");
    let foreign = dir.path().join("foreign.tsv");
    write_dataset(&in_domain, &synthetic_records("in", 2));
    write_dataset(&foreign, &synthetic_records("fr", 100));

    let fractions = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7];
    let outputs = SubsampleCombiner::new(dir.path().join("out"))
        .combine(&in_domain, &foreign, &fractions)
        .unwrap();
    assert_eq!(outputs.len(), fractions.len());
    for (idx, p) in fractions.iter().enumerate() {
        let tag = format!("{p}");
        let records = read_records(&outputs[tag.as_str()]).unwrap();
        assert_eq!(records.len(), 10 * (idx + 1) + 2);
    }
}

#[test]
fn missing_inputs_surface_as_errors() {
    let dir = tempdir().unwrap();
    let combiner = SubsampleCombiner::new(dir.path().join("out"));
    let err = combiner.combine(
        &dir.path().join("absent_in.tsv"),
        &dir.path().join("absent_foreign.tsv"),
        &[0.2],
    );
    assert!(err.is_err());
}
