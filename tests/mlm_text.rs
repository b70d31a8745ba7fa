use std::fs;
use std::path::Path;

use tempfile::tempdir;

use lingprep::mlm::{
    MlmGenerator, MlmSources, write_marc_sentences, write_ner_sentences, write_nli_sentences,
    write_pawsx_sentences, write_pos_sentences, write_record_sentences,
};
use lingprep::{DataLayout, LingualSetting, Record, SentenceLayout, Task, write_records};

fn write_lines(path: &Path, lines: &[&str]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, lines.join("\n") + "\n").unwrap();
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.to_string())
        .collect()
}

#[test]
fn nli_sentences_split_or_join_pairs() {
    let dir = tempdir().unwrap();
    let raw = dir.path().join("xnli.dev.jsonl");
    write_lines(
        &raw,
        &[
            r#"{"language":"en","gold_label":"neutral","sentence1":"first premise","sentence2":"first hypothesis"}"#,
            r#"{"language":"fr","gold_label":"neutral","sentence1":"deuxieme","sentence2":"hypothese"}"#,
        ],
    );

    let separate = dir.path().join("separate.txt");
    write_nli_sentences(&raw, &separate, None, SentenceLayout::Separate).unwrap();
    assert_eq!(
        read_lines(&separate),
        vec!["first premise", "first hypothesis", "deuxieme", "hypothese"]
    );

    let joined = dir.path().join("joined.txt");
    write_nli_sentences(&raw, &joined, None, SentenceLayout::Joined).unwrap();
    assert_eq!(
        read_lines(&joined),
        vec![
            "first premise [SEP] first hypothesis",
            "deuxieme [SEP] hypothese"
        ]
    );

    let english_only = dir.path().join("english.txt");
    write_nli_sentences(
        &raw,
        &english_only,
        Some(&["en".to_string()]),
        SentenceLayout::Separate,
    )
    .unwrap();
    assert_eq!(
        read_lines(&english_only),
        vec!["first premise", "first hypothesis"]
    );
}

#[test]
fn record_files_feed_mlm_text() {
    let dir = tempdir().unwrap();
    let tsv = dir.path().join("nli_train.tsv");
    write_records(
        &tsv,
        &[Record {
            id: "0".into(),
            label: "neutral".into(),
            premise: "p".into(),
            hypothesis: "h".into(),
        }],
    )
    .unwrap();
    let out = dir.path().join("out.txt");
    write_record_sentences(&tsv, &out, SentenceLayout::Separate).unwrap();
    assert_eq!(read_lines(&out), vec!["p", "h"]);
}

#[test]
fn pos_sentences_come_from_conllu_text_metadata() {
    let dir = tempdir().unwrap();
    let root_en = dir.path().join("en/UD_English-EWT");
    write_lines(
        &root_en.join("en_ewt-ud-train.conllu"),
        &[
            "# sent_id = 1",
            "# text = A first sentence.",
            "1\tA\ta\tDET\t_\t_\t2\tdet\t_\t_",
            "",
            "# text = A second sentence.",
        ],
    );
    // Dev files must not contribute sentences.
    write_lines(
        &root_en.join("en_ewt-ud-dev.conllu"),
        &["# text = dev sentence"],
    );
    let root_fr = dir.path().join("fr/UD_French-GSD");
    write_lines(
        &root_fr.join("fr_gsd-ud-train.conllu"),
        &["# text = Une phrase."],
    );

    let out = dir.path().join("pos_train.txt");
    write_pos_sentences(&[root_en, root_fr], &out).unwrap();
    assert_eq!(
        read_lines(&out),
        vec!["A first sentence.", "A second sentence.", "Une phrase."]
    );
}

#[test]
fn pos_generation_fails_without_a_train_file() {
    let dir = tempdir().unwrap();
    let empty_root = dir.path().join("empty");
    fs::create_dir_all(&empty_root).unwrap();
    let out = dir.path().join("pos_train.txt");
    assert!(write_pos_sentences(&[empty_root], &out).is_err());
}

#[test]
fn marc_and_ner_rows_emit_one_line_each() {
    let dir = tempdir().unwrap();
    let marc = dir.path().join("marc_train_tmp.json");
    write_lines(
        &marc,
        &[
            r#"{"review_body":"great product","stars":5}"#,
            r#"{"review_body":"broke quickly","stars":1}"#,
        ],
    );
    let marc_out = dir.path().join("marc_train.txt");
    write_marc_sentences(&marc, &marc_out).unwrap();
    assert_eq!(read_lines(&marc_out), vec!["great product", "broke quickly"]);

    let ner = dir.path().join("ner_train_tmp.json");
    write_lines(&ner, &[r#"{"tokens":["John","lives","in","Oslo"]}"#]);
    let ner_out = dir.path().join("ner_train.txt");
    write_ner_sentences(&ner, &ner_out).unwrap();
    assert_eq!(read_lines(&ner_out), vec!["John lives in Oslo"]);
}

#[test]
fn pawsx_files_concatenate_per_language() {
    let dir = tempdir().unwrap();
    let en = dir.path().join("en/pawsx_train_tmp.json");
    write_lines(&en, &[r#"{"sentence1":"a","sentence2":"b"}"#]);
    let fr = dir.path().join("fr/pawsx_train_tmp.json");
    write_lines(&fr, &[r#"{"sentence1":"c","sentence2":"d"}"#]);

    let out = dir.path().join("pawsx_train.txt");
    write_pawsx_sentences(&[en, fr], &out, SentenceLayout::Joined).unwrap();
    assert_eq!(read_lines(&out), vec!["a [SEP] b", "c [SEP] d"]);
}

#[test]
fn existing_mlm_outputs_are_skipped() {
    let dir = tempdir().unwrap();
    let raw = dir.path().join("xnli.dev.jsonl");
    write_lines(
        &raw,
        &[r#"{"language":"en","gold_label":"neutral","sentence1":"a","sentence2":"b"}"#],
    );
    let out = dir.path().join("out.txt");
    fs::write(&out, "sentinel\n").unwrap();
    write_nli_sentences(&raw, &out, None, SentenceLayout::Separate).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "sentinel\n");
}

#[test]
fn generator_writes_to_the_canonical_layout_path() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("experiments");
    let raw = root.join("NLI/data_raw/xnli.dev.jsonl");
    write_lines(
        &raw,
        &[
            r#"{"language":"en","gold_label":"neutral","sentence1":"english premise","sentence2":"english hypothesis"}"#,
            r#"{"language":"de","gold_label":"neutral","sentence1":"deutsch","sentence2":"satz"}"#,
        ],
    );
    let layout = DataLayout::new(&root);
    let sources = MlmSources {
        xnli_dev: raw,
        pos_treebank_roots: Vec::new(),
        pawsx_train_json: Vec::new(),
        marc_train_json: root.join("MARC/multi/marc_train_tmp.json"),
        ner_train_json: root.join("NER/multi/ner_train_tmp.json"),
    };
    let generator = MlmGenerator::new(layout.clone(), sources);

    let out = generator
        .generate(Task::Nli, LingualSetting::Cross, SentenceLayout::Separate)
        .unwrap();
    assert_eq!(out, layout.mlm_output(Task::Nli, LingualSetting::Cross));
    // Cross setting keeps English rows only.
    assert_eq!(
        read_lines(&out),
        vec!["english premise", "english hypothesis"]
    );
}
