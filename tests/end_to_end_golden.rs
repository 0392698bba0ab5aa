mod common;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use common::init_logging;
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use token_ids::{LimitOptions, SharedTable, TokenId, TokenTable, Tokenizer, TokenizerConfig};

const TRAINING_DATA: &[(&str, &str)] = &[
    ("school", "The teacher writes a formula on the blackboard, while students are studying for their exams."),
    ("school", "All the students are studying hard for the final exams."),
    ("nature", "The fox is running around the trees, while flowers bloom in the field."),
    ("nature", "The dark sky is bringing rain. The fox hides, but the flowers surrender."),
    ("city", "Cars are passing by swiftly, until the traffic lights become red."),
    ("city", "The shopping centre building is over there."),
];

const STOP_WORDS: &[&str] = &[
    "the", "a", "on", "are", "is", "for", "their", "while", "in", "by", "until", "but", "over",
    "there", "all", "around",
];

fn preprocess(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect()
}

/// Presence-only sparse features, the way a linear classifier takes them.
fn features(ids: Vec<TokenId>) -> BTreeMap<u32, u8> {
    let unique: BTreeSet<TokenId> = ids.into_iter().collect();
    unique.into_iter().map(|id| (id.get(), 1)).collect()
}

fn tokenizer() -> Tokenizer {
    Tokenizer::with_config(TokenizerConfig::default().with_stop_words(STOP_WORDS.iter().copied()))
}

#[test]
fn train_freeze_predict_reload() {
    init_logging();
    let dir = tempdir().unwrap();
    let tokens_path = dir.path().join("test.tokens");
    let labels_path = dir.path().join("test.labels");

    // Train.
    let mut labels = TokenTable::new();
    let tokenizer = tokenizer();
    let mut samples = Vec::new();
    for (label, sentence) in TRAINING_DATA {
        let label = labels.get(label).unwrap();
        samples.push((label, features(tokenizer.get(&preprocess(sentence)))));
    }

    assert_eq!(labels.indexes(), vec![TokenId::new(1), TokenId::new(2), TokenId::new(3)]);
    let fox = tokenizer.table().lock().lookup("fox", "").unwrap();
    assert!(samples[2].1.contains_key(&fox.get()));
    assert!(samples[3].1.contains_key(&fox.get()));

    tokenizer.table().lock().save(&tokens_path).unwrap();
    labels.save(&labels_path).unwrap();
    let trained_version = tokenizer.table().lock().version();

    // Predict.
    tokenizer.table().lock().freeze();
    let before = tokenizer.table().lock().len();
    let ids = tokenizer.get(&preprocess("The fox sleeps below the trees."));
    let table = tokenizer.table().lock();
    let words: Vec<&str> = ids.iter().filter_map(|id| table.find(*id)).collect();
    assert_eq!(words, vec!["fox", "trees"]);
    assert_eq!(table.len(), before);
    assert_eq!(table.version(), trained_version);
    drop(table);

    // Reload in a fresh "process".
    let reloaded = SharedTable::new(TokenTable::from_file(&tokens_path).unwrap());
    let labels = TokenTable::from_file(&labels_path).unwrap();
    let predictor = Tokenizer::with_table(
        reloaded.clone(),
        TokenizerConfig::default().with_stop_words(STOP_WORDS.iter().copied()),
    );

    assert_eq!(reloaded.lock().version(), trained_version);
    assert_eq!(predictor.get(&preprocess("The fox sleeps below the trees.")), ids);
    assert_eq!(labels.find(samples[2].0), Some("nature"));
}

#[test]
fn golden_saved_vocabulary() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vocab.tokens");

    let tokenizer = tokenizer();
    for (_, sentence) in TRAINING_DATA {
        tokenizer.get(&preprocess(sentence));
    }
    let mut table = tokenizer.table().lock();
    let left = table.limit(LimitOptions::new().occurrence(2));
    table.save(&path).unwrap();

    assert_eq!(left, 5);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "5 2 students\n6 2 studying\n7 2 exams\n10 2 fox\n13 2 flowers\n"
    );
}
