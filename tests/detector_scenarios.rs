//! End-to-end scenarios for the fake news detection facade.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use veritas::detector::{DetectorConfig, FakeNewsDetector, Label};
use veritas::error::VeritasError;

/// Write a labeled CSV corpus and return its path.
fn write_corpus(dir: &TempDir, name: &str, rows: &[(String, u8)]) -> PathBuf {
    let mut contents = String::from("text,label\n");
    for (text, label) in rows {
        contents.push_str(&format!("{text},{label}\n"));
    }
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// 50 fake documents around "miracle", 50 real documents around
/// "research", with no vocabulary overlap between the classes.
fn separable_corpus(dir: &TempDir) -> PathBuf {
    let mut rows = Vec::new();
    for i in 0..50 {
        rows.push((format!("miracle secret exposed claim{i}"), 1));
        rows.push((format!("research journal peer study{i}"), 0));
    }
    write_corpus(dir, "separable.csv", &rows)
}

fn detector_in(dir: &TempDir) -> FakeNewsDetector {
    let config = DetectorConfig {
        model_path: dir.path().join("model.json"),
        ..DetectorConfig::default()
    };
    FakeNewsDetector::new(config)
}

#[test]
fn separability_scenario() {
    let dir = TempDir::new().unwrap();
    let detector = detector_in(&dir);

    let accuracy = detector.train(separable_corpus(&dir)).unwrap();
    assert!(
        accuracy > 0.95,
        "expected held-out accuracy above 0.95, got {accuracy}"
    );

    let prediction = detector.predict("miracle cure revealed").unwrap();
    assert_eq!(prediction.label, Label::Fake);
    assert!(prediction.probability > 0.5);

    let prediction = detector.predict("peer reviewed research journal").unwrap();
    assert_eq!(prediction.label, Label::Real);
    assert!(prediction.probability < 0.5);
}

#[test]
fn save_load_round_trip_is_bit_exact() {
    let dir = TempDir::new().unwrap();
    let detector = detector_in(&dir);
    detector.train(separable_corpus(&dir)).unwrap();
    detector.save_model().unwrap();

    let samples = [
        "miracle cure revealed",
        "research study published",
        "miracle research mixed signals",
        "entirely novel wording",
    ];
    let before: Vec<f64> = samples
        .iter()
        .map(|text| detector.predict(text).unwrap().probability)
        .collect();

    let reloaded = detector_in(&dir);
    reloaded.load_model().unwrap();
    assert!(reloaded.is_trained());

    for (text, expected) in samples.iter().zip(before) {
        let probability = reloaded.predict(text).unwrap().probability;
        assert_eq!(
            probability, expected,
            "probability drifted across save/load for {text:?}"
        );
    }
}

#[test]
fn malformed_artifacts_are_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("model.json");

    let malformed = [
        // Vocabulary index out of range for the weight vectors.
        r#"{"vocabulary":{"miracle":3},"idf":[1.0],"weights":[1.0],"bias":0.0,"threshold":0.5,"format_version":1}"#,
        // Two terms mapped to the same index.
        r#"{"vocabulary":{"miracle":0,"research":0},"idf":[1.0,1.0],"weights":[1.0,-1.0],"bias":0.0,"threshold":0.5,"format_version":1}"#,
        // Weight vector shorter than the vocabulary.
        r#"{"vocabulary":{"miracle":0,"research":1},"idf":[1.0,1.0],"weights":[1.0],"bias":0.0,"threshold":0.5,"format_version":1}"#,
    ];

    for artifact in malformed {
        fs::write(&model_path, artifact).unwrap();
        let detector = detector_in(&dir);

        match detector.load_model() {
            Err(VeritasError::Serialization(_)) => {}
            other => panic!("Expected Serialization error for {artifact}, got {other:?}"),
        }

        // The rejected artifact must not have been installed.
        assert!(!detector.is_trained());
        assert!(matches!(
            detector.predict("miracle cure"),
            Err(VeritasError::ModelNotTrained(_))
        ));
    }
}

#[test]
fn prediction_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let detector = detector_in(&dir);
    detector.train(separable_corpus(&dir)).unwrap();

    let first = detector.predict("miracle cure revealed").unwrap();
    let second = detector.predict("miracle cure revealed").unwrap();
    assert_eq!(first.probability, second.probability);
    assert_eq!(first.label, second.label);
}

#[test]
fn unseen_terms_fall_back_to_bias() {
    let dir = TempDir::new().unwrap();
    let detector = detector_in(&dir);
    detector.train(separable_corpus(&dir)).unwrap();

    // Tokens entirely absent from the training vocabulary: the feature
    // vector is zero and the score is governed solely by the bias term,
    // so any two such texts score identically.
    let a = detector.predict("zyx wvu tsr").unwrap();
    let b = detector.predict("qqq ppp ooo nnn").unwrap();

    assert!((0.0..=1.0).contains(&a.probability));
    assert_eq!(a.probability, b.probability);
}

#[test]
fn degenerate_corpus_leaves_prior_state_intact() {
    let dir = TempDir::new().unwrap();
    let detector = detector_in(&dir);
    detector.train(separable_corpus(&dir)).unwrap();
    let before = detector.predict("miracle cure revealed").unwrap();

    let single_class: Vec<(String, u8)> = (0..5)
        .map(|i| (format!("uniform fake text {i}"), 1))
        .collect();
    let path = write_corpus(&dir, "single_class.csv", &single_class);

    match detector.train(&path) {
        Err(VeritasError::Data(_)) => {}
        other => panic!("Expected Data error, got {other:?}"),
    }

    assert!(detector.is_trained());
    let after = detector.predict("miracle cure revealed").unwrap();
    assert_eq!(before.probability, after.probability);
}

#[test]
fn schema_validation_rejects_missing_label_column() {
    let dir = TempDir::new().unwrap();
    let detector = detector_in(&dir);
    detector.train(separable_corpus(&dir)).unwrap();
    let before = detector.predict("miracle cure revealed").unwrap();

    let path = dir.path().join("broken.csv");
    fs::write(&path, "text\nno labels here\n").unwrap();

    match detector.train(&path) {
        Err(VeritasError::InputValidation(_)) => {}
        other => panic!("Expected InputValidation error, got {other:?}"),
    }

    assert!(detector.is_trained());
    let after = detector.predict("miracle cure revealed").unwrap();
    assert_eq!(before.probability, after.probability);
}

#[test]
fn untrained_detector_rejects_operations() {
    let dir = TempDir::new().unwrap();
    let detector = detector_in(&dir);

    assert!(!detector.is_trained());
    assert!(matches!(
        detector.predict("any statement"),
        Err(VeritasError::ModelNotTrained(_))
    ));
    assert!(matches!(
        detector.save_model(),
        Err(VeritasError::ModelNotTrained(_))
    ));
    assert!(matches!(
        detector.load_model(),
        Err(VeritasError::ModelFileNotFound(_))
    ));
}

#[test]
fn empty_input_is_rejected_in_any_state() {
    let dir = TempDir::new().unwrap();
    let detector = detector_in(&dir);

    assert!(matches!(
        detector.predict(""),
        Err(VeritasError::InputValidation(_))
    ));

    detector.train(separable_corpus(&dir)).unwrap();
    assert!(matches!(
        detector.predict(""),
        Err(VeritasError::InputValidation(_))
    ));
}

#[test]
fn batch_predict_preserves_order() {
    let dir = TempDir::new().unwrap();
    let detector = detector_in(&dir);
    detector.train(separable_corpus(&dir)).unwrap();

    let texts: Vec<String> = (0..20)
        .map(|i| {
            if i % 2 == 0 {
                format!("miracle secret number {i}")
            } else {
                format!("research journal number {i}")
            }
        })
        .collect();

    let results = detector.batch_predict(&texts);
    assert_eq!(results.len(), texts.len());
    for (i, result) in results.iter().enumerate() {
        let prediction = result.as_ref().unwrap();
        let expected = if i % 2 == 0 { Label::Fake } else { Label::Real };
        assert_eq!(prediction.label, expected, "order broken at index {i}");
    }
}
