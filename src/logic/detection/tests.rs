//! End-to-end tests for the detection pipeline

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use super::types::Category;
use super::{AnalysisError, Detector, Overall, Verdict};
use crate::logic::alert::testing::RecordingNotifier;
use crate::logic::alert::{Dispatcher, Notifier};
use crate::logic::model::testing::{batch, FixedClassifier};
use crate::logic::model::{ClassifierRegistry, PredictionError, Specialist};

fn detector(
    primary: FixedClassifier,
    cascade: Vec<(&str, FixedClassifier)>,
    notifier: Arc<dyn Notifier>,
) -> Detector {
    let cascade = cascade
        .into_iter()
        .map(|(label, c)| Specialist::new(label, Box::new(c)))
        .collect();
    let registry = ClassifierRegistry::new(Box::new(primary), cascade).unwrap();
    let dispatcher = Dispatcher::new(Handle::current(), vec![notifier], Duration::from_secs(1));

    Detector::new(Arc::new(registry), dispatcher)
}

fn flows(rows: usize) -> String {
    let mut csv = String::from("Flow Duration,Total Fwd Packets\n");
    for i in 0..rows {
        csv.push_str(&format!("{},{}\n", i * 100, i));
    }
    csv
}

fn gate_scores(benign: usize, malicious: usize) -> FixedClassifier {
    let mut scores = vec![0.1; benign];
    scores.extend(std::iter::repeat(0.9).take(malicious));
    FixedClassifier::sequence(scores)
}

#[tokio::test]
async fn test_ddos_scenario() {
    let notifier = Arc::new(RecordingNotifier::default());
    let detector = detector(
        gate_scores(4, 6),
        vec![
            ("bot", FixedClassifier::positives(2)),
            ("ddos", FixedClassifier::positives(6)),
            ("ddoshulk", FixedClassifier::positives(10)),
        ],
        notifier.clone(),
    );

    let analysis = detector.analyze(flows(10).as_bytes(), "soc@example.com").unwrap();
    assert_eq!(
        analysis.verdict,
        Verdict {
            overall: Overall::Malicious,
            benign_count: 4,
            malicious_count: 6,
            category: Category::Known("ddos".into()),
        }
    );

    analysis.alert.expect("malicious verdicts alert").await.unwrap();
    let delivered = notifier.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].subject, "soc@example.com");
    assert_eq!(delivered[0].category, "ddos");
}

#[tokio::test]
async fn test_benign_batch_never_reaches_cascade() {
    let notifier = Arc::new(RecordingNotifier::default());
    let specialist = FixedClassifier::positives(8);
    let specialist_calls = specialist.calls();
    let detector = detector(
        FixedClassifier::constant(0.2),
        vec![("bot", specialist)],
        notifier.clone(),
    );

    let analysis = detector.analyze(flows(8).as_bytes(), "soc@example.com").unwrap();

    assert_eq!(analysis.verdict, Verdict::benign(8));
    assert_eq!(analysis.verdict.category.as_str(), "NA");
    assert!(analysis.alert.is_none());
    assert_eq!(specialist_calls.load(Ordering::SeqCst), 0);
    assert_eq!(notifier.attempts(), 0);
}

#[tokio::test]
async fn test_no_majority_is_unknown_attack_and_still_alerts() {
    let notifier = Arc::new(RecordingNotifier::default());
    let detector = detector(
        FixedClassifier::constant(0.8),
        vec![
            ("bot", FixedClassifier::positives(3)),
            ("ddos", FixedClassifier::positives(3)),
        ],
        notifier.clone(),
    );

    let analysis = detector.analyze(flows(6).as_bytes(), "soc@example.com").unwrap();
    assert_eq!(analysis.verdict.category, Category::UnknownAttack);

    analysis.alert.unwrap().await.unwrap();
    assert_eq!(notifier.categories(), vec!["unknown-attack"]);
}

#[tokio::test]
async fn test_cascade_rescores_full_batch() {
    // Gate flags a single row; the specialist still sees all ten
    let mut labels = vec![1.0; 6];
    labels.extend([0.0; 4]);
    let detector = detector(
        gate_scores(9, 1),
        vec![("sshpatator", FixedClassifier::sequence(labels))],
        Arc::new(RecordingNotifier::default()),
    );

    let verdict = detector.classify(&batch(10)).unwrap();
    assert_eq!(verdict.malicious_count, 1);
    assert_eq!(verdict.category, Category::Known("sshpatator".into()));
}

#[tokio::test]
async fn test_failing_specialist_does_not_abort() {
    let detector = detector(
        FixedClassifier::constant(0.9),
        vec![
            ("bot", FixedClassifier::failing()),
            ("dosslowloris", FixedClassifier::positives(5)),
        ],
        Arc::new(RecordingNotifier::default()),
    );

    let verdict = detector.classify(&batch(5)).unwrap();
    assert_eq!(verdict.category, Category::Known("dosslowloris".into()));
}

#[tokio::test]
async fn test_gate_failure_surfaces() {
    let detector = detector(
        FixedClassifier::failing(),
        vec![("bot", FixedClassifier::positives(5))],
        Arc::new(RecordingNotifier::default()),
    );

    assert!(matches!(
        detector.analyze(flows(5).as_bytes(), "soc@example.com"),
        Err(AnalysisError::Gate(_))
    ));
}

#[tokio::test]
async fn test_malformed_input_never_reaches_gate() {
    let primary = FixedClassifier::constant(0.9);
    let primary_calls = primary.calls();
    let detector = detector(primary, vec![], Arc::new(RecordingNotifier::default()));

    let result = detector.analyze(b"a,b\n1,2,3\n", "soc@example.com");
    assert!(matches!(result, Err(AnalysisError::Ingest(_))));
    assert_eq!(primary_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_resubmission_is_idempotent() {
    let detector = detector(
        gate_scores(3, 7),
        vec![
            ("bot", FixedClassifier::positives(4)),
            ("ddos", FixedClassifier::positives(7)),
        ],
        Arc::new(RecordingNotifier::default()),
    );

    let first = detector.analyze(flows(10).as_bytes(), "soc@example.com").unwrap();
    let second = detector.analyze(flows(10).as_bytes(), "soc@example.com").unwrap();
    assert_eq!(first.verdict, second.verdict);
}

#[tokio::test]
async fn test_notifier_failure_leaves_verdict_unchanged() {
    let build = |notifier: Arc<dyn Notifier>| {
        detector(
            gate_scores(2, 8),
            vec![("infiltration", FixedClassifier::positives(9))],
            notifier,
        )
    };

    let healthy = build(Arc::new(RecordingNotifier::default()))
        .analyze(flows(10).as_bytes(), "soc@example.com")
        .unwrap();
    let broken = build(Arc::new(RecordingNotifier::failing()))
        .analyze(flows(10).as_bytes(), "soc@example.com")
        .unwrap();

    broken.alert.unwrap().await.unwrap();
    assert_eq!(healthy.verdict, broken.verdict);
}

#[tokio::test]
async fn test_batch_without_rows_is_an_error() {
    let primary = FixedClassifier::constant(0.0);
    let primary_calls = primary.calls();
    let notifier = Arc::new(RecordingNotifier::default());
    let detector = detector(primary, vec![], notifier.clone());

    // Header only, prose with no data rows, every row dropped while cleaning
    for raw in [
        &b"a,b\n"[..],
        b"this is not a flow log at all",
        b"a,b\nNaN,1\n2,\n",
    ] {
        assert!(matches!(
            detector.analyze(raw, "soc@example.com"),
            Err(AnalysisError::Gate(PredictionError::EmptyBatch))
        ));
    }

    assert_eq!(primary_calls.load(Ordering::SeqCst), 0);
    assert_eq!(notifier.attempts(), 0);
}
