use std::sync::Mutex;

use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordfreq_core::{CancelFlag, Concurrency, FrequencyError, SplitPolicy, WordRankEntry};
use wordfreq_engine::{
    analyze_url, decode_text, AnalysisError, AnalysisHandle, AnalysisOptions, FailureKind,
    FetchError, FetchMetadata, FetchOutput, FetchSettings, Progress, ProgressSink, Stage,
    TextSource,
};

struct StaticSource {
    bytes: Vec<u8>,
    content_type: Option<&'static str>,
}

#[async_trait::async_trait]
impl TextSource for StaticSource {
    async fn fetch(&self, url: &str, _sink: &dyn ProgressSink) -> Result<FetchOutput, FetchError> {
        Ok(FetchOutput {
            bytes: self.bytes.clone(),
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                content_type: self.content_type.map(str::to_string),
                byte_len: self.bytes.len() as u64,
            },
        })
    }
}

#[derive(Default)]
struct StageLog(Mutex<Vec<Stage>>);

impl ProgressSink for StageLog {
    fn emit(&self, progress: Progress) {
        self.0.lock().unwrap().push(progress.stage);
    }
}

fn options(concurrency: usize, top_n: usize) -> AnalysisOptions {
    AnalysisOptions::new(Concurrency::try_from(concurrency).unwrap(), top_n)
}

#[test]
fn decode_respects_charset_header() {
    let bytes = b"caf\xe9"; // iso-8859-1
    let decoded = decode_text(bytes, Some("text/plain; charset=ISO-8859-1")).unwrap();
    assert_eq!(decoded.text, "café");
    assert!(
        decoded.encoding_label.eq_ignore_ascii_case("ISO-8859-1")
            || decoded.encoding_label.eq_ignore_ascii_case("windows-1252")
    );
}

#[test]
fn decode_handles_utf8_bom() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_text(bytes, Some("text/plain")).unwrap();
    assert_eq!(decoded.text, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn decode_guesses_without_charset() {
    let decoded = decode_text("plain ascii words".as_bytes(), None).unwrap();
    assert_eq!(decoded.text, "plain ascii words");
}

#[tokio::test]
async fn analyze_counts_and_ranks_fetched_text() {
    wordfreq_logging::initialize_for_tests();
    let source = StaticSource {
        bytes: b"The cat sat. The cat ran. A dog sat.".to_vec(),
        content_type: Some("text/plain; charset=utf-8"),
    };
    let sink = StageLog::default();

    let report = analyze_url(&source, "https://example.com/cats.txt", &options(3, 2), &sink)
        .await
        .unwrap();

    assert_eq!(report.metadata.final_url, "https://example.com/cats.txt");
    assert_eq!(report.encoding_label, "UTF-8");
    assert_eq!(report.table.total(), 9);
    assert_eq!(report.table.get("sat"), Some(2));
    assert_eq!(
        report.top,
        vec![WordRankEntry::new("the", 2), WordRankEntry::new("cat", 2)]
    );
    assert_eq!(
        *sink.0.lock().unwrap(),
        vec![Stage::Decoding, Stage::Counting, Stage::Done]
    );
}

#[tokio::test]
async fn analyze_reports_cancellation() {
    let source = StaticSource {
        bytes: b"some words here".to_vec(),
        content_type: None,
    };
    let cancel = CancelFlag::new();
    cancel.cancel();
    let options = AnalysisOptions {
        cancel: Some(cancel),
        ..options(2, 5)
    };

    let err = analyze_url(&source, "https://example.com", &options, &StageLog::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Count(FrequencyError::Cancelled)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn handle_runs_analysis_in_background() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("to be or not to be", "text/plain"),
        )
        .mount(&server)
        .await;

    let handle = AnalysisHandle::spawn(
        FetchSettings::default(),
        format!("{}/book.txt", server.uri()),
        AnalysisOptions {
            split_policy: SplitPolicy::WordBoundary,
            ..options(4, 3)
        },
    );
    let (report, stages) = tokio::task::spawn_blocking(move || {
        let mut stages = Vec::new();
        let report = handle.wait(|progress| stages.push(progress.stage));
        (report, stages)
    })
    .await
    .unwrap();

    let report = report.unwrap();
    assert_eq!(
        report.top,
        vec![
            WordRankEntry::new("to", 2),
            WordRankEntry::new("be", 2),
            WordRankEntry::new("or", 1),
        ]
    );
    assert_eq!(stages.first(), Some(&Stage::Downloading));
    assert_eq!(stages.last(), Some(&Stage::Done));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn handle_surfaces_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    let handle = AnalysisHandle::spawn(
        FetchSettings::default(),
        format!("{}/gone", server.uri()),
        AnalysisOptions::default(),
    );
    let result = tokio::task::spawn_blocking(move || handle.wait(|_| {}))
        .await
        .unwrap();

    match result {
        Err(AnalysisError::Fetch(err)) => assert_eq!(err.kind, FailureKind::HttpStatus(410)),
        other => panic!("unexpected result: {other:?}"),
    }
}
