use async_trait::async_trait;
use faculty_publications::models::{RawBib, RawPublication};
use faculty_publications::services::{NoDelay, Pacer};
use faculty_publications::{
    logger, App, AppError, AuthorRecord, Config, RunOutcome, ScholarSource, SourceError, UserId,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const HEADER: &str = "Faculty Name,Google Scholar Profile URL,Department\n";

/// 内存数据源：按用户标识返回固定论文，未登记的标识视为网络失败
#[derive(Default)]
struct FakeSource {
    authors: HashMap<String, Vec<RawPublication>>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    fn with_author(mut self, user_id: &str, publications: Vec<RawPublication>) -> Self {
        self.authors.insert(user_id.to_string(), publications);
        self
    }
}

#[async_trait]
impl ScholarSource for FakeSource {
    async fn resolve_author(&self, user_id: &UserId) -> Result<AuthorRecord, SourceError> {
        self.calls.lock().unwrap().push(user_id.to_string());
        if !self.authors.contains_key(user_id.as_str()) {
            return Err(SourceError::Status {
                url: format!("fake://{}", user_id),
                status: 503,
            });
        }
        Ok(AuthorRecord {
            user_id: user_id.clone(),
            name: user_id.to_string(),
            affiliation: None,
            first_page: None,
        })
    }

    async fn fetch_publications(
        &self,
        author: &AuthorRecord,
    ) -> Result<Vec<RawPublication>, SourceError> {
        Ok(self.authors[author.user_id.as_str()].clone())
    }
}

/// 只计数不等待的停顿策略
#[derive(Clone, Default)]
struct CountingPacer(Arc<AtomicUsize>);

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn paper(title: &str, year: &str, venue: &str, citations: u64) -> RawPublication {
    RawPublication {
        bib: RawBib {
            title: Some(title.to_string()),
            pub_year: Some(Value::String(year.to_string())),
            venue: Some(venue.to_string()),
            ..Default::default()
        },
        num_citations: Some(json!(citations)),
    }
}

/// 在临时目录的子目录中写入名单，返回对应配置
fn workspace(csv_body: &str) -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join("faculty.csv"), csv_body).unwrap();

    let config = Config {
        input_filename: "faculty.csv".to_string(),
        search_root: dir.path().to_path_buf(),
        output_dir: dir.path().join("output"),
        ..Config::default()
    };
    (dir, config)
}

fn app(config: Config, source: Arc<FakeSource>) -> App {
    App::new(config, source, Box::new(NoDelay))
}

fn read_output(path: &Path) -> Vec<Value> {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[tokio::test]
async fn test_valid_and_invalid_profile_urls() {
    logger::init();

    let csv = format!(
        "{HEADER}\
         Faculty A,https://scholar.google.com/citations?user=ABC123&hl=en,CS\n\
         Faculty B,https://scholar.google.com/citations?hl=en,Math\n"
    );
    let (_dir, config) = workspace(&csv);
    let output_path = config.output_path();

    let source = Arc::new(FakeSource::default().with_author(
        "ABC123",
        vec![
            paper("p2017", "2017", "J1", 1),
            paper("p2023", "2023", "J2", 2),
            paper("p2019", "2019", "J3", 3),
            paper("p2021", "2021", "J4", 4),
            paper("p2015", "2015", "J5", 5),
            paper("p2022", "2022", "J6", 6),
        ],
    ));

    let outcome = app(config, source.clone()).run().await.unwrap();

    let RunOutcome::Completed(summary) = outcome else {
        panic!("run should complete");
    };
    assert_eq!(summary.faculty_total, 2);
    assert_eq!(summary.fetched, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.publications, 5);

    // 无效链接不会访问数据源
    assert_eq!(*source.calls.lock().unwrap(), vec!["ABC123".to_string()]);

    let output = read_output(&output_path);
    let years: Vec<i64> = output.iter().map(|r| r["Year"].as_i64().unwrap()).collect();
    assert_eq!(years, vec![2023, 2022, 2021, 2019, 2017]);

    for record in &output {
        assert_eq!(record["Faculty Name"], "Faculty A");
        assert_eq!(
            record["Link"],
            "https://scholar.google.com/citations?user=ABC123"
        );
        assert_eq!(record.as_object().unwrap().len(), 6);
    }
}

#[tokio::test]
async fn test_missing_column_aborts_without_output() {
    let (_dir, config) = workspace("Faculty Name,Profile\nFaculty A,https://x?user=A\n");
    let output_path = config.output_path();

    let outcome = app(config, Arc::new(FakeSource::default()))
        .run()
        .await
        .unwrap();

    match outcome {
        RunOutcome::Aborted { found, expected } => {
            assert_eq!(found, vec!["Faculty Name", "Profile"]);
            assert_eq!(
                expected,
                vec!["Faculty Name", "Google Scholar Profile URL"]
            );
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!output_path.exists());
    assert!(!output_path.parent().unwrap().exists());
}

#[tokio::test]
async fn test_source_failure_does_not_abort_batch() {
    let csv = format!(
        "{HEADER}\
         Faculty A,https://scholar.google.com/citations?user=AAA,CS\n\
         Faculty B,https://scholar.google.com/citations?user=BROKEN,CS\n\
         Faculty C,https://scholar.google.com/citations?user=CCC,CS\n"
    );
    let (_dir, config) = workspace(&csv);
    let output_path = config.output_path();

    let source = Arc::new(
        FakeSource::default()
            .with_author("AAA", vec![paper("a", "2020", "J", 0)])
            .with_author("CCC", vec![paper("c1", "2018", "J", 0), paper("c2", "2024", "J", 0)]),
    );

    let outcome = app(config, source).run().await.unwrap();
    assert!(matches!(outcome, RunOutcome::Completed(_)));

    let output = read_output(&output_path);
    let rows: Vec<(String, String)> = output
        .iter()
        .map(|r| {
            (
                r["Faculty Name"].as_str().unwrap().to_string(),
                r["Title"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    assert_eq!(
        rows,
        vec![
            ("Faculty A".to_string(), "a".to_string()),
            ("Faculty C".to_string(), "c2".to_string()),
            ("Faculty C".to_string(), "c1".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_missing_fields_are_defaulted() {
    let csv = format!("{HEADER}Faculty A,https://scholar.google.com/citations?user=ABC123,CS\n");
    let (_dir, config) = workspace(&csv);
    let output_path = config.output_path();

    let bare = RawPublication {
        bib: RawBib {
            title: Some("Bare".to_string()),
            ..Default::default()
        },
        num_citations: None,
    };
    let source = Arc::new(FakeSource::default().with_author("ABC123", vec![bare]));

    app(config, source).run().await.unwrap();

    assert_eq!(
        read_output(&output_path),
        vec![json!({
            "Faculty Name": "Faculty A",
            "Title": "Bare",
            "Journal": "",
            "Year": 0,
            "Citations": 0,
            "Link": "https://scholar.google.com/citations?user=ABC123",
        })]
    );
}

#[tokio::test]
async fn test_missing_input_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        input_filename: "absent.xlsx".to_string(),
        search_root: dir.path().to_path_buf(),
        output_dir: dir.path().join("output"),
        ..Config::default()
    };
    let output_path = config.output_path();

    let err = app(config, Arc::new(FakeSource::default()))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InputNotFound { .. }));
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_non_recursive_search_misses_nested_input() {
    let (_dir, mut config) = workspace(&format!("{HEADER}Faculty A,,CS\n"));
    config.search_subfolders = false;

    let err = app(config, Arc::new(FakeSource::default()))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InputNotFound { .. }));
}

#[tokio::test]
async fn test_pause_once_per_resolved_identifier() {
    let csv = format!(
        "{HEADER}\
         Faculty A,https://scholar.google.com/citations?user=AAA,CS\n\
         Faculty B,not a profile link,CS\n\
         Faculty C,https://scholar.google.com/citations?user=BROKEN,CS\n\
         Faculty D,https://scholar.google.com/citations?hl=en,CS\n"
    );
    let (_dir, config) = workspace(&csv);
    let source =
        Arc::new(FakeSource::default().with_author("AAA", vec![paper("a", "2020", "J", 0)]));
    let pacer = CountingPacer::default();

    let outcome = App::new(config, source, Box::new(pacer.clone()))
        .run()
        .await
        .unwrap();

    let RunOutcome::Completed(summary) = outcome else {
        panic!("run should complete");
    };
    assert_eq!(summary.fetched, 2);
    assert_eq!(summary.skipped, 2);
    // 失败的抓取也要停顿，无效链接不停顿
    assert_eq!(pacer.0.load(Ordering::SeqCst), summary.fetched);
}
