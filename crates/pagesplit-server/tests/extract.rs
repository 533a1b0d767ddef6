use clap::Parser;
use pagesplit_server::audit::AuditEvent;
use pagesplit_server::cli::{self, Cli};
use pagesplit_server::history::History;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn upstream(route: &str, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_extract_records_history_and_writes_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().join("home");
    let out = dir.path().join("out");
    let server = upstream("/page", "<style>h1{}</style><h1>Title</h1>").await;
    let url = format!("{}/page", server.uri());

    let cli = Cli::try_parse_from([
        "pagesplit",
        "--quiet",
        "--home",
        home.to_str().unwrap(),
        "extract",
        &url,
        "--out",
        out.to_str().unwrap(),
    ])
    .unwrap();
    cli::run(cli).await.unwrap();

    let css = std::fs::read_to_string(out.join("styles.css")).unwrap();
    assert_eq!(css, "/* ========== Style inline #1 ========== */\nh1{}\n\n");
    let js = std::fs::read_to_string(out.join("scripts.js")).unwrap();
    assert_eq!(js, "/* Aucun JavaScript trouvé sur cette page */");

    let history = History::load(home.join("history.json")).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history.entries()[0].url, url);
    assert_eq!(history.entries()[0].content.stats.css_inline, 1);

    let audit = std::fs::read_to_string(home.join("audit.jsonl")).unwrap();
    let event: AuditEvent = serde_json::from_str(audit.lines().next().unwrap()).unwrap();
    assert_eq!(event.method, "extract");
    assert_eq!(event.status, "ok");
}

#[tokio::test]
async fn test_failed_extract_leaves_history_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().join("home");
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let url = format!("{}/missing", server.uri());

    let cli = Cli::try_parse_from([
        "pagesplit",
        "--quiet",
        "--home",
        home.to_str().unwrap(),
        "extract",
        &url,
    ])
    .unwrap();
    let err = cli::run(cli).await.unwrap_err();
    assert!(err.to_string().contains("404"));

    assert!(History::load(home.join("history.json")).unwrap().is_empty());

    let audit = std::fs::read_to_string(home.join("audit.jsonl")).unwrap();
    let event: AuditEvent = serde_json::from_str(audit.lines().next().unwrap()).unwrap();
    assert_eq!(event.status, "fetch_error");
}

#[tokio::test]
async fn test_history_keys_on_trimmed_url() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().join("home");
    let server = upstream("/page", "<p>same page</p>").await;
    let url = format!("{}/page", server.uri());

    for typed in [format!("  {url} "), url.clone()] {
        let cli = Cli::try_parse_from([
            "pagesplit",
            "--quiet",
            "--no-audit",
            "--home",
            home.to_str().unwrap(),
            "extract",
            &typed,
        ])
        .unwrap();
        cli::run(cli).await.unwrap();
    }

    let history = History::load(home.join("history.json")).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history.entries()[0].url, url);
}
