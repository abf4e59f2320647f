use seo_auditor::analyzer::{analyze_html, Analyzer};
use seo_auditor::output::{format_stored_report, load_statistics};
use seo_auditor::storage::{AuditStore, SqliteStorage};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_audit_then_store_and_reload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r#"<html><head><title>Short</title></head><body>
                    <h1>One</h1><h1>Two</h1>
                    <img src="/a.png"><img src="/b.png" alt="B">
                    </body></html>"#,
                )
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let analyzer = Analyzer::with_client(reqwest::Client::new());
    let audit = analyzer
        .analyze(&format!("{}/", mock_server.uri()))
        .await
        .expect("Audit failed");

    let db_dir = tempfile::tempdir().unwrap();
    let db_path = db_dir.path().join("audits.db");
    let mut storage = SqliteStorage::new(&db_path).expect("Failed to open DB");

    let stored = storage.save_audit(Some(1), &audit).unwrap();
    let reloaded = storage.get_audit(stored.id).unwrap().expect("audit missing");

    assert_eq!(reloaded.audit, audit);
    assert_eq!(
        reloaded.audit.recommendations,
        vec![
            "Title length should be 30-60 chars",
            "Missing Meta Description",
            "Multiple H1 Tags found (should be exactly one)",
            "No H2 Tags found - improve structure",
            "1 images missing Alt Text",
        ]
    );
    // 100 - 15 (meta) - 15 (h1 count) - 5 (h2) - 2 (alt)
    assert_eq!(reloaded.audit.score, 63);

    let report = format_stored_report(&reloaded);
    assert!(report.contains(&stored.public_id));
}

#[test]
fn test_statistics_over_pasted_html() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();

    let pages = [
        ("https://a.example/", "<html><body><h1>A</h1></body></html>", 200),
        ("https://b.example/", "<html><body></body></html>", 2500),
    ];
    for (url, html, load_time) in pages {
        let audit = analyze_html(url, html, load_time).unwrap();
        storage.save_audit(None, &audit).unwrap();
    }

    let stats = load_statistics(&storage).unwrap();
    assert_eq!(stats.total_audits, 2);
    assert_eq!(stats.unique_urls, 2);
    assert_eq!(stats.top_recommendations[0].1, 2);
}
