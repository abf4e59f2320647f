use seo_auditor::analyzer::Analyzer;
use seo_auditor::config::{Config, FetcherConfig, OutputConfig, QuotaConfig, UserAgentConfig};
use seo_auditor::{AnalyzeError, LinkType};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given request timeout
fn create_test_config(timeout_secs: u64) -> Config {
    Config {
        user_agent: UserAgentConfig {
            bot_name: "TestBot".to_string(),
            bot_version: "1.0".to_string(),
            contact_url: "https://example.com/bot".to_string(),
        },
        fetcher: FetcherConfig {
            timeout_secs,
            connect_timeout_secs: 1,
        },
        output: OutputConfig {
            database_path: ":memory:".to_string(),
        },
        quota: QuotaConfig::default(),
    }
}

fn analyzer() -> Analyzer {
    Analyzer::new(&create_test_config(10)).expect("Failed to build analyzer")
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

fn well_formed_page(base_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>Handmade Ceramic Mugs and Bowls | Studio</title>
<meta name="description" content="Small-batch stoneware mugs and bowls, glazed by hand and fired in our studio kiln.">
</head>
<body>
<h1>Handmade Ceramics</h1>
<h2>Mugs</h2>
<p>Every stoneware mug is thrown on the wheel. Stoneware keeps coffee warm.</p>
<h2>Bowls</h2>
<img src="/mug.jpg" alt="Blue glazed mug">
<a href="/about">About the studio</a>
<a href="https://other.com">Elsewhere</a>
<a href="{}/shop">Shop</a>
</body>
</html>"#,
        base_url
    )
}

#[tokio::test]
async fn test_audit_well_formed_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(well_formed_page(&base_url)))
        .mount(&mock_server)
        .await;

    let url = format!("{}/", base_url);
    let audit = analyzer().analyze(&url).await.expect("Audit failed");

    assert_eq!(audit.url, url);
    assert_eq!(audit.title, "Handmade Ceramic Mugs and Bowls | Studio");
    assert_eq!(audit.h1, "Handmade Ceramics");
    assert_eq!(audit.h2s, vec!["Mugs", "Bowls"]);
    assert_eq!(audit.images.len(), 1);
    assert!(audit.images[0].has_alt);

    assert_eq!(audit.links.len(), 3);
    assert_eq!(audit.links[0].text, "About the studio");
    assert_eq!(audit.links[0].link_type, LinkType::Internal);
    assert_eq!(audit.links[1].link_type, LinkType::External);
    assert_eq!(audit.links[2].link_type, LinkType::Internal);

    assert_eq!(audit.keyword_density.words()[0], "stoneware");

    // A local mock answers well under a second
    assert!(audit.load_time < 1000, "load time {}ms", audit.load_time);
    assert_eq!(audit.score, 100);
    assert!(audit.recommendations.is_empty());
    assert!(audit.performance_score <= 100);
}

#[tokio::test]
async fn test_sends_bot_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0 (+https://example.com/bot)"))
        .respond_with(html_response("<html><body></body></html>".to_string()))
        .mount(&mock_server)
        .await;

    let result = analyzer().analyze(&format!("{}/", mock_server.uri())).await;
    assert!(result.is_ok(), "user agent not sent: {:?}", result.err());
}

#[tokio::test]
async fn test_forbidden_is_bot_protection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let result = analyzer().analyze(&format!("{}/", mock_server.uri())).await;
    assert!(matches!(
        result,
        Err(AnalyzeError::BotProtectionDetected { status: 403, .. })
    ));
}

#[tokio::test]
async fn test_rate_limited_is_bot_protection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let result = analyzer().analyze(&format!("{}/", mock_server.uri())).await;
    assert!(matches!(
        result,
        Err(AnalyzeError::BotProtectionDetected { status: 429, .. })
    ));
}

#[tokio::test]
async fn test_server_error_is_analysis_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = analyzer().analyze(&format!("{}/", mock_server.uri())).await;
    match result {
        Err(AnalyzeError::AnalysisFailed { message, .. }) => {
            assert!(message.contains("500"), "message: {}", message)
        }
        other => panic!("expected AnalysisFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_is_analysis_failure() {
    let mock_server = MockServer::start().await;

    let result = analyzer()
        .analyze(&format!("{}/missing", mock_server.uri()))
        .await;
    assert!(matches!(result, Err(AnalyzeError::AnalysisFailed { .. })));
}

#[tokio::test]
async fn test_unresolvable_host_is_invalid_url() {
    let result = analyzer()
        .analyze("http://no-such-host.invalid/")
        .await;
    assert!(
        matches!(result, Err(AnalyzeError::InvalidUrl { .. })),
        "got {:?}",
        result
    );
}

#[tokio::test]
async fn test_connection_refused_is_analysis_failure() {
    // Grab a free port, then close it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let result = analyzer()
        .analyze(&format!("http://127.0.0.1:{}/", port))
        .await;
    assert!(matches!(result, Err(AnalyzeError::AnalysisFailed { .. })));
}

#[tokio::test]
async fn test_timeout_is_analysis_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            html_response("<html></html>".to_string()).set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let analyzer = Analyzer::new(&create_test_config(1)).unwrap();
    let result = analyzer.analyze(&format!("{}/", mock_server.uri())).await;
    assert!(matches!(result, Err(AnalyzeError::AnalysisFailed { .. })));
}

#[tokio::test]
async fn test_slow_page_loses_points() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(
            html_response(well_formed_page(&base_url)).set_delay(Duration::from_millis(1100)),
        )
        .mount(&mock_server)
        .await;

    let audit = analyzer()
        .analyze(&format!("{}/", base_url))
        .await
        .expect("Audit failed");

    assert!(audit.load_time >= 1100, "load time {}ms", audit.load_time);
    assert!(audit.load_time < 3000, "load time {}ms", audit.load_time);
    assert_eq!(audit.score, 90);
    assert!(audit.performance_score <= 78);
}
