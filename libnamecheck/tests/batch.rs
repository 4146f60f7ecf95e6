use libnamecheck::{
    check_batch, rate_limited_labels, Availability, BatchRequest, BatchResult, CheckConfig,
    Checker, Endpoints, Summary, MAX_ERROR_DETAIL, RATE_LIMITED,
};
use serde_json::json;
use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const NAME: &str = "acme";

fn config(server: &MockServer) -> CheckConfig {
    CheckConfig::default()
        .with_timeout(Duration::from_secs(5))
        .with_endpoints(Endpoints::all(&server.uri()))
}

fn request(tlds: &[&str]) -> BatchRequest {
    BatchRequest::new(NAME).with_tlds(tlds.iter().copied())
}

fn labels(rows: &BatchResult) -> Vec<&str> {
    rows.iter().map(|r| r.label.as_str()).collect()
}

fn row<'a>(rows: &'a BatchResult, label: &str) -> &'a libnamecheck::CheckResult {
    &rows
        .iter()
        .find(|r| r.label == label)
        .unwrap_or_else(|| panic!("no row labelled {label}"))
        .result
}

async fn mount(server: &MockServer, url_path: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Every provider answers with a valid "taken" record, except GitHub which
/// gets `github` so tests can swap it out.
async fn mount_taken(server: &MockServer, github: ResponseTemplate, tlds: &[&str]) {
    mount(
        server,
        "/publishers/validate",
        ResponseTemplate::new(200).set_body_json(json!({"isAvailable": false})),
    )
    .await;
    mount(
        server,
        "/nodes/search",
        ResponseTemplate::new(200).set_body_json(json!({
            "nodes": [{"id": "ACME", "publisher": {"id": "wile"}}]
        })),
    )
    .await;
    mount(server, &format!("/pypi/{NAME}/json"), ResponseTemplate::new(200)).await;
    mount(server, &format!("/{NAME}"), ResponseTemplate::new(200)).await;
    mount(server, &format!("/users/{NAME}"), github.clone()).await;
    mount(server, &format!("/orgs/{NAME}"), github).await;
    for tld in tlds {
        mount(
            server,
            &format!("/domain/{NAME}.{tld}"),
            ResponseTemplate::new(200).set_body_json(json!({
                "ldhName": format!("{NAME}.{tld}"),
                "events": [{"eventAction": "expiration", "eventDate": "2030-01-02T00:00:00Z"}]
            })),
        )
        .await;
    }
}

#[tokio::test]
async fn rows_follow_construction_order() {
    let server = MockServer::start().await;
    let rows = check_batch(config(&server), &request(&["com", "io"])).await.unwrap();

    assert_eq!(
        labels(&rows),
        vec![
            "Comfy Publisher",
            "Comfy Node",
            "PyPI",
            "npm",
            "GitHub User",
            "GitHub Org",
            "acme.com",
            "acme.io",
        ]
    );
}

#[tokio::test]
async fn everything_missing_means_everything_available() {
    // wiremock answers 404 for anything not mounted
    let server = MockServer::start().await;
    mount(
        &server,
        "/publishers/validate",
        ResponseTemplate::new(200).set_body_json(json!({"isAvailable": true})),
    )
    .await;
    mount(
        &server,
        "/nodes/search",
        ResponseTemplate::new(200).set_body_json(json!({"nodes": []})),
    )
    .await;

    let rows = check_batch(config(&server), &request(&["com", "io", "dev"])).await.unwrap();

    assert!(rows.iter().all(|r| r.result.available == Availability::Available));
    assert!(rows.iter().all(|r| r.result.detail.is_empty()));
    assert_eq!(
        Summary::of(&rows),
        Summary { available: rows.len(), taken: 0, unknown: 0 }
    );
}

#[tokio::test]
async fn plain_404_everywhere_is_available_for_status_driven_probes() {
    let server = MockServer::start().await;
    let rows = check_batch(config(&server), &request(&["com"])).await.unwrap();

    for label in ["PyPI", "npm", "GitHub User", "GitHub Org", "acme.com"] {
        assert_eq!(row(&rows, label).available, Availability::Available, "{label}");
    }
    // the registry endpoints expect a 200 JSON body
    assert_eq!(row(&rows, "Comfy Publisher").detail, "HTTP 404");
    assert_eq!(row(&rows, "Comfy Node").detail, "HTTP 404");
}

#[tokio::test]
async fn taken_everywhere_reports_details() {
    let server = MockServer::start().await;
    let github = ResponseTemplate::new(200)
        .set_body_json(json!({"type": "Organization", "public_repos": 42}));
    mount_taken(&server, github, &["com"]).await;

    let rows = check_batch(config(&server), &request(&["com"])).await.unwrap();

    assert!(rows.iter().all(|r| r.result.available == Availability::Taken));
    assert_eq!(row(&rows, "Comfy Publisher").detail, "taken");
    assert_eq!(row(&rows, "Comfy Node").detail, "by @wile");
    assert_eq!(row(&rows, "PyPI").detail, "");
    assert_eq!(row(&rows, "npm").detail, "");
    assert_eq!(row(&rows, "GitHub User").detail, "Organization");
    assert_eq!(row(&rows, "GitHub Org").detail, "42 repos");
    assert_eq!(row(&rows, "acme.com").detail, "exp 2030-01-02");
}

#[tokio::test]
async fn forbidden_identity_probes_are_rate_limited() {
    let server = MockServer::start().await;
    mount_taken(&server, ResponseTemplate::new(403), &["com", "io"]).await;

    let rows = check_batch(config(&server), &request(&["com", "io"])).await.unwrap();

    for label in ["GitHub User", "GitHub Org"] {
        let r = row(&rows, label);
        assert_eq!(r.available, Availability::Unknown);
        assert_eq!(r.detail, RATE_LIMITED);
    }
    assert_eq!(rate_limited_labels(&rows), vec!["GitHub User", "GitHub Org"]);
    assert_eq!(
        Summary::of(&rows),
        Summary { available: 0, taken: 6, unknown: 2 }
    );
}

#[tokio::test]
async fn forbidden_elsewhere_is_just_a_status() {
    let server = MockServer::start().await;
    mount(&server, &format!("/{NAME}"), ResponseTemplate::new(403)).await;

    let rows = check_batch(config(&server), &request(&[]).with_skip(["comfy", "github", "pypi"]))
        .await
        .unwrap();

    assert_eq!(labels(&rows), vec!["npm"]);
    assert_eq!(rows[0].result.detail, "HTTP 403");
    assert!(rate_limited_labels(&rows).is_empty());
}

#[tokio::test]
async fn slow_domain_times_out_alone() {
    let server = MockServer::start().await;
    let github = ResponseTemplate::new(200).set_body_json(json!({"type": "User", "public_repos": 1}));
    mount_taken(&server, github, &[]).await;
    mount(
        &server,
        "/domain/acme.com",
        ResponseTemplate::new(404).set_delay(Duration::from_secs(3)),
    )
    .await;

    let config = config(&server).with_timeout(Duration::from_millis(500));
    let rows = check_batch(config, &request(&["com"])).await.unwrap();

    assert_eq!(rows.len(), 7);
    let domain = row(&rows, "acme.com");
    assert_eq!(domain.available, Availability::Unknown);
    assert_eq!(domain.detail, "timeout");
    assert!(rows
        .iter()
        .filter(|r| r.label != "acme.com")
        .all(|r| r.result.available == Availability::Taken));
}

#[tokio::test]
async fn probes_run_concurrently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_delay(Duration::from_millis(400)))
        .mount(&server)
        .await;

    let start = Instant::now();
    let rows = check_batch(config(&server), &request(&["com", "io", "org"])).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(rows.len(), 9);
    // sequential execution would need 9 * 400ms
    assert!(elapsed < Duration::from_millis(2000), "took {elapsed:?}");
}

#[tokio::test]
async fn malformed_bodies_become_parse_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let rows = check_batch(config(&server), &request(&["com"])).await.unwrap();

    for label in ["Comfy Publisher", "Comfy Node", "GitHub User", "GitHub Org", "acme.com"] {
        let r = row(&rows, label);
        assert_eq!(r.available, Availability::Unknown, "{label}");
        assert_eq!(r.detail, "parse error", "{label}");
    }
    // status-only probes never read the body
    assert_eq!(row(&rows, "PyPI").available, Availability::Taken);
    assert_eq!(row(&rows, "npm").available, Availability::Taken);
}

#[tokio::test]
async fn rdap_error_object_with_200_is_available() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/domain/acme.io",
        ResponseTemplate::new(200).set_body_json(json!({"errorCode": 404, "title": "Not Found"})),
    )
    .await;

    let rows = check_batch(
        config(&server),
        &request(&["io"]).with_skip(["comfy", "pypi", "npm", "github"]),
    )
    .await
    .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].result.available, Availability::Available);
}

#[tokio::test]
async fn arbitrary_statuses_stay_in_the_tri_state() {
    for status in [201u16, 204, 301, 400, 418, 429, 500, 503] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let rows = check_batch(config(&server), &request(&["com"])).await.unwrap();

        assert_eq!(rows.len(), 7);
        for r in &rows {
            assert_eq!(r.result.available, Availability::Unknown, "{} {status}", r.label);
            assert_eq!(r.result.detail, format!("HTTP {status}"));
        }
    }
}

#[tokio::test]
async fn unreachable_provider_reports_short_reason() {
    // nothing listens on port 1
    let config = CheckConfig::default()
        .with_timeout(Duration::from_secs(2))
        .with_endpoints(Endpoints::all("http://127.0.0.1:1"));

    let rows = check_batch(config, &request(&["com"]).with_skip(["comfy", "github", "domain", "pypi"]))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    let r = &rows[0].result;
    assert_eq!(r.available, Availability::Unknown);
    assert!(!r.detail.is_empty());
    assert!(r.detail.chars().count() <= MAX_ERROR_DETAIL);
}

#[tokio::test]
async fn pypi_queries_normalized_name() {
    let server = MockServer::start().await;
    mount(&server, "/pypi/my-pkg-name/json", ResponseTemplate::new(200)).await;

    let rows = check_batch(
        config(&server),
        &BatchRequest::new("My_Pkg.Name").with_skip(["comfy", "npm", "github", "domain"]),
    )
    .await
    .unwrap();

    assert_eq!(labels(&rows), vec!["PyPI"]);
    assert_eq!(rows[0].result.available, Availability::Taken);
    assert!(rows[0].result.detail.contains("my-pkg-name"));
}

#[tokio::test]
async fn comfy_queries_carry_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/publishers/validate"))
        .and(query_param("username", NAME))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isAvailable": true})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nodes/search"))
        .and(query_param("search", NAME))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nodes": [{"id": "acme-extra"}]})))
        .mount(&server)
        .await;

    let rows = check_batch(
        config(&server),
        &request(&[]).with_skip(["pypi", "npm", "github", "domain"]),
    )
    .await
    .unwrap();

    assert_eq!(labels(&rows), vec!["Comfy Publisher", "Comfy Node"]);
    assert!(rows.iter().all(|r| r.result.available == Availability::Available));
}

#[tokio::test]
async fn credential_headers_reach_github_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{NAME}")))
        .and(header("authorization", "Bearer t0ken"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"type": "User"})))
        .mount(&server)
        .await;

    let mut creds = BTreeMap::new();
    creds.insert("Authorization".to_string(), "Bearer t0ken".to_string());
    let rows = check_batch(
        config(&server).with_credential_headers(creds),
        &request(&[]).with_skip(["comfy", "pypi", "npm", "domain"]),
    )
    .await
    .unwrap();

    assert_eq!(row(&rows, "GitHub User").available, Availability::Taken);
    assert_eq!(row(&rows, "GitHub User").detail, "User");
    // no org mock, so the org probe sees wiremock's 404
    assert_eq!(row(&rows, "GitHub Org").available, Availability::Available);

    let received = server.received_requests().await.unwrap();
    assert!(received.iter().all(|r| r.url.path().starts_with("/users/")
        || r.url.path().starts_with("/orgs/")));
}

#[tokio::test]
async fn skipping_everything_makes_no_requests() {
    let server = MockServer::start().await;
    let rows = check_batch(
        config(&server),
        &request(&["com", "io"]).with_skip(["COMFY", "pypi", "Npm", "github", "domain"]),
    )
    .await
    .unwrap();

    assert!(rows.is_empty());
    assert_eq!(Summary::of(&rows).total(), 0);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn repeated_batches_are_identical() {
    let server = MockServer::start().await;
    let github = ResponseTemplate::new(403);
    mount_taken(&server, github, &["com"]).await;

    let checker = Checker::with_config(config(&server)).unwrap();
    let req = request(&["com", "io"]);
    let first = checker.check(&req).await;
    let second = checker.check(&req).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn check_many_keeps_name_order() {
    let server = MockServer::start().await;
    let checker = Checker::with_config(config(&server)).unwrap();
    let skip = vec!["comfy".to_string(), "pypi".to_string(), "npm".to_string(), "github".to_string()];
    let tlds = vec!["com".to_string()];

    let batches = checker.check_many(["alpha", "beta"], &tlds, &skip).await;

    let names: Vec<_> = batches.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert_eq!(batches[1].1[0].label, "beta.com");
}

#[tokio::test]
async fn redirects_are_not_followed_outside_rdap() {
    let server = MockServer::start().await;
    let moved = format!("{}/moved", server.uri());
    for url_path in [
        format!("/{NAME}"),
        format!("/pypi/{NAME}/json"),
        format!("/users/{NAME}"),
        format!("/orgs/{NAME}"),
    ] {
        mount(
            &server,
            &url_path,
            ResponseTemplate::new(302).insert_header("Location", moved.as_str()),
        )
        .await;
    }
    mount(
        &server,
        "/moved",
        ResponseTemplate::new(200).set_body_json(json!({"type": "User", "public_repos": 3})),
    )
    .await;

    let rows = check_batch(
        config(&server),
        &request(&["com"]).with_skip(["comfy", "domain"]),
    )
    .await
    .unwrap();

    assert_eq!(labels(&rows), vec!["PyPI", "npm", "GitHub User", "GitHub Org"]);
    for r in &rows {
        assert_eq!(r.result.available, Availability::Unknown, "{}", r.label);
        assert_eq!(r.result.detail, "HTTP 302", "{}", r.label);
    }
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 4);
    assert!(received.iter().all(|r| r.url.path() != "/moved"));
}

#[tokio::test]
async fn rdap_follows_redirect_to_registry() {
    let server = MockServer::start().await;
    let registry = format!("{}/registry/domain/{NAME}.com", server.uri());
    mount(
        &server,
        &format!("/domain/{NAME}.com"),
        ResponseTemplate::new(302).insert_header("Location", registry.as_str()),
    )
    .await;
    mount(
        &server,
        &format!("/registry/domain/{NAME}.com"),
        ResponseTemplate::new(200).set_body_json(json!({
            "ldhName": "acme.com",
            "events": [{"eventAction": "expiration", "eventDate": "2031-05-06T00:00:00Z"}]
        })),
    )
    .await;

    let rows = check_batch(
        config(&server),
        &request(&["com"]).with_skip(["comfy", "pypi", "npm", "github"]),
    )
    .await
    .unwrap();

    assert_eq!(labels(&rows), vec!["acme.com"]);
    assert_eq!(rows[0].result.available, Availability::Taken);
    assert_eq!(rows[0].result.detail, "exp 2031-05-06");
}

#[tokio::test]
async fn checker_with_default_config_builds() {
    let checker = Checker::with_config(CheckConfig::default());
    assert!(checker.is_ok());
}
