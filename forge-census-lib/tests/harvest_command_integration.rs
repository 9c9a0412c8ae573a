//! Integration tests for the `harvest` command, from argument parsing to the rendered report.

use forge_census_lib::Host;
use forge_census_lib::facts::Report;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test host that captures output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, _code: i32) {}
}

/// A GitLab with two projects owned by the same group; the second one has no repository.
async fn two_project_gitlab() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 10, "name": "api", "description": "Public API", "namespace": { "kind": "group", "name": "backend" } },
            { "id": 11, "name": "docs", "description": null, "namespace": { "kind": "group", "name": "backend" } },
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/10/repository/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "committed_date": "2024-06-01T10:00:00+00:00", "committer_name": "Lin", "message": "Add endpoint" },
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/11/repository/commits"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    for (id, opened) in [(10, 7), (11, 1)] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v4/projects/{id}/issues_statistics")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "statistics": { "counts": { "opened": opened } } })))
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/10/pipelines/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "source": "push", "status": "success" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/11/pipelines/latest"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    for (id, stars, forks) in [(10, 4, json!(2)), (11, 4, json!(null))] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v4/projects/{id}")))
            .and(query_param("simple", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "star_count": stars,
                "forks_count": forks,
                "namespace": { "name": "Backend Team" },
            })))
            .mount(&server)
            .await;
    }

    server
}

fn harvest_args<'a>(server_url: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec!["census", "harvest", "--base-url", server_url, "--color", "never"];
    args.extend_from_slice(extra);
    args
}

#[tokio::test]
async fn test_harvest_json_to_stdout() {
    let server = two_project_gitlab().await;
    let base_url = format!("{}/api/v4", server.uri());

    let mut host = TestHost::new();
    forge_census_lib::run(&mut host, harvest_args(&base_url, &["--output", "json"]))
        .await
        .unwrap();

    let output = host.output_str();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["projects"][0]["name"], "api");
    assert_eq!(value["projects"][0]["owned_by_kind"], "group");
    assert_eq!(value["projects"][0]["open_issues"], 7);
    assert_eq!(value["projects"][0]["last_commit_metadata"]["author"], "Lin");
    assert_eq!(value["projects"][0]["pipeline_metadata"]["status"], "success");
    assert!(value["projects"][1]["last_commit_metadata"].is_null());
    assert!(value["projects"][1]["pipeline_metadata"].is_null());

    let stats = &value["statistics"];
    assert_eq!(stats["number_of_projects"], 2);
    assert_eq!(stats["owner_of_most_repos"], json!({ "name": "Backend Team", "count": 2 }));
    assert_eq!(stats["most_starred_repo"], json!({ "name": "api", "count": 4 }));
    assert_eq!(stats["most_forked_repo"], json!({ "name": "api", "count": 2 }));
    assert_eq!(stats["most_open_issues"], json!({ "name": "api", "count": 7 }));
}

#[tokio::test]
async fn test_harvest_yaml_to_stdout() {
    let server = two_project_gitlab().await;
    let base_url = format!("{}/api/v4", server.uri());

    let mut host = TestHost::new();
    forge_census_lib::run(&mut host, harvest_args(&base_url, &["--output", "yaml"]))
        .await
        .unwrap();

    let report: Report = serde_yaml::from_str(&host.output_str()).unwrap();
    assert_eq!(report.projects.len(), 2);
    assert_eq!(report.projects[1].name, "docs");
    assert_eq!(report.statistics.number_of_projects, 2);
    assert_eq!(report.statistics.most_open_issues.unwrap().name, "api");
}

#[tokio::test]
async fn test_harvest_to_file() {
    let server = two_project_gitlab().await;
    let base_url = format!("{}/api/v4", server.uri());
    let temp_dir = tempfile::tempdir().unwrap();
    let report_path = temp_dir.path().join("report.json");
    let report_path = report_path.to_str().unwrap();

    let mut host = TestHost::new();
    forge_census_lib::run(
        &mut host,
        harvest_args(&base_url, &["--output", "json", "--output-file", report_path, "--page-size", "50"]),
    )
    .await
    .unwrap();

    assert!(host.output_buf.is_empty());

    let report: Report = serde_json::from_str(&std::fs::read_to_string(report_path).unwrap()).unwrap();
    assert_eq!(report.projects.len(), 2);
}

#[tokio::test]
async fn test_harvest_with_config_file() {
    let server = two_project_gitlab().await;
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("census.toml");
    std::fs::write(&config_path, format!("base_url = \"{}/api/v4\"\nconcurrency = 2\n", server.uri())).unwrap();

    let mut host = TestHost::new();
    forge_census_lib::run(
        &mut host,
        [
            "census",
            "harvest",
            "--output",
            "json",
            "--color",
            "never",
            "--config",
            config_path.to_str().unwrap(),
        ],
    )
    .await
    .unwrap();

    let report: Report = serde_json::from_str(&host.output_str()).unwrap();
    assert_eq!(report.projects.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), ["api", "docs"]);
}

#[tokio::test]
async fn test_harvest_failure_produces_no_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let base_url = format!("{}/api/v4", server.uri());

    let mut host = TestHost::new();
    let _ = forge_census_lib::run(&mut host, harvest_args(&base_url, &["--output", "json"]))
        .await
        .unwrap_err();

    assert!(host.output_buf.is_empty());
}

#[tokio::test]
async fn test_init_writes_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("census.toml");

    let mut host = TestHost::new();
    forge_census_lib::run(&mut host, ["census", "init", config_path.to_str().unwrap()])
        .await
        .unwrap();

    let text = std::fs::read_to_string(&config_path).unwrap();
    assert!(text.contains("base_url"));
    assert!(host.output_str().contains("Generated default configuration file"));
}
