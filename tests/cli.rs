use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "wayplan-test-{}-{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn wayplan() -> Command {
    let mut cmd = Command::cargo_bin("wayplan").unwrap();
    // Keep the tests offline and deterministic
    for var in ["OPENAI_API_KEY", "FOURSQUARE_API_KEY", "GOOGLE_MAPS_API_KEY", "ORS_TOKEN"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn schema_prints_config_schema() {
    wayplan()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("llm_provider"))
        .stdout(predicate::str::contains("search_limit"));
}

#[test]
fn generate_rejects_missing_request_file() {
    wayplan()
        .args(["generate", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read request file"));
}

#[test]
fn generate_rejects_invalid_request_json() {
    let dir = scratch_dir("badjson");
    let request = dir.join("request.json");
    fs::write(&request, "{ not json").unwrap();

    wayplan()
        .arg("generate")
        .arg(&request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid request file"));
}

#[test]
fn generate_without_credentials_yields_sentinel_stops() {
    let dir = scratch_dir("offline");
    let config = dir.join("wayplan.yaml");
    fs::write(&config, "llm_provider: mock\n").unwrap();

    let request = dir.join("request.json");
    fs::write(
        &request,
        r#"{
            "tasks": [
                { "id": "t1", "raw": "spa", "kind": "flexible", "category_hint": "spa" },
                { "id": "t2", "raw": "dinner", "kind": "fixed", "location": { "lat": 28.65, "lon": 77.23 } }
            ],
            "origin": { "lat": 28.6139, "lon": 77.2090 },
            "mode": "order",
            "transport_mode": "walking"
        }"#,
    )
    .unwrap();

    wayplan()
        .arg("generate")
        .arg("--config")
        .arg(&config)
        .arg(&request)
        .assert()
        .success()
        .stdout(predicate::str::contains("no_candidate"))
        .stdout(predicate::str::contains("\"t2\""));
}

#[test]
fn generate_fails_on_empty_task_list() {
    let dir = scratch_dir("empty");
    let request = dir.join("request.json");
    fs::write(
        &request,
        r#"{
            "tasks": [],
            "origin": { "lat": 1.0, "lon": 2.0 },
            "mode": "order",
            "transport_mode": "walking"
        }"#,
    )
    .unwrap();

    wayplan()
        .arg("generate")
        .arg(&request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task list is empty"));
}

#[test]
fn generate_rejects_unknown_mode() {
    let dir = scratch_dir("badmode");
    let request = dir.join("request.json");
    fs::write(
        &request,
        r#"{
            "tasks": [{ "id": "t1", "raw": "spa", "kind": "flexible" }],
            "origin": { "lat": 1.0, "lon": 2.0 },
            "mode": "teleport",
            "transport_mode": "walking"
        }"#,
    )
    .unwrap();

    wayplan()
        .arg("generate")
        .arg(&request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid request file"));
}

#[test]
fn parse_with_mock_provider_emits_tasks() {
    let dir = scratch_dir("parse");
    let config = dir.join("wayplan.yaml");
    fs::write(&config, "llm_provider: mock\n").unwrap();

    wayplan()
        .args(["parse", "--config"])
        .arg(&config)
        .arg("spa, shopping, dinner at Chandni Chowk, movie")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tasks\""))
        .stdout(predicate::str::contains("flexible"));
}
