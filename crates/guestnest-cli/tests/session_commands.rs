//! One-shot session commands against a mock identity backend.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Home whose config lets release builds talk to the local mock server.
fn temp_guestnest_home() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "allow_localhost_in_release = true\n",
    )
    .unwrap();
    dir
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn user_json() -> serde_json::Value {
    json!({
        "id": "u-42",
        "username": "ana",
        "email": "ana@example.com",
        "name": "Ana Lima"
    })
}

async fn mount_me(server: &MockServer, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_whoami_prints_resolved_user() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    mount_me(&server, user_json()).await;
    let home = temp_guestnest_home();

    cargo_bin_cmd!("guestnest")
        .env("GUESTNEST_HOME", home.path())
        .env("GUESTNEST_BACKEND_URL", server.uri())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("ana (Ana Lima)"));
}

#[tokio::test]
async fn test_whoami_anonymous() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    mount_me(&server, serde_json::Value::Null).await;
    let home = temp_guestnest_home();

    cargo_bin_cmd!("guestnest")
        .env("GUESTNEST_HOME", home.path())
        .env("GUESTNEST_BACKEND_URL", server.uri())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[tokio::test]
async fn test_whoami_degrades_to_anonymous_on_server_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let home = temp_guestnest_home();

    cargo_bin_cmd!("guestnest")
        .env("GUESTNEST_HOME", home.path())
        .env("GUESTNEST_BACKEND_URL", server.uri())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[tokio::test]
async fn test_login_reports_user() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "identifier": "ana", "password": "secret" })))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "sid=abc; Path=/; HttpOnly"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_me(&server, user_json()).await;
    let home = temp_guestnest_home();

    cargo_bin_cmd!("guestnest")
        .env("GUESTNEST_HOME", home.path())
        .env("GUESTNEST_BACKEND_URL", server.uri())
        .env("GUESTNEST_PASSWORD", "secret")
        .args(["login", "ana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as ana (Ana Lima)"));
}

#[tokio::test]
async fn test_login_rejection_shows_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Wrong password" })))
        .mount(&server)
        .await;
    let home = temp_guestnest_home();

    cargo_bin_cmd!("guestnest")
        .env("GUESTNEST_HOME", home.path())
        .env("GUESTNEST_BACKEND_URL", server.uri())
        .args(["login", "ana", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Login failed: Wrong password"));
}

#[test]
fn test_login_requires_identifier_before_any_request() {
    let home = temp_guestnest_home();

    // Unroutable backend: validation must fail before a request is made.
    cargo_bin_cmd!("guestnest")
        .env("GUESTNEST_HOME", home.path())
        .env("GUESTNEST_BACKEND_URL", "http://127.0.0.1:9")
        .args(["login", "  ", "--password", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Username or email is required"));
}

#[tokio::test]
async fn test_signup_sends_display_name_as_name() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .and(body_json(json!({
            "username": "ana",
            "email": "ana@example.com",
            "password": "secret",
            "name": "Ana Lima"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    mount_me(&server, user_json()).await;
    let home = temp_guestnest_home();

    cargo_bin_cmd!("guestnest")
        .env("GUESTNEST_HOME", home.path())
        .env("GUESTNEST_BACKEND_URL", server.uri())
        .args([
            "signup",
            "ana",
            "--email",
            "ana@example.com",
            "--name",
            "Ana Lima",
            "--password",
            "secret",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed up as ana"));
}

#[tokio::test]
async fn test_logout_failure_exits_nonzero() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let home = temp_guestnest_home();

    cargo_bin_cmd!("guestnest")
        .env("GUESTNEST_HOME", home.path())
        .env("GUESTNEST_BACKEND_URL", server.uri())
        .arg("logout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Logout failed"));
}
