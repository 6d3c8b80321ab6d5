//! Tests for remote parent documents served over HTTP

use std::path::PathBuf;

use ctxbox_core::{ConfigLoader, Contexts, Error, Result};
use ctxbox_test_utils::TestWorkspace;
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// The blocking client must not run on an async worker thread.
async fn load_blocking(cwd: PathBuf, home: PathBuf, source: Option<String>) -> Result<Contexts> {
    tokio::task::spawn_blocking(move || {
        ConfigLoader::new(cwd)
            .with_home_dir(Some(home))
            .with_env(|_| None)
            .load(source.as_deref())
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_local_document_with_remote_parent() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/team/base.yaml",
        200,
        "version: 0\nimage: team/image:1.0\nenv: { TEAM: core }\n",
    )
    .await;

    let ws = TestWorkspace::new();
    ws.write_config(
        "project",
        &format!("parent: {}/team/base.yaml\nenv: {{ LOCAL: \"yes\" }}\n", server.uri()),
    );

    let contexts = load_blocking(ws.path("project"), ws.home(), None).await.unwrap();

    assert_eq!(contexts.context.image, "team/image:1.0");
    assert_eq!(contexts.context.env["TEAM"], "core");
    assert_eq!(contexts.context.env["LOCAL"], "yes");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_remote_parent_relative_to_remote_document() {
    let server = MockServer::start().await;
    serve(&server, "/team/child.yaml", 200, "parent: org.yaml\nnetwork: bridge\n").await;
    serve(
        &server,
        "/team/org.yaml",
        200,
        "image: org/base\nbuild: { dockerfile: Dockerfile }\n",
    )
    .await;

    let ws = TestWorkspace::new();
    ws.mkdir("project");
    let url = format!("{}/team/child.yaml", server.uri());

    let contexts = load_blocking(ws.path("project"), ws.home(), Some(url)).await.unwrap();

    assert_eq!(contexts.context.image, "org/base");
    assert_eq!(contexts.context.network, "bridge");
    // paths inside remote documents are left as written
    assert_eq!(contexts.context.build.dockerfile, "Dockerfile");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_remote_parent_http_error() {
    let server = MockServer::start().await;
    serve(&server, "/missing.yaml", 404, "not found").await;

    let ws = TestWorkspace::new();
    ws.write_config(
        "project",
        &format!("parent: {}/missing.yaml\n", server.uri()),
    );

    let err = load_blocking(ws.path("project"), ws.home(), None)
        .await
        .unwrap_err();

    match err {
        Error::Parent { source, .. } => {
            assert!(matches!(*source, Error::Fetch { .. }), "{source}");
            assert!(source.to_string().contains("404"), "{source}");
        }
        other => panic!("expected a parent error, got {other}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_remote_cycle_through_dot_segments() {
    let server = MockServer::start().await;
    serve(&server, "/cfg/a.yaml", 200, "parent: ../cfg/./b.yaml\n").await;
    serve(&server, "/cfg/b.yaml", 200, "parent: ../cfg/a.yaml\n").await;

    let ws = TestWorkspace::new();
    ws.mkdir("project");
    let url = format!("{}/cfg/a.yaml", server.uri());

    let err = load_blocking(ws.path("project"), ws.home(), Some(url))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ParentCycle { .. }), "{err}");
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
}
