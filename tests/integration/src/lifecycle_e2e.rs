//! End-to-end lifecycle scenarios
//!
//! Each scenario loads real documents from a temporary workspace, resolves a
//! selection, names the container and drives it through a recording runtime,
//! repeating the whole flow once per simulated invocation.

use ctxbox_core::lifecycle::{ImageSource, prepare};
use ctxbox_core::{ConfigLoader, Orchestrator, Prepared, RunOptions, Transition};
use ctxbox_docker::ContainerStatus;
use ctxbox_test_utils::{Call, FakeRuntime, TestWorkspace};
use pretty_assertions::assert_eq;

const CONFIG: &str = r#"
version: 0
image: alpine:3.20
mounts:
  ./: /src
layers:
  env:
    dev:
      env:
        STAGE: dev
    prod:
      env:
        STAGE: prod
"#;

fn workspace(config: &str) -> TestWorkspace {
    let ws = TestWorkspace::new();
    ws.mkdir("project/pkg");
    ws.write_config("project", config);
    ws
}

/// One invocation's view: load, resolve and prepare from scratch.
fn invocation(ws: &TestWorkspace, names: &[&str]) -> Prepared {
    let contexts = ConfigLoader::new(ws.path("project/pkg"))
        .with_home_dir(Some(ws.home()))
        .with_env(|_| None)
        .load(None)
        .unwrap();
    let context = contexts.resolve(names).unwrap();
    prepare(&contexts.location, context).unwrap()
}

fn run(runtime: &FakeRuntime, ws: &TestWorkspace, prepared: &Prepared) -> Transition {
    let options = RunOptions::new(ws.path("project/pkg"));
    Orchestrator::new(runtime).run(prepared, &options).unwrap()
}

fn run_calls(runtime: &FakeRuntime) -> usize {
    runtime
        .mutations()
        .iter()
        .filter(|call| matches!(call, Call::Run(_)))
        .count()
}

#[test]
fn unchanged_configuration_reuses_the_container() {
    let ws = workspace(CONFIG);
    let runtime = FakeRuntime::new();

    let first = invocation(&ws, &["dev"]);
    assert_eq!(run(&runtime, &ws, &first), Transition::CreateAndRun);

    let second = invocation(&ws, &["dev"]);
    assert_eq!(second.container, first.container);
    assert_eq!(run(&runtime, &ws, &second), Transition::RestartAttached);

    assert_eq!(run_calls(&runtime), 1);
    assert_eq!(runtime.containers(), vec![first.container]);
}

#[test]
fn changed_env_creates_a_fresh_container() {
    let ws = workspace(CONFIG);
    let runtime = FakeRuntime::new();

    let before = invocation(&ws, &["dev"]);
    run(&runtime, &ws, &before);

    ws.write_config("project", &CONFIG.replace("STAGE: dev", "STAGE: development"));
    let after = invocation(&ws, &["dev"]);

    assert_ne!(after.container, before.container);
    assert_eq!(run(&runtime, &ws, &after), Transition::CreateAndRun);
    assert_eq!(run_calls(&runtime), 2);
    assert_eq!(runtime.status_of(&before.container), ContainerStatus::Exited);
}

#[test]
fn selections_get_distinct_containers() {
    let ws = workspace(CONFIG);
    let dev = invocation(&ws, &["dev"]);
    let prod = invocation(&ws, &["prod"]);

    assert_ne!(dev.container, prod.container);
    assert!(dev.container.contains("-dev-"));
    assert!(prod.container.contains("-prod-"));
}

#[test]
fn running_container_gets_a_new_session() {
    let ws = workspace(CONFIG);
    let prepared = invocation(&ws, &["prod"]);
    let runtime = FakeRuntime::new().with_container(&prepared.container, ContainerStatus::Running);

    assert_eq!(run(&runtime, &ws, &prepared), Transition::ExecSession);
    assert_eq!(run_calls(&runtime), 0);
    assert_eq!(runtime.status_of(&prepared.container), ContainerStatus::Running);
}

#[test]
fn workdir_follows_the_mounted_project() {
    let ws = workspace(CONFIG);
    let prepared = invocation(&ws, &["dev"]);
    let runtime = FakeRuntime::new();
    run(&runtime, &ws, &prepared);

    let spec = runtime
        .mutations()
        .into_iter()
        .find_map(|call| match call {
            Call::Run(spec) => Some(spec),
            _ => None,
        })
        .unwrap();
    assert_eq!(spec.workdir.as_deref(), Some("/src/pkg"));
    assert!(
        spec.env
            .contains(&("CTXBOX_CONTEXT".to_string(), "dev".to_string()))
    );
}

#[test]
fn dockerfile_edits_change_image_and_container() {
    let config = r#"
build:
  dockerfile: ./Dockerfile
  args:
    GO_VERSION: "1.23"
"#;
    let ws = workspace(config);
    ws.write("project/Dockerfile", "FROM golang:${GO_VERSION}\n");
    let runtime = FakeRuntime::new();

    let first = invocation(&ws, &[]);
    let ImageSource::Built(spec) = &first.image else {
        panic!("expected a built image, got {:?}", first.image);
    };
    assert_eq!(spec.args, vec![("GO_VERSION".to_string(), "1.23".to_string())]);
    run(&runtime, &ws, &first);
    run(&runtime, &ws, &invocation(&ws, &[]));

    let builds = |runtime: &FakeRuntime| {
        runtime
            .mutations()
            .iter()
            .filter(|call| matches!(call, Call::Build(_)))
            .count()
    };
    assert_eq!(builds(&runtime), 1);

    ws.write("project/Dockerfile", "FROM golang:${GO_VERSION}\nRUN go version\n");
    let edited = invocation(&ws, &[]);
    assert_ne!(edited.image.reference(), first.image.reference());
    assert_ne!(edited.container, first.container);

    assert_eq!(run(&runtime, &ws, &edited), Transition::CreateAndRun);
    assert_eq!(builds(&runtime), 2);
}
