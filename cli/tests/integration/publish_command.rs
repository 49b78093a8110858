//! End-to-end rollouts against a fake container engine.
//!
//! A shell script named `docker` is put first on `PATH`. It answers `ps`
//! with a fixed node listing, swallows `exec` stdin, and logs every
//! invocation (plus the byte count it was fed) so tests can assert on the
//! exact engine calls.

#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FAKE_ENGINE: &str = r#"#!/bin/sh
case "$1" in
  ps)
    echo "ps $*" >> "$FAKE_LOG"
    printf 'kind-worker\tworker\nkind-control-plane\tcontrol-plane\nkind-external-load-balancer\texternal-load-balancer\n'
    ;;
  exec)
    bytes=$(wc -c | tr -d ' ')
    echo "$* [$bytes bytes]" >> "$FAKE_LOG"
    case " $* " in
      *" $FAKE_FAIL_NODE "*) echo "ctr: failed to import" >&2; exit 1 ;;
    esac
    ;;
  save)
    echo "$*" >> "$FAKE_LOG"
    cat "$FAKE_ARCHIVE"
    ;;
  *)
    echo "unexpected: $*" >&2; exit 2 ;;
esac
"#;

struct FakeEngine {
    dir: TempDir,
}

impl FakeEngine {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let bin = dir.path().join("docker");
        std::fs::write(&bin, FAKE_ENGINE).unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();
        std::fs::write(dir.path().join("app.tar"), docker_archive("app:latest")).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn command(&self) -> Command {
        let path = format!(
            "{}:{}",
            self.dir.path().display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("kindpush"));
        cmd.env("NO_COLOR", "1")
            .env("PATH", path)
            .env("KINDPUSH_CONFIG", self.path("config.yaml"))
            .env("FAKE_LOG", self.path("calls.log"))
            .env("FAKE_ARCHIVE", self.path("app.tar"))
            .env("FAKE_FAIL_NODE", "none")
            .env_remove("KIND_CLUSTER_NAME")
            .env_remove("KIND_EXPERIMENTAL_PROVIDER");
        cmd
    }

    fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.path("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }
}

fn docker_archive(tag: &str) -> Vec<u8> {
    let manifest = format!(r#"[{{"Config":"cfg.json","RepoTags":["{tag}"],"Layers":[]}}]"#);
    let mut builder = tar::Builder::new(Vec::new());
    let mut header = tar::Header::new_gnu();
    header.set_size(manifest.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, "manifest.json", manifest.as_bytes())
        .unwrap();
    builder.into_inner().unwrap()
}

fn exec_lines(calls: &[String]) -> Vec<&String> {
    calls.iter().filter(|c| c.starts_with("exec")).collect()
}

#[test]
fn test_nodes_lists_internal_nodes_sorted() {
    let engine = FakeEngine::new();
    engine
        .command()
        .args(["nodes", "--cluster", "kind"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kind-control-plane"))
        .stdout(predicate::str::contains("kind-worker"))
        .stdout(predicate::str::contains("load-balancer").not());

    let calls = engine.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains("label=io.x-k8s.kind.cluster=kind"), "{calls:?}");
}

#[test]
fn test_publish_archive_imports_on_every_node() {
    let engine = FakeEngine::new();
    let archive = engine.path("app.tar");
    let out = engine
        .command()
        .args(["--json", "publish", "kind.local/app:dev", "--archive"])
        .arg(&archive)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["operation"], "publish");
    assert_eq!(value["target"], "kind.local/app:dev");
    assert_eq!(value["source"], archive.display().to_string());
    assert_eq!(value["nodes"], serde_json::json!(["kind-control-plane", "kind-worker"]));
    let size = value["size_bytes"].as_u64().unwrap();

    let calls = engine.calls();
    let execs = exec_lines(&calls);
    assert_eq!(execs.len(), 2, "{calls:?}");
    for node in ["kind-control-plane", "kind-worker"] {
        let line = execs.iter().find(|l| l.contains(node)).expect("node exec");
        assert!(
            line.starts_with(&format!(
                "exec --privileged -i {node} ctr --namespace=k8s.io images import -"
            )),
            "{line}"
        );
        assert!(line.ends_with(&format!("[{size} bytes]")), "{line}");
    }
}

#[test]
fn test_publish_from_engine_runs_save_once() {
    let engine = FakeEngine::new();
    let out = engine
        .command()
        .args(["--json", "publish", "kind.local/app:dev", "--from-engine", "app:latest"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["source"], "app:latest");

    let calls = engine.calls();
    assert_eq!(calls.iter().filter(|c| c.starts_with("save")).count(), 1);
    assert!(calls.contains(&"save app:latest".to_string()), "{calls:?}");
    assert_eq!(exec_lines(&calls).len(), 2);
}

#[test]
fn test_tag_runs_force_tag_without_stdin() {
    let engine = FakeEngine::new();
    engine
        .command()
        .args(["tag", "kind.local/app:dev", "kind.local/app:stable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tagged kind.local/app:stable"));

    for line in exec_lines(&engine.calls()) {
        assert!(
            line.contains(
                "ctr --namespace=k8s.io images tag --force kind.local/app:dev kind.local/app:stable [0 bytes]"
            ),
            "{line}"
        );
        assert!(!line.contains(" -i "), "{line}");
    }
}

#[test]
fn test_failing_node_reports_every_failure_and_exits_one() {
    let engine = FakeEngine::new();
    let out = engine
        .command()
        .env("FAKE_FAIL_NODE", "kind-worker")
        .args(["--json", "tag", "app:old", "app:new"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["code"], "NODES_FAILED");
    assert_eq!(value["failures"][0]["node"], "kind-worker");
    assert!(
        value["failures"][0]["message"]
            .as_str()
            .unwrap()
            .contains("failed to import")
    );
    // The healthy node was still tagged.
    assert_eq!(exec_lines(&engine.calls()).len(), 2);
}

#[test]
fn test_empty_cluster_fails_with_no_nodes() {
    let engine = FakeEngine::new();
    // The fake lists the same nodes for every cluster; an engine with no
    // matching containers is simulated with a provider that prints nothing.
    let empty = engine.path("empty");
    std::fs::create_dir(&empty).unwrap();
    let bin = empty.join("podman");
    std::fs::write(&bin, "#!/bin/sh\nexit 0\n").unwrap();
    std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

    let path = format!("{}:{}", empty.display(), std::env::var("PATH").unwrap_or_default());
    engine
        .command()
        .env("PATH", path)
        .env("KIND_EXPERIMENTAL_PROVIDER", "podman")
        .args(["publish", "kind.local/app:dev", "--archive"])
        .arg(engine.path("app.tar"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no nodes"));
}

#[test]
fn test_missing_engine_binary_fails() {
    let engine = FakeEngine::new();
    let empty = engine.path("no-bin");
    std::fs::create_dir(&empty).unwrap();
    engine
        .command()
        .env("PATH", &empty)
        .env("KIND_EXPERIMENTAL_PROVIDER", "nerdctl")
        .arg("nodes")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nerdctl"));
}
