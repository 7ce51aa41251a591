use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_surveyd");
    let mut child = Command::new(exe)
        .env("SURVEYD_SEED_DEMO", "true")
        .env("SURVEYD_LOGIN_DELAY_MS", "0")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn surveyd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn read_line(reader: &mut BufReader<ChildStdout>) -> serde_json::Value {
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response");
    serde_json::from_str(line.trim()).expect("parse response json")
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let value = read_line(reader);
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    if value.get("ok").and_then(|v| v.as_bool()) == Some(false) {
        let code = value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        assert_ne!(
            code, "not_implemented",
            "unexpected unknown method for {}",
            method
        );
    }
    value
}

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let (s, r) = (&mut stdin, &mut reader);

    let health = request(s, r, "1", "health", json!({}));
    assert_eq!(health["ok"], true);
    assert_eq!(health["result"]["view"]["view"], "master");
    assert_eq!(health["result"]["timetablePhase"], "ungenerated");

    let _ = request(s, r, "2", "auth.login", json!({ "username": "t", "password": "p" }));
    let _ = request(s, r, "3", "auth.status", json!({}));
    let _ = request(s, r, "4", "drafts.get", json!({ "kind": "subject" }));
    let _ = request(s, r, "5", "subjects.list", json!({}));
    let _ = request(s, r, "6", "teachers.list", json!({}));
    let _ = request(s, r, "7", "classrooms.list", json!({}));
    let _ = request(s, r, "8", "surveys.list", json!({}));
    let _ = request(s, r, "9", "surveys.open", json!({ "surveyId": "1" }));
    let _ = request(s, r, "10", "view.navigate", json!({ "view": "analysis", "surveyId": "1" }));
    let _ = request(s, r, "11", "analysis.open", json!({}));
    let _ = request(s, r, "12", "timetable.generate", json!({}));
    let _ = request(s, r, "13", "timetable.checkConflicts", json!({}));
    let _ = request(s, r, "14", "timetable.get", json!({}));
    let _ = request(s, r, "15", "view.back", json!({}));
    let _ = request(s, r, "16", "auth.logout", json!({}));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn unknown_methods_and_bad_lines_get_error_replies() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    writeln!(stdin, "{{\"id\":\"x\",\"method\":\"nope.nothing\"}}").expect("write");
    stdin.flush().expect("flush");
    let resp = read_line(&mut reader);
    assert_eq!(resp["ok"], false);
    assert_eq!(resp["error"]["code"], "not_implemented");

    // Blank lines are skipped; garbage gets an id-less bad_json reply.
    writeln!(stdin).expect("write");
    writeln!(stdin, "this is not json").expect("write");
    stdin.flush().expect("flush");
    let resp = read_line(&mut reader);
    assert_eq!(resp["ok"], false);
    assert_eq!(resp["error"]["code"], "bad_json");
    assert!(resp.get("id").is_none());

    // The loop keeps serving after a bad line.
    writeln!(stdin, "{{\"id\":\"y\",\"method\":\"health\"}}").expect("write");
    stdin.flush().expect("flush");
    let resp = read_line(&mut reader);
    assert_eq!(resp["id"], "y");
    assert_eq!(resp["ok"], true);

    drop(stdin);
    let _ = child.wait();
}
