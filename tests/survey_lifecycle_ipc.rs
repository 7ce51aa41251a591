use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar(seed_demo: bool) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_surveyd");
    let mut child = Command::new(exe)
        .env("SURVEYD_SEED_DEMO", if seed_demo { "true" } else { "false" })
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn surveyd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({ "id": "1", "method": method, "params": params });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    serde_json::from_str(line.trim()).expect("parse response json")
}

fn create_subject(stdin: &mut ChildStdin, reader: &mut BufReader<ChildStdout>, name: &str) -> String {
    let res = request(
        stdin,
        reader,
        "subjects.add",
        json!({ "name": name, "category": "Math", "maxStudents": 30 }),
    );
    res["result"]["subject"]["id"]
        .as_str()
        .expect("subject id")
        .to_string()
}

#[test]
fn create_survey_requires_title_and_grade_and_starts_as_draft() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar(false);
    let (s, r) = (&mut stdin, &mut reader);

    let res = request(s, r, "surveys.create", json!({ "title": "Spring" }));
    assert_eq!(res["ok"], true);
    assert_eq!(res["result"]["created"], false);
    assert_eq!(res["result"]["missing"], json!(["targetGrade"]));

    // Dates are not validated and subject ids are taken as given.
    let res = request(
        s,
        r,
        "surveys.create",
        json!({
            "title": "Spring",
            "targetGrade": "3",
            "startDate": "2024-02-01",
            "endDate": "2024-01-01",
            "subjects": ["does-not-exist"]
        }),
    );
    assert_eq!(res["result"]["created"], true);
    let survey = &res["result"]["survey"];
    assert_eq!(survey["status"], "draft");
    assert_eq!(survey["submittedCount"], 0);
    assert_eq!(survey["totalCount"], 0);

    let list = request(s, r, "surveys.list", json!({}));
    assert_eq!(list["result"]["surveys"].as_array().map(|a| a.len()), Some(1));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn status_transitions_only_move_forward() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar(false);
    let (s, r) = (&mut stdin, &mut reader);

    let res = request(s, r, "surveys.create", json!({ "title": "T", "targetGrade": "2" }));
    let survey_id = res["result"]["survey"]["id"].as_str().expect("id").to_string();

    let res = request(
        s,
        r,
        "surveys.setStatus",
        json!({ "surveyId": survey_id, "status": "completed" }),
    );
    assert_eq!(res["ok"], false);
    assert_eq!(res["error"]["code"], "invalid_transition");
    assert_eq!(res["error"]["details"]["from"], "draft");

    let res = request(
        s,
        r,
        "surveys.setStatus",
        json!({ "surveyId": survey_id, "status": "active" }),
    );
    assert_eq!(res["result"]["previous"], "draft");
    assert_eq!(res["result"]["status"], "active");

    let res = request(
        s,
        r,
        "surveys.setStatus",
        json!({ "surveyId": survey_id, "status": "archived" }),
    );
    assert_eq!(res["error"]["code"], "bad_params");

    let res = request(
        s,
        r,
        "surveys.setStatus",
        json!({ "surveyId": "missing", "status": "active" }),
    );
    assert_eq!(res["error"]["code"], "not_found");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn responses_upsert_per_student_and_counts_follow() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar(false);
    let (s, r) = (&mut stdin, &mut reader);

    let calc = create_subject(s, r, "Calculus");
    let stats = create_subject(s, r, "Statistics");
    let res = request(
        s,
        r,
        "surveys.create",
        json!({ "title": "T", "targetGrade": "3", "subjects": [calc, stats] }),
    );
    let survey_id = res["result"]["survey"]["id"].as_str().expect("id").to_string();

    let prefs = json!([
        { "subjectId": calc, "priority": 1 },
        { "subjectId": stats, "priority": 2 }
    ]);
    let res = request(
        s,
        r,
        "surveys.respond",
        json!({ "surveyId": survey_id, "studentId": "s1", "studentName": "Kim", "preferences": prefs }),
    );
    assert_eq!(res["result"]["response"]["submitted"], false);
    assert_eq!(res["result"]["submittedCount"], 0);
    assert_eq!(res["result"]["totalCount"], 1);

    let res = request(
        s,
        r,
        "surveys.respond",
        json!({ "surveyId": survey_id, "studentId": "s1", "studentName": "Kim", "preferences": prefs, "submit": true }),
    );
    assert_eq!(res["result"]["response"]["submitted"], true);
    assert!(res["result"]["response"]["submittedAt"].is_string());
    assert_eq!(res["result"]["submittedCount"], 1);
    assert_eq!(res["result"]["totalCount"], 1);

    let res = request(
        s,
        r,
        "surveys.respond",
        json!({ "surveyId": survey_id, "studentId": "s2", "preferences": [{ "subjectId": "other", "priority": 1 }] }),
    );
    assert_eq!(res["error"]["code"], "bad_params");

    let list = request(s, r, "surveys.list", json!({}));
    for row in list["result"]["surveys"].as_array().expect("surveys") {
        assert!(row["submittedCount"].as_u64() <= row["totalCount"].as_u64());
    }

    let opened = request(s, r, "surveys.open", json!({ "surveyId": survey_id }));
    let responses = opened["result"]["survey"]["responses"].as_array().expect("responses");
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["studentId"], "s1");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn demo_survey_lists_its_submissions() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar(true);
    let (s, r) = (&mut stdin, &mut reader);

    let list = request(s, r, "surveys.list", json!({}));
    let rows = list["result"]["surveys"].as_array().expect("surveys");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "active");
    assert_eq!(rows[0]["submittedCount"], 2);
    assert_eq!(rows[0]["totalCount"], 2);

    drop(stdin);
    let _ = child.wait();
}
