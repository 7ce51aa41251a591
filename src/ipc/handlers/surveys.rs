use crate::ipc::error::{err, ok, store_err};
use crate::ipc::handlers::drafts::resolve_draft;
use crate::ipc::helpers::{parse_params, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::{Survey, SurveyDraft, SurveyStatus};
use crate::store::ResponseInput;
use chrono::Utc;
use log::info;
use serde_json::json;

fn survey_row(survey: &Survey) -> serde_json::Value {
    json!({
        "id": survey.id,
        "title": survey.title,
        "targetGrade": survey.target_grade,
        "startDate": survey.start_date,
        "endDate": survey.end_date,
        "status": survey.status,
        "subjects": survey.subjects,
        "submittedCount": survey.submitted_count(),
        "totalCount": survey.total_count(),
    })
}

fn handle_surveys_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = state.store.surveys().iter().map(survey_row).collect();
    ok(&req.id, json!({ "surveys": rows }))
}

fn handle_surveys_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft: SurveyDraft = match resolve_draft(req, &state.drafts.survey) {
        Ok(d) => d,
        Err(e) => return e,
    };
    let Some(survey) = state.store.create_survey(&draft) else {
        return ok(
            &req.id,
            json!({ "created": false, "missing": draft.missing() }),
        );
    };
    info!("survey created: {} ({})", survey.title, survey.id);
    let result = json!({ "created": true, "survey": survey_row(survey) });
    state.drafts.survey = SurveyDraft::default();
    ok(&req.id, result)
}

fn handle_surveys_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let survey_id = match required_str(req, "surveyId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.store.survey(&survey_id) {
        Ok(survey) => ok(
            &req.id,
            json!({
                "survey": survey,
                "submittedCount": survey.submitted_count(),
                "totalCount": survey.total_count(),
            }),
        ),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_surveys_set_status(state: &mut AppState, req: &Request) -> serde_json::Value {
    let survey_id = match required_str(req, "surveyId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let raw = match required_str(req, "status") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(status) = SurveyStatus::parse(&raw) else {
        return err(
            &req.id,
            "bad_params",
            format!("unknown status: {}", raw),
            Some(json!({ "allowed": ["draft", "active", "completed"] })),
        );
    };
    match state.store.set_survey_status(&survey_id, status) {
        Ok(previous) => {
            if previous != status {
                info!("survey {} status {} -> {}", survey_id, previous, status);
            }
            ok(
                &req.id,
                json!({ "surveyId": survey_id, "previous": previous, "status": status }),
            )
        }
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_surveys_respond(state: &mut AppState, req: &Request) -> serde_json::Value {
    let survey_id = match required_str(req, "surveyId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let input: ResponseInput = match parse_params(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let now = Utc::now().to_rfc3339();
    let response = match state.store.respond(&survey_id, input, &now) {
        Ok(r) => json!(r),
        Err(e) => return store_err(&req.id, &e),
    };
    match state.store.survey(&survey_id) {
        Ok(survey) => ok(
            &req.id,
            json!({
                "response": response,
                "submittedCount": survey.submitted_count(),
                "totalCount": survey.total_count(),
            }),
        ),
        Err(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "surveys.list" => Some(handle_surveys_list(state, req)),
        "surveys.create" => Some(handle_surveys_create(state, req)),
        "surveys.open" => Some(handle_surveys_open(state, req)),
        "surveys.setStatus" => Some(handle_surveys_set_status(state, req)),
        "surveys.respond" => Some(handle_surveys_respond(state, req)),
        _ => None,
    }
}
