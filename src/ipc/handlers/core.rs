use crate::ipc::error::{err, ok, store_err};
use crate::ipc::helpers::{optional_str, required_str};
use crate::ipc::types::{AppState, Request};
use crate::view::{View, ViewKind};
use log::info;
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "view": state.view,
            "timetablePhase": state.store.timetable().phase(),
            "loggedIn": state.session.is_some(),
        }),
    )
}

fn view_result(state: &AppState) -> serde_json::Value {
    json!({
        "view": state.view,
        "selectedSurveyId": state.selected_survey,
    })
}

/// Moves to `view`, remembering the survey a survey-bound view was opened for.
fn enter(state: &mut AppState, req: &Request, view: View) -> serde_json::Value {
    if let Some(survey_id) = view.survey_id() {
        if let Err(e) = state.store.survey(survey_id) {
            return store_err(&req.id, &e);
        }
        state.selected_survey = Some(survey_id.to_string());
    }
    if view != state.view {
        info!("view {:?} -> {:?}", state.view, view);
    }
    state.view = view;
    ok(&req.id, view_result(state))
}

fn handle_view_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, view_result(state))
}

fn handle_view_navigate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let raw = match required_str(req, "view") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(kind) = ViewKind::parse(&raw) else {
        return err(
            &req.id,
            "bad_params",
            format!("unknown view: {}", raw),
            Some(json!({ "allowed": ["master", "survey", "analysis", "timetable"] })),
        );
    };
    // Without an explicit survey, stay on the one already selected.
    let survey_id = optional_str(req, "surveyId").or_else(|| state.selected_survey.clone());
    match View::resolve(kind, survey_id.as_deref()) {
        Ok(view) => enter(state, req, view),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_view_next(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.view.next(state.selected_survey.as_deref()) {
        Ok(view) => enter(state, req, view),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_view_back(state: &mut AppState, req: &Request) -> serde_json::Value {
    let view = state.view.back();
    enter(state, req, view)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "view.get" => Some(handle_view_get(state, req)),
        "view.navigate" => Some(handle_view_navigate(state, req)),
        "view.next" => Some(handle_view_next(state, req)),
        "view.back" => Some(handle_view_back(state, req)),
        _ => None,
    }
}
