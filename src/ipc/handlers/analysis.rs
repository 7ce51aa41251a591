use crate::analysis;
use crate::error::StoreError;
use crate::ipc::error::{ok, store_err};
use crate::ipc::helpers::optional_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

/// Survey a survey-bound request targets: `params.surveyId`, else the
/// selected survey.
pub fn target_survey(state: &AppState, req: &Request) -> Result<String, StoreError> {
    optional_str(req, "surveyId")
        .or_else(|| state.selected_survey.clone())
        .ok_or(StoreError::NoSurveySelected)
}

fn handle_analysis_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let survey_id = match target_survey(state, req) {
        Ok(v) => v,
        Err(e) => return store_err(&req.id, &e),
    };
    let stats = match state.store.survey(&survey_id) {
        Ok(survey) => analysis::survey_stats(survey, state.store.subjects()),
        Err(e) => return store_err(&req.id, &e),
    };
    state.selected_survey = Some(survey_id);
    ok(&req.id, json!({ "stats": stats }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "analysis.open" => Some(handle_analysis_open(state, req)),
        _ => None,
    }
}
