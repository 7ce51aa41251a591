use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{merge_draft, params_object, required_str};
use crate::ipc::types::{AppState, Request};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

#[derive(Clone, Copy)]
enum DraftKind {
    Subject,
    Teacher,
    Classroom,
    Survey,
}

impl DraftKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "subject" => Some(Self::Subject),
            "teacher" => Some(Self::Teacher),
            "classroom" => Some(Self::Classroom),
            "survey" => Some(Self::Survey),
            _ => None,
        }
    }
}

fn parse_kind(req: &Request) -> Result<DraftKind, serde_json::Value> {
    let raw = required_str(req, "kind")?;
    DraftKind::parse(&raw).ok_or_else(|| {
        err(
            &req.id,
            "bad_params",
            format!("unknown draft kind: {}", raw),
            Some(json!({ "allowed": ["subject", "teacher", "classroom", "survey"] })),
        )
    })
}

/// Draft an add/create command commits: the stored draft, overlaid with the
/// request params when there are any.
pub fn resolve_draft<T>(req: &Request, stored: &T) -> Result<T, serde_json::Value>
where
    T: Clone + Serialize + DeserializeOwned,
{
    match params_object(req) {
        Some(patch) => merge_draft(stored, patch).map_err(|m| err(&req.id, "bad_params", m, None)),
        None => Ok(stored.clone()),
    }
}

fn patch_draft<T>(req: &Request, draft: &mut T) -> Result<serde_json::Value, serde_json::Value>
where
    T: Serialize + DeserializeOwned,
{
    let patch = req
        .params
        .get("patch")
        .and_then(|v| v.as_object())
        .ok_or_else(|| err(&req.id, "bad_params", "missing patch", None))?;
    *draft = merge_draft(draft, patch).map_err(|m| err(&req.id, "bad_params", m, None))?;
    Ok(json!(draft))
}

fn handle_drafts_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let kind = match parse_kind(req) {
        Ok(k) => k,
        Err(e) => return e,
    };
    let draft = match kind {
        DraftKind::Subject => json!(state.drafts.subject),
        DraftKind::Teacher => json!(state.drafts.teacher),
        DraftKind::Classroom => json!(state.drafts.classroom),
        DraftKind::Survey => json!(state.drafts.survey),
    };
    ok(&req.id, json!({ "draft": draft }))
}

fn handle_drafts_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let kind = match parse_kind(req) {
        Ok(k) => k,
        Err(e) => return e,
    };
    let patched = match kind {
        DraftKind::Subject => patch_draft(req, &mut state.drafts.subject),
        DraftKind::Teacher => patch_draft(req, &mut state.drafts.teacher),
        DraftKind::Classroom => patch_draft(req, &mut state.drafts.classroom),
        DraftKind::Survey => patch_draft(req, &mut state.drafts.survey),
    };
    match patched {
        Ok(draft) => ok(&req.id, json!({ "draft": draft })),
        Err(e) => e,
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "drafts.get" => Some(handle_drafts_get(state, req)),
        "drafts.update" => Some(handle_drafts_update(state, req)),
        _ => None,
    }
}
