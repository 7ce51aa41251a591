use crate::auth::Credentials;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::parse_params;
use crate::ipc::types::{AppState, Request};
use log::{info, warn};
use serde_json::json;

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let credentials: Credentials = match parse_params(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.authenticator.authenticate(&credentials) {
        Ok(session) => {
            info!("login: {}", session.username);
            let result = json!({ "authenticated": true, "session": session });
            state.session = Some(session);
            ok(&req.id, result)
        }
        Err(e) => {
            warn!("login rejected: {}", e);
            err(&req.id, "auth_failed", e.to_string(), None)
        }
    }
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    let was = state.session.take();
    if let Some(s) = &was {
        info!("logout: {}", s.username);
    }
    ok(&req.id, json!({ "loggedOut": was.is_some() }))
}

fn handle_status(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "loggedIn": state.session.is_some(),
            "session": state.session,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.login" => Some(handle_login(state, req)),
        "auth.logout" => Some(handle_logout(state, req)),
        "auth.status" => Some(handle_status(state, req)),
        _ => None,
    }
}
