use crate::ipc::error::{ok, store_err};
use crate::ipc::handlers::analysis::target_survey;
use crate::ipc::helpers::{parse_params, required_str};
use crate::ipc::types::{AppState, Request};
use crate::store::Store;
use crate::timetable::{SlotAssignment, TimetableSlot};
use log::{info, warn};
use serde_json::json;

fn slot_json(store: &Store, slot: &TimetableSlot) -> serde_json::Value {
    let mut v = json!(slot);
    v["subjectName"] = json!(slot
        .subject_id
        .as_deref()
        .and_then(|id| store.subject(id).ok())
        .map(|s| s.name.as_str()));
    v["teacherName"] = json!(slot
        .teacher_id
        .as_deref()
        .and_then(|id| store.teacher(id).ok())
        .map(|t| t.name.as_str()));
    v["classroomName"] = json!(slot
        .classroom_id
        .as_deref()
        .and_then(|id| store.classroom(id).ok())
        .map(|c| c.name.as_str()));
    v
}

fn timetable_result(state: &AppState, req: &Request) -> serde_json::Value {
    let store = &state.store;
    let timetable = store.timetable();
    let slots: Vec<serde_json::Value> = timetable
        .slots()
        .iter()
        .map(|s| slot_json(store, s))
        .collect();
    // Unassigned counts only make sense against a survey's subject list.
    let unassigned = target_survey(state, req)
        .ok()
        .and_then(|id| store.survey(&id).ok())
        .map(|survey| store.unassigned(survey));
    json!({
        "phase": timetable.phase(),
        "slots": slots,
        "assignedCount": timetable.slots().iter().filter(|s| s.is_assigned()).count(),
        "conflicts": timetable.conflicts(),
        "unassigned": unassigned,
    })
}

fn handle_timetable_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, timetable_result(state, req))
}

fn handle_timetable_generate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let count = state.store.generate_timetable().len();
    info!("timetable generated: {} slots", count);
    ok(&req.id, timetable_result(state, req))
}

fn handle_timetable_assign(state: &mut AppState, req: &Request) -> serde_json::Value {
    let slot_id = match required_str(req, "slotId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let assignment: SlotAssignment = match parse_params(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.store.assign_slot(&slot_id, assignment) {
        Ok(slot) => {
            let slot = slot.clone();
            info!("slot {} assigned", slot.id);
            ok(&req.id, json!({ "slot": slot_json(&state.store, &slot) }))
        }
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_timetable_clear_slot(state: &mut AppState, req: &Request) -> serde_json::Value {
    let slot_id = match required_str(req, "slotId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.store.clear_slot(&slot_id) {
        Ok(slot) => {
            let slot = slot.clone();
            info!("slot {} cleared", slot.id);
            ok(&req.id, json!({ "slot": slot_json(&state.store, &slot) }))
        }
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_timetable_check_conflicts(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conflicts = state.store.check_conflicts().to_vec();
    if !conflicts.is_empty() {
        warn!("timetable has {} conflict(s)", conflicts.len());
    }
    ok(&req.id, json!({ "conflicts": conflicts }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "timetable.get" => Some(handle_timetable_get(state, req)),
        "timetable.generate" => Some(handle_timetable_generate(state, req)),
        "timetable.assign" => Some(handle_timetable_assign(state, req)),
        "timetable.clearSlot" => Some(handle_timetable_clear_slot(state, req)),
        "timetable.checkConflicts" => Some(handle_timetable_check_conflicts(state, req)),
        _ => None,
    }
}
