use crate::ipc::error::{ok, store_err};
use crate::ipc::handlers::drafts::resolve_draft;
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use crate::model::{ClassroomDraft, SubjectDraft, TeacherDraft};
use log::info;
use serde_json::json;

fn not_created(req: &Request, missing: Vec<&'static str>) -> serde_json::Value {
    ok(&req.id, json!({ "created": false, "missing": missing }))
}

fn handle_subjects_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "subjects": state.store.subjects() }))
}

fn handle_subjects_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft: SubjectDraft = match resolve_draft(req, &state.drafts.subject) {
        Ok(d) => d,
        Err(e) => return e,
    };
    let Some(subject) = state.store.add_subject(&draft) else {
        return not_created(req, draft.missing());
    };
    info!("subject added: {} ({})", subject.name, subject.id);
    let result = json!({ "created": true, "subject": subject });
    state.drafts.subject = SubjectDraft::default();
    ok(&req.id, result)
}

fn handle_subjects_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let subject_id = match required_str(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.store.delete_subject(&subject_id) {
        Ok(subject) => {
            info!("subject deleted: {} ({})", subject.name, subject.id);
            ok(&req.id, json!({ "deleted": subject }))
        }
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_teachers_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "teachers": state.store.teachers() }))
}

fn handle_teachers_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft: TeacherDraft = match resolve_draft(req, &state.drafts.teacher) {
        Ok(d) => d,
        Err(e) => return e,
    };
    let Some(teacher) = state.store.add_teacher(&draft) else {
        return not_created(req, draft.missing());
    };
    info!("teacher added: {} ({})", teacher.name, teacher.id);
    let result = json!({ "created": true, "teacher": teacher });
    state.drafts.teacher = TeacherDraft::default();
    ok(&req.id, result)
}

fn handle_teachers_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let teacher_id = match required_str(req, "teacherId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.store.delete_teacher(&teacher_id) {
        Ok(teacher) => {
            info!("teacher deleted: {} ({})", teacher.name, teacher.id);
            ok(&req.id, json!({ "deleted": teacher }))
        }
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_classrooms_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "classrooms": state.store.classrooms() }))
}

fn handle_classrooms_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft: ClassroomDraft = match resolve_draft(req, &state.drafts.classroom) {
        Ok(d) => d,
        Err(e) => return e,
    };
    let Some(classroom) = state.store.add_classroom(&draft) else {
        return not_created(req, draft.missing());
    };
    info!("classroom added: {} ({})", classroom.name, classroom.id);
    let result = json!({ "created": true, "classroom": classroom });
    state.drafts.classroom = ClassroomDraft::default();
    ok(&req.id, result)
}

fn handle_classrooms_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let classroom_id = match required_str(req, "classroomId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.store.delete_classroom(&classroom_id) {
        Ok(classroom) => {
            info!("classroom deleted: {} ({})", classroom.name, classroom.id);
            ok(&req.id, json!({ "deleted": classroom }))
        }
        Err(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "subjects.list" => Some(handle_subjects_list(state, req)),
        "subjects.add" => Some(handle_subjects_add(state, req)),
        "subjects.delete" => Some(handle_subjects_delete(state, req)),
        "teachers.list" => Some(handle_teachers_list(state, req)),
        "teachers.add" => Some(handle_teachers_add(state, req)),
        "teachers.delete" => Some(handle_teachers_delete(state, req)),
        "classrooms.list" => Some(handle_classrooms_list(state, req)),
        "classrooms.add" => Some(handle_classrooms_add(state, req)),
        "classrooms.delete" => Some(handle_classrooms_delete(state, req)),
        _ => None,
    }
}
