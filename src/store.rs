use crate::error::StoreError;
use crate::model::{
    new_id, Classroom, ClassroomDraft, Preference, StudentResponse, Subject, SubjectDraft, Survey,
    SurveyDraft, SurveyStatus, Teacher, TeacherDraft,
};
use crate::timetable::{SlotAssignment, Timetable, TimetableSlot};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One student's answer as submitted by the UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseInput {
    pub student_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub preferences: Vec<Preference>,
    #[serde(default)]
    pub submit: bool,
}

/// Ids that appear in no slot of the current grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unassigned {
    pub subjects: Vec<String>,
    pub teachers: Vec<String>,
    pub classrooms: Vec<String>,
}

/// All application data. Collections keep insertion order.
#[derive(Debug, Default)]
pub struct Store {
    subjects: Vec<Subject>,
    teachers: Vec<Teacher>,
    classrooms: Vec<Classroom>,
    surveys: Vec<Survey>,
    timetable: Timetable,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        subjects: Vec<Subject>,
        teachers: Vec<Teacher>,
        classrooms: Vec<Classroom>,
        surveys: Vec<Survey>,
    ) -> Self {
        Self {
            subjects,
            teachers,
            classrooms,
            surveys,
            timetable: Timetable::default(),
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn classrooms(&self) -> &[Classroom] {
        &self.classrooms
    }

    pub fn surveys(&self) -> &[Survey] {
        &self.surveys
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    // Master data. Adds with a missing required field return `None` and
    // leave the collection untouched.

    pub fn add_subject(&mut self, draft: &SubjectDraft) -> Option<&Subject> {
        if !draft.missing().is_empty() {
            return None;
        }
        self.subjects.push(Subject {
            id: new_id(),
            name: draft.name.trim().to_string(),
            category: draft.category.trim().to_string(),
            grade: draft.grade.trim().to_string(),
            credits: draft.credits,
            max_students: draft.max_students,
            description: draft.description.clone(),
        });
        self.subjects.last()
    }

    pub fn add_teacher(&mut self, draft: &TeacherDraft) -> Option<&Teacher> {
        if !draft.missing().is_empty() {
            return None;
        }
        self.teachers.push(Teacher {
            id: new_id(),
            name: draft.name.trim().to_string(),
            subjects: draft.subjects.clone(),
            max_hours: draft.max_hours,
            current_hours: 0,
        });
        self.teachers.last()
    }

    pub fn add_classroom(&mut self, draft: &ClassroomDraft) -> Option<&Classroom> {
        if !draft.missing().is_empty() {
            return None;
        }
        self.classrooms.push(Classroom {
            id: new_id(),
            name: draft.name.trim().to_string(),
            capacity: draft.capacity,
            kind: draft.kind,
            equipment: draft.equipment.clone(),
        });
        self.classrooms.last()
    }

    pub fn subject(&self, id: &str) -> Result<&Subject, StoreError> {
        self.subjects
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("subject", id))
    }

    pub fn teacher(&self, id: &str) -> Result<&Teacher, StoreError> {
        self.teachers
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("teacher", id))
    }

    pub fn classroom(&self, id: &str) -> Result<&Classroom, StoreError> {
        self.classrooms
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("classroom", id))
    }

    // Deletes do not cascade: surveys, teachers and slots may keep
    // referencing a removed id.

    pub fn delete_subject(&mut self, id: &str) -> Result<Subject, StoreError> {
        let idx = self
            .subjects
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("subject", id))?;
        Ok(self.subjects.remove(idx))
    }

    pub fn delete_teacher(&mut self, id: &str) -> Result<Teacher, StoreError> {
        let idx = self
            .teachers
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("teacher", id))?;
        Ok(self.teachers.remove(idx))
    }

    pub fn delete_classroom(&mut self, id: &str) -> Result<Classroom, StoreError> {
        let idx = self
            .classrooms
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("classroom", id))?;
        Ok(self.classrooms.remove(idx))
    }

    // Surveys

    /// Creates a draft survey. Dates and subject ids are taken as given.
    pub fn create_survey(&mut self, draft: &SurveyDraft) -> Option<&Survey> {
        if !draft.missing().is_empty() {
            return None;
        }
        self.surveys.push(Survey {
            id: new_id(),
            title: draft.title.trim().to_string(),
            target_grade: draft.target_grade.trim().to_string(),
            start_date: draft.start_date.clone(),
            end_date: draft.end_date.clone(),
            status: SurveyStatus::Draft,
            subjects: draft.subjects.clone(),
            responses: Vec::new(),
        });
        self.surveys.last()
    }

    pub fn survey(&self, id: &str) -> Result<&Survey, StoreError> {
        self.surveys
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("survey", id))
    }

    fn survey_mut(&mut self, id: &str) -> Result<&mut Survey, StoreError> {
        self.surveys
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("survey", id))
    }

    /// Returns the previous status. Setting the current status again is a no-op.
    pub fn set_survey_status(
        &mut self,
        id: &str,
        status: SurveyStatus,
    ) -> Result<SurveyStatus, StoreError> {
        let survey = self.survey_mut(id)?;
        let from = survey.status;
        if from == status {
            return Ok(from);
        }
        if !from.can_move_to(status) {
            return Err(StoreError::InvalidTransition { from, to: status });
        }
        survey.status = status;
        Ok(from)
    }

    /// Inserts or replaces the response of `input.student_id`. A submitted
    /// response stays submitted; `submitted_at` is restamped on every submit.
    pub fn respond(
        &mut self,
        survey_id: &str,
        input: ResponseInput,
        now: &str,
    ) -> Result<&StudentResponse, StoreError> {
        let survey = self.survey_mut(survey_id)?;
        if survey.status == SurveyStatus::Completed {
            return Err(StoreError::InvalidResponse("survey is completed".into()));
        }
        if input.student_id.trim().is_empty() {
            return Err(StoreError::InvalidResponse("studentId must not be empty".into()));
        }
        validate_preferences(&survey.subjects, &input.preferences)?;

        let idx = match survey
            .responses
            .iter()
            .position(|r| r.student_id == input.student_id)
        {
            Some(i) => i,
            None => {
                survey.responses.push(StudentResponse {
                    student_id: input.student_id.clone(),
                    student_name: String::new(),
                    preferences: Vec::new(),
                    submitted: false,
                    submitted_at: None,
                });
                survey.responses.len() - 1
            }
        };

        let response = &mut survey.responses[idx];
        response.student_name = input.student_name;
        response.preferences = input.preferences;
        if input.submit {
            response.submitted = true;
            response.submitted_at = Some(now.to_string());
        }
        Ok(response)
    }

    // Timetable

    pub fn generate_timetable(&mut self) -> &[TimetableSlot] {
        self.timetable.generate()
    }

    pub fn assign_slot(
        &mut self,
        slot_id: &str,
        assignment: SlotAssignment,
    ) -> Result<&TimetableSlot, StoreError> {
        if let Some(id) = assignment.subject_id.as_deref() {
            self.subject(id)?;
        }
        if let Some(id) = assignment.teacher_id.as_deref() {
            self.teacher(id)?;
        }
        if let Some(id) = assignment.classroom_id.as_deref() {
            self.classroom(id)?;
        }
        self.timetable.assign(slot_id, assignment)
    }

    pub fn clear_slot(&mut self, slot_id: &str) -> Result<&TimetableSlot, StoreError> {
        self.timetable.clear_slot(slot_id)
    }

    pub fn check_conflicts(&mut self) -> &[String] {
        self.timetable.check_conflicts(&self.teachers)
    }

    pub fn unassigned(&self, survey: &Survey) -> Unassigned {
        let slots = self.timetable.slots();
        let subject_used = |id: &str| slots.iter().any(|s| s.subject_id.as_deref() == Some(id));
        let teacher_used = |id: &str| slots.iter().any(|s| s.teacher_id.as_deref() == Some(id));
        let classroom_used =
            |id: &str| slots.iter().any(|s| s.classroom_id.as_deref() == Some(id));

        Unassigned {
            subjects: survey
                .subjects
                .iter()
                .filter(|id| !subject_used(id.as_str()))
                .cloned()
                .collect(),
            teachers: self
                .teachers
                .iter()
                .filter(|t| !teacher_used(&t.id))
                .map(|t| t.id.clone())
                .collect(),
            classrooms: self
                .classrooms
                .iter()
                .filter(|c| !classroom_used(&c.id))
                .map(|c| c.id.clone())
                .collect(),
        }
    }
}

fn validate_preferences(survey_subjects: &[String], prefs: &[Preference]) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for p in prefs {
        if p.priority == 0 {
            return Err(StoreError::InvalidResponse(format!(
                "priority for {} must be >= 1",
                p.subject_id
            )));
        }
        if !survey_subjects.contains(&p.subject_id) {
            return Err(StoreError::InvalidResponse(format!(
                "subject {} is not part of this survey",
                p.subject_id
            )));
        }
        if !seen.insert(p.subject_id.as_str()) {
            return Err(StoreError::InvalidResponse(format!(
                "subject {} listed twice",
                p.subject_id
            )));
        }
    }
    Ok(())
}
