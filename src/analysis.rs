use crate::model::{Subject, Survey};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDemand {
    pub subject_id: String,
    /// `None` when the survey references a subject that no longer exists.
    pub subject: Option<Subject>,
    pub total: usize,
    pub first_choice: usize,
    pub first_choice_percent: f64,
    pub first_choice_label: String,
    pub over_capacity: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyStats {
    pub survey_id: String,
    pub title: String,
    pub total_students: usize,
    pub submitted_students: usize,
    pub pending_students: usize,
    pub subject_demand: Vec<SubjectDemand>,
}

/// Share of first-choice requests, 0..=100. An unrequested subject is 0%.
pub fn first_choice_percent(first_choice: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * first_choice as f64 / total as f64
    }
}

pub fn format_percent(percent: f64) -> String {
    format!("{}%", percent.round() as i64)
}

pub fn subject_demand(survey: &Survey, subject_id: &str, subjects: &[Subject]) -> SubjectDemand {
    let mut total = 0;
    let mut first_choice = 0;
    for response in survey.submitted() {
        if response.requests(subject_id) {
            total += 1;
        }
        if response.first_choice_is(subject_id) {
            first_choice += 1;
        }
    }

    let subject = subjects.iter().find(|s| s.id == subject_id).cloned();
    let max_students = subject.as_ref().map(|s| s.max_students).unwrap_or(0) as usize;
    let percent = first_choice_percent(first_choice, total);

    SubjectDemand {
        subject_id: subject_id.to_string(),
        subject,
        total,
        first_choice,
        first_choice_percent: percent,
        first_choice_label: format_percent(percent),
        over_capacity: total > max_students,
    }
}

pub fn survey_stats(survey: &Survey, subjects: &[Subject]) -> SurveyStats {
    let total_students = survey.total_count();
    let submitted_students = survey.submitted_count();

    SurveyStats {
        survey_id: survey.id.clone(),
        title: survey.title.clone(),
        total_students,
        submitted_students,
        pending_students: total_students - submitted_students,
        subject_demand: survey
            .subjects
            .iter()
            .map(|id| subject_demand(survey, id, subjects))
            .collect(),
    }
}
