use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub category: String,
    pub grade: String,
    pub credits: u32,
    pub max_students: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub name: String,
    /// Subject ids this teacher can cover.
    pub subjects: Vec<String>,
    pub max_hours: u32,
    pub current_hours: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassroomKind {
    #[default]
    General,
    Special,
    Lab,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub kind: ClassroomKind,
    pub equipment: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    #[default]
    Draft,
    Active,
    Completed,
}

impl SurveyStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Surveys only move forward: draft -> active -> completed.
    pub fn can_move_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Active) | (Self::Active, Self::Completed)
        )
    }
}

impl fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    pub subject_id: String,
    /// 1 is the first choice.
    pub priority: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub student_id: String,
    pub student_name: String,
    pub preferences: Vec<Preference>,
    pub submitted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
}

impl StudentResponse {
    pub fn requests(&self, subject_id: &str) -> bool {
        self.preferences.iter().any(|p| p.subject_id == subject_id)
    }

    pub fn first_choice_is(&self, subject_id: &str) -> bool {
        self.preferences
            .iter()
            .any(|p| p.subject_id == subject_id && p.priority == 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: String,
    pub title: String,
    pub target_grade: String,
    pub start_date: String,
    pub end_date: String,
    pub status: SurveyStatus,
    pub subjects: Vec<String>,
    pub responses: Vec<StudentResponse>,
}

impl Survey {
    pub fn total_count(&self) -> usize {
        self.responses.len()
    }

    pub fn submitted_count(&self) -> usize {
        self.responses.iter().filter(|r| r.submitted).count()
    }

    pub fn submitted(&self) -> impl Iterator<Item = &StudentResponse> {
        self.responses.iter().filter(|r| r.submitted)
    }
}

// Draft forms. These hold what the UI has typed so far and are reset to
// their defaults once an add/create succeeds.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubjectDraft {
    pub name: String,
    pub category: String,
    pub grade: String,
    pub credits: u32,
    pub max_students: u32,
    pub description: String,
}

impl SubjectDraft {
    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.name.trim().is_empty() {
            out.push("name");
        }
        if self.category.trim().is_empty() {
            out.push("category");
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeacherDraft {
    pub name: String,
    pub subjects: Vec<String>,
    pub max_hours: u32,
}

impl TeacherDraft {
    pub fn missing(&self) -> Vec<&'static str> {
        if self.name.trim().is_empty() {
            vec!["name"]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassroomDraft {
    pub name: String,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub kind: ClassroomKind,
    pub equipment: Vec<String>,
}

impl ClassroomDraft {
    pub fn missing(&self) -> Vec<&'static str> {
        if self.name.trim().is_empty() {
            vec!["name"]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveyDraft {
    pub title: String,
    pub target_grade: String,
    pub start_date: String,
    pub end_date: String,
    pub subjects: Vec<String>,
}

impl SurveyDraft {
    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.title.trim().is_empty() {
            out.push("title");
        }
        if self.target_grade.trim().is_empty() {
            out.push("targetGrade");
        }
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct Drafts {
    pub subject: SubjectDraft,
    pub teacher: TeacherDraft,
    pub classroom: ClassroomDraft,
    pub survey: SurveyDraft,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_moves_forward_only() {
        assert!(SurveyStatus::Draft.can_move_to(SurveyStatus::Active));
        assert!(SurveyStatus::Active.can_move_to(SurveyStatus::Completed));
        assert!(!SurveyStatus::Draft.can_move_to(SurveyStatus::Completed));
        assert!(!SurveyStatus::Completed.can_move_to(SurveyStatus::Active));
        assert!(!SurveyStatus::Active.can_move_to(SurveyStatus::Draft));
    }

    #[test]
    fn classroom_kind_serializes_as_type() {
        let draft = ClassroomDraft {
            name: "Lab A".into(),
            kind: ClassroomKind::Lab,
            ..Default::default()
        };
        let v = serde_json::to_value(&draft).expect("serialize");
        assert_eq!(v["type"], "lab");
        assert_eq!(v["capacity"], 0);
    }

    #[test]
    fn drafts_report_missing_required_fields() {
        assert_eq!(SubjectDraft::default().missing(), vec!["name", "category"]);
        let d = SubjectDraft {
            name: "Calculus".into(),
            category: "  ".into(),
            ..Default::default()
        };
        assert_eq!(d.missing(), vec!["category"]);
        assert_eq!(SurveyDraft::default().missing(), vec!["title", "targetGrade"]);
        assert!(TeacherDraft {
            name: "Kim".into(),
            ..Default::default()
        }
        .missing()
        .is_empty());
    }
}
