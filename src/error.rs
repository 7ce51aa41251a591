use crate::model::SurveyStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("cannot move survey from {from} to {to}")]
    InvalidTransition { from: SurveyStatus, to: SurveyStatus },

    #[error("select a survey first")]
    NoSurveySelected,

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("generate the timetable first")]
    NotGenerated,
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Stable error code reported over IPC.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::NoSurveySelected => "no_survey_selected",
            Self::InvalidResponse(_) => "bad_params",
            Self::NotGenerated => "not_generated",
        }
    }
}
