use crate::error::StoreError;
use serde::Serialize;

/// Wizard step shown by the UI. Analysis and timetable always carry the
/// survey they were opened for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum View {
    #[default]
    Master,
    Survey,
    Analysis {
        #[serde(rename = "surveyId")]
        survey_id: String,
    },
    Timetable {
        #[serde(rename = "surveyId")]
        survey_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Master,
    Survey,
    Analysis,
    Timetable,
}

impl ViewKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "master" => Some(Self::Master),
            "survey" => Some(Self::Survey),
            "analysis" => Some(Self::Analysis),
            "timetable" => Some(Self::Timetable),
            _ => None,
        }
    }
}

impl View {
    /// Builds the view for `kind`. The survey id is only consulted for the
    /// survey-bound steps; its existence is the caller's concern.
    pub fn resolve(kind: ViewKind, survey_id: Option<&str>) -> Result<Self, StoreError> {
        let bound = || {
            survey_id
                .map(str::to_string)
                .ok_or(StoreError::NoSurveySelected)
        };
        Ok(match kind {
            ViewKind::Master => View::Master,
            ViewKind::Survey => View::Survey,
            ViewKind::Analysis => View::Analysis {
                survey_id: bound()?,
            },
            ViewKind::Timetable => View::Timetable {
                survey_id: bound()?,
            },
        })
    }

    pub fn survey_id(&self) -> Option<&str> {
        match self {
            View::Analysis { survey_id } | View::Timetable { survey_id } => Some(survey_id.as_str()),
            View::Master | View::Survey => None,
        }
    }

    /// Next wizard step. The last step stays where it is.
    pub fn next(&self, selected: Option<&str>) -> Result<Self, StoreError> {
        match self {
            View::Master => Ok(View::Survey),
            View::Survey => View::resolve(ViewKind::Analysis, selected),
            View::Analysis { survey_id } => Ok(View::Timetable {
                survey_id: survey_id.clone(),
            }),
            View::Timetable { .. } => Ok(self.clone()),
        }
    }

    /// Previous wizard step. The first step stays where it is.
    pub fn back(&self) -> Self {
        match self {
            View::Master | View::Survey => View::Master,
            View::Analysis { .. } => View::Survey,
            View::Timetable { survey_id } => View::Analysis {
                survey_id: survey_id.clone(),
            },
        }
    }
}
