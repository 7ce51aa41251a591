use crate::model::{
    Classroom, ClassroomKind, Preference, StudentResponse, Subject, Survey, SurveyStatus, Teacher,
};
use crate::store::Store;

fn subject(id: &str, name: &str, category: &str, credits: u32, max_students: u32, desc: &str) -> Subject {
    Subject {
        id: id.into(),
        name: name.into(),
        category: category.into(),
        grade: "3".into(),
        credits,
        max_students,
        description: desc.into(),
    }
}

fn teacher(id: &str, name: &str, subject_id: &str, max_hours: u32) -> Teacher {
    Teacher {
        id: id.into(),
        name: name.into(),
        subjects: vec![subject_id.into()],
        max_hours,
        current_hours: 0,
    }
}

fn classroom(id: &str, name: &str, capacity: u32, kind: ClassroomKind, equipment: &[&str]) -> Classroom {
    Classroom {
        id: id.into(),
        name: name.into(),
        capacity,
        kind,
        equipment: equipment.iter().map(|e| e.to_string()).collect(),
    }
}

fn response(student_id: &str, name: &str, order: [&str; 3], submitted_at: &str) -> StudentResponse {
    StudentResponse {
        student_id: student_id.into(),
        student_name: name.into(),
        preferences: order
            .iter()
            .zip(1..)
            .map(|(id, priority)| Preference {
                subject_id: (*id).into(),
                priority,
            })
            .collect(),
        submitted: true,
        submitted_at: Some(submitted_at.into()),
    }
}

/// Store preloaded with the demo data the admin screens open with.
pub fn demo_store() -> Store {
    let subjects = vec![
        subject("1", "Advanced Mathematics", "Mathematics", 4, 30, "Calculus and statistics"),
        subject("2", "English Reading", "English", 3, 25, "Advanced reading and writing"),
        subject("3", "Physics Lab", "Science", 2, 20, "Experiment-driven physics"),
    ];
    let teachers = vec![
        teacher("1", "Kim Suhak", "1", 20),
        teacher("2", "Lee Yeongeo", "2", 18),
        teacher("3", "Park Mulli", "3", 16),
    ];
    let classrooms = vec![
        classroom("1", "Room 3-1", 30, ClassroomKind::General, &["blackboard", "projector"]),
        classroom("2", "Room 3-2", 25, ClassroomKind::General, &["blackboard", "projector"]),
        classroom(
            "3",
            "Physics Lab",
            20,
            ClassroomKind::Lab,
            &["lab benches", "apparatus", "safety gear"],
        ),
    ];
    let surveys = vec![Survey {
        id: "1".into(),
        title: "2024 fall semester grade 3 subject demand survey".into(),
        target_grade: "3".into(),
        start_date: "2024-01-15".into(),
        end_date: "2024-01-25".into(),
        status: SurveyStatus::Active,
        subjects: vec!["1".into(), "2".into(), "3".into()],
        responses: vec![
            response("s1", "Kim Cheolsu", ["1", "2", "3"], "2024-01-20"),
            response("s2", "Lee Younghee", ["2", "1", "3"], "2024-01-21"),
        ],
    }];

    Store::from_parts(subjects, teachers, classrooms, surveys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::survey_stats;

    #[test]
    fn demo_survey_demand_matches_seeded_preferences() {
        let store = demo_store();
        assert_eq!(store.subjects().len(), 3);
        assert_eq!(store.teachers().len(), 3);
        assert_eq!(store.classrooms().len(), 3);

        let survey = store.survey("1").expect("demo survey");
        let stats = survey_stats(survey, store.subjects());
        assert_eq!(stats.submitted_students, 2);

        let firsts: Vec<(usize, usize)> = stats
            .subject_demand
            .iter()
            .map(|d| (d.total, d.first_choice))
            .collect();
        assert_eq!(firsts, vec![(2, 1), (2, 1), (2, 0)]);
    }
}
