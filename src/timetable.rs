use crate::error::StoreError;
use crate::model::Teacher;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PERIODS_PER_DAY: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn slot_key(day: Weekday, period: u8) -> String {
    format!("{}-{}", day, period)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableSlot {
    pub id: String,
    pub day: Weekday,
    pub period: u8,
    pub subject_id: Option<String>,
    pub teacher_id: Option<String>,
    pub classroom_id: Option<String>,
    pub students: Vec<String>,
}

impl TimetableSlot {
    fn empty(day: Weekday, period: u8) -> Self {
        Self {
            id: slot_key(day, period),
            day,
            period,
            subject_id: None,
            teacher_id: None,
            classroom_id: None,
            students: Vec::new(),
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.subject_id.is_some() || self.teacher_id.is_some() || self.classroom_id.is_some()
    }
}

/// A manual assignment for one slot. `None` fields clear that part of the slot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotAssignment {
    pub subject_id: Option<String>,
    pub teacher_id: Option<String>,
    pub classroom_id: Option<String>,
    pub students: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Ungenerated,
    Generated,
}

#[derive(Debug, Clone, Default)]
pub struct Timetable {
    slots: Option<Vec<TimetableSlot>>,
    conflicts: Vec<String>,
}

impl Timetable {
    pub fn phase(&self) -> Phase {
        if self.slots.is_some() {
            Phase::Generated
        } else {
            Phase::Ungenerated
        }
    }

    pub fn slots(&self) -> &[TimetableSlot] {
        self.slots.as_deref().unwrap_or(&[])
    }

    /// Result of the last conflict scan.
    pub fn conflicts(&self) -> &[String] {
        &self.conflicts
    }

    /// Discards the current grid and emits one empty slot per (day, period),
    /// days outermost. Nothing is allocated into the slots.
    pub fn generate(&mut self) -> &[TimetableSlot] {
        let slots = Weekday::ALL
            .iter()
            .flat_map(|&day| (1..=PERIODS_PER_DAY).map(move |p| TimetableSlot::empty(day, p)))
            .collect();
        self.slots = Some(slots);
        self.conflicts.clear();
        self.slots()
    }

    fn slot_mut(&mut self, slot_id: &str) -> Result<&mut TimetableSlot, StoreError> {
        let slots = self.slots.as_mut().ok_or(StoreError::NotGenerated)?;
        slots
            .iter_mut()
            .find(|s| s.id == slot_id)
            .ok_or_else(|| StoreError::not_found("slot", slot_id))
    }

    pub fn assign(
        &mut self,
        slot_id: &str,
        assignment: SlotAssignment,
    ) -> Result<&TimetableSlot, StoreError> {
        let slot = self.slot_mut(slot_id)?;
        slot.subject_id = assignment.subject_id;
        slot.teacher_id = assignment.teacher_id;
        slot.classroom_id = assignment.classroom_id;
        slot.students = assignment.students;
        Ok(slot)
    }

    pub fn clear_slot(&mut self, slot_id: &str) -> Result<&TimetableSlot, StoreError> {
        self.assign(slot_id, SlotAssignment::default())
    }

    /// Groups slots by assigned teacher and reports every teacher holding more
    /// than one slot. Teachers are reported in the order they first appear in
    /// the grid.
    pub fn check_conflicts(&mut self, teachers: &[Teacher]) -> &[String] {
        self.conflicts = teacher_conflicts(self.slots(), teachers);
        &self.conflicts
    }
}

pub fn teacher_conflicts(slots: &[TimetableSlot], teachers: &[Teacher]) -> Vec<String> {
    let mut by_teacher: Vec<(&str, Vec<String>)> = Vec::new();
    for slot in slots {
        let Some(teacher_id) = slot.teacher_id.as_deref() else {
            continue;
        };
        let key = slot_key(slot.day, slot.period);
        match by_teacher.iter_mut().find(|(id, _)| *id == teacher_id) {
            Some((_, keys)) => keys.push(key),
            None => by_teacher.push((teacher_id, vec![key])),
        }
    }

    by_teacher
        .into_iter()
        .filter(|(_, keys)| keys.len() > 1)
        .map(|(teacher_id, keys)| {
            let name = teachers
                .iter()
                .find(|t| t.id == teacher_id)
                .map(|t| t.name.as_str())
                .unwrap_or(teacher_id);
            format!(
                "{} is assigned to multiple classes at once: {}",
                name,
                keys.join(", ")
            )
        })
        .collect()
}
