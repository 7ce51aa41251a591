pub mod analysis;
pub mod auth;
pub mod core;
pub mod drafts;
pub mod master;
pub mod surveys;
pub mod timetable;
