pub mod faculty;
pub mod publication;

pub use faculty::{FacultyRecord, Roster, UserId};
pub use publication::{OutputRecord, PublicationRecord, RawBib, RawPublication, Year};
