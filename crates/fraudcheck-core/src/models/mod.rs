//! Domain models module

pub mod submission;

pub use submission::SubmissionMeta;
