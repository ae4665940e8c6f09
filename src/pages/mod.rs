pub mod login;
pub mod notes;
