pub mod clean;
pub mod relocate;
