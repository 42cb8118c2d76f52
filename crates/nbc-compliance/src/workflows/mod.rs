pub mod calculator;
pub mod files;
pub mod projects;
