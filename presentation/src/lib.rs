pub mod admin;
pub mod cli;
pub mod ordering;
pub mod render;
