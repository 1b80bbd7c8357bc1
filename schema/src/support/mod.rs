//! Process-level plumbing shared by the library and the dump tool

pub mod tracing;
