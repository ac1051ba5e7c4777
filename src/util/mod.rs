//! Primitives shared by the whole project
//!
//! Date management, entries and accounts, monthly aggregation

pub mod date;
pub mod entry;
pub mod summary;
