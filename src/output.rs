//! Diagnostics for failures the shim itself must report

pub mod human;

pub use human::report_error;
