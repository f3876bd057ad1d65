//! Small text widgets shared by the panels.

pub mod sparkline;
