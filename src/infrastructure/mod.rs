//! Infrastructure layer
//!
//! Board drivers, the soft access point and the tasks that serve the panel.

pub mod drivers;
pub mod tasks;
pub mod types;
