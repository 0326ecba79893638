//! Step definitions for task collaboration behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
