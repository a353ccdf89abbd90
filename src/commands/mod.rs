//! Command model for the lint sequence
//!
//! A [`plan::Plan`] is an ordered list of [`step::Step`]s. Each step names an external
//! program, the flags it is invoked with and the paths it checks. The built-in plan mirrors
//! the project's lint script; a config file can replace it.

pub mod plan;
pub mod step;
