//! Coverage report generation for Xcode projects.
//!
//! Wraps the external `lcov` and `genhtml` tools: locate the derived build
//! directory that holds instrumentation data, capture a coverage trace,
//! strip system and test paths from it, and render an HTML report.
//!
//! The pipeline is deliberately synchronous. Each external process runs to
//! completion before the next step starts, and the intermediate trace file
//! is rewritten in place between steps.

pub mod derived_data;
pub mod doctor;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod platform;
pub mod tools;
