//! Controller layer: typed commands, failure classification and dispatch of
//! commands onto the events session.

pub mod commands;
pub mod events;
pub mod orchestration;
