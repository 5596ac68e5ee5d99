//! Controller glue for the desktop shell: backend events and effect orchestration.

pub mod events;
pub mod orchestration;
