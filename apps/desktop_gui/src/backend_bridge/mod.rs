//! Backend bridge: the command queue consumed by the worker thread and its runtime.

pub mod commands;
pub mod runtime;
