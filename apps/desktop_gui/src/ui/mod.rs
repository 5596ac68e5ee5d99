//! UI layer for the desktop shell: the egui app and the PDF viewer it drives.

pub mod app;
pub mod viewer;

pub use app::{AppPaths, ExamSearchApp, StartupConfig};
