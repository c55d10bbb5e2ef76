// ABOUTME: Scripted editor engine and render surface for exercising the control without a browser
// ABOUTME: Implements the session and surface seams over a rope document with regex search

pub mod commands;
pub mod document;
pub mod search;
pub mod session;
pub mod surface;

pub use session::{DEFAULT_FONT_SIZE, DEFAULT_MODE, DEFAULT_THEME, TestSession};
pub use surface::{LoadPlan, ScriptedSurface, SurfaceController};
