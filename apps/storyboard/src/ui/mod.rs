//! UI layer: app shell, derived view model, and terminal rendering.

pub mod app;
pub mod render;
pub mod view;

pub use app::{InputCommand, StoryboardApp};
