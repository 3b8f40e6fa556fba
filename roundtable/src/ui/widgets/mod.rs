//! TUI widgets for the knight gallery

pub mod comments;
pub mod details;
pub mod gallery;
pub mod input;
pub mod status_bar;

pub use comments::CommentsWidget;
pub use details::DetailsWidget;
pub use gallery::GalleryWidget;
pub use input::InputWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
