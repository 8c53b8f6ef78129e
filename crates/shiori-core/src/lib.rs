pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod format;
pub mod models;
pub mod pagination;
pub mod screen;
pub mod search;
pub mod toast;

pub use models::{CatalogEntry, CatalogPage, EntryId};
pub use screen::{Effect, HomeScreen, Message, ScreenSnapshot};
