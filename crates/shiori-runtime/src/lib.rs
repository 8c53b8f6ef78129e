mod screen;

pub use screen::ScreenHandle;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("screen actor closed")]
    Closed,
}
