pub mod jikan;
pub mod traits;

pub use jikan::{JikanClient, JikanError};
pub use traits::CatalogSource;
