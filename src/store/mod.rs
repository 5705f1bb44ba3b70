pub mod favorites;

pub use favorites::{DEFAULT_FAVORITES, FavoritesStore};
