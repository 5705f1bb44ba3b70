use anyhow::{Result, anyhow};

use crate::cli::ui::{self, StyleType};
use crate::core::currency;
use crate::store::FavoritesStore;

/// Toggles a currency in the favorites list and prints the new list.
pub fn run(store: &FavoritesStore, code: &str) -> Result<()> {
    let currency = currency::find(code)
        .ok_or_else(|| anyhow!("Unknown currency code: {}", code))?;

    let (favorites, added) = store.toggle(currency.code)?;
    if added {
        println!(
            "Added {} {} ({}) to favorites.",
            currency.flag_emoji(),
            currency.code,
            currency.name
        );
    } else {
        println!(
            "Removed {} {} ({}) from favorites.",
            currency.flag_emoji(),
            currency.code,
            currency.name
        );
    }

    if favorites.is_empty() {
        println!("{}", ui::style_text("No favorites left.", StyleType::Subtle));
    } else {
        println!(
            "{} {}",
            ui::style_text("Favorites:", StyleType::Label),
            favorites.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_unknown_code_fails() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().join("favorites.json"));

        let result = run(&store, "ZZZ");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().to_string(), "Unknown currency code: ZZZ");
    }

    #[test]
    fn test_toggle_normalizes_case() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().join("favorites.json"));

        run(&store, "jpy").unwrap();
        assert!(store.load().iter().any(|c| c == "JPY"));
    }
}
