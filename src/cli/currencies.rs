use anyhow::Result;
use comfy_table::Cell;

use crate::cli::ui::{self, StyleType};
use crate::core::currency::{self, Currency};

/// Splits catalog matches into favorites and the rest, both in catalog
/// order.
fn partition_favorites<'a>(
    matches: &[&'a Currency],
    favorites: &[String],
) -> (Vec<&'a Currency>, Vec<&'a Currency>) {
    matches
        .iter()
        .copied()
        .partition(|c| favorites.iter().any(|code| code == c.code))
}

fn currency_table(currencies: &[&Currency]) -> comfy_table::Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Code"),
        ui::header_cell("Name"),
    ]);
    for currency in currencies {
        table.add_row(vec![
            Cell::new(currency.flag_emoji()),
            Cell::new(currency.code),
            Cell::new(currency.name),
        ]);
    }
    table
}

/// Lists supported currencies, favorites first, optionally filtered by a
/// search query.
pub fn run(query: Option<&str>, favorites: &[String]) -> Result<()> {
    let query = query.unwrap_or("");
    let matches = currency::search(query);
    if matches.is_empty() {
        println!("No currencies match '{query}'.");
        return Ok(());
    }

    let (favorite_matches, other_matches) = partition_favorites(&matches, favorites);

    if !favorite_matches.is_empty() {
        println!("{}", ui::style_text("Favorites", StyleType::Title));
        println!("{}", currency_table(&favorite_matches));
        println!();
    }
    if !other_matches.is_empty() {
        println!("{}", ui::style_text("All currencies", StyleType::Title));
        println!("{}", currency_table(&other_matches));
    }
    println!(
        "{}",
        ui::style_text(
            &format!("{} currencies. Toggle favorites with `kurs favorite CODE`.", matches.len()),
            StyleType::Subtle
        )
    );
    Ok(())
}
