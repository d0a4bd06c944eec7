//! Terminal rendering of the cart and the draft.

use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Style},
};

use scanpos_core::{CartLedger, LineDraft};

use crate::config::ScannerConfig;

/// Renders the cart as a table followed by the totals line.
///
/// ```text
/// ╭───┬─────────┬───────┬──────┬─────┬───────╮
/// │ # │ Barcode │ Name  │ Price│ Qty │ Total │
/// ├───┼─────────┼───────┼──────┼─────┼───────┤
/// │ 1 │ 123     │ Water │ 1.50 │   3 │  4.50 │
/// ╰───┴─────────┴───────┴──────┴─────┴───────╯
/// Items: 3   Total: 4.50 AZN
/// ```
pub fn render_cart(cart: &CartLedger, config: &ScannerConfig) -> String {
    if cart.is_empty() {
        return "Cart is empty.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Barcode", "Name", "Price", "Qty", "Total"]);

    for (index, line) in cart.lines().iter().enumerate() {
        builder.push_record([
            (index + 1).to_string(),
            line.barcode.clone(),
            line.name.clone(),
            line.price.to_string(),
            line.quantity.to_string(),
            line.line_total().to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..6), Alignment::right());

    let totals = cart.totals();
    format!(
        "{}\nItems: {}   Total: {}",
        table,
        totals.item_count,
        config.format_currency(totals.total)
    )
}

/// Renders the draft, one field per line.
pub fn render_draft(draft: &LineDraft, config: &ScannerConfig) -> String {
    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

    format!(
        "Barcode:  {}\nName:     {}\nPrice:    {}\nQuantity: {}",
        or_dash(&draft.barcode),
        or_dash(&draft.name),
        draft
            .price
            .map(|p| config.format_currency(p))
            .unwrap_or_else(|| "-".to_string()),
        draft.quantity
    )
}
