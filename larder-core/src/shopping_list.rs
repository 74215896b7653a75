//! Plain-text rendering of the aggregated shopping list.

/// One aggregated line: an ingredient/unit pair and the total amount needed
/// across every recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}

pub fn render_shopping_list(lines: &[ShoppingListLine]) -> String {
    let mut out = String::from("Shopping list\n\n");

    if lines.is_empty() {
        out.push_str("Your shopping cart is empty.\n");
        return out;
    }

    for (index, line) in lines.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({}) - {}\n",
            index + 1,
            line.name,
            line.measurement_unit,
            line.total
        ));
    }

    out
}
