use comfy_table::{Cell, CellAlignment, Color, Table};

use crate::catalog::{color_or_accent, find_icon};
use crate::error::Result;
use crate::fmt::{money, timestamp};
use crate::pipeline::{CategoryFilter, FilterSpec, SortKey, SortOrder};
use crate::settings::Settings;

use super::open_session;

pub fn run(
    settings: &Settings,
    category: Option<CategoryFilter>,
    minimum_cost: f64,
    sort: Option<SortOrder>,
) -> Result<()> {
    let mut session = open_session(settings)?;
    let category = category.unwrap_or(session.list().filter().category);
    let sort: SortKey = sort.map(SortKey::from).unwrap_or(session.list().sort());
    session.set_filter(FilterSpec::new(category, minimum_cost)?);
    session.set_sort(sort);

    let symbol = settings.currency_symbol.clone();
    let view = session.rows()?;

    if view.rows.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "", "Name", "Type", "Cost", "Icon", "Modified"]);
    for rec in &view.rows {
        let (r, g, b) = color_or_accent(&rec.color).rgb;
        let icon = find_icon(&rec.icon).map(|i| i.name).unwrap_or(rec.icon.as_str());
        table.add_row(vec![
            Cell::new(rec.id),
            Cell::new("\u{25cf}").fg(Color::Rgb { r, g, b }),
            Cell::new(&rec.name),
            Cell::new(rec.category),
            Cell::new(money(rec.cost, &symbol)).set_alignment(CellAlignment::Right),
            Cell::new(icon),
            Cell::new(timestamp(&rec.last_modified)),
        ]);
    }

    let mut filters = vec![format!("type: {category}")];
    if minimum_cost > 0.0 {
        filters.push(format!("min: {}", money(minimum_cost, &symbol)));
    }
    filters.push(format!("sort: {sort}"));

    println!("Expenses ({})\n{table}", filters.join(", "));
    println!(
        "{} {}, total {}",
        view.count,
        if view.count == 1 { "expense" } else { "expenses" },
        money(view.total, &symbol)
    );
    Ok(())
}
