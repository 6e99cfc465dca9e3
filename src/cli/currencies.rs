use super::ui;
use crate::core::convert::list_currencies;
use crate::store::SnapshotStore;
use anyhow::Result;
use comfy_table::Cell;

pub async fn run(store: &SnapshotStore) -> Result<()> {
    let pb = ui::new_spinner("Fetching rates...");
    let snapshot = store.current().await;
    pb.finish_and_clear();
    let snapshot = snapshot?;

    let currencies = list_currencies(&snapshot);
    if currencies.is_empty() {
        println!("No currencies available.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate (per 1 {})", snapshot.base)),
    ]);
    for code in &currencies {
        let rate = ui::value_cell(&format!("{:.6}", snapshot.rates[code]));
        table.add_row(vec![Cell::new(code), rate]);
    }

    println!("{table}");
    println!(
        "\n{} currencies, rates as of {}",
        ui::style_text(&currencies.len().to_string(), ui::StyleType::TotalLabel),
        ui::style_text(&snapshot.date.to_string(), ui::StyleType::Subtle)
    );

    Ok(())
}
