use super::ui;
use crate::core::convert::convert;
use crate::store::SnapshotStore;
use anyhow::Result;

pub async fn run(store: &SnapshotStore, from: &str, to: &str, amount: f64) -> Result<()> {
    let pb = ui::new_spinner("Fetching rates...");
    let snapshot = store.current().await;
    pb.finish_and_clear();
    let snapshot = snapshot?;

    let result = convert(&snapshot, from, to, amount)?;

    println!(
        "{} {} = {} {}",
        amount,
        ui::style_text(&result.from_currency, ui::StyleType::TotalLabel),
        ui::style_text(&format!("{:.4}", result.amount), ui::StyleType::TotalValue),
        ui::style_text(&result.to_currency, ui::StyleType::TotalLabel),
    );
    println!(
        "{}",
        ui::style_text(
            &format!("Rates as of {}", result.exchange_date),
            ui::StyleType::Subtle
        )
    );

    Ok(())
}
