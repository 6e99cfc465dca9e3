use super::ui;
use crate::store::SnapshotStore;
use anyhow::Result;

pub async fn run(store: &SnapshotStore) -> Result<()> {
    let pb = ui::new_spinner("Refreshing rates...");
    let snapshot = store.refresh().await;
    pb.finish_and_clear();
    let snapshot = snapshot?;

    println!(
        "Refreshed {} rates (base {}), published {}",
        ui::style_text(&snapshot.rates.len().to_string(), ui::StyleType::TotalLabel),
        snapshot.base,
        ui::style_text(&snapshot.date.to_string(), ui::StyleType::Subtle)
    );
    Ok(())
}
