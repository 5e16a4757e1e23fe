//! Seed command - replace the local catalog with sample stock

use super::Result;
use crate::DealerError;
use crate::catalog::{Car, CarDraft, sample_stock};
use crate::config::{Backend, DealerConfig};
use crate::db::{Database, DbError};
use crate::ui::{OutputWriter, UserInput};
use tracing::info;

/// Clear `db` and insert `stock` in order
///
/// # Errors
///
/// Returns `DbError` if clearing or inserting fails.
pub fn replace_stock(
    db: &Database,
    stock: Vec<CarDraft>,
) -> std::result::Result<Vec<Car>, DbError> {
    db.clear()?;
    let cars = stock
        .into_iter()
        .map(|draft| db.insert_draft(draft))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    db.flush()?;
    info!(count = cars.len(), "catalog seeded");
    Ok(cars)
}

/// Execute the seed command
///
/// Only the local backend can be seeded. Asks for confirmation unless
/// `yes` is set.
pub fn execute(
    config: &DealerConfig,
    yes: bool,
    input: &dyn UserInput,
    output: &dyn OutputWriter,
) -> Result<()> {
    if config.backend != Backend::Local {
        return Err(DealerError::InvalidInput(
            "Seeding needs the local backend. Run with --backend local".into(),
        ));
    }

    let path = config.catalog_path()?;
    let prompt = format!(
        "Replace every listing in {} with the sample stock?",
        path.display()
    );
    if !yes && !input.confirmed(&prompt) {
        output.info("Cancelled.");
        return Ok(());
    }

    let db = Database::open(&path)?;
    let cars = replace_stock(&db, sample_stock())?;
    output.success(&format!("Seeded {} cars", cars.len()));
    Ok(())
}
