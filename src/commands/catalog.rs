//! Catalog commands - list, add, edit, delete and buy listings
//!
//! Every command goes through the view controller, so role checks,
//! validation and messages match the interactive screen.

use super::{Result, load, report};
use crate::catalog::{CarDraft, CarId};
use crate::output::{OutputFormat, car_detail, render};
use crate::search::{FilterCriteria, SortKey};
use crate::service::{CatalogService, ServiceError};
use crate::ui::{OutputWriter, UserInput};
use crate::view::{DeleteOutcome, ViewController};

/// Execute the list command
///
/// Notifications are only printed for table output so JSON and CSV stay
/// machine-readable.
pub fn list<S: CatalogService>(
    view: &mut ViewController<S>,
    criteria: FilterCriteria,
    sort: SortKey,
    format: OutputFormat,
    output: &dyn OutputWriter,
) -> Result<()> {
    load(view, output)?;
    view.apply(criteria, sort)?;

    if format == OutputFormat::Table {
        if view.displayed().is_empty() {
            output.info("No cars match the given filters.");
        } else {
            output.write(render(view.displayed(), format)?.trim_end());
        }
        report(view, output);
    } else {
        output.write(render(view.displayed(), format)?.trim_end());
    }
    Ok(())
}

/// Execute the add command
pub fn add<S: CatalogService>(
    view: &mut ViewController<S>,
    draft: &CarDraft,
    output: &dyn OutputWriter,
) -> Result<()> {
    load(view, output)?;
    let result = view.create(draft);
    report(view, output);
    output.write(car_detail(&result?).trim_end());
    Ok(())
}

/// Execute the edit command
pub fn edit<S: CatalogService>(
    view: &mut ViewController<S>,
    id: CarId,
    draft: &CarDraft,
    output: &dyn OutputWriter,
) -> Result<()> {
    if draft.is_empty() {
        return Err(crate::DealerError::InvalidInput(
            "Nothing to change. Pass at least one field, e.g. --price 2100000".into(),
        ));
    }

    load(view, output)?;
    let result = view.edit(id, draft);
    report(view, output);
    output.write(car_detail(&result?).trim_end());
    Ok(())
}

/// Execute the delete command
///
/// Asks for confirmation through `input` unless `yes` is set.
pub fn delete<S: CatalogService>(
    view: &mut ViewController<S>,
    id: CarId,
    yes: bool,
    input: &dyn UserInput,
    output: &dyn OutputWriter,
) -> Result<()> {
    load(view, output)?;
    let result = view.delete(id, &|prompt: &str| yes || input.confirmed(prompt));
    report(view, output);

    if result? == DeleteOutcome::Cancelled {
        output.info("Cancelled.");
    }
    Ok(())
}

/// Execute the buy command
pub fn buy<S: CatalogService>(
    view: &mut ViewController<S>,
    id: CarId,
    output: &dyn OutputWriter,
) -> Result<()> {
    load(view, output)?;
    if view.find(id).is_none() {
        return Err(ServiceError::NotFound(id).into());
    }
    let result = view.purchase(id);
    report(view, output);
    Ok(result?)
}
