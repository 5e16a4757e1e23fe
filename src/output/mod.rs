//! Output formatting for CLI display
//!
//! Renders listings as an aligned, coloured table for people, or as JSON or
//! CSV for scripts.

use crate::catalog::{Car, CarStatus};
use clap::ValueEnum;
use colored::Colorize;
use std::io;

/// Listing output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned columns
    #[default]
    Table,
    /// JSON array, same shape as the API
    Json,
    /// Comma-separated values with a header row
    Csv,
}

/// Render `cars` in the requested format
///
/// # Errors
///
/// Returns an I/O error if JSON or CSV serialization fails.
pub fn render(cars: &[Car], format: OutputFormat) -> io::Result<String> {
    match format {
        OutputFormat::Table => Ok(car_table(cars)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(cars)?),
        OutputFormat::Csv => cars_csv(cars),
    }
}

/// Colour a status for terminal display
#[must_use]
pub fn colorize_status(status: CarStatus) -> String {
    let label = status.as_str();
    match status {
        CarStatus::Available => label.green().to_string(),
        CarStatus::Sold => label.red().to_string(),
        CarStatus::Reserved => label.yellow().to_string(),
    }
}

/// Format a price with thousands separators
#[must_use]
pub fn format_price(price: f64) -> String {
    let whole = format!("{:.0}", price.abs());
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if price < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Table with one listing per row
#[must_use]
pub fn car_table(cars: &[Car]) -> String {
    let titles: Vec<String> = cars.iter().map(Car::title).collect();
    let prices: Vec<String> = cars.iter().map(|c| format_price(c.price)).collect();
    let title_width = titles.iter().map(String::len).max().unwrap_or(0).max(5);
    let price_width = prices.iter().map(String::len).max().unwrap_or(0).max(5);

    let mut out = format!(
        "{:>4}  {:<title_width$}  {:>4}  {:>price_width$}  {:>8}  {:<10}  {}\n",
        "ID", "CAR", "YEAR", "PRICE", "MILEAGE", "COLOR", "STATUS"
    )
    .bold()
    .to_string();

    for ((car, title), price) in cars.iter().zip(&titles).zip(&prices) {
        out.push_str(&format!(
            "{:>4}  {:<title_width$}  {:>4}  {:>price_width$}  {:>8}  {:<10}  {}\n",
            car.id.to_string().dimmed(),
            title,
            car.year,
            price,
            car.mileage,
            car.color.as_deref().unwrap_or("-"),
            colorize_status(car.status),
        ));
    }
    out
}

/// Multi-line description of a single listing
#[must_use]
pub fn car_detail(car: &Car) -> String {
    let mut out = format!(
        "{} {}\n  year: {}\n  price: {}\n  mileage: {} km\n  status: {}\n",
        car.title().bold(),
        format!("#{}", car.id).dimmed(),
        car.year,
        format_price(car.price),
        car.mileage,
        colorize_status(car.status),
    );
    if let Some(color) = &car.color {
        out.push_str(&format!("  color: {color}\n"));
    }
    if let Some(description) = car.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("  description: {description}\n"));
    }
    if let Some(url) = &car.image_url {
        out.push_str(&format!("  image: {url}\n"));
    }
    out
}

fn cars_csv(cars: &[Car]) -> io::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for car in cars {
        writer.serialize(car)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| io::Error::other(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::toyota_and_bmw;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(999.0), "999");
        assert_eq!(format_price(2_500_000.0), "2 500 000");
        assert_eq!(format_price(12_345.0), "12 345");
    }

    #[test]
    fn test_table_has_row_per_car() {
        colored::control::set_override(false);
        let table = car_table(&toyota_and_bmw());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("PRICE"));
        assert!(lines[1].contains("Toyota"));
        assert!(lines[2].contains("5 000 000"));
    }

    #[test]
    fn test_json_matches_api_shape() {
        let json = render(&toyota_and_bmw(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["brand"], "BMW");
        assert_eq!(value[0]["status"], "available");
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let csv = render(&toyota_and_bmw(), OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("id,brand,model,year,price"));
        assert!(header.contains("imageUrl"));
        assert!(lines.next().unwrap().starts_with("1,Toyota,"));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn test_detail_skips_empty_description() {
        colored::control::set_override(false);
        let car = &toyota_and_bmw()[0];
        let detail = car_detail(car);
        assert!(detail.contains("Toyota"));
        assert!(!detail.contains("description"));
    }
}
