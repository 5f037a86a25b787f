use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use super::domain::{CartLineItem, Money};

#[derive(Debug)]
pub enum CartImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    NegativePrice { row: usize, price: Money },
}

impl std::fmt::Display for CartImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartImportError::Io(err) => write!(f, "failed to read cart export: {}", err),
            CartImportError::Csv(err) => write!(f, "invalid cart CSV data: {}", err),
            CartImportError::NegativePrice { row, price } => {
                write!(f, "cart row {} has negative price {}", row, price)
            }
        }
    }
}

impl std::error::Error for CartImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CartImportError::Io(err) => Some(err),
            CartImportError::Csv(err) => Some(err),
            CartImportError::NegativePrice { .. } => None,
        }
    }
}

impl From<std::io::Error> for CartImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CartImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads saved carts exported as CSV with a header row.
pub struct CartImporter;

impl CartImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CartLineItem>, CartImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CartLineItem>, CartImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut items = Vec::new();

        for (index, record) in csv_reader.deserialize::<CartRow>().enumerate() {
            let row = record?;
            let Some(service_type) = row.service_type else {
                continue;
            };

            if row.price < 0 {
                return Err(CartImportError::NegativePrice {
                    row: index + 1,
                    price: row.price,
                });
            }

            items.push(CartLineItem {
                service_branded: row.service_name.unwrap_or_else(|| service_type.clone()),
                service_type,
                price: row.price,
                is_primary_assessment: row
                    .primary_assessment
                    .as_deref()
                    .map(is_truthy)
                    .unwrap_or(false),
            });
        }

        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct CartRow {
    #[serde(
        rename = "Service Type",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    service_type: Option<String>,
    #[serde(
        rename = "Service Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    service_name: Option<String>,
    #[serde(rename = "Price", default)]
    price: Money,
    #[serde(
        rename = "Primary Assessment",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    primary_assessment: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}
