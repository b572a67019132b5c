//! Export module for budget-dashboard
//!
//! - CSV: expenses in the backing file format, monthly and category totals
//! - JSON: machine-readable export of expenses plus both aggregations
//! - YAML: the same content, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_categories_csv, export_expenses_csv, export_monthly_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
