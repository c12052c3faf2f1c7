//! # gap-mapper
//!
//! Maps externally sourced spreadsheet rows onto the GAP field vocabulary.
//!
//! - [`content`]: decides whether an HTML cell has visible text and pulls
//!   anchors out of it
//! - [`mapper`]: the translation table and the row mapper
//! - [`source`]: reads CSV exports into ordered `(header, cell)` rows

pub mod content;
pub mod mapper;
pub mod source;

mod error;

pub use content::{Link, extract_links, has_visible_content, rewrite_cell};
pub use error::MapperError;
pub use mapper::{FieldMapper, MapRule, MappedRow, audit_goal_rules};
pub use source::{Row, rows_from_csv, rows_from_path};
