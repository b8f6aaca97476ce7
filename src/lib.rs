//! Structured extraction of Four Pillars (八字) and Six Lines (六爻) chart
//! reports from their plain-text rendering.

pub mod config;
pub mod error;
pub mod html;
pub mod parser;
pub mod records;

pub use error::{ExtractError, Result};
pub use parser::{process_html, process_lines, process_text, split_lines, ReportKind};
pub use records::{FourPillarsRecord, Report, SixLinesRecord};
