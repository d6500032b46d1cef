//! Shipmail Domain Layer
//!
//! Core value types and trait seams for turning shipment-notification emails
//! into report rows. This crate has no external dependencies; the JSON,
//! HTTP and terminal concerns live in the crates layered on top of it.
//!
//! ## Key Concepts
//!
//! - **Segment**: one email body cut out of a batch file by [`EMAIL_SEPARATOR`]
//! - **ExtractedShipment**: the six fields the completion model reports per email
//! - **OutputRow**: one line of the report; an email expands to one or more rows
//! - **Row padding**: ragged list fields are equalized with blank cells
//!
//! ## Architecture
//!
//! ```text
//! batch file → split_emails → (prompt → LlmProvider → ExtractedShipment) → shipment_rows → report
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod email;
pub mod row;
pub mod shipment;
pub mod traits;

// Re-exports for convenience
pub use email::{split_emails, EMAIL_SEPARATOR};
pub use row::{shipment_rows, OutputRow, REPORT_HEADERS};
pub use shipment::ExtractedShipment;
pub use traits::LlmProvider;
