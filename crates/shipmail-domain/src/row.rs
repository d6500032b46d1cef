//! Report rows and the row padding policy

use crate::shipment::ExtractedShipment;

/// Column headers of the shipment report, in display order
pub const REPORT_HEADERS: [&str; 7] = [
    "Email",
    "Purchase Order Number",
    "Part Number",
    "Quantity",
    "Shipping/Transaction Number",
    "Source",
    "Type of Email",
];

/// One line of the shipment report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRow {
    /// 1-based position of the source email in the batch
    pub email: usize,

    /// Purchase order number
    pub purchase_order_number: String,

    /// Part number
    pub part_number: String,

    /// Quantity
    pub quantity: String,

    /// Shipping or transaction number
    pub shipping_number: String,

    /// Source of the email
    pub source: String,

    /// Type of email
    pub type_of_email: String,
}

impl OutputRow {
    /// A row with only the email index set
    pub fn blank(email: usize) -> Self {
        Self {
            email,
            ..Default::default()
        }
    }

    /// Cell values in [`REPORT_HEADERS`] order
    pub fn cells(&self) -> [String; 7] {
        [
            self.email.to_string(),
            self.purchase_order_number.clone(),
            self.part_number.clone(),
            self.quantity.clone(),
            self.shipping_number.clone(),
            self.source.clone(),
            self.type_of_email.clone(),
        ]
    }
}

/// Expand one email's shipment into report rows.
///
/// One row is emitted per index across the three list fields, with shorter
/// lists padded by blank cells. Tracking number, source and email type only
/// appear on the first row. A shipment without list entries still yields
/// exactly one row.
///
/// # Examples
///
/// ```
/// use shipmail_domain::{shipment_rows, ExtractedShipment};
///
/// let shipment = ExtractedShipment {
///     po_numbers: vec!["PO1".into(), "PO2".into()],
///     part_numbers: vec!["P1".into()],
///     tracking_number: "T1".into(),
///     ..Default::default()
/// };
///
/// let rows = shipment_rows(3, &shipment);
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].purchase_order_number, "PO2");
/// assert_eq!(rows[1].part_number, "");
/// assert_eq!(rows[1].shipping_number, "");
/// ```
pub fn shipment_rows(email: usize, shipment: &ExtractedShipment) -> Vec<OutputRow> {
    let row_count = shipment.max_list_len().max(1);

    (0..row_count)
        .map(|idx| {
            let first = idx == 0;
            OutputRow {
                email,
                purchase_order_number: cell(&shipment.po_numbers, idx),
                part_number: cell(&shipment.part_numbers, idx),
                quantity: cell(&shipment.quantities, idx),
                shipping_number: first_only(&shipment.tracking_number, first),
                source: first_only(&shipment.source, first),
                type_of_email: first_only(&shipment.type_of_email, first),
            }
        })
        .collect()
}

fn cell(values: &[String], idx: usize) -> String {
    values.get(idx).cloned().unwrap_or_default()
}

fn first_only(value: &str, first: bool) -> String {
    if first {
        value.to_string()
    } else {
        String::new()
    }
}
