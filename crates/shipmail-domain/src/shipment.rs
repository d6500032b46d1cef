//! Shipment details reported by the completion model

/// Shipment details extracted from a single email.
///
/// Every field defaults to empty: a reply that could not be decoded, or a
/// decoded object missing some keys, still produces a usable value.
/// List entries are already stringified for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedShipment {
    /// Purchase order numbers
    pub po_numbers: Vec<String>,

    /// Part numbers
    pub part_numbers: Vec<String>,

    /// Quantities, expected to be integer-like
    pub quantities: Vec<String>,

    /// Shipping or transaction tracking number
    pub tracking_number: String,

    /// Sender or vendor the email came from
    pub source: String,

    /// Kind of notification (e.g. "Shipped", "Order Confirmation")
    pub type_of_email: String,
}

impl ExtractedShipment {
    /// Length of the longest of the three list fields
    pub fn max_list_len(&self) -> usize {
        self.po_numbers
            .len()
            .max(self.part_numbers.len())
            .max(self.quantities.len())
    }

    /// True when no field carries any data
    pub fn is_empty(&self) -> bool {
        self.max_list_len() == 0
            && self.tracking_number.is_empty()
            && self.source.is_empty()
            && self.type_of_email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let shipment = ExtractedShipment::default();
        assert!(shipment.is_empty());
        assert_eq!(shipment.max_list_len(), 0);
    }

    #[test]
    fn test_max_list_len_uses_longest_list() {
        let shipment = ExtractedShipment {
            po_numbers: vec!["PO1".into(), "PO2".into()],
            part_numbers: vec!["P1".into()],
            quantities: vec!["1".into(), "2".into(), "3".into()],
            ..Default::default()
        };
        assert_eq!(shipment.max_list_len(), 3);
        assert!(!shipment.is_empty());
    }

    #[test]
    fn test_scalar_only_is_not_empty() {
        let shipment = ExtractedShipment {
            tracking_number: "1Z999".into(),
            ..Default::default()
        };
        assert!(!shipment.is_empty());
        assert_eq!(shipment.max_list_len(), 0);
    }
}
