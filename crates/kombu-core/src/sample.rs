//! 範例庫存（0.1g 刻度，6.0g〜7.9g）

use rust_decimal::Decimal;

use crate::inventory::InventoryRecord;

const SAMPLE: [(i64, u32); 20] = [
    (60, 20),
    (61, 3),
    (62, 6),
    (63, 5),
    (64, 9),
    (65, 9),
    (66, 10),
    (67, 10),
    (68, 13),
    (69, 10),
    (70, 6),
    (71, 6),
    (72, 20),
    (73, 13),
    (74, 9),
    (75, 11),
    (76, 8),
    (77, 15),
    (78, 16),
    (79, 26),
];

/// 範例庫存列
pub fn sample_records() -> Vec<InventoryRecord> {
    SAMPLE
        .iter()
        .map(|&(tenths, stock)| InventoryRecord::new(Decimal::new(tenths, 1), Decimal::from(stock)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Inventory;

    #[test]
    fn test_sample_inventory() {
        let inventory = Inventory::from_records(&sample_records()).unwrap();

        assert_eq!(inventory.len(), 20);
        assert_eq!(inventory.total_stock(), 225);
        assert_eq!(inventory.weight(0), Some(Decimal::new(60, 1)));
        assert_eq!(inventory.quantize().heaviest(), Some(79));
    }
}
