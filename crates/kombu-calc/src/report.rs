//! 結果彙總（袋數、使用量、剩餘庫存）

use kombu_core::{Allocation, Inventory, PackingError, PatternSet};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ReportWarning;

/// 組合結果列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackingRow {
    /// 模式索引（產生順序）
    pub pattern_index: usize,

    /// 一袋的重量明細
    pub weights: Vec<Decimal>,

    /// 袋數
    pub bags: u32,

    /// 一袋的合計重量（g）
    pub total_weight: Decimal,
}

/// 使用後庫存列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryUsage {
    pub weight: Decimal,
    pub stock: u32,
    pub used: u64,

    /// 剩餘枚數（不做截斷，負值代表約束錯誤）
    pub remaining: i64,
}

/// 彙總報表
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageReport {
    /// 依（袋數 desc, 合計重量 desc）排序
    pub rows: Vec<PackingRow>,

    /// 依重量遞增
    pub inventory: Vec<InventoryUsage>,

    pub total_bags: u64,

    pub total_pieces_used: u64,

    pub warnings: Vec<ReportWarning>,
}

impl UsageReport {
    /// 是否有剩餘為負的重量
    pub fn has_negative_remaining(&self) -> bool {
        self.inventory.iter().any(|u| u.remaining < 0)
    }

    /// 完整性檢查：used + remaining == stock 且 remaining >= 0
    pub fn verify(&self) -> kombu_core::Result<()> {
        for usage in &self.inventory {
            if usage.remaining < 0 {
                return Err(PackingError::NegativeRemaining {
                    weight: usage.weight,
                    remaining: usage.remaining,
                });
            }
        }
        Ok(())
    }
}

/// 報表計算器
pub struct ReportCalculator;

impl ReportCalculator {
    /// 將分配結果彙總為報表
    pub fn project(
        inventory: &Inventory,
        patterns: &PatternSet,
        allocation: &Allocation,
    ) -> UsageReport {
        let mut report = UsageReport::default();

        for (index, bags) in allocation.nonzero() {
            let Some(pattern) = patterns.get(index) else {
                report.warnings.push(ReportWarning::error(
                    None,
                    format!("分配結果引用不存在的模式: {}", index),
                ));
                continue;
            };

            let weights = pattern.expand(inventory);
            let total_weight = weights.iter().copied().sum();

            report.rows.push(PackingRow {
                pattern_index: index,
                weights,
                bags,
                total_weight,
            });
            report.total_bags += u64::from(bags);
        }

        // 穩定排序：同袋數同重量時保持產生順序
        report.rows.sort_by(|a, b| {
            b.bags
                .cmp(&a.bags)
                .then_with(|| b.total_weight.cmp(&a.total_weight))
        });

        let used = allocation.usage(patterns, inventory.len());
        for (entry, used) in inventory.entries().iter().zip(used) {
            let remaining = i64::from(entry.stock) - used as i64;

            if remaining < 0 {
                tracing::error!(
                    "剩餘庫存為負：重量 {}，庫存 {}，使用 {}",
                    entry.weight,
                    entry.stock,
                    used
                );
                report.warnings.push(ReportWarning::error(
                    Some(entry.weight),
                    format!("剩餘為負（庫存約束異常）: {}", remaining),
                ));
            }

            report.total_pieces_used += used;
            report.inventory.push(InventoryUsage {
                weight: entry.weight,
                stock: entry.stock,
                used,
                remaining,
            });
        }

        tracing::debug!(
            "報表彙總：組合 {} 種，合計 {} 袋，使用 {} 枚",
            report.rows.len(),
            report.total_bags,
            report.total_pieces_used
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WarningSeverity;
    use kombu_core::BagPattern;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn fixture() -> (Inventory, PatternSet) {
        let inventory = Inventory::from_pairs([(dec("4.0"), 5), (dec("4.5"), 4)]).unwrap();
        let patterns = PatternSet::new(vec![
            BagPattern::new(vec![2, 0]),
            BagPattern::new(vec![1, 1]),
            BagPattern::new(vec![0, 2]),
        ]);
        (inventory, patterns)
    }

    #[test]
    fn test_project_rows_and_usage() {
        let (inventory, patterns) = fixture();
        let allocation = Allocation::new(vec![2, 0, 2]);

        let report = ReportCalculator::project(&inventory, &patterns, &allocation);

        assert_eq!(report.total_bags, 4);
        assert_eq!(report.total_pieces_used, 8);
        assert_eq!(report.rows.len(), 2);
        assert!(report.warnings.is_empty());

        // 同袋數時合計重量大的在前
        assert_eq!(report.rows[0].pattern_index, 2);
        assert_eq!(report.rows[0].weights, vec![dec("4.5"), dec("4.5")]);
        assert_eq!(report.rows[0].total_weight, dec("9.0"));
        assert_eq!(report.rows[1].pattern_index, 0);
        assert_eq!(report.rows[1].total_weight, dec("8.0"));

        assert_eq!(report.inventory[0].used, 4);
        assert_eq!(report.inventory[0].remaining, 1);
        assert_eq!(report.inventory[1].used, 4);
        assert_eq!(report.inventory[1].remaining, 0);
        assert!(report.verify().is_ok());
    }

    #[test]
    fn test_rows_sorted_by_bags_first() {
        let (inventory, patterns) = fixture();
        let allocation = Allocation::new(vec![1, 3, 0]);

        let report = ReportCalculator::project(&inventory, &patterns, &allocation);

        let order: Vec<usize> = report.rows.iter().map(|r| r.pattern_index).collect();
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_used_plus_remaining_equals_stock() {
        let (inventory, patterns) = fixture();
        let allocation = Allocation::new(vec![1, 1, 1]);

        let report = ReportCalculator::project(&inventory, &patterns, &allocation);

        for usage in &report.inventory {
            assert_eq!(usage.used as i64 + usage.remaining, i64::from(usage.stock));
            assert!(usage.remaining >= 0);
        }
    }

    #[test]
    fn test_negative_remaining_is_reported_not_clamped() {
        let (inventory, patterns) = fixture();
        // 4.5g 只有 4 枚，卻分配 3 袋 [0, 2]
        let allocation = Allocation::new(vec![0, 0, 3]);

        let report = ReportCalculator::project(&inventory, &patterns, &allocation);

        assert_eq!(report.inventory[1].remaining, -2);
        assert!(report.has_negative_remaining());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].severity, WarningSeverity::Error);
        assert!(matches!(
            report.verify(),
            Err(PackingError::NegativeRemaining { remaining: -2, .. })
        ));
    }

    #[test]
    fn test_unknown_pattern_index_is_warned() {
        let (inventory, patterns) = fixture();
        let allocation = Allocation::new(vec![0, 0, 0, 5]);

        let report = ReportCalculator::project(&inventory, &patterns, &allocation);

        assert!(report.rows.is_empty());
        assert_eq!(report.total_bags, 0);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_empty_allocation() {
        let (inventory, patterns) = fixture();
        let report = ReportCalculator::project(&inventory, &patterns, &Allocation::new(vec![0; 3]));

        assert!(report.rows.is_empty());
        assert_eq!(report.total_bags, 0);
        assert_eq!(report.inventory.len(), 2);
        assert_eq!(report.inventory[0].remaining, 5);
    }
}
