//! 裝袋計劃模型（組合模式與分配結果）

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inventory::{Inventory, QuantizedCatalog};

/// 組合模式：每種重量在一袋中使用的枚數
///
/// `counts[i]` 對應庫存中第 i 個重量（重量遞增順序）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BagPattern {
    counts: Vec<u32>,
}

impl BagPattern {
    /// 創建新的組合模式
    pub fn new(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    /// 各重量的使用枚數
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// 一袋的枚數
    pub fn piece_count(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// 一袋的量化合計重量
    pub fn total_tenths(&self, catalog: &QuantizedCatalog) -> i64 {
        self.counts
            .iter()
            .zip(catalog.weights())
            .map(|(&count, &weight)| i64::from(count) * weight)
            .sum()
    }

    /// 展開為實際重量列表（如 `[4.0, 4.5, 4.5]`）
    pub fn expand(&self, inventory: &Inventory) -> Vec<Decimal> {
        self.counts
            .iter()
            .zip(inventory.entries())
            .flat_map(|(&count, entry)| std::iter::repeat(entry.weight).take(count as usize))
            .collect()
    }

    /// 一袋的合計重量（g）
    pub fn total_weight(&self, inventory: &Inventory) -> Decimal {
        self.expand(inventory).into_iter().sum()
    }
}

/// 組合模式集合（保持產生順序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSet {
    patterns: Vec<BagPattern>,
}

impl PatternSet {
    pub fn new(patterns: Vec<BagPattern>) -> Self {
        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BagPattern> {
        self.patterns.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BagPattern> {
        self.patterns.iter()
    }

    pub fn as_slice(&self) -> &[BagPattern] {
        &self.patterns
    }

    /// 合計重量分佈（量化合計 → 模式數）
    pub fn total_distribution(&self, catalog: &QuantizedCatalog) -> BTreeMap<i64, usize> {
        let mut distribution = BTreeMap::new();
        for pattern in &self.patterns {
            *distribution.entry(pattern.total_tenths(catalog)).or_insert(0) += 1;
        }
        distribution
    }

    /// 合計重量落在 `lo..=hi`（量化單位）的模式數
    pub fn count_in_range(&self, catalog: &QuantizedCatalog, lo: i64, hi: i64) -> usize {
        self.patterns
            .iter()
            .map(|p| p.total_tenths(catalog))
            .filter(|total| (lo..=hi).contains(total))
            .count()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a BagPattern;
    type IntoIter = std::slice::Iter<'a, BagPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

/// 分配結果：每個模式的袋數（與模式集合等長）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    bags: Vec<u32>,
}

/// 超出庫存的重量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityViolation {
    pub weight_index: usize,
    pub used: u64,
    pub stock: u32,
}

impl Allocation {
    /// 創建新的分配結果（`bags[i]` 為模式 i 的袋數）
    pub fn new(bags: Vec<u32>) -> Self {
        Self { bags }
    }

    /// 各模式的袋數
    pub fn bags(&self) -> &[u32] {
        &self.bags
    }

    /// 取得指定模式的袋數
    pub fn bags_of(&self, pattern_index: usize) -> u32 {
        self.bags.get(pattern_index).copied().unwrap_or(0)
    }

    /// 袋數大於 0 的 (模式索引, 袋數)
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.bags
            .iter()
            .enumerate()
            .filter(|(_, &bags)| bags > 0)
            .map(|(index, &bags)| (index, bags))
    }

    /// 合計袋數
    pub fn total_bags(&self) -> u64 {
        self.bags.iter().map(|&b| u64::from(b)).sum()
    }

    /// 各重量的使用枚數
    pub fn usage(&self, patterns: &PatternSet, weight_count: usize) -> Vec<u64> {
        let mut used = vec![0u64; weight_count];
        for (index, bags) in self.nonzero() {
            if let Some(pattern) = patterns.get(index) {
                for (slot, &count) in used.iter_mut().zip(pattern.counts()) {
                    *slot += u64::from(bags) * u64::from(count);
                }
            }
        }
        used
    }

    /// 重新檢查庫存約束（不依賴求解器保證）
    pub fn capacity_violations(
        &self,
        patterns: &PatternSet,
        catalog: &QuantizedCatalog,
    ) -> Vec<CapacityViolation> {
        self.usage(patterns, catalog.len())
            .into_iter()
            .zip(catalog.stock())
            .enumerate()
            .filter(|(_, (used, &stock))| *used > u64::from(stock))
            .map(|(weight_index, (used, &stock))| CapacityViolation {
                weight_index,
                used,
                stock,
            })
            .collect()
    }

    /// 是否符合庫存約束
    pub fn is_within_capacity(&self, patterns: &PatternSet, catalog: &QuantizedCatalog) -> bool {
        self.capacity_violations(patterns, catalog).is_empty()
    }
}
