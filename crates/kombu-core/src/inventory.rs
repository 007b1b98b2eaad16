//! 庫存模型

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{PackingError, Result};

/// 欄位名稱：重量
pub const WEIGHT_COLUMN: &str = "weights";

/// 欄位名稱：庫存
pub const STOCK_COLUMN: &str = "stock";

/// 量化倍率（0.1 單位 → 整數）
pub const QUANTIZATION_SCALE: i64 = 10;

/// 原始庫存列（未驗證）
///
/// 欄位名稱沿用庫存表的表頭 `weights` / `stock`，其他欄位一律忽略。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// 單枚重量（g）
    pub weights: Option<Decimal>,

    /// 庫存枚數
    pub stock: Option<Decimal>,
}

impl InventoryRecord {
    /// 創建完整的庫存列
    pub fn new(weight: Decimal, stock: Decimal) -> Self {
        Self {
            weights: Some(weight),
            stock: Some(stock),
        }
    }
}

/// 單一重量的庫存
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// 單枚重量（g）
    pub weight: Decimal,

    /// 量化後重量（0.1g 單位）
    pub weight_tenths: i64,

    /// 庫存枚數
    pub stock: u32,
}

/// 庫存（依重量遞增排序，重量不重複）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    entries: Vec<WeightEntry>,
}

impl Inventory {
    /// 從原始庫存列建立庫存
    ///
    /// 驗證順序：欄位存在 → 重量為正 → 庫存為非負整數 → 重量不重複。
    /// 小數庫存會被拒絕，不做截斷。
    pub fn from_records(records: &[InventoryRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(PackingError::EmptyInventory);
        }

        let mut entries = Vec::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            let weight = record
                .weights
                .ok_or_else(|| PackingError::MissingColumn(WEIGHT_COLUMN.to_string()))?;
            let stock = record
                .stock
                .ok_or_else(|| PackingError::MissingColumn(STOCK_COLUMN.to_string()))?;

            entries.push(Self::validate_entry(row, weight, stock)?);
        }

        Self::from_entries(entries)
    }

    /// 從 (重量, 庫存) 建立庫存
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Decimal, u32)>,
    {
        let records: Vec<InventoryRecord> = pairs
            .into_iter()
            .map(|(weight, stock)| InventoryRecord::new(weight, Decimal::from(stock)))
            .collect();
        Self::from_records(&records)
    }

    fn from_entries(mut entries: Vec<WeightEntry>) -> Result<Self> {
        // 枝刈り依賴重量單調遞增
        entries.sort_by_key(|e| e.weight_tenths);

        if let Some(pair) = entries
            .windows(2)
            .find(|pair| pair[0].weight_tenths == pair[1].weight_tenths)
        {
            return Err(PackingError::InvalidValue(format!(
                "重量重複: {} 與 {}",
                pair[0].weight, pair[1].weight
            )));
        }

        Ok(Self { entries })
    }

    fn validate_entry(row: usize, weight: Decimal, stock: Decimal) -> Result<WeightEntry> {
        if weight <= Decimal::ZERO {
            return Err(PackingError::InvalidValue(format!(
                "第 {} 列重量必須為正數: {}",
                row + 1,
                weight
            )));
        }

        let weight_tenths = quantize_tenths(weight)
            .filter(|&t| t > 0)
            .ok_or_else(|| {
                PackingError::InvalidValue(format!(
                    "第 {} 列重量無法以 0.1 單位表示: {}",
                    row + 1,
                    weight
                ))
            })?;

        if stock < Decimal::ZERO || !stock.fract().is_zero() {
            return Err(PackingError::InvalidValue(format!(
                "第 {} 列庫存必須為非負整數: {}",
                row + 1,
                stock
            )));
        }

        let stock = stock.to_u32().ok_or_else(|| {
            PackingError::InvalidValue(format!("第 {} 列庫存超出範圍: {}", row + 1, stock))
        })?;

        Ok(WeightEntry {
            weight,
            weight_tenths,
            stock,
        })
    }

    /// 所有庫存項目（重量遞增）
    pub fn entries(&self) -> &[WeightEntry] {
        &self.entries
    }

    /// 重量種類數
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 取得索引對應的重量
    pub fn weight(&self, index: usize) -> Option<Decimal> {
        self.entries.get(index).map(|e| e.weight)
    }

    /// 合計庫存枚數
    pub fn total_stock(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.stock)).sum()
    }

    /// 是否至少有一種重量有庫存
    pub fn has_stock(&self) -> bool {
        self.entries.iter().any(|e| e.stock > 0)
    }

    /// 建立量化目錄
    pub fn quantize(&self) -> QuantizedCatalog {
        QuantizedCatalog {
            weights_tenths: self.entries.iter().map(|e| e.weight_tenths).collect(),
            stock: self.entries.iter().map(|e| e.stock).collect(),
        }
    }
}

/// 量化目錄（整數重量，建立後不可變）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedCatalog {
    weights_tenths: Vec<i64>,
    stock: Vec<u32>,
}

impl QuantizedCatalog {
    /// 直接由量化值建立（需已依重量遞增排序）
    pub fn new(weights_tenths: Vec<i64>, stock: Vec<u32>) -> Result<Self> {
        if weights_tenths.len() != stock.len() {
            return Err(PackingError::InvalidValue(format!(
                "重量與庫存的列數不一致: {} / {}",
                weights_tenths.len(),
                stock.len()
            )));
        }
        if weights_tenths.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(PackingError::InvalidValue(
                "量化重量必須嚴格遞增".to_string(),
            ));
        }
        if weights_tenths.iter().any(|&w| w <= 0) {
            return Err(PackingError::InvalidValue("量化重量必須為正數".to_string()));
        }

        Ok(Self {
            weights_tenths,
            stock,
        })
    }

    pub fn len(&self) -> usize {
        self.weights_tenths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights_tenths.is_empty()
    }

    pub fn weights(&self) -> &[i64] {
        &self.weights_tenths
    }

    pub fn stock(&self) -> &[u32] {
        &self.stock
    }

    /// 最重的量化重量
    pub fn heaviest(&self) -> Option<i64> {
        self.weights_tenths.last().copied()
    }

    /// 第一個有庫存的索引（搜尋起點）
    pub fn first_in_stock(&self) -> Option<usize> {
        self.stock.iter().position(|&s| s > 0)
    }
}

/// 將十進位數值量化為 0.1 單位的整數（四捨六入五成雙）
pub fn quantize_tenths(value: Decimal) -> Option<i64> {
    value
        .checked_mul(Decimal::from(QUANTIZATION_SCALE))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i64()
}
