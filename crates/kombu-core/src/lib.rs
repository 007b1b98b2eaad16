//! # Kombu Core
//!
//! 核心資料模型與類型定義（庫存、配置、錯誤）

pub mod config;
pub mod inventory;
pub mod plan;
pub mod sample;

// Re-export 主要類型
pub use config::{PackingConfig, TargetWindow, MAX_PIECES_PER_BAG};
pub use inventory::{Inventory, InventoryRecord, QuantizedCatalog, WeightEntry};
pub use plan::{Allocation, BagPattern, CapacityViolation, PatternSet};

/// 裝袋計算錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PackingError {
    #[error("缺少必要欄位: {0}")]
    MissingColumn(String),

    #[error("無效的數值: {0}")]
    InvalidValue(String),

    #[error("庫存資料為空")]
    EmptyInventory,

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("所有重量的庫存皆為 0")]
    EmptyStock,

    #[error(
        "找不到符合條件的組合：{pieces_per_bag} 枚，合計 {min_sum}..={max_sum}（0.1 單位）"
    )]
    NoFeasiblePattern {
        min_sum: i64,
        max_sum: i64,
        pieces_per_bag: u32,
    },

    #[error("無法初始化求解器: {0}")]
    SolverUnavailable(String),

    #[error("找不到最佳分配: {0}")]
    NoOptimalAllocation(String),

    #[error("剩餘庫存為負（約束建構錯誤）：重量 {weight}，剩餘 {remaining}")]
    NegativeRemaining {
        weight: rust_decimal::Decimal,
        remaining: i64,
    },
}

pub type Result<T> = std::result::Result<T, PackingError>;
