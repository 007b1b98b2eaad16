//! # Kombu
//!
//! 昆布裝袋組合優化：在庫存限制下，求出每袋重量落在目標範圍內且袋數最多的組合。
//!
//! 流程：庫存 → 量化 → 組合模式產生 → 整數規劃 → 解讀 → 報表

use kombu_calc::{PatternGenerator, ReportCalculator, UsageReport};
use kombu_optimizer::{create_oracle, AllocationFormulator, SolverOracle};
use serde::Serialize;

pub use kombu_calc::{InventoryUsage, PackingRow, ReportWarning, WarningSeverity};
pub use kombu_core::{
    Allocation, BagPattern, Inventory, InventoryRecord, PackingConfig, PackingError, PatternSet,
    QuantizedCatalog, Result, TargetWindow,
};
#[cfg(feature = "highs")]
pub use kombu_optimizer::HighsOracle;
pub use kombu_optimizer::{GreedyAllocator, MicroLpOracle, DEFAULT_SOLVER};

/// 裝袋計劃（單次執行結果）
#[derive(Debug, Clone, Serialize)]
pub struct PackingPlan {
    /// 所有有效組合模式（產生順序）
    pub patterns: PatternSet,

    /// 各模式的袋數
    pub allocation: Allocation,

    /// 彙總報表
    pub report: UsageReport,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PackingPlan {
    pub fn total_bags(&self) -> u64 {
        self.report.total_bags
    }
}

/// 裝袋計算流程
pub struct PackingPipeline<O> {
    config: PackingConfig,
    oracle: O,
}

impl<O: SolverOracle> PackingPipeline<O> {
    /// 創建新的計算流程
    pub fn new(config: PackingConfig, oracle: O) -> Self {
        Self { config, oracle }
    }

    pub fn config(&self) -> &PackingConfig {
        &self.config
    }

    /// 從原始庫存列執行
    pub fn run_records(&self, records: &[InventoryRecord]) -> Result<PackingPlan> {
        let inventory = Inventory::from_records(records)?;
        self.run(&inventory)
    }

    /// 主計算入口
    pub fn run(&self, inventory: &Inventory) -> Result<PackingPlan> {
        tracing::info!(
            "開始裝袋計算：重量 {} 種，合計庫存 {} 枚，每袋 {} 枚，目標 {}..={}g",
            inventory.len(),
            inventory.total_stock(),
            self.config.pieces_per_bag,
            self.config.target_min,
            self.config.target_max
        );

        let start_time = std::time::Instant::now();

        tracing::debug!("Step 1: 量化");
        let window = self.config.quantized_window()?;
        let catalog = inventory.quantize();

        tracing::debug!("Step 2: 產生組合模式");
        let patterns = PatternGenerator::generate(&catalog, &window)?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!("合計重量分佈: {:?}", patterns.total_distribution(&catalog));
            log_gram_bins(&patterns, &catalog, &window);
        }

        tracing::debug!("Step 3: 整數規劃求解");
        let allocation = AllocationFormulator::allocate(&patterns, &catalog, &self.oracle)?;

        for violation in allocation.capacity_violations(&patterns, &catalog) {
            tracing::warn!(
                "分配超出庫存：重量索引 {}，使用 {}，庫存 {}",
                violation.weight_index,
                violation.used,
                violation.stock
            );
        }

        tracing::debug!("Step 4: 結果彙總");
        let report = ReportCalculator::project(inventory, &patterns, &allocation);

        tracing::info!("裝袋計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "合計袋數: {}，使用 {} 枚",
            report.total_bags,
            report.total_pieces_used
        );

        Ok(PackingPlan {
            patterns,
            allocation,
            report,
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        })
    }
}

/// 以整數克切分目標範圍（量化單位，兩端皆含），例：42.0〜42.9g、43.0g
fn gram_bins(window: &TargetWindow) -> Vec<(i64, i64)> {
    let scale = kombu_core::inventory::QUANTIZATION_SCALE;
    (window.min_sum.div_euclid(scale)..=window.max_sum.div_euclid(scale))
        .map(|gram| {
            let lo = (gram * scale).max(window.min_sum);
            let hi = (gram * scale + scale - 1).min(window.max_sum);
            (lo, hi)
        })
        .collect()
}

fn log_gram_bins(patterns: &PatternSet, catalog: &QuantizedCatalog, window: &TargetWindow) {
    let scale = kombu_core::inventory::QUANTIZATION_SCALE;
    for (lo, hi) in gram_bins(window) {
        tracing::debug!(
            "{}.{}〜{}.{}g 的模式數: {}",
            lo / scale,
            lo % scale,
            hi / scale,
            hi % scale,
            patterns.count_in_range(catalog, lo, hi)
        );
    }
}

impl PackingPipeline<Box<dyn SolverOracle>> {
    /// 依求解器名稱建立流程（未編入的後端回傳 `SolverUnavailable`）
    pub fn with_solver(config: PackingConfig, solver: &str) -> Result<Self> {
        Ok(Self::new(config, create_oracle(solver)?))
    }
}
