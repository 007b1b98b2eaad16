//! # Kombu Optimizer
//!
//! 分配優化模組（整數規劃建構、求解器後端、比較基準）
//!
//! 後端：
//! - `highs`（預設 feature）：HiGHS，可處理完整範例庫存的十萬級組合
//! - `microlp`：純 Rust，只適合小規模問題

pub mod allocation;
pub mod baseline;
#[cfg(feature = "highs")]
pub mod highs;
pub mod microlp;
mod model;
pub mod oracle;

// Re-export 主要類型
pub use allocation::AllocationFormulator;
pub use baseline::GreedyAllocator;
#[cfg(feature = "highs")]
pub use highs::HighsOracle;
pub use microlp::MicroLpOracle;
pub use oracle::{
    CapacityConstraint, IntegerProgram, NonOptimalReason, Objective, OracleOutcome, SolverOracle,
};

/// 預設求解器名稱
#[cfg(feature = "highs")]
pub const DEFAULT_SOLVER: &str = HighsOracle::NAME;
#[cfg(not(feature = "highs"))]
pub const DEFAULT_SOLVER: &str = MicroLpOracle::NAME;

/// 依名稱建立求解器
pub fn create_oracle(name: &str) -> kombu_core::Result<Box<dyn SolverOracle>> {
    #[cfg(feature = "highs")]
    {
        if name.eq_ignore_ascii_case(HighsOracle::NAME) {
            return Ok(Box::new(HighsOracle::new()));
        }
    }

    if name.eq_ignore_ascii_case(MicroLpOracle::NAME) {
        return Ok(Box::new(MicroLpOracle::new()));
    }

    Err(kombu_core::PackingError::SolverUnavailable(format!(
        "未編入的求解器: {}（可用: {}）",
        name,
        available_solvers().join(", ")
    )))
}

/// 已編入的求解器名稱
pub fn available_solvers() -> Vec<&'static str> {
    let mut names = Vec::new();
    #[cfg(feature = "highs")]
    names.push(HighsOracle::NAME);
    names.push(MicroLpOracle::NAME);
    names
}
