//! 分配問題的建構與解讀

use kombu_core::{Allocation, PackingError, PatternSet, QuantizedCatalog};

use crate::oracle::{
    CapacityConstraint, IntegerProgram, Objective, OracleOutcome, SolverOracle,
};

/// 分配問題建構器
///
/// 變數 `x[i]` 為模式 i 的袋數；每種重量 j 有一條
/// `sum_i x[i] * counts_i[j] <= stock[j]`；目標為最大化合計袋數。
/// 目標函數不區分袋數相同的解（不考慮剩餘量或稀缺重量）。
pub struct AllocationFormulator;

impl AllocationFormulator {
    /// 建立整數規劃問題
    pub fn formulate(patterns: &PatternSet, catalog: &QuantizedCatalog) -> IntegerProgram {
        let constraints = catalog
            .stock()
            .iter()
            .enumerate()
            .map(|(weight_index, &upper_bound)| CapacityConstraint {
                weight_index,
                terms: patterns
                    .iter()
                    .enumerate()
                    .filter_map(|(var, pattern)| {
                        pattern
                            .counts()
                            .get(weight_index)
                            .copied()
                            .filter(|&count| count > 0)
                            .map(|count| (var, count))
                    })
                    .collect(),
                upper_bound,
            })
            .collect();

        IntegerProgram {
            variable_count: patterns.len(),
            constraints,
            objective: Objective::MaximizeSum,
        }
    }

    /// 解讀求解結果：四捨五入為整數袋數
    pub fn interpret(
        program: &IntegerProgram,
        outcome: OracleOutcome,
    ) -> kombu_core::Result<Allocation> {
        let values = match outcome {
            OracleOutcome::Optimal(values) => values,
            OracleOutcome::NonOptimal(reason) => {
                return Err(PackingError::NoOptimalAllocation(reason.to_string()));
            }
        };

        if values.len() != program.variable_count {
            return Err(PackingError::NoOptimalAllocation(format!(
                "求解器回傳 {} 個值，預期 {} 個",
                values.len(),
                program.variable_count
            )));
        }

        let bags = values
            .iter()
            .enumerate()
            .map(|(index, &value)| Self::round_bags(index, value))
            .collect::<kombu_core::Result<Vec<u32>>>()?;

        Ok(Allocation::new(bags))
    }

    fn round_bags(index: usize, value: f64) -> kombu_core::Result<u32> {
        let rounded = value.round();
        if !rounded.is_finite() || rounded < 0.0 || rounded > f64::from(u32::MAX) {
            return Err(PackingError::NoOptimalAllocation(format!(
                "模式 {} 的袋數無效: {}",
                index, value
            )));
        }
        Ok(rounded as u32)
    }

    /// 建構 → 求解 → 解讀
    pub fn allocate<O: SolverOracle + ?Sized>(
        patterns: &PatternSet,
        catalog: &QuantizedCatalog,
        oracle: &O,
    ) -> kombu_core::Result<Allocation> {
        let program = Self::formulate(patterns, catalog);

        tracing::debug!(
            "整數規劃：變數 {} 個，約束 {} 條，求解器 {}",
            program.variable_count,
            program.constraints.len(),
            oracle.name()
        );

        let start_time = std::time::Instant::now();
        let outcome = oracle.solve(&program)?;
        tracing::debug!("求解耗時 {:?}", start_time.elapsed());

        let allocation = Self::interpret(&program, outcome)?;

        tracing::info!(
            "最佳分配：合計 {} 袋（使用模式 {} 種）",
            allocation.total_bags(),
            allocation.nonzero().count()
        );

        Ok(allocation)
    }
}
