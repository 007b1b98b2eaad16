//! 整數規劃求解器介面

use std::fmt;

/// 目標函數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// 最大化所有變數之和（合計袋數）
    MaximizeSum,
}

/// 庫存約束：`sum(coef * x[var]) <= upper_bound`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityConstraint {
    /// 對應的重量索引
    pub weight_index: usize,

    /// (變數索引, 係數)，只列出非零項
    pub terms: Vec<(usize, u32)>,

    pub upper_bound: u32,
}

impl CapacityConstraint {
    /// 給定整數解時的左式值
    pub fn lhs(&self, values: &[u32]) -> u64 {
        self.terms
            .iter()
            .map(|&(var, coef)| {
                u64::from(values.get(var).copied().unwrap_or(0)) * u64::from(coef)
            })
            .sum()
    }
}

/// 整數規劃問題（變數皆為非負整數，上界由約束隱含）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerProgram {
    pub variable_count: usize,
    pub constraints: Vec<CapacityConstraint>,
    pub objective: Objective,
}

impl IntegerProgram {
    /// 整數解是否滿足所有約束
    pub fn is_satisfied_by(&self, values: &[u32]) -> bool {
        values.len() == self.variable_count
            && self
                .constraints
                .iter()
                .all(|c| c.lhs(values) <= u64::from(c.upper_bound))
    }

    /// 目標函數值
    pub fn objective_value(&self, values: &[u32]) -> u64 {
        match self.objective {
            Objective::MaximizeSum => values.iter().map(|&v| u64::from(v)).sum(),
        }
    }
}

/// 非最佳解的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonOptimalReason {
    Infeasible,
    Unbounded,
    TimedOut,
    Failed(String),
}

impl fmt::Display for NonOptimalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonOptimalReason::Infeasible => write!(f, "問題不可行"),
            NonOptimalReason::Unbounded => write!(f, "問題無界"),
            NonOptimalReason::TimedOut => write!(f, "求解逾時"),
            NonOptimalReason::Failed(message) => write!(f, "求解失敗: {}", message),
        }
    }
}

/// 求解結果
#[derive(Debug, Clone, PartialEq)]
pub enum OracleOutcome {
    /// 最佳解（每個變數一個值，可能帶浮點誤差）
    Optimal(Vec<f64>),
    NonOptimal(NonOptimalReason),
}

impl From<NonOptimalReason> for OracleOutcome {
    fn from(reason: NonOptimalReason) -> Self {
        OracleOutcome::NonOptimal(reason)
    }
}

/// 整數規劃求解器
///
/// 求解是整個流程中唯一耗時不定的操作，實作可以是任何後端。
/// 無法建立或初始化後端時回傳 `PackingError::SolverUnavailable`。
pub trait SolverOracle {
    /// 後端名稱
    fn name(&self) -> &str;

    fn solve(&self, program: &IntegerProgram) -> kombu_core::Result<OracleOutcome>;
}

impl<T: SolverOracle + ?Sized> SolverOracle for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, program: &IntegerProgram) -> kombu_core::Result<OracleOutcome> {
        (**self).solve(program)
    }
}

impl<T: SolverOracle + ?Sized> SolverOracle for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, program: &IntegerProgram) -> kombu_core::Result<OracleOutcome> {
        (**self).solve(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> IntegerProgram {
        IntegerProgram {
            variable_count: 2,
            constraints: vec![
                CapacityConstraint {
                    weight_index: 0,
                    terms: vec![(0, 2), (1, 1)],
                    upper_bound: 3,
                },
                CapacityConstraint {
                    weight_index: 1,
                    terms: vec![(1, 1)],
                    upper_bound: 1,
                },
            ],
            objective: Objective::MaximizeSum,
        }
    }

    #[test]
    fn test_program_satisfaction() {
        let program = program();

        assert!(program.is_satisfied_by(&[1, 1]));
        assert!(!program.is_satisfied_by(&[2, 0]));
        assert!(!program.is_satisfied_by(&[0, 2]));
        assert!(!program.is_satisfied_by(&[1]));
        assert_eq!(program.objective_value(&[1, 1]), 2);
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(NonOptimalReason::TimedOut.to_string(), "求解逾時");
        assert_eq!(
            NonOptimalReason::Failed("x".to_string()).to_string(),
            "求解失敗: x"
        );
    }
}
