//! good_lp + microlp 後端

use good_lp::solvers::microlp::microlp;
use good_lp::{ResolutionError, Solution, SolverModel};

use crate::model::LinearModel;
use crate::oracle::{IntegerProgram, NonOptimalReason, OracleOutcome, SolverOracle};

/// 純 Rust 的分枝定界整數規劃求解器
///
/// 不需系統函式庫，但變數數千個以上時求解時間無上限，適合小規模問題。
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpOracle;

impl MicroLpOracle {
    pub const NAME: &'static str = "microlp";

    pub fn new() -> Self {
        Self
    }
}

impl SolverOracle for MicroLpOracle {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn solve(&self, program: &IntegerProgram) -> kombu_core::Result<OracleOutcome> {
        let LinearModel {
            vars,
            x,
            objective,
            constraints,
        } = LinearModel::build(program)?;

        let mut problem = vars.maximise(objective).using(microlp);
        for constraint in constraints {
            problem = problem.with(constraint);
        }

        match problem.solve() {
            Ok(solution) => Ok(OracleOutcome::Optimal(
                x.iter().map(|&var| solution.value(var)).collect(),
            )),
            Err(ResolutionError::Infeasible) => {
                Ok(OracleOutcome::NonOptimal(NonOptimalReason::Infeasible))
            }
            Err(ResolutionError::Unbounded) => {
                Ok(OracleOutcome::NonOptimal(NonOptimalReason::Unbounded))
            }
            Err(other) => Ok(OracleOutcome::NonOptimal(NonOptimalReason::Failed(
                other.to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{CapacityConstraint, Objective};
    use kombu_core::PackingError;

    fn round_all(values: &[f64]) -> Vec<u32> {
        values.iter().map(|v| v.round() as u32).collect()
    }

    #[test]
    fn test_solves_small_program() {
        // x0: [2,0], x1: [1,1], x2: [0,2]；庫存 [3, 3]
        let program = IntegerProgram {
            variable_count: 3,
            constraints: vec![
                CapacityConstraint {
                    weight_index: 0,
                    terms: vec![(0, 2), (1, 1)],
                    upper_bound: 3,
                },
                CapacityConstraint {
                    weight_index: 1,
                    terms: vec![(1, 1), (2, 2)],
                    upper_bound: 3,
                },
            ],
            objective: Objective::MaximizeSum,
        };

        let outcome = MicroLpOracle::new().solve(&program).unwrap();
        let OracleOutcome::Optimal(values) = outcome else {
            panic!("expected optimal outcome, got {:?}", outcome);
        };

        let bags = round_all(&values);
        assert!(program.is_satisfied_by(&bags));
        assert_eq!(program.objective_value(&bags), 3);
    }

    #[test]
    fn test_zero_stock_forces_zero_bags() {
        let program = IntegerProgram {
            variable_count: 1,
            constraints: vec![CapacityConstraint {
                weight_index: 0,
                terms: vec![(0, 2)],
                upper_bound: 1,
            }],
            objective: Objective::MaximizeSum,
        };

        let outcome = MicroLpOracle::new().solve(&program).unwrap();
        let OracleOutcome::Optimal(values) = outcome else {
            panic!("expected optimal outcome, got {:?}", outcome);
        };
        assert_eq!(round_all(&values), vec![0]);
    }

    #[test]
    fn test_dangling_variable_is_rejected() {
        let program = IntegerProgram {
            variable_count: 1,
            constraints: vec![CapacityConstraint {
                weight_index: 0,
                terms: vec![(3, 1)],
                upper_bound: 1,
            }],
            objective: Objective::MaximizeSum,
        };

        assert!(matches!(
            MicroLpOracle::new().solve(&program),
            Err(PackingError::SolverUnavailable(_))
        ));
    }
}
