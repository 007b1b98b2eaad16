//! good_lp 模型建構（各後端共用）

use good_lp::{variable, Constraint, Expression, ProblemVariables, Variable};
use kombu_core::PackingError;

use crate::oracle::{IntegerProgram, Objective};

/// 轉換成 good_lp 的整數規劃
pub(crate) struct LinearModel {
    pub vars: ProblemVariables,
    pub x: Vec<Variable>,
    pub objective: Expression,
    pub constraints: Vec<Constraint>,
}

impl LinearModel {
    /// 建立變數（非負整數）、目標函數與容量約束
    pub fn build(program: &IntegerProgram) -> kombu_core::Result<Self> {
        let mut vars = ProblemVariables::new();
        let x: Vec<Variable> = (0..program.variable_count)
            .map(|_| vars.add(variable().integer().min(0)))
            .collect();

        let mut objective = Expression::with_capacity(x.len());
        match program.objective {
            Objective::MaximizeSum => {
                for &var in &x {
                    objective.add_mul(1.0, var);
                }
            }
        }

        let mut constraints = Vec::with_capacity(program.constraints.len());
        for constraint in &program.constraints {
            let mut lhs = Expression::with_capacity(constraint.terms.len());
            for &(var, coef) in &constraint.terms {
                let var = x.get(var).copied().ok_or_else(|| {
                    PackingError::SolverUnavailable(format!(
                        "約束引用不存在的變數: {} (共 {} 個)",
                        var, program.variable_count
                    ))
                })?;
                lhs.add_mul(f64::from(coef), var);
            }
            constraints.push(lhs.leq(f64::from(constraint.upper_bound)));
        }

        Ok(Self {
            vars,
            x,
            objective,
            constraints,
        })
    }
}
