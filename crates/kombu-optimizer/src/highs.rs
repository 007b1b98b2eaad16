//! good_lp + HiGHS 後端

use std::time::{Duration, Instant};

use good_lp::solvers::highs::highs;
use good_lp::{ResolutionError, Solution, SolutionStatus, SolverModel};

use crate::model::LinearModel;
use crate::oracle::{IntegerProgram, NonOptimalReason, OracleOutcome, SolverOracle};

/// HiGHS 混合整數規劃求解器
///
/// 數萬個變數的組合模式也能在數秒內求得最佳解。
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsOracle {
    time_limit: Option<Duration>,
}

impl HighsOracle {
    pub const NAME: &'static str = "highs";

    pub fn new() -> Self {
        Self::default()
    }

    /// 設定求解時間上限（建構器模式）
    ///
    /// 超過上限時回傳 `NonOptimalReason::TimedOut`，即使之後才得到解也不採用。
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

/// 求解期限
struct Deadline {
    limit: Duration,
    start: Instant,
}

impl Deadline {
    fn start(limit: Duration) -> Self {
        Self {
            limit,
            start: Instant::now(),
        }
    }

    fn is_exceeded(&self) -> bool {
        self.start.elapsed() >= self.limit
    }
}

impl SolverOracle for HighsOracle {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn solve(&self, program: &IntegerProgram) -> kombu_core::Result<OracleOutcome> {
        let deadline = self.time_limit.map(Deadline::start);

        let LinearModel {
            vars,
            x,
            objective,
            constraints,
        } = LinearModel::build(program)?;

        let mut problem = vars.maximise(objective).using(highs);
        if let Some(limit) = self.time_limit {
            problem = problem.set_time_limit(limit.as_secs_f64());
        }
        for constraint in constraints {
            problem = problem.with(constraint);
        }

        let result = problem.solve();
        let timed_out = deadline.as_ref().is_some_and(Deadline::is_exceeded);

        let outcome = match result {
            Ok(solution) => match solution.status() {
                SolutionStatus::TimeLimit => NonOptimalReason::TimedOut.into(),
                _ if timed_out => NonOptimalReason::TimedOut.into(),
                _ => OracleOutcome::Optimal(x.iter().map(|&var| solution.value(var)).collect()),
            },
            Err(_) if timed_out => NonOptimalReason::TimedOut.into(),
            Err(ResolutionError::Infeasible) => NonOptimalReason::Infeasible.into(),
            Err(ResolutionError::Unbounded) => NonOptimalReason::Unbounded.into(),
            Err(other) => NonOptimalReason::Failed(other.to_string()).into(),
        };

        if outcome == OracleOutcome::NonOptimal(NonOptimalReason::TimedOut) {
            tracing::warn!("HiGHS 求解超過時間上限 {:?}", self.time_limit);
        }

        Ok(outcome)
    }
}
