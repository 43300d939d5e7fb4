// HiGHS backend via good_lp.
//
// HiGHS is an open-source LP/MIP solver; good_lp gives it an ergonomic
// model-building API. The time limit and relative gap from `SolveBudget` are
// passed straight through as HiGHS options.

use good_lp::solvers::highs::highs;
use good_lp::solvers::SolutionStatus as HighsStatus;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
};
use tracing::debug;

use super::{
    ConstraintSense, MilpProblem, SolveBudget, SolveStatus, Solver, SolverError, SolverOutcome,
    VarId, VariableKind,
};

/// HiGHS-based mixed integer solver.
#[derive(Debug, Default, Clone)]
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

fn expression(terms: &[(VarId, f64)], handles: &[good_lp::Variable]) -> Expression {
    terms
        .iter()
        .map(|(var, coef)| *coef * handles[var.0])
        .sum()
}

impl Solver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&self, problem: &MilpProblem, budget: &SolveBudget) -> Result<SolverOutcome, SolverError> {
        if problem.num_vars() == 0 {
            return Ok(SolverOutcome {
                status: SolveStatus::Optimal,
                values: vec![],
                objective: Some(0.0),
            });
        }

        let mut vars = ProblemVariables::new();
        let handles: Vec<good_lp::Variable> = problem
            .variables()
            .iter()
            .map(|v| {
                let mut def = variable();
                if v.kind == VariableKind::Binary {
                    def = def.binary();
                } else {
                    if let Some(lb) = v.lower {
                        def = def.min(lb);
                    }
                    if let Some(ub) = v.upper {
                        def = def.max(ub);
                    }
                }
                vars.add(def)
            })
            .collect();

        let objective = expression(problem.objective(), &handles);
        let mut model = vars
            .maximise(objective)
            .using(highs)
            .set_option("output_flag", false)
            .set_option("time_limit", budget.time_limit.as_secs_f64())
            .set_option("mip_rel_gap", budget.mip_rel_gap);

        for c in problem.constraints() {
            let lhs = expression(&c.terms, &handles);
            let rhs = c.rhs;
            model = match c.sense {
                ConstraintSense::LessEqual => model.with(constraint!(lhs <= rhs)),
                ConstraintSense::GreaterEqual => model.with(constraint!(lhs >= rhs)),
                ConstraintSense::Equal => model.with(constraint!(lhs == rhs)),
            };
        }

        debug!(
            "highs: solving {} variables, {} constraints, time limit {:?}",
            problem.num_vars(),
            problem.constraints().len(),
            budget.time_limit
        );

        match model.solve() {
            Ok(solution) => {
                let values: Vec<f64> = handles.iter().map(|v| solution.value(*v)).collect();
                let objective = MilpProblem::evaluate(problem.objective(), &values);
                let status = match solution.status() {
                    HighsStatus::Optimal | HighsStatus::GapLimit => SolveStatus::Optimal,
                    _ => SolveStatus::Feasible,
                };
                Ok(SolverOutcome {
                    status,
                    values,
                    objective: Some(objective),
                })
            }
            Err(e) => outcome_for_error(self.name(), e),
        }
    }
}

/// Map a failed good_lp solve onto an outcome or a backend error.
///
/// HiGHS reports a time or iteration limit reached before any incumbent as
/// `Other("NoSolutionFound")`.
fn outcome_for_error(solver: &'static str, err: ResolutionError) -> Result<SolverOutcome, SolverError> {
    match err {
        ResolutionError::Infeasible => Ok(SolverOutcome::infeasible()),
        ResolutionError::Other("NoSolutionFound") => {
            debug!("{}: limit reached without an incumbent", solver);
            Ok(SolverOutcome::unknown())
        }
        e => Err(SolverError::Backend {
            solver,
            message: e.to_string(),
        }),
    }
}
