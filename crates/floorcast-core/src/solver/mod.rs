// Mixed binary integer programming: problem description and solver port.
//
// The optimizer formulates a `MilpProblem` and hands it to any `Solver`
// implementation. Backends translate the description into their own model,
// solve within a `SolveBudget`, and report a `SolverOutcome`.

pub mod highs;

use std::time::Duration;

use thiserror::Error;

pub use highs::HighsSolver;

// ---------------------------------------------------------------------------
// Problem description
// ---------------------------------------------------------------------------

/// Index of a variable inside a `MilpProblem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Integer variable restricted to {0, 1}.
    Binary,
    /// Real-valued variable within its bounds.
    Continuous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub kind: VariableKind,
    /// `None` means unbounded below.
    pub lower: Option<f64>,
    /// `None` means unbounded above.
    pub upper: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

/// `Σ coef * var (sense) rhs`, stored sparsely.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(VarId, f64)>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

/// A maximization problem over binary and continuous variables with
/// linear constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilpProblem {
    variables: Vec<Variable>,
    constraints: Vec<LinearConstraint>,
    objective: Vec<(VarId, f64)>,
}

impl MilpProblem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.push_variable(Variable {
            name: name.into(),
            kind: VariableKind::Binary,
            lower: Some(0.0),
            upper: Some(1.0),
        })
    }

    pub fn add_continuous(
        &mut self,
        name: impl Into<String>,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> VarId {
        self.push_variable(Variable {
            name: name.into(),
            kind: VariableKind::Continuous,
            lower,
            upper,
        })
    }

    fn push_variable(&mut self, variable: Variable) -> VarId {
        self.variables.push(variable);
        VarId(self.variables.len() - 1)
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, f64)>,
        sense: ConstraintSense,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            sense,
            rhs,
        });
    }

    /// Set the expression to maximize.
    pub fn maximize(&mut self, terms: Vec<(VarId, f64)>) {
        self.objective = terms;
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &[(VarId, f64)] {
        &self.objective
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Value of a sparse linear expression under `values`.
    pub fn evaluate(terms: &[(VarId, f64)], values: &[f64]) -> f64 {
        terms
            .iter()
            .map(|(var, coef)| coef * values.get(var.0).copied().unwrap_or(0.0))
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Budget and outcome
// ---------------------------------------------------------------------------

/// Effort limits for a single solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveBudget {
    /// Wall-clock cap on the solve.
    pub time_limit: Duration,
    /// Relative MIP gap at which the solver may declare optimality.
    pub mip_rel_gap: f64,
}

impl Default for SolveBudget {
    fn default() -> Self {
        SolveBudget {
            time_limit: Duration::from_secs(10),
            mip_rel_gap: 0.0,
        }
    }
}

/// How a solve terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// A solution was found and proven optimal.
    Optimal,
    /// A solution was found but a limit stopped the search before proof.
    Feasible,
    /// The problem has no feasible solution.
    Infeasible,
    /// A limit was hit before any solution was found.
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub status: SolveStatus,
    /// One value per problem variable; empty when there is no solution.
    pub values: Vec<f64>,
    pub objective: Option<f64>,
}

impl SolverOutcome {
    pub fn infeasible() -> Self {
        SolverOutcome {
            status: SolveStatus::Infeasible,
            values: Vec::new(),
            objective: None,
        }
    }

    pub fn unknown() -> Self {
        SolverOutcome {
            status: SolveStatus::Unknown,
            values: Vec::new(),
            objective: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("solver `{solver}` failed: {message}")]
    Backend {
        solver: &'static str,
        message: String,
    },

    #[error("solver returned {found} values for {expected} variables")]
    ValueCountMismatch { expected: usize, found: usize },

    #[error("solver reported an optimal solution that violates the model: {reason}")]
    InvalidSolution { reason: String },
}

// ---------------------------------------------------------------------------
// Solver port
// ---------------------------------------------------------------------------

/// A mixed binary integer programming backend.
///
/// Implementations must be `Send + Sync` so one optimizer can serve
/// concurrent requests; each call gets its own problem instance.
pub trait Solver: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &'static str;

    /// Maximize `problem`'s objective within `budget`.
    ///
    /// Infeasibility and limit exhaustion are reported through
    /// `SolverOutcome::status`; `Err` is reserved for backend failures.
    fn solve(&self, problem: &MilpProblem, budget: &SolveBudget) -> Result<SolverOutcome, SolverError>;
}
