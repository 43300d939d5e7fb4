// MILP formulation of the maximin weekly-floor roster problem.
//
//   x_i in {0, 1}              one per candidate
//   z free                     the weekly floor
//
//   sum x_i             = roster_size
//   min_p <= sum_{pos(i) = p} x_i <= max_p
//   x_j                 = 1    for each of the team's picks
//   z - sum_i pts[i][w] x_i <= 0   for every week w
//
//   maximize z
//
// min over weeks is not linear; the per-week upper bounds on z turn it into
// an ordinary linear objective, and at the optimum z equals the smallest
// weekly total.

use std::collections::BTreeSet;

use crate::draft::pick::PlayerId;
use crate::solver::{ConstraintSense, MilpProblem, VarId};

use super::request::OptimizationRequest;

/// The built problem plus the mapping back to players.
#[derive(Debug, Clone)]
pub struct RosterModel {
    pub problem: MilpProblem,
    /// Selection variable per candidate, in candidate order.
    pub selections: Vec<(PlayerId, VarId)>,
    /// The epigraph variable.
    pub floor: VarId,
}

impl RosterModel {
    /// Players whose selection variable is within `tolerance` of 1.
    pub fn extract_roster(&self, values: &[f64], tolerance: f64) -> BTreeSet<PlayerId> {
        self.selections
            .iter()
            .filter(|(_, var)| {
                values
                    .get(var.0)
                    .is_some_and(|v| (v - 1.0).abs() <= tolerance)
            })
            .map(|(id, _)| *id)
            .collect()
    }

    /// First selection variable that is neither 0 nor 1 within `tolerance`.
    pub fn fractional_selection(&self, values: &[f64], tolerance: f64) -> Option<(PlayerId, f64)> {
        self.selections.iter().find_map(|(id, var)| {
            let v = values.get(var.0).copied().unwrap_or(f64::NAN);
            let integral = v.abs() <= tolerance || (v - 1.0).abs() <= tolerance;
            (!integral).then_some((*id, v))
        })
    }
}

/// Build the MILP for `request`.
pub fn formulate(request: &OptimizationRequest<'_>) -> RosterModel {
    let mut problem = MilpProblem::new();

    let selections: Vec<(PlayerId, VarId)> = request
        .candidates
        .iter()
        .map(|p| (p.id, problem.add_binary(format!("x_{}", p.id))))
        .collect();
    let floor = problem.add_continuous("z", None, None);

    problem.add_constraint(
        "roster_size",
        selections.iter().map(|(_, var)| (*var, 1.0)).collect(),
        ConstraintSense::Equal,
        request.constraints.roster_size as f64,
    );

    for (&position, bounds) in &request.constraints.position_bounds {
        let terms: Vec<(VarId, f64)> = request
            .candidates
            .iter()
            .zip(&selections)
            .filter(|(p, _)| p.position == position)
            .map(|(_, (_, var))| (*var, 1.0))
            .collect();
        let label = position.display_str().replace('/', "");
        if bounds.min > 0 {
            problem.add_constraint(
                format!("min_{label}"),
                terms.clone(),
                ConstraintSense::GreaterEqual,
                bounds.min as f64,
            );
        }
        if bounds.max < terms.len() {
            problem.add_constraint(
                format!("max_{label}"),
                terms,
                ConstraintSense::LessEqual,
                bounds.max as f64,
            );
        }
    }

    for (id, var) in selections.iter().filter(|(id, _)| request.pinned.contains(id)) {
        problem.add_constraint(
            format!("pin_{id}"),
            vec![(*var, 1.0)],
            ConstraintSense::Equal,
            1.0,
        );
    }

    for week in 0..request.num_periods {
        let mut terms = vec![(floor, 1.0)];
        terms.extend(
            request
                .candidates
                .iter()
                .zip(&selections)
                .filter_map(|(p, (_, var))| {
                    let points = p.weekly_points.get(week).copied().unwrap_or(0.0);
                    (points != 0.0).then_some((*var, -points))
                }),
        );
        problem.add_constraint(
            format!("week_{}", week + 1),
            terms,
            ConstraintSense::LessEqual,
            0.0,
        );
    }

    problem.maximize(vec![(floor, 1.0)]);

    RosterModel {
        problem,
        selections,
        floor,
    }
}
