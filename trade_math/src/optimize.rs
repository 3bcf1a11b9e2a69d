//! Bounded Nelder-Mead simplex search
//!
//! Used to estimate smoothing parameters by minimising an in-sample loss.
//! Every candidate point is clamped into its box before evaluation, so the
//! objective never sees a value outside the bounds.

use crate::{MathError, Result};

/// Tuning knobs for the simplex search
#[derive(Debug, Clone, Copy)]
pub struct NelderMeadConfig {
    /// Hard cap on simplex iterations
    pub max_iterations: usize,
    /// Stop once the spread of vertex values falls below this (relative to the best value)
    pub tolerance: f64,
    /// Edge length of the initial simplex
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            tolerance: 1e-10,
            initial_step: 0.1,
        }
    }
}

/// Outcome of a simplex search
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best point found
    pub point: Vec<f64>,
    /// Objective value at `point`
    pub value: f64,
    /// Iterations performed
    pub iterations: usize,
    /// Whether the tolerance was reached before the iteration cap
    pub converged: bool,
}

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Minimise `objective` inside the box `bounds`, starting from `start`.
///
/// NaN objective values are treated as `+inf` so that degenerate regions are
/// simply avoided.
pub fn nelder_mead<F>(
    objective: F,
    start: &[f64],
    bounds: &[(f64, f64)],
    config: &NelderMeadConfig,
) -> Result<OptimizationResult>
where
    F: Fn(&[f64]) -> f64,
{
    if start.is_empty() {
        return Err(MathError::InvalidInput(
            "Optimisation needs at least one parameter".to_string(),
        ));
    }
    if start.len() != bounds.len() {
        return Err(MathError::InvalidInput(format!(
            "Start point has {} parameters but {} bounds were given",
            start.len(),
            bounds.len()
        )));
    }
    if let Some((lo, hi)) = bounds.iter().find(|(lo, hi)| !(lo < hi)) {
        return Err(MathError::InvalidInput(format!(
            "Invalid bounds [{}, {}]",
            lo, hi
        )));
    }

    let dim = start.len();
    let eval = |point: &[f64]| {
        let value = objective(point);
        if value.is_nan() {
            f64::INFINITY
        } else {
            value
        }
    };

    // Initial simplex: the start point plus one step along each axis
    let origin = clamp(start, bounds);
    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
    simplex.push((origin.clone(), eval(&origin)));
    for i in 0..dim {
        let mut vertex = origin.clone();
        let (lo, hi) = bounds[i];
        vertex[i] = if vertex[i] + config.initial_step <= hi {
            vertex[i] + config.initial_step
        } else {
            (vertex[i] - config.initial_step).max(lo)
        };
        let value = eval(&vertex);
        simplex.push((vertex, value));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

        let best = simplex[0].1;
        let worst = simplex[dim].1;
        if (worst - best).abs() <= config.tolerance * best.abs().max(1.0) {
            converged = true;
            break;
        }
        iterations += 1;

        let centroid: Vec<f64> = (0..dim)
            .map(|j| simplex[..dim].iter().map(|(p, _)| p[j]).sum::<f64>() / dim as f64)
            .collect();

        let reflected = clamp(&towards(&centroid, &simplex[dim].0, -REFLECTION), bounds);
        let reflected_value = eval(&reflected);

        if reflected_value < best {
            let expanded = clamp(&towards(&centroid, &simplex[dim].0, -EXPANSION), bounds);
            let expanded_value = eval(&expanded);
            simplex[dim] = if expanded_value < reflected_value {
                (expanded, expanded_value)
            } else {
                (reflected, reflected_value)
            };
            continue;
        }

        if reflected_value < simplex[dim - 1].1 {
            simplex[dim] = (reflected, reflected_value);
            continue;
        }

        // Contract towards the better of the reflected and worst points
        let (contracted, accept_below) = if reflected_value < worst {
            (
                clamp(&towards(&centroid, &reflected, CONTRACTION), bounds),
                reflected_value,
            )
        } else {
            (
                clamp(&towards(&centroid, &simplex[dim].0, CONTRACTION), bounds),
                worst,
            )
        };
        let contracted_value = eval(&contracted);
        if contracted_value < accept_below {
            simplex[dim] = (contracted, contracted_value);
            continue;
        }

        let anchor = simplex[0].0.clone();
        for vertex in simplex.iter_mut().skip(1) {
            let shrunk = clamp(&towards(&anchor, &vertex.0, SHRINK), bounds);
            let value = eval(&shrunk);
            *vertex = (shrunk, value);
        }
    }

    simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
    let (point, value) = simplex.swap_remove(0);

    Ok(OptimizationResult {
        point,
        value,
        iterations,
        converged,
    })
}

/// `from + coef * (to - from)`
fn towards(from: &[f64], to: &[f64], coef: f64) -> Vec<f64> {
    from.iter()
        .zip(to)
        .map(|(f, t)| f + coef * (t - f))
        .collect()
}

fn clamp(point: &[f64], bounds: &[(f64, f64)]) -> Vec<f64> {
    point
        .iter()
        .zip(bounds)
        .map(|(v, (lo, hi))| v.clamp(*lo, *hi))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_quadratic_minimum() {
        let result = nelder_mead(
            |p| (p[0] - 0.3).powi(2) + (p[1] - 0.7).powi(2),
            &[0.5, 0.5],
            &[(0.0, 1.0), (0.0, 1.0)],
            &NelderMeadConfig::default(),
        )
        .unwrap();

        assert!(result.converged);
        assert_abs_diff_eq!(result.point[0], 0.3, epsilon = 1e-3);
        assert_abs_diff_eq!(result.point[1], 0.7, epsilon = 1e-3);
    }

    #[test]
    fn test_minimum_on_boundary() {
        // Unconstrained minimum is at 2.0, outside the box
        let result = nelder_mead(
            |p| (p[0] - 2.0).powi(2),
            &[0.5],
            &[(0.0, 1.0)],
            &NelderMeadConfig::default(),
        )
        .unwrap();

        assert_abs_diff_eq!(result.point[0], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_flat_objective_converges_immediately() {
        let result = nelder_mead(
            |_| 0.0,
            &[0.3, 0.1, 0.1],
            &[(0.0, 1.0); 3],
            &NelderMeadConfig::default(),
        )
        .unwrap();

        assert!(result.converged);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_invalid_arguments() {
        let config = NelderMeadConfig::default();
        assert!(nelder_mead(|_| 0.0, &[], &[], &config).is_err());
        assert!(nelder_mead(|_| 0.0, &[0.5], &[(0.0, 1.0), (0.0, 1.0)], &config).is_err());
        assert!(nelder_mead(|_| 0.0, &[0.5], &[(1.0, 0.0)], &config).is_err());
    }
}
