//! Analytic-vs-numerical derivative checks.

use nalgebra::{DMatrix, DVector};
use sr_atmos::AirspeedKind;
use sr_core::{NodeBatch, Real, Tolerances, nearly_equal, relative_error};

use crate::error::KernelResult;
use crate::mission::MissionEom;
use crate::outputs::RateOutputs;
use crate::state::{FlightState, INPUT_NAMES};

/// Central-difference Jacobian with one step per column.
pub fn central_difference_jacobian<F>(
    x: &DVector<Real>,
    f: F,
    steps: &DVector<Real>,
) -> KernelResult<DMatrix<Real>>
where
    F: Fn(&DVector<Real>) -> KernelResult<DVector<Real>>,
{
    let n = x.len();
    let m = f(x)?.len();

    let mut jac = DMatrix::zeros(m, n);

    for j in 0..n {
        let dx = steps[j];

        let mut x_plus = x.clone();
        x_plus[j] += dx;
        let f_plus = f(&x_plus)?;

        let mut x_minus = x.clone();
        x_minus[j] -= dx;
        let f_minus = f(&x_minus)?;

        let df = (f_plus - f_minus) / (2.0 * dx);
        jac.set_column(j, &df);
    }

    Ok(jac)
}

/// Step sizes and pass criteria for a derivative check.
#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    /// Relative step: `step = epsilon * max(|x|, typical)`.
    pub epsilon: Real,
    /// Typical magnitude of each input, in `INPUT_NAMES` order.
    pub typical: [Real; 7],
    pub tolerances: Tolerances,
}

impl CheckOptions {
    /// Defaults scaled for the given velocity representation.
    pub fn for_airspeed(kind: AirspeedKind) -> Self {
        let velocity = match kind {
            AirspeedKind::Mach => 0.1,
            _ => 10.0,
        };
        Self {
            epsilon: 1e-5,
            typical: [1e3, velocity, 100.0, 1.0, 1e3, 1e3, 1e3],
            tolerances: Tolerances {
                abs: 1e-8,
                rel: 1e-8,
            },
        }
    }

    fn step(&self, input: usize, x: Real) -> Real {
        self.epsilon * x.abs().max(self.typical[input])
    }
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self::for_airspeed(AirspeedKind::TrueAirspeed)
    }
}

/// Worst discrepancy for one (output, input) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialCheck {
    pub output: &'static str,
    pub input: &'static str,
    pub worst_node: usize,
    pub analytic: Real,
    pub numerical: Real,
    pub abs_error: Real,
    pub rel_error: Real,
    pub passed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub entries: Vec<PartialCheck>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.entries.iter().all(|e| e.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &PartialCheck> {
        self.entries.iter().filter(|e| !e.passed)
    }

    /// Entry with the largest absolute error.
    pub fn worst(&self) -> Option<&PartialCheck> {
        self.entries
            .iter()
            .max_by(|a, b| a.abs_error.total_cmp(&b.abs_error))
    }
}

/// Compare every analytic partial against central differences.
///
/// Nodes are independent, so one input column is perturbed at all nodes at once.
pub fn check_partials(
    kernel: &MissionEom,
    state: &FlightState,
    options: &CheckOptions,
) -> KernelResult<CheckReport> {
    let (_, jac) = kernel.evaluate(state)?;
    let mut report = CheckReport::default();

    for (k, &input) in INPUT_NAMES.iter().enumerate() {
        let base = state.columns()[k].clone();
        let steps: NodeBatch = base.iter().map(|&x| options.step(k, x)).collect();

        let plus = perturbed(kernel, state, k, &base, &steps, 1.0)?;
        let minus = perturbed(kernel, state, k, &base, &steps, -1.0)?;

        for output in kernel.output_names() {
            let analytic = jac.partial_or_zero(output, input);
            let (Some(fp), Some(fm)) = (plus.get(output), minus.get(output)) else {
                continue;
            };

            let mut worst: Option<PartialCheck> = None;
            for node in 0..state.len() {
                let numerical = (fp[node] - fm[node]) / (2.0 * steps[node]);
                let exact = analytic[node];
                let entry = PartialCheck {
                    output,
                    input,
                    worst_node: node,
                    analytic: exact,
                    numerical,
                    abs_error: (numerical - exact).abs(),
                    rel_error: relative_error(numerical, exact),
                    passed: nearly_equal(numerical, exact, options.tolerances),
                };
                // Failures outrank passes; otherwise keep the largest error
                let replace = match &worst {
                    None => true,
                    Some(w) if entry.passed != w.passed => !entry.passed,
                    Some(w) => entry.abs_error > w.abs_error,
                };
                if replace {
                    worst = Some(entry);
                }
            }
            if let Some(entry) = worst {
                if !entry.passed {
                    tracing::debug!(
                        output,
                        input,
                        node = entry.worst_node,
                        analytic = entry.analytic,
                        numerical = entry.numerical,
                        "partial mismatch"
                    );
                }
                report.entries.push(entry);
            }
        }
    }

    Ok(report)
}

fn perturbed(
    kernel: &MissionEom,
    state: &FlightState,
    input: usize,
    base: &NodeBatch,
    steps: &NodeBatch,
    sign: Real,
) -> KernelResult<RateOutputs> {
    let mut probe = state.clone();
    if let Some(column) = probe.column_mut(input) {
        for (node, x) in column.as_mut_slice().iter_mut().enumerate() {
            *x = base[node] + sign * steps[node];
        }
    }
    kernel.evaluate_values(&probe)
}

/// Dense numerical Jacobian laid out like `Jacobian::to_dense`.
///
/// Costs two evaluations per input per node; meant for small batches.
pub fn numerical_jacobian(
    kernel: &MissionEom,
    state: &FlightState,
    options: &CheckOptions,
) -> KernelResult<DMatrix<Real>> {
    let n = state.len();
    let x = DVector::from_iterator(
        n * INPUT_NAMES.len(),
        state.columns().into_iter().flat_map(|c| c.iter().copied()),
    );
    let steps = DVector::from_iterator(
        x.len(),
        x.iter().enumerate().map(|(j, &v)| options.step(j / n, v)),
    );

    let f = |x: &DVector<Real>| -> KernelResult<DVector<Real>> {
        let mut probe = state.clone();
        for k in 0..INPUT_NAMES.len() {
            if let Some(column) = probe.column_mut(k) {
                column
                    .as_mut_slice()
                    .copy_from_slice(&x.as_slice()[k * n..(k + 1) * n]);
            }
        }
        let out = kernel.evaluate_values(&probe)?;
        let flat: Vec<Real> = kernel
            .output_names()
            .flat_map(|name| out.get(name).map(|b| b.to_vec()).unwrap_or_default())
            .collect();
        Ok(DVector::from_vec(flat))
    };

    central_difference_jacobian(&x, f, &steps)
}
