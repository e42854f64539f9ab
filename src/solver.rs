//! Witness solver.
//!
//! Starting from `ONE` and the supplied inputs, constraints are visited in
//! emission order. A constraint whose L, R and O are all known is checked; one
//! with a single unknown internal variable in exactly one of them is solved for
//! it; anything else is deferred to the next pass. Circuits built by plain
//! imperative composition solve in a single pass.
use super::constraint_system::{Constraint, ConstraintSystem};
use super::errors::SolveError;
use super::linear_combination::LinearCombination;
use super::scalar::FieldElement;
use super::timer::Timer;
use super::variable::{Variable, VariableKind, Visibility};
use core::ops::Index;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn, Level};

/// Input values keyed by variable.
pub type Inputs = BTreeMap<Variable, FieldElement>;

/// A value for every variable, indexed by variable id. Index 0 holds `ONE`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
  values: Vec<FieldElement>,
}

impl Assignment {
  pub fn new(values: Vec<FieldElement>) -> Self {
    Assignment { values }
  }

  pub fn get(&self, var: Variable) -> Option<FieldElement> {
    self.values.get(var.index()).copied()
  }

  pub fn values(&self) -> &[FieldElement] {
    &self.values
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn into_values(self) -> Vec<FieldElement> {
    self.values
  }

  /// Public input values in declaration order, as a verifier sees them.
  pub fn public_values(&self, cs: &ConstraintSystem) -> Vec<FieldElement> {
    cs.public_inputs()
      .into_iter()
      .filter_map(|var| self.get(var))
      .collect()
  }

  /// Secret input values in declaration order.
  pub fn secret_values(&self, cs: &ConstraintSystem) -> Vec<FieldElement> {
    cs.secret_inputs()
      .into_iter()
      .filter_map(|var| self.get(var))
      .collect()
  }
}

impl Index<Variable> for Assignment {
  type Output = FieldElement;

  fn index(&self, var: Variable) -> &FieldElement {
    &self.values[var.index()]
  }
}

/// Per-constraint evaluations `a_i = L_i . z`, `b_i = R_i . z`, `c_i = O_i . z`
/// of a solved assignment, as consumed by proving back ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluations {
  pub a: Vec<FieldElement>,
  pub b: Vec<FieldElement>,
  pub c: Vec<FieldElement>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
  pub assignment: Assignment,
  pub evaluations: Option<Evaluations>,
}

const ENV_MAX_PASSES: &str = "R1CS_SOLVER_MAX_PASSES";
const ENV_RECORD_EVALUATIONS: &str = "R1CS_SOLVER_RECORD_EVALUATIONS";

/// Solver configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverOptions {
  /// Upper bound on passes over the pending constraints. `None` allows one
  /// pass per constraint, which always suffices.
  pub max_passes: Option<usize>,
  /// Also return the per-constraint evaluations.
  pub record_evaluations: bool,
}

impl SolverOptions {
  /// Defaults overridden by `R1CS_SOLVER_MAX_PASSES` and
  /// `R1CS_SOLVER_RECORD_EVALUATIONS` when set; unparsable values are ignored.
  pub fn from_env() -> Self {
    let mut opts = Self::default();
    if let Ok(v) = std::env::var(ENV_MAX_PASSES) {
      match v.parse::<usize>() {
        Ok(n) => opts.max_passes = Some(n),
        Err(_) => warn!(value = %v, "ignoring invalid {}", ENV_MAX_PASSES),
      }
    }
    if let Ok(v) = std::env::var(ENV_RECORD_EVALUATIONS) {
      opts.record_evaluations = matches!(v.as_str(), "1" | "true" | "yes");
    }
    opts
  }
}

/// The state of one side of a constraint under a partial assignment.
#[derive(Clone, Copy, Debug)]
enum Side {
  Known(FieldElement),
  /// `coeff * variable + rest` with `variable` still unset
  Unknown {
    variable: Variable,
    coeff: FieldElement,
    rest: FieldElement,
  },
  Underdetermined,
}

impl Side {
  fn of(lc: &LinearCombination, values: &[Option<FieldElement>]) -> Side {
    let mut rest = FieldElement::ZERO;
    let mut unknown: Option<(Variable, FieldElement)> = None;
    for term in lc.terms() {
      match values.get(term.variable.index()).copied().flatten() {
        Some(v) => rest += term.coeff * v,
        None => match unknown {
          None => unknown = Some((term.variable, term.coeff)),
          Some((var, coeff)) if var == term.variable => unknown = Some((var, coeff + term.coeff)),
          Some(_) => return Side::Underdetermined,
        },
      }
    }
    match unknown {
      Some((variable, coeff)) if !coeff.is_zero() => Side::Unknown {
        variable,
        coeff,
        rest,
      },
      _ => Side::Known(rest),
    }
  }
}

enum Step {
  Checked,
  Solved(Variable),
  Deferred,
}

/// Solves `coeff * v = target` for `v`.
fn solve_linear(
  constraint: usize,
  coeff: FieldElement,
  target: FieldElement,
) -> Result<FieldElement, SolveError> {
  if coeff.is_one() {
    return Ok(target);
  }
  let inv = coeff
    .invert()
    .map_err(|_| SolveError::DivisionByZero { constraint })?;
  Ok(target * inv)
}

/// Wrong witnesses log at debug; every other failure warns.
fn failure_level(e: &SolveError) -> Level {
  match e {
    SolveError::ConstraintMismatch { .. } => Level::DEBUG,
    _ => Level::WARN,
  }
}

/// Computes witnesses for one compiled circuit. Holds the system by shared
/// reference only.
pub struct Solver<'a> {
  cs: &'a ConstraintSystem,
  options: SolverOptions,
}

impl<'a> Solver<'a> {
  pub fn new(cs: &'a ConstraintSystem) -> Self {
    Self::with_options(cs, SolverOptions::default())
  }

  pub fn with_options(cs: &'a ConstraintSystem, options: SolverOptions) -> Self {
    Solver { cs, options }
  }

  pub fn options(&self) -> &SolverOptions {
    &self.options
  }

  pub fn solve(&self, public: &Inputs, secret: &Inputs) -> Result<Assignment, SolveError> {
    self.solve_full(public, secret).map(|s| s.assignment)
  }

  pub fn solve_witness(&self, witness: &Witness<'_>) -> Result<Assignment, SolveError> {
    self.solve(witness.public(), witness.secret())
  }

  /// Solves and, if configured, records per-constraint evaluations.
  pub fn solve_full(&self, public: &Inputs, secret: &Inputs) -> Result<Solution, SolveError> {
    let _span = tracing::debug_span!("solve", constraints = self.cs.num_constraints()).entered();
    let timer = Timer::new("solve");
    let result = self.run(public, secret);
    timer.stop();

    let assignment = match result {
      Ok(assignment) => assignment,
      Err(e) => {
        if failure_level(&e) == Level::DEBUG {
          debug!(error = %e, "inputs do not satisfy the circuit");
        } else {
          warn!(error = %e, "solving failed");
        }
        return Err(e);
      }
    };
    let evaluations = if self.options.record_evaluations {
      Some(self.evaluations(&assignment)?)
    } else {
      None
    };
    Ok(Solution {
      assignment,
      evaluations,
    })
  }

  /// Solves independent input sets against the same system in parallel.
  #[cfg(feature = "multicore")]
  pub fn solve_batch(&self, batch: &[(Inputs, Inputs)]) -> Vec<Result<Assignment, SolveError>> {
    use rayon::prelude::*;
    batch
      .par_iter()
      .map(|(public, secret)| self.solve(public, secret))
      .collect()
  }

  fn seed(&self, public: &Inputs, secret: &Inputs) -> Result<Vec<Option<FieldElement>>, SolveError> {
    let mut values = vec![None; self.cs.num_variables()];
    values[Variable::ONE.index()] = Some(FieldElement::ONE);

    for (visibility, inputs) in [(Visibility::Public, public), (Visibility::Secret, secret)] {
      for (&variable, &value) in inputs {
        if self.cs.variable_kind(variable) != Some(VariableKind::Input(visibility)) {
          return Err(SolveError::UnexpectedInput { variable });
        }
        values[variable.index()] = Some(value);
      }
    }

    if let Some((variable, info)) = self.cs.inputs().find(|(v, _)| values[v.index()].is_none()) {
      return Err(SolveError::MissingInput {
        variable,
        name: info.name.clone().unwrap_or_default(),
      });
    }
    Ok(values)
  }

  fn run(&self, public: &Inputs, secret: &Inputs) -> Result<Assignment, SolveError> {
    let mut values = self.seed(public, secret)?;
    let constraints = self.cs.constraints();
    let max_passes = self
      .options
      .max_passes
      .unwrap_or(constraints.len() + 1);

    let mut pending: Vec<usize> = (0..constraints.len()).collect();
    let mut passes = 0;
    while !pending.is_empty() {
      if passes == max_passes {
        return Err(SolveError::PassLimitExceeded { passes });
      }
      passes += 1;

      let mut deferred = Vec::new();
      for &i in &pending {
        match self.step(i, &constraints[i], &mut values)? {
          Step::Checked => {}
          Step::Solved(variable) => trace!(constraint = i, %variable, "solved"),
          Step::Deferred => deferred.push(i),
        }
      }
      debug!(
        pass = passes,
        resolved = pending.len() - deferred.len(),
        deferred = deferred.len(),
        "solver pass"
      );

      if deferred.len() == pending.len() {
        let constraint = deferred[0];
        let c = &constraints[constraint];
        let unknowns = [&c.l, &c.r, &c.o]
          .into_iter()
          .flat_map(|lc| lc.variables())
          .filter(|v| values[v.index()].is_none())
          .unique()
          .collect();
        return Err(SolveError::UnsatisfiedConstraint {
          constraint,
          unknowns,
        });
      }
      pending = deferred;
    }

    values
      .into_iter()
      .enumerate()
      .map(|(i, v)| {
        v.ok_or(SolveError::UnconstrainedVariable {
          variable: Variable::new(i),
        })
      })
      .collect::<Result<Vec<_>, _>>()
      .map(Assignment::new)
  }

  fn step(
    &self,
    i: usize,
    c: &Constraint,
    values: &mut [Option<FieldElement>],
  ) -> Result<Step, SolveError> {
    let l = Side::of(&c.l, values);
    let r = Side::of(&c.r, values);
    let o = Side::of(&c.o, values);

    let (variable, value) = match (l, r, o) {
      (Side::Known(l), Side::Known(r), Side::Known(o)) => {
        let lhs = l * r;
        if lhs != o {
          return Err(SolveError::ConstraintMismatch {
            constraint: i,
            lhs,
            rhs: o,
          });
        }
        return Ok(Step::Checked);
      }
      // coeff * v + rest = l * r
      (
        Side::Known(l),
        Side::Known(r),
        Side::Unknown {
          variable,
          coeff,
          rest,
        },
      ) => (variable, solve_linear(i, coeff, l * r - rest)?),
      // (coeff * v + rest) * r = o
      (
        Side::Unknown {
          variable,
          coeff,
          rest,
        },
        Side::Known(r),
        Side::Known(o),
      ) => (variable, solve_linear(i, coeff * r, o - rest * r)?),
      // l * (coeff * v + rest) = o
      (
        Side::Known(l),
        Side::Unknown {
          variable,
          coeff,
          rest,
        },
        Side::Known(o),
      ) => (variable, solve_linear(i, coeff * l, o - rest * l)?),
      _ => return Ok(Step::Deferred),
    };

    values[variable.index()] = Some(value);
    Ok(Step::Solved(variable))
  }

  fn evaluations(&self, assignment: &Assignment) -> Result<Evaluations, SolveError> {
    let (a, b, c): (Vec<_>, Vec<_>, Vec<_>) = (0..self.cs.num_constraints())
      .map(|i| {
        self
          .cs
          .evaluate(i, assignment.values())
          .ok_or(SolveError::AssignmentLength {
            expected: self.cs.num_variables(),
            got: assignment.len(),
          })
      })
      .collect::<Result<Vec<_>, _>>()?
      .into_iter()
      .multiunzip();
    Ok(Evaluations { a, b, c })
  }
}

/// Solves with default options.
pub fn solve(
  cs: &ConstraintSystem,
  public: &Inputs,
  secret: &Inputs,
) -> Result<Assignment, SolveError> {
  Solver::new(cs).solve(public, secret)
}

/// Input values assigned by declared name, split by visibility.
pub struct Witness<'a> {
  cs: &'a ConstraintSystem,
  public: Inputs,
  secret: Inputs,
}

impl<'a> Witness<'a> {
  pub fn new(cs: &'a ConstraintSystem) -> Self {
    Witness {
      cs,
      public: Inputs::new(),
      secret: Inputs::new(),
    }
  }

  pub fn assign(mut self, name: &str, value: impl Into<FieldElement>) -> Result<Self, SolveError> {
    self.set(name, value)?;
    Ok(self)
  }

  pub fn set(&mut self, name: &str, value: impl Into<FieldElement>) -> Result<(), SolveError> {
    let var = self
      .cs
      .input(name)
      .ok_or_else(|| SolveError::UnknownInput(name.to_string()))?;
    match self.cs.variable_kind(var) {
      Some(VariableKind::Input(Visibility::Public)) => self.public.insert(var, value.into()),
      Some(VariableKind::Input(Visibility::Secret)) => self.secret.insert(var, value.into()),
      _ => return Err(SolveError::UnknownInput(name.to_string())),
    };
    Ok(())
  }

  pub fn public(&self) -> &Inputs {
    &self.public
  }

  pub fn secret(&self) -> &Inputs {
    &self.secret
  }

  /// Public part in declaration order; what a verifier would receive.
  pub fn public_values(&self) -> Vec<FieldElement> {
    self.public.values().copied().collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constraint_system::compile;
  use crate::variable::VariableInfo;

  fn layout(kinds: &[VariableKind]) -> Vec<VariableInfo> {
    kinds
      .iter()
      .enumerate()
      .map(|(i, &kind)| VariableInfo {
        kind,
        name: kind.is_input().then(|| format!("in{i}")),
      })
      .collect()
  }

  const SECRET: VariableKind = VariableKind::Input(Visibility::Secret);

  fn inputs(pairs: &[(Variable, u64)]) -> Inputs {
    pairs
      .iter()
      .map(|&(v, x)| (v, FieldElement::from_u64(x)))
      .collect()
  }

  #[test]
  fn test_options_from_env() {
    std::env::remove_var(ENV_MAX_PASSES);
    std::env::remove_var(ENV_RECORD_EVALUATIONS);
    assert_eq!(SolverOptions::from_env(), SolverOptions::default());

    std::env::set_var(ENV_MAX_PASSES, "3");
    std::env::set_var(ENV_RECORD_EVALUATIONS, "true");
    assert_eq!(
      SolverOptions::from_env(),
      SolverOptions {
        max_passes: Some(3),
        record_evaluations: true,
      }
    );

    std::env::set_var(ENV_MAX_PASSES, "many");
    std::env::set_var(ENV_RECORD_EVALUATIONS, "0");
    assert_eq!(SolverOptions::from_env(), SolverOptions::default());

    std::env::remove_var(ENV_MAX_PASSES);
    std::env::remove_var(ENV_RECORD_EVALUATIONS);
  }

  #[test]
  fn test_mismatch_logs_below_warn() {
    let mismatch = SolveError::ConstraintMismatch {
      constraint: 0,
      lhs: FieldElement::ONE,
      rhs: FieldElement::ZERO,
    };
    assert_eq!(failure_level(&mismatch), Level::DEBUG);
    assert_eq!(
      failure_level(&SolveError::DivisionByZero { constraint: 0 }),
      Level::WARN
    );
    assert_eq!(
      failure_level(&SolveError::PassLimitExceeded { passes: 1 }),
      Level::WARN
    );
  }

  #[test]
  fn test_solves_forward_chain() {
    // out = (a * b) * (a + 1)
    let cs = compile(|api| {
      let a = api.secret_input("a")?;
      let b = api.secret_input("b")?;
      let ab = api.mul(a, b)?;
      let a1 = api.add(a, 1u64)?;
      api.mul(ab, a1)?;
      Ok(())
    })
    .unwrap();

    let a = cs.input("a").unwrap();
    let b = cs.input("b").unwrap();
    let assignment = solve(&cs, &Inputs::new(), &inputs(&[(a, 4), (b, 5)])).unwrap();
    assert_eq!(
      assignment.values().last(),
      Some(&FieldElement::from_u64(100))
    );
    assert!(cs.is_satisfied(&assignment).is_ok());
  }

  #[test]
  fn test_division_back_substitution() {
    // q sits on the right-hand side of (t) * (q) = (y)
    let cs = compile(|api| {
      let x = api.secret_input("x")?;
      let y = api.public_input("y")?;
      let t = api.mul(x, x)?;
      let q = api.div(y, t)?;
      api.assert_is_equal(q, 2u64)
    })
    .unwrap();
    let x = cs.input("x").unwrap();
    let y = cs.input("y").unwrap();
    let assignment = solve(&cs, &inputs(&[(y, 18)]), &inputs(&[(x, 3)])).unwrap();
    assert_eq!(assignment.values()[4], FieldElement::from_u64(2));
    assert!(cs.is_satisfied(&assignment).is_ok());

    assert!(matches!(
      solve(&cs, &inputs(&[(y, 20)]), &inputs(&[(x, 3)])),
      Err(SolveError::ConstraintMismatch { constraint: 2, .. })
    ));
  }

  #[test]
  fn test_reordered_constraints_solve_in_later_pass() {
    let x = Variable::new(1);
    let t = Variable::new(2);
    let u = Variable::new(3);
    // constraint 0 needs t, which constraint 1 determines
    let cs = ConstraintSystem::new(
      layout(&[
        VariableKind::One,
        SECRET,
        VariableKind::Internal,
        VariableKind::Internal,
      ]),
      vec![
        Constraint {
          l: t.into(),
          r: x.into(),
          o: u.into(),
        },
        Constraint {
          l: x.into(),
          r: x.into(),
          o: t.into(),
        },
      ],
    );
    let solver = Solver::with_options(
      &cs,
      SolverOptions {
        max_passes: Some(1),
        record_evaluations: false,
      },
    );
    assert_eq!(
      solver.solve(&Inputs::new(), &inputs(&[(x, 2)])),
      Err(SolveError::PassLimitExceeded { passes: 1 })
    );

    let assignment = solve(&cs, &Inputs::new(), &inputs(&[(x, 2)])).unwrap();
    assert_eq!(assignment[t], FieldElement::from_u64(4));
    assert_eq!(assignment[u], FieldElement::from_u64(8));
  }

  #[test]
  fn test_division_by_zero_input() {
    let cs = compile(|api| {
      let a = api.secret_input("a")?;
      let b = api.secret_input("b")?;
      api.div(a, b)?;
      Ok(())
    })
    .unwrap();
    let a = cs.input("a").unwrap();
    let b = cs.input("b").unwrap();

    let ok = solve(&cs, &Inputs::new(), &inputs(&[(a, 12), (b, 4)])).unwrap();
    assert_eq!(ok.values()[3], FieldElement::from_u64(3));

    assert_eq!(
      solve(&cs, &Inputs::new(), &inputs(&[(a, 12), (b, 0)])),
      Err(SolveError::DivisionByZero { constraint: 0 })
    );
  }

  #[test]
  fn test_zero_input_without_division() {
    let cs = compile(|api| {
      let a = api.secret_input("a")?;
      let sq = api.square(a)?;
      let s = api.add(sq, a)?;
      api.mul(s, 7u64)?;
      Ok(())
    })
    .unwrap();
    let a = cs.input("a").unwrap();
    let assignment = solve(&cs, &Inputs::new(), &inputs(&[(a, 0)])).unwrap();
    assert!(assignment.values()[1..].iter().all(|v| v.is_zero()));
  }

  #[test]
  fn test_underdetermined_circuit() {
    let x = Variable::new(1);
    let t = Variable::new(2);
    let u = Variable::new(3);
    // x * t = u with neither t nor u determined anywhere
    let cs = ConstraintSystem::new(
      layout(&[
        VariableKind::One,
        SECRET,
        VariableKind::Internal,
        VariableKind::Internal,
      ]),
      vec![Constraint {
        l: x.into(),
        r: t.into(),
        o: u.into(),
      }],
    );
    assert_eq!(
      solve(&cs, &Inputs::new(), &inputs(&[(x, 3)])),
      Err(SolveError::UnsatisfiedConstraint {
        constraint: 0,
        unknowns: vec![t, u],
      })
    );
  }

  #[test]
  fn test_unconstrained_internal() {
    let x = Variable::new(1);
    let t = Variable::new(2);
    let cs = ConstraintSystem::new(
      layout(&[
        VariableKind::One,
        SECRET,
        VariableKind::Internal,
        VariableKind::Internal,
      ]),
      vec![Constraint {
        l: x.into(),
        r: x.into(),
        o: t.into(),
      }],
    );
    assert_eq!(
      solve(&cs, &Inputs::new(), &inputs(&[(x, 3)])),
      Err(SolveError::UnconstrainedVariable {
        variable: Variable::new(3)
      })
    );
  }

  #[test]
  fn test_input_validation() {
    let cs = compile(|api| {
      let x = api.secret_input("x")?;
      let y = api.public_input("y")?;
      let x2 = api.mul(x, x)?;
      api.assert_is_equal(x2, y)
    })
    .unwrap();
    let x = cs.input("x").unwrap();
    let y = cs.input("y").unwrap();

    assert_eq!(
      solve(&cs, &Inputs::new(), &inputs(&[(x, 3)])),
      Err(SolveError::MissingInput {
        variable: y,
        name: "y".to_string(),
      })
    );
    // secret passed as public
    assert_eq!(
      solve(&cs, &inputs(&[(x, 3), (y, 9)]), &Inputs::new()),
      Err(SolveError::UnexpectedInput { variable: x })
    );
    // internal wire passed as input
    assert_eq!(
      solve(&cs, &inputs(&[(y, 9)]), &inputs(&[(x, 3), (Variable::new(3), 9)])),
      Err(SolveError::UnexpectedInput {
        variable: Variable::new(3)
      })
    );
  }

  #[test]
  fn test_evaluations_match_constraints() {
    let cs = compile(|api| {
      let x = api.secret_input("x")?;
      let y = api.public_input("y")?;
      let x2 = api.mul(x, x)?;
      api.assert_is_equal(x2, y)
    })
    .unwrap();
    let witness = Witness::new(&cs)
      .assign("x", 5u64)
      .and_then(|w| w.assign("y", 25u64))
      .unwrap();
    let solver = Solver::with_options(
      &cs,
      SolverOptions {
        max_passes: None,
        record_evaluations: true,
      },
    );
    let solution = solver.solve_full(witness.public(), witness.secret()).unwrap();
    let evals = solution.evaluations.unwrap();
    assert_eq!(evals.a, vec![FieldElement::from_u64(5), FieldElement::from_u64(25)]);
    assert_eq!(evals.b, vec![FieldElement::from_u64(5), FieldElement::ONE]);
    assert_eq!(evals.c, vec![FieldElement::from_u64(25), FieldElement::from_u64(25)]);
    for i in 0..cs.num_constraints() {
      assert_eq!(evals.a[i] * evals.b[i], evals.c[i]);
    }
  }

  #[test]
  fn test_witness_by_name() {
    let cs = compile(|api| {
      let x = api.secret_input("x")?;
      let y = api.public_input("y")?;
      api.assert_is_equal(x, y)
    })
    .unwrap();
    let witness = Witness::new(&cs).assign("x", 7u64).unwrap();
    assert_eq!(witness.secret().len(), 1);
    assert!(witness.public().is_empty());
    assert_eq!(
      Witness::new(&cs).assign("z", 1u64).err(),
      Some(SolveError::UnknownInput("z".to_string()))
    );

    let witness = witness.assign("y", 7u64).unwrap();
    assert_eq!(witness.public_values(), vec![FieldElement::from_u64(7)]);
    let assignment = Solver::new(&cs).solve_witness(&witness).unwrap();
    assert_eq!(assignment.public_values(&cs), vec![FieldElement::from_u64(7)]);
    assert_eq!(assignment.secret_values(&cs), vec![FieldElement::from_u64(7)]);
  }

  #[cfg(feature = "multicore")]
  #[test]
  fn test_batch_matches_sequential() {
    let cs = compile(|api| {
      let x = api.secret_input("x")?;
      let x3 = api.mul_many([x, x, x])?;
      let y = api.public_input("y")?;
      api.assert_is_equal(y, x3)
    })
    .unwrap();
    let x = cs.input("x").unwrap();
    let y = cs.input("y").unwrap();
    let batch: Vec<(Inputs, Inputs)> = (0..16u64)
      .map(|k| (inputs(&[(y, k * k * k)]), inputs(&[(x, k)])))
      .collect();
    let solver = Solver::new(&cs);
    let parallel = solver.solve_batch(&batch);
    for ((public, secret), got) in batch.iter().zip(parallel) {
      assert_eq!(got, solver.solve(public, secret));
    }
  }
}
