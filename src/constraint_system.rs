//! The compiled rank-1 constraint system.
//!
//! A [`ConstraintSystem`] is produced once by [`compile`] and never mutated
//! afterwards, so one instance can back any number of concurrent solves.
use super::builder::CircuitBuilder;
use super::errors::{CompileError, SolveError};
use super::linear_combination::LinearCombination;
use super::scalar::FieldElement;
use super::solver::{Assignment, Inputs, Solver};
use super::timer::Timer;
use super::variable::{Variable, VariableInfo, VariableKind, Visibility};
use byteorder::{ByteOrder, LittleEndian};
use digest::Digest;
use serde::Serialize;
use sha3::Sha3_256;
use tracing::info;

/// `(l . z) * (r . z) = (o . z)` for the full assignment `z`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Constraint {
  pub l: LinearCombination,
  pub r: LinearCombination,
  pub o: LinearCombination,
}

/// A circuit that declares its own inputs and logic.
pub trait Circuit {
  fn define(&self, api: &mut CircuitBuilder) -> Result<(), CompileError>;
}

/// Runs `definition` once against a fresh builder and freezes the result.
pub fn compile<F>(definition: F) -> Result<ConstraintSystem, CompileError>
where
  F: FnOnce(&mut CircuitBuilder) -> Result<(), CompileError>,
{
  let _span = tracing::info_span!("compile").entered();
  let timer = Timer::new("compile");
  let mut builder = CircuitBuilder::new();
  let result = definition(&mut builder);
  timer.stop();
  result?;

  let cs = builder.finish()?;
  info!(
    constraints = cs.num_constraints(),
    variables = cs.num_variables(),
    public = cs.public_inputs().len(),
    secret = cs.secret_inputs().len(),
    "circuit compiled"
  );
  Ok(cs)
}

pub fn compile_circuit<C: Circuit + ?Sized>(circuit: &C) -> Result<ConstraintSystem, CompileError> {
  compile(|api| circuit.define(api))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConstraintSystem {
  variables: Vec<VariableInfo>,
  constraints: Vec<Constraint>,
}

impl ConstraintSystem {
  pub(crate) fn new(variables: Vec<VariableInfo>, constraints: Vec<Constraint>) -> Self {
    ConstraintSystem {
      variables,
      constraints,
    }
  }

  pub fn num_constraints(&self) -> usize {
    self.constraints.len()
  }

  /// Includes the constant `ONE`.
  pub fn num_variables(&self) -> usize {
    self.variables.len()
  }

  pub fn num_internal(&self) -> usize {
    self
      .variables
      .iter()
      .filter(|info| info.kind == VariableKind::Internal)
      .count()
  }

  pub fn constraints(&self) -> &[Constraint] {
    &self.constraints
  }

  pub fn variables(&self) -> impl Iterator<Item = (Variable, &VariableInfo)> + '_ {
    self
      .variables
      .iter()
      .enumerate()
      .map(|(i, info)| (Variable::new(i), info))
  }

  /// Declared inputs in declaration order.
  pub fn inputs(&self) -> impl Iterator<Item = (Variable, &VariableInfo)> + '_ {
    self.variables().filter(|(_, info)| info.kind.is_input())
  }

  fn inputs_with(&self, visibility: Visibility) -> Vec<Variable> {
    self
      .inputs()
      .filter(|(_, info)| info.kind == VariableKind::Input(visibility))
      .map(|(var, _)| var)
      .collect()
  }

  pub fn public_inputs(&self) -> Vec<Variable> {
    self.inputs_with(Visibility::Public)
  }

  pub fn secret_inputs(&self) -> Vec<Variable> {
    self.inputs_with(Visibility::Secret)
  }

  pub fn input(&self, name: &str) -> Option<Variable> {
    self
      .inputs()
      .find(|(_, info)| info.name.as_deref() == Some(name))
      .map(|(var, _)| var)
  }

  pub fn variable_kind(&self, var: Variable) -> Option<VariableKind> {
    self.variables.get(var.index()).map(|info| info.kind)
  }

  /// Display name: the declared name for inputs, `1` for the constant and
  /// `w<index>` for internal wires.
  pub fn variable_name(&self, var: Variable) -> String {
    match self.variables.get(var.index()) {
      Some(VariableInfo {
        name: Some(name), ..
      }) => name.clone(),
      Some(VariableInfo {
        kind: VariableKind::One,
        ..
      }) => "1".to_string(),
      _ => format!("w{}", var.index()),
    }
  }

  /// Evaluates constraint `i` as `(L, R, O)` against a complete assignment.
  pub fn evaluate(
    &self,
    i: usize,
    values: &[FieldElement],
  ) -> Option<(FieldElement, FieldElement, FieldElement)> {
    let c = self.constraints.get(i)?;
    Some((
      c.l.evaluate(values)?,
      c.r.evaluate(values)?,
      c.o.evaluate(values)?,
    ))
  }

  /// Checks a complete assignment, reporting the first violated constraint.
  pub fn is_satisfied(&self, assignment: &Assignment) -> Result<(), SolveError> {
    let values = assignment.values();
    if values.len() != self.num_variables() {
      return Err(SolveError::AssignmentLength {
        expected: self.num_variables(),
        got: values.len(),
      });
    }
    if !values[0].is_one() {
      return Err(SolveError::InvalidOne);
    }
    for i in 0..self.constraints.len() {
      let (a, b, c) = self
        .evaluate(i, values)
        .ok_or(SolveError::AssignmentLength {
          expected: self.num_variables(),
          got: values.len(),
        })?;
      if a * b != c {
        return Err(SolveError::ConstraintMismatch {
          constraint: i,
          lhs: a * b,
          rhs: c,
        });
      }
    }
    Ok(())
  }

  /// Solves with default options.
  pub fn solve(&self, public: &Inputs, secret: &Inputs) -> Result<Assignment, SolveError> {
    Solver::new(self).solve(public, secret)
  }

  /// SHA3-256 over the variable layout and every constraint. Equal for two
  /// compilations of the same definition.
  pub fn digest(&self) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(b"r1cs-frontend constraint system");
    absorb_u64(&mut hasher, self.variables.len() as u64);
    for info in &self.variables {
      let tag = match info.kind {
        VariableKind::One => 0,
        VariableKind::Input(Visibility::Public) => 1,
        VariableKind::Input(Visibility::Secret) => 2,
        VariableKind::Internal => 3,
      };
      absorb_u64(&mut hasher, tag);
      let name = info.name.as_deref().unwrap_or("");
      absorb_u64(&mut hasher, name.len() as u64);
      hasher.update(name.as_bytes());
    }
    absorb_u64(&mut hasher, self.constraints.len() as u64);
    for c in &self.constraints {
      for lc in [&c.l, &c.r, &c.o] {
        absorb_u64(&mut hasher, lc.len() as u64);
        for term in lc.terms() {
          absorb_u64(&mut hasher, term.variable.index() as u64);
          hasher.update(term.coeff.to_bytes());
        }
      }
    }
    hasher.finalize().into()
  }
}

fn absorb_u64(hasher: &mut Sha3_256, value: u64) {
  let mut buf = [0u8; 8];
  LittleEndian::write_u64(&mut buf, value);
  hasher.update(buf);
}
