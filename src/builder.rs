//! Expression builder handed to circuit definitions.
//!
//! Linear operations compose [`LinearCombination`]s without touching the
//! constraint list. Every multiplication allocates one internal variable and
//! appends exactly one constraint.
//!
//! The first error any method reports is kept by the builder, so compilation
//! fails even when a definition drops that `Result`.
use super::constraint_system::{Constraint, ConstraintSystem};
use super::errors::CompileError;
use super::linear_combination::LinearCombination;
use super::scalar::FieldElement;
use super::variable::{Allocator, Variable, VariableKind, Visibility};
use core::cell::OnceCell;
use tracing::debug;

/// Records the constraints of one circuit while its definition runs.
pub struct CircuitBuilder {
  alloc: Allocator,
  constraints: Vec<Constraint>,
  error: OnceCell<CompileError>,
}

impl CircuitBuilder {
  pub(crate) fn new() -> Self {
    CircuitBuilder {
      alloc: Allocator::new(),
      constraints: Vec::new(),
      error: OnceCell::new(),
    }
  }

  pub fn public_input(&mut self, name: &str) -> Result<Variable, CompileError> {
    let res = self.alloc.new_input(name, Visibility::Public);
    self.record(res)
  }

  pub fn secret_input(&mut self, name: &str) -> Result<Variable, CompileError> {
    let res = self.alloc.new_input(name, Visibility::Secret);
    self.record(res)
  }

  pub fn constant(&self, value: impl Into<FieldElement>) -> LinearCombination {
    LinearCombination::from_constant(value.into())
  }

  pub fn num_constraints(&self) -> usize {
    self.constraints.len()
  }

  pub fn num_variables(&self) -> usize {
    self.alloc.num_variables()
  }

  /// A previously declared input, by name.
  pub fn input(&self, name: &str) -> Option<Variable> {
    self.alloc.lookup(name)
  }

  pub fn variable_kind(&self, var: Variable) -> Option<VariableKind> {
    self.alloc.kind(var)
  }

  pub fn variable_name(&self, var: Variable) -> Option<&str> {
    self.alloc.name(var)
  }

  fn record<T>(&self, res: Result<T, CompileError>) -> Result<T, CompileError> {
    if let Err(e) = &res {
      self.error.get_or_init(|| e.clone());
    }
    res
  }

  /// The first error reported so far, if any.
  pub fn error(&self) -> Option<&CompileError> {
    self.error.get()
  }

  fn operand(&self, op: impl Into<LinearCombination>) -> Result<LinearCombination, CompileError> {
    let lc = op.into();
    let checked = lc.variables().try_for_each(|var| self.alloc.check(var));
    self.record(checked)?;
    Ok(lc.simplify())
  }

  fn enforce(
    &mut self,
    l: LinearCombination,
    r: LinearCombination,
    o: LinearCombination,
    op: &'static str,
  ) {
    debug!(
      constraint = self.constraints.len(),
      op,
      l = l.len(),
      r = r.len(),
      o = o.len(),
      "emit constraint"
    );
    self.constraints.push(Constraint { l, r, o });
  }

  pub fn add(
    &self,
    a: impl Into<LinearCombination>,
    b: impl Into<LinearCombination>,
  ) -> Result<LinearCombination, CompileError> {
    Ok((self.operand(a)? + self.operand(b)?).simplify())
  }

  /// Sums any number of operands; an empty sum is zero.
  pub fn add_many<I>(&self, operands: I) -> Result<LinearCombination, CompileError>
  where
    I: IntoIterator,
    I::Item: Into<LinearCombination>,
  {
    let mut acc = LinearCombination::zero();
    for op in operands {
      acc = acc + self.operand(op)?;
    }
    Ok(acc.simplify())
  }

  pub fn sub(
    &self,
    a: impl Into<LinearCombination>,
    b: impl Into<LinearCombination>,
  ) -> Result<LinearCombination, CompileError> {
    Ok((self.operand(a)? - self.operand(b)?).simplify())
  }

  pub fn neg(&self, a: impl Into<LinearCombination>) -> Result<LinearCombination, CompileError> {
    Ok(-self.operand(a)?)
  }

  /// Multiplies by a known constant; no constraint is needed.
  pub fn scale(
    &self,
    a: impl Into<LinearCombination>,
    k: impl Into<FieldElement>,
  ) -> Result<LinearCombination, CompileError> {
    Ok(self.operand(a)?.scale(&k.into()).simplify())
  }

  /// Emits `(a) * (b) = (v)` for a fresh internal `v`.
  pub fn mul(
    &mut self,
    a: impl Into<LinearCombination>,
    b: impl Into<LinearCombination>,
  ) -> Result<Variable, CompileError> {
    let l = self.operand(a)?;
    let r = self.operand(b)?;
    let v = self.alloc.new_internal();
    self.enforce(l, r, v.into(), "mul");
    Ok(v)
  }

  /// Reduces left to right, one constraint per pair.
  pub fn mul_many<I>(&mut self, operands: I) -> Result<Variable, CompileError>
  where
    I: IntoIterator,
    I::Item: Into<LinearCombination>,
  {
    let operands = operands
      .into_iter()
      .map(|op| self.operand(op))
      .collect::<Result<Vec<_>, _>>()?;
    let mut rest = operands.into_iter();
    let mut acc = match (rest.next(), rest.next()) {
      (Some(first), Some(second)) => self.mul(first, second)?,
      (first, _) => {
        return self.record(Err(CompileError::NotEnoughOperands {
          got: usize::from(first.is_some()),
        }))
      }
    };
    for op in rest {
      acc = self.mul(acc, op)?;
    }
    Ok(acc)
  }

  pub fn square(&mut self, a: impl Into<LinearCombination>) -> Result<Variable, CompileError> {
    let a = self.operand(a)?;
    self.mul(a.clone(), a)
  }

  /// Emits `(a) * 1 = (b)`.
  pub fn assert_is_equal(
    &mut self,
    a: impl Into<LinearCombination>,
    b: impl Into<LinearCombination>,
  ) -> Result<(), CompileError> {
    let l = self.operand(a)?;
    let o = self.operand(b)?;
    self.enforce(l, Variable::ONE.into(), o, "assert_is_equal");
    Ok(())
  }

  /// Emits `(b) * (q) = (a)` and returns `q`. Solving fails when `b` is zero.
  pub fn div(
    &mut self,
    a: impl Into<LinearCombination>,
    b: impl Into<LinearCombination>,
  ) -> Result<Variable, CompileError> {
    let o = self.operand(a)?;
    let l = self.operand(b)?;
    if let Some(k) = l.constant_value() {
      self.record(k.invert().map_err(CompileError::from))?;
    }
    let q = self.alloc.new_internal();
    self.enforce(l, q.into(), o, "div");
    Ok(q)
  }

  /// Emits `(a) * (q) = 1` and returns `q`.
  pub fn inverse(&mut self, a: impl Into<LinearCombination>) -> Result<Variable, CompileError> {
    self.div(FieldElement::ONE, a)
  }

  /// Emits `(a) * (1 - a) = 0`.
  pub fn assert_is_boolean(&mut self, a: impl Into<LinearCombination>) -> Result<(), CompileError> {
    let l = self.operand(a)?;
    let r = self.sub(FieldElement::ONE, l.clone())?;
    self.enforce(l, r, LinearCombination::zero(), "assert_is_boolean");
    Ok(())
  }

  /// `cond ? a : b` as `b + cond * (a - b)`; constrains `cond` to be boolean.
  pub fn select(
    &mut self,
    cond: impl Into<LinearCombination>,
    a: impl Into<LinearCombination>,
    b: impl Into<LinearCombination>,
  ) -> Result<LinearCombination, CompileError> {
    let cond = self.operand(cond)?;
    let b = self.operand(b)?;
    let diff = self.sub(a, b.clone())?;
    self.assert_is_boolean(cond.clone())?;
    let t = self.mul(cond, diff)?;
    self.add(b, t)
  }

  /// Freezes the system, or returns the first error any method reported.
  pub(crate) fn finish(self) -> Result<ConstraintSystem, CompileError> {
    if let Some(e) = self.error.into_inner() {
      return Err(e);
    }
    Ok(ConstraintSystem::new(self.alloc.into_layout(), self.constraints))
  }
}
