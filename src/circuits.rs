//! Ready-made circuits.
//!
//! [`Cubic`] proves knowledge of a secret `x` with `x³ + x + 5 = y` for a public
//! `y`. [`SquareChain`] scales the constraint count for profiling and benches.
use super::builder::CircuitBuilder;
use super::constraint_system::Circuit;
use super::errors::CompileError;
use super::linear_combination::LinearCombination;
use super::scalar::{FieldElement, FieldFromPrimitives};

/// `x³ + x + 5 == y`, `x` secret and `y` public.
///
/// Compiles to three constraints:
/// 1. `x ⋅ x == w3`
/// 2. `w3 ⋅ x == w4`
/// 3. `y ⋅ 1 == w4 + x + 5`
pub struct Cubic;

impl Cubic {
  pub fn evaluate(x: &FieldElement) -> FieldElement {
    x.pow(3) + x + FieldElement::from_u64(5)
  }
}

impl Circuit for Cubic {
  fn define(&self, api: &mut CircuitBuilder) -> Result<(), CompileError> {
    let x = api.secret_input("x")?;
    let y = api.public_input("y")?;

    let x3 = api.mul_many([x, x, x])?;
    let res = api.add_many([LinearCombination::from(x3), x.into(), api.constant(5u64)])?;

    api.assert_is_equal(y, res)
  }
}

/// `s_0 = x`, `s_{i+1} = s_i² + i`, asserting `s_rounds == y`.
pub struct SquareChain {
  pub rounds: usize,
}

impl SquareChain {
  pub fn evaluate(&self, x: &FieldElement) -> FieldElement {
    (0..self.rounds).fold(*x, |s, i| s.square() + i.to_field())
  }
}

impl Circuit for SquareChain {
  fn define(&self, api: &mut CircuitBuilder) -> Result<(), CompileError> {
    if self.rounds == 0 {
      return Err(CompileError::Definition(
        "square chain needs at least one round".to_string(),
      ));
    }
    let x = api.secret_input("x")?;
    let y = api.public_input("y")?;

    let mut s = LinearCombination::from(x);
    for i in 0..self.rounds {
      let sq = api.square(s)?;
      s = api.add(sq, i.to_field())?;
    }
    api.assert_is_equal(y, s)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constraint_system::compile_circuit;
  use crate::errors::SolveError;
  use crate::solver::{Solver, Witness};

  #[test]
  fn test_cubic_valid_witness() {
    let cs = compile_circuit(&Cubic).unwrap();
    assert_eq!(cs.num_constraints(), 3);

    let witness = Witness::new(&cs)
      .assign("x", 3u64)
      .and_then(|w| w.assign("y", 35u64))
      .unwrap();
    let assignment = Solver::new(&cs).solve_witness(&witness).unwrap();
    assert_eq!(assignment.values()[4], FieldElement::from_u64(27));
    assert_eq!(assignment[cs.input("y").unwrap()], FieldElement::from_u64(35));
    assert!(cs.is_satisfied(&assignment).is_ok());
  }

  #[test]
  fn test_cubic_wrong_output() {
    let cs = compile_circuit(&Cubic).unwrap();
    let witness = Witness::new(&cs)
      .assign("x", 3u64)
      .and_then(|w| w.assign("y", 36u64))
      .unwrap();
    assert_eq!(
      Solver::new(&cs).solve_witness(&witness),
      Err(SolveError::ConstraintMismatch {
        constraint: 2,
        lhs: FieldElement::from_u64(36),
        rhs: FieldElement::from_u64(35),
      })
    );
  }

  #[test]
  fn test_cubic_missing_input() {
    let cs = compile_circuit(&Cubic).unwrap();
    let witness = Witness::new(&cs).assign("x", 3u64).unwrap();
    assert_eq!(
      Solver::new(&cs).solve_witness(&witness),
      Err(SolveError::MissingInput {
        variable: cs.input("y").unwrap(),
        name: "y".to_string(),
      })
    );
  }

  #[test]
  fn test_square_chain() {
    let chain = SquareChain { rounds: 10 };
    let cs = compile_circuit(&chain).unwrap();
    assert_eq!(cs.num_constraints(), 11);

    let x = FieldElement::from_u64(2);
    let witness = Witness::new(&cs)
      .assign("x", x)
      .and_then(|w| w.assign("y", chain.evaluate(&x)))
      .unwrap();
    let assignment = Solver::new(&cs).solve_witness(&witness).unwrap();
    assert!(cs.is_satisfied(&assignment).is_ok());

    assert!(matches!(
      compile_circuit(&SquareChain { rounds: 0 }),
      Err(CompileError::Definition(_))
    ));
  }
}
