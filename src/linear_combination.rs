use super::scalar::FieldElement;
use super::variable::Variable;
use core::ops::{Add, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One `coeff * variable` summand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
  pub coeff: FieldElement,
  pub variable: Variable,
}

/// An ordered sum of terms. Constants are terms on [`Variable::ONE`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearCombination {
  terms: Vec<Term>,
}

impl LinearCombination {
  pub fn zero() -> Self {
    LinearCombination { terms: Vec::new() }
  }

  pub fn from_variable(variable: Variable) -> Self {
    LinearCombination {
      terms: vec![Term {
        coeff: FieldElement::ONE,
        variable,
      }],
    }
  }

  pub fn from_constant(value: FieldElement) -> Self {
    if value.is_zero() {
      return LinearCombination::zero();
    }
    LinearCombination {
      terms: vec![Term {
        coeff: value,
        variable: Variable::ONE,
      }],
    }
  }

  pub fn from_terms(terms: Vec<Term>) -> Self {
    LinearCombination { terms }
  }

  pub fn push(&mut self, coeff: FieldElement, variable: Variable) {
    self.terms.push(Term { coeff, variable });
  }

  pub fn terms(&self) -> &[Term] {
    &self.terms
  }

  pub fn len(&self) -> usize {
    self.terms.len()
  }

  pub fn is_empty(&self) -> bool {
    self.terms.is_empty()
  }

  pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
    self.terms.iter().map(|t| t.variable)
  }

  /// Merges repeated variables and drops zero coefficients. Surviving terms
  /// keep the position of their first occurrence.
  pub fn simplify(&self) -> Self {
    let mut position: BTreeMap<Variable, usize> = BTreeMap::new();
    let mut merged: Vec<Term> = Vec::with_capacity(self.terms.len());
    for term in &self.terms {
      match position.get(&term.variable) {
        Some(&i) => merged[i].coeff += term.coeff,
        None => {
          position.insert(term.variable, merged.len());
          merged.push(*term);
        }
      }
    }
    merged.retain(|t| !t.coeff.is_zero());
    LinearCombination { terms: merged }
  }

  /// The value when the combination only references `ONE`.
  pub fn constant_value(&self) -> Option<FieldElement> {
    if self.terms.iter().all(|t| t.variable == Variable::ONE) {
      Some(self.terms.iter().map(|t| t.coeff).sum())
    } else {
      None
    }
  }

  pub fn scale(&self, k: &FieldElement) -> Self {
    LinearCombination {
      terms: self
        .terms
        .iter()
        .map(|t| Term {
          coeff: t.coeff * k,
          variable: t.variable,
        })
        .collect(),
    }
  }

  /// Evaluates against a complete assignment. Returns `None` when a term
  /// references a variable outside `values`.
  pub fn evaluate(&self, values: &[FieldElement]) -> Option<FieldElement> {
    let mut acc = FieldElement::ZERO;
    for term in &self.terms {
      acc += term.coeff * values.get(term.variable.index())?;
    }
    Some(acc)
  }
}

impl From<Variable> for LinearCombination {
  fn from(variable: Variable) -> Self {
    LinearCombination::from_variable(variable)
  }
}

impl From<&Variable> for LinearCombination {
  fn from(variable: &Variable) -> Self {
    LinearCombination::from_variable(*variable)
  }
}

impl From<FieldElement> for LinearCombination {
  fn from(value: FieldElement) -> Self {
    LinearCombination::from_constant(value)
  }
}

impl From<u64> for LinearCombination {
  fn from(value: u64) -> Self {
    LinearCombination::from_constant(FieldElement::from_u64(value))
  }
}

impl From<i64> for LinearCombination {
  fn from(value: i64) -> Self {
    LinearCombination::from_constant(FieldElement::from_i64(value))
  }
}

impl From<&LinearCombination> for LinearCombination {
  fn from(lc: &LinearCombination) -> Self {
    lc.clone()
  }
}

impl Add for LinearCombination {
  type Output = LinearCombination;
  fn add(mut self, rhs: LinearCombination) -> LinearCombination {
    self.terms.extend(rhs.terms);
    self
  }
}

impl Sub for LinearCombination {
  type Output = LinearCombination;
  fn sub(self, rhs: LinearCombination) -> LinearCombination {
    self + (-rhs)
  }
}

impl Neg for LinearCombination {
  type Output = LinearCombination;
  fn neg(self) -> LinearCombination {
    self.scale(&-FieldElement::ONE)
  }
}

impl Mul<FieldElement> for LinearCombination {
  type Output = LinearCombination;
  fn mul(self, k: FieldElement) -> LinearCombination {
    self.scale(&k)
  }
}
