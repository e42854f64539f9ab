//! Human-readable and structured listings of a compiled constraint system.
use super::constraint_system::ConstraintSystem;
use super::linear_combination::{LinearCombination, Term};
use core::fmt;
use itertools::Itertools;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TermDump {
  pub coeff: String,
  pub wire: usize,
  pub name: String,
}

/// One constraint with its three linear combinations broken into terms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConstraintDump {
  pub index: usize,
  pub text: String,
  pub l: Vec<TermDump>,
  pub r: Vec<TermDump>,
  pub o: Vec<TermDump>,
}

impl ConstraintSystem {
  pub fn dump(&self) -> Vec<ConstraintDump> {
    self
      .constraints()
      .iter()
      .enumerate()
      .map(|(index, c)| ConstraintDump {
        index,
        text: format!(
          "{} ⋅ {} == {}",
          self.render_factor(&c.l),
          self.render_factor(&c.r),
          self.render(&c.o)
        ),
        l: self.dump_terms(&c.l),
        r: self.dump_terms(&c.r),
        o: self.dump_terms(&c.o),
      })
      .collect()
  }

  fn dump_terms(&self, lc: &LinearCombination) -> Vec<TermDump> {
    lc.terms()
      .iter()
      .map(|t| TermDump {
        coeff: t.coeff.to_string(),
        wire: t.variable.index(),
        name: self.variable_name(t.variable),
      })
      .collect()
  }

  fn render_term(&self, t: &Term) -> String {
    let name = self.variable_name(t.variable);
    if t.variable.index() == 0 {
      t.coeff.to_string()
    } else if t.coeff.is_one() {
      name
    } else {
      format!("{}⋅{}", t.coeff, name)
    }
  }

  fn render_factor(&self, lc: &LinearCombination) -> String {
    if lc.len() > 1 {
      format!("({})", self.render(lc))
    } else {
      self.render(lc)
    }
  }

  /// Renders `3⋅x + y + 5`; the empty combination renders as `0`.
  pub fn render(&self, lc: &LinearCombination) -> String {
    if lc.is_empty() {
      return "0".to_string();
    }
    lc.terms().iter().map(|t| self.render_term(t)).join(" + ")
  }
}

impl fmt::Display for ConstraintSystem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for c in self.dump() {
      writeln!(f, "constraint {}: {}", c.index, c.text)?;
      for (side, terms) in [("L", &c.l), ("R", &c.r), ("O", &c.o)] {
        for (j, t) in terms.iter().enumerate() {
          writeln!(
            f,
            "  {} term {}: coeff {}, wire {}, name {}",
            side, j, t.coeff, t.wire, t.name
          )?;
        }
      }
    }
    Ok(())
  }
}
