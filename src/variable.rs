//! Wire identifiers and the allocator that hands them out.
//!
//! Index 0 is the constant `ONE`. Inputs and internal wires receive strictly
//! increasing indices in allocation order; an index is never handed out twice
//! within one circuit.
use super::errors::CompileError;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A slot in the assignment vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variable(pub(crate) usize);

impl Variable {
  /// The constant-one wire.
  pub const ONE: Variable = Variable(0);

  /// Builds a raw handle. Handles that were not returned by an allocator are
  /// rejected when used in a circuit.
  pub fn new(index: usize) -> Variable {
    Variable(index)
  }

  #[inline]
  pub fn index(&self) -> usize {
    self.0
  }
}

impl fmt::Display for Variable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "v{}", self.0)
  }
}

/// Who gets to see an input value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
  /// known to prover and verifier
  Public,
  /// known to the prover only
  Secret,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableKind {
  One,
  Input(Visibility),
  Internal,
}

impl VariableKind {
  pub fn is_input(&self) -> bool {
    matches!(self, VariableKind::Input(_))
  }
}

/// Metadata recorded for every allocated variable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableInfo {
  pub kind: VariableKind,
  pub name: Option<String>,
}

/// Hands out variables for a single circuit compilation.
pub(crate) struct Allocator {
  variables: Vec<VariableInfo>,
  names: BTreeMap<String, Variable>,
}

impl Allocator {
  pub fn new() -> Self {
    Allocator {
      variables: vec![VariableInfo {
        kind: VariableKind::One,
        name: None,
      }],
      names: BTreeMap::new(),
    }
  }

  /// Declares a named input.
  pub fn new_input(
    &mut self,
    name: &str,
    visibility: Visibility,
  ) -> Result<Variable, CompileError> {
    if name.is_empty() {
      return Err(CompileError::EmptyName);
    }
    if self.names.contains_key(name) {
      return Err(CompileError::DuplicateInput(name.to_string()));
    }
    let var = self.push(VariableKind::Input(visibility), Some(name.to_string()));
    self.names.insert(name.to_string(), var);
    Ok(var)
  }

  pub fn new_internal(&mut self) -> Variable {
    self.push(VariableKind::Internal, None)
  }

  fn push(&mut self, kind: VariableKind, name: Option<String>) -> Variable {
    let var = Variable(self.variables.len());
    self.variables.push(VariableInfo { kind, name });
    var
  }

  pub fn num_variables(&self) -> usize {
    self.variables.len()
  }

  pub fn contains(&self, var: Variable) -> bool {
    var.0 < self.variables.len()
  }

  /// Fails with `UnallocatedVariable` unless `var` came from this allocator.
  pub fn check(&self, var: Variable) -> Result<(), CompileError> {
    if self.contains(var) {
      Ok(())
    } else {
      Err(CompileError::UnallocatedVariable {
        variable: var,
        allocated: self.variables.len(),
      })
    }
  }

  pub fn kind(&self, var: Variable) -> Option<VariableKind> {
    self.variables.get(var.0).map(|info| info.kind)
  }

  pub fn name(&self, var: Variable) -> Option<&str> {
    self.variables.get(var.0).and_then(|info| info.name.as_deref())
  }

  pub fn lookup(&self, name: &str) -> Option<Variable> {
    self.names.get(name).copied()
  }

  pub fn into_layout(self) -> Vec<VariableInfo> {
    self.variables
  }
}
