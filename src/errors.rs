use super::scalar::FieldElement;
use super::variable::Variable;
use core::fmt::Debug;
use thiserror::Error;

#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldError {
  /// returned when inverting the additive identity
  #[error("Division by zero in field inversion")]
  DivisionByZero,
}

/// Failures raised while running a circuit definition. Compilation is aborted
/// on the first one.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum CompileError {
  /// an operand references a variable this circuit never allocated
  #[error("Variable {variable} is not allocated in this circuit ({allocated} variables allocated)")]
  UnallocatedVariable { variable: Variable, allocated: usize },
  /// inputs must carry a non-empty name
  #[error("Input variables must be named")]
  EmptyName,
  /// two inputs were declared under the same name
  #[error("Input {0:?} is declared more than once")]
  DuplicateInput(String),
  /// a variadic operation received too few operands
  #[error("Operation needs at least two operands, got {got}")]
  NotEnoughOperands { got: usize },
  #[error(transparent)]
  Field(#[from] FieldError),
  /// raised by circuit authors for structurally invalid definitions
  #[error("Invalid circuit definition: {0}")]
  Definition(String),
}

/// Failures raised while computing a witness for a compiled circuit.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum SolveError {
  #[error("No value supplied for input {name:?} ({variable})")]
  MissingInput { variable: Variable, name: String },
  /// the variable is not an input of the expected visibility
  #[error("{variable} is not an input of the expected visibility")]
  UnexpectedInput { variable: Variable },
  /// witness construction referenced a name the circuit never declared
  #[error("Circuit declares no input named {0:?}")]
  UnknownInput(String),
  #[error("Division by zero while solving constraint {constraint}")]
  DivisionByZero { constraint: usize },
  /// no progress is possible; the circuit is under-determined
  #[error("Constraint {constraint} cannot be solved, unknown variables: {unknowns:?}")]
  UnsatisfiedConstraint {
    constraint: usize,
    unknowns: Vec<Variable>,
  },
  #[error("Constraint {constraint} is not satisfied: L*R = {lhs}, O = {rhs}")]
  ConstraintMismatch {
    constraint: usize,
    lhs: FieldElement,
    rhs: FieldElement,
  },
  /// an internal variable that no constraint determines
  #[error("Internal variable {variable} is not determined by any constraint")]
  UnconstrainedVariable { variable: Variable },
  #[error("Solver gave up after {passes} passes")]
  PassLimitExceeded { passes: usize },
  /// slot 0 of an assignment must hold the constant one
  #[error("Assignment does not hold ONE at index 0")]
  InvalidOne,
  #[error("Assignment has {got} values, circuit has {expected} variables")]
  AssignmentLength { expected: usize, got: usize },
}
