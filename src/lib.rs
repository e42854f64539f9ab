//! Arithmetic circuit front end for rank-1 constraint systems.
//!
//! Circuits are described through a [`CircuitBuilder`], compiled once into an
//! immutable [`ConstraintSystem`] and then solved for any number of input
//! sets:
//!
//! ```
//! use libr1cs::{compile_circuit, circuits::Cubic, Solver, Witness};
//!
//! let cs = compile_circuit(&Cubic).unwrap();
//! let witness = Witness::new(&cs)
//!   .assign("x", 3u64)
//!   .and_then(|w| w.assign("y", 35u64))
//!   .unwrap();
//! let assignment = Solver::new(&cs).solve_witness(&witness).unwrap();
//! assert!(cs.is_satisfied(&assignment).is_ok());
//! ```

mod builder;
pub mod circuits;
mod constraint_system;
mod dump;
mod errors;
mod linear_combination;
pub mod scalar;
mod solver;
mod timer;
mod variable;

pub use builder::CircuitBuilder;
pub use constraint_system::{compile, compile_circuit, Circuit, Constraint, ConstraintSystem};
pub use dump::{ConstraintDump, TermDump};
pub use errors::{CompileError, FieldError, SolveError};
pub use linear_combination::{LinearCombination, Term};
pub use scalar::FieldElement;
pub use solver::{
  solve, Assignment, Evaluations, Inputs, Solution, Solver, SolverOptions, Witness,
};
pub use timer::Timer;
pub use variable::{Variable, VariableInfo, VariableKind, Visibility};
