//! # Circuit Profiler
//!
//! Compiles and solves square-chain circuits of growing size and reports
//! compile time, solve time, serialized system size and zlib-compressed size.
//! Solver behaviour follows `R1CS_SOLVER_MAX_PASSES` and
//! `R1CS_SOLVER_RECORD_EVALUATIONS`. Set `RUST_LOG=debug` for per-constraint
//! events.

use flate2::{write::ZlibEncoder, Compression};
use libr1cs::{
  circuits::{Cubic, SquareChain},
  compile_circuit, FieldElement, Solver, SolverOptions, Timer, Witness,
};
use rand::{rngs::StdRng, SeedableRng};
use std::io::Write;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct CircuitMetrics {
  log_rounds: usize,
  num_constraints: usize,
  num_variables: usize,
  compile_time: u128,
  solve_time: u128,
  size_uncompressed: usize,
  size_compressed: usize,
}

impl CircuitMetrics {
  fn constraints_per_ms(&self) -> f64 {
    if self.solve_time > 0 {
      self.num_constraints as f64 / self.solve_time as f64
    } else {
      0.0
    }
  }

  fn compression_ratio(&self) -> f64 {
    if self.size_uncompressed > 0 {
      self.size_compressed as f64 / self.size_uncompressed as f64
    } else {
      0.0
    }
  }
}

fn print_header() {
  println!("\n{}", "=".repeat(96));
  println!("{:^96}", "R1CS CIRCUIT PROFILER");
  println!("{}", "=".repeat(96));
  println!(
    "{:>6} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10} | {:>8}",
    "Size", "Cons", "Vars", "Compile", "Solve", "Cons/ms", "CS(KB)", "Ratio"
  );
  println!("{}", "-".repeat(96));
}

fn print_metrics(m: &CircuitMetrics) {
  println!(
    "{:>6} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10.0} | {:>10.1} | {:>8.2}",
    format!("2^{}", m.log_rounds),
    m.num_constraints,
    m.num_variables,
    m.compile_time,
    m.solve_time,
    m.constraints_per_ms(),
    m.size_uncompressed as f64 / 1024.0,
    m.compression_ratio(),
  );
}

fn profile(
  log_rounds: usize,
  options: &SolverOptions,
  rng: &mut StdRng,
) -> Result<CircuitMetrics, Box<dyn std::error::Error>> {
  let chain = SquareChain {
    rounds: 1 << log_rounds,
  };
  let mut metrics = CircuitMetrics {
    log_rounds,
    ..Default::default()
  };

  let start = Instant::now();
  let cs = compile_circuit(&chain)?;
  metrics.compile_time = start.elapsed().as_millis();
  metrics.num_constraints = cs.num_constraints();
  metrics.num_variables = cs.num_variables();

  let x = FieldElement::random(rng);
  let witness = Witness::new(&cs)
    .assign("x", x)?
    .assign("y", chain.evaluate(&x))?;

  let start = Instant::now();
  let solution = Solver::with_options(&cs, options.clone())
    .solve_full(witness.public(), witness.secret())?;
  metrics.solve_time = start.elapsed().as_millis();
  cs.is_satisfied(&solution.assignment)?;

  let encoded = bincode::serialize(&cs)?;
  metrics.size_uncompressed = encoded.len();
  let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
  encoder.write_all(&encoded)?;
  metrics.size_compressed = encoder.finish()?.len();

  Ok(metrics)
}

pub fn main() {
  let subscriber = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_target(false)
    .finish();
  if tracing::subscriber::set_global_default(subscriber).is_err() {
    eprintln!("tracing subscriber already installed");
  }

  let options = SolverOptions::from_env();
  info!(?options, "solver options");

  let cubic = match compile_circuit(&Cubic) {
    Ok(cs) => cs,
    Err(e) => {
      error!(error = %e, "failed to compile cubic circuit");
      return;
    }
  };
  println!("cubic circuit, digest {:02x?}", cubic.digest());
  print!("{}", cubic);

  let mut rng = StdRng::seed_from_u64(0);
  let mut all_metrics = Vec::new();
  print_header();
  for log_rounds in [8, 10, 12, 14, 16] {
    let timer = Timer::new(&format!("square_chain_2^{}", log_rounds));
    match profile(log_rounds, &options, &mut rng) {
      Ok(metrics) => {
        print_metrics(&metrics);
        all_metrics.push(metrics);
      }
      Err(e) => {
        error!(log_rounds, error = %e, "profiling run failed");
        return;
      }
    }
    timer.stop();
  }
  println!("{}", "=".repeat(96));

  if let (Some(first), Some(last)) = (all_metrics.first(), all_metrics.last()) {
    let size_ratio = last.num_constraints as f64 / first.num_constraints as f64;
    let time_ratio = last.solve_time.max(1) as f64 / first.solve_time.max(1) as f64;
    println!(
      "solve time scaled {:.1}x for {:.0}x more constraints",
      time_ratio, size_ratio
    );
  }
}
