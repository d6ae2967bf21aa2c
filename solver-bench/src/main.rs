//! Benchmarking CLI for the indicator constraint handler.
//!
//! Builds random indicator systems, runs rounding separation on random
//! relaxation points and reports cut and LP statistics.

mod instances;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use instances::{fractional_point, generate, Family, Lcg};
use solver_indicator::{ConstraintHandler, HandlerResult, IndicatorHandler, IndicatorSettings, Stage};

#[derive(Parser, Debug)]
#[command(author, version, about = "Indicator separation benchmarks")]
struct Cli {
    /// Instance family
    #[arg(long, value_enum, default_value = "intervals")]
    family: Family,

    /// Number of continuous variables
    #[arg(long, default_value_t = 5)]
    vars: usize,

    /// Comma-separated list of indicator counts
    #[arg(long, value_delimiter = ',', default_value = "10,50,200")]
    cases: Vec<usize>,

    /// Separation calls per case
    #[arg(long, default_value_t = 20)]
    points: usize,

    /// Random seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Emit clauses instead of cuts
    #[arg(long)]
    gen_logicor: bool,

    /// Basis condition limit (0 disables)
    #[arg(long, default_value_t = 0.0)]
    max_condition: f64,

    /// Successful rounding thresholds per call
    #[arg(long, default_value_t = 1)]
    rounds: usize,
}

fn run_case(cli: &Cli, n_cons: usize) -> Result<()> {
    let settings = IndicatorSettings::alternative_lp()
        .with_gen_logicor(cli.gen_logicor)
        .with_max_condition(cli.max_condition)
        .with_rounding(0.1, 0.6, 0.1, cli.rounds);
    let mut handler = IndicatorHandler::new(settings)?;
    let mut rng = Lcg::new(cli.seed);
    let mut inst = generate(&mut handler, cli.family, cli.vars, n_cons, &mut rng)?;

    let start = Instant::now();
    inst.model.set_stage(Stage::Transformed);
    for &c in &inst.conss {
        handler.transform(&mut inst.model, c)?;
    }
    inst.model.set_stage(Stage::InitSolve);
    handler.init_sol(&mut inst.model)?;
    inst.model.set_stage(Stage::Solving);
    let setup = start.elapsed();

    let start = Instant::now();
    let mut productive = 0;
    for _ in 0..cli.points {
        let point = fractional_point(&inst.model, &inst.binaries, &mut rng);
        inst.model.set_lp_solution(point);
        let result = handler
            .separate_lp(&mut inst.model)
            .with_context(|| format!("separation failed on case with {} indicators", n_cons))?;
        if matches!(result, HandlerResult::Separated | HandlerResult::ConsAdded) {
            productive += 1;
        }
    }
    let elapsed = start.elapsed();

    let ctx = handler
        .separation_context()
        .context("alternative LP was not created")?;
    let stats = ctx.stats();

    println!("\n{}", "=".repeat(60));
    println!("{:?}: {} indicators on {} variables", cli.family, n_cons, cli.vars);
    println!("{}", "=".repeat(60));
    println!("Alt LP rows:      {}", ctx.n_rows());
    println!("Bound columns:    {} lb, {} ub", ctx.n_lb_bounds(), ctx.n_ub_bounds());
    println!("Setup time:       {:.3} ms", setup.as_secs_f64() * 1000.0);
    println!("Productive calls: {} / {}", productive, cli.points);
    println!("Cuts:             {} ({} local)", stats.cuts, stats.local_cuts);
    println!("Cuts in pool:     {}", inst.model.cut_pool.len());
    println!("Clauses:          {}", inst.model.outbox.clauses.len());
    println!("LP solves:        {} ({} resolves, {} errors)", stats.lp_solves, stats.resolves, stats.lp_errors);
    println!("Separation time:  {:.3} ms", elapsed.as_secs_f64() * 1000.0);
    if stats.lp_solves > 0 {
        println!(
            "Time/LP solve:    {:.3} ms",
            elapsed.as_secs_f64() * 1000.0 / stats.lp_solves as f64
        );
    }

    handler.exit_sol(&mut inst.model)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Indicator Separation Benchmarks");
    println!("===============================");
    for &n in &cli.cases {
        log::info!("running case with {} indicators", n);
        run_case(&cli, n)?;
    }

    println!("\n{}", "=".repeat(60));
    println!("Benchmarks complete");
    println!("{}", "=".repeat(60));
    Ok(())
}
