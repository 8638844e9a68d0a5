use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use cf_model::trajectory::{CHART_TITLE, X_AXIS_LABEL};
use cf_model::{FlowParams, ModelResult, Series, Trajectory, scenario, simulate_with};
use cf_sim::{GridOptions, IntegratorType};

#[derive(Parser)]
#[command(name = "cf-cli")]
#[command(about = "Circular Flow CLI - three-stock circular material-flow simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and print the sampled trajectory
    Run {
        /// Recycling efficiency (0.10 - 1.00)
        #[arg(long)]
        efficiency: Option<f64>,
        /// Base recycling capacity (5 - 30), doubled from t=30
        #[arg(long)]
        capacity: Option<u32>,
        /// Cut virgin raw-material inflow to 20% from t=40
        #[arg(long, conflicts_with = "no_crisis")]
        crisis: bool,
        /// Keep virgin raw-material inflow at its base rate
        #[arg(long)]
        no_crisis: bool,
        /// Scenario YAML file; command-line values override it
        #[arg(long)]
        scenario: Option<PathBuf>,
        /// Integration scheme
        #[arg(long, value_enum, default_value_t = IntegratorArg::Dopri5)]
        integrator: IntegratorArg,
        /// Print every N-th sample (the last sample is always printed)
        #[arg(long, default_value_t = 10)]
        every: usize,
    },
    /// Show parameter domains and defaults
    Params,
    /// Validate a scenario file
    Check {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IntegratorArg {
    /// Adaptive Dormand-Prince 5(4)
    Dopri5,
    /// Fixed-step classical Runge-Kutta
    Rk4,
    /// Fixed-step forward Euler
    Euler,
}

impl From<IntegratorArg> for IntegratorType {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Dopri5 => IntegratorType::DormandPrince,
            IntegratorArg::Rk4 => IntegratorType::RK4,
            IntegratorArg::Euler => IntegratorType::ForwardEuler,
        }
    }
}

fn main() -> ModelResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            efficiency,
            capacity,
            crisis,
            no_crisis,
            scenario,
            integrator,
            every,
        } => {
            let mut params = match &scenario {
                Some(path) => scenario::load_yaml(path)?,
                None => FlowParams::default(),
            };
            if let Some(e) = efficiency {
                params.efficiency = e;
            }
            if let Some(c) = capacity {
                params.base_capacity = c;
            }
            params.crisis_enabled = apply_crisis_flags(params.crisis_enabled, crisis, no_crisis);
            cmd_run(&params, integrator.into(), every)
        }
        Commands::Params => {
            cmd_params();
            Ok(())
        }
        Commands::Check { scenario_path } => cmd_check(&scenario_path),
    }
}

/// `--crisis` / `--no-crisis` override the scenario value; neither keeps it.
fn apply_crisis_flags(current: bool, crisis: bool, no_crisis: bool) -> bool {
    if crisis {
        true
    } else if no_crisis {
        false
    } else {
        current
    }
}

fn cmd_run(params: &FlowParams, integrator: IntegratorType, every: usize) -> ModelResult<()> {
    params.validate()?;
    println!("{}", CHART_TITLE);
    println!(
        "  efficiency = {:.2}, base capacity = {}, crisis = {}",
        params.efficiency,
        params.base_capacity,
        if params.crisis_enabled { "on" } else { "off" }
    );

    let opts = GridOptions {
        integrator,
        ..GridOptions::default()
    };
    let trajectory = simulate_with(params, &opts)?;
    tracing::info!(
        accepted = trajectory.stats.accepted_steps,
        rejected = trajectory.stats.rejected_steps,
        rhs_evals = trajectory.stats.rhs_evals,
        "integration finished"
    );

    print_table(&trajectory, every.max(1));
    print_summary(&trajectory);
    Ok(())
}

fn print_table(trajectory: &Trajectory, every: usize) {
    println!();
    print!("{:>10}", X_AXIS_LABEL);
    for series in Series::ALL {
        print!("  {:>20}", series.label());
    }
    println!();

    let last = trajectory.len().saturating_sub(1);
    for (i, (t, x)) in trajectory.t.iter().zip(&trajectory.states).enumerate() {
        if i % every != 0 && i != last {
            continue;
        }
        print!("{:>10.3}", t);
        for series in Series::ALL {
            print!("  {:>20.4}", series.of(x));
        }
        println!();
    }
}

fn print_summary(trajectory: &Trajectory) {
    println!("\nSummary:");
    println!("  Time points: {}", trajectory.len());
    if let Some((t, x)) = trajectory.final_state() {
        println!("  Final state at t={:.1}:", t);
        for series in Series::ALL {
            println!(
                "    {} ({}): {:.4}",
                series.label(),
                series.code(),
                series.of(&x)
            );
        }
        println!("  Total stock: {:.4}", x.total());
    }
    if let Some(rates) = trajectory.rates().last() {
        println!(
            "  Net external flow (virgin inflow - disposal): {:.4}",
            rates.net_external_flow()
        );
    }
    println!(
        "  Steps: {} accepted, {} rejected, {} rhs evaluations",
        trajectory.stats.accepted_steps, trajectory.stats.rejected_steps, trajectory.stats.rhs_evals
    );
    if trajectory.has_negative_stock() {
        println!("  Warning: at least one stock went negative");
    }
}

fn cmd_params() {
    println!("Parameters:");
    for domain in [FlowParams::EFFICIENCY, FlowParams::BASE_CAPACITY] {
        println!(
            "  {:<14} [{}, {}] step {} (default {})",
            domain.name, domain.min, domain.max, domain.step, domain.default
        );
    }
    println!("  {:<14} on/off (default off)", "crisis_enabled");
}

fn cmd_check(scenario_path: &Path) -> ModelResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let params = scenario::load_yaml(scenario_path)?;
    println!("✓ Scenario is valid");
    println!(
        "  efficiency = {:.2}, base capacity = {}, crisis = {}",
        params.efficiency, params.base_capacity, params.crisis_enabled
    );
    Ok(())
}
