use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use hv_project::{ProjectError, Scenario};
use hv_sim::{
    ForcingMode, HarvesterOptions, HarvesterRun, IntegratorType, ParameterSet, SettleWindow,
    SimError, run_harvester,
};
use tracing_subscriber::EnvFilter;
use uom::si::angular_velocity::radian_per_second;
use uom::si::electrical_resistance::ohm;
use uom::si::frequency::hertz;
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::power::watt;
use uom::si::time::second;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "hv-cli")]
#[command(about = "HarvestSim CLI - Vibration energy harvester simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show model and electrical parameters with derived quantities
    Params {
        /// Scenario file (YAML or JSON); defaults to the reference harvester
        #[arg(short, long)]
        scenario: Option<PathBuf>,
    },
    /// Run a simulation and print steady-state metrics
    Run {
        /// Scenario file (YAML or JSON); defaults to the reference harvester
        #[arg(short, long)]
        scenario: Option<PathBuf>,
        #[command(flatten)]
        overrides: RunOverrides,
    },
    /// Run a simulation and write t, P, z as CSV to stdout
    Series {
        /// Scenario file (YAML or JSON); defaults to the reference harvester
        #[arg(short, long)]
        scenario: Option<PathBuf>,
        /// Emit every N-th sample
        #[arg(long, default_value_t = 1)]
        every: usize,
        #[command(flatten)]
        overrides: RunOverrides,
    },
    /// Write the reference scenario to a YAML file
    Init {
        /// Output path
        path: PathBuf,
    },
}

#[derive(clap::Args)]
struct RunOverrides {
    /// Number of samples
    #[arg(long)]
    steps: Option<usize>,
    /// Settled window start, in seconds (rounded to the nearest sample)
    #[arg(long, conflicts_with = "settle_samples")]
    settle_time: Option<f64>,
    /// Settled window start, in samples
    #[arg(long)]
    settle_samples: Option<usize>,
    /// Forcing treatment at intermediate RK stages
    #[arg(long, value_enum)]
    forcing: Option<ForcingArg>,
    /// Integration scheme
    #[arg(long, value_enum)]
    integrator: Option<IntegratorArg>,
    /// Abort if the state stops being finite
    #[arg(long)]
    check_finite: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ForcingArg {
    Incremented,
    Held,
}

#[derive(Clone, Copy, ValueEnum)]
enum IntegratorArg {
    Rk4,
    Euler,
}

impl RunOverrides {
    fn apply(&self, mut opts: HarvesterOptions) -> HarvesterOptions {
        if let Some(steps) = self.steps {
            opts.steps = steps;
        }
        if let Some(seconds) = self.settle_time {
            opts.settle = SettleWindow::Duration(seconds);
        }
        if let Some(count) = self.settle_samples {
            opts.settle = SettleWindow::Samples(count);
        }
        if let Some(forcing) = self.forcing {
            opts.forcing = match forcing {
                ForcingArg::Incremented => ForcingMode::Incremented,
                ForcingArg::Held => ForcingMode::Held,
            };
        }
        if let Some(integrator) = self.integrator {
            opts.integrator = match integrator {
                IntegratorArg::Rk4 => IntegratorType::RK4,
                IntegratorArg::Euler => IntegratorType::ForwardEuler,
            };
        }
        opts.check_finite |= self.check_finite;
        opts
    }
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Params { scenario } => cmd_params(scenario.as_deref()),
        Commands::Run {
            scenario,
            overrides,
        } => cmd_run(scenario.as_deref(), &overrides),
        Commands::Series {
            scenario,
            every,
            overrides,
        } => cmd_series(scenario.as_deref(), every, &overrides),
        Commands::Init { path } => cmd_init(&path),
    }
}

fn load_scenario(path: Option<&Path>) -> CliResult<Scenario> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading scenario");
            Ok(hv_project::load(path)?)
        }
        None => Ok(Scenario::reference()),
    }
}

fn cmd_params(scenario_path: Option<&Path>) -> CliResult<()> {
    let scenario = load_scenario(scenario_path)?;
    let params = scenario.parameter_set()?;
    print_parameters(&scenario.name, &params);
    Ok(())
}

fn cmd_run(scenario_path: Option<&Path>, overrides: &RunOverrides) -> CliResult<()> {
    let scenario = load_scenario(scenario_path)?;
    let params = scenario.parameter_set()?;
    let opts = overrides.apply(scenario.options());

    print_parameters(&scenario.name, &params);
    let run = run_harvester(&params, &opts)?;
    print_results(&run);
    Ok(())
}

fn cmd_series(
    scenario_path: Option<&Path>,
    every: usize,
    overrides: &RunOverrides,
) -> CliResult<()> {
    if every == 0 {
        return Err(CliError::InvalidArg("--every must be positive".to_string()));
    }
    let scenario = load_scenario(scenario_path)?;
    let params = scenario.parameter_set()?;
    let run = run_harvester(&params, &overrides.apply(scenario.options()))?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    writeln!(out, "t_s,power_w,z_m")?;
    for i in (0..run.len()).step_by(every) {
        writeln!(out, "{},{},{}", run.t()[i], run.power[i], run.z[i])?;
    }
    out.flush()?;
    Ok(())
}

fn cmd_init(path: &Path) -> CliResult<()> {
    hv_project::save_yaml(path, &Scenario::reference())?;
    println!("✓ Wrote reference scenario to {}", path.display());
    Ok(())
}

fn print_parameters(name: &str, params: &ParameterSet) {
    println!("Scenario: {}", name);
    println!("Model parameters:");
    println!(
        "  Excitation frequency:   {} rad/s ({:.4} Hz)",
        params.oscillation_frequency().get::<radian_per_second>(),
        params.excitation_frequency_hz()
    );
    println!(
        "  Mass of magnet:         {} kg",
        params.mass().get::<kilogram>()
    );
    println!("  Spring stiffness:       {:.4} N/m", params.stiffness_n_per_m());
    println!(
        "  Damping:                {} Ns/m",
        params.mechanical_damping_ns_per_m()
    );
    println!("  Base amplitude:         {} m", params.base_amplitude_m());
    println!("Electrical model parameters:");
    println!(
        "  Load resistance:        {} Ohm",
        params.load_resistance().get::<ohm>()
    );
    println!(
        "  Coil resistance:        {} Ohm",
        params.coil_resistance().get::<ohm>()
    );
    println!(
        "  Flux gradient dphi/dz:  {} Wb/m",
        params.flux_gradient_wb_per_m()
    );
    println!(
        "  Electrical damping:     {:.6} Ns/m",
        params.electrical_damping_ns_per_m()
    );
    println!(
        "  Natural frequency:      {:.4} Hz",
        params.natural_frequency().get::<hertz>()
    );
    println!(
        "  Time step:              {:.6} s",
        params.time_step().get::<second>()
    );
}

fn print_results(run: &HarvesterRun) {
    let s = &run.summary;
    let t_settle = run.t().get(s.settle_index).copied().unwrap_or(f64::NAN);
    println!("Simulation results ({} samples):", run.len());
    println!(
        "  Maximum power (after {:.2} s):         {:.6} W",
        t_settle,
        s.p_max_settled().get::<watt>()
    );
    println!(
        "  RMS power:                             {:.6} W",
        s.p_rms().get::<watt>()
    );
    println!(
        "  Maximum displacement (after {:.2} s):  {:.6} m",
        t_settle,
        s.z_max_settled().get::<meter>()
    );
    println!(
        "  Maximum displacement:                  {:.6} m",
        s.z_max().get::<meter>()
    );
}
