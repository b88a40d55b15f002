use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "vmgrid",
    about = "vmgrid - balanced VM placement across hypervisors",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distribute the VMs from the input files across the hypervisor pool
    Distribute {
        /// Directory containing the input json files (overrides the config)
        #[arg(short, long)]
        path: Option<String>,
        /// Path to a vmgrid.toml config file
        #[arg(short, long, default_value = "vmgrid.toml")]
        config: String,
        /// Write the assignment to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Run synthetic placement rounds and report timing and balance
    Bench {
        /// Number of independent rounds
        #[arg(long, default_value_t = 200)]
        runs: u32,
        /// Hypervisors generated per round
        #[arg(long, default_value_t = 250)]
        hypervisors: u32,
        /// VMs generated per round
        #[arg(long, default_value_t = 1000)]
        vms: u32,
        /// Write the last round's assignment to profiling_result.json
        #[arg(long)]
        write_result: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vmgrid_cli=info".parse()?)
                .add_directive("vmgrid_placement=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Distribute {
            path,
            config,
            output,
        } => commands::distribute::run(path.as_deref(), &config, output.as_deref()),
        Commands::Bench {
            runs,
            hypervisors,
            vms,
            write_result,
        } => commands::bench::run(runs, hypervisors, vms, write_result),
    }
}
