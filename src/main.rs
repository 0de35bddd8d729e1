use std::path::PathBuf;

use digisim::config::{CyclePolicy, GateOverflow, SimulationConfig};
use digisim::graph::graphviz::ToGraphviz;
use digisim::layout::Layout;
use digisim::{RunStatus, Session};
use structopt::StructOpt;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Debug, StructOpt)]
#[structopt(name = "digisim", about = "Resolve and simulate an editor circuit layout")]
struct Opt {
    /// Layout JSON saved by the editor
    #[structopt(parse(from_os_str))]
    layout: PathBuf,

    /// Simulation config JSON; flags below override it
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Input ids to toggle in order, settling after each
    #[structopt(short, long)]
    toggle: Vec<usize>,

    #[structopt(long)]
    max_steps: Option<usize>,

    /// firsttwo | reject
    #[structopt(long)]
    gate_overflow: Option<GateOverflow>,

    /// ignore | warn | reject
    #[structopt(long)]
    cycle_policy: Option<CyclePolicy>,

    /// Print the dependency graph as DOT instead of simulating
    #[structopt(long)]
    graphviz: bool,

    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

impl Opt {
    fn simulation_config(&self) -> eyre::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(max_steps) = self.max_steps {
            eyre::ensure!(max_steps > 0, "--max-steps must be at least 1");
            config.max_steps = max_steps;
        }
        if let Some(gate_overflow) = self.gate_overflow {
            config.gate_overflow = gate_overflow;
        }
        if let Some(cycle_policy) = self.cycle_policy {
            config.cycle_policy = cycle_policy;
        }

        Ok(config)
    }
}

fn main() -> eyre::Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = opt.simulation_config()?;
    let layout = Layout::load(&opt.layout)?;

    let mut session = Session::with_config(layout.components(), config);
    session.connect()?;

    if opt.graphviz {
        if let Some(map) = session.map() {
            println!("{}", map.to_graphviz(session.components()));
        }
        return Ok(());
    }

    let status = session.settle()?;
    report(&session, status);

    for &id in &opt.toggle {
        session.toggle(id)?;
        println!("toggle #{id}");

        let status = session.settle()?;
        report(&session, status);
    }

    Ok(())
}

fn report(session: &Session, status: RunStatus) {
    match status {
        RunStatus::Converged { steps } => println!("settled after {steps} steps"),
        RunStatus::NonConvergence { steps } => println!("still changing after {steps} steps"),
    }

    for (id, component) in session.components().iter().enumerate() {
        println!(
            "{id:>4}  {:<9} {:<12} {}",
            component.kind.to_string(),
            component.label,
            if component.state { "on" } else { "off" }
        );
    }
}
