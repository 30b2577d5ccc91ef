#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use shooter_forecast::config::Config;
use shooter_forecast::io::{DirectorySink, NullSink, UdpTransport};
use shooter_forecast::pipeline::entities::DoorSet;
use shooter_forecast::pipeline::grids::FloorLayout;
use shooter_forecast::pipeline::predictor::ModelSet;
use shooter_forecast::pipeline::Session;
use shooter_forecast::run_app;

#[derive(Parser, Debug)]
#[command(name = "shooter_forecast")]
#[command(about = "Forecasts the shooter's trajectory from live simulation telemetry")]
struct Args {
    /// TOML config file (defaults to ./forecast.toml when present)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Local address to receive frames on
    #[arg(long)]
    bind: Option<String>,

    /// Address forecasts are sent to
    #[arg(long)]
    peer: Option<String>,

    /// Archive raw frames into this directory
    #[arg(long)]
    dump_dir: Option<PathBuf>,
}

fn apply_overrides(mut config: Config, args: Args) -> Config {
    if let Some(bind) = args.bind {
        config.transport.bind_address = bind;
    }
    if let Some(peer) = args.peer {
        config.transport.peer_address = peer;
    }
    if let Some(dir) = args.dump_dir {
        config.dump.directory = Some(dir);
    }
    config
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let config = apply_overrides(config, args);
    let mut liveness = config.liveness.build()?;

    let bind: SocketAddr = config.transport.bind_address.parse()?;
    let peer: SocketAddr = config.transport.peer_address.parse()?;
    let mut transport = UdpTransport::bind(bind, peer, config.transport.poll_interval())?;
    info!("Socket started on {}, replying to {}", transport.local_addr()?, transport.peer());

    let layout = FloorLayout::load(
        config.layout.lower_floor.as_deref(),
        config.layout.upper_floor.as_deref(),
    )?;
    if layout.lower.is_empty() && layout.upper.is_empty() {
        warn!("No wall maps configured, wall channel will be empty");
    }
    info!(
        "Layouts loaded: lower {:?}, upper {:?} cells",
        layout.lower.dimensions(),
        layout.upper.dimensions()
    );

    let models = ModelSet::constant_velocity();
    warn!("No trained models available, using constant-velocity extrapolation");
    info!("Models loaded");

    let doors = DoorSet::standard();
    info!(
        "Static objects loaded: {} open doors, {} closed doors",
        doors.open.len(),
        doors.closed.len()
    );

    let mut session = Session::new(layout, doors, models);
    info!("Waiting for simulation...");

    let stats = match &config.dump.directory {
        Some(dir) => {
            let mut sink = DirectorySink::create(dir)?;
            let stats = run_app(&mut session, &mut transport, &mut sink, &mut liveness)?;
            info!("Dumped {} frames to {}", sink.written(), sink.dir().display());
            stats
        }
        None => run_app(&mut session, &mut transport, &mut NullSink, &mut liveness)?,
    };

    info!(
        "Program ended: {} frames, {} forecasts, {} skipped",
        stats.frames, stats.forecasts, stats.skipped
    );
    Ok(())
}
