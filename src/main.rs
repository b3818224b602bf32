use std::time::Instant;

use clap::{Parser, Subcommand};

use simplelog::{debug, info, LevelFilter, TerminalMode, ColorChoice, Config, TermLogger};

use inpmap::error::RenderError;
use inpmap::model::network::Network;
use inpmap::output::write_map;
use inpmap::render::{DisplayConfig, RenderPlan};

const BANNER: [&str; 5] = [
  r"  ___ _   _ ____  __  __    _    ____  ",
  r" |_ _| \ | |  _ \|  \/  |  / \  |  _ \ ",
  r"  | ||  \| | |_) | |\/| | / _ \ | |_) |",
  r"  | || |\  |  __/| |  | |/ ___ \|  __/ ",
  r" |___|_| \_|_|   |_|  |_/_/   \_\_|    ",
];

#[derive(Parser, Debug)]
#[command(
  version = "0.1.0",
  about = "Plot the topology of an EPANET INP network on a geographic map"
)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Render a network to an interactive map (.html) or GeoJSON (.geojson/.json)
  Render {
    /// Input file (EPANET .inp format)
    input_file: String,
    /// Output file (.html, .geojson or .json)
    output_file: String,
    /// UTM zone of the network coordinates (1-60)
    #[arg(long, default_value_t = 14)]
    zone: u32,
    /// Hemisphere of the UTM zone (N or S)
    #[arg(long, default_value = "N")]
    hemisphere: String,
    /// Pipe line width
    #[arg(long, default_value_t = 1.0)]
    line_width: f64,
    /// Pipe line color (name or #rrggbb)
    #[arg(long, default_value = "red")]
    line_color: String,
    /// Junction marker size
    #[arg(long, default_value_t = 4.0)]
    junction_size: f64,
    /// Junction marker fill color
    #[arg(long, default_value = "blue")]
    junction_color: String,
    /// Reservoir marker size
    #[arg(long, default_value_t = 5.0)]
    reservoir_size: f64,
    /// Reservoir marker color
    #[arg(long, default_value = "green")]
    reservoir_color: String,
    /// Basemap style (streets, satellite, topo, light, dark)
    #[arg(long, default_value = "streets")]
    basemap: String,
    /// Print verbose output during rendering
    #[arg(short, long)]
    verbose: bool,
    /// Suppress all output except for errors
    #[arg(long)]
    quiet: bool,
  },
  /// Parse a network file and report its map contents
  Info {
    /// Input file (EPANET .inp format)
    input_file: String,
  },
}

fn main() -> Result<(), String> {
  let cli = Cli::parse();

  // Determine log level based on command
  let log_level = match &cli.command {
    Commands::Render { quiet, verbose, .. } => {
      if *quiet { LevelFilter::Error }
      else if *verbose { LevelFilter::Debug }
      else { LevelFilter::Info }
    }
    _ => LevelFilter::Info,
  };

  // Initialize the logger with colors
  TermLogger::init(
    log_level,
    Config::default(),
    TerminalMode::Mixed,
    ColorChoice::Auto,
  ).expect("Failed to initialize logger");

  // Run the command
  match cli.command {
    Commands::Render {
      input_file,
      output_file,
      zone,
      hemisphere,
      line_width,
      line_color,
      junction_size,
      junction_color,
      reservoir_size,
      reservoir_color,
      basemap,
      quiet,
      ..
    } => {
      if !quiet {
        println!("{}", BANNER.join("\n"));
      }
      let config = DisplayConfig {
        zone,
        hemisphere,
        line_width,
        line_color,
        junction_size,
        junction_color,
        reservoir_size,
        reservoir_color,
        basemap,
      };
      run_render(&input_file, &output_file, &config).map_err(|e| e.to_string())
    }
    Commands::Info { input_file } => {
      run_info(&input_file).map_err(|e| e.to_string())
    }
  }
}

/// Parse, project and write the map for a network
fn run_render(input_file: &str, output_file: &str, config: &DisplayConfig) -> Result<(), RenderError> {
  // options are validated before any file I/O
  let options = config.validate()?;

  let start_time = Instant::now();
  info!("Loading network from file: {}", input_file);

  let mut network = Network::default();
  network.read_inp(input_file)?;
  let load_time = Instant::now();

  info!(
    "Loaded network with {} nodes, {} pipes and {} reservoirs",
    network.nodes.len(),
    network.pipes.len(),
    network.reservoirs.len()
  );
  debug!("Network loaded in {:?}", load_time.duration_since(start_time));

  let plan = RenderPlan::build(&network, &options);
  info!(
    "Projected {} pipe polylines and {} node markers (EPSG:{})",
    plan.polylines.len(),
    plan.markers.len(),
    options.projection.epsg()
  );

  write_map(&plan, &options, output_file)?;
  info!("Map written to {} in {:?}", output_file, start_time.elapsed());
  Ok(())
}

/// Parse a network and report its map contents
fn run_info(input_file: &str) -> Result<(), RenderError> {
  let start_time = Instant::now();

  info!("Loading network from file: {}", input_file);
  let mut network = Network::default();
  network.read_inp(input_file)?;

  info!("Nodes:      {}", network.nodes.len());
  info!("Pipes:      {}", network.pipes.len());
  info!("Reservoirs: {}", network.reservoirs.len());
  info!("Vertices:   {}", network.vertex_count());
  debug!("Network loaded in {:?}", start_time.elapsed());
  Ok(())
}
