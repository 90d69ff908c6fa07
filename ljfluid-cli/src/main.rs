mod trajectory;
mod viewer;

use clap::{Parser, Subcommand};
use ljfluid_core::{SimConfig, Simulation};
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use trajectory::XyzWriter;
use viewer::ViewerApp;

#[derive(Parser)]
#[command(name = "ljfluid")]
#[command(about = "ljfluid - 2D Lennard-Jones molecular dynamics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation without a window
    Run {
        /// JSON config file; defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the number of steps
        #[arg(long)]
        steps: Option<u64>,
        /// Override the random seed
        #[arg(long)]
        seed: Option<u64>,
        /// Write an XYZ trajectory to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write every Nth frame to the trajectory
        #[arg(long, default_value_t = 100)]
        every: u64,
    },
    /// Watch a simulation in a window
    View {
        /// JSON config file, reloaded when it changes
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the random seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the default config, or write it to a file
    Config {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            steps,
            seed,
            output,
            every,
        } => run_headless(config.as_deref(), steps, seed, output.as_deref(), every),
        Commands::View { config, seed } => run_viewer(config, seed),
        Commands::Config { output } => write_default_config(output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<SimConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

fn run_headless(
    config_path: Option<&Path>,
    steps: Option<u64>,
    seed: Option<u64>,
    output: Option<&Path>,
    every: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path, seed)?;
    if steps.is_some() {
        config.steps = steps;
    }
    if config.steps.is_none() {
        return Err("headless runs need a step count; pass --steps or set \"steps\"".into());
    }

    let mut sim = Simulation::new(config)?;

    let mut writer = match output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = XyzWriter::new(BufWriter::new(file), every.max(1));
            writer.write_frame(&sim.frame())?;
            Some(writer)
        }
        None => None,
    };

    let summary = sim.run(|frame| match writer.as_mut() {
        Some(w) => w.consume(frame),
        None => ControlFlow::Continue(()),
    })?;

    if let Some(writer) = writer {
        let frames = writer.finish()?;
        log::info!("wrote {} frames", frames);
    }

    println!("steps = {}", summary.steps_completed);
    println!("initial_energy = {:.6}", summary.initial_energy);
    println!("final_energy = {:.6}", summary.final_energy);
    println!("energy_drift = {:.3e}", summary.energy_drift);
    println!("seed = {}", sim.seed());

    Ok(())
}

fn run_viewer(config_path: Option<PathBuf>, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ljfluid",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(config_path, seed, cc)))),
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

fn write_default_config(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = SimConfig::default().to_json_pretty()?;
    match output {
        Some(path) => fs::write(path, json + "\n")?,
        None => println!("{}", json),
    }
    Ok(())
}
