//! Command host for plastic-nn.
//!
//! Builds an engine from flags or a JSON config, applies the requested
//! command and prints the strings the library returns.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use plastic_nn::{train_loop, Activation, Engine, EngineConfig, TrainConfig};

#[derive(Parser)]
#[command(name = "plastic-nn")]
#[command(about = "Feed-forward network with live topology edits", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON engine config; overrides the topology flags below
    #[arg(long)]
    config: Option<String>,

    /// Number of inputs
    #[arg(long, default_value = "2")]
    inputs: usize,

    /// Comma-separated hidden layer widths, e.g. "4,3"
    #[arg(long, default_value = "")]
    hidden: String,

    /// Number of outputs
    #[arg(long, default_value = "1")]
    outputs: usize,

    /// Activation kind recorded in the config
    #[arg(long, default_value = "sigmoid")]
    activation: String,

    /// Learning rate
    #[arg(long, default_value = "0.1")]
    learning_rate: f64,

    /// Seed for random initialisation; weights start at zero without it
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the network statistics
    Stats {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run one forward pass
    Predict {
        /// Comma-separated input values
        #[arg(long)]
        values: String,
    },

    /// Train repeatedly on a single sample
    Train {
        /// Comma-separated input values
        #[arg(long)]
        inputs: String,

        /// Comma-separated expected outputs
        #[arg(long)]
        expected: String,

        /// Number of training steps
        #[arg(long, default_value = "100")]
        steps: usize,
    },

    /// Train the XOR truth table (needs 2 inputs and 1 output)
    Xor {
        #[arg(long, default_value = "10000")]
        epochs: usize,
    },

    /// Apply structural edits in order, printing stats after each
    Edit {
        /// add-neuron=L, remove-neuron=L:N, add-layer=L:K, remove-layer=L;
        /// a trailing '!' on a layer edit skips back-adjustment
        #[arg(long = "op", required = true)]
        ops: Vec<Edit>,
    },
}

#[derive(Debug, Clone, Copy)]
enum Edit {
    AddNeuron(usize),
    RemoveNeuron(usize, usize),
    AddLayer(usize, usize, bool),
    RemoveLayer(usize, bool),
}

impl FromStr for Edit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, args) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected NAME=ARGS, got '{s}'"))?;
        let (args, back_adjust) = match args.strip_suffix('!') {
            Some(rest) => (rest, false),
            None => (args, true),
        };
        let nums: Vec<usize> = args
            .split(':')
            .map(|n| n.trim().parse::<usize>())
            .collect::<std::result::Result<_, _>>()
            .with_context(|| format!("bad indices in '{s}'"))?;

        match (name, nums.as_slice()) {
            ("add-neuron", [l]) => Ok(Edit::AddNeuron(*l)),
            ("remove-neuron", [l, n]) => Ok(Edit::RemoveNeuron(*l, *n)),
            ("add-layer", [l, k]) => Ok(Edit::AddLayer(*l, *k, back_adjust)),
            ("remove-layer", [l]) => Ok(Edit::RemoveLayer(*l, back_adjust)),
            _ => bail!("unknown edit '{s}'"),
        }
    }
}

fn parse_values(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .filter(|t| !t.trim().is_empty())
        .map(|t| t.trim().parse::<f64>().with_context(|| format!("'{t}' is not a number")))
        .collect()
}

fn parse_widths(text: &str) -> Result<Vec<usize>> {
    text.split(',')
        .filter(|t| !t.trim().is_empty())
        .map(|t| t.trim().parse::<usize>().with_context(|| format!("'{t}' is not a width")))
        .collect()
}

fn parse_activation(name: &str) -> Result<Activation> {
    serde_json::from_value(serde_json::Value::String(name.to_lowercase()))
        .with_context(|| format!("unknown activation '{name}'"))
}

fn engine_config(cli: &Cli) -> Result<EngineConfig> {
    if let Some(path) = &cli.config {
        return EngineConfig::load_json(path).with_context(|| format!("loading {path}"));
    }
    let widths = parse_widths(&cli.hidden)?;
    Ok(EngineConfig::new(cli.inputs, widths.len(), widths, cli.outputs)
        .with_activation(parse_activation(&cli.activation)?)
        .with_learning_rate(cli.learning_rate))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = engine_config(&cli)?;
    let mut engine = match cli.seed {
        Some(seed) => Engine::seeded(&config, seed)?,
        None => Engine::zeroed(&config)?,
    };

    match cli.command {
        Commands::Stats { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&engine.stats())?);
            } else {
                println!("{}", engine.stats());
            }
        }

        Commands::Predict { values } => {
            let outputs = engine.predict(&parse_values(&values)?)?;
            println!("{outputs:?}");
        }

        Commands::Train { inputs, expected, steps } => {
            let x = parse_values(&inputs)?;
            let y = parse_values(&expected)?;
            for step in 0..steps {
                let error = engine.train(&x, &y)?;
                if step % (steps / 10).max(1) == 0 {
                    println!("Step {step}: squared error = {error:.6}");
                }
            }
            println!("Output: {:?}", engine.predict(&x)?);
        }

        Commands::Xor { epochs } => {
            let inputs = vec![
                vec![0.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
            ];
            let expected = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];

            info!(epochs, sizes = ?engine.layer_sizes(), "training XOR");
            let loss = train_loop(&mut engine, &inputs, &expected, &TrainConfig::new(epochs))?;
            println!("Final loss: {loss:.6}");
            for input in &inputs {
                println!("Input: {:?} -> Output: {:.4}", input, engine.predict(input)?[0]);
            }
        }

        Commands::Edit { ops } => {
            println!("{}", engine.stats());
            for op in ops {
                let result = match op {
                    Edit::AddNeuron(l) => engine.add_neuron(l),
                    Edit::RemoveNeuron(l, n) => engine.remove_neuron(l, n),
                    Edit::AddLayer(l, k, back) => engine.add_layer(l, k, back),
                    Edit::RemoveLayer(l, back) => engine.remove_layer(l, back),
                };
                match result {
                    Ok(()) => println!("\n{op:?}\n{}", engine.stats()),
                    Err(e) => println!("\n{op:?} rejected: {e}"),
                }
            }
        }
    }

    Ok(())
}
