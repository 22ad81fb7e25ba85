use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use rs_markov_core::io::open_input;
use rs_markov_core::model::{Chain, Generator, RandomPicker, time_seed};
use rs_markov_core::{ChainError, Config};

/// Generates random text that reads like the text given on input.
#[derive(Parser, Debug)]
#[command(name = "markov", version, about)]
struct Cli {
	/// Maximum number of words to print [default: 100]
	#[arg(short, long)]
	words: Option<usize>,

	/// Prefix length in words [default: 2]
	#[arg(short, long)]
	prefix: Option<usize>,

	/// Seed for the random source (defaults to the current time)
	#[arg(short, long)]
	seed: Option<u64>,

	/// JSON file with `words`, `prefix` and `seed` entries
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Text to learn from (defaults to standard input)
	#[arg(short, long, value_name = "FILE")]
	input: Option<PathBuf>,

	/// More logging on stderr (-v: info, -vv: debug)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

impl Cli {
	/// Merges command line options over the config file over the defaults.
	fn resolve(&self) -> Result<Config, ChainError> {
		let mut config = match &self.config {
			Some(path) => Config::from_file(path)?,
			None => Config::default(),
		};

		if let Some(words) = self.words {
			config.words = words;
		}
		if let Some(prefix) = self.prefix {
			config.prefix = prefix;
		}
		if self.seed.is_some() {
			config.seed = self.seed;
		}

		config.validate()?;
		Ok(config)
	}

	fn log_level(&self) -> &'static str {
		match self.verbose {
			0 => "warn",
			1 => "info",
			_ => "debug",
		}
	}
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
	let config = cli.resolve()?;
	let seed = config.seed.unwrap_or_else(time_seed);
	info!("words={} prefix={} seed={}", config.words, config.prefix, seed);

	// Learn the whole input first
	let reader = open_input(cli.input.as_deref()).map_err(|e| match &cli.input {
		Some(path) => format!("cannot open {}: {e}", path.display()),
		None => format!("cannot open standard input: {e}"),
	})?;
	let mut chain = Chain::new(config.prefix)?;
	let tokens = chain.build(reader)?;
	info!("learned {} tokens, {} distinct prefixes", tokens, chain.len());

	// Then write the generated text
	let stdout = io::stdout();
	let mut out = stdout.lock();
	let written = Generator::new(&chain, RandomPicker::seeded(seed)).write_to(&mut out, config.words)?;
	writeln!(out).map_err(ChainError::Write)?;
	info!("wrote {} words ({:?})", written.words, written.stop);

	Ok(())
}

fn main() {
	let cli = Cli::parse();
	env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level())).init();

	if let Err(e) = run(&cli) {
		error!("{e}");
		process::exit(1);
	}
}
