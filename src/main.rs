#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "jsonshape", about = "Type-directed JSON decoding and checking")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Decode a data file against a schema type.
	Check(cmd::check::Args),
	/// Print resolved record tables of a schema.
	Describe(cmd::describe::Args),
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> jsonshape::shape::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Check(args) => cmd::check::run(args),
		Commands::Describe(args) => cmd::describe::run(args),
	}
}
