//! `transip-token` command-line entry point.

// crates.io
use clap::Parser;
use color_eyre::Result;
// self
use transip_token::cli::{self, Args};

fn main() -> Result<()> {
	color_eyre::install()?;
	cli::init_tracing();

	let args = Args::parse();

	println!("{}", args.run()?);

	Ok(())
}
