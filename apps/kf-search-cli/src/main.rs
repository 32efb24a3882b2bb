// crates.io
use clap::Parser;
// self
use kf_search_cli::Args;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	kf_search_cli::run(args)
}
