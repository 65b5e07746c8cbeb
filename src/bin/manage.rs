//! Polls project management utility.
//!
//! The equivalent of Django's `manage.py` for URL inspection.
//!
//! ```bash
//! manage show-urls
//! manage resolve /polls/5/vote/
//! manage reverse polls:detail question_id=5
//! ```

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use polls_site::commands::{self, CommandError};
use polls_site::config::{settings::load_settings, urls::root_urlconf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "manage")]
#[command(about = "Polls project URL management", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbosity: u8,

	/// Settings file (overrides POLLS_SETTINGS)
	#[arg(long, value_name = "FILE", global = true)]
	settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
	/// List every route with its name
	ShowUrls,

	/// Resolve a request path and render the matched view
	Resolve {
		/// Request path, e.g. /polls/5/vote/
		#[arg(value_name = "PATH")]
		path: String,
	},

	/// Build a URL from a route name
	Reverse {
		/// Route name, e.g. polls:detail
		#[arg(value_name = "NAME")]
		name: String,

		/// Parameters as KEY=VALUE
		#[arg(value_name = "KEY=VALUE")]
		params: Vec<String>,
	},
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
	let default_level = match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(default_level))
		.map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(std::io::stderr).with_target(true))
		.with(filter)
		.init();

	Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
	let settings = load_settings(cli.settings.as_deref()).context("failed to load settings")?;
	let urlconf = root_urlconf(settings).context("failed to build URL configuration")?;

	match cli.command {
		Commands::ShowUrls => {
			for line in commands::show_urls(&urlconf) {
				println!("{}", line);
			}
		}
		Commands::Resolve { path } => {
			let resolved = commands::resolve(&urlconf, &path)?;
			println!("{}", resolved);
		}
		Commands::Reverse { name, params } => {
			println!("{}", commands::reverse(&urlconf, &name, &params)?);
		}
	}
	Ok(())
}

fn main() {
	let cli = Cli::parse();

	if let Err(e) = init_logging(cli.verbosity) {
		eprintln!("Error: {:#}", e);
		process::exit(2);
	}

	if let Err(e) = run(cli) {
		eprintln!("Error: {:#}", e);
		let not_found = e
			.downcast_ref::<CommandError>()
			.is_some_and(CommandError::is_not_found);
		process::exit(if not_found { 1 } else { 2 });
	}
}
