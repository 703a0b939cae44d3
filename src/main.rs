mod browser;
mod catalog;
mod cli;
mod db;
mod error;
mod fmt;
mod form;
mod models;
mod pipeline;
mod session;
mod settings;
mod store;
mod tui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("tally={default_level}")))
        .unwrap_or_else(|_| EnvFilter::new("tally=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let settings = settings::load_settings();
    init_logging(&settings.log_level);

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(settings, data_dir),
        Commands::Add {
            name,
            cost,
            expense_type,
            icon,
            color,
        } => cli::expenses::add(&settings, &name, cost, expense_type, &icon, &color),
        Commands::Edit {
            id,
            name,
            cost,
            expense_type,
            icon,
            color,
        } => cli::expenses::edit(
            &settings,
            id,
            cli::expenses::EditArgs {
                name,
                cost,
                expense_type,
                icon,
                color,
            },
        ),
        Commands::Delete { id } => cli::expenses::delete(&settings, id),
        Commands::Show { id } => cli::expenses::show(&settings, id),
        Commands::List {
            expense_type,
            minimum_cost,
            sort,
        } => cli::list::run(&settings, expense_type.map(Into::into), minimum_cost, sort),
        Commands::Browse => cli::browse::run(&settings),
        Commands::Icons { group } => cli::catalog::icons(group),
        Commands::Colors => cli::catalog::colors(),
        Commands::Status => cli::status::run(&settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
