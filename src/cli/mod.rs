pub mod browse;
pub mod catalog;
pub mod expenses;
pub mod init;
pub mod list;
pub mod status;

use clap::{Parser, Subcommand, ValueEnum};

use crate::catalog::{find_color, find_icon, IconGroup};
use crate::db::{get_connection, init_db};
use crate::error::{Result, TallyError};
use crate::models::ExpenseType;
use crate::pipeline::{CategoryFilter, FilterSpec, SortOrder};
use crate::session::Session;
use crate::settings::Settings;
use crate::store::ExpenseStore;

/// Opens the configured database and wraps it in a session using the
/// default list settings.
pub(crate) fn open_session(settings: &Settings) -> Result<Session> {
    let db_path = settings.db_path();
    if !db_path.exists() {
        return Err(TallyError::Other(format!(
            "Database not found at {}. Run `tally init` to set up.",
            db_path.display()
        )));
    }
    let conn = get_connection(&db_path)?;
    init_db(&conn)?;
    let filter = FilterSpec {
        category: settings.category_filter(),
        minimum_cost: 0.0,
    };
    Ok(Session::new(ExpenseStore::new(conn), filter, settings.default_sort.into()))
}

/// Accepts a short icon name or a stored key; returns the stored key.
pub(crate) fn resolve_icon(input: &str) -> Result<String> {
    find_icon(input)
        .map(|i| i.key.to_string())
        .ok_or_else(|| TallyError::Other(format!("Unknown icon: {input}. Run `tally icons` to see choices.")))
}

pub(crate) fn resolve_color(input: &str) -> Result<String> {
    find_color(input)
        .map(|c| c.key.to_string())
        .ok_or_else(|| TallyError::Other(format!("Unknown color: {input}. Run `tally colors` to see choices.")))
}

#[derive(Parser)]
#[command(name = "tally", about = "Keep track of what you spend.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TypeFilter {
    All,
    Personal,
    Business,
    Other,
}

impl From<TypeFilter> for CategoryFilter {
    fn from(t: TypeFilter) -> Self {
        match t {
            TypeFilter::All => CategoryFilter::All,
            TypeFilter::Personal => CategoryFilter::Only(ExpenseType::Personal),
            TypeFilter::Business => CategoryFilter::Only(ExpenseType::Business),
            TypeFilter::Other => CategoryFilter::Only(ExpenseType::Other),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the database.
    Init {
        /// Path for tally data (default: ~/Documents/tally)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Record a new expense.
    Add {
        /// What the money went on
        name: String,
        /// Amount spent
        #[arg(long)]
        cost: f64,
        #[arg(long = "type", value_enum, default_value = "personal")]
        expense_type: ExpenseType,
        /// Icon name or key (see `tally icons`)
        #[arg(long, default_value = crate::catalog::DEFAULT_ICON)]
        icon: String,
        /// Color key (see `tally colors`)
        #[arg(long, default_value = crate::catalog::DEFAULT_COLOR)]
        color: String,
    },
    /// Change an existing expense.
    Edit {
        /// Expense ID (shown in `tally list`)
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        cost: Option<f64>,
        #[arg(long = "type", value_enum)]
        expense_type: Option<ExpenseType>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete an expense.
    Delete {
        /// Expense ID (shown in `tally list`)
        id: i64,
    },
    /// Show every field of one expense.
    Show {
        id: i64,
    },
    /// List expenses, filtered and sorted.
    List {
        /// Only show one type of expense
        #[arg(long = "type", value_enum)]
        expense_type: Option<TypeFilter>,
        /// Hide expenses cheaper than this
        #[arg(long = "min", default_value = "0")]
        minimum_cost: f64,
        /// Sort by name then cost, or cost then name
        #[arg(long, value_enum)]
        sort: Option<SortOrder>,
    },
    /// Interactively browse expenses.
    Browse,
    /// List the icons an expense can use.
    Icons {
        #[arg(long, value_enum)]
        group: Option<IconGroup>,
    },
    /// List the colors an expense can use.
    Colors,
    /// Show current database and summary statistics.
    Status,
}
