use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::settings::Settings;

use super::open_session;

pub fn run(settings: &Settings) -> Result<()> {
    let db_path = settings.db_path();

    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let session = open_session(settings)?;
        let records = session.store().all()?;
        let total: f64 = records.iter().map(|r| r.cost).sum();

        println!();
        println!("Expenses:   {}", records.len());
        println!("Total:      {}", money(total, &settings.currency_symbol));
        println!("Sort:       {}", session.list().sort());
        println!("Filter:     {}", session.list().filter().category);
    } else {
        println!();
        println!("Database not found. Run `tally init` to set up.");
    }

    Ok(())
}
