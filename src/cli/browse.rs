use crate::browser::ExpenseBrowser;
use crate::error::Result;
use crate::settings::Settings;

use super::open_session;

pub fn run(settings: &Settings) -> Result<()> {
    let session = open_session(settings)?;
    let mut browser = ExpenseBrowser::new(session, settings.currency_symbol.clone());
    browser.run()
}
