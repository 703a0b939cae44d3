use crate::catalog::{color_or_accent, find_icon};
use crate::error::{Result, TallyError};
use crate::fmt::{money, timestamp};
use crate::models::ExpenseType;
use crate::session::{Session, SubmitOutcome};
use crate::settings::Settings;

use super::{open_session, resolve_color, resolve_icon};

/// The form's save button stays disabled until the draft is valid.
fn ensure_submittable(session: &Session) -> Result<()> {
    if !session.can_submit() {
        return Err(TallyError::Validation(
            "an expense needs a name and a cost greater than zero".to_string(),
        ));
    }
    Ok(())
}

pub fn add(
    settings: &Settings,
    name: &str,
    cost: f64,
    expense_type: ExpenseType,
    icon: &str,
    color: &str,
) -> Result<()> {
    let icon = resolve_icon(icon)?;
    let color = resolve_color(color)?;

    let mut session = open_session(settings)?;
    let draft = session.start_create();
    draft.name = name.to_string();
    draft.cost = Some(cost);
    draft.category = expense_type;
    draft.icon = icon;
    draft.color = color;
    ensure_submittable(&session)?;

    match session.submit()? {
        SubmitOutcome::Saved(rec) => {
            println!(
                "Added expense #{}: {} ({}, {})",
                rec.id,
                rec.name,
                rec.category,
                money(rec.cost, &settings.currency_symbol)
            );
        }
        SubmitOutcome::Dismissed => println!("Nothing saved."),
    }
    Ok(())
}

pub struct EditArgs {
    pub name: Option<String>,
    pub cost: Option<f64>,
    pub expense_type: Option<ExpenseType>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cost.is_none()
            && self.expense_type.is_none()
            && self.icon.is_none()
            && self.color.is_none()
    }
}

pub fn edit(settings: &Settings, id: i64, args: EditArgs) -> Result<()> {
    if args.is_empty() {
        return Err(TallyError::Other(
            "Nothing to change. Pass at least one of --name, --cost, --type, --icon, --color.".to_string(),
        ));
    }
    let icon = args.icon.as_deref().map(resolve_icon).transpose()?;
    let color = args.color.as_deref().map(resolve_color).transpose()?;

    let mut session = open_session(settings)?;
    let draft = session.start_edit(id)?;
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(cost) = args.cost {
        draft.cost = Some(cost);
    }
    if let Some(t) = args.expense_type {
        draft.category = t;
    }
    if let Some(icon) = icon {
        draft.icon = icon;
    }
    if let Some(color) = color {
        draft.color = color;
    }
    if draft.changes().is_empty() {
        session.cancel();
        println!("Expense #{id} already matches; nothing to change.");
        return Ok(());
    }
    ensure_submittable(&session)?;

    match session.submit()? {
        SubmitOutcome::Saved(rec) => println!("Updated expense #{}: {}", rec.id, rec.name),
        SubmitOutcome::Dismissed => println!("Expense #{id} no longer exists; nothing saved."),
    }
    Ok(())
}

pub fn delete(settings: &Settings, id: i64) -> Result<()> {
    let mut session = open_session(settings)?;
    let name = session.store().get(id)?.name;
    if session.delete(id)? {
        println!("Deleted expense #{id}: {name}");
    } else {
        println!("Expense #{id} was already gone.");
    }
    Ok(())
}

pub fn show(settings: &Settings, id: i64) -> Result<()> {
    let session = open_session(settings)?;
    let rec = session.store().get(id)?;
    let icon_name = find_icon(&rec.icon).map(|i| i.name).unwrap_or("?");
    let color = color_or_accent(&rec.color);

    println!("ID:         {}", rec.id);
    println!("Name:       {}", rec.name);
    println!("Type:       {}", rec.category);
    println!("Cost:       {}", money(rec.cost, &settings.currency_symbol));
    println!("Icon:       {} ({})", icon_name, rec.icon);
    println!("Color:      {}", color.display_name);
    println!("Created:    {}", timestamp(&rec.created_at));
    println!("Modified:   {}", timestamp(&rec.last_modified));
    Ok(())
}
