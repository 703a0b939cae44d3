use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, TallyError};
use crate::models::{validate_fields, ExpensePatch, ExpenseRecord, NewExpense};

/// What a successful mutation did, handed to every observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Inserted(i64),
    Updated(i64),
    Deleted(i64),
}

type Observer = Box<dyn FnMut(&StoreChange)>;

/// Owns the expenses table. Mutations are validated before anything is
/// written, bump `revision`, and notify observers synchronously.
pub struct ExpenseStore {
    conn: Connection,
    revision: u64,
    observers: Vec<Observer>,
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, category, cost, created_at, last_modified, icon, color FROM expenses";

struct RawRow {
    id: i64,
    name: String,
    category: String,
    cost: f64,
    created_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
    icon: String,
    color: String,
}

impl RawRow {
    fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawRow {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            cost: row.get(3)?,
            created_at: row.get(4)?,
            last_modified: row.get(5)?,
            icon: row.get(6)?,
            color: row.get(7)?,
        })
    }

    fn into_record(self) -> Result<ExpenseRecord> {
        Ok(ExpenseRecord {
            id: self.id,
            name: self.name,
            category: self.category.parse()?,
            cost: self.cost,
            created_at: self.created_at,
            last_modified: self.last_modified,
            icon: self.icon,
            color: self.color,
        })
    }
}

impl ExpenseStore {
    /// Wraps a connection whose schema has already been initialised.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            revision: 0,
            observers: Vec::new(),
        }
    }

    /// Incremented once per successful insert, update, or delete.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&StoreChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn insert(&mut self, draft: NewExpense) -> Result<ExpenseRecord> {
        validate_fields(&draft.name, draft.cost)?;
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO expenses (name, category, cost, created_at, last_modified, icon, color) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![draft.name, draft.category.as_str(), draft.cost, now, now, draft.icon, draft.color],
        )?;
        let record = ExpenseRecord {
            id: self.conn.last_insert_rowid(),
            name: draft.name,
            category: draft.category,
            cost: draft.cost,
            created_at: now,
            last_modified: now,
            icon: draft.icon,
            color: draft.color,
        };
        tracing::debug!(id = record.id, name = %record.name, cost = record.cost, "inserted expense");
        self.notify(StoreChange::Inserted(record.id));
        Ok(record)
    }

    pub fn update(&mut self, id: i64, patch: ExpensePatch) -> Result<ExpenseRecord> {
        let current = self.get(id)?;
        if patch.is_empty() {
            tracing::debug!(id, "no field changes; refreshing last_modified only");
        }

        let mut next = current.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(category) = patch.category {
            next.category = category;
        }
        if let Some(cost) = patch.cost {
            next.cost = cost;
        }
        if let Some(icon) = patch.icon {
            next.icon = icon;
        }
        if let Some(color) = patch.color {
            next.color = color;
        }
        validate_fields(&next.name, next.cost)?;
        // Clock can step backwards; the stored value must not.
        next.last_modified = Utc::now().max(current.last_modified);

        let changed = self.conn.execute(
            "UPDATE expenses SET name = ?1, category = ?2, cost = ?3, last_modified = ?4, icon = ?5, color = ?6 \
             WHERE id = ?7",
            params![
                next.name,
                next.category.as_str(),
                next.cost,
                next.last_modified,
                next.icon,
                next.color,
                id
            ],
        )?;
        if changed == 0 {
            return Err(TallyError::NotFound(id));
        }
        tracing::debug!(id, "updated expense");
        self.notify(StoreChange::Updated(id));
        Ok(next)
    }

    /// Removing an id that is not stored is an error, same as `update`.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let changed = self.conn.execute("DELETE FROM expenses WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(TallyError::NotFound(id));
        }
        tracing::debug!(id, "deleted expense");
        self.notify(StoreChange::Deleted(id));
        Ok(())
    }

    pub fn get(&self, id: i64) -> Result<ExpenseRecord> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let raw = self
            .conn
            .query_row(&sql, [id], RawRow::read)
            .optional()?
            .ok_or(TallyError::NotFound(id))?;
        raw.into_record()
    }

    /// Snapshot of every stored record, ordered by id.
    pub fn all(&self) -> Result<Vec<ExpenseRecord>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let raw: Vec<RawRow> = stmt
            .query_map([], RawRow::read)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        raw.into_iter().map(RawRow::into_record).collect()
    }

    pub fn count(&self) -> Result<i64> {
        let n = self.conn.query_row("SELECT count(*) FROM expenses", [], |r| r.get(0))?;
        Ok(n)
    }

    fn notify(&mut self, change: StoreChange) {
        self.revision += 1;
        for observer in self.observers.iter_mut() {
            observer(&change);
        }
    }
}
