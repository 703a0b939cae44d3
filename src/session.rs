use std::cell::Cell;
use std::rc::Rc;

use crate::error::{Result, TallyError};
use crate::form::Draft;
use crate::models::ExpenseRecord;
use crate::pipeline::{project, ExpenseView, FilterSpec, SortKey};
use crate::store::{ExpenseStore, StoreChange};

/// Cached projection of the store. Recomputed when the filter or sort
/// changes, or when the store revision has moved since the last read.
pub struct ExpenseList {
    filter: FilterSpec,
    sort: SortKey,
    view: ExpenseView,
    seen_revision: Option<u64>,
}

impl ExpenseList {
    pub fn new(filter: FilterSpec, sort: SortKey) -> Self {
        Self {
            filter,
            sort,
            view: ExpenseView::default(),
            seen_revision: None,
        }
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        if filter != self.filter {
            self.filter = filter;
            self.seen_revision = None;
        }
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        if sort != self.sort {
            self.sort = sort;
            self.seen_revision = None;
        }
    }

    pub fn is_stale(&self, store: &ExpenseStore) -> bool {
        self.seen_revision != Some(store.revision())
    }

    pub fn refresh(&mut self, store: &ExpenseStore) -> Result<&ExpenseView> {
        if self.is_stale(store) {
            let records = store.all()?;
            self.view = project(&records, &self.filter, &self.sort);
            self.seen_revision = Some(store.revision());
            tracing::trace!(count = self.view.count, "recomputed expense view");
        }
        Ok(&self.view)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved(ExpenseRecord),
    /// The record being edited no longer exists; the form was closed.
    Dismissed,
}

/// The intents a front end issues: list controls, the add/edit form, and
/// deletion. Holds at most one open form.
pub struct Session {
    store: ExpenseStore,
    list: ExpenseList,
    form: Option<Draft>,
    last_change: Rc<Cell<Option<StoreChange>>>,
}

impl Session {
    pub fn new(mut store: ExpenseStore, filter: FilterSpec, sort: SortKey) -> Self {
        let last_change = Rc::new(Cell::new(None));
        let sink = Rc::clone(&last_change);
        store.subscribe(move |change| sink.set(Some(*change)));
        Self {
            store,
            list: ExpenseList::new(filter, sort),
            form: None,
            last_change,
        }
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn list(&self) -> &ExpenseList {
        &self.list
    }

    /// Most recent successful mutation, if any.
    pub fn last_change(&self) -> Option<StoreChange> {
        self.last_change.get()
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.list.set_filter(filter);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.list.set_sort(sort);
    }

    pub fn rows(&mut self) -> Result<&ExpenseView> {
        self.list.refresh(&self.store)
    }

    pub fn start_create(&mut self) -> &mut Draft {
        self.form.insert(Draft::start_create())
    }

    pub fn start_edit(&mut self, id: i64) -> Result<&mut Draft> {
        let record = self.store.get(id)?;
        Ok(self.form.insert(Draft::start_edit(&record)))
    }

    /// Whether a save control should be enabled for the open form.
    pub fn can_submit(&self) -> bool {
        self.form.as_ref().is_some_and(Draft::is_valid)
    }

    /// Commits the open form. A validation failure leaves the form open; a
    /// vanished edit target closes it without saving.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let Some(draft) = self.form.as_ref() else {
            return Err(TallyError::Other("no form is open".to_string()));
        };
        match draft.commit(&mut self.store) {
            Ok(record) => {
                self.form = None;
                Ok(SubmitOutcome::Saved(record))
            }
            Err(TallyError::NotFound(id)) => {
                tracing::warn!(id, "expense disappeared while editing; closing form");
                self.form = None;
                Ok(SubmitOutcome::Dismissed)
            }
            Err(e) => Err(e),
        }
    }

    pub fn cancel(&mut self) {
        self.form = None;
    }

    /// Returns `false` when there was nothing to delete.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        match self.store.delete(id) {
            Ok(()) => Ok(true),
            Err(TallyError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
