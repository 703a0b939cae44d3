use crate::catalog::{DEFAULT_COLOR, DEFAULT_ICON};
use crate::error::{Result, TallyError};
use crate::models::{ExpensePatch, ExpenseRecord, ExpenseType, NewExpense};
use crate::store::ExpenseStore;

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    /// Holds the record as it was when editing started.
    Edit(ExpenseRecord),
}

/// Editable copy of an expense's fields. Nothing reaches the store until
/// `commit`.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub mode: FormMode,
    pub name: String,
    pub category: ExpenseType,
    pub cost: Option<f64>,
    pub icon: String,
    pub color: String,
}

impl Draft {
    pub fn start_create() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            category: ExpenseType::Personal,
            cost: None,
            icon: DEFAULT_ICON.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn start_edit(record: &ExpenseRecord) -> Self {
        Self {
            mode: FormMode::Edit(record.clone()),
            name: record.name.clone(),
            category: record.category,
            cost: Some(record.cost),
            icon: record.icon.clone(),
            color: record.color.clone(),
        }
    }

    /// Same rule the store enforces; the form disables saving while false.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.cost.is_some_and(|c| c.is_finite() && c > 0.0)
    }

    /// Fields that differ from the record the edit started from.
    pub fn changes(&self) -> ExpensePatch {
        let FormMode::Edit(original) = &self.mode else {
            return ExpensePatch::default();
        };
        ExpensePatch {
            name: (self.name != original.name).then(|| self.name.clone()),
            category: (self.category != original.category).then_some(self.category),
            cost: self.cost.filter(|c| *c != original.cost),
            icon: (self.icon != original.icon).then(|| self.icon.clone()),
            color: (self.color != original.color).then(|| self.color.clone()),
        }
    }

    pub fn commit(&self, store: &mut ExpenseStore) -> Result<ExpenseRecord> {
        let cost = self
            .cost
            .ok_or_else(|| TallyError::Validation("cost is required".to_string()))?;
        match &self.mode {
            FormMode::Create => store.insert(NewExpense {
                name: self.name.clone(),
                category: self.category,
                cost,
                icon: self.icon.clone(),
                color: self.color.clone(),
            }),
            FormMode::Edit(original) => store.update(original.id, self.changes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{new_expense, test_store};

    #[test]
    fn test_start_create_defaults() {
        let d = Draft::start_create();
        assert_eq!(d.mode, FormMode::Create);
        assert!(d.name.is_empty());
        assert_eq!(d.cost, None);
        assert_eq!(d.category, ExpenseType::Personal);
        assert_eq!(d.icon, "bag.fill");
        assert_eq!(d.color, "accent");
        assert!(!d.is_valid());
    }

    #[test]
    fn test_is_valid_needs_name_and_positive_cost() {
        let mut d = Draft::start_create();
        d.name = "Coffee".to_string();
        assert!(!d.is_valid());
        d.cost = Some(0.0);
        assert!(!d.is_valid());
        d.cost = Some(-2.0);
        assert!(!d.is_valid());
        d.cost = Some(2.5);
        assert!(d.is_valid());
        d.name.clear();
        assert!(!d.is_valid());
    }

    #[test]
    fn test_commit_create_inserts() {
        let (_dir, mut store) = test_store();
        let mut d = Draft::start_create();
        d.name = "Train".to_string();
        d.cost = Some(14.0);
        d.category = ExpenseType::Business;
        let rec = d.commit(&mut store).unwrap();
        assert_eq!(rec.name, "Train");
        assert_eq!(rec.category, ExpenseType::Business);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_commit_without_cost_is_validation_error() {
        let (_dir, mut store) = test_store();
        let mut d = Draft::start_create();
        d.name = "Train".to_string();
        assert!(matches!(d.commit(&mut store), Err(TallyError::Validation(_))));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_edit_draft_is_a_copy() {
        let (_dir, mut store) = test_store();
        let rec = store.insert(new_expense("Lunch", ExpenseType::Personal, 9.0)).unwrap();
        let mut d = Draft::start_edit(&rec);
        d.name = "Dinner".to_string();
        assert_eq!(store.get(rec.id).unwrap().name, "Lunch");
        assert!(matches!(d.mode, FormMode::Edit(ref r) if r.id == rec.id));
    }

    #[test]
    fn test_edit_patch_holds_only_changed_fields() {
        let (_dir, mut store) = test_store();
        let rec = store.insert(new_expense("Lunch", ExpenseType::Personal, 9.0)).unwrap();
        let mut d = Draft::start_edit(&rec);
        d.cost = Some(11.0);
        d.color = "mint".to_string();
        let patch = d.changes();
        assert_eq!(patch.cost, Some(11.0));
        assert_eq!(patch.color.as_deref(), Some("mint"));
        assert!(patch.name.is_none());
        assert!(patch.category.is_none());
        assert!(patch.icon.is_none());

        let updated = d.commit(&mut store).unwrap();
        assert_eq!(updated.cost, 11.0);
        assert_eq!(updated.color, "mint");
        assert_eq!(updated.name, "Lunch");
        assert_eq!(updated.created_at, rec.created_at);
    }

    #[test]
    fn test_commit_edit_of_deleted_record_is_not_found() {
        let (_dir, mut store) = test_store();
        let rec = store.insert(new_expense("Lunch", ExpenseType::Personal, 9.0)).unwrap();
        let mut d = Draft::start_edit(&rec);
        d.cost = Some(10.0);
        store.delete(rec.id).unwrap();
        assert!(matches!(d.commit(&mut store), Err(TallyError::NotFound(id)) if id == rec.id));
    }

    #[test]
    fn test_commit_edit_with_empty_name_is_rejected() {
        let (_dir, mut store) = test_store();
        let rec = store.insert(new_expense("Lunch", ExpenseType::Personal, 9.0)).unwrap();
        let mut d = Draft::start_edit(&rec);
        d.name.clear();
        assert!(matches!(d.commit(&mut store), Err(TallyError::Validation(_))));
        assert_eq!(store.get(rec.id).unwrap(), rec);
    }
}
