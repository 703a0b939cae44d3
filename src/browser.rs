use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    DefaultTerminal, Frame,
};

use crate::catalog::{color_or_accent, find_icon};
use crate::error::Result;
use crate::fmt::money;
use crate::models::ExpenseType;
use crate::pipeline::FilterSpec;
use crate::session::{Session, SubmitOutcome};
use crate::store::StoreChange;
use crate::tui::{self, COST_STYLE, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq)]
enum BrowseMode {
    Normal,
    ConfirmDelete(i64),
    EditName { id: i64, input: String },
    EditCost { id: i64, input: String },
    EditType { id: i64, selection: usize },
    MinimumCost(String),
}

#[derive(Debug, PartialEq)]
pub enum BrowseAction {
    Continue,
    Close,
    CycleType,
    ToggleSort,
    Delete(i64),
    CommitEdit(i64),
    SetMinimum(f64),
}

/// Scrollable view over a session's filtered and sorted expenses.
pub struct ExpenseBrowser {
    session: Session,
    currency_symbol: String,
    offset: usize,
    selected: usize,
    /// Rows that fit on screen at the last draw; wrapped names take more
    /// than one line, so this can be less than `PAGE_SIZE`.
    visible_count: usize,
    mode: BrowseMode,
    status_message: Option<String>,
    table_state: TableState,
    pending_name: Option<String>,
    pending_cost: Option<f64>,
    pending_type: Option<ExpenseType>,
}

impl ExpenseBrowser {
    pub fn new(session: Session, currency_symbol: String) -> Self {
        Self {
            session,
            currency_symbol,
            offset: 0,
            selected: 0,
            visible_count: PAGE_SIZE,
            mode: BrowseMode::Normal,
            status_message: None,
            table_state: TableState::default(),
            pending_name: None,
            pending_cost: None,
            pending_type: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        if self.session.store().count()? == 0 {
            println!("No expenses yet. Add one with `tally add`.");
            return Ok(());
        }

        let mut terminal = tui::init_terminal();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        result
    }

    fn row_count(&mut self) -> usize {
        self.session.rows().map(|v| v.count).unwrap_or(0)
    }

    fn selected_id(&mut self) -> Option<i64> {
        let idx = self.offset + self.selected;
        self.session
            .rows()
            .ok()
            .and_then(|v| v.rows.get(idx))
            .map(|r| r.id)
    }

    pub fn draw_frame(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let areas = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Fill(1),   // table
            Constraint::Length(1), // status
            Constraint::Length(1), // keys / prompt
        ])
        .split(area);
        let (title_area, table_area, status_area, keys_area) = (areas[0], areas[1], areas[2], areas[3]);

        frame.render_widget(Paragraph::new("Expenses").style(HEADER_STYLE), title_area);

        let fixed_cols: u16 = 2 + 6 + 10 + 12 + 16;
        let name_width = table_area.width.saturating_sub(fixed_cols + 5) as usize;
        let name_width = name_width.max(10);
        let available_height = table_area.height.saturating_sub(2) as usize;

        let symbol = self.currency_symbol.clone();
        let filter = *self.session.list().filter();
        let sort = self.session.list().sort();
        let (count, total, rendered_rows) = match self.session.rows() {
            Ok(view) => {
                let mut rendered = Vec::new();
                let mut used = 0usize;
                for rec in view.rows.iter().skip(self.offset).take(PAGE_SIZE) {
                    let (wrapped, lines) = tui::wrap_text(&rec.name, name_width);
                    if used + lines as usize > available_height && !rendered.is_empty() {
                        break;
                    }
                    used += lines as usize;
                    let (r, g, b) = color_or_accent(&rec.color).rgb;
                    let icon = find_icon(&rec.icon).map(|i| i.name).unwrap_or("");
                    rendered.push(
                        Row::new(vec![
                            Cell::from(Span::styled(
                                "\u{25cf}",
                                Style::new().fg(ratatui::style::Color::Rgb(r, g, b)),
                            )),
                            Cell::from(rec.id.to_string()),
                            Cell::from(wrapped),
                            Cell::from(rec.category.as_str()),
                            Cell::from(Span::styled(money(rec.cost, &symbol), COST_STYLE)),
                            Cell::from(icon),
                        ])
                        .height(lines),
                    );
                }
                (view.count, view.total, rendered)
            }
            Err(e) => {
                self.status_message = Some(format!("Load failed: {e}"));
                (0, 0.0, Vec::new())
            }
        };

        // Keep the cursor on a row that was actually drawn.
        if !rendered_rows.is_empty() {
            self.visible_count = rendered_rows.len();
            self.selected = self.selected.min(self.visible_count - 1);
        }

        let widths = [
            Constraint::Length(2),
            Constraint::Length(6),
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(16),
        ];
        let header = Row::new(vec!["", "ID", "Name", "Type", "Cost", "Icon"])
            .style(HEADER_STYLE)
            .bottom_margin(1);
        let table = Table::new(rendered_rows, widths)
            .header(header)
            .row_highlight_style(SELECTED_STYLE);
        self.table_state.select(Some(self.selected));
        frame.render_stateful_widget(table, table_area, &mut self.table_state);

        let status = match (&self.mode, &self.status_message) {
            (BrowseMode::ConfirmDelete(id), _) => format!("Delete expense #{id}? (y/n)"),
            (_, Some(msg)) => msg.clone(),
            _ => format!(
                "{count} expenses | total {} | type: {} | sort: {sort}{}",
                money(total, &symbol),
                filter.category,
                if filter.minimum_cost > 0.0 {
                    format!(" | min: {}", money(filter.minimum_cost, &symbol))
                } else {
                    String::new()
                }
            ),
        };
        frame.render_widget(Paragraph::new(status), status_area);

        let keys_widget = match &self.mode {
            BrowseMode::Normal | BrowseMode::ConfirmDelete(_) => Paragraph::new(Line::from(vec![
                Span::styled(
                    "j/k move  n/p page  e edit  t type  m minimum  s sort  d delete  q quit",
                    FOOTER_STYLE,
                ),
            ])),
            BrowseMode::EditName { id, input } => Paragraph::new(format!(
                "#{id} name (Enter to keep): {input}\u{2588}"
            )),
            BrowseMode::EditCost { id, input } => Paragraph::new(format!(
                "#{id} cost (Enter to keep): {input}\u{2588}"
            )),
            BrowseMode::EditType { id, selection } => {
                let mut spans = vec![Span::raw(format!("#{id} type: "))];
                for (i, t) in ExpenseType::ALL.iter().enumerate() {
                    let label = format!(" {t} ");
                    if i == *selection {
                        spans.push(Span::styled(label, SELECTED_STYLE));
                    } else {
                        spans.push(Span::raw(label));
                    }
                }
                spans.push(Span::styled("  \u{2190}/\u{2192} choose, Enter save, Esc cancel", FOOTER_STYLE));
                Paragraph::new(Line::from(spans))
            }
            BrowseMode::MinimumCost(input) => Paragraph::new(format!(
                "Minimum cost (empty for none): {input}\u{2588}"
            )),
        };
        frame.render_widget(keys_widget, keys_area);
    }

    pub fn handle_key_event(&mut self, code: KeyCode) -> BrowseAction {
        match self.mode {
            BrowseMode::Normal => self.handle_normal_key(code),
            BrowseMode::ConfirmDelete(id) => {
                self.mode = BrowseMode::Normal;
                if matches!(code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                    return BrowseAction::Delete(id);
                }
                self.status_message = Some("Delete cancelled".to_string());
                BrowseAction::Continue
            }
            BrowseMode::EditType { .. } => self.handle_edit_type_key(code),
            BrowseMode::EditName { .. } | BrowseMode::EditCost { .. } | BrowseMode::MinimumCost(_) => {
                self.handle_input_key(code)
            }
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> BrowseAction {
        self.status_message = None;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return BrowseAction::Close,
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::PageDown | KeyCode::Char('n') => self.page_down(),
            KeyCode::PageUp | KeyCode::Char('p') => self.page_up(),
            KeyCode::Char('t') => return BrowseAction::CycleType,
            KeyCode::Char('s') => return BrowseAction::ToggleSort,
            KeyCode::Char('m') => self.mode = BrowseMode::MinimumCost(String::new()),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    self.clear_pending();
                    self.mode = BrowseMode::EditName { id, input: String::new() };
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    self.mode = BrowseMode::ConfirmDelete(id);
                }
            }
            _ => {}
        }
        BrowseAction::Continue
    }

    fn input_mut(&mut self) -> Option<&mut String> {
        match &mut self.mode {
            BrowseMode::EditName { input, .. }
            | BrowseMode::EditCost { input, .. }
            | BrowseMode::MinimumCost(input) => Some(input),
            _ => None,
        }
    }

    fn handle_input_key(&mut self, code: KeyCode) -> BrowseAction {
        match code {
            KeyCode::Char(c) => {
                if let Some(input) = self.input_mut() {
                    input.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = self.input_mut() {
                    input.pop();
                }
            }
            KeyCode::Enter => return self.submit_input(),
            KeyCode::Esc => {
                self.mode = BrowseMode::Normal;
                self.clear_pending();
            }
            _ => {}
        }
        BrowseAction::Continue
    }

    fn submit_input(&mut self) -> BrowseAction {
        match std::mem::replace(&mut self.mode, BrowseMode::Normal) {
            BrowseMode::EditName { id, input } => {
                self.pending_name = (!input.is_empty()).then_some(input);
                self.mode = BrowseMode::EditCost { id, input: String::new() };
            }
            BrowseMode::EditCost { id, input } => {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    self.pending_cost = None;
                } else if let Ok(cost) = trimmed.parse::<f64>() {
                    self.pending_cost = Some(cost);
                } else {
                    self.status_message = Some(format!("Not a number: {trimmed}"));
                    self.mode = BrowseMode::EditCost { id, input };
                    return BrowseAction::Continue;
                }
                let current = self.session.store().get(id).map(|r| r.category).ok();
                let selection = ExpenseType::ALL
                    .iter()
                    .position(|t| Some(*t) == current)
                    .unwrap_or(0);
                self.mode = BrowseMode::EditType { id, selection };
            }
            BrowseMode::MinimumCost(input) => {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    return BrowseAction::SetMinimum(0.0);
                }
                match trimmed.parse::<f64>() {
                    Ok(minimum) => return BrowseAction::SetMinimum(minimum),
                    Err(_) => self.status_message = Some(format!("Not a number: {trimmed}")),
                }
            }
            other => self.mode = other,
        }
        BrowseAction::Continue
    }

    fn handle_edit_type_key(&mut self, code: KeyCode) -> BrowseAction {
        let BrowseMode::EditType { id, selection } = self.mode else {
            return BrowseAction::Continue;
        };
        let n = ExpenseType::ALL.len();
        match code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                self.mode = BrowseMode::EditType { id, selection: (selection + n - 1) % n };
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Tab | KeyCode::Char('l') | KeyCode::Char('j') => {
                self.mode = BrowseMode::EditType { id, selection: (selection + 1) % n };
            }
            KeyCode::Enter => {
                self.pending_type = Some(ExpenseType::ALL[selection]);
                self.mode = BrowseMode::Normal;
                return BrowseAction::CommitEdit(id);
            }
            KeyCode::Esc => {
                self.mode = BrowseMode::Normal;
                self.clear_pending();
            }
            _ => {}
        }
        BrowseAction::Continue
    }

    fn clear_pending(&mut self) {
        self.pending_name = None;
        self.pending_cost = None;
        self.pending_type = None;
    }

    /// Carry out an action that touches the session.
    pub fn apply(&mut self, action: BrowseAction) -> Result<()> {
        match action {
            BrowseAction::CycleType => {
                let current = *self.session.list().filter();
                let next = FilterSpec {
                    category: current.category.next(),
                    ..current
                };
                self.session.set_filter(next);
                self.reset_position();
            }
            BrowseAction::SetMinimum(minimum) => {
                let current = *self.session.list().filter();
                self.session.set_filter(FilterSpec::new(current.category, minimum)?);
                self.reset_position();
            }
            BrowseAction::ToggleSort => {
                let next = self.session.list().sort().toggled();
                self.session.set_sort(next);
                self.reset_position();
            }
            BrowseAction::CommitEdit(id) => self.commit_edit(id)?,
            BrowseAction::Delete(id) => {
                if self.session.delete(id)? {
                    if let Some(StoreChange::Deleted(gone)) = self.session.last_change() {
                        self.status_message = Some(format!("Deleted expense #{gone}"));
                    }
                } else {
                    self.status_message = Some(format!("Expense #{id} was already gone"));
                }
                self.clamp_position();
            }
            BrowseAction::Continue | BrowseAction::Close => {}
        }
        Ok(())
    }

    /// Open a draft for `id`, apply the pending fields, and save it through
    /// the session.
    pub fn commit_edit(&mut self, id: i64) -> Result<()> {
        let name = self.pending_name.take();
        let cost = self.pending_cost.take();
        let category = self.pending_type.take();

        let draft = self.session.start_edit(id)?;
        if let Some(name) = name {
            draft.name = name;
        }
        if let Some(cost) = cost {
            draft.cost = Some(cost);
        }
        if let Some(category) = category {
            draft.category = category;
        }
        if draft.changes().is_empty() {
            self.session.cancel();
            self.status_message = Some(format!("Expense #{id} unchanged"));
            return Ok(());
        }
        if !self.session.can_submit() {
            self.session.cancel();
            self.status_message = Some("Not saved: cost must be greater than zero".to_string());
            return Ok(());
        }

        match self.session.submit() {
            Ok(SubmitOutcome::Saved(rec)) => {
                self.status_message = Some(format!("Updated expense #{}: {}", rec.id, rec.name));
            }
            Ok(SubmitOutcome::Dismissed) => {
                self.status_message = Some(format!("Expense #{id} no longer exists"));
            }
            Err(e) => {
                self.session.cancel();
                return Err(e);
            }
        }
        self.clamp_position();
        Ok(())
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw_frame(frame))?;

            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) = event::read()?
            {
                if kind != KeyEventKind::Press {
                    continue;
                }
                if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                    break;
                }
                match self.handle_key_event(code) {
                    BrowseAction::Close => break,
                    action => {
                        if let Err(e) = self.apply(action) {
                            self.status_message = Some(format!("Action failed: {e}"));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn reset_position(&mut self) {
        self.offset = 0;
        self.selected = 0;
    }

    fn clamp_position(&mut self) {
        let len = self.row_count();
        if len == 0 {
            self.reset_position();
            return;
        }
        let step = self.visible_count.max(1);
        if self.offset >= len {
            self.offset = (len - 1) / step * step;
        }
        let on_page = (len - self.offset).min(step);
        self.selected = self.selected.min(on_page - 1);
    }

    fn move_down(&mut self) {
        let len = self.row_count();
        if self.offset + self.selected + 1 >= len {
            return;
        }
        if self.selected + 1 < self.visible_count {
            self.selected += 1;
        } else {
            self.offset += self.visible_count.max(1);
            self.selected = 0;
        }
    }

    fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else if self.offset > 0 {
            let step = self.visible_count.max(1);
            self.offset = self.offset.saturating_sub(step);
            self.selected = step - 1;
        }
    }

    fn page_down(&mut self) {
        let new_offset = self.offset + self.visible_count.max(1);
        if new_offset < self.row_count() {
            self.offset = new_offset;
            self.selected = 0;
        }
    }

    fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.visible_count.max(1));
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::error::TallyError;
    use crate::pipeline::{CategoryFilter, SortKey};
    use crate::store::tests::{new_expense, test_store};

    fn browser_with(n: usize) -> (tempfile::TempDir, ExpenseBrowser) {
        let (dir, mut store) = test_store();
        for i in 0..n {
            let category = if i % 2 == 0 { ExpenseType::Personal } else { ExpenseType::Business };
            store
                .insert(new_expense(&format!("Expense {:03}", i + 1), category, (n - i) as f64))
                .unwrap();
        }
        let session = Session::new(store, FilterSpec::default(), SortKey::BY_NAME);
        (dir, ExpenseBrowser::new(session, "$".to_string()))
    }

    fn type_text(b: &mut ExpenseBrowser, text: &str) {
        for c in text.chars() {
            b.handle_key_event(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_move_down_crosses_page() {
        let (_dir, mut b) = browser_with(25);
        for _ in 0..PAGE_SIZE {
            b.handle_key_event(KeyCode::Char('j'));
        }
        assert_eq!(b.offset, PAGE_SIZE);
        assert_eq!(b.selected, 0);
    }

    #[test]
    fn test_move_down_stops_at_last_row() {
        let (_dir, mut b) = browser_with(3);
        for _ in 0..10 {
            b.handle_key_event(KeyCode::Down);
        }
        assert_eq!(b.offset + b.selected, 2);
    }

    #[test]
    fn test_page_navigation() {
        let (_dir, mut b) = browser_with(45);
        b.handle_key_event(KeyCode::Char('n'));
        b.handle_key_event(KeyCode::Char('n'));
        assert_eq!(b.offset, PAGE_SIZE * 2);
        b.handle_key_event(KeyCode::Char('n'));
        assert_eq!(b.offset, PAGE_SIZE * 2);
        b.handle_key_event(KeyCode::Char('p'));
        assert_eq!(b.offset, PAGE_SIZE);
    }

    #[test]
    fn test_quit_keys() {
        let (_dir, mut b) = browser_with(1);
        assert_eq!(b.handle_key_event(KeyCode::Char('q')), BrowseAction::Close);
        assert_eq!(b.handle_key_event(KeyCode::Esc), BrowseAction::Close);
    }

    #[test]
    fn test_cycle_type_filters_rows() {
        let (_dir, mut b) = browser_with(6);
        let action = b.handle_key_event(KeyCode::Char('t'));
        b.apply(action).unwrap();
        assert_eq!(b.session.list().filter().category, CategoryFilter::Only(ExpenseType::Personal));
        assert_eq!(b.row_count(), 3);
    }

    #[test]
    fn test_minimum_cost_filters_rows() {
        let (_dir, mut b) = browser_with(6);
        b.handle_key_event(KeyCode::Char('m'));
        assert_eq!(b.mode, BrowseMode::MinimumCost(String::new()));
        type_text(&mut b, "4");
        let action = b.handle_key_event(KeyCode::Enter);
        assert_eq!(action, BrowseAction::SetMinimum(4.0));
        b.apply(action).unwrap();
        assert_eq!(b.session.list().filter().minimum_cost, 4.0);
        // Costs are 6, 5, 4, 3, 2, 1
        assert_eq!(b.row_count(), 3);

        b.handle_key_event(KeyCode::Char('m'));
        let action = b.handle_key_event(KeyCode::Enter);
        b.apply(action).unwrap();
        assert_eq!(b.row_count(), 6);
    }

    #[test]
    fn test_minimum_cost_rejects_bad_input() {
        let (_dir, mut b) = browser_with(3);
        b.handle_key_event(KeyCode::Char('m'));
        type_text(&mut b, "abc");
        assert_eq!(b.handle_key_event(KeyCode::Enter), BrowseAction::Continue);
        assert_eq!(b.status_message.as_deref(), Some("Not a number: abc"));
        assert_eq!(b.mode, BrowseMode::Normal);

        let err = b.apply(BrowseAction::SetMinimum(-5.0)).unwrap_err();
        assert!(matches!(err, TallyError::Validation(_)));
        assert_eq!(b.session.list().filter().minimum_cost, 0.0);
    }

    #[test]
    fn test_edit_selected_row() {
        let (_dir, mut b) = browser_with(3);
        b.handle_key_event(KeyCode::Down);
        assert_eq!(b.selected_id(), Some(2));

        b.handle_key_event(KeyCode::Char('e'));
        assert!(matches!(b.mode, BrowseMode::EditName { id: 2, .. }));
        type_text(&mut b, "Client lunch");
        b.handle_key_event(KeyCode::Enter);
        assert!(matches!(b.mode, BrowseMode::EditCost { id: 2, .. }));
        type_text(&mut b, "42.5");
        b.handle_key_event(KeyCode::Enter);
        // Starts on the record's current type, Business
        assert_eq!(b.mode, BrowseMode::EditType { id: 2, selection: 1 });
        b.handle_key_event(KeyCode::Right);
        let action = b.handle_key_event(KeyCode::Enter);
        assert_eq!(action, BrowseAction::CommitEdit(2));
        b.apply(action).unwrap();

        let rec = b.session.store().get(2).unwrap();
        assert_eq!(rec.name, "Client lunch");
        assert_eq!(rec.cost, 42.5);
        assert_eq!(rec.category, ExpenseType::Other);
        assert_eq!(b.status_message.as_deref(), Some("Updated expense #2: Client lunch"));
        assert_eq!(b.session.last_change(), Some(StoreChange::Updated(2)));
    }

    #[test]
    fn test_edit_with_blank_inputs_keeps_record() {
        let (_dir, mut b) = browser_with(2);
        let before = b.session.store().get(1).unwrap();
        b.handle_key_event(KeyCode::Char('e'));
        b.handle_key_event(KeyCode::Enter);
        b.handle_key_event(KeyCode::Enter);
        let action = b.handle_key_event(KeyCode::Enter);
        b.apply(action).unwrap();
        assert_eq!(b.session.store().get(1).unwrap(), before);
        assert_eq!(b.status_message.as_deref(), Some("Expense #1 unchanged"));
    }

    #[test]
    fn test_edit_rejects_zero_cost() {
        let (_dir, mut b) = browser_with(2);
        b.handle_key_event(KeyCode::Char('e'));
        b.handle_key_event(KeyCode::Enter);
        type_text(&mut b, "0");
        b.handle_key_event(KeyCode::Enter);
        let action = b.handle_key_event(KeyCode::Enter);
        b.apply(action).unwrap();
        assert_eq!(b.session.store().get(1).unwrap().cost, 2.0);
        assert!(!b.session.can_submit());
    }

    #[test]
    fn test_esc_cancels_edit() {
        let (_dir, mut b) = browser_with(2);
        b.handle_key_event(KeyCode::Char('e'));
        type_text(&mut b, "Renamed");
        b.handle_key_event(KeyCode::Enter);
        b.handle_key_event(KeyCode::Esc);
        assert_eq!(b.mode, BrowseMode::Normal);
        assert_eq!(b.pending_name, None);
        assert_eq!(b.session.store().get(1).unwrap().name, "Expense 001");
    }

    #[test]
    fn test_toggle_sort_reorders() {
        let (_dir, mut b) = browser_with(3);
        assert_eq!(b.selected_id(), Some(1));
        let action = b.handle_key_event(KeyCode::Char('s'));
        b.apply(action).unwrap();
        // Costs were inserted descending, so the cheapest is the last id
        assert_eq!(b.selected_id(), Some(3));
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let (_dir, mut b) = browser_with(2);
        assert_eq!(b.handle_key_event(KeyCode::Char('d')), BrowseAction::Continue);
        assert_eq!(b.mode, BrowseMode::ConfirmDelete(1));
        assert_eq!(b.handle_key_event(KeyCode::Char('n')), BrowseAction::Continue);
        assert_eq!(b.row_count(), 2);

        b.handle_key_event(KeyCode::Char('d'));
        let action = b.handle_key_event(KeyCode::Char('y'));
        assert_eq!(action, BrowseAction::Delete(1));
        b.apply(action).unwrap();
        assert_eq!(b.row_count(), 1);
        assert_eq!(b.status_message.as_deref(), Some("Deleted expense #1"));
    }

    #[test]
    fn test_delete_last_row_clamps_selection() {
        let (_dir, mut b) = browser_with(2);
        b.handle_key_event(KeyCode::Down);
        let id = b.selected_id().unwrap();
        b.apply(BrowseAction::Delete(id)).unwrap();
        assert_eq!(b.selected, 0);
        assert_eq!(b.selected_id(), Some(1));
    }

    #[test]
    fn test_wrapped_names_keep_selection_on_screen() {
        let (_dir, mut store) = test_store();
        for i in 1..=3 {
            let name = format!("Conference travel to the annual meeting {i}");
            store.insert(new_expense(&name, ExpenseType::Business, 100.0)).unwrap();
        }
        let session = Session::new(store, FilterSpec::default(), SortKey::BY_NAME);
        let mut b = ExpenseBrowser::new(session, "$".to_string());
        b.selected = 2;

        // Three lines of table body leave room for one wrapped row
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal.draw(|frame| b.draw_frame(frame)).unwrap();
        assert_eq!(b.visible_count, 1);
        assert_eq!(b.selected, 0);
        assert_eq!(b.selected_id(), Some(1));

        b.handle_key_event(KeyCode::Down);
        assert_eq!(b.offset, 1);
        assert_eq!(b.selected, 0);
        assert_eq!(b.selected_id(), Some(2));
    }
}
