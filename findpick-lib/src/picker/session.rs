//! Find dialog sessions

use std::cell::Cell;
use std::cell::Ref;
use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::settings::FindDialogSettings;
use crate::error::FindError;
use crate::error::FindResult;
use crate::instance::RowInstance;
use crate::model::Record;
use crate::model::Value;
use crate::schema::FieldDefinition;
use crate::schema::FieldId;
use crate::schema::RowDefinition;
use crate::schema::SortOrder;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionOutcome {
    /// Still open.
    #[default]
    Open,
    /// Closed with a picked record.
    Picked(Record),
    /// Closed without a pick.
    Dismissed,
}

/// State of one open find dialog.
///
/// Owns the row definition and the rows built from the records. Column sort
/// toggles flow through the row definition's sort callback into every row's
/// sort value; the session applies the direction in
/// [`display_order`](Self::display_order).
///
/// # Example
///
/// ```
/// use findpick_lib::model::Record;
/// use findpick_lib::picker::{FindDialogSettings, FindSession};
/// use findpick_lib::schema::{FieldConfig, RowDefinition};
///
/// let defn = RowDefinition::new().string_field(FieldConfig::new("name", "Name"));
/// let records = vec![
///     Record::new().set("name", "Zeta"),
///     Record::new().set("name", "Alpha"),
/// ];
/// let mut session = FindSession::new(defn, records, FindDialogSettings::default());
///
/// let name = session.row_definition().field_defns()[0].id().unwrap();
/// session.toggle_sort(name).unwrap();
/// assert_eq!(session.display_order(), vec![1, 0]);
/// ```
pub struct FindSession {
    row_defn: RowDefinition,
    rows: Rc<RefCell<Vec<RowInstance>>>,
    reverse_sort: Rc<Cell<bool>>,
    settings: FindDialogSettings,
    filter_text: String,
    picked: Option<usize>,
    outcome: SessionOutcome,
}

impl FindSession {
    /// Builds the rows and hooks the session into the row definition's sort
    /// callback.
    ///
    /// Each row's default sort value is its position in `records`. The first
    /// row starts selected.
    pub fn new(mut row_defn: RowDefinition, records: Vec<Record>, settings: FindDialogSettings) -> Self {
        let mut rows: Vec<RowInstance> = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| row_defn.make_row_instance(record, position))
            .collect();
        if let Some(first) = rows.first_mut() {
            first.set_selected(true);
        }

        let rows = Rc::new(RefCell::new(rows));
        let reverse_sort = Rc::new(Cell::new(false));

        let callback_rows = Rc::clone(&rows);
        let callback_reverse = Rc::clone(&reverse_sort);
        row_defn.set_row_sort_callback(Box::new(move |field_defn: &FieldDefinition| {
            let order = field_defn.sort_order();
            callback_reverse.set(order == SortOrder::Descending);
            let active = order.is_sorted().then_some(field_defn);
            for row in callback_rows.borrow_mut().iter_mut() {
                row.sort_val_data_by_defn(active);
            }
        }));

        debug!(
            "Opened find session '{}' with {} rows",
            settings.title,
            rows.borrow().len()
        );

        Self {
            row_defn,
            rows,
            reverse_sort,
            settings,
            filter_text: String::new(),
            picked: None,
            outcome: SessionOutcome::Open,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the rows in source order.
    pub fn rows(&self) -> Ref<'_, [RowInstance]> {
        Ref::map(self.rows.borrow(), Vec::as_slice)
    }

    /// Returns the number of rows, filtered or not.
    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    /// Returns `true` if the session lists no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }

    /// Returns the row definition.
    pub fn row_definition(&self) -> &RowDefinition {
        &self.row_defn
    }

    /// Returns the presentation settings.
    pub fn settings(&self) -> &FindDialogSettings {
        &self.settings
    }

    /// Returns the normalized filter text.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Returns `true` while the sorted column is descending.
    pub fn reverse_sort(&self) -> bool {
        self.reverse_sort.get()
    }

    /// Returns how the session ended, or [`SessionOutcome::Open`].
    pub fn outcome(&self) -> &SessionOutcome {
        &self.outcome
    }

    /// Returns `true` until the session is closed or dismissed.
    pub fn is_open(&self) -> bool {
        self.outcome == SessionOutcome::Open
    }

    // =========================================================================
    // Sorting and filtering
    // =========================================================================

    /// Cycles the sort state of a column.
    pub fn toggle_sort(&mut self, id: FieldId) -> FindResult<SortOrder> {
        self.row_defn.sort_toggle(id)
    }

    /// Toggles the column reading the given record property.
    pub fn toggle_sort_by_name(&mut self, name: &str) -> Option<FindResult<SortOrder>> {
        let id = self.row_defn.field_by_name(name)?.id()?;
        Some(self.toggle_sort(id))
    }

    /// Sets the filter text and reruns the filter.
    ///
    /// The text is trimmed and lowercased. Returns the number of rows found.
    pub fn set_filter_text(&mut self, text: &str) -> usize {
        self.filter_text = text.trim().to_lowercase();
        self.filter()
    }

    /// Runs the current filter text over every row.
    ///
    /// Returns the number of rows found.
    pub fn filter(&mut self) -> usize {
        let mut rows = self.rows.borrow_mut();
        let mut found = 0;
        for row in rows.iter_mut() {
            if row.assign_found(&self.filter_text) {
                found += 1;
            }
        }
        debug!(
            "Filter '{}' matched {} of {} rows",
            self.filter_text,
            found,
            rows.len()
        );
        found
    }

    /// Returns the indices of the visible rows in display order.
    ///
    /// Rows hidden by the filter are left out. The rest are stably ordered by
    /// their sort value, reversed while [`reverse_sort`](Self::reverse_sort)
    /// holds.
    pub fn display_order(&self) -> Vec<usize> {
        let rows = self.rows.borrow();
        let mut order: Vec<usize> = (0..rows.len()).filter(|&i| !rows[i].not_found()).collect();
        let reverse = self.reverse_sort.get();
        order.sort_by(|&a, &b| {
            let ordering = rows[a].sort_val().sort_cmp(rows[b].sort_val());
            if reverse {
                ordering.reverse()
            } else {
                ordering
            }
        });
        order
    }

    /// Returns the sort values of the rows in source order.
    pub fn sort_values(&self) -> Vec<Value> {
        self.rows.borrow().iter().map(|row| row.sort_val().clone()).collect()
    }

    // =========================================================================
    // Selection and lifecycle
    // =========================================================================

    /// Makes the row at `index` the only selected row.
    pub fn select(&mut self, index: usize) -> FindResult<()> {
        let mut rows = self.rows.borrow_mut();
        if index >= rows.len() {
            return Err(FindError::RowOutOfRange {
                index,
                len: rows.len(),
            });
        }
        for (i, row) in rows.iter_mut().enumerate() {
            row.set_selected(i == index);
        }
        Ok(())
    }

    /// Returns the index of the selected row.
    pub fn selected_index(&self) -> Option<usize> {
        self.rows.borrow().iter().position(RowInstance::is_selected)
    }

    /// Picks the row at `index` and returns its record.
    ///
    /// The row becomes the selection. With `close_on_pick` the session closes
    /// with this record as its outcome. Returns `None` once the session is
    /// closed.
    pub fn pick_row(&mut self, index: usize) -> FindResult<Option<Record>> {
        if !self.is_open() {
            return Ok(None);
        }
        self.select(index)?;
        self.picked = Some(index);

        let record = self.rows.borrow()[index].data().clone();
        debug!("Picked row {}", index);

        if self.settings.close_on_pick {
            self.outcome = SessionOutcome::Picked(record.clone());
        }
        Ok(Some(record))
    }

    /// Closes the session with the last picked record, or dismisses it when
    /// nothing was picked.
    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.outcome = match self.picked {
            Some(index) => SessionOutcome::Picked(self.rows.borrow()[index].data().clone()),
            None => SessionOutcome::Dismissed,
        };
        debug!("Closed find session: {:?}", self.outcome);
    }

    /// Closes the session without a result.
    pub fn dismiss(&mut self) {
        if self.is_open() {
            self.outcome = SessionOutcome::Dismissed;
            debug!("Dismissed find session");
        }
    }

    /// Consumes the session and returns the picked record, if any.
    pub fn into_result(self) -> Option<Record> {
        match self.outcome {
            SessionOutcome::Picked(record) => Some(record),
            _ => None,
        }
    }
}

impl std::fmt::Debug for FindSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FindSession")
            .field("row_defn", &self.row_defn)
            .field("rows", &self.rows.borrow().len())
            .field("reverse_sort", &self.reverse_sort.get())
            .field("settings", &self.settings)
            .field("filter_text", &self.filter_text)
            .field("outcome", &self.outcome)
            .finish()
    }
}
