use tickler_domain::{Reminder, ID};

/// The `Reminder` fields that can be filtered on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReminderField {
    Id,
    TargetId,
    Description,
    DueAt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOperator {
    Eq,
    Lte,
    In,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Timestamp(i64),
    List(Vec<String>),
}

/// A single condition a `Reminder` has to satisfy. Multiple `Filter`s
/// are combined with AND.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: ReminderField,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl Filter {
    pub fn target_id_eq(target_id: &str) -> Self {
        Self {
            field: ReminderField::TargetId,
            operator: FilterOperator::Eq,
            value: FilterValue::Text(target_id.to_string()),
        }
    }

    pub fn due_at_lte(timestamp: i64) -> Self {
        Self {
            field: ReminderField::DueAt,
            operator: FilterOperator::Lte,
            value: FilterValue::Timestamp(timestamp),
        }
    }

    pub fn id_in(ids: &[ID]) -> Self {
        Self {
            field: ReminderField::Id,
            operator: FilterOperator::In,
            value: FilterValue::List(ids.iter().map(|id| id.as_string()).collect()),
        }
    }

    /// Evaluates the `Filter` against a `Reminder` in memory. Mismatches
    /// between the field type and the value type never match.
    pub fn matches(&self, reminder: &Reminder) -> bool {
        match self.field {
            ReminderField::DueAt => match (&self.operator, &self.value) {
                (FilterOperator::Eq, FilterValue::Timestamp(ts)) => reminder.due_at == *ts,
                (FilterOperator::Lte, FilterValue::Timestamp(ts)) => reminder.due_at <= *ts,
                _ => false,
            },
            ReminderField::Id => self.matches_text(&reminder.id.as_string()),
            ReminderField::TargetId => self.matches_text(&reminder.target_id),
            ReminderField::Description => self.matches_text(&reminder.description),
        }
    }

    fn matches_text(&self, field: &str) -> bool {
        match (&self.operator, &self.value) {
            (FilterOperator::Eq, FilterValue::Text(val)) => field == val,
            (FilterOperator::Lte, FilterValue::Text(val)) => field <= val.as_str(),
            (FilterOperator::In, FilterValue::List(vals)) => vals.iter().any(|v| v == field),
            _ => false,
        }
    }
}

pub fn matches_all(filters: &[Filter], reminder: &Reminder) -> bool {
    filters.iter().all(|f| f.matches(reminder))
}
