//! Automation types: triggers, conditions, actions and execution logs

use super::ids::{AutomationId, BoardId, ColumnId, ItemId, LogEntryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// What kind of lifecycle event a rule reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    RecordCreated,
    RecordUpdated,
    FieldChanged {
        column_id: ColumnId,
    },
    /// Fired by the periodic date scan, never by a mutation. The rule fires
    /// once `now >= date + offset_days` for an item's date column.
    DateReached {
        date_column: ColumnId,
        #[serde(default)]
        offset_days: i64,
    },
}

impl Trigger {
    /// The trigger kind as a wire string
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RecordCreated => "record_created",
            Self::RecordUpdated => "record_updated",
            Self::FieldChanged { .. } => "field_changed",
            Self::DateReached { .. } => "date_reached",
        }
    }
}

/// A predicate tree over item field values.
///
/// Missing columns compare as JSON null. An absent condition on an
/// automation means an unconditional match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Condition {
    All { conditions: Vec<Condition> },
    Any { conditions: Vec<Condition> },
    Not { condition: Box<Condition> },
    Equals { column_id: ColumnId, value: Value },
    NotEquals { column_id: ColumnId, value: Value },
    GreaterThan { column_id: ColumnId, value: Value },
    LessThan { column_id: ColumnId, value: Value },
    Contains { column_id: ColumnId, value: Value },
}

impl Condition {
    /// Evaluate the predicate against an item's data map
    pub fn evaluate(&self, data: &BTreeMap<ColumnId, Value>) -> bool {
        match self {
            Self::All { conditions } => conditions.iter().all(|c| c.evaluate(data)),
            Self::Any { conditions } => conditions.iter().any(|c| c.evaluate(data)),
            Self::Not { condition } => !condition.evaluate(data),
            Self::Equals { column_id, value } => loose_eq(field(data, column_id), value),
            Self::NotEquals { column_id, value } => !loose_eq(field(data, column_id), value),
            Self::GreaterThan { column_id, value } => {
                compare(field(data, column_id), value) == Some(Ordering::Greater)
            }
            Self::LessThan { column_id, value } => {
                compare(field(data, column_id), value) == Some(Ordering::Less)
            }
            Self::Contains { column_id, value } => contains(field(data, column_id), value),
        }
    }
}

static NULL: Value = Value::Null;

fn field<'a>(data: &'a BTreeMap<ColumnId, Value>, column_id: &ColumnId) -> &'a Value {
    data.get(column_id).unwrap_or(&NULL)
}

/// Equal as JSON values, or numerically equal (so 2 == 2.0).
fn loose_eq(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Numeric comparison when both sides are numbers, lexicographic when both
/// are strings (which also orders ISO dates correctly), None otherwise.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_str(), b.as_str()) {
        return Some(x.cmp(y));
    }
    None
}

/// List membership for list fields, substring match for text fields.
fn contains(haystack: &Value, needle: &Value) -> bool {
    match haystack {
        Value::Array(entries) => entries.iter().any(|entry| loose_eq(entry, needle)),
        Value::String(text) => needle
            .as_str()
            .map(|fragment| text.contains(fragment))
            .unwrap_or(false),
        _ => false,
    }
}

/// Source of the value written by an `update_field` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateValue {
    /// The current timestamp, RFC 3339
    Now,
    /// A literal value
    Value(Value),
}

impl UpdateValue {
    /// Resolve to the concrete value to write
    pub fn resolve(&self, now: DateTime<Utc>) -> Value {
        match self {
            Self::Now => Value::String(now.to_rfc3339()),
            Self::Value(value) => value.clone(),
        }
    }
}

/// What a rule does when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Write one field of the triggering item
    UpdateField {
        column_id: ColumnId,
        value: UpdateValue,
    },
    /// Create a new item seeded from the triggering item
    CreateRecord {
        /// Defaults to the triggering board when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_board_id: Option<BoardId>,
        /// Triggering column id → column id on the target board
        #[serde(default)]
        field_map: BTreeMap<ColumnId, ColumnId>,
        /// Fixed values written to the new record
        #[serde(default)]
        defaults: BTreeMap<ColumnId, Value>,
    },
    /// Hand a task payload to the task collaborator
    CreateTask {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    /// Hand a message payload to the notification collaborator
    SendNotification {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        channel: Option<String>,
    },
}

impl Action {
    /// The action kind as a wire string
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpdateField { .. } => "update_field",
            Self::CreateRecord { .. } => "create_record",
            Self::CreateTask { .. } => "create_task",
            Self::SendNotification { .. } => "send_notification",
        }
    }
}

fn default_true() -> bool {
    true
}

/// A reactive rule scoped to one board.
///
/// Inactive rules are retained but never matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Automation {
    #[serde(skip)]
    pub id: AutomationId,
    pub board_id: BoardId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub trigger: Trigger,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    pub action: Action,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Automation {
    /// Create a new active automation
    pub fn new(
        board_id: BoardId,
        name: impl Into<String>,
        trigger: Trigger,
        action: Action,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AutomationId::new(),
            board_id,
            name: name.into(),
            description: None,
            trigger,
            condition: None,
            action,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Guard the rule with a condition
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// What fired an automation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredBy {
    /// Event kind string, e.g. "field_changed"
    pub event: String,
    pub item_id: ItemId,
}

/// Outcome of one action execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    Success,
    Failure,
}

/// An immutable record of one attempted action execution.
///
/// Appended to the automation's JSONL log, one row per attempt, never
/// mutated. Condition misses are not attempts and write no row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationLog {
    pub id: LogEntryId,
    pub automation_id: AutomationId,
    pub triggered_by: TriggeredBy,
    pub executed_at: DateTime<Utc>,
    pub status: LogStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AutomationLog {
    /// Record a successful execution
    pub fn success(automation_id: AutomationId, triggered_by: TriggeredBy) -> Self {
        Self {
            id: LogEntryId::new(),
            automation_id,
            triggered_by,
            executed_at: Utc::now(),
            status: LogStatus::Success,
            error_message: None,
        }
    }

    /// Record a failed execution
    pub fn failure(
        automation_id: AutomationId,
        triggered_by: TriggeredBy,
        error: impl Into<String>,
    ) -> Self {
        Self {
            id: LogEntryId::new(),
            automation_id,
            triggered_by,
            executed_at: Utc::now(),
            status: LogStatus::Failure,
            error_message: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(entries: &[(&str, Value)]) -> BTreeMap<ColumnId, Value> {
        entries
            .iter()
            .map(|(k, v)| (ColumnId::from_string(*k), v.clone()))
            .collect()
    }

    #[test]
    fn test_equals_and_not_equals() {
        let data = data(&[("state", json!("done")), ("amount", json!(2))]);

        let eq = Condition::Equals {
            column_id: "state".into(),
            value: json!("done"),
        };
        assert!(eq.evaluate(&data));

        let ne = Condition::NotEquals {
            column_id: "state".into(),
            value: json!("new"),
        };
        assert!(ne.evaluate(&data));

        // numeric equality is loose across integer/float representations
        let num = Condition::Equals {
            column_id: "amount".into(),
            value: json!(2.0),
        };
        assert!(num.evaluate(&data));
    }

    #[test]
    fn test_missing_column_compares_as_null() {
        let data = data(&[]);
        let eq = Condition::Equals {
            column_id: "gone".into(),
            value: Value::Null,
        };
        assert!(eq.evaluate(&data));

        let gt = Condition::GreaterThan {
            column_id: "gone".into(),
            value: json!(0),
        };
        assert!(!gt.evaluate(&data));
    }

    #[test]
    fn test_ordering_comparisons() {
        let data = data(&[("amount", json!(5)), ("due", json!("2026-05-01"))]);

        assert!(Condition::GreaterThan {
            column_id: "amount".into(),
            value: json!(3),
        }
        .evaluate(&data));
        assert!(Condition::LessThan {
            column_id: "amount".into(),
            value: json!(10),
        }
        .evaluate(&data));
        // ISO dates order lexicographically
        assert!(Condition::LessThan {
            column_id: "due".into(),
            value: json!("2026-06-01"),
        }
        .evaluate(&data));
    }

    #[test]
    fn test_contains_on_lists_and_strings() {
        let data = data(&[
            ("tags", json!(["red", "blue"])),
            ("notes", json!("call back friday")),
        ]);

        assert!(Condition::Contains {
            column_id: "tags".into(),
            value: json!("blue"),
        }
        .evaluate(&data));
        assert!(!Condition::Contains {
            column_id: "tags".into(),
            value: json!("green"),
        }
        .evaluate(&data));
        assert!(Condition::Contains {
            column_id: "notes".into(),
            value: json!("friday"),
        }
        .evaluate(&data));
    }

    #[test]
    fn test_boolean_combinators() {
        let data = data(&[("state", json!("done")), ("amount", json!(5))]);

        let tree = Condition::All {
            conditions: vec![
                Condition::Equals {
                    column_id: "state".into(),
                    value: json!("done"),
                },
                Condition::Not {
                    condition: Box::new(Condition::GreaterThan {
                        column_id: "amount".into(),
                        value: json!(100),
                    }),
                },
            ],
        };
        assert!(tree.evaluate(&data));

        let any = Condition::Any {
            conditions: vec![
                Condition::Equals {
                    column_id: "state".into(),
                    value: json!("archived"),
                },
                Condition::LessThan {
                    column_id: "amount".into(),
                    value: json!(10),
                },
            ],
        };
        assert!(any.evaluate(&data));
    }

    #[test]
    fn test_trigger_serde() {
        let trigger = Trigger::FieldChanged {
            column_id: "state".into(),
        };
        let json = serde_json::to_value(&trigger).unwrap();
        assert_eq!(json["type"], "field_changed");
        assert_eq!(json["column_id"], "state");

        let parsed: Trigger =
            serde_json::from_value(json!({"type": "date_reached", "date_column": "due"})).unwrap();
        assert_eq!(
            parsed,
            Trigger::DateReached {
                date_column: "due".into(),
                offset_days: 0,
            }
        );
    }

    #[test]
    fn test_update_value_resolve() {
        let now = Utc::now();
        assert_eq!(
            UpdateValue::Value(json!(7)).resolve(now),
            json!(7)
        );
        assert_eq!(
            UpdateValue::Now.resolve(now),
            Value::String(now.to_rfc3339())
        );
    }

    #[test]
    fn test_automation_defaults_active() {
        let json = json!({
            "board_id": "b1",
            "name": "close out",
            "trigger": {"type": "record_created"},
            "action": {"type": "create_task", "title": "follow up"},
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        });
        let automation: Automation = serde_json::from_value(json).unwrap();
        assert!(automation.is_active);
        assert!(automation.condition.is_none());
        assert_eq!(automation.trigger.kind(), "record_created");
        assert_eq!(automation.action.kind(), "create_task");
    }

    #[test]
    fn test_log_entry_serde_round_trip() {
        let entry = AutomationLog::failure(
            AutomationId::new(),
            TriggeredBy {
                event: "record_updated".into(),
                item_id: ItemId::new(),
            },
            "notifier unreachable",
        );
        let line = serde_json::to_string(&entry).unwrap();
        let parsed: AutomationLog = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.status, LogStatus::Failure);
        assert_eq!(parsed.error_message.as_deref(), Some("notifier unreachable"));
        assert_eq!(parsed.id, entry.id);
    }
}
