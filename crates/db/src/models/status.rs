//! Status and priority enums mapping to PostgreSQL enum types.
//!
//! Each enum has exactly one canonical spelling per variant, shared by the
//! database type, the JSON wire format and query strings.

use std::fmt;
use std::str::FromStr;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $pg_type:tt {
            $( $(#[$vmeta:meta])* $variant:ident = $text:tt ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, sqlx::Type,
        )]
        #[sqlx(type_name = $pg_type)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                #[sqlx(rename = $text)]
                $variant
            ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The canonical wire/database spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

/// Returned when a string does not name a variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus as "project_status" {
        Planned = "planned",
        InProgress = "in_progress",
        Completed = "completed",
        Archived = "archived",
    }
}

define_status_enum! {
    /// Task workflow status. `Done` is the terminal "completed" value.
    TaskStatus as "task_status" {
        Todo = "todo",
        InProgress = "in_progress",
        Done = "done",
        Cancelled = "cancelled",
    }
}

define_status_enum! {
    /// Task priority.
    TaskPriority as "task_priority" {
        Low = "low",
        Medium = "medium",
        High = "high",
        Urgent = "urgent",
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Planned
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Todo
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn round_trips_through_strings() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(*status));
        }
        for status in ProjectStatus::ALL {
            assert_eq!(status.to_string().parse::<ProjectStatus>(), Ok(*status));
        }
    }

    #[test]
    fn rejects_alternate_spellings() {
        assert_matches!("completed".parse::<TaskStatus>(), Err(UnknownVariant { kind: "TaskStatus", .. }));
        assert!("done".parse::<ProjectStatus>().is_err());
        assert!("URGENT".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: TaskPriority = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(parsed, TaskPriority::Urgent);
    }

    #[test]
    fn defaults_match_schema() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::Planned);
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }
}
