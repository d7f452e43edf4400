//! Fixed-shape records filled from model replies

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Field-name to field-index table of a record shape
#[derive(Debug)]
pub struct Schema {
    index: HashMap<&'static str, usize>,
}

impl Schema {
    pub fn new(fields: &'static [&'static str]) -> Self {
        Self {
            index: fields.iter().enumerate().map(|(i, f)| (*f, i)).collect(),
        }
    }

    /// Index of a field, `key` must already be normalized
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }
}

/// Record made of string fields that default to empty
pub trait RecordShape: Default {
    /// Field names in declaration order
    const FIELDS: &'static [&'static str];

    /// Schema built once per shape
    fn schema() -> &'static Schema;

    /// Mutable access to the field at `index`
    fn slot_mut(&mut self, index: usize) -> Option<&mut String>;

    /// Field values in declaration order
    fn values(&self) -> Vec<&str>;

    fn is_empty(&self) -> bool {
        self.values().iter().all(|v| v.is_empty())
    }
}

macro_rules! record_shape {
    ($(#[$meta:meta])* pub struct $name:ident { $($field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            $(
                #[serde(default)]
                pub $field: String,
            )+
        }

        impl RecordShape for $name {
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),+];

            fn schema() -> &'static Schema {
                static SCHEMA: OnceLock<Schema> = OnceLock::new();
                SCHEMA.get_or_init(|| Schema::new(Self::FIELDS))
            }

            fn slot_mut(&mut self, index: usize) -> Option<&mut String> {
                [$(&mut self.$field),+].into_iter().nth(index)
            }

            fn values(&self) -> Vec<&str> {
                vec![$(self.$field.as_str()),+]
            }
        }
    };
}

record_shape! {
    /// Incident summary extracted from work notes
    pub struct StructuredSummary {
        issue_title,
        issue_description,
        issue_category,
        root_cause,
        resolution_taken,
        affected_applications,
        participating_people,
        resolver_group,
    }
}

record_shape! {
    /// Build failure summary extracted from build logs
    pub struct BuildSummary {
        version,
        account,
        application,
        description,
        error_location,
        resolution_note,
        affected_applications,
        triggered_by,
        issue_category,
        resolver_group,
        date,
        time,
        note,
    }
}
