use std::collections::HashMap;

use platform::{Attribute, AttributeType, AttributeValue, Value};

use crate::{MigrateError, Result};

pub const ATTRIBUTE_COLUMN_PREFIX: &str = "attr_";

/// Declared attribute types of a space, keyed by attribute key.
#[derive(Debug, Clone, Default)]
pub struct AttributeSchema {
    types: HashMap<String, AttributeType>,
}

impl AttributeSchema {
    pub fn new(attributes: impl IntoIterator<Item = Attribute>) -> Self {
        Self {
            types: attributes
                .into_iter()
                .map(|attribute| (attribute.key, attribute.kind))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<AttributeType> {
        self.types.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Converts `attr_<key>` columns of a row into typed values. Columns whose key
    /// the schema does not declare, and empty cells, are ignored. Output is
    /// sorted by key.
    pub fn coerce(&self, row: &HashMap<String, String>) -> Result<Vec<AttributeValue>> {
        let mut values = Vec::new();

        for (column, raw) in row {
            let Some(key) = column.strip_prefix(ATTRIBUTE_COLUMN_PREFIX) else {
                continue;
            };
            let Some(kind) = self.get(key) else {
                continue;
            };
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }

            let value = match kind {
                AttributeType::Number => Value::Number(
                    raw.parse::<f64>()
                        .ok()
                        .filter(|number| number.is_finite())
                        .ok_or_else(|| MigrateError::InvalidAttributeValue {
                            key: key.to_string(),
                            value: raw.to_string(),
                        })?,
                ),
                AttributeType::String => Value::String(raw.to_string()),
            };

            values.push(AttributeValue {
                attribute_key: key.to_string(),
                value,
            });
        }

        values.sort_by(|a, b| a.attribute_key.cmp(&b.attribute_key));
        Ok(values)
    }
}
