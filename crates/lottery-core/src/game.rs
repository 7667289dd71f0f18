//! Game definition domain model

use serde::{Deserialize, Serialize};

use crate::error::FieldRule;
use crate::{Error, Result};

/// One independent draw of a game: `count` distinct numbers from `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub count: u32,
    pub min: i64,
    pub max: i64,
}

impl FieldDefinition {
    pub fn new(count: u32, min: i64, max: i64) -> Self {
        Self { count, min, max }
    }

    /// Check that enough distinct integers exist in `[min, max]` to draw `count`
    pub fn validate(&self, game_name: &str, index: usize) -> Result<()> {
        let rule = if self.count < 1 {
            Some(FieldRule::CountBelowOne)
        } else if self.min < 1 {
            Some(FieldRule::MinBelowOne)
        } else if self.max < self.min.saturating_add(i64::from(self.count) - 1) {
            Some(FieldRule::RangeTooNarrow)
        } else {
            None
        };

        match rule {
            Some(rule) => Err(Error::InvalidGameDefinition {
                game: game_name.to_string(),
                field: index,
                rule,
            }),
            None => Ok(()),
        }
    }

    pub fn contains(&self, number: i64) -> bool {
        (self.min..=self.max).contains(&number)
    }
}

/// The rule set of a lottery game: its ordered fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDefinition {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

impl GameDefinition {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(Error::EmptyGameDefinition {
                game: self.name.clone(),
            });
        }

        for (index, field) in self.fields.iter().enumerate() {
            field.validate(&self.name, index)?;
        }

        Ok(())
    }
}
