//! Ticket domain model

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Error, GameDefinition, RandomSource, Result};

/// One filled-in set of numbers for a game, one set per field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub fields: Vec<BTreeSet<i64>>,
}

impl Ticket {
    pub fn new(fields: Vec<BTreeSet<i64>>) -> Self {
        Self { fields }
    }

    /// Build a ticket from per-field number lists. Repeated numbers collapse.
    pub fn from_numbers<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: IntoIterator<Item = i64>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|field| field.into_iter().collect())
                .collect(),
        }
    }

    /// Draw a fresh ticket, one source call per field in field order
    pub async fn generate_random(game: &GameDefinition, source: &dyn RandomSource) -> Result<Self> {
        let mut fields = Vec::with_capacity(game.fields.len());
        for (index, field) in game.fields.iter().enumerate() {
            let numbers = source
                .draw_unique_integers(field.count, field.min, field.max)
                .await
                .map_err(|e| Error::InField {
                    game: game.name.clone(),
                    field: index,
                    source: Box::new(e),
                })?;
            fields.push(numbers);
        }

        tracing::debug!(game = %game.name, fields = fields.len(), "generated random ticket");
        Ok(Self { fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldDefinition;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns the lowest `count` numbers of each range and records the calls
    #[derive(Default)]
    struct LowestNumbers {
        calls: Mutex<Vec<(u32, i64, i64)>>,
    }

    #[async_trait]
    impl RandomSource for LowestNumbers {
        async fn draw_unique_integers(
            &self,
            count: u32,
            min: i64,
            max: i64,
        ) -> Result<BTreeSet<i64>> {
            self.calls.lock().unwrap().push((count, min, max));
            Ok((min..=max).take(count as usize).collect())
        }
    }

    #[test]
    fn test_from_numbers_collapses_repeats() {
        let ticket = Ticket::from_numbers([vec![3, 1, 3], vec![9]]);
        assert_eq!(ticket.fields.len(), 2);
        assert_eq!(ticket.fields[0], BTreeSet::from([1, 3]));
        assert_eq!(ticket.fields[1], BTreeSet::from([9]));
    }

    /// Fails every draw whose range ends above `limit`
    struct RangeLimited {
        limit: i64,
    }

    #[async_trait]
    impl RandomSource for RangeLimited {
        async fn draw_unique_integers(
            &self,
            count: u32,
            min: i64,
            max: i64,
        ) -> Result<BTreeSet<i64>> {
            if max > self.limit {
                return Err(Error::RandomSource {
                    message: format!("Parameter 'max' must be within [-{0},{0}]", self.limit),
                });
            }
            Ok((min..=max).take(count as usize).collect())
        }
    }

    #[tokio::test]
    async fn test_draw_failure_names_game_and_field() {
        let game = GameDefinition::new(
            "bigrange",
            vec![FieldDefinition::new(5, 1, 50), FieldDefinition::new(2, 1, 5000)],
        );
        let source = RangeLimited { limit: 1000 };

        let err = Ticket::generate_random(&game, &source).await.unwrap_err();

        match &err {
            Error::InField { game, field, .. } => {
                assert_eq!(game, "bigrange");
                assert_eq!(*field, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.kind(), crate::ErrorKind::RandomSource);
    }

    #[tokio::test]
    async fn test_generate_random_draws_fields_in_order() {
        let game = GameDefinition::new(
            "eurojackpot",
            vec![FieldDefinition::new(5, 1, 50), FieldDefinition::new(2, 1, 12)],
        );
        let source = LowestNumbers::default();

        let ticket = Ticket::generate_random(&game, &source).await.unwrap();

        assert_eq!(*source.calls.lock().unwrap(), vec![(5, 1, 50), (2, 1, 12)]);
        for (numbers, field) in ticket.fields.iter().zip(&game.fields) {
            assert_eq!(numbers.len(), field.count as usize);
            assert!(numbers.iter().all(|n| field.contains(*n)));
        }
    }
}
