//! Run orchestration: validate, generate, send
//!
//! A run moves through `Orchestrator` (loaded) → `Validated` → `Generated` →
//! `DeliveryReport` (sent). Each stage consumes the previous one, so no stage
//! can be repeated or skipped.

pub mod message;
pub mod report;

use lottery_core::{
    Catalog, Error, GameDefinition, GameTickets, Mailer, Pack, PackDefinition, RandomSource,
    Result, Ticket,
};

pub use message::MessageComposer;
pub use report::{Delivered, DeliveryReport, FailedDelivery};

/// Loaded configuration, not yet validated
pub struct Orchestrator {
    catalog: Catalog,
}

/// Validated configuration plus the packs selected for this run
#[derive(Debug)]
pub struct Validated {
    catalog: Catalog,
    selected: Vec<usize>,
}

/// Packs with their tickets, ready to send
#[derive(Debug)]
pub struct Generated {
    packs: Vec<Pack>,
}

impl Orchestrator {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Validate every definition and the optional pack filter.
    /// No external call happens before this succeeds.
    pub fn validate(self, filter: Option<&[String]>) -> Result<Validated> {
        self.catalog.validate()?;

        let selected: Vec<usize> = match filter {
            None => (0..self.catalog.packs.len()).collect(),
            Some(filter) => {
                let unknown = self.catalog.unknown_packs(filter);
                if !unknown.is_empty() {
                    return Err(Error::UnknownPackFilter {
                        names: unknown.into_iter().map(String::from).collect(),
                    });
                }
                self.catalog
                    .packs
                    .iter()
                    .enumerate()
                    .filter(|(_, pack)| filter.contains(&pack.name))
                    .map(|(index, _)| index)
                    .collect()
            }
        };

        tracing::info!(
            games = self.catalog.games.len(),
            packs = self.catalog.packs.len(),
            selected = selected.len(),
            "configuration validated"
        );

        Ok(Validated {
            catalog: self.catalog,
            selected,
        })
    }

    /// Run every stage
    pub async fn run(
        self,
        filter: Option<&[String]>,
        source: &dyn RandomSource,
        mailer: &dyn Mailer,
        composer: &MessageComposer,
    ) -> Result<DeliveryReport> {
        let generated = self.validate(filter)?.generate(source).await?;
        Ok(generated.send(mailer, composer).await)
    }
}

impl Validated {
    pub fn packs(&self) -> impl Iterator<Item = &PackDefinition> {
        self.selected.iter().map(|&index| &self.catalog.packs[index])
    }

    /// Draw random tickets for every selected pack
    pub async fn generate(self, source: &dyn RandomSource) -> Result<Generated> {
        let mut packs = Vec::with_capacity(self.selected.len());
        for definition in self.packs() {
            tracing::info!(pack = %definition.name, "generating tickets");
            let pack = assemble_pack(definition, &self.catalog.games, source)
                .await
                .map_err(|e| Error::Generating {
                    pack: definition.name.clone(),
                    source: Box::new(e),
                })?;
            packs.push(pack);
        }
        Ok(Generated { packs })
    }
}

impl Generated {
    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    pub fn into_packs(self) -> Vec<Pack> {
        self.packs
    }

    /// Send every pack to each of its recipients. A failed send is recorded
    /// and the remaining recipients are still attempted.
    pub async fn send(self, mailer: &dyn Mailer, composer: &MessageComposer) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for pack in &self.packs {
            for message in composer.compose_all(pack) {
                let outcome = mailer.send(&message).await;
                match &outcome {
                    Ok(()) => tracing::debug!(pack = %pack.name, to = %message.to.email, "sent"),
                    Err(e) => tracing::warn!(
                        pack = %pack.name,
                        to = %message.to.email,
                        error = %e,
                        "delivery failed"
                    ),
                }
                report.record(&pack.name, &message.to.email, outcome);
            }
        }

        tracing::info!(
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "sending finished"
        );
        report
    }
}

/// Realize a pack: per element, fresh random tickets followed by the permanent ones
pub async fn assemble_pack(
    definition: &PackDefinition,
    games: &[GameDefinition],
    source: &dyn RandomSource,
) -> Result<Pack> {
    let mut tickets = Vec::with_capacity(definition.elements.len());

    for element in &definition.elements {
        let game = games
            .iter()
            .find(|g| g.name == element.game)
            .ok_or_else(|| Error::UnknownGame {
                game: element.game.clone(),
            })?;

        let mut realized =
            Vec::with_capacity(element.number_of_random_tickets + element.permanent_tickets.len());
        for _ in 0..element.number_of_random_tickets {
            realized.push(Ticket::generate_random(game, source).await?);
        }
        realized.extend(element.permanent_tickets.iter().cloned());

        tickets.push(GameTickets {
            game: element.game.clone(),
            tickets: realized,
        });
    }

    Ok(Pack {
        name: definition.name.clone(),
        recipients: definition.recipients.clone(),
        tickets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lottery_core::{ErrorKind, FieldDefinition, PackElement, Recipient};
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    /// Counts draws; hands out consecutive numbers starting at `min`
    #[derive(Default)]
    struct CountingSource {
        calls: Mutex<usize>,
    }

    impl CountingSource {
        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl RandomSource for CountingSource {
        async fn draw_unique_integers(
            &self,
            count: u32,
            min: i64,
            _max: i64,
        ) -> Result<BTreeSet<i64>> {
            *self.calls.lock().unwrap() += 1;
            Ok((min..min + i64::from(count)).collect())
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                GameDefinition::new("lotto", vec![FieldDefinition::new(5, 1, 90)]),
                GameDefinition::new(
                    "euro",
                    vec![FieldDefinition::new(5, 1, 50), FieldDefinition::new(2, 1, 12)],
                ),
            ],
            vec![
                PackDefinition::new(
                    "mine",
                    vec![Recipient::new("me@example.com", "Me")],
                    vec![
                        PackElement::new(
                            "lotto",
                            2,
                            vec![
                                Ticket::from_numbers([vec![10, 20, 30, 40, 50]]),
                                Ticket::from_numbers([vec![11, 21, 31, 41, 51]]),
                            ],
                        ),
                        PackElement::new("euro", 1, Vec::new()),
                    ],
                ),
                PackDefinition::new(
                    "office",
                    vec![Recipient::new("boss@example.com", "Boss")],
                    vec![PackElement::new("lotto", 1, Vec::new())],
                ),
            ],
        )
    }

    #[tokio::test]
    async fn test_random_tickets_precede_permanent_ones() {
        let source = CountingSource::default();
        let catalog = catalog();

        let pack = assemble_pack(&catalog.packs[0], &catalog.games, &source)
            .await
            .unwrap();

        let lotto = pack.tickets_for("lotto").unwrap();
        assert_eq!(lotto.len(), 4);
        assert_eq!(lotto[0], Ticket::from_numbers([1..=5]));
        assert_eq!(lotto[1], Ticket::from_numbers([1..=5]));
        assert_eq!(lotto[2], catalog.packs[0].elements[0].permanent_tickets[0]);
        assert_eq!(lotto[3], catalog.packs[0].elements[0].permanent_tickets[1]);

        // two lotto draws plus one euro ticket with two fields
        assert_eq!(source.calls(), 4);
        assert_eq!(pack.tickets_for("euro").unwrap()[0].fields.len(), 2);
    }

    #[tokio::test]
    async fn test_filter_selects_packs() {
        let source = CountingSource::default();
        let filter = vec!["office".to_string()];

        let validated = Orchestrator::new(catalog()).validate(Some(&filter)).unwrap();
        let names: Vec<_> = validated.packs().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["office".to_string()]);

        let generated = validated.generate(&source).await.unwrap();
        assert_eq!(generated.packs().len(), 1);
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn test_unknown_filter_entries_are_listed() {
        let filter = vec!["club".to_string(), "mine".to_string(), "gym".to_string()];
        match Orchestrator::new(catalog()).validate(Some(&filter)).unwrap_err() {
            Error::UnknownPackFilter { names } => {
                assert_eq!(names, vec!["club".to_string(), "gym".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_catalog_stops_validation() {
        let mut catalog = catalog();
        catalog.packs[1].elements[0].game = "keno".to_string();
        let err = Orchestrator::new(catalog).validate(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownGame);
    }
}
