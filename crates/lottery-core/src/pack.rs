//! Pack domain model

use serde::{Deserialize, Serialize};

use crate::error::duplicates;
use crate::{Error, GameDefinition, Result, Ticket};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
    pub name: String,
}

impl Recipient {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// Per-game request inside a pack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackElement {
    pub game: String,
    pub number_of_random_tickets: usize,
    pub permanent_tickets: Vec<Ticket>,
}

impl PackElement {
    pub fn new(
        game: impl Into<String>,
        number_of_random_tickets: usize,
        permanent_tickets: Vec<Ticket>,
    ) -> Self {
        Self {
            game: game.into(),
            number_of_random_tickets,
            permanent_tickets,
        }
    }

    /// Check the element against the game it references
    pub fn validate(&self, games: &[GameDefinition]) -> Result<()> {
        let definition = games
            .iter()
            .find(|g| g.name == self.game)
            .ok_or_else(|| Error::UnknownGame {
                game: self.game.clone(),
            })?;

        if self.number_of_random_tickets == 0 && self.permanent_tickets.is_empty() {
            return Err(Error::EmptyElement {
                game: self.game.clone(),
            });
        }

        for (ticket_index, ticket) in self.permanent_tickets.iter().enumerate() {
            if ticket.fields.len() != definition.fields.len() {
                return Err(Error::FieldCountMismatch {
                    game: self.game.clone(),
                    ticket: ticket_index,
                    expected: definition.fields.len(),
                    actual: ticket.fields.len(),
                });
            }

            for (field_index, (numbers, field)) in
                ticket.fields.iter().zip(&definition.fields).enumerate()
            {
                if numbers.len() != field.count as usize {
                    return Err(Error::FieldCardinalityMismatch {
                        game: self.game.clone(),
                        ticket: ticket_index,
                        field: field_index,
                        expected: field.count as usize,
                        actual: numbers.len(),
                    });
                }

                if let Some(&number) = numbers.iter().find(|n| !field.contains(**n)) {
                    return Err(Error::NumberOutOfRange {
                        game: self.game.clone(),
                        ticket: ticket_index,
                        field: field_index,
                        number,
                        min: field.min,
                        max: field.max,
                    });
                }
            }
        }

        Ok(())
    }
}

/// A named group of recipients and the games generated for them.
/// Used as a template for each run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackDefinition {
    pub name: String,
    pub recipients: Vec<Recipient>,
    pub elements: Vec<PackElement>,
}

impl PackDefinition {
    pub fn new(
        name: impl Into<String>,
        recipients: Vec<Recipient>,
        elements: Vec<PackElement>,
    ) -> Self {
        Self {
            name: name.into(),
            recipients,
            elements,
        }
    }

    pub fn validate(&self, games: &[GameDefinition]) -> Result<()> {
        if self.recipients.is_empty() {
            return Err(Error::NoRecipients {
                pack: self.name.clone(),
            });
        }

        let emails = duplicates(self.recipients.iter().map(|r| r.email.as_str()));
        if !emails.is_empty() {
            return Err(Error::DuplicateRecipient {
                pack: self.name.clone(),
                emails,
            });
        }

        if self.elements.is_empty() {
            return Err(Error::NoElements {
                pack: self.name.clone(),
            });
        }

        let repeated_games = duplicates(self.elements.iter().map(|e| e.game.as_str()));
        if !repeated_games.is_empty() {
            return Err(Error::DuplicateElement {
                pack: self.name.clone(),
                games: repeated_games,
            });
        }

        for element in &self.elements {
            element.validate(games).map_err(|source| Error::InPack {
                pack: self.name.clone(),
                source: Box::new(source),
            })?;
        }

        Ok(())
    }

    pub fn element(&self, game: &str) -> Option<&PackElement> {
        self.elements.iter().find(|e| e.game == game)
    }
}

/// Realized tickets of one game inside a runtime pack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTickets {
    pub game: String,
    pub tickets: Vec<Ticket>,
}

/// Runtime pack: recipients plus freshly assembled tickets, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pack {
    pub name: String,
    pub recipients: Vec<Recipient>,
    pub tickets: Vec<GameTickets>,
}

impl Pack {
    pub fn tickets_for(&self, game: &str) -> Option<&[Ticket]> {
        self.tickets
            .iter()
            .find(|t| t.game == game)
            .map(|t| t.tickets.as_slice())
    }
}
