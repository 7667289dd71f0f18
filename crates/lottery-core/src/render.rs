//! Text rendering of tickets and packs
//!
//! A ticket renders as `[1, 2, 3 | 4, 5]`: fields separated by ` | `,
//! numbers ascending and separated by `, `. A pack renders one line per game:
//! `<game>: <ticket>, <ticket>`.

use std::fmt;

use crate::{Pack, Ticket};

const FIELD_SEPARATOR: &str = " | ";
const NUMBER_SEPARATOR: &str = ", ";
const TICKET_SEPARATOR: &str = ", ";

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // BTreeSet iterates in ascending order
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|field| {
                field
                    .iter()
                    .map(i64::to_string)
                    .collect::<Vec<_>>()
                    .join(NUMBER_SEPARATOR)
            })
            .collect();
        write!(f, "[{}]", fields.join(FIELD_SEPARATOR))
    }
}

impl fmt::Display for Pack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, game) in self.tickets.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let tickets: Vec<String> = game.tickets.iter().map(Ticket::to_string).collect();
            write!(f, "{}: {}", game.game, tickets.join(TICKET_SEPARATOR))?;
        }
        Ok(())
    }
}
