//! Core domain models and logic for lottery-random
//!
//! This crate contains:
//! - Domain models (FieldDefinition, GameDefinition, Ticket, PackDefinition, Pack)
//! - Validation of game and pack definitions
//! - Text rendering of tickets and packs
//! - The seams to the outside world (RandomSource, Mailer)

pub mod catalog;
pub mod error;
pub mod game;
pub mod mail;
pub mod pack;
pub mod render;
pub mod source;
pub mod ticket;

pub use catalog::Catalog;
pub use error::{Error, ErrorCategory, ErrorKind, FieldRule, Result};
pub use game::{FieldDefinition, GameDefinition};
pub use mail::{EmailMessage, Mailer};
pub use pack::{GameTickets, Pack, PackDefinition, PackElement, Recipient};
pub use source::RandomSource;
pub use ticket::Ticket;
