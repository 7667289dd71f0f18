use thiserror::Error;

/// Rule broken by a field of a game definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// n < 1
    CountBelowOne,
    /// min < 1
    MinBelowOne,
    /// max < min + n - 1
    RangeTooNarrow,
}

impl std::fmt::Display for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FieldRule::CountBelowOne => "n < 1",
            FieldRule::MinBelowOne => "min < 1",
            FieldRule::RangeTooNarrow => "max < min + n - 1",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid game definition \"{game}\": {rule} in field {field}")]
    InvalidGameDefinition {
        game: String,
        field: usize,
        rule: FieldRule,
    },

    #[error("Invalid game definition \"{game}\": no fields")]
    EmptyGameDefinition { game: String },

    #[error("No game definition named \"{game}\"")]
    UnknownGame { game: String },

    #[error("Invalid configuration for game \"{game}\": no tickets")]
    EmptyElement { game: String },

    #[error(
        "Invalid configuration for game \"{game}\": permanent ticket {ticket} has {actual} fields, expected {expected}"
    )]
    FieldCountMismatch {
        game: String,
        ticket: usize,
        expected: usize,
        actual: usize,
    },

    #[error(
        "Invalid configuration for game \"{game}\": permanent ticket {ticket} has {actual} numbers in field {field}, expected {expected}"
    )]
    FieldCardinalityMismatch {
        game: String,
        ticket: usize,
        field: usize,
        expected: usize,
        actual: usize,
    },

    #[error(
        "Invalid configuration for game \"{game}\": permanent ticket {ticket}, field {field}: {number} is outside [{min}, {max}]"
    )]
    NumberOutOfRange {
        game: String,
        ticket: usize,
        field: usize,
        number: i64,
        min: i64,
        max: i64,
    },

    #[error("Invalid pack definition \"{pack}\": no recipients")]
    NoRecipients { pack: String },

    #[error("Invalid pack definition \"{pack}\": duplicate recipients: {}", .emails.join(", "))]
    DuplicateRecipient { pack: String, emails: Vec<String> },

    #[error("Invalid pack definition \"{pack}\": no elements")]
    NoElements { pack: String },

    #[error("Invalid pack definition \"{pack}\": duplicate games: {}", .games.join(", "))]
    DuplicateElement { pack: String, games: Vec<String> },

    #[error("Invalid pack definition \"{pack}\": {source}")]
    InPack {
        pack: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Game \"{game}\", field {field}: {source}")]
    InField {
        game: String,
        field: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to generate pack \"{pack}\": {source}")]
    Generating {
        pack: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Duplicate game definitions: {}", .names.join(", "))]
    DuplicateGameDefinition { names: Vec<String> },

    #[error("Duplicate pack definitions: {}", .names.join(", "))]
    DuplicatePackDefinition { names: Vec<String> },

    #[error("Pack not found for following entries in pack filter: {}", .names.join(", "))]
    UnknownPackFilter { names: Vec<String> },

    #[error("random.org API error: {message}")]
    RandomSource { message: String },

    #[error("Failed to send email to {recipient}: {message}")]
    Delivery { recipient: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Machine-checkable kind of an [`Error`], independent of its context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidGameDefinition,
    UnknownGame,
    EmptyElement,
    FieldCountMismatch,
    FieldCardinalityMismatch,
    NumberOutOfRange,
    NoRecipients,
    DuplicateRecipient,
    NoElements,
    DuplicateElement,
    DuplicateGameDefinition,
    DuplicatePackDefinition,
    UnknownPackFilter,
    RandomSource,
    Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Shape or referential problems in the configuration
    Configuration,
    /// Domain invariant violations in game or pack definitions
    Validation,
    RandomSource,
    Delivery,
}

impl Error {
    /// Kind of the innermost error, looking through pack and field context
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidGameDefinition { .. } | Error::EmptyGameDefinition { .. } => {
                ErrorKind::InvalidGameDefinition
            }
            Error::UnknownGame { .. } => ErrorKind::UnknownGame,
            Error::EmptyElement { .. } => ErrorKind::EmptyElement,
            Error::FieldCountMismatch { .. } => ErrorKind::FieldCountMismatch,
            Error::FieldCardinalityMismatch { .. } => ErrorKind::FieldCardinalityMismatch,
            Error::NumberOutOfRange { .. } => ErrorKind::NumberOutOfRange,
            Error::NoRecipients { .. } => ErrorKind::NoRecipients,
            Error::DuplicateRecipient { .. } => ErrorKind::DuplicateRecipient,
            Error::NoElements { .. } => ErrorKind::NoElements,
            Error::DuplicateElement { .. } => ErrorKind::DuplicateElement,
            Error::InPack { source, .. }
            | Error::InField { source, .. }
            | Error::Generating { source, .. } => source.kind(),
            Error::DuplicateGameDefinition { .. } => ErrorKind::DuplicateGameDefinition,
            Error::DuplicatePackDefinition { .. } => ErrorKind::DuplicatePackDefinition,
            Error::UnknownPackFilter { .. } => ErrorKind::UnknownPackFilter,
            Error::RandomSource { .. } => ErrorKind::RandomSource,
            Error::Delivery { .. } => ErrorKind::Delivery,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind().category()
    }

    /// Whether the run must stop. Only delivery errors are reported and skipped.
    pub fn is_fatal(&self) -> bool {
        self.category() != ErrorCategory::Delivery
    }
}

impl ErrorKind {
    pub fn category(self) -> ErrorCategory {
        match self {
            ErrorKind::InvalidGameDefinition
            | ErrorKind::UnknownGame
            | ErrorKind::DuplicateElement
            | ErrorKind::DuplicateGameDefinition
            | ErrorKind::DuplicatePackDefinition
            | ErrorKind::UnknownPackFilter => ErrorCategory::Configuration,
            ErrorKind::EmptyElement
            | ErrorKind::FieldCountMismatch
            | ErrorKind::FieldCardinalityMismatch
            | ErrorKind::NumberOutOfRange
            | ErrorKind::NoRecipients
            | ErrorKind::DuplicateRecipient
            | ErrorKind::NoElements => ErrorCategory::Validation,
            ErrorKind::RandomSource => ErrorCategory::RandomSource,
            ErrorKind::Delivery => ErrorCategory::Delivery,
        }
    }
}

/// Values occurring more than once, in order of first repetition
pub(crate) fn duplicates<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut repeated = Vec::new();
    for value in values {
        if !seen.insert(value) && !repeated.iter().any(|r: &String| r == value) {
            repeated.push(value.to_string());
        }
    }
    repeated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_looks_through_pack_context() {
        let err = Error::InPack {
            pack: "family".to_string(),
            source: Box::new(Error::UnknownGame {
                game: "lotto".to_string(),
            }),
        };
        assert_eq!(err.kind(), ErrorKind::UnknownGame);
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(
            err.to_string(),
            "Invalid pack definition \"family\": No game definition named \"lotto\""
        );
    }

    #[test]
    fn test_only_delivery_is_non_fatal() {
        let delivery = Error::Delivery {
            recipient: "a@example.com".to_string(),
            message: "rejected".to_string(),
        };
        let random = Error::RandomSource {
            message: "quota exceeded".to_string(),
        };
        assert!(!delivery.is_fatal());
        assert!(random.is_fatal());
    }

    #[test]
    fn test_invalid_game_is_a_configuration_error() {
        let err = Error::InvalidGameDefinition {
            game: "lotto".to_string(),
            field: 0,
            rule: FieldRule::CountBelowOne,
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_kind_looks_through_generation_context() {
        let err = Error::Generating {
            pack: "family".to_string(),
            source: Box::new(Error::InField {
                game: "bigrange".to_string(),
                field: 1,
                source: Box::new(Error::RandomSource {
                    message: "Parameter 'max' must be within [-1e9,1e9]".to_string(),
                }),
            }),
        };
        assert_eq!(err.kind(), ErrorKind::RandomSource);
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Failed to generate pack \"family\": Game \"bigrange\", field 1: \
             random.org API error: Parameter 'max' must be within [-1e9,1e9]"
        );
    }

    #[test]
    fn test_duplicates_reports_each_name_once() {
        let names = ["a", "b", "a", "c", "a", "b"];
        assert_eq!(duplicates(names), vec!["a".to_string(), "b".to_string()]);
        assert!(duplicates(["x", "y"]).is_empty());
    }

    #[test]
    fn test_duplicate_message_lists_names() {
        let err = Error::DuplicateGameDefinition {
            names: vec!["lotto".to_string(), "euro".to_string()],
        };
        assert_eq!(err.to_string(), "Duplicate game definitions: lotto, euro");
    }
}
