//! Process-wide set of game and pack definitions

use crate::error::duplicates;
use crate::{Error, GameDefinition, PackDefinition, Result};

/// All configured definitions, read-only for the lifetime of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub games: Vec<GameDefinition>,
    pub packs: Vec<PackDefinition>,
}

impl Catalog {
    pub fn new(games: Vec<GameDefinition>, packs: Vec<PackDefinition>) -> Self {
        Self { games, packs }
    }

    /// Validate games first, then packs against them
    pub fn validate(&self) -> Result<()> {
        let names = duplicates(self.games.iter().map(|g| g.name.as_str()));
        if !names.is_empty() {
            return Err(Error::DuplicateGameDefinition { names });
        }

        for game in &self.games {
            game.validate()?;
        }

        let names = duplicates(self.packs.iter().map(|p| p.name.as_str()));
        if !names.is_empty() {
            return Err(Error::DuplicatePackDefinition { names });
        }

        for pack in &self.packs {
            pack.validate(&self.games)?;
        }

        Ok(())
    }

    pub fn game(&self, name: &str) -> Option<&GameDefinition> {
        self.games.iter().find(|g| g.name == name)
    }

    pub fn pack(&self, name: &str) -> Option<&PackDefinition> {
        self.packs.iter().find(|p| p.name == name)
    }

    /// Filter entries naming no configured pack, in filter order
    pub fn unknown_packs<'a>(&self, filter: &'a [String]) -> Vec<&'a str> {
        filter
            .iter()
            .map(String::as_str)
            .filter(|name| self.pack(name).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, FieldDefinition, PackElement, Recipient};

    fn lotto() -> GameDefinition {
        GameDefinition::new("lotto", vec![FieldDefinition::new(5, 1, 90)])
    }

    fn pack(name: &str) -> PackDefinition {
        PackDefinition::new(
            name,
            vec![Recipient::new("me@example.com", "Me")],
            vec![PackElement::new("lotto", 1, Vec::new())],
        )
    }

    #[test]
    fn test_duplicate_game_definitions() {
        let catalog = Catalog::new(vec![lotto(), lotto()], vec![pack("mine")]);
        match catalog.validate().unwrap_err() {
            Error::DuplicateGameDefinition { names } => {
                assert_eq!(names, vec!["lotto".to_string()])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_pack_definitions() {
        let catalog = Catalog::new(vec![lotto()], vec![pack("mine"), pack("mine")]);
        let err = catalog.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicatePackDefinition);
    }

    #[test]
    fn test_invalid_game_is_reported_before_packs() {
        let broken = GameDefinition::new("lotto", vec![FieldDefinition::new(5, 1, 4)]);
        let catalog = Catalog::new(vec![broken], vec![pack("mine")]);
        let err = catalog.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidGameDefinition);
    }

    #[test]
    fn test_valid_catalog() {
        let catalog = Catalog::new(vec![lotto()], vec![pack("mine"), pack("yours")]);
        assert!(catalog.validate().is_ok());
        assert!(catalog.validate().is_ok());
        assert!(catalog.game("lotto").is_some());
        assert!(catalog.pack("yours").is_some());
    }

    #[test]
    fn test_unknown_packs() {
        let catalog = Catalog::new(vec![lotto()], vec![pack("mine")]);
        let filter = vec!["mine".to_string(), "office".to_string(), "club".to_string()];
        assert_eq!(catalog.unknown_packs(&filter), vec!["office", "club"]);
    }
}
