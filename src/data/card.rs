//! Cards, as they appear in collections, decks and battles

use serde_json::Value;

use super::{FromJson, JsonView};

/// One card
///
/// The same shape is used for a player's collection, their current deck,
/// their favourite card, and the decks played in a battle. Fields a context
/// does not carry (e.g. `count` inside a battle) read as their defaults.
#[derive(Debug)]
pub struct Card<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for Card<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> Card<'a> {
    pub fn id(&self) -> i64 {
        self.view.int("id")
    }

    pub fn name(&self) -> &'a str {
        self.view.str("name")
    }

    /// Level as reported by the API, on the card's rarity scale
    pub fn level(&self) -> i64 {
        self.view.int("level")
    }

    pub fn max_level(&self) -> i64 {
        self.view.int("maxLevel")
    }

    pub fn star_level(&self) -> i64 {
        self.view.int("starLevel")
    }

    pub fn evolution_level(&self) -> i64 {
        self.view.int("evolutionLevel")
    }

    pub fn max_evolution_level(&self) -> i64 {
        self.view.int("maxEvolutionLevel")
    }

    pub fn is_evolved(&self) -> bool {
        self.evolution_level() > 0
    }

    /// Rarity name, e.g. `"common"` or `"legendary"`
    pub fn rarity(&self) -> &'a str {
        self.view.str("rarity")
    }

    /// Copies held towards the next upgrade
    pub fn count(&self) -> i64 {
        self.view.int("count")
    }

    pub fn elixir_cost(&self) -> i64 {
        self.view.int("elixirCost")
    }

    pub fn icon_url(&self) -> Option<&'a str> {
        self.view.opt_str("iconUrls.medium")
    }

    pub fn evolution_icon_url(&self) -> Option<&'a str> {
        self.view.opt_str("iconUrls.evolutionMedium")
    }
}
