//! Battle log
//!
//! `/players/{tag}/battlelog` returns a bare JSON array of recent battles,
//! newest first.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{Arena, Card, Children, ClanRef, FromJson, GameMode, JsonView, Nested};

/// A player's recent battles
#[derive(Debug)]
pub struct BattleLog<'a> {
    value: &'a Value,
}

impl<'a> FromJson<'a> for BattleLog<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self { value }
    }
}

impl<'a> BattleLog<'a> {
    /// Battles, newest first
    pub fn battles(&self) -> Children<'a, Battle<'a>> {
        Children::new(Some(self.value))
    }

    pub fn len(&self) -> usize {
        self.battles().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of a battle from the log owner's side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
    Draw,
    /// One side is missing from the record
    Unknown,
}

/// One battle
#[derive(Debug)]
pub struct Battle<'a> {
    view: JsonView<'a>,
    arena: Nested<Arena<'a>>,
    game_mode: Nested<GameMode<'a>>,
}

impl<'a> FromJson<'a> for Battle<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
            arena: Nested::default(),
            game_mode: Nested::default(),
        }
    }
}

impl<'a> Battle<'a> {
    /// Battle type, e.g. `"PvP"`, `"pathOfLegend"` or `"clanMate"`
    pub fn kind(&self) -> &'a str {
        self.view.str("type")
    }

    pub fn battle_time(&self) -> Option<DateTime<Utc>> {
        self.view.time("battleTime")
    }

    pub fn is_ladder_tournament(&self) -> bool {
        self.view.flag("isLadderTournament")
    }

    pub fn is_hosted_match(&self) -> bool {
        self.view.flag("isHostedMatch")
    }

    pub fn arena(&self) -> Option<&Arena<'a>> {
        self.view.object(&self.arena, "arena")
    }

    pub fn game_mode(&self) -> Option<&GameMode<'a>> {
        self.view.object(&self.game_mode, "gameMode")
    }

    pub fn deck_selection(&self) -> &'a str {
        self.view.str("deckSelection")
    }

    /// The log owner's side (two members in 2v2)
    pub fn team(&self) -> Children<'a, TeamMember<'a>> {
        self.view.children("team")
    }

    pub fn opponent(&self) -> Children<'a, TeamMember<'a>> {
        self.view.children("opponent")
    }

    /// Decided by comparing the crowns each side took
    pub fn outcome(&self) -> Outcome {
        self.view.memo("outcome", |_| {
            if self.team().len() == 0 || self.opponent().len() == 0 {
                return Outcome::Unknown;
            }

            let ours: i64 = self.team().map(|m| m.crowns()).max().unwrap_or_default();
            let theirs: i64 = self.opponent().map(|m| m.crowns()).max().unwrap_or_default();

            match ours.cmp(&theirs) {
                std::cmp::Ordering::Greater => Outcome::Victory,
                std::cmp::Ordering::Less => Outcome::Defeat,
                std::cmp::Ordering::Equal => Outcome::Draw,
            }
        })
    }
}

/// One participant on either side of a battle
#[derive(Debug)]
pub struct TeamMember<'a> {
    view: JsonView<'a>,
    clan: Nested<ClanRef<'a>>,
}

impl<'a> FromJson<'a> for TeamMember<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
            clan: Nested::default(),
        }
    }
}

impl<'a> TeamMember<'a> {
    pub fn tag(&self) -> &'a str {
        self.view.str("tag")
    }

    pub fn name(&self) -> &'a str {
        self.view.str("name")
    }

    /// Only present for trophy-road battles
    pub fn starting_trophies(&self) -> Option<i64> {
        self.view.opt_int("startingTrophies")
    }

    /// Only present for trophy-road battles
    pub fn trophy_change(&self) -> Option<i64> {
        self.view.opt_int("trophyChange")
    }

    pub fn crowns(&self) -> i64 {
        self.view.int("crowns")
    }

    /// `None` when the king tower fell
    pub fn king_tower_hit_points(&self) -> Option<i64> {
        self.view.opt_int("kingTowerHitPoints")
    }

    /// Remaining hit points of each standing princess tower
    pub fn princess_towers_hit_points(&self) -> Vec<i64> {
        self.view.memo("princessTowersHitPoints", |value| {
            value
                .get("princessTowersHitPoints")
                .and_then(Value::as_array)
                .map(|towers| towers.iter().filter_map(Value::as_i64).collect())
                .unwrap_or_default()
        })
    }

    pub fn clan(&self) -> Option<&ClanRef<'a>> {
        self.view.object(&self.clan, "clan")
    }

    /// Deck played in this battle
    pub fn cards(&self) -> Children<'a, Card<'a>> {
        self.view.children("cards")
    }
}
