//! Small nested objects that appear in several responses

use serde_json::Value;

use super::{FromJson, JsonView};

/// An arena, as attached to players, members and battles
#[derive(Debug)]
pub struct Arena<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for Arena<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> Arena<'a> {
    pub fn id(&self) -> i64 {
        self.view.int("id")
    }

    pub fn name(&self) -> &'a str {
        self.view.str("name")
    }
}

/// Short clan reference embedded in player and battle data
#[derive(Debug)]
pub struct ClanRef<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for ClanRef<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> ClanRef<'a> {
    pub fn tag(&self) -> &'a str {
        self.view.str("tag")
    }

    pub fn name(&self) -> &'a str {
        self.view.str("name")
    }

    pub fn badge_id(&self) -> i64 {
        self.view.int("badgeId")
    }
}

/// Game mode of a battle
#[derive(Debug)]
pub struct GameMode<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for GameMode<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> GameMode<'a> {
    pub fn id(&self) -> i64 {
        self.view.int("id")
    }

    pub fn name(&self) -> &'a str {
        self.view.str("name")
    }
}

/// A clan's home location
#[derive(Debug)]
pub struct Location<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for Location<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> Location<'a> {
    pub fn id(&self) -> i64 {
        self.view.int("id")
    }

    pub fn name(&self) -> &'a str {
        self.view.str("name")
    }

    pub fn is_country(&self) -> bool {
        self.view.flag("isCountry")
    }

    /// ISO country code; only present for country locations
    pub fn country_code(&self) -> Option<&'a str> {
        self.view.opt_str("countryCode")
    }
}

/// A member's standing within a clan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClanRole {
    Member,
    Elder,
    CoLeader,
    Leader,
    /// The player is not in a clan
    NotMember,
    /// Absent or a value this client does not recognize
    Unknown,
}

impl ClanRole {
    /// Parses the API's role string
    pub fn from_api(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "member" => ClanRole::Member,
            "elder" => ClanRole::Elder,
            "coleader" => ClanRole::CoLeader,
            "leader" => ClanRole::Leader,
            "notmember" => ClanRole::NotMember,
            _ => ClanRole::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClanRole::Member => "member",
            ClanRole::Elder => "elder",
            ClanRole::CoLeader => "coLeader",
            ClanRole::Leader => "leader",
            ClanRole::NotMember => "notMember",
            ClanRole::Unknown => "unknown",
        }
    }
}
