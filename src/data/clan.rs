//! Clan profile and member list

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{Arena, Children, ClanRole, FromJson, JsonView, Location, Nested};

/// Body of `/clans/{tag}`
#[derive(Debug)]
pub struct Clan<'a> {
    view: JsonView<'a>,
    location: Nested<Location<'a>>,
}

impl<'a> FromJson<'a> for Clan<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
            location: Nested::default(),
        }
    }
}

impl<'a> Clan<'a> {
    pub fn tag(&self) -> &'a str {
        self.view.str("tag")
    }

    pub fn name(&self) -> &'a str {
        self.view.str("name")
    }

    /// Joining policy: `"open"`, `"inviteOnly"` or `"closed"`
    pub fn kind(&self) -> &'a str {
        self.view.str("type")
    }

    pub fn description(&self) -> &'a str {
        self.view.str("description")
    }

    pub fn badge_id(&self) -> i64 {
        self.view.int("badgeId")
    }

    pub fn clan_score(&self) -> i64 {
        self.view.int("clanScore")
    }

    pub fn clan_war_trophies(&self) -> i64 {
        self.view.int("clanWarTrophies")
    }

    pub fn required_trophies(&self) -> i64 {
        self.view.int("requiredTrophies")
    }

    pub fn donations_per_week(&self) -> i64 {
        self.view.int("donationsPerWeek")
    }

    /// Member count as reported by the API
    pub fn member_count(&self) -> i64 {
        self.view.int("members")
    }

    pub fn location(&self) -> Option<&Location<'a>> {
        self.view.object(&self.location, "location")
    }

    pub fn members(&self) -> Children<'a, ClanMember<'a>> {
        self.view.children("memberList")
    }

    /// Member with the given tag, if present
    pub fn member(&self, tag: &str) -> Option<ClanMember<'a>> {
        self.members().find(|member| member.tag() == tag)
    }
}

/// One entry in a clan's member list
#[derive(Debug)]
pub struct ClanMember<'a> {
    view: JsonView<'a>,
    arena: Nested<Arena<'a>>,
}

impl<'a> FromJson<'a> for ClanMember<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
            arena: Nested::default(),
        }
    }
}

impl<'a> ClanMember<'a> {
    pub fn tag(&self) -> &'a str {
        self.view.str("tag")
    }

    pub fn name(&self) -> &'a str {
        self.view.str("name")
    }

    pub fn role(&self) -> ClanRole {
        self.view.memo("role", |value| {
            value
                .get("role")
                .and_then(Value::as_str)
                .map(ClanRole::from_api)
                .unwrap_or(ClanRole::Unknown)
        })
    }

    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.view.time("lastSeen")
    }

    pub fn experience_level(&self) -> i64 {
        self.view.int("expLevel")
    }

    pub fn trophies(&self) -> i64 {
        self.view.int("trophies")
    }

    pub fn arena(&self) -> Option<&Arena<'a>> {
        self.view.object(&self.arena, "arena")
    }

    pub fn clan_rank(&self) -> i64 {
        self.view.int("clanRank")
    }

    pub fn previous_clan_rank(&self) -> i64 {
        self.view.int("previousClanRank")
    }

    pub fn donations(&self) -> i64 {
        self.view.int("donations")
    }

    pub fn donations_received(&self) -> i64 {
        self.view.int("donationsReceived")
    }

    pub fn clan_chest_points(&self) -> i64 {
        self.view.int("clanChestPoints")
    }
}
