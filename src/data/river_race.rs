//! River race log
//!
//! `/clans/{tag}/riverracelog` lists finished river races. Each race has the
//! final standings of every clan in the group, and each clan its participants.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{Children, FromJson, JsonView, Nested};

/// Body of `/clans/{tag}/riverracelog`
#[derive(Debug)]
pub struct RiverRaceLog<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for RiverRaceLog<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> RiverRaceLog<'a> {
    /// Races, most recent first
    pub fn races(&self) -> Children<'a, RiverRace<'a>> {
        self.view.children("items")
    }
}

/// One finished river race
#[derive(Debug)]
pub struct RiverRace<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for RiverRace<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> RiverRace<'a> {
    pub fn season_id(&self) -> i64 {
        self.view.int("seasonId")
    }

    /// Week of the season
    pub fn section_index(&self) -> i64 {
        self.view.int("sectionIndex")
    }

    pub fn created_date(&self) -> Option<DateTime<Utc>> {
        self.view.time("createdDate")
    }

    pub fn standings(&self) -> Children<'a, Standing<'a>> {
        self.view.children("standings")
    }

    /// Standing of the clan with the given tag
    pub fn standing_of(&self, clan_tag: &str) -> Option<Standing<'a>> {
        self.standings()
            .find(|standing| standing.clan().is_some_and(|clan| clan.tag() == clan_tag))
    }
}

/// A clan's final placement in a race
#[derive(Debug)]
pub struct Standing<'a> {
    view: JsonView<'a>,
    clan: Nested<RaceClan<'a>>,
}

impl<'a> FromJson<'a> for Standing<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
            clan: Nested::default(),
        }
    }
}

impl<'a> Standing<'a> {
    pub fn rank(&self) -> i64 {
        self.view.int("rank")
    }

    pub fn trophy_change(&self) -> i64 {
        self.view.int("trophyChange")
    }

    pub fn clan(&self) -> Option<&RaceClan<'a>> {
        self.view.object(&self.clan, "clan")
    }
}

/// A clan's race results
#[derive(Debug)]
pub struct RaceClan<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for RaceClan<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> RaceClan<'a> {
    pub fn tag(&self) -> &'a str {
        self.view.str("tag")
    }

    pub fn name(&self) -> &'a str {
        self.view.str("name")
    }

    pub fn badge_id(&self) -> i64 {
        self.view.int("badgeId")
    }

    pub fn fame(&self) -> i64 {
        self.view.int("fame")
    }

    pub fn repair_points(&self) -> i64 {
        self.view.int("repairPoints")
    }

    /// When the clan crossed the finish line; `None` if it never did
    ///
    /// The API reports an unfinished race as one second before the Unix
    /// epoch, so any pre-epoch time reads as `None`.
    pub fn finish_time(&self) -> Option<DateTime<Utc>> {
        self.view
            .time("finishTime")
            .filter(|finished| finished.timestamp() >= 0)
    }

    pub fn clan_score(&self) -> i64 {
        self.view.int("clanScore")
    }

    pub fn participants(&self) -> Children<'a, RaceParticipant<'a>> {
        self.view.children("participants")
    }
}

/// One member's contribution to a race
#[derive(Debug)]
pub struct RaceParticipant<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for RaceParticipant<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> RaceParticipant<'a> {
    pub fn tag(&self) -> &'a str {
        self.view.str("tag")
    }

    pub fn name(&self) -> &'a str {
        self.view.str("name")
    }

    pub fn fame(&self) -> i64 {
        self.view.int("fame")
    }

    pub fn repair_points(&self) -> i64 {
        self.view.int("repairPoints")
    }

    pub fn boat_attacks(&self) -> i64 {
        self.view.int("boatAttacks")
    }

    pub fn decks_used(&self) -> i64 {
        self.view.int("decksUsed")
    }

    pub fn decks_used_today(&self) -> i64 {
        self.view.int("decksUsedToday")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "items": [{
                "seasonId": 120,
                "sectionIndex": 2,
                "createdDate": "20250106T094500.000Z",
                "standings": [
                    {
                        "rank": 1,
                        "trophyChange": 20,
                        "clan": {
                            "tag": "#RIVAL",
                            "name": "Rivals",
                            "badgeId": 9,
                            "fame": 10000,
                            "repairPoints": 0,
                            "finishTime": "20250105T120000.000Z",
                            "clanScore": 4300,
                            "participants": []
                        }
                    },
                    {
                        "rank": 2,
                        "trophyChange": 10,
                        "clan": {
                            "tag": "#ABC",
                            "name": "Ash Fans",
                            "badgeId": 5,
                            "fame": 9800,
                            "repairPoints": 0,
                            "finishTime": "19691231T235959.000Z",
                            "clanScore": 4200,
                            "participants": [
                                { "tag": "#2VVYYRVYP", "name": "Ash", "fame": 3600, "repairPoints": 0, "boatAttacks": 1, "decksUsed": 16, "decksUsedToday": 0 },
                                { "tag": "#MISTY", "name": "Misty", "fame": 0, "decksUsed": 0 }
                            ]
                        }
                    }
                ]
            }]
        })
    }

    #[test]
    fn test_race_fields() {
        let value = sample();
        let log = RiverRaceLog::from_json(&value);
        let race = log.races().next().unwrap();

        assert_eq!(race.season_id(), 120);
        assert_eq!(race.section_index(), 2);
        assert_eq!(race.created_date().map(|t| t.day()), Some(6));
        assert_eq!(race.standings().len(), 2);
    }

    #[test]
    fn test_standing_and_clan_fields() {
        let value = sample();
        let log = RiverRaceLog::from_json(&value);
        let race = log.races().next().unwrap();

        let ours = race.standing_of("#ABC").expect("Our clan took part");
        assert_eq!(ours.rank(), 2);
        assert_eq!(ours.trophy_change(), 10);

        let clan = ours.clan().unwrap();
        assert_eq!(clan.name(), "Ash Fans");
        assert_eq!(clan.badge_id(), 5);
        assert_eq!(clan.fame(), 9800);
        assert_eq!(clan.repair_points(), 0);
        assert_eq!(clan.clan_score(), 4200);
        assert_eq!(clan.finish_time(), None, "Unfinished race sentinel");

        let winner = race.standing_of("#RIVAL").unwrap();
        let finished = winner.clan().unwrap().finish_time();
        assert_eq!(finished.map(|t| (t.year(), t.day())), Some((2025, 5)));

        assert!(race.standing_of("#NOBODY").is_none());
    }

    #[test]
    fn test_participants() {
        let value = sample();
        let log = RiverRaceLog::from_json(&value);
        let race = log.races().next().unwrap();
        let standing = race.standing_of("#ABC").unwrap();
        let clan = standing.clan().unwrap();

        let ash = clan.participants().next().unwrap();
        assert_eq!(ash.tag(), "#2VVYYRVYP");
        assert_eq!(ash.name(), "Ash");
        assert_eq!(ash.fame(), 3600);
        assert_eq!(ash.repair_points(), 0);
        assert_eq!(ash.boat_attacks(), 1);
        assert_eq!(ash.decks_used(), 16);
        assert_eq!(ash.decks_used_today(), 0);

        let idle: Vec<_> = clan
            .participants()
            .filter(|p| p.decks_used() == 0)
            .map(|p| p.name())
            .collect();
        assert_eq!(idle, vec!["Misty"]);
    }

    #[test]
    fn test_missing_finish_time() {
        let value = json!({ "tag": "#ABC" });
        assert_eq!(RaceClan::from_json(&value).finish_time(), None);
    }

    #[test]
    fn test_empty_log() {
        let value = json!({ "items": [] });
        assert_eq!(RiverRaceLog::from_json(&value).races().count(), 0);
    }
}
