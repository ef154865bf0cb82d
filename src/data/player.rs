//! Player profile
//!
//! Wraps the body of `/players/{tag}`. All scalar counters default to 0 and
//! text to `""` when the API omits them; the clan, arena and league data are
//! `None` for players who have none.

use serde_json::Value;

use super::{
    Achievement, Arena, Badge, Card, Children, ClanRef, ClanRole, FromJson, JsonView, Nested,
};

/// A player's profile and statistics
#[derive(Debug)]
pub struct Player<'a> {
    view: JsonView<'a>,
    clan: Nested<ClanRef<'a>>,
    arena: Nested<Arena<'a>>,
    league_statistics: Nested<LeagueStatistics<'a>>,
    favourite_card: Nested<Card<'a>>,
}

impl<'a> FromJson<'a> for Player<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
            clan: Nested::default(),
            arena: Nested::default(),
            league_statistics: Nested::default(),
            favourite_card: Nested::default(),
        }
    }
}

impl<'a> Player<'a> {
    pub fn tag(&self) -> &'a str {
        self.view.str("tag")
    }

    pub fn name(&self) -> &'a str {
        self.view.str("name")
    }

    pub fn experience_level(&self) -> i64 {
        self.view.int("expLevel")
    }

    /// Experience gathered within the current level
    pub fn exp_points(&self) -> i64 {
        self.view.int("expPoints")
    }

    pub fn total_exp_points(&self) -> i64 {
        self.view.int("totalExpPoints")
    }

    pub fn star_points(&self) -> i64 {
        self.view.int("starPoints")
    }

    pub fn trophies(&self) -> i64 {
        self.view.int("trophies")
    }

    pub fn best_trophies(&self) -> i64 {
        self.view.int("bestTrophies")
    }

    pub fn wins(&self) -> i64 {
        self.view.int("wins")
    }

    pub fn losses(&self) -> i64 {
        self.view.int("losses")
    }

    pub fn battle_count(&self) -> i64 {
        self.view.int("battleCount")
    }

    pub fn three_crown_wins(&self) -> i64 {
        self.view.int("threeCrownWins")
    }

    pub fn challenge_cards_won(&self) -> i64 {
        self.view.int("challengeCardsWon")
    }

    pub fn challenge_max_wins(&self) -> i64 {
        self.view.int("challengeMaxWins")
    }

    pub fn tournament_cards_won(&self) -> i64 {
        self.view.int("tournamentCardsWon")
    }

    pub fn tournament_battle_count(&self) -> i64 {
        self.view.int("tournamentBattleCount")
    }

    /// Wins over decided games, `None` before the first win or loss
    pub fn win_rate(&self) -> Option<f64> {
        self.view.memo("winRate", |_| {
            let (wins, losses) = (self.wins(), self.losses());
            let decided = wins + losses;
            (decided > 0).then(|| wins as f64 / decided as f64)
        })
    }

    /// Role in the current clan
    pub fn role(&self) -> ClanRole {
        self.view.memo("role", |value| {
            value
                .get("role")
                .and_then(Value::as_str)
                .map(ClanRole::from_api)
                .unwrap_or(ClanRole::Unknown)
        })
    }

    /// Cards donated this week
    pub fn donations(&self) -> i64 {
        self.view.int("donations")
    }

    /// Cards received this week
    pub fn donations_received(&self) -> i64 {
        self.view.int("donationsReceived")
    }

    pub fn total_donations(&self) -> i64 {
        self.view.int("totalDonations")
    }

    pub fn war_day_wins(&self) -> i64 {
        self.view.int("warDayWins")
    }

    pub fn clan_cards_collected(&self) -> i64 {
        self.view.int("clanCardsCollected")
    }

    pub fn clan(&self) -> Option<&ClanRef<'a>> {
        self.view.object(&self.clan, "clan")
    }

    pub fn clan_tag(&self) -> Option<&'a str> {
        self.view.opt_str("clan.tag")
    }

    pub fn clan_name(&self) -> Option<&'a str> {
        self.view.opt_str("clan.name")
    }

    pub fn clan_badge_id(&self) -> Option<i64> {
        self.view.opt_int("clan.badgeId")
    }

    pub fn arena(&self) -> Option<&Arena<'a>> {
        self.view.object(&self.arena, "arena")
    }

    pub fn current_arena_id(&self) -> Option<i64> {
        self.view.opt_int("arena.id")
    }

    pub fn current_arena_name(&self) -> Option<&'a str> {
        self.view.opt_str("arena.name")
    }

    pub fn league_statistics(&self) -> Option<&LeagueStatistics<'a>> {
        self.view.object(&self.league_statistics, "leagueStatistics")
    }

    /// Every card the player has unlocked
    pub fn cards(&self) -> Children<'a, Card<'a>> {
        self.view.children("cards")
    }

    pub fn current_deck(&self) -> Children<'a, Card<'a>> {
        self.view.children("currentDeck")
    }

    pub fn current_favourite_card(&self) -> Option<&Card<'a>> {
        self.view.object(&self.favourite_card, "currentFavouriteCard")
    }

    pub fn badges(&self) -> Children<'a, Badge<'a>> {
        self.view.children("badges")
    }

    pub fn achievements(&self) -> Children<'a, Achievement<'a>> {
        self.view.children("achievements")
    }

    /// The underlying JSON object, for fields this wrapper does not cover
    pub fn raw(&self) -> &'a Value {
        self.view.value()
    }
}

/// Ladder results for the current, previous and best seasons
#[derive(Debug)]
pub struct LeagueStatistics<'a> {
    view: JsonView<'a>,
    current_season: Nested<Season<'a>>,
    previous_season: Nested<Season<'a>>,
    best_season: Nested<Season<'a>>,
}

impl<'a> FromJson<'a> for LeagueStatistics<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
            current_season: Nested::default(),
            previous_season: Nested::default(),
            best_season: Nested::default(),
        }
    }
}

impl<'a> LeagueStatistics<'a> {
    pub fn current_season(&self) -> Option<&Season<'a>> {
        self.view.object(&self.current_season, "currentSeason")
    }

    pub fn previous_season(&self) -> Option<&Season<'a>> {
        self.view.object(&self.previous_season, "previousSeason")
    }

    pub fn best_season(&self) -> Option<&Season<'a>> {
        self.view.object(&self.best_season, "bestSeason")
    }

    pub fn current_season_trophies(&self) -> Option<i64> {
        self.view.opt_int("currentSeason.trophies")
    }

    pub fn current_season_best_trophies(&self) -> Option<i64> {
        self.view.opt_int("currentSeason.bestTrophies")
    }

    pub fn previous_season_id(&self) -> Option<&'a str> {
        self.view.opt_str("previousSeason.id")
    }

    pub fn previous_season_trophies(&self) -> Option<i64> {
        self.view.opt_int("previousSeason.trophies")
    }

    pub fn previous_season_best_trophies(&self) -> Option<i64> {
        self.view.opt_int("previousSeason.bestTrophies")
    }

    pub fn best_season_id(&self) -> Option<&'a str> {
        self.view.opt_str("bestSeason.id")
    }

    pub fn best_season_trophies(&self) -> Option<i64> {
        self.view.opt_int("bestSeason.trophies")
    }
}

/// One season's ladder result
#[derive(Debug)]
pub struct Season<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for Season<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> Season<'a> {
    /// Season identifier such as `"2024-01"`; the current season has none
    pub fn id(&self) -> Option<&'a str> {
        self.view.opt_str("id")
    }

    pub fn trophies(&self) -> i64 {
        self.view.int("trophies")
    }

    pub fn best_trophies(&self) -> Option<i64> {
        self.view.opt_int("bestTrophies")
    }
}
