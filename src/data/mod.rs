//! Typed wrappers over API response bodies
//!
//! Wrappers borrow from a [`Payload`](crate::client::Payload) and convert
//! fields lazily: nothing is read until an accessor asks for it, and each
//! field is converted at most once per wrapper.

mod battle;
mod card;
mod chest;
mod clan;
mod common;
mod player;
mod progress;
mod river_race;
mod view;

pub use battle::{Battle, BattleLog, Outcome, TeamMember};
pub use card::Card;
pub use chest::{Chest, UpcomingChests};
pub use clan::{Clan, ClanMember};
pub use common::{Arena, ClanRef, ClanRole, GameMode, Location};
pub use player::{LeagueStatistics, Player, Season};
pub use progress::{Achievement, Badge, Progress};
pub use river_race::{RaceClan, RaceParticipant, RiverRace, RiverRaceLog, Standing};
pub use view::{parse_timestamp, Children, FromJson, JsonView, Nested};
