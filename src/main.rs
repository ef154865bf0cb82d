//! royale - look up Clash Royale players and clans
//!
//! Fetches one resource per invocation and prints a short plain-text summary.
//! Set `RUST_LOG=royale_api=debug` to see cache and request activity.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use royale_api::cli::{normalize_tag, Cli, Command};
use royale_api::client::RoyaleClient;
use royale_api::data::{BattleLog, Clan, Outcome, Player, Progress, RiverRaceLog, UpcomingChests};

/// Sends log output to stderr so summaries on stdout stay clean
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_player(player: &Player<'_>) {
    println!("{} ({})", player.name(), player.tag());
    println!(
        "  Level {}, {} trophies (best {})",
        player.experience_level(),
        player.trophies(),
        player.best_trophies()
    );
    if let Some(arena) = player.current_arena_name() {
        println!("  Arena: {arena}");
    }
    match player.clan() {
        Some(clan) => println!(
            "  Clan: {} ({}), {}",
            clan.name(),
            clan.tag(),
            player.role().as_str()
        ),
        None => println!("  Clan: none"),
    }

    let record = format!("{} wins / {} losses", player.wins(), player.losses());
    match player.win_rate() {
        Some(rate) => println!("  Record: {record} ({:.1}%)", rate * 100.0),
        None => println!("  Record: {record}"),
    }

    let deck: Vec<_> = player.current_deck().map(|card| card.name()).collect();
    if !deck.is_empty() {
        println!("  Deck: {}", deck.join(", "));
    }

    let completed = player.achievements().filter(|a| a.is_complete()).count();
    println!(
        "  Achievements: {completed}/{} complete, {} badges",
        player.achievements().len(),
        player.badges().len()
    );
}

fn print_battles(log: &BattleLog<'_>, limit: usize) {
    if log.is_empty() {
        println!("No recent battles");
        return;
    }

    for battle in log.battles().take(limit) {
        let result = match battle.outcome() {
            Outcome::Victory => "won",
            Outcome::Defeat => "lost",
            Outcome::Draw => "draw",
            Outcome::Unknown => "?",
        };
        let opponents: Vec<_> = battle.opponent().map(|m| m.name()).collect();
        let crowns: i64 = battle.team().map(|m| m.crowns()).max().unwrap_or_default();
        let their_crowns: i64 = battle.opponent().map(|m| m.crowns()).max().unwrap_or_default();
        let when = battle
            .battle_time()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        println!(
            "{when}  {:<12} {result:<4} {crowns}-{their_crowns} vs {}",
            battle.kind(),
            opponents.join(" & ")
        );
    }
}

fn print_chests(upcoming: &UpcomingChests<'_>) {
    for chest in upcoming.chests() {
        let position = match chest.index() {
            0 => "next".to_string(),
            n => format!("+{n}"),
        };
        println!("{position:>5}  {}", chest.name());
    }
}

fn print_clan(clan: &Clan<'_>) {
    println!("{} ({})", clan.name(), clan.tag());
    if let Some(location) = clan.location() {
        println!("  Location: {}", location.name());
    }
    println!(
        "  Score {}, war trophies {}, {} members",
        clan.clan_score(),
        clan.clan_war_trophies(),
        clan.member_count()
    );
    println!(
        "  Joining: {}, {} trophies required",
        clan.kind(),
        clan.required_trophies()
    );

    for member in clan.members() {
        println!(
            "  {:>3}. {:<20} {:<9} {:>5} trophies {:>4} donated",
            member.clan_rank(),
            member.name(),
            member.role().as_str(),
            member.trophies(),
            member.donations()
        );
    }
}

fn print_river_races(log: &RiverRaceLog<'_>, clan_tag: &str) {
    let mut any = false;
    for race in log.races() {
        any = true;
        let placement = race
            .standing_of(clan_tag)
            .map(|standing| {
                let fame = standing.clan().map(|c| c.fame()).unwrap_or_default();
                format!(
                    "rank {}, {} fame, {:+} trophies",
                    standing.rank(),
                    fame,
                    standing.trophy_change()
                )
            })
            .unwrap_or_else(|| "did not take part".to_string());

        println!(
            "Season {} week {}: {placement}",
            race.season_id(),
            race.section_index() + 1
        );
    }

    if !any {
        println!("No finished river races");
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = RoyaleClient::new(cli.client_config()?)?;
    let tag = normalize_tag(cli.command.tag())?;

    match &cli.command {
        Command::Player { .. } => {
            let payload = client.player(&tag)?;
            print_player(&payload.wrap());
        }
        Command::Battles { limit, .. } => {
            let payload = client.battle_log(&tag)?;
            print_battles(&payload.wrap(), *limit);
        }
        Command::Chests { .. } => {
            let payload = client.upcoming_chests(&tag)?;
            print_chests(&payload.wrap());
        }
        Command::Clan { .. } => {
            let payload = client.clan(&tag)?;
            print_clan(&payload.wrap());
        }
        Command::RiverRace { .. } => {
            let payload = client.river_race_log(&tag)?;
            print_river_races(&payload.wrap(), &tag);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
