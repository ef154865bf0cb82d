//! Badges and achievements: named counters working towards a target

use serde_json::Value;

use super::{FromJson, JsonView};

/// Shared shape of badges and achievements
pub trait Progress<'a> {
    fn name(&self) -> &'a str;

    /// Current value of the counter
    fn progress(&self) -> i64;

    /// Value needed for the next level; 0 when there is none
    fn target(&self) -> i64;

    fn is_complete(&self) -> bool {
        self.target() > 0 && self.progress() >= self.target()
    }
}

/// A profile badge (mastery, yearly service, ...)
#[derive(Debug)]
pub struct Badge<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for Badge<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> Badge<'a> {
    /// Current level; one-off badges have none
    pub fn level(&self) -> Option<i64> {
        self.view.opt_int("level")
    }

    pub fn max_level(&self) -> Option<i64> {
        self.view.opt_int("maxLevel")
    }

    pub fn icon_url(&self) -> Option<&'a str> {
        self.view.opt_str("iconUrls.large")
    }

    pub fn is_max_level(&self) -> bool {
        match (self.level(), self.max_level()) {
            (Some(level), Some(max)) => level >= max,
            _ => false,
        }
    }
}

impl<'a> Progress<'a> for Badge<'a> {
    fn name(&self) -> &'a str {
        self.view.str("name")
    }

    fn progress(&self) -> i64 {
        self.view.int("progress")
    }

    fn target(&self) -> i64 {
        self.view.int("target")
    }
}

/// An in-game achievement with star tiers
#[derive(Debug)]
pub struct Achievement<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for Achievement<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> Achievement<'a> {
    /// Stars earned, 0 to 3
    pub fn stars(&self) -> i64 {
        self.view.int("stars")
    }

    pub fn info(&self) -> &'a str {
        self.view.str("info")
    }

    pub fn completion_info(&self) -> Option<&'a str> {
        self.view.opt_str("completionInfo")
    }
}

impl<'a> Progress<'a> for Achievement<'a> {
    fn name(&self) -> &'a str {
        self.view.str("name")
    }

    fn progress(&self) -> i64 {
        self.view.int("value")
    }

    fn target(&self) -> i64 {
        self.view.int("target")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_badge_fields() {
        let value = json!({
            "name": "Classic12Wins",
            "level": 3,
            "maxLevel": 8,
            "progress": 27,
            "target": 30,
            "iconUrls": { "large": "https://cdn.example/badge.png" }
        });
        let badge = Badge::from_json(&value);

        assert_eq!(badge.name(), "Classic12Wins");
        assert_eq!(badge.level(), Some(3));
        assert_eq!(badge.max_level(), Some(8));
        assert_eq!(badge.progress(), 27);
        assert_eq!(badge.target(), 30);
        assert!(!badge.is_complete());
        assert!(!badge.is_max_level());
        assert_eq!(badge.icon_url(), Some("https://cdn.example/badge.png"));
    }

    #[test]
    fn test_one_off_badge_has_no_level() {
        let value = json!({ "name": "ClanWarWins", "progress": 1 });
        let badge = Badge::from_json(&value);

        assert_eq!(badge.level(), None);
        assert!(!badge.is_max_level());
        assert!(!badge.is_complete(), "No target means nothing to complete");
    }

    #[test]
    fn test_achievement_fields() {
        let value = json!({
            "name": "Team Player",
            "stars": 3,
            "value": 1,
            "target": 1,
            "info": "Join a Clan",
            "completionInfo": null
        });
        let achievement = Achievement::from_json(&value);

        assert_eq!(achievement.name(), "Team Player");
        assert_eq!(achievement.stars(), 3);
        assert_eq!(achievement.progress(), 1);
        assert_eq!(achievement.target(), 1);
        assert!(achievement.is_complete());
        assert_eq!(achievement.info(), "Join a Clan");
        assert_eq!(achievement.completion_info(), None);
    }

    #[test]
    fn test_progress_is_usable_generically() {
        fn completed<'a, P: Progress<'a>>(items: impl Iterator<Item = P>) -> Vec<&'a str> {
            items.filter(|p| p.is_complete()).map(|p| p.name()).collect()
        }

        let value = json!([
            { "name": "Done", "value": 5, "target": 5 },
            { "name": "Pending", "value": 2, "target": 5 }
        ]);
        let items = value
            .as_array()
            .unwrap()
            .iter()
            .map(Achievement::from_json);

        assert_eq!(completed(items), vec!["Done"]);
    }
}
