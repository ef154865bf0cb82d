//! Upcoming chest cycle

use serde_json::Value;

use super::{Children, FromJson, JsonView};

/// Body of `/players/{tag}/upcomingchests`
#[derive(Debug)]
pub struct UpcomingChests<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for UpcomingChests<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> UpcomingChests<'a> {
    /// Chests in the order they will be opened
    pub fn chests(&self) -> Children<'a, Chest<'a>> {
        self.view.children("items")
    }

    /// Position of the next chest with this name
    pub fn next_index_of(&self, name: &str) -> Option<i64> {
        self.chests()
            .find(|chest| chest.name() == name)
            .map(|chest| chest.index())
    }
}

/// One upcoming chest
#[derive(Debug)]
pub struct Chest<'a> {
    view: JsonView<'a>,
}

impl<'a> FromJson<'a> for Chest<'a> {
    fn from_json(value: &'a Value) -> Self {
        Self {
            view: JsonView::new(value),
        }
    }
}

impl<'a> Chest<'a> {
    /// How many chests away this one is; 0 is the next chest
    pub fn index(&self) -> i64 {
        self.view.int("index")
    }

    pub fn name(&self) -> &'a str {
        self.view.str("name")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chest_cycle() {
        let value = json!({
            "items": [
                { "index": 0, "name": "Golden Chest" },
                { "index": 1, "name": "Silver Chest" },
                { "index": 8, "name": "Magical Chest" },
                { "index": 9, "name": "Silver Chest" }
            ]
        });
        let upcoming = UpcomingChests::from_json(&value);

        assert_eq!(upcoming.chests().len(), 4);
        let first = upcoming.chests().next().unwrap();
        assert_eq!(first.index(), 0);
        assert_eq!(first.name(), "Golden Chest");

        assert_eq!(upcoming.next_index_of("Silver Chest"), Some(1));
        assert_eq!(upcoming.next_index_of("Magical Chest"), Some(8));
        assert_eq!(upcoming.next_index_of("Legendary Chest"), None);
    }

    #[test]
    fn test_no_items_is_an_empty_cycle() {
        let value = json!({});
        let upcoming = UpcomingChests::from_json(&value);

        assert_eq!(upcoming.chests().count(), 0);
        assert_eq!(upcoming.next_index_of("Golden Chest"), None);
    }
}
