//! Endpoint templates and URL construction

use url::Url;

use super::ApiError;

/// Base URL for the official API
pub const API_BASE_URL: &str = "https://api.clashroyale.com/v1";

/// One fetchable resource, identified by a player or clan tag
///
/// Tags are opaque and conventionally start with `#`; they are percent-encoded
/// when placed in the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint<'a> {
    /// `/players/{tag}`
    Player(&'a str),
    /// `/players/{tag}/battlelog`
    BattleLog(&'a str),
    /// `/players/{tag}/upcomingchests`
    UpcomingChests(&'a str),
    /// `/clans/{tag}`
    Clan(&'a str),
    /// `/clans/{tag}/riverracelog`
    RiverRaceLog(&'a str),
}

impl<'a> Endpoint<'a> {
    /// The tag this endpoint refers to
    pub fn tag(&self) -> &'a str {
        match *self {
            Endpoint::Player(tag)
            | Endpoint::BattleLog(tag)
            | Endpoint::UpcomingChests(tag)
            | Endpoint::Clan(tag)
            | Endpoint::RiverRaceLog(tag) => tag,
        }
    }

    /// Raw path segments, before encoding
    fn segments(&self) -> Vec<&'a str> {
        let tag = self.tag();
        match self {
            Endpoint::Player(_) => vec!["players", tag],
            Endpoint::BattleLog(_) => vec!["players", tag, "battlelog"],
            Endpoint::UpcomingChests(_) => vec!["players", tag, "upcomingchests"],
            Endpoint::Clan(_) => vec!["clans", tag],
            Endpoint::RiverRaceLog(_) => vec!["clans", tag, "riverracelog"],
        }
    }

    /// Builds the full request URL under `base`
    ///
    /// Every segment is percent-encoded, so `#` in a tag becomes `%23`.
    /// The same endpoint and base always produce the same URL.
    pub fn url(&self, base: &Url) -> Result<Url, ApiError> {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(base.to_string()))?
            .pop_if_empty()
            .extend(self.segments());
        Ok(url)
    }
}

/// Parses and checks a base URL for use with `Endpoint::url`
pub fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}
