//! Album entity and paging types shared by the service, resolvers and handlers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The album entity. `id` is unset for an album that has not been saved yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
}

impl Album {
    pub fn new(id: i64) -> Self {
        Album {
            id: Some(id),
            ..Album::default()
        }
    }
}

/// Filters for list, count and search. Each set field is a case-insensitive substring match;
/// unset fields match every album.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlbumCriteria {
    pub title_contains: Option<String>,
    pub artist_contains: Option<String>,
    /// Free text matched against title or artist.
    pub text: Option<String>,
}

impl AlbumCriteria {
    pub fn search(text: impl Into<String>) -> Self {
        AlbumCriteria {
            text: Some(text.into()),
            ..AlbumCriteria::default()
        }
    }

    pub fn matches(&self, album: &Album) -> bool {
        let title = Some(album.title.as_str());
        let artist = album.artist.as_deref();
        contains(title, self.title_contains.as_deref())
            && contains(artist, self.artist_contains.as_deref())
            && match self.text.as_deref() {
                Some(text) => contains(title, Some(text)) || contains(artist, Some(text)),
                None => true,
            }
    }
}

fn contains(value: Option<&str>, needle: Option<&str>) -> bool {
    match (value, needle) {
        (_, None) => true,
        (Some(v), Some(n)) => v.to_lowercase().contains(&n.to_lowercase()),
        (None, Some(_)) => false,
    }
}

/// Sort order on one album property (camelCase name as the client sends it).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sort {
    pub property: String,
    pub ascending: bool,
}

impl Sort {
    /// Parse `property,asc` / `property,desc`. A missing direction means ascending.
    pub fn parse(s: &str) -> Option<Sort> {
        let mut parts = s.split(',');
        let property = parts.next()?.trim();
        if property.is_empty() {
            return None;
        }
        let ascending = !matches!(parts.next().map(str::trim), Some(d) if d.eq_ignore_ascii_case("desc"));
        Some(Sort {
            property: property.to_string(),
            ascending,
        })
    }
}

impl Default for Sort {
    fn default() -> Self {
        Sort {
            property: "id".into(),
            ascending: true,
        }
    }
}

/// Zero-based page request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_parses_direction() {
        assert_eq!(
            Sort::parse("releaseDate,desc"),
            Some(Sort {
                property: "releaseDate".into(),
                ascending: false
            })
        );
        assert_eq!(Sort::parse("title"), Some(Sort { property: "title".into(), ascending: true }));
        assert_eq!(Sort::parse(",asc"), None);
    }

    #[test]
    fn album_json_is_camel_case_and_omits_empty_fields() {
        let album = Album {
            id: Some(7),
            title: "Blue".into(),
            artist: None,
            release_date: NaiveDate::from_ymd_opt(1971, 6, 22),
        };
        let v = serde_json::to_value(&album).unwrap();
        assert_eq!(v, serde_json::json!({"id": 7, "title": "Blue", "releaseDate": "1971-06-22"}));
    }

    #[test]
    fn criteria_match_case_insensitive_substrings() {
        let album = Album {
            id: Some(1),
            title: "A Love Supreme".into(),
            artist: Some("John Coltrane".into()),
            release_date: None,
        };
        assert!(AlbumCriteria::default().matches(&album));
        assert!(AlbumCriteria { title_contains: Some("love".into()), ..Default::default() }.matches(&album));
        assert!(!AlbumCriteria { artist_contains: Some("davis".into()), ..Default::default() }.matches(&album));
        assert!(AlbumCriteria::search("COLTRANE").matches(&album));
        assert!(!AlbumCriteria::search("blue").matches(&album));

        let no_artist = Album { artist: None, ..album };
        assert!(!AlbumCriteria { artist_contains: Some("j".into()), ..Default::default() }.matches(&no_artist));
    }

    #[test]
    fn page_request_offset() {
        let req = PageRequest { page: 3, size: 20, sort: Sort::default() };
        assert_eq!(req.offset(), 60);
    }
}
