//! Artist profile and discography from `GET /api/artist` and `GET /api/albums`.

use super::extract::{extract_array, extract_f64, extract_field};
use serde_json::Value;

/// Artist profile shown on the details screen's artist tab.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArtistProfile {
    pub name: String,
    pub followers: u64,
    pub popularity: u8,
    pub spotify_url: String,
    pub image_url: String,
    pub genres: Vec<String>,
}

impl ArtistProfile {
    /// Parses the artist document; `None` when it names no artist.
    ///
    /// `followers` arrives pre-formatted with separators (`"1,234,567"`).
    #[must_use]
    pub fn from_json(json: &Value) -> Option<Self> {
        let name = extract_field(json, &["name"]);
        if name.is_empty() {
            return None;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let followers = extract_f64(json, &["followers", "followers.total"]).max(0.0) as u64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let popularity = extract_f64(json, &["popularity"]).clamp(0.0, 100.0) as u8;

        Some(Self {
            name,
            followers,
            popularity,
            spotify_url: extract_field(json, &["spotifyLink", "spotifyUrl"]),
            image_url: extract_field(json, &["image", "images.0.url"]),
            genres: extract_array(json, "genres")
                .iter()
                .filter_map(Value::as_str)
                .filter(|g| !g.trim().is_empty())
                .map(String::from)
                .collect(),
        })
    }

    /// The Spotify artist id: last path segment of the profile link.
    #[must_use]
    pub fn spotify_id(&self) -> Option<&str> {
        self.spotify_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty() && !id.contains(':'))
    }
}

/// One album in an artist's discography.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub name: String,
    pub release_date: String,
    pub total_tracks: u32,
    pub image_url: String,
    pub spotify_url: String,
}

/// Parses the albums array, newest release first, undated albums last.
#[must_use]
pub fn parse_albums(json: &Value) -> Vec<Album> {
    let mut albums: Vec<Album> = json
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .map(|album| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let total_tracks = extract_f64(album, &["totalTracks", "total_tracks"]).max(0.0) as u32;
            Album {
                name: extract_field(album, &["name"]),
                release_date: extract_field(album, &["releaseDate", "release_date"]),
                total_tracks,
                image_url: extract_field(album, &["image", "images.0.url"]),
                spotify_url: extract_field(album, &["spotifyLink", "external_urls.spotify"]),
            }
        })
        .filter(|album| !album.name.is_empty())
        .collect();

    albums.sort_by(|a, b| match (a.release_date.is_empty(), b.release_date.is_empty()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => b.release_date.cmp(&a.release_date),
    });
    albums
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_parses_formatted_followers() {
        let profile = ArtistProfile::from_json(&json!({
            "name": "Band",
            "followers": "1,234,567",
            "popularity": 87,
            "spotifyLink": "https://open.spotify.com/artist/4Z8W4fKeB5YxbusRsdQVPb",
            "image": "https://img.example/band.jpg",
            "genres": ["rock", "", "alt"]
        }))
        .unwrap();
        assert_eq!(profile.followers, 1_234_567);
        assert_eq!(profile.popularity, 87);
        assert_eq!(profile.genres, vec!["rock", "alt"]);
        assert_eq!(profile.spotify_id(), Some("4Z8W4fKeB5YxbusRsdQVPb"));
    }

    #[test]
    fn nameless_profile_is_absent() {
        assert!(ArtistProfile::from_json(&json!({ "error": "not found" })).is_none());
        assert_eq!(ArtistProfile::default().spotify_id(), None);
    }

    #[test]
    fn albums_newest_first_undated_last() {
        let albums = parse_albums(&json!([
            { "name": "Old", "releaseDate": "2001-05-01", "totalTracks": 10 },
            { "name": "Undated" },
            { "name": "New", "releaseDate": "2023-10-20", "totalTracks": 12 },
            { "name": "" }
        ]));
        let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["New", "Old", "Undated"]);
        assert_eq!(albums[0].total_tracks, 12);
        assert!(parse_albums(&json!({ "error": "x" })).is_empty());
    }
}
