//! JSON bodies shaped like real Last.fm responses, for tests

use serde_json::{Value, json};

use crate::domain::image::FALLBACK_ARTWORK;

pub const PLACEHOLDER_LARGE: &str = FALLBACK_ARTWORK;

fn image_list(large: &str) -> Value {
    // Last.fm derives every tier from the same asset.
    let tier = |size: &str| large.replace("/174s/", &format!("/{size}/"));
    json!([
        { "size": "small", "#text": tier("34s") },
        { "size": "medium", "#text": tier("64s") },
        { "size": "large", "#text": large },
        { "size": "extralarge", "#text": tier("300x300") },
    ])
}

pub fn art(id: &str) -> String {
    format!("https://lastfm.freetls.fastly.net/i/u/174s/{id}.png")
}

/// `(name, artist, large image, now playing)`
pub fn recent_tracks(tracks: &[(&str, &str, &str, bool)]) -> String {
    let tracks: Vec<Value> = tracks
        .iter()
        .map(|(name, artist, large, now_playing)| {
            let mut track = json!({
                "artist": { "mbid": "", "#text": artist },
                "streamable": "0",
                "image": image_list(large),
                "mbid": "",
                "album": { "mbid": "", "#text": "Some Album" },
                "name": name,
                "url": format!("https://www.last.fm/music/{artist}/_/{name}"),
            });
            if *now_playing {
                track["@attr"] = json!({ "nowplaying": "true" });
            } else {
                track["date"] = json!({ "uts": "1700000000", "#text": "14 Nov 2023, 22:13" });
            }
            track
        })
        .collect();

    json!({
        "recenttracks": {
            "track": tracks,
            "@attr": { "user": "alice", "totalPages": "1", "page": "1", "perPage": "50", "total": "3" }
        }
    })
    .to_string()
}

/// `(name, artist, large image, play count)`
pub fn top_tracks(tracks: &[(&str, &str, &str, u64)]) -> String {
    let tracks: Vec<Value> = tracks
        .iter()
        .enumerate()
        .map(|(rank, (name, artist, large, plays))| {
            json!({
                "streamable": { "fulltrack": "0", "#text": "0" },
                "mbid": "",
                "name": name,
                "image": image_list(large),
                "artist": {
                    "url": format!("https://www.last.fm/music/{artist}"),
                    "name": artist,
                    "mbid": "",
                },
                "url": format!("https://www.last.fm/music/{artist}/_/{name}"),
                "duration": "240",
                "@attr": { "rank": (rank + 1).to_string() },
                "playcount": plays.to_string(),
            })
        })
        .collect();

    json!({
        "toptracks": {
            "track": tracks,
            "@attr": { "user": "bob", "totalPages": "1", "page": "1", "perPage": "50", "total": "3" }
        }
    })
    .to_string()
}

/// `track.getinfo` body, with an album when `album_art` is given
pub fn track_info(album_art: Option<&str>) -> String {
    let mut track = json!({
        "name": "Song",
        "url": "https://www.last.fm/music/Band/_/Song",
        "duration": "240000",
        "artist": { "name": "Band", "url": "https://www.last.fm/music/Band" },
    });
    if let Some(large) = album_art {
        track["album"] = json!({
            "artist": "Band",
            "title": "Record",
            "url": "https://www.last.fm/music/Band/Record",
            "image": image_list(large),
        });
    }
    json!({ "track": track }).to_string()
}

pub fn error_body(code: i64, message: &str) -> String {
    json!({ "error": code, "message": message }).to_string()
}
