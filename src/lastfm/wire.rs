//! Raw JSON shapes returned by the Last.fm API.
//!
//! Recent and top track listings describe the same things with different
//! nesting (`artist["#text"]` vs `artist.name`), so each gets its own struct.

use serde::Deserialize;

use crate::domain::image::ImageVariant;

#[derive(Debug, Deserialize)]
pub struct WireImage {
    #[serde(rename = "#text", default)]
    pub url: String,
    #[serde(default)]
    pub size: String,
}

impl From<WireImage> for ImageVariant {
    fn from(image: WireImage) -> Self {
        ImageVariant::new(image.size, image.url)
    }
}

#[derive(Debug, Deserialize)]
pub struct TextItem {
    #[serde(rename = "#text")]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RecentTracksResponse {
    pub recenttracks: RecentTracks,
}

#[derive(Debug, Deserialize)]
pub struct RecentTracks {
    #[serde(default)]
    pub track: Vec<RecentTrack>,
}

#[derive(Debug, Deserialize)]
pub struct RecentTrack {
    pub name: String,
    pub url: String,
    pub artist: TextItem,
    #[serde(default)]
    pub image: Vec<WireImage>,
    #[serde(rename = "@attr")]
    pub attr: Option<RecentTrackAttr>,
}

#[derive(Debug, Deserialize)]
pub struct RecentTrackAttr {
    pub nowplaying: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopTracksResponse {
    pub toptracks: TopTracks,
}

#[derive(Debug, Deserialize)]
pub struct TopTracks {
    #[serde(default)]
    pub track: Vec<TopTrack>,
}

#[derive(Debug, Deserialize)]
pub struct TopTrack {
    pub name: String,
    pub url: String,
    pub artist: TopTrackArtist,
    #[serde(default)]
    pub image: Vec<WireImage>,
    pub playcount: String,
}

#[derive(Debug, Deserialize)]
pub struct TopTrackArtist {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TrackInfoResponse {
    pub track: WireTrackInfo,
}

#[derive(Debug, Deserialize)]
pub struct WireTrackInfo {
    pub album: Option<WireAlbum>,
}

#[derive(Debug, Deserialize)]
pub struct WireAlbum {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: Vec<WireImage>,
}
