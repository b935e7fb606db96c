use super::image::{self, ImageSize, ImageVariant};

/// Represent a track as listed for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    pub name: String,
    pub artist_name: String,
    pub url: String,
    pub images: TrackImages,
    pub kind: TrackKind,
}

/// Mode specific part of a [`TrackRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Recent { now_playing: bool },
    Top { play_count: u64 },
}

/// Artwork urls of a track. Always concrete urls, placeholder at worst.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackImages {
    pub medium: String,
    pub large: String,
}

impl TrackImages {
    pub fn from_variants(variants: &[ImageVariant]) -> Self {
        Self {
            medium: image::resolve(variants, ImageSize::Medium),
            large: image::resolve(variants, ImageSize::Large),
        }
    }
}

impl TrackRecord {
    pub fn now_playing(&self) -> bool {
        matches!(self.kind, TrackKind::Recent { now_playing: true })
    }

    pub fn play_count(&self) -> Option<u64> {
        match self.kind {
            TrackKind::Top { play_count } => Some(play_count),
            TrackKind::Recent { .. } => None,
        }
    }
}

/// Enrichment fetched with `track.getinfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub album: Option<AlbumInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumInfo {
    pub title: String,
    pub artist_name: String,
    pub url: String,
    pub images: Vec<ImageVariant>,
}

/// Everything the widget template needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetPayload {
    pub title: String,
    pub thumbnails: Vec<String>,
    pub tracks: Vec<TrackRecord>,
}
