use std::{sync::Arc, time::Duration};

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::{
    cache::ResponseCache,
    config::LastfmConfig,
    domain::{
        image::ImageVariant,
        period::Period,
        track::{AlbumInfo, TrackImages, TrackInfo, TrackKind, TrackRecord},
    },
    lastfm::{
        error::LastfmError,
        transport::{FetchResponse, Transport, UreqTransport},
        wire::{
            ErrorResponse, RecentTrack, RecentTracksResponse, TopTrack, TopTracksResponse,
            TrackInfoResponse, WireTrackInfo,
        },
    },
};

const RECENT_TRACKS: &str = "user.getrecenttracks";
const TOP_TRACKS: &str = "user.gettoptracks";
const TRACK_INFO: &str = "track.getinfo";

/// Client for the three Last.fm methods the widget needs
pub struct LastfmClient {
    api_root: String,
    api_key: Option<String>,
    transport: Arc<dyn Transport>,
    cache: ResponseCache,
}

impl LastfmClient {
    pub fn new(
        api_root: impl Into<String>,
        api_key: Option<String>,
        transport: Arc<dyn Transport>,
        cache: ResponseCache,
    ) -> Self {
        Self {
            api_root: api_root.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            transport,
            cache,
        }
    }

    /// Client talking to the real API through `ureq`
    pub fn from_config(config: &LastfmConfig, api_key: Option<String>, cache: ResponseCache) -> Self {
        let transport = UreqTransport::new(Duration::from_secs(config.timeout_secs));
        Self::new(config.api_root.clone(), api_key, Arc::new(transport), cache)
    }

    /// Fails when no API key is available, without touching the network.
    pub fn ensure_configured(&self) -> Result<(), LastfmError> {
        self.api_key().map(|_| ())
    }

    fn api_key(&self) -> Result<&str, LastfmError> {
        self.api_key.as_deref().ok_or(LastfmError::MissingApiKey)
    }

    /// Builds the request url. Parameter order is stable so equal requests
    /// produce equal cache keys.
    fn method_url(&self, method: &str, params: &[(&str, &str)]) -> Result<String, LastfmError> {
        let api_key = self.api_key()?;

        let mut query = vec![format!("method={method}")];
        query.extend(
            params
                .iter()
                .map(|(key, value)| format!("{key}={}", urlencoding::encode(value))),
        );
        query.push(format!("api_key={}", urlencoding::encode(api_key)));
        query.push("format=json".to_string());

        Ok(format!("{}?{}", self.api_root, query.join("&")))
    }

    /// `user.getrecenttracks`, in upstream order
    pub fn recent_tracks(&self, user: &str, limit: u64) -> Result<Vec<TrackRecord>, LastfmError> {
        let limit = limit.to_string();
        let url = self.method_url(RECENT_TRACKS, &[("user", user), ("limit", limit.as_str())])?;

        let response: RecentTracksResponse = self.fetch_listing(RECENT_TRACKS, &url)?;
        Ok(response
            .recenttracks
            .track
            .into_iter()
            .map(map_recent_track)
            .collect())
    }

    /// `user.gettoptracks`, in upstream order
    pub fn top_tracks(
        &self,
        user: &str,
        limit: u64,
        period: Period,
    ) -> Result<Vec<TrackRecord>, LastfmError> {
        let limit = limit.to_string();
        let url = self.method_url(
            TOP_TRACKS,
            &[("user", user), ("limit", limit.as_str()), ("period", period.as_str())],
        )?;

        let response: TopTracksResponse = self.fetch_listing(TOP_TRACKS, &url)?;
        response
            .toptracks
            .track
            .into_iter()
            .map(map_top_track)
            .collect()
    }

    /// `track.getinfo`, served from the response cache when possible.
    ///
    /// Any failure yields `None`: the lookup only improves artwork.
    pub fn track_info(&self, track: &str, artist: &str) -> Option<TrackInfo> {
        match self.try_track_info(track, artist) {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("no track info for {artist} - {track}: {e}");
                None
            }
        }
    }

    fn try_track_info(&self, track: &str, artist: &str) -> Result<TrackInfo, LastfmError> {
        let url = self.method_url(TRACK_INFO, &[("track", track), ("artist", artist)])?;

        let response = self.cache.get_or_fetch(&url, || {
            debug!("GET {TRACK_INFO}");
            self.transport.get(&url)
        })?;
        let response: TrackInfoResponse = decode(TRACK_INFO, response)?;

        Ok(map_track_info(response.track))
    }

    fn fetch_listing<T: DeserializeOwned>(
        &self,
        method: &'static str,
        url: &str,
    ) -> Result<T, LastfmError> {
        debug!("GET {method}");
        let response = self.transport.get(url)?;
        decode(method, response)
    }
}

/// Decodes a successful body into `T`.
///
/// Last.fm reports errors as `{"error": n, "message": ".."}`, sometimes with a
/// 200 status, so that shape is checked whenever `T` does not fit.
fn decode<T: DeserializeOwned>(
    method: &'static str,
    response: FetchResponse,
) -> Result<T, LastfmError> {
    let upstream_error = |response: &FetchResponse| {
        serde_json::from_str::<ErrorResponse>(&response.body)
            .ok()
            .map(|e| LastfmError::Upstream {
                method,
                status: response.status,
                message: format!("{} (code {})", e.message, e.error),
            })
    };

    if !response.is_success() {
        return Err(upstream_error(&response).unwrap_or(LastfmError::Upstream {
            method,
            status: response.status,
            message: "unexpected response".to_string(),
        }));
    }

    serde_json::from_str(&response.body).map_err(|source| {
        upstream_error(&response).unwrap_or(LastfmError::Decode { method, source })
    })
}

fn map_recent_track(track: RecentTrack) -> TrackRecord {
    let now_playing = track
        .attr
        .and_then(|attr| attr.nowplaying)
        .is_some_and(|marker| !marker.is_empty());
    let images: Vec<ImageVariant> = track.image.into_iter().map(Into::into).collect();

    TrackRecord {
        name: track.name,
        artist_name: track.artist.text,
        url: track.url,
        images: TrackImages::from_variants(&images),
        kind: TrackKind::Recent { now_playing },
    }
}

fn map_top_track(track: TopTrack) -> Result<TrackRecord, LastfmError> {
    let play_count = track
        .playcount
        .trim()
        .parse::<u64>()
        .map_err(|e| LastfmError::Malformed {
            method: TOP_TRACKS,
            reason: format!("playcount {:?} of {:?}: {e}", track.playcount, track.name),
        })?;
    let images: Vec<ImageVariant> = track.image.into_iter().map(Into::into).collect();

    Ok(TrackRecord {
        name: track.name,
        artist_name: track.artist.name,
        url: track.url,
        images: TrackImages::from_variants(&images),
        kind: TrackKind::Top { play_count },
    })
}

fn map_track_info(info: WireTrackInfo) -> TrackInfo {
    TrackInfo {
        album: info.album.map(|album| AlbumInfo {
            title: album.title,
            artist_name: album.artist,
            url: album.url,
            images: album.image.into_iter().map(Into::into).collect(),
        }),
    }
}

#[cfg(test)]
pub fn test_client(transport: &Arc<crate::lastfm::transport::fake::FakeTransport>) -> LastfmClient {
    let cache = ResponseCache::in_memory(&crate::config::CacheConfig::default());
    LastfmClient::new(
        "https://ws.audioscrobbler.com/2.0/",
        Some("secret-key".to_string()),
        transport.clone(),
        cache,
    )
}
