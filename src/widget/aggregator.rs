use log::debug;

use crate::{
    domain::{
        image::{self, FALLBACK_ARTWORK, ImageSize},
        period::Period,
        track::{TrackRecord, WidgetPayload},
    },
    lastfm::{LastfmClient, LastfmError},
    widget::query::{Mode, WidgetQuery},
};

/// Most tracks a widget ever lists
pub const MAX_TRACKS: usize = 100;
/// Size of the thumbnail grid
pub const MAX_THUMBNAILS: usize = 4;

/// Turns a validated query into the widget payload
pub struct TrackAggregator {
    client: LastfmClient,
}

impl TrackAggregator {
    pub fn new(client: LastfmClient) -> Self {
        Self { client }
    }

    pub fn ensure_configured(&self) -> Result<(), LastfmError> {
        self.client.ensure_configured()
    }

    /// Listing failures are returned. Artwork lookups never fail the build.
    pub fn build(&self, query: &WidgetQuery) -> Result<WidgetPayload, LastfmError> {
        self.client.ensure_configured()?;

        match query.mode {
            Mode::Recently => self.recently_played(&query.user, query.limit),
            Mode::Frequently(period) => self.top_tracks(&query.user, query.limit, period),
        }
    }

    fn recently_played(&self, user: &str, limit: u64) -> Result<WidgetPayload, LastfmError> {
        let tracks = cap_tracks(self.client.recent_tracks(user, limit)?, limit);
        let thumbnails = tracks
            .iter()
            .take(MAX_THUMBNAILS)
            .map(|track| track.images.medium.clone())
            .collect();

        Ok(WidgetPayload {
            title: format!("Recently Played by {user}"),
            thumbnails,
            tracks,
        })
    }

    fn top_tracks(
        &self,
        user: &str,
        limit: u64,
        period: Period,
    ) -> Result<WidgetPayload, LastfmError> {
        let tracks = cap_tracks(self.client.top_tracks(user, limit, period)?, limit);
        let thumbnails = self.backfill_thumbnails(&tracks);

        Ok(WidgetPayload {
            title: format!("Top Tracks by {user} ({period})"),
            thumbnails,
            tracks,
        })
    }

    /// Large artwork of the leading tracks, one lookup per placeholder.
    ///
    /// Lookups run one after another and stop once the grid is full.
    fn backfill_thumbnails(&self, tracks: &[TrackRecord]) -> Vec<String> {
        let mut thumbnails = Vec::with_capacity(MAX_THUMBNAILS);

        for track in tracks {
            if thumbnails.len() >= MAX_THUMBNAILS {
                break;
            }

            if !image::is_placeholder(&track.images.large) {
                thumbnails.push(track.images.large.clone());
                continue;
            }

            debug!("looking up album art for {} - {}", track.artist_name, track.name);
            let artwork = self
                .client
                .track_info(&track.name, &track.artist_name)
                .and_then(|info| info.album)
                .and_then(|album| image::find_artwork(&album.images, ImageSize::Large))
                .unwrap_or_else(|| FALLBACK_ARTWORK.to_string());
            thumbnails.push(artwork);
        }

        thumbnails
    }
}

/// Keeps at most `limit` tracks, and never more than [`MAX_TRACKS`].
///
/// Recent listings include the now playing track on top of `limit`.
fn cap_tracks(mut tracks: Vec<TrackRecord>, limit: u64) -> Vec<TrackRecord> {
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    tracks.truncate(limit.min(MAX_TRACKS));
    tracks
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        cache::ResponseCache,
        config::CacheConfig,
        domain::track::TrackKind,
        lastfm::{client::test_client, fixtures, transport::fake::FakeTransport},
    };

    fn aggregator(transport: &Arc<FakeTransport>) -> TrackAggregator {
        TrackAggregator::new(test_client(transport))
    }

    fn query(mode: Mode, user: &str, limit: u64) -> WidgetQuery {
        WidgetQuery {
            mode,
            user: user.to_string(),
            limit,
        }
    }

    #[test]
    fn test_recently_played_payload() -> anyhow::Result<()> {
        let art: Vec<String> = (0..5).map(|i| fixtures::art(&format!("r{i}"))).collect();
        let body = fixtures::recent_tracks(&[
            ("One", "A", art[0].as_str(), true),
            ("Two", "B", art[1].as_str(), false),
            ("Three", "C", art[2].as_str(), false),
            ("Four", "D", art[3].as_str(), false),
            ("Five", "E", art[4].as_str(), false),
        ]);
        let transport = Arc::new(FakeTransport::new().respond("user.getrecenttracks", 200, &body));

        let payload = aggregator(&transport).build(&query(Mode::Recently, "alice", 5))?;

        assert_eq!(payload.title, "Recently Played by alice");
        assert_eq!(payload.tracks.len(), 5);
        assert_eq!(
            payload.thumbnails,
            payload.tracks[..4]
                .iter()
                .map(|t| t.images.medium.clone())
                .collect::<Vec<_>>()
        );
        assert_eq!(
            payload.thumbnails[0],
            "https://lastfm.freetls.fastly.net/i/u/64s/r0.png"
        );
        assert_eq!(payload.tracks[0].kind, TrackKind::Recent { now_playing: true });

        Ok(())
    }

    #[test]
    fn test_recently_played_never_enriches() -> anyhow::Result<()> {
        let body = fixtures::recent_tracks(&[("One", "A", fixtures::PLACEHOLDER_LARGE, false)]);
        let transport = Arc::new(FakeTransport::new().respond("user.getrecenttracks", 200, &body));

        let payload = aggregator(&transport).build(&query(Mode::Recently, "alice", 5))?;

        assert_eq!(payload.thumbnails.len(), 1);
        assert!(image::is_placeholder(&payload.thumbnails[0]));
        assert_eq!(transport.calls_to("track.getinfo"), 0);

        Ok(())
    }

    #[test]
    fn test_now_playing_extra_track_is_capped_to_limit() -> anyhow::Result<()> {
        let a = fixtures::art("a");
        let body = fixtures::recent_tracks(&[
            ("Now", "A", a.as_str(), true),
            ("Then", "A", a.as_str(), false),
            ("Before", "A", a.as_str(), false),
        ]);
        let transport = Arc::new(FakeTransport::new().respond("user.getrecenttracks", 200, &body));

        let payload = aggregator(&transport).build(&query(Mode::Recently, "alice", 2))?;

        assert_eq!(payload.tracks.len(), 2);
        assert_eq!(payload.tracks[0].name, "Now");

        Ok(())
    }

    #[test]
    fn test_track_list_capped_at_hundred() -> anyhow::Result<()> {
        let a = fixtures::art("a");
        let names: Vec<String> = (0..120).map(|i| format!("Track {i}")).collect();
        let rows: Vec<(&str, &str, &str, u64)> = names
            .iter()
            .map(|name| (name.as_str(), "Band", a.as_str(), 1))
            .collect();
        let body = fixtures::top_tracks(&rows);
        let transport = Arc::new(FakeTransport::new().respond("user.gettoptracks", 200, &body));

        let payload = aggregator(&transport).build(&query(
            Mode::Frequently(Period::Overall),
            "bob",
            500,
        ))?;

        assert_eq!(payload.tracks.len(), MAX_TRACKS);
        assert_eq!(payload.tracks[99].name, "Track 99");
        assert!(transport.calls()[0].contains("&limit=500&"));

        Ok(())
    }

    #[test]
    fn test_top_tracks_title_and_concrete_art() -> anyhow::Result<()> {
        let art: Vec<String> = (0..3).map(|i| fixtures::art(&format!("t{i}"))).collect();
        let body = fixtures::top_tracks(&[
            ("One", "A", art[0].as_str(), 30),
            ("Two", "B", art[1].as_str(), 20),
            ("Three", "C", art[2].as_str(), 10),
        ]);
        let transport = Arc::new(FakeTransport::new().respond("user.gettoptracks", 200, &body));

        let payload = aggregator(&transport).build(&query(
            Mode::Frequently(Period::ThreeMonths),
            "bob",
            10,
        ))?;

        assert_eq!(payload.title, "Top Tracks by bob (3month)");
        assert_eq!(payload.thumbnails, art);
        assert_eq!(transport.calls_to("track.getinfo"), 0);

        Ok(())
    }

    #[test]
    fn test_placeholder_art_is_replaced_by_album_art() -> anyhow::Result<()> {
        let album_art = fixtures::art("album");
        let body = fixtures::top_tracks(&[
            ("Song", "Band", fixtures::PLACEHOLDER_LARGE, 30),
            ("Lost", "Nobody", fixtures::PLACEHOLDER_LARGE, 20),
        ]);
        let transport = Arc::new(
            FakeTransport::new()
                .respond("user.gettoptracks", 200, &body)
                .respond(
                    "track=Song&artist=Band",
                    200,
                    &fixtures::track_info(Some(album_art.as_str())),
                )
                .respond("track=Lost&artist=Nobody", 200, &fixtures::track_info(None)),
        );

        let payload = aggregator(&transport).build(&query(
            Mode::Frequently(Period::OneMonth),
            "bob",
            10,
        ))?;

        assert_eq!(payload.thumbnails, vec![album_art, FALLBACK_ARTWORK.to_string()]);
        assert_eq!(transport.calls_to("track.getinfo"), 2);

        Ok(())
    }

    #[test]
    fn test_failed_lookup_degrades_to_fallback() -> anyhow::Result<()> {
        let body = fixtures::top_tracks(&[("Song", "Band", fixtures::PLACEHOLDER_LARGE, 1)]);
        let transport = Arc::new(
            FakeTransport::new()
                .respond("user.gettoptracks", 200, &body)
                .fail("track.getinfo", "connection reset"),
        );

        let payload = aggregator(&transport).build(&query(
            Mode::Frequently(Period::OneMonth),
            "bob",
            10,
        ))?;

        assert_eq!(payload.thumbnails, vec![FALLBACK_ARTWORK.to_string()]);
        assert_eq!(payload.tracks.len(), 1);

        Ok(())
    }

    #[test]
    fn test_thumbnail_collection_stops_at_four() -> anyhow::Result<()> {
        let names: Vec<String> = (0..7).map(|i| format!("Song {i}")).collect();
        let rows: Vec<(&str, &str, &str, u64)> = names
            .iter()
            .map(|name| (name.as_str(), "Band", fixtures::PLACEHOLDER_LARGE, 5))
            .collect();
        let album_art = fixtures::art("album");
        let transport = Arc::new(
            FakeTransport::new()
                .respond("user.gettoptracks", 200, &fixtures::top_tracks(&rows))
                .respond("track.getinfo", 200, &fixtures::track_info(Some(album_art.as_str()))),
        );

        let payload = aggregator(&transport).build(&query(
            Mode::Frequently(Period::SevenDays),
            "bob",
            10,
        ))?;

        assert_eq!(payload.thumbnails.len(), MAX_THUMBNAILS);
        assert_eq!(payload.tracks.len(), 7);
        assert_eq!(transport.calls_to("track.getinfo"), MAX_THUMBNAILS);

        Ok(())
    }

    #[test]
    fn test_same_track_twice_is_looked_up_once() -> anyhow::Result<()> {
        let body = fixtures::top_tracks(&[
            ("Song", "Band", fixtures::PLACEHOLDER_LARGE, 30),
            ("Song", "Band", fixtures::PLACEHOLDER_LARGE, 20),
        ]);
        let album_art = fixtures::art("album");
        let transport = Arc::new(
            FakeTransport::new()
                .respond("user.gettoptracks", 200, &body)
                .respond("track.getinfo", 200, &fixtures::track_info(Some(album_art.as_str()))),
        );

        let payload = aggregator(&transport).build(&query(
            Mode::Frequently(Period::ThreeMonths),
            "bob",
            10,
        ))?;

        assert_eq!(payload.thumbnails, vec![album_art.clone(), album_art]);
        assert_eq!(transport.calls_to("track.getinfo"), 1);

        Ok(())
    }

    #[test]
    fn test_cache_survives_across_builds() -> anyhow::Result<()> {
        let body = fixtures::top_tracks(&[("Song", "Band", fixtures::PLACEHOLDER_LARGE, 30)]);
        let transport = Arc::new(
            FakeTransport::new()
                .respond("user.gettoptracks", 200, &body)
                .respond("track.getinfo", 200, &fixtures::track_info(None)),
        );
        let aggregator = aggregator(&transport);
        let query = query(Mode::Frequently(Period::Overall), "bob", 10);

        aggregator.build(&query)?;
        aggregator.build(&query)?;

        assert_eq!(transport.calls_to("user.gettoptracks"), 2);
        assert_eq!(transport.calls_to("track.getinfo"), 1);

        Ok(())
    }

    #[test]
    fn test_listing_failure_propagates() {
        let transport = Arc::new(FakeTransport::new().respond(
            "user.gettoptracks",
            500,
            &fixtures::error_body(8, "Operation failed"),
        ));

        let err = aggregator(&transport)
            .build(&query(Mode::Frequently(Period::Overall), "bob", 10))
            .unwrap_err();

        assert!(matches!(err, LastfmError::Upstream { status: 500, .. }), "got {err:?}");
    }

    #[test]
    fn test_missing_api_key_fails_before_any_call() {
        let transport = Arc::new(FakeTransport::new());
        let client = LastfmClient::new(
            "https://ws.audioscrobbler.com/2.0/",
            None,
            transport.clone(),
            ResponseCache::in_memory(&CacheConfig::default()),
        );

        let err = TrackAggregator::new(client)
            .build(&query(Mode::Recently, "alice", 5))
            .unwrap_err();

        assert!(matches!(err, LastfmError::MissingApiKey));
        assert!(transport.calls().is_empty());
    }
}
