use std::collections::HashSet;

use crate::{
    error::{AppError, UpstreamContext},
    spotify::SpotifyClient,
    types::{Artist, ListeningAnalytics, ListeningStats, Paging, TimeRange, Track},
};

/// Page size of every upstream call made for the analytics bundle.
pub const ANALYTICS_LIMIT: u32 = 50;

/// Derives the summary counts from the medium-term top items.
///
/// Artists are distinct by id; artists without an id (local files) are not
/// counted. Genres are distinct by exact string.
pub fn listening_stats(top_tracks: &Paging<Track>, top_artists: &Paging<Artist>) -> ListeningStats {
    let unique_artists: HashSet<&str> = top_tracks
        .items
        .iter()
        .flat_map(|track| track.artists.iter())
        .filter_map(|artist| artist.id.as_deref())
        .collect();

    let genres: HashSet<&str> = top_artists
        .items
        .iter()
        .flat_map(|artist| artist.genres.iter())
        .map(String::as_str)
        .collect();

    ListeningStats {
        total_unique_artists: unique_artists.len(),
        total_genres: genres.len(),
        tracks_analyzed: top_tracks.items.len(),
        artists_analyzed: top_artists.items.len(),
    }
}

/// Fetches the five result sets concurrently and aggregates them.
///
/// The bundle is all-or-nothing: the first failing call fails the whole
/// request.
pub async fn listening_analytics(
    spotify: &SpotifyClient,
    token: &str,
) -> Result<ListeningAnalytics, AppError> {
    let (
        top_tracks_short_term,
        top_tracks_medium_term,
        top_artists_short_term,
        top_artists_medium_term,
        recently_played,
    ) = tokio::try_join!(
        spotify.current_user_top_tracks(token, TimeRange::ShortTerm, ANALYTICS_LIMIT),
        spotify.current_user_top_tracks(token, TimeRange::MediumTerm, ANALYTICS_LIMIT),
        spotify.current_user_top_artists(token, TimeRange::ShortTerm, ANALYTICS_LIMIT),
        spotify.current_user_top_artists(token, TimeRange::MediumTerm, ANALYTICS_LIMIT),
        spotify.current_user_recently_played(token, ANALYTICS_LIMIT),
    )
    .context("Analytics")?;

    let stats = listening_stats(&top_tracks_medium_term, &top_artists_medium_term);

    Ok(ListeningAnalytics {
        top_tracks_short_term,
        top_tracks_medium_term,
        top_artists_short_term,
        top_artists_medium_term,
        recently_played,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn tracks(value: serde_json::Value) -> Paging<Track> {
        serde_json::from_value(value).unwrap()
    }

    fn artists(value: serde_json::Value) -> Paging<Artist> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn counts_distinct_artists_across_tracks() {
        let top_tracks = tracks(json!({
            "items": [
                { "artists": [{ "id": "A" }] },
                { "artists": [{ "id": "A" }, { "id": "B" }] }
            ]
        }));

        let stats = listening_stats(&top_tracks, &Paging::default());
        assert_eq!(stats.total_unique_artists, 2);
        assert_eq!(stats.tracks_analyzed, 2);
        assert_eq!(stats.total_genres, 0);
    }

    #[test]
    fn artists_without_id_are_ignored() {
        let top_tracks = tracks(json!({
            "items": [{ "is_local": true, "artists": [{ "id": null, "name": "Tape" }] }]
        }));

        assert_eq!(
            listening_stats(&top_tracks, &Paging::default()).total_unique_artists,
            0
        );
    }

    #[test]
    fn counts_distinct_genres() {
        let top_artists = artists(json!({
            "items": [
                { "id": "A", "genres": ["indie", "shoegaze"] },
                { "id": "B", "genres": ["indie"] },
                { "id": "C", "genres": [] }
            ]
        }));

        let stats = listening_stats(&Paging::default(), &top_artists);
        assert_eq!(stats.total_genres, 2);
        assert_eq!(stats.artists_analyzed, 3);
    }

    #[test]
    fn empty_inputs_yield_zero() {
        assert_eq!(
            listening_stats(&Paging::default(), &Paging::default()),
            ListeningStats::default()
        );
    }
}
