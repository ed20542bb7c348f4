/// Personalized content ranking
///
/// Pure scoring over enriched content and the user's interaction markers.
/// Tag affinity lets engagement on one item boost thematically similar
/// unseen items; raw popularity is the fallback when no affinity exists;
/// a freshness boost counteracts popularity's bias toward old content; a
/// viewed penalty discourages re-surfacing seen items without excluding
/// them. Negative final scores are allowed and meaningful.
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{EnrichedContent, InteractionMarker, RankedEntry};

/// Feedback weights accumulated into tag affinity
const LIKED_WEIGHT: f64 = 3.0;
const SHARED_WEIGHT: f64 = 5.0;
const COMMENTED_WEIGHT: f64 = 2.0;
const VIEWED_WEIGHT: f64 = 1.0;

/// Popularity blend over global engagement counts
const LIKE_POPULARITY_WEIGHT: f64 = 1.5;
const COMMENT_POPULARITY_WEIGHT: f64 = 1.0;
const SHARE_POPULARITY_WEIGHT: f64 = 2.0;
const VIEW_POPULARITY_WEIGHT: f64 = 0.5;

/// Freshness boost starts at 10 and decays to zero at 100 hours
const FRESHNESS_MAX: f64 = 10.0;
const FRESHNESS_DECAY_PER_HOUR: f64 = 0.1;

/// Flat penalty for content the user has already viewed
const VIEWED_PENALTY: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct RankingEngine;

impl RankingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score and order content for one user.
    ///
    /// Produces one entry per input content, sorted descending by score.
    /// Ties keep input order (stable sort), so reruns over the same inputs
    /// are reproducible. No I/O, no hidden state; `now` is passed in so the
    /// freshness boost is deterministic for a given instant.
    pub fn rank(
        &self,
        now: DateTime<Utc>,
        contents: &[EnrichedContent],
        markers: &[InteractionMarker],
    ) -> Vec<RankedEntry> {
        // Last marker per content id wins, matching the ledger's row order.
        let mut marker_map: HashMap<Uuid, InteractionMarker> = HashMap::new();
        for marker in markers {
            marker_map.insert(marker.content_id, *marker);
        }

        let tag_affinity = build_tag_affinity(contents, &marker_map);

        let mut ranked: Vec<RankedEntry> = contents
            .iter()
            .map(|content| RankedEntry {
                content_id: content.id,
                score: score_content(now, content, &marker_map, &tag_affinity),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}

/// Accumulate feedback scores into per-tag affinity.
///
/// Every content item the user has a marker for contributes its feedback
/// score to each of its tags; repeated tags accumulate repeatedly.
fn build_tag_affinity(
    contents: &[EnrichedContent],
    marker_map: &HashMap<Uuid, InteractionMarker>,
) -> HashMap<String, f64> {
    let mut affinity: HashMap<String, f64> = HashMap::new();

    for content in contents {
        let Some(marker) = marker_map.get(&content.id) else {
            continue;
        };

        let feedback = feedback_score(marker);
        for tag in &content.tags {
            *affinity.entry(tag.clone()).or_insert(0.0) += feedback;
        }
    }

    affinity
}

fn feedback_score(marker: &InteractionMarker) -> f64 {
    let mut score = 0.0;
    if marker.liked {
        score += LIKED_WEIGHT;
    }
    if marker.shared {
        score += SHARED_WEIGHT;
    }
    if marker.commented {
        score += COMMENTED_WEIGHT;
    }
    if marker.viewed {
        score += VIEWED_WEIGHT;
    }
    score
}

fn score_content(
    now: DateTime<Utc>,
    content: &EnrichedContent,
    marker_map: &HashMap<Uuid, InteractionMarker>,
    tag_affinity: &HashMap<String, f64>,
) -> f64 {
    let tag_score: f64 = content
        .tags
        .iter()
        .map(|tag| tag_affinity.get(tag).copied().unwrap_or(0.0))
        .sum();

    let popularity_score = content.likes as f64 * LIKE_POPULARITY_WEIGHT
        + content.comments as f64 * COMMENT_POPULARITY_WEIGHT
        + content.shares as f64 * SHARE_POPULARITY_WEIGHT
        + content.views as f64 * VIEW_POPULARITY_WEIGHT;

    let freshness_boost = freshness_boost(now, content.created_at);

    let viewed_penalty = match marker_map.get(&content.id) {
        Some(marker) if marker.viewed => VIEWED_PENALTY,
        _ => 0.0,
    };

    let base = if tag_score > 0.0 {
        tag_score
    } else {
        popularity_score
    };

    base + freshness_boost - viewed_penalty
}

fn freshness_boost(now: DateTime<Utc>, created_at: DateTime<Utc>) -> f64 {
    let hours_since_creation = (now - created_at).num_seconds() as f64 / 3600.0;
    (FRESHNESS_MAX - hours_since_creation * FRESHNESS_DECAY_PER_HOUR).max(0.0)
}
