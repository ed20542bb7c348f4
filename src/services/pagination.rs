/// Feed pagination
///
/// Slices the ranked sequence into 1-indexed pages and reports pagination
/// metadata. Out-of-range pages yield an empty list, not an error.
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{EnrichedContent, PaginationMeta, RankedEntry};

/// Slice `ranked` to the requested page and resolve entries back to their
/// enriched content.
///
/// `page` is 1-indexed; the slice is the half-open range
/// `[(page-1)*limit, (page-1)*limit + limit)` clamped to bounds. Ranked ids
/// missing from `content_by_id` are silently dropped. `limit` must be
/// positive; callers validate this at the boundary.
pub fn paginate(
    ranked: &[RankedEntry],
    content_by_id: &HashMap<Uuid, EnrichedContent>,
    page: usize,
    limit: usize,
) -> (Vec<EnrichedContent>, PaginationMeta) {
    let total = ranked.len();
    let total_pages = total.div_ceil(limit);

    let start = (page.saturating_sub(1)).saturating_mul(limit).min(total);
    let end = start.saturating_add(limit).min(total);

    let data = ranked[start..end]
        .iter()
        .filter_map(|entry| content_by_id.get(&entry.content_id).cloned())
        .collect();

    (
        data,
        PaginationMeta {
            page,
            limit,
            total,
            total_pages,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentType, UserInteractionFlags};
    use chrono::Utc;

    fn enriched(id: Uuid) -> EnrichedContent {
        EnrichedContent {
            id,
            title: "t".to_string(),
            description: "d".to_string(),
            content_type: ContentType::Link,
            body: "b".to_string(),
            media_url: None,
            tags: vec![],
            business_id: Uuid::new_v4(),
            created_at: Utc::now(),
            likes: 0,
            comments: 0,
            shares: 0,
            views: 0,
            clicks: 0,
            user_interactions: UserInteractionFlags::default(),
        }
    }

    fn fixture(n: usize) -> (Vec<RankedEntry>, HashMap<Uuid, EnrichedContent>) {
        let mut ranked = Vec::new();
        let mut by_id = HashMap::new();
        for i in 0..n {
            let id = Uuid::new_v4();
            ranked.push(RankedEntry {
                content_id: id,
                score: (n - i) as f64,
            });
            by_id.insert(id, enriched(id));
        }
        (ranked, by_id)
    }

    #[test]
    fn concatenated_pages_reproduce_the_full_sequence() {
        let (ranked, by_id) = fixture(7);
        let limit = 3;

        let (_, meta) = paginate(&ranked, &by_id, 1, limit);
        assert_eq!(meta.total, 7);
        assert_eq!(meta.total_pages, 3);

        let mut seen = Vec::new();
        for page in 1..=meta.total_pages {
            let (data, _) = paginate(&ranked, &by_id, page, limit);
            seen.extend(data.into_iter().map(|c| c.id));
        }

        let expected: Vec<Uuid> = ranked.iter().map(|e| e.content_id).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let (ranked, by_id) = fixture(5);
        let (data, meta) = paginate(&ranked, &by_id, 4, 2);
        assert!(data.is_empty());
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.page, 4);
    }

    #[test]
    fn partial_last_page() {
        let (ranked, by_id) = fixture(5);
        let (data, _) = paginate(&ranked, &by_id, 3, 2);
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].id, ranked[4].content_id);
    }

    #[test]
    fn missing_content_ids_are_dropped() {
        let (mut ranked, by_id) = fixture(2);
        ranked.push(RankedEntry {
            content_id: Uuid::new_v4(),
            score: 0.0,
        });

        let (data, meta) = paginate(&ranked, &by_id, 1, 10);
        assert_eq!(data.len(), 2);
        assert_eq!(meta.total, 3);
    }

    #[test]
    fn empty_input_yields_zero_pages() {
        let (data, meta) = paginate(&[], &HashMap::new(), 1, 10);
        assert!(data.is_empty());
        assert_eq!(meta.total, 0);
        assert_eq!(meta.total_pages, 0);
    }
}
