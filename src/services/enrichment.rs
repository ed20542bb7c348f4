/// Metrics enrichment
///
/// Joins raw content with its interaction history to produce the enriched
/// records consumed by the ranking engine and returned in feed pages. Pure:
/// no I/O, byte-identical output for identical input, output order matches
/// input order.
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{
    ContentWithInteractions, EnrichedContent, Interaction, InteractionType, UserInteractionFlags,
};

/// Enrich content rows with aggregate counts and the requesting user's own
/// interaction flags.
///
/// Counts come from each content's own interaction list; the per-user flag
/// map is built once from `user_interactions` and defaults to all-false for
/// content the user never touched.
pub fn enrich(
    contents: &[ContentWithInteractions],
    user_interactions: &[Interaction],
) -> Vec<EnrichedContent> {
    let mut flags_by_content: HashMap<Uuid, UserInteractionFlags> = HashMap::new();
    for interaction in user_interactions {
        flags_by_content
            .entry(interaction.content_id)
            .or_default()
            .set(interaction.interaction_type);
    }

    contents
        .iter()
        .map(|item| {
            let count = |ty: InteractionType| -> i64 {
                item.interaction_types.iter().filter(|t| **t == ty).count() as i64
            };

            let content = &item.content;
            EnrichedContent {
                id: content.id,
                title: content.title.clone(),
                description: content.description.clone(),
                content_type: content.content_type,
                body: content.body.clone(),
                media_url: content.media_url.clone(),
                tags: content.tags.clone(),
                business_id: content.business_id,
                created_at: content.created_at,
                likes: count(InteractionType::Like),
                comments: count(InteractionType::Comment),
                shares: count(InteractionType::Share),
                views: count(InteractionType::View),
                clicks: count(InteractionType::Click),
                user_interactions: flags_by_content
                    .get(&content.id)
                    .copied()
                    .unwrap_or_default(),
            }
        })
        .collect()
}
