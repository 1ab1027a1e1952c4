use tracing::info;

use crate::models::EntryPoint;

pub fn filter_by_url_substring(entry_points: &[EntryPoint], substring: &str) -> Vec<String> {
    let ids: Vec<String> = entry_points
        .iter()
        .filter(|ep| ep.url.contains(substring))
        .map(|ep| ep.id.clone())
        .collect();

    info!(
        "Filtered to {} entry points containing '{}' in the URL.",
        ids.len(),
        substring
    );
    ids
}
