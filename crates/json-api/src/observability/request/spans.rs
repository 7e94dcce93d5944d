//! Route labels for spans and metrics.

use uuid::Uuid;

/// Replace path segments that are UUIDs with `{uuid}` so each route yields
/// one label regardless of the resource it addresses.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::try_parse(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
