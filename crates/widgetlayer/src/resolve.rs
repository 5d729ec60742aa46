//! Instance resolution: which widgets are placed where, with which settings.
//!
//! Resolution walks the tracked areas in the caller's order and each area's
//! widget ids in stored order. The resulting occurrence order (area order,
//! then position) is the canonical order every later stage relies on.
//!
//! # Skipped widgets
//!
//! A widget id is silently omitted when:
//!
//! - it is no longer registered with the host platform,
//! - its id carries no instance number,
//! - its instance number has no stored settings.
//!
//! Positions are counted over emitted occurrences only, so a skipped widget
//! never leaves a gap in the `2 * position` ordering arithmetic.

use crate::instance::Instance;
use crate::store::WidgetStore;

/// One placed widget within one area.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetOccurrence {
    /// Widget id, e.g. `"text-2"`.
    pub id: String,
    /// Area the widget is placed in.
    pub area: String,
    /// 0-based position among the resolved widgets of the area.
    pub position: usize,
    /// Widget type identifier.
    pub id_base: String,
    /// Stored settings.
    pub instance: Instance,
}

impl WidgetOccurrence {
    pub fn new(
        id: impl Into<String>,
        area: impl Into<String>,
        position: usize,
        id_base: impl Into<String>,
        instance: Instance,
    ) -> Self {
        Self {
            id: id.into(),
            area: area.into(),
            position,
            id_base: id_base.into(),
            instance,
        }
    }
}

/// Resolves all widgets of the given areas in canonical order.
///
/// Areas that are missing or hold no widgets are inactive and contribute nothing.
pub fn resolve<S, A>(store: &S, areas: &[A]) -> Vec<WidgetOccurrence>
where
    S: WidgetStore + ?Sized,
    A: AsRef<str>,
{
    areas
        .iter()
        .flat_map(|area| resolve_area(store, area.as_ref()))
        .collect()
}

/// Finds a widget in the first active area that resolves it.
pub fn find_occurrence<S, A>(store: &S, areas: &[A], widget_id: &str) -> Option<WidgetOccurrence>
where
    S: WidgetStore + ?Sized,
    A: AsRef<str>,
{
    areas.iter().find_map(|area| {
        resolve_area(store, area.as_ref())
            .into_iter()
            .find(|occurrence| occurrence.id == widget_id)
    })
}

/// Resolves the widgets of one area.
pub fn resolve_area<S>(store: &S, area: &str) -> Vec<WidgetOccurrence>
where
    S: WidgetStore + ?Sized,
{
    let Some(ids) = store.area_widgets(area) else {
        return Vec::new();
    };

    let mut occurrences = Vec::with_capacity(ids.len());
    for widget_id in ids {
        let Some(registered) = store.registered(widget_id) else {
            tracing::debug!("Skipping widget '{}' in '{}': not registered", widget_id, area);
            continue;
        };
        let Some(number) = registered.number else {
            tracing::debug!("Skipping widget '{}' in '{}': no instance number", widget_id, area);
            continue;
        };
        let Some(instance) = store
            .instances(&registered.id_base)
            .and_then(|instances| instances.get(&number))
        else {
            tracing::debug!("Skipping widget '{}' in '{}': no stored settings", widget_id, area);
            continue;
        };

        occurrences.push(WidgetOccurrence::new(
            widget_id.as_str(),
            area,
            occurrences.len(),
            registered.id_base,
            instance.clone(),
        ));
    }
    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Snapshot;

    fn snapshot() -> Snapshot {
        Snapshot::new()
            .place("top", "text-1")
            .place("top", "gone-1")
            .place("top", "text-9")
            .place("top", "text-2")
            .place("bottom", "calendar-1")
            .store("text", 1, Instance::new().with("title", "one"))
            .store("text", 2, Instance::new().with("title", "two"))
            .store("calendar", 1, Instance::new())
    }

    #[test]
    fn test_resolve_skips_and_keeps_positions_dense() {
        let occurrences = resolve(&snapshot(), &["top"]);
        let summary: Vec<(&str, usize)> = occurrences
            .iter()
            .map(|o| (o.id.as_str(), o.position))
            .collect();
        assert_eq!(summary, vec![("text-1", 0), ("text-2", 1)]);
        assert_eq!(occurrences[1].instance.get_str("title").as_deref(), Some("two"));
    }

    #[test]
    fn test_resolve_follows_area_order() {
        let occurrences = resolve(&snapshot(), &["bottom", "top"]);
        let ids: Vec<&str> = occurrences.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["calendar-1", "text-1", "text-2"]);
        assert_eq!(occurrences[0].area, "bottom");
        assert_eq!(occurrences[0].position, 0);
        assert_eq!(occurrences[1].position, 0);
    }

    #[test]
    fn test_inactive_areas_contribute_nothing() {
        let mut snapshot = snapshot();
        snapshot.sidebars.insert("empty-area".into(), Vec::new());
        assert!(resolve(&snapshot, &["missing", "empty-area"]).is_empty());
    }

    #[test]
    fn test_widget_without_number_is_skipped() {
        let snapshot = Snapshot::new().place("a", "search").register("search");
        assert!(resolve(&snapshot, &["a"]).is_empty());
    }

    #[test]
    fn test_find_occurrence_uses_first_matching_area() {
        let snapshot = snapshot().place("bottom", "text-1");
        let found = find_occurrence(&snapshot, &["bottom", "top"], "text-1").unwrap();
        assert_eq!(found.area, "bottom");
        assert_eq!(found.position, 1);
        assert!(find_occurrence(&snapshot, &["top"], "calendar-1").is_none());
    }
}
