use crate::api::models::{Id, Identified, NamedItem};

/// Display text for a reference that does not resolve.
pub const UNKNOWN: &str = "Unknown";

pub fn find_by_id<T: Identified>(items: &[T], id: Option<Id>) -> Option<&T> {
    let id = id?;
    items.iter().find(|item| item.id() == Some(id))
}

/// Name of the lookup entry `id`, or [`UNKNOWN`].
pub fn name_of(items: &[NamedItem], id: Option<Id>) -> String {
    find_by_id(items, id)
        .map(|item| item.name.clone())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Render any resolvable record with `f`, or [`UNKNOWN`].
pub fn display_of<T: Identified>(items: &[T], id: Option<Id>, f: impl Fn(&T) -> String) -> String {
    find_by_id(items, id).map(f).unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn id_cell(id: Option<Id>) -> String {
    id.map(|i| i.to_string()).unwrap_or_default()
}

pub fn opt_cell(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<NamedItem> {
        vec![
            NamedItem { id: Some(1), name: "AMD".to_string() },
            NamedItem { id: Some(2), name: "Intel".to_string() },
        ]
    }

    #[test]
    fn name_of_resolves_or_reports_unknown() {
        assert_eq!(name_of(&items(), Some(2)), "Intel");
        assert_eq!(name_of(&items(), Some(9)), UNKNOWN);
        assert_eq!(name_of(&items(), None), UNKNOWN);
    }

    #[test]
    fn cells_render_absent_values() {
        assert_eq!(id_cell(None), "");
        assert_eq!(opt_cell(None), "-");
        assert_eq!(opt_cell(Some("")), "-");
        assert_eq!(opt_cell(Some("SN1")), "SN1");
    }
}
