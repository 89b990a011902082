//! Searchable option list: the searchable dropdown, minus the dropdown.
//!
//! Options are typed records; how an option is displayed and which value it
//! yields are selectors supplied by the caller. There is no guessing across
//! field names.

use crate::api::models::Id;

/// Configuration record for a [`SearchableSelect`].
pub struct SelectConfig<T> {
    pub options: Vec<T>,
    pub display: fn(&T) -> String,
    pub value: fn(&T) -> Option<Id>,
    pub placeholder: &'static str,
}

pub struct SearchableSelect<T> {
    config: SelectConfig<T>,
}

impl<T> SearchableSelect<T> {
    pub fn new(config: SelectConfig<T>) -> Self {
        Self { config }
    }

    /// Options whose display text contains `search`, case-insensitively.
    /// An empty search matches everything.
    pub fn filtered(&self, search: &str) -> Vec<&T> {
        let needle = search.trim().to_lowercase();
        self.config
            .options
            .iter()
            .filter(|o| (self.config.display)(o).to_lowercase().contains(&needle))
            .collect()
    }

    /// Display text of the option holding `value`, or the placeholder.
    pub fn selected_label(&self, value: Option<Id>) -> String {
        value
            .and_then(|v| self.find(v))
            .map(|o| (self.config.display)(o))
            .unwrap_or_else(|| self.config.placeholder.to_string())
    }

    pub fn find(&self, value: Id) -> Option<&T> {
        self.config
            .options
            .iter()
            .find(|o| (self.config.value)(o) == Some(value))
    }

    /// Resolve a user choice: a numeric id, an exact display text
    /// (ignoring case) or a unique display-text match.
    pub fn resolve(&self, input: &str) -> Option<Id> {
        let input = input.trim();
        if let Ok(id) = input.parse::<Id>() {
            return self.find(id).and_then(|o| (self.config.value)(o));
        }
        let needle = input.to_lowercase();
        let hits = self.filtered(input);
        if let Some(exact) = hits
            .iter()
            .find(|o| (self.config.display)(o).to_lowercase() == needle)
        {
            return (self.config.value)(exact);
        }
        match hits.as_slice() {
            [only] => (self.config.value)(only),
            _ => None,
        }
    }
}
