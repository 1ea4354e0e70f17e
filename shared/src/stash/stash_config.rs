use std::default::Default;

/// Contains Config properties which will be used by a StashTabs collection
#[derive(Clone, Debug)]
pub struct StashConfig {
    /// Display names longer than this many characters are cut short
    pub max_display_name_chars: usize,
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            max_display_name_chars: 30,
        }
    }
}
