mod error;
mod options;
mod stash_config;
mod stash_tabs;

pub use error::StashTabError;
pub use options::{StashTabColor, StashTabOptions, StashTabOptionsUpdate};
pub use stash_config::StashConfig;
pub use stash_tabs::StashTabs;
