//! Theme context definition

use crate::config::AuthConfig;
use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value of the root `data-theme` attribute
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Last saved choice, if any
    pub fn load() -> Option<Self> {
        LocalStorage::get(AuthConfig::THEME_STORAGE_KEY).ok()
    }

    fn save(self) {
        if let Err(err) = LocalStorage::set(AuthConfig::THEME_STORAGE_KEY, self) {
            tracing::debug!(error = %err, "Could not persist theme");
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ThemeContext {
    pub theme: Theme,
}

pub enum ThemeAction {
    Toggle,
}

impl Reducible for ThemeContext {
    type Action = ThemeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let theme = match action {
            ThemeAction::Toggle => self.theme.toggle(),
        };

        theme.save();
        update_document_theme(theme);

        Rc::new(Self { theme })
    }
}

/// Mark the document root so theme-keyed stylesheets pick the right colors
pub fn update_document_theme(theme: Theme) {
    if let Some(root) = gloo::utils::document().document_element() {
        if let Err(err) = root.set_attribute("data-theme", theme.as_str()) {
            tracing::debug!(?err, "Could not set data-theme attribute");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_attribute_values() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.as_str(), "light");
        assert_eq!(Theme::Dark.as_str(), "dark");
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::from_str::<Theme>("\"light\"").unwrap(),
            Theme::Light
        );
    }
}
