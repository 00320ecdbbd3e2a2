//! Light/dark switch

use crate::theme::{use_theme, Theme, ThemeAction};
use yew::prelude::*;

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let theme = use_theme();

    let onclick = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| theme.dispatch(ThemeAction::Toggle))
    };

    let label = match theme.theme {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };

    html! {
        <button class="theme-toggle" aria-label={label} title={label} {onclick}>
            { if theme.theme == Theme::Dark { "☀" } else { "☾" } }
        </button>
    }
}
