//! Light/dark theme, applied as `data-theme` on the document root

pub mod context;

pub use context::{update_document_theme, Theme, ThemeAction, ThemeContext};

use yew::prelude::*;

pub type ThemeHandle = UseReducerHandle<ThemeContext>;

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    pub children: Children,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let theme = use_reducer(|| ThemeContext {
        theme: Theme::load().unwrap_or_default(),
    });

    {
        let current = theme.theme;
        use_effect_with(current, |theme| update_document_theme(*theme));
    }

    html! {
        <ContextProvider<ThemeHandle> context={theme}>
            {props.children.clone()}
        </ContextProvider<ThemeHandle>>
    }
}

#[hook]
pub fn use_theme() -> ThemeHandle {
    use_context::<ThemeHandle>()
        .expect("ThemeHandle not found. Make sure to wrap your component with ThemeProvider")
}
