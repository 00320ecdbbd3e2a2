//! Loading spinner component

use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub text: Option<String>,
}

/// Ring spinner colored from the page's theme variables
#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &SpinnerProps) -> Html {
    html! {
        <div class="text-center">
            <div
                class="animate-spin"
                style="width: 40px; height: 40px; margin: 0 auto 16px; border-radius: 50%; \
                       border: 3px solid var(--border-color); border-top: 3px solid var(--accent-color);"
            />
            if let Some(text) = &props.text {
                <p style="color: var(--text-primary);">{text}</p>
            }
        </div>
    }
}
