//! Top-level pages

use critique_frontend_common::auth::{oauth_login_url, use_auth};
use critique_frontend_common::{Route, Spinner, ThemeToggle};
use critique_http::{decode, ClientError, SessionProvider};
use gloo::utils::window;
use serde_json::Value;
use yew::prelude::*;
use yew_router::prelude::*;

const PROFILE_PATH: &str = "/api/users/me/full";

#[derive(Clone, PartialEq)]
enum Profile {
    Loading,
    Ready(Value),
    Failed(String),
}

/// Greeting name from the `user` block of the full profile payload
fn display_name(profile: &Value) -> String {
    let user = profile.get("user").unwrap_or(&Value::Null);
    ["username", "email"]
        .iter()
        .find_map(|field| {
            user.get(*field)
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
        })
        .unwrap_or("there")
        .to_string()
}

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let profile = use_state(|| Profile::Loading);

    {
        let auth = auth.clone();
        let navigator = navigator.clone();
        let profile = profile.clone();
        use_effect_with((), move |()| {
            wasm_bindgen_futures::spawn_local(async move {
                match auth.provider().get_session().await {
                    Ok(Some(_)) => {}
                    Ok(None) => {
                        if let Some(navigator) = navigator {
                            navigator.replace(&Route::Login);
                        }
                        return;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Session lookup failed");
                        profile.set(Profile::Failed(err.to_string()));
                        return;
                    }
                }

                let result = match auth.client().get(PROFILE_PATH).await {
                    Ok(response) => decode::<Value>(response).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(value) => profile.set(Profile::Ready(value)),
                    Err(err) if err.is_auth_expired() => {
                        if let Some(navigator) = navigator {
                            navigator.replace(&Route::Login);
                        }
                    }
                    Err(ClientError::Request(err)) => {
                        tracing::error!(error = %err, "Profile request failed");
                        profile.set(Profile::Failed("The server could not be reached".into()));
                    }
                    Err(err) => {
                        tracing::error!(error = %err, status = ?err.status(), "Profile request failed");
                        profile.set(Profile::Failed(err.to_string()));
                    }
                }
            });
        });
    }

    let on_sign_out = Callback::from(move |_: MouseEvent| {
        let provider = auth.provider();
        let navigator = navigator.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = provider.sign_out().await {
                tracing::warn!(error = %err, "Sign out failed");
            }
            if let Some(navigator) = navigator {
                navigator.replace(&Route::Login);
            }
        });
    });

    let body = match &*profile {
        Profile::Loading => html! { <Spinner text={"Loading your profile..."} /> },
        Profile::Ready(value) => html! {
            <p class="greeting">{ format!("Welcome back, {}", display_name(value)) }</p>
        },
        Profile::Failed(message) => html! { <p class="error">{ message.clone() }</p> },
    };

    html! {
        <main class="page home">
            <header class="page-header">
                <h1>{ "Resume Critique" }</h1>
                <ThemeToggle />
                <button class="btn" onclick={on_sign_out}>{ "Sign out" }</button>
            </header>
            { body }
        </main>
    }
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let error = use_state(|| None::<String>);

    let on_google = {
        let error = error.clone();
        Callback::from(move |_: MouseEvent| match oauth_login_url("google") {
            Ok(url) => {
                if let Err(err) = window().location().set_href(&url) {
                    tracing::error!(?err, "Failed to open sign-in page");
                    error.set(Some("Could not open the sign-in page".into()));
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to build sign-in URL");
                error.set(Some(err.to_string()));
            }
        })
    };

    html! {
        <main class="page login">
            <header class="page-header">
                <h1>{ "Sign in" }</h1>
                <ThemeToggle />
            </header>
            <button class="btn btn-primary" onclick={on_google}>{ "Continue with Google" }</button>
            if let Some(message) = &*error {
                <p class="error">{ message.clone() }</p>
            }
        </main>
    }
}
