mod app;
mod logging;
mod pages;

use app::{App, AppProps};
use critique_frontend_common::auth::{create_session_provider, AuthHandle, SharedSessionProvider};
use critique_frontend_common::PointerCapability;
use std::rc::Rc;

fn main() {
    logging::init();

    let provider: SharedSessionProvider = match create_session_provider() {
        Ok(provider) => Rc::new(provider),
        Err(err) => {
            tracing::error!(error = %err, "Auth is not configured; set SUPABASE_URL and SUPABASE_ANON_KEY");
            return;
        }
    };
    let auth = match AuthHandle::new(provider) {
        Ok(auth) => auth,
        Err(err) => {
            tracing::error!(error = %err, "Failed to build API client");
            return;
        }
    };

    let capability = PointerCapability::detect();
    tracing::debug!(?capability, "Pointer capability detected");

    yew::Renderer::<App>::with_props(AppProps { auth, capability }).render();
}
