//! Auth context: the session provider and API client, injected at startup

use crate::client::{create_api_client, SharedClient};
use critique_http::{ClientError, SessionProvider};
use std::rc::Rc;
use yew::prelude::*;

/// Session provider shared by every component
pub type SharedSessionProvider = Rc<dyn SessionProvider>;

/// Handle passed down the component tree
#[derive(Clone)]
pub struct AuthHandle {
    provider: SharedSessionProvider,
    client: SharedClient,
}

impl AuthHandle {
    /// Build the handle and its API client around `provider`
    pub fn new(provider: SharedSessionProvider) -> Result<Self, ClientError> {
        let client = create_api_client(Rc::clone(&provider))?;
        Ok(Self { provider, client })
    }

    pub fn provider(&self) -> SharedSessionProvider {
        Rc::clone(&self.provider)
    }

    pub fn client(&self) -> &SharedClient {
        &self.client
    }
}

impl PartialEq for AuthHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.provider, &other.provider)
    }
}

/// Auth provider props
#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub handle: AuthHandle,
    pub children: Children,
}

/// Auth provider component
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    html! {
        <ContextProvider<AuthHandle> context={props.handle.clone()}>
            {props.children.clone()}
        </ContextProvider<AuthHandle>>
    }
}

/// Hook to use auth context
#[hook]
pub fn use_auth() -> AuthHandle {
    use_context::<AuthHandle>()
        .expect("AuthHandle not found. Make sure to wrap your component with AuthProvider")
}
