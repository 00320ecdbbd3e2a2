use crate::pages::{HomePage, LoginPage};
use critique_frontend_common::{
    AuthHandle, AuthProvider, CustomCursor, OAuthCallback, PointerCapability, Route, ThemeProvider,
};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub auth: AuthHandle,
    pub capability: PointerCapability,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    html! {
        <ThemeProvider>
            <AuthProvider handle={props.auth.clone()}>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
                <CustomCursor capability={props.capability} />
            </AuthProvider>
        </ThemeProvider>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::AuthCallback => html! { <OAuthCallback /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}
