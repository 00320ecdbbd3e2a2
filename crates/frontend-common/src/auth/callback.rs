//! OAuth callback landing page
//!
//! The auth service redirects here after sign-in. The session may still be
//! settling, so the page checks once, waits, checks again, and then sends the
//! user home or back to the login page.

use super::context::use_auth;
use crate::components::Spinner;
use crate::config::AuthConfig;
use crate::routes::Route;
use critique_http::SessionProvider;
use futures::channel::oneshot;
use futures::future::{AbortHandle, Abortable};
use gloo::timers::callback::Timeout;
use gloo::utils::window;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use yew::prelude::*;
use yew_router::prelude::*;

/// Where the callback page sends the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackOutcome {
    Home,
    Login,
}

impl CallbackOutcome {
    pub const fn route(self) -> Route {
        match self {
            Self::Home => Route::Home,
            Self::Login => Route::Login,
        }
    }
}

pub const fn retry_delay() -> Duration {
    Duration::from_millis(AuthConfig::CALLBACK_RETRY_DELAY_MS)
}

/// Check for a session, and if there is none yet, wait once via `delay` and
/// check again. Provider errors count as "no session".
pub async fn resolve_callback<P, D, F>(provider: &P, delay: D) -> CallbackOutcome
where
    P: SessionProvider + ?Sized,
    D: FnOnce(Duration) -> F,
    F: Future<Output = ()>,
{
    if has_session(provider).await {
        return CallbackOutcome::Home;
    }

    delay(retry_delay()).await;

    if has_session(provider).await {
        CallbackOutcome::Home
    } else {
        CallbackOutcome::Login
    }
}

async fn has_session<P: SessionProvider + ?Sized>(provider: &P) -> bool {
    match provider.get_session().await {
        Ok(session) => session.is_some(),
        Err(err) => {
            tracing::warn!(error = %err, "Session check failed on OAuth callback");
            false
        }
    }
}

/// Browser timer as a future; dropping it clears the timer
async fn browser_delay(duration: Duration) {
    let (tx, rx) = oneshot::channel();
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    let _timeout = Timeout::new(millis, move || {
        let _ = tx.send(());
    });
    let _ = rx.await;
}

/// Resolve the callback as an abortable task.
///
/// When `callback_url` is set the provider first gets a chance to pick a
/// session out of it. `on_outcome` runs only if the task finishes; once the
/// returned handle is aborted the pending delay is dropped and nothing runs.
pub fn resolution_task<P, D, F, O>(
    provider: Rc<P>,
    callback_url: Option<String>,
    delay: D,
    on_outcome: O,
) -> (impl Future<Output = ()>, AbortHandle)
where
    P: SessionProvider + ?Sized,
    D: FnOnce(Duration) -> F,
    F: Future<Output = ()>,
    O: FnOnce(CallbackOutcome),
{
    let (abort, registration) = AbortHandle::new_pair();
    let task = Abortable::new(
        async move {
            if let Some(url) = callback_url {
                if let Err(err) = provider.detect_session_in_url(&url).await {
                    tracing::warn!(error = %err, "OAuth redirect carried no usable session");
                }
            }

            let outcome = resolve_callback(&*provider, delay).await;
            tracing::debug!(?outcome, "OAuth callback resolved");
            on_outcome(outcome);
        },
        registration,
    );

    let task = async move {
        if task.await.is_err() {
            tracing::debug!("OAuth callback left before resolving");
        }
    };
    (task, abort)
}

#[function_component(OAuthCallback)]
pub fn oauth_callback() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();

    use_effect_with((), move |_| {
        let (task, abort) = resolution_task(
            auth.provider(),
            window().location().href().ok(),
            browser_delay,
            move |outcome: CallbackOutcome| {
                if let Some(navigator) = navigator {
                    navigator.replace(&outcome.route());
                }
            },
        );
        wasm_bindgen_futures::spawn_local(task);

        move || abort.abort()
    });

    html! {
        <div class="flex items-center justify-center min-h-screen bg-gray-50 dark:bg-gray-900">
            <Spinner text={"Completing sign in..."} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use critique_http::{AuthError, Session};
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;
    use tokio::task::LocalSet;
    use tokio::time::Instant;

    /// Answers `get_session` from a script, one entry per call
    struct ScriptedProvider {
        answers: RefCell<VecDeque<Result<Option<Session>, AuthError>>>,
        calls: Cell<usize>,
    }

    impl ScriptedProvider {
        fn new(answers: Vec<Result<Option<Session>, AuthError>>) -> Self {
            Self {
                answers: RefCell::new(answers.into()),
                calls: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl SessionProvider for ScriptedProvider {
        async fn get_session(&self) -> Result<Option<Session>, AuthError> {
            self.calls.set(self.calls.get() + 1);
            self.answers.borrow_mut().pop_front().unwrap_or(Ok(None))
        }

        async fn refresh_session(&self) -> Result<Option<Session>, AuthError> {
            Ok(None)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_present_redirects_home_without_waiting() {
        let provider = ScriptedProvider::new(vec![Ok(Some(Session::new("token")))]);
        let delays = Cell::new(0);
        let started = Instant::now();

        let outcome = resolve_callback(&provider, |duration| {
            delays.set(delays.get() + 1);
            tokio::time::sleep(duration)
        })
        .await;

        assert_eq!(outcome, CallbackOutcome::Home);
        assert_eq!(outcome.route(), Route::Home);
        assert_eq!(delays.get(), 0);
        assert_eq!(provider.calls.get(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_after_delay_redirects_home_after_one_second() {
        let provider = ScriptedProvider::new(vec![Ok(None), Ok(Some(Session::new("token")))]);
        let started = Instant::now();

        let outcome = resolve_callback(&provider, tokio::time::sleep).await;

        assert_eq!(outcome, CallbackOutcome::Home);
        assert_eq!(provider.calls.get(), 2);
        assert!(started.elapsed() >= Duration::from_millis(1_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_check_waits_for_delay() {
        let provider = ScriptedProvider::new(vec![Ok(None), Ok(Some(Session::new("token")))]);
        let calls_when_delay_started = Cell::new(None);

        let outcome = resolve_callback(&provider, |duration| {
            calls_when_delay_started.set(Some(provider.calls.get()));
            assert_eq!(duration, Duration::from_millis(1_000));
            tokio::time::sleep(duration)
        })
        .await;

        assert_eq!(outcome, CallbackOutcome::Home);
        assert_eq!(calls_when_delay_started.get(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_session_twice_redirects_to_login() {
        let provider = ScriptedProvider::new(vec![Ok(None), Ok(None)]);

        let outcome = resolve_callback(&provider, tokio::time::sleep).await;

        assert_eq!(outcome, CallbackOutcome::Login);
        assert_eq!(outcome.route(), Route::Login);
        assert_eq!(provider.calls.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_errors_count_as_no_session() {
        let provider = ScriptedProvider::new(vec![
            Err(AuthError::Storage("unavailable".into())),
            Err(AuthError::Storage("unavailable".into())),
        ]);

        let outcome = resolve_callback(&provider, tokio::time::sleep).await;
        assert_eq!(outcome, CallbackOutcome::Login);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_then_session_redirects_home() {
        let provider = ScriptedProvider::new(vec![
            Err(AuthError::Storage("unavailable".into())),
            Ok(Some(Session::new("token"))),
        ]);

        let outcome = resolve_callback(&provider, tokio::time::sleep).await;
        assert_eq!(outcome, CallbackOutcome::Home);
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_task_never_reports_outcome() {
        let provider = Rc::new(ScriptedProvider::new(vec![
            Ok(None),
            Ok(Some(Session::new("token"))),
        ]));
        let reported = Rc::new(Cell::new(None));

        let (task, abort) = resolution_task(Rc::clone(&provider), None, tokio::time::sleep, {
            let reported = Rc::clone(&reported);
            move |outcome| reported.set(Some(outcome))
        });

        LocalSet::new()
            .run_until(async {
                let handle = tokio::task::spawn_local(task);

                // First check has run and the retry delay is pending
                tokio::time::sleep(Duration::from_millis(10)).await;
                assert_eq!(provider.calls.get(), 1);

                abort.abort();
                tokio::time::sleep(Duration::from_secs(2)).await;
                handle.await.unwrap();
            })
            .await;

        assert_eq!(reported.get(), None);
        assert_eq!(provider.calls.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_reports_outcome_after_delay() {
        let provider = Rc::new(ScriptedProvider::new(vec![
            Ok(None),
            Ok(Some(Session::new("token"))),
        ]));
        let reported = Rc::new(Cell::new(None));

        let (task, _abort) = resolution_task(Rc::clone(&provider), None, tokio::time::sleep, {
            let reported = Rc::clone(&reported);
            move |outcome| reported.set(Some(outcome))
        });

        LocalSet::new()
            .run_until(async {
                let handle = tokio::task::spawn_local(task);
                tokio::time::sleep(Duration::from_millis(500)).await;
                assert_eq!(reported.get(), None);

                handle.await.unwrap();
            })
            .await;

        assert_eq!(reported.get(), Some(CallbackOutcome::Home));
        assert_eq!(provider.calls.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_detects_session_in_callback_url_first() {
        let provider = Rc::new(UrlProvider::default());
        let reported = Rc::new(Cell::new(None));
        let started = Instant::now();

        let (task, _abort) = resolution_task(
            Rc::clone(&provider),
            Some("http://localhost/auth/callback#access_token=a&refresh_token=r".into()),
            tokio::time::sleep,
            {
                let reported = Rc::clone(&reported);
                move |outcome| reported.set(Some(outcome))
            },
        );
        task.await;

        assert_eq!(reported.get(), Some(CallbackOutcome::Home));
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(
            provider.seen_url.borrow().as_deref(),
            Some("http://localhost/auth/callback#access_token=a&refresh_token=r")
        );
    }

    /// Holds no session until one is detected in a URL
    #[derive(Default)]
    struct UrlProvider {
        seen_url: RefCell<Option<String>>,
    }

    #[async_trait(?Send)]
    impl SessionProvider for UrlProvider {
        async fn get_session(&self) -> Result<Option<Session>, AuthError> {
            Ok(self.seen_url.borrow().as_ref().map(|_| Session::new("a")))
        }

        async fn refresh_session(&self) -> Result<Option<Session>, AuthError> {
            Ok(None)
        }

        async fn detect_session_in_url(&self, url: &str) -> Result<Option<Session>, AuthError> {
            *self.seen_url.borrow_mut() = Some(url.to_string());
            Ok(Some(Session::new("a")))
        }
    }
}
