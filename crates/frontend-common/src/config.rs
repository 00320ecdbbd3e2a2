//! Frontend configuration

/// Backend API location
pub struct ApiConfig;

impl ApiConfig {
    /// Deployed backend host
    pub const PRODUCTION_HOST: &'static str = "ai-resume-critique-production.up.railway.app";

    /// Backend host during local development
    pub const LOCAL_HOST: &'static str = "localhost:8000";

    /// Release builds talk to the deployed backend
    pub const fn is_production() -> bool {
        !cfg!(debug_assertions)
    }

    /// Base URL for HTTP calls; `CRITIQUE_API_BASE_URL` at build time overrides it
    pub fn base_url() -> String {
        option_env!("CRITIQUE_API_BASE_URL").map_or_else(
            || Self::url_for(Self::is_production()),
            str::to_string,
        )
    }

    fn url_for(production: bool) -> String {
        if production {
            format!("https://{}", Self::PRODUCTION_HOST)
        } else {
            format!("http://{}", Self::LOCAL_HOST)
        }
    }
}

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Wait before the second session check on the OAuth callback page
    pub const CALLBACK_RETRY_DELAY_MS: u64 = 1_000;

    /// Auth service URL, set at build time
    pub const SUPABASE_URL: &'static str = match option_env!("SUPABASE_URL") {
        Some(url) => url,
        None => "http://localhost:54321",
    };

    /// Public (anon) key of the auth service, set at build time
    pub const SUPABASE_ANON_KEY: &'static str = match option_env!("SUPABASE_ANON_KEY") {
        Some(key) => key,
        None => "",
    };

    /// Local storage key for the theme choice
    pub const THEME_STORAGE_KEY: &'static str = "theme";
}

/// Cursor trail tuning
pub struct CursorConfig;

impl CursorConfig {
    /// Number of lagging markers
    pub const TRAIL_LENGTH: usize = 35;

    /// Chase factor of the marker nearest the pointer
    pub const BASE_SPEED: f64 = 0.92;

    /// Chase factor lost per step down the trail
    pub const SPEED_STEP: f64 = 0.022;

    /// Markers further than this from the pointer (px) are fully faded
    pub const MAX_DISTANCE: f64 = 200.0;

    pub const OPACITY_GAIN: f64 = 2.5;

    /// Diameter of the first trail marker (px)
    pub const TRAIL_BASE_SIZE: f64 = 40.0;

    /// Diameter lost per step down the trail (px)
    pub const TRAIL_SIZE_STEP: f64 = 0.8;

    pub const LEAD_SIZE: f64 = 24.0;
    pub const LEAD_HOVER_SIZE: f64 = 40.0;
}
