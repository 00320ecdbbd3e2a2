mod spinner;
mod theme_toggle;

pub use spinner::LoadingSpinner as Spinner;
pub use theme_toggle::ThemeToggle;
