// ABOUTME: Main application structure and state management for the TUI

pub mod events;
pub mod focus;
pub mod notifications;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use focus::FocusTarget;
pub use notifications::{NotificationPresenter, NotificationType};
pub use state::{App, AppState};
