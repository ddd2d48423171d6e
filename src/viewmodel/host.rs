//! Collaborator seams toward the host environment.
//!
//! The view-model never talks to a rendering layer directly. Fullscreen
//! control, screen geometry, and user-visible error notifications go through
//! these traits; the front end decides how they map onto the actual host.

/// Host fullscreen capability for the slideshow surface.
pub trait FullscreenHost {
    /// Whether fullscreen presentation is currently active.
    fn is_active(&self) -> bool;
    /// Requests fullscreen on the identified display surface.
    fn enter(&mut self, surface: &str);
    /// Leaves fullscreen, if active.
    fn exit(&mut self);
}

/// Screen geometry, queried at call time so monitor or rotation changes are
/// picked up without any invalidation step.
pub trait ScreenMetrics {
    fn screen_width(&self) -> u32;
    fn screen_height(&self) -> u32;
    /// Device pixel ratio; 1.0 when the host does not report one.
    fn device_pixel_ratio(&self) -> f64;
}

/// Sink for user-visible error notifications.
pub trait Notifier {
    fn notify_error(&self, message: &str);
}
