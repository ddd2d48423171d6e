pub mod gallery;
pub mod host;

pub use gallery::{GalleryViewModel, PendingFetch, SLIDESHOW_SURFACE};
pub use host::{FullscreenHost, Notifier, ScreenMetrics};
