//! Gallery view-model: display state and the operations a front end binds to.
//!
//! Owns all mutable display state for one gallery page and funnels every
//! mutation through its public operations. The fetch cycle is split in two so
//! a UI loop can await the transport without holding the view-model across
//! the round trip: [`GalleryViewModel::begin_fetch`] hands out a
//! sequence-numbered ticket and [`GalleryViewModel::apply_fetch`] installs
//! the outcome, discarding anything stale. [`GalleryViewModel::refresh`]
//! composes the two for the common case.

use tracing::{debug, info, warn};

use crate::client::{ClientError, ListingFetcher};
use crate::models::{Listing, MediaItem};
use crate::templates;
use crate::viewmodel::host::{FullscreenHost, Notifier, ScreenMetrics};

/// Identifier of the display surface the slideshow goes fullscreen on.
pub const SLIDESHOW_SURFACE: &str = "fullscreen-image";

/// Notification shown when a listing fetch fails, regardless of cause.
const FETCH_ERROR_MESSAGE: &str = "Error retrieving gallery listing";

/// Ticket for one in-flight listing fetch. Only the ticket matching the most
/// recently issued fetch may mutate state when it completes.
#[derive(Debug, Clone)]
pub struct PendingFetch {
    seq: u64,
    url: String,
}

impl PendingFetch {
    /// URL this fetch was issued against.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// View-model for the gallery page.
pub struct GalleryViewModel {
    listing: Listing,
    current_slide: usize,
    expanded_video: Option<usize>,
    active_video_format: Option<String>,
    fetch_seq: u64,
    default_url: String,
    fullscreen: Box<dyn FullscreenHost>,
    screen: Box<dyn ScreenMetrics>,
    notifier: Box<dyn Notifier>,
}

impl GalleryViewModel {
    /// Creates a view-model with empty listing state. `default_url` is the
    /// listing endpoint used when a fetch gives no override.
    pub fn new(
        default_url: impl Into<String>,
        fullscreen: Box<dyn FullscreenHost>,
        screen: Box<dyn ScreenMetrics>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            listing: Listing::default(),
            current_slide: 1,
            expanded_video: None,
            active_video_format: None,
            fetch_seq: 0,
            default_url: default_url.into(),
            fullscreen,
            screen,
            notifier,
        }
    }

    /// The listing currently on display.
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Index the fullscreen slideshow is positioned at.
    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    /// Index of the expanded video, if any.
    pub fn expanded_video(&self) -> Option<usize> {
        self.expanded_video
    }

    /// Currently selected video conversion format.
    pub fn active_video_format(&self) -> Option<&str> {
        self.active_video_format.as_deref()
    }

    /// Selects a conversion format explicitly, overriding the default.
    pub fn set_video_format(&mut self, format: impl Into<String>) {
        self.active_video_format = Some(format.into());
    }

    /// Clears the selected format. The next successful fetch with non-empty
    /// formats re-defaults it to the server's first entry.
    pub fn clear_video_format(&mut self) {
        self.active_video_format = None;
    }

    /// Issues a fetch ticket for `url_override`, or for the configured
    /// default endpoint. Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self, url_override: Option<&str>) -> PendingFetch {
        self.fetch_seq += 1;
        let url = url_override.unwrap_or(&self.default_url).to_string();
        debug!("Listing fetch {} -> {}", self.fetch_seq, url);
        PendingFetch {
            seq: self.fetch_seq,
            url,
        }
    }

    /// Applies the outcome of a fetch. Stale tickets are discarded outright,
    /// success or failure. A current failure notifies the user once and
    /// leaves listing state untouched; a current success replaces the listing
    /// wholesale and defaults the video format if none was ever chosen.
    pub fn apply_fetch(&mut self, pending: PendingFetch, result: Result<Listing, ClientError>) {
        if pending.seq != self.fetch_seq {
            debug!(
                "Discarding stale listing response {} (latest is {})",
                pending.seq, self.fetch_seq
            );
            return;
        }

        match result {
            Ok(listing) => {
                if self.active_video_format.is_none() {
                    if let Some(first) = listing.video_formats.first() {
                        debug!("Defaulting video format to {}", first);
                        self.active_video_format = Some(first.clone());
                    }
                }
                info!(
                    "Listing updated: {} directories, {} images, {} videos",
                    listing.directories.len(),
                    listing.images.len(),
                    listing.videos.len()
                );
                self.listing = listing;
            }
            Err(err) => {
                warn!("Listing fetch from {} failed: {}", pending.url, err);
                self.notifier.notify_error(FETCH_ERROR_MESSAGE);
            }
        }
    }

    /// Fetches and applies a listing in one step.
    pub async fn refresh(&mut self, fetcher: &dyn ListingFetcher, url_override: Option<&str>) {
        let pending = self.begin_fetch(url_override);
        let result = fetcher.fetch(pending.url()).await;
        self.apply_fetch(pending, result);
    }

    /// Navigates to the parent listing. Returns false when already at a root.
    pub async fn navigate_up(&mut self, fetcher: &dyn ListingFetcher) -> bool {
        let Some(path) = self.listing.previous_path.clone() else {
            return false;
        };
        self.refresh(fetcher, Some(&path)).await;
        true
    }

    /// Navigates into the directory at `index`. Returns false when the index
    /// is out of range.
    pub async fn open_directory(&mut self, fetcher: &dyn ListingFetcher, index: usize) -> bool {
        let Some(path) = self.listing.directories.get(index).map(|d| d.path.clone()) else {
            return false;
        };
        self.refresh(fetcher, Some(&path)).await;
        true
    }

    /// Starts the slideshow at `index`: toggles fullscreen presentation and
    /// positions the slideshow. Bounds are the caller's responsibility.
    pub fn toggle_slideshow(&mut self, index: usize) {
        self.toggle_fullscreen();
        self.current_slide = index;
    }

    /// Whether the slideshow is showing, i.e. fullscreen is active.
    pub fn is_slideshow_visible(&self) -> bool {
        self.fullscreen.is_active()
    }

    /// Enters fullscreen on the slideshow surface, or leaves it if active.
    pub fn toggle_fullscreen(&mut self) {
        if self.fullscreen.is_active() {
            self.fullscreen.exit();
        } else {
            info!("Enabling fullscreen");
            self.fullscreen.enter(SLIDESHOW_SURFACE);
        }
    }

    /// Image URL sized for fullscreen display: screen dimensions scaled by
    /// the device pixel ratio, rounded to nearest. Empty when the item has no
    /// media path.
    pub fn resolve_fullscreen_image_url(&self, item: &MediaItem) -> String {
        let ratio = self.screen.device_pixel_ratio();
        let width = (self.screen.screen_width() as f64 * ratio).round() as u32;
        let height = (self.screen.screen_height() as f64 * ratio).round() as u32;
        self.resolve_image_url(item, width, height)
    }

    /// Image URL for explicit pixel dimensions. Empty when the item has no
    /// media path.
    pub fn resolve_image_url(&self, item: &MediaItem, width: u32, height: u32) -> String {
        match &item.media_path {
            Some(template) => templates::image_url(template, width, height),
            None => String::new(),
        }
    }

    /// True iff the video at `index` is the expanded one.
    pub fn is_video_expanded(&self, index: usize) -> bool {
        self.expanded_video == Some(index)
    }

    /// Expands the video at `index`, collapsing any other; toggling the
    /// expanded index collapses it. At most one video is expanded at a time.
    pub fn toggle_video(&mut self, index: usize) {
        if self.expanded_video == Some(index) {
            self.expanded_video = None;
        } else {
            self.expanded_video = Some(index);
        }
    }

    /// Video URL for the active conversion format. Empty when the item has
    /// no media path; unchanged template when no format is selected.
    pub fn resolve_video_url(&self, video: &MediaItem) -> String {
        let Some(template) = &video.media_path else {
            return String::new();
        };
        match &self.active_video_format {
            Some(format) => templates::video_url(template, format),
            None => template.clone(),
        }
    }

    /// Label for the image tab, with a count suffix when non-empty.
    pub fn gallery_tab_label(&self) -> String {
        Self::tab_label("GALLERY", self.listing.images.len())
    }

    /// Label for the video tab, with a count suffix when non-empty.
    pub fn video_tab_label(&self) -> String {
        Self::tab_label("VIDEO", self.listing.videos.len())
    }

    fn tab_label(label: &str, count: usize) -> String {
        if count > 0 {
            format!("{} ({})", label, count)
        } else {
            label.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Directory;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::cell::Cell;
    use std::rc::Rc;

    struct MockFullscreen {
        active: Rc<Cell<bool>>,
    }

    impl FullscreenHost for MockFullscreen {
        fn is_active(&self) -> bool {
            self.active.get()
        }
        fn enter(&mut self, surface: &str) {
            assert_eq!(surface, SLIDESHOW_SURFACE);
            self.active.set(true);
        }
        fn exit(&mut self) {
            self.active.set(false);
        }
    }

    struct MockScreen;

    impl ScreenMetrics for MockScreen {
        fn screen_width(&self) -> u32 {
            1920
        }
        fn screen_height(&self) -> u32 {
            1080
        }
        fn device_pixel_ratio(&self) -> f64 {
            2.0
        }
    }

    struct CountingNotifier {
        errors: Rc<Cell<usize>>,
    }

    impl Notifier for CountingNotifier {
        fn notify_error(&self, _message: &str) {
            self.errors.set(self.errors.get() + 1);
        }
    }

    struct OkFetcher {
        listing: Listing,
    }

    #[async_trait]
    impl ListingFetcher for OkFetcher {
        async fn fetch(&self, _url: &str) -> Result<Listing, ClientError> {
            Ok(self.listing.clone())
        }
    }

    struct FailFetcher;

    #[async_trait]
    impl ListingFetcher for FailFetcher {
        async fn fetch(&self, _url: &str) -> Result<Listing, ClientError> {
            Err(ClientError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
            })
        }
    }

    struct Harness {
        vm: GalleryViewModel,
        fullscreen_active: Rc<Cell<bool>>,
        error_count: Rc<Cell<usize>>,
    }

    fn harness() -> Harness {
        let fullscreen_active = Rc::new(Cell::new(false));
        let error_count = Rc::new(Cell::new(0));
        let vm = GalleryViewModel::new(
            "http://localhost/gallery/service",
            Box::new(MockFullscreen {
                active: fullscreen_active.clone(),
            }),
            Box::new(MockScreen),
            Box::new(CountingNotifier {
                errors: error_count.clone(),
            }),
        );
        Harness {
            vm,
            fullscreen_active,
            error_count,
        }
    }

    fn sample_listing() -> Listing {
        Listing {
            directories: vec![Directory {
                name: "Holidays".into(),
                path: "/gallery/service/holidays".into(),
            }],
            images: vec![
                MediaItem::with_path("/img/{width}x{height}/a.jpg"),
                MediaItem::with_path("/img/{width}x{height}/b.jpg"),
                MediaItem::with_path("/img/{width}x{height}/c.jpg"),
            ],
            videos: vec![MediaItem::with_path("/v/{conversionFormat}/clip.mp4")],
            previous_path: Some("/gallery/service".into()),
            current_path_display: Some("holidays".into()),
            video_formats: vec!["compact".into(), "hd".into()],
        }
    }

    #[test]
    fn test_default_state() {
        let h = harness();
        assert_eq!(h.vm.current_slide(), 1);
        assert_eq!(h.vm.expanded_video(), None);
        assert!(h.vm.active_video_format().is_none());
        assert!(h.vm.listing().images.is_empty());
        assert!(!h.vm.is_slideshow_visible());
    }

    #[tokio::test]
    async fn test_first_fetch_defaults_video_format() {
        let mut h = harness();
        let fetcher = OkFetcher {
            listing: sample_listing(),
        };
        h.vm.refresh(&fetcher, None).await;
        assert_eq!(h.vm.active_video_format(), Some("compact"));
        assert_eq!(h.vm.listing().images.len(), 3);
    }

    #[tokio::test]
    async fn test_later_fetch_keeps_chosen_format() {
        let mut h = harness();
        h.vm.refresh(
            &OkFetcher {
                listing: sample_listing(),
            },
            None,
        )
        .await;
        h.vm.set_video_format("hd");

        let mut other = sample_listing();
        other.video_formats = vec!["mobile".into()];
        h.vm.refresh(&OkFetcher { listing: other }, None).await;
        assert_eq!(h.vm.active_video_format(), Some("hd"));
    }

    #[tokio::test]
    async fn test_cleared_format_redefaults_on_next_fetch() {
        let mut h = harness();
        h.vm.refresh(
            &OkFetcher {
                listing: sample_listing(),
            },
            None,
        )
        .await;
        h.vm.clear_video_format();

        let mut other = sample_listing();
        other.video_formats = vec!["mobile".into()];
        h.vm.refresh(&OkFetcher { listing: other }, None).await;
        assert_eq!(h.vm.active_video_format(), Some("mobile"));
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_state_and_notifies_once() {
        let mut h = harness();
        h.vm.refresh(
            &OkFetcher {
                listing: sample_listing(),
            },
            None,
        )
        .await;

        h.vm.refresh(&FailFetcher, None).await;
        assert_eq!(h.error_count.get(), 1);
        // Prior listing survives untouched.
        assert_eq!(h.vm.listing().images.len(), 3);
        assert_eq!(h.vm.listing().directories.len(), 1);
        assert_eq!(h.vm.active_video_format(), Some("compact"));
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut h = harness();
        let first = h.vm.begin_fetch(None);
        let second = h.vm.begin_fetch(None);

        // The slower first response loses, whatever its outcome.
        h.vm.apply_fetch(first, Ok(sample_listing()));
        assert!(h.vm.listing().images.is_empty());
        assert_eq!(h.error_count.get(), 0);

        h.vm.apply_fetch(second, Ok(sample_listing()));
        assert_eq!(h.vm.listing().images.len(), 3);
    }

    #[test]
    fn test_stale_failure_does_not_notify() {
        let mut h = harness();
        let first = h.vm.begin_fetch(None);
        let _second = h.vm.begin_fetch(None);

        h.vm.apply_fetch(
            first,
            Err(ClientError::Status {
                status: StatusCode::NOT_FOUND,
            }),
        );
        assert_eq!(h.error_count.get(), 0);
    }

    #[test]
    fn test_begin_fetch_url_selection() {
        let mut h = harness();
        assert_eq!(
            h.vm.begin_fetch(None).url(),
            "http://localhost/gallery/service"
        );
        assert_eq!(
            h.vm.begin_fetch(Some("/gallery/service/holidays")).url(),
            "/gallery/service/holidays"
        );
    }

    #[tokio::test]
    async fn test_navigate_up_and_open_directory() {
        let mut h = harness();
        let fetcher = OkFetcher {
            listing: sample_listing(),
        };
        assert!(!h.vm.navigate_up(&fetcher).await);

        h.vm.refresh(&fetcher, None).await;
        assert!(h.vm.open_directory(&fetcher, 0).await);
        assert!(!h.vm.open_directory(&fetcher, 7).await);
        assert!(h.vm.navigate_up(&fetcher).await);
    }

    #[test]
    fn test_toggle_video_expand_collapse() {
        let mut h = harness();
        h.vm.toggle_video(2);
        assert!(h.vm.is_video_expanded(2));
        h.vm.toggle_video(2);
        assert_eq!(h.vm.expanded_video(), None);
    }

    #[test]
    fn test_toggle_video_single_expansion() {
        let mut h = harness();
        h.vm.toggle_video(2);
        h.vm.toggle_video(5);
        assert!(h.vm.is_video_expanded(5));
        assert!(!h.vm.is_video_expanded(2));
    }

    #[tokio::test]
    async fn test_tab_labels() {
        let mut h = harness();
        assert_eq!(h.vm.gallery_tab_label(), "GALLERY");
        assert_eq!(h.vm.video_tab_label(), "VIDEO");

        h.vm.refresh(
            &OkFetcher {
                listing: sample_listing(),
            },
            None,
        )
        .await;
        assert_eq!(h.vm.gallery_tab_label(), "GALLERY (3)");
        assert_eq!(h.vm.video_tab_label(), "VIDEO (1)");
    }

    #[test]
    fn test_toggle_slideshow_enters_fullscreen() {
        let mut h = harness();
        h.vm.toggle_slideshow(4);
        assert!(h.fullscreen_active.get());
        assert!(h.vm.is_slideshow_visible());
        assert_eq!(h.vm.current_slide(), 4);
    }

    #[test]
    fn test_toggle_fullscreen_round_trip() {
        let mut h = harness();
        h.vm.toggle_fullscreen();
        assert!(h.vm.is_slideshow_visible());
        h.vm.toggle_fullscreen();
        assert!(!h.vm.is_slideshow_visible());
    }

    #[test]
    fn test_resolve_fullscreen_image_url_scales_by_pixel_ratio() {
        let h = harness();
        let item = MediaItem::with_path("/img/{width}x{height}.jpg");
        // 1920x1080 at ratio 2.0
        assert_eq!(h.vm.resolve_fullscreen_image_url(&item), "/img/3840x2160.jpg");
    }

    #[test]
    fn test_resolve_image_url_explicit_dimensions() {
        let h = harness();
        let item = MediaItem::with_path("/img/{width}x{height}.jpg");
        assert_eq!(h.vm.resolve_image_url(&item, 800, 600), "/img/800x600.jpg");
    }

    #[test]
    fn test_resolve_urls_without_media_path() {
        let h = harness();
        let item = MediaItem::default();
        assert_eq!(h.vm.resolve_image_url(&item, 800, 600), "");
        assert_eq!(h.vm.resolve_fullscreen_image_url(&item), "");
        assert_eq!(h.vm.resolve_video_url(&item), "");
    }

    #[test]
    fn test_resolve_video_url_with_format() {
        let mut h = harness();
        h.vm.set_video_format("mp4");
        let video = MediaItem::with_path("/v/{conversionFormat}/clip.mp4");
        assert_eq!(h.vm.resolve_video_url(&video), "/v/mp4/clip.mp4");
    }

    #[test]
    fn test_resolve_video_url_without_format_keeps_template() {
        let h = harness();
        let video = MediaItem::with_path("/v/{conversionFormat}/clip.mp4");
        assert_eq!(h.vm.resolve_video_url(&video), "/v/{conversionFormat}/clip.mp4");
    }
}
