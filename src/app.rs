//! Terminal front end wiring the client and view-model together.
//!
//! Fetches one listing and prints the tab labels, sub-directories, and
//! resolved media URLs. Fullscreen and screen geometry get headless stand-ins
//! here; a graphical front end would supply real host bindings instead.

use anyhow::Result;
use tracing::error;

use crate::client::ListingClient;
use crate::config::ServiceConfig;
use crate::viewmodel::{FullscreenHost, GalleryViewModel, Notifier, ScreenMetrics};

/// Routes error notifications to the log and the terminal.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify_error(&self, message: &str) {
        error!("{}", message);
        eprintln!("{}", message);
    }
}

/// Headless stand-in for the host fullscreen capability.
#[derive(Default)]
struct HeadlessFullscreen {
    active: bool,
}

impl FullscreenHost for HeadlessFullscreen {
    fn is_active(&self) -> bool {
        self.active
    }
    fn enter(&mut self, _surface: &str) {
        self.active = true;
    }
    fn exit(&mut self) {
        self.active = false;
    }
}

/// Fixed screen geometry for terminal runs.
struct FixedScreen;

impl ScreenMetrics for FixedScreen {
    fn screen_width(&self) -> u32 {
        1920
    }
    fn screen_height(&self) -> u32 {
        1080
    }
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }
}

pub struct GalleryApp {
    client: ListingClient,
    view_model: GalleryViewModel,
}

impl GalleryApp {
    pub fn new(config: ServiceConfig) -> Self {
        let client = ListingClient::new(config.base_url.clone());
        let default_url = client.service_url(config.start_path.as_deref());
        let view_model = GalleryViewModel::new(
            default_url,
            Box::<HeadlessFullscreen>::default(),
            Box::new(FixedScreen),
            Box::new(StderrNotifier),
        );
        Self { client, view_model }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.view_model.refresh(&self.client, None).await;
        self.print_listing();
        Ok(())
    }

    fn print_listing(&self) {
        let vm = &self.view_model;
        let listing = vm.listing();

        println!(
            "{}",
            listing.current_path_display.as_deref().unwrap_or("(root)")
        );
        println!("{} | {}", vm.gallery_tab_label(), vm.video_tab_label());

        if let Some(previous) = &listing.previous_path {
            println!("  up      {}", previous);
        }
        for dir in &listing.directories {
            println!("  dir     {}  {}", dir.name, dir.path);
        }
        for image in &listing.images {
            println!("  image   {}", vm.resolve_fullscreen_image_url(image));
        }
        for video in &listing.videos {
            println!("  video   {}", vm.resolve_video_url(video));
        }
    }
}
