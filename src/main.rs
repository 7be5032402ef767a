use std::io::Write;

use anyhow::{Context, Result};
use maud::Markup;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use video_post_player::components::{ErrorPage, PostPage};
use video_post_player::config::Config;
use video_post_player::feed::{find_post, FeedLoader, PageContext};
use video_post_player::player::{AdaptiveLibrary, PostPlayer, SnapshotSurface};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing()?;

    info!("Starting video-post-player");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(feed_url = %config.feed_url, page_url = %config.page_url, "Configuration loaded");

    let page_url = Url::parse(&config.page_url).context("Invalid PAGE_URL")?;
    let page = PageContext::from_url(&page_url, config.page_slug.as_deref());

    let loader = FeedLoader::new(config.fetch_timeout).context("Failed to create feed loader")?;
    let html = render_page(&config, &loader, &page).await;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(html.into_string().as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write page")?;

    Ok(())
}

/// Render the post page, or an error page when the feed or the post is
/// unavailable. Feed and lookup failures are terminal for the page but not
/// for the process.
async fn render_page(config: &Config, loader: &FeedLoader, page: &PageContext) -> Markup {
    let posts = match loader.load(&config.feed_url).await {
        Ok(posts) => posts,
        Err(e) => {
            warn!(url = %config.feed_url, error = %e, "Feed load failed");
            return ErrorPage::new("Feed unavailable", &format!("posts.json load failed: {e}"))
                .render();
        }
    };

    match find_post(&posts, page) {
        Ok(post) => {
            let links = post.resolved_links();
            info!(
                post = %post.display_key(),
                streams = links.streams.len(),
                downloads = links.downloads.len(),
                "Post resolved"
            );

            // Serve the element with its initial source attached. Manifests
            // stay on native playback until the page script loads hls.js.
            let mut player = PostPlayer::new(
                post,
                SnapshotSurface::new(),
                AdaptiveLibrary::unavailable(),
                config.player.clone(),
            );
            player.start().await;
            let controller = player.controller();

            PostPage::new(post, &config.page_url)
                .with_ui(controller.ui())
                .with_status(controller.status())
                .with_settings(&config.player)
                .with_sources(controller.surface().sources())
                .render()
        }
        Err(e) => {
            warn!(identifier = %e.identifier, "No post matched the page");
            ErrorPage::new("Post not found", &e.to_string()).render()
        }
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,video_post_player=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    // Logs go to stderr; stdout carries the rendered page.
    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}
