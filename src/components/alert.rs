//! Status line and alert components.
//!
//! The `#debug` status line is the page's single diagnostic sink; alerts are
//! used for terminal feed and lookup failures.

use maud::{html, Markup, Render};

use crate::player::{StatusArea, StatusLevel};

/// Headline for a failure that ends the page: feed unavailable or no post.
#[derive(Debug, Clone, Copy)]
pub struct Alert<'a> {
    pub title: Option<&'a str>,
    pub message: &'a str,
}

impl<'a> Alert<'a> {
    #[must_use]
    pub const fn error(message: &'a str) -> Self {
        Self {
            title: None,
            message,
        }
    }

    #[must_use]
    pub const fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        html! {
            article class="error" role="alert" {
                @if let Some(title) = self.title {
                    strong { (title) }
                    " "
                }
                (self.message)
            }
        }
    }
}

/// The `#debug` region, showing the latest status message.
#[derive(Debug, Clone, Copy)]
pub struct StatusLine<'a> {
    pub status: &'a StatusArea,
}

impl<'a> StatusLine<'a> {
    #[must_use]
    pub const fn new(status: &'a StatusArea) -> Self {
        Self { status }
    }

    fn class(&self) -> &'static str {
        match self.status.level() {
            Some(StatusLevel::Error) => "status-line status-error",
            Some(StatusLevel::Info) => "status-line status-info",
            None => "status-line",
        }
    }
}

impl Render for StatusLine<'_> {
    fn render(&self) -> Markup {
        html! {
            div id="debug" class=(self.class()) aria-live="polite" {
                @if let Some(text) = self.status.text() {
                    (text)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_without_title() {
        let html = Alert::error("HTTP 404").render().into_string();
        assert_eq!(html, r#"<article class="error" role="alert">HTTP 404</article>"#);
    }

    #[test]
    fn test_alert_with_title() {
        let html = Alert::error("no post found for identifier 'abc'")
            .with_title("Not found")
            .render()
            .into_string();
        assert!(html.contains(r#"<article class="error" role="alert">"#));
        assert!(html.contains("<strong>Not found</strong>"));
        assert!(html.contains("no post found for identifier"));
        assert!(html.contains("abc"));
    }

    #[test]
    fn test_empty_status_line() {
        let status = StatusArea::new();
        let html = StatusLine::new(&status).render().into_string();
        assert_eq!(
            html,
            r#"<div id="debug" class="status-line" aria-live="polite"></div>"#
        );
    }

    #[test]
    fn test_status_line_shows_error() {
        let mut status = StatusArea::new();
        status.error("Playback blocked.");
        let html = StatusLine::new(&status).render().into_string();
        assert!(html.contains("status-error"));
        assert!(html.contains("Playback blocked."));
    }
}
