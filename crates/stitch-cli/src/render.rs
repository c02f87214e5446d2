//! Page rendering for the terminal and for HTML output.

use colored::Colorize;
use html_escape::{encode_double_quoted_attribute, encode_text};

use stitch_core::PageView;
use stitch_core::view::{EMPTY_NOTICE, LOADING_NOTICE, PAGE_HEADING};

/// Render a page for the terminal.
pub fn text(page: &PageView) -> String {
    let mut out = String::new();

    match page {
        PageView::Loading => {
            out.push_str(LOADING_NOTICE);
            out.push('\n');
        }
        PageView::Error { message, hint } => {
            out.push_str(&format!("{} {}\n", "Failed to load:".red(), message));
            out.push_str(hint);
            out.push('\n');
        }
        PageView::Empty => {
            out.push_str(&format!("{}\n\n", PAGE_HEADING.bold()));
            out.push_str(EMPTY_NOTICE);
            out.push('\n');
        }
        PageView::Items { items } => {
            out.push_str(&format!("{}\n", PAGE_HEADING.bold()));
            for item in items {
                out.push('\n');
                out.push_str(&format!("{}\n", item.title.bold()));
                out.push_str(&item.body);
                out.push('\n');
                if let Some(media) = &item.media {
                    out.push_str(&format!("Video: {}\n", media.src));
                    if let Some(poster) = &media.poster {
                        out.push_str(&format!("Poster: {}\n", poster));
                    }
                }
                out.push_str(&format!(
                    "{}\n",
                    format!("Published: {}", item.published).dimmed()
                ));
            }
        }
    }

    out
}

/// Render a page as an HTML fragment.
pub fn html(page: &PageView) -> String {
    match page {
        PageView::Loading => format!(
            "<div class=\"loading\">{}</div>\n",
            encode_text(LOADING_NOTICE)
        ),
        PageView::Error { message, hint } => format!(
            "<div class=\"error\">Failed to load: {}<br>{}</div>\n",
            encode_text(message),
            encode_text(hint)
        ),
        PageView::Empty => format!(
            "<section class=\"content-list\">\n  <h2>{}</h2>\n  <p class=\"empty\">{}</p>\n</section>\n",
            encode_text(PAGE_HEADING),
            encode_text(EMPTY_NOTICE)
        ),
        PageView::Items { items } => {
            let mut out = format!(
                "<section class=\"content-list\">\n  <h2>{}</h2>\n",
                encode_text(PAGE_HEADING)
            );
            for item in items {
                out.push_str(&format!(
                    "  <article class=\"content-item\" data-id=\"{}\">\n",
                    encode_double_quoted_attribute(&item.id)
                ));
                out.push_str(&format!("    <h3>{}</h3>\n", encode_text(&item.title)));
                out.push_str(&format!("    <p>{}</p>\n", encode_text(&item.body)));
                if let Some(media) = &item.media {
                    let poster = media
                        .poster
                        .as_deref()
                        .map(|p| format!(" poster=\"{}\"", encode_double_quoted_attribute(p)))
                        .unwrap_or_default();
                    out.push_str(&format!(
                        "    <video src=\"{}\" controls{}></video>\n",
                        encode_double_quoted_attribute(&media.src),
                        poster
                    ));
                }
                out.push_str(&format!(
                    "    <small>Published: {}</small>\n",
                    encode_text(&item.published)
                ));
                out.push_str("  </article>\n");
            }
            out.push_str("</section>\n");
            out
        }
    }
}
