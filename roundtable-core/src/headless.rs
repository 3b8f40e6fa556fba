//! Headless gallery interface for programmatic use.
//!
//! This module provides a line-oriented command language over a
//! [`Controller`] and a plain-text rendering of the page. It's designed for:
//! - Scripted sessions against a running mock server
//! - End-to-end tests without a terminal
//!
//! # Example
//!
//! ```ignore
//! use roundtable_core::headless::{HeadlessCommand, HeadlessGallery};
//!
//! let mut gallery = HeadlessGallery::connect(&config);
//! gallery.run(HeadlessCommand::parse("category Legendary")?).await;
//! println!("{}", gallery.render());
//! ```

use crate::config::ClientConfig;
use crate::controller::{Controller, Page};
use crate::data::{CommentStore, DataClient, KnightSource};
use crate::model::Selection;
use crate::summary::Encyclopedia;
use crate::view::DetailsContent;
use std::fmt::Write as _;
use thiserror::Error;
use wiki::Wiki;

/// One line of headless input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessCommand {
    /// Select `All`.
    All,
    Category(Selection),
    Refresh,
    Comment(String),
    Delete(String),
    /// Activate the card for a knight by name.
    Show(String),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl HeadlessCommand {
    pub fn parse(line: &str) -> Result<Self, ParseCommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let require = |usage: &'static str| {
            if rest.is_empty() {
                Err(ParseCommandError::Usage(usage))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "all" => Ok(HeadlessCommand::All),
            "category" | "cat" => {
                require("category <name>").map(|name| HeadlessCommand::Category(Selection::parse(&name)))
            }
            "refresh" => Ok(HeadlessCommand::Refresh),
            // Blank text is accepted here so the controller can skip it
            "comment" => Ok(HeadlessCommand::Comment(rest.to_string())),
            "delete" => require("delete <id>").map(HeadlessCommand::Delete),
            "show" => require("show <name>").map(HeadlessCommand::Show),
            "status" => Ok(HeadlessCommand::Status),
            "help" => Ok(HeadlessCommand::Help),
            "quit" | "exit" => Ok(HeadlessCommand::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

/// Which regions a command touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Touched {
    pub gallery: bool,
    pub details: bool,
    pub comments: bool,
}

impl Touched {
    const ALL: Touched = Touched {
        gallery: true,
        details: true,
        comments: true,
    };
}

/// A controller plus the text front end.
pub struct HeadlessGallery<D, E> {
    controller: Controller<D, E>,
}

impl HeadlessGallery<DataClient, Wiki> {
    /// Build live clients from configuration.
    pub fn connect(config: &ClientConfig) -> Self {
        let wiki = Wiki::with_timeout(config.timeout).with_base_url(config.wiki_url.clone());
        Self::new(DataClient::new(config), wiki)
    }
}

impl<D, E> HeadlessGallery<D, E>
where
    D: KnightSource + CommentStore,
    E: Encyclopedia,
{
    pub fn new(data: D, encyclopedia: E) -> Self {
        Self {
            controller: Controller::new(data, encyclopedia),
        }
    }

    pub fn page(&self) -> &Page {
        self.controller.page()
    }

    pub fn controller(&self) -> &Controller<D, E> {
        &self.controller
    }

    pub async fn load(&mut self) {
        self.controller.load().await;
    }

    /// Execute a command and report which regions changed.
    ///
    /// `Help` and `Quit` are handled by the caller and touch nothing.
    pub async fn run(&mut self, command: HeadlessCommand) -> Touched {
        match command {
            HeadlessCommand::All => {
                self.controller.category_changed(Selection::All).await;
                Touched { details: false, ..Touched::ALL }
            }
            HeadlessCommand::Category(selection) => {
                self.controller.category_changed(selection).await;
                Touched { details: false, ..Touched::ALL }
            }
            HeadlessCommand::Refresh => {
                self.controller.refresh().await;
                Touched { details: false, ..Touched::ALL }
            }
            HeadlessCommand::Comment(text) => {
                let posted = self.controller.submit_comment(&text).await;
                Touched {
                    comments: posted,
                    ..Touched::default()
                }
            }
            HeadlessCommand::Delete(id) => {
                self.controller.delete_comment(&id).await;
                Touched {
                    comments: true,
                    ..Touched::default()
                }
            }
            HeadlessCommand::Show(name) => {
                self.controller.knight_activated(&name).await;
                Touched {
                    details: true,
                    ..Touched::default()
                }
            }
            HeadlessCommand::Status => Touched::ALL,
            HeadlessCommand::Help | HeadlessCommand::Quit => Touched::default(),
        }
    }

    /// Render the whole page.
    pub fn render(&self) -> String {
        self.render_regions(Touched::ALL)
    }

    /// Render only the given regions, in page order.
    pub fn render_regions(&self, touched: Touched) -> String {
        let page = self.controller.page();
        let mut out = String::new();

        if touched.gallery {
            let _ = writeln!(out, "[category] {}", page.selected());
            render_gallery(page, &mut out);
        }
        if touched.details {
            render_details(page, &mut out);
        }
        if touched.comments {
            render_comments(page, &mut out);
        }
        out
    }
}

fn render_gallery(page: &Page, out: &mut String) {
    let gallery = &page.gallery;
    if let Some(notice) = gallery.notice() {
        let _ = writeln!(out, "[error] {notice}");
    }
    let _ = writeln!(out, "[knights] {}", gallery.cards().len());
    for card in gallery.cards() {
        let _ = writeln!(out, "  {} - {}", card.name, card.title);
    }
}

fn render_details(page: &Page, out: &mut String) {
    let (heading, body) = page.details.text();
    match page.details.content() {
        DetailsContent::Error { .. } => {
            let _ = writeln!(out, "[error] {body}");
        }
        _ => {
            let _ = writeln!(out, "[details]");
            if let Some(heading) = heading {
                let _ = writeln!(out, "  # {heading}");
            }
            let _ = writeln!(out, "  {body}");
        }
    }
}

fn render_comments(page: &Page, out: &mut String) {
    let panel = &page.comments;
    if let Some(notice) = panel.notice() {
        let _ = writeln!(out, "[error] {notice}");
    }
    let _ = writeln!(out, "[comments]");
    match panel.placeholder() {
        Some(placeholder) => {
            let _ = writeln!(out, "  {placeholder}");
        }
        None => {
            for row in panel.rows() {
                let _ = writeln!(out, "  ({}) {}", row.id, row.text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(HeadlessCommand::parse("all"), Ok(HeadlessCommand::All));
        assert_eq!(
            HeadlessCommand::parse("category  Legendary "),
            Ok(HeadlessCommand::Category(Selection::parse("Legendary")))
        );
        assert_eq!(
            HeadlessCommand::parse("comment Long live the king"),
            Ok(HeadlessCommand::Comment("Long live the king".to_string()))
        );
        assert_eq!(
            HeadlessCommand::parse("show Sir Gawain"),
            Ok(HeadlessCommand::Show("Sir Gawain".to_string()))
        );
        assert_eq!(HeadlessCommand::parse("comment"), Ok(HeadlessCommand::Comment(String::new())));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            HeadlessCommand::parse("delete"),
            Err(ParseCommandError::Usage("delete <id>"))
        );
        assert_eq!(
            HeadlessCommand::parse("joust"),
            Err(ParseCommandError::Unknown("joust".to_string()))
        );
    }
}
