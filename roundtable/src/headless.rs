//! Headless mode for the knight gallery.
//!
//! This module provides a simple text-based interface for browsing the
//! gallery without a TUI. It's designed for scripted sessions and tests
//! against a running mock server.

use roundtable_core::headless::HeadlessCommand;
use roundtable_core::{ClientConfig, HeadlessGallery};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
  all              - Show every knight and comment
  category <name>  - Select Historical, Legendary or Fictional
  refresh          - Re-fetch the current category
  comment <text>   - Post a comment for the current category
  delete <id>      - Delete a comment by id
  show <name>      - Look up a knight on Wikipedia
  status           - Print the whole page
  help             - Show this help
  quit             - Exit";

/// Run the gallery in headless mode.
///
/// One command per line on stdin. After each command the regions it
/// changed are printed, each starting with a `[region]` header line.
pub async fn run_headless(config: ClientConfig) -> io::Result<()> {
    let mut gallery = HeadlessGallery::connect(&config);

    println!("=== Round Table Headless Mode ===");
    println!("Data server: {}", config.data_url);
    println!("Wiki: {}", config.wiki_url);
    println!();
    println!("Commands:");
    println!("{HELP}");
    println!();

    gallery.load().await;
    println!("{}", gallery.render());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let command = match HeadlessCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("[error] {e}. Type help for help.");
                stdout.flush()?;
                continue;
            }
        };

        match command {
            HeadlessCommand::Quit => {
                println!("Farewell!");
                break;
            }
            HeadlessCommand::Help => {
                println!("[help]");
                println!("{HELP}");
            }
            command => {
                let touched = gallery.run(command).await;
                let output = gallery.render_regions(touched);
                if output.is_empty() {
                    println!("[skipped] nothing to post");
                } else {
                    print!("{output}");
                }
            }
        }
        stdout.flush()?;
    }

    Ok(())
}
