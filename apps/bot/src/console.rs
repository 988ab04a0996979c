//! # Console Transport
//!
//! Development transport: drives the service from stdin/stdout.
//!
//! ## Command Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Console Commands                                   │
//! │                                                                         │
//! │  /start          ──► Event::Start                                      │
//! │  /add            ──► MenuAction::AddData                               │
//! │  /save           ──► MenuAction::Save                                  │
//! │  /generate       ──► MenuAction::Generate                              │
//! │  /archive        ──► MenuAction::BrowseArchive                         │
//! │  /open <name>    ──► MenuAction::Open(name)                            │
//! │  /menu           ──► MenuAction::MainMenu                              │
//! │  /quit           ──► exit the loop                                     │
//! │  anything else   ──► Event::Text (literal "\n" becomes a newline,      │
//! │                      so record blocks fit on one console line)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Menus are printed as indented button labels; chat transports would turn
//! the same [`Reply`] into inline keyboards instead.

use tokio::io::{AsyncBufReadExt, BufReader};

use tagpress_core::{Event, MenuAction, Reply};
use tagpress_store::BlobStore;

use crate::error::BotError;
use crate::rasterizer::Rasterizer;
use crate::registry::UserId;
use crate::service::BotService;

/// The console is single-user.
const CONSOLE_USER: UserId = 0;

/// Reads lines from stdin until EOF or `/quit`, printing each reply.
pub async fn run<S: BlobStore, R: Rasterizer>(
    service: &BotService<S, R>,
) -> Result<(), BotError> {
    println!("tagpress console - /start to begin, /quit to exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" {
            break;
        }

        let event = match parse_command(&line) {
            Some(event) => event,
            None => {
                println!("Unknown command: {line}");
                continue;
            }
        };
        let reply = service.handle(CONSOLE_USER, event).await;
        print_reply(&reply);
    }
    Ok(())
}

/// Maps one console line to an event. `None` for malformed `/` commands.
fn parse_command(line: &str) -> Option<Event> {
    if !line.starts_with('/') {
        // Literal "\n" lets multi-line record blocks fit on one line
        return Some(Event::Text(line.replace("\\n", "\n")));
    }

    match line {
        "/start" => Some(Event::Start),
        "/add" => Some(Event::Action(MenuAction::AddData)),
        "/save" => Some(Event::Action(MenuAction::Save)),
        "/generate" => Some(Event::Action(MenuAction::Generate)),
        "/archive" => Some(Event::Action(MenuAction::BrowseArchive)),
        "/menu" => Some(Event::Action(MenuAction::MainMenu)),
        _ => line
            .strip_prefix("/open ")
            .map(|name| Event::Action(MenuAction::Open(name.trim().to_string()))),
    }
}

fn print_reply(reply: &Reply) {
    println!("{}", reply.text);
    if let Some(menu) = &reply.menu {
        for button in menu {
            println!("  [{}]", button.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_commands_map_to_actions() {
        assert_eq!(parse_command("/start"), Some(Event::Start));
        assert_eq!(
            parse_command("/generate"),
            Some(Event::Action(MenuAction::Generate))
        );
        assert_eq!(
            parse_command("/open stok.json"),
            Some(Event::Action(MenuAction::Open("stok.json".to_string())))
        );
        assert_eq!(parse_command("/bogus"), None);
    }

    #[test]
    fn test_plain_text_expands_literal_newlines() {
        assert_eq!(
            parse_command("LaptopX\\nRAM 8GB\\n4500000"),
            Some(Event::Text("LaptopX\nRAM 8GB\n4500000".to_string()))
        );
    }
}
