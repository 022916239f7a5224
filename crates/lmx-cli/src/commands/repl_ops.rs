//! Interactive explorer on stdin.
//!
//! A line that does not start with `:` replaces the sentence, as if typed
//! into the text box. Commands:
//!
//! ```text
//! :pick N    choose candidate N
//! :refresh   refresh candidates for the current text
//! :undo      drop the last word
//! :back      history back
//! :forward   history forward
//! :show      print the current state
//! :url       print the current location
//! :quit      exit
//! ```

use std::io::{self, BufRead, Write};
use std::time::Duration;

use lmx_core::history::encode_query;
use lmx_core::settings::Settings;
use lmx_engine::Explorer;

use crate::format::format_state;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Edit(String),
    Pick(usize),
    Refresh,
    Undo,
    Back,
    Forward,
    Show,
    Url,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    let Some(cmd) = line.strip_prefix(':') else {
        return ReplCommand::Edit(line.to_string());
    };
    let mut parts = cmd.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("pick" | "p"), Some(n)) => match n.parse() {
            Ok(n) => ReplCommand::Pick(n),
            Err(_) => ReplCommand::Unknown(line.to_string()),
        },
        (Some("refresh" | "r"), None) => ReplCommand::Refresh,
        (Some("undo" | "u"), None) => ReplCommand::Undo,
        (Some("back" | "b"), None) => ReplCommand::Back,
        (Some("forward" | "f"), None) => ReplCommand::Forward,
        (Some("show" | "s"), None) => ReplCommand::Show,
        (Some("url"), None) => ReplCommand::Url,
        (Some("quit" | "q"), None) => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

pub fn repl(settings: &Settings, text: Option<&str>) {
    let location = text.map(|t| encode_query(t, None)).unwrap_or_default();
    let mut explorer = Explorer::new(settings, &location);
    // Long enough for a debounced refresh plus one full request.
    let settle = settings.session.debounce() + settings.service.timeout() + Duration::from_secs(1);

    explorer.start();
    explorer.wait_settled(settle);
    print!("{}", format_state(explorer.state()));

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("lmx> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading stdin: {e}");
                break;
            }
        }

        match parse_line(&line) {
            ReplCommand::Edit(text) => explorer.edit_text(text),
            ReplCommand::Pick(n) => {
                if let Err(e) = explorer.choose_index(n) {
                    eprintln!("{e}");
                    continue;
                }
            }
            ReplCommand::Refresh => explorer.choose(None),
            ReplCommand::Undo => explorer.undo(),
            ReplCommand::Back => {
                if !explorer.back() {
                    eprintln!("no earlier entry");
                    continue;
                }
            }
            ReplCommand::Forward => {
                if !explorer.forward() {
                    eprintln!("no later entry");
                    continue;
                }
            }
            ReplCommand::Show => {}
            ReplCommand::Url => {
                println!("{}", explorer.location());
                continue;
            }
            ReplCommand::Quit => break,
            ReplCommand::Unknown(cmd) => {
                eprintln!("unknown command: {cmd}");
                continue;
            }
        }

        if !explorer.wait_settled(settle) {
            eprintln!("still waiting for the prediction service");
        }
        print!("{}", format_state(explorer.state()));
    }
}
