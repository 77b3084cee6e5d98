// UI layer: the interactive terminal loop. Renders session scroll-back
// and drives command dispatch; the session itself knows nothing about
// the terminal.

use crate::api::ApiClient;
use crate::session::{EntryKind, HistoryEntry, Session, COMMANDS};
use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use dialoguer::Completion;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::stdout;
use std::time::Duration;

/// Tab-completion over the six command names. Completes only on an
/// unambiguous single match.
struct CommandCompletion;

impl Completion for CommandCompletion {
    fn get(&self, input: &str) -> Option<String> {
        complete_command(input)
    }
}

fn complete_command(input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }
    let mut matches = COMMANDS.iter().filter(|c| c.starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Some((*only).to_string()),
        _ => None,
    }
}

/// Run the interactive terminal until Ctrl-C or Ctrl-D. Receives the
/// `ApiClient` built in `main` and owns the session for its lifetime.
pub fn run_terminal(api: ApiClient) -> Result<()> {
    let mut session = Session::new(api);
    let completion = CommandCompletion;
    let mut rendered = 0usize;

    print_banner();

    loop {
        let line: String = match Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .completion_with(&completion)
            .interact_text()
        {
            Ok(line) => line,
            // Ctrl-C / Ctrl-D ends the session; history is discarded.
            Err(_) => {
                println!("\nGoodbye!");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        // The spinner runs while the command is in flight; the loop
        // itself gates further input until dispatch completes.
        let spinner = brewing_spinner();
        session.submit(&line);
        spinner.finish_and_clear();

        // A shrinking history means `clear` ran: wipe the screen before
        // rendering what's left.
        if session.history().len() < rendered {
            execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
            rendered = 0;
        }
        for entry in &session.history()[rendered..] {
            render_entry(entry);
        }
        rendered = session.history().len();
        println!();
    }
    Ok(())
}

fn print_banner() {
    println!("{}", "BLACK COFFEE TERMINAL".bold());
    println!("Premium black coffee only. No cream, no sugar, no compromises.");
    println!("Type 'help' for commands. Press Ctrl-D to leave.");
    println!();
}

fn render_entry(entry: &HistoryEntry) {
    match entry.kind {
        // The prompt line the user just typed is already on screen.
        EntryKind::User => {}
        EntryKind::System => println!("{}", entry.text),
        EntryKind::Success => println!("{}", entry.text.as_str().green()),
        EntryKind::Error => println!("{}", entry.text.as_str().red()),
    }
}

fn brewing_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("Brewing...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_on_an_unambiguous_prefix() {
        assert_eq!(complete_command("me"), Some("menu".to_string()));
        assert_eq!(complete_command("st"), Some("status".to_string()));
        assert_eq!(complete_command("order"), Some("order".to_string()));
    }

    #[test]
    fn does_not_complete_ambiguous_or_unknown_input() {
        // Empty input matches every command.
        assert_eq!(complete_command(""), None);
        assert_eq!(complete_command("x"), None);
        // Past the command token there is nothing to complete.
        assert_eq!(complete_command("order eth"), None);
    }
}
