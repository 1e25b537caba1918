// UI layer: the interactive numbered menu. Prompts collect arguments with
// `dialoguer` and hand them to the handlers in `commands`; a spinner from
// `indicatif` covers the storage transfers. Handler errors are printed here
// and the loop continues -- exiting is the dispatcher's decision alone.

use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::commands;
use crate::Session;

/// The eight menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Stats,
    Users,
    Assets,
    Download,
    DownloadAndDisplay,
    Upload,
    AddUser,
}

impl Command {
    /// Parse a menu line into a command. Anything that is not a number
    /// between 0 and 7 is unrecognized.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().parse::<u32>().ok()? {
            0 => Some(Command::Exit),
            1 => Some(Command::Stats),
            2 => Some(Command::Users),
            3 => Some(Command::Assets),
            4 => Some(Command::Download),
            5 => Some(Command::DownloadAndDisplay),
            6 => Some(Command::Upload),
            7 => Some(Command::AddUser),
            _ => None,
        }
    }
}

/// Main menu loop. Blocks until the user enters command 0.
pub async fn main_menu(session: &Session) -> Result<()> {
    loop {
        let line = prompt()?;
        let Some(command) = Command::parse(&line) else {
            println!("** Unknown command, try again...");
            continue;
        };
        match command {
            Command::Exit => break,
            Command::Stats => report(commands::stats(session).await),
            Command::Users => report(commands::users(session).await),
            Command::Assets => report(commands::assets(session).await),
            Command::Download | Command::DownloadAndDisplay => {
                let asset_id: i32 = Input::new().with_prompt("Enter asset id").interact_text()?;
                let show = command == Command::DownloadAndDisplay;
                let spinner = transfer_spinner("Downloading...");
                let result = commands::download(session, asset_id, show).await;
                spinner.finish_and_clear();
                report(result);
            }
            Command::Upload => {
                let path: String = Input::new()
                    .with_prompt("Enter local file name")
                    .interact_text()?;
                let user_id: i32 = Input::new().with_prompt("Enter user id").interact_text()?;
                let spinner = transfer_spinner("Uploading...");
                let result = commands::upload(session, &PathBuf::from(path), user_id).await;
                spinner.finish_and_clear();
                report(result);
            }
            Command::AddUser => {
                let email: String = Input::new()
                    .with_prompt("Enter user's email")
                    .interact_text()?;
                let lastname: String = Input::new()
                    .with_prompt("Enter user's last (family) name")
                    .interact_text()?;
                let firstname: String = Input::new()
                    .with_prompt("Enter user's first (given) name")
                    .interact_text()?;
                report(commands::add_user(session, &email, &lastname, &firstname).await);
            }
        }
    }
    Ok(())
}

/// Print the menu and read one command line.
fn prompt() -> Result<String> {
    println!();
    println!(">> Enter a command:");
    println!("   0 => end");
    println!("   1 => stats");
    println!("   2 => users");
    println!("   3 => assets");
    println!("   4 => download");
    println!("   5 => download and display");
    println!("   6 => upload");
    println!("   7 => add user");
    let line: String = Input::new().with_prompt(">").interact_text()?;
    Ok(line)
}

/// Spinner shown while a storage transfer is in flight.
fn transfer_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Report-and-continue failure policy for handler errors.
fn report(result: crate::error::Result<()>) {
    if let Err(e) = result {
        println!("Command failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_menu_number_parses() {
        assert_eq!(Command::parse("0"), Some(Command::Exit));
        assert_eq!(Command::parse("1"), Some(Command::Stats));
        assert_eq!(Command::parse("2"), Some(Command::Users));
        assert_eq!(Command::parse("3"), Some(Command::Assets));
        assert_eq!(Command::parse("4"), Some(Command::Download));
        assert_eq!(Command::parse("5"), Some(Command::DownloadAndDisplay));
        assert_eq!(Command::parse("6"), Some(Command::Upload));
        assert_eq!(Command::parse("7"), Some(Command::AddUser));
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        assert_eq!(Command::parse("  3 "), Some(Command::Assets));
    }

    #[test]
    fn out_of_range_and_junk_are_unrecognized() {
        assert_eq!(Command::parse("8"), None);
        assert_eq!(Command::parse("-1"), None);
        assert_eq!(Command::parse("stats"), None);
        assert_eq!(Command::parse(""), None);
    }
}
