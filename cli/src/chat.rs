//! Interactive chat session

use chrono::Local;
use colored::Colorize;
use std::io::{BufRead, Write};
use zenith_core::AssistantAgent;

const STOP_HINT: &str = "To Stop The Program Execution Enter Quit/Exit";
const FAREWELL: &str = "Thank You For Using Zenith! Have A Great Day!";

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn is_exit_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit")
}

/// Run the chat loop until the user quits or stdin closes.
pub async fn run(mut agent: AssistantAgent) -> anyhow::Result<()> {
    println!(
        "[{}] {}\t: {STOP_HINT}",
        timestamp(),
        "System".yellow().bold()
    );

    let stdin = std::io::stdin();
    loop {
        print!("\n[{}] {}\t: ", timestamp(), "You".green().bold());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // stdin closed
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if is_exit_command(input) {
            break;
        }

        print!("[{}] {}\t: ", timestamp(), "Zenith".cyan().bold());
        std::io::stdout().flush()?;

        match agent.send(input).await {
            Ok(_) => println!(),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    println!(
        "\n[{}] {}\t: {FAREWELL}",
        timestamp(),
        "System".yellow().bold()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_commands_are_case_insensitive() {
        assert!(is_exit_command("quit"));
        assert!(is_exit_command("QUIT"));
        assert!(is_exit_command("Exit"));
        assert!(!is_exit_command("quit now"));
        assert!(!is_exit_command("hello"));
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
        assert_eq!(&ts[13..14], ":");
    }
}
