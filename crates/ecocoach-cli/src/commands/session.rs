//! Line-oriented session over a single in-memory service.
//!
//! Domain state only lives as long as the process, so this is how the CLI
//! exercises the ledger, reminders and leaderboard across several actions.

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ecocoach_core::EcoService;
use indoc::indoc;
use serde::Serialize;
use serde_json::json;

const BANNER: &str = indoc! {"
    EcoCoach session. Everything you log lives in memory until you quit.
    Type `help` for commands, `quit` to leave.
"};

#[derive(Args)]
pub struct SessionArgs {
    /// Read actions from a file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,
}

#[derive(Parser)]
#[command(no_binary_name = true)]
struct SessionLine {
    #[command(subcommand)]
    action: SessionAction,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Log a carbon-saving activity: log <user> <kg> <activity...>
    Log {
        user: String,
        #[arg(allow_negative_numbers = true)]
        carbon: f64,
        #[arg(required = true, num_args = 1..)]
        activity: Vec<String>,
    },
    /// Show a user's totals
    Stats { user: String },
    /// Rank users by carbon saved
    Leaderboard,
    /// Show today's challenge
    Challenge,
    /// Add a reminder: remind <user> <frequency> <habit...>
    Remind {
        user: String,
        frequency: String,
        #[arg(required = true, num_args = 1..)]
        habit: Vec<String>,
    },
    /// List a user's reminders
    Reminders { user: String },
    /// Ask the coach: chat <user> <message...>
    Chat {
        user: String,
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
}

pub async fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let service = super::build_service()?;

    let interactive = args.script.is_none() && io::stdin().is_terminal();
    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    if interactive {
        eprint!("{BANNER}");
    }

    let mut lines = input.lines();
    loop {
        if interactive {
            eprint!("> ");
            io::stderr().flush()?;
        }
        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        let parsed = match SessionLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(e) => {
                // help output goes to stdout, parse errors to stderr
                e.print()?;
                continue;
            }
        };

        if let Err(e) = execute(&service, parsed.action).await {
            eprintln!("error: {e}");
        }
    }
    Ok(())
}

async fn execute(
    service: &EcoService,
    action: SessionAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SessionAction::Log {
            user,
            carbon,
            activity,
        } => print_json(&service.log_and_report(&user, carbon, &activity.join(" "))?),
        SessionAction::Stats { user } => print_json(&service.user_stats(&user)),
        SessionAction::Leaderboard => print_json(&service.leaderboard()),
        SessionAction::Challenge => print_json(&service.todays_challenge()),
        SessionAction::Remind {
            user,
            frequency,
            habit,
        } => {
            let entry = service.add_reminder(&user, &habit.join(" "), &frequency);
            print_json(&json!({ "message": "Reminder added!", "reminder": entry }))
        }
        SessionAction::Reminders { user } => print_json(&service.list_reminders(&user)),
        SessionAction::Chat { user, message } => {
            let reply = service.chat(&user, &message.join(" ")).await;
            print_json(&json!({ "reply": reply }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<SessionAction, clap::Error> {
        SessionLine::try_parse_from(line.split_whitespace()).map(|l| l.action)
    }

    #[test]
    fn log_joins_activity_words() {
        match parse("log alice 2.5 took the bus").unwrap() {
            SessionAction::Log { user, carbon, activity } => {
                assert_eq!(user, "alice");
                assert_eq!(carbon, 2.5);
                assert_eq!(activity.join(" "), "took the bus");
            }
            _ => panic!("expected log"),
        }
    }

    #[test]
    fn negative_carbon_parses_so_the_service_can_reject_it() {
        assert!(matches!(
            parse("log alice -3 drove").unwrap(),
            SessionAction::Log { carbon, .. } if carbon == -3.0
        ));
    }

    #[test]
    fn remind_takes_frequency_before_habit() {
        match parse("remind bob daily unplug the tv").unwrap() {
            SessionAction::Remind { user, frequency, habit } => {
                assert_eq!(user, "bob");
                assert_eq!(frequency, "daily");
                assert_eq!(habit.join(" "), "unplug the tv");
            }
            _ => panic!("expected remind"),
        }
    }

    #[test]
    fn bad_lines_are_errors() {
        assert!(parse("log alice lots walked").is_err());
        assert!(parse("chat alice").is_err());
        assert!(parse("teleport").is_err());
    }

    #[test]
    fn bare_commands_parse() {
        assert!(matches!(parse("leaderboard").unwrap(), SessionAction::Leaderboard));
        assert!(matches!(parse("challenge").unwrap(), SessionAction::Challenge));
    }
}
