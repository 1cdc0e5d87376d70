//! Command-line parsing
//!
//! Parses `recommender <command> [args]` into a [`Command`].

/// Parsed command from the process arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the window: no arguments
    Window,
    /// Recommend from free text: ask <text...>
    Ask { text: String, json: bool },
    /// Recommend from a job posting: url <link> [text...]
    Url { url: String, text: String, json: bool },
    /// Probe backend health: status
    Status,
    /// Show help: help
    Help,
    /// Anything we could not make sense of, with the reason
    Invalid { reason: String },
}

impl Command {
    /// Parse arguments, excluding the program name
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let mut json = false;
        let args: Vec<&str> = args
            .iter()
            .map(|a| a.as_ref())
            .filter(|a| {
                if *a == "--json" {
                    json = true;
                    false
                } else {
                    true
                }
            })
            .collect();

        let Some((cmd, rest)) = args.split_first() else {
            return Command::Window;
        };

        match cmd.to_lowercase().as_str() {
            "ask" | "a" => {
                let text = rest.join(" ");
                if text.trim().is_empty() {
                    Command::Invalid {
                        reason: "Usage: recommender ask <query>".to_string(),
                    }
                } else {
                    Command::Ask { text, json }
                }
            }
            "url" | "u" => match rest.split_first() {
                Some((url, text)) => Command::Url {
                    url: url.to_string(),
                    text: text.join(" "),
                    json,
                },
                None => Command::Invalid {
                    reason: "Usage: recommender url <link> [query]".to_string(),
                },
            },
            "status" => Command::Status,
            "help" | "--help" | "-h" => Command::Help,
            other => Command::Invalid {
                reason: format!("Unknown command: {}. Run 'recommender help' for usage.", other),
            },
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"Assessment Recommender

Usage: recommender [command] [--json]

Commands:
  (none)                  Open the recommender window
  ask <query>             Recommend assessments for a free-text query
  url <link> [query]      Recommend assessments for a job posting URL
  status                  Check whether the backend is reachable
  help                    Show this help message

Environment:
  RECOMMENDER_API_URL         Backend base URL (default http://127.0.0.1:5000)
  RECOMMENDER_TIMEOUT_SECS    Request timeout in seconds (default 10)
  RECOMMENDER_HEALTH_PATH     Health endpoint path (default /health)
  RECOMMENDER_HEALTHY_STATUS  Health status meaning "up" (default healthy)"#
    }
}
