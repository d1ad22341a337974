/// One REPL action, parsed from an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Brand,
    Logo,
    Page,
    Show,
    Status,
    Help,
    Quit,
    Unknown(String),
}

/// Slash commands offered for completion, in help order.
pub const COMMANDS: [(&str, &str); 6] = [
    ("/brand", "Generate a brand identity (name, tagline, bio, products, reviews)"),
    ("/logo", "Generate a logo for the current brand"),
    ("/page", "Generate an HTML + CSS landing page for the current brand"),
    ("/show", "Print the current brand record"),
    ("/status", "Show the state of each stage"),
    ("/help", "Show this help"),
];

impl Command {
    pub fn parse(input: &str) -> Self {
        let word = input.split_whitespace().next().unwrap_or("");
        match word.to_ascii_lowercase().as_str() {
            "/brand" => Command::Brand,
            "/logo" => Command::Logo,
            "/page" | "/landing" => Command::Page,
            "/show" => Command::Show,
            "/status" => Command::Status,
            "/help" | "?" => Command::Help,
            "quit" | "exit" | "/quit" | "/exit" => Command::Quit,
            _ => Command::Unknown(input.trim().to_string()),
        }
    }
}

/// Commands starting with `prefix`.
pub fn matching_commands(prefix: &str) -> impl Iterator<Item = &'static str> + '_ {
    COMMANDS
        .iter()
        .map(|(name, _)| *name)
        .filter(move |name| name.starts_with(prefix))
}
