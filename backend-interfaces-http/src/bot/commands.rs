// Incoming text classification

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Menu,
    ColdStart,
    Poop,
    Pee,
    Feed(Option<String>),
    Medication(Option<String>),
    VitaminD,
    Summary(Option<String>),
    AwaitFeedInput,
    AwaitMedicationInput,
    SummaryHint,
    Unknown,
    FreeText(String),
}

/// Classifies one message text: slash commands first (tolerating @botname
/// suffixes), then keyboard buttons, and anything else as free text for the
/// pending-input flow.
pub fn parse_text(text: &str) -> BotCommand {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix('/') {
        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts
            .next()
            .unwrap_or_default()
            .split('@')
            .next()
            .unwrap_or_default()
            .to_lowercase();
        let arg = parts
            .next()
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .map(ToString::to_string);
        return match name.as_str() {
            "start" | "help" => BotCommand::Start,
            "menu" => BotCommand::Menu,
            "coldstart" => BotCommand::ColdStart,
            "poop" => BotCommand::Poop,
            "pee" => BotCommand::Pee,
            "feed" => BotCommand::Feed(arg),
            "medication" => BotCommand::Medication(arg),
            "vitamind" => BotCommand::VitaminD,
            "summary" => BotCommand::Summary(arg),
            _ => BotCommand::Unknown,
        };
    }
    match trimmed {
        "Poop" => BotCommand::Poop,
        "Pee" => BotCommand::Pee,
        "Feed" => BotCommand::AwaitFeedInput,
        "Medication" => BotCommand::AwaitMedicationInput,
        "Vitamin D" => BotCommand::VitaminD,
        "Summary" => BotCommand::SummaryHint,
        "Cold Start" => BotCommand::ColdStart,
        "Help" => BotCommand::Start,
        _ => BotCommand::FreeText(trimmed.to_string()),
    }
}
