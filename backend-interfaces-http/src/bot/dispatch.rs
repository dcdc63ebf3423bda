// Bot command dispatch, shared by the webhook handler and the polling bridge

use tracing::{error, warn};

use backend_application::commands::activity_commands;
use backend_application::queries::summary_queries;
use backend_application::{AppError, AppState};
use backend_domain::{ActivityKind, LoggedActivity, Period};

use crate::bot::commands::{parse_text, BotCommand};
use crate::bot::session::{PendingInput, SessionStore};
use crate::bot::update::{TelegramMessage, TelegramUpdate};

const WELCOME_TEXT: &str = "Hi! I'm Sprout, your baby activity tracker.\n\n\
Use the keyboard below to log activities or get summaries.\n\
You can also type commands:\n\
• /feed &lt;minutes&gt;: log a feeding session (e.g. /feed 15)\n\
• /medication [name]: log medication (e.g. /medication Tylenol)\n\
• /vitamind: log Vitamin D\n\
• /summary [today|yesterday|7days|1month|3month]: activity summary, all periods when omitted\n\
• /coldstart: wake the bot up\n\
• /help or /menu: show this message and the keyboard again";

const MENU_TEXT: &str = "Here's the main menu:";

const COLDSTART_TEXT: &str = "🟢 Bot is awake and ready!\n\n\
You can:\n\
• Log activities with /feed, /poop, /pee, /medication, /vitamind\n\
• Get summaries with /summary\n\
• View all commands with /start";

const SUMMARY_HINT_TEXT: &str = "Please type /summary followed by today, yesterday, 7days, \
1month or 3month (e.g. /summary 7days). Or just /summary for all periods.";

const FALLBACK_TEXT: &str =
    "I'm not sure what that means. Please use the menu or type a command.";

const FEED_PROMPT: &str = "Please type the feed duration in minutes (e.g. 15).";

const MEDICATION_PROMPT: &str = "Please type the medication name (e.g. Tylenol).";

pub async fn dispatch_update(state: &AppState, sessions: &SessionStore, update: TelegramUpdate) {
    let Some(message) = update.message else {
        return;
    };
    let Some(text) = message.text.clone() else {
        return;
    };
    handle_message(state, sessions, &message, &text).await;
}

async fn handle_message(
    state: &AppState,
    sessions: &SessionStore,
    message: &TelegramMessage,
    text: &str,
) {
    let chat_id = message.chat.id;
    let user_id = message.reporter_id();

    match parse_text(text) {
        BotCommand::Start => send(state, chat_id, WELCOME_TEXT, true).await,
        BotCommand::Menu => send(state, chat_id, MENU_TEXT, true).await,
        BotCommand::ColdStart => send(state, chat_id, COLDSTART_TEXT, false).await,
        BotCommand::Poop => {
            let result =
                activity_commands::log_activity(state, ActivityKind::Poop, None, &user_id).await;
            confirm(state, chat_id, result).await;
        }
        BotCommand::Pee => {
            let result =
                activity_commands::log_activity(state, ActivityKind::Pee, None, &user_id).await;
            confirm(state, chat_id, result).await;
        }
        BotCommand::Feed(arg) => {
            let result = activity_commands::log_feed(state, arg.as_deref(), &user_id).await;
            confirm(state, chat_id, result).await;
        }
        BotCommand::Medication(arg) => {
            let result = activity_commands::log_medication(state, arg.as_deref(), &user_id).await;
            confirm(state, chat_id, result).await;
        }
        BotCommand::VitaminD => {
            let result = activity_commands::log_vitamin_d(state, &user_id).await;
            confirm(state, chat_id, result).await;
        }
        BotCommand::Summary(arg) => send_summary(state, chat_id, arg.as_deref()).await,
        BotCommand::AwaitFeedInput => {
            sessions.set(chat_id, PendingInput::FeedMinutes).await;
            send(state, chat_id, FEED_PROMPT, false).await;
        }
        BotCommand::AwaitMedicationInput => {
            sessions.set(chat_id, PendingInput::MedicationName).await;
            send(state, chat_id, MEDICATION_PROMPT, false).await;
        }
        BotCommand::SummaryHint => send(state, chat_id, SUMMARY_HINT_TEXT, false).await,
        BotCommand::Unknown => send(state, chat_id, FALLBACK_TEXT, true).await,
        BotCommand::FreeText(input) => match sessions.take(chat_id).await {
            Some(PendingInput::FeedMinutes) => {
                let result = activity_commands::log_feed(state, Some(&input), &user_id).await;
                confirm(state, chat_id, result).await;
            }
            Some(PendingInput::MedicationName) => {
                let result =
                    activity_commands::log_medication(state, Some(&input), &user_id).await;
                confirm(state, chat_id, result).await;
            }
            None => send(state, chat_id, FALLBACK_TEXT, true).await,
        },
    }
}

async fn send_summary(state: &AppState, chat_id: i64, arg: Option<&str>) {
    // An unrecognized period argument falls back to reporting all buckets.
    let period = arg.and_then(Period::from_arg);
    match summary_queries::get_summary(state, period).await {
        Ok(response) => {
            send(state, chat_id, &response.text, false).await;
            if let Some(chart) = response.chart {
                if let Err(err) = state
                    .responder
                    .send_attachment(
                        chat_id,
                        "Daily activity breakdown",
                        &chart.filename,
                        chart.bytes,
                    )
                    .await
                {
                    state.metrics.record_send_error();
                    warn!("failed to send chart, text was already delivered: {}", err);
                }
            }
        }
        Err(err) => {
            error!("summary query failed: {}", err);
            send(
                state,
                chat_id,
                "❌ Error generating summary. Please try again.",
                false,
            )
            .await;
        }
    }
}

async fn confirm(state: &AppState, chat_id: i64, result: Result<LoggedActivity, AppError>) {
    match result {
        Ok(logged) => {
            let text = format!(
                "✅ Logged {} at {} on {} ({}).",
                logged.kind.as_tag(),
                logged.time,
                logged.date,
                state.config.timezone.name()
            );
            send(state, chat_id, &text, false).await;
        }
        Err(AppError::BadRequest(message)) => {
            send(state, chat_id, &format!("❌ {}.", message), false).await;
        }
        Err(AppError::Internal(err)) => {
            error!("failed to log activity: {}", err);
            send(
                state,
                chat_id,
                "❌ Failed to log activity. Please try again later.",
                false,
            )
            .await;
        }
    }
}

async fn send(state: &AppState, chat_id: i64, text: &str, show_menu: bool) {
    if let Err(err) = state.responder.send_text(chat_id, text, show_menu).await {
        state.metrics.record_send_error();
        warn!("failed to send reply to chat {}: {}", chat_id, err);
    }
}
