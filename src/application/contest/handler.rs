//! Inbound event routing
//!
//! Thin glue between a chat adapter and the contest service: parses the
//! two supported commands, treats every other text as a link submission,
//! and renders outcomes back through the adapter.

use super::messages;
use super::{ConfirmOutcome, ContestService, StartOutcome, SubmitOutcome};
use crate::application::errors::BotError;
use crate::domain::entities::Participant;
use crate::domain::traits::{Bot, KeyboardButton};

/// Callback action carried by the completion button.
pub const CONFIRM_ACTION: &str = "confirm_entry";

/// Routes inbound messages and button presses for one adapter.
pub struct ContestHandler<'a, B: Bot> {
    bot: &'a B,
    service: ContestService,
}

impl<'a, B: Bot> ContestHandler<'a, B> {
    pub fn new(bot: &'a B, service: ContestService) -> Self {
        Self { bot, service }
    }

    /// Handle an inbound text message. `/start` and `/stats` are commands;
    /// anything else is treated as a link submission, exactly like the
    /// collection prompt tells participants.
    pub async fn handle_text(
        &mut self,
        chat_id: &str,
        participant: Participant,
        text: &str,
    ) -> Result<(), BotError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        match command_name(text) {
            Some("start") => self.handle_start(chat_id, participant).await,
            Some("stats") => self.handle_stats(chat_id).await,
            _ => self.handle_submission(chat_id, participant.id, text).await,
        }
    }

    /// Handle a button press.
    pub async fn handle_callback(
        &mut self,
        callback_id: &str,
        chat_id: &str,
        user_id: i64,
        data: &str,
    ) -> Result<(), BotError> {
        if data != CONFIRM_ACTION {
            // stop the client spinner, nothing else to do
            return self.bot.answer_callback(callback_id, None, false).await;
        }

        match self.service.confirm(user_id).await {
            ConfirmOutcome::Completed { count } => {
                self.bot
                    .answer_callback(callback_id, Some(&messages::entry_accepted_alert()), true)
                    .await?;
                self.bot
                    .send_message(chat_id, &messages::entry_confirmed(count))
                    .await?;
            }
            ConfirmOutcome::NeedMoreLinks { have } => {
                self.bot
                    .answer_callback(callback_id, Some(&messages::need_more_links(have)), true)
                    .await?;
            }
            ConfirmOutcome::AlreadyCompleted => {
                self.bot
                    .answer_callback(callback_id, Some(&messages::already_submitted_alert()), true)
                    .await?;
            }
            ConfirmOutcome::Ignored => {
                self.bot.answer_callback(callback_id, None, false).await?;
            }
        }
        Ok(())
    }

    pub fn service(&self) -> &ContestService {
        &self.service
    }

    async fn handle_start(&mut self, chat_id: &str, participant: Participant) -> Result<(), BotError> {
        let reply = match self.service.start(participant) {
            StartOutcome::Started => messages::welcome(),
            StartOutcome::Resumed { count } => messages::resumed(count),
            StartOutcome::AlreadyCompleted => messages::already_entered(),
        };
        self.bot.send_message(chat_id, &reply).await?;
        Ok(())
    }

    async fn handle_stats(&mut self, chat_id: &str) -> Result<(), BotError> {
        let stats = self.service.stats();
        self.bot
            .send_message(chat_id, &messages::stats_report(&stats))
            .await?;
        Ok(())
    }

    async fn handle_submission(
        &mut self,
        chat_id: &str,
        user_id: i64,
        text: &str,
    ) -> Result<(), BotError> {
        match self.service.submit_link(user_id, text).await {
            SubmitOutcome::Accepted {
                link,
                count,
                threshold_reached,
            } => {
                self.bot
                    .send_message(chat_id, &messages::link_accepted(&link, count))
                    .await?;
                if threshold_reached {
                    let button = KeyboardButton::new(messages::CONFIRM_BUTTON_LABEL)
                        .with_callback(CONFIRM_ACTION);
                    self.bot
                        .send_with_keyboard(chat_id, &messages::threshold_reached(), vec![vec![button]])
                        .await?;
                }
            }
            SubmitOutcome::Duplicate => {
                self.bot
                    .send_message(chat_id, &messages::duplicate_link())
                    .await?;
            }
            SubmitOutcome::InvalidFormat => {
                self.bot
                    .send_message(chat_id, &messages::invalid_link())
                    .await?;
            }
            SubmitOutcome::Ignored => {}
        }
        Ok(())
    }
}

/// Extract a bot command name from message text, dropping any `@botname`
/// suffix Telegram appends in groups.
fn command_name(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    let cmd = first.strip_prefix('/')?;
    cmd.split('@').next().filter(|name| !name.is_empty())
}
