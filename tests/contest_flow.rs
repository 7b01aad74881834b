//! End-to-end contest flow through the event handler
//! Run with: cargo test --test contest_flow

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tally_bot::application::contest::{ContestHandler, ContestService, CONFIRM_ACTION};
use tally_bot::application::errors::{AuditError, BotError};
use tally_bot::domain::entities::Participant;
use tally_bot::domain::traits::{AuditPublisher, Bot, BotInfo, KeyboardButton};

/// Everything the bot sent out, in order.
#[derive(Debug, Clone)]
enum Sent {
    Message { chat_id: String, text: String },
    Keyboard { chat_id: String, text: String, callbacks: Vec<String> },
    CallbackAnswer { text: Option<String>, alert: bool },
}

#[derive(Default)]
struct MockBot {
    sent: Mutex<Vec<Sent>>,
}

impl MockBot {
    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn messages(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Message { text, .. } | Sent::Keyboard { text, .. } => Some(text),
                Sent::CallbackAnswer { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        self.sent.lock().unwrap().push(Sent::Message {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
        });
        Ok("1".to_string())
    }

    async fn send_with_keyboard(
        &self,
        chat_id: &str,
        text: &str,
        buttons: Vec<Vec<KeyboardButton>>,
    ) -> Result<String, BotError> {
        let callbacks = buttons
            .into_iter()
            .flatten()
            .filter_map(|b| b.callback_data)
            .collect();
        self.sent.lock().unwrap().push(Sent::Keyboard {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            callbacks,
        });
        Ok("1".to_string())
    }

    async fn answer_callback(
        &self,
        _callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<(), BotError> {
        self.sent.lock().unwrap().push(Sent::CallbackAnswer {
            text: text.map(|s| s.to_string()),
            alert: show_alert,
        });
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "mock".to_string(),
            name: "mock".to_string(),
            username: "mock".to_string(),
        }
    }
}

#[derive(Default)]
struct MockAudit {
    events: Mutex<Vec<String>>,
}

impl MockAudit {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditPublisher for MockAudit {
    async fn publish(&self, _channel_id: i64, text: &str) -> Result<(), AuditError> {
        self.events.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn alice() -> Participant {
    Participant::new(10).with_username("alice")
}

#[tokio::test]
async fn full_flow_start_three_links_confirm() {
    let bot = MockBot::default();
    let audit = Arc::new(MockAudit::default());
    let service = ContestService::new(audit.clone(), -100);
    let mut handler = ContestHandler::new(&bot, service);

    handler.handle_text("10", alice(), "/start").await.unwrap();
    handler.handle_text("10", alice(), "t.me/first_guy").await.unwrap();
    handler.handle_text("10", alice(), "https://t.me/second_guy").await.unwrap();
    handler.handle_text("10", alice(), "t.me/third_guy").await.unwrap();

    let messages = bot.messages();
    // welcome, three acceptances, and the completion prompt with the button
    assert_eq!(messages.len(), 5);
    assert!(messages[1].contains("1/3"));
    assert!(messages[2].contains("2/3"));
    assert!(messages[3].contains("3/3"));

    let keyboards: Vec<_> = bot
        .sent()
        .into_iter()
        .filter_map(|s| match s {
            Sent::Keyboard { callbacks, .. } => Some(callbacks),
            _ => None,
        })
        .collect();
    assert_eq!(keyboards, vec![vec![CONFIRM_ACTION.to_string()]]);

    handler
        .handle_callback("cb1", "10", 10, CONFIRM_ACTION)
        .await
        .unwrap();

    let stats = handler.service().stats();
    assert_eq!(stats.completed_users, 1);
    assert_eq!(stats.total_links, 3);

    // three per-link audit events plus the final one listing all links
    let events = audit.events();
    assert_eq!(events.len(), 4);
    assert!(events[3].contains("t.me/first_guy"));
    assert!(events[3].contains("t.me/second_guy"));
    assert!(events[3].contains("t.me/third_guy"));
}

#[tokio::test]
async fn duplicate_link_is_warned_and_not_counted() {
    let bot = MockBot::default();
    let service = ContestService::new(Arc::new(MockAudit::default()), -100);
    let mut handler = ContestHandler::new(&bot, service);

    handler.handle_text("10", alice(), "/start").await.unwrap();
    handler.handle_text("10", alice(), "t.me/first_guy").await.unwrap();
    handler.handle_text("10", alice(), "t.me/first_guy").await.unwrap();

    let messages = bot.messages();
    assert!(messages[2].contains("already added"));
    assert_eq!(handler.service().stats().total_links, 1);
}

#[tokio::test]
async fn malformed_link_prompts_retry() {
    let bot = MockBot::default();
    let service = ContestService::new(Arc::new(MockAudit::default()), -100);
    let mut handler = ContestHandler::new(&bot, service);

    handler.handle_text("10", alice(), "/start").await.unwrap();
    handler.handle_text("10", alice(), "my friend Bob").await.unwrap();

    let messages = bot.messages();
    assert!(messages[1].contains("not a valid link"));
    assert_eq!(handler.service().stats().total_links, 0);
}

#[tokio::test]
async fn text_before_start_is_ignored() {
    let bot = MockBot::default();
    let service = ContestService::new(Arc::new(MockAudit::default()), -100);
    let mut handler = ContestHandler::new(&bot, service);

    handler.handle_text("10", alice(), "t.me/first_guy").await.unwrap();

    assert!(bot.sent().is_empty());
    assert_eq!(handler.service().stats().total_users, 0);
}

#[tokio::test]
async fn confirm_without_enough_links_alerts() {
    let bot = MockBot::default();
    let service = ContestService::new(Arc::new(MockAudit::default()), -100);
    let mut handler = ContestHandler::new(&bot, service);

    handler.handle_text("10", alice(), "/start").await.unwrap();
    handler.handle_text("10", alice(), "t.me/first_guy").await.unwrap();
    handler
        .handle_callback("cb1", "10", 10, CONFIRM_ACTION)
        .await
        .unwrap();

    let answers: Vec<_> = bot
        .sent()
        .into_iter()
        .filter_map(|s| match s {
            Sent::CallbackAnswer { text, alert } => Some((text, alert)),
            _ => None,
        })
        .collect();
    assert_eq!(answers.len(), 1);
    let (text, alert) = &answers[0];
    assert!(text.as_deref().unwrap().contains("at least 3"));
    assert!(*alert);
    assert_eq!(handler.service().stats().completed_users, 0);
}

#[tokio::test]
async fn restart_mid_collection_keeps_progress() {
    let bot = MockBot::default();
    let service = ContestService::new(Arc::new(MockAudit::default()), -100);
    let mut handler = ContestHandler::new(&bot, service);

    handler.handle_text("10", alice(), "/start").await.unwrap();
    handler.handle_text("10", alice(), "t.me/first_guy").await.unwrap();
    handler.handle_text("10", alice(), "/start").await.unwrap();

    let messages = bot.messages();
    assert!(messages[2].contains("already collecting"));
    assert_eq!(handler.service().stats().total_links, 1);
}

#[tokio::test]
async fn stats_command_reports_totals() {
    let bot = MockBot::default();
    let service = ContestService::new(Arc::new(MockAudit::default()), -100);
    let mut handler = ContestHandler::new(&bot, service);

    handler.handle_text("10", alice(), "/start").await.unwrap();
    for link in ["t.me/first_guy", "t.me/second_guy", "t.me/third_guy"] {
        handler.handle_text("10", alice(), link).await.unwrap();
    }
    handler
        .handle_callback("cb1", "10", 10, CONFIRM_ACTION)
        .await
        .unwrap();

    let bob = Participant::new(20).with_username("bob");
    handler.handle_text("20", bob.clone(), "/start").await.unwrap();
    handler.handle_text("20", bob, "t.me/fourth_guy").await.unwrap();

    handler.handle_text("20", Participant::new(20), "/stats").await.unwrap();

    let last = bot.messages().pop().unwrap();
    assert!(last.contains("Total users: 2"));
    assert!(last.contains("Completed entries: 1"));
    assert!(last.contains("Links collected: 4"));
}

#[tokio::test]
async fn unknown_callback_only_stops_spinner() {
    let bot = MockBot::default();
    let service = ContestService::new(Arc::new(MockAudit::default()), -100);
    let mut handler = ContestHandler::new(&bot, service);

    handler
        .handle_callback("cb1", "10", 10, "something_else")
        .await
        .unwrap();

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(
        &sent[0],
        Sent::CallbackAnswer { text: None, alert: false }
    ));
}
