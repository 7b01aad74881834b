//! Outbound text for participants and the audit channel
//!
//! Everything is Telegram HTML; the console adapter prints it raw, which is
//! good enough for dev mode.

use chrono::Utc;

use super::MIN_LINKS;
use crate::domain::entities::{CanonicalLink, Participant};
use super::store::ContestStats;

fn timestamp() -> String {
    Utc::now().format("%d.%m.%Y %H:%M").to_string()
}

pub fn welcome() -> String {
    format!(
        "👋 <b>Hi!</b>\n\n\
         To enter the contest, invite at least <b>{MIN_LINKS} people</b>.\n\n\
         📝 Send me links to their profiles, one per message:\n\
         • <code>t.me/username</code>\n\
         • <code>https://t.me/username</code>\n\n\
         Once you have sent {MIN_LINKS}+ unique links, a button to finish your entry appears."
    )
}

/// Re-running start mid-collection resumes instead of wiping the list.
pub fn resumed(count: usize) -> String {
    format!(
        "👋 You are already collecting links — <b>{count}</b> so far.\n\n\
         Keep sending profile links, one per message. Your earlier links are kept."
    )
}

pub fn already_entered() -> String {
    "✅ You have already entered the contest!".to_string()
}

pub fn invalid_link() -> String {
    "❌ That is not a valid link!\n\n\
     A correct link looks like:\n\
     <code>t.me/username</code> or <code>https://t.me/username</code>"
        .to_string()
}

pub fn duplicate_link() -> String {
    "⚠️ That link was already added. Send a different one.".to_string()
}

pub fn link_accepted(link: &CanonicalLink, count: usize) -> String {
    format!("✅ Accepted: <code>{link}</code>\n\n📊 Links so far: {count}/{MIN_LINKS}")
}

pub fn threshold_reached() -> String {
    "🎉 <b>Great!</b> You have enough links.\n\n\
     Add more, or press the button below:"
        .to_string()
}

pub const CONFIRM_BUTTON_LABEL: &str = "✅ Finish my entry";

pub fn entry_confirmed(count: usize) -> String {
    format!(
        "✅ <b>Congratulations!</b>\n\n\
         Your entry has been accepted. You invited <b>{count} people</b>.\n\n\
         Good luck! 🍀"
    )
}

pub fn need_more_links(have: usize) -> String {
    format!("❌ You need at least {MIN_LINKS} links! You have {have}.")
}

pub fn already_submitted_alert() -> String {
    "⚠️ You already submitted your entry!".to_string()
}

pub fn entry_accepted_alert() -> String {
    "✅ Entry accepted!".to_string()
}

pub fn stats_report(stats: &ContestStats) -> String {
    format!(
        "📊 <b>Bot statistics:</b>\n\n\
         👥 Total users: {}\n\
         ✅ Completed entries: {}\n\
         🔗 Links collected: {}",
        stats.total_users, stats.completed_users, stats.total_links
    )
}

/// Audit event for a single accepted link.
pub fn link_audit_event(participant: &Participant, link: &CanonicalLink) -> String {
    format!(
        "<b>New contest link</b>\n\n\
         <b>Participant:</b> {} (ID: <code>{}</code>)\n\
         <b>Link:</b> <code>{}</code>\n\
         <b>Time:</b> {}",
        participant.display_name(),
        participant.id,
        link,
        timestamp()
    )
}

/// Final audit event for a completed entry, listing every collected link.
pub fn entry_audit_event(participant: &Participant, links: &[CanonicalLink]) -> String {
    let listing = links
        .iter()
        .map(|link| format!("• <code>{link}</code>"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "<b>✅ ENTRY ACCEPTED</b>\n\n\
         <b>Participant:</b> {} (ID: <code>{}</code>)\n\
         <b>Invited:</b> {}\n\n\
         <b>Links:</b>\n{}\n\n\
         <b>Submitted:</b> {}",
        participant.display_name(),
        participant.id,
        links.len(),
        listing,
        timestamp()
    )
}
