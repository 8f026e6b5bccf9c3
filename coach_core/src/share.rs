//! Share and donation links.
//!
//! Only link construction lives here; sending messages and wallet
//! transactions belong to the client and the bot.

use serde::{Deserialize, Serialize};

const SHARE_TEXT: &str = "Quick 5-min workouts, try MicroCoach!";

/// Referral link plus the text to share with it
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareLink {
    pub url: String,
    pub text: String,
}

/// Where to send a user who wants to donate
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvoiceLink {
    pub payment_url: String,
    pub message: String,
}

/// Referral deep link into the bot for `user_id`
///
/// Ids that are empty or contain anything besides ASCII letters, digits,
/// `_` and `-` are replaced by `default`.
pub fn share_link(bot_username: &str, user_id: Option<&str>) -> ShareLink {
    let referrer = user_id
        .map(str::trim)
        .filter(|id| is_safe_id(id))
        .unwrap_or("default");

    ShareLink {
        url: format!("{}?start=ref_{}", bot_url(bot_username), referrer),
        text: SHARE_TEXT.to_string(),
    }
}

/// Fallback donation link pointing at the bot
pub fn invoice_link(bot_username: &str) -> InvoiceLink {
    InvoiceLink {
        payment_url: bot_url(bot_username),
        message: "Open the bot to complete your donation.".to_string(),
    }
}

fn bot_url(bot_username: &str) -> String {
    let bot = bot_username.trim().trim_start_matches('@');
    if bot.is_empty() {
        "https://t.me".to_string()
    } else {
        format!("https://t.me/{}", bot)
    }
}

fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
