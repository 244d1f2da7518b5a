//! Office 365 connector `MessageCard` payload for the billing report.

use serde::Serialize;

use crate::core::models::{ServiceBilling, format_usd};

pub const THEME_COLOR: &str = "0076D7";
pub const ACTIVITY_SUBTITLE: &str = "サービス別利用金額(金額降順)";
pub const ACTIVITY_IMAGE: &str = "https://img.icons8.com/color/50/000000/amazon-web-services.png";
pub const CONSOLE_ACTION_NAME: &str = "Cost Management Console";
pub const CONSOLE_URL: &str =
    "https://console.aws.amazon.com/cost-management/home?region=ap-northeast-1#/dashboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageCard {
    #[serde(rename = "@type")]
    pub card_type: &'static str,
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "themeColor")]
    pub theme_color: &'static str,
    pub summary: String,
    pub sections: Vec<CardSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSection {
    pub activity_title: String,
    pub activity_subtitle: &'static str,
    pub activity_image: &'static str,
    pub facts: Vec<Fact>,
    /// Sent as the string `"true"`.
    pub markdown: &'static str,
    pub potential_action: Vec<OpenUriAction>,
}

/// A fact row: the amount is the label, the service the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenUriAction {
    #[serde(rename = "@type")]
    pub action_type: &'static str,
    pub name: &'static str,
    pub targets: Vec<UriTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UriTarget {
    pub os: &'static str,
    pub uri: &'static str,
}

/// Billed services ranked by rounded amount, highest first.
///
/// Zero-cent services are dropped. The sort is stable, so services with
/// equal amounts keep the order Cost Explorer returned them in.
#[must_use]
pub fn ranked_facts(service_billings: &[ServiceBilling]) -> Vec<Fact> {
    let mut billed: Vec<_> = service_billings
        .iter()
        .filter_map(|billing| billing.billed_amount().map(|amount| (amount, billing)))
        .collect();
    billed.sort_by(|(a, _), (b, _)| b.cmp(a));

    billed
        .into_iter()
        .map(|(amount, billing)| Fact {
            name: format_usd(amount),
            value: billing.service_name.clone(),
        })
        .collect()
}

#[must_use]
pub fn build_message_card(title: &str, service_billings: &[ServiceBilling]) -> MessageCard {
    MessageCard {
        card_type: "MessageCard",
        context: "http://schema.org/extensions",
        theme_color: THEME_COLOR,
        summary: title.to_string(),
        sections: vec![CardSection {
            activity_title: title.to_string(),
            activity_subtitle: ACTIVITY_SUBTITLE,
            activity_image: ACTIVITY_IMAGE,
            facts: ranked_facts(service_billings),
            markdown: "true",
            potential_action: vec![OpenUriAction {
                action_type: "OpenUri",
                name: CONSOLE_ACTION_NAME,
                targets: vec![UriTarget {
                    os: "default",
                    uri: CONSOLE_URL,
                }],
            }],
        }],
    }
}
