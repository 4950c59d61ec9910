//! Lifecycle action-type taxonomy and filter groups.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the portal client (to build the `action_types` query filter) and
//! the merge engine (to derive display labels).

// ---------------------------------------------------------------------------
// Action type constants
// ---------------------------------------------------------------------------

/// Known lifecycle action types recorded against an LG.
pub mod action_types {
    pub const LG_ACTIVATED: &str = "LG_ACTIVATED";
    pub const LG_AMENDED: &str = "LG_AMENDED";
    pub const LG_EXTENDED: &str = "LG_EXTENDED";
    pub const LG_DECREASED_AMOUNT: &str = "LG_DECREASED_AMOUNT";
    pub const LG_LIQUIDATED_FULL: &str = "LG_LIQUIDATED_FULL";
    pub const LG_LIQUIDATED_PARTIAL: &str = "LG_LIQUIDATED_PARTIAL";
    pub const LG_RELEASED: &str = "LG_RELEASED";
    pub const LG_INSTRUCTION_DELIVERED: &str = "LG_INSTRUCTION_DELIVERED";
    pub const BANK_REPLY_RECEIVED: &str = "BANK_REPLY_RECEIVED";
    pub const NOTIFICATION_SENT: &str = "NOTIFICATION_SENT";
    pub const REMINDER_SENT: &str = "REMINDER_SENT";
}

/// Every known action type, in a stable order.
pub const ALL_ACTION_TYPES: &[&str] = &[
    action_types::LG_ACTIVATED,
    action_types::LG_AMENDED,
    action_types::LG_EXTENDED,
    action_types::LG_DECREASED_AMOUNT,
    action_types::LG_LIQUIDATED_FULL,
    action_types::LG_LIQUIDATED_PARTIAL,
    action_types::LG_RELEASED,
    action_types::LG_INSTRUCTION_DELIVERED,
    action_types::BANK_REPLY_RECEIVED,
    action_types::NOTIFICATION_SENT,
    action_types::REMINDER_SENT,
];

// ---------------------------------------------------------------------------
// Filter group constants
// ---------------------------------------------------------------------------

/// User-facing filter categories shown as checkboxes on the export form.
pub mod groups {
    pub const FINANCIALS: &str = "financials";
    pub const EXTENSIONS: &str = "extensions";
    pub const ACTIVATION: &str = "activation";
    pub const DELIVERY: &str = "delivery";
    pub const COMMUNICATIONS: &str = "communications";
}

/// Every known filter group, in display order.
pub const ALL_GROUPS: &[&str] = &[
    groups::FINANCIALS,
    groups::EXTENSIONS,
    groups::ACTIVATION,
    groups::DELIVERY,
    groups::COMMUNICATIONS,
];

// ---------------------------------------------------------------------------
// Group-to-action-type mapping
// ---------------------------------------------------------------------------

/// Action types included by a single filter group.
///
/// Unknown group keys map to an empty slice rather than an error; the
/// request validator rejects them before the fetch layer sees them.
pub fn action_types_for_group(group: &str) -> &'static [&'static str] {
    match group {
        groups::FINANCIALS => &[
            action_types::LG_LIQUIDATED_FULL,
            action_types::LG_LIQUIDATED_PARTIAL,
            action_types::LG_DECREASED_AMOUNT,
        ],
        groups::EXTENSIONS => &[action_types::LG_EXTENDED, action_types::LG_AMENDED],
        groups::ACTIVATION => &[action_types::LG_ACTIVATED, action_types::LG_RELEASED],
        groups::DELIVERY => &[
            action_types::LG_INSTRUCTION_DELIVERED,
            action_types::BANK_REPLY_RECEIVED,
        ],
        groups::COMMUNICATIONS => &[
            action_types::NOTIFICATION_SENT,
            action_types::REMINDER_SENT,
        ],
        _ => &[],
    }
}

/// Union of the action types covered by the selected groups.
///
/// Duplicate codes (a group key listed twice) are harmless downstream --
/// the backend treats the filter as a set.
pub fn action_types_for_groups(selected: &[&str]) -> Vec<&'static str> {
    selected
        .iter()
        .flat_map(|g| action_types_for_group(g).iter().copied())
        .collect()
}

/// Whether the selected groups span every known action type.
///
/// When they do, the history fetch omits the `action_types` query filter
/// entirely instead of sending the full list.
pub fn covers_all_action_types(selected: &[&str]) -> bool {
    let union = action_types_for_groups(selected);
    ALL_ACTION_TYPES.iter().all(|code| union.contains(code))
}

// ---------------------------------------------------------------------------
// Display labels
// ---------------------------------------------------------------------------

/// Convert an internal action-type code to title-cased words.
///
/// The `LG` token stays upper-case: `LG_LIQUIDATED_FULL` becomes
/// `"LG Liquidated Full"`. Unknown codes are converted mechanically,
/// never rejected.
pub fn action_label(code: &str) -> String {
    code.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            if word.eq_ignore_ascii_case("LG") {
                "LG".to_string()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
