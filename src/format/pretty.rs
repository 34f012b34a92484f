//! Pretty terminal output with colors and tables.

use crate::cli::Args;
use crate::decode::{DecodeResult, OperationInfo, RewardCollection};
use crate::error::Result;
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table, presets};

/// Fields whose values are token quantities.
const AMOUNT_FIELDS: &[&str] = &[
    "tokenAmount",
    "maxAmountTokenA",
    "maxAmountTokenB",
    "liquidity",
    "amount",
];

/// Format a decode result as pretty terminal output.
pub fn format_pretty(result: &DecodeResult, args: &Args) -> Result<String> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let intention = &result.intention;
    let mut output = String::new();

    output.push_str(&format!("{}\n", "Intention".bold().cyan()));
    output.push_str(&format!(
        "  {} {}\n",
        "Type:".dimmed(),
        intention.sub_type().yellow()
    ));
    output.push_str(&format!("  {} {:?}\n", "Tx type:".dimmed(), result.tx_type));

    let fields = intention.fields();
    if !fields.is_empty() {
        output.push('\n');
        output.push_str(&format!("{}\n", "Fields".bold().cyan()));
        output.push_str(&format_fields_table(&fields));
    }

    if let Some(rewards) = intention.collect_rewards() {
        output.push('\n');
        output.push_str(&format!(
            "{} ({})\n",
            "Reward Collections".bold().cyan(),
            rewards.len()
        ));
        if rewards.is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
        } else {
            output.push_str(&format_rewards_table(rewards));
        }
    }

    Ok(output)
}

/// Format the supported operations as a table.
pub fn format_operations_pretty(ops: &[OperationInfo]) -> Result<String> {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("App").fg(comfy_table::Color::DarkGrey),
        Cell::new("Call").fg(comfy_table::Color::DarkGrey),
        Cell::new("Intention").fg(comfy_table::Color::DarkGrey),
    ]);

    for op in ops {
        table.add_row(vec![
            Cell::new(op.app.as_str()),
            Cell::new(&op.target),
            Cell::new(op.intention),
        ]);
    }

    Ok(format!("{}\n", table))
}

/// Format intention fields as a two-column table.
fn format_fields_table(fields: &[(&'static str, String)]) -> String {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Field").fg(comfy_table::Color::DarkGrey),
        Cell::new("Value").fg(comfy_table::Color::DarkGrey),
    ]);

    for (name, value) in fields {
        let display = if AMOUNT_FIELDS.contains(name) {
            format_number_with_separators(value)
        } else if value.starts_with("0x") && !value.contains("::") {
            truncate_hash(value, 24)
        } else {
            value.clone()
        };
        table.add_row(vec![Cell::new(name), Cell::new(display)]);
    }

    format!("{}\n", table)
}

/// Format reward collections as a table.
fn format_rewards_table(rewards: &[RewardCollection]) -> String {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(comfy_table::Color::DarkGrey),
        Cell::new("Pool").fg(comfy_table::Color::DarkGrey),
        Cell::new("Position").fg(comfy_table::Color::DarkGrey),
        Cell::new("Reward Coin").fg(comfy_table::Color::DarkGrey),
    ]);

    for (idx, reward) in rewards.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx),
            Cell::new(truncate_hash(&reward.pool, 16)),
            Cell::new(truncate_hash(&reward.position, 16)),
            Cell::new(&reward.reward_coin_type),
        ]);
    }

    format!("{}\n", table)
}

/// Insert thousand separators into a decimal string.
///
/// Anything that is not all digits is returned unchanged.
fn format_number_with_separators(digits: &str) -> String {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return digits.to_string();
    }
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Truncate a hash for display, counting characters rather than bytes.
fn truncate_hash(hash: &str, max_len: usize) -> String {
    let len = hash.chars().count();
    if len <= max_len {
        return hash.to_string();
    }
    let half = max_len.saturating_sub(3) / 2;
    let head: String = hash.chars().take(half).collect();
    let tail: String = hash.chars().skip(len - half).collect();
    format!("{}...{}", head, tail)
}
