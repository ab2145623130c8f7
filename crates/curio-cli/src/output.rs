use chrono::{DateTime, Local, Utc};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use curio::chat::{Message, Role};
use curio::rescue::{RescueRecord, Urgency};

/// Shown under a report whose urgency is high
pub const EMERGENCY_NOTICE: &str =
    "For life-threatening emergencies, contact your local animal emergency services immediately.";

#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Local wall-clock time as `HH:MM`
pub fn format_time(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%H:%M").to_string()
}

/// Header printed when an interactive chat starts
pub fn banner() -> String {
    format!(
        "Curio Rescue Assistant\n\
         Helping animals, one rescue at a time. Type /quit to leave.\n\
         {EMERGENCY_NOTICE}\n\
         ======================\n"
    )
}

pub fn render_message(message: &Message) -> String {
    let speaker = match message.role {
        Role::Assistant => "Curio",
        Role::User => "You",
    };
    format!(
        "[{}] {}: {}",
        format_time(&message.timestamp),
        speaker,
        message.content
    )
}

pub fn render_report(record: &RescueRecord) -> String {
    let first_aid = record
        .first_aid
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["Rescue Report", ""]);

    table.add_row(["Animal", record.animal_type.as_str()]);
    table.add_row(["Issue", record.issue.as_str()]);
    table.add_row(["Location", record.location.as_str()]);
    table.add_row(["Urgency", &record.urgency.as_str().to_uppercase()]);
    table.add_row(["First Aid", first_aid.as_str()]);

    if record.urgency == Urgency::High {
        format!("{table}\n{EMERGENCY_NOTICE}")
    } else {
        table.to_string()
    }
}
