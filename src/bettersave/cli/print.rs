use bettersave::commands::{CmdMessage, ItemView, MessageLevel};
use bettersave::model::ItemKind;
use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;

const ID_WIDTH: usize = 22;
const TIME_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_items(items: &[ItemView]) {
    for item in items {
        println!("{}", format_item(item));
    }
}

fn kind_marker(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Level => "L",
        ItemKind::List => "≡",
    }
}

fn format_item(item: &ItemView) -> String {
    let marker = match item.kind {
        ItemKind::Level => kind_marker(item.kind).cyan(),
        ItemKind::List => kind_marker(item.kind).magenta(),
    };
    let id = format!("{:<width$}", item.id, width = ID_WIDTH);
    let line = format!("  {} {} {}", marker, id.bold(), item.name);
    match item.trashed_at {
        Some(at) => format!("{}  {}", line, format_time_ago(at).dimmed()),
        None => line,
    }
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bettersave::category::CategoryKind;
    use bettersave::model::ItemKey;
    use chrono::Duration;

    fn view(kind: ItemKind, trashed_at: Option<DateTime<Utc>>) -> ItemView {
        ItemView {
            key: ItemKey::new(),
            id: "my-level".into(),
            name: "My Level".into(),
            kind,
            category: Some(CategoryKind::Created),
            trashed_at,
        }
    }

    #[test]
    fn active_items_show_id_and_name() {
        colored::control::set_override(false);
        let line = format_item(&view(ItemKind::Level, None));
        assert!(line.contains("my-level"));
        assert!(line.ends_with("My Level"));
    }

    #[test]
    fn trashed_items_show_time_ago() {
        colored::control::set_override(false);
        let line = format_item(&view(ItemKind::List, Some(Utc::now() - Duration::hours(3))));
        assert!(line.contains("3 hours ago"));
        assert!(line.contains(kind_marker(ItemKind::List)));
    }
}
