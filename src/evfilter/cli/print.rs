use chrono::{DateTime, Utc};
use colored::Colorize;
use evfilter::booking::FieldError;
use evfilter::colors::{is_selected, ColorPalette};
use evfilter::commands::{ActiveFilter, CmdMessage, MessageLevel, SliderView};
use evfilter::model::{CatalogEntry, ColorKind, Event, FilterCriteria, Manufacturer, NewsArticle};
use evfilter::price::{format_price, pixel_offset, PriceBucket};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const PRICE_WIDTH: usize = 10;
const TIME_WIDTH: usize = 16;
const TRACK_WIDTH: usize = 40;
const FEATURED_MARKER: &str = "★";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_active_filters(filters: &[ActiveFilter]) {
    let key_width = filters
        .iter()
        .map(|f| f.key.as_str().width())
        .max()
        .unwrap_or(0);
    for filter in filters {
        let key = format!("{:<width$}", filter.key.as_str(), width = key_width);
        println!("  {}  {}", key.cyan(), filter.value);
    }
}

pub(super) fn print_entries(entries: &[CatalogEntry]) {
    for (i, entry) in entries.iter().enumerate() {
        let idx = format!("{:>3}. ", i + 1);
        let marker = if entry.featured {
            format!(" {}", FEATURED_MARKER)
        } else {
            "  ".to_string()
        };
        let category = if entry.category.is_empty() {
            String::new()
        } else {
            format!(" ({})", entry.category)
        };

        let fixed = idx.width() + marker.width() + PRICE_WIDTH + 1;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let name = truncate_to_width(&format!("{}{}", entry.display_name(), category), available);
        let padding = available.saturating_sub(name.width());

        let price = format!("{:>width$}", format_price(entry.price), width = PRICE_WIDTH);
        println!(
            "{}{}{}{} {}",
            idx.dimmed(),
            name,
            " ".repeat(padding),
            marker.yellow(),
            price.bold()
        );
    }
}

pub(super) fn print_buckets(buckets: &[PriceBucket], criteria: &FilterCriteria) {
    for (i, bucket) in buckets.iter().enumerate() {
        let line = format!("{:>3}. {}", i + 1, bucket.label);
        if bucket.is_active(criteria) {
            println!("{} {}", line.green().bold(), "(active)".dimmed());
        } else {
            println!("{}", line);
        }
    }
}

pub(super) fn print_slider(view: &SliderView) {
    let width = TRACK_WIDTH as f64;
    let lo = pixel_offset(view.offsets.0, width).round() as usize;
    let hi = pixel_offset(view.offsets.1, width).round() as usize;

    let track: String = (0..=TRACK_WIDTH)
        .map(|i| {
            if i == lo || i == hi {
                '●'
            } else if i > lo && i < hi {
                '━'
            } else {
                '─'
            }
        })
        .collect();

    println!(
        "{} {} {}",
        format_price(view.domain.min).dimmed(),
        track,
        format_price(view.domain.max).dimmed()
    );
}

pub(super) fn print_colors(palette: &ColorPalette, criteria: &FilterCriteria) {
    for kind in [ColorKind::Exterior, ColorKind::Interior] {
        println!("{}", capitalize(kind.as_str()).bold());
        for color in palette.of_kind(kind) {
            let selected = is_selected(criteria, kind, color.id);
            let mark = if selected { "[x]" } else { "[ ]" };
            let hex = color.hex_code.as_deref().unwrap_or("");
            let line = format!("  {} {:>4}  {}", mark, color.id.0, color.name);
            if selected {
                println!("{} {}", line.green(), hex.dimmed());
            } else {
                println!("{} {}", line, hex.dimmed());
            }
        }
    }
}

pub(super) fn print_manufacturers(manufacturers: &[(Manufacturer, Option<String>)]) {
    for (manufacturer, logo) in manufacturers {
        match logo {
            Some(url) => println!("  {}  {}", manufacturer.name, url.dimmed()),
            None => println!("  {}", manufacturer.name),
        }
    }
}

pub(super) fn print_events(events: &[Event]) {
    for event in events {
        let location = if event.location.is_empty() {
            String::new()
        } else {
            format!(" @ {}", event.location)
        };
        print_dated_line(&format!("{}{}", event.title, location), event.start_date);
    }
}

pub(super) fn print_news(articles: &[NewsArticle]) {
    for article in articles {
        print_dated_line(&article.title, article.published_at);
        if !article.summary.is_empty() {
            println!(
                "    {}",
                truncate_to_width(&article.summary, LINE_WIDTH - 4).dimmed()
            );
        }
    }
}

pub(super) fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        eprintln!("  {} {}", error.field.red(), error.message);
    }
}

fn print_dated_line(text: &str, when: DateTime<Utc>) {
    let available = LINE_WIDTH.saturating_sub(TIME_WIDTH + 2);
    let title = truncate_to_width(text, available);
    let padding = available.saturating_sub(title.width());
    println!(
        "  {}{}{}",
        title,
        " ".repeat(padding),
        format_relative(when).dimmed()
    );
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// "3 days ago" for past timestamps, "in 3 days" for future ones.
fn format_relative(timestamp: DateTime<Utc>) -> String {
    let delta = timestamp.signed_duration_since(Utc::now());
    let formatter = Formatter::new();

    let text = if delta.num_seconds() > 0 {
        let ahead = formatter.convert(delta.to_std().unwrap_or_default());
        format!("in {}", ahead.trim_end_matches(" ago"))
    } else {
        formatter.convert((-delta).to_std().unwrap_or_default())
    };
    format!("{:>width$}", text, width = TIME_WIDTH)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
