//! # CLI Layer
//!
//! This module is **one possible UI client** for evfilter, not the application itself.
//!
//! It is the only place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Parses arguments
//! - Talks to the network on the user's behalf
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: parses arguments, sets up tracing, the context and a tokio runtime
//! - `handle_*()`: per-command handlers that fetch, call the API and print
//! - `print::*`: output formatting
//!
//! Catalog data is fetched through the context's shared [`Feed`]s, so a failed
//! request surfaces as [`EvError::Unavailable`] with a retry hint rather than a raw
//! transport error.

mod args;
mod print;

use args::{BookArgs, Cli, Commands, FilterCommands};
use chrono::Local;
use clap::Parser;
use evfilter::booking::{BookingForm, BookingStep, BookingWizard};
use evfilter::client::{CatalogQuery, Feed, FetchState, SortOrder};
use evfilter::commands::CmdMessage;
use evfilter::error::{EvError, Result};
use evfilter::init::{initialize, EvContext};
use evfilter::model::{ColorKind, FilterCriteria};
use evfilter::price::parse_price_input;
use print::{
    print_active_filters, print_buckets, print_colors, print_entries, print_events,
    print_field_errors, print_manufacturers, print_messages, print_news, print_slider,
};
use std::future::Future;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = initialize(cli.data.clone())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            Commands::Filters { action } => {
                handle_filters(&mut ctx, action.unwrap_or(FilterCommands::Show)).await
            }
            Commands::Browse {
                search,
                ordering,
                featured,
            } => handle_browse(&ctx, search, ordering, featured).await,
            Commands::Prices { select } => handle_prices(&mut ctx, select).await,
            Commands::Colors => handle_colors(&mut ctx).await,
            Commands::Manufacturers => handle_manufacturers(&ctx).await,
            Commands::Events => handle_events(&ctx).await,
            Commands::News => handle_news(&ctx).await,
            Commands::Book(args) => handle_book(&ctx, args).await,
        }
    })
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "evfilter=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();
}

/// Await one request through `feed` and unwrap its final state.
async fn fetch<T, F>(feed: &Feed<T>, request: F) -> Result<T>
where
    T: Clone,
    F: Future<Output = Result<T>>,
{
    feed.load(request).await;
    match feed.state() {
        FetchState::Loaded(data) => Ok(data),
        FetchState::Failed(msg) => Err(EvError::Unavailable(msg)),
        FetchState::Idle | FetchState::Loading => {
            Err(EvError::Unavailable("request was cancelled".to_string()))
        }
    }
}

async fn handle_filters(ctx: &mut EvContext, action: FilterCommands) -> Result<()> {
    let result = match action {
        FilterCommands::Show => {
            load_palette_for_selection(ctx).await;
            ctx.api.show_filters()?
        }
        FilterCommands::Set { key, value } => ctx.api.set_filter(&key, &value)?,
        FilterCommands::Unset { key } => ctx.api.clear_filter(&key)?,
        FilterCommands::Clear => ctx.api.clear_filters()?,
        FilterCommands::ToggleColor { kind, name } => {
            let kind: ColorKind = kind.parse()?;
            if name.trim().parse::<u32>().is_err() {
                let colors = fetch(&ctx.feeds.colors, ctx.client.list_colors()).await?;
                ctx.api.set_palette(colors);
            }
            ctx.api.toggle_color(kind, &name)?
        }
        FilterCommands::ResetColors => ctx.api.reset_colors()?,
        FilterCommands::Price { min, max } => ctx
            .api
            .set_price_range(parse_price_input(&min), parse_price_input(&max))?,
    };

    print_active_filters(&result.active_filters);
    print_messages(&result.messages);
    Ok(())
}

/// Color names are nice to have when showing filters; ids are shown when offline.
async fn load_palette_for_selection(ctx: &mut EvContext) {
    let criteria = ctx.api.store().get_filters();
    if criteria.exterior_colors.is_empty() && criteria.interior_colors.is_empty() {
        return;
    }
    match ctx.client.list_colors().await {
        Ok(colors) => ctx.api.set_palette(colors),
        Err(e) => tracing::debug!(error = %e, "showing color ids without names"),
    }
}

/// The stored criteria go to the API as query parameters; the local engine
/// still filters the response so a lenient server cannot widen the result.
async fn handle_browse(
    ctx: &EvContext,
    search: Option<String>,
    ordering: Option<String>,
    featured: bool,
) -> Result<()> {
    let mut query = CatalogQuery::new(browse_criteria(ctx.api.store().get_filters(), featured));
    if let Some(search) = search {
        query = query.with_search(search);
    }
    if let Some(ordering) = ordering {
        query = query.with_ordering(ordering.parse::<SortOrder>()?);
    }

    let entries = fetch(&ctx.feeds.cars, ctx.client.list_cars(&query)).await?;
    let result = ctx.api.browse(&entries)?;
    print_entries(&result.listed_entries);
    print_messages(&result.messages);
    Ok(())
}

/// Stored criteria, with `--featured` layered on top for this request only.
fn browse_criteria(stored: &FilterCriteria, featured: bool) -> FilterCriteria {
    let mut criteria = stored.clone();
    if featured {
        criteria.featured = Some(true);
    }
    criteria
}

async fn handle_prices(ctx: &mut EvContext, select: Option<usize>) -> Result<()> {
    let entries = fetch(&ctx.feeds.cars, ctx.client.list_cars(&CatalogQuery::default())).await?;

    let selected = match select {
        Some(number) => ctx.api.select_bucket(&entries, number)?.messages,
        None => Vec::new(),
    };
    let buckets = ctx.api.price_buckets(&entries)?;
    let slider = ctx.api.slider(&entries)?;

    print_buckets(&buckets.buckets, ctx.api.store().get_filters());
    if let Some(view) = &slider.slider {
        println!();
        print_slider(view);
    }
    print_messages(&slider.messages);
    print_messages(&buckets.messages);
    print_messages(&selected);
    Ok(())
}

async fn handle_colors(ctx: &mut EvContext) -> Result<()> {
    let colors = fetch(&ctx.feeds.colors, ctx.client.list_colors()).await?;
    ctx.api.set_palette(colors);
    if ctx.api.palette().is_empty() {
        print_messages(&[CmdMessage::info("No colors are listed.")]);
        return Ok(());
    }
    print_colors(ctx.api.palette(), ctx.api.store().get_filters());
    Ok(())
}

async fn handle_manufacturers(ctx: &EvContext) -> Result<()> {
    let manufacturers = fetch(&ctx.feeds.manufacturers, ctx.client.list_manufacturers()).await?;
    let rows: Vec<_> = manufacturers
        .into_iter()
        .map(|m| {
            let logo = m.logo.as_deref().and_then(|path| ctx.client.image_url(path));
            (m, logo)
        })
        .collect();
    if rows.is_empty() {
        print_messages(&[CmdMessage::info("No manufacturers are listed.")]);
    }
    print_manufacturers(&rows);
    Ok(())
}

async fn handle_events(ctx: &EvContext) -> Result<()> {
    let events = fetch(&ctx.feeds.events, ctx.client.list_events()).await?;
    if events.is_empty() {
        print_messages(&[CmdMessage::info("No events scheduled.")]);
    }
    print_events(&events);
    Ok(())
}

async fn handle_news(ctx: &EvContext) -> Result<()> {
    let articles = fetch(&ctx.feeds.news, ctx.client.list_news()).await?;
    if articles.is_empty() {
        print_messages(&[CmdMessage::info("No news yet.")]);
    }
    print_news(&articles);
    Ok(())
}

async fn handle_book(ctx: &EvContext, args: BookArgs) -> Result<()> {
    let form = BookingForm {
        car_model: args.model.unwrap_or_default(),
        car_year: args.year.unwrap_or_default(),
        service_type: args.service.unwrap_or_default(),
        preferred_date: args.date.unwrap_or_default(),
        full_name: args.name.unwrap_or_default(),
        email: args.email.unwrap_or_default(),
        phone: args.phone.unwrap_or_default(),
        notes: args.notes.unwrap_or_default(),
    };
    let mut wizard = BookingWizard::with_form(Local::now().date_naive(), form);

    while wizard.step() != BookingStep::Review {
        let step = wizard.step();
        if let Err(errors) = wizard.next() {
            eprintln!("Step {} of 4 ({}):", step.number(), step);
            print_field_errors(&errors);
            return Err(EvError::InvalidInput(format!(
                "{} details are incomplete",
                step
            )));
        }
    }

    let booking = wizard.submit().map_err(|errors| {
        print_field_errors(&errors);
        EvError::InvalidInput("booking could not be submitted".to_string())
    })?;

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&booking)?);
        return Ok(());
    }

    let confirmation = fetch(&ctx.feeds.bookings, ctx.client.book_service(&booking)).await?;
    let message = confirmation.message.unwrap_or_else(|| {
        format!(
            "Booked {} on {} for {}.",
            booking.service_type, booking.preferred_date, booking.car_model
        )
    });
    print_messages(&[CmdMessage::success(message)]);
    Ok(())
}
