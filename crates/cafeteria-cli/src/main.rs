//! Cafeteria CLI
//!
//! `demo` drives a scripted session through the app core against the
//! in-memory backend. `widget` renders a menu snapshot the way the
//! home-screen widget does.

use anyhow::{bail, Context, Result};
use cafeteria_model::{AuthState, Campus, MealType, MenuInput};
use cafeteria_service::{MemoryBackend, Services};
use cafeteria_store::features::{AuthAction, EditorAction, MenuAction, SettingsAction};
use cafeteria_store::{AppAction, AppConfig, AppReducer, AppState, Clock, Store, SystemClock};
use cafeteria_widget::{header, render, TimelineEntry};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Command::new("cafeteria")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Campus cafeteria menu core")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("demo")
                .about("Run a scripted session against the in-memory backend")
                .arg(
                    Arg::new("email")
                        .long("email")
                        .default_value("demo@ssafy.com")
                        .help("Email of the platform account that signs in"),
                )
                .arg(
                    Arg::new("campus")
                        .long("campus")
                        .default_value("daejeon")
                        .help("Campus recorded on the account"),
                )
                .arg(
                    Arg::new("item")
                        .long("item")
                        .default_value("김치찌개")
                        .help("Type A line the demo user adds to today's menu"),
                ),
        )
        .subcommand(
            Command::new("widget")
                .about("Render a widget snapshot")
                .arg(
                    Arg::new("snapshot")
                        .long("snapshot")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON timeline entry; omitted means no data"),
                )
                .arg(
                    Arg::new("meal")
                        .long("meal")
                        .default_value("a")
                        .value_parser(["a", "b"])
                        .help("Meal type to render"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_parser(value_parser!(NaiveDate))
                        .help("Day for an empty entry (YYYY-MM-DD); defaults to today"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the rendered rows as JSON"),
                ),
        );

    let matches = cli.get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    init_tracing(&config);

    match matches.subcommand() {
        Some(("demo", args)) => run_demo(&config, args).await,
        Some(("widget", args)) => run_widget(&config, args),
        _ => Ok(()),
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_demo(config: &AppConfig, args: &ArgMatches) -> Result<()> {
    let email = args
        .get_one::<String>("email")
        .context("missing --email")?;
    let campus: Campus = args
        .get_one::<String>("campus")
        .context("missing --campus")?
        .parse()?;
    let item = args.get_one::<String>("item").context("missing --item")?;

    let clock = Arc::new(SystemClock);
    let backend = Arc::new(MemoryBackend::new().with_platform_account(email.as_str(), campus));
    backend.seed_menu(
        MenuInput::new(clock.today(), campus)
            .with_items(MealType::A, ["쌀밥", "된장국"])
            .with_items(MealType::B, ["우동"]),
    )?;

    let reducer = AppReducer::new(&Services::from_backend(backend.clone()), clock, config);
    let initial = reducer.initial_state();
    let handle = Store::new(reducer, initial).spawn();

    info!("initializing");
    handle.send(AppAction::Initialize).await?;
    handle
        .wait_for(|s| s.auth.auth_state != AuthState::Loading)
        .await?;

    handle.send(AppAction::Auth(AuthAction::SignInTapped)).await?;
    let state = handle
        .wait_for(|s| s.auth.auth_state.is_authenticated() || s.auth.error_message.is_some())
        .await?;
    let Some(user) = state.auth.current_user() else {
        bail!(
            "sign-in failed: {}",
            state.auth.error_message.as_deref().unwrap_or_default()
        );
    };
    println!(
        "signed in: {} ({})",
        user.email.as_deref().unwrap_or("-"),
        user.campus.display_name()
    );

    let issued = state.menu.latest_request;
    handle.send(AppAction::Menu(MenuAction::Appear)).await?;
    let state = handle
        .wait_for(|s| s.menu.latest_request > issued && !s.menu.is_loading)
        .await?;
    print_menu("loaded", &state);

    handle.send(state.begin_editing()).await?;
    handle
        .send(AppAction::Editor(EditorAction::AddItem {
            meal_type: MealType::A,
            text: item.clone(),
        }))
        .await?;
    handle.send(AppAction::Editor(EditorAction::Submit)).await?;
    let state = handle
        .wait_for(|s| {
            let saved = s
                .menu
                .current_menu
                .as_ref()
                .is_some_and(|menu| menu.items_a.contains(item));
            saved || s.editor.error_message.is_some()
        })
        .await?;
    if let Some(message) = &state.editor.error_message {
        bail!("saving menu failed: {message}");
    }
    print_menu("saved", &state);

    handle
        .send(AppAction::Settings(SettingsAction::SignOutTapped))
        .await?;
    handle
        .send(AppAction::Settings(SettingsAction::SignOutConfirmed))
        .await?;
    let state = handle
        .wait_for(|s| s.auth.auth_state == AuthState::Unauthenticated)
        .await?;
    println!(
        "signed out; campus reset to {}",
        state.menu.selected_campus.display_name()
    );

    handle.shutdown().await?;
    Ok(())
}

fn print_menu(label: &str, state: &AppState) {
    let entry = TimelineEntry::new(state.menu.current_date, state.menu.current_menu.clone());
    println!("{label}:");
    for meal in MealType::ALL {
        let view = render(&entry, meal, "-");
        println!("  {}: {}", meal.display_name(), view.rows().join(", "));
    }
}

fn run_widget(config: &AppConfig, args: &ArgMatches) -> Result<()> {
    let meal = match args.get_one::<String>("meal").map(String::as_str) {
        Some("b") => MealType::B,
        _ => MealType::A,
    };

    let entry = match args.get_one::<PathBuf>("snapshot") {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading snapshot {}", path.display()))?;
            serde_json::from_str::<TimelineEntry>(&text).context("decoding snapshot")?
        }
        None => {
            let date = args
                .get_one::<NaiveDate>("date")
                .copied()
                .unwrap_or_else(|| SystemClock.today());
            TimelineEntry::placeholder(date)
        }
    };

    let view = render(&entry, meal, &config.widget_placeholder);
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&view.rows())?);
    } else {
        println!("{}", header(&entry, config.default_campus, meal));
        for row in view.rows() {
            println!("  {row}");
        }
    }
    Ok(())
}
