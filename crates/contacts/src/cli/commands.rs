use super::render::{
    render_error, render_listing, render_messages, render_stats, render_table, DEFAULT_LINE_WIDTH,
};
use super::session;
use super::setup::{Cli, Commands, FilterArgs, NewContactArgs, PatchArgs};
use anyhow::Result;
use clap::Parser;
use contactsapp::api::ContactsApi;
use contactsapp::config::ContactsConfig;
use contactsapp::error::ContactsError;
use contactsapp::model::ContactId;
use contactsapp::store::memory::InMemoryStore;
use contactsapp::view::sort::SortSpec;
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

type Api = ContactsApi<InMemoryStore>;

const LOG_ENV: &str = "CONTACTS_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!(command = ?cli.command, "parsed command line");

    let mut api = create_api(&cli)?;

    match cli.command {
        None => handle_list(&api, &FilterArgs::default(), "1", false),
        Some(Commands::List { filter, page, json }) => handle_list(&api, &filter, &page, json),
        Some(Commands::Add { contact }) => handle_add(&mut api, contact),
        Some(Commands::Edit { id, patch }) => handle_edit(&mut api, &id, patch),
        Some(Commands::Export { filter, output }) => {
            handle_export(&api, &filter, output.as_deref())
        }
        Some(Commands::Stats { json }) => handle_stats(&api, json),
        Some(Commands::Session) => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            session::run_session(&mut api, stdin.lock(), &mut stdout, line_width())
                .map_err(api_error)
        }
    }
}

/// Diagnostics go to stderr so stdout stays clean for tables and JSON.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Seeded API with `--seed` taking precedence over the configured seed file.
fn create_api(cli: &Cli) -> Result<Api> {
    let mut config = ContactsConfig::load().map_err(api_error)?;
    if let Some(seed) = &cli.seed {
        config.seed_file = Some(seed.clone());
    }
    ContactsApi::seeded(config).map_err(api_error)
}

fn api_error(err: ContactsError) -> anyhow::Error {
    anyhow::anyhow!("{}", render_error(&err).trim_end())
}

fn line_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(DEFAULT_LINE_WIDTH)
}

fn handle_list(api: &Api, filter: &FilterArgs, page: &str, json: bool) -> Result<()> {
    let mut state = filter.to_view_state().map_err(api_error)?;
    let mut result = api.list_contacts(&state).map_err(api_error)?;

    if let Some(info) = result.page {
        let jumped = state.jump_to_page(page, &info);
        if jumped.page_index != info.index {
            state = jumped;
            result = api.list_contacts(&state).map_err(api_error)?;
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_listing(&result, &state.sort, line_width()));
    }
    Ok(())
}

fn handle_add(api: &mut Api, contact: NewContactArgs) -> Result<()> {
    let result = api.add_contact(contact.into()).map_err(api_error)?;
    print!(
        "{}",
        render_table(&result.affected, &SortSpec::Unsorted, line_width())
    );
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_edit(api: &mut Api, id: &str, patch: PatchArgs) -> Result<()> {
    let id = id.parse::<ContactId>().map_err(api_error)?;
    let result = api.edit_contact(id, &patch.into()).map_err(api_error)?;
    if !result.affected.is_empty() {
        print!(
            "{}",
            render_table(&result.affected, &SortSpec::Unsorted, line_width())
        );
    }
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_export(api: &Api, filter: &FilterArgs, output: Option<&Path>) -> Result<()> {
    let state = filter.to_view_state().map_err(api_error)?;
    let result = api.export_contacts(&state, output).map_err(api_error)?;
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_stats(api: &Api, json: bool) -> Result<()> {
    let result = api.stats().map_err(api_error)?;
    let Some(stats) = &result.stats else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        print!("{}", render_stats(stats));
    }
    Ok(())
}
