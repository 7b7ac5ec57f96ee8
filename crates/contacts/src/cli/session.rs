//! Interactive session: one store, one evolving [`ViewState`].
//!
//! Each input line is split shell-style (single or double quotes group words)
//! and parsed by clap as one session command. Parse errors and failed
//! operations are printed and the session keeps going; only `quit` or the end
//! of input stops it. Any command that can change what is visible re-renders
//! the current page.

use super::render::{
    render_error, render_listing, render_messages, render_stats, render_view_summary,
};
use super::setup::{NewContactArgs, PatchArgs};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use contactsapp::api::ContactsApi;
use contactsapp::error::{ContactsError, Result};
use contactsapp::model::ContactId;
use contactsapp::store::ContactStore;
use contactsapp::view::pager::PageInfo;
use contactsapp::view::ViewState;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "session",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    help_template = "Commands:\n{subcommands}"
)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Show the current page
    #[command(alias = "ls")]
    Show,
    /// Set the search term; no term clears it
    Search {
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        term: Vec<String>,
    },
    /// Field to search in: a key, a label or "all"
    Field { field: String },
    /// How date bounds are read: exact, month or year
    Mode { mode: String },
    /// Start of the created-date range; no value clears it
    From { bound: Option<String> },
    /// End of the created-date range; no value clears it
    To { bound: Option<String> },
    /// Cycle the sort on a field: ascending, descending, off
    Sort { field: String },
    /// Next page
    #[command(alias = "n")]
    Next,
    /// Previous page
    #[command(alias = "p", alias = "previous")]
    Prev,
    /// Go to a page number
    Page { number: String },
    /// Add a contact
    Add {
        #[command(flatten)]
        contact: NewContactArgs,
    },
    /// Edit fields of a contact
    Edit {
        id: String,
        #[command(flatten)]
        patch: PatchArgs,
    },
    /// Export the filtered, sorted contacts to a workbook
    Export {
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Dashboard summary
    Stats,
    /// List session commands
    Help,
    /// Leave the session
    #[command(alias = "exit", alias = "q")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

struct Session<'a, S: ContactStore> {
    api: &'a mut ContactsApi<S>,
    state: ViewState,
    line_width: usize,
}

pub fn run_session<S, R, W>(
    api: &mut ContactsApi<S>,
    input: R,
    out: &mut W,
    line_width: usize,
) -> Result<()>
where
    S: ContactStore,
    R: BufRead,
    W: Write,
{
    let mut session = Session {
        api,
        state: ViewState::new(),
        line_width,
    };
    writeln!(
        out,
        "{}",
        "Contacts session. Type `help` for commands, `quit` to leave.".dimmed()
    )?;
    session.show(out)?;
    prompt(out)?;

    for line in input.lines() {
        let line = line?;
        let words = match split_line(&line) {
            Ok(words) => words,
            Err(problem) => {
                writeln!(out, "{}", problem.red())?;
                prompt(out)?;
                continue;
            }
        };
        if words.is_empty() {
            prompt(out)?;
            continue;
        }

        match SessionLine::try_parse_from(&words) {
            Ok(parsed) => match session.apply(parsed.command, out) {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(err) => write!(out, "{}", render_error(&err))?,
            },
            Err(err) => write!(out, "{}", err)?,
        }
        prompt(out)?;
    }
    writeln!(out)?;
    Ok(())
}

impl<S: ContactStore> Session<'_, S> {
    fn apply<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<Flow> {
        match command {
            SessionCommand::Show => {}
            SessionCommand::Search { term } => {
                self.state = self.state.with_search(term.join(" "));
            }
            SessionCommand::Field { field } => {
                self.state = self.state.with_field(field.parse()?);
            }
            SessionCommand::Mode { mode } => {
                self.state = self.state.with_date_mode(mode.parse()?);
            }
            SessionCommand::From { bound } => {
                self.state = self.state.with_start_bound(bound.as_deref().unwrap_or(""))?;
            }
            SessionCommand::To { bound } => {
                self.state = self.state.with_end_bound(bound.as_deref().unwrap_or(""))?;
            }
            SessionCommand::Sort { field } => {
                self.state = self.state.toggle_sort(field.parse()?);
            }
            SessionCommand::Next => {
                let page = self.current_page()?;
                self.state = self.state.next_page(&page);
            }
            SessionCommand::Prev => {
                let page = self.current_page()?;
                self.state = self.state.previous_page(&page);
            }
            SessionCommand::Page { number } => {
                let page = self.current_page()?;
                self.state = self.state.jump_to_page(&number, &page);
            }
            SessionCommand::Add { contact } => {
                let result = self.api.add_contact(contact.into())?;
                write!(out, "{}", render_messages(&result.messages))?;
            }
            SessionCommand::Edit { id, patch } => {
                let id = id.parse::<ContactId>()?;
                let result = self.api.edit_contact(id, &patch.into())?;
                write!(out, "{}", render_messages(&result.messages))?;
            }
            SessionCommand::Export { output } => {
                let result = self.api.export_contacts(&self.state, output.as_deref())?;
                write!(out, "{}", render_messages(&result.messages))?;
                return Ok(Flow::Continue);
            }
            SessionCommand::Stats => {
                if let Some(stats) = &self.api.stats()?.stats {
                    write!(out, "{}", render_stats(stats))?;
                }
                return Ok(Flow::Continue);
            }
            SessionCommand::Help => {
                write!(out, "{}", SessionLine::command().render_help())?;
                return Ok(Flow::Continue);
            }
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        self.show(out)?;
        Ok(Flow::Continue)
    }

    fn show<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let result = self.api.list_contacts(&self.state)?;
        if let Some(page) = &result.page {
            // Keep the index the view was clamped to, so next/prev start there.
            self.state = self.state.with_page_index(page.index);
        }
        write!(out, "{}", render_view_summary(&self.state))?;
        write!(
            out,
            "{}",
            render_listing(&result, &self.state.sort, self.line_width)
        )?;
        Ok(())
    }

    fn current_page(&self) -> Result<PageInfo> {
        self.api
            .list_contacts(&self.state)?
            .page
            .ok_or_else(|| ContactsError::Api("listing returned no page".to_string()))
    }
}

fn prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "{} ", ">".bold())?;
    out.flush()?;
    Ok(())
}

/// Split on whitespace, keeping quoted text together. `""` is an empty word.
fn split_line(line: &str) -> std::result::Result<Vec<String>, &'static str> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err("Unterminated quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
