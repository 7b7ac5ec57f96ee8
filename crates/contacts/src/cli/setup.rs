use clap::{Args, Parser, Subcommand};
use contactsapp::error::Result;
use contactsapp::model::{ContactField, ContactPatch, NewContact};
use contactsapp::view::filter::{DateMode, FieldSelector};
use contactsapp::view::sort::{SortDirection, SortSpec};
use contactsapp::view::ViewState;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "contacts",
    bin_name = "contacts",
    version = get_version(),
    disable_help_subcommand = true,
    after_help = "Fields: contactOwner accountName name email phone createdDate contactSource contactStatus contactBia\nLabels such as \"Contact Owner\" work too."
)]
#[command(about = "Browse, filter, sort and export a contact list", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON file to seed the contact store from (overrides config)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub seed: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List contacts, one page at a time
    #[command(alias = "ls", display_order = 1)]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Page number to show (1-based; out-of-range values are clamped)
        #[arg(long, short = 'p', default_value = "1")]
        page: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a contact
    #[command(display_order = 2)]
    Add {
        #[command(flatten)]
        contact: NewContactArgs,
    },

    /// Edit fields of an existing contact
    #[command(display_order = 3)]
    Edit {
        /// Contact id
        id: String,

        #[command(flatten)]
        patch: PatchArgs,
    },

    /// Export the filtered, sorted contacts to an .xlsx workbook
    #[command(display_order = 4)]
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output file (defaults to the configured export_file)
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dashboard summary
    #[command(display_order = 5)]
    Stats {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session over one contact list
    #[command(alias = "repl", display_order = 6)]
    Session,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Field to search in: a field key or label, or "all" [default: all, or
    /// createdDate when --from/--to is given]
    #[arg(long, short = 'f')]
    pub field: Option<String>,

    /// Case-insensitive substring to look for
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// How --from/--to are read: exact (YYYY-MM-DD), month (1-12) or year
    #[arg(long, value_name = "MODE")]
    pub date_mode: Option<String>,

    /// Start of the created-date range (inclusive)
    #[arg(long, value_name = "BOUND")]
    pub from: Option<String>,

    /// End of the created-date range (inclusive)
    #[arg(long, value_name = "BOUND")]
    pub to: Option<String>,

    /// Field to sort by
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

impl FilterArgs {
    /// Build the view state these flags describe, page index 0.
    pub fn to_view_state(&self) -> Result<ViewState> {
        let has_bounds = self.from.is_some() || self.to.is_some();
        let field = match &self.field {
            Some(raw) => raw.parse()?,
            None if has_bounds => FieldSelector::Field(ContactField::CreatedDate),
            None => FieldSelector::All,
        };

        let mut state = ViewState::new().with_field(field);
        if let Some(mode) = &self.date_mode {
            state = state.with_date_mode(mode.parse::<DateMode>()?);
        }
        if let Some(from) = &self.from {
            state = state.with_start_bound(from)?;
        }
        if let Some(to) = &self.to {
            state = state.with_end_bound(to)?;
        }
        if let Some(term) = &self.search {
            state = state.with_search(term.as_str());
        }
        if let Some(sort) = &self.sort {
            let field: ContactField = sort.parse()?;
            let direction = if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            state = state.with_sort(SortSpec::By { field, direction });
        }
        Ok(state)
    }
}

#[derive(Args, Debug, Clone)]
pub struct NewContactArgs {
    /// Contact Owner
    #[arg(long)]
    pub owner: String,

    /// Account Name
    #[arg(long)]
    pub account: String,

    /// Name
    #[arg(long)]
    pub name: String,

    /// Email
    #[arg(long)]
    pub email: String,

    /// Phone (10 digits)
    #[arg(long)]
    pub phone: String,

    /// Contact Source
    #[arg(long)]
    pub source: Option<String>,

    /// Contact Status
    #[arg(long)]
    pub status: Option<String>,

    /// Contact Bia
    #[arg(long)]
    pub bia: Option<String>,
}

impl From<NewContactArgs> for NewContact {
    fn from(args: NewContactArgs) -> Self {
        NewContact {
            contact_owner: args.owner,
            account_name: args.account,
            name: args.name,
            email: args.email,
            phone: args.phone,
            contact_source: args.source,
            contact_status: args.status,
            contact_bia: args.bia,
        }
    }
}

/// Same flags as [`NewContactArgs`], all optional. An empty value clears an
/// optional field.
#[derive(Args, Debug, Clone, Default)]
pub struct PatchArgs {
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub account: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub bia: Option<String>,
}

impl From<PatchArgs> for ContactPatch {
    fn from(args: PatchArgs) -> Self {
        ContactPatch {
            contact_owner: args.owner,
            account_name: args.account,
            name: args.name,
            email: args.email,
            phone: args.phone,
            contact_source: args.source,
            contact_status: args.status,
            contact_bia: args.bia,
        }
    }
}
