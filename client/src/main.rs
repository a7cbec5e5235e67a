//! Kirai CLI - enter, search, view and print freight-commission records
//!
//! # Session
//!
//! ```bash
//! kirai login --email staff@agency.in   # password from --password or KIRAI_PASSWORD
//! kirai whoami
//! kirai logout
//! ```
//!
//! # Records
//!
//! ```bash
//! kirai new --set klno=KL-1001 --rice-mill "Sri Rama" --set loadingDetails.bagCount=120
//! kirai list --page 1
//! kirai list --field rice-mill --value Mill2 --format csv
//! kirai view KL-1001
//! kirai print KL-1001 --output kl-1001.txt
//! ```
//!
//! # Lookups
//!
//! ```bash
//! kirai rice-mills --search rama
//! kirai dhalaris
//! kirai fields
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use kirai::error::ClientResult;
use kirai::form::lookup;
use kirai::{
    registry, ApiClient, ClientError, Completion, Config, KiraiForm, KiraiRecord, KiraiStore,
    ListRow, Listing, PrintOptions, SearchField, Selection, Session, SessionStore, LIST_HEADERS,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kirai")]
#[command(about = "Enter, search, view and print Kirai freight-commission records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "KIRAI_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Enter and save a new record
    New {
        /// Prefill from a JSON record file
        #[arg(long)]
        from: Option<PathBuf>,

        /// Set a field, e.g. --set loadingDetails.bagCount=120 (repeatable)
        #[arg(short, long = "set", value_name = "PATH=VALUE")]
        set: Vec<String>,

        /// Copy the rice mill with this name
        #[arg(long)]
        rice_mill: Option<String>,

        /// Copy the dhalari with this name
        #[arg(long)]
        dhalari: Option<String>,
    },

    /// List records page by page, or filter them
    List {
        /// Zero-based page number
        #[arg(short, long, default_value = "0")]
        page: usize,

        /// Field to filter on (klno, rice-mill, dhalari)
        #[arg(short, long)]
        field: Option<SearchField>,

        /// Filter value (empty lists the page)
        #[arg(short, long)]
        value: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show every field of one record
    View {
        /// KL number
        klno: String,
    },

    /// Render one record as a printable document
    Print {
        /// KL number
        klno: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page width in characters
        #[arg(long, default_value = "80")]
        width: usize,
    },

    /// List rice mills
    RiceMills {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// List dhalaris
    Dhalaris {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show the field registry
    Fields,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match Config::from_env() {
        Ok(config) => run(cli.command, &config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &Config) -> ClientResult<()> {
    match command {
        Commands::Login { email, password } => cmd_login(config, &email, &password).await,
        Commands::Logout => cmd_logout(config),
        Commands::Whoami => cmd_whoami(config),
        Commands::New {
            from,
            set,
            rice_mill,
            dhalari,
        } => cmd_new(config, from.as_deref(), &set, rice_mill.as_deref(), dhalari.as_deref()).await,
        Commands::List {
            page,
            field,
            value,
            format,
        } => cmd_list(config, page, field, value.as_deref(), format).await,
        Commands::View { klno } => cmd_view(config, &klno).await,
        Commands::Print { klno, output, width } => cmd_print(config, &klno, output.as_deref(), width).await,
        Commands::RiceMills { search } => cmd_rice_mills(config, &search).await,
        Commands::Dhalaris { search } => cmd_dhalaris(config, &search).await,
        Commands::Fields => cmd_fields(),
    }
}

/// Client carrying the stored session token.
fn authenticated_client(config: &Config) -> ClientResult<ApiClient> {
    let session = SessionStore::from_config(config)?.require()?;
    Ok(ApiClient::new(config)?.with_session(&session))
}

async fn cmd_login(config: &Config, email: &str, password: &str) -> ClientResult<()> {
    let sessions = SessionStore::from_config(config)?;
    let client = ApiClient::new(config)?;

    eprintln!("🔐 Logging in as {}...", email);
    let session = Session::from(client.login(email, password).await?);
    sessions.save(&session)?;

    eprintln!("✅ Welcome, {}!", session.user.greeting_name());
    eprintln!("   Session: {}", sessions.path().display());
    Ok(())
}

fn cmd_logout(config: &Config) -> ClientResult<()> {
    let sessions = SessionStore::from_config(config)?;
    if sessions.clear()? {
        eprintln!("👋 Logged out.");
    } else {
        eprintln!("📋 No stored session.");
    }
    Ok(())
}

fn cmd_whoami(config: &Config) -> ClientResult<()> {
    let session = SessionStore::from_config(config)?.require()?;
    println!("Hello, {}", session.user.greeting_name());
    if !session.user.email.is_empty() {
        println!("   Email: {}", session.user.email);
    }
    if !session.user.role.is_empty() {
        println!("   Role: {}", session.user.role);
    }
    Ok(())
}

async fn cmd_new(
    config: &Config,
    from: Option<&Path>,
    assignments: &[String],
    rice_mill: Option<&str>,
    dhalari: Option<&str>,
) -> ClientResult<()> {
    let store = authenticated_client(config)?;
    let mut form = KiraiForm::new();

    if let Some(path) = from {
        eprintln!("📄 Prefilling from: {}", path.display());
        let content = fs::read_to_string(path)?;
        let record: KiraiRecord = serde_json::from_str(&content)?;
        form.fill_from(&record);
    }

    if let Some(name) = rice_mill {
        let mills = store.rice_mills().await?;
        let mill = lookup::resolve(&mills, name)
            .ok_or_else(|| ClientError::InvalidArgument(format!("no single rice mill matches '{}'", name)))?;
        eprintln!("   Rice mill: {}", mill.display_name());
        form.select_rice_mill(mill);
    }

    if let Some(name) = dhalari {
        let dhalaris = store.dhalaris().await?;
        let dhalari = lookup::resolve(&dhalaris, name)
            .ok_or_else(|| ClientError::InvalidArgument(format!("no single dhalari matches '{}'", name)))?;
        eprintln!("   Dhalari: {}", dhalari.display_name());
        form.select_dhalari(dhalari);
    }

    for assignment in assignments {
        form.apply_assignment(assignment)?;
    }

    eprintln!("💾 Saving kirai details...");
    let saved = form.submit(&store).await?;
    eprintln!("✅ Kirai details saved successfully: {}", saved.klno);

    println!("{}", serde_json::to_string_pretty(&saved)?);
    Ok(())
}

async fn cmd_list(
    config: &Config,
    page: usize,
    field: Option<SearchField>,
    value: Option<&str>,
    format: OutputFormat,
) -> ClientResult<()> {
    let store = authenticated_client(config)?;
    let mut listing = Listing::new(config.page_size).at_page(page);
    if let Some(value) = value {
        listing.search(field.unwrap_or_default(), value);
    }

    eprintln!("🔍 Loading kirai details...");
    if let Some(Completion::Failed(e)) = listing.load(&store).await {
        return Err(e.into());
    }

    let rows: Vec<ListRow> = listing.records().iter().map(ListRow::from_record).collect();
    match format {
        OutputFormat::Table => print_table(&rows),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(io::stdout());
            if rows.is_empty() {
                writer.write_record(LIST_HEADERS)?;
            }
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
    }

    if listing.is_filtering() {
        eprintln!("\n🔍 {} result(s); page navigation is off while filtering", rows.len());
    } else {
        eprintln!("\n📊 Page {} · {} record(s)", listing.page(), rows.len());
        if listing.can_prev() {
            eprintln!("   Previous: kirai list --page {}", listing.page() - 1);
        }
        if listing.can_next() {
            eprintln!("   Next: kirai list --page {}", listing.page() + 1);
        }
    }
    Ok(())
}

fn print_table(rows: &[ListRow]) {
    let mut widths: Vec<usize> = LIST_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", line(&LIST_HEADERS[..]));
    println!("{}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    if rows.is_empty() {
        println!("No kirai details found");
    }
    for row in rows {
        println!("{}", line(&row.cells()[..]));
    }
}

/// Select the record with KL number `klno`.
async fn select_record(config: &Config, klno: &str) -> ClientResult<Selection> {
    let store = authenticated_client(config)?;
    let records = store.filter(SearchField::KlNo.path(), klno.trim()).await?;
    let record = records
        .into_iter()
        .find(|r| r.klno.trim() == klno.trim())
        .ok_or_else(|| ClientError::RecordNotFound(klno.to_string()))?;

    let mut selection = Selection::new();
    selection.select(record);
    Ok(selection)
}

async fn cmd_view(config: &Config, klno: &str) -> ClientResult<()> {
    let mut selection = select_record(config, klno).await?;
    let rows = selection.view().unwrap_or_default();

    let width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    let mut section = None;
    for row in &rows {
        if row.section != section {
            if let Some(title) = row.section {
                println!("\n{}", title);
            } else {
                println!();
            }
            section = row.section;
        }
        println!("{:<width$}  {}", row.label, row.value, width = width);
    }

    selection.close();
    Ok(())
}

async fn cmd_print(config: &Config, klno: &str, output: Option<&Path>, width: usize) -> ClientResult<()> {
    let mut selection = select_record(config, klno).await?;
    let options = PrintOptions::from(config);

    if let Some(document) = selection.print(&options) {
        write_output(&document.render_text(width), output)?;
    }

    selection.close();
    Ok(())
}

async fn cmd_rice_mills(config: &Config, search: &str) -> ClientResult<()> {
    let store = authenticated_client(config)?;
    let mills = store.rice_mills().await?;
    let found = lookup::matching_rice_mills(&mills, search);
    if found.is_empty() {
        eprintln!("📋 No rice mills found");
    }
    for mill in found {
        println!(
            "{}  {}",
            mill.display_name(),
            mill.location.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}

async fn cmd_dhalaris(config: &Config, search: &str) -> ClientResult<()> {
    let store = authenticated_client(config)?;
    let dhalaris = store.dhalaris().await?;
    let found = lookup::matching_dhalaris(&dhalaris, search);
    if found.is_empty() {
        eprintln!("📋 No dhalaris found");
    }
    for dhalari in found {
        println!(
            "{}  {}",
            dhalari.display_name(),
            dhalari.location.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}

fn cmd_fields() -> ClientResult<()> {
    for field in registry().paths() {
        let label = if field.spec.visible { field.spec.alias } else { "(hidden)" };
        println!("{:<32} {:<8} {}", field.dotted(), field.kind().to_string(), label);
    }
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> ClientResult<()> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
