mod config;
mod records;

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use indexmap::IndexSet;

use crate::api::{ContentApi, HttpApi};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::session_io::{AuthContext, session_path};
use crate::model::category;
use crate::model::{AppConfig, Credentials};
use crate::ops::grid;
use crate::ops::page::GridPage;

/// Environment variable `login` reads the password from.
pub const PASSWORD_ENV: &str = "ODSG_PASSWORD";

/// Everything a command needs besides the API: resolved config, where it
/// came from, and the output format.
pub struct Context {
    pub json: bool,
    pub config_path: PathBuf,
    pub config: AppConfig,
}

impl Context {
    pub fn new(config: AppConfig, config_path: PathBuf, json: bool) -> Self {
        Context {
            json,
            config_path,
            config,
        }
    }

    /// Read the config file named on the command line (or the default one)
    /// and apply `$ODSG_API_URL` and `--api-url`.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(config_io::default_config_path);
        let config = config_io::load(&config_path, cli.api_url.as_deref())?;
        Ok(Context::new(config, config_path, cli.json))
    }

    /// Directory holding config.toml and session.json.
    pub fn config_dir(&self) -> PathBuf {
        match self.config_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn auth(&self) -> AuthContext {
        AuthContext::load(session_path(&self.config_dir()))
    }

    /// Print a write command's result in the selected format.
    fn outcome(&self, message: &str) -> Result<(), Box<dyn Error>> {
        if self.json {
            let out = Outcome { ok: true, message };
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("{}", message);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(ctx: &Context, cmd: Commands) -> Result<(), Box<dyn Error>> {
    match cmd {
        // Local commands never touch the network
        Commands::Ods => cmd_ods(ctx),
        Commands::Config(args) => config::cmd_config(ctx, args),
        Commands::Logout => cmd_logout(ctx),
        Commands::Whoami => cmd_whoami(ctx),
        remote => {
            let api = HttpApi::new(&ctx.config)?;
            run_remote(ctx, &api, remote)
        }
    }
}

/// Run a command that talks to the content API through `api`.
pub fn run_remote(
    ctx: &Context,
    api: &dyn ContentApi,
    cmd: Commands,
) -> Result<(), Box<dyn Error>> {
    match cmd {
        Commands::Login(args) => cmd_login(ctx, api, args),
        Commands::Sections(args) => cmd_sections(ctx, api, args),
        Commands::Section(SectionCmd { action }) => match action {
            SectionAction::Add(args) => cmd_section_add(ctx, api, args),
            SectionAction::Rm(args) => cmd_section_rm(ctx, api, args),
        },
        Commands::Project(ProjectCmd { action }) => records::cmd_project(ctx, api, action),
        Commands::Impact(ImpactCmd { action }) => records::cmd_impact(ctx, api, action),
        Commands::Research(ResearchCmd { action }) => records::cmd_research(ctx, api, action),
        Commands::Ods => cmd_ods(ctx),
        Commands::Config(args) => config::cmd_config(ctx, args),
        Commands::Logout => cmd_logout(ctx),
        Commands::Whoami => cmd_whoami(ctx),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Writes need an admin session; the server checks again.
fn admin_session(ctx: &Context) -> Result<AuthContext, Box<dyn Error>> {
    let auth = ctx.auth();
    if auth.is_admin() {
        return Ok(auth);
    }
    let reason = match auth.session() {
        Some(s) => format!("{} is not an admin", s.user.email),
        None => "not logged in (run `odsg login --email <email>`)".to_string(),
    };
    Err(reason.into())
}

/// Ask on stderr and read y/N from stdin. `yes` skips the question.
fn confirm(prompt: &str, yes: bool) -> io::Result<bool> {
    if yes {
        return Ok(true);
    }
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn lookup_category(id: u8) -> Result<&'static category::Category, Box<dyn Error>> {
    category::by_id(id).ok_or_else(|| format!("unknown ODS id {} (expected 1-17)", id).into())
}

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

fn cmd_login(ctx: &Context, api: &dyn ContentApi, args: LoginArgs) -> Result<(), Box<dyn Error>> {
    let password = args
        .password
        .or_else(|| std::env::var(PASSWORD_ENV).ok())
        .ok_or_else(|| format!("no password given: use --password or set {}", PASSWORD_ENV))?;
    let credentials = Credentials {
        email: args.email,
        password,
    };
    let mut auth = ctx.auth();
    let session = auth.login(api, &credentials)?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&session.user)?);
    } else {
        println!("logged in as {} ({})", session.user.email, session.user.role);
    }
    Ok(())
}

fn cmd_logout(ctx: &Context) -> Result<(), Box<dyn Error>> {
    ctx.auth().logout()?;
    ctx.outcome("logged out")
}

fn cmd_whoami(ctx: &Context) -> Result<(), Box<dyn Error>> {
    let auth = ctx.auth();
    let user = auth.session().map(|s| &s.user);
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        match user {
            Some(u) => println!("{} ({})", u.email, u.role),
            None => println!("not logged in"),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Catalog and sections
// ---------------------------------------------------------------------------

fn cmd_ods(ctx: &Context) -> Result<(), Box<dyn Error>> {
    if ctx.json {
        let all: Vec<CategoryJson> = category::all().iter().map(category_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&all)?);
    } else {
        for c in category::all() {
            println!("{}", format_category_line(c));
        }
    }
    Ok(())
}

fn cmd_sections(
    ctx: &Context,
    api: &dyn ContentApi,
    args: SectionsArgs,
) -> Result<(), Box<dyn Error>> {
    let mut page = GridPage::load(api)?;
    let ids: IndexSet<u8> = args.ods.into_iter().collect();
    for id in ids {
        lookup_category(id)?;
        page.filter.toggle(id);
    }
    page.filter.apply();
    let visible = page.visible();

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }
    if visible.is_empty() {
        println!("no sections");
        return Ok(());
    }
    let blocks: Vec<String> = visible
        .iter()
        .map(|v| format_section_listing(v).join("\n"))
        .collect();
    println!("{}", blocks.join("\n\n"));
    Ok(())
}

fn cmd_section_add(
    ctx: &Context,
    api: &dyn ContentApi,
    args: SectionAddArgs,
) -> Result<(), Box<dyn Error>> {
    let category = lookup_category(args.ods_id)?;
    let auth = admin_session(ctx)?;
    let mut page = GridPage::load(api)?;
    page.add_section(api, auth.token(), category)?;
    ctx.outcome(&format!("added section \"{}\"", category.title))
}

fn cmd_section_rm(
    ctx: &Context,
    api: &dyn ContentApi,
    args: SectionRmArgs,
) -> Result<(), Box<dyn Error>> {
    let auth = admin_session(ctx)?;
    let mut page = GridPage::load(api)?;
    let name = grid::find_section(&page.sections, &args.id)
        .map(|v| v.section.name.clone())
        .ok_or_else(|| format!("no section with id {}", args.id))?;
    if !confirm(
        &format!("Delete section \"{}\" and all its projects?", name),
        args.yes,
    )? {
        return ctx.outcome("aborted");
    }
    page.delete_section(api, auth.token(), &args.id)?;
    ctx.outcome(&format!("deleted section \"{}\"", name))
}
