use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "odsg", about = concat!("odsgrid v", env!("CARGO_PKG_VERSION"), " - ODS project showcase from the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Content API base URL (overrides config and $ODSG_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Use a different config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List the 17 ODS categories
    Ods,
    /// List sections with their projects
    Sections(SectionsArgs),
    /// Add or remove a section
    Section(SectionCmd),
    /// Add, edit, remove or show a project
    Project(ProjectCmd),
    /// Manage a project's impact records
    Impact(ImpactCmd),
    /// Manage a project's research records
    Research(ResearchCmd),
    /// Show or edit configuration
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,
    /// Password (default: $ODSG_PASSWORD)
    #[arg(long)]
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct SectionsArgs {
    /// Only sections for these ODS ids (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub ods: Vec<u8>,
}

#[derive(Args)]
pub struct SectionCmd {
    #[command(subcommand)]
    pub action: SectionAction,
}

#[derive(Subcommand)]
pub enum SectionAction {
    /// Add the section for an ODS category
    Add(SectionAddArgs),
    /// Delete a section
    Rm(SectionRmArgs),
}

#[derive(Args)]
pub struct SectionAddArgs {
    /// ODS id (1-17)
    pub ods_id: u8,
}

#[derive(Args)]
pub struct SectionRmArgs {
    /// Section id
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ProjectCmd {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project in a section
    Add(ProjectAddArgs),
    /// Update a project
    Edit(ProjectEditArgs),
    /// Delete a project
    Rm(ProjectRmArgs),
    /// Show a project with its impact and research
    Show(ProjectShowArgs),
}

#[derive(Args)]
pub struct ProjectAddArgs {
    /// Section id
    #[arg(long)]
    pub section: String,
    #[arg(long)]
    pub title: String,
    /// Category label (default: the section name)
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: String,
    /// Image file to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Args)]
pub struct ProjectEditArgs {
    /// Project id
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Replace the image with this file
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Args)]
pub struct ProjectRmArgs {
    /// Project id
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args)]
pub struct ProjectShowArgs {
    /// Project id
    pub id: String,
}

// ---------------------------------------------------------------------------
// Impact and research
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ImpactCmd {
    #[command(subcommand)]
    pub action: ImpactAction,
}

#[derive(Subcommand)]
pub enum ImpactAction {
    /// List impact records
    List(ProjectRef),
    /// Add an impact record
    Add(ImpactAddArgs),
    /// Update an impact record
    Edit(ImpactEditArgs),
    /// Delete an impact record
    Rm(RecordRmArgs),
}

#[derive(Args)]
pub struct ProjectRef {
    /// Project id
    pub project: String,
}

#[derive(Args)]
pub struct ImpactAddArgs {
    /// Project id
    pub project: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    /// Image file to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImpactEditArgs {
    /// Project id
    pub project: String,
    /// Record id
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Args)]
pub struct RecordRmArgs {
    /// Project id
    pub project: String,
    /// Record id
    pub id: i64,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args)]
pub struct ResearchCmd {
    #[command(subcommand)]
    pub action: ResearchAction,
}

#[derive(Subcommand)]
pub enum ResearchAction {
    /// List research records
    List(ProjectRef),
    /// Add a research record
    Add(ResearchAddArgs),
    /// Update a research record
    Edit(ResearchEditArgs),
    /// Delete a research record
    Rm(RecordRmArgs),
}

#[derive(Args)]
pub struct ResearchAddArgs {
    /// Project id
    pub project: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub link: String,
    /// Copyright holder (default: CC)
    #[arg(long)]
    pub copyright: Option<String>,
}

#[derive(Args)]
pub struct ResearchEditArgs {
    /// Project id
    pub project: String,
    /// Record id
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub link: Option<String>,
    #[arg(long)]
    pub copyright: Option<String>,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Set a key in config.toml (e.g. api_url, ui.card_width, ui.colors.highlight)
    Set(ConfigSetArgs),
    /// Print the config file path
    Path,
}

#[derive(Args)]
pub struct ConfigSetArgs {
    pub key: String,
    pub value: String,
}
