use clap::{Parser, Subcommand};
use projector_core::models::{OccurrenceStatus, RepeatInterval};

/// Track projects and occurrences that repeat themselves when completed
#[derive(Parser, Debug)]
#[command(name = "projector", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create the database and apply migrations
    Init,
    /// Add a new occurrence
    Add(AddCommand),
    /// List occurrences
    List(ListCommand),
    /// Mark an occurrence as done and continue its chain
    Do(DoCommand),
    /// Show an occurrence with the chain that led to it
    Show(ShowCommand),
    /// Delete an occurrence
    Delete(DeleteCommand),
    /// Manage projects
    Project(ProjectCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The name of the occurrence
    pub name: String,
    /// A free-form note
    #[clap(short, long)]
    pub note: Option<String>,
    /// Due date: YYYY-MM-DD or natural language ("next friday")
    #[clap(short, long)]
    pub due: Option<String>,
    /// The project the occurrence belongs to
    #[clap(short, long)]
    pub project: Option<String>,
    /// Repeat interval (minute, hour, day, week, month, year)
    #[clap(long, requires = "times")]
    pub every: Option<RepeatInterval>,
    /// Weekdays for weekly repeats (e.g. "mon,wed,fri" or "M,W,F")
    #[clap(long, requires = "every")]
    pub on: Option<String>,
    /// How many more times the occurrence repeats
    #[clap(long, requires = "every")]
    pub times: Option<u32>,
    /// Last date a repeat may fall on (YYYY-MM-DD)
    #[clap(long, requires = "every")]
    pub until: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Only show occurrences with this status (pending, done)
    #[clap(short, long)]
    pub status: Option<OccurrenceStatus>,
    /// Only show occurrences of this project
    #[clap(short, long)]
    pub project: Option<String>,
    /// Print JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoCommand {
    /// The ID (or unique prefix) of the occurrence to complete
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID (or unique prefix) of the occurrence
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID (or unique prefix) of the occurrence to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectSubcommand {
    /// Add a new project
    Add(AddProjectCommand),
    /// List projects
    List,
    /// Delete a project
    Delete(DeleteProjectCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddProjectCommand {
    /// The name of the project
    pub name: String,
    /// Due date: YYYY-MM-DD or natural language ("next friday")
    #[clap(short, long)]
    pub due: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteProjectCommand {
    /// The name of the project to delete
    pub name: String,
}
