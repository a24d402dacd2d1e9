use anyhow::Result;
use projector_core::repository::Repository;

use crate::cli::{ProjectCommand, ProjectSubcommand};
use crate::parser::parse_due_date;
use crate::views::table::display_projects;

pub async fn project_command(repo: &impl Repository, command: ProjectCommand) -> Result<()> {
    match command.command {
        ProjectSubcommand::Add(add) => {
            let due_date = add.due.as_deref().map(parse_due_date).transpose()?;
            let project = repo.add_project(add.name, due_date).await?;
            match project.due_date.as_deref() {
                Some(due) => println!("Added project: '{}' (Due: {})", project.name, due),
                None => println!("Added project: '{}'", project.name),
            }
        }
        ProjectSubcommand::List => {
            let projects = repo.find_projects().await?;
            display_projects(&projects);
        }
        ProjectSubcommand::Delete(delete) => {
            repo.delete_project(delete.name.clone()).await?;
            println!("Deleted project: '{}'", delete.name);
        }
    }
    Ok(())
}
