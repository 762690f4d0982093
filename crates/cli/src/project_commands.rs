use {
    anyhow::{Result, bail},
    clap::Subcommand,
    monster_projects::{Novel, NovelId, ProjectSession},
};

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List projects, marking the active one.
    List,
    /// Show the active project, restoring it from storage if needed.
    Current,
    /// Create a project and make it active.
    Create {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Novel type forwarded to the server as-is.
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Make a project active.
    Select { id: String },
    /// Forget the active project.
    Clear,
    /// Delete a project on the server.
    Delete { id: String },
}

pub async fn handle_projects(session: &ProjectSession, action: ProjectAction) -> Result<()> {
    match action {
        ProjectAction::List => {
            session.load_projects().await;
            let projects = session.projects();
            if projects.is_empty() {
                println!("No projects.");
                return Ok(());
            }
            let current = session.current_project();
            for novel in &projects {
                let active = current.as_ref().is_some_and(|c| c.id.same_as(&novel.id));
                println!("{} {}", if active { "*" } else { " " }, describe(novel));
            }
        },
        ProjectAction::Current => {
            session.load_projects().await;
            match session.current_project() {
                Some(novel) => println!("{}", describe(&novel)),
                None => println!("No active project."),
            }
        },
        ProjectAction::Create {
            title,
            description,
            kind,
        } => {
            let novel = session
                .create_project(&title, &description, kind.as_deref())
                .await?;
            println!("Created and selected {}", describe(&novel));
        },
        ProjectAction::Select { id } => {
            session.load_projects().await;
            let novel = session.select_project_by_id(&id)?;
            println!("Selected {}", describe(&novel));
        },
        ProjectAction::Clear => {
            session.clear_project()?;
            println!("Cleared active project.");
        },
        ProjectAction::Delete { id } => {
            session.load_projects().await;
            let target = delete_target(&session.projects(), &id);
            if !session.delete_project(&target).await {
                bail!("failed to delete project {target}");
            }
            println!("Deleted project {target}.");
        },
    }

    Ok(())
}

/// The id as the server typed it when the novel is loaded, else the raw
/// argument as a string id.
fn delete_target(projects: &[Novel], id: &str) -> NovelId {
    projects
        .iter()
        .find(|n| n.id.matches(id))
        .map(|n| n.id.clone())
        .unwrap_or_else(|| NovelId::from(id))
}

fn describe(novel: &Novel) -> String {
    let mut line = format!("[{}] {}", novel.id, novel.title);
    if let Some(kind) = novel.kind_text() {
        line.push_str(&format!(" ({kind})"));
    }
    if let Some(description) = novel.description_text().filter(|d| !d.is_empty()) {
        line.push_str(" — ");
        line.push_str(description);
    }
    line
}
