use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use itertools::Itertools;
use resumex_lib::{
    client::ApiClient,
    upload::{CandidateFile, UploadFlow, UploadProgress},
};
use resumex_proto::{dto::ResumeDto, DEFAULT_BASE_URL};
use simple_logger::SimpleLogger;

use crate::ui::{InteractiveUI, PromptUI, UploadProgressBar};

mod ui;

#[derive(Parser)]
struct Args {
    /// Base URL of the resume API server
    #[arg(long, env = "RESUME_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Do not use nerd fonts
    #[arg(long)]
    no_nerd: bool,

    #[clap(subcommand)]
    cmd: SubCommand,
}

#[derive(clap::Subcommand)]
enum SubCommand {
    /// Upload a resume PDF for parsing
    Upload(UploadArgs),
    /// List parsed resumes
    List(ListArgs),
    /// Show one resume in detail
    Show(ShowArgs),
    /// Delete a resume
    Delete(DeleteArgs),
    /// Export a parsed resume as JSON
    Export(ExportArgs),
}

#[derive(Parser)]
struct UploadArgs {
    /// Path of the PDF file to upload
    file: PathBuf,
}

#[derive(Parser)]
struct ListArgs {
    /// Match against name, email, phone or skills
    #[arg(long)]
    search: Option<String>,

    /// Only show resumes having this skill, repeatable
    #[arg(long = "tag")]
    tags: Vec<String>,
}

#[derive(Parser)]
struct ShowArgs {
    /// Resume id
    id: String,
}

#[derive(Parser)]
struct DeleteArgs {
    /// Resume id
    id: String,

    /// Do not ask for confirmation
    #[arg(long, short)]
    yes: bool,
}

#[derive(Parser)]
struct ExportArgs {
    /// Resume id
    id: String,

    /// Destination file
    #[arg(long, short, default_value = "resume.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .expect("Failed to init logger");

    let args: Args = Args::parse();

    let client = ApiClient::new(&args.api_url);
    let mut ui = PromptUI::default();
    ui.use_nerd_fonts = !args.no_nerd;

    match args.cmd {
        SubCommand::Upload(upload_args) => run_upload(&ui, &client, upload_args).await?,
        SubCommand::List(list_args) => {
            let resumes = fetch_resumes(&ui, &client).await;
            let tags = list_args.tags.iter().unique().cloned().collect_vec();
            let resumes = filter_resumes(resumes, &list_args.search, &tags);
            ui.print_resumes(&resumes);
        }
        SubCommand::Show(show_args) => {
            let task_client = client.clone();
            let result = ui
                .show_loading("Loading".to_string(), async move {
                    task_client.get_resume(show_args.id).await
                })
                .await;
            match result {
                Ok(resume) => ui.print_resume(&resume),
                Err(e) => fetch_failed("Error fetching resume details", e),
            }
        }
        SubCommand::Delete(delete_args) => {
            if !delete_args.yes && !ui.confirm_delete() {
                return Ok(());
            }
            match client.delete_resume(&delete_args.id).await {
                Ok(()) => println!("{}", "Resume deleted".green()),
                Err(e) => fetch_failed("Error deleting resume", e),
            }
        }
        SubCommand::Export(export_args) => {
            let task_client = client.clone();
            let result = ui
                .show_loading("Loading".to_string(), async move {
                    task_client.get_resume(export_args.id).await
                })
                .await;
            match result {
                Ok(resume) => {
                    let json = serde_json::to_string_pretty(&resume)?;
                    tokio::fs::write(&export_args.output, json).await?;
                    println!(
                        "Exported resume {} to {}",
                        resume.id.bold(),
                        export_args.output.display()
                    );
                }
                Err(e) => fetch_failed("Error fetching resume details", e),
            }
        }
    }

    Ok(())
}

async fn run_upload(ui: &PromptUI, client: &ApiClient, args: UploadArgs) -> anyhow::Result<()> {
    let mut flow = UploadFlow::new();
    flow.on_upload_success(|id| log::info!("Resume uploaded successfully with ID: {}", id));

    let file = CandidateFile::from_path(&args.file)?;
    if !flow.select(file) {
        if let Some(reason) = flow.error() {
            ui.print_error(reason);
        }
        std::process::exit(1);
    }

    loop {
        let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<UploadProgress>(100);
        {
            let file = match flow.selected_file() {
                Some(file) => file,
                None => break,
            };
            ui.print_candidate(file);

            let mut pb = UploadProgressBar::new(file, ui.use_nerd_fonts);
            tokio::spawn(async move {
                while let Some(progress) = progress_rx.recv().await {
                    pb.update(progress);
                }
            });
        }

        match flow.upload(client, progress_tx).await {
            Ok(id) => {
                println!("{} {}", "Uploaded resume".green(), id.bold());
                // back to the list view, like the web client after an upload
                let resumes = fetch_resumes(ui, client).await;
                ui.print_resumes(&resumes);
                break;
            }
            Err(_) => {
                if let Some(message) = flow.error() {
                    ui.print_error(message);
                }
                if !ui.ask_retry() {
                    flow.remove();
                    break;
                }
            }
        }
    }

    Ok(())
}

async fn fetch_resumes(ui: &PromptUI, client: &ApiClient) -> Vec<ResumeDto> {
    let task_client = client.clone();
    let result = ui
        .show_loading("Loading".to_string(), async move {
            task_client.list_resumes().await
        })
        .await;
    match result {
        Ok(resumes) => resumes,
        Err(e) => fetch_failed("Error fetching resumes", e),
    }
}

fn fetch_failed(context: &str, error: resumex_lib::Error) -> ! {
    log::error!("{}: {}", context, error);
    std::process::exit(1)
}

fn filter_resumes(
    resumes: Vec<ResumeDto>,
    search: &Option<String>,
    tags: &[String],
) -> Vec<ResumeDto> {
    resumes
        .into_iter()
        .filter(|resume| matches_search(resume, search) && matches_tags(resume, tags))
        .collect()
}

fn matches_search(resume: &ResumeDto, search: &Option<String>) -> bool {
    let term = match search {
        Some(term) => term.to_lowercase(),
        None => return true,
    };
    resume.name.to_lowercase().contains(&term)
        || resume.email.to_lowercase().contains(&term)
        || resume.phone.to_lowercase().contains(&term)
        || resume
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(&term))
}

fn matches_tags(resume: &ResumeDto, tags: &[String]) -> bool {
    tags.is_empty() || resume.skills.iter().any(|skill| tags.contains(skill))
}

#[cfg(test)]
mod tests {
    use resumex_proto::dto::ResumeDto;

    use super::filter_resumes;

    fn resume(name: &str, email: &str, skills: &[&str]) -> ResumeDto {
        ResumeDto {
            id: name.to_lowercase(),
            name: name.to_string(),
            email: email.to_string(),
            phone: "+1 555 0100".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience: vec![],
            uploaded_at: None,
            tags: vec![],
        }
    }

    fn fixture() -> Vec<ResumeDto> {
        vec![
            resume("Jane", "jane@example.com", &["Python", "React"]),
            resume("John", "john@example.com", &["Java"]),
        ]
    }

    #[test]
    pub fn test_search_matches_skills_case_insensitive() {
        let filtered = filter_resumes(fixture(), &Some("python".to_string()), &[]);
        assert_eq!(1, filtered.len());
        assert_eq!("Jane", filtered[0].name);
    }

    #[test]
    pub fn test_tags_require_exact_skill() {
        let filtered = filter_resumes(fixture(), &None, &["Java".to_string()]);
        assert_eq!(1, filtered.len());
        assert_eq!("John", filtered[0].name);
    }

    #[test]
    pub fn test_no_filters_keep_everything() {
        assert_eq!(2, filter_resumes(fixture(), &None, &[]).len());
    }
}
