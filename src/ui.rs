use std::{fmt::Write, future::Future, time::Duration};

use async_trait::async_trait;
use colored::Colorize;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use itertools::Itertools;
use resumex_lib::upload::{CandidateFile, UploadProgress};
use resumex_proto::dto::ResumeDto;

const PROGRESS_BAR_NO_NERD_TICK_CHARS: &'static str = "+x*";

pub struct UploadProgressBar {
    pb: ProgressBar,
}

impl UploadProgressBar {
    pub fn new(file: &CandidateFile, use_nerd_fonts: bool) -> Self {
        let mut style = ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{msg}] [{bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})",
        )
        .unwrap()
        .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
            write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap()
        })
        .progress_chars("#>-");
        if !use_nerd_fonts {
            style = style.tick_chars(PROGRESS_BAR_NO_NERD_TICK_CHARS);
        }
        let pb = ProgressBar::new(file.size)
            .with_style(style)
            .with_message(file.file_name.clone());
        Self { pb }
    }

    pub fn update(&mut self, progress: UploadProgress) {
        self.pb.set_position(progress.position);
        if progress.finish {
            self.pb.finish();
        }
    }
}

#[async_trait]
pub trait InteractiveUI {
    async fn show_loading<T>(&self, message: String, task: T) -> T::Output
    where
        T: Future + Send + 'static,
        T::Output: Send + 'static;

    fn print_candidate(&self, file: &CandidateFile);

    fn print_resumes(&self, resumes: &[ResumeDto]);

    fn print_resume(&self, resume: &ResumeDto);

    fn print_error(&self, message: &str);

    fn confirm_delete(&self) -> bool;

    fn ask_retry(&self) -> bool;
}

#[derive(Clone)]
pub struct PromptUI {
    pub use_nerd_fonts: bool,
}

impl Default for PromptUI {
    fn default() -> Self {
        Self {
            use_nerd_fonts: true,
        }
    }
}

#[async_trait]
impl InteractiveUI for PromptUI {
    async fn show_loading<T>(&self, message: String, task: T) -> T::Output
    where
        T: Future + Send + 'static,
        T::Output: Send + 'static,
    {
        let mut style = ProgressStyle::default_spinner();
        if !self.use_nerd_fonts {
            style = style.tick_chars(PROGRESS_BAR_NO_NERD_TICK_CHARS);
        }
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_message(message);
        pb.set_style(style);
        let l = pb.clone();
        let timer = tokio::spawn(async move {
            loop {
                l.inc(1);
                tokio::time::sleep(Duration::from_millis(64)).await;
            }
        });
        let output = task.await;
        pb.finish_and_clear();
        timer.abort();
        output
    }

    fn print_candidate(&self, file: &CandidateFile) {
        println!(
            "{}{} ({})",
            self.file_icon(),
            file.file_name.bold(),
            humansize::format_size(file.size, humansize::DECIMAL)
        );
    }

    fn print_resumes(&self, resumes: &[ResumeDto]) {
        if resumes.is_empty() {
            println!("No resumes found. Upload your first resume to get started!");
            return;
        }

        let mut table = Table::new();
        table.set_header(vec!["Id", "Name", "Email", "Phone", "Skills"]);
        for resume in resumes {
            table.add_row(vec![
                &resume.id,
                &resume.name,
                &resume.email,
                &resume.phone,
                &resume.skills.join(", "),
            ]);
        }
        println!("{}", table);

        let skills = resumes
            .iter()
            .flat_map(|resume| resume.skills.iter())
            .unique()
            .sorted()
            .join(", ");
        if !skills.is_empty() {
            println!("{} {}", "Known skills:".dimmed(), skills);
        }
    }

    fn print_resume(&self, resume: &ResumeDto) {
        println!("{}", resume.name.bold());
        println!("Email: {}", resume.email);
        println!("Phone: {}", resume.phone);
        if let Some(uploaded_at) = &resume.uploaded_at {
            println!("Uploaded: {}", uploaded_at);
        }
        if !resume.skills.is_empty() {
            println!("Skills: {}", resume.skills.join(", "));
        }
        for experience in &resume.experience {
            println!();
            println!(
                "{} @ {} {}",
                experience.role.bold(),
                experience.company,
                experience.duration.dimmed()
            );
            if !experience.description.is_empty() {
                println!("  {}", experience.description);
            }
        }
    }

    fn print_error(&self, message: &str) {
        println!("{}", message.bold().red());
    }

    fn confirm_delete(&self) -> bool {
        inquire::Confirm::new("Are you sure you want to delete this resume?")
            .with_default(false)
            .prompt_skippable()
            .is_ok_and(|r| r == Some(true))
    }

    fn ask_retry(&self) -> bool {
        inquire::Confirm::new("Do you want to retry the upload?")
            .with_default(true)
            .with_help_message("enter to retry, other to cancel")
            .with_parser(&|s| Ok(s == "y" || s == "Y"))
            .prompt_skippable()
            .is_ok_and(|r| r == Some(true))
    }
}

impl PromptUI {
    fn file_icon(&self) -> &'static str {
        if self.use_nerd_fonts {
            "󰈧 "
        } else {
            ""
        }
    }
}
