//! Terminal browser: renders pages as text and plays the voice assistant
//! through stdout and typed replies.

use crate::catalog::print_summary;
use crate::infra::build_backend;
use ability_jobs::config::AppConfig;
use ability_jobs::error::AppError;
use ability_jobs::jobs::{
    ApplicationSubmission, DisabilityFilter, JobBoardBackend, JobId, ResumeFile, ALL,
};
use ability_jobs::pages::views::{about_view, home_view, DetailView, ListingView, StaticPageView};
use ability_jobs::pages::{JobBoardApp, Loadable, PageView, Route};
use ability_jobs::voice::{
    RecognitionSettings, SpeechCapabilities, SpeechError, SpeechRecognizer, SpeechSynthesizer,
    Utterance, VoiceSession,
};
use async_trait::async_trait;
use clap::Args;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[derive(Args, Debug, Default)]
pub(crate) struct BrowseArgs {
    /// Enable the console voice assistant (spoken text is printed, replies are typed)
    #[arg(long)]
    pub(crate) voice: bool,
    /// Skip the first-load voice assistant prompt
    #[arg(long)]
    pub(crate) skip_welcome: bool,
}

type SharedInput = Arc<Mutex<Lines<BufReader<Stdin>>>>;

/// Prints utterances instead of playing audio.
pub(crate) struct ConsoleSynthesizer;

#[async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    fn cancel(&self) {}

    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        println!("[voice] {}", utterance.text);
        Ok(())
    }
}

/// Treats the next typed line as the recognized phrase.
pub(crate) struct ConsoleRecognizer {
    input: SharedInput,
}

#[async_trait]
impl SpeechRecognizer for ConsoleRecognizer {
    async fn recognize(&self, settings: &RecognitionSettings) -> Result<String, SpeechError> {
        debug!(locale = %settings.locale, "waiting for a typed reply");
        let mut input = self.input.lock().await;
        match input.next_line().await {
            Ok(Some(line)) => Ok(line.trim().to_string()),
            Ok(None) => Err(SpeechError::Recognition("input closed".to_string())),
            Err(err) => Err(SpeechError::Recognition(err.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BrowseCommand {
    Go(Route),
    Search(String),
    Category(Option<String>),
    Disability(Option<DisabilityFilter>),
    Voice,
    Listen,
    Apply,
    Close,
    Submit,
    Show,
    Help,
    Quit,
    Invalid(String),
}

pub(crate) fn parse_command(line: &str) -> BrowseCommand {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match verb.to_lowercase().as_str() {
        "home" => BrowseCommand::Go(Route::Home),
        "jobs" | "back" => BrowseCommand::Go(Route::Jobs),
        "about" => BrowseCommand::Go(Route::About),
        "job" if !rest.is_empty() => BrowseCommand::Go(Route::JobDetail(JobId::from(rest))),
        "go" | "open" if !rest.is_empty() => BrowseCommand::Go(Route::parse(rest)),
        "search" => BrowseCommand::Search(rest.to_string()),
        "category" => BrowseCommand::Category(
            Some(rest)
                .filter(|value| !value.is_empty() && *value != ALL)
                .map(str::to_string),
        ),
        "disability" if rest.is_empty() || rest.eq_ignore_ascii_case(ALL) => {
            BrowseCommand::Disability(None)
        }
        "disability" => match DisabilityFilter::from_id(rest) {
            Some(filter) => BrowseCommand::Disability(Some(filter)),
            None => BrowseCommand::Invalid(format!("unknown disability filter '{rest}'")),
        },
        "voice" => BrowseCommand::Voice,
        "listen" => BrowseCommand::Listen,
        "apply" => BrowseCommand::Apply,
        "close" => BrowseCommand::Close,
        "submit" => BrowseCommand::Submit,
        "" | "show" => BrowseCommand::Show,
        "help" => BrowseCommand::Help,
        "quit" | "exit" => BrowseCommand::Quit,
        _ => BrowseCommand::Invalid(format!("unknown command '{line}'")),
    }
}

pub(crate) async fn run_browse(args: BrowseArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let backend = build_backend(&config.backend)?;
    let input: SharedInput = Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()));

    let capabilities = if args.voice {
        SpeechCapabilities::new(
            Arc::new(ConsoleSynthesizer),
            Arc::new(ConsoleRecognizer {
                input: input.clone(),
            }),
        )
    } else {
        SpeechCapabilities::none()
    };
    let session = Arc::new(VoiceSession::new(capabilities, config.voice.clone()));
    watch_activity(&session);

    let app = JobBoardApp::new(backend, session.clone());
    let first_load = if args.voice && !args.skip_welcome {
        session.start_first_load()
    } else {
        None
    };

    app.navigate(Route::Home).await;
    render(&app.view());

    if let Some(handle) = first_load {
        match handle.await {
            Ok(outcome) => debug!(?outcome, "welcome prompt finished"),
            Err(err) => warn!(error = %err, "welcome prompt task failed"),
        }
    }
    print_help();

    loop {
        let line = input.lock().await.next_line().await?;
        let Some(line) = line else {
            break;
        };

        match parse_command(&line) {
            BrowseCommand::Go(route) => {
                app.navigate(route).await;
                render(&app.view());
            }
            BrowseCommand::Search(text) => refine(&app, app.set_query(text)),
            BrowseCommand::Category(category) => refine(&app, app.set_category(category)),
            BrowseCommand::Disability(filter) => refine(&app, app.set_disability(filter)),
            BrowseCommand::Voice => {
                let on = app.toggle_voice().await;
                println!("Voice mode {}", if on { "on" } else { "off" });
            }
            BrowseCommand::Listen => match app.voice_search().await {
                Some(transcript) => {
                    println!("Searching for \"{transcript}\"");
                    render(&app.view());
                }
                None => println!("Voice search needs voice mode on the jobs page."),
            },
            BrowseCommand::Apply => {
                if app.open_application() {
                    println!("Application form open. Type `submit` to fill it in.");
                } else {
                    println!("Open a job first.");
                }
            }
            BrowseCommand::Close => {
                app.close_application();
            }
            BrowseCommand::Submit => submit(&app, &input).await?,
            BrowseCommand::Show => render(&app.view()),
            BrowseCommand::Help => print_help(),
            BrowseCommand::Quit => break,
            BrowseCommand::Invalid(message) => println!("{message}. Type `help` for commands."),
        }
    }

    Ok(())
}

fn watch_activity(session: &VoiceSession) {
    let mut activity = session.subscribe();
    tokio::spawn(async move {
        while activity.changed().await.is_ok() {
            let current = *activity.borrow_and_update();
            if let Some(label) = current.indicator() {
                println!("({label})");
            }
        }
    });
}

fn refine<B: JobBoardBackend + ?Sized>(app: &JobBoardApp<B>, applied: bool) {
    if applied {
        render(&app.view());
    } else {
        println!("Filters only apply on the jobs page.");
    }
}

async fn submit<B: JobBoardBackend + ?Sized>(
    app: &JobBoardApp<B>,
    input: &SharedInput,
) -> Result<(), AppError> {
    let job_id = match app.view() {
        PageView::Detail(page) if page.application_open => page.id,
        _ => {
            println!("Type `apply` on a job page first.");
            return Ok(());
        }
    };

    let applicant_name = ask(input, "Full name *").await?;
    let applicant_email = ask(input, "Email *").await?;
    let cover_letter = ask(input, "Cover letter (optional)").await?;
    let resume_path = ask(input, "Resume file path (optional)").await?;

    let resume = if resume_path.is_empty() {
        None
    } else {
        match load_resume(Path::new(&resume_path)).await {
            Ok(file) => Some(file),
            Err(err) => {
                println!("Could not read {resume_path}: {err}");
                return Ok(());
            }
        }
    };

    let submission = ApplicationSubmission {
        job_id,
        applicant_name,
        applicant_email,
        cover_letter: Some(cover_letter),
        resume,
    };

    match app.submit_application(submission).await {
        Ok(_) => println!("Application submitted! We will get back to you soon."),
        Err(err) => println!("Error submitting application: {err}"),
    }
    Ok(())
}

async fn ask(input: &SharedInput, label: &str) -> Result<String, AppError> {
    println!("{label}:");
    let line = input.lock().await.next_line().await?;
    Ok(line.unwrap_or_default().trim().to_string())
}

pub(crate) async fn load_resume(path: &Path) -> std::io::Result<ResumeFile> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
    let content_type = mime_guess::from_path(path)
        .first_raw()
        .map(str::to_string);

    Ok(ResumeFile {
        file_name,
        content_type,
        bytes,
    })
}

fn print_help() {
    println!("Commands: home | jobs | about | job <id> | go <path> | back");
    println!("          search <text> | category <name|all> | disability <visual|deaf|mobility|cognitive|all>");
    println!("          voice | listen | apply | submit | close | show | help | quit");
}

fn render(view: &PageView) {
    match view {
        PageView::Home => render_static(&home_view()),
        PageView::About => render_static(&about_view()),
        PageView::NotFound { path } => {
            println!("\nPage not found: {path}");
            println!("Return to / to start over.");
        }
        PageView::Listing(page) => match &page.jobs {
            Loadable::Loading => println!("\nLoading jobs..."),
            Loadable::Failed(message) => println!("\n{message}"),
            Loadable::NotFound => println!("\nNo jobs found."),
            Loadable::Ready(_) => {
                let listing = ListingView::from_page(page);
                println!("\nFind Jobs: showing {} of {}", listing.shown, listing.total);
                println!(
                    "Search \"{}\" | category {} | disability {}",
                    listing.query.q, listing.query.category, listing.query.disability
                );
                println!("Categories: {}", listing.categories.join(", "));
                if listing.jobs.is_empty() {
                    println!("No jobs match your filters.");
                }
                for job in listing.jobs {
                    print_summary(job);
                }
            }
        },
        PageView::Detail(page) => match &page.job {
            Loadable::Loading => println!("\nLoading job..."),
            Loadable::NotFound => println!("\nJob not found. Type `back` to return to the jobs list."),
            Loadable::Failed(message) => println!("\n{message}"),
            Loadable::Ready(job) => {
                let detail = DetailView::new(job);
                println!("\n{} at {}", job.title, job.company);
                println!(
                    "{} | {} | posted {}",
                    job.location, detail.job_type, detail.posted_on
                );
                if let Some(salary) = &job.salary_range {
                    println!("Salary: {salary}");
                }
                if !job.description.is_empty() {
                    println!("{}", job.description);
                }
                for requirement in &job.requirements {
                    println!("  * {requirement}");
                }
                if !job.accessibility_features.is_empty() {
                    println!("Accessibility: {}", job.accessibility_features.join(", "));
                }
                if page.application_open {
                    println!("Application form open. Type `submit` to fill it in.");
                } else {
                    println!("Type `apply` to apply or `back` to return.");
                }
            }
        },
    }
}

fn render_static(view: &StaticPageView) {
    println!("\n{}", view.title);
    println!("{}", view.summary);
    for highlight in view.highlights {
        println!("- {}: {}", highlight.title, highlight.description);
    }
    let links: Vec<&str> = view.links.iter().map(|link| link.path).collect();
    println!("Go to: {}", links.join(", "));
}
