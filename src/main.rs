//! Textbook Reader
//!
//! Terminal front end for the reading core: browse the library, render pages
//! with highlights, generate citations and query the study assistant.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use textbook_reader::annotations::{AnnotationDraft, AnnotationStore, HighlightColor};
use textbook_reader::assistant::{MockStudyLookup, StudyAssistant};
use textbook_reader::bibliography::{download_filename, download_text, generate_citation, CitationFormat};
use textbook_reader::config::Config;
use textbook_reader::dashboard::DashboardStats;
use textbook_reader::html::locate_text;
use textbook_reader::library::{Catalog, ContentProvider, LibraryFilter, TocLevel};
use textbook_reader::pagination::PageLayout;
use textbook_reader::reader::ReaderSession;
use textbook_reader::selection::SelectionEvent;

#[derive(Parser)]
#[command(name = "textbook-reader")]
#[command(version, about = "E-textbook reader", long_about = None)]
#[command(after_help = "EXAMPLES:
    textbook-reader library --search physics
    textbook-reader read physics-101 --page 1 --highlight Kinematics
    textbook-reader cite physics-101 --page 1 --text Velocity --format mla")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List textbooks in the library
    Library {
        /// Match title, author or subject
        #[arg(short, long, default_value = "")]
        search: String,
        /// Category name, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,
        #[arg(long)]
        json: bool,
    },
    /// Show a textbook's table of contents
    Toc {
        book: String,
        /// Page used to mark the current chapter and section
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Render pages with highlights applied
    Read {
        book: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// "single" or "spread"; defaults to the configured layout
        #[arg(short, long)]
        layout: Option<PageLayout>,
        /// Text to highlight on the current page (repeatable)
        #[arg(long = "highlight", value_name = "TEXT")]
        highlights: Vec<String>,
        #[arg(long, default_value = "yellow")]
        color: HighlightColor,
        #[arg(long)]
        json: bool,
    },
    /// Generate a citation for a quoted passage
    Cite {
        book: String,
        #[arg(short, long)]
        page: u32,
        /// The quoted text
        #[arg(short, long)]
        text: String,
        /// APA, MLA or Chicago
        #[arg(short, long, default_value = "apa")]
        format: CitationFormat,
        /// Print the downloadable file body and its name
        #[arg(long)]
        download: bool,
    },
    /// Ask the study assistant about a page or passage
    Study {
        book: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Passage to ask about; the whole page when omitted
        #[arg(short, long)]
        text: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show study statistics
    Dashboard {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "textbook_reader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    let cli = Cli::parse();
    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    let catalog = load_catalog(&config)?;

    match command {
        Command::Library {
            search,
            category,
            json,
        } => show_library(&catalog, &search, &category, json),
        Command::Toc { book, page } => show_toc(&catalog, &book, page),
        Command::Read {
            book,
            page,
            layout,
            highlights,
            color,
            json,
        } => {
            let mut settings = config.reader.clone();
            if let Some(layout) = layout {
                settings.page_layout = layout;
            }
            read(catalog, settings, &book, page, &highlights, color, json)
        }
        Command::Cite {
            book,
            page,
            text,
            format,
            download,
        } => cite(&catalog, &book, page, &text, format, download),
        Command::Study {
            book,
            page,
            text,
            json,
        } => study(catalog, &config, &book, page, text.as_deref(), json).await,
        Command::Dashboard { json } => dashboard(&catalog, json),
    }
}

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    match &config.library.catalog_path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("failed to load catalog from {}", path.display())),
        None => Catalog::bundled().context("bundled catalog is invalid"),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn show_library(catalog: &Catalog, search: &str, category: &str, json: bool) -> anyhow::Result<()> {
    let filter = LibraryFilter::new(search, category);
    let books = catalog.search(&filter);

    if json {
        let metadata: Vec<_> = books.iter().map(|b| &b.metadata).collect();
        return print_json(&metadata);
    }

    if let Some((book, progress)) = catalog.most_recent() {
        println!(
            "Continue reading: {} (page {}, {:.0}% complete)",
            book.metadata.title, progress.current_page, progress.completion_percentage
        );
        println!();
    }

    println!("Categories: {}", catalog.categories().join(", "));
    for book in &books {
        let meta = &book.metadata;
        println!("{:<16} {} ({})", meta.id, meta.title, meta.author);
        println!("{:<16} {} | {} | {} pages", "", meta.subject, meta.edition, meta.total_pages);
    }
    if books.is_empty() {
        println!("No textbooks found");
    }
    Ok(())
}

fn show_toc(catalog: &Catalog, book_id: &str, page: u32) -> anyhow::Result<()> {
    let book = catalog.require(book_id)?;
    println!("{}", book.metadata.title);

    for entry in textbook_reader::library::table_of_contents(book, page) {
        let marker = if entry.is_current { ">" } else { " " };
        let indent = match entry.level {
            TocLevel::Chapter => "",
            TocLevel::Section => "    ",
        };
        println!(
            "{} {}{} (pp. {}-{})",
            marker, indent, entry.title, entry.start_page, entry.end_page
        );
    }
    Ok(())
}

fn read(
    catalog: Catalog,
    settings: textbook_reader::reader::ReadingSettings,
    book_id: &str,
    page: u32,
    highlights: &[String],
    color: HighlightColor,
    json: bool,
) -> anyhow::Result<()> {
    let store = AnnotationStore::new();
    let mut session = ReaderSession::open(Arc::new(catalog), store, book_id, settings)?;
    if !session.go_to_page(page) && session.current_page() != page {
        anyhow::bail!("page {} is outside 1-{}", page, session.metadata().total_pages);
    }

    for text in highlights {
        if session.handle_selection(&SelectionEvent::on_page(page, text)) {
            session.highlight_selection(color);
        }
    }

    let view = session.render();
    if json {
        return print_json(&view);
    }

    println!("{}", view.header.title);
    println!("{}", view.header.subtitle());
    println!();
    println!("--- page {} ---", view.left.page_number);
    println!("{}", view.left.html);
    if let Some(right) = &view.right {
        println!("--- page {} ---", right.page_number);
        println!("{}", right.html);
    }
    Ok(())
}

fn cite(
    catalog: &Catalog,
    book_id: &str,
    page: u32,
    text: &str,
    format: CitationFormat,
    download: bool,
) -> anyhow::Result<()> {
    let book = catalog.require(book_id)?;
    let mut draft = AnnotationDraft::highlight(book_id, page, text.trim(), HighlightColor::default());
    if let Some((start, end)) = catalog
        .page_content(book_id, page)
        .and_then(|html| locate_text(html, text.trim()))
    {
        draft = draft.at_offsets(start, end);
    }
    let annotation = textbook_reader::annotations::Annotation::from_draft(draft);

    let citation = generate_citation(&book.metadata, &annotation, format)?;
    if download {
        let today = chrono::Local::now().date_naive();
        println!("{}", download_filename(&book.metadata, page));
        println!();
        println!("{}", download_text(&citation, &annotation.selected_text, today));
    } else {
        println!("{}", citation);
    }
    Ok(())
}

async fn study(
    catalog: Catalog,
    config: &Config,
    book_id: &str,
    page: u32,
    text: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = ReaderSession::open(
        Arc::new(catalog),
        AnnotationStore::new(),
        book_id,
        config.reader.clone(),
    )?;
    session.go_to_page(page);
    if let Some(text) = text {
        session.handle_selection(&SelectionEvent::on_page(session.current_page(), text));
    }

    let assistant = StudyAssistant::new(Arc::new(MockStudyLookup::from_config(&config.assistant)));
    assistant.open_with_context(session.study_context()).await;
    let state = assistant.state();

    if json {
        return print_json(&state);
    }

    if let Some(error) = &state.error {
        anyhow::bail!("{}", error);
    }
    if let Some(explanation) = &state.ai_explanation {
        println!("{}", explanation.topic);
        println!("{}", explanation.explanation);
        println!("Key terms: {}", explanation.key_terms.join(", "));
        println!();
    }
    for resource in &state.related_resources {
        println!(
            "[{:.0}%] {} - {}",
            resource.relevance_score * 100.0,
            resource.title,
            resource.description
        );
    }
    Ok(())
}

fn dashboard(catalog: &Catalog, json: bool) -> anyhow::Result<()> {
    let stats = DashboardStats::compute(catalog.textbooks(), catalog.all_progress(), &[], &[], &[]);

    if json {
        return print_json(&stats);
    }

    let (hours, minutes) = stats.reading_time_split();
    println!("Reading time: {}h {}m", hours, minutes);
    println!(
        "Books in progress: {} ({:.0}% average completion)",
        stats.books_in_progress, stats.average_completion
    );
    println!(
        "Annotations: {} ({} highlights, {} notes)",
        stats.total_annotations, stats.highlight_count, stats.note_count
    );
    println!("Flashcards: {}", stats.flashcard_count);
    println!("Recently read:");
    for book in &stats.recently_read {
        println!("  {} by {}", book.metadata.title, book.metadata.author);
    }
    Ok(())
}
