mod db;
mod fetch;
mod parser;
mod pipeline;
mod prompt;

use std::future::Future;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "book_shelf", about = "Save books of a chosen star rating from books.toscrape.com")]
struct Cli {
    /// Directory holding data/book_list.db. Defaults to the crate root as it
    /// was when the binary was built, so pass this when running a copied binary.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the book table if missing and print the database path
    Init,
    /// Fetch the catalog page and store every book with the chosen rating
    Run {
        /// Catalog page to fetch
        #[arg(long, default_value = fetch::CATALOG_URL)]
        url: String,
        /// Star rating to keep (1..5); prompts on stdin when omitted
        #[arg(short, long, value_parser = rating_arg)]
        rating: Option<u8>,
    },
    /// Show stored books
    List {
        /// Only books with this rating
        #[arg(short, long, value_parser = rating_arg)]
        rating: Option<u8>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

fn rating_arg(s: &str) -> Result<u8, String> {
    prompt::parse_rating(s).map_err(|e| e.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let base_dir = cli
        .data_dir
        .unwrap_or_else(|| PathBuf::from(db::DEFAULT_BASE_DIR));

    let command = cli.command.unwrap_or(Commands::Run {
        url: fetch::CATALOG_URL.to_string(),
        rating: None,
    });

    match command {
        Commands::Init => {
            let path = db::db_path(&base_dir)?;
            let conn = db::connect(&path)?;
            db::init_schema(&conn)?;
            println!("Database located at: {}", path.display());
        }
        Commands::Run { url, rating } => {
            let stdin = std::io::stdin();
            let outcome = run_command(
                stdin.lock(),
                std::io::stdout(),
                &base_dir,
                rating,
                || fetch::fetch_page(&url),
            )
            .await?;
            if outcome.is_none() {
                std::process::exit(1);
            }
        }
        Commands::List { rating, limit } => {
            let path = db::db_path(&base_dir)?;
            let conn = db::connect(&path)?;
            db::init_schema(&conn)?;
            let rows = db::fetch_books(&conn, rating, limit)?;
            if rows.is_empty() {
                println!("No books stored. Run 'run' first.");
                return Ok(());
            }

            println!("{:>4} | {:<48} | {:>8} | {:>6}", "#", "Book", "Price", "Rating");
            println!("{}", "-".repeat(76));
            for r in &rows {
                let price = r.price.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "-".into());
                let stars = r.rating.map(|s| s.to_string()).unwrap_or_else(|| "-".into());
                println!("{:>4} | {:<48} | {:>8} | {:>6}", r.id, truncate(&r.book_name, 48), price, stars);
            }
            println!("\n{} of {} books", rows.len(), db::count_books(&conn)?);
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("Done in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}

/// Settle the rating (flag or prompt), then fetch, parse and store.
///
/// Returns `None` when the answer to the prompt is not a valid rating; in
/// that case neither `fetch` nor the store is touched.
async fn run_command<F, Fut>(
    input: impl BufRead,
    mut out: impl Write,
    base_dir: &Path,
    rating: Option<u8>,
    fetch: F,
) -> anyhow::Result<Option<usize>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<String>>,
{
    let rating = match rating {
        Some(r) => {
            writeln!(out, "You chose: {}", r)?;
            r
        }
        None => match prompt::prompt_rating(input, &mut out)? {
            Ok(r) => r,
            Err(e) => {
                writeln!(out, "{}", e)?;
                return Ok(None);
            }
        },
    };

    let html = fetch().await?;
    let doc = parser::parse_document(&html);

    let path = db::db_path(base_dir)?;
    let conn = db::connect(&path)?;
    let inserted = pipeline::run(rating, parser::extract(&doc), &conn, &mut out)?;
    writeln!(out, "Saved {} books to {}", inserted, path.display())?;
    Ok(Some(inserted))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::future::{ready, Ready};

    fn fixture() -> String {
        std::fs::read_to_string("tests/fixtures/catalog.html").unwrap()
    }

    fn serve<'a>(
        html: String,
        called: &'a Cell<bool>,
    ) -> impl FnOnce() -> Ready<anyhow::Result<String>> + 'a {
        move || {
            called.set(true);
            ready(Ok(html))
        }
    }

    async fn answer(input: &str, base: &Path, called: &Cell<bool>) -> (Option<usize>, String) {
        let mut out = Vec::new();
        let n = run_command(input.as_bytes(), &mut out, base, None, serve(fixture(), called))
            .await
            .unwrap();
        (n, String::from_utf8(out).unwrap())
    }

    #[tokio::test(flavor = "current_thread")]
    async fn out_of_range_answer_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let called = Cell::new(false);
        let (n, text) = answer("7\n", tmp.path(), &called).await;
        assert_eq!(n, None);
        assert!(!called.get());
        assert!(!tmp.path().join("data").join("book_list.db").exists());
        assert!(text.ends_with("Only numbers from 1 to 5 are accepted\n"));
        assert!(!text.contains('★'));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn non_numeric_answer_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let called = Cell::new(false);
        let (n, text) = answer("abc\n", tmp.path(), &called).await;
        assert_eq!(n, None);
        assert!(!called.get());
        assert!(!tmp.path().join("data").exists());
        assert!(text.ends_with("Please enter an integer between 1 and 5\n"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn valid_answer_stores_matches() {
        let tmp = tempfile::tempdir().unwrap();
        let called = Cell::new(false);
        let (n, text) = answer("3\n", tmp.path(), &called).await;
        assert_eq!(n, Some(3));
        assert!(called.get());
        assert!(text.contains("You chose: 3"));
        assert_eq!(text.matches('★').count(), 3);

        let path = db::db_path(tmp.path()).unwrap();
        let conn = db::connect(&path).unwrap();
        let rows = db::fetch_books(&conn, None, 100).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.rating == Some(3)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn rating_flag_skips_prompt() {
        let tmp = tempfile::tempdir().unwrap();
        let called = Cell::new(false);
        let mut out = Vec::new();
        let n = run_command("".as_bytes(), &mut out, tmp.path(), Some(5), serve(fixture(), &called))
            .await
            .unwrap();
        assert_eq!(n, Some(4));
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Enter the rating"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn fetch_error_propagates_before_store() {
        let tmp = tempfile::tempdir().unwrap();
        let result = run_command("2\n".as_bytes(), std::io::sink(), tmp.path(), None, || {
            ready(Err(anyhow::anyhow!("timed out")))
        })
        .await;
        assert!(result.is_err());
        assert!(!tmp.path().join("data").exists());
    }

    #[test]
    fn data_dir_help_names_build_time_default() {
        use clap::CommandFactory;
        let cmd = Cli::command();
        let arg = cmd.get_arguments().find(|a| a.get_id() == "data_dir").unwrap();
        let help = arg.get_long_help().or(arg.get_help()).unwrap().to_string();
        assert!(help.contains("when the binary was built"));
    }
}
