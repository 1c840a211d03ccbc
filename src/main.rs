use clap::Parser;
use questionnaire_api::server;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// CSV file or URL to load the questions from (falls back to
    /// QUESTIONS_PATH, then the bundled defaults)
    #[arg(short, long)]
    questions: Option<String>,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = server::run(args.port, args.questions.as_deref()).await {
        eprintln!("Error running server: {}", e);
        std::process::exit(1);
    }
}
