use calmate::assistant::Assistant;
use calmate::calendar::Session;
use calmate::error::Error;
use calmate::startup;
use calmate::status::ConsoleSink;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting calmate");

    // Load configuration
    let config = startup::load_config()?;

    // Build the user's session from configured credentials
    let session = Session::from_config(&config);
    if session.calendar().is_none() {
        info!("No Google credentials configured; calendar actions will ask you to sign in");
    }

    let assistant = Assistant::new(&config, session, Arc::new(ConsoleSink))?;

    println!("Ask me about your calendar (type 'exit' to quit).");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().map_err(Error::Io)?;

        let Some(line) = lines.next_line().await.map_err(Error::Io)? else {
            break;
        };

        let request = line.trim();
        if request.is_empty() {
            continue;
        }
        if request.eq_ignore_ascii_case("exit") || request.eq_ignore_ascii_case("quit") {
            break;
        }

        assistant.handle_request(request).await;
    }

    info!("Shutting down");
    Ok(())
}
