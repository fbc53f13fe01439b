use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use newsletter::{Config, RenderAdapter, TypstRenderer, server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "newsletter")]
#[command(about = "Convert Markdown newsletters to PDF")]
struct Cli {
    /// Config file (TOML); built-in defaults are used if it does not exist
    #[arg(short, long, global = true, default_value = "newsletter.toml")]
    config: PathBuf,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP conversion service
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },

    /// Convert a Markdown file to PDF
    Convert {
        /// Input Markdown file
        input: PathBuf,

        /// Output PDF file (defaults to input name with .pdf extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Typst style rules applied after the built-in styles
        #[arg(long)]
        stylesheet: Option<PathBuf>,

        /// Print the generated Typst markup instead of writing a PDF
        #[arg(long)]
        typst: bool,
    },

    /// Print the block category of every line
    Inspect {
        /// Input Markdown file
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = Config::load(&cli.config)?;

    match cli.command {
        Command::Serve { host, port } => serve(config, host, port).await,
        Command::Convert { input, output, stylesheet, typst } => {
            convert(config, input, output, stylesheet, typst)
        }
        Command::Inspect { input } => inspect(input),
    }
}

async fn serve(mut config: Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let server_config = config.server.clone();
    let renderer: Arc<dyn RenderAdapter> = Arc::new(TypstRenderer::new(config));
    let app = server::router(server::AppState::new(renderer, &server_config));

    let addr = server_config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("PDF Converter listening on {}", addr);
    tracing::info!(
        "Render timeout {}s, {} concurrent renders",
        server_config.render_timeout_secs,
        server_config.max_concurrent_renders
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn convert(
    config: Config,
    input: PathBuf,
    output: Option<PathBuf>,
    stylesheet: Option<PathBuf>,
    typst: bool,
) -> anyhow::Result<()> {
    let markdown = fs::read_to_string(&input)
        .with_context(|| format!("Error reading {}", input.display()))?;
    let stylesheet = stylesheet
        .map(|path| {
            fs::read_to_string(&path).with_context(|| format!("Error reading {}", path.display()))
        })
        .transpose()?;

    if typst {
        println!("{}", newsletter::markdown_to_typst(&markdown, stylesheet.as_deref(), &config)?);
        return Ok(());
    }

    let renderer = TypstRenderer::new(config);
    let pdf_bytes = newsletter::markdown_to_pdf(&markdown, stylesheet.as_deref(), &renderer)?;

    let output = output.unwrap_or_else(|| input.with_extension("pdf"));
    fs::write(&output, pdf_bytes).with_context(|| format!("Error writing {}", output.display()))?;

    println!("Created {}", output.display());
    Ok(())
}

fn inspect(input: PathBuf) -> anyhow::Result<()> {
    let markdown = fs::read_to_string(&input)
        .with_context(|| format!("Error reading {}", input.display()))?;
    let doc = newsletter::parse(&markdown)?;

    for (i, styled) in doc.iter().enumerate() {
        let text = styled.block.plain_text();
        println!(
            "{:4} {:10} {}",
            i + 1,
            styled.block.kind_name(),
            text.chars().take(60).collect::<String>()
        );
    }
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,newsletter=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
