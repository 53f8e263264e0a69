use anyhow::Context;
use clap::{Parser, Subcommand};
use lyrical_app::modules::books::models::CatalogQuery;
use lyrical_app::Services;
use lyrical_kernel::settings::Settings;

/// Lyrical Pages command-line interface
#[derive(Debug, Parser)]
#[command(name = "lyrical", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Query the seeded catalog and print the page as JSON
    Catalog {
        /// Case-insensitive title substring
        #[arg(long)]
        title: Option<String>,
        /// Case-insensitive author substring
        #[arg(long)]
        author: Option<String>,
        /// Genre tag, or `all`
        #[arg(long)]
        genre: Option<String>,
        /// 1-based page number
        #[arg(long)]
        page: Option<usize>,
        /// Page size
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the distinct catalog genres
    Genres,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load settings")?;
    lyrical_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve => lyrical_app::run(settings).await,
        Command::Catalog {
            title,
            author,
            genre,
            page,
            limit,
        } => {
            let services = Services::from_settings(&settings)?;
            let query = CatalogQuery {
                title,
                author,
                genre,
                page,
                limit,
            };
            let page = services
                .catalog
                .query(&query)
                .await
                .context("catalog query failed")?;
            println!("{}", serde_json::to_string_pretty(&page)?);
            Ok(())
        }
        Command::Genres => {
            let services = Services::from_settings(&settings)?;
            let page = services
                .catalog
                .query(&CatalogQuery::default())
                .await
                .context("catalog query failed")?;
            for genre in page.genres {
                println!("{genre}");
            }
            Ok(())
        }
    }
}
