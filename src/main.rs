use clap::{Parser, Subcommand};
use gbgen::{article, catalog, config, generate, output, render};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gbgen")]
#[command(about = "Static blog generator")]
#[command(long_about = "\
Static blog generator

Articles are markdown files whose name carries the publication date and slug.
Templates are HTML files with ${name} placeholders.

Source structure:

  source_content/
  ├── config.toml                  # Site config (optional)
  ├── templates/
  │   ├── main.html                # Page shell: ${title}, ${content}
  │   ├── article.html             # Article body: ${title}, ${content}, ${date}, ${articleUrl}
  │   └── articleSummaryWrapper.html  # One entry on index/category pages
  ├── articles/
  │   └── 2012.040_hello-world.md  # <year>.<day of year>_<slug>.md
  └── static/                      # Copied verbatim to site/static/

Article format:

  title: Hello, World
  labels: Rust, Meta

  The excerpt shown on the index page.
  <!--break-->
  The rest, shown only on the article page.

Run 'gbgen gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source directory
    #[arg(long, default_value = "source_content", global = true)]
    source: PathBuf,

    /// Output directory (removed and recreated on every build)
    #[arg(long, default_value = "site", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site (the default when no command is given)
    Build,
    /// Create an empty article file for a date and slug
    New {
        /// Publication date: ordinal (2012.040) or human (Feb 9 2012)
        date: String,
        /// Article slug, used as the page URL
        slug: String,
    },
    /// Load and validate the source directory without writing anything
    Check {
        /// Print the catalog as JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            println!("==> Building {}", cli.output.display());
            let summary = generate::generate(
                &cli.source,
                &cli.output,
                &site_config,
                generate::build_timestamp(),
            )?;
            output::print_build_output(&summary);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::New { date, slug } => {
            let site_config = config::load_config(&cli.source)?;
            let dir = cli.source.join(&site_config.dirs.articles);
            let path = article::create_stub(&dir, &date, &slug)?;
            println!("==> Created {}", path.display());
        }
        Command::Check { json } => {
            let site_config = config::load_config(&cli.source)?;
            let catalog = catalog::load_catalog(&cli.source, &site_config.dirs)?;
            render::require_templates(&catalog.templates)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                println!("==> Checking {}", cli.source.display());
                output::print_catalog_output(&catalog);
                if let Some(slug) = catalog.find_duplicate_slug() {
                    if site_config.strict_slugs {
                        return Err(generate::BuildError::DuplicateSlug(slug.to_string()).into());
                    }
                    println!("==> Warning: duplicate slug '{slug}', one page will overwrite the other");
                }
                println!("==> Content is valid");
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
