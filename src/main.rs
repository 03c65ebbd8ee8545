//! CLI entry point for headless-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use headless_blog::listing::{Control, ListingController, ListingPageState};
use headless_blog::{Blog, ListingPage};

#[derive(Parser)]
#[command(name = "headless-blog")]
#[command(version)]
#[command(about = "A blog front end that renders posts and pages from a headless CMS", long_about = None)]
struct Cli {
    /// Set the site directory holding _config.yml (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List one page of posts
    Posts {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show a single post
    Post {
        /// Slug of the post
        slug: String,
    },

    /// Show the about page copy
    About,

    /// Page through posts interactively
    Browse,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "headless_blog=debug,info"
    } else {
        "headless_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let blog = Blog::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| blog.config.server.ip.clone());
            let port = port.unwrap_or(blog.config.server.port);

            tracing::info!("Serving content from {}", blog.config.api.endpoint);
            headless_blog::server::start(Arc::new(blog), &ip, port).await?;
        }

        Commands::Posts { page } => {
            let blog = Blog::new(&base_dir)?;
            match blog.listing_page(page).await? {
                ListingPage::Found(listing) => print_listing(&listing),
                ListingPage::PastEnd { last_page } => {
                    anyhow::bail!("Page {} is past the last page ({})", page, last_page)
                }
            }
        }

        Commands::Post { slug } => {
            let blog = Blog::new(&base_dir)?;
            match blog.post(&slug).await? {
                Some(post) => {
                    println!("{}", post.title);
                    println!("{}", post.updated_at);
                    println!();
                    println!("{}", post.description_html);
                }
                None => anyhow::bail!("No post with slug {:?}", slug),
            }
        }

        Commands::About => {
            let blog = Blog::new(&base_dir)?;
            match blog.about().await? {
                Some(about) => {
                    println!("{}", about.title);
                    println!();
                    println!("{}", about.description);
                    for url in [&about.instagram, &about.facebook, &about.linkedin] {
                        if !url.is_empty() {
                            println!("  {}", url);
                        }
                    }
                }
                None => anyhow::bail!("The about page has not been published"),
            }
        }

        Commands::Browse => {
            let blog = Blog::new(&base_dir)?;
            let controller = blog.controller().await?;
            browse(&controller).await?;
        }

        Commands::Version => {
            println!("headless-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Interactive listing session driven by stdin
async fn browse(controller: &ListingController) -> Result<()> {
    print_listing(&controller.state());
    print_prompt(&controller.state());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = line.trim();
        let result = match command {
            "q" | "quit" => break,
            "" => {
                print_prompt(&controller.state());
                continue;
            }
            "f" => controller.go(Control::First).await,
            "p" => controller.go(Control::Previous).await,
            "n" => controller.go(Control::Next).await,
            "l" => controller.go(Control::Last).await,
            other => match other.parse::<u32>() {
                Ok(page) => controller.navigate_to(page).await,
                Err(_) => {
                    println!("Unknown command: {}", other);
                    print_prompt(&controller.state());
                    continue;
                }
            },
        };

        match result {
            Ok(state) => print_listing(&state),
            Err(e) if e.is_ignorable() => println!("{}", e),
            Err(e) => println!("Error: {} (try again)", e),
        }
        print_prompt(&controller.state());
    }

    Ok(())
}

fn print_listing(listing: &ListingPageState) {
    println!(
        "Posts, page {} of {}:",
        listing.current_page, listing.total_pages
    );
    if listing.items.is_empty() {
        println!("  (no posts)");
    }
    for post in &listing.items {
        println!("  {} - {} [{}]", post.updated_at, post.title, post.slug);
        if !post.description.is_empty() {
            println!("      {}", post.description);
        }
    }
}

fn print_prompt(listing: &ListingPageState) {
    let affordances = listing.affordances();
    let mut options = Vec::new();
    if affordances.has_previous() {
        options.push("f(irst)");
        options.push("p(revious)");
    }
    if affordances.has_next() {
        options.push("n(ext)");
        options.push("l(ast)");
    }
    options.push("<page>");
    options.push("q(uit)");
    println!("[{}] > ", options.join(" "));
}
