use clap::{ArgAction, Parser, Subcommand};
use responsive_bg::host::{ContentContext, ContentId, HeadBuffer};
use responsive_bg::library::MediaLibrary;
use responsive_bg::{BackgroundStyleRegistry, config, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "responsive-bg")]
#[command(about = "Responsive CSS background images from breakpoint → image size mappings")]
#[command(long_about = "\
Responsive CSS background images from breakpoint → image size mappings

Each breakpoint picks an image size. Sizes are resolved to URLs for the
current content item; breakpoints without a valid URL are left out.

  <style>.hero { background-image: url(\"…/a.jpg\"); }
  @media (min-width: 768px) { .hero { background-image: url(\"…/b.jpg\"); } }</style>

The media library (JSON) plays the host: registered sizes, the current
content item, and per-item URLs for each size.

Run 'responsive-bg gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Background config file (TOML)
    #[arg(long, default_value = "background.toml", global = true)]
    config: PathBuf,

    /// Media library manifest (JSON)
    #[arg(long, default_value = "media.json", global = true)]
    media: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the <style> block for the current content item
    Render {
        /// Render for this content item instead of the library's current one
        #[arg(long)]
        content_id: Option<String>,
        /// Override the configured selector
        #[arg(long)]
        selector: Option<String>,
    },
    /// Validate config and media library, register sizes, list breakpoints
    Check,
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render {
            content_id,
            selector,
        } => {
            let site = config::load_config(&cli.config)?;
            let mut library = MediaLibrary::load(&cli.media)?;
            if let Some(id) = content_id {
                library.set_current(Some(ContentId::from(id)));
            }

            let registry = BackgroundStyleRegistry::new(site.breakpoint_map()?, &library)?;
            let selector = selector.unwrap_or(site.selector);
            let mut head = HeadBuffer::new();
            let emission =
                registry.emit_background_styles(&selector, &library, &library, &mut head)?;

            let markup = head.render();
            if !markup.is_empty() {
                println!("{}", markup);
            }
            output::print_emission(
                &selector,
                library.current_content_id().as_ref(),
                emission,
            );
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let site = config::load_config(&cli.config)?;
            let library = MediaLibrary::load(&cli.media)?;
            let breakpoints = site.breakpoint_map()?;
            BackgroundStyleRegistry::new(breakpoints.clone(), &library)?;
            output::print_check_output(&site.selector, &breakpoints, &library);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
