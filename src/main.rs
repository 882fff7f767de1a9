use clap::{Parser, Subcommand};
use listing_showcase::browse::BrowseCommand;
use listing_showcase::gallery::{GalleryView, ScrollState};
use listing_showcase::{config, generate, output, scan};
use std::io::BufRead;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "listing-showcase")]
#[command(about = "Static showcase site generator for a real estate listing")]
#[command(long_about = "\
Static showcase site generator for a real estate listing

One content directory describes one property. Photo directories are named
after gallery categories; photos are ordered by numeric prefix.

Content structure:

  content/
  ├── listing.toml                 # Price, address, rooms, agent (required)
  ├── config.toml                  # Site config (optional)
  ├── description.md               # Long description (optional)
  ├── floorplan.jpg                # Floorplan (optional)
  └── photos/
      ├── 010-exterior/            # Category directory, prefix optional
      │   ├── 001-front-at-dusk.jpg
      │   └── 001-front-at-dusk.txt   # Caption sidecar
      ├── kitchen/
      └── features/                # Alias for the \"special\" category

Categories: exterior, living, kitchen, bedrooms, bathrooms, special,
outdoor, suite, details.

Caption resolution (first available wins):
  sidecar .txt → filename (001-front-at-dusk.jpg → \"Front at dusk\")

Run 'listing-showcase gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".listing-showcase-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Walk the gallery from the terminal, one command per line
    Browse {
        /// Category to start in
        #[arg(long, default_value = "all")]
        category: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let summary = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&summary);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let summary = generate::render_site(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Browse { category } => {
            let manifest = scan::scan(&cli.source)?;
            browse(&manifest, &category)?;
        }
    }

    Ok(())
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)
}

/// Read commands from stdin until `q` or end of input, printing the view
/// after each one.
fn browse(manifest: &scan::Manifest, category: &str) -> std::io::Result<()> {
    let mut view = GalleryView::new(&manifest.catalog, ScrollState::default());
    view.select_category(category);
    print_lines(output::format_view_state(&view));

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        match BrowseCommand::parse(&line) {
            Some(BrowseCommand::Quit) => break,
            Some(BrowseCommand::List) => {
                print_lines(output::format_category_list(&manifest.catalog))
            }
            Some(command) => {
                command.apply(&mut view);
                print_lines(output::format_view_state(&view));
            }
            None if line.trim().is_empty() => {}
            None => eprintln!("Unknown command: {}", line.trim()),
        }
    }
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}
