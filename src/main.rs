use clap::{Parser, Subcommand};
use std::path::PathBuf;
use termfolio::compile::{self, ContentPaths};
use termfolio::session::{Key, Session};
use termfolio::types::ViewPayload;
use termfolio::{config, generate, output};

#[derive(Parser)]
#[command(name = "termfolio")]
#[command(about = "Build a terminal-editor styled portfolio page")]
#[command(long_about = "\
Build a terminal-editor styled portfolio page

A YAML config and a directory of Markdown files become one self-contained
index.html that browses like a text editor: j/k to move, Enter to open,
Esc to go back, :themes to switch colors.

Content structure:

  config.yaml                      # Site config: menu, themes, socials
  content/
  ├── about.md                     # Page, wired up by a main_navigation entry
  ├── projects.md
  └── blogs/                       # Posts, newest filename first
      ├── 2024-06-01-rewrite.md    # Front matter: title, date (both optional)
      └── 2023-12-31-hello.md

Run 'termfolio gen-config' to generate a documented config.yaml.")]
#[command(version)]
struct Cli {
    /// Site configuration file
    #[arg(long, default_value = "config.yaml", global = true)]
    config: PathBuf,

    /// Content directory (posts are read from <source>/blogs)
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output HTML file
    #[arg(long, default_value = "public/index.html", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Compile content and write the page (default)
    Build,
    /// Compile content and report, without writing anything
    Check,
    /// Print a stock config.yaml with all options documented
    GenConfig,
    /// Compile, then replay key presses against the page runtime
    Replay {
        /// Browser key names, e.g. j ArrowDown Enter Escape : t h e m e s
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let mut cli = Cli::parse();

    match cli.command.take().unwrap_or(Command::Build) {
        Command::Build => {
            println!("==> Compiling {}", cli.source.display());
            let payload = compile_site(&cli)?;
            output::print_build_output(&payload);

            println!("==> Generating HTML → {}", cli.output.display());
            let html = generate::render_document(&payload)?;
            generate::write_output(&cli.output, &html)?;
            println!("{}", output::format_written(&cli.output, html.len()));
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let payload = compile_site(&cli)?;
            output::print_build_output(&payload);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_yaml());
        }
        Command::Replay { keys } => {
            let keys = keys
                .iter()
                .map(|name| Key::parse(name).ok_or_else(|| format!("unknown key name '{name}'")))
                .collect::<Result<Vec<Key>, String>>()?;
            let payload = compile_site(&cli)?;
            let mut session = Session::new(&payload);
            for key in keys {
                if session.should_quit() {
                    break;
                }
                session.handle_key(key);
            }
            output::print_session(&session);
        }
    }

    Ok(())
}

/// Load the config (fatal on failure) and compile the content directory.
fn compile_site(cli: &Cli) -> Result<ViewPayload, config::ConfigError> {
    let site = config::load_config(&cli.config)?;
    Ok(compile::assemble(&site, &ContentPaths::new(&cli.source)))
}
