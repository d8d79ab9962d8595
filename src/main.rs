use anyhow::{Context, Result};
use argh::FromArgs;
use label_menu::config::parse_labels;
use label_menu::{Menu, MenuConfig, MenuError, MenuItem, StreamConsole, TerminalConsole};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Pick one item from a tree given as slash-separated paths and print its path.
struct Args {
    #[argh(option, short = 'l')]
    /// label sequences per depth, comma-separated (e.g. "alpha,numeric")
    labels: Option<String>,

    #[argh(option, short = 'p')]
    /// prompt shown before reading a selection
    prompt: Option<String>,

    #[argh(switch)]
    /// do not clear the terminal before each render
    no_clear: bool,

    #[argh(switch)]
    /// read the selection from standard input and render to standard error
    stdin: bool,

    #[argh(positional, greedy)]
    /// item paths such as "Fruit/Apple"; shared prefixes are merged
    paths: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Args = argh::from_env();
    match run(args) {
        Ok(path) => {
            println!("{}", path);
            ExitCode::SUCCESS
        }
        Err(err) if matches!(err.downcast_ref::<MenuError>(), Some(MenuError::Interrupted)) => {
            ExitCode::from(130)
        }
        Err(err) => {
            eprintln!("label_menu: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String> {
    let mut config = MenuConfig::from_env().context("invalid LABEL_MENU_* environment")?;
    if let Some(labels) = &args.labels {
        config.labels = parse_labels(labels).context("invalid --labels")?;
    }
    if args.prompt.is_some() {
        config.prompt = args.prompt;
    }
    if args.no_clear {
        config.clear_screen = false;
    }

    let menu = Menu::from_config(build_tree(&args.paths)?, &config);
    let chosen = if args.stdin {
        let stdin = std::io::stdin();
        let mut console = StreamConsole::new(stdin.lock(), std::io::stderr());
        menu.choose_state(&mut console)?.clone()
    } else {
        let mut console = TerminalConsole::new(config.clear_screen)?;
        menu.choose_state(&mut console)?.clone()
    };
    Ok(chosen)
}

/// Build a menu tree from `/`-separated paths.
///
/// Every item carries its full path as state. Empty segments are skipped.
fn build_tree(paths: &[String]) -> Result<MenuItem<String>> {
    let mut root = MenuItem::new("Select:", String::new());
    for path in paths {
        let mut node = &mut root;
        let mut full = String::new();
        for segment in path.split('/').map(str::trim).filter(|s| !s.is_empty()) {
            if !full.is_empty() {
                full.push('/');
            }
            full.push_str(segment);

            let index = match node.children().iter().position(|c| c.text() == segment) {
                Some(index) => index,
                None => {
                    node.push(MenuItem::new(segment, full.clone()));
                    node.children().len() - 1
                }
            };
            node = node
                .child_mut(index)
                .with_context(|| format!("missing menu item for {}", full))?;
        }
    }

    if root.is_leaf() {
        anyhow::bail!("no menu items given");
    }
    Ok(root)
}
