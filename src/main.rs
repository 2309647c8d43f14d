use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use mindmend::app::{App, InputField};
use mindmend::config::Config;
use mindmend::entry_store::EntryStore;
use mindmend::logging;
use mindmend::storage::{FileStore, KeyValueStore};
use mindmend::tips;
use mindmend::ui::{Action, UI};
use std::path::PathBuf;
use std::time::Duration;

/// Personal mood journal with simulated insights
#[derive(Parser, Debug)]
#[command(name = "mindmend", version)]
struct Args {
    /// Directory holding saved entries (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print saved entries and exit
    #[arg(long)]
    print: bool,
}

const TICK: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .or_else(Config::default_path)
        .ok_or_else(|| eyre!("No config directory available; pass --config"))?;
    let (mut config, config_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    if let Err(e) = logging::init(&config.log_file) {
        eprintln!(
            "Logging disabled, cannot open {}: {}",
            config.log_file.display(),
            e
        );
    }
    if let Some(e) = config_error {
        log::warn!(
            "Ignoring config at {}: {}",
            config_path.display(),
            e
        );
    }
    log::info!("Using data directory {}", config.data_dir.display());

    let store = EntryStore::load(
        FileStore::new(&config.data_dir),
        config.storage_key.clone(),
        config.date_format.clone(),
    );

    if args.print {
        if store.entries().is_empty() {
            println!("No entries yet.");
        }
        for entry in store.entries() {
            println!("{}", entry.summary());
        }
        return Ok(());
    }

    let tips = tips::pick_daily_tips(&tips::TIPS, config.tip_count, &mut rand::thread_rng());
    let mut app = App::new(store, tips, config.analysis_delay());
    run(&mut app).await
}

async fn run<S: KeyValueStore>(app: &mut App<S>) -> Result<()> {
    let mut ui = UI::new()?;
    let mut events = EventStream::new();

    loop {
        ui.display(app)?;

        tokio::select! {
            event = events.next() => {
                let key = match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => key,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                };
                let Some(action) = ui.handle_key(key, app) else {
                    continue;
                };
                match action {
                    Action::Insert(c) => app.edit(|input| input.insert(c)),
                    Action::Newline => app.edit(|input| input.insert('\n')),
                    Action::Backspace => app.edit(InputField::backspace),
                    Action::Delete => app.edit(InputField::delete),
                    Action::Left => app.edit(InputField::left),
                    Action::Right => app.edit(InputField::right),
                    Action::ToggleFocus => app.toggle_focus(),
                    Action::Analyze => app.analyze(),
                    Action::SaveEntry => app.save_entry(),
                    Action::SaveMood => app.save_check_in(),
                    Action::ClearJournal => app.clear_journal(),
                    // Handled by the UI itself.
                    Action::Browse => {}
                    Action::Quit => break,
                }
            }
            // Redraw so a finished analysis shows up without a key press.
            _ = tokio::time::sleep(TICK) => {}
        }
    }

    log::info!("Exiting with {} entries", app.store.entries().len());
    Ok(())
}
