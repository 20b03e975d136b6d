mod app;

use app::FlashcardsApp;
use flashcard_sets::{Config, FlashcardStore, SetDraft, SqliteStore, Term};

/// Seeds a starter set so a fresh database is not empty
fn seed_sample_set(store: &FlashcardStore<SqliteStore>) {
    if !store.load_collection().is_empty() {
        return;
    }

    let draft = SetDraft::new(
        "Polish Vocabulary",
        vec![
            Term::new("cześć", "hello"),
            Term::new("dziękuję", "thank you"),
            Term::new("proszę", "please"),
        ],
    );
    match store.save_set(draft) {
        Ok(_) => log::info!("Sample set created"),
        Err(e) => log::warn!("Could not create sample set: {}", e),
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    let kv = SqliteStore::open(&config.db_path).expect("Failed to initialize database");
    let store = FlashcardStore::new(kv);

    seed_sample_set(&store);

    let collection = store.load_collection();
    log::info!(
        "Loaded {} sets from {}",
        collection.len(),
        config.db_path.display()
    );
    for set in collection.sets() {
        log::debug!("  - {} ({} terms)", set.name, set.terms.len());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([520.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Flashcards",
        options,
        Box::new(|cc| Ok(Box::new(FlashcardsApp::new(config, store, &cc.egui_ctx)))),
    )
}
