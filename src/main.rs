//! Console harness — voice-expense pipeline over stdin.
//!
//! Typed lines stand in for spoken utterances so the full pipeline can be
//! exercised without a microphone:
//!
//! ```text
//! > qué lindo día               (ignored — no hotword)
//! > hey luzi                    (hotword → session starts)
//! > gasté 1500 en sushi         (parsed, matched, saved)
//! ```
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Build the in-memory store, the shared matcher, and the stdin-backed
//!    speech capture.
//! 4. Create the session controller and the event channel.
//! 5. Spawn the hotword listener (when enabled).
//! 6. Print events as they arrive until Ctrl-C.
//!
//! Ambiguous categories are resolved by auto-confirming the top candidate —
//! a real UI would present the ranked list instead.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use voice_expense::{
    config::AppConfig,
    hotword::HotwordListener,
    matching::CategoryMatcher,
    session::{SessionEvent, VoiceSessionController},
    speech::{ConsoleCapture, SpeechCapture},
    store::MemoryStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::load()?;
    log::info!(
        "starting (language {}, hotword {})",
        config.voice.language,
        if config.hotword.enabled { "on" } else { "off" }
    );

    let store = Arc::new(MemoryStore::new());
    let capture: Arc<dyn SpeechCapture> = Arc::new(ConsoleCapture::new());
    let matcher = Arc::new(Mutex::new(CategoryMatcher::load_or_default()));
    let (events_tx, mut events_rx) = mpsc::channel(32);

    let controller = Arc::new(VoiceSessionController::new(
        Arc::clone(&store) as _,
        Arc::clone(&capture),
        matcher,
        events_tx,
        &config,
    ));

    let listener = config.hotword.enabled.then(|| {
        HotwordListener::start(
            Arc::clone(&capture),
            Arc::clone(&controller),
            config.hotword.phrases.clone(),
        )
    });

    println!("Di \"hey luzi\" y luego tu gasto. Ctrl-C para salir.");

    loop {
        tokio::select! {
            event = events_rx.recv() => {
                let Some(event) = event else { break };
                handle_event(&controller, event).await;
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("shutting down");
                break;
            }
        }
    }

    if let Some(listener) = listener {
        listener.stop();
        listener.join().await;
    }

    let expenses = store.expenses();
    if !expenses.is_empty() {
        println!("\nGastos registrados:");
        for e in expenses {
            println!("  {:>10.2}  {}  (categoría {})", e.amount, e.description, e.category_id);
        }
    }

    Ok(())
}

/// Print an event; auto-confirm the top candidate on ambiguity.
async fn handle_event(controller: &Arc<VoiceSessionController>, event: SessionEvent) {
    match event {
        SessionEvent::ListeningStarted => {
            println!("Escuchando... Dime tu gasto. Por ejemplo: '1500 en comida'");
        }
        SessionEvent::RecognitionComplete => {}
        SessionEvent::AmbiguousCategory { draft, candidates } => {
            println!(
                "Categoría ambigua para \"{}\" ({}):",
                draft.description, draft.amount
            );
            for (i, c) in candidates.iter().enumerate() {
                println!("  {}. {} ({:.0}%)", i + 1, c.category.name, c.confidence * 100.0);
            }
            if let Some(best) = candidates.first() {
                println!("Confirmando la mejor opción: {}", best.category.name);
                if let Err(e) = controller.confirm_category(&best.category.id).await {
                    log::warn!("could not confirm category: {e}");
                }
            }
        }
        SessionEvent::ExpenseSaved {
            amount,
            description,
            category_name,
        } => {
            println!("Gasto registrado: {amount} por \"{description}\" en {category_name}");
        }
        SessionEvent::NoAudioDetected => {
            println!("No se detectó audio. Intenta de nuevo.");
        }
        SessionEvent::ParseFailed => {
            println!("No se reconoció un gasto válido. Intenta con otro formato.");
        }
        SessionEvent::Error { message } => {
            println!("Error: {message}");
        }
    }
}
