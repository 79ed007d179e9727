use async_trait::async_trait;
use clap::Parser;
use kokoro_affect::{DecayConfig, EmotionStore};
use kokoro_core::{AvatarRenderer, ClipError, EmotionTag, MotionEvent, Playback};
use kokoro_motion::{AssistantPipeline, MotionSelector, MotionSequencer, SequencerConfig};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Kokoro avatar emotion engine REPL", long_about = None)]
struct Args {
    /// Simulated clip duration in milliseconds for the console renderer
    #[arg(long, default_value_t = 800)]
    clip_ms: u64,

    /// RNG seed for clip selection (omit for entropy seeding)
    #[arg(long)]
    seed: Option<u64>,
}

/// Console stand-in for the Live2D renderer: logs clips instead of drawing.
struct ConsoleRenderer {
    clip_duration: Duration,
}

#[async_trait]
impl AvatarRenderer for ConsoleRenderer {
    async fn play_clip(&self, clip: &str) -> Result<Playback, ClipError> {
        println!("  [avatar] playing clip {clip}");
        Ok(Playback {
            duration: Some(self.clip_duration),
        })
    }

    async fn stop_all(&self) -> Result<(), ClipError> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
    let args = Args::parse();

    info!("Starting Kokoro engine...");

    let renderer = Arc::new(ConsoleRenderer {
        clip_duration: Duration::from_millis(args.clip_ms),
    });
    let selector = match args.seed {
        Some(seed) => MotionSelector::seeded(seed),
        None => MotionSelector::new(),
    };
    let sequencer = Arc::new(MotionSequencer::with_config(
        renderer,
        selector,
        SequencerConfig::default(),
    ));
    let store = Arc::new(EmotionStore::with_config(DecayConfig::default()));
    let pipeline = AssistantPipeline::new(Arc::clone(&sequencer), Arc::clone(&store));

    // Caption layer: print motion notifications as they fire.
    let mut events = sequencer.subscribe();
    let caption_task = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                MotionEvent::Started { caption, duration } => {
                    println!("  [caption] *{caption}* ({}ms)", duration.as_millis());
                }
                MotionEvent::Ended => println!("  [caption] (motion ended)"),
            }
        }
    });

    println!("Kokoro online. Type an assistant message (with *stage directions*).");
    println!("Commands: /emotions  /reset  /quit");
    print!("> ");
    io::stdout().flush()?;

    let stdin = io::stdin();
    let mut input = String::new();
    // The pipeline assumes every call is a new message; repeats are dropped here.
    let mut last_message = String::new();

    loop {
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();

        match line {
            "" => {}
            "/quit" | "/exit" => break,
            "/reset" => {
                store.reset().await;
                println!("emotions reset");
            }
            "/emotions" => {
                let snapshot = store.snapshot().await;
                let mut levels: Vec<_> = snapshot.iter().filter(|(_, l)| *l > 0.0).collect();
                levels.sort_by(|a, b| b.1.total_cmp(&a.1));
                if levels.is_empty() {
                    println!("all emotions at zero");
                }
                for (tag, level) in levels {
                    println!("  {tag:<12} {level:>5.1}");
                }
            }
            message if message == last_message => {
                println!("(duplicate message ignored)");
            }
            message => {
                last_message = message.to_string();
                pipeline.process(message).await;
                for tag in EmotionTag::MAIN {
                    let intensity = kokoro_motion::message_intensity(message, tag);
                    if intensity > 0.0 {
                        info!(%tag, intensity, "emotion reinforced");
                    }
                }
            }
        }

        print!("> ");
        io::stdout().flush()?;
    }

    info!("Shutting down");
    caption_task.abort();
    sequencer.shutdown();
    store.shutdown();
    Ok(())
}
