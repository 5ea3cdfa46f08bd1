use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use visforge::chat::ChatClient;
use visforge::config::{self, Config};
use visforge::gen::ImageClient;
use visforge::session::{Role, Session, SessionState};
use visforge::util::truncate;

#[derive(Parser, Debug)]
#[command(
    name = "visforge",
    about = "Generate a full Visual Identity System from a single logo",
    version
)]
struct Args {
    /// Logo image to upload on startup (PNG or JPEG)
    logo: Option<PathBuf>,

    /// Configure API credentials and exit
    #[arg(long)]
    setup: bool,

    /// Seed for random prompt/ratio selection (reproducible runs)
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if args.setup {
        config::setup_credentials_interactive().map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let config = Config::load();
    if !config.has_credentials() {
        bail!(
            "API credentials are not configured. Run 'visforge --setup' first \
             (config: {}).",
            Config::config_location()
        );
    }

    let images = ImageClient::from_config(&config)?;
    let chat = ChatClient::from_config(&config)?;
    let mut session = match args.seed {
        Some(seed) => Session::with_seed(images, chat, seed),
        None => Session::new(images, chat),
    };

    // Ctrl+C aborts the flow that is currently running, not the program.
    let cancel = session.cancel_handle();
    tokio::spawn(async move {
        loop {
            if tokio::signal::ctrl_c().await.is_err() {
                break;
            }
            eprintln!("\n  Cancelling current run...");
            cancel.cancel();
        }
    });

    let mut printed = 0;
    drain_transcript(&session.state, &mut printed);

    if let Some(path) = &args.logo {
        let logo = load_logo(path)?;
        session.upload_logo(logo).await;
        drain_transcript(&session.state, &mut printed);
    }

    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/help" => {
                print_help();
                continue;
            }
            "/confirm" => session.confirm_pending_action().await,
            "/dismiss" => session.dismiss_pending_action(),
            "/random" => session.trigger_random(),
            "/done" => session.clear_edit_selection(),
            "/reset" => session.reset(),
            "/gallery" => {
                print_gallery(&session.state);
                continue;
            }
            _ => {
                if let Some(path) = line.strip_prefix("/upload ") {
                    match load_logo(Path::new(path.trim())) {
                        Ok(logo) => session.upload_logo(logo).await,
                        Err(e) => eprintln!("  {}", e),
                    }
                } else if let Some(prefix) = line.strip_prefix("/edit ") {
                    select_by_prefix(&mut session, prefix.trim());
                } else if line.starts_with('/') {
                    eprintln!("  Unknown command: {}", line);
                    continue;
                } else {
                    session.send_message(line).await;
                }
            }
        }

        drain_transcript(&session.state, &mut printed);
        show_pending(&session.state);
    }

    Ok(())
}

fn load_logo(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read logo file {}", path.display()))?;
    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/png",
    };
    Ok(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
}

fn select_by_prefix(session: &mut Session<ImageClient, ChatClient>, prefix: &str) {
    let id = session
        .state
        .gallery
        .iter()
        .find(|image| image.id.starts_with(prefix))
        .map(|image| image.id.clone());
    match id {
        Some(id) => {
            session.select_for_edit(&id);
        }
        None => eprintln!("  No gallery image with id prefix '{}'", prefix),
    }
}

fn drain_transcript(state: &SessionState, printed: &mut usize) {
    // The upload flow clears the transcript, so the cursor can overrun.
    if *printed > state.transcript.len() {
        *printed = 0;
    }
    for message in &state.transcript[*printed..] {
        let tag = match message.role {
            Role::User => "USER",
            Role::Assistant => "VISFORGE",
            Role::System => "LOG",
        };
        println!();
        println!("  [{}] {}", tag, message.text.replace('\n', "\n  "));
        if let Some(image_id) = &message.related_image_id {
            println!("  -> image {}", truncate(image_id, 8));
        }
    }
    *printed = state.transcript.len();
}

fn show_pending(state: &SessionState) {
    if let Some(action) = &state.pending_action {
        println!();
        println!("  PENDING: {} ({})", action.label, action.description);
        println!("  /confirm to run, /dismiss to discard");
    }
}

fn print_gallery(state: &SessionState) {
    if state.gallery.is_empty() {
        println!("  Gallery is empty.");
        return;
    }
    println!("  {} assets (newest first):", state.gallery.len());
    for image in state.gallery.iter() {
        println!(
            "  {}  {:?}  {}",
            truncate(&image.id, 8),
            image.kind,
            truncate(&image.prompt, 60)
        );
    }
}

fn print_help() {
    println!();
    println!("  Chat freely, or use:");
    println!("    /upload <path>   upload a logo and generate the full system");
    println!("    /confirm         run the pending action");
    println!("    /dismiss         discard the pending action");
    println!("    /random          queue a surprise-me generation");
    println!("    /gallery         list generated assets");
    println!("    /edit <id>       select an asset for modification");
    println!("    /done            leave edit mode");
    println!("    /reset           drop the logo and start over");
    println!("    /quit            exit (Ctrl+C cancels a running generation)");
}
