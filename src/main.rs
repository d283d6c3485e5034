//=========================================================================
// thought-cloud
//
// Native viewer: loads a JSON note list and opens the cloud in a window.
// Tab switches between the cloud and the timeline, Escape closes an
// expanded note.
//
//=========================================================================

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::Parser;
    use flexi_logger::Logger;
    use log::info;

    use thought_cloud::{core::load_notes, CloudBuilder};

    #[derive(Parser, Debug)]
    #[command(name = "thought-cloud", version, about)]
    struct Args {
        /// Path to the note list (JSON array of {content, time})
        #[arg(default_value = "data.json")]
        path: PathBuf,

        /// Window width in logical pixels
        #[arg(long, default_value_t = 960)]
        width: u32,

        /// Window height in logical pixels
        #[arg(long, default_value_t = 720)]
        height: u32,

        /// Log specification, overridden by RUST_LOG
        #[arg(long, default_value = "info")]
        log: String,
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let args = Args::parse();

        let _logger = Logger::try_with_env_or_str(&args.log)?.start()?;
        info!(target: "cloud", "Loading notes from {}", args.path.display());

        let notes = load_notes(&args.path);
        if let Ok(notes) = &notes {
            info!(target: "cloud", "Loaded {} notes", notes.len());
        }

        CloudBuilder::new()
            .with_window_size(args.width, args.height)
            .build()
            .run(notes)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
