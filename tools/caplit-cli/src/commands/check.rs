//! Check system capabilities.

use caplit_render_engine::command_exists;
use caplit_speech::WhisperCli;

pub fn run() -> anyhow::Result<()> {
    println!("Caplit System Check");
    println!("{}", "=".repeat(50));

    let mut all_ok = true;

    for binary in ["ffmpeg", "ffprobe"] {
        if command_exists(binary) {
            println!("[OK] {binary} found in PATH");
        } else {
            println!("[MISSING] {binary} not found in PATH");
            all_ok = false;
        }
    }

    if WhisperCli::is_available() {
        println!("[OK] whisper CLI responds");
    } else {
        println!("[MISSING] whisper CLI not available (pip install openai-whisper)");
        all_ok = false;
    }

    println!();
    if all_ok {
        println!("All required tools are available. Caplit is ready.");
    } else {
        println!("Some required tools are missing. See above.");
    }

    Ok(())
}
