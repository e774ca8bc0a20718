//! Source stream probing via ffprobe.

use std::path::Path;
use std::process::Command;

/// Properties of the first video stream of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    /// Raw frame rate as reported by ffprobe, possibly fractional
    /// (e.g. "30000/1001"). Passed through to the encoder unchanged so the
    /// output frame rate matches the input exactly.
    pub frame_rate: String,

    /// Stream width in pixels.
    pub width: u32,

    /// Stream height in pixels.
    pub height: u32,
}

/// Probe the first video stream of `path`.
pub fn probe_stream(path: &Path) -> Option<StreamInfo> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,r_frame_rate",
            "-of",
            "csv=p=0",
        ])
        .arg(path)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let raw = String::from_utf8(output.stdout).ok()?;
    parse_probe_line(raw.lines().next()?.trim())
}

fn parse_probe_line(line: &str) -> Option<StreamInfo> {
    let mut fields = line.split(',');
    let width = fields.next()?.parse::<u32>().ok()?;
    let height = fields.next()?.parse::<u32>().ok()?;
    let frame_rate = fields.next()?.trim().to_string();
    if width == 0 || height == 0 || frame_rate.is_empty() || frame_rate == "0/0" {
        return None;
    }
    Some(StreamInfo {
        frame_rate,
        width,
        height,
    })
}

/// Whether `binary` resolves on the current PATH.
pub fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_frame_rate() {
        let info = parse_probe_line("1920,1080,30/1").unwrap();
        assert_eq!(info.width, 1920);
        assert_eq!(info.height, 1080);
        assert_eq!(info.frame_rate, "30/1");
    }

    #[test]
    fn test_parse_fractional_frame_rate() {
        let info = parse_probe_line("1280,720,30000/1001").unwrap();
        assert_eq!(info.frame_rate, "30000/1001");
    }

    #[test]
    fn test_parse_rejects_degenerate_streams() {
        assert!(parse_probe_line("0,1080,30/1").is_none());
        assert!(parse_probe_line("1920,1080,0/0").is_none());
        assert!(parse_probe_line("garbage").is_none());
    }
}
