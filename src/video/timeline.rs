//! Overlay timing and ffmpeg filter graph construction.

use std::path::Path;

use crate::config::VideoConfig;

/// Tolerance for float comparisons on the timeline.
const EPSILON: f64 = 1e-9;

/// Countdown numbers, in display order.
const COUNTDOWN: [u32; 3] = [3, 2, 1];

/// A centred text overlay shown for a time window.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub text: String,
    pub start: f64,
    pub duration: f64,
    pub font_size: u32,
    pub border_width: u32,
}

impl Overlay {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Place the title and the 3-2-1 countdown against the voice duration.
///
/// The title covers `[0, title_seconds)` when the voice is longer than that.
/// The countdown follows immediately, each number lasting
/// `min(countdown_max_seconds, remaining / 3)`.
pub fn plan_overlays(duration: f64, title: &str, config: &VideoConfig) -> Vec<Overlay> {
    let mut overlays = Vec::new();

    if duration > config.title_seconds {
        overlays.push(Overlay {
            text: title.to_string(),
            start: 0.0,
            duration: config.title_seconds,
            font_size: config.title_font_size,
            border_width: 2,
        });
    }

    let mut remaining = duration - config.title_seconds;
    if remaining <= EPSILON {
        return overlays;
    }

    let step = config.countdown_max_seconds.min(remaining / 3.0);
    if step <= EPSILON {
        return overlays;
    }

    let mut start = config.title_seconds;
    for number in COUNTDOWN {
        if remaining + EPSILON < step {
            break;
        }
        overlays.push(Overlay {
            text: number.to_string(),
            start,
            duration: step,
            font_size: config.countdown_font_size,
            border_width: 4,
        });
        start += step;
        remaining -= step;
    }

    overlays
}

/// Escape text for a single-quoted drawtext `text` value.
///
/// Apostrophes cannot appear inside the quotes, so they become typographic
/// ones. The result is only literal with `expansion=none` on the filter.
pub fn escape_drawtext(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\'' => escaped.push('\u{2019}'),
            '\\' => escaped.push_str("\\\\"),
            ':' => escaped.push_str("\\:"),
            '%' => escaped.push_str("\\%"),
            '\n' | '\r' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Quote a path used as a filter option value.
///
/// The graph parser strips the quotes and the option parser unescapes once
/// more. An apostrophe closes the quote and is escaped for both levels.
fn quote_filter_path(path: &Path) -> String {
    let escaped = path
        .to_string_lossy()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', "'\\\\\\''");
    format!("'{escaped}'")
}

/// Build one centred, black-bordered white `drawtext` filter.
pub fn drawtext_filter(overlay: &Overlay, config: &VideoConfig) -> String {
    let font = config
        .font_file
        .as_deref()
        .map(|path| format!("fontfile={}:", quote_filter_path(path)))
        .unwrap_or_default();

    format!(
        "drawtext={font}text='{}':fontsize={}:fontcolor=white:borderw={}:bordercolor=black:\
         x=(w-text_w)/2:y=(h-text_h)/2:expansion=none:enable='between(t,{:.3},{:.3})'",
        escape_drawtext(&overlay.text),
        overlay.font_size,
        overlay.border_width,
        overlay.start,
        overlay.end()
    )
}

/// Build the full ffmpeg argument list for one short.
///
/// Inputs: 0 = black canvas, 1 = voice, 2 = music (looped). The music is
/// trimmed to the voice, attenuated and mixed without normalisation.
pub fn build_ffmpeg_args(
    voice: &Path,
    music: &Path,
    output: &Path,
    duration: f64,
    overlays: &[Overlay],
    config: &VideoConfig,
) -> Vec<String> {
    let canvas = format!(
        "color=c=black:s={}x{}:r={}:d={:.3}",
        config.width, config.height, config.fps, duration
    );

    let video_chain = if overlays.is_empty() {
        "null".to_string()
    } else {
        overlays
            .iter()
            .map(|o| drawtext_filter(o, config))
            .collect::<Vec<_>>()
            .join(",")
    };

    let filter_complex = format!(
        "[0:v]{video_chain}[v];\
         [2:a]atrim=0:{duration:.3},asetpts=PTS-STARTPTS,volume={:.3}[bg];\
         [1:a][bg]amix=inputs=2:duration=first:dropout_transition=0:normalize=0[a]",
        config.music_volume
    );

    vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-f".to_string(),
        "lavfi".to_string(),
        "-i".to_string(),
        canvas,
        "-i".to_string(),
        voice.to_string_lossy().to_string(),
        "-stream_loop".to_string(),
        "-1".to_string(),
        "-i".to_string(),
        music.to_string_lossy().to_string(),
        "-filter_complex".to_string(),
        filter_complex,
        "-map".to_string(),
        "[v]".to_string(),
        "-map".to_string(),
        "[a]".to_string(),
        "-c:v".to_string(),
        config.video_codec.clone(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        "-r".to_string(),
        config.fps.to_string(),
        "-c:a".to_string(),
        config.audio_codec.clone(),
        "-t".to_string(),
        format!("{duration:.3}"),
        output.to_string_lossy().to_string(),
    ]
}
