//! HTML for the embeddable widget

use crate::domain::track::{TrackRecord, WidgetPayload};

const TEMPLATE: &str = include_str!("../../html/tracks.html");

pub fn render_widget(payload: &WidgetPayload) -> String {
    let title = escape_html(&payload.title);

    let thumbnails = payload
        .thumbnails
        .iter()
        .map(|url| format!(r#"      <img src="{}" alt="thumbnail" />"#, escape_html(url)))
        .collect::<Vec<_>>()
        .join("\n");

    let tracks = payload
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| render_track(i + 1, track))
        .collect::<Vec<_>>()
        .join("\n");

    fill_template(
        TEMPLATE,
        &[
            ("TITLE", title.as_str()),
            ("THUMBNAILS", thumbnails.as_str()),
            ("TRACKS", tracks.as_str()),
        ],
    )
}

/// Replaces each `{{NAME}}` marker in one pass, so inserted values are never
/// scanned for markers themselves. Unknown markers are kept as they are.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

fn render_track(position: usize, track: &TrackRecord) -> String {
    let meta = if track.now_playing() {
        r#"<div class="track-meta now-playing">now playing</div>"#.to_string()
    } else if let Some(play_count) = track.play_count() {
        let unit = if play_count == 1 { "play" } else { "plays" };
        format!(r#"<div class="track-meta">{play_count} {unit}</div>"#)
    } else {
        String::new()
    };

    format!(
        r#"          <li>
            <div class="track-index">{position}</div>
            <div class="track-info">
              <a href="{url}" target="_blank" rel="noopener noreferrer"><h3>{name}</h3></a>
              <span>{artist}</span>
            </div>
            {meta}
          </li>"#,
        url = escape_html(&track.url),
        name = escape_html(&track.name),
        artist = escape_html(&track.artist_name),
    )
}

/// Escapes text for use in element content and quoted attributes
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
