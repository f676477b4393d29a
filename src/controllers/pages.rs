use crate::domain::narration::VoiceOption;
use crate::infrastructure::config::ResponseMode;

/// Audio to embed when the page is rendered after a successful narration
pub struct Playback<'a> {
    pub story_text: &'a str,
    pub audio_url: &'a str,
}

/// Script used in JSON mode: posts the form with fetch and renders the
/// returned `audio_urls`, or the `error` field of a failed response.
const FETCH_SCRIPT: &str = r#"
<script>
document.getElementById('narrateForm').addEventListener('submit', async function (event) {
    event.preventDefault();
    const form = event.target;
    const button = document.getElementById('streamButton');
    const playbackArea = document.getElementById('playbackArea');
    const loadingMessage = document.getElementById('loadingMessage');
    const errorMessage = document.getElementById('errorMessage');

    playbackArea.innerHTML = '';
    errorMessage.textContent = '';
    errorMessage.classList.add('hidden');

    if (!form.story.value.trim()) {
        errorMessage.textContent = 'Please enter some story text.';
        errorMessage.classList.remove('hidden');
        return;
    }
    if (!form.voice.value) {
        errorMessage.textContent = 'Please select a voice.';
        errorMessage.classList.remove('hidden');
        return;
    }

    button.disabled = true;
    loadingMessage.classList.remove('hidden');

    try {
        const response = await fetch(form.action, {
            method: 'POST',
            headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
            body: new URLSearchParams(new FormData(form))
        });
        const data = await response.json();
        if (!response.ok) {
            throw new Error(data.error || `HTTP error! Status: ${response.status}`);
        }
        if (data.audio_urls && data.audio_urls.length > 0) {
            data.audio_urls.forEach(url => {
                const audio = document.createElement('audio');
                audio.controls = true;
                audio.src = url;
                playbackArea.appendChild(audio);
            });
        } else {
            errorMessage.textContent = 'No audio URLs received from the server.';
            errorMessage.classList.remove('hidden');
        }
    } catch (error) {
        errorMessage.textContent = `Error: ${error.message}. Please try again.`;
        errorMessage.classList.remove('hidden');
    } finally {
        button.disabled = false;
        loadingMessage.classList.add('hidden');
    }
});
</script>
"#;

/// Render the landing page.
///
/// In page mode the form posts natively and the result comes back as this
/// same page with `playback` filled in; in JSON mode the fetch script handles
/// the round trip.
pub fn render_index_page(
    voices: &[VoiceOption],
    response_mode: ResponseMode,
    playback: Option<Playback<'_>>,
) -> String {
    let selected_story = playback.as_ref().map(|p| p.story_text).unwrap_or("");

    let voice_options: String = voices
        .iter()
        .map(|voice| {
            format!(
                r#"<option value="{}">{}</option>"#,
                escape_html(&voice.id),
                escape_html(&voice.label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n                ");

    let player = match &playback {
        Some(p) => format!(
            r#"<audio controls src="{url}"></audio>
            <p><a href="{url}">Download narration</a></p>"#,
            url = escape_html(p.audio_url)
        ),
        None => String::new(),
    };

    let script = match response_mode {
        ResponseMode::Json => FETCH_SCRIPT,
        ResponseMode::Page => "",
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Narrator</title>
    <style>
        body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
        textarea {{ width: 100%; min-height: 12rem; }}
        .hidden {{ display: none; }}
        #errorMessage {{ color: #b00020; }}
        audio {{ display: block; margin-top: 1rem; width: 100%; }}
    </style>
</head>
<body>
    <h1>Narrator</h1>
    <form id="narrateForm" method="post" action="/narrate/">
        <label for="storyInput">Story</label>
        <textarea id="storyInput" name="story" placeholder="Once upon a time...">{story}</textarea>
        <label for="voiceSelector">Voice</label>
        <select id="voiceSelector" name="voice">
                <option value="">Select a voice</option>
                {voice_options}
        </select>
        <button id="streamButton" type="submit">Narrate</button>
    </form>
    <p id="loadingMessage" class="hidden">Generating narration, this can take up to a minute...</p>
    <p id="errorMessage" class="hidden"></p>
    <div id="playbackArea">
            {player}
    </div>
{script}
</body>
</html>
"#,
        story = escape_html(selected_story),
        voice_options = voice_options,
        player = player,
        script = script,
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
