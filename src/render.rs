use log::warn;

use crate::audio::{AudioVolume, UNMUTE_DELAY_MS};
use crate::models::profile::{
    non_blank, non_empty, Icon, Link, ProfileDocument, Project, DEFAULT_BIO, DEFAULT_LOCATION,
    DEFAULT_NAME, DEFAULT_PROJECT_ICON, NO_DESTINATION,
};
use crate::theme::ThemeColors;

const FALLBACK_GLYPH: &str = "🔗";

/// Named slots of the public page. The renderer only talks to this, so any
/// host (HTML string, test recorder) can sit behind it.
pub trait PageTemplate {
    /// `None` shows the fallback glyph.
    fn set_avatar(&mut self, url: Option<&str>);
    fn set_name(&mut self, name: &str);
    fn set_bio(&mut self, bio: &str);
    fn set_location(&mut self, location: &str);
    fn show_audio(&mut self, src: &str, volume: AudioVolume);
    fn set_accent(&mut self, theme: &ThemeColors);
    fn append_icon_row(&mut self, icons: &[Icon]);
    fn append_link_card(&mut self, card: &LinkCard);
    fn append_project_card(&mut self, card: &ProjectCard);
    /// Cosmetic listeners (ripple, parallax, scroll reveal).
    fn init_effects(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCard {
    pub label: String,
    pub href: String,
    pub target: &'static str,
    pub image: Option<String>,
    /// Shown when there is no image, or the image fails to load.
    pub glyph: String,
}

impl LinkCard {
    pub fn new(label: &str, url: &str, image: Option<&str>, glyph: Option<&str>) -> Self {
        LinkCard {
            label: label.to_string(),
            href: url.to_string(),
            target: if url == NO_DESTINATION { "_self" } else { "_blank" },
            image: image
                .map(str::trim)
                .filter(|i| !i.is_empty())
                .map(str::to_string),
            glyph: glyph.unwrap_or_else(|| label_glyph(label)).to_string(),
        }
    }

    fn from_link(link: &Link) -> Self {
        LinkCard::new(&link.label, &link.url, link.image_url.as_deref(), None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

impl ProjectCard {
    pub fn from_project(project: &Project) -> Self {
        let or = |value: &str, default: &str| {
            if value.is_empty() { default.to_string() } else { value.to_string() }
        };
        ProjectCard {
            icon: or(&project.icon, DEFAULT_PROJECT_ICON),
            title: project.title.clone(),
            description: project.description.clone(),
            url: or(&project.url, NO_DESTINATION),
        }
    }
}

/// Emoji stand-in for a link label.
pub fn label_glyph(label: &str) -> &'static str {
    match label {
        "GitHub" => "🐙",
        "Discord" => "💬",
        "Roblox" => "🎮",
        "Portfolio" => "🌐",
        "Email" => "📧",
        "Twitter" => "🐦",
        "LinkedIn" => "💼",
        "Instagram" => "📸",
        _ => FALLBACK_GLYPH,
    }
}

/// Cards shown when the document has neither icons nor links.
fn default_link_cards() -> Vec<LinkCard> {
    vec![
        LinkCard::new("GitHub", "https://github.com/", None, Some("🐙")),
        LinkCard::new("Portfolio", NO_DESTINATION, None, Some("🌐")),
        LinkCard::new("Email", "mailto:", None, Some("📧")),
    ]
}

/// Project `doc` onto `page`. Every slot is written: absent text fields get
/// their defaults rather than keeping whatever the page held before.
pub fn render_profile(doc: &ProfileDocument, volume: AudioVolume, page: &mut dyn PageTemplate) {
    page.set_avatar(non_empty(&doc.avatar));

    page.set_name(non_empty(&doc.name).unwrap_or(DEFAULT_NAME));
    page.set_bio(non_empty(&doc.bio).unwrap_or(DEFAULT_BIO));
    page.set_location(non_empty(&doc.location).unwrap_or(DEFAULT_LOCATION));

    if let Some(src) = non_blank(&doc.audio_url) {
        page.show_audio(src.trim(), volume);
    }

    if let Some(accent) = non_empty(&doc.accent_color) {
        match ThemeColors::derive(accent) {
            Some(theme) => page.set_accent(&theme),
            None => warn!("Ignoring accent color {:?}: expected #RRGGBB", accent),
        }
    }

    // Icons win over links: at most one of the two is ever rendered.
    let icons = doc.icon_row();
    if !icons.is_empty() {
        page.append_icon_row(&icons);
    } else {
        let links = doc.links.as_deref().unwrap_or_default();
        let cards = if links.is_empty() {
            default_link_cards()
        } else {
            links.iter().map(LinkCard::from_link).collect()
        };
        for card in &cards {
            page.append_link_card(card);
        }
    }

    for project in doc.projects.as_deref().unwrap_or_default() {
        page.append_project_card(&ProjectCard::from_project(project));
    }

    page.init_effects();
}

// ── HTML host ──────────────────────────────────────────

/// Server-side `PageTemplate` producing the full public page.
pub struct HtmlPage {
    avatar_html: String,
    name: String,
    bio: String,
    location: String,
    audio_html: String,
    theme_css: String,
    links_html: String,
    projects_html: String,
    effects: bool,
}

impl Default for HtmlPage {
    fn default() -> Self {
        HtmlPage {
            avatar_html: avatar_fallback(true),
            name: DEFAULT_NAME.to_string(),
            bio: DEFAULT_BIO.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            audio_html: String::new(),
            theme_css: String::new(),
            links_html: String::new(),
            projects_html: String::new(),
            effects: false,
        }
    }
}

fn avatar_fallback(visible: bool) -> String {
    let style = if visible { "" } else { " style=\"display:none\"" };
    format!("<div class=\"avatar avatar-fallback\"{}>👤</div>", style)
}

impl PageTemplate for HtmlPage {
    fn set_avatar(&mut self, url: Option<&str>) {
        self.avatar_html = match url {
            Some(url) => format!(
                "<img id=\"avatar-img\" class=\"avatar\" src=\"{}\" alt=\"Avatar\" \
                 onerror=\"this.style.display='none'; this.nextElementSibling.style.display='block';\">{}",
                html_escape(url),
                avatar_fallback(false)
            ),
            None => avatar_fallback(true),
        };
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn set_bio(&mut self, bio: &str) {
        self.bio = bio.to_string();
    }

    fn set_location(&mut self, location: &str) {
        self.location = location.to_string();
    }

    fn show_audio(&mut self, src: &str, volume: AudioVolume) {
        self.audio_html = format!(
            r#"<div id="audio-player" class="audio-player">
    <audio id="background-audio" src="{src}" data-volume="{fraction}" loop preload="auto"></audio>
    <button id="audio-toggle" type="button"><span id="audio-play-icon">▶</span><span id="audio-pause-icon" style="display:none">⏸</span></button>
    <button id="volume-down" type="button">−</button>
    <input id="volume-slider" type="range" min="0" max="100" value="{percent}">
    <button id="volume-up" type="button">+</button>
</div>"#,
            src = html_escape(src),
            fraction = volume.as_fraction(),
            percent = volume.percent(),
        );
    }

    fn set_accent(&mut self, theme: &ThemeColors) {
        self.theme_css = format!("<style>{}</style>", theme.css_variables());
    }

    fn append_icon_row(&mut self, icons: &[Icon]) {
        let mut html = String::from("<div class=\"icon-row\">");
        for icon in icons {
            html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"icon-box\"><img src=\"{}\" alt=\"Icon\"></a>",
                html_escape(&icon.url),
                html_escape(&icon.image)
            ));
        }
        html.push_str("</div>\n");
        self.links_html.push_str(&html);
    }

    fn append_link_card(&mut self, card: &LinkCard) {
        let content = match &card.image {
            Some(image) => format!(
                "<img src=\"{}\" alt=\"{}\" class=\"link-card-image\" \
                 onerror=\"this.style.display='none'; this.nextElementSibling.style.display='flex';\">\
                 <span class=\"link-card-fallback\" style=\"display:none\">{}</span>",
                html_escape(image),
                html_escape(&card.label),
                card.glyph
            ),
            None => format!("<span class=\"link-card-fallback\">{}</span>", card.glyph),
        };
        self.links_html.push_str(&format!(
            "<a href=\"{}\" class=\"link-card\" target=\"{}\" title=\"{}\">{}</a>\n",
            html_escape(&card.href),
            card.target,
            html_escape(&card.label),
            content
        ));
    }

    fn append_project_card(&mut self, card: &ProjectCard) {
        self.projects_html.push_str(&format!(
            r#"<div class="project-card">
    <div class="project-glow"></div>
    <div class="project-icon">{icon}</div>
    <h3 class="project-title">{title}</h3>
    <p class="project-description">{description}</p>
    <a href="{url}" class="project-link" target="_blank"><span>View Project</span><span class="project-arrow">→</span></a>
</div>
"#,
            icon = html_escape(&card.icon),
            title = html_escape(&card.title),
            description = html_escape(&card.description),
            url = html_escape(&card.url),
        ));
    }

    fn init_effects(&mut self) {
        self.effects = true;
    }
}

impl HtmlPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_html(self) -> String {
        let projects = if self.projects_html.is_empty() {
            String::new()
        } else {
            format!("<section class=\"projects\">\n{}</section>", self.projects_html)
        };
        let audio_script = if self.audio_html.is_empty() {
            String::new()
        } else {
            audio_script()
        };
        let effects_script = if self.effects { EFFECTS_SCRIPT } else { "" };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/css/profile.css">
{theme}
</head>
<body>
<main class="profile">
    <div class="avatar-container">{avatar}</div>
    <h1 id="profile-name">{name}</h1>
    <p id="profile-bio">{bio}</p>
    <p id="profile-location">{location}</p>
    <div id="links-container">
{links}    </div>
    {projects}
</main>
{audio}
{audio_script}
{effects_script}
</body>
</html>"#,
            title = html_escape(&self.name),
            theme = self.theme_css,
            avatar = self.avatar_html,
            name = html_escape(&self.name),
            bio = html_escape(&self.bio),
            location = html_escape(&self.location),
            links = self.links_html,
            projects = projects,
            audio = self.audio_html,
            audio_script = audio_script,
            effects_script = effects_script,
        )
    }
}

/// Muted autoplay, unmuted shortly after playback starts. Volume changes
/// go through `/api/volume`; the server clamps and answers the stored value.
fn audio_script() -> String {
    format!(
        r#"<script>
(function() {{
    const audio = document.getElementById('background-audio');
    const slider = document.getElementById('volume-slider');
    const playIcon = document.getElementById('audio-play-icon');
    const pauseIcon = document.getElementById('audio-pause-icon');
    const showPlaying = (playing) => {{
        playIcon.style.display = playing ? 'none' : 'inline';
        pauseIcon.style.display = playing ? 'inline' : 'none';
    }};
    const apply = (v) => {{
        slider.value = v;
        audio.volume = v / 100;
    }};
    const send = (path, body) => fetch(path, {{
        method: 'POST',
        headers: body ? {{ 'Content-Type': 'application/json' }} : {{}},
        body: body ? JSON.stringify(body) : undefined
    }}).then(r => r.json()).then(r => apply(r.volume))
      .catch(e => console.error('Could not save volume:', e));
    const setVolume = (v) => {{
        apply(v);
        send('/api/volume', {{ volume: v }});
    }};
    audio.volume = parseFloat(audio.dataset.volume);
    audio.muted = true;
    audio.play().then(() => {{
        setTimeout(() => {{ audio.muted = false; }}, {delay});
        showPlaying(true);
    }}).catch(e => {{
        console.log('Autoplay failed, waiting for user interaction:', e);
        audio.muted = false;
    }});
    document.getElementById('audio-toggle').addEventListener('click', () => {{
        if (audio.paused) {{
            audio.play().catch(e => console.error('Error playing audio:', e));
        }} else {{
            audio.pause();
        }}
    }});
    audio.addEventListener('play', () => showPlaying(true));
    audio.addEventListener('pause', () => showPlaying(false));
    slider.addEventListener('input', () => setVolume(parseInt(slider.value)));
    document.getElementById('volume-down').addEventListener('click', () => send('/api/volume/down'));
    document.getElementById('volume-up').addEventListener('click', () => send('/api/volume/up'));
}})();
</script>"#,
        delay = UNMUTE_DELAY_MS
    )
}

const EFFECTS_SCRIPT: &str = r#"<script>
document.querySelectorAll('.link-card').forEach(card => {
    card.addEventListener('click', function(e) {
        const ripple = document.createElement('span');
        const rect = this.getBoundingClientRect();
        const size = Math.max(rect.width, rect.height) * 1.5;
        ripple.style.width = ripple.style.height = size + 'px';
        ripple.style.left = (e.clientX - rect.left - size / 2) + 'px';
        ripple.style.top = (e.clientY - rect.top - size / 2) + 'px';
        ripple.classList.add('ripple');
        this.appendChild(ripple);
        setTimeout(() => ripple.remove(), 800);
    });
});
const avatarContainer = document.querySelector('.avatar-container');
const avatar = document.querySelector('.avatar-container .avatar');
if (avatarContainer && avatar) {
    avatarContainer.addEventListener('mousemove', (e) => {
        const rect = avatarContainer.getBoundingClientRect();
        const x = (e.clientX - rect.left - rect.width / 2) / 15;
        const y = (e.clientY - rect.top - rect.height / 2) / 15;
        avatar.style.transform = `translate(${x}px, ${y}px) scale(1.05)`;
    });
    avatarContainer.addEventListener('mouseleave', () => {
        avatar.style.transform = 'translate(0, 0) scale(1)';
    });
}
const reveal = new IntersectionObserver((entries) => {
    entries.forEach((entry, index) => {
        if (entry.isIntersecting) {
            setTimeout(() => entry.target.classList.add('revealed'), index * 100);
        }
    });
}, { threshold: 0.15, rootMargin: '0px 0px -80px 0px' });
document.querySelectorAll('.project-card').forEach(card => reveal.observe(card));
</script>"#;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
