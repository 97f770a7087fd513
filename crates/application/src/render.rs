//! Content trees produced by the pages.
//!
//! Pages render into a small block model instead of markup so the shell,
//! the binary and the tests share one representation. Absent optional
//! payload fields produce no block at all.

use std::fmt;

use folio_domain::{
    ContactField, ContactLinks, MainInfo, NavigationState, ProfileInfo, ProjectEntry, Route,
    ThemePreference,
};

use crate::contact::BannerKind;

/// One element of a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Section heading, level 1 to 3.
    Heading {
        /// Heading level.
        level: u8,
        /// Heading text.
        text: String,
    },
    /// Free text.
    Paragraph(String),
    /// Labelled value.
    Field {
        /// Label.
        label: &'static str,
        /// Value.
        value: String,
    },
    /// External link.
    Link {
        /// Link text.
        label: String,
        /// Target URL.
        href: String,
    },
    /// Image reference.
    Image {
        /// Source URL.
        src: String,
        /// Alternative text.
        alt: String,
    },
    /// Inline list of tags (tech stack, project technologies).
    Tags(Vec<String>),
    /// Project card.
    Card {
        /// Card title.
        title: String,
        /// Card content.
        body: Vec<Self>,
    },
    /// Form input.
    Input {
        /// Field the input edits.
        field: ContactField,
        /// Current value.
        value: String,
    },
    /// Form button.
    Button {
        /// Button label.
        label: String,
        /// Whether the button accepts clicks.
        enabled: bool,
    },
    /// Success or error banner.
    Banner {
        /// Banner style.
        kind: BannerKind,
        /// Banner text.
        text: String,
    },
}

impl Block {
    fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: text.into(),
        }
    }

    fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            label: label.into(),
            href: href.into(),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heading { level, text } => {
                write!(f, "{} {text}", "#".repeat(usize::from(*level)))
            }
            Self::Paragraph(text) => f.write_str(text),
            Self::Field { label, value } => write!(f, "{label}: {value}"),
            Self::Link { label, href } => write!(f, "[{label}]({href})"),
            Self::Image { src, alt } => write!(f, "![{alt}]({src})"),
            Self::Tags(tags) => write!(f, "{}", tags.join(" · ")),
            Self::Card { title, body } => {
                write!(f, "## {title}")?;
                for block in body {
                    write!(f, "\n  {block}")?;
                }
                Ok(())
            }
            Self::Input { field, value } => write!(f, "{field}: [{value}]"),
            Self::Button { label, enabled } => {
                if *enabled {
                    write!(f, "<{label}>")
                } else {
                    write!(f, "<{label}> (disabled)")
                }
            }
            Self::Banner { kind, text } => match kind {
                BannerKind::Success => write!(f, "✔ {text}"),
                BannerKind::Error => write!(f, "✘ {text}"),
            },
        }
    }
}

/// Render decision of a data-bound view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Request pending.
    Loading,
    /// Request failed; the message replaces the content.
    Error(String),
    /// Loaded content.
    Content(Vec<Block>),
}

impl Rendered {
    /// The content blocks, empty unless loaded.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        match self {
            Self::Content(blocks) => blocks,
            Self::Loading | Self::Error(_) => &[],
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("Loading..."),
            Self::Error(message) => f.write_str(message),
            Self::Content(blocks) => write_blocks(f, blocks),
        }
    }
}

fn write_blocks(f: &mut fmt::Formatter<'_>, blocks: &[Block]) -> fmt::Result {
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{block}")?;
    }
    Ok(())
}

/// Header bar state at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    /// Site title.
    pub title: String,
    /// Navigation links and whether each is the active page.
    pub links: Vec<(Route, bool)>,
    /// Mobile menu and scroll state.
    pub navigation: NavigationState,
    /// Active theme, for the toggle icon.
    pub theme: ThemePreference,
}

impl fmt::Display for HeaderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for (route, active) in &self.links {
            if *active {
                write!(f, "  [{}]", route.label())?;
            } else {
                write!(f, "  {}", route.label())?;
            }
        }
        let icon = if self.theme.is_dark() { "☀" } else { "☾" };
        write!(f, "  {icon}")?;
        if self.navigation.menu_open {
            write!(f, "  (menu open)")?;
        }
        Ok(())
    }
}

/// A full page: header, routed body and footer.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Header bar.
    pub header: HeaderView,
    /// Routed page content.
    pub body: Rendered,
    /// Footer blocks.
    pub footer: Vec<Block>,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f, "{}", "─".repeat(40))?;
        writeln!(f, "{}", self.body)?;
        writeln!(f, "{}", "─".repeat(40))?;
        write_blocks(f, &self.footer)
    }
}

/// Content of the About page.
#[must_use]
pub fn about_blocks(profile: &ProfileInfo) -> Vec<Block> {
    let mut blocks = vec![Block::heading(1, profile.name.clone())];
    if let Some(title) = &profile.title {
        blocks.push(Block::heading(2, title.clone()));
    }
    if let Some(headshot) = &profile.headshot {
        blocks.push(Block::Image {
            src: headshot.clone(),
            alt: profile.name.clone(),
        });
    }
    if let Some(email) = &profile.email {
        blocks.push(Block::link(email.clone(), format!("mailto:{email}")));
    }
    if let Some(location) = &profile.location {
        blocks.push(Block::Field {
            label: "Location",
            value: location.clone(),
        });
    }
    if let Some(bio) = &profile.bio {
        blocks.push(Block::Paragraph(bio.clone()));
    }
    if !profile.tech_stack.is_empty() {
        blocks.push(Block::heading(3, "Tech Stack"));
        blocks.push(Block::Tags(profile.tech_stack.clone()));
    }
    if let Some(expertise) = &profile.expertise {
        blocks.push(Block::heading(3, "Expertise"));
        blocks.push(Block::Paragraph(expertise.clone()));
    }
    blocks.extend(link_blocks(&profile.links));
    blocks
}

/// Content of the main-info block.
#[must_use]
pub fn main_info_blocks(info: &MainInfo) -> Vec<Block> {
    let mut blocks = Vec::new();
    if let Some(headshot) = &info.headshot {
        blocks.push(Block::Image {
            src: headshot.clone(),
            alt: "Headshot".to_string(),
        });
    }
    blocks.push(Block::heading(1, info.name.clone()));
    if let Some(title) = &info.title {
        blocks.push(Block::heading(2, title.clone()));
    }
    if let Some(location) = &info.location {
        blocks.push(Block::Field {
            label: "Location",
            value: location.clone(),
        });
    }
    if let (Some(email), Some(mailto)) = (&info.email, info.mailto()) {
        blocks.push(Block::link(email.clone(), mailto));
    }
    if let Some(phone) = &info.phone {
        blocks.push(Block::Field {
            label: "Phone",
            value: phone.clone(),
        });
    }
    blocks
}

/// One card per project, in server order.
#[must_use]
pub fn project_blocks(projects: &[ProjectEntry]) -> Vec<Block> {
    projects
        .iter()
        .map(|project| {
            let mut body = Vec::new();
            if let Some(image) = &project.image {
                body.push(Block::Image {
                    src: image.clone(),
                    alt: project.name.clone(),
                });
            }
            if let Some(description) = &project.description {
                body.push(Block::Paragraph(description.clone()));
            }
            if !project.tech.is_empty() {
                body.push(Block::Tags(project.tech.clone()));
            }
            if let Some(github) = &project.github {
                body.push(Block::link("GitHub", github.clone()));
            }
            if let Some(website) = &project.website {
                body.push(Block::link("Website", website.clone()));
            }
            Block::Card {
                title: project.name.clone(),
                body,
            }
        })
        .collect()
}

/// Footer with the owner line and, once known, the profile links.
#[must_use]
pub fn footer_blocks(owner: &str, year: i32, links: Option<&ContactLinks>) -> Vec<Block> {
    let mut blocks = vec![Block::Paragraph(format!("My Portfolio by {owner} © {year}"))];
    if let Some(links) = links {
        blocks.extend(link_blocks(links));
    }
    blocks
}

fn link_blocks(links: &ContactLinks) -> Vec<Block> {
    let mut blocks = Vec::new();
    if let Some(github) = &links.github {
        blocks.push(Block::link("GitHub", github.clone()));
    }
    if let Some(linkedin) = &links.linkedin {
        blocks.push(Block::link("LinkedIn", linkedin.clone()));
    }
    blocks
}
