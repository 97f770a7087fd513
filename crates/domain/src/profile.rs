//! Profile payloads served by `/about` and `/main-info`.

use serde::{Deserialize, Serialize};

/// External profile links shown in the About page and the footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLinks {
    /// GitHub profile URL.
    #[serde(default)]
    pub github: Option<String>,
    /// `LinkedIn` profile URL.
    #[serde(default)]
    pub linkedin: Option<String>,
}

impl ContactLinks {
    /// Returns true when no link is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.github.is_none() && self.linkedin.is_none()
    }
}

/// Biography and contact details of the site owner.
///
/// Every field except `name` may be missing from the payload; views render
/// nothing for an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInfo {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Job title.
    #[serde(default)]
    pub title: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// City or region.
    #[serde(default)]
    pub location: Option<String>,
    /// Headshot image URL.
    #[serde(default)]
    pub headshot: Option<String>,
    /// Biography or introduction text.
    #[serde(default, alias = "intro")]
    pub bio: Option<String>,
    /// Ordered list of technologies.
    #[serde(default)]
    pub tech_stack: Vec<String>,
    /// Expertise paragraph.
    #[serde(default)]
    pub expertise: Option<String>,
    /// GitHub and `LinkedIn` links.
    #[serde(default)]
    pub links: ContactLinks,
}

/// The headline subset of [`ProfileInfo`] used by the main-info block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainInfo {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Job title.
    #[serde(default)]
    pub title: Option<String>,
    /// City or region.
    #[serde(default)]
    pub location: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Headshot image URL.
    #[serde(default)]
    pub headshot: Option<String>,
}

impl MainInfo {
    /// The `mailto:` link for the email, if any.
    #[must_use]
    pub fn mailto(&self) -> Option<String> {
        self.email.as_ref().map(|email| format!("mailto:{email}"))
    }
}

impl From<&ProfileInfo> for MainInfo {
    fn from(profile: &ProfileInfo) -> Self {
        Self {
            name: profile.name.clone(),
            title: profile.title.clone(),
            location: profile.location.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            headshot: profile.headshot.clone(),
        }
    }
}
