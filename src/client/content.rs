//! Homepage and CMS sections.
//!
//! Each section is one REST resource holding a JSON document. Reads are
//! public; replacing or resetting a section needs the session credential.

use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use serde_json::Value;

use super::{Access, ApiClient};
use crate::errors::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentSection {
    HomeHero,
    HomeAbout,
    HomeVideo,
    HomeCounter,
    HomeContact,
    HomeTestimonials,
    HouseOffers,
    PropertyFeature,
    Footer,
    About,
    Contact,
}

impl ContentSection {
    pub const ALL: [ContentSection; 11] = [
        ContentSection::HomeHero,
        ContentSection::HomeAbout,
        ContentSection::HomeVideo,
        ContentSection::HomeCounter,
        ContentSection::HomeContact,
        ContentSection::HomeTestimonials,
        ContentSection::HouseOffers,
        ContentSection::PropertyFeature,
        ContentSection::Footer,
        ContentSection::About,
        ContentSection::Contact,
    ];

    /// Resource name, also the last segment of its path.
    pub fn name(&self) -> &'static str {
        match self {
            ContentSection::HomeHero => "home-hero",
            ContentSection::HomeAbout => "home-about",
            ContentSection::HomeVideo => "home-video",
            ContentSection::HomeCounter => "home-counter",
            ContentSection::HomeContact => "home-contact",
            ContentSection::HomeTestimonials => "home-testimonials",
            ContentSection::HouseOffers => "house-offers",
            ContentSection::PropertyFeature => "property-feature",
            ContentSection::Footer => "footer",
            ContentSection::About => "about",
            ContentSection::Contact => "contact",
        }
    }

    pub fn path(&self) -> String {
        format!("/api/{}", self.name())
    }

    /// The admin view that edits this section.
    pub fn view(&self) -> &'static str {
        match self {
            ContentSection::About => "/about-us",
            ContentSection::Contact => "/contact-us",
            _ => "/edit-homepage",
        }
    }
}

impl fmt::Display for ContentSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContentSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentSection::ALL
            .into_iter()
            .find(|section| section.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = ContentSection::ALL.iter().map(|s| s.name()).collect();
                format!("unknown section '{}', expected one of: {}", s, known.join(", "))
            })
    }
}

impl ApiClient {
    /// Current representation of `section`; the backend answers with its
    /// default shape when nothing was saved yet.
    pub async fn get_section(&self, section: ContentSection) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &section.path(), Access::Public);
        self.send_json(request).await
    }

    /// Replace the whole section and return what the backend stored.
    pub async fn put_section(
        &self,
        section: ContentSection,
        body: &Value,
    ) -> Result<Value, ApiError> {
        if !body.is_object() {
            return Err(ApiError::Validation(format!(
                "{} must be a JSON object",
                section
            )));
        }
        let request = self
            .request(Method::PUT, &section.path(), Access::Protected)
            .json(body);
        self.send_json(request).await
    }

    /// Restore the section's default shape.
    pub async fn reset_section(&self, section: ContentSection) -> Result<Value, ApiError> {
        let path = format!("{}/reset", section.path());
        let request = self.request(Method::POST, &path, Access::Protected);
        self.send_json(request).await
    }
}
