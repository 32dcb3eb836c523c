//! Event catalog and photo galleries

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Photos shown per event gallery
pub const GALLERY_SIZE: usize = 24;

/// Label stamped in the corner of every photo
pub const WATERMARK: &str = "PixFlow";

/// A photographed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub slug: String,
    pub title: String,
    /// Display date, e.g. "October 31, 2023"
    pub date: String,
    pub location: String,
    pub cover_url: String,
    pub card_url: String,
}

/// One downloadable gallery photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub index: usize,
    pub url: String,
    pub alt: String,
    pub download_url: String,
    pub watermark: String,
}

impl Event {
    fn new(slug: &str, title: &str, date: &str, location: &str, image_id: &str) -> Self {
        let image = format!("https://images.unsplash.com/{}?q=80&auto=format&fit=crop", image_id);
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            location: location.to_string(),
            cover_url: format!("{}&w=1600", image),
            card_url: format!("{}&w=1400", image),
        }
    }

    /// Gallery photos, seeded by the event slug
    pub fn photos(&self) -> Vec<Photo> {
        (0..GALLERY_SIZE)
            .map(|i| {
                let url = format!("https://picsum.photos/seed/{}-{}/1200/800", self.slug, i);
                Photo {
                    index: i,
                    alt: format!("{} {}", self.title, i + 1),
                    download_url: url.clone(),
                    url,
                    watermark: WATERMARK.to_string(),
                }
            })
            .collect()
    }
}

/// Events known to the site
#[derive(Debug, Clone)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// The events currently featured on the site
    pub fn demo() -> Self {
        Self::new(vec![
            Event::new(
                "halloween-party-2023",
                "Halloween Party 2023",
                "October 31, 2023",
                "Downtown Hall, NYC",
                "photo-1500530855697-b586d89ba3ee",
            ),
            Event::new(
                "labor-day-party",
                "Labor Day Party",
                "August 10, 2023",
                "City Park",
                "photo-1511795409834-ef04bbd61622",
            ),
        ])
    }

    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, slug: &str) -> AppResult<&Event> {
        self.events
            .iter()
            .find(|event| event.slug == slug)
            .ok_or_else(|| AppError::EventNotFound(slug.to_string()))
    }
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::demo()
    }
}
