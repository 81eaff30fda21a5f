use festmap_entities::{booth::Booth, geo::MapPolygon};
use thiserror::Error;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AreaInvalidation {
    #[error("A booth area needs at least {} vertices", MapPolygon::MIN_VERTICES)]
    TooFewVertices,
    #[error("The area contains an invalid position")]
    InvalidPosition,
}

impl Validate for MapPolygon {
    type Error = AreaInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !self.is_closed() {
            return Err(Self::Error::TooFewVertices);
        }
        if !self.is_valid() {
            return Err(Self::Error::InvalidPosition);
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoothInvalidation {
    #[error("The name must not be empty")]
    Name,
    #[error(transparent)]
    Area(AreaInvalidation),
}

impl Validate for Booth {
    type Error = BoothInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !is_valid_name(&self.name) {
            return Err(Self::Error::Name);
        }
        self.area.validate().map_err(Self::Error::Area)?;
        Ok(())
    }
}

fn non_empty(s: String) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_owned())
    }
}

impl AutoCorrect for Booth {
    fn auto_correct(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self.description = self.description.trim().to_owned();
        self.operating_hours = self.operating_hours.trim().to_owned();
        self.contact = self.contact.and_then(non_empty);
        self.price = self.price.and_then(non_empty);
        self.webcam_url = self.webcam_url.and_then(non_empty);
        self.menu_items = self.menu_items.into_iter().filter_map(non_empty).collect();
        let mut tags: Vec<_> = self
            .tags
            .into_iter()
            .filter_map(non_empty)
            .map(|t| t.to_lowercase())
            .collect();
        tags.sort_unstable();
        tags.dedup();
        self.tags = tags;
        self
    }
}
