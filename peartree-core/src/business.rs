use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, Violations};

/// Contact, location and trading facts for the practice.
///
/// Loaded once from the site configuration and shared by every page through
/// an [`Arc`]. Nothing in the crate mutates it after [`BusinessFacts::shared`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BusinessFacts {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub address: PostalAddress,
    pub geo: GeoCoordinates,
    #[serde(default)]
    pub opening_hours: Vec<OpeningHours>,
    pub price_range: String,
    pub booking_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PostalAddress {
    pub street: String,
    pub locality: String,
    #[serde(default)]
    pub region: Option<String>,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OpeningHours {
    pub days: Vec<Weekday>,
    /// 24 hour clock, `HH:MM`
    pub opens: String,
    pub closes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        f.write_str(name)
    }
}

impl BusinessFacts {
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// `tel:` link target with spacing stripped.
    pub fn phone_href(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }

    pub fn address_lines(&self) -> Vec<&str> {
        let address = &self.address;
        let mut lines = vec![address.street.as_str(), address.locality.as_str()];
        if let Some(region) = &address.region {
            lines.push(region);
        }
        lines.push(&address.postal_code);
        lines
    }

    pub fn map_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.geo.latitude, self.geo.longitude
        )
    }

    /// Checks the facts every page depends on. Runs once, when the site is
    /// assembled, rather than per page.
    pub fn check(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();

        violations.require_text("business.name", &self.name);
        violations.require_text("business.phone", &self.phone);
        violations.require_text("business.price_range", &self.price_range);
        violations.require_text("business.booking_url", &self.booking_url);
        violations.require_text("business.address.street", &self.address.street);
        violations.require_text("business.address.locality", &self.address.locality);
        violations.require_text("business.address.postal_code", &self.address.postal_code);
        violations.require_text("business.address.country", &self.address.country);

        if self.phone.chars().filter(|c| c.is_ascii_digit()).count() < 7 {
            violations.push("business.phone", format!("`{}` is not a dialable number", self.phone));
        }
        if !(-90.0..=90.0).contains(&self.geo.latitude) {
            violations.push("business.geo.latitude", "must be between -90 and 90");
        }
        if !(-180.0..=180.0).contains(&self.geo.longitude) {
            violations.push("business.geo.longitude", "must be between -180 and 180");
        }
        for (i, hours) in self.opening_hours.iter().enumerate() {
            let field = format!("business.opening_hours[{i}]");
            if hours.days.is_empty() {
                violations.push(&field, "lists no days");
            }
            for time in [&hours.opens, &hours.closes] {
                if !is_clock_time(time) {
                    violations.push(&field, format!("`{time}` is not an HH:MM time"));
                }
            }
        }

        violations.into_result("business", ())
    }
}

fn is_clock_time(value: &str) -> bool {
    let Some((hours, minutes)) = value.split_once(':') else {
        return false;
    };
    let parsed = (hours.parse::<u8>(), minutes.parse::<u8>());
    hours.len() == 2 && minutes.len() == 2 && matches!(parsed, (Ok(h), Ok(m)) if h < 24 && m < 60)
}
