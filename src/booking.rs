// Booking records shared by every planner variant
// Destinations, activities, phone numbers, dates and the per-structure record types

use chrono::{Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Invalid cost value: {0}")]
    InvalidCost(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown destination: {0}")]
    UnknownDestination(String),

    #[error("Unknown activity: {0}")]
    UnknownActivity(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Destination {
    VolcanoesNationalPark,
    AkageraNationalPark,
    NyungweForestNationalPark,
    LakeKivu,
    KigaliGenocideMemorial,
    ButareMuseum,
    KigaliCityTour,
}

impl Destination {
    pub const ALL: [Destination; 7] = [
        Destination::VolcanoesNationalPark,
        Destination::AkageraNationalPark,
        Destination::NyungweForestNationalPark,
        Destination::LakeKivu,
        Destination::KigaliGenocideMemorial,
        Destination::ButareMuseum,
        Destination::KigaliCityTour,
    ];

    // Destinations offered by the cost desk, in menu order
    pub const PRICED: [Destination; 6] = [
        Destination::VolcanoesNationalPark,
        Destination::AkageraNationalPark,
        Destination::NyungweForestNationalPark,
        Destination::LakeKivu,
        Destination::KigaliGenocideMemorial,
        Destination::ButareMuseum,
    ];

    // The four parks seeded into the itinerary tree and offered by the ledger and list desks
    pub const PARKS: [Destination; 4] = [
        Destination::VolcanoesNationalPark,
        Destination::NyungweForestNationalPark,
        Destination::LakeKivu,
        Destination::AkageraNationalPark,
    ];

    pub const QUEUED: [Destination; 5] = [
        Destination::VolcanoesNationalPark,
        Destination::NyungweForestNationalPark,
        Destination::LakeKivu,
        Destination::AkageraNationalPark,
        Destination::KigaliCityTour,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Destination::VolcanoesNationalPark => "Volcanoes National Park",
            Destination::AkageraNationalPark => "Akagera National Park",
            Destination::NyungweForestNationalPark => "Nyungwe Forest National Park",
            Destination::LakeKivu => "Lake Kivu",
            Destination::KigaliGenocideMemorial => "Kigali Genocide Memorial",
            Destination::ButareMuseum => "Butare (Museum)",
            Destination::KigaliCityTour => "Kigali City Tour",
        }
    }

    // Predefined cost in RWF, None when the user has to supply one
    pub fn base_cost(&self) -> Option<f64> {
        match self {
            Destination::VolcanoesNationalPark => Some(400_000.0),
            Destination::AkageraNationalPark => Some(250_000.0),
            Destination::NyungweForestNationalPark => Some(120_000.0),
            Destination::LakeKivu => Some(50_000.0),
            Destination::ButareMuseum => Some(150_000.0),
            Destination::KigaliGenocideMemorial | Destination::KigaliCityTour => None,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Destination {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BookingError::MissingField("destination"));
        }

        Destination::ALL
            .iter()
            .find(|d| d.name() == s)
            .copied()
            .ok_or_else(|| BookingError::UnknownDestination(s.to_string()))
    }
}

impl From<Destination> for String {
    fn from(destination: Destination) -> Self {
        destination.name().to_string()
    }
}

impl TryFrom<String> for Destination {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Activity {
    Leisuring,
    Hiking,
    Swimming,
    CulturalTour,
    WildlifeSafari,
    // Free text entered when none of the fixed activities fit
    Other(String),
}

impl Activity {
    pub const FIXED: [Activity; 5] = [
        Activity::Leisuring,
        Activity::Hiking,
        Activity::Swimming,
        Activity::CulturalTour,
        Activity::WildlifeSafari,
    ];

    pub fn name(&self) -> &str {
        match self {
            Activity::Leisuring => "Leisuring",
            Activity::Hiking => "Hiking",
            Activity::Swimming => "Swimming",
            Activity::CulturalTour => "Cultural Tour",
            Activity::WildlifeSafari => "Wildlife Safari",
            Activity::Other(name) => name,
        }
    }

    // Free text, unless the text names a fixed activity. Blank text is refused.
    pub fn other(name: &str) -> Result<Self, BookingError> {
        match Activity::parse_fixed(name) {
            Err(BookingError::UnknownActivity(text)) => Ok(Activity::Other(text)),
            result => result,
        }
    }

    // Strict parse: only the fixed activities are accepted
    pub fn parse_fixed(s: &str) -> Result<Self, BookingError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BookingError::MissingField("activity"));
        }

        match s {
            "Leisure" => Ok(Activity::Leisuring),
            _ => Activity::FIXED
                .iter()
                .find(|a| a.name() == s)
                .cloned()
                .ok_or_else(|| BookingError::UnknownActivity(s.to_string())),
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Lenient parse: anything that is not a fixed activity becomes free text
impl FromStr for Activity {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activity::other(s)
    }
}

impl From<Activity> for String {
    fn from(activity: Activity) -> Self {
        activity.name().to_string()
    }
}

impl TryFrom<String> for Activity {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

const DEFAULT_PHONE_PATTERN: &str = r"^(078|079|072|073)\d{7}$";
const PHONE_LENGTH: usize = 10;

// Compiled mobile number pattern for a set of allowed prefixes
#[derive(Debug, Clone)]
pub struct PhoneValidator {
    pattern: Regex,
}

impl PhoneValidator {
    pub fn new(prefixes: &[String]) -> Result<Self, regex::Error> {
        let alternatives = prefixes
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"^({})\d+$", alternatives))?;
        Ok(Self { pattern })
    }

    pub fn is_valid(&self, phone: &str) -> bool {
        self.pattern.is_match(phone) && phone.len() == PHONE_LENGTH
    }

    pub fn parse(&self, phone: &str) -> Result<PhoneNumber, BookingError> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(BookingError::MissingField("phone"));
        }
        if !self.is_valid(phone) {
            return Err(BookingError::InvalidPhone(phone.to_string()));
        }
        Ok(PhoneNumber(phone.to_string()))
    }
}

// Checks a number against the default prefixes (078, 079, 072, 073)
pub fn validate_phone_number(phone: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(DEFAULT_PHONE_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(phone))
        && phone.len() == PHONE_LENGTH
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PhoneNumber {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BookingError::MissingField("phone"));
        }
        if !validate_phone_number(s) {
            return Err(BookingError::InvalidPhone(s.to_string()));
        }
        Ok(PhoneNumber(s.to_string()))
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

// Deserialized numbers are checked against the default prefixes
impl TryFrom<String> for PhoneNumber {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelDate(NaiveDate);

impl TravelDate {
    pub fn today() -> Self {
        TravelDate(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for TravelDate {
    fn from(date: NaiveDate) -> Self {
        TravelDate(date)
    }
}

impl fmt::Display for TravelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for TravelDate {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BookingError::MissingField("date"));
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(TravelDate)
            .map_err(|_| BookingError::InvalidDate(s.to_string()))
    }
}

// Either today's date or one typed in by the user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateChoice {
    #[default]
    Today,
    Custom(String),
}

impl DateChoice {
    pub fn resolve(&self) -> Result<TravelDate, BookingError> {
        match self {
            DateChoice::Today => Ok(TravelDate::today()),
            DateChoice::Custom(text) => text.parse(),
        }
    }
}

pub fn parse_cost(cost: &str) -> Result<f64, BookingError> {
    let cost = cost.trim();
    if cost.is_empty() {
        return Err(BookingError::MissingField("cost"));
    }

    match cost.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(BookingError::InvalidCost(cost.to_string())),
    }
}

// Priorities feed a counting sort, so only small non-negative integers are accepted
pub fn parse_priority(priority: &str, max_priority: u32) -> Result<u32, BookingError> {
    let priority = priority.trim();
    match priority.parse::<u32>() {
        Ok(value) if value <= max_priority => Ok(value),
        _ => Err(BookingError::InvalidPriority(priority.to_string())),
    }
}

pub fn require(value: &str, field: &'static str) -> Result<String, BookingError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BookingError::MissingField(field));
    }
    Ok(value.to_string())
}

// BST node payload and heap element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostedBooking {
    pub cost: f64,
    pub destination: Destination,
    pub name: String,
    pub phone: PhoneNumber,
}

impl fmt::Display for CostedBooking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} - {:?} RWF",
            self.name, self.phone, self.destination, self.cost
        )
    }
}

// Circular queue slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryEntry {
    pub username: String,
    pub phone: PhoneNumber,
    pub destination: Destination,
    pub activity: Activity,
    pub date: TravelDate,
}

// Linked-list node payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub destination: Destination,
    pub activity: Activity,
    pub username: String,
    pub phone: PhoneNumber,
}

// Element of the plain itinerary list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryItem {
    pub destination: Destination,
    pub activity: Activity,
    pub date: TravelDate,
}

impl fmt::Display for ItineraryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {} on {}", self.activity, self.destination, self.date)
    }
}
