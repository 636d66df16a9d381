use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monetary amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Amount {
    /// The amount, in major units.
    pub value: f64,
    /// ISO 4217 alpha-3 currency code, e.g. `USD`.
    pub currency_code: String,
}

impl Amount {
    /// An amount in `currency_code`.
    pub fn new(value: f64, currency_code: impl Into<String>) -> Self {
        Self {
            value,
            currency_code: currency_code.into(),
        }
    }
}

/// Name of a person: customer, traveler or billing contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Name {
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// Middle name or initial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// Honorific, such as `Mr` or `Dr`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Generational suffix, such as `Jr`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl Name {
    /// A name with only its mandatory parts.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            middle_name: None,
            title: None,
            suffix: None,
        }
    }
}

/// Kind of an [`Address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressType {
    /// `HOME`
    Home,
    /// `WORK`
    Work,
}

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address {
    /// Home or work address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_type: Option<AddressType>,
    /// First line: street and number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    /// Second line: building, floor or apartment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    /// City or town.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Two-letter state or province code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    /// ISO 3166-1 alpha-3 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Address of a hotel.
pub type HotelAddress = Address;

/// Usage of a [`Telephone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TelephoneType {
    /// `HOME`
    Home,
    /// `MOBILE`
    Mobile,
    /// `BUSINESS`
    Business,
    /// `FAX`
    Fax,
    /// `OTHER`
    Other,
}

/// Network a [`Telephone`] is reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TelephonePlatformType {
    /// `MOBILE`
    Mobile,
    /// `LANDLINE`
    Landline,
    /// `VOIP`
    Voip,
}

/// A telephone number, split in its dialing parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Telephone {
    /// Home, mobile, business, fax or other.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub telephone_type: Option<TelephoneType>,
    /// Mobile, landline or VoIP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_type: Option<TelephonePlatformType>,
    /// Country calling code, 1 to 3 digits.
    pub country_access_code: String,
    /// Area or city code.
    pub area_code: String,
    /// Subscriber number.
    pub phone_number: String,
    /// Extension dialed after the number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_number: Option<String>,
    /// Rank among the owner's numbers, 1 being the preferred one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference_rank: Option<f64>,
    /// Last time the number was verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_verified_date_time: Option<DateTime<Utc>>,
    /// Whether the number has been verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_flag: Option<bool>,
}

impl Telephone {
    /// A number with only its dialing parts.
    pub fn new(
        country_access_code: impl Into<String>,
        area_code: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            telephone_type: None,
            platform_type: None,
            country_access_code: country_access_code.into(),
            area_code: area_code.into(),
            phone_number: phone_number.into(),
            extension_number: None,
            preference_rank: None,
            last_verified_date_time: None,
            verified_flag: None,
        }
    }
}
