use chrono::{DateTime, Utc};
use openworld_core::discriminated_union;
use serde::{Deserialize, Serialize};

use super::common::{Address, Amount, HotelAddress};

/// Discriminator of [`TravelProduct`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelProductType {
    /// `CRUISE`
    Cruise,
    /// `AIR`
    Air,
    /// `CAR`
    Car,
    /// `INSURANCE`
    Insurance,
    /// `HOTEL`
    Hotel,
    /// `RAIL`
    Rail,
}

/// Who holds the inventory of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventorySource {
    /// `MERCHANT`
    Merchant,
    /// `AGENCY`
    Agency,
}

/// Shape of a [`Rail`] itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteType {
    /// `MULTIPLE_DESTINATIONS`
    MultipleDestinations,
    /// `ONE_WAY`
    OneWay,
    /// `ROUND_TRIP`
    RoundTrip,
}

/// Vehicle of a [`RailSegments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportationMethod {
    /// `BUS`
    Bus,
    /// `FERRY`
    Ferry,
    /// `PUBLIC_TRANSPORT`
    PublicTransport,
    /// `RAIL`
    Rail,
    /// `TRAM`
    Tram,
    /// `TRANSFER`
    Transfer,
    /// `OTHERS`
    Others,
}

/// Shape of an [`Air`] itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightType {
    /// `ROUNDTRIP`
    Roundtrip,
    /// `ONEWAY`
    Oneway,
    /// `MULTIPLE_DESTINATION`
    MultipleDestination,
}

/// Whether a [`RailwayStationDetails`] is a station or a whole city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StationType {
    /// `STATION`
    Station,
    /// `CITY`
    City,
}

/// Fields shared by every travel product.
///
/// Flattened into each [`TravelProduct`] variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelProductDetails {
    /// Total price of the product.
    pub price: Amount,
    /// Inventory the product was booked from, such as `Merchant` or `Agency`.
    pub inventory_type: String,
    /// Merchant or agency.
    pub inventory_source: InventorySource,
    /// References to [`Traveler::traveler_id`](super::Traveler::traveler_id), between 1 and 40.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travelers_references: Option<Vec<String>>,
    /// Whether the product is paid at the property rather than at booking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_later: Option<bool>,
}

impl TravelProductDetails {
    /// Details with only the mandatory fields.
    pub fn new(price: Amount, inventory_type: impl Into<String>, inventory_source: InventorySource) -> Self {
        Self {
            price,
            inventory_type: inventory_type.into(),
            inventory_source,
            travelers_references: None,
            pay_later: None,
        }
    }
}

/// Company operating a rail segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatingCompany {
    /// Commercial name of the company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_name: Option<String>,
}

/// A departure or arrival station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RailwayStationDetails {
    /// Name of the station.
    pub name: String,
    /// Station or city.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub station_type: Option<StationType>,
    /// Code of the station.
    pub station_code: String,
    /// Where the station is.
    pub address: Address,
    /// IANA time zone, e.g. `America/New_York`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// One leg of a [`Rail`] product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RailSegments {
    /// Local departure time.
    pub departure_time: DateTime<Utc>,
    /// Local arrival time.
    pub arrival_time: DateTime<Utc>,
    /// Station the leg leaves from.
    pub departure_station: RailwayStationDetails,
    /// Station the leg arrives at.
    pub arrival_station: RailwayStationDetails,
    /// Vehicle of the leg.
    pub transportation_method: TransportationMethod,
    /// Company operating the leg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_company: Option<OperatingCompany>,
}

/// A rail journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rail {
    /// Price and inventory.
    #[serde(flatten)]
    pub details: TravelProductDetails,
    /// One way, round trip or multiple destinations.
    pub route_type: RouteType,
    /// Between 1 and 20 segments.
    pub rail_segments: Vec<RailSegments>,
}

/// One flight of an [`Air`] product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AirSegment {
    /// IATA code of the airline.
    pub airline_code: String,
    /// IATA code of the departure airport.
    pub departure_airport_code: String,
    /// IATA code of the arrival airport.
    pub arrival_airport_code: String,
    /// Local departure time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<DateTime<Utc>>,
    /// Local arrival time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<DateTime<Utc>>,
}

/// A flight itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Air {
    /// Price and inventory.
    #[serde(flatten)]
    pub details: TravelProductDetails,
    /// Departure of the first segment.
    pub departure_time: DateTime<Utc>,
    /// Arrival of the last segment.
    pub arrival_time: DateTime<Utc>,
    /// Between 1 and 30 segments.
    pub air_segments: Vec<AirSegment>,
    /// Round trip, one way or multiple destinations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_type: Option<FlightType>,
    /// PNR of the booking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_name_record: Option<String>,
    /// GDS the booking went through, such as `SABRE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_distribution_system_type: Option<String>,
}

/// A cruise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cruise {
    /// Price and inventory.
    #[serde(flatten)]
    pub details: TravelProductDetails,
    /// Departure from the embarkation port.
    pub departure_time: DateTime<Utc>,
    /// Arrival at the disembarkation port.
    pub arrival_time: DateTime<Utc>,
    /// Port the cruise leaves from.
    pub embarkation_port: String,
    /// Port the cruise ends at.
    pub disembarkation_port: String,
    /// Name of the ship.
    pub ship_name: String,
}

/// A car rental.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Price and inventory.
    #[serde(flatten)]
    pub details: TravelProductDetails,
    /// Where the car is picked up.
    pub pick_up_location: String,
    /// Where the car is returned.
    pub drop_off_location: String,
    /// When the car is picked up.
    pub pickup_time: DateTime<Utc>,
    /// When the car is returned.
    pub return_time: DateTime<Utc>,
}

/// A hotel stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    /// Price and inventory.
    #[serde(flatten)]
    pub details: TravelProductDetails,
    /// Identifier of the property.
    pub hotel_id: String,
    /// Whether the price is hidden from the customer until booking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_withheld: Option<bool>,
    /// Name of the property.
    pub hotel_name: String,
    /// Number of rooms booked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_count: Option<u32>,
    /// Address of the property.
    pub address: HotelAddress,
    /// Local check-in time.
    pub checkin_time: DateTime<Utc>,
    /// Local check-out time.
    pub checkout_time: DateTime<Utc>,
}

/// A travel insurance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insurance {
    /// Price and inventory.
    #[serde(flatten)]
    pub details: TravelProductDetails,
}

/// A travel product whose type has no dedicated variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelProductGeneric {
    /// Type of the product, echoed as is.
    #[serde(rename = "type")]
    pub product_type: TravelProductType,
    /// Price and inventory.
    #[serde(flatten)]
    pub details: TravelProductDetails,
}

discriminated_union! {
    /// A product of the order, selected by its `type`.
    #[derive(Debug, Clone, PartialEq)]
    pub enum TravelProduct : "type" {
        /// `RAIL`
        Rail(Rail) = "RAIL",
        /// `AIR`
        Air(Air) = "AIR",
        /// `CRUISE`
        Cruise(Cruise) = "CRUISE",
        /// `CAR`
        Car(Car) = "CAR",
        /// `HOTEL`
        Hotel(Hotel) = "HOTEL",
        /// `INSURANCE`
        Insurance(Insurance) = "INSURANCE",
    }
    fallback
        /// A product whose `type` is known but whose body matches no variant.
        Generic(TravelProductGeneric)
}

impl TravelProduct {
    /// The details shared by every product.
    pub fn details(&self) -> &TravelProductDetails {
        match self {
            Self::Rail(product) => &product.details,
            Self::Air(product) => &product.details,
            Self::Cruise(product) => &product.details,
            Self::Car(product) => &product.details,
            Self::Hotel(product) => &product.details,
            Self::Insurance(product) => &product.details,
            Self::Generic(product) => &product.details,
        }
    }
}
