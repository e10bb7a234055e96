//! Trip parameters submitted by the travel form

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of string literals accepted on the wire
pub trait WireEnum: Sized + Copy + 'static {
    /// Look up a value by its exact wire literal
    fn from_wire(value: &str) -> Option<Self>;

    /// Wire literals joined for error messages
    fn allowed() -> String;
}

/// Declares a closed set of wire literals as an enum with lookup helpers.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted wire value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire literal for this value
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl WireEnum for $name {
            fn from_wire(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn allowed() -> String {
                Self::ALL
                    .iter()
                    .map(|value| value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Travel style
    TripType {
        Family => "familia",
        Backpacker => "mochilero",
        Luxury => "lujo",
        Adventure => "aventura",
        Cultural => "cultural",
        Gastronomic => "gastronomico",
    }
}

wire_enum! {
    /// Spending level
    Budget {
        Low => "bajo",
        Medium => "medio",
        High => "alto",
    }
}

wire_enum! {
    /// Preferred lodging
    Accommodation {
        Hotel => "hotel",
        Hostel => "hostal",
        Apartment => "apartamento",
        RuralHouse => "casa_rural",
    }
}

wire_enum! {
    /// Preferred way of getting there
    Transport {
        Flight => "vuelo",
        Train => "tren",
        Bus => "autobus",
        Car => "coche",
    }
}

impl Budget {
    /// Rough daily spend in euros
    #[must_use]
    pub fn daily_euros(self) -> u32 {
        match self {
            Budget::Low => 50,
            Budget::Medium => 100,
            Budget::High => 200,
        }
    }
}

/// Validated trip parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelPlanRequest {
    #[serde(rename = "origen")]
    pub origin: String,
    #[serde(rename = "destino")]
    pub destination: String,
    #[serde(rename = "dias")]
    pub days: u16,
    #[serde(rename = "tipoViaje")]
    pub trip_type: TripType,
    #[serde(rename = "presupuesto")]
    pub budget: Budget,
    #[serde(rename = "alojamiento", default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<Accommodation>,
    #[serde(rename = "transporte", default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<Transport>,
    #[serde(rename = "actividades", default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<String>>,
}

impl TravelPlanRequest {
    /// Request with only the required fields set
    #[must_use]
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        days: u16,
        trip_type: TripType,
        budget: Budget,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            days,
            trip_type,
            budget,
            accommodation: None,
            transport: None,
            activities: None,
        }
    }
}
