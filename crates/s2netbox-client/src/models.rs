//! Typed domain model built from the vendor's raw records.
//!
//! The vendor schema repurposes twenty generic user-defined-field slots for
//! unrelated site-specific attributes. The mapping from slot to attribute is
//! kept in one place (`Person::from_raw`) as plain data flow, one line per
//! slot, so a transposition is visible in review and caught by the tests.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::coerce;
use crate::error::S2NetboxError;
use crate::wire::{RawAccessCard, RawPerson, RawVehicle};

/// Lifecycle state of an access card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardStatus {
    Active,
    Disabled,
    Expired,
    Lost,
    Damaged,
    Returned,
    #[serde(rename = "Not Returned")]
    NotReturned,
    #[serde(rename = "Not Used")]
    NotUsed,
}

impl FromStr for CardStatus {
    type Err = S2NetboxError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Active" => Ok(Self::Active),
            "Disabled" => Ok(Self::Disabled),
            "Expired" => Ok(Self::Expired),
            "Lost" => Ok(Self::Lost),
            "Damaged" => Ok(Self::Damaged),
            "Returned" => Ok(Self::Returned),
            "Not Returned" => Ok(Self::NotReturned),
            "Not Used" => Ok(Self::NotUsed),
            other => Err(S2NetboxError::MalformedRecord(format!(
                "unknown card status: {other:?}"
            ))),
        }
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "Active",
            Self::Disabled => "Disabled",
            Self::Expired => "Expired",
            Self::Lost => "Lost",
            Self::Damaged => "Damaged",
            Self::Returned => "Returned",
            Self::NotReturned => "Not Returned",
            Self::NotUsed => "Not Used",
        };
        f.write_str(name)
    }
}

/// A credential issued to a person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessCard {
    pub encoded_number: u64,
    pub hotstamp: u64,
    pub card_format: String,
    /// Tri-state: the vendor's disabled flag cannot always be distinguished
    /// from "not set"
    pub disabled: Option<bool>,
    pub status: CardStatus,
    pub expiration_date: Option<DateTime<FixedOffset>>,
}

impl AccessCard {
    fn from_raw(raw: RawAccessCard) -> Result<Self, S2NetboxError> {
        Ok(Self {
            encoded_number: raw.encoded_num,
            hotstamp: raw.hotstamp,
            card_format: raw.card_format,
            disabled: coerce::coerce_boolean(&raw.disabled),
            status: raw.card_status.parse()?,
            expiration_date: coerce::coerce_date(&raw.card_exp_date)?,
        })
    }
}

/// A vehicle registered to a person; every field independently optional.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub color: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub state: Option<String>,
    pub license: Option<String>,
    pub parking_pass: Option<String>,
}

impl Vehicle {
    fn from_raw(raw: RawVehicle) -> Self {
        Self {
            color: coerce::coerce_optional(&raw.color),
            make: coerce::coerce_optional(&raw.make),
            model: coerce::coerce_optional(&raw.model),
            state: coerce::coerce_optional(&raw.state),
            license: coerce::coerce_optional(&raw.license),
            parking_pass: coerce::coerce_optional(&raw.tag_num),
        }
    }
}

/// A person record with every source field coerced into its semantic type.
///
/// Every optional string field that arrived as the empty string is `None`,
/// never `Some("")`, so "field present" always means "field meaningfully
/// set".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub badge_number: u64,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub activation_date: Option<DateTime<FixedOffset>>,
    /// UDF1: emergency-team / process-safety classification code, preserved
    /// verbatim
    pub psm_rmp: Option<String>,
    /// UDF2
    pub mcz: Option<bool>,
    /// UDF3: employer code, preserved verbatim
    pub employer_code: Option<String>,
    /// UDF4
    pub incident_command: Option<bool>,
    /// UDF5
    pub department: Option<String>,
    /// UDF6
    pub carpool_id: Option<String>,
    /// UDF7
    pub mcz_date: Option<DateTime<FixedOffset>>,
    /// UDF8
    pub contractor_safety: Option<bool>,
    /// UDF9
    pub receipt_of_ch: Option<bool>,
    /// UDF10
    pub title: Option<String>,
    /// UDF11
    pub sponsor_badge: Option<String>,
    /// UDF12
    pub temp_id: Option<String>,
    /// UDF13
    pub supervisor_badge: Option<String>,
    /// UDF14
    pub primary_phone: Option<String>,
    /// UDF15: comma-and-space delimited key list
    pub assigned_keys: Option<Vec<String>>,
    /// UDF16
    pub company: Option<String>,
    /// UDF17
    pub gym: Option<bool>,
    /// UDF18: three-letter month code, preserved verbatim
    pub expiration_month: Option<String>,
    /// UDF19
    pub secondary_phone: Option<String>,
    /// UDF20
    pub work_phone: Option<String>,
    pub pin: Option<String>,
    pub notes: Option<String>,
    pub deleted: Option<bool>,
    pub picture_url: String,
    pub badge_layout: String,
    pub last_modified: Option<DateTime<FixedOffset>>,
    pub last_edited: Option<DateTime<FixedOffset>>,
    pub vehicles: Vec<Vehicle>,
    pub access_levels: Vec<String>,
    pub access_cards: Vec<AccessCard>,
}

impl Person {
    /// Normalize one raw vendor record.
    ///
    /// Total over any record shape: absent sub-records become empty lists and
    /// a single child becomes a one-element list. Only a malformed non-empty
    /// date or an unknown card status can fail.
    pub fn from_raw(raw: RawPerson) -> Result<Self, S2NetboxError> {
        let access_cards = raw
            .access_cards
            .unwrap_or_default()
            .cards
            .into_iter()
            .map(AccessCard::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        let vehicles = raw
            .vehicles
            .unwrap_or_default()
            .vehicles
            .into_iter()
            .map(Vehicle::from_raw)
            .collect();
        let access_levels = raw.access_levels.unwrap_or_default().levels;

        Ok(Self {
            badge_number: raw.person_id,
            first_name: coerce::coerce_optional(&raw.first_name),
            middle_name: coerce::coerce_optional(&raw.middle_name),
            last_name: raw.last_name,
            activation_date: coerce::coerce_date(&raw.act_date)?,
            psm_rmp: coerce::coerce_optional(&raw.udf1),
            mcz: coerce::coerce_boolean(&raw.udf2),
            employer_code: coerce::coerce_optional(&raw.udf3),
            incident_command: coerce::coerce_boolean(&raw.udf4),
            department: coerce::coerce_optional(&raw.udf5),
            carpool_id: coerce::coerce_optional(&raw.udf6),
            mcz_date: coerce::coerce_date(&raw.udf7)?,
            contractor_safety: coerce::coerce_boolean(&raw.udf8),
            receipt_of_ch: coerce::coerce_boolean(&raw.udf9),
            title: coerce::coerce_optional(&raw.udf10),
            sponsor_badge: coerce::coerce_optional(&raw.udf11),
            temp_id: coerce::coerce_optional(&raw.udf12),
            supervisor_badge: coerce::coerce_optional(&raw.udf13),
            primary_phone: coerce::coerce_optional(&raw.udf14),
            assigned_keys: coerce::coerce_key_list(&raw.udf15),
            company: coerce::coerce_optional(&raw.udf16),
            gym: coerce::coerce_boolean(&raw.udf17),
            expiration_month: coerce::coerce_optional(&raw.udf18),
            secondary_phone: coerce::coerce_optional(&raw.udf19),
            work_phone: coerce::coerce_optional(&raw.udf20),
            pin: coerce::coerce_optional(&raw.pin),
            notes: coerce::coerce_optional(&raw.notes),
            deleted: coerce::coerce_boolean(&raw.deleted),
            picture_url: raw.picture_url,
            badge_layout: raw.badge_layout,
            last_modified: coerce::coerce_date(&raw.last_mod)?,
            last_edited: coerce::coerce_date(&raw.last_edit)?,
            vehicles,
            access_levels,
            access_cards,
        })
    }

    /// Whether this person currently holds a live credential.
    ///
    /// The vendor stores spare and placeholder badges as ordinary person
    /// records with "badge" somewhere in the surname; those never count as
    /// active regardless of card state. A fragile heuristic, but it is the
    /// site's established business rule, not an accident.
    pub fn is_active(&self) -> bool {
        !self.access_cards.is_empty()
            && !self.last_name.to_lowercase().contains("badge")
            && self
                .access_cards
                .iter()
                .any(|card| card.status == CardStatus::Active)
    }

    /// Display name, "first last", falling back to the surname alone.
    pub fn full_name(&self) -> String {
        match &self.first_name {
            Some(first) => format!("{first} {}", self.last_name),
            None => self.last_name.clone(),
        }
    }
}
