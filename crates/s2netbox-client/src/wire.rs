//! Raw vendor record schema as it appears inside response `DETAILS`.
//!
//! These structs mirror the wire exactly and stay deliberately stringly
//! typed: coercion into the domain model happens in [`crate::models`], never
//! here. Scalar fields default to the empty string when the element is
//! absent, so downstream coercion sees one encoding for "not set".
//!
//! The nested sub-records carry no inherent list marker when cardinality is
//! one, so each is wrapped as `Option<list>`: a missing wrapper, a single
//! child element, and repeated child elements all deserialize without
//! ambiguity, and normalization canonicalizes to a plain `Vec` before any
//! business logic runs.

use serde::Deserialize;

/// `NEXTKEY` value signalling that the final page has been served.
pub const NEXT_KEY_DONE: i64 = -1;

/// `DETAILS` payload of a `GetAPIVersion` reply.
#[derive(Debug, Deserialize)]
pub struct VersionDetails {
    /// Version string reported by the appliance
    #[serde(rename = "APIVERSION")]
    pub api_version: String,
}

/// `DETAILS` payload of a `GetPicture` reply.
#[derive(Debug, Deserialize)]
pub struct PictureDetails {
    /// Base64 picture payload, passed through as-is
    #[serde(rename = "PICTURE", default)]
    pub picture: String,
}

/// `DETAILS` payload of a `SearchPersonData` reply: one page of records plus
/// the pagination cursor.
#[derive(Debug, Deserialize)]
pub struct SearchDetails {
    #[serde(rename = "PEOPLE")]
    pub people: Option<PeopleList>,
    /// Continuation cursor; [`NEXT_KEY_DONE`] when no pages remain
    #[serde(rename = "NEXTKEY")]
    pub next_key: Option<i64>,
}

/// `PEOPLE` wrapper around one page of person records.
#[derive(Debug, Default, Deserialize)]
pub struct PeopleList {
    #[serde(rename = "PERSON", default)]
    pub records: Vec<RawPerson>,
}

/// One person record as the vendor sends it, flat fixed fields plus the
/// twenty generic user-defined-field slots.
#[derive(Debug, Default, Deserialize)]
pub struct RawPerson {
    #[serde(rename = "PERSONID", default)]
    pub person_id: u64,
    #[serde(rename = "FIRSTNAME", default)]
    pub first_name: String,
    #[serde(rename = "MIDDLENAME", default)]
    pub middle_name: String,
    #[serde(rename = "LASTNAME", default)]
    pub last_name: String,
    #[serde(rename = "ACTDATE", default)]
    pub act_date: String,
    #[serde(rename = "UDF1", default)]
    pub udf1: String,
    #[serde(rename = "UDF2", default)]
    pub udf2: String,
    #[serde(rename = "UDF3", default)]
    pub udf3: String,
    #[serde(rename = "UDF4", default)]
    pub udf4: String,
    #[serde(rename = "UDF5", default)]
    pub udf5: String,
    #[serde(rename = "UDF6", default)]
    pub udf6: String,
    #[serde(rename = "UDF7", default)]
    pub udf7: String,
    #[serde(rename = "UDF8", default)]
    pub udf8: String,
    #[serde(rename = "UDF9", default)]
    pub udf9: String,
    #[serde(rename = "UDF10", default)]
    pub udf10: String,
    #[serde(rename = "UDF11", default)]
    pub udf11: String,
    #[serde(rename = "UDF12", default)]
    pub udf12: String,
    #[serde(rename = "UDF13", default)]
    pub udf13: String,
    #[serde(rename = "UDF14", default)]
    pub udf14: String,
    #[serde(rename = "UDF15", default)]
    pub udf15: String,
    #[serde(rename = "UDF16", default)]
    pub udf16: String,
    #[serde(rename = "UDF17", default)]
    pub udf17: String,
    #[serde(rename = "UDF18", default)]
    pub udf18: String,
    #[serde(rename = "UDF19", default)]
    pub udf19: String,
    #[serde(rename = "UDF20", default)]
    pub udf20: String,
    #[serde(rename = "PIN", default)]
    pub pin: String,
    #[serde(rename = "NOTES", default)]
    pub notes: String,
    #[serde(rename = "DELETED", default)]
    pub deleted: String,
    #[serde(rename = "PICTUREURL", default)]
    pub picture_url: String,
    #[serde(rename = "BADGELAYOUT", default)]
    pub badge_layout: String,
    #[serde(rename = "LASTMOD", default)]
    pub last_mod: String,
    #[serde(rename = "LASTEDIT", default)]
    pub last_edit: String,
    #[serde(rename = "VEHICLES")]
    pub vehicles: Option<VehicleList>,
    #[serde(rename = "ACCESSLEVELS")]
    pub access_levels: Option<AccessLevelList>,
    #[serde(rename = "ACCESSCARDS")]
    pub access_cards: Option<AccessCardList>,
}

/// `ACCESSCARDS` wrapper.
#[derive(Debug, Default, Deserialize)]
pub struct AccessCardList {
    #[serde(rename = "ACCESSCARD", default)]
    pub cards: Vec<RawAccessCard>,
}

/// One access card sub-record.
#[derive(Debug, Default, Deserialize)]
pub struct RawAccessCard {
    #[serde(rename = "ENCODEDNUM", default)]
    pub encoded_num: u64,
    #[serde(rename = "HOTSTAMP", default)]
    pub hotstamp: u64,
    #[serde(rename = "CARDFORMAT", default)]
    pub card_format: String,
    /// Disabled flag, sent as `0`/`1`
    #[serde(rename = "DISABLED", default)]
    pub disabled: String,
    #[serde(rename = "CARDSTATUS", default)]
    pub card_status: String,
    #[serde(rename = "CARDEXPDATE", default)]
    pub card_exp_date: String,
}

/// `ACCESSLEVELS` wrapper around a list of level names.
#[derive(Debug, Default, Deserialize)]
pub struct AccessLevelList {
    #[serde(rename = "ACCESSLEVEL", default)]
    pub levels: Vec<String>,
}

/// `VEHICLES` wrapper.
#[derive(Debug, Default, Deserialize)]
pub struct VehicleList {
    #[serde(rename = "VEHICLE", default)]
    pub vehicles: Vec<RawVehicle>,
}

/// One vehicle sub-record.
#[derive(Debug, Default, Deserialize)]
pub struct RawVehicle {
    #[serde(rename = "VEHICLECOLOR", default)]
    pub color: String,
    #[serde(rename = "VEHICLEMAKE", default)]
    pub make: String,
    #[serde(rename = "VEHICLEMODEL", default)]
    pub model: String,
    #[serde(rename = "VEHICLESTATE", default)]
    pub state: String,
    #[serde(rename = "VEHICLELICNUM", default)]
    pub license: String,
    #[serde(rename = "VEHICLETAGNUM", default)]
    pub tag_num: String,
}
