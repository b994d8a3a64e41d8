//! XML command envelopes for the NetBox API.
//!
//! Every exchange is one `NETBOX-API` request document carrying a single
//! named `COMMAND`, answered by a `NETBOX` response document carrying a
//! status `CODE` and a command-specific `DETAILS` payload. This module owns
//! only the serialize/parse boundary; transport belongs to
//! [`crate::transport`].

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::error::S2NetboxError;

/// Per-request sequence counter attribute. Commands are never pipelined, so
/// the counter is always 1.
const SEQUENCE_NUM: u32 = 1;

/// Command parameters, serialized with the vendor's exact field casing.
/// Unset fields are omitted from the document entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Params {
    #[serde(rename = "USERNAME", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "PASSWORD", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "PERSONID", skip_serializing_if = "Option::is_none")]
    pub person_id: Option<u64>,
    /// Department searches go through the UDF5 slot
    #[serde(rename = "UDF5", skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(rename = "FIRSTNAME", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "MIDDLENAME", skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(rename = "LASTNAME", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "STARTFROMKEY", skip_serializing_if = "Option::is_none")]
    pub start_from_key: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename = "NETBOX-API")]
struct RequestDocument<'a> {
    #[serde(rename = "@sessionid", skip_serializing_if = "Option::is_none")]
    session_id: Option<&'a str>,
    #[serde(rename = "COMMAND")]
    command: RequestCommand<'a>,
}

#[derive(Debug, Serialize)]
struct RequestCommand<'a> {
    #[serde(rename = "@name")]
    name: &'a str,
    #[serde(rename = "@num")]
    num: u32,
    #[serde(rename = "@dateformat", skip_serializing_if = "Option::is_none")]
    dateformat: Option<&'a str>,
    #[serde(rename = "PARAMS", skip_serializing_if = "Option::is_none")]
    params: Option<&'a Params>,
}

/// Build one outbound request document.
///
/// `Login` is issued before any session exists and is the one command that
/// carries the `dateformat=tzoffset` attribute, which selects timestamps
/// with explicit UTC offsets in every subsequent reply.
pub fn build(
    name: &str,
    session_id: Option<&str>,
    params: Option<&Params>,
) -> Result<String, S2NetboxError> {
    let dateformat = (name == "Login").then_some("tzoffset");
    let document = RequestDocument {
        session_id,
        command: RequestCommand {
            name,
            num: SEQUENCE_NUM,
            dateformat,
            params,
        },
    };
    Ok(quick_xml::se::to_string(&document)?)
}

#[derive(Debug, Deserialize)]
struct ResponseDocument<T> {
    #[serde(rename = "@sessionid")]
    session_id: Option<String>,
    #[serde(rename = "RESPONSE")]
    response: ResponseBody<T>,
}

#[derive(Debug, Deserialize)]
struct ResponseBody<T> {
    #[serde(rename = "CODE")]
    code: Option<String>,
    #[serde(rename = "DETAILS")]
    details: Option<T>,
}

/// One unwrapped response: the granted session id (when the vendor sends
/// one) plus the discriminated command outcome.
#[derive(Debug)]
pub struct Envelope<T> {
    pub session_id: Option<String>,
    pub reply: Reply<T>,
}

/// Outcome of one command.
#[derive(Debug)]
pub enum Reply<T> {
    /// Vendor reported success; the typed `DETAILS` payload when the command
    /// carries one (`Login` does not)
    Success(Option<T>),
    /// Vendor explicitly reported no matching record — an expected outcome,
    /// not a fault
    NotFound,
    /// Any other status; the raw document is preserved for diagnosis
    Fault { code: String, raw: String },
}

/// Parse a response document and discriminate its status.
///
/// The status code is probed before the typed `DETAILS` parse so that a
/// fault carrying an alien payload shape surfaces as a fault, not as a
/// deserialization error.
pub fn unwrap<T: DeserializeOwned>(xml: &str) -> Result<Envelope<T>, S2NetboxError> {
    let probe: ResponseDocument<IgnoredAny> = quick_xml::de::from_str(xml)?;
    let code = probe.response.code.unwrap_or_default();

    match code.as_str() {
        "SUCCESS" => {
            let typed: ResponseDocument<T> = quick_xml::de::from_str(xml)?;
            Ok(Envelope {
                session_id: typed.session_id,
                reply: Reply::Success(typed.response.details),
            })
        }
        "NOT FOUND" => Ok(Envelope {
            session_id: probe.session_id,
            reply: Reply::NotFound,
        }),
        _ => Ok(Envelope {
            session_id: probe.session_id,
            reply: Reply::Fault {
                code,
                raw: xml.to_string(),
            },
        }),
    }
}
