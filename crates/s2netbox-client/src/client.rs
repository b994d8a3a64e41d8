//! S2 NetBox API client
//!
//! Facade over the session, envelope, and normalization layers. One client
//! instance wraps one logical session; operations are issued one at a time
//! and awaited sequentially.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::envelope::{self, Envelope, Params, Reply};
use crate::error::S2NetboxError;
use crate::models::Person;
use crate::session::Session;
use crate::transport::{HttpTransport, Transport};
use crate::wire::{NEXT_KEY_DONE, PictureDetails, RawPerson, SearchDetails, VersionDetails};

/// Search criteria for [`S2NetboxClient::search_people`].
///
/// A badge number short-circuits to a direct fetch. The remaining terms are
/// translated to their vendor slot parameters; terms with no vendor
/// equivalent simply never reach the wire.
#[derive(Debug, Clone, Default)]
pub struct SearchTerms {
    pub badge_number: Option<u64>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    /// Keep only people with a live credential (see [`Person::is_active`])
    pub active_only: bool,
}

impl SearchTerms {
    fn to_params(&self) -> Params {
        Params {
            department: self.department.clone(),
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            last_name: self.last_name.clone(),
            ..Params::default()
        }
    }
}

/// S2 NetBox API client.
///
/// Generic over the transport so tests can drive the full command flow
/// against a scripted one; production code uses
/// [`S2NetboxClient::connect`], which wires up [`HttpTransport`] and
/// performs the login exchange before the client is handed out.
#[derive(Debug)]
pub struct S2NetboxClient<T: Transport> {
    transport: T,
    session: Session,
}

impl S2NetboxClient<HttpTransport> {
    /// Connect to an appliance and authenticate.
    ///
    /// # Arguments
    /// * `url` - Appliance base URL (e.g., "https://netbox.example.com");
    ///   the fixed API path is appended when missing
    /// * `username` / `password` - API account credentials
    pub async fn connect(
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, S2NetboxError> {
        let transport = HttpTransport::new(url)?;
        Self::with_transport(transport, username, password).await
    }
}

impl<T: Transport> S2NetboxClient<T> {
    /// Authenticate over an existing transport.
    pub async fn with_transport(
        transport: T,
        username: &str,
        password: &str,
    ) -> Result<Self, S2NetboxError> {
        let mut session = Session::new(username, password);
        session.login(&transport).await?;
        Ok(Self { transport, session })
    }

    /// Issue one command and unwrap its reply.
    async fn send<D: DeserializeOwned>(
        &self,
        name: &str,
        params: Option<&Params>,
    ) -> Result<Envelope<D>, S2NetboxError> {
        let request = envelope::build(name, self.session.token(), params)?;
        debug!(command = name, "issuing NetBox API command");
        let response = self.transport.send_command(&request).await?;
        envelope::unwrap(&response)
    }

    fn missing_details(command: &str) -> S2NetboxError {
        S2NetboxError::Fault {
            code: "SUCCESS".to_string(),
            raw: format!("{command} reply carried no DETAILS payload"),
        }
    }

    /// Query the appliance's API version.
    pub async fn api_version(&self) -> Result<String, S2NetboxError> {
        let envelope = self.send::<VersionDetails>("GetAPIVersion", None).await?;
        match envelope.reply {
            Reply::Success(Some(details)) => Ok(details.api_version),
            Reply::Success(None) => Err(Self::missing_details("GetAPIVersion")),
            Reply::NotFound => Err(S2NetboxError::Fault {
                code: "NOT FOUND".to_string(),
                raw: "GetAPIVersion reported NOT FOUND".to_string(),
            }),
            Reply::Fault { code, raw } => Err(S2NetboxError::Fault { code, raw }),
        }
    }

    /// Fetch one person by badge number.
    ///
    /// `Ok(None)` when the vendor reports no such record; never an empty
    /// person.
    pub async fn get_person(&self, badge_number: u64) -> Result<Option<Person>, S2NetboxError> {
        let params = Params {
            person_id: Some(badge_number),
            ..Params::default()
        };
        let envelope = self.send::<RawPerson>("GetPerson", Some(&params)).await?;
        match envelope.reply {
            Reply::Success(Some(raw)) => Ok(Some(Person::from_raw(raw)?)),
            Reply::Success(None) => Err(Self::missing_details("GetPerson")),
            Reply::NotFound => Ok(None),
            Reply::Fault { code, raw } => Err(S2NetboxError::Fault { code, raw }),
        }
    }

    /// Fetch a person's badge picture as the vendor's embedded payload
    /// (base64 text), passed through as-is.
    pub async fn get_picture(&self, badge_number: u64) -> Result<Option<String>, S2NetboxError> {
        let params = Params {
            person_id: Some(badge_number),
            ..Params::default()
        };
        let envelope = self
            .send::<PictureDetails>("GetPicture", Some(&params))
            .await?;
        match envelope.reply {
            Reply::Success(Some(details)) => Ok(Some(details.picture)),
            Reply::Success(None) => Err(Self::missing_details("GetPicture")),
            Reply::NotFound => Ok(None),
            Reply::Fault { code, raw } => Err(S2NetboxError::Fault { code, raw }),
        }
    }

    /// Search person records.
    ///
    /// Walks the vendor's cursor pagination: each page's reply carries a
    /// `NEXTKEY`, and the next request repeats the same terms plus
    /// `STARTFROMKEY` set to that cursor, until the −1 sentinel. Pages are
    /// strictly sequential — a cursor has no meaning out of order.
    ///
    /// `Ok(None)` means the vendor reported zero total matches (NOT FOUND,
    /// only ever returned on the first page); `Ok(Some(vec![]))` means
    /// matches existed but the `active_only` filter removed them all.
    pub async fn search_people(
        &self,
        terms: &SearchTerms,
    ) -> Result<Option<Vec<Person>>, S2NetboxError> {
        if let Some(badge_number) = terms.badge_number {
            return Ok(self
                .get_person(badge_number)
                .await?
                .map(|person| vec![person]));
        }

        let params = terms.to_params();
        let mut people = Vec::new();
        let mut start_from_key = None;

        loop {
            let mut page_params = params.clone();
            page_params.start_from_key = start_from_key;

            let envelope = self
                .send::<SearchDetails>("SearchPersonData", Some(&page_params))
                .await?;
            let details = match envelope.reply {
                Reply::Success(Some(details)) => details,
                Reply::Success(None) => return Err(Self::missing_details("SearchPersonData")),
                Reply::NotFound => return Ok(None),
                Reply::Fault { code, raw } => return Err(S2NetboxError::Fault { code, raw }),
            };

            for raw in details.people.unwrap_or_default().records {
                let person = Person::from_raw(raw)?;
                if !terms.active_only || person.is_active() {
                    people.push(person);
                }
            }

            match details.next_key {
                Some(key) if key != NEXT_KEY_DONE => start_from_key = Some(key),
                _ => break,
            }
        }

        Ok(Some(people))
    }
}
