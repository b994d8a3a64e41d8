//! Integration tests for the S2 NetBox client
//!
//! The full command flow — login, envelope build, response unwrap, record
//! normalization, pagination — runs against a scripted transport, so no
//! appliance is needed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use s2netbox_client::{S2NetboxClient, S2NetboxError, SearchTerms, Transport};

/// Transport that replays canned response documents and records every
/// request document it is handed.
#[derive(Clone, Default)]
struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTransport {
    fn new(responses: &[&str]) -> Self {
        Self {
            responses: Arc::new(Mutex::new(
                responses.iter().map(ToString::to_string).collect(),
            )),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send_command(&self, xml: &str) -> Result<String, S2NetboxError> {
        self.requests.lock().unwrap().push(xml.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| S2NetboxError::Fault {
                code: "SCRIPT".to_string(),
                raw: "no scripted response left".to_string(),
            })
    }
}

const LOGIN_OK: &str =
    "<NETBOX sessionid=\"sess-1\"><RESPONSE><CODE>SUCCESS</CODE></RESPONSE></NETBOX>";

const NOT_FOUND: &str = "<NETBOX><RESPONSE><CODE>NOT FOUND</CODE></RESPONSE></NETBOX>";

fn person_record(badge: u64, last_name: &str, card_status: Option<&str>) -> String {
    let cards = match card_status {
        Some(status) => format!(
            "<ACCESSCARDS><ACCESSCARD><ENCODEDNUM>{badge}</ENCODEDNUM>\
             <HOTSTAMP>1</HOTSTAMP><CARDFORMAT>26 bit Wiegand</CARDFORMAT>\
             <DISABLED>0</DISABLED><CARDSTATUS>{status}</CARDSTATUS>\
             <CARDEXPDATE></CARDEXPDATE></ACCESSCARD></ACCESSCARDS>"
        ),
        None => String::new(),
    };
    format!(
        "<PERSON><PERSONID>{badge}</PERSONID><FIRSTNAME>Pat</FIRSTNAME>\
         <LASTNAME>{last_name}</LASTNAME><UDF2>Y</UDF2><UDF7></UDF7>{cards}</PERSON>"
    )
}

fn search_page(records: &[String], next_key: i64) -> String {
    format!(
        "<NETBOX sessionid=\"sess-1\"><RESPONSE><CODE>SUCCESS</CODE><DETAILS>\
         <PEOPLE>{}</PEOPLE><NEXTKEY>{next_key}</NEXTKEY></DETAILS></RESPONSE></NETBOX>",
        records.concat()
    )
}

async fn connect(transport: &ScriptedTransport) -> S2NetboxClient<ScriptedTransport> {
    S2NetboxClient::with_transport(transport.clone(), "apiuser", "secret")
        .await
        .expect("login should succeed")
}

#[tokio::test]
async fn login_attaches_granted_session_to_later_commands() {
    let transport = ScriptedTransport::new(&[
        LOGIN_OK,
        "<NETBOX sessionid=\"sess-1\"><RESPONSE><CODE>SUCCESS</CODE>\
         <DETAILS><APIVERSION>5.0</APIVERSION></DETAILS></RESPONSE></NETBOX>",
    ]);
    let client = connect(&transport).await;

    let version = client.api_version().await.unwrap();
    assert_eq!(version, "5.0");

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    // Login goes out pre-authentication with the dateformat attribute.
    assert!(!requests[0].contains("sessionid"));
    assert!(requests[0].contains("name=\"Login\""));
    assert!(requests[0].contains("dateformat=\"tzoffset\""));
    assert!(requests[0].contains("<USERNAME>apiuser</USERNAME>"));
    // The granted id rides on the next command.
    assert!(requests[1].contains("sessionid=\"sess-1\""));
    assert!(requests[1].contains("name=\"GetAPIVersion\""));
}

#[tokio::test]
async fn login_fault_is_fatal() {
    let transport =
        ScriptedTransport::new(&["<NETBOX><RESPONSE><CODE>FAIL</CODE></RESPONSE></NETBOX>"]);
    let result = S2NetboxClient::with_transport(transport, "apiuser", "wrong").await;
    assert!(matches!(result, Err(S2NetboxError::AuthFailed(_))));
}

#[tokio::test]
async fn login_without_session_id_is_auth_failure() {
    let transport =
        ScriptedTransport::new(&["<NETBOX><RESPONSE><CODE>SUCCESS</CODE></RESPONSE></NETBOX>"]);
    let result = S2NetboxClient::with_transport(transport, "apiuser", "secret").await;
    assert!(matches!(result, Err(S2NetboxError::AuthFailed(_))));
}

#[tokio::test]
async fn get_person_normalizes_the_record_end_to_end() {
    let details = person_record(12345, "Smith", Some("Active"));
    let response = format!(
        "<NETBOX sessionid=\"sess-1\"><RESPONSE><CODE>SUCCESS</CODE>\
         <DETAILS>{}</DETAILS></RESPONSE></NETBOX>",
        details
            .trim_start_matches("<PERSON>")
            .trim_end_matches("</PERSON>")
    );
    let transport = ScriptedTransport::new(&[LOGIN_OK, response.as_str()]);
    let client = connect(&transport).await;

    let person = client.get_person(12345).await.unwrap().expect("found");
    assert_eq!(person.badge_number, 12345);
    assert_eq!(person.mcz, Some(true));
    assert_eq!(person.mcz_date, None);
    assert!(person.vehicles.is_empty());
    assert_eq!(person.access_cards.len(), 1);
    assert!(person.is_active());

    let requests = transport.requests();
    assert!(requests[1].contains("name=\"GetPerson\""));
    assert!(requests[1].contains("<PERSONID>12345</PERSONID>"));
}

#[tokio::test]
async fn get_person_not_found_is_a_typed_no_result() {
    let transport = ScriptedTransport::new(&[LOGIN_OK, NOT_FOUND]);
    let client = connect(&transport).await;
    assert!(client.get_person(404).await.unwrap().is_none());
}

#[tokio::test]
async fn get_picture_passes_the_payload_through() {
    let transport = ScriptedTransport::new(&[
        LOGIN_OK,
        "<NETBOX sessionid=\"sess-1\"><RESPONSE><CODE>SUCCESS</CODE>\
         <DETAILS><PICTURE>aGVsbG8=</PICTURE></DETAILS></RESPONSE></NETBOX>",
    ]);
    let client = connect(&transport).await;
    let picture = client.get_picture(12345).await.unwrap();
    assert_eq!(picture.as_deref(), Some("aGVsbG8="));
}

#[tokio::test]
async fn search_walks_cursor_pages_and_accumulates() {
    let page1 = search_page(
        &[
            person_record(1, "Smith", Some("Active")),
            person_record(2, "Jones", None),
        ],
        5,
    );
    let page2 = search_page(&[person_record(3, "Nguyen", None)], 9);
    let page3 = search_page(&[person_record(4, "Garcia", None)], -1);
    let transport = ScriptedTransport::new(&[LOGIN_OK, page1.as_str(), page2.as_str(), page3.as_str()]);
    let client = connect(&transport).await;

    let terms = SearchTerms {
        last_name: Some("S".to_string()),
        ..SearchTerms::default()
    };
    let people = client.search_people(&terms).await.unwrap().expect("matches");

    let badges: Vec<u64> = people.iter().map(|p| p.badge_number).collect();
    assert_eq!(badges, vec![1, 2, 3, 4]);

    let requests = transport.requests();
    assert_eq!(requests.len(), 4, "login plus exactly three pages");
    assert!(!requests[1].contains("STARTFROMKEY"));
    assert!(requests[2].contains("<STARTFROMKEY>5</STARTFROMKEY>"));
    assert!(requests[3].contains("<STARTFROMKEY>9</STARTFROMKEY>"));
    // Every page repeats the same search terms.
    for request in &requests[1..] {
        assert!(request.contains("name=\"SearchPersonData\""));
        assert!(request.contains("<LASTNAME>S</LASTNAME>"));
    }
}

#[tokio::test]
async fn search_active_only_filters_during_accumulation() {
    let page = search_page(
        &[
            person_record(1, "Smith", Some("Active")),
            person_record(2, "Badge Holder", Some("Active")),
            person_record(3, "Jones", Some("Expired")),
        ],
        -1,
    );
    let transport = ScriptedTransport::new(&[LOGIN_OK, page.as_str()]);
    let client = connect(&transport).await;

    let terms = SearchTerms {
        department: Some("Maintenance".to_string()),
        active_only: true,
        ..SearchTerms::default()
    };
    let people = client.search_people(&terms).await.unwrap().expect("matches");
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].badge_number, 1);

    // Department searches travel through the UDF5 slot.
    let requests = transport.requests();
    assert!(requests[1].contains("<UDF5>Maintenance</UDF5>"));
}

#[tokio::test]
async fn search_not_found_yields_null_result() {
    for active_only in [false, true] {
        let transport = ScriptedTransport::new(&[LOGIN_OK, NOT_FOUND]);
        let client = connect(&transport).await;
        let terms = SearchTerms {
            last_name: Some("Nobody".to_string()),
            active_only,
            ..SearchTerms::default()
        };
        assert!(client.search_people(&terms).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn search_by_badge_short_circuits_to_get_person() {
    let details = person_record(777, "Smith", Some("Active"));
    let response = format!(
        "<NETBOX sessionid=\"sess-1\"><RESPONSE><CODE>SUCCESS</CODE>\
         <DETAILS>{}</DETAILS></RESPONSE></NETBOX>",
        details
            .trim_start_matches("<PERSON>")
            .trim_end_matches("</PERSON>")
    );
    let transport = ScriptedTransport::new(&[LOGIN_OK, response.as_str()]);
    let client = connect(&transport).await;

    let terms = SearchTerms {
        badge_number: Some(777),
        last_name: Some("ignored".to_string()),
        ..SearchTerms::default()
    };
    let people = client.search_people(&terms).await.unwrap().expect("found");
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].badge_number, 777);

    let requests = transport.requests();
    assert!(requests[1].contains("name=\"GetPerson\""));
}

#[tokio::test]
async fn vendor_fault_surfaces_with_raw_payload() {
    let transport = ScriptedTransport::new(&[
        LOGIN_OK,
        "<NETBOX><RESPONSE><CODE>FAIL</CODE>\
         <DETAILS><ERRMSG>session expired</ERRMSG></DETAILS></RESPONSE></NETBOX>",
    ]);
    let client = connect(&transport).await;

    match client.get_person(12345).await {
        Err(S2NetboxError::Fault { code, raw }) => {
            assert_eq!(code, "FAIL");
            assert!(raw.contains("session expired"));
        }
        other => panic!("expected fault, got {other:?}"),
    }
}
