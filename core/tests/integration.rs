//! Full contact lifecycle against the live server.
//!
//! # Design
//! Starts the server on a random port, then drives `ContactsDesk` through
//! every operation over real HTTP using a ureq-backed `Transport`. Validates
//! that request building, response parsing and list reconciliation work
//! end-to-end with the actual server.

use contacts_core::{
    ApiError, Completion, ContactsClient, ContactsDesk, EditSession, HttpMethod, HttpRequest,
    HttpResponse, SubmitError, Transport,
};

/// Executes requests with ureq, returning 4xx/5xx responses as data so the
/// core client handles status interpretation.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let body = req.body.unwrap_or_default();
        let result = match req.method {
            HttpMethod::Get => self.agent.get(&req.path).call(),
            HttpMethod::Delete => self.agent.delete(&req.path).call(),
            HttpMethod::Post => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            HttpMethod::Patch => self
                .agent
                .patch(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse::new(status, body))
    }
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            contacts_server::run(listener, contacts_server::ServerConfig::default()).await
        })
        .unwrap();
    });
    addr
}

#[test]
fn contact_lifecycle() {
    let addr = start_server();
    let mut transport = UreqTransport::new();
    let mut desk = ContactsDesk::new(ContactsClient::new(&format!("http://{addr}")));

    // Step 1: initial load is empty.
    desk.refresh(&mut transport).unwrap();
    assert_eq!(desk.total(), 0);

    // Step 2: create two contacts; the newest lands at the head.
    for (name, mobile) in [("Momin", "01700000000"), ("Rahim", "017001")] {
        desk.set_form_name(name);
        desk.set_form_mobile(mobile);
        desk.set_form_contact_number("01800000000");
        assert_eq!(desk.create(&mut transport).unwrap(), Completion::Applied);
    }
    let names: Vec<&str> = desk.contacts().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Rahim", "Momin"]);
    assert!(desk.form().name.is_empty());

    // Step 3: the local view matches a fresh fetch.
    let local = desk.contacts().clone();
    desk.refresh(&mut transport).unwrap();
    assert_eq!(desk.contacts(), &local);

    // Step 4: an invalid create never reaches the server.
    desk.set_form_name("Bad");
    desk.set_form_mobile("9001");
    assert!(matches!(desk.create(&mut transport), Err(SubmitError::Validation(_))));
    desk.refresh(&mut transport).unwrap();
    assert_eq!(desk.total(), 2);

    // Step 5: edit the older contact.
    let momin = desk.contacts().iter().find(|c| c.name == "Momin").unwrap().id;
    assert!(desk.start_editing(momin));
    desk.session_mut().set_name("Momin Khan");
    desk.update(momin, &mut transport).unwrap();
    assert_eq!(desk.session(), &EditSession::Idle);
    assert_eq!(desk.contacts().as_slice()[1].name, "Momin Khan");

    // Step 6: delete it.
    desk.delete(momin, &mut transport).unwrap();
    assert_eq!(desk.total(), 1);

    // Step 7: deleting again surfaces the fixed message, list unchanged.
    let err = desk.delete(momin, &mut transport).unwrap_err();
    assert!(matches!(err, SubmitError::Failed { source: ApiError::NotFound, .. }));
    assert_eq!(desk.error(), Some("Failed to delete contact."));
    assert_eq!(desk.total(), 1);

    // Step 8: the server agrees.
    desk.refresh(&mut transport).unwrap();
    assert_eq!(desk.total(), 1);
    assert_eq!(desk.error(), None);
}

#[test]
fn unreachable_server_is_a_transport_failure() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut desk = ContactsDesk::new(ContactsClient::new(&format!("http://{addr}")));
    let err = desk.refresh(&mut UreqTransport::new()).unwrap_err();
    assert!(matches!(err, SubmitError::Failed { source: ApiError::Transport(_), .. }));
    assert_eq!(desk.error(), Some("Failed to load contacts."));
    assert!(!desk.is_loading());
}
