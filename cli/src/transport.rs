use contacts_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

/// Blocking transport backed by a ureq agent. Non-2xx statuses come back as
/// data so the core decides what they mean.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;
        let content_type = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
            .unwrap_or("application/json");

        let result = match method {
            HttpMethod::Get => self.agent.get(&path).call(),
            HttpMethod::Delete => self.agent.delete(&path).call(),
            HttpMethod::Post => self
                .agent
                .post(&path)
                .content_type(content_type)
                .send(body.unwrap_or_default().as_bytes()),
            HttpMethod::Patch => self
                .agent
                .patch(&path)
                .content_type(content_type)
                .send(body.unwrap_or_default().as_bytes()),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}
