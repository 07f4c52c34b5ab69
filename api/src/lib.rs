//! The Api system is responsible for getting our requests to the sync endpoint.
//! It knows how to POST a form and hand back the raw response. Decoding what
//! comes back is the caller's problem.

#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

mod error;

use ::reqwest::blocking::Client;
pub use ::reqwest::blocking::Response;
pub use ::reqwest::StatusCode as Status;
use ::url::Url;

pub use crate::error::{AError, AResult};

/// A struct used for building API requests. Holds the form fields, in order.
#[derive(Debug, Default)]
pub struct ApiReq {
    fields: Vec<(String, String)>,
}

impl ApiReq {
    /// Create a new builder
    pub fn new() -> Self {
        ApiReq {
            fields: Vec::new(),
        }
    }

    /// Add a form field
    pub fn field<K, V>(mut self, name: K, val: V) -> Self
        where K: Into<String>,
              V: Into<String>
    {
        self.fields.push((name.into(), val.into()));
        self
    }

    /// Grab the fields we've set so far
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields[..]
    }
}

/// Our Api object. Responsible for making outbound calls to one endpoint.
pub struct Api {
    client: Client,
    endpoint: Url,
}

impl Api {
    /// Create an Api pointed at the given endpoint
    pub fn new(endpoint: &str) -> AResult<Api> {
        let endpoint = Url::parse(endpoint)?;
        let client = Client::builder().build()?;
        Ok(Api {
            client: client,
            endpoint: endpoint,
        })
    }

    /// The endpoint we send everything to
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// POST a form-encoded request. Any response we get back counts as a
    /// success here, whatever its status. Only transport-level failures
    /// (connect, write, read headers) error.
    pub fn post_form(&self, builder: ApiReq) -> AResult<Response> {
        debug!("api::post_form() -- req: POST {} ({} fields)", self.endpoint, builder.fields.len());
        let res = self.client
            .post(self.endpoint.clone())
            .form(&builder.fields)
            .send()
            .map_err(|e| {
                warn!("api::post_form() -- POST {}: {}", self.endpoint, e);
                AError::from(e)
            })?;
        info!("api::post_form() -- res: {} POST {}", res.status(), self.endpoint);
        Ok(res)
    }
}

/// Render a status the way an HTTP status line does, eg "200 OK"
pub fn status_text(status: Status) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
