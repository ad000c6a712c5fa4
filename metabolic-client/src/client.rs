use async_trait::async_trait;
use log::debug;
use metabolic_model::{CalculateRequest, Measurement, MetabolicResult, NewMeasurement};
use reqwest::Response;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("server unreachable")]
    CommunicationError,
    #[error("internal server error")]
    InternalServerError,
    #[error("invalid request")]
    RequestError,
    #[error("incorrect server response")]
    ResponseError,
}

type Result<T> = std::result::Result<T, Error>;

#[mockall::automock]
#[async_trait]
pub trait Client: Send + Sync {
    async fn calculate(&self, request: &CalculateRequest) -> Result<MetabolicResult>;
    /// All measurements, or the `limit` most recent ones, newest first.
    async fn get_measurements(&self, limit: Option<usize>) -> Result<Vec<Measurement>>;
    async fn post_measurement(&self, measurement: &NewMeasurement) -> Result<Measurement>;
}

pub struct ClientImpl {
    url: String,
    client: reqwest::Client,
}

impl ClientImpl {
    fn new(url: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_owned(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url, path)
    }
}

/// Creates a client for the server at `url`, e.g. `http://localhost:8080/`.
pub fn create(url: String) -> impl Client {
    ClientImpl::new(url)
}

fn check_status(resp: Response) -> Result<Response> {
    if resp.status().is_client_error() {
        Err(Error::RequestError)
    } else if resp.status().is_server_error() {
        Err(Error::InternalServerError)
    } else {
        Ok(resp)
    }
}

#[async_trait]
impl Client for ClientImpl {
    async fn calculate(&self, request: &CalculateRequest) -> Result<MetabolicResult> {
        debug!("Requesting calculation from {}", self.url);
        self.client
            .post(self.endpoint("api/calculate"))
            .json(request)
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }

    async fn get_measurements(&self, limit: Option<usize>) -> Result<Vec<Measurement>> {
        let mut request = self.client.get(self.endpoint("api/measurements"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        request
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }

    async fn post_measurement(&self, measurement: &NewMeasurement) -> Result<Measurement> {
        self.client
            .post(self.endpoint("api/measurements"))
            .json(measurement)
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }
}
