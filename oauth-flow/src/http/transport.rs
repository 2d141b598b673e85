//! User-info requests in the two token transport conventions.

use log::*;
use reqwest::{Method, RequestBuilder, Response};

use crate::error::{with_source, Error, ErrorKind, HttpErrorKind, Stage};
use crate::oauth::CallbackRequest;

/// Send `method url` with `Authorization: Bearer <access_token>`.
///
/// The returned response owns the open body; dropping it releases the connection.
pub async fn send_request_by_bearer(
    client: &reqwest::Client,
    request: &CallbackRequest,
    access_token: &str,
    url: &str,
    method: Method,
    body: Option<&[u8]>,
) -> Result<Response, Error> {
    let builder = client.request(method, url).bearer_auth(access_token);
    send(client, request, with_body(builder, body)).await
}

/// Send `method (url + access_token)`.
///
/// The token is appended verbatim, so `url` must already end in a separator
/// such as `?access_token=`.
pub async fn send_request_by_query_string(
    client: &reqwest::Client,
    request: &CallbackRequest,
    access_token: &str,
    url: &str,
    method: Method,
    body: Option<&[u8]>,
) -> Result<Response, Error> {
    let builder = client.request(method, format!("{}{}", url, access_token));
    send(client, request, with_body(builder, body)).await
}

fn with_body(builder: RequestBuilder, body: Option<&[u8]>) -> RequestBuilder {
    match body {
        Some(body) => builder.body(body.to_vec()),
        None => builder,
    }
}

async fn send(
    client: &reqwest::Client,
    request: &CallbackRequest,
    builder: RequestBuilder,
) -> Result<Response, Error> {
    let outbound = builder
        .build()
        .map_err(|e| request_failed("build user info request", e))?;

    // The query string may carry the token, so only the path is logged.
    debug!(
        "Requesting user info: {} {}",
        outbound.method(),
        outbound.url().path()
    );

    let fetch = async {
        client
            .execute(outbound)
            .await
            .map_err(|e| request_failed("fetch user info", e))
    };
    let response = request
        .run_until_cancelled(Stage::FetchUserInfo, fetch)
        .await?;

    if !response.status().is_success() {
        warn!("User info endpoint returned status {}", response.status());
    }
    Ok(response)
}

fn request_failed(action: &str, err: reqwest::Error) -> Error {
    let err = err.without_url();
    warn!("Failed to {}: {}", action, err);
    with_source(ErrorKind::Http(HttpErrorKind::RequestFailed), err)
}
