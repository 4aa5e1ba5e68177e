use forge_sync::ForgeError;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Authenticated HTTP client for a GitLab v4 REST API.
///
/// Pure transport: it knows how to follow keyset pagination and post JSON,
/// not what the endpoints mean.
pub struct GitlabClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitlabClient {
    pub fn new(instance_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = instance_url.into().trim_end_matches('/').to_owned();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: token.into(),
        }
    }

    /// Absolute URL for an API path like `projects/42/hooks`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/v4/{path}", self.base_url)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
    }

    /// Fetch every page of a paginated collection, concatenating results.
    ///
    /// GitLab's keyset pagination advertises the next page in the response's
    /// `Link` header; iteration stops when no `rel="next"` link remains. Any
    /// non-success status or transport error aborts immediately.
    pub async fn get_paginated<T: DeserializeOwned>(
        &self,
        first_url: &str,
    ) -> Result<Vec<T>, ForgeError> {
        let mut next_url = Some(first_url.to_owned());
        let mut records = Vec::new();

        while let Some(url) = next_url.take() {
            log::debug!("GET {url}");
            let response = self
                .get(&url)
                .send()
                .await
                .map_err(|e| ForgeError::Network(e.to_string()))?;

            if !response.status().is_success() {
                return Err(ForgeError::Network(format!(
                    "GET {url} returned HTTP {}",
                    response.status()
                )));
            }

            next_url = response
                .headers()
                .get(reqwest::header::LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_next_link)
                .map(str::to_owned);

            let page: Vec<T> = response
                .json()
                .await
                .map_err(|e| ForgeError::Network(format!("decoding page from {url}: {e}")))?;
            records.extend(page);
        }

        Ok(records)
    }

    /// POST a JSON body, discarding the response payload.
    pub async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<(), ForgeError> {
        let response = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ForgeError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ForgeError::Network(format!(
                "POST {url} returned HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Extract the `rel="next"` target from a `Link` header value.
fn parse_next_link(header: &str) -> Option<&str> {
    for part in header.split(',') {
        let Some((target, params)) = part.split_once(';') else {
            continue;
        };
        if !params.contains(r#"rel="next""#) {
            continue;
        }
        return Some(target.trim().trim_start_matches('<').trim_end_matches('>'));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_link_is_extracted_from_multi_link_header() {
        let header = r#"<https://forge.example.com/api/v4/projects?cursor=abc>; rel="next", <https://forge.example.com/api/v4/projects>; rel="first""#;
        assert_eq!(
            parse_next_link(header),
            Some("https://forge.example.com/api/v4/projects?cursor=abc")
        );
    }

    #[test]
    fn header_without_next_yields_none() {
        let header = r#"<https://forge.example.com/api/v4/projects>; rel="first""#;
        assert_eq!(parse_next_link(header), None);
    }

    #[test]
    fn api_url_strips_trailing_slash_from_instance() {
        let client = GitlabClient::new("https://forge.example.com/", "token");
        assert_eq!(
            client.api_url("projects/42/hooks"),
            "https://forge.example.com/api/v4/projects/42/hooks"
        );
    }
}
