// Cookie-session client for the controller's legacy `/api/s/{site}/` API.
//
// Login and platform detection live in `auth.rs`, endpoints in their own
// files; this file owns URL building and the envelope.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::ControllerPlatform;
use crate::error::Error;
use crate::legacy::models::{LegacyResponse, Meta};
use crate::transport::TransportConfig;

/// UniFi OS wraps some errors as `{"error":{"code":N,"message":"..."}}` with HTTP 200.
#[derive(serde::Deserialize)]
struct UnifiOsError {
    error: Option<UnifiOsErrorInner>,
}

#[derive(serde::Deserialize)]
struct UnifiOsErrorInner {
    code: u16,
    message: Option<String>,
}

/// Authenticated-request helper for the controller's legacy API.
///
/// Holds the session cookie jar. All reads return the unwrapped `data`
/// array as raw JSON; decoding into records is left to the caller so it can
/// choose between whole-document and per-record failure handling.
pub struct LegacyClient {
    http: reqwest::Client,
    base_url: Url,
    site: String,
    platform: ControllerPlatform,
    cookie_jar: Arc<Jar>,
}

impl LegacyClient {
    /// Build a client for `site` on a controller whose platform is known.
    ///
    /// The client owns a fresh cookie jar that will hold the login session.
    pub fn new(
        base_url: Url,
        site: String,
        platform: ControllerPlatform,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let cookie_jar = Arc::new(Jar::default());
        let http = transport.session_client(&cookie_jar)?;
        Ok(Self::assemble(http, base_url, site, platform, cookie_jar))
    }

    /// Like [`new`](Self::new), detecting the platform when `platform` is
    /// `None`. Detection runs on the same client the session will use.
    pub async fn connect(
        base_url: Url,
        site: String,
        platform: Option<ControllerPlatform>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let cookie_jar = Arc::new(Jar::default());
        let http = transport.session_client(&cookie_jar)?;
        let platform = match platform {
            Some(platform) => platform,
            None => Self::detect_platform(&base_url, &http).await?,
        };
        Ok(Self::assemble(http, base_url, site, platform, cookie_jar))
    }

    fn assemble(
        http: reqwest::Client,
        base_url: Url,
        site: String,
        platform: ControllerPlatform,
        cookie_jar: Arc<Jar>,
    ) -> Self {
        debug!(%base_url, %site, ?platform, "legacy client ready");
        Self {
            http,
            base_url,
            site,
            platform,
            cookie_jar,
        }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn platform(&self) -> ControllerPlatform {
        self.platform
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    /// Controller-level endpoint such as the login path.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// `true` once the cookie jar holds a cookie for the controller.
    pub fn has_session(&self) -> bool {
        self.cookie_jar.cookies(&self.base_url).is_some()
    }

    /// Site-scoped URL: `{base}{prefix}/api/s/{site}/{path}`.
    pub(crate) fn site_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let prefix = self.platform.legacy_prefix();
        Ok(Url::parse(&format!(
            "{base}{prefix}/api/s/{site}/{path}",
            site = self.site
        ))?)
    }

    /// GET a site-scoped `path` and return the envelope's `data` array.
    pub async fn get_data(&self, path: &str) -> Result<Vec<Value>, Error> {
        let url = self.site_url(path)?;
        debug!(%url, "GET");

        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let data = Self::unwrap_envelope(resp).await?;
        debug!(%path, records = data.len(), "envelope ok");
        Ok(data)
    }

    /// `data` of a `{ meta, data }` body whose `meta.rc` is `"ok"`.
    async fn unwrap_envelope(resp: reqwest::Response) -> Result<Vec<Value>, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "session expired or invalid credentials".into(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::LegacyApi {
                message: format!("HTTP {status}: {}", preview(&body)),
            });
        }

        let body = resp.text().await?;

        if let Ok(UnifiOsError { error: Some(err) }) = serde_json::from_str::<UnifiOsError>(&body) {
            let message = err.message.unwrap_or_default();
            return Err(match err.code {
                401 => Error::Authentication { message },
                code => Error::LegacyApi {
                    message: format!("UniFi OS error {code}: {message}"),
                },
            });
        }

        let envelope: LegacyResponse<Value> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body: body.clone(),
            })?;

        if envelope.meta.is_ok() {
            Ok(envelope.data)
        } else {
            let Meta { rc, msg } = envelope.meta;
            Err(Error::LegacyApi {
                message: msg.unwrap_or_else(|| format!("rc={rc}")),
            })
        }
    }
}

/// First 200 bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
