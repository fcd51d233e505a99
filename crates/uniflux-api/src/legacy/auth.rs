// Session login, logout and controller platform detection.
//
// A successful login leaves the session cookie (`unifises` or `TOKEN`) in the
// client's jar; every later request carries it.

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::auth::ControllerPlatform;
use crate::error::Error;
use crate::legacy::client::LegacyClient;

impl LegacyClient {
    /// Log in with username and password.
    ///
    /// Posts to `/api/auth/login` on UniFi OS and `/api/login` on a classic
    /// controller. Any non-2xx answer is an [`Error::Authentication`].
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.endpoint(self.platform().login_path())?;
        debug!(%url, username, "logging in");

        let resp = self
            .http()
            .post(url)
            .header(ACCEPT, "application/json")
            .json(&json!({
                "username": username,
                "password": password.expose_secret(),
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed for {username} (HTTP {status}): {body}"),
            });
        }

        debug!(has_session = self.has_session(), "login accepted");
        Ok(())
    }

    /// End the session. The response status is not checked.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.endpoint(self.platform().logout_path())?;
        debug!(%url, "logging out");
        self.http().post(url).send().await?;
        Ok(())
    }

    /// Ask `base_url` for the UniFi OS login endpoint.
    ///
    /// Any answer other than 404 means UniFi OS.
    /// Otherwise the classic login path must at least be reachable.
    pub(crate) async fn detect_platform(
        base_url: &Url,
        http: &reqwest::Client,
    ) -> Result<ControllerPlatform, Error> {
        let unifi_os = base_url.join(ControllerPlatform::UnifiOs.login_path())?;
        debug!(url = %unifi_os, "checking for UniFi OS");

        if let Ok(resp) = http.get(unifi_os).send().await {
            if resp.status() != StatusCode::NOT_FOUND {
                debug!("UniFi OS detected");
                return Ok(ControllerPlatform::UnifiOs);
            }
        }

        let classic = base_url.join(ControllerPlatform::ClassicController.login_path())?;
        debug!(url = %classic, "checking for classic controller");
        http.get(classic).send().await?;

        debug!("classic controller detected");
        Ok(ControllerPlatform::ClassicController)
    }
}
