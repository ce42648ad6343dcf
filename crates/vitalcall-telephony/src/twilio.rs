//! Twilio REST dispatcher.
//!
//! ureq is blocking, so every request runs on tokio's blocking pool.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use tracing::{info, warn};
use ureq::Agent;
use vitalcall_core::models::call::{CallStatus, StatusUpdate};
use vitalcall_core::ports::{DispatchReceipt, DispatchRequest, Dispatcher};
use vitalcall_core::{BoxFuture, CollaboratorError};

use crate::error::TelephonyError;
use crate::status;

pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";
pub const DEFAULT_WEBHOOK_BASE_URL: &str = "http://localhost:5000";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Credentials and numbers for placing calls through Twilio.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Verified Twilio number calls are placed from.
    pub caller_id: String,
    /// Provider number that receives the call.
    pub provider_number: String,
    /// Public base URL Twilio uses to reach the voice and status webhooks.
    pub webhook_base_url: String,
    pub api_base: String,
}

impl TwilioConfig {
    /// Build from a variable lookup (normally the process environment).
    ///
    /// Fails with [`TelephonyError::Unconfigured`] naming the first missing
    /// or empty credential.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TelephonyError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| TelephonyError::Unconfigured(name.to_string()))
        };

        Ok(Self {
            account_sid: required("TWILIO_ACCOUNT_SID")?,
            auth_token: required("TWILIO_AUTH_TOKEN")?,
            caller_id: required("TWILIO_CALLER_ID")?,
            provider_number: required("PROVIDER_PHONE_NUMBER")?,
            webhook_base_url: lookup("WEBHOOK_BASE_URL")
                .unwrap_or_else(|| DEFAULT_WEBHOOK_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    pub fn from_env() -> Result<Self, TelephonyError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.api_base, self.account_sid
        )
    }

    fn call_url(&self, sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls/{sid}.json",
            self.api_base, self.account_sid
        )
    }

    /// Voice webhook Twilio fetches TwiML from when the call is answered.
    pub fn voice_url(&self, call_id: &str) -> String {
        format!("{}/twilio/voice?call_id={call_id}", self.webhook_base_url)
    }

    pub fn status_callback_url(&self) -> String {
        format!("{}/twilio/status", self.webhook_base_url)
    }

    fn authorization(&self) -> String {
        let credentials = format!("{}:{}", self.account_sid, self.auth_token);
        format!("Basic {}", STANDARD.encode(credentials))
    }
}

/// The subset of Twilio's call resource we read.
#[derive(Debug, Deserialize)]
struct TwilioCall {
    sid: String,
    status: String,
    #[serde(default)]
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    message: Option<String>,
}

/// Places calls through the Twilio REST API.
#[derive(Clone)]
pub struct TwilioDispatcher {
    config: TwilioConfig,
    agent: Agent,
}

impl TwilioDispatcher {
    pub fn new(config: TwilioConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .build()
            .into();
        Self { config, agent }
    }

    pub fn config(&self) -> &TwilioConfig {
        &self.config
    }

    fn create_call(&self, call_id: &str) -> Result<TwilioCall, TelephonyError> {
        let voice_url = self.config.voice_url(call_id);
        let status_callback = self.config.status_callback_url();
        let form = [
            ("To", self.config.provider_number.as_str()),
            ("From", self.config.caller_id.as_str()),
            ("Url", voice_url.as_str()),
            ("Method", "POST"),
            ("StatusCallback", status_callback.as_str()),
            ("StatusCallbackMethod", "POST"),
            ("StatusCallbackEvent", "initiated"),
            ("StatusCallbackEvent", "ringing"),
            ("StatusCallbackEvent", "answered"),
            ("StatusCallbackEvent", "completed"),
        ];

        let response = self
            .agent
            .post(&self.config.calls_url())
            .header("Authorization", &self.config.authorization())
            .send_form(form)?;
        read_call(response, call_id)
    }

    fn get_call(&self, sid: &str) -> Result<TwilioCall, TelephonyError> {
        let response = self
            .agent
            .get(&self.config.call_url(sid))
            .header("Authorization", &self.config.authorization())
            .call()?;
        read_call(response, sid)
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, TelephonyError>
    where
        T: Send + 'static,
        F: FnOnce(TwilioDispatcher) -> Result<T, TelephonyError> + Send + 'static,
    {
        let this = self.clone();
        tokio::task::spawn_blocking(move || f(this))
            .await
            .map_err(|e| TelephonyError::Join(e.to_string()))?
    }
}

fn read_call(
    mut response: ureq::http::Response<ureq::Body>,
    reference: &str,
) -> Result<TwilioCall, TelephonyError> {
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string()?;

    if status == 404 {
        return Err(TelephonyError::CallNotFound(reference.to_string()));
    }
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<TwilioErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);
        return Err(TelephonyError::Api { status, message });
    }

    serde_json::from_str(&body).map_err(|e| TelephonyError::ResponseParse(e.to_string()))
}

impl Dispatcher for TwilioDispatcher {
    fn name(&self) -> &str {
        "twilio"
    }

    fn dispatch<'a>(
        &'a self,
        request: &'a DispatchRequest,
    ) -> BoxFuture<'a, Result<DispatchReceipt, CollaboratorError>> {
        Box::pin(async move {
            let call_id = request.call_id.clone();
            let created = self
                .blocking(move |d| d.create_call(&call_id))
                .await
                .inspect_err(|e| {
                    warn!(call_id = %request.call_id, error = %e, "Twilio call creation failed");
                })?;

            info!(
                call_id = %request.call_id,
                call_sid = %created.sid,
                twilio_status = %created.status,
                "Twilio call created"
            );

            Ok(DispatchReceipt {
                reported: Some(status::twilio_update(
                    &created.status,
                    created.duration.as_deref(),
                )),
                handle: created.sid,
            })
        })
    }

    fn fetch_status<'a>(
        &'a self,
        handle: &'a str,
    ) -> BoxFuture<'a, Result<StatusUpdate, CollaboratorError>> {
        Box::pin(async move {
            let sid = handle.to_string();
            match self.blocking(move |d| d.get_call(&sid)).await {
                Ok(call) => Ok(status::twilio_update(&call.status, call.duration.as_deref())),
                Err(TelephonyError::CallNotFound(_)) => {
                    warn!(call_sid = handle, "Twilio has no record of call");
                    Ok(StatusUpdate::new(CallStatus::Unknown))
                }
                Err(e) => Err(e.into()),
            }
        })
    }
}
