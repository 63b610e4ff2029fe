//! Blocking HTTP client for the `/api/v1` endpoints.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use podium_common::RankAssignment;
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

use crate::session::SessionUser;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
    pub created: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Entry {
    pub id: i32,
    pub name: String,
    pub flag_code: String,
    pub artist: Option<String>,
    pub song: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Prediction {
    pub entry_id: i32,
    pub entry_name: String,
    pub flag_code: String,
    pub rank: i32,
    pub points: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PredictionList {
    pub user: User,
    pub data: Vec<Prediction>,
    pub total_points: u32,
}

#[derive(Debug, Deserialize)]
pub struct OfficialResult {
    pub entry_id: i32,
    pub entry_name: String,
    pub flag_code: String,
    pub rank: i32,
}

#[derive(Debug, Deserialize)]
pub struct Standing {
    pub place: usize,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Deserialize)]
pub struct Leaderboard {
    pub results_published: bool,
    pub standings: Vec<Standing>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

pub struct ApiClient {
    base: String,
    http: Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(server: &str, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base: format!("{}/api/v1", server.trim_end_matches('/')),
            http,
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, format!("{}{}", self.base, path));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn send(&self, req: RequestBuilder) -> Result<Response> {
        let res = req.send().context("Could not reach the server")?;
        if res.status().is_success() {
            return Ok(res);
        }

        let status = res.status();
        let text = res.text().unwrap_or_default();
        Err(match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => anyhow!("{} ({}): {}", status.as_u16(), body.code, body.message),
            Err(_) => anyhow!("{}: {}", status, text),
        })
    }

    fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        self.send(req)?
            .json()
            .context("Unexpected response from the server")
    }

    pub fn login(&self, name: &str) -> Result<LoginResponse> {
        self.fetch(self.request(Method::POST, "/auth/login").json(&json!({ "name": name })))
    }

    pub fn me(&self) -> Result<SessionUser> {
        self.fetch(self.request(Method::GET, "/auth/me"))
    }

    pub fn users(&self) -> Result<Vec<User>> {
        self.fetch(self.request(Method::GET, "/users"))
    }

    pub fn entries(&self) -> Result<Vec<Entry>> {
        self.fetch(self.request(Method::GET, "/entries"))
    }

    pub fn my_predictions(&self) -> Result<PredictionList> {
        self.fetch(self.request(Method::GET, "/predictions"))
    }

    pub fn user_predictions(&self, user_id: Uuid) -> Result<PredictionList> {
        self.fetch(self.request(Method::GET, &format!("/users/{user_id}/predictions")))
    }

    pub fn predict(&self, entry_id: i32, rank: i32) -> Result<RankAssignment> {
        self.fetch(
            self.request(Method::PUT, &format!("/predictions/{entry_id}"))
                .json(&json!({ "rank": rank })),
        )
    }

    pub fn unpredict(&self, entry_id: i32) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("/predictions/{entry_id}")))?;
        Ok(())
    }

    pub fn results(&self) -> Result<Vec<OfficialResult>> {
        self.fetch(self.request(Method::GET, "/results"))
    }

    pub fn set_result(&self, entry_id: i32, rank: i32) -> Result<RankAssignment> {
        self.fetch(
            self.request(Method::PUT, &format!("/results/{entry_id}"))
                .json(&json!({ "rank": rank })),
        )
    }

    pub fn clear_result(&self, entry_id: i32) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("/results/{entry_id}")))?;
        Ok(())
    }

    pub fn leaderboard(&self) -> Result<Leaderboard> {
        self.fetch(self.request(Method::GET, "/leaderboard"))
    }
}
