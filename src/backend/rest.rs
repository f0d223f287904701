// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::debug;
use secrecy::ExposeSecret as _;
use serde_json::{Map, Value};
use url::Url;

use crate::{
    error::{self, Result},
    role::Role,
    session::Identity,
};

use super::{Backend, Credentials, Registration};

const FALLBACK_MESSAGE: &str = "An error occurred";

/// The backend reached over plain HTTP.
pub(crate) struct Rest {
    base: Url,
    client: reqwest::Client,
}

impl Rest {
    pub(crate) fn new(mut base: Url) -> Result<Self> {
        // Endpoints are joined relative to the base, which only works when it
        // ends in a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            base,
            client: reqwest::Client::builder().build()?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    const fn login_path(role: Role) -> &'static str {
        match role {
            Role::Student => "student/login",
            Role::Tutor => "tutor/login",
            Role::Admin => "admin/login",
        }
    }
}

/// Picks the most useful message out of an error response body.
fn server_message(body: &str) -> String {
    let message = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned),
        Ok(Value::String(s)) => Some(s),
        Ok(_) | Err(_) => Some(body.trim().to_owned()),
    };

    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_owned())
}

/// Reads the body of a response, turning non-success statuses into errors.
async fn read_body(resp: reqwest::Response) -> Result<String> {
    let status = resp.status();
    let body = resp.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        debug!("Backend answered {}: {}", status, body);
        Err(error::Api::Server {
            status,
            message: server_message(&body),
        }
        .into())
    }
}

#[async_trait]
impl Backend for Rest {
    async fn login(&self, credentials: &Credentials) -> Result<Identity> {
        let url = self.endpoint(Self::login_path(credentials.role()))?;
        let mut username = credentials.username();
        let mut password = credentials.password().expose_secret().as_str();
        // Only the admin form trims what was typed.
        if credentials.role() == Role::Admin {
            username = username.trim();
            password = password.trim();
        }
        debug!("Logging in {:?} as {} at {}", username, credentials.role(), url);

        let resp = self
            .client
            .get(url)
            .query(&[("username", username), ("password", password)])
            .send()
            .await?;
        let body = read_body(resp).await?;
        if body.trim().is_empty() {
            return Err(error::Api::InvalidCredentials.into());
        }

        match serde_json::from_str::<Value>(&body)? {
            Value::Object(identity) => Ok(identity),
            Value::Null => Err(error::Api::InvalidCredentials.into()),
            _ => Err(error::Conversion::NotAnObject("login response").into()),
        }
    }

    async fn register(&self, registration: &Registration) -> Result<Value> {
        registration.validate()?;

        let mut form: Map<String, Value> = registration
            .fields()
            .into_iter()
            .map(|(field, value)| (field.to_owned(), Value::String(value.to_owned())))
            .collect();
        let _previous = form.insert(
            "password".to_owned(),
            Value::String(registration.password.expose_secret().clone()),
        );

        let url = self.endpoint("student/register")?;
        debug!("Registering {:?} at {}", registration.username, url);

        let resp = self.client.post(url).json(&form).send().await?;
        let body = read_body(resp).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        extract::Query,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use secrecy::SecretString;
    use serde_json::json;
    use tokio::net::TcpListener;

    use crate::error::Error;

    use super::*;

    type Params = Query<HashMap<String, String>>;

    fn credentials(params: &HashMap<String, String>) -> (Option<&str>, Option<&str>) {
        (
            params.get("username").map(String::as_str),
            params.get("password").map(String::as_str),
        )
    }

    async fn student_login(Query(params): Params) -> (StatusCode, String) {
        match credentials(&params) {
            (Some("sam"), Some("pw")) => (
                StatusCode::OK,
                json!({"sid": 1, "username": "sam", "name": "Sam"}).to_string(),
            ),
            (Some("echo"), Some(password)) => (
                StatusCode::OK,
                json!({"username": "echo", "password": password}).to_string(),
            ),
            _ => (StatusCode::OK, String::new()),
        }
    }

    async fn tutor_login() -> (StatusCode, Json<Value>) {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Tutor not found"})),
        )
    }

    async fn admin_login(Query(params): Params) -> (StatusCode, String) {
        match credentials(&params) {
            (Some("root"), Some("pw")) => (
                StatusCode::OK,
                json!({"aid": 1, "username": "root"}).to_string(),
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, String::new()),
        }
    }

    async fn student_register(Json(form): Json<Value>) -> (StatusCode, String) {
        if form["username"] == "taken" {
            (StatusCode::CONFLICT, "Username already exists".to_owned())
        } else if form["password"] == "pw" && form["ph_no"] == "5550100" {
            (StatusCode::OK, "Student Registered Successfully".to_owned())
        } else {
            (StatusCode::BAD_REQUEST, String::new())
        }
    }

    async fn serve() -> Result<Rest> {
        let app = Router::new()
            .route("/api/student/login", get(student_login))
            .route("/api/tutor/login", get(tutor_login))
            .route("/api/admin/login", get(admin_login))
            .route("/api/student/register", post(student_register));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let _server = tokio::spawn(async move { axum::serve(listener, app).await });

        Rest::new(Url::parse(&format!("http://{addr}/api"))?)
    }

    fn registration(username: &str) -> Registration {
        Registration {
            username: username.to_owned(),
            password: SecretString::new("pw".to_owned()),
            name: "Sam".to_owned(),
            gender: "other".to_owned(),
            email: "sam@example.com".to_owned(),
            ph_no: "5550100".to_owned(),
            address: "1 Road".to_owned(),
        }
    }

    #[test]
    fn server_message_preference() {
        assert_eq!(server_message(r#"{"message":"Bad password"}"#), "Bad password");
        assert_eq!(server_message(r#"{"error":"x"}"#), FALLBACK_MESSAGE);
        assert_eq!(server_message(r#""quoted""#), "quoted");
        assert_eq!(server_message("plain text"), "plain text");
        assert_eq!(server_message("  "), FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn student_login_returns_identity() -> Result<()> {
        let rest = serve().await?;
        let identity = rest
            .login(&Credentials::new(Role::Student, "sam", "pw"))
            .await?;
        assert_eq!(identity.get("username"), Some(&json!("sam")));
        Ok(())
    }

    #[tokio::test]
    async fn student_password_is_sent_verbatim() -> Result<()> {
        let rest = serve().await?;
        let identity = rest
            .login(&Credentials::new(Role::Student, "echo", " secret "))
            .await?;
        assert_eq!(identity.get("password"), Some(&json!(" secret ")));
        Ok(())
    }

    #[tokio::test]
    async fn admin_credentials_are_trimmed() -> Result<()> {
        let rest = serve().await?;
        let identity = rest
            .login(&Credentials::new(Role::Admin, " root ", " pw "))
            .await?;
        assert_eq!(identity.get("aid"), Some(&json!(1)));
        Ok(())
    }

    #[tokio::test]
    async fn empty_login_response_is_invalid_credentials() -> Result<()> {
        let rest = serve().await?;
        let result = rest
            .login(&Credentials::new(Role::Student, "sam", "nope"))
            .await;
        assert!(matches!(result, Err(Error::Api(error::Api::InvalidCredentials))));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_carries_server_message() -> Result<()> {
        let rest = serve().await?;

        let result = rest.login(&Credentials::new(Role::Tutor, "t", "pw")).await;
        match result {
            Err(Error::Api(e)) => {
                assert!(matches!(
                    e,
                    error::Api::Server { status, .. } if status == reqwest::StatusCode::UNAUTHORIZED
                ));
                assert_eq!(e.to_string(), "Tutor not found");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let result = rest.login(&Credentials::new(Role::Admin, "a", "pw")).await;
        assert_eq!(
            result.map(|_| ()).map_err(|e| e.to_string()),
            Err(FALLBACK_MESSAGE.to_owned())
        );
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_backend_is_no_response() -> Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let rest = Rest::new(Url::parse(&format!("http://{addr}/"))?)?;
        let result = rest.login(&Credentials::new(Role::Student, "s", "p")).await;
        assert_eq!(
            result.map(|_| ()).map_err(|e| e.to_string()),
            Err("No response from server. Please try again later.".to_owned())
        );
        Ok(())
    }

    #[tokio::test]
    async fn register_posts_the_form() -> Result<()> {
        let rest = serve().await?;
        assert_eq!(
            rest.register(&registration("sam")).await?,
            json!("Student Registered Successfully")
        );

        let result = rest.register(&registration("taken")).await;
        assert_eq!(
            result.map(|_| ()).map_err(|e| e.to_string()),
            Err("Username already exists".to_owned())
        );
        Ok(())
    }

    #[tokio::test]
    async fn incomplete_registration_is_not_sent() -> Result<()> {
        // Nothing listens here; validation must fail before any request.
        let rest = Rest::new(Url::parse("http://127.0.0.1:9/")?)?;
        let mut form = registration("sam");
        form.email = String::new();
        let result = rest.register(&form).await;
        assert!(matches!(
            result,
            Err(Error::Api(error::Api::MissingField("email")))
        ));
        Ok(())
    }
}
