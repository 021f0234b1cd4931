// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::{
    collections::HashMap,
    fmt::Write as _,
    sync::Arc,
    time::{Duration, SystemTime},
};

/// Issues and verifies Ed25519-signed Biscuit bearer tokens.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
}

impl BiscuitTokenManager {
    pub fn new(private_key_hex: &str, ttl: Duration) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let keypair = KeyPair::from(&private);
        let public = keypair.public();

        Ok(Self {
            root: Arc::new(keypair),
            public,
            ttl,
        })
    }
}

fn escape_literal(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

fn build_code_and_params(
    subject: &TokenSubject,
    issued_at: SystemTime,
    expires_at: SystemTime,
) -> (String, HashMap<String, Term>) {
    let mut params: HashMap<String, Term> = HashMap::new();
    params.insert("uid".to_string(), i64::from(subject.user_id).into());
    params.insert("uname".to_string(), subject.username.clone().into());
    params.insert("urole".to_string(), subject.role.as_str().into());
    params.insert("issued".to_string(), issued_at.into());
    params.insert("exp".to_string(), expires_at.into());

    let mut code = String::from(
        r#"
        user({uid}, {uname});
        role({urole});
        issued_at({issued});
        expires_at({exp});
        check if time($now), $now >= {issued};
        check if time($now), $now <= {exp};
        "#,
    );

    if let Some(college_id) = subject.college_id {
        code.push_str("college({cid});\n");
        params.insert("cid".to_string(), college_id.into());
    }

    if let Some(sid) = subject.session_id.as_ref() {
        code.push_str("session({sid});\n");
        params.insert("sid".to_string(), sid.clone().into());
    }

    let mut rights: Vec<_> = subject.capabilities.iter().collect();
    rights.sort_by(|a, b| (&a.resource, &a.action).cmp(&(&b.resource, &b.action)));
    for cap in rights {
        let _ = writeln!(
            code,
            r#"right("{}", "{}");"#,
            escape_literal(&cap.resource),
            escape_literal(&cap.action)
        );
    }

    (code, params)
}

fn ttl_to_expires_in_seconds(ttl: Duration) -> i64 {
    ChronoDuration::from_std(ttl)
        .unwrap_or_else(|_| ChronoDuration::seconds(ttl.as_secs() as i64))
        .num_seconds()
        .max(0)
}

fn build_and_serialize_biscuit(
    code: &str,
    params: HashMap<String, Term>,
    root: &KeyPair,
) -> ApplicationResult<String> {
    let token = Biscuit::builder()
        .code_with_params(code, params, HashMap::new())
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .build(root)
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    token
        .seal()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .to_base64()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))?;
        let (code, params) = build_code_and_params(&subject, issued_at, expires_at);

        let token = build_and_serialize_biscuit(&code, params, self.root.as_ref())?;

        Ok(AuthTokenDto {
            token,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
            expires_in: ttl_to_expires_in_seconds(self.ttl),
            session_id: subject.session_id,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let biscuit = Biscuit::from_base64(token, self.public)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        // Token checks carry the expiry; the policy itself admits every verified token.
        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .code("allow if true")
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        authorizer
            .authorize()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        let (facts, _, _, _) = authorizer.dump();
        crate::infrastructure::security::claims::parse_claims(facts)
    }
}
