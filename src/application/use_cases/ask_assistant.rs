use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::application::{ChatbotTransport, IdentityProvider, TransportResponse};
use crate::domain::{AssistError, AssistRequest, AssistResult, ChatMessage, UserIdentity};

pub const CHATBOT_PATH: &str = "/chatbot";

/// Use case for sending the latest chat message to the finance assistant.
///
/// Every failure (no session, unreachable backend, bad status, unparseable
/// body) is folded into an [`AssistResult::Failure`] whose message can be shown
/// to the user as-is. The detail behind it only goes to the log.
///
/// Holds no mutable state, so a single instance can serve concurrent callers.
pub struct AskAssistantUseCase {
    identity: Arc<dyn IdentityProvider>,
    transport: Arc<dyn ChatbotTransport>,
}

impl AskAssistantUseCase {
    pub fn new(identity: Arc<dyn IdentityProvider>, transport: Arc<dyn ChatbotTransport>) -> Self {
        Self {
            identity,
            transport,
        }
    }

    pub async fn execute(
        &self,
        messages: &[ChatMessage],
        target_lang: &str,
        grounding: Option<&Value>,
    ) -> AssistResult {
        match self.try_execute(messages, target_lang, grounding).await {
            Ok(payload) => AssistResult::Success(payload),
            Err(e) => {
                error!("askAssistant failed ({}): {e}", e.kind());
                AssistResult::failure(e.kind(), e.user_message())
            }
        }
    }

    async fn try_execute(
        &self,
        messages: &[ChatMessage],
        target_lang: &str,
        grounding: Option<&Value>,
    ) -> Result<Value, AssistError> {
        let user = self.resolve_user().await?;

        let message = ChatMessage::latest_content(messages);
        let request = AssistRequest::new(&user, message, target_lang, grounding.cloned());
        debug!(
            "Asking finance assistant for user {} (intent: {}, lang: {})",
            request.user_id(),
            request.intent(),
            request.target_lang()
        );

        let body = request
            .to_json()
            .map_err(|e| AssistError::Unexpected(format!("failed to encode request: {e}")))?;

        let response = self
            .transport
            .post_json(CHATBOT_PATH, &body)
            .await
            .map_err(|e| AssistError::Transport(e.to_string()))?;

        Self::interpret(response)
    }

    async fn resolve_user(&self) -> Result<UserIdentity, AssistError> {
        match self.identity.current_user().await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AssistError::Auth("no active session".to_string())),
            Err(e) => Err(AssistError::Auth(e.to_string())),
        }
    }

    /// Classify a raw response: missing status, status 0, non-2xx, then the
    /// JSON body of a successful reply.
    pub fn interpret(response: TransportResponse) -> Result<Value, AssistError> {
        let status = response.status.ok_or(AssistError::MalformedResponse)?;

        if status == 0 {
            return Err(AssistError::ZeroStatus);
        }

        if !response.is_success() {
            let body = response.body.unwrap_or_default();
            if status == 429 {
                return Err(AssistError::RateLimited { body });
            }
            warn!("Finance assistant returned {status}: {body}");
            return Err(AssistError::Server { status, body });
        }

        let body = response
            .body
            .ok_or_else(|| AssistError::Unexpected("response body could not be read".to_string()))?;

        serde_json::from_str(&body)
            .map_err(|e| AssistError::Unexpected(format!("failed to parse response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::application::TransportError;
    use crate::domain::{
        AssistFailureKind, DomainError, ALLOW_COMMENTARY_RULE, GENERIC_FAILURE_MESSAGE,
        NETWORK_FAILED_MESSAGE, NO_STATUS_MESSAGE, NO_USER_MESSAGE, RATE_LIMIT_MESSAGE,
        SUPPRESS_COMMENTARY_RULE, TRY_AGAIN_SUFFIX, ZERO_STATUS_MESSAGE,
    };

    enum Session {
        LoggedIn(&'static str),
        LoggedOut,
        Broken,
    }

    struct FakeIdentity(Session);

    #[async_trait]
    impl IdentityProvider for FakeIdentity {
        async fn current_user(&self) -> Result<Option<UserIdentity>, DomainError> {
            match self.0 {
                Session::LoggedIn(id) => Ok(Some(UserIdentity::new(id))),
                Session::LoggedOut => Ok(None),
                Session::Broken => Err(DomainError::auth("session store unavailable")),
            }
        }
    }

    struct FakeTransport {
        reply: Box<dyn Fn() -> Result<TransportResponse, TransportError> + Send + Sync>,
        calls: AtomicUsize,
        bodies: Mutex<Vec<(String, Value)>>,
    }

    impl FakeTransport {
        fn replying(
            reply: impl Fn() -> Result<TransportResponse, TransportError> + Send + Sync + 'static,
        ) -> Arc<Self> {
            Arc::new(Self {
                reply: Box::new(reply),
                calls: AtomicUsize::new(0),
                bodies: Mutex::new(Vec::new()),
            })
        }

        fn with_status(status: u16, body: &'static str) -> Arc<Self> {
            Self::replying(move || Ok(TransportResponse::new(status, body)))
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_body(&self) -> Value {
            self.bodies.lock().unwrap().last().unwrap().1.clone()
        }
    }

    #[async_trait]
    impl ChatbotTransport for FakeTransport {
        async fn post_json(
            &self,
            path: &str,
            body: &Value,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.bodies
                .lock()
                .unwrap()
                .push((path.to_string(), body.clone()));
            (self.reply)()
        }
    }

    fn use_case(session: Session, transport: Arc<FakeTransport>) -> AskAssistantUseCase {
        AskAssistantUseCase::new(Arc::new(FakeIdentity(session)), transport)
    }

    fn history(text: &str) -> Vec<ChatMessage> {
        vec![ChatMessage::assistant("Hi! How can I help?"), ChatMessage::user(text)]
    }

    #[tokio::test]
    async fn test_logged_out_user_never_reaches_network() {
        let transport = FakeTransport::with_status(200, "{}");
        let result = use_case(Session::LoggedOut, transport.clone())
            .execute(&history("hello"), "en", None)
            .await;

        assert_eq!(result.message(), Some(NO_USER_MESSAGE));
        assert_eq!(result.failure_kind(), Some(AssistFailureKind::AuthFailure));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_identity_error_treated_as_logged_out() {
        let transport = FakeTransport::with_status(200, "{}");
        let result = use_case(Session::Broken, transport.clone())
            .execute(&history("hello"), "en", None)
            .await;

        assert_eq!(result.message(), Some(NO_USER_MESSAGE));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_payload_passed_through() {
        let transport =
            FakeTransport::with_status(200, r#"{"reply":"Your Food budget limit is Rs. 5000"}"#);
        let result = use_case(Session::LoggedIn("u-1"), transport.clone())
            .execute(&history("What is my food budget?"), "en", None)
            .await;

        assert_eq!(
            result,
            AssistResult::Success(json!({"reply": "Your Food budget limit is Rs. 5000"}))
        );
        assert_eq!(transport.call_count(), 1);
        assert_eq!(transport.bodies.lock().unwrap()[0].0, CHATBOT_PATH);
    }

    #[tokio::test]
    async fn test_request_body_carries_identity_and_budget_policy() {
        let transport = FakeTransport::with_status(200, "{}");
        let grounding = json!({"smartPlan": {"Groceries": 12000}});
        use_case(Session::LoggedIn("u-7"), transport.clone())
            .execute(&history("What is my budget for groceries?"), "ta", Some(&grounding))
            .await;

        let body = transport.last_body();
        assert_eq!(body["user_id"], "u-7");
        assert_eq!(body["message"], "What is my budget for groceries?");
        assert_eq!(body["targetLang"], "ta");
        assert_eq!(body["grounding"], grounding);
        let instructions = body["control_instructions"].as_str().unwrap();
        assert!(instructions.contains(SUPPRESS_COMMENTARY_RULE));
    }

    #[tokio::test]
    async fn test_general_question_allows_commentary() {
        let transport = FakeTransport::with_status(200, "{}");
        use_case(Session::LoggedIn("u-7"), transport.clone())
            .execute(&history("How can I save more this month?"), "en", None)
            .await;

        let instructions = transport.last_body()["control_instructions"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(instructions.contains(ALLOW_COMMENTARY_RULE));
        assert!(!instructions.contains(SUPPRESS_COMMENTARY_RULE));
    }

    #[tokio::test]
    async fn test_empty_history_sends_empty_message() {
        let transport = FakeTransport::with_status(200, r#"{"reply":"Ask me anything"}"#);
        let result = use_case(Session::LoggedIn("u-1"), transport.clone())
            .execute(&[], "en", None)
            .await;

        assert!(result.is_success());
        assert_eq!(transport.last_body()["message"], "");
        assert!(transport.last_body().get("grounding").is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_hides_detail() {
        let transport = FakeTransport::replying(|| {
            Err(TransportError("error trying to connect: tcp connect error".to_string()))
        });
        let result = use_case(Session::LoggedIn("u-1"), transport)
            .execute(&history("hi"), "en", None)
            .await;

        assert_eq!(result.message(), Some(NETWORK_FAILED_MESSAGE));
        assert_eq!(result.failure_kind(), Some(AssistFailureKind::TransportFailure));
    }

    #[tokio::test]
    async fn test_missing_and_zero_status_are_distinct() {
        let no_status = FakeTransport::replying(|| {
            Ok(TransportResponse {
                status: None,
                body: None,
            })
        });
        let result = use_case(Session::LoggedIn("u-1"), no_status)
            .execute(&history("hi"), "en", None)
            .await;
        assert_eq!(result.message(), Some(NO_STATUS_MESSAGE));

        let zero = FakeTransport::with_status(0, "");
        let result = use_case(Session::LoggedIn("u-1"), zero)
            .execute(&history("hi"), "en", None)
            .await;
        assert_eq!(result.message(), Some(ZERO_STATUS_MESSAGE));
        assert_eq!(result.failure_kind(), Some(AssistFailureKind::ZeroStatusFailure));
    }

    #[tokio::test]
    async fn test_rate_limit_ignores_body() {
        let transport = FakeTransport::with_status(429, r#"{"error":"RESOURCE_EXHAUSTED"}"#);
        let result = use_case(Session::LoggedIn("u-1"), transport)
            .execute(&history("hi"), "en", None)
            .await;

        assert_eq!(result.message(), Some(RATE_LIMIT_MESSAGE));
        assert_eq!(result.failure_kind(), Some(AssistFailureKind::RateLimitFailure));
    }

    #[tokio::test]
    async fn test_server_error_suffix_and_sanitizing() {
        let empty = FakeTransport::with_status(500, "");
        let result = use_case(Session::LoggedIn("u-1"), empty)
            .execute(&history("hi"), "en", None)
            .await;
        let message = result.message().unwrap();
        assert!(message.contains("status 500"));
        assert!(!message.contains(TRY_AGAIN_SUFFIX));

        let detailed = FakeTransport::with_status(500, "Traceback: KeyError 'smartPlan'");
        let result = use_case(Session::LoggedIn("u-1"), detailed)
            .execute(&history("hi"), "en", None)
            .await;
        let message = result.message().unwrap();
        assert!(message.contains("status 500"));
        assert!(message.contains(TRY_AGAIN_SUFFIX));
        assert!(!message.contains("KeyError"));
        assert_eq!(result.failure_kind(), Some(AssistFailureKind::ServerErrorFailure));
    }

    #[tokio::test]
    async fn test_malformed_success_body_falls_back_to_generic_message() {
        let transport = FakeTransport::with_status(200, "<html>Bad Gateway</html>");
        let result = use_case(Session::LoggedIn("u-1"), transport)
            .execute(&history("hi"), "en", None)
            .await;

        assert_eq!(result.message(), Some(GENERIC_FAILURE_MESSAGE));
        assert_eq!(result.failure_kind(), Some(AssistFailureKind::UnexpectedFailure));
    }

    #[tokio::test]
    async fn test_unreadable_success_body_is_unexpected() {
        let transport = FakeTransport::replying(|| {
            Ok(TransportResponse {
                status: Some(200),
                body: None,
            })
        });
        let result = use_case(Session::LoggedIn("u-1"), transport)
            .execute(&history("hi"), "en", None)
            .await;

        assert_eq!(result.message(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let transport = FakeTransport::with_status(200, r#"{"reply":"ok"}"#);
        let use_case = use_case(Session::LoggedIn("u-1"), transport.clone());

        let first = history("What is my budget?");
        let second = history("Any tips?");
        let (a, b) = tokio::join!(
            use_case.execute(&first, "en", None),
            use_case.execute(&second, "en", None),
        );

        assert!(a.is_success() && b.is_success());
        assert_eq!(transport.call_count(), 2);
    }
}
