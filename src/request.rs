use serde::Serialize;

use crate::context::RemoteUser;

/// Body of a flag evaluation request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResolutionRequest<'a> {
    pub user: RemoteUser<'a>,
    pub default_value: serde_json::Value,
}

impl<'a> ResolutionRequest<'a> {
    pub fn new(user: RemoteUser<'a>, default_value: serde_json::Value) -> Self {
        ResolutionRequest {
            user,
            default_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{context::RemoteUser, EvaluationContext};

    use super::ResolutionRequest;

    #[test]
    fn serializes_to_relay_payload() {
        let context = EvaluationContext::new("user-1").with_attribute("anonymous", false);
        let user = RemoteUser::from_context(Some(&context)).unwrap();
        let request = ResolutionRequest::new(user, json!({"default": true}));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "user": {
                    "key": "user-1",
                    "anonymous": false,
                    "custom": {"anonymous": false},
                },
                "defaultValue": {"default": true},
            })
        );
    }

    #[test]
    fn null_default_is_sent_explicitly() {
        let context = EvaluationContext::new("user-1");
        let user = RemoteUser::from_context(Some(&context)).unwrap();
        let request = ResolutionRequest::new(user, serde_json::Value::Null);

        let payload = serde_json::to_value(&request).unwrap();
        assert_eq!(payload.get("defaultValue"), Some(&serde_json::Value::Null));
    }
}
