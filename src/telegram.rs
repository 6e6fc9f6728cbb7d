// https://core.telegram.org/bots/api#sendmessage

#[derive(Debug, serde::Serialize)]
pub(crate) struct Message<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) chat_id: Option<&'a str>,
    pub(crate) text: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum NotifyError {
    #[error("failed to reach telegram")]
    Transport(#[from] reqwest::Error),

    #[error("telegram answered with a non-JSON body (status {status})")]
    Decode {
        status: reqwest::StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode the invocation result")]
    Encode(#[source] serde_json::Error),
}

/// What Telegram made of the message. Only tells whether the request was accepted,
/// not whether anybody read it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Delivery {
    Delivered {
        response: serde_json::Value,
    },
    Rejected {
        status: reqwest::StatusCode,
        response: serde_json::Value,
    },
}

impl Delivery {
    fn classify(status: reqwest::StatusCode, response: serde_json::Value) -> Self {
        let ok = response.get("ok").and_then(serde_json::Value::as_bool) == Some(true);
        if status.is_success() && ok {
            Delivery::Delivered { response }
        } else {
            Delivery::Rejected { status, response }
        }
    }

    pub(crate) fn into_response(self) -> serde_json::Value {
        match self {
            Delivery::Delivered { response } | Delivery::Rejected { response, .. } => response,
        }
    }
}

pub(crate) fn send_message_url(api_url: &str, bot_token: &str) -> String {
    format!("{}/bot{}/sendMessage", api_url, bot_token)
}

pub(crate) async fn send_message(
    client: &reqwest::Client,
    url: &str,
    message: &Message<'_>,
) -> Result<Delivery, NotifyError> {
    let res = client.post(url).json(message).send().await?;

    // Telegram puts the reason for a rejection in the body, so the status is never
    // turned into an error here.
    let status = res.status();
    let body = res.bytes().await?;
    let response = serde_json::from_slice(&body)
        .map_err(|source| NotifyError::Decode { status, source })?;

    Ok(Delivery::classify(status, response))
}
