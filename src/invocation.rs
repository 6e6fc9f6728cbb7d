pub(crate) const MORNING_GREETING: &str =
    "🌅 Good morning! Wishing you a productive trading day ahead.";

/// The shape handed back to the hosting platform. `body` is itself a JSON document
/// serialized to a string.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvocationResult {
    pub(crate) status_code: u16,
    pub(crate) body: String,
}

#[derive(Debug, serde::Serialize)]
struct SentBody {
    sent: bool,
    data: serde_json::Value,
}

/// Sends the morning greeting once.
///
/// The result always reports `statusCode: 200` and `sent: true` once Telegram answered
/// with JSON, even when it refused the message. Callers that need the real outcome have
/// to look at `data.ok`. Only a failed request or an undecodable answer is an error.
pub(crate) async fn invoke(
    client: &reqwest::Client,
    config: &crate::config::Config,
) -> Result<InvocationResult, crate::telegram::NotifyError> {
    let url = crate::telegram::send_message_url(&config.telegram_api_url, &config.bot_token);
    let message = crate::telegram::Message {
        chat_id: config.chat_id.as_deref(),
        text: MORNING_GREETING,
    };

    tracing::info!(chat_id = config.chat_id.as_deref(), "Sending morning greeting");
    let delivery = crate::telegram::send_message(client, &url, &message).await?;

    match &delivery {
        crate::telegram::Delivery::Delivered { .. } => {
            tracing::info!(chat_id = config.chat_id.as_deref(), "Telegram accepted the message")
        }
        crate::telegram::Delivery::Rejected { status, response } => tracing::warn!(
            chat_id = config.chat_id.as_deref(),
            status = status.as_u16(),
            response = %response,
            "Telegram rejected the message"
        ),
    }

    let body = serde_json::to_string(&SentBody {
        sent: true,
        data: delivery.into_response(),
    })
    .map_err(crate::telegram::NotifyError::Encode)?;

    Ok(InvocationResult {
        status_code: 200,
        body,
    })
}
