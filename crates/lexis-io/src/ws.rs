use futures_util::StreamExt;
use lexis_types::Selection;
use tokio_tungstenite::connect_async;

/// Connects to a host editor bridge and reports every selection message
pub async fn start_ws_listener<F>(url: &str, mut on_selection: F) -> Result<(), anyhow::Error>
where
    F: FnMut(Selection) + Send + 'static,
{
    let (ws_stream, _) = connect_async(url).await?;
    let (_, mut read) = ws_stream.split();

    tokio::spawn(async move {
        while let Some(msg) = read.next().await {
            match msg {
                Ok(msg) if msg.is_text() => {
                    if let Ok(text) = msg.to_text() {
                        on_selection(parse_message(text));
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("WebSocket read failed: {}", e);
                    break;
                }
            }
        }
        tracing::info!("WebSocket stream closed");
    });

    Ok(())
}

/// JSON selection messages are decoded, anything else is taken as selected plain text
pub fn parse_message(text: &str) -> Selection {
    match serde_json::from_str::<Selection>(text) {
        Ok(selection) => selection,
        Err(_) => Selection::text(text),
    }
}
