use std::convert::Infallible;

use axum::extract::{ Path, State };
use axum::response::sse::{ Event, Sse };
use futures::stream::Stream;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use uuid::Uuid;

use super::AppState;

/// SSE stream of this session's artifact events. This is the explicit
/// "state changed" signal the page subscribes to in place of a wholesale
/// re-render model.
pub async fn subscribe(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let rx = state.sessions.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(move |result|
        match result {
            Ok(event) if event.session_id == session_id => {
                Some(
                    Ok::<_, Infallible>(
                        Event::default()
                            .event(event.kind.as_str())
                            .data(event.session_id.to_string())
                    )
                )
            }
            // Lagged receivers drop events; the page re-fetches on the next
            // one, so skipping here is fine.
            _ => None,
        }
    );

    Sse::new(stream)
}
